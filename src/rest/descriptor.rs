//! Static per-resource metadata.

use crate::xml::AttributeSet;

/// Identifier of a remote entity.
pub type ResourceId = u64;

/// Turns a fetched entity into the state an update starts from.
///
/// Typical hooks drop read-only fields the shop rejects on write.
pub type CanonicalFn = fn(AttributeSet) -> AttributeSet;

/// Names and hooks describing one entity type.
///
/// One descriptor exists per entity type and is fixed at compile time.
///
/// # Example
///
/// ```rust
/// use prestashop_mapper::rest::ResourceDescriptor;
///
/// const TAXES: ResourceDescriptor = ResourceDescriptor::new("taxes", "tax");
/// assert_eq!(TAXES.resource, "taxes");
/// assert_eq!(TAXES.model, "tax");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ResourceDescriptor {
    /// Plural REST path segment (e.g. `taxes`).
    pub resource: &'static str,
    /// Singular element name (e.g. `tax`).
    pub model: &'static str,
    /// Optional hook computing the canonical current state for updates.
    pub canonical: Option<CanonicalFn>,
}

impl ResourceDescriptor {
    /// Creates a descriptor without a canonical-state hook.
    #[must_use]
    pub const fn new(resource: &'static str, model: &'static str) -> Self {
        Self {
            resource,
            model,
            canonical: None,
        }
    }

    /// Sets the canonical-state hook.
    #[must_use]
    pub const fn with_canonical(mut self, canonical: CanonicalFn) -> Self {
        self.canonical = Some(canonical);
        self
    }

    /// Applies the canonical-state hook, if any.
    #[must_use]
    pub fn canonicalize(&self, attributes: AttributeSet) -> AttributeSet {
        match self.canonical {
            Some(canonical) => canonical(attributes),
            None => attributes,
        }
    }
}
