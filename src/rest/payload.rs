//! Payload building for create and update calls.
//!
//! Updates replace the whole entity on the shop side, so an update payload
//! is the entity's current state with the caller's changes merged on top.
//! Creates send the given attributes as they are.

use serde_json::{json, Value};

use crate::config::LanguageId;
use crate::rest::{ResourceDescriptor, ResourceError, ResourceId};
use crate::xml::{self, AttributeSet};

/// Shallow-merges `partial` over `current`.
///
/// Keys in `partial` win; every other key of `current` is kept. Existing
/// keys keep their position, new keys are appended.
///
/// # Example
///
/// ```rust
/// use prestashop_mapper::rest::merge_attributes;
/// use serde_json::json;
///
/// let current = json!({"id": 1, "name": "BMW", "active": 1}).as_object().unwrap().clone();
/// let partial = json!({"name": "BMW 7"}).as_object().unwrap().clone();
///
/// let merged = merge_attributes(current, partial);
/// assert_eq!(serde_json::Value::Object(merged), json!({"id": 1, "name": "BMW 7", "active": 1}));
/// ```
#[must_use]
pub fn merge_attributes(mut current: AttributeSet, partial: AttributeSet) -> AttributeSet {
    for (key, value) in partial {
        current.insert(key, value);
    }
    current
}

/// Builds the update payload for entity `id`.
///
/// `current` is the entity's canonical state; `None` means it vanished.
///
/// # Errors
///
/// Returns [`ResourceError::NotFound`] when `current` is `None`, and
/// [`ResourceError::Payload`] when the payload cannot be written.
pub fn build_update_payload(
    descriptor: &ResourceDescriptor,
    id: ResourceId,
    current: Option<AttributeSet>,
    partial: AttributeSet,
) -> Result<String, ResourceError> {
    let current = current.ok_or(ResourceError::NotFound {
        resource: descriptor.resource,
        id,
    })?;

    let merged = merge_attributes(current, partial);
    Ok(xml::build(descriptor.model, &merged)?)
}

/// Builds the create payload from `attributes` unchanged.
///
/// # Errors
///
/// Returns [`ResourceError::Payload`] when the payload cannot be written.
pub fn build_create_payload(
    descriptor: &ResourceDescriptor,
    attributes: &AttributeSet,
) -> Result<String, ResourceError> {
    Ok(xml::build(descriptor.model, attributes)?)
}

/// Wraps `value` as a multilingual field for one language.
///
/// # Example
///
/// ```rust
/// use prestashop_mapper::rest::language_value;
/// use prestashop_mapper::LanguageId;
/// use serde_json::json;
///
/// let value = language_value("Cotton", LanguageId::new(2).unwrap());
/// assert_eq!(value, json!({"language": {"attr": {"id": 2}, "val": "Cotton"}}));
/// ```
#[must_use]
pub fn language_value(value: impl Into<Value>, language: LanguageId) -> Value {
    json!({
        "language": {
            "attr": { "id": language.get() },
            "val": value.into(),
        }
    })
}

/// Builds an association reference `{id: id}`.
#[must_use]
pub fn id_ref(id: ResourceId) -> Value {
    json!({ "id": id })
}

/// Builds a list of association references.
///
/// Duplicate ids are dropped; the first occurrence keeps its position.
///
/// # Example
///
/// ```rust
/// use prestashop_mapper::rest::id_refs;
/// use serde_json::json;
///
/// assert_eq!(id_refs([3, 1, 3, 2]), json!([{"id": 3}, {"id": 1}, {"id": 2}]));
/// ```
#[must_use]
pub fn id_refs(ids: impl IntoIterator<Item = ResourceId>) -> Value {
    let mut seen = Vec::new();
    for id in ids {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    Value::Array(seen.into_iter().map(id_ref).collect())
}
