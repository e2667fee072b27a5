//! Resource-specific error types.
//!
//! Reads never fail on "not found"; they answer `None` or an empty list.
//! The variants below cover what is left:
//!
//! - [`ResourceError::NotFound`]: an entity that had to exist is gone
//!   (e.g. the target of an update vanished)
//! - [`ResourceError::Validation`]: an attribute fails a model's own
//!   invariant, raised before any network call
//! - [`ResourceError::Transport`]: transport failures, surfaced unchanged
//! - [`ResourceError::Payload`]: the wire payload could not be written
//!
//! # Example
//!
//! ```rust,ignore
//! use prestashop_mapper::rest::ResourceError;
//!
//! match Tax::MAPPER.update(&client, 3, attributes).await {
//!     Ok(updated) => println!("updated: {updated:?}"),
//!     Err(ResourceError::NotFound { resource, id }) => {
//!         println!("{resource} {id} disappeared");
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::TransportError;
use crate::rest::ResourceId;
use crate::xml::XmlError;

/// Error type for resource operations.
///
/// # Example
///
/// ```rust
/// use prestashop_mapper::rest::ResourceError;
///
/// let error = ResourceError::NotFound { resource: "taxes", id: 12 };
/// assert_eq!(error.to_string(), "taxes with id 12 not found");
///
/// let error = ResourceError::Validation {
///     model: "product_feature_value",
///     field: "custom",
///     reason: "must be 0 or 1".to_string(),
/// };
/// assert!(error.to_string().contains("custom"));
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The entity was expected to exist but the shop has no such id.
    #[error("{resource} with id {id} not found")]
    NotFound {
        /// The resource name (e.g. "taxes").
        resource: &'static str,
        /// The id that was requested.
        id: ResourceId,
    },

    /// An attribute failed the model's own checks.
    #[error("Invalid {model}.{field}: {reason}")]
    Validation {
        /// The model name (e.g. "product_feature_value").
        model: &'static str,
        /// The offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// A transport-level error occurred.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The wire payload could not be built.
    #[error("Failed to build payload: {0}")]
    Payload(#[from] XmlError),
}

impl ResourceError {
    /// Returns the HTTP status code if this error came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};
