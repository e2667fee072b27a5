//! Resource mapping over the shop webservice.
//!
//! This module turns resource metadata into transport calls:
//!
//! - **[`ResourceMapper`]**: generic CRUD for one entity type
//! - **[`QueryOptions`]**: filters, display, paging and sort for reads
//! - **[`normalize()`]** and **[`QueryResult`]**: collection reads folded into a list
//! - **Payload helpers**: [`merge_attributes`], [`build_update_payload`],
//!   [`build_create_payload`], [`language_value`], [`id_refs`]
//! - **[`ResourceError`]**: error types for resource operations
//! - **[`resources`]**: concrete resources (taxes, countries, images, ...)
//!
//! # Example
//!
//! ```rust,ignore
//! use prestashop_mapper::rest::resources::Tax;
//! use prestashop_mapper::rest::{Display, QueryOptions, QueryResult};
//! use serde_json::json;
//!
//! // Ids only
//! let ids = Tax::MAPPER.all(&client, QueryOptions::new()).await?;
//!
//! // Full records of active taxes
//! let active = Tax::MAPPER
//!     .query(&client, QueryOptions::new().filter("active", 1).display(Display::Full))
//!     .await?;
//!
//! // Partial update; other fields keep their current values
//! let changes = json!({"rate": "21.000"}).as_object().cloned().unwrap_or_default();
//! let updated = Tax::MAPPER.update(&client, 1, changes).await?;
//! ```

mod descriptor;
mod errors;
mod finders;
pub(crate) mod normalize;
mod payload;
mod query;
mod resource;

pub mod resources;

pub use descriptor::{CanonicalFn, ResourceDescriptor, ResourceId};
pub use errors::ResourceError;
pub use normalize::{normalize, QueryItem, QueryResult};
pub use payload::{
    build_create_payload, build_update_payload, id_ref, id_refs, language_value,
    merge_attributes,
};
pub use query::{Display, QueryOptions, SchemaKind};
pub use resource::{required_fields_in, ResourceMapper};
