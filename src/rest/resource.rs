//! The generic CRUD protocol shared by every resource.
//!
//! A [`ResourceMapper`] is a [`ResourceDescriptor`] plus the operations that
//! turn it into transport calls. Concrete resources hold one as a constant
//! and add their own lookups on top:
//!
//! ```rust,ignore
//! use prestashop_mapper::rest::{Display, QueryOptions, ResourceMapper};
//!
//! pub struct Manufacturer;
//!
//! impl Manufacturer {
//!     pub const MAPPER: ResourceMapper = ResourceMapper::new("manufacturers", "manufacturer");
//! }
//!
//! // Usage:
//! let ids = Manufacturer::MAPPER.all(&client, QueryOptions::new()).await?;
//! let bmw = Manufacturer::MAPPER.find(&client, 3).await?;
//! let named = Manufacturer::MAPPER
//!     .query(&client, QueryOptions::new().filter("name", "BMW").display(Display::Full))
//!     .await?;
//! ```

use std::collections::BTreeSet;

use serde_json::Value;

use crate::clients::Transport;
use crate::rest::payload::{build_create_payload, build_update_payload};
use crate::rest::{
    normalize, CanonicalFn, QueryItem, QueryOptions, QueryResult, ResourceDescriptor,
    ResourceError, ResourceId, SchemaKind,
};
use crate::xml::{AttributeSet, ParsedDocument, ATTR_KEY};

/// CRUD operations for one entity type.
///
/// Every operation takes the transport explicitly; the mapper holds no
/// state beyond its descriptor.
#[derive(Clone, Copy, Debug)]
pub struct ResourceMapper {
    descriptor: ResourceDescriptor,
}

impl ResourceMapper {
    /// Creates a mapper for the `resource` collection of `model` entities.
    #[must_use]
    pub const fn new(resource: &'static str, model: &'static str) -> Self {
        Self {
            descriptor: ResourceDescriptor::new(resource, model),
        }
    }

    /// Creates a mapper from a descriptor.
    #[must_use]
    pub const fn from_descriptor(descriptor: ResourceDescriptor) -> Self {
        Self { descriptor }
    }

    /// Sets the hook computing the state an update starts from.
    #[must_use]
    pub const fn with_canonical(self, canonical: CanonicalFn) -> Self {
        Self {
            descriptor: self.descriptor.with_canonical(canonical),
        }
    }

    /// Returns the descriptor.
    #[must_use]
    pub const fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    /// Returns the plural resource name.
    #[must_use]
    pub const fn resource(&self) -> &'static str {
        self.descriptor.resource
    }

    /// Returns the singular model name.
    #[must_use]
    pub const fn model(&self) -> &'static str {
        self.descriptor.model
    }

    /// Checks whether entity `id` exists.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Transport`] if the check fails.
    pub async fn exists<T: Transport>(
        &self,
        client: &T,
        id: ResourceId,
    ) -> Result<bool, ResourceError> {
        Ok(client.check(self.resource(), id).await?)
    }

    /// Reads entity `id`.
    ///
    /// Returns `Ok(None)` when the shop has no such entity.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Transport`] if the read fails for any other
    /// reason.
    pub async fn find<T: Transport>(
        &self,
        client: &T,
        id: ResourceId,
    ) -> Result<Option<AttributeSet>, ResourceError> {
        let document = client
            .read(self.resource(), Some(id), &QueryOptions::new())
            .await?;
        Ok(document.and_then(|document| self.entity(document)))
    }

    /// Returns the first entity matching `options`, reading at most one.
    ///
    /// The item is an id or a record following the same rule as
    /// [`query`](Self::query).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Transport`] if the read fails.
    pub async fn find_by<T: Transport>(
        &self,
        client: &T,
        options: QueryOptions,
    ) -> Result<Option<QueryItem>, ResourceError> {
        let result = self.query(client, options.limit(1)).await?;
        Ok(result.into_first())
    }

    /// Reads the collection with `options`.
    ///
    /// The result is always a list. Without a display option it holds ids
    /// ([`QueryResult::Ids`]); with one it holds attribute maps
    /// ([`QueryResult::Records`]).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Transport`] if the read fails.
    pub async fn query<T: Transport>(
        &self,
        client: &T,
        options: QueryOptions,
    ) -> Result<QueryResult, ResourceError> {
        tracing::debug!(
            resource = self.resource(),
            filters = options.filters().len(),
            display = options.has_display(),
            "querying collection"
        );

        let document = client.read(self.resource(), None, &options).await?;
        let document = document.unwrap_or_default();
        Ok(normalize(&self.descriptor, &document, &options))
    }

    /// Reads the whole collection; [`query`](Self::query) without filters.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Transport`] if the read fails.
    pub async fn all<T: Transport>(
        &self,
        client: &T,
        options: QueryOptions,
    ) -> Result<QueryResult, ResourceError> {
        self.query(client, options).await
    }

    /// Deletes entity `id`, returning what the transport reports.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Transport`] if the delete fails.
    pub async fn destroy<T: Transport>(
        &self,
        client: &T,
        id: ResourceId,
    ) -> Result<bool, ResourceError> {
        Ok(client.delete(self.resource(), id).await?)
    }

    /// Creates an entity from `attributes` as given.
    ///
    /// Returns the entity as echoed by the shop, or `None` if the answer
    /// holds no such entity.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Payload`] if the payload cannot be built and
    /// [`ResourceError::Transport`] if the call fails.
    pub async fn create<T: Transport>(
        &self,
        client: &T,
        attributes: &AttributeSet,
    ) -> Result<Option<AttributeSet>, ResourceError> {
        let payload = build_create_payload(&self.descriptor, attributes)?;
        tracing::debug!(resource = self.resource(), "creating entity");

        let document = client.create(self.resource(), payload).await?;
        Ok(document.and_then(|document| self.entity(document)))
    }

    /// Updates entity `id` with `partial` merged over its current state.
    ///
    /// The current state is fetched and passed through the descriptor's
    /// canonical hook.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the entity does not exist,
    /// [`ResourceError::Payload`] if the payload cannot be built and
    /// [`ResourceError::Transport`] if a call fails.
    pub async fn update<T: Transport>(
        &self,
        client: &T,
        id: ResourceId,
        partial: AttributeSet,
    ) -> Result<Option<AttributeSet>, ResourceError> {
        let payload = self.update_payload(client, id, partial).await?;
        self.send_update(client, id, payload).await
    }

    /// Updates entity `id` with `partial` merged over a caller-supplied
    /// `current` state. Nothing is fetched.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Payload`] if the payload cannot be built and
    /// [`ResourceError::Transport`] if the call fails.
    pub async fn update_with<T: Transport>(
        &self,
        client: &T,
        id: ResourceId,
        current: AttributeSet,
        partial: AttributeSet,
    ) -> Result<Option<AttributeSet>, ResourceError> {
        let payload = build_update_payload(&self.descriptor, id, Some(current), partial)?;
        self.send_update(client, id, payload).await
    }

    /// Builds the payload [`update`](Self::update) would send, without
    /// sending it.
    ///
    /// # Errors
    ///
    /// Same as [`update`](Self::update), minus the update call itself.
    pub async fn update_payload<T: Transport>(
        &self,
        client: &T,
        id: ResourceId,
        partial: AttributeSet,
    ) -> Result<String, ResourceError> {
        let current = self
            .find(client, id)
            .await?
            .map(|current| self.descriptor.canonicalize(current));
        build_update_payload(&self.descriptor, id, current, partial)
    }

    /// Reads the blank schema, or the synopsis schema with per-field
    /// `format` and `required` attributes.
    ///
    /// Returns the model's field map; empty if the shop sent none.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Transport`] if the read fails.
    pub async fn schema<T: Transport>(
        &self,
        client: &T,
        include_synopsis: bool,
    ) -> Result<AttributeSet, ResourceError> {
        let kind = if include_synopsis {
            SchemaKind::Synopsis
        } else {
            SchemaKind::Blank
        };
        let options = QueryOptions::new().schema(kind);

        let document = client.read(self.resource(), None, &options).await?;
        Ok(document
            .and_then(|document| self.entity(document))
            .unwrap_or_default())
    }

    /// Returns the names of the fields the synopsis schema marks required.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Transport`] if the schema read fails.
    pub async fn required_fields<T: Transport>(
        &self,
        client: &T,
    ) -> Result<BTreeSet<String>, ResourceError> {
        let schema = self.schema(client, true).await?;
        Ok(required_fields_in(&schema))
    }

    async fn send_update<T: Transport>(
        &self,
        client: &T,
        id: ResourceId,
        payload: String,
    ) -> Result<Option<AttributeSet>, ResourceError> {
        tracing::debug!(resource = self.resource(), id, "updating entity");
        let document = client.update(self.resource(), id, payload).await?;
        Ok(document.and_then(|document| self.entity(document)))
    }

    /// Takes this model's entity out of a single-entity document.
    fn entity(&self, mut document: ParsedDocument) -> Option<AttributeSet> {
        match document.remove(self.model()) {
            Some(Value::Object(entity)) => Some(entity),
            _ => None,
        }
    }
}

/// Returns the fields of a synopsis schema whose `attr.required` is set.
///
/// # Example
///
/// ```rust
/// use prestashop_mapper::rest::required_fields_in;
/// use serde_json::json;
///
/// let schema = json!({
///     "id": null,
///     "rate": {"attr": {"format": "isFloat", "required": true}},
///     "active": {"attr": {"format": "isBool"}}
/// });
/// let required = required_fields_in(schema.as_object().unwrap());
/// assert_eq!(required.into_iter().collect::<Vec<_>>(), vec!["rate".to_string()]);
/// ```
#[must_use]
pub fn required_fields_in(schema: &AttributeSet) -> BTreeSet<String> {
    schema
        .iter()
        .filter(|(_, field)| {
            field
                .get(ATTR_KEY)
                .and_then(|attr| attr.get("required"))
                .is_some_and(is_truthy)
        })
        .map(|(name, _)| name.clone())
        .collect()
}

fn is_truthy(flag: &Value) -> bool {
    match flag {
        Value::Bool(flag) => *flag,
        Value::String(text) => text == "true" || text == "1",
        Value::Number(number) => number.as_u64() == Some(1),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mapper_names() {
        const TAXES: ResourceMapper = ResourceMapper::new("taxes", "tax");
        assert_eq!(TAXES.resource(), "taxes");
        assert_eq!(TAXES.model(), "tax");
        assert!(TAXES.descriptor().canonical.is_none());
    }

    #[test]
    fn test_entity_extraction() {
        let mapper = ResourceMapper::new("taxes", "tax");
        let document = json!({"tax": {"id": 1}}).as_object().cloned().unwrap();
        assert_eq!(
            mapper.entity(document).map(Value::Object),
            Some(json!({"id": 1}))
        );

        let document = json!({"tax": null}).as_object().cloned().unwrap();
        assert!(mapper.entity(document).is_none());
    }

    #[test]
    fn test_required_fields_accepts_flag_spellings() {
        let schema = json!({
            "id_feature": {"attr": {"required": true}},
            "custom": {"attr": {"required": "true"}},
            "value": {"attr": {"required": 1}},
            "position": {"attr": {"required": false}},
            "deleted": {"attr": {}},
            "id": null,
            "name": "text"
        });
        let required = required_fields_in(schema.as_object().unwrap());
        assert_eq!(
            required.into_iter().collect::<Vec<_>>(),
            vec!["custom", "id_feature", "value"]
        );
    }
}
