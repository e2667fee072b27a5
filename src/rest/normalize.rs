//! Response normalization for collection reads.
//!
//! Collection reads come back in several shapes: the collection element may
//! be missing or empty, hold one entity, or hold a list of them. Depending on
//! the read options the entities are bare references (`<tax id="1"/>`) or
//! full attribute maps. [`normalize`] folds all of them into a
//! [`QueryResult`], which is always a list.

use serde_json::Value;

use crate::rest::{QueryOptions, ResourceDescriptor, ResourceId};
use crate::xml::{AttributeSet, ParsedDocument, ATTR_KEY};

/// The outcome of a collection read.
///
/// Which variant comes back is decided by the read options alone: without
/// a display option the shop answers with references and the result is
/// [`Ids`](Self::Ids); with one it answers with entities and the result is
/// [`Records`](Self::Records).
#[derive(Clone, Debug, PartialEq)]
pub enum QueryResult {
    /// Entity ids, in response order.
    Ids(Vec<ResourceId>),
    /// Entity attribute maps, in response order.
    Records(Vec<AttributeSet>),
}

/// One element of a [`QueryResult`].
#[derive(Clone, Debug, PartialEq)]
pub enum QueryItem {
    /// An entity id.
    Id(ResourceId),
    /// An entity attribute map.
    Record(AttributeSet),
}

impl QueryItem {
    /// Returns the id: the item itself or the record's `id` field.
    #[must_use]
    pub fn id(&self) -> Option<ResourceId> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Record(record) => record.get("id").and_then(id_value),
        }
    }

    /// Returns the record, if this item is one.
    #[must_use]
    pub fn into_record(self) -> Option<AttributeSet> {
        match self {
            Self::Id(_) => None,
            Self::Record(record) => Some(record),
        }
    }
}

impl QueryResult {
    /// Returns the number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Ids(ids) => ids.len(),
            Self::Records(records) => records.len(),
        }
    }

    /// Returns `true` if the read matched nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the ids, if this result holds ids.
    #[must_use]
    pub fn ids(&self) -> Option<&[ResourceId]> {
        match self {
            Self::Ids(ids) => Some(ids),
            Self::Records(_) => None,
        }
    }

    /// Returns the records, if this result holds records.
    #[must_use]
    pub fn records(&self) -> Option<&[AttributeSet]> {
        match self {
            Self::Ids(_) => None,
            Self::Records(records) => Some(records),
        }
    }

    /// Takes the first entity.
    #[must_use]
    pub fn into_first(self) -> Option<QueryItem> {
        match self {
            Self::Ids(ids) => ids.into_iter().next().map(QueryItem::Id),
            Self::Records(records) => records.into_iter().next().map(QueryItem::Record),
        }
    }
}

impl IntoIterator for QueryResult {
    type Item = QueryItem;
    type IntoIter = std::vec::IntoIter<QueryItem>;

    fn into_iter(self) -> Self::IntoIter {
        let items: Vec<QueryItem> = match self {
            Self::Ids(ids) => ids.into_iter().map(QueryItem::Id).collect(),
            Self::Records(records) => records.into_iter().map(QueryItem::Record).collect(),
        };
        items.into_iter()
    }
}

/// Normalizes a collection read.
///
/// 1. A missing or non-map collection element gives an empty list.
/// 2. A missing or `null` entity element gives an empty list.
/// 3. A single entity is treated as a one-element list.
/// 4. With a display option the entity maps are returned; otherwise the
///    `attr.id` of each entity. Entities without a readable id are skipped.
///
/// # Example
///
/// ```rust
/// use prestashop_mapper::rest::{normalize, QueryOptions, QueryResult, ResourceDescriptor};
/// use prestashop_mapper::xml::parse;
///
/// let taxes = ResourceDescriptor::new("taxes", "tax");
/// let document = parse(r#"<prestashop><taxes><tax id="4"/></taxes></prestashop>"#).unwrap();
///
/// assert_eq!(normalize(&taxes, &document, &QueryOptions::new()), QueryResult::Ids(vec![4]));
/// ```
#[must_use]
pub fn normalize(
    descriptor: &ResourceDescriptor,
    document: &ParsedDocument,
    options: &QueryOptions,
) -> QueryResult {
    let entities = entities(descriptor, document);

    if options.has_display() {
        QueryResult::Records(
            entities
                .into_iter()
                .filter_map(|entity| entity.as_object().cloned())
                .collect(),
        )
    } else {
        QueryResult::Ids(entities.into_iter().filter_map(reference_id).collect())
    }
}

fn entities<'a>(descriptor: &ResourceDescriptor, document: &'a ParsedDocument) -> Vec<&'a Value> {
    let Some(Value::Object(collection)) = document.get(descriptor.resource) else {
        return Vec::new();
    };

    match collection.get(descriptor.model) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(single) => vec![single],
    }
}

/// Reads `attr.id`, falling back to an `id` field.
fn reference_id(entity: &Value) -> Option<ResourceId> {
    entity
        .get(ATTR_KEY)
        .and_then(|attr| attr.get("id"))
        .or_else(|| entity.get("id"))
        .and_then(id_value)
}

pub(crate) fn id_value(value: &Value) -> Option<ResourceId> {
    match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
