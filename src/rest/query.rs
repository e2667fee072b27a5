//! Read options and their query string encoding.

use std::fmt;

use crate::config::LanguageId;

/// Which fields a read asks the shop to include for each entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Display {
    /// Every field (`display=full`).
    Full,
    /// The listed fields (`display=[a,b]`).
    Fields(Vec<String>),
}

impl Display {
    /// Creates a field list display.
    pub fn fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Fields(fields.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::Fields(fields) => write!(f, "[{}]", fields.join(",")),
        }
    }
}

/// Schema document flavours.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaKind {
    /// An empty entity with every writable field.
    Blank,
    /// The annotated schema with per-field `format` and `required` flags.
    Synopsis,
}

impl SchemaKind {
    /// Returns the query parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blank => "blank",
            Self::Synopsis => "synopsis",
        }
    }
}

/// Options for one read call.
///
/// Built per call and never persisted.
///
/// # Example
///
/// ```rust
/// use prestashop_mapper::rest::{Display, QueryOptions};
///
/// let options = QueryOptions::new()
///     .filter("id_country", 8)
///     .display(Display::fields(["id_tax", "id_tax_rules_group"]))
///     .limit(10);
///
/// assert_eq!(
///     options.to_query(),
///     vec![
///         ("filter[id_country]".to_string(), "8".to_string()),
///         ("display".to_string(), "[id_tax,id_tax_rules_group]".to_string()),
///         ("limit".to_string(), "10".to_string()),
///     ]
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryOptions {
    filters: Vec<(String, String)>,
    display: Option<Display>,
    limit: Option<String>,
    sort: Option<String>,
    schema: Option<SchemaKind>,
    language: Option<LanguageId>,
}

impl QueryOptions {
    /// Creates empty options: ids only, no filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a filter. Filtering the same field again replaces its value.
    ///
    /// The value is sent as is, so the shop's operators work too:
    /// `[1|5]` (any of), `[1,10]` (interval), `%[wool]%` (contains).
    #[must_use]
    pub fn filter(mut self, field: impl Into<String>, value: impl ToString) -> Self {
        let field = field.into();
        let value = value.to_string();
        match self.filters.iter_mut().find(|(name, _)| *name == field) {
            Some(existing) => existing.1 = value,
            None => self.filters.push((field, value)),
        }
        self
    }

    /// Sets the fields to include for each entity.
    #[must_use]
    pub fn display(mut self, display: Display) -> Self {
        self.display = Some(display);
        self
    }

    /// Caps the number of entities returned.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit.to_string());
        self
    }

    /// Returns `limit` entities starting after the first `offset`.
    #[must_use]
    pub fn page(mut self, offset: u32, limit: u32) -> Self {
        self.limit = Some(format!("{offset},{limit}"));
        self
    }

    /// Sets the sort spec, e.g. `[name_ASC]` or `[date_add_DESC,id_ASC]`.
    #[must_use]
    pub fn sort(mut self, spec: impl Into<String>) -> Self {
        self.sort = Some(spec.into());
        self
    }

    /// Asks for a schema document instead of entities.
    #[must_use]
    pub const fn schema(mut self, kind: SchemaKind) -> Self {
        self.schema = Some(kind);
        self
    }

    /// Restricts multilingual fields to one language.
    #[must_use]
    pub const fn language(mut self, language: LanguageId) -> Self {
        self.language = Some(language);
        self
    }

    /// Returns the display option, if any.
    #[must_use]
    pub const fn display_option(&self) -> Option<&Display> {
        self.display.as_ref()
    }

    /// Returns `true` when the read asks for entity fields rather than ids.
    #[must_use]
    pub const fn has_display(&self) -> bool {
        self.display.is_some()
    }

    /// Returns the filters in the order they were added.
    #[must_use]
    pub fn filters(&self) -> &[(String, String)] {
        &self.filters
    }

    /// Returns the limit parameter value, if any.
    #[must_use]
    pub fn limit_value(&self) -> Option<&str> {
        self.limit.as_deref()
    }

    /// Encodes the options as query parameters.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query: Vec<(String, String)> = self
            .filters
            .iter()
            .map(|(field, value)| (format!("filter[{field}]"), value.clone()))
            .collect();

        if let Some(display) = &self.display {
            query.push(("display".to_string(), display.to_string()));
        }
        if let Some(limit) = &self.limit {
            query.push(("limit".to_string(), limit.clone()));
        }
        if let Some(sort) = &self.sort {
            query.push(("sort".to_string(), sort.clone()));
        }
        if let Some(schema) = self.schema {
            query.push(("schema".to_string(), schema.as_str().to_string()));
        }
        if let Some(language) = self.language {
            query.push(("language".to_string(), language.to_string()));
        }

        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn test_empty_options_have_no_parameters() {
        assert!(QueryOptions::new().to_query().is_empty());
        assert!(!QueryOptions::new().has_display());
    }

    #[test]
    fn test_display_full_and_fields() {
        assert_eq!(
            QueryOptions::new().display(Display::Full).to_query(),
            vec![pair("display", "full")]
        );
        assert_eq!(
            QueryOptions::new()
                .display(Display::fields(["id", "name"]))
                .to_query(),
            vec![pair("display", "[id,name]")]
        );
    }

    #[test]
    fn test_filter_replaces_same_field() {
        let options = QueryOptions::new()
            .filter("iso_code", "FR")
            .filter("active", 1)
            .filter("iso_code", "CZ");

        assert_eq!(
            options.to_query(),
            vec![pair("filter[iso_code]", "CZ"), pair("filter[active]", "1")]
        );
    }

    #[test]
    fn test_paging_sort_schema_and_language() {
        let options = QueryOptions::new()
            .page(20, 10)
            .sort("[id_DESC]")
            .schema(SchemaKind::Synopsis)
            .language(LanguageId::new(2).unwrap());

        assert_eq!(
            options.to_query(),
            vec![
                pair("limit", "20,10"),
                pair("sort", "[id_DESC]"),
                pair("schema", "synopsis"),
                pair("language", "2"),
            ]
        );
    }

    #[test]
    fn test_limit_value() {
        assert_eq!(QueryOptions::new().limit(1).limit_value(), Some("1"));
        assert_eq!(QueryOptions::new().limit_value(), None);
    }
}
