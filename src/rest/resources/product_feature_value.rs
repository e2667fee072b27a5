//! Product feature value resource.
//!
//! Feature values are the per-product answers to a feature ("Material:
//! Cotton"). Custom values belong to a single product; predefined ones are
//! shared.
//!
//! # Example
//!
//! ```rust,ignore
//! use prestashop_mapper::rest::resources::ProductFeatureValue;
//! use prestashop_mapper::LanguageId;
//!
//! let value = ProductFeatureValue::new(7, "Cotton", LanguageId::new(2)?).custom(1);
//! let created = value.create(&client).await?;
//! ```

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::clients::Transport;
use crate::config::LanguageId;
use crate::rest::{language_value, ResourceError, ResourceId, ResourceMapper};
use crate::sanitize::{sanitize, TextPolicy};
use crate::xml::AttributeSet;

/// A product feature value.
///
/// `value` is stored as given and sanitized with the plain text policy
/// when the payload is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductFeatureValue {
    /// The shop's id; `None` until created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    /// The feature this value answers.
    pub id_feature: ResourceId,
    /// `1` for a product-specific value, `0` for a predefined one.
    pub custom: u8,
    /// The value text.
    pub value: String,
    /// Language of `value`; `0` is rejected by [`validate`](Self::validate).
    pub id_lang: u32,
}

impl ProductFeatureValue {
    /// CRUD operations on product feature values.
    pub const MAPPER: ResourceMapper =
        ResourceMapper::new("product_feature_values", "product_feature_value");

    const MODEL: &'static str = Self::MAPPER.model();

    /// Creates a predefined (non-custom) value.
    #[must_use]
    pub fn new(id_feature: ResourceId, value: impl Into<String>, language: LanguageId) -> Self {
        Self {
            id: None,
            id_feature,
            custom: 0,
            value: value.into(),
            id_lang: language.get(),
        }
    }

    /// Sets the custom flag.
    #[must_use]
    pub const fn custom(mut self, custom: u8) -> Self {
        self.custom = custom;
        self
    }

    /// Returns the value as it will be sent.
    #[must_use]
    pub fn plain_value(&self) -> String {
        sanitize(&self.value, TextPolicy::Plain)
    }

    /// Checks the model's invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] if `custom` is not 0 or 1,
    /// `id_lang` is 0 or the sanitized value is empty.
    pub fn validate(&self) -> Result<(), ResourceError> {
        if self.custom > 1 {
            return Err(self.invalid("custom", "must be 0 or 1"));
        }
        if self.id_lang == 0 {
            return Err(self.invalid("id_lang", "must be a language id"));
        }
        if self.plain_value().trim().is_empty() {
            return Err(self.invalid("value", "must not be empty"));
        }
        Ok(())
    }

    /// Returns the validated payload attributes.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] if [`validate`](Self::validate) fails.
    pub fn attributes(&self) -> Result<AttributeSet, ResourceError> {
        self.validate()?;
        let language = LanguageId::new(self.id_lang)
            .map_err(|e| self.invalid("id_lang", &e.to_string()))?;

        let mut attributes = AttributeSet::new();
        if let Some(id) = self.id {
            attributes.insert("id".to_string(), json!(id));
        }
        attributes.insert("id_feature".to_string(), json!(self.id_feature));
        attributes.insert("custom".to_string(), json!(self.custom));
        attributes.insert(
            "value".to_string(),
            language_value(self.plain_value(), language),
        );
        Ok(attributes)
    }

    /// Creates this value on the shop.
    ///
    /// Validation runs before any network call.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] for invalid values and
    /// [`ResourceError::Transport`] if the call fails.
    pub async fn create<T: Transport>(
        &self,
        client: &T,
    ) -> Result<Option<AttributeSet>, ResourceError> {
        let attributes = self.attributes()?;
        Self::MAPPER.create(client, &attributes).await
    }

    fn invalid(&self, field: &'static str, reason: &str) -> ResourceError {
        ResourceError::Validation {
            model: Self::MODEL,
            field,
            reason: reason.to_string(),
        }
    }
}
