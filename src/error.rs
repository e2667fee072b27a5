//! Error types for the PrestaShop mapper.
//!
//! This module contains the configuration error type. Transport errors live
//! in [`crate::clients`], resource errors in [`crate::rest`] and XML errors in
//! [`crate::xml`].
//!
//! # Example
//!
//! ```rust
//! use prestashop_mapper::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur while building a [`WebserviceConfig`](crate::WebserviceConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a webservice key generated in the shop back office.")]
    EmptyApiKey,

    /// The webservice URL is invalid.
    #[error("Invalid webservice URL '{url}'. Expected an http or https URL such as 'https://shop.example.com'.")]
    InvalidApiUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Language ids start at 1.
    #[error("Invalid language id {id}. Language ids are positive integers.")]
    InvalidLanguageId {
        /// The rejected id.
        id: u32,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
