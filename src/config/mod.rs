//! Configuration types for the PrestaShop mapper.
//!
//! - [`WebserviceConfig`]: the settings shared by every call against one shop
//! - [`WebserviceConfigBuilder`]: a builder for [`WebserviceConfig`]
//! - [`ApiKey`], [`ApiUrl`], [`LanguageId`]: validated newtypes
//!
//! # Example
//!
//! ```rust
//! use prestashop_mapper::{ApiKey, ApiUrl, WebserviceConfig};
//!
//! let config = WebserviceConfig::builder()
//!     .api_url(ApiUrl::new("https://shop.example.com").unwrap())
//!     .api_key(ApiKey::new("ABCDEF0123456789").unwrap())
//!     .html_enabled(true)
//!     .build()
//!     .unwrap();
//!
//! assert!(config.html_enabled());
//! ```

mod newtypes;

pub use newtypes::{ApiKey, ApiUrl, LanguageId};

use crate::error::ConfigError;
use crate::sanitize::{rich_text_policy, TextPolicy};

/// Configuration for talking to one shop webservice.
///
/// The configuration is instance based; nothing in the crate reads
/// process-wide state. Pass it to [`WebserviceClient::new`](crate::WebserviceClient::new)
/// and read [`rich_text_policy`](Self::rich_text_policy) when preparing rich
/// text fields.
#[derive(Clone, Debug)]
pub struct WebserviceConfig {
    api_url: ApiUrl,
    api_key: ApiKey,
    html_enabled: bool,
    user_agent_prefix: Option<String>,
    tries: u32,
}

impl WebserviceConfig {
    /// Creates a new builder for constructing a `WebserviceConfig`.
    #[must_use]
    pub fn builder() -> WebserviceConfigBuilder {
        WebserviceConfigBuilder::new()
    }

    /// Returns the shop URL.
    #[must_use]
    pub const fn api_url(&self) -> &ApiUrl {
        &self.api_url
    }

    /// Returns the webservice key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns whether rich text may embed frames.
    #[must_use]
    pub const fn html_enabled(&self) -> bool {
        self.html_enabled
    }

    /// Returns the policy used for rich text fields.
    #[must_use]
    pub const fn rich_text_policy(&self) -> TextPolicy {
        rich_text_policy(self.html_enabled)
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns how many times each HTTP call is attempted.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }
}

// Verify WebserviceConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<WebserviceConfig>();
};

/// Builder for constructing [`WebserviceConfig`] instances.
///
/// `api_url` and `api_key` are required.
///
/// # Defaults
///
/// - `html_enabled`: `false`
/// - `user_agent_prefix`: `None`
/// - `tries`: `1` (no retries)
#[derive(Debug, Default)]
pub struct WebserviceConfigBuilder {
    api_url: Option<ApiUrl>,
    api_key: Option<ApiKey>,
    html_enabled: Option<bool>,
    user_agent_prefix: Option<String>,
    tries: Option<u32>,
}

impl WebserviceConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shop URL (required).
    #[must_use]
    pub fn api_url(mut self, url: ApiUrl) -> Self {
        self.api_url = Some(url);
        self
    }

    /// Sets the webservice key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Allows embedded frames in rich text fields.
    #[must_use]
    pub const fn html_enabled(mut self, enabled: bool) -> Self {
        self.html_enabled = Some(enabled);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets how many times each HTTP call is attempted.
    ///
    /// Values above 1 enable retries for 429 and 500 responses.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = Some(tries);
        self
    }

    /// Builds the [`WebserviceConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_url` or
    /// `api_key` are not set.
    pub fn build(self) -> Result<WebserviceConfig, ConfigError> {
        let api_url = self
            .api_url
            .ok_or(ConfigError::MissingRequiredField { field: "api_url" })?;
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;

        Ok(WebserviceConfig {
            api_url,
            api_key,
            html_enabled: self.html_enabled.unwrap_or(false),
            user_agent_prefix: self.user_agent_prefix,
            tries: self.tries.unwrap_or(1).max(1),
        })
    }
}
