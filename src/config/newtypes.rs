//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around configuration values that
//! validate their contents on construction.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated webservice key.
///
/// The key is sent as the basic-auth user name on every request, so its
/// value is masked in debug output.
///
/// # Example
///
/// ```rust
/// use prestashop_mapper::ApiKey;
///
/// let key = ApiKey::new("ABCDEF0123456789").unwrap();
/// assert_eq!(key.as_ref(), "ABCDEF0123456789");
/// assert_eq!(format!("{:?}", key), "ApiKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated webservice key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(*****)")
    }
}

/// A validated shop URL.
///
/// Accepts the shop root (`https://shop.example.com`) or the webservice
/// root (`https://shop.example.com/api/`); both normalize to the shop root
/// without a trailing slash.
///
/// # Example
///
/// ```rust
/// use prestashop_mapper::ApiUrl;
///
/// let url = ApiUrl::new("https://shop.example.com/api/").unwrap();
/// assert_eq!(url.as_ref(), "https://shop.example.com");
/// assert_eq!(url.endpoint("taxes"), "https://shop.example.com/api/taxes");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiUrl(String);

impl ApiUrl {
    /// Creates a new validated shop URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiUrl`] if the URL cannot be parsed,
    /// is not http/https, or has no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = url.into();
        let trimmed = raw.trim();

        let parsed = url::Url::parse(trimmed).map_err(|_| ConfigError::InvalidApiUrl {
            url: raw.clone(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(ConfigError::InvalidApiUrl { url: raw });
        }

        let normalized = trimmed.trim_end_matches('/');
        let normalized = normalized.strip_suffix("/api").unwrap_or(normalized);

        Ok(Self(normalized.to_string()))
    }

    /// Returns the webservice URL for a path below `/api`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.0, path.trim_start_matches('/'))
    }
}

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for ApiUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ApiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A shop language id.
///
/// Multilingual fields are keyed by language id; the shop numbers its
/// languages from 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LanguageId(u32);

impl LanguageId {
    /// Creates a new language id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLanguageId`] for `0`.
    pub const fn new(id: u32) -> Result<Self, ConfigError> {
        if id == 0 {
            return Err(ConfigError::InvalidLanguageId { id });
        }
        Ok(Self(id))
    }

    /// Returns the numeric id.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
