//! # PrestaShop Mapper
//!
//! An object-mapping client for the PrestaShop XML webservice. Remote
//! resources (taxes, countries, feature values, images, ...) are handled as
//! attribute maps with finder and CRUD operations; the crate turns each call
//! into an HTTP request with an XML payload and parses the XML answer back.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`WebserviceConfig`] and [`WebserviceConfigBuilder`]
//! - Validated newtypes for the shop URL, webservice key and language ids
//! - An async HTTP client with retry logic behind the [`Transport`] trait
//! - Generic CRUD per resource via [`rest::ResourceMapper`]
//! - Response normalization into ids or records via [`rest::normalize()`]
//! - Update payloads merged over the current entity state
//! - Batch image upload with per-source failure reporting via [`assets`]
//! - HTML cleaning policies for attribute values via [`sanitize`]
//!
//! ## Quick Start
//!
//! ```rust
//! use prestashop_mapper::{ApiKey, ApiUrl, WebserviceConfig};
//!
//! let config = WebserviceConfig::builder()
//!     .api_url(ApiUrl::new("https://shop.example.com").unwrap())
//!     .api_key(ApiKey::new("ABCDEF0123456789").unwrap())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Reading Resources
//!
//! ```rust,ignore
//! use prestashop_mapper::rest::resources::{Country, Tax};
//! use prestashop_mapper::rest::{Display, QueryOptions};
//! use prestashop_mapper::WebserviceClient;
//!
//! let client = WebserviceClient::new(&config)?;
//!
//! // A single entity, or None
//! let tax = Tax::MAPPER.find(&client, 1).await?;
//!
//! // Ids only
//! let ids = Tax::MAPPER.all(&client, QueryOptions::new()).await?;
//!
//! // Full records
//! let records = Tax::MAPPER
//!     .query(&client, QueryOptions::new().filter("active", 1).display(Display::Full))
//!     .await?;
//!
//! // Generated finders
//! let czech = Country::find_by_iso_code(&client, "CZ", QueryOptions::new()).await?;
//! ```
//!
//! ## Writing Resources
//!
//! ```rust,ignore
//! use prestashop_mapper::rest::resources::ProductFeatureValue;
//! use prestashop_mapper::LanguageId;
//!
//! let value = ProductFeatureValue::new(7, "Cotton", LanguageId::new(1)?);
//! let created = value.create(&client).await?;
//!
//! let changes = serde_json::json!({"custom": 1}).as_object().cloned().unwrap_or_default();
//! let updated = ProductFeatureValue::MAPPER.update(&client, 12, changes).await?;
//! ```
//!
//! ## Uploading Images
//!
//! ```rust,ignore
//! use prestashop_mapper::assets::{AssetUploader, RemoteFetcher};
//!
//! let uploader = AssetUploader::new(RemoteFetcher::new()?);
//! let outcomes = uploader
//!     .upload(&client, "products", 42, vec!["https://cdn.example/a.jpg", "file:///tmp/b.webp"])
//!     .await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Reads never fail on not-found**: they answer `None` or an empty list

pub mod assets;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;
pub mod sanitize;
pub mod xml;

// Re-export public types at crate root for convenience
pub use config::{ApiKey, ApiUrl, LanguageId, WebserviceConfig, WebserviceConfigBuilder};
pub use error::ConfigError;

// Re-export transport types
pub use clients::{
    HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse, HttpResponseError,
    InvalidHttpRequestError, MaxHttpRetriesExceededError, Transport, TransportError,
    UploadFile, WebserviceClient,
};

// Re-export mapping types
pub use rest::{QueryOptions, QueryResult, ResourceError, ResourceMapper};
pub use xml::{AttributeSet, ParsedDocument, XmlError};
