//! HTTP client types for webservice communication.
//!
//! This module provides the transport layer the resource mapper and the
//! asset uploader run on. It handles request/response processing,
//! authentication and retry logic.
//!
//! # Overview
//!
//! - [`Transport`]: the calls the mapping layer needs (read, create, update,
//!   delete, check, upload)
//! - [`WebserviceClient`]: the async HTTP implementation of [`Transport`]
//! - [`HttpRequest`]: a request to be sent to the webservice
//! - [`HttpResponse`]: a response from the webservice
//! - [`HttpMethod`]: supported HTTP methods
//! - [`UploadFile`]: a file sent as a multipart part
//!
//! # Example
//!
//! ```rust,ignore
//! use prestashop_mapper::clients::Transport;
//! use prestashop_mapper::rest::QueryOptions;
//! use prestashop_mapper::{ApiKey, ApiUrl, WebserviceClient, WebserviceConfig};
//!
//! let config = WebserviceConfig::builder()
//!     .api_url(ApiUrl::new("https://shop.example.com")?)
//!     .api_key(ApiKey::new("ABCDEF0123456789")?)
//!     .build()?;
//! let client = WebserviceClient::new(&config)?;
//!
//! let document = client.read("taxes", Some(1), &QueryOptions::new()).await?;
//! ```
//!
//! # Retry Behavior
//!
//! - **429 (Rate Limited)**: Retries using `Retry-After` header value, or 1 second if not present
//! - **500 (Server Error)**: Retries with fixed 1-second delay
//! - **Other errors (4xx)**: Returns immediately without retry
//!
//! The default `tries` is 1, meaning no automatic retries. Configure via
//! [`WebserviceConfigBuilder::tries`](crate::config::WebserviceConfigBuilder::tries).

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod transport;

pub use errors::{
    HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError, TransportError,
};
pub use http_client::{WebserviceClient, RETRY_WAIT_TIME, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder, RequestBody, UploadFile};
pub use http_response::HttpResponse;
pub use transport::Transport;
