//! HTTP client for webservice communication.
//!
//! This module provides the [`WebserviceClient`] type for making
//! authenticated requests to a shop webservice with automatic retry handling.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::multipart::{Form, Part};
use reqwest::Method;

use crate::clients::errors::{HttpResponseError, MaxHttpRetriesExceededError, TransportError};
use crate::clients::http_request::{HttpMethod, HttpRequest, RequestBody};
use crate::clients::http_response::HttpResponse;
use crate::config::{ApiKey, ApiUrl, WebserviceConfig};

/// Fixed retry wait time in seconds.
pub const RETRY_WAIT_TIME: u64 = 1;

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for the shop webservice.
///
/// The client handles:
/// - URL construction below `{api_url}/api/`
/// - HTTP basic authentication with the webservice key as user name
/// - The User-Agent header, with the configured prefix
/// - Automatic retry logic for 429 and 500 responses
///
/// # Thread Safety
///
/// `WebserviceClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use prestashop_mapper::{ApiKey, ApiUrl, WebserviceClient, WebserviceConfig};
/// use prestashop_mapper::clients::{HttpMethod, HttpRequest};
///
/// let config = WebserviceConfig::builder()
///     .api_url(ApiUrl::new("https://shop.example.com")?)
///     .api_key(ApiKey::new("ABCDEF0123456789")?)
///     .build()?;
/// let client = WebserviceClient::new(&config)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "taxes").build()?;
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct WebserviceClient {
    client: reqwest::Client,
    api_url: ApiUrl,
    api_key: ApiKey,
    user_agent: String,
    tries: u32,
}

// Verify WebserviceClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<WebserviceClient>();
};

impl WebserviceClient {
    /// Creates a new client for the shop described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] if the underlying reqwest client
    /// cannot be created (e.g. TLS initialization failure).
    pub fn new(config: &WebserviceConfig) -> Result<Self, TransportError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}PrestaShop Mapper v{SDK_VERSION} | Rust {rust_version}");

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            api_url: config.api_url().clone(),
            api_key: config.api_key().clone(),
            user_agent,
            tries: config.tries(),
        })
    }

    /// Returns the shop URL this client talks to.
    #[must_use]
    pub const fn api_url(&self) -> &ApiUrl {
        &self.api_url
    }

    /// Returns the User-Agent sent with every request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Returns how many times each request is attempted.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }

    /// Sends an HTTP request to the webservice.
    ///
    /// This method handles:
    /// - Request validation
    /// - URL construction
    /// - Authentication and content headers
    /// - Retry logic for 429 and 500 responses
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    /// - Max retries exceeded (`MaxRetries`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        request.verify()?;

        let url = self.api_url.endpoint(&request.path);
        let method = match request.http_method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
        };

        let mut tries: u32 = 0;
        loop {
            tries += 1;

            let mut req_builder = self
                .client
                .request(method.clone(), &url)
                .basic_auth(self.api_key.as_ref(), Some(""))
                .header(USER_AGENT, &self.user_agent);

            if !request.query.is_empty() {
                req_builder = req_builder.query(&request.query);
            }

            match &request.body {
                Some(body @ RequestBody::Xml(payload)) => {
                    if let Some(content_type) = body.content_type() {
                        req_builder = req_builder.header(CONTENT_TYPE, content_type);
                    }
                    req_builder = req_builder.body(payload.clone());
                }
                Some(RequestBody::Multipart(file)) => {
                    let part = Part::bytes(file.bytes.clone())
                        .file_name(file.file_name.clone())
                        .mime_str(&file.mime_type)?;
                    req_builder =
                        req_builder.multipart(Form::new().part(file.field_name.clone(), part));
                }
                None => {}
            }

            tracing::debug!(
                method = %request.http_method,
                path = %request.path,
                attempt = tries,
                "sending webservice request"
            );

            let res = req_builder.send().await?;

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await.unwrap_or_default();

            let response = HttpResponse::new(code, res_headers, body_text);

            if response.is_ok() {
                return Ok(response);
            }

            let error_message = Self::serialize_error(&response);

            let should_retry = code == 429 || code == 500;
            if !should_retry {
                return Err(TransportError::Response(HttpResponseError {
                    code,
                    message: error_message,
                }));
            }

            if tries >= self.tries {
                if self.tries == 1 {
                    return Err(TransportError::Response(HttpResponseError {
                        code,
                        message: error_message,
                    }));
                }
                return Err(TransportError::MaxRetries(MaxHttpRetriesExceededError {
                    code,
                    tries: self.tries,
                    message: error_message,
                }));
            }

            tracing::warn!(
                path = %request.path,
                code,
                attempt = tries,
                "retrying webservice request"
            );

            let delay = Self::calculate_retry_delay(&response, code);
            tokio::time::sleep(delay).await;
        }
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// 429 honours `Retry-After`; 500 always waits the fixed delay, as does
    /// a 429 whose `Retry-After` is not a representable duration.
    fn calculate_retry_delay(response: &HttpResponse, status: u16) -> Duration {
        if status == 429 {
            if let Some(delay) = response
                .retry_request_after
                .and_then(|retry_after| Duration::try_from_secs_f64(retry_after.max(0.0)).ok())
            {
                return delay;
            }
        }
        Duration::from_secs(RETRY_WAIT_TIME)
    }

    /// Builds the error message of a failed response.
    fn serialize_error(response: &HttpResponse) -> String {
        let messages = response.error_messages();
        if !messages.is_empty() {
            return messages.join("; ");
        }

        let body = response.body.trim();
        if !body.is_empty() {
            return body.to_string();
        }

        reqwest::StatusCode::from_u16(response.code)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or("Unknown error")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(prefix: Option<&str>) -> WebserviceConfig {
        let mut builder = WebserviceConfig::builder()
            .api_url(ApiUrl::new("https://shop.example.com/").unwrap())
            .api_key(ApiKey::new("ABCDEF0123456789").unwrap());
        if let Some(prefix) = prefix {
            builder = builder.user_agent_prefix(prefix);
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_client_construction_from_config() {
        let client = WebserviceClient::new(&config(None)).unwrap();
        assert_eq!(client.api_url().as_ref(), "https://shop.example.com");
        assert_eq!(client.tries(), 1);
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = WebserviceClient::new(&config(None)).unwrap();
        assert!(client.user_agent().starts_with("PrestaShop Mapper v"));
        assert!(client.user_agent().contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let client = WebserviceClient::new(&config(Some("Importer/2.0"))).unwrap();
        assert!(client.user_agent().starts_with("Importer/2.0 | "));
        assert!(client.user_agent().contains("PrestaShop Mapper"));
    }

    #[test]
    fn test_serialize_error_prefers_error_messages() {
        let response = HttpResponse::new(
            401,
            HashMap::new(),
            "<prestashop><errors><error><code>17</code><message>Authentication key is empty</message></error></errors></prestashop>",
        );
        assert_eq!(
            WebserviceClient::serialize_error(&response),
            "Authentication key is empty"
        );
    }

    #[test]
    fn test_serialize_error_falls_back_to_body_then_reason() {
        let response = HttpResponse::new(500, HashMap::new(), " Fatal error ");
        assert_eq!(WebserviceClient::serialize_error(&response), "Fatal error");

        let response = HttpResponse::new(503, HashMap::new(), "");
        assert_eq!(
            WebserviceClient::serialize_error(&response),
            "Service Unavailable"
        );
    }

    #[test]
    fn test_retry_delay() {
        let mut headers = HashMap::new();
        headers.insert("retry-after".to_string(), vec!["2".to_string()]);
        let response = HttpResponse::new(429, headers, "");
        assert_eq!(
            WebserviceClient::calculate_retry_delay(&response, 429),
            Duration::from_secs(2)
        );
        assert_eq!(
            WebserviceClient::calculate_retry_delay(&response, 500),
            Duration::from_secs(RETRY_WAIT_TIME)
        );
    }

    #[test]
    fn test_unrepresentable_retry_after_falls_back_to_fixed_delay() {
        for value in ["1e400", "1e300", "-5"] {
            let mut headers = HashMap::new();
            headers.insert("retry-after".to_string(), vec![value.to_string()]);
            let response = HttpResponse::new(429, headers, "");

            let delay = WebserviceClient::calculate_retry_delay(&response, 429);
            let expected = if value == "-5" {
                Duration::ZERO
            } else {
                Duration::from_secs(RETRY_WAIT_TIME)
            };
            assert_eq!(delay, expected, "retry-after {value}");
        }

        let response = HttpResponse {
            code: 429,
            headers: HashMap::new(),
            body: String::new(),
            retry_request_after: Some(f64::INFINITY),
        };
        assert_eq!(
            WebserviceClient::calculate_retry_delay(&response, 429),
            Duration::from_secs(RETRY_WAIT_TIME)
        );
    }
}
