//! HTTP response types for the webservice client.

use std::collections::HashMap;

use serde_json::Value;

use crate::xml::{self, ParsedDocument, XmlError};

/// An HTTP response from the webservice.
///
/// Contains the status code, headers and raw body along with the values of
/// the headers the shop adds to every answer.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: String,
    /// Seconds to wait before retrying (from `Retry-After` header).
    pub retry_request_after: Option<f64>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, reading `Retry-After` from the headers.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: impl Into<String>) -> Self {
        let retry_request_after = headers
            .get("retry-after")
            .and_then(|values| values.first())
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|seconds| seconds.is_finite());

        Self {
            code,
            headers,
            body: body.into(),
            retry_request_after,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns `true` for 404 responses.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        self.code == 404
    }

    /// Returns the `PSWS-Version` header value, if present.
    #[must_use]
    pub fn webservice_version(&self) -> Option<&str> {
        self.header("psws-version")
    }

    /// Returns the `Execution-Time` header value in seconds, if present.
    #[must_use]
    pub fn execution_time(&self) -> Option<f64> {
        self.header("execution-time")
            .and_then(|value| value.trim().parse().ok())
    }

    /// Parses the body.
    ///
    /// Returns `Ok(None)` for an empty body.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError`] when the body is not well-formed XML.
    pub fn document(&self) -> Result<Option<ParsedDocument>, XmlError> {
        if self.body.trim().is_empty() {
            return Ok(None);
        }
        xml::parse(&self.body).map(Some)
    }

    /// Collects the messages of an `<errors>` body.
    ///
    /// Returns an empty list when the body is not an error document.
    #[must_use]
    pub fn error_messages(&self) -> Vec<String> {
        let Ok(Some(document)) = self.document() else {
            return Vec::new();
        };

        let errors = match document.get("errors").and_then(|errors| errors.get("error")) {
            Some(Value::Array(items)) => items.clone(),
            Some(item) => vec![item.clone()],
            None => return Vec::new(),
        };

        errors
            .iter()
            .filter_map(|error| match error.get("message") {
                Some(Value::String(message)) => Some(message.clone()),
                Some(Value::Null) | None => None,
                Some(other) => Some(other.to_string()),
            })
            .collect()
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, Vec<String>> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), vec![(*v).to_string()]))
            .collect()
    }

    #[test]
    fn test_is_ok_returns_true_for_2xx() {
        assert!(HttpResponse::new(200, HashMap::new(), "").is_ok());
        assert!(HttpResponse::new(201, HashMap::new(), "").is_ok());
        assert!(HttpResponse::new(299, HashMap::new(), "").is_ok());
    }

    #[test]
    fn test_is_ok_returns_false_for_4xx_and_5xx() {
        assert!(!HttpResponse::new(400, HashMap::new(), "").is_ok());
        assert!(!HttpResponse::new(404, HashMap::new(), "").is_ok());
        assert!(!HttpResponse::new(500, HashMap::new(), "").is_ok());
    }

    #[test]
    fn test_non_finite_retry_after_is_ignored() {
        for value in ["inf", "NaN", "1e400"] {
            let response = HttpResponse::new(429, headers(&[("retry-after", value)]), "");
            assert_eq!(response.retry_request_after, None, "retry-after {value}");
        }
    }

    #[test]
    fn test_retry_after_parsing() {
        let response = HttpResponse::new(429, headers(&[("retry-after", "2.5")]), "");
        assert_eq!(response.retry_request_after, Some(2.5));
    }

    #[test]
    fn test_webservice_headers() {
        let response = HttpResponse::new(
            200,
            headers(&[("psws-version", "1.7.8.8"), ("execution-time", "0.012")]),
            "",
        );
        assert_eq!(response.webservice_version(), Some("1.7.8.8"));
        assert_eq!(response.execution_time(), Some(0.012));
    }

    #[test]
    fn test_empty_body_has_no_document() {
        let response = HttpResponse::new(200, HashMap::new(), "  \n");
        assert!(response.document().unwrap().is_none());
    }

    #[test]
    fn test_document_parses_body() {
        let response = HttpResponse::new(
            200,
            HashMap::new(),
            "<prestashop><tax><id>3</id></tax></prestashop>",
        );
        let document = response.document().unwrap().unwrap();
        assert_eq!(document["tax"]["id"], 3);
    }

    #[test]
    fn test_error_messages_extraction() {
        let body = r#"<?xml version="1.0" encoding="UTF-8"?>
            <prestashop xmlns:xlink="http://www.w3.org/1999/xlink">
              <errors>
                <error><code><![CDATA[90]]></code><message><![CDATA[Id is invalid]]></message></error>
                <error><code><![CDATA[91]]></code><message><![CDATA[Name is empty]]></message></error>
              </errors>
            </prestashop>"#;
        let response = HttpResponse::new(400, HashMap::new(), body);
        assert_eq!(
            response.error_messages(),
            vec!["Id is invalid".to_string(), "Name is empty".to_string()]
        );
    }

    #[test]
    fn test_error_messages_empty_for_non_error_body() {
        let response = HttpResponse::new(500, HashMap::new(), "Fatal error");
        assert!(response.error_messages().is_empty());
    }
}
