//! HTTP request types for the webservice client.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! constructing requests against `/api/...` endpoints.

use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the webservice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// Reads a resource.
    Get,
    /// Creates a resource or uploads a file.
    Post,
    /// Updates a resource.
    Put,
    /// Removes a resource.
    Delete,
    /// Checks that a resource exists.
    Head,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Delete => write!(f, "delete"),
            Self::Head => write!(f, "head"),
        }
    }
}

/// A file sent as a multipart form part.
///
/// # Example
///
/// ```rust
/// use prestashop_mapper::clients::UploadFile;
///
/// let file = UploadFile::new("cover.png", "image/png", vec![0x89, b'P', b'N', b'G']);
/// assert_eq!(file.field_name, "image");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// Form field name; the webservice expects `image`.
    pub field_name: String,
    /// File name announced in the part headers.
    pub file_name: String,
    /// MIME type of `bytes`.
    pub mime_type: String,
    /// File content.
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Form field name used for image uploads.
    pub const IMAGE_FIELD: &'static str = "image";

    /// Creates an upload part for the `image` field.
    #[must_use]
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            field_name: Self::IMAGE_FIELD.to_string(),
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("field_name", &self.field_name)
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Body of an HTTP request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestBody {
    /// An XML payload sent as `text/xml`.
    Xml(String),
    /// A single file sent as `multipart/form-data`.
    Multipart(UploadFile),
}

impl RequestBody {
    /// Returns the MIME type for XML bodies; multipart bodies carry their
    /// own boundary and are typed by the HTTP client.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::Xml(_) => Some("text/xml"),
            Self::Multipart(_) => None,
        }
    }
}

/// An HTTP request to be sent to the webservice.
///
/// Use [`HttpRequest::builder`] to construct requests with the builder pattern.
///
/// # Example
///
/// ```rust
/// use prestashop_mapper::clients::{HttpMethod, HttpRequest};
///
/// let request = HttpRequest::builder(HttpMethod::Get, "taxes")
///     .query_param("display", "full")
///     .build()
///     .unwrap();
/// assert_eq!(request.path, "taxes");
///
/// let request = HttpRequest::builder(HttpMethod::Put, "taxes/1")
///     .xml("<prestashop/>")
///     .build()
///     .unwrap();
/// assert!(request.body.is_some());
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The path below `/api/`.
    pub path: String,
    /// The request body, if any.
    pub body: Option<RequestBody>,
    /// Query parameters in the order they are sent.
    pub query: Vec<(String, String)>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - `http_method` is `Post` or `Put` but `body` is `None`
    /// - `http_method` is `Get`, `Head` or `Delete` but `body` is `Some`
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        match (self.http_method, &self.body) {
            (HttpMethod::Post | HttpMethod::Put, None) => Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            }),
            (HttpMethod::Get | HttpMethod::Head | HttpMethod::Delete, Some(_)) => {
                Err(InvalidHttpRequestError::UnexpectedBody {
                    method: self.http_method.to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    body: Option<RequestBody>,
    query: Vec<(String, String)>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            body: None,
            query: Vec::new(),
        }
    }

    /// Sets an XML body.
    #[must_use]
    pub fn xml(mut self, payload: impl Into<String>) -> Self {
        self.body = Some(RequestBody::Xml(payload.into()));
        self
    }

    /// Sets a multipart body holding one file.
    #[must_use]
    pub fn file(mut self, file: UploadFile) -> Self {
        self.body = Some(RequestBody::Multipart(file));
        self
    }

    /// Replaces all query parameters.
    #[must_use]
    pub fn query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            body: self.body,
            query: self.query,
        };
        request.verify()?;
        Ok(request)
    }
}
