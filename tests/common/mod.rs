//! Shared fakes for integration tests.
//!
//! [`FakeTransport`] answers reads from canned XML bodies keyed by path and
//! records every call; [`StubFetcher`] serves image bytes from memory.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Mutex;

use image::{DynamicImage, ImageFormat, RgbImage};
use prestashop_mapper::assets::{FetchError, ImageFetcher};
use prestashop_mapper::clients::{HttpResponseError, Transport, TransportError, UploadFile};
use prestashop_mapper::rest::{QueryOptions, ResourceId};
use prestashop_mapper::xml::{parse, ParsedDocument};
use url::Url;

/// One call made against [`FakeTransport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Call {
    pub method: &'static str,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub payload: Option<String>,
}

/// A transport answering from canned XML bodies.
#[derive(Debug, Default)]
pub struct FakeTransport {
    documents: HashMap<String, String>,
    upload_body: Option<String>,
    upload_limit: Option<usize>,
    calls: Mutex<Vec<Call>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `xml` for reads of `path` (`taxes` or `taxes/1`).
    pub fn with_document(mut self, path: &str, xml: &str) -> Self {
        self.documents.insert(path.to_string(), xml.to_string());
        self
    }

    /// Answers uploads with `xml` instead of a fresh image id.
    pub fn with_upload_body(mut self, xml: &str) -> Self {
        self.upload_body = Some(xml.to_string());
        self
    }

    /// Accepts `limit` uploads, then answers HTTP 500.
    pub fn with_upload_limit(mut self, limit: usize) -> Self {
        self.upload_limit = Some(limit);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, method: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| call.method == method)
            .collect()
    }

    fn record(&self, method: &'static str, path: String, query: Vec<(String, String)>, payload: Option<String>) {
        self.calls.lock().unwrap().push(Call {
            method,
            path,
            query,
            payload,
        });
    }

    fn document(&self, path: &str) -> Result<Option<ParsedDocument>, TransportError> {
        match self.documents.get(path) {
            Some(xml) => Ok(Some(parse(xml)?)),
            None => Ok(None),
        }
    }
}

fn entity_path(resource: &str, id: Option<ResourceId>) -> String {
    match id {
        Some(id) => format!("{resource}/{id}"),
        None => resource.to_string(),
    }
}

impl Transport for FakeTransport {
    async fn read(
        &self,
        resource: &str,
        id: Option<ResourceId>,
        options: &QueryOptions,
    ) -> Result<Option<ParsedDocument>, TransportError> {
        let path = entity_path(resource, id);
        self.record("GET", path.clone(), options.to_query(), None);
        self.document(&path)
    }

    async fn create(
        &self,
        resource: &str,
        payload: String,
    ) -> Result<Option<ParsedDocument>, TransportError> {
        self.record("POST", resource.to_string(), Vec::new(), Some(payload.clone()));
        Ok(Some(parse(&payload)?))
    }

    async fn update(
        &self,
        resource: &str,
        id: ResourceId,
        payload: String,
    ) -> Result<Option<ParsedDocument>, TransportError> {
        self.record("PUT", entity_path(resource, Some(id)), Vec::new(), Some(payload.clone()));
        Ok(Some(parse(&payload)?))
    }

    async fn delete(&self, resource: &str, id: ResourceId) -> Result<bool, TransportError> {
        let path = entity_path(resource, Some(id));
        self.record("DELETE", path.clone(), Vec::new(), None);
        Ok(self.documents.contains_key(&path))
    }

    async fn check(&self, resource: &str, id: ResourceId) -> Result<bool, TransportError> {
        let path = entity_path(resource, Some(id));
        self.record("HEAD", path.clone(), Vec::new(), None);
        Ok(self.documents.contains_key(&path))
    }

    async fn upload(
        &self,
        resource: &str,
        owner: &str,
        parent_id: ResourceId,
        file: UploadFile,
    ) -> Result<Option<ParsedDocument>, TransportError> {
        let path = format!("{resource}/{owner}/{parent_id}");
        let detail = format!("{} {}", file.file_name, file.mime_type);
        self.record("UPLOAD", path, Vec::new(), Some(detail));

        let attempt = self.calls_to("UPLOAD").len();
        if self.upload_limit.is_some_and(|limit| attempt > limit) {
            return Err(TransportError::Response(HttpResponseError {
                code: 500,
                message: "Internal Server Error".to_string(),
            }));
        }

        let body = match &self.upload_body {
            Some(body) => body.clone(),
            None => {
                let id = 100 + attempt;
                format!("<prestashop><image><id>{id}</id></image></prestashop>")
            }
        };
        Ok(Some(parse(&body)?))
    }
}

/// Serves image bytes from memory; unknown locators answer HTTP 404.
#[derive(Debug, Default)]
pub struct StubFetcher {
    files: HashMap<String, Vec<u8>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, url: &str, bytes: Vec<u8>) -> Self {
        self.files.insert(url.to_string(), bytes);
        self
    }
}

impl ImageFetcher for StubFetcher {
    async fn fetch(&self, locator: &Url) -> Result<Vec<u8>, FetchError> {
        self.files
            .get(locator.as_str())
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: locator.to_string(),
                code: 404,
            })
    }
}

/// A 2x2 image encoded as `format`.
pub fn image_bytes(format: ImageFormat) -> Vec<u8> {
    let image = DynamicImage::ImageRgb8(RgbImage::new(2, 2));
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, format).unwrap();
    bytes.into_inner()
}
