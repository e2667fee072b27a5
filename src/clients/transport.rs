//! The transport seam between resource mapping and HTTP.

use crate::clients::errors::TransportError;
use crate::clients::http_client::WebserviceClient;
use crate::clients::http_request::{HttpMethod, HttpRequest, UploadFile};
use crate::rest::{QueryOptions, ResourceId};
use crate::xml::ParsedDocument;

/// Calls the resource mapper and the asset uploader make against a shop.
///
/// [`WebserviceClient`] is the production implementation. Tests implement
/// the trait with recording fakes.
///
/// Reads never fail on not-found: they answer `Ok(None)`. `delete` and
/// `check` answer `Ok(false)` for missing entities.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Reads a collection, or one entity when `id` is given.
    async fn read(
        &self,
        resource: &str,
        id: Option<ResourceId>,
        options: &QueryOptions,
    ) -> Result<Option<ParsedDocument>, TransportError>;

    /// Creates an entity from a wire payload.
    async fn create(
        &self,
        resource: &str,
        payload: String,
    ) -> Result<Option<ParsedDocument>, TransportError>;

    /// Replaces an entity with a wire payload.
    async fn update(
        &self,
        resource: &str,
        id: ResourceId,
        payload: String,
    ) -> Result<Option<ParsedDocument>, TransportError>;

    /// Deletes an entity.
    async fn delete(&self, resource: &str, id: ResourceId) -> Result<bool, TransportError>;

    /// Checks that an entity exists.
    async fn check(&self, resource: &str, id: ResourceId) -> Result<bool, TransportError>;

    /// Attaches a file to the entity `parent_id` of `owner`, e.g.
    /// `upload("images", "products", 42, file)`.
    async fn upload(
        &self,
        resource: &str,
        owner: &str,
        parent_id: ResourceId,
        file: UploadFile,
    ) -> Result<Option<ParsedDocument>, TransportError>;
}

fn entity_path(resource: &str, id: Option<ResourceId>) -> String {
    match id {
        Some(id) => format!("{resource}/{id}"),
        None => resource.to_string(),
    }
}

impl WebserviceClient {
    async fn send_for_document(
        &self,
        request: HttpRequest,
    ) -> Result<Option<ParsedDocument>, TransportError> {
        let response = self.request(request).await?;
        Ok(response.document()?)
    }

    async fn send_for_presence(&self, request: HttpRequest) -> Result<bool, TransportError> {
        match self.request(request).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl Transport for WebserviceClient {
    async fn read(
        &self,
        resource: &str,
        id: Option<ResourceId>,
        options: &QueryOptions,
    ) -> Result<Option<ParsedDocument>, TransportError> {
        let request = HttpRequest::builder(HttpMethod::Get, entity_path(resource, id))
            .query(options.to_query())
            .build()?;

        match self.send_for_document(request).await {
            Err(e) if e.is_not_found() => Ok(None),
            other => other,
        }
    }

    async fn create(
        &self,
        resource: &str,
        payload: String,
    ) -> Result<Option<ParsedDocument>, TransportError> {
        let request = HttpRequest::builder(HttpMethod::Post, resource)
            .xml(payload)
            .build()?;
        self.send_for_document(request).await
    }

    async fn update(
        &self,
        resource: &str,
        id: ResourceId,
        payload: String,
    ) -> Result<Option<ParsedDocument>, TransportError> {
        let request = HttpRequest::builder(HttpMethod::Put, entity_path(resource, Some(id)))
            .xml(payload)
            .build()?;
        self.send_for_document(request).await
    }

    async fn delete(&self, resource: &str, id: ResourceId) -> Result<bool, TransportError> {
        let request =
            HttpRequest::builder(HttpMethod::Delete, entity_path(resource, Some(id))).build()?;
        self.send_for_presence(request).await
    }

    async fn check(&self, resource: &str, id: ResourceId) -> Result<bool, TransportError> {
        let request =
            HttpRequest::builder(HttpMethod::Head, entity_path(resource, Some(id))).build()?;
        self.send_for_presence(request).await
    }

    async fn upload(
        &self,
        resource: &str,
        owner: &str,
        parent_id: ResourceId,
        file: UploadFile,
    ) -> Result<Option<ParsedDocument>, TransportError> {
        let request =
            HttpRequest::builder(HttpMethod::Post, format!("{resource}/{owner}/{parent_id}"))
                .file(file)
                .build()?;
        self.send_for_document(request).await
    }
}
