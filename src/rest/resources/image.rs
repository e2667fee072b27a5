//! Image resource.
//!
//! # Example
//!
//! ```rust,ignore
//! use prestashop_mapper::assets::{AssetUploader, RemoteFetcher};
//! use prestashop_mapper::rest::resources::Image;
//!
//! let uploader = AssetUploader::new(RemoteFetcher::new()?);
//! let image = Image::new("products", 42, vec!["https://cdn.example/front.jpg", "https://cdn.example/back.jpg"]);
//! let outcomes = image.upload(&client, &uploader).await?;
//! ```

use crate::assets::{AssetUploader, ImageFetcher, Sources, UploadError, UploadOutcome};
use crate::clients::Transport;
use crate::rest::{ResourceId, ResourceMapper};

/// Images attached to an entity (`/api/images/{owner}/{id}`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    /// Owner resource, e.g. `products`.
    pub owner: String,
    /// Id of the owning entity.
    pub parent_id: ResourceId,
    /// Where the images come from.
    pub sources: Sources,
}

impl Image {
    /// CRUD operations on images.
    pub const MAPPER: ResourceMapper = ResourceMapper::new("images", "image");

    /// Describes images to attach to entity `parent_id` of `owner`.
    #[must_use]
    pub fn new(owner: impl Into<String>, parent_id: ResourceId, sources: impl Into<Sources>) -> Self {
        Self {
            owner: owner.into(),
            parent_id,
            sources: sources.into(),
        }
    }

    /// Returns the sources as a list.
    #[must_use]
    pub fn images(&self) -> &[String] {
        self.sources.as_slice()
    }

    /// Uploads every source, returning one outcome per source in order.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError`] if an upload call fails.
    pub async fn upload<T: Transport, F: ImageFetcher>(
        &self,
        client: &T,
        uploader: &AssetUploader<F>,
    ) -> Result<Vec<UploadOutcome>, UploadError> {
        uploader
            .upload(client, &self.owner, self.parent_id, self.sources.clone())
            .await
    }
}
