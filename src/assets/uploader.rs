//! Batch image upload.

use std::fmt;
use std::io::Cursor;

use image::ImageFormat;
use thiserror::Error;
use url::Url;

use crate::assets::fetcher::ImageFetcher;
use crate::clients::{Transport, TransportError, UploadFile};
use crate::rest::normalize::id_value;
use crate::rest::resources::Image;
use crate::rest::ResourceId;
use crate::xml::ParsedDocument;

/// Why one source was not uploaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UploadFailure {
    /// The source is not an absolute URL.
    InvalidLocator,
    /// The content is not a decodable image.
    InvalidImage,
    /// The content could not be fetched.
    FetchError,
    /// The shop accepted the upload but answered without an image id.
    EmptyResponse,
}

impl UploadFailure {
    /// Returns the failure reason as a stable tag.
    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            Self::InvalidLocator => "invalid-locator",
            Self::InvalidImage => "invalid-image",
            Self::FetchError => "fetch-error",
            Self::EmptyResponse => "empty-response",
        }
    }
}

impl fmt::Display for UploadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// The result for one source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The image was created with this id.
    Uploaded(ResourceId),
    /// The source was skipped.
    Failed(UploadFailure),
}

impl UploadOutcome {
    /// Returns the new image id, if uploaded.
    #[must_use]
    pub const fn id(self) -> Option<ResourceId> {
        match self {
            Self::Uploaded(id) => Some(id),
            Self::Failed(_) => None,
        }
    }

    /// Returns `true` if the image was uploaded.
    #[must_use]
    pub const fn is_uploaded(self) -> bool {
        matches!(self, Self::Uploaded(_))
    }

    /// Returns the failure, if any.
    #[must_use]
    pub const fn failure(self) -> Option<UploadFailure> {
        match self {
            Self::Uploaded(_) => None,
            Self::Failed(failure) => Some(failure),
        }
    }
}

/// The image sources of one upload call.
///
/// A single source becomes a one-element list; an absent or blank single
/// source becomes an empty list. Lists are kept as given.
///
/// # Example
///
/// ```rust
/// use prestashop_mapper::assets::Sources;
///
/// assert_eq!(Sources::from("https://cdn.example/a.png").len(), 1);
/// assert_eq!(Sources::from(vec!["https://cdn.example/a.png", "b"]).len(), 2);
/// assert!(Sources::from(None::<&str>).is_empty());
/// assert!(Sources::from("").is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sources(Vec<String>);

impl Sources {
    /// Returns the sources.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Returns the number of sources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there is nothing to upload.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Sources {
    fn from(source: String) -> Self {
        if source.trim().is_empty() {
            Self::default()
        } else {
            Self(vec![source])
        }
    }
}

impl From<&str> for Sources {
    fn from(source: &str) -> Self {
        Self::from(source.to_string())
    }
}

impl From<Vec<String>> for Sources {
    fn from(sources: Vec<String>) -> Self {
        Self(sources)
    }
}

impl From<Vec<&str>> for Sources {
    fn from(sources: Vec<&str>) -> Self {
        Self(sources.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Sources {
    fn from(sources: &[&str]) -> Self {
        Self(sources.iter().map(|s| (*s).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Sources {
    fn from(sources: [&str; N]) -> Self {
        Self(sources.iter().map(|s| (*s).to_string()).collect())
    }
}

impl<S: Into<Sources>> From<Option<S>> for Sources {
    fn from(source: Option<S>) -> Self {
        source.map_or_else(Self::default, Into::into)
    }
}

/// A batch stopped by a transport error.
///
/// Sources before the failing one were already handled; their outcomes are
/// kept in `completed` so uploaded image ids are not lost.
#[derive(Debug, Error)]
#[error("Image upload stopped after {} source(s): {source}", .completed.len())]
pub struct UploadError {
    /// Outcomes of the sources handled before the error, in source order.
    pub completed: Vec<UploadOutcome>,
    /// The transport error that stopped the batch.
    #[source]
    pub source: TransportError,
}

impl UploadError {
    /// Returns the ids of images uploaded before the error.
    #[must_use]
    pub fn uploaded_ids(&self) -> Vec<ResourceId> {
        self.completed.iter().filter_map(|outcome| outcome.id()).collect()
    }
}

// Verify UploadError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<UploadError>();
};

/// One source bound to the entity it is attached to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadItem {
    /// Where the image comes from.
    pub source: String,
    /// Owner resource, e.g. `products`.
    pub owner: String,
    /// Id of the owning entity.
    pub parent_id: ResourceId,
}

/// Fetches images and attaches them to an entity.
///
/// Each source goes through validation, fetch, decode and upload on its
/// own; a bad source yields [`UploadOutcome::Failed`] and the batch goes on.
/// Outcomes come back in source order.
///
/// # Example
///
/// ```rust,ignore
/// use prestashop_mapper::assets::{AssetUploader, RemoteFetcher};
///
/// let uploader = AssetUploader::new(RemoteFetcher::new()?);
/// let outcomes = uploader
///     .upload(&client, "products", 42, vec!["https://cdn.example/a.jpg", "not a url"])
///     .await?;
/// assert!(outcomes[0].is_uploaded());
/// assert_eq!(outcomes[1].failure().map(|f| f.reason()), Some("invalid-locator"));
/// ```
#[derive(Clone, Debug)]
pub struct AssetUploader<F> {
    fetcher: F,
}

impl<F: ImageFetcher> AssetUploader<F> {
    /// Creates an uploader fetching with `fetcher`.
    pub const fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Returns the fetcher.
    pub const fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Uploads every source as an image of entity `parent_id` of `owner`.
    ///
    /// An empty source list returns an empty list without any call.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError`] if an upload call fails. The batch stops there;
    /// the error carries the outcomes of the sources handled before it. Bad
    /// sources are not errors; they are reported in the outcome list.
    pub async fn upload<T: Transport>(
        &self,
        client: &T,
        owner: &str,
        parent_id: ResourceId,
        sources: impl Into<Sources>,
    ) -> Result<Vec<UploadOutcome>, UploadError> {
        let sources = sources.into();
        let mut outcomes = Vec::with_capacity(sources.len());

        for source in sources.0 {
            let item = UploadItem {
                source,
                owner: owner.to_string(),
                parent_id,
            };
            match self.upload_item(client, &item).await {
                Ok(outcome) => outcomes.push(outcome),
                Err(source) => {
                    tracing::warn!(
                        source = %item.source,
                        uploaded = outcomes.iter().filter(|outcome| outcome.is_uploaded()).count(),
                        "image batch stopped by transport error"
                    );
                    return Err(UploadError {
                        completed: outcomes,
                        source,
                    });
                }
            }
        }

        Ok(outcomes)
    }

    /// Uploads one item.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the upload call fails.
    pub async fn upload_item<T: Transport>(
        &self,
        client: &T,
        item: &UploadItem,
    ) -> Result<UploadOutcome, TransportError> {
        tracing::debug!(source = %item.source, "validating image source");

        let Ok(locator) = Url::parse(item.source.trim()) else {
            return Ok(Self::fail(item, UploadFailure::InvalidLocator, "not an absolute URL"));
        };

        let bytes = match self.fetcher.fetch(&locator).await {
            Ok(bytes) => bytes,
            Err(e) => {
                return Ok(Self::fail(item, UploadFailure::FetchError, &e.to_string()));
            }
        };

        let file = match prepare_file(&locator, bytes) {
            Ok(file) => file,
            Err(e) => {
                return Ok(Self::fail(item, UploadFailure::InvalidImage, &e.to_string()));
            }
        };

        tracing::debug!(
            source = %item.source,
            owner = %item.owner,
            parent_id = item.parent_id,
            mime_type = %file.mime_type,
            "uploading image"
        );

        let document = client
            .upload(Image::MAPPER.resource(), &item.owner, item.parent_id, file)
            .await?;

        match document.as_ref().and_then(uploaded_id) {
            Some(id) => {
                tracing::debug!(source = %item.source, id, "image uploaded");
                Ok(UploadOutcome::Uploaded(id))
            }
            None => Ok(Self::fail(
                item,
                UploadFailure::EmptyResponse,
                "no image id in response",
            )),
        }
    }

    fn fail(item: &UploadItem, failure: UploadFailure, detail: &str) -> UploadOutcome {
        tracing::warn!(
            source = %item.source,
            reason = failure.reason(),
            detail,
            "image upload skipped"
        );
        UploadOutcome::Failed(failure)
    }
}

fn uploaded_id(document: &ParsedDocument) -> Option<ResourceId> {
    document
        .get(Image::MAPPER.model())
        .and_then(|image| image.get("id"))
        .and_then(id_value)
}

/// Decodes the bytes and picks what to send.
///
/// JPEG, PNG and GIF go out unchanged; other decodable formats are
/// re-encoded as PNG.
fn prepare_file(locator: &Url, bytes: Vec<u8>) -> Result<UploadFile, image::ImageError> {
    let format = image::guess_format(&bytes)?;
    let decoded = image::load_from_memory_with_format(&bytes, format)?;
    let stem = file_stem(locator);

    let (bytes, format) = match format {
        ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::Gif => (bytes, format),
        _ => {
            let mut encoded = Cursor::new(Vec::new());
            decoded.write_to(&mut encoded, ImageFormat::Png)?;
            (encoded.into_inner(), ImageFormat::Png)
        }
    };

    let extension = format.extensions_str().first().copied().unwrap_or("png");
    Ok(UploadFile::new(
        format!("{stem}.{extension}"),
        format.to_mime_type(),
        bytes,
    ))
}

/// Last path segment without its extension; `image` when there is none.
fn file_stem(locator: &Url) -> String {
    let segment = locator
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default();
    let stem = segment.split('.').next().unwrap_or_default();

    if stem.is_empty() {
        "image".to_string()
    } else {
        stem.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};

    fn encoded(format: ImageFormat) -> Vec<u8> {
        let image = DynamicImage::ImageRgb8(RgbImage::new(2, 2));
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, format).unwrap();
        bytes.into_inner()
    }

    fn locator(url: &str) -> Url {
        Url::parse(url).unwrap()
    }

    #[test]
    fn test_failure_reasons() {
        assert_eq!(UploadFailure::InvalidLocator.reason(), "invalid-locator");
        assert_eq!(UploadFailure::InvalidImage.reason(), "invalid-image");
        assert_eq!(UploadFailure::FetchError.reason(), "fetch-error");
        assert_eq!(UploadFailure::EmptyResponse.to_string(), "empty-response");
    }

    #[test]
    fn test_outcome_accessors() {
        assert_eq!(UploadOutcome::Uploaded(4).id(), Some(4));
        assert!(UploadOutcome::Uploaded(4).is_uploaded());
        let failed = UploadOutcome::Failed(UploadFailure::InvalidImage);
        assert_eq!(failed.id(), None);
        assert!(!failed.is_uploaded());
        assert_eq!(failed.failure(), Some(UploadFailure::InvalidImage));
    }

    #[test]
    fn test_upload_error_keeps_completed_outcomes() {
        let error = UploadError {
            completed: vec![
                UploadOutcome::Uploaded(7),
                UploadOutcome::Failed(UploadFailure::FetchError),
                UploadOutcome::Uploaded(9),
            ],
            source: TransportError::Response(crate::clients::HttpResponseError {
                code: 503,
                message: "Service Unavailable".to_string(),
            }),
        };

        assert_eq!(error.uploaded_ids(), vec![7, 9]);
        assert_eq!(
            error.to_string(),
            "Image upload stopped after 3 source(s): HTTP 503: Service Unavailable"
        );
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_sources_normalization() {
        assert_eq!(Sources::from("a").as_slice(), ["a".to_string()]);
        assert!(Sources::from("  ").is_empty());
        assert!(Sources::from(Vec::<String>::new()).is_empty());
        assert!(Sources::from(None::<Vec<&str>>).is_empty());
        assert_eq!(Sources::from(Some("a")).len(), 1);
        assert_eq!(Sources::from(["a", "", "b"]).len(), 3);
    }

    #[test]
    fn test_png_is_sent_unchanged() {
        let bytes = encoded(ImageFormat::Png);
        let file = prepare_file(&locator("https://cdn.example/shirt.png"), bytes.clone()).unwrap();

        assert_eq!(file.bytes, bytes);
        assert_eq!(file.mime_type, "image/png");
        assert_eq!(file.file_name, "shirt.png");
        assert_eq!(file.field_name, "image");
    }

    #[test]
    fn test_jpeg_is_sent_unchanged() {
        let bytes = encoded(ImageFormat::Jpeg);
        let file = prepare_file(&locator("https://cdn.example/p/photo.jpeg"), bytes.clone()).unwrap();

        assert_eq!(file.bytes, bytes);
        assert_eq!(file.mime_type, "image/jpeg");
        assert_eq!(file.file_name, "photo.jpg");
    }

    #[test]
    fn test_bmp_is_reencoded_as_png() {
        let file = prepare_file(&locator("https://cdn.example/scan.bmp"), encoded(ImageFormat::Bmp)).unwrap();

        assert_eq!(file.mime_type, "image/png");
        assert_eq!(file.file_name, "scan.png");
        assert_eq!(image::guess_format(&file.bytes).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_garbage_is_not_an_image() {
        let result = prepare_file(&locator("https://cdn.example/a.png"), b"<html>404</html>".to_vec());
        assert!(result.is_err());
    }

    #[test]
    fn test_file_stem_defaults() {
        assert_eq!(file_stem(&locator("https://cdn.example/")), "image");
        assert_eq!(file_stem(&locator("https://cdn.example/a/b/c.tar.gz")), "c");
        assert_eq!(file_stem(&locator("file:///tmp/cover")), "cover");
    }
}
