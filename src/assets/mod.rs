//! Image upload for shop entities.
//!
//! Images are attached to an existing entity (usually a product) after it
//! has been created. Every source is handled on its own:
//!
//! ```text
//! PENDING -> VALIDATING -> UPLOADING -> SUCCEEDED
//!                 |             |
//!                 +-------------+-----> FAILED (invalid-locator, fetch-error,
//!                                               invalid-image, empty-response)
//! ```
//!
//! A failed source does not stop the batch. Transport errors on the upload
//! call itself do; the resulting [`UploadError`] keeps the outcomes of the
//! sources handled before it.
//!
//! - [`AssetUploader`]: runs a batch
//! - [`ImageFetcher`]: where bytes come from; [`RemoteFetcher`] serves
//!   `http`, `https` and `file` locators
//! - [`UploadOutcome`] and [`UploadFailure`]: per-source results

mod fetcher;
mod uploader;

pub use fetcher::{FetchError, ImageFetcher, RemoteFetcher};
pub use uploader::{
    AssetUploader, Sources, UploadError, UploadFailure, UploadItem, UploadOutcome,
};
