//! Fetching image bytes from a locator.

use thiserror::Error;
use url::Url;

/// Error fetching a source.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The remote host could not be reached or the body not read.
    #[error("Failed to fetch {url}: {source}")]
    Http {
        /// The locator.
        url: String,
        /// The underlying error.
        source: reqwest::Error,
    },

    /// The remote host answered with a non-success status.
    #[error("Fetching {url} returned HTTP {code}")]
    Status {
        /// The locator.
        url: String,
        /// The HTTP status code.
        code: u16,
    },

    /// A local file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// The file path.
        path: String,
        /// The underlying error.
        source: std::io::Error,
    },

    /// The locator uses a scheme the fetcher does not serve.
    #[error("Unsupported locator scheme: {scheme}")]
    UnsupportedScheme {
        /// The scheme.
        scheme: String,
    },
}

// Verify FetchError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FetchError>();
};

/// Loads the bytes behind a locator.
///
/// [`RemoteFetcher`] is the production implementation.
#[allow(async_fn_in_trait)]
pub trait ImageFetcher {
    /// Returns the content at `locator`.
    async fn fetch(&self, locator: &Url) -> Result<Vec<u8>, FetchError>;
}

/// Fetches `http`/`https` locators over the network and `file` locators
/// from disk.
#[derive(Clone, Debug, Default)]
pub struct RemoteFetcher {
    client: reqwest::Client,
}

impl RemoteFetcher {
    /// Creates a fetcher with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`reqwest::Error`] if the HTTP client cannot be created.
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().use_rustls_tls().build()?;
        Ok(Self { client })
    }

    /// Creates a fetcher sharing an existing HTTP client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn fetch_remote(&self, locator: &Url) -> Result<Vec<u8>, FetchError> {
        let http = |source| FetchError::Http {
            url: locator.to_string(),
            source,
        };

        let response = self
            .client
            .get(locator.clone())
            .send()
            .await
            .map_err(http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: locator.to_string(),
                code: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(http)?;
        Ok(bytes.to_vec())
    }

    async fn fetch_file(locator: &Url) -> Result<Vec<u8>, FetchError> {
        let path = locator
            .to_file_path()
            .map_err(|()| FetchError::UnsupportedScheme {
                scheme: locator.scheme().to_string(),
            })?;

        tokio::fs::read(&path).await.map_err(|source| FetchError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}

impl ImageFetcher for RemoteFetcher {
    async fn fetch(&self, locator: &Url) -> Result<Vec<u8>, FetchError> {
        match locator.scheme() {
            "http" | "https" => self.fetch_remote(locator).await,
            "file" => Self::fetch_file(locator).await,
            scheme => Err(FetchError::UnsupportedScheme {
                scheme: scheme.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unsupported_scheme() {
        let fetcher = RemoteFetcher::new().unwrap();
        let locator = Url::parse("ftp://files.example/a.png").unwrap();

        let result = fetcher.fetch(&locator).await;
        assert!(matches!(
            result,
            Err(FetchError::UnsupportedScheme { ref scheme }) if scheme == "ftp"
        ));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let locator = Url::from_file_path(dir.path().join("missing.png")).unwrap();

        let result = RemoteFetcher::default().fetch(&locator).await;
        assert!(matches!(result, Err(FetchError::Io { .. })));
    }

    #[tokio::test]
    async fn test_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bytes.bin");
        std::fs::write(&path, [1_u8, 2, 3]).unwrap();
        let locator = Url::from_file_path(&path).unwrap();

        let bytes = RemoteFetcher::default().fetch(&locator).await.unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);
    }
}
