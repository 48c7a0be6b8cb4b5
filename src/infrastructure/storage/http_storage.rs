//! HTTP object-store client for document downloads.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;
use url::Url;

use super::service::{DocumentStorage, StorageError};

/// Document store client speaking the bucket/path HTTP download API.
///
/// Objects are addressed as `{base}/object/{bucket}/{path}`. When a service
/// key is configured it is sent as a Bearer token.
pub struct HttpDocumentStorage {
    client: reqwest::Client,
    base_url: Url,
    bucket: String,
    service_key: Option<String>,
}

impl HttpDocumentStorage {
    /// Creates a client for the given storage endpoint and bucket.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid absolute URL.
    pub fn new(
        base_url: &str,
        bucket: impl Into<String>,
        service_key: Option<String>,
    ) -> anyhow::Result<Self> {
        // A trailing slash matters for Url::join.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: Url::parse(&normalized)?,
            bucket: bucket.into(),
            service_key,
        })
    }

    fn object_url(&self, path: &str) -> Result<Url, StorageError> {
        self.base_url
            .join(&format!("object/{}/{}", self.bucket, path))
            .map_err(|e| StorageError::Transient {
                path: path.to_string(),
                reason: format!("invalid object path: {}", e),
            })
    }
}

#[async_trait]
impl DocumentStorage for HttpDocumentStorage {
    async fn fetch(&self, path: &str) -> Result<Bytes, StorageError> {
        let url = self.object_url(path)?;

        let mut request = self.client.get(url);
        if let Some(key) = &self.service_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| StorageError::Transient {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(StorageError::NotFound {
                path: path.to_string(),
            }),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(StorageError::Unauthorized {
                path: path.to_string(),
            }),
            status if status.is_success() => {
                response.bytes().await.map_err(|e| StorageError::Transient {
                    path: path.to_string(),
                    reason: e.to_string(),
                })
            }
            status => Err(StorageError::Transient {
                path: path.to_string(),
                reason: format!("unexpected status {}", status),
            }),
        }
    }

    async fn health_check(&self) -> bool {
        self.client
            .head(self.base_url.clone())
            .send()
            .await
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_url_includes_bucket_and_path() {
        let storage =
            HttpDocumentStorage::new("https://store.example.com/storage/v1", "documents", None)
                .unwrap();

        let url = storage.object_url("abc/paystub.pdf").unwrap();
        assert_eq!(
            url.as_str(),
            "https://store.example.com/storage/v1/object/documents/abc/paystub.pdf"
        );
    }

    #[test]
    fn test_trailing_slash_is_normalized() {
        let a = HttpDocumentStorage::new("https://s.example.com/v1", "b", None).unwrap();
        let b = HttpDocumentStorage::new("https://s.example.com/v1/", "b", None).unwrap();

        assert_eq!(
            a.object_url("x.pdf").unwrap(),
            b.object_url("x.pdf").unwrap()
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        assert!(HttpDocumentStorage::new("not a url", "documents", None).is_err());
    }
}
