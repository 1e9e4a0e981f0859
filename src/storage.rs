//! Stubbed object storage. Uploads are accepted and dropped; listings are empty.

use mock_core::Response;
use mock_query::Latency;
use serde::Serialize;

const PUBLIC_URL_BASE: &str = "https://mock.storage.local/object/public";

/// Storage handle returned by [`MockClient::storage`](crate::MockClient::storage).
#[derive(Debug, Clone, Copy)]
pub struct Storage {
    latency: Latency,
}

impl Storage {
    pub(crate) fn new(latency: Latency) -> Self {
        Self { latency }
    }

    pub fn from(&self, bucket: &str) -> Bucket {
        Bucket {
            name: bucket.to_string(),
            latency: self.latency,
        }
    }
}

/// Path of an accepted upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadReceipt {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicUrl {
    #[serde(rename = "publicUrl")]
    pub public_url: String,
}

/// One storage bucket.
#[derive(Debug, Clone)]
pub struct Bucket {
    name: String,
    latency: Latency,
}

impl Bucket {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Accept an upload without storing it.
    pub async fn upload(&self, path: &str, body: &[u8]) -> Response<UploadReceipt> {
        self.latency.sleep().await;
        tracing::debug!(
            "Discarding {} byte upload to {}/{}",
            body.len(),
            self.name,
            path
        );
        Response::ok(UploadReceipt {
            path: path.to_string(),
        })
    }

    /// Report the given paths as removed.
    pub async fn remove(&self, paths: &[&str]) -> Response<Vec<String>> {
        self.latency.sleep().await;
        Response::ok(paths.iter().map(|p| p.to_string()).collect())
    }

    /// Always empty.
    pub async fn list(&self, _prefix: &str) -> Response<Vec<String>> {
        self.latency.sleep().await;
        Response::ok(Vec::new())
    }

    /// URL where `path` would be served. Resolves immediately.
    pub fn get_public_url(&self, path: &str) -> Response<PublicUrl> {
        Response::ok(PublicUrl {
            public_url: format!(
                "{}/{}/{}",
                PUBLIC_URL_BASE,
                self.name,
                path.trim_start_matches('/')
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket() -> Bucket {
        Storage::new(Latency::none()).from("avatars")
    }

    #[tokio::test]
    async fn test_upload_then_list_is_still_empty() {
        let bucket = bucket();
        let receipt = bucket.upload("u/1.png", b"png").await;
        assert_eq!(receipt.data.unwrap().path, "u/1.png");
        assert_eq!(bucket.list("u/").await.data, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_remove_echoes_paths() {
        let removed = bucket().remove(&["a", "b"]).await;
        assert_eq!(removed.data, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_public_url() {
        let url = bucket().get_public_url("/u/1.png");
        assert_eq!(
            url.data.unwrap().public_url,
            "https://mock.storage.local/object/public/avatars/u/1.png"
        );
    }
}
