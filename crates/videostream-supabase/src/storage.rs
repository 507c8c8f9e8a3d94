//! Object store operations (Supabase Storage).

use std::sync::Arc;

use bytes::Bytes;
use videostream_core::AppError;

use crate::client::SupabaseClient;
use crate::transport::{ProgressObserver, PutObject};

impl SupabaseClient {
    /// Upload an object to `path` (bucket-qualified, e.g. `videos/abc_1.mp4`),
    /// reporting transfer progress to `observer`. No retry: a transport fault
    /// surfaces immediately and the pipeline aborts.
    ///
    /// `access_token` authenticates the upload as the signed-in user; the
    /// anon key is used otherwise.
    pub async fn upload_object(
        &self,
        path: &str,
        data: Bytes,
        content_type: &str,
        access_token: Option<&str>,
        observer: Arc<dyn ProgressObserver>,
    ) -> Result<(), AppError> {
        let inner = self.inner()?;
        let url = inner.build_url(&format!("/storage/v1/object/{}", path));
        let bearer = access_token.unwrap_or(&inner.anon_key);

        tracing::info!(path = %path, size_bytes = data.len(), "Uploading object to storage");

        let request = PutObject {
            url,
            content_type: content_type.to_string(),
            headers: vec![
                ("apikey", inner.anon_key.clone()),
                ("Authorization", format!("Bearer {}", bearer)),
                ("cache-control", "3600".to_string()),
                ("x-upsert", "false".to_string()),
            ],
            data,
        };

        inner.transport.put(request, observer).await.map_err(|e| {
            tracing::error!(error = %e, path = %path, "Failed to upload object");
            e
        })
    }

    /// Resolve the public URL for a stored object. Pure derivation with no
    /// network call: the storage layer guarantees this mapping for any path
    /// it accepted.
    pub fn get_public_url(&self, path: &str) -> Result<String, AppError> {
        let inner = self.inner()?;
        Ok(format!("{}/storage/v1/object/public/{}", inner.base_url, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::NoopProgress;
    use videostream_core::SupabaseConfig;

    #[test]
    fn test_public_url_derivation() {
        let client = SupabaseClient::new(&SupabaseConfig::new(
            "https://proj.supabase.co",
            "anon",
        ));
        let url = client.get_public_url("videos/abc_123.mp4").unwrap();
        assert_eq!(
            url,
            "https://proj.supabase.co/storage/v1/object/public/videos/abc_123.mp4"
        );
    }

    #[tokio::test]
    async fn test_upload_object_posts_with_storage_headers() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/storage/v1/object/videos/abc_123.mp4")
            .match_header("apikey", "anon")
            .match_header("Authorization", "Bearer user-token")
            .match_header("cache-control", "3600")
            .match_header("x-upsert", "false")
            .match_header("Content-Type", "video/mp4")
            .with_status(200)
            .with_body(r#"{"Key":"videos/abc_123.mp4"}"#)
            .create_async()
            .await;

        let client = SupabaseClient::new(&SupabaseConfig::new(server.url(), "anon"));
        client
            .upload_object(
                "videos/abc_123.mp4",
                Bytes::from_static(b"mp4 bytes"),
                "video/mp4",
                Some("user-token"),
                Arc::new(NoopProgress),
            )
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_upload_object_fault_is_storage_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/storage/v1/object/videos/x.mp4")
            .with_status(500)
            .with_body(r#"{"message":"service unavailable"}"#)
            .create_async()
            .await;

        let client = SupabaseClient::new(&SupabaseConfig::new(server.url(), "anon"));
        let err = client
            .upload_object(
                "videos/x.mp4",
                Bytes::from_static(b"bytes"),
                "video/mp4",
                None,
                Arc::new(NoopProgress),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
    }
}
