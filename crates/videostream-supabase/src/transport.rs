//! Object transport seam.
//!
//! The byte transfer behind `upload_object` sits behind a trait so progress
//! reporting is testable without a real network transfer: tests inject a fake
//! transport that emits deterministic progress ticks.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use videostream_core::AppError;

/// Receives percent-complete callbacks during an object upload. Invoked
/// monotonically from 0 to 100; 100 is reported only once the transfer has
/// been confirmed by the remote end.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, percent: u8);
}

/// Observer for callers that do not track progress.
pub struct NoopProgress;

impl ProgressObserver for NoopProgress {
    fn on_progress(&self, _percent: u8) {}
}

/// One object PUT: destination, content type, extra headers, payload.
pub struct PutObject {
    pub url: String,
    pub content_type: String,
    pub headers: Vec<(&'static str, String)>,
    pub data: Bytes,
}

/// Transfers object bytes to the storage service.
#[async_trait]
pub trait ObjectTransport: Send + Sync {
    async fn put(
        &self,
        request: PutObject,
        observer: Arc<dyn ProgressObserver>,
    ) -> Result<(), AppError>;
}

/// Production transport: a streamed HTTP POST through reqwest. The body is
/// chunked and progress is reported as chunks are handed to the connection,
/// capped at 99 until the service confirms receipt.
pub struct HttpTransport {
    http: reqwest::Client,
}

const CHUNK_SIZE: usize = 64 * 1024;

impl HttpTransport {
    pub fn new(http: reqwest::Client) -> Self {
        HttpTransport { http }
    }
}

#[async_trait]
impl ObjectTransport for HttpTransport {
    async fn put(
        &self,
        request: PutObject,
        observer: Arc<dyn ProgressObserver>,
    ) -> Result<(), AppError> {
        observer.on_progress(0);

        let total = request.data.len();
        let mut data = request.data;
        let mut chunks = Vec::with_capacity(total / CHUNK_SIZE + 1);
        while data.len() > CHUNK_SIZE {
            chunks.push(data.split_to(CHUNK_SIZE));
        }
        if !data.is_empty() {
            chunks.push(data);
        }

        let sent = Arc::new(AtomicUsize::new(0));
        let progress = observer.clone();
        let counter = sent.clone();
        let stream = futures::stream::iter(chunks.into_iter().map(move |chunk| {
            let transferred = counter.fetch_add(chunk.len(), Ordering::Relaxed) + chunk.len();
            if total > 0 {
                let percent = ((transferred * 100 / total) as u8).min(99);
                progress.on_progress(percent);
            }
            Ok::<Bytes, std::io::Error>(chunk)
        }));

        let mut builder = self
            .http
            .post(&request.url)
            .header("Content-Type", &request.content_type)
            .body(reqwest::Body::wrap_stream(stream));
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to upload file: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = storage_error_message(status, &body);
            return Err(AppError::Storage(detail));
        }

        observer.on_progress(100);
        Ok(())
    }
}

fn storage_error_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error", "msg"] {
            if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
                return message.to_string();
            }
        }
    }
    format!("Upload failed with status {}", status)
}
