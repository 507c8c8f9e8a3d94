//! Upload pipeline.
//!
//! Drives one user-initiated video submission through its phases:
//! validate -> upload (with progress) -> resolve public URL -> persist
//! metadata. Exactly one job may be in flight; new submissions are rejected
//! while one is running. The current phase is observable by the status
//! endpoint, which is how the page shows a progress bar.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use videostream_core::{keys, validation, AppError, NewVideoRecord, UploadPhase};
use videostream_supabase::{ProgressObserver, SupabaseClient};

/// One submission's input, extracted from the multipart form.
pub struct UploadInput {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
    pub title: String,
    pub description: String,
    /// Number of file parts in the submission; exactly one is accepted.
    pub file_count: usize,
}

/// Shared phase handle, observable while a job runs.
type PhaseCell = Arc<Mutex<UploadPhase>>;

/// Forwards transport progress into the job's `Uploading` phase. Regressive
/// or out-of-phase ticks are dropped so the visible progress stays monotonic.
struct PhaseObserver {
    phase: PhaseCell,
}

impl ProgressObserver for PhaseObserver {
    fn on_progress(&self, percent: u8) {
        let mut current = self.phase.lock().unwrap();
        let next = UploadPhase::Uploading { progress: percent };
        if current.may_follow(&next) {
            *current = next;
        }
    }
}

/// Releases the in-flight flag when the job ends, by any path.
struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct UploadPipeline {
    phase: PhaseCell,
    in_flight: Arc<AtomicBool>,
}

impl Default for UploadPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadPipeline {
    pub fn new() -> Self {
        UploadPipeline {
            phase: Arc::new(Mutex::new(UploadPhase::Idle)),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Snapshot of the current phase.
    pub fn phase(&self) -> UploadPhase {
        self.phase.lock().unwrap().clone()
    }

    fn set_phase(&self, next: UploadPhase) {
        let mut current = self.phase.lock().unwrap();
        debug_assert!(
            current.may_follow(&next),
            "illegal phase transition {:?} -> {:?}",
            *current,
            next
        );
        tracing::debug!(from = ?*current, to = ?next, "Upload phase transition");
        *current = next;
    }

    /// Mark the job failed and hand the error back to the caller.
    fn fail(&self, error: AppError) -> AppError {
        self.set_phase(UploadPhase::Failed {
            reason: error.client_message(),
        });
        error
    }

    /// Run one submission to completion. Returns the resolved public URL on
    /// success. Rejects immediately if another job is in flight.
    pub async fn submit(
        &self,
        client: &SupabaseClient,
        access_token: Option<&str>,
        input: UploadInput,
    ) -> Result<String, AppError> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(AppError::InvalidInput(
                "An upload is already in progress".to_string(),
            ));
        }
        let _guard = InFlightGuard(self.in_flight.clone());

        // A fresh job supersedes the previous terminal state.
        *self.phase.lock().unwrap() = UploadPhase::Idle;
        self.set_phase(UploadPhase::Validating);

        if !client.is_enabled() {
            return Err(self.fail(AppError::NotConfigured));
        }
        if let Err(e) = validation::validate_file_count(input.file_count) {
            return Err(self.fail(e));
        }
        if let Err(e) = validation::validate_video_content_type(&input.content_type) {
            return Err(self.fail(e));
        }
        let title = match validation::validate_title(&input.title) {
            Ok(title) => title,
            Err(e) => return Err(self.fail(e)),
        };

        let path = keys::generate_object_path(&input.file_name);
        tracing::info!(path = %path, size_bytes = input.data.len(), title = %title, "Starting video upload");

        self.set_phase(UploadPhase::Uploading { progress: 0 });
        let observer = Arc::new(PhaseObserver {
            phase: self.phase.clone(),
        });
        if let Err(e) = client
            .upload_object(&path, input.data, &input.content_type, access_token, observer)
            .await
        {
            return Err(self.fail(e));
        }

        self.set_phase(UploadPhase::Persisting);
        let url = match client.get_public_url(&path) {
            Ok(url) => url,
            Err(e) => return Err(self.fail(e)),
        };

        let record = NewVideoRecord {
            title,
            description: input.description,
            url: url.clone(),
            file_path: path.clone(),
        };
        if let Err(e) = client.insert_video(&record, access_token).await {
            // The uploaded object stays behind with no referencing record;
            // there is no compensating delete.
            tracing::warn!(path = %path, error = %e, "Metadata insert failed; stored object is orphaned");
            return Err(self.fail(e));
        }

        self.set_phase(UploadPhase::Succeeded { url: url.clone() });
        tracing::info!(path = %path, url = %url, "Video upload succeeded");
        Ok(url)
    }
}
