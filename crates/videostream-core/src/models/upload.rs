use serde::Serialize;

/// Visible state of the one in-flight video submission.
///
/// Phases advance strictly `Idle -> Validating -> Uploading -> Persisting ->
/// Succeeded`; `Failed` is reachable from any non-terminal phase. No phase is
/// ever revisited within a job; a new submission resets to `Idle` first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum UploadPhase {
    Idle,
    Validating,
    Uploading { progress: u8 },
    Persisting,
    Succeeded { url: String },
    Failed { reason: String },
}

impl UploadPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            UploadPhase::Idle | UploadPhase::Succeeded { .. } | UploadPhase::Failed { .. }
        )
    }

    /// Whether `next` is a legal successor of `self`. Progress updates within
    /// `Uploading` must be monotonic.
    pub fn may_follow(&self, next: &UploadPhase) -> bool {
        use UploadPhase::*;
        match (self, next) {
            (Idle, Validating) => true,
            (Validating, Uploading { .. }) => true,
            (Uploading { progress: a }, Uploading { progress: b }) => b >= a,
            (Uploading { .. }, Persisting) => true,
            (Persisting, Succeeded { .. }) => true,
            (Validating, Failed { .. })
            | (Uploading { .. }, Failed { .. })
            | (Persisting, Failed { .. }) => true,
            // Acknowledging a terminal outcome returns to Idle.
            (Succeeded { .. }, Idle) | (Failed { .. }, Idle) => true,
            _ => false,
        }
    }
}

impl Default for UploadPhase {
    fn default() -> Self {
        UploadPhase::Idle
    }
}
