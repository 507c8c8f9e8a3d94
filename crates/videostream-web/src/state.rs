//! Shared application state.

use std::sync::Arc;

use videostream_core::AppConfig;
use videostream_supabase::SupabaseClient;

use crate::pipeline::UploadPipeline;

/// Application state: immutable configuration, the injected backend client,
/// and the upload pipeline's observable job state.
pub struct AppState {
    pub config: AppConfig,
    pub supabase: SupabaseClient,
    pub uploads: UploadPipeline,
}

impl AppState {
    /// Build state from configuration. An invalid configuration yields a
    /// disabled client; the application still serves pages in degraded mode.
    pub fn new(config: AppConfig) -> Arc<Self> {
        let supabase = SupabaseClient::new(&config.supabase);
        Self::with_client(config, supabase)
    }

    /// Build state with an explicit client. Tests inject clients pointed at
    /// a faked backend or carrying a fake object transport.
    pub fn with_client(config: AppConfig, supabase: SupabaseClient) -> Arc<Self> {
        Arc::new(AppState {
            config,
            supabase,
            uploads: UploadPipeline::new(),
        })
    }
}
