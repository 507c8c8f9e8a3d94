//! HTTP client core: construction, capability gating, shared headers.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use videostream_core::{AppError, SupabaseConfig};

use crate::transport::{HttpTransport, ObjectTransport};

const REQUEST_TIMEOUT_SECS: u64 = 60;

pub(crate) struct ClientInner {
    pub(crate) http: Client,
    pub(crate) base_url: String,
    pub(crate) anon_key: String,
    pub(crate) transport: Arc<dyn ObjectTransport>,
}

/// Client for the managed backend. Every operation is usable only when the
/// configuration was valid at construction; otherwise the client is disabled
/// and operations return `AppError::NotConfigured` without network I/O.
#[derive(Clone)]
pub struct SupabaseClient {
    pub(crate) inner: Option<Arc<ClientInner>>,
}

impl SupabaseClient {
    /// Build a client from configuration. Invalid configuration yields the
    /// disabled client rather than an error: degraded mode is a valid state.
    pub fn new(config: &SupabaseConfig) -> Self {
        if !config.is_valid() {
            tracing::warn!(
                "Supabase environment variables are not set or invalid; backend operations disabled"
            );
            return Self::disabled();
        }
        let http = build_http();
        let transport = Arc::new(HttpTransport::new(http.clone()));
        Self::assemble(config, http, transport)
    }

    /// Build a client with an injected object transport. Tests use this to
    /// substitute a fake transport with deterministic progress ticks.
    pub fn with_transport(config: &SupabaseConfig, transport: Arc<dyn ObjectTransport>) -> Self {
        if !config.is_valid() {
            return Self::disabled();
        }
        Self::assemble(config, build_http(), transport)
    }

    fn assemble(
        config: &SupabaseConfig,
        http: Client,
        transport: Arc<dyn ObjectTransport>,
    ) -> Self {
        SupabaseClient {
            inner: Some(Arc::new(ClientInner {
                http,
                base_url: config.base_url().to_string(),
                anon_key: config.anon_key.clone(),
                transport,
            })),
        }
    }

    /// The no-op variant substituted when configuration is invalid.
    pub fn disabled() -> Self {
        SupabaseClient { inner: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    pub(crate) fn inner(&self) -> Result<&ClientInner, AppError> {
        self.inner.as_deref().ok_or(AppError::NotConfigured)
    }
}

fn build_http() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .expect("reqwest client with static configuration")
}

impl ClientInner {
    pub(crate) fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Apply the `apikey` and `Authorization` headers every backend request
    /// carries. `bearer` defaults to the anon key when no user token applies.
    pub(crate) fn apply_auth(
        &self,
        request: reqwest::RequestBuilder,
        bearer: Option<&str>,
    ) -> reqwest::RequestBuilder {
        let token = bearer.unwrap_or(&self.anon_key);
        request
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", token))
    }
}
