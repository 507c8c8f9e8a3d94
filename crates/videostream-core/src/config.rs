//! Configuration module
//!
//! Application configuration is sourced from the process environment once at
//! startup. Missing or placeholder Supabase credentials do not abort startup:
//! the application runs in a degraded mode where every backend-dependent
//! operation is disabled and the pages show a setup banner.

use std::env;

use url::Url;

/// Placeholder credentials shipped in the setup documentation. Treated as
/// "not configured" by exact string comparison.
pub const PLACEHOLDER_URL: &str = "your-supabase-url";
pub const PLACEHOLDER_ANON_KEY: &str = "your-supabase-anon-key";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_VIDEO_SIZE_MB: usize = 500;

/// Check whether an endpoint/key pair forms usable backend credentials.
///
/// Fails closed: empty values, the documented placeholder values, and
/// endpoints that do not parse as absolute URLs all yield `false`. Pure and
/// cheap, so it is safe to re-evaluate on every gated request.
pub fn is_valid_config(endpoint: &str, key: &str) -> bool {
    if endpoint.is_empty() || endpoint == PLACEHOLDER_URL {
        return false;
    }
    if key.is_empty() || key == PLACEHOLDER_ANON_KEY {
        return false;
    }
    Url::parse(endpoint).is_ok()
}

/// Credentials for the managed Supabase backend.
#[derive(Clone, Debug)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

impl SupabaseConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
        }
    }

    pub fn from_env() -> Self {
        Self {
            url: env::var("SUPABASE_URL").unwrap_or_default(),
            anon_key: env::var("SUPABASE_ANON_KEY").unwrap_or_default(),
        }
    }

    pub fn is_valid(&self) -> bool {
        is_valid_config(&self.url, &self.anon_key)
    }

    /// Endpoint with any trailing slash removed, ready for path concatenation.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

/// Application configuration (web server + backend credentials).
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub max_video_size_bytes: usize,
    pub supabase: SupabaseConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let server_port = env::var("PORT")
            .unwrap_or_else(|_| DEFAULT_PORT.to_string())
            .parse()
            .unwrap_or(DEFAULT_PORT);

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let max_video_size_bytes = env::var("MAX_VIDEO_SIZE_MB")
            .unwrap_or_else(|_| DEFAULT_MAX_VIDEO_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(DEFAULT_MAX_VIDEO_SIZE_MB)
            * 1024
            * 1024;

        AppConfig {
            server_port,
            cors_origins,
            max_video_size_bytes,
            supabase: SupabaseConfig::from_env(),
        }
    }
}
