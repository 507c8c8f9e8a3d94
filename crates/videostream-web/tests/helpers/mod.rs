//! Test helpers: build app state and a test server against a faked backend.
//!
//! Run from workspace root: `cargo test -p videostream-web`.

// Each integration test binary uses a different subset of these helpers.
#![allow(dead_code)]

use axum_test::TestServer;
use videostream_core::{AppConfig, SupabaseConfig};
use videostream_web::setup::routes;
use videostream_web::state::AppState;

pub const PLACEHOLDER_URL: &str = "your-supabase-url";
pub const PLACEHOLDER_KEY: &str = "your-supabase-anon-key";

pub fn test_config(supabase_url: &str, anon_key: &str) -> AppConfig {
    AppConfig {
        server_port: 0,
        cors_origins: vec!["*".to_string()],
        max_video_size_bytes: 10 * 1024 * 1024,
        supabase: SupabaseConfig::new(supabase_url, anon_key),
    }
}

/// App wired to the given backend endpoint (usually a mockito server).
pub fn spawn_app(config: AppConfig) -> TestServer {
    let state = AppState::new(config);
    TestServer::new(routes::build_router(state)).expect("test server")
}

pub const MULTIPART_BOUNDARY: &str = "videostream-test-boundary";

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY)
}

/// Build a multipart form body with text fields and file parts.
pub fn multipart_body(
    title: &str,
    description: &str,
    files: &[(&str, &str, &[u8])],
) -> Vec<u8> {
    let mut body = Vec::new();
    let boundary = MULTIPART_BOUNDARY;

    for (name, value) in [("title", title), ("description", description)] {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for (file_name, content_type, data) in files {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

/// A canned video row as the record store would return it.
pub fn video_row(id: &str, title: &str, created_at: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "description": "",
        "url": format!("https://cdn.example.co/{}.mp4", title),
        "file_path": format!("videos/{}.mp4", title),
        "created_at": created_at
    })
}
