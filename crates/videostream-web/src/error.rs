//! HTTP error response conversion.
//!
//! Handlers render expected error states inline themselves; this wrapper is
//! the fallback for faults that escape a handler, so they still produce a
//! consistent page and a log line at the right level.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use videostream_core::{AppError, LogLevel};

use crate::views;

/// Wrapper for AppError to implement IntoResponse. Needed because of orphan
/// rules: IntoResponse and AppError both live in other crates.
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Request failed");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let error = &self.0;
        log_error(error);

        let status = StatusCode::from_u16(error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = views::error_page(&error.client_message());
        (status, Html(body)).into_response()
    }
}
