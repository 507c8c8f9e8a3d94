//! Error types module
//!
//! All faults crossing a component boundary are represented by [`AppError`].
//! Externally-sourced faults (identity, storage, record store) are converted
//! into these variants at the boundary of the operation that invoked them and
//! rendered as user-visible messages; none propagate unhandled.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like backend faults
    Warn,
    /// Error level - for unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Supabase is not configured. Please set up your environment variables.")]
    NotConfigured,

    #[error("{0}")]
    Auth(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code to return when the error surfaces as a response.
    pub fn http_status_code(&self) -> u16 {
        match self {
            AppError::NotConfigured => 503,
            AppError::Auth(_) => 401,
            AppError::Storage(_) => 502,
            AppError::Store(_) => 502,
            AppError::NotFound(_) => 404,
            AppError::InvalidInput(_) => 400,
            AppError::Internal(_) => 500,
        }
    }

    /// Message shown to the user. Auth and input faults surface verbatim;
    /// backend faults keep their transport detail (the original SDK did the
    /// same), internal faults are generic.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::NotConfigured => LogLevel::Debug,
            AppError::Auth(_) => LogLevel::Debug,
            AppError::InvalidInput(_) => LogLevel::Debug,
            AppError::NotFound(_) => LogLevel::Debug,
            AppError::Storage(_) => LogLevel::Warn,
            AppError::Store(_) => LogLevel::Warn,
            AppError::Internal(_) => LogLevel::Error,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::NotConfigured => "NotConfigured",
            AppError::Auth(_) => "Auth",
            AppError::Storage(_) => "Storage",
            AppError::Store(_) => "Store",
            AppError::NotFound(_) => "NotFound",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Internal(_) => "Internal",
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_configured_metadata() {
        let err = AppError::NotConfigured;
        assert_eq!(err.http_status_code(), 503);
        assert_eq!(err.log_level(), LogLevel::Debug);
        assert!(err.client_message().contains("not configured"));
    }

    #[test]
    fn test_auth_message_surfaces_verbatim() {
        let err = AppError::Auth("Invalid login credentials".to_string());
        assert_eq!(err.client_message(), "Invalid login credentials");
        assert_eq!(err.http_status_code(), 401);
    }

    #[test]
    fn test_internal_message_is_generic() {
        let err = AppError::Internal("connection pool exhausted".to_string());
        assert_eq!(err.client_message(), "Internal server error");
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_not_found_metadata() {
        let err = AppError::NotFound("Video not found".to_string());
        assert_eq!(err.http_status_code(), 404);
        assert_eq!(err.error_type(), "NotFound");
    }
}
