//! VideoStream Core Library
//!
//! This crate provides the domain models, error types, configuration, and the
//! pure decision logic (session gate routing, upload validation, storage key
//! generation) shared across all VideoStream components.

pub mod config;
pub mod error;
pub mod gate;
pub mod keys;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{is_valid_config, AppConfig, SupabaseConfig};
pub use error::{AppError, LogLevel};
pub use gate::{decide_route, GateDecision, SessionLookup, PROTECTED_PREFIX};
pub use models::{
    CookieMutation, NewVideoRecord, Session, SessionCookies, UploadPhase, VideoRecord,
};
