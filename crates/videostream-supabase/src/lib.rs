//! Capability client for the managed Supabase backend.
//!
//! Exposes capability-checked operations against the identity service
//! (GoTrue), the object store (Storage), and the record store (PostgREST).
//! The client is constructed explicitly from configuration and injected into
//! whichever component needs it; when configuration is invalid a disabled
//! client is substituted and every operation fails immediately with
//! `AppError::NotConfigured`, attempting no network I/O.

pub mod auth;
pub mod client;
pub mod records;
pub mod session;
pub mod storage;
pub mod transport;

pub use auth::{PendingConfirmation, UserInfo};
pub use client::SupabaseClient;
pub use transport::{HttpTransport, NoopProgress, ObjectTransport, ProgressObserver, PutObject};
