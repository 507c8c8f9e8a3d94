//! VideoStream web application.
//!
//! Serves the pages (home, auth, browse, play, upload), runs the session
//! gate in front of the protected upload routes, and drives the upload
//! pipeline against the injected backend capability client.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod pipeline;
pub mod setup;
pub mod state;
pub mod telemetry;
pub mod views;
