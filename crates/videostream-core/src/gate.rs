//! Session gate decision logic.
//!
//! The routing decision for a gated request is a pure function of the
//! configuration validity, the session lookup outcome, and the request path,
//! so it can be tested without a server. The middleware in the web crate
//! performs the lookup and applies the decision.

/// Path prefix that requires a valid session.
pub const PROTECTED_PREFIX: &str = "/upload";

/// Outcome of resolving the current session for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionLookup {
    /// A valid session was found.
    Found,
    /// No session is present.
    Missing,
    /// The lookup itself faulted (backend unreachable, malformed response).
    Failed,
}

/// Terminal routing decision for one gated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Serve the request unmodified (aside from refreshed session cookies).
    Passthrough,
    /// Configuration is invalid: send every matched route to the setup
    /// landing location. No session lookup is attempted in this state.
    SetupRedirect,
    /// No session on a protected path: send to the login page.
    LoginRedirect,
    /// Session resolution faulted: send home with an error indicator rather
    /// than exposing a protected page on a backend fault.
    ErrorRedirect,
}

/// Decide how to route a matched request. Deterministic: the same
/// (config, lookup, path) tuple always yields the same decision.
pub fn decide_route(config_valid: bool, lookup: SessionLookup, path: &str) -> GateDecision {
    if !config_valid {
        return GateDecision::SetupRedirect;
    }
    match lookup {
        SessionLookup::Failed => GateDecision::ErrorRedirect,
        SessionLookup::Missing if path.starts_with(PROTECTED_PREFIX) => {
            GateDecision::LoginRedirect
        }
        SessionLookup::Missing | SessionLookup::Found => GateDecision::Passthrough,
    }
}
