use serde::{Deserialize, Serialize};

/// Cookie names mirroring the session into the browser. The gate reads and
/// rewrites these entries; it never inspects the token contents.
pub const ACCESS_TOKEN_COOKIE: &str = "sb-access-token";
pub const REFRESH_TOKEN_COOKIE: &str = "sb-refresh-token";

/// Fallback cookie lifetime for a session revalidated from cookies, where the
/// identity service does not report a fresh expiry.
pub const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

/// Opaque token material issued by the identity service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Seconds until the access token expires, as reported at issuance.
    pub expires_in: u64,
}

/// Session-related cookie values extracted from an incoming request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionCookies {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl SessionCookies {
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none()
    }
}

/// A cookie write to apply to the outgoing response. Session resolution
/// returns these as data; the caller applies them, keeping the decision
/// logic free of header side effects.
#[derive(Debug, Clone, PartialEq)]
pub enum CookieMutation {
    Set {
        name: &'static str,
        value: String,
        max_age_secs: u64,
    },
    Clear {
        name: &'static str,
    },
}

impl CookieMutation {
    /// Mutations that install a session's token pair.
    pub fn set_session(session: &Session) -> Vec<CookieMutation> {
        let ttl = if session.expires_in > 0 {
            session.expires_in
        } else {
            DEFAULT_SESSION_TTL_SECS
        };
        vec![
            CookieMutation::Set {
                name: ACCESS_TOKEN_COOKIE,
                value: session.access_token.clone(),
                max_age_secs: ttl,
            },
            CookieMutation::Set {
                name: REFRESH_TOKEN_COOKIE,
                value: session.refresh_token.clone(),
                // The refresh token outlives the access token so the session
                // can be renewed after the access cookie lapses.
                max_age_secs: 60 * 60 * 24 * 7,
            },
        ]
    }

    /// Mutations that destroy the session's token pair.
    pub fn clear_session() -> Vec<CookieMutation> {
        vec![
            CookieMutation::Clear {
                name: ACCESS_TOKEN_COOKIE,
            },
            CookieMutation::Clear {
                name: REFRESH_TOKEN_COOKIE,
            },
        ]
    }

    /// Render as a `Set-Cookie` header value. HttpOnly and SameSite=Lax keep
    /// the tokens out of page scripts and cross-site posts.
    pub fn to_header_value(&self) -> String {
        match self {
            CookieMutation::Set {
                name,
                value,
                max_age_secs,
            } => format!(
                "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
                name, value, max_age_secs
            ),
            CookieMutation::Clear { name } => {
                format!("{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax", name)
            }
        }
    }
}
