//! Session gate middleware.
//!
//! Layered onto the protected route group only; requests outside the matcher
//! never enter the gate and are always served. Per matched request: validate
//! configuration, resolve the session from cookies, route via the pure
//! decision function, and apply any refreshed cookie values to the response.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use videostream_core::models::session::{ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
use videostream_core::{
    decide_route, CookieMutation, GateDecision, Session, SessionCookies, SessionLookup,
};

use crate::state::AppState;

/// The resolved session for a request that passed the gate. Inserted as a
/// request extension for the handlers behind the gate.
#[derive(Clone)]
pub struct CurrentSession(pub Session);

/// Extract the session cookie pair from the request headers.
pub fn session_cookies_from_headers(headers: &HeaderMap) -> SessionCookies {
    let mut cookies = SessionCookies::default();
    for header_value in headers.get_all(header::COOKIE) {
        let Ok(raw) = header_value.to_str() else {
            continue;
        };
        for pair in raw.split(';') {
            let Some((name, value)) = pair.trim().split_once('=') else {
                continue;
            };
            match name {
                ACCESS_TOKEN_COOKIE if !value.is_empty() => {
                    cookies.access_token = Some(value.to_string());
                }
                REFRESH_TOKEN_COOKIE if !value.is_empty() => {
                    cookies.refresh_token = Some(value.to_string());
                }
                _ => {}
            }
        }
    }
    cookies
}

/// Append `Set-Cookie` headers for the given mutations.
pub fn apply_cookie_mutations(response: &mut Response, mutations: &[CookieMutation]) {
    for mutation in mutations {
        if let Ok(value) = HeaderValue::from_str(&mutation.to_header_value()) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
}

pub async fn session_gate(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let config_valid = state.config.supabase.is_valid();
    let path = request.uri().path().to_string();

    // Invalid configuration short-circuits before any session lookup.
    if !config_valid {
        tracing::debug!(path = %path, "Gate: configuration invalid, redirecting to setup");
        return Redirect::to("/?setup=required").into_response();
    }

    let cookies = session_cookies_from_headers(request.headers());
    let (lookup, session, mutations) = match state.supabase.resolve_session(&cookies).await {
        Ok((Some(session), mutations)) => (SessionLookup::Found, Some(session), mutations),
        Ok((None, mutations)) => (SessionLookup::Missing, None, mutations),
        Err(e) => {
            tracing::error!(error = %e, path = %path, "Gate: session resolution failed");
            (SessionLookup::Failed, None, Vec::new())
        }
    };

    match decide_route(config_valid, lookup, &path) {
        GateDecision::Passthrough => {
            if let Some(session) = session {
                request.extensions_mut().insert(CurrentSession(session));
            }
            let mut response = next.run(request).await;
            apply_cookie_mutations(&mut response, &mutations);
            response
        }
        GateDecision::LoginRedirect => {
            tracing::debug!(path = %path, "Gate: no session, redirecting to login");
            let mut response = Redirect::to("/auth").into_response();
            apply_cookie_mutations(&mut response, &mutations);
            response
        }
        GateDecision::ErrorRedirect => Redirect::to("/?error=supabase").into_response(),
        GateDecision::SetupRedirect => Redirect::to("/?setup=required").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_cookie_pair_extracted() {
        let headers =
            headers_with_cookie("sb-access-token=at-1; sb-refresh-token=rt-1; theme=dark");
        let cookies = session_cookies_from_headers(&headers);
        assert_eq!(cookies.access_token.as_deref(), Some("at-1"));
        assert_eq!(cookies.refresh_token.as_deref(), Some("rt-1"));
    }

    #[test]
    fn test_empty_cookie_values_ignored() {
        let headers = headers_with_cookie("sb-access-token=; sb-refresh-token=rt-1");
        let cookies = session_cookies_from_headers(&headers);
        assert!(cookies.access_token.is_none());
        assert_eq!(cookies.refresh_token.as_deref(), Some("rt-1"));
    }

    #[test]
    fn test_no_cookie_header() {
        let cookies = session_cookies_from_headers(&HeaderMap::new());
        assert!(cookies.is_empty());
    }

    #[test]
    fn test_mutations_become_set_cookie_headers() {
        let mut response = Response::new(axum::body::Body::empty());
        apply_cookie_mutations(&mut response, &CookieMutation::clear_session());
        let values: Vec<_> = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .collect();
        assert_eq!(values.len(), 2);
    }
}
