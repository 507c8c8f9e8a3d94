//! Session resolution from request cookies.
//!
//! `resolve_session` performs the lookup and returns any cookie rewrites as
//! data; the caller applies them to the outgoing response. This keeps the
//! gate's routing decision pure and independently testable.

use videostream_core::models::session::DEFAULT_SESSION_TTL_SECS;
use videostream_core::{AppError, CookieMutation, Session, SessionCookies};

use crate::client::SupabaseClient;

impl SupabaseClient {
    /// Resolve the current session from the request's cookie pair.
    ///
    /// - A validated access token yields the session unchanged, no rewrites.
    /// - A rejected or absent access token with a refresh token triggers a
    ///   transparent refresh; the new token pair is returned as cookie sets.
    /// - A dead pair (refresh rejected, or stale cookies with no refresh
    ///   path) yields no session and clears both cookies.
    /// - A transport fault during lookup or refresh is an `Err`; the caller
    ///   must not treat it as "signed out".
    pub async fn resolve_session(
        &self,
        cookies: &SessionCookies,
    ) -> Result<(Option<Session>, Vec<CookieMutation>), AppError> {
        self.inner()?;

        if let Some(access_token) = &cookies.access_token {
            if self.get_user(access_token).await?.is_some() {
                let session = Session {
                    access_token: access_token.clone(),
                    refresh_token: cookies.refresh_token.clone().unwrap_or_default(),
                    expires_in: DEFAULT_SESSION_TTL_SECS,
                };
                return Ok((Some(session), Vec::new()));
            }
        }

        if let Some(refresh_token) = &cookies.refresh_token {
            match self.refresh_session(refresh_token).await {
                Ok(session) => {
                    tracing::debug!("Session refreshed from refresh token");
                    let mutations = CookieMutation::set_session(&session);
                    return Ok((Some(session), mutations));
                }
                Err(AppError::Auth(_)) => {
                    return Ok((None, CookieMutation::clear_session()));
                }
                Err(e) => return Err(e),
            }
        }

        if cookies.is_empty() {
            Ok((None, Vec::new()))
        } else {
            // A lone stale access token with no refresh path.
            Ok((None, CookieMutation::clear_session()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use videostream_core::SupabaseConfig;

    fn client_for(server: &mockito::ServerGuard) -> SupabaseClient {
        SupabaseClient::new(&SupabaseConfig::new(server.url(), "anon"))
    }

    fn cookies(access: Option<&str>, refresh: Option<&str>) -> SessionCookies {
        SessionCookies {
            access_token: access.map(String::from),
            refresh_token: refresh.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_valid_access_token_yields_session_without_rewrites() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/auth/v1/user")
            .match_header("Authorization", "Bearer good")
            .with_status(200)
            .with_body(r#"{"id":"u-1","email":"a@b.co"}"#)
            .create_async()
            .await;

        let (session, mutations) = client_for(&server)
            .resolve_session(&cookies(Some("good"), Some("rt")))
            .await
            .unwrap();
        assert_eq!(session.unwrap().access_token, "good");
        assert!(mutations.is_empty());
    }

    #[tokio::test]
    async fn test_rejected_access_token_refreshes_and_rewrites_cookies() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/auth/v1/user")
            .with_status(401)
            .create_async()
            .await;
        server
            .mock("POST", "/auth/v1/token")
            .match_query(mockito::Matcher::UrlEncoded(
                "grant_type".into(),
                "refresh_token".into(),
            ))
            .with_status(200)
            .with_body(
                serde_json::json!({
                    "access_token": "at-new",
                    "refresh_token": "rt-new",
                    "expires_in": 3600
                })
                .to_string(),
            )
            .create_async()
            .await;

        let (session, mutations) = client_for(&server)
            .resolve_session(&cookies(Some("expired"), Some("rt-old")))
            .await
            .unwrap();
        assert_eq!(session.unwrap().access_token, "at-new");
        assert_eq!(mutations.len(), 2);
        assert!(matches!(
            &mutations[0],
            CookieMutation::Set { value, .. } if value == "at-new"
        ));
    }

    #[tokio::test]
    async fn test_dead_pair_clears_cookies() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/auth/v1/user")
            .with_status(401)
            .create_async()
            .await;
        server
            .mock("POST", "/auth/v1/token")
            .match_query(mockito::Matcher::Any)
            .with_status(400)
            .with_body(r#"{"error_description":"Invalid Refresh Token"}"#)
            .create_async()
            .await;

        let (session, mutations) = client_for(&server)
            .resolve_session(&cookies(Some("expired"), Some("revoked")))
            .await
            .unwrap();
        assert!(session.is_none());
        assert_eq!(mutations, CookieMutation::clear_session());
    }

    #[tokio::test]
    async fn test_no_cookies_is_signed_out_without_rewrites() {
        let server = mockito::Server::new_async().await;
        let (session, mutations) = client_for(&server)
            .resolve_session(&cookies(None, None))
            .await
            .unwrap();
        assert!(session.is_none());
        assert!(mutations.is_empty());
    }

    #[tokio::test]
    async fn test_lookup_fault_is_an_error_not_signed_out() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/auth/v1/user")
            .with_status(500)
            .create_async()
            .await;

        let err = client_for(&server)
            .resolve_session(&cookies(Some("token"), None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
