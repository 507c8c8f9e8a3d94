//! Identity service operations (GoTrue).

use serde::Deserialize;
use videostream_core::{AppError, Session};

use crate::client::SupabaseClient;

/// Successful sign-up outcome: the account awaits email confirmation.
#[derive(Debug, Clone)]
pub struct PendingConfirmation {
    pub email: String,
}

/// Minimal identity of the user behind a valid access token.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: u64,
}

impl From<TokenResponse> for Session {
    fn from(token: TokenResponse) -> Self {
        Session {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_in: token.expires_in,
        }
    }
}

/// Extract the service's human-readable message from an auth error body.
/// GoTrue responses vary between `error_description`, `msg`, and `message`.
fn auth_error_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error_description", "msg", "message", "error"] {
            if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
                return message.to_string();
            }
        }
    }
    format!("Authentication failed with status {}", status)
}

impl SupabaseClient {
    /// Exchange credentials for a session. The service's message is surfaced
    /// verbatim on failure (bad credentials, unconfirmed account, ...).
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AppError> {
        let inner = self.inner()?;
        let url = inner.build_url("/auth/v1/token?grant_type=password");
        let request = inner.apply_auth(inner.http.post(&url), None).json(
            &serde_json::json!({ "email": email, "password": password }),
        );

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Auth(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Auth(auth_error_message(status, &body)));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::Auth(e.to_string()))?;
        Ok(token.into())
    }

    /// Register a new account. Success means a confirmation email is on its
    /// way; no session is issued yet.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<PendingConfirmation, AppError> {
        let inner = self.inner()?;
        let url = inner.build_url("/auth/v1/signup");
        let request = inner.apply_auth(inner.http.post(&url), None).json(
            &serde_json::json!({ "email": email, "password": password }),
        );

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Auth(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Auth(auth_error_message(status, &body)));
        }

        Ok(PendingConfirmation {
            email: email.to_string(),
        })
    }

    /// Revoke the session. Best-effort: a remote fault is logged and
    /// swallowed so sign-out never fails the caller.
    pub async fn sign_out(&self, access_token: &str) {
        let Ok(inner) = self.inner() else {
            return;
        };
        let url = inner.build_url("/auth/v1/logout");
        let request = inner.apply_auth(inner.http.post(&url), Some(access_token));

        match request.send().await {
            Ok(response) if !response.status().is_success() => {
                tracing::warn!(status = %response.status(), "Sign-out rejected by identity service");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Sign-out request failed");
            }
            Ok(_) => {}
        }
    }

    /// Mint a fresh session from a refresh token. A rejected token is an
    /// `Auth` error (the session is dead); transport faults are `Internal`.
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<Session, AppError> {
        let inner = self.inner()?;
        let url = inner.build_url("/auth/v1/token?grant_type=refresh_token");
        let request = inner
            .apply_auth(inner.http.post(&url), None)
            .json(&serde_json::json!({ "refresh_token": refresh_token }));

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Session refresh failed: {}", e)))?;

        let status = response.status();
        if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Auth(auth_error_message(status, &body)));
        }
        if !status.is_success() {
            return Err(AppError::Internal(format!(
                "Session refresh failed with status {}",
                status
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("Session refresh failed: {}", e)))?;
        Ok(token.into())
    }

    /// Look up the user behind an access token. `Ok(None)` means the token
    /// was rejected; `Err` means the lookup itself faulted.
    pub async fn get_user(&self, access_token: &str) -> Result<Option<UserInfo>, AppError> {
        let inner = self.inner()?;
        let url = inner.build_url("/auth/v1/user");
        let request = inner.apply_auth(inner.http.get(&url), Some(access_token));

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("User lookup failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(AppError::Internal(format!(
                "User lookup failed with status {}",
                status
            )));
        }

        let user: UserInfo = response
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("User lookup failed: {}", e)))?;
        Ok(Some(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use videostream_core::SupabaseConfig;

    fn client_for(server: &mockito::ServerGuard) -> SupabaseClient {
        SupabaseClient::new(&SupabaseConfig::new(server.url(), "test-anon-key"))
    }

    #[tokio::test]
    async fn test_sign_in_returns_session() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/auth/v1/token")
            .match_query(mockito::Matcher::UrlEncoded(
                "grant_type".into(),
                "password".into(),
            ))
            .match_header("apikey", "test-anon-key")
            .with_status(200)
            .with_body(
                serde_json::json!({
                    "access_token": "at-1",
                    "refresh_token": "rt-1",
                    "expires_in": 3600,
                    "token_type": "bearer"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let session = client_for(&server)
            .sign_in("a@b.co", "secret")
            .await
            .unwrap();
        assert_eq!(session.access_token, "at-1");
        assert_eq!(session.refresh_token, "rt-1");
        assert_eq!(session.expires_in, 3600);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_sign_in_failure_surfaces_service_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/auth/v1/token")
            .match_query(mockito::Matcher::Any)
            .with_status(400)
            .with_body(
                serde_json::json!({
                    "error": "invalid_grant",
                    "error_description": "Invalid login credentials"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let err = client_for(&server)
            .sign_in("a@b.co", "wrong")
            .await
            .unwrap_err();
        match err {
            AppError::Auth(message) => assert_eq!(message, "Invalid login credentials"),
            other => panic!("expected Auth, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_sign_up_pending_confirmation() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/auth/v1/signup")
            .with_status(200)
            .with_body(serde_json::json!({ "id": "u-1", "email": "a@b.co" }).to_string())
            .create_async()
            .await;

        let pending = client_for(&server).sign_up("a@b.co", "secret").await.unwrap();
        assert_eq!(pending.email, "a@b.co");
    }

    #[tokio::test]
    async fn test_get_user_distinguishes_rejection_from_fault() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/auth/v1/user")
            .match_header("Authorization", "Bearer bad-token")
            .with_status(401)
            .with_body(r#"{"msg":"invalid JWT"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let user = client.get_user("bad-token").await.unwrap();
        assert!(user.is_none());

        server
            .mock("GET", "/auth/v1/user")
            .match_header("Authorization", "Bearer any")
            .with_status(500)
            .create_async()
            .await;
        let err = client.get_user("any").await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn test_refresh_rejection_is_auth_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/auth/v1/token")
            .match_query(mockito::Matcher::UrlEncoded(
                "grant_type".into(),
                "refresh_token".into(),
            ))
            .with_status(400)
            .with_body(r#"{"error_description":"Invalid Refresh Token"}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .refresh_session("stale")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Auth(_)));
    }

    #[test]
    fn test_auth_error_message_fallbacks() {
        let status = reqwest::StatusCode::BAD_REQUEST;
        assert_eq!(
            auth_error_message(status, r#"{"msg":"Email not confirmed"}"#),
            "Email not confirmed"
        );
        assert_eq!(
            auth_error_message(status, r#"{"message":"boom"}"#),
            "boom"
        );
        assert_eq!(
            auth_error_message(status, "not json"),
            "Authentication failed with status 400 Bad Request"
        );
    }
}
