use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use videostream_core::CookieMutation;

use crate::middleware::{apply_cookie_mutations, session_cookies_from_headers};
use crate::state::AppState;
use crate::views;

#[derive(Deserialize)]
pub struct AuthQuery {
    #[serde(default)]
    mode: Option<String>,
}

#[derive(Deserialize)]
pub struct AuthForm {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub mode: String,
}

pub async fn auth_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AuthQuery>,
) -> Html<String> {
    let config_valid = state.config.supabase.is_valid();
    let sign_up = query.mode.as_deref() == Some("signup");
    Html(views::auth_page(config_valid, sign_up, None, None))
}

#[tracing::instrument(skip(state, form), fields(mode = %form.mode))]
pub async fn auth_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<AuthForm>,
) -> Response {
    let config_valid = state.config.supabase.is_valid();
    if !config_valid {
        return Html(views::auth_page(false, false, None, None)).into_response();
    }

    if form.mode == "signup" {
        match state.supabase.sign_up(&form.email, &form.password).await {
            Ok(_) => Html(views::auth_page(
                true,
                true,
                None,
                Some("Check your email for the confirmation link"),
            ))
            .into_response(),
            Err(e) => Html(views::auth_page(true, true, Some(&e.client_message()), None))
                .into_response(),
        }
    } else {
        match state.supabase.sign_in(&form.email, &form.password).await {
            Ok(session) => {
                let mut response = Redirect::to("/").into_response();
                apply_cookie_mutations(&mut response, &CookieMutation::set_session(&session));
                response
            }
            Err(e) => Html(views::auth_page(true, false, Some(&e.client_message()), None))
                .into_response(),
        }
    }
}

/// Best-effort sign-out: the remote revocation may fail, the local session
/// cookies are cleared regardless.
pub async fn sign_out(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let cookies = session_cookies_from_headers(&headers);
    if let Some(access_token) = &cookies.access_token {
        state.supabase.sign_out(access_token).await;
    }

    let mut response = Redirect::to("/").into_response();
    apply_cookie_mutations(&mut response, &CookieMutation::clear_session());
    response
}
