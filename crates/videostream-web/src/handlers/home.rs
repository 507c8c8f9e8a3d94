use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Html,
};
use serde::Deserialize;

use crate::middleware::session_cookies_from_headers;
use crate::state::AppState;
use crate::views;

#[derive(Deserialize)]
pub struct HomeQuery {
    #[serde(default)]
    setup: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

pub async fn home_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HomeQuery>,
    headers: HeaderMap,
) -> Html<String> {
    let config_valid = state.config.supabase.is_valid();
    // Cookie presence only; the nav hint does not need a backend round-trip.
    let signed_in = !session_cookies_from_headers(&headers).is_empty();
    let setup_required = query.setup.as_deref() == Some("required");
    let supabase_error = query.error.as_deref() == Some("supabase");

    Html(views::home_page(
        config_valid,
        signed_in,
        setup_required,
        supabase_error,
    ))
}
