use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use uuid::Uuid;
use videostream_core::AppError;

use crate::error::HttpAppError;
use crate::middleware::session_cookies_from_headers;
use crate::state::AppState;
use crate::views;

#[tracing::instrument(skip(state, headers), fields(operation = "list_videos"))]
pub async fn videos_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, HttpAppError> {
    let config_valid = state.config.supabase.is_valid();
    let signed_in = !session_cookies_from_headers(&headers).is_empty();
    if !config_valid {
        return Ok(Html(views::videos_page(false, signed_in, &[])).into_response());
    }

    let videos = state.supabase.list_videos().await?;
    Ok(Html(views::videos_page(true, signed_in, &videos)).into_response())
}

#[tracing::instrument(skip(state, headers), fields(video_id = %id, operation = "get_video"))]
pub async fn video_detail_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, HttpAppError> {
    let config_valid = state.config.supabase.is_valid();
    let signed_in = !session_cookies_from_headers(&headers).is_empty();
    if !config_valid {
        return Ok(Html(views::videos_page(false, signed_in, &[])).into_response());
    }

    // A malformed id is rendered as the same not-found state as a missing row.
    let Ok(id) = Uuid::parse_str(&id) else {
        return Ok(not_found(signed_in));
    };

    match state.supabase.get_video(id).await {
        Ok(video) => Ok(Html(views::video_detail_page(true, signed_in, &video)).into_response()),
        Err(AppError::NotFound(_)) => Ok(not_found(signed_in)),
        Err(e) => Err(e.into()),
    }
}

fn not_found(signed_in: bool) -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(views::video_not_found_page(true, signed_in)),
    )
        .into_response()
}
