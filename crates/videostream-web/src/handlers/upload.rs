use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    response::{Html, IntoResponse, Response},
    Extension, Json,
};
use bytes::Bytes;
use videostream_core::AppError;

use crate::middleware::CurrentSession;
use crate::pipeline::UploadInput;
use crate::state::AppState;
use crate::views;

pub async fn upload_form() -> Html<String> {
    Html(views::upload_page(None))
}

/// Current phase of the in-flight (or last) upload job, polled by the page
/// to drive the progress bar.
pub async fn upload_status(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::to_value(state.uploads.phase()).unwrap_or_default())
}

/// Extract the upload form fields. Only one field named "file" is accepted;
/// extra file parts are counted so validation can reject them.
async fn extract_upload_input(mut multipart: Multipart) -> Result<UploadInput, AppError> {
    let mut title = String::new();
    let mut description = String::new();
    let mut file: Option<(String, String, Bytes)> = None;
    let mut file_count = 0usize;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => {
                title = field
                    .text()
                    .await
                    .map_err(|e| AppError::InvalidInput(format!("Failed to read title: {}", e)))?;
            }
            "description" => {
                description = field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read description: {}", e))
                })?;
            }
            "file" => {
                file_count += 1;
                let file_name = field.file_name().unwrap_or("unknown").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read file data: {}", e))
                })?;
                file = Some((file_name, content_type, data));
            }
            _ => {}
        }
    }

    let (file_name, content_type, data) = file.unwrap_or_default();

    Ok(UploadInput {
        file_name,
        content_type,
        data,
        title,
        description,
        file_count,
    })
}

#[tracing::instrument(skip(state, session, multipart), fields(operation = "upload_video"))]
pub async fn upload_submit(
    State(state): State<Arc<AppState>>,
    session: Option<Extension<CurrentSession>>,
    multipart: Multipart,
) -> Response {
    let input = match extract_upload_input(multipart).await {
        Ok(input) => input,
        Err(e) => return Html(views::upload_page(Some(&e.client_message()))).into_response(),
    };

    let access_token = session
        .as_ref()
        .map(|Extension(CurrentSession(s))| s.access_token.clone());

    match state
        .uploads
        .submit(&state.supabase, access_token.as_deref(), input)
        .await
    {
        Ok(url) => Html(views::upload_success_page(&url)).into_response(),
        Err(e) => Html(views::upload_page(Some(&e.client_message()))).into_response(),
    }
}
