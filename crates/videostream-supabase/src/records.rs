//! Record store operations (PostgREST, table `videos`).

use uuid::Uuid;
use videostream_core::{AppError, NewVideoRecord, VideoRecord};

use crate::client::SupabaseClient;

const VIDEOS_TABLE: &str = "videos";

fn store_error_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|v| v.as_str()) {
            return message.to_string();
        }
    }
    format!("Record store request failed with status {}", status)
}

impl SupabaseClient {
    /// Insert one video row and return it as stored.
    pub async fn insert_video(
        &self,
        record: &NewVideoRecord,
        access_token: Option<&str>,
    ) -> Result<VideoRecord, AppError> {
        let inner = self.inner()?;
        let url = inner.build_url(&format!("/rest/v1/{}", VIDEOS_TABLE));
        let request = inner
            .apply_auth(inner.http.post(&url), access_token)
            .header("Prefer", "return=representation")
            .json(&[record]);

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Store(store_error_message(status, &body)));
        }

        let mut rows: Vec<VideoRecord> = response
            .json()
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;
        rows.pop()
            .ok_or_else(|| AppError::Store("Insert returned no rows".to_string()))
    }

    /// All video rows, newest first.
    pub async fn list_videos(&self) -> Result<Vec<VideoRecord>, AppError> {
        let inner = self.inner()?;
        let url = inner.build_url(&format!(
            "/rest/v1/{}?select=*&order=created_at.desc",
            VIDEOS_TABLE
        ));
        let request = inner.apply_auth(inner.http.get(&url), None);

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Store(store_error_message(status, &body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Store(e.to_string()))
    }

    /// One video row by id. An empty result set is `NotFound`.
    pub async fn get_video(&self, id: Uuid) -> Result<VideoRecord, AppError> {
        let inner = self.inner()?;
        let url = inner.build_url(&format!(
            "/rest/v1/{}?select=*&id=eq.{}",
            VIDEOS_TABLE, id
        ));
        let request = inner.apply_auth(inner.http.get(&url), None);

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Store(store_error_message(status, &body)));
        }

        let mut rows: Vec<VideoRecord> = response
            .json()
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;
        rows.pop()
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))
    }
}
