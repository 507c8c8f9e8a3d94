//! Upload input validation.
//!
//! These checks run before any network call: a submission that fails here
//! must never reach the storage or record services.

use crate::error::AppError;

/// Validate that a declared MIME type indicates a video.
pub fn validate_video_content_type(content_type: &str) -> Result<(), AppError> {
    if !content_type.starts_with("video/") {
        return Err(AppError::InvalidInput(
            "Please upload a video file".to_string(),
        ));
    }
    Ok(())
}

/// Validate the title field; returns the trimmed title.
pub fn validate_title(title: &str) -> Result<String, AppError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput(
            "Please enter a video title".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Validate that exactly one file was provided.
pub fn validate_file_count(count: usize) -> Result<(), AppError> {
    match count {
        1 => Ok(()),
        0 => Err(AppError::InvalidInput("No file provided".to_string())),
        _ => Err(AppError::InvalidInput(
            "Only one file may be uploaded per submission".to_string(),
        )),
    }
}
