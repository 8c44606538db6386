use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::analysis::resume::ResumeAnalyzer;
use crate::errors::AppError;
use crate::ingest::documents::{extract_text, SourceFormat};
use crate::models::resume::ResumeProfile;
use crate::state::AppState;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub filename: String,
    pub resume_text: String,
    pub profile: ResumeProfile,
}

/// POST /api/v1/resumes/upload
///
/// Multipart upload with a single `file` part (PDF, DOCX or plain text).
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or("resume").to_string();
        let format = SourceFormat::resolve(field.content_type(), Some(&filename))?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read uploaded file: {e}")))?;

        info!("Resume upload {filename:?}: {} bytes as {format:?}", data.len());

        let resume_text = extract_text(data, format).await?;
        let profile = ResumeAnalyzer::new(state.llm.clone(), state.config.llm_timeout())
            .analyze(&resume_text)
            .await;

        return Ok(Json(UploadResponse {
            filename,
            resume_text,
            profile,
        }));
    }

    Err(AppError::Validation(format!(
        "No file uploaded; send the resume in a multipart field named '{FILE_FIELD}'"
    )))
}
