//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::analysis::job::{extract_key_requirements, JobPostingAnalyzer};
use crate::analysis::resume::ResumeAnalyzer;
use crate::errors::AppError;
use crate::models::job::JobRequirements;
use crate::models::resume::ResumeProfile;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeJobRequest {
    #[serde(default)]
    pub job_text: Option<String>,
    #[serde(default)]
    pub job_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeJobResponse {
    pub job_description: String,
    pub analysis: JobRequirements,
    pub key_requirements: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResumeRequest {
    #[serde(default)]
    pub resume_text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/analyze
///
/// Accepts pasted text, a URL, or both. The URL is tried first; pasted text covers a
/// failed fetch.
pub async fn handle_analyze_job(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeJobRequest>,
) -> Result<Json<AnalyzeJobResponse>, AppError> {
    let job_text = non_blank(request.job_text);
    let job_url = non_blank(request.job_url);

    let job_description = match (job_url, job_text) {
        (Some(url), text) => match state.fetcher.fetch_job_text(&url).await {
            Ok(fetched) => fetched,
            Err(e) => match text {
                Some(text) => {
                    warn!("Job URL fetch failed, using pasted text instead: {e}");
                    text
                }
                None => {
                    return Err(AppError::Extraction(format!(
                        "{e}. Please copy the job description text and paste it instead."
                    )))
                }
            },
        },
        (None, Some(text)) => text,
        (None, None) => {
            return Err(AppError::Validation(
                "Provide either jobText or jobUrl".to_string(),
            ))
        }
    };

    let analysis = JobPostingAnalyzer::new(state.llm.clone(), state.config.llm_timeout())
        .analyze(&job_description)
        .await;
    let key_requirements = extract_key_requirements(&job_description);

    Ok(Json(AnalyzeJobResponse {
        job_description,
        analysis,
        key_requirements,
    }))
}

/// POST /api/v1/resumes/analyze
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeResumeRequest>,
) -> Result<Json<ResumeProfile>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resumeText cannot be empty".to_string(),
        ));
    }

    let profile = ResumeAnalyzer::new(state.llm.clone(), state.config.llm_timeout())
        .analyze(&request.resume_text)
        .await;

    Ok(Json(profile))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
