//! Axum route handlers for the Generation API.

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::job::JobPostingAnalyzer;
use crate::analysis::resume::ResumeAnalyzer;
use crate::errors::AppError;
use crate::generation::selector::RngSelector;
use crate::generation::synthesizer::{Engine, ResumeSynthesizer};
use crate::models::job::JobRequirements;
use crate::models::resume::ResumeProfile;
use crate::render::{render_all, OutputFormat};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Structured inputs win over raw text; raw text is analyzed on the fly.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    #[serde(default)]
    pub resume_profile: Option<ResumeProfile>,
    #[serde(default)]
    pub resume_text: Option<String>,
    #[serde(default)]
    pub job_requirements: Option<JobRequirements>,
    #[serde(default)]
    pub job_description: Option<String>,
    /// Defaults to every supported format.
    #[serde(default)]
    pub formats: Option<Vec<OutputFormat>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResponse {
    pub optimized_resume: String,
    pub engine: Engine,
    pub downloads: BTreeMap<String, String>,
    pub render_errors: BTreeMap<String, String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/optimize
///
/// Full pipeline: analyze whatever arrived as raw text → synthesize → render.
pub async fn handle_optimize(
    State(state): State<AppState>,
    Json(request): Json<OptimizeRequest>,
) -> Result<Json<OptimizeResponse>, AppError> {
    let llm_timeout = state.config.llm_timeout();

    let profile = match (request.resume_profile, non_blank(request.resume_text)) {
        (Some(profile), _) => Some(profile),
        (None, Some(text)) => Some(
            ResumeAnalyzer::new(state.llm.clone(), llm_timeout)
                .analyze(&text)
                .await,
        ),
        (None, None) => None,
    };

    let job = match (request.job_requirements, non_blank(request.job_description)) {
        (Some(job), _) => Some(job),
        (None, Some(text)) => Some(
            JobPostingAnalyzer::new(state.llm.clone(), llm_timeout)
                .analyze(&text)
                .await,
        ),
        (None, None) => None,
    };

    let selector = RngSelector::for_request(state.config.template_seed);
    let resume = ResumeSynthesizer::new(state.llm.clone(), llm_timeout, Box::new(selector))
        .synthesize(profile.as_ref(), job.as_ref())
        .await?;

    let formats = match request.formats {
        Some(formats) if !formats.is_empty() => formats,
        _ => OutputFormat::ALL.to_vec(),
    };
    let rendered = render_all(&resume.text, &formats);

    info!(
        "Optimized resume via {:?}: {} downloads, {} render errors",
        resume.engine,
        rendered.downloads.len(),
        rendered.errors.len()
    );

    Ok(Json(OptimizeResponse {
        optimized_resume: resume.text,
        engine: resume.engine,
        downloads: rendered.downloads,
        render_errors: rendered.errors,
    }))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
