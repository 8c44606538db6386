//! Job posting analysis — derives `JobRequirements` from raw posting text.
//!
//! AI-first when a model is configured; the rule-based extractors below are the
//! unconditional fallback and are also usable on their own.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::analysis::keywords::{self, SOFT_SKILLS, TECHNICAL_SKILLS};
use crate::analysis::prompts::{JOB_ANALYSIS_PROMPT_TEMPLATE, JOB_ANALYSIS_SYSTEM};
use crate::llm_client::{generate_within, parse_json_reply, LlmError, SharedModel};
use crate::models::job::{
    ExperienceLevel, Industry, JobRequirements, DEFAULT_JOB_TITLE, DEFAULT_YEARS_REQUIRED,
};

pub const MAX_RESPONSIBILITIES: usize = 5;
pub const MAX_KEY_REQUIREMENTS: usize = 10;

/// Most specific first: seniority + specialization + role down to a bare "software engineer".
static TITLE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(?:senior|sr\.?|lead|principal|staff)\s+(?:software|full[\-\s]?stack|frontend|backend|web)\s+(?:engineer|developer)",
        r"(?i)(?:software|full[\-\s]?stack|frontend|backend|web)\s+(?:engineer|developer)",
        r"(?i)(?:frontend|backend|full[\-\s]?stack)\s+developer",
        r"(?i)web\s+developer",
        r"(?i)software\s+engineer",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("title pattern is valid"))
    .collect()
});

static YEARS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+)[+\-\s]*years?\s+(?:of\s+)?experience").expect("years pattern is valid")
});

/// Checked in order; the first industry with any keyword present wins.
const INDUSTRY_KEYWORDS: &[(Industry, &[&str])] = &[
    (
        Industry::Fintech,
        &["financial", "banking", "payment", "trading", "investment"],
    ),
    (
        Industry::Healthcare,
        &["healthcare", "medical", "hospital", "patient", "clinical"],
    ),
    (
        Industry::Ecommerce,
        &["ecommerce", "retail", "shopping", "marketplace", "commerce"],
    ),
    (
        Industry::Saas,
        &["saas", "software as a service", "b2b", "enterprise"],
    ),
    (
        Industry::Startup,
        &["startup", "early stage", "fast-paced", "dynamic"],
    ),
    (
        Industry::Enterprise,
        &["enterprise", "large scale", "fortune", "corporate"],
    ),
];

const EDUCATION_KEYWORDS: &[&str] = &[
    "bachelor",
    "master",
    "phd",
    "degree",
    "computer science",
    "engineering",
];

const RESPONSIBILITY_OPENERS: &[&str] = &["responsibilities", "you will", "duties"];
const RESPONSIBILITY_CLOSERS: &[&str] = &["requirements", "qualifications"];
const BULLET_CHARS: &[char] = &['•', '-', '*'];

const KEY_REQUIREMENT_MARKERS: &[&str] = &[
    "require",
    "must have",
    "experience",
    "skill",
    "qualification",
];

/// Derives structured requirements from job posting text.
pub struct JobPostingAnalyzer {
    llm: Option<SharedModel>,
    llm_timeout: Duration,
}

impl JobPostingAnalyzer {
    pub fn new(llm: Option<SharedModel>, llm_timeout: Duration) -> Self {
        Self { llm, llm_timeout }
    }

    /// Analyzes the posting. Never fails: any model problem falls back to the rules.
    pub async fn analyze(&self, job_text: &str) -> JobRequirements {
        if let Some(llm) = &self.llm {
            match self.analyze_with_model(llm, job_text).await {
                Ok(requirements) => {
                    info!(
                        "Job analyzed by {}: title={:?}, {} technical skills",
                        llm.name(),
                        requirements.job_title,
                        requirements.technical_skills.len()
                    );
                    return requirements;
                }
                Err(e) => warn!("AI job analysis failed, using rule-based analysis: {e}"),
            }
        }

        let requirements = analyze_with_rules(job_text);
        debug!(
            "Rule-based job analysis: title={:?}, years={}, industry={}",
            requirements.job_title,
            requirements.years_required,
            requirements.industry.as_str()
        );
        requirements
    }

    async fn analyze_with_model(
        &self,
        llm: &SharedModel,
        job_text: &str,
    ) -> Result<JobRequirements, LlmError> {
        let prompt = JOB_ANALYSIS_PROMPT_TEMPLATE.replace("{job_text}", job_text);
        let reply = generate_within(llm.as_ref(), &prompt, JOB_ANALYSIS_SYSTEM, self.llm_timeout)
            .await?;
        let parsed: JobReply = parse_json_reply(&reply)?;
        Ok(parsed.into_requirements(job_text))
    }
}

/// Deterministic analysis used when no model is configured or the model fails.
pub fn analyze_with_rules(job_text: &str) -> JobRequirements {
    let (years_required, experience_level) = extract_years_and_level(job_text);

    JobRequirements {
        job_title: extract_title(job_text),
        technical_skills: keywords::extract(job_text, TECHNICAL_SKILLS),
        soft_skills: keywords::extract(job_text, SOFT_SKILLS),
        years_required,
        experience_level,
        industry: extract_industry(job_text),
        responsibilities: extract_responsibilities(job_text),
        education_required: requires_education(job_text),
    }
}

/// Matches title patterns against the first line only; the matched text keeps its casing.
pub fn extract_title(job_text: &str) -> String {
    let first_line = job_text.lines().next().unwrap_or_default().trim();

    TITLE_PATTERNS
        .iter()
        .find_map(|pattern| pattern.find(first_line))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| DEFAULT_JOB_TITLE.to_string())
}

/// Bullet lines between a responsibilities marker and a requirements marker, at most five.
pub fn extract_responsibilities(job_text: &str) -> Vec<String> {
    let mut responsibilities = Vec::new();
    let mut in_window = false;

    for line in job_text.lines() {
        let trimmed = line.trim();
        let lower = trimmed.to_lowercase();

        if keywords::mentions_any(&lower, RESPONSIBILITY_OPENERS) {
            in_window = true;
            continue;
        }

        if in_window && trimmed.starts_with(BULLET_CHARS) {
            let mut chars = trimmed.chars();
            chars.next();
            responsibilities.push(chars.as_str().trim().to_string());
        }

        if keywords::mentions_any(&lower, RESPONSIBILITY_CLOSERS) {
            in_window = false;
        }
    }

    responsibilities.truncate(MAX_RESPONSIBILITIES);
    responsibilities
}

/// First "<N> years [of] experience" match, defaulting to three years. A range such as
/// "8-10 years" reads as its upper bound; oversized numbers saturate.
pub fn extract_years_and_level(job_text: &str) -> (u32, ExperienceLevel) {
    let lower = job_text.to_lowercase();
    let years = YEARS_RE
        .captures(&lower)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().parse::<u32>().unwrap_or(u32::MAX))
        .unwrap_or(DEFAULT_YEARS_REQUIRED);

    (years, ExperienceLevel::from_years(years))
}

pub fn extract_industry(job_text: &str) -> Industry {
    let lower = job_text.to_lowercase();
    INDUSTRY_KEYWORDS
        .iter()
        .find(|(_, words)| keywords::mentions_any(&lower, words))
        .map(|(industry, _)| *industry)
        .unwrap_or_default()
}

pub fn requires_education(job_text: &str) -> bool {
    keywords::mentions_any(&job_text.to_lowercase(), EDUCATION_KEYWORDS)
}

/// Lower-cased lines that read like requirements, for quick display next to the analysis.
pub fn extract_key_requirements(job_text: &str) -> Vec<String> {
    job_text
        .to_lowercase()
        .lines()
        .filter(|line| keywords::mentions_any(line, KEY_REQUIREMENT_MARKERS))
        .map(|line| line.trim().to_string())
        .take(MAX_KEY_REQUIREMENTS)
        .collect()
}

/// Model reply shape. Everything is optional so that a sparse reply still converts.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobReply {
    job_title: Option<String>,
    #[serde(default)]
    technical_skills: Vec<String>,
    #[serde(default)]
    soft_skills: Vec<String>,
    years_required: Option<u32>,
    experience_level: Option<ExperienceLevel>,
    industry: Option<Industry>,
    #[serde(default)]
    responsibilities: Vec<String>,
    education_required: Option<bool>,
}

impl JobReply {
    fn into_requirements(self, job_text: &str) -> JobRequirements {
        let years_required = self.years_required.unwrap_or(DEFAULT_YEARS_REQUIRED);
        let mut responsibilities = self.responsibilities;
        responsibilities.truncate(MAX_RESPONSIBILITIES);

        JobRequirements {
            job_title: self
                .job_title
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_JOB_TITLE.to_string()),
            technical_skills: normalize_skills(self.technical_skills),
            soft_skills: normalize_skills(self.soft_skills),
            years_required,
            experience_level: self
                .experience_level
                .unwrap_or_else(|| ExperienceLevel::from_years(years_required)),
            industry: self.industry.unwrap_or_default(),
            responsibilities,
            education_required: self
                .education_required
                .unwrap_or_else(|| requires_education(job_text)),
        }
    }
}

/// Lower-cases and de-duplicates while keeping first-seen order.
fn normalize_skills(skills: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(skills.len());
    for skill in skills {
        let skill = skill.trim().to_lowercase();
        if !skill.is_empty() && !out.contains(&skill) {
            out.push(skill);
        }
    }
    out
}
