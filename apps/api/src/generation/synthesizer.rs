//! Resume Synthesis — turns a resume profile and job requirements into tailored resume text.
//!
//! Flow: validate input → model rewrite (when configured) → template fill on any failure.
//!
//! The template path fabricates experience entries, company names and achievement
//! metrics from fixed tables. Its output is a starting draft, not a factual record.

use std::time::Duration;

use chrono::Datelike;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::prompts::{
    NO_PROFILE_PLACEHOLDER, SYNTHESIS_PROMPT_TEMPLATE, SYNTHESIS_SYSTEM,
};
use crate::generation::selector::{choose, TemplateSelector};
use crate::generation::templates::{
    companies_for, display_name, TitleTier, ADDITIONAL_SKILLS_LABEL, COLLABORATION_ACHIEVEMENT,
    DATABASE_ACHIEVEMENT, LEADERSHIP_ACHIEVEMENTS, MAX_ACHIEVEMENTS_PER_ENTRY,
    PLACEHOLDER_CERTIFICATIONS, PLACEHOLDER_CONTACT, PLACEHOLDER_EDUCATION, PLACEHOLDER_NAME,
    SKILL_CATEGORIES, STACK_ACHIEVEMENTS, TOOLS_LINE,
};
use crate::llm_client::prompts::PLAIN_TEXT_INSTRUCTION;
use crate::llm_client::{generate_within, LlmError, SharedModel};
use crate::models::job::{Industry, JobRequirements};
use crate::models::resume::{ExperienceEntry, ResumeProfile};

/// Length of each generated tenure, counting back from "Present".
const TENURE_YEARS: i32 = 2;

const SENIORITY_WORDS: &[&str] = &[
    "senior",
    "sr.",
    "sr",
    "lead",
    "principal",
    "staff",
    "junior",
    "jr.",
    "jr",
    "mid-level",
    "associate",
];

pub const SECTION_SUMMARY: &str = "PROFESSIONAL SUMMARY";
pub const SECTION_SKILLS: &str = "TECHNICAL SKILLS";
pub const SECTION_EXPERIENCE: &str = "PROFESSIONAL EXPERIENCE";
pub const SECTION_EDUCATION: &str = "EDUCATION";
pub const SECTION_CERTIFICATIONS: &str = "CERTIFICATIONS";
pub const SECTION_PROJECTS: &str = "PROJECTS";

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Which path produced the resume text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    Ai,
    Template,
}

/// Final resume text. No typed structure survives past this point.
#[derive(Debug, Clone)]
pub struct SynthesizedResume {
    pub text: String,
    pub engine: Engine,
}

// ────────────────────────────────────────────────────────────────────────────
// Synthesizer
// ────────────────────────────────────────────────────────────────────────────

/// Built per request: it owns the template selector for that request.
pub struct ResumeSynthesizer {
    llm: Option<SharedModel>,
    llm_timeout: Duration,
    selector: Box<dyn TemplateSelector>,
    reference_year: i32,
}

impl ResumeSynthesizer {
    pub fn new(
        llm: Option<SharedModel>,
        llm_timeout: Duration,
        selector: Box<dyn TemplateSelector>,
    ) -> Self {
        Self {
            llm,
            llm_timeout,
            selector,
            reference_year: chrono::Utc::now().year(),
        }
    }

    /// Anchors generated tenure dates; defaults to the current UTC year.
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = year;
        self
    }

    /// Produces the tailored resume.
    ///
    /// Fails only when neither a profile nor requirements are supplied. A missing
    /// requirements object is replaced by the defaults; a missing profile yields a
    /// placeholder header.
    pub async fn synthesize(
        &mut self,
        resume: Option<&ResumeProfile>,
        job: Option<&JobRequirements>,
    ) -> Result<SynthesizedResume, AppError> {
        if resume.is_none() && job.is_none() {
            return Err(AppError::Validation(
                "Provide a resume profile or job requirements to optimize against".to_string(),
            ));
        }

        let default_job;
        let job = match job {
            Some(job) => job,
            None => {
                default_job = JobRequirements::default();
                &default_job
            }
        };

        if let Some(llm) = self.llm.clone() {
            match synthesize_with_model(&llm, resume, job, self.llm_timeout).await {
                Ok(text) => {
                    info!("Resume synthesized by {} ({} chars)", llm.name(), text.len());
                    return Ok(SynthesizedResume {
                        text,
                        engine: Engine::Ai,
                    });
                }
                Err(e) => warn!("AI synthesis failed, using template synthesis: {e}"),
            }
        }

        let entries = plan_experience(job, self.selector.as_mut(), self.reference_year);
        let text = render_template(resume, job, &entries);
        info!(
            "Resume synthesized from template: {} experience entries for {:?}",
            entries.len(),
            job.job_title
        );

        Ok(SynthesizedResume {
            text,
            engine: Engine::Template,
        })
    }
}

async fn synthesize_with_model(
    llm: &SharedModel,
    resume: Option<&ResumeProfile>,
    job: &JobRequirements,
    llm_timeout: Duration,
) -> Result<String, LlmError> {
    let resume_json = match resume {
        Some(profile) => serde_json::to_string_pretty(profile)?,
        None => NO_PROFILE_PLACEHOLDER.to_string(),
    };
    let job_json = serde_json::to_string_pretty(job)?;

    let prompt = SYNTHESIS_PROMPT_TEMPLATE
        .replace("{resume_json}", &resume_json)
        .replace("{job_json}", &job_json)
        .replace("{plain_text_instruction}", PLAIN_TEXT_INSTRUCTION);

    let reply = generate_within(llm.as_ref(), &prompt, SYNTHESIS_SYSTEM, llm_timeout).await?;
    if reply.trim().is_empty() {
        return Err(LlmError::EmptyContent);
    }
    Ok(reply)
}

// ────────────────────────────────────────────────────────────────────────────
// Template path: experience planning
// ────────────────────────────────────────────────────────────────────────────

/// One current entry always; a previous entry from 3 required years; an early one from 5.
pub fn plan_experience(
    job: &JobRequirements,
    selector: &mut dyn TemplateSelector,
    reference_year: i32,
) -> Vec<ExperienceEntry> {
    let mut tiers = vec![TitleTier::Senior];
    if job.years_required >= 3 {
        tiers.push(TitleTier::Mid);
    }
    if job.years_required >= 5 {
        tiers.push(TitleTier::Junior);
    }

    tiers
        .into_iter()
        .enumerate()
        .map(|(block, tier)| ExperienceEntry {
            title: generate_title(&job.job_title, tier, selector),
            company: generate_company(job.industry, selector),
            duration: tenure(block, reference_year),
            description: String::new(),
            achievements: generate_achievements(&job.technical_skills, tier),
        })
        .collect()
}

/// Prefixes the role with a tier qualifier. Seniority already in the posting title is
/// dropped first so that "Senior Web Developer" never becomes "Lead Senior Web Developer".
pub fn generate_title(base_title: &str, tier: TitleTier, selector: &mut dyn TemplateSelector) -> String {
    let role = strip_seniority(base_title);
    let prefix = choose(selector, tier.prefixes());
    if prefix.is_empty() {
        role
    } else {
        format!("{prefix} {role}")
    }
}

pub fn generate_company(industry: Industry, selector: &mut dyn TemplateSelector) -> String {
    choose(selector, companies_for(industry)).to_string()
}

/// Skill-gated sentences first, then leadership (senior only), collaboration and
/// database work; the first four are kept.
pub fn generate_achievements(skills: &[String], tier: TitleTier) -> Vec<String> {
    let has_any = |wanted: &[&str]| wanted.iter().any(|w| skills.iter().any(|s| s == w));

    let mut achievements: Vec<String> = STACK_ACHIEVEMENTS
        .iter()
        .filter(|a| has_any(a.any_of))
        .map(|a| a.text.to_string())
        .collect();

    if tier == TitleTier::Senior {
        achievements.extend(LEADERSHIP_ACHIEVEMENTS.iter().map(|s| s.to_string()));
    }

    achievements.push(COLLABORATION_ACHIEVEMENT.to_string());

    if has_any(DATABASE_ACHIEVEMENT.any_of) {
        achievements.push(DATABASE_ACHIEVEMENT.text.to_string());
    }

    achievements.truncate(MAX_ACHIEVEMENTS_PER_ENTRY);
    achievements
}

fn tenure(block: usize, reference_year: i32) -> String {
    let block = block as i32;
    let start = reference_year - TENURE_YEARS * (block + 1);
    if block == 0 {
        format!("{start} - Present")
    } else {
        format!("{start} - {}", reference_year - TENURE_YEARS * block)
    }
}

fn strip_seniority(title: &str) -> String {
    let mut words: Vec<&str> = title.split_whitespace().collect();
    while words.len() > 1
        && words
            .first()
            .map(|w| SENIORITY_WORDS.contains(&w.to_lowercase().as_str()))
            .unwrap_or(false)
    {
        words.remove(0);
    }
    words.join(" ")
}

// ────────────────────────────────────────────────────────────────────────────
// Template path: rendering
// ────────────────────────────────────────────────────────────────────────────

pub fn render_template(
    resume: Option<&ResumeProfile>,
    job: &JobRequirements,
    entries: &[ExperienceEntry],
) -> String {
    let sections = [
        render_header(resume, job),
        render_summary(job),
        render_skills(&job.technical_skills),
        render_experience(entries),
        render_education(resume),
        render_certifications(resume),
        render_projects(&job.technical_skills),
    ];

    sections
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_header(resume: Option<&ResumeProfile>, job: &JobRequirements) -> String {
    let (name, contact) = match resume {
        Some(profile) => {
            let info = &profile.personal_info;
            let contact: Vec<String> = [&info.email, &info.phone, &info.linkedin, &info.location]
                .into_iter()
                .flatten()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .collect();
            let name = info
                .name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .unwrap_or(PLACEHOLDER_NAME)
                .to_string();
            (name, contact)
        }
        None => (
            PLACEHOLDER_NAME.to_string(),
            PLACEHOLDER_CONTACT.iter().map(|s| s.to_string()).collect(),
        ),
    };

    let mut lines = vec![name.to_uppercase(), job.job_title.clone()];
    if !contact.is_empty() {
        lines.push(contact.join(" | "));
    }
    lines.join("\n")
}

fn render_summary(job: &JobRequirements) -> String {
    let top_skills = if job.technical_skills.is_empty() {
        "modern software technologies".to_string()
    } else {
        job.technical_skills
            .iter()
            .take(4)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "{SECTION_SUMMARY}\n\n\
        Experienced {} with {}+ years of expertise in full-stack development and modern web \
        technologies. Proven track record of delivering scalable solutions using {}. Strong \
        background in the {} industry with focus on performance optimization, user experience, \
        and collaborative development practices.",
        job.job_title.to_lowercase(),
        job.years_required,
        top_skills,
        job.industry.as_str()
    )
}

/// Every matched skill lands in exactly one uppercased line: its category, or
/// "Additional Technologies" when no category claims it.
fn render_skills(skills: &[String]) -> String {
    let mut lines = vec![SECTION_SKILLS.to_string(), String::new()];

    for (label, members) in SKILL_CATEGORIES {
        let matched: Vec<&str> = skills
            .iter()
            .map(String::as_str)
            .filter(|s| members.contains(s))
            .collect();
        if !matched.is_empty() {
            lines.push(format!("{label}: {}", matched.join(", ").to_uppercase()));
        }
    }

    let additional: Vec<&str> = skills
        .iter()
        .map(String::as_str)
        .filter(|s| !SKILL_CATEGORIES.iter().any(|(_, members)| members.contains(s)))
        .collect();
    if !additional.is_empty() {
        lines.push(format!(
            "{ADDITIONAL_SKILLS_LABEL}: {}",
            additional.join(", ").to_uppercase()
        ));
    }

    lines.push(TOOLS_LINE.to_string());
    lines.join("\n")
}

fn render_experience(entries: &[ExperienceEntry]) -> String {
    let mut out = String::from(SECTION_EXPERIENCE);
    for entry in entries {
        out.push_str(&format!(
            "\n\n{}\n{} | {}\n",
            entry.title.to_uppercase(),
            entry.company,
            entry.duration
        ));
        for achievement in &entry.achievements {
            out.push_str(&format!("\n• {achievement}"));
        }
    }
    out
}

fn render_education(resume: Option<&ResumeProfile>) -> String {
    let own: Vec<String> = resume
        .map(|p| p.education.as_slice())
        .unwrap_or_default()
        .iter()
        .filter(|e| !e.degree.trim().is_empty())
        .map(|e| {
            let mut block = e.degree.trim().to_string();
            let origin: Vec<&str> = [e.institution.trim(), e.year.trim()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect();
            if !origin.is_empty() {
                block.push('\n');
                block.push_str(&origin.join(" | "));
            }
            if let Some(gpa) = e.gpa.as_deref().filter(|g| !g.trim().is_empty()) {
                block.push_str(&format!("\nGPA: {}", gpa.trim()));
            }
            block
        })
        .collect();

    let body = if own.is_empty() {
        PLACEHOLDER_EDUCATION.to_string()
    } else {
        own.join("\n\n")
    };
    format!("{SECTION_EDUCATION}\n\n{body}")
}

fn render_certifications(resume: Option<&ResumeProfile>) -> String {
    let own: Vec<&str> = resume
        .map(|p| p.certifications.as_slice())
        .unwrap_or_default()
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect();
    let items: Vec<&str> = if own.is_empty() {
        PLACEHOLDER_CERTIFICATIONS.to_vec()
    } else {
        own
    };

    let bullets: Vec<String> = items.iter().map(|c| format!("• {c}")).collect();
    format!("{SECTION_CERTIFICATIONS}\n\n{}", bullets.join("\n"))
}

/// Omitted entirely when the posting matched no technical skills.
fn render_projects(skills: &[String]) -> String {
    let Some(top) = skills.first() else {
        return String::new();
    };
    let top = display_name(top);

    format!(
        "{SECTION_PROJECTS}\n\n\
        E-Commerce Platform Redesign\n\
        • Led a frontend redesign using {top} and modern UI/UX principles\n\
        • Implemented responsive design resulting in 45% increase in mobile conversions\n\
        • Integrated payment processing and inventory management systems\n\n\
        Real-Time Analytics Dashboard\n\
        • Built a real-time data visualization dashboard using {top}\n\
        • Processed and displayed live data from multiple APIs with sub-second latency\n\
        • Implemented user authentication and role-based access control"
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
