//! Resume analysis: derives a `ResumeProfile` from extracted resume text.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::analysis::keywords::{self, SOFT_SKILLS, TECHNICAL_SKILLS};
use crate::analysis::prompts::{RESUME_ANALYSIS_PROMPT_TEMPLATE, RESUME_ANALYSIS_SYSTEM};
use crate::llm_client::{generate_within, parse_json_reply, LlmError, SharedModel};
use crate::models::resume::{PersonalInfo, ResumeProfile};

pub const DEFAULT_SUMMARY: &str =
    "Experienced professional with a proven record of delivering quality results.";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w.-]+@[\w.-]+\.\w+").expect("email pattern is valid"));

// Newlines are excluded so that stacked year columns are not mistaken for a number.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\d \t()+\-]{10,}").expect("phone pattern is valid"));

static LINKEDIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:www\.)?linkedin\.com/in/[A-Za-z0-9_\-]+")
        .expect("linkedin pattern is valid")
});

/// A phone candidate needs at least this many digits; "2019 - 2021" does not qualify.
const MIN_PHONE_DIGITS: usize = 10;

/// Derives structured candidate data from resume text.
pub struct ResumeAnalyzer {
    llm: Option<SharedModel>,
    llm_timeout: Duration,
}

impl ResumeAnalyzer {
    pub fn new(llm: Option<SharedModel>, llm_timeout: Duration) -> Self {
        Self { llm, llm_timeout }
    }

    /// Always returns a complete profile; model failures fall back to the rules.
    pub async fn analyze(&self, resume_text: &str) -> ResumeProfile {
        if let Some(llm) = &self.llm {
            match self.analyze_with_model(llm, resume_text).await {
                Ok(profile) => {
                    info!(
                        "Resume analyzed by {}: {} experience entries",
                        llm.name(),
                        profile.experience.len()
                    );
                    return profile;
                }
                Err(e) => warn!("AI resume analysis failed, using rule-based analysis: {e}"),
            }
        }

        let profile = analyze_with_rules(resume_text);
        debug!(
            "Rule-based resume analysis: name={:?}, email found={}",
            profile.personal_info.name,
            profile.personal_info.email.is_some()
        );
        profile
    }

    async fn analyze_with_model(
        &self,
        llm: &SharedModel,
        resume_text: &str,
    ) -> Result<ResumeProfile, LlmError> {
        let prompt = RESUME_ANALYSIS_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
        let reply =
            generate_within(llm.as_ref(), &prompt, RESUME_ANALYSIS_SYSTEM, self.llm_timeout)
                .await?;
        let mut profile: ResumeProfile = parse_json_reply(&reply)?;
        backfill_contact(&mut profile.personal_info, resume_text);
        if profile.summary.trim().is_empty() {
            profile.summary = DEFAULT_SUMMARY.to_string();
        }
        Ok(profile)
    }
}

/// Deterministic heuristics: line one is the name, first email/phone-shaped substrings.
pub fn analyze_with_rules(resume_text: &str) -> ResumeProfile {
    ResumeProfile {
        personal_info: PersonalInfo {
            name: extract_name(resume_text),
            email: extract_email(resume_text),
            phone: extract_phone(resume_text),
            location: None,
            linkedin: extract_linkedin(resume_text),
            website: None,
        },
        summary: DEFAULT_SUMMARY.to_string(),
        technical_skills: keywords::extract(resume_text, TECHNICAL_SKILLS),
        soft_skills: keywords::extract(resume_text, SOFT_SKILLS),
        ..ResumeProfile::default()
    }
}

pub fn extract_name(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(String::from)
}

pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

pub fn extract_phone(text: &str) -> Option<String> {
    PHONE_RE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .find(|candidate| candidate.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS)
        .map(String::from)
}

pub fn extract_linkedin(text: &str) -> Option<String> {
    LINKEDIN_RE.find(text).map(|m| m.as_str().to_string())
}

/// Fills contact fields the model left empty with the rule-based values.
fn backfill_contact(info: &mut PersonalInfo, resume_text: &str) {
    let blank = |v: &Option<String>| v.as_deref().map_or(true, |s| s.trim().is_empty());
    if blank(&info.name) {
        info.name = extract_name(resume_text);
    }
    if blank(&info.email) {
        info.email = extract_email(resume_text);
    }
    if blank(&info.phone) {
        info.phone = extract_phone(resume_text);
    }
    if blank(&info.linkedin) {
        info.linkedin = extract_linkedin(resume_text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::StubModel;

    const SAMPLE_RESUME: &str = "\n\
        John Doe\n\
        Software Engineer\n\
        Email: john.doe@email.com | Phone: (555) 123-4567\n\
        linkedin.com/in/johndoe\n\
        \n\
        SUMMARY\n\
        Experienced software engineer with 4 years of experience in full-stack development.\n\
        \n\
        EXPERIENCE\n\
        Senior Software Engineer | Tech Company | 2022-Present\n\
        - Developed web applications using React and Node.js\n\
        - Collaborated with cross-functional teams\n\
        \n\
        SKILLS\n\
        JavaScript, Python, React, Node.js, AWS, Docker";

    #[test]
    fn test_rules_contact_fields() {
        let profile = analyze_with_rules(SAMPLE_RESUME);
        let info = &profile.personal_info;
        assert_eq!(info.name.as_deref(), Some("John Doe"));
        assert_eq!(info.email.as_deref(), Some("john.doe@email.com"));
        assert_eq!(info.phone.as_deref(), Some("(555) 123-4567"));
        assert_eq!(info.linkedin.as_deref(), Some("linkedin.com/in/johndoe"));
        assert!(info.location.is_none());
    }

    #[test]
    fn test_rules_profile_is_complete() {
        let profile = analyze_with_rules(SAMPLE_RESUME);
        assert_eq!(profile.summary, DEFAULT_SUMMARY);
        assert!(profile.experience.is_empty());
        assert!(profile.education.is_empty());
        assert!(profile.projects.is_empty());
        assert!(profile.technical_skills.contains(&"react".to_string()));
        assert!(profile.soft_skills.is_empty());
    }

    #[test]
    fn test_rules_on_empty_text() {
        let profile = analyze_with_rules("");
        assert_eq!(profile.personal_info, PersonalInfo::default());
        assert_eq!(profile.summary, DEFAULT_SUMMARY);
    }

    #[test]
    fn test_phone_ignores_year_ranges() {
        assert_eq!(extract_phone("2019 - 2021\nno phone here"), None);
        assert_eq!(
            extract_phone("Call +1 415 555 0100 anytime").as_deref(),
            Some("+1 415 555 0100")
        );
    }

    #[tokio::test]
    async fn test_model_reply_backfilled_from_rules() {
        let reply = r#"{"personalInfo": {"name": "John Doe", "email": null},
            "experience": [{"title": "Senior Software Engineer", "company": "Tech Company",
                            "duration": "2022 - Present", "achievements": ["Shipped"]}]}"#;
        let analyzer = ResumeAnalyzer::new(
            Some(StubModel::Reply(reply.to_string()).shared()),
            Duration::from_secs(5),
        );
        let profile = analyzer.analyze(SAMPLE_RESUME).await;
        assert_eq!(profile.experience.len(), 1);
        assert_eq!(profile.experience[0].company, "Tech Company");
        assert_eq!(
            profile.personal_info.email.as_deref(),
            Some("john.doe@email.com")
        );
        assert_eq!(profile.summary, DEFAULT_SUMMARY);
    }

    #[tokio::test]
    async fn test_model_failure_falls_back() {
        let analyzer = ResumeAnalyzer::new(Some(StubModel::Fail.shared()), Duration::from_secs(5));
        let profile = analyzer.analyze(SAMPLE_RESUME).await;
        assert_eq!(profile, analyze_with_rules(SAMPLE_RESUME));
    }

    #[tokio::test]
    async fn test_malformed_reply_falls_back() {
        let analyzer = ResumeAnalyzer::new(
            Some(StubModel::Reply(r#"{"experience": "not a list"}"#.to_string()).shared()),
            Duration::from_secs(5),
        );
        let profile = analyzer.analyze(SAMPLE_RESUME).await;
        assert_eq!(profile.personal_info.name.as_deref(), Some("John Doe"));
        assert!(profile.experience.is_empty());
    }
}
