use serde::{Deserialize, Serialize};

pub const DEFAULT_JOB_TITLE: &str = "Software Engineer";
pub const DEFAULT_YEARS_REQUIRED: u32 = 3;

/// Seniority band derived from the years of experience a posting asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    #[default]
    Mid,
    Senior,
    Lead,
}

impl ExperienceLevel {
    /// Bands are applied by sequential reassignment: start at mid, then entry (≤2),
    /// senior (≥5), lead (≥8). Later checks win, so 9 years ends up as lead.
    pub fn from_years(years: u32) -> Self {
        let mut level = ExperienceLevel::Mid;
        if years <= 2 {
            level = ExperienceLevel::Entry;
        }
        if years >= 5 {
            level = ExperienceLevel::Senior;
        }
        if years >= 8 {
            level = ExperienceLevel::Lead;
        }
        level
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Industry {
    Fintech,
    Healthcare,
    Ecommerce,
    Saas,
    Startup,
    Enterprise,
    #[default]
    Technology,
}

impl Industry {
    pub fn as_str(&self) -> &'static str {
        match self {
            Industry::Fintech => "fintech",
            Industry::Healthcare => "healthcare",
            Industry::Ecommerce => "ecommerce",
            Industry::Saas => "saas",
            Industry::Startup => "startup",
            Industry::Enterprise => "enterprise",
            Industry::Technology => "technology",
        }
    }
}

/// Structured requirements extracted from a job posting.
///
/// The sequence fields are always present on the wire (possibly empty) so that
/// downstream consumers never have to distinguish "absent" from "none found".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRequirements {
    #[serde(default = "default_job_title")]
    pub job_title: String,
    #[serde(default)]
    pub technical_skills: Vec<String>,
    #[serde(default)]
    pub soft_skills: Vec<String>,
    #[serde(default = "default_years_required")]
    pub years_required: u32,
    #[serde(default)]
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub industry: Industry,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub education_required: bool,
}

impl Default for JobRequirements {
    fn default() -> Self {
        JobRequirements {
            job_title: default_job_title(),
            technical_skills: vec![],
            soft_skills: vec![],
            years_required: DEFAULT_YEARS_REQUIRED,
            experience_level: ExperienceLevel::from_years(DEFAULT_YEARS_REQUIRED),
            industry: Industry::default(),
            responsibilities: vec![],
            education_required: false,
        }
    }
}

fn default_job_title() -> String {
    DEFAULT_JOB_TITLE.to_string()
}

fn default_years_required() -> u32 {
    DEFAULT_YEARS_REQUIRED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_bands() {
        assert_eq!(ExperienceLevel::from_years(0), ExperienceLevel::Entry);
        assert_eq!(ExperienceLevel::from_years(2), ExperienceLevel::Entry);
        assert_eq!(ExperienceLevel::from_years(3), ExperienceLevel::Mid);
        assert_eq!(ExperienceLevel::from_years(4), ExperienceLevel::Mid);
        assert_eq!(ExperienceLevel::from_years(5), ExperienceLevel::Senior);
        assert_eq!(ExperienceLevel::from_years(7), ExperienceLevel::Senior);
        assert_eq!(ExperienceLevel::from_years(8), ExperienceLevel::Lead);
        assert_eq!(ExperienceLevel::from_years(9), ExperienceLevel::Lead);
    }

    #[test]
    fn test_sparse_json_fills_every_sequence() {
        let parsed: JobRequirements =
            serde_json::from_str(r#"{"jobTitle": "Data Engineer", "industry": "fintech"}"#)
                .unwrap();
        assert_eq!(parsed.job_title, "Data Engineer");
        assert_eq!(parsed.industry, Industry::Fintech);
        assert!(parsed.technical_skills.is_empty());
        assert!(parsed.soft_skills.is_empty());
        assert!(parsed.responsibilities.is_empty());
        assert_eq!(parsed.years_required, 3);
    }

    #[test]
    fn test_serializes_camel_case_and_lowercase_enums() {
        let value = serde_json::to_value(JobRequirements::default()).unwrap();
        assert_eq!(value["jobTitle"], "Software Engineer");
        assert_eq!(value["experienceLevel"], "mid");
        assert_eq!(value["industry"], "technology");
        assert!(value["technicalSkills"].is_array());
    }
}
