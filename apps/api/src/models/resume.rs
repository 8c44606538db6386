use serde::{Deserialize, Serialize};

/// Contact block at the top of a resume. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub year: String,
    pub gpa: Option<String>,
}

/// Structured candidate background extracted from resume text.
///
/// `#[serde(default)]` on the struct means a sparse model reply still yields a
/// complete profile; nothing downstream sees a partially-populated object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeProfile {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub certifications: Vec<String>,
    pub projects: Vec<String>,
    pub languages: Vec<String>,
    pub awards: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_profile_deserializes_completely() {
        let json = r#"{
            "personalInfo": {"name": "Jane Doe", "email": "jane@example.com"},
            "experience": [{"title": "Engineer", "company": "Acme"}]
        }"#;
        let profile: ResumeProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.personal_info.name.as_deref(), Some("Jane Doe"));
        assert!(profile.personal_info.phone.is_none());
        assert_eq!(profile.experience[0].company, "Acme");
        assert!(profile.experience[0].achievements.is_empty());
        assert!(profile.education.is_empty());
        assert!(profile.awards.is_empty());
        assert_eq!(profile.summary, "");
    }

    #[test]
    fn test_null_gpa_accepted() {
        let json = r#"{"degree": "BSc", "institution": "MIT", "year": "2019", "gpa": null}"#;
        let entry: EducationEntry = serde_json::from_str(json).unwrap();
        assert!(entry.gpa.is_none());
    }
}
