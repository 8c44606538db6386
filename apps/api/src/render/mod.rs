//! Document rendering: resume text → downloadable files.
//!
//! Each requested format renders independently. A failure in one format is reported
//! alongside the formats that succeeded.

pub mod docx;
pub mod html;

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::generation::synthesizer::{
    SECTION_CERTIFICATIONS, SECTION_EDUCATION, SECTION_EXPERIENCE, SECTION_PROJECTS,
    SECTION_SKILLS, SECTION_SUMMARY,
};

pub const KNOWN_SECTIONS: &[&str] = &[
    SECTION_SUMMARY,
    SECTION_SKILLS,
    SECTION_EXPERIENCE,
    SECTION_EDUCATION,
    SECTION_CERTIFICATIONS,
    SECTION_PROJECTS,
];

pub const BULLET: &str = "• ";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Nothing to render: resume text is empty")]
    EmptyDocument,

    #[error("I/O error while rendering: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not build DOCX package: {0}")]
    Zip(#[from] zip::result::ZipError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Docx,
    Html,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Text, OutputFormat::Docx, OutputFormat::Html];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Docx => "docx",
            OutputFormat::Html => "html",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text/plain;charset=utf-8",
            OutputFormat::Docx => crate::ingest::documents::DOCX_MIME,
            OutputFormat::Html => "text/html;charset=utf-8",
        }
    }
}

/// Per-format outcome, keyed by format name.
#[derive(Debug, Default, Serialize)]
pub struct RenderedDocuments {
    /// `data:` URLs with base64 payloads.
    pub downloads: BTreeMap<String, String>,
    pub errors: BTreeMap<String, String>,
}

pub fn render(text: &str, format: OutputFormat) -> Result<Vec<u8>, RenderError> {
    if text.trim().is_empty() {
        return Err(RenderError::EmptyDocument);
    }
    match format {
        OutputFormat::Text => Ok(text.as_bytes().to_vec()),
        OutputFormat::Docx => docx::render(text),
        OutputFormat::Html => Ok(html::render(text).into_bytes()),
    }
}

/// Renders every requested format; duplicates are rendered once.
pub fn render_all(text: &str, formats: &[OutputFormat]) -> RenderedDocuments {
    let mut out = RenderedDocuments::default();
    for format in formats {
        let key = format.as_str().to_string();
        if out.downloads.contains_key(&key) || out.errors.contains_key(&key) {
            continue;
        }
        match render(text, *format) {
            Ok(bytes) => {
                debug!("Rendered {} ({} bytes)", key, bytes.len());
                out.downloads.insert(key, data_url(*format, &bytes));
            }
            Err(e) => {
                warn!("Rendering {key} failed: {e}");
                out.errors.insert(key, e.to_string());
            }
        }
    }
    out
}

pub fn data_url(format: OutputFormat, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", format.mime_type(), STANDARD.encode(bytes))
}

/// A line naming one of the resume's standard sections, in any letter case. Trailing
/// punctuation and joined names ("EDUCATION & TRAINING", "PROJECTS / OPEN SOURCE") count;
/// prose that merely starts with a section word does not.
pub fn is_section_heading(line: &str) -> bool {
    let upper = line.trim().to_uppercase();
    KNOWN_SECTIONS.iter().any(|s| {
        upper.strip_prefix(s).is_some_and(|rest| {
            let rest = rest.trim_start().trim_start_matches(':').trim();
            rest.is_empty() || rest.starts_with(['&', '/', '|'])
        })
    })
}

/// Section names plus any other all-caps line (names, role titles).
pub fn is_heading(line: &str) -> bool {
    let line = line.trim();
    if is_section_heading(line) {
        return true;
    }
    !line.starts_with(BULLET.trim_end())
        && line.chars().any(char::is_alphabetic)
        && line == line.to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "JANE DOE\nBackend Engineer\njane@example.com\n\n\
        PROFESSIONAL SUMMARY\n\nBuilds reliable services.\n\n\
        PROFESSIONAL EXPERIENCE\n\nSENIOR BACKEND ENGINEER\nFinanceFlow Inc | 2024 - Present\n\n\
        • Shipped payments <fast> & safe";

    #[test]
    fn test_heading_detection() {
        assert!(is_heading("PROFESSIONAL SUMMARY"));
        assert!(is_heading("Technical Skills"));
        assert!(is_heading("SENIOR BACKEND ENGINEER"));
        assert!(!is_heading("Backend Engineer"));
        assert!(!is_heading("• AWS"));
        assert!(!is_heading("• Continuing education in ML"));
        assert!(!is_heading("2024 - 2026"));
        assert!(is_section_heading("Education:"));
        assert!(is_section_heading("PROJECTS & ACHIEVEMENTS"));
        assert!(!is_section_heading("Projects at Acme shipped weekly"));
        assert!(!is_section_heading("Education outreach lead"));
        assert!(!is_heading(""));
    }

    #[test]
    fn test_text_data_url() {
        let docs = render_all("Hi", &[OutputFormat::Text]);
        assert_eq!(
            docs.downloads["text"],
            "data:text/plain;charset=utf-8;base64,SGk="
        );
        assert!(docs.errors.is_empty());
    }

    #[test]
    fn test_all_formats_render() {
        let docs = render_all(RESUME, &OutputFormat::ALL);
        assert_eq!(docs.downloads.len(), 3);
        assert!(docs.downloads["docx"].starts_with(&format!(
            "data:{};base64,",
            crate::ingest::documents::DOCX_MIME
        )));
        assert!(docs.downloads["html"].starts_with("data:text/html"));
    }

    #[test]
    fn test_duplicate_formats_rendered_once() {
        let docs = render_all(RESUME, &[OutputFormat::Html, OutputFormat::Html]);
        assert_eq!(docs.downloads.len(), 1);
    }

    #[test]
    fn test_empty_text_reports_per_format_errors() {
        let docs = render_all("  ", &[OutputFormat::Text, OutputFormat::Docx]);
        assert!(docs.downloads.is_empty());
        assert_eq!(docs.errors.len(), 2);
        assert!(docs.errors["docx"].contains("empty"));
    }

    #[test]
    fn test_format_names_deserialize_lowercase() {
        let formats: Vec<OutputFormat> = serde_json::from_str(r#"["text","docx","html"]"#).unwrap();
        assert_eq!(formats, OutputFormat::ALL.to_vec());
    }
}
