//! Uploaded resume files → plain text.

use std::io::{Cursor, Read};
use std::path::Path;

use bytes::Bytes;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;
use tracing::debug;

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    ParseFailure(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Pdf,
    Docx,
    PlainText,
}

impl SourceFormat {
    /// The declared MIME type wins; generic or missing types defer to the file extension.
    pub fn resolve(content_type: Option<&str>, file_name: Option<&str>) -> Result<Self, ParseError> {
        let mime = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase())
            .unwrap_or_default();

        match mime.as_str() {
            "application/pdf" => return Ok(SourceFormat::Pdf),
            DOCX_MIME => return Ok(SourceFormat::Docx),
            "text/plain" => return Ok(SourceFormat::PlainText),
            _ => {}
        }

        let extension = file_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(SourceFormat::Pdf),
            "docx" => Ok(SourceFormat::Docx),
            "txt" => Ok(SourceFormat::PlainText),
            _ => {
                let described = file_name
                    .map(String::from)
                    .or_else(|| (!mime.is_empty()).then(|| mime.clone()))
                    .unwrap_or_else(|| "unknown".to_string());
                Err(ParseError::UnsupportedFormat(described))
            }
        }
    }
}

/// Extracts the text of an uploaded document. Empty output counts as a failure.
pub async fn extract_text(data: Bytes, format: SourceFormat) -> Result<String, ParseError> {
    let text = match format {
        SourceFormat::Pdf => {
            // pdf-extract is CPU-bound and may panic on malformed input.
            tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
                .await
                .map_err(|e| ParseError::ParseFailure(format!("PDF extraction aborted: {e}")))?
                .map_err(|e| ParseError::ParseFailure(format!("Could not read PDF: {e}")))?
        }
        SourceFormat::Docx => extract_docx_text(&data)
            .map_err(|e| ParseError::ParseFailure(format!("Could not read DOCX: {e}")))?,
        SourceFormat::PlainText => String::from_utf8(data.to_vec())
            .map_err(|_| ParseError::ParseFailure("Text file is not valid UTF-8".to_string()))?,
    };

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(ParseError::ParseFailure(
            "No text could be extracted from the document".to_string(),
        ));
    }

    debug!("Extracted {} chars from {:?} upload", text.len(), format);
    Ok(text)
}

/// One line per non-empty `w:p` paragraph, taken from its `w:t` runs.
fn extract_docx_text(data: &[u8]) -> anyhow::Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")?
        .read_to_string(&mut xml)?;

    let mut reader = Reader::from_str(&xml);
    let mut current = String::new();
    let mut lines = Vec::new();
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => current.clear(),
                b"w:t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) if e.name().as_ref() == b"w:tab" => current.push('\t'),
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => {
                    if !current.trim().is_empty() {
                        lines.push(current.trim().to_string());
                    }
                    current.clear();
                }
                _ => {}
            },
            Event::Text(e) if in_text => current.push_str(&e.xml_content()?),
            Event::GeneralRef(r) if in_text => {
                if let Some(ch) = r.resolve_char_ref()? {
                    current.push(ch);
                } else if let Some(value) = resolve_predefined_entity(&r.decode()?) {
                    current.push_str(value);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn docx_with_body(body: &str) -> Bytes {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>{body}</w:body>
</w:document>"#
        );
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(
                "word/document.xml",
                zip::write::SimpleFileOptions::default(),
            )
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        Bytes::from(writer.finish().unwrap().into_inner())
    }

    #[test]
    fn test_resolve_prefers_mime_type() {
        assert_eq!(
            SourceFormat::resolve(Some("application/pdf"), Some("resume.txt")).unwrap(),
            SourceFormat::Pdf
        );
        assert_eq!(
            SourceFormat::resolve(Some("text/plain; charset=utf-8"), None).unwrap(),
            SourceFormat::PlainText
        );
        assert_eq!(
            SourceFormat::resolve(Some(DOCX_MIME), None).unwrap(),
            SourceFormat::Docx
        );
    }

    #[test]
    fn test_resolve_falls_back_to_extension() {
        assert_eq!(
            SourceFormat::resolve(Some("application/octet-stream"), Some("CV.DOCX")).unwrap(),
            SourceFormat::Docx
        );
        assert_eq!(
            SourceFormat::resolve(None, Some("resume.pdf")).unwrap(),
            SourceFormat::Pdf
        );
    }

    #[test]
    fn test_resolve_rejects_unknown_types() {
        let err = SourceFormat::resolve(Some("image/png"), Some("photo.png")).unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedFormat(ref what) if what == "photo.png"));
        assert!(SourceFormat::resolve(None, None).is_err());
    }

    #[tokio::test]
    async fn test_plain_text_is_trimmed() {
        let text = extract_text(Bytes::from_static(b"  Jane Doe\nEngineer\n\n"), SourceFormat::PlainText)
            .await
            .unwrap();
        assert_eq!(text, "Jane Doe\nEngineer");
    }

    #[tokio::test]
    async fn test_empty_text_is_parse_failure() {
        let err = extract_text(Bytes::from_static(b" \n "), SourceFormat::PlainText)
            .await
            .unwrap_err();
        assert!(matches!(err, ParseError::ParseFailure(_)));
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_parse_failure() {
        let err = extract_text(Bytes::from_static(&[0xff, 0xfe, 0x41]), SourceFormat::PlainText)
            .await
            .unwrap_err();
        assert!(matches!(err, ParseError::ParseFailure(_)));
    }

    #[tokio::test]
    async fn test_docx_paragraphs_become_lines() {
        let data = docx_with_body(
            "<w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>\
             <w:p></w:p>\
             <w:p><w:r><w:t>Research &amp; Development</w:t></w:r>\
             <w:r><w:t xml:space=\"preserve\"> Lead</w:t></w:r></w:p>",
        );
        let text = extract_text(data, SourceFormat::Docx).await.unwrap();
        assert_eq!(text, "Jane Doe\nResearch & Development Lead");
    }

    #[tokio::test]
    async fn test_corrupt_docx_is_parse_failure() {
        let err = extract_text(Bytes::from_static(b"not a zip"), SourceFormat::Docx)
            .await
            .unwrap_err();
        assert!(matches!(err, ParseError::ParseFailure(_)));
    }

    #[tokio::test]
    async fn test_corrupt_pdf_is_parse_failure() {
        let err = extract_text(Bytes::from_static(b"%PDF-1.4 truncated"), SourceFormat::Pdf)
            .await
            .unwrap_err();
        assert!(matches!(err, ParseError::ParseFailure(_)));
    }
}
