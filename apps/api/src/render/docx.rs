//! Minimal WordprocessingML package: one paragraph per line.

use std::io::{Cursor, Write};

use quick_xml::escape::escape;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::{is_heading, RenderError};

// Run sizes are in half-points.
const HEADING_SIZE: u32 = 24;
const BODY_SIZE: u32 = 22;

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

pub fn render(text: &str) -> Result<Vec<u8>, RenderError> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(CONTENT_TYPES_XML.as_bytes())?;

    zip.start_file("_rels/.rels", options)?;
    zip.write_all(PACKAGE_RELS_XML.as_bytes())?;

    zip.start_file("word/document.xml", options)?;
    zip.write_all(document_xml(text).as_bytes())?;

    Ok(zip.finish()?.into_inner())
}

fn document_xml(text: &str) -> String {
    let body: String = text.lines().map(paragraph).collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}<w:sectPr><w:pgSz w:w="12240" w:h="15840"/><w:pgMar w:top="1080" w:right="1080" w:bottom="1080" w:left="1080"/></w:sectPr></w:body></w:document>"#
    )
}

fn paragraph(line: &str) -> String {
    let line = line.trim_end();
    if line.trim().is_empty() {
        return "<w:p/>".to_string();
    }

    let (bold, size) = if is_heading(line) {
        ("<w:b/>", HEADING_SIZE)
    } else {
        ("", BODY_SIZE)
    };
    format!(
        r#"<w:p><w:r><w:rPr>{bold}<w:sz w:val="{size}"/></w:rPr><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        escape(line)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::documents::{extract_text, SourceFormat};

    #[test]
    fn test_headings_are_bold_12pt() {
        assert_eq!(
            paragraph("EDUCATION"),
            r#"<w:p><w:r><w:rPr><w:b/><w:sz w:val="24"/></w:rPr><w:t xml:space="preserve">EDUCATION</w:t></w:r></w:p>"#
        );
        assert!(paragraph("Built things").contains(r#"<w:sz w:val="22"/>"#));
        assert!(!paragraph("Built things").contains("<w:b/>"));
        assert_eq!(paragraph("   "), "<w:p/>");
        assert!(!paragraph("Education outreach lead").contains("<w:b/>"));
    }

    #[test]
    fn test_markup_is_escaped() {
        assert!(paragraph("R&D <core>").contains("R&amp;D &lt;core&gt;"));
    }

    #[tokio::test]
    async fn test_package_is_readable_by_the_upload_parser() {
        let bytes = render("JANE DOE\n\nPROFESSIONAL SUMMARY\nR&D lead").unwrap();
        let text = extract_text(bytes.into(), SourceFormat::Docx).await.unwrap();
        assert_eq!(text, "JANE DOE\nPROFESSIONAL SUMMARY\nR&D lead");
    }
}
