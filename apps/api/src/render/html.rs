//! Print-ready HTML page with one `<section>` per standard resume section.

use quick_xml::escape::escape;

use super::{is_heading, is_section_heading, BULLET};

const STYLE: &str = "body{font-family:Arial,Helvetica,sans-serif;font-size:11pt;line-height:1.4;\
max-width:8.5in;margin:0 auto;padding:0.5in;color:#222}\
header h1{font-size:18pt;margin:0}\
header p{margin:2px 0}\
section h2{font-size:12pt;border-bottom:1px solid #444;margin:16px 0 6px}\
section h3{font-size:11pt;margin:10px 0 2px}\
p{margin:2px 0}ul{margin:4px 0 4px 18px;padding:0}\
@media print{body{padding:0}}";

pub fn render(text: &str) -> String {
    let mut lines = text.lines().map(str::trim).peekable();

    let mut header = Vec::new();
    while let Some(line) = lines.next_if(|l| !is_section_heading(l)) {
        if !line.is_empty() {
            header.push(line);
        }
    }

    let mut body = String::new();
    if let Some((name, rest)) = header.split_first() {
        body.push_str(&format!("<header><h1>{}</h1>", escape(*name)));
        for line in rest {
            body.push_str(&format!("<p>{}</p>", escape(*line)));
        }
        body.push_str("</header>\n");
    }

    let mut in_section = false;
    let mut in_list = false;
    for line in lines {
        if line.is_empty() {
            close_list(&mut body, &mut in_list);
            continue;
        }
        if is_section_heading(line) {
            close_list(&mut body, &mut in_list);
            if in_section {
                body.push_str("</section>\n");
            }
            body.push_str(&format!("<section><h2>{}</h2>", escape(line)));
            in_section = true;
        } else if let Some(item) = line.strip_prefix(BULLET.trim_end()) {
            if !in_list {
                body.push_str("<ul>");
                in_list = true;
            }
            body.push_str(&format!("<li>{}</li>", escape(item.trim_start())));
        } else if is_heading(line) {
            close_list(&mut body, &mut in_list);
            body.push_str(&format!("<h3>{}</h3>", escape(line)));
        } else {
            close_list(&mut body, &mut in_list);
            body.push_str(&format!("<p>{}</p>", escape(line)));
        }
    }
    close_list(&mut body, &mut in_list);
    if in_section {
        body.push_str("</section>\n");
    }

    let title = header.first().copied().unwrap_or("Resume");
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
        <title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}</body>\n</html>\n",
        escape(title)
    )
}

fn close_list(body: &mut String, in_list: &mut bool) {
    if *in_list {
        body.push_str("</ul>");
        *in_list = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "JANE DOE\nBackend Engineer\n\n\
        PROFESSIONAL SUMMARY\n\nBuilds <reliable> services.\n\n\
        PROFESSIONAL EXPERIENCE\n\nSENIOR BACKEND ENGINEER\nFinanceFlow Inc | 2024 - Present\n\n\
        • Cut latency by 40%\n• Led R&D";

    #[test]
    fn test_sections_and_header() {
        let html = render(RESUME);
        assert!(html.contains("<title>JANE DOE</title>"));
        assert!(html.contains("<header><h1>JANE DOE</h1><p>Backend Engineer</p></header>"));
        assert_eq!(html.matches("<section>").count(), 2);
        assert_eq!(html.matches("</section>").count(), 2);
        assert!(html.contains("<section><h2>PROFESSIONAL SUMMARY</h2><p>Builds &lt;reliable&gt; services.</p>"));
        assert!(html.contains("<h3>SENIOR BACKEND ENGINEER</h3>"));
    }

    #[test]
    fn test_bullets_grouped_into_one_list() {
        let html = render(RESUME);
        assert!(html.contains("<ul><li>Cut latency by 40%</li><li>Led R&amp;D</li></ul>"));
    }

    #[test]
    fn test_prose_starting_with_section_word_stays_in_section() {
        let html = render("JANE DOE\n\nPROFESSIONAL SUMMARY\nProjects at Acme shipped weekly");
        assert_eq!(html.matches("<section>").count(), 1);
        assert!(html.contains("<p>Projects at Acme shipped weekly</p>"));
    }

    #[test]
    fn test_text_without_sections() {
        let html = render("Just a note");
        assert!(html.contains("<header><h1>Just a note</h1></header>"));
        assert!(!html.contains("<section>"));
    }
}
