use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fs;
use std::path::Path;
use tracing::info;

use super::ensure_parent;
use crate::error::ExportError;
use crate::filters::{mark_keywords_html, KeywordList};
use crate::models::UNKNOWN;
use crate::results::ResultSet;

const HTML_START: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Job results</title>
<style>
mark { background-color: #ffe066; font-weight: bold; }
h1.title { font-size: 1.2em; }
</style>
</head>
<body>
"#;
const HTML_END: &str = "</body>\n</html>\n";
const HTML_JOB_SEPARATOR: &str = "\n<hr>\n";

/// Report with one linked heading and the description per listing.
///
/// With `marks`, keyword occurrences in descriptions are wrapped in `<mark>`.
pub fn render_html(results: &ResultSet, marks: Option<&KeywordList>) -> String {
    let mut html = String::from(HTML_START);

    for listing in results {
        html.push_str(&format!(
            "<h1 class=\"title\">\n    <a class=\"hidden-nested-link\" href=\"{}\">{} at {}, {}</a>\n</h1>\n",
            encode_double_quoted_attribute(&listing.url),
            encode_text(&listing.title),
            encode_text(&listing.company),
            encode_text(&listing.location),
        ));

        let description = listing.description_html.as_deref().unwrap_or(UNKNOWN);
        match marks {
            Some(keywords) if !keywords.is_empty() => {
                let (_, marked) = mark_keywords_html(description, keywords);
                html.push_str(&marked);
            }
            _ => html.push_str(description),
        }
        html.push_str(HTML_JOB_SEPARATOR);
    }

    html.push_str(HTML_END);
    html
}

pub fn save_html(path: &Path, results: &ResultSet, marks: Option<&KeywordList>) -> Result<(), ExportError> {
    ensure_parent(path)?;
    fs::write(path, render_html(results, marks))?;
    info!("Saved {} listing(s) to {}", results.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Listing;

    fn results() -> ResultSet {
        let described = Listing {
            title: "Python <Backend> Developer".to_string(),
            company: "Acme".to_string(),
            location: "Amsterdam".to_string(),
            url: "https://www.linkedin.com/jobs/view/1?a=1&b=2".to_string(),
            ..Default::default()
        }
        .with_description("We love Python".to_string(), "<p>We love Python</p>".to_string());
        let bare = Listing {
            title: "Chef".to_string(),
            url: "https://www.linkedin.com/jobs/view/2".to_string(),
            ..Default::default()
        };
        vec![described, bare].into_iter().collect()
    }

    #[test]
    fn headings_are_escaped_and_linked() {
        let html = render_html(&results(), None);
        assert!(html.contains(
            r#"<a class="hidden-nested-link" href="https://www.linkedin.com/jobs/view/1?a=1&amp;b=2">Python &lt;Backend&gt; Developer at Acme, Amsterdam</a>"#
        ));
        assert_eq!(html.matches(HTML_JOB_SEPARATOR).count(), 2);
    }

    #[test]
    fn descriptions_are_marked_when_asked() {
        let keywords = KeywordList::parse("python");
        let html = render_html(&results(), Some(&keywords));
        assert!(html.contains("<p>We love <mark>Python</mark></p>"));

        let plain = render_html(&results(), None);
        assert!(plain.contains("<p>We love Python</p>"));
    }

    #[test]
    fn marking_keeps_description_links_intact() {
        let linked: ResultSet = vec![Listing {
            url: "https://www.linkedin.com/jobs/view/3".to_string(),
            ..Default::default()
        }
        .with_description(
            "Apply at python.org".to_string(),
            r#"<p>Apply at <a href="https://python.org/jobs">python.org</a></p>"#.to_string(),
        )]
        .into_iter()
        .collect();

        let html = render_html(&linked, Some(&KeywordList::parse("python")));

        assert!(html.contains(r#"<a href="https://python.org/jobs"><mark>python</mark>.org</a>"#));
    }

    #[test]
    fn missing_description_is_unknown() {
        let html = render_html(&results(), None);
        assert!(html.contains(&format!("</h1>\n{}{}", UNKNOWN, HTML_JOB_SEPARATOR)));
    }
}
