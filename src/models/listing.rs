use super::UNKNOWN;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// NewType pattern for type safety
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl JobId {
    /// Job links look like `.../jobs/view/senior-python-engineer-at-acme-3871234567`
    pub fn from_link(link: &str) -> Self {
        let tail = link.trim_end_matches('/').rsplit('-').next().unwrap_or(UNKNOWN);
        if tail.is_empty() {
            JobId(UNKNOWN.to_string())
        } else {
            JobId(tail.to_string())
        }
    }

    pub fn is_known(&self) -> bool {
        self.0 != UNKNOWN && !self.0.is_empty()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One scraped job posting.
///
/// Listings are not mutated after scraping; attaching a description
/// produces a new value through [`Listing::with_description`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub title: String,
    pub company: String,
    pub location: String,
    pub url: String,
    pub job_id: JobId,
    pub posted: Option<NaiveDate>,
    pub scraped_at: DateTime<Utc>,
    /// Plain text, used for keyword matching
    pub description: Option<String>,
    /// Markup as served, used for the HTML report
    pub description_html: Option<String>,
}

impl Default for Listing {
    fn default() -> Self {
        Self {
            title: UNKNOWN.to_string(),
            company: UNKNOWN.to_string(),
            location: UNKNOWN.to_string(),
            url: String::new(),
            job_id: JobId(UNKNOWN.to_string()),
            posted: None,
            scraped_at: Utc::now(),
            description: None,
            description_html: None,
        }
    }
}

impl Listing {
    pub fn with_description(self, text: String, html: String) -> Self {
        Self {
            description: Some(text),
            description_html: Some(html),
            ..self
        }
    }

    pub fn has_description(&self) -> bool {
        self.description.is_some()
    }

    pub fn posted_display(&self) -> String {
        match self.posted {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => UNKNOWN.to_string(),
        }
    }

    /// Columns used by tabular output: title, company, location, url, date
    pub fn table_row(&self) -> [String; 5] {
        [
            self.title.clone(),
            self.company.clone(),
            self.location.clone(),
            self.url.clone(),
            self.posted_display(),
        ]
    }
}

pub const TABLE_HEADERS: [&str; 5] = ["title", "company", "location", "url", "date"];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn job_id_is_trailing_segment_of_link() {
        let id = JobId::from_link(
            "https://nl.linkedin.com/jobs/view/senior-python-engineer-at-acme-3871234567",
        );
        assert_eq!(id, JobId("3871234567".to_string()));
        assert!(id.is_known());
    }

    #[test]
    fn job_id_for_empty_link_is_unknown() {
        assert!(!JobId::from_link("").is_known());
    }

    #[test]
    fn with_description_keeps_other_fields() {
        let listing = Listing {
            title: "Backend Developer".to_string(),
            url: "https://example.com/jobs/view/backend-1".to_string(),
            ..Default::default()
        };
        let scraped_at = listing.scraped_at;

        let described = listing.with_description("Python and SQL".into(), "<p>Python and SQL</p>".into());

        assert_eq!(described.title, "Backend Developer");
        assert_eq!(described.scraped_at, scraped_at);
        assert_eq!(described.description.as_deref(), Some("Python and SQL"));
        assert!(described.has_description());
    }

    #[test]
    fn missing_posted_date_displays_unknown() {
        let listing = Listing::default();
        assert_eq!(listing.posted_display(), UNKNOWN);
        assert_eq!(listing.table_row()[4], UNKNOWN);
    }
}
