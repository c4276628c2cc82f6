use tracing::{info, warn};

use crate::error::ScrapeError;
use crate::filters::FilterRules;
use crate::models::SearchQuery;
use crate::results::ResultSet;
use crate::scrapers::{CancelFlag, JobSource};

/// Everything one search produced
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub query: SearchQuery,
    /// Deduplicated scrape, descriptions attached where they were fetched
    pub scraped: ResultSet,
    /// Listings of `scraped` that passed the filter rules
    pub results: ResultSet,
    pub warnings: Vec<String>,
}

impl SearchOutcome {
    /// Apply different rules to the listings already scraped
    pub fn refilter(&self, rules: &FilterRules) -> ResultSet {
        self.scraped.filtered(rules)
    }
}

/// Scrape, deduplicate and filter.
///
/// Titles are checked first so descriptions are only fetched for listings
/// that can still pass. Only an unreachable source is an error; failed
/// pages and descriptions end up in `warnings`.
pub async fn run_search(
    source: &dyn JobSource,
    query: &SearchQuery,
    rules: &FilterRules,
    fetch_descriptions: bool,
) -> Result<SearchOutcome, ScrapeError> {
    run_search_cancellable(source, query, rules, fetch_descriptions, &CancelFlag::default()).await
}

/// [`run_search`] that stops requesting descriptions once `cancel` is raised.
///
/// Listings scraped so far are still deduplicated and filtered.
pub async fn run_search_cancellable(
    source: &dyn JobSource,
    query: &SearchQuery,
    rules: &FilterRules,
    fetch_descriptions: bool,
    cancel: &CancelFlag,
) -> Result<SearchOutcome, ScrapeError> {
    source.test_connection().await?;

    let report = source.scrape_jobs(query).await?;
    if report.pages_failed > 0 {
        info!("{} of {} job page(s) could not be fetched", report.pages_failed, report.pages_requested);
    }
    let mut warnings = report.warnings;
    let scraped_count = report.listings.len();

    let deduplicated: ResultSet = report.listings.into_iter().collect();
    if deduplicated.len() < scraped_count {
        info!("Dropped {} duplicate listing(s)", scraped_count - deduplicated.len());
    }

    if rules.is_empty() {
        info!("No filter keywords configured, keeping all {} listings", deduplicated.len());
    }
    if !fetch_descriptions && rules.needs_descriptions() {
        info!("Descriptions are not fetched, description rules only see missing descriptions");
    }

    let mut scraped = ResultSet::new();
    let mut described = 0usize;
    let mut not_described = 0usize;
    for listing in deduplicated {
        if !fetch_descriptions || !rules.prefilter(&listing) {
            scraped.insert(listing);
            continue;
        }
        if cancel.is_cancelled() {
            not_described += 1;
            scraped.insert(listing);
            continue;
        }
        match source.fetch_description(&listing).await {
            Ok(Some(description)) => {
                described += 1;
                scraped.insert(listing.with_description(description.text, description.html));
            }
            Ok(None) => {
                warnings.push(format!("No description found for {}", listing.url));
                scraped.insert(listing);
            }
            Err(e) => {
                warnings.push(format!("Could not fetch description for {}: {}", listing.url, e));
                scraped.insert(listing);
            }
        }
    }
    if fetch_descriptions {
        info!("Fetched {} description(s)", described);
    }
    if not_described > 0 {
        warnings.push(format!("Stopped by user, {} description(s) not fetched", not_described));
    }

    let results = scraped.filtered(rules);
    info!("{} of {} listings passed the filters", results.len(), scraped.len());

    for warning in &warnings {
        warn!("{}", warning);
    }

    Ok(SearchOutcome {
        query: query.clone(),
        scraped,
        results,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::filters::{FieldScope, KeywordList, KeywordRule};
    use crate::models::{JobId, Listing, WorkLocation};
    use crate::scrapers::{Description, ScrapeReport};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeSource {
        unreachable: bool,
        cancel_after_first_description: Option<CancelFlag>,
        listings: Vec<Listing>,
        descriptions: HashMap<String, String>,
        failing_descriptions: Vec<String>,
        described: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl JobSource for FakeSource {
        fn name(&self) -> &str {
            "fake"
        }

        async fn test_connection(&self) -> Result<(), ScrapeError> {
            if self.unreachable {
                return Err(ScrapeError::SourceUnreachable(FetchError::InvalidUrl("offline".into())));
            }
            Ok(())
        }

        async fn count_jobs(&self, _query: &SearchQuery) -> Result<Option<usize>, ScrapeError> {
            Ok(Some(self.listings.len()))
        }

        async fn scrape_jobs(&self, _query: &SearchQuery) -> Result<ScrapeReport, ScrapeError> {
            Ok(ScrapeReport {
                listings: self.listings.clone(),
                warnings: vec!["Skipped job page 3: boom".to_string()],
                pages_requested: 4,
                pages_failed: 1,
            })
        }

        async fn fetch_description(&self, listing: &Listing) -> Result<Option<Description>, ScrapeError> {
            self.described.lock().unwrap().push(listing.job_id.0.clone());
            if let Some(cancel) = &self.cancel_after_first_description {
                cancel.cancel();
            }
            if self.failing_descriptions.contains(&listing.job_id.0) {
                return Err(FetchError::BadStatus { status: 500, url: listing.url.clone() }.into());
            }
            Ok(self.descriptions.get(&listing.job_id.0).map(|text| Description {
                text: text.clone(),
                html: format!("<p>{}</p>", text),
            }))
        }
    }

    fn listing(id: &str, title: &str) -> Listing {
        Listing {
            title: title.to_string(),
            url: format!("https://www.linkedin.com/jobs/view/job-{}", id),
            job_id: JobId(id.to_string()),
            ..Default::default()
        }
    }

    fn query() -> SearchQuery {
        SearchQuery {
            keywords: "python".to_string(),
            n_days: 1,
            location: "Nederland".to_string(),
            geo_id: "102890719".to_string(),
            work_locations: vec![WorkLocation::Remote],
            max_jobs: None,
        }
    }

    fn title_then_description() -> FilterRules {
        FilterRules::new(vec![
            KeywordRule::new(FieldScope::Title, KeywordList::parse("developer"), KeywordList::parse("java")),
            KeywordRule::new(FieldScope::Description, KeywordList::parse("python"), KeywordList::default()),
        ])
    }

    #[tokio::test]
    async fn descriptions_are_only_fetched_for_title_survivors() {
        let source = FakeSource {
            listings: vec![
                listing("1", "Backend Developer"),
                listing("2", "Java Developer"),
                listing("3", "Dishwasher"),
                listing("4", "Frontend Developer"),
            ],
            descriptions: HashMap::from([
                ("1".to_string(), "Python and Django".to_string()),
                ("4".to_string(), "Vue only".to_string()),
            ]),
            ..Default::default()
        };

        let outcome = run_search(&source, &query(), &title_then_description(), true).await.unwrap();

        assert_eq!(*source.described.lock().unwrap(), vec!["1".to_string(), "4".to_string()]);
        let kept: Vec<_> = outcome.results.iter().map(|l| l.job_id.0.as_str()).collect();
        assert_eq!(kept, vec!["1"]);
        assert_eq!(outcome.scraped.len(), 4);
    }

    #[tokio::test]
    async fn duplicates_are_dropped_before_filtering() {
        let source = FakeSource {
            listings: vec![listing("1", "Python Developer"), listing("1", "Python Developer"), listing("2", "Python Developer")],
            ..Default::default()
        };
        let rules = FilterRules::single(FieldScope::Title, KeywordList::parse("python"), KeywordList::default());

        let outcome = run_search(&source, &query(), &rules, false).await.unwrap();

        assert_eq!(outcome.results.len(), 2);
        assert!(source.described.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn no_rules_returns_everything_scraped() {
        let source = FakeSource {
            listings: vec![listing("1", "Dishwasher"), listing("2", "Chef")],
            ..Default::default()
        };

        let outcome = run_search(&source, &query(), &FilterRules::default(), false).await.unwrap();

        assert_eq!(outcome.results.len(), 2);
    }

    #[tokio::test]
    async fn failed_description_is_a_warning_and_listing_is_kept() {
        let source = FakeSource {
            listings: vec![listing("1", "Backend Developer")],
            failing_descriptions: vec!["1".to_string()],
            ..Default::default()
        };

        let outcome = run_search(&source, &query(), &title_then_description(), true).await.unwrap();

        assert_eq!(outcome.results.len(), 1);
        assert!(!outcome.results.as_slice()[0].has_description());
        assert_eq!(outcome.warnings.len(), 2);
        assert!(outcome.warnings[1].contains("Could not fetch description"));
    }

    #[tokio::test]
    async fn unreachable_source_is_the_only_error() {
        let source = FakeSource {
            unreachable: true,
            ..Default::default()
        };

        let result = run_search(&source, &query(), &FilterRules::default(), true).await;

        assert!(matches!(result, Err(ScrapeError::SourceUnreachable(_))));
    }

    #[tokio::test]
    async fn cancel_stops_description_requests_and_keeps_listings() {
        let cancel = CancelFlag::default();
        let source = FakeSource {
            listings: vec![listing("1", "Backend Developer"), listing("4", "Frontend Developer")],
            descriptions: HashMap::from([("1".to_string(), "Python".to_string())]),
            cancel_after_first_description: Some(cancel.clone()),
            ..Default::default()
        };

        let outcome = run_search_cancellable(&source, &query(), &title_then_description(), true, &cancel)
            .await
            .unwrap();

        assert_eq!(*source.described.lock().unwrap(), vec!["1".to_string()]);
        assert_eq!(outcome.scraped.len(), 2);
        // The undescribed listing is kept since missing descriptions are allowed
        assert_eq!(outcome.results.len(), 2);
        assert!(outcome.warnings.iter().any(|w| w == "Stopped by user, 1 description(s) not fetched"));
    }

    #[tokio::test]
    async fn refilter_uses_scraped_listings() {
        let source = FakeSource {
            listings: vec![listing("1", "Python Developer"), listing("2", "Chef")],
            ..Default::default()
        };
        let rules = FilterRules::single(FieldScope::Title, KeywordList::parse("python"), KeywordList::default());
        let outcome = run_search(&source, &query(), &rules, false).await.unwrap();
        assert_eq!(outcome.results.len(), 1);

        let chefs = FilterRules::single(FieldScope::Title, KeywordList::parse("chef"), KeywordList::default());
        let refiltered = outcome.refilter(&chefs);
        assert_eq!(refiltered.as_slice()[0].job_id.0, "2");
    }
}
