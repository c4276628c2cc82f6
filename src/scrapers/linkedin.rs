use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::Config;
use crate::error::{FetchError, ScrapeError};
use crate::models::{JobId, Listing, SearchParams, SearchQuery, UNKNOWN};
use crate::parsers::{city_from_location, clean_text, first_text, page_count, parse_job_count, parse_posted_date, strip_query};
use crate::scrapers::{CancelFlag, Description, JobSource, ScrapeReport};
use crate::utils::http::{fetch_html, RetryPolicy};

pub struct LinkedinScraper {
    config: Arc<Config>,
    client: Client,
    policy: RetryPolicy,
    cancel: CancelFlag,
}

impl LinkedinScraper {
    pub fn new(config: Arc<Config>, client: Client) -> Self {
        let policy = RetryPolicy::from_config(&config.http);
        Self {
            config,
            client,
            policy,
            cancel: CancelFlag::default(),
        }
    }

    /// Stop paging once `cancel` is raised, keeping the pages already fetched
    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    fn request_delay(&self) -> Duration {
        Duration::from_millis(self.config.http.request_delay_ms)
    }

    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        fetch_html(&self.client, url, &self.policy).await
    }
}

#[async_trait]
impl JobSource for LinkedinScraper {
    fn name(&self) -> &str {
        "LinkedIn"
    }

    async fn test_connection(&self) -> Result<(), ScrapeError> {
        info!("Testing connection to {}", self.name());
        self.fetch(&self.config.endpoints.test_connection_url)
            .await
            .map(|_| ())
            .map_err(ScrapeError::SourceUnreachable)
    }

    async fn count_jobs(&self, query: &SearchQuery) -> Result<Option<usize>, ScrapeError> {
        info!(
            "Determining number of jobs for '{}' from past {} day(s) with location '{}', geo ID '{}' and work location: {}",
            query.keywords, query.n_days, query.location, query.geo_id, query.work_location_codes()
        );
        let url = url_with_params(&self.config.endpoints.search_page_url, query.params())?;
        let html = self.fetch(&url).await?;
        parse_job_count_page(&html)
    }

    async fn scrape_jobs(&self, query: &SearchQuery) -> Result<ScrapeReport, ScrapeError> {
        info!(
            "Fetching '{}' jobs from past {} day(s) with location '{}', geo ID '{}' and work location: {}",
            query.keywords, query.n_days, query.location, query.geo_id, query.work_location_codes()
        );
        let search = &self.config.search;
        let mut report = ScrapeReport::default();

        let n_jobs = match query.max_jobs {
            Some(n) => n,
            None => match self.count_jobs(query).await {
                Ok(Some(n)) => n,
                Ok(None) => {
                    report.warnings.push(format!(
                        "Failed determining the number of jobs, fetching up to {} jobs",
                        search.max_jobs_fallback
                    ));
                    search.max_jobs_fallback
                }
                Err(e) => {
                    report.warnings.push(format!(
                        "Could not fetch the job count ({}), fetching up to {} jobs",
                        e, search.max_jobs_fallback
                    ));
                    search.max_jobs_fallback
                }
            },
        };

        let pages = page_count(n_jobs, search.jobs_per_page);
        report.pages_requested = pages;
        info!("Expecting {} jobs over {} page(s)", n_jobs, pages);

        for page in 0..pages {
            if self.cancel.is_cancelled() {
                info!("Stopped before page {} of {}", page, pages);
                report.warnings.push(format!("Stopped by user, {} of {} page(s) fetched", page, pages));
                break;
            }
            if page > 0 {
                tokio::time::sleep(self.request_delay()).await;
            }
            info!("Fetching jobs from page {}", page);

            let params = query.params().with_start(page * search.jobs_per_page);
            let url = url_with_params(&self.config.endpoints.job_page_url, params)?;

            let html = match self.fetch(&url).await {
                Ok(html) => html,
                Err(e) => {
                    warn!("Error when fetching job page {}: {}. Not all available job pages will be scraped.", page, e);
                    report.pages_failed += 1;
                    report.warnings.push(format!("Skipped job page {}: {}", page, e));
                    continue;
                }
            };

            let listings = parse_job_cards(&html, Utc::now())?;
            if listings.is_empty() {
                debug!("No job cards on page {}", page);
                continue;
            }
            report.listings.extend(listings);
        }

        if let Some(max) = query.max_jobs {
            report.listings.truncate(max);
        }

        info!("Found {} job cards on {}", report.listings.len(), self.name());
        Ok(report)
    }

    async fn fetch_description(&self, listing: &Listing) -> Result<Option<Description>, ScrapeError> {
        if !listing.job_id.is_known() {
            debug!("No job id for {}, skipping description", listing.url);
            return Ok(None);
        }
        info!("Fetching job description for job with ID: {}", listing.job_id);

        let url = self.config.endpoints.single_job(&listing.job_id.0);
        let html = self.fetch(&url).await?;
        let description = parse_description(&html)?;

        tokio::time::sleep(self.request_delay()).await;
        Ok(description)
    }
}

fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|_| ScrapeError::Selector(css.to_string()))
}

fn url_with_params(base: &str, params: SearchParams<'_>) -> Result<String, FetchError> {
    let mut url = Url::parse(base).map_err(|_| FetchError::InvalidUrl(base.to_string()))?;
    let encoded = serde_urlencoded::to_string(&params).map_err(|_| FetchError::InvalidUrl(base.to_string()))?;
    let query = match url.query() {
        Some(existing) if !existing.is_empty() => format!("{}&{}", existing, encoded),
        _ => encoded,
    };
    url.set_query(Some(&query));
    Ok(url.to_string())
}

/// Read the job count from the search page, `None` if it is not shown
pub fn parse_job_count_page(html: &str) -> Result<Option<usize>, ScrapeError> {
    let document = Html::parse_document(html);
    let count_selector = selector("span.results-context-header__job-count")?;

    Ok(document
        .select(&count_selector)
        .next()
        .and_then(|el| parse_job_count(&el.text().collect::<String>())))
}

/// Extract the job cards (`li` entries) of one job page.
///
/// Cards without a job link are dropped; other missing fields become `UNKNOWN`.
pub fn parse_job_cards(html: &str, scraped_at: DateTime<Utc>) -> Result<Vec<Listing>, ScrapeError> {
    let document = Html::parse_document(html);
    let card_selector = selector("li")?;
    let title_selector = selector("h3.base-search-card__title")?;
    let company_selector = selector("h4.base-search-card__subtitle")?;
    let location_selector = selector("span.job-search-card__location")?;
    let link_selector = selector(r#"a[href*="linkedin.com/jobs/view"]"#)?;
    let date_selector = selector("time.job-search-card__listdate--new, time.job-search-card__listdate")?;

    let mut listings = Vec::new();

    for card in document.select(&card_selector) {
        let link = card
            .select(&link_selector)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|href| strip_query(href.trim()));

        let Some(url) = link.filter(|url| !url.is_empty()) else {
            debug!("Skipping job card without link");
            continue;
        };

        let location = first_text(&card, &location_selector)
            .map(|loc| city_from_location(&loc))
            .filter(|loc| !loc.is_empty())
            .unwrap_or_else(|| UNKNOWN.to_string());

        let posted = card
            .select(&date_selector)
            .next()
            .and_then(|time| time.value().attr("datetime"))
            .and_then(parse_posted_date);

        listings.push(Listing {
            title: first_text(&card, &title_selector).unwrap_or_else(|| UNKNOWN.to_string()),
            company: first_text(&card, &company_selector).unwrap_or_else(|| UNKNOWN.to_string()),
            location,
            job_id: JobId::from_link(&url),
            url,
            posted,
            scraped_at,
            description: None,
            description_html: None,
        });
    }

    Ok(listings)
}

/// Description block of a single posting page
pub fn parse_description(html: &str) -> Result<Option<Description>, ScrapeError> {
    let document = Html::parse_document(html);
    let markup_selector = selector("div.show-more-less-html__markup")?;

    Ok(document.select(&markup_selector).next().map(|el| Description {
        text: clean_text(&el.text().collect::<Vec<_>>().join(" ")),
        html: el.inner_html().trim().to_string(),
    }))
}
