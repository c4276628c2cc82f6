#![allow(dead_code)]

use std::sync::Arc;

use job_scraper::config::{Config, Endpoints, HttpConfig};
use job_scraper::models::SearchQuery;
use job_scraper::scrapers::LinkedinScraper;
use job_scraper::utils::http::create_client;
use wiremock::MockServer;

pub const SEARCH_PATH: &str = "/jobs/search";
pub const JOBS_PATH: &str = "/jobs-guest/jobs";
pub const PING_PATH: &str = "/ping";

pub fn config(server: &MockServer) -> Config {
    let uri = server.uri();
    Config {
        http: HttpConfig {
            timeout_seconds: 5,
            max_retries: 2,
            retry_backoff_ms: 1,
            max_backoff_ms: 5,
            request_delay_ms: 0,
            ..Default::default()
        },
        endpoints: Endpoints {
            search_page_url: format!("{}{}", uri, SEARCH_PATH),
            job_page_url: format!("{}{}", uri, JOBS_PATH),
            single_job_url: format!("{}/jobs-guest/posting/{{job_id}}", uri),
            test_connection_url: format!("{}{}", uri, PING_PATH),
        },
        ..Default::default()
    }
}

pub fn scraper(config: Config) -> LinkedinScraper {
    let client = create_client(&config.http).unwrap();
    LinkedinScraper::new(Arc::new(config), client)
}

pub fn query() -> SearchQuery {
    Config::default().search.query()
}

/// One `li` card per (id, title)
pub fn job_page(cards: &[(&str, &str)]) -> String {
    cards
        .iter()
        .map(|(id, title)| {
            format!(
                r#"<li><div class="base-card">
  <a class="base-card__full-link" href="https://nl.linkedin.com/jobs/view/{slug}-{id}?trk=public_jobs"></a>
  <h3 class="base-search-card__title">{title}</h3>
  <h4 class="base-search-card__subtitle"><a>Acme</a></h4>
  <span class="job-search-card__location">Utrecht, Utrecht, Netherlands</span>
  <time class="job-search-card__listdate" datetime="2024-04-10">2 days ago</time>
</div></li>"#,
                slug = title.to_lowercase().replace(' ', "-"),
                id = id,
                title = title,
            )
        })
        .collect()
}

pub fn count_page(count: &str) -> String {
    format!(
        r#"<html><body><h1><span class="results-context-header__job-count">{}</span> jobs</h1></body></html>"#,
        count
    )
}

pub fn posting_page(description: &str) -> String {
    format!(
        r#"<html><body><section><div class="show-more-less-html__markup"><p>{}</p></div></section></body></html>"#,
        description
    )
}
