use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::ScrapeError;
use crate::models::{Listing, SearchQuery};

mod linkedin;

pub use linkedin::{parse_description, parse_job_cards, parse_job_count_page, LinkedinScraper};

/// Shared stop request, checked between page and description requests
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Listings gathered by one search plus the pages that had to be skipped
#[derive(Debug, Clone, Default)]
pub struct ScrapeReport {
    pub listings: Vec<Listing>,
    pub warnings: Vec<String>,
    pub pages_requested: usize,
    pub pages_failed: usize,
}

/// Description of one posting, as plain text and as served markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub text: String,
    pub html: String,
}

#[async_trait]
pub trait JobSource: Send + Sync {
    fn name(&self) -> &str;

    /// Fails only when the source cannot be reached at all
    async fn test_connection(&self) -> Result<(), ScrapeError>;

    /// Total number of jobs the search reports, if the page shows it
    async fn count_jobs(&self, query: &SearchQuery) -> Result<Option<usize>, ScrapeError>;

    /// Fetch every result page; failed pages are skipped and reported
    async fn scrape_jobs(&self, query: &SearchQuery) -> Result<ScrapeReport, ScrapeError>;

    async fn fetch_description(&self, listing: &Listing) -> Result<Option<Description>, ScrapeError>;
}
