use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::filters::{FieldScope, FilterRules, KeywordList, KeywordRule};
use crate::models::{SearchQuery, WorkLocation};

/// Looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "job_scraper";
pub const ENV_PREFIX: &str = "JOB_SCRAPER";

// Default keyword lists
const TITLE_KEYWORDS_TO_KEEP: &[&str] = &[
    "python", "developer", "ontwikkelaar", "software", "programmer", "back end",
    "back-end", "backend", "full-stack", "fullstack", "full stack", "robotic",
];
const TITLE_KEYWORDS_TO_DISCARD: &[&str] = &[
    "java", "php", "c++", "c#", "dotnet", ".net", "plc", "mendix", "oracle",
    "data", "front end", "front-end", "frontend", "golang", "scala", "ruby",
    "powerbi", "rust", "react", "internship", "principal", "typescript",
    "werktuig", "gis", "angular", "stage", "year usd", "zzp",
];
const DESCRIPTION_KEYWORDS: &[&str] = &["python"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    pub endpoints: Endpoints,
    pub search: SearchDefaults,
    pub filters: FilterConfig,
    pub output: OutputConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    /// First back-off step; doubled on every retry
    pub retry_backoff_ms: u64,
    pub max_backoff_ms: u64,
    /// Pause between consecutive page or description requests
    pub request_delay_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36".to_string(),
            timeout_seconds: 25,
            max_retries: 5,
            retry_backoff_ms: 1000,
            max_backoff_ms: 5000,
            request_delay_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// Search page carrying the total job count
    pub search_page_url: String,
    /// Guest API returning one page of job cards
    pub job_page_url: String,
    /// Guest API for a single posting; `{job_id}` is substituted
    pub single_job_url: String,
    pub test_connection_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            search_page_url: "https://www.linkedin.com/jobs/search".to_string(),
            job_page_url: "https://www.linkedin.com/jobs-guest/jobs/api/seeMoreJobPostings/search".to_string(),
            single_job_url: "https://www.linkedin.com/jobs-guest/jobs/api/jobPosting/{job_id}".to_string(),
            test_connection_url: "https://www.linkedin.com/jobs-guest/jobs/api/seeMoreJobPostings/search?trk=guest_homepage-basic_guest_nav_menu_jobs&start=0".to_string(),
        }
    }
}

impl Endpoints {
    pub fn single_job(&self, job_id: &str) -> String {
        self.single_job_url.replace("{job_id}", job_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchDefaults {
    pub keywords: String,
    pub n_days: u32,
    pub location: String,
    pub geo_id: String,
    pub work_locations: Vec<WorkLocation>,
    pub max_jobs: Option<usize>,
    pub jobs_per_page: usize,
    /// Used when the job count cannot be read from the search page
    pub max_jobs_fallback: usize,
    pub fetch_descriptions: bool,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            keywords: "python".to_string(),
            n_days: 1,
            location: "Nederland".to_string(),
            geo_id: "102890719".to_string(),
            work_locations: WorkLocation::all(),
            max_jobs: None,
            jobs_per_page: 10,
            max_jobs_fallback: 1000,
            fetch_descriptions: true,
        }
    }
}

impl SearchDefaults {
    pub fn query(&self) -> SearchQuery {
        SearchQuery {
            keywords: self.keywords.clone(),
            n_days: self.n_days,
            location: self.location.clone(),
            geo_id: self.geo_id.clone(),
            work_locations: self.work_locations.clone(),
            max_jobs: self.max_jobs,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub rules: Vec<KeywordRule>,
    pub keep_missing_descriptions: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            rules: vec![
                KeywordRule::new(
                    FieldScope::Title,
                    KeywordList::new(TITLE_KEYWORDS_TO_KEEP),
                    KeywordList::new(TITLE_KEYWORDS_TO_DISCARD),
                ),
                KeywordRule::new(
                    FieldScope::Description,
                    KeywordList::new(DESCRIPTION_KEYWORDS),
                    KeywordList::default(),
                ),
            ],
            keep_missing_descriptions: true,
        }
    }
}

impl FilterConfig {
    pub fn rules(&self) -> FilterRules {
        FilterRules {
            rules: self.rules.clone(),
            keep_missing_descriptions: self.keep_missing_descriptions,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    pub fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
        }
    }

    pub fn ext(&self) -> &'static str {
        match self {
            Delimiter::Comma => "csv",
            Delimiter::Tab => "tsv",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub folder: PathBuf,
    pub delimiter: Delimiter,
    /// Mark description keywords in the HTML report
    pub mark_keywords: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("results"),
            delimiter: Delimiter::Comma,
            mark_keywords: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub format: LogFormat,
    /// Directive for this crate, e.g. `info` or `debug`
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Defaults, then the config file, then `JOB_SCRAPER__SECTION__KEY` variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        builder = match path {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                builder.add_source(config::File::from(path).required(true))
            }
            None => builder.add_source(config::File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;

        settings
            .try_deserialize()
            .context("Invalid configuration")
    }
}
