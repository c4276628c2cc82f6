use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::Config;
use crate::filters::{FieldScope, FilterRules, KeywordList, KeywordRule};
use crate::models::{SearchQuery, WorkLocation};

#[derive(Parser, Debug)]
#[command(name = "job-scraper", version, about = "Fetch LinkedIn job listings and filter them by keywords")]
pub struct Cli {
    /// Configuration file (defaults to ./job_scraper.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = PresenterKind::Console)]
    pub presenter: PresenterKind,

    /// -v for debug, -vv for trace
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PresenterKind {
    Console,
    Quiet,
    Window,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scrape, filter and show listings
    Search(SearchArgs),
    /// Print the number of jobs LinkedIn reports for the query
    Count(QueryArgs),
    /// Test the connection to LinkedIn
    Check,
    /// Open the window without searching first
    Gui(QueryArgs),
}

#[derive(Args, Debug, Default, Clone)]
pub struct QueryArgs {
    /// Search keywords
    #[arg(short, long)]
    pub query: Option<String>,

    /// Only jobs posted in the past N days
    #[arg(short, long)]
    pub days: Option<u32>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub geo_id: Option<String>,

    /// on-site, remote, hybrid (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub work_location: Option<Vec<WorkLocation>>,

    /// Stop after N jobs instead of the count LinkedIn reports
    #[arg(short, long)]
    pub max_jobs: Option<usize>,
}

impl QueryArgs {
    pub fn query(&self, config: &Config) -> SearchQuery {
        let mut query = config.search.query();
        if let Some(keywords) = &self.query {
            query.keywords = keywords.clone();
        }
        if let Some(days) = self.days {
            query.n_days = days;
        }
        if let Some(location) = &self.location {
            query.location = location.clone();
        }
        if let Some(geo_id) = &self.geo_id {
            query.geo_id = geo_id.clone();
        }
        if let Some(work_locations) = &self.work_location {
            query.work_locations = work_locations.clone();
        }
        if self.max_jobs.is_some() {
            query.max_jobs = self.max_jobs;
        }
        query
    }
}

#[derive(Args, Debug, Default, Clone)]
pub struct RuleArgs {
    /// Title must contain one of these (comma separated)
    #[arg(long)]
    pub title_require: Option<String>,

    /// Title must contain none of these
    #[arg(long)]
    pub title_exclude: Option<String>,

    #[arg(long)]
    pub description_require: Option<String>,

    #[arg(long)]
    pub description_exclude: Option<String>,

    /// Title or description must contain one of these
    #[arg(long)]
    pub require: Option<String>,

    #[arg(long)]
    pub exclude: Option<String>,

    /// Keep every scraped listing
    #[arg(long, conflicts_with_all = ["title_require", "title_exclude", "description_require", "description_exclude", "require", "exclude"])]
    pub no_filter: bool,
}

impl RuleArgs {
    fn scoped(&self) -> [(FieldScope, Option<&String>, Option<&String>); 3] {
        [
            (FieldScope::Title, self.title_require.as_ref(), self.title_exclude.as_ref()),
            (
                FieldScope::Description,
                self.description_require.as_ref(),
                self.description_exclude.as_ref(),
            ),
            (FieldScope::Any, self.require.as_ref(), self.exclude.as_ref()),
        ]
    }

    /// Configured rules unless any rule flag is given, which replaces them
    pub fn rules(&self, config: &Config) -> FilterRules {
        let mut rules = config.filters.rules();
        if self.no_filter {
            rules.rules.clear();
            return rules;
        }

        let given: Vec<KeywordRule> = self
            .scoped()
            .into_iter()
            .filter(|(_, required, excluded)| required.is_some() || excluded.is_some())
            .map(|(scope, required, excluded)| {
                KeywordRule::new(
                    scope,
                    required.map(|r| KeywordList::parse(r)).unwrap_or_default(),
                    excluded.map(|e| KeywordList::parse(e)).unwrap_or_default(),
                )
            })
            .collect();
        if !given.is_empty() {
            rules.rules = given;
        }
        rules
    }
}

#[derive(Args, Debug, Default, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    #[command(flatten)]
    pub rules: RuleArgs,

    /// Skip fetching job descriptions
    #[arg(long)]
    pub no_descriptions: bool,

    /// Write the filtered listings as CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Write the filtered listings as TSV
    #[arg(long)]
    pub tsv: Option<PathBuf>,

    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Write an HTML report, into the output folder when no path is given
    #[arg(long, num_args = 0..=1)]
    pub html: Option<Option<PathBuf>>,

    /// Do not highlight description keywords in the HTML report
    #[arg(long)]
    pub no_mark: bool,
}

impl SearchArgs {
    pub fn fetch_descriptions(&self, config: &Config) -> bool {
        config.search.fetch_descriptions && !self.no_descriptions
    }

    pub fn mark_keywords(&self, config: &Config) -> bool {
        config.output.mark_keywords && !self.no_mark
    }
}
