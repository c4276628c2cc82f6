pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod filters;
pub mod models;
pub mod parsers;
pub mod pipeline;
pub mod presenter;
pub mod results;
pub mod scrapers;
pub mod utils;

pub use config::Config;
pub use error::{ExportError, FetchError, ScrapeError};
pub use pipeline::{run_search, SearchOutcome};
