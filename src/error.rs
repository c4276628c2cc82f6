use thiserror::Error;

/// Errors from fetching a single URL
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Too many requests (status code 429) for {0}")]
    TooManyRequests(String),

    #[error("Bad request (status code 400) for {0}")]
    BadRequest(String),

    #[error("Unexpected status code {status} for {url}")]
    BadStatus { status: u16, url: String },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to fetch {url} after {attempts} attempts: {last}")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        #[source]
        last: Box<FetchError>,
    },

    #[error("Invalid URL {0}")]
    InvalidUrl(String),
}

/// Errors from a scraping run
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Job source unreachable, check the internet connection: {0}")]
    SourceUnreachable(#[source] FetchError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Invalid selector: {0}")]
    Selector(String),
}

/// Errors from writing result files
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
