pub mod listing;
pub mod search;

pub use listing::*;
pub use search::*;

/// Placeholder for fields that could not be extracted from a job card
pub const UNKNOWN: &str = "UNKNOWN";
