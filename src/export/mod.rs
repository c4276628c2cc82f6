pub mod delimited;
pub mod html;
pub mod json;

pub use delimited::*;
pub use html::*;
pub use json::*;

use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ExportError;
use crate::models::SearchQuery;

/// `<YYYYMMDD-HHMMSS>_<keywords>_wl=<codes>.<ext>`
pub fn default_file_name(query: &SearchQuery, ext: &str, now: DateTime<Local>) -> String {
    let keywords: String = query
        .keywords
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    format!(
        "{}_{}_wl={}.{}",
        now.format("%Y%m%d-%H%M%S"),
        keywords,
        query.work_location_codes(),
        ext
    )
}

/// Resolve where to write: the explicit path, or a generated name inside `folder`
pub fn resolve_out_path(explicit: Option<&Path>, folder: &Path, query: &SearchQuery, ext: &str) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => folder.join(default_file_name(query, ext, Local::now())),
    }
}

/// Ensure the parent directory of `path` exists
pub fn ensure_parent(path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkLocation;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn query() -> SearchQuery {
        SearchQuery {
            keywords: "python dev/ops".to_string(),
            n_days: 1,
            location: "Nederland".to_string(),
            geo_id: "102890719".to_string(),
            work_locations: vec![WorkLocation::Hybrid, WorkLocation::Remote],
            max_jobs: None,
        }
    }

    #[test]
    fn default_name_carries_date_keywords_and_work_locations() {
        let now = Local.with_ymd_and_hms(2024, 4, 10, 9, 5, 3).unwrap();
        assert_eq!(
            default_file_name(&query(), "html", now),
            "20240410-090503_python_dev_ops_wl=3,2.html"
        );
    }

    #[test]
    fn explicit_path_wins() {
        let path = resolve_out_path(Some(Path::new("out/jobs.csv")), Path::new("results"), &query(), "csv");
        assert_eq!(path, PathBuf::from("out/jobs.csv"));

        let generated = resolve_out_path(None, Path::new("results"), &query(), "csv");
        assert!(generated.starts_with("results"));
        assert_eq!(generated.extension().and_then(|e| e.to_str()), Some("csv"));
    }
}
