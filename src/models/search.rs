use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Work location filter understood by the LinkedIn search (`f_WT`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkLocation {
    OnSite,
    Remote,
    Hybrid,
}

impl WorkLocation {
    pub fn code(&self) -> &'static str {
        match self {
            WorkLocation::OnSite => "1",
            WorkLocation::Remote => "2",
            WorkLocation::Hybrid => "3",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            WorkLocation::OnSite => "on-site",
            WorkLocation::Remote => "remote",
            WorkLocation::Hybrid => "hybrid",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "on-site" | "onsite" | "on_site" | "1" => Some(WorkLocation::OnSite),
            "remote" | "2" => Some(WorkLocation::Remote),
            "hybrid" | "3" => Some(WorkLocation::Hybrid),
            _ => None,
        }
    }

    pub fn all() -> Vec<WorkLocation> {
        vec![WorkLocation::Hybrid, WorkLocation::Remote, WorkLocation::OnSite]
    }

    /// Comma separated codes, e.g. `3,2,1`
    pub fn join_codes(locations: &[WorkLocation]) -> String {
        locations.iter().map(|wl| wl.code()).collect::<Vec<_>>().join(",")
    }
}

impl fmt::Display for WorkLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for WorkLocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WorkLocation::from_key(s)
            .ok_or_else(|| format!("unknown work location '{}' (expected on-site, remote or hybrid)", s))
    }
}

/// Parameters of one job search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub keywords: String,
    pub n_days: u32,
    pub location: String,
    pub geo_id: String,
    pub work_locations: Vec<WorkLocation>,
    /// `None` means "as many as the search reports"
    pub max_jobs: Option<usize>,
}

impl SearchQuery {
    pub fn seconds(&self) -> u64 {
        u64::from(self.n_days) * 3600 * 24
    }

    pub fn work_location_codes(&self) -> String {
        WorkLocation::join_codes(&self.work_locations)
    }

    pub fn params(&self) -> SearchParams<'_> {
        SearchParams {
            keywords: &self.keywords,
            f_tpr: format!("r{}", self.seconds()),
            location: &self.location,
            geo_id: &self.geo_id,
            f_wt: self.work_location_codes(),
            start: None,
        }
    }
}

/// Query string of the search endpoints, serialized with `serde_urlencoded`
#[derive(Debug, Serialize)]
pub struct SearchParams<'a> {
    pub keywords: &'a str,
    #[serde(rename = "f_TPR")]
    pub f_tpr: String,
    pub location: &'a str,
    #[serde(rename = "geoId")]
    pub geo_id: &'a str,
    #[serde(rename = "f_WT")]
    pub f_wt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,
}

impl<'a> SearchParams<'a> {
    pub fn with_start(self, start: usize) -> Self {
        Self {
            start: Some(start),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn query() -> SearchQuery {
        SearchQuery {
            keywords: "python".to_string(),
            n_days: 2,
            location: "Nederland".to_string(),
            geo_id: "102890719".to_string(),
            work_locations: vec![WorkLocation::Hybrid, WorkLocation::Remote],
            max_jobs: None,
        }
    }

    #[test]
    fn work_location_codes_are_joined_in_order() {
        assert_eq!(query().work_location_codes(), "3,2");
    }

    #[test]
    fn days_convert_to_seconds() {
        assert_eq!(query().seconds(), 172_800);
    }

    #[test]
    fn params_encode_linkedin_names() {
        let encoded = serde_urlencoded::to_string(query().params().with_start(20)).unwrap();
        assert_eq!(
            encoded,
            "keywords=python&f_TPR=r172800&location=Nederland&geoId=102890719&f_WT=3%2C2&start=20"
        );
    }

    #[test]
    fn work_location_parses_keys_and_codes() {
        assert_eq!("Remote".parse::<WorkLocation>(), Ok(WorkLocation::Remote));
        assert_eq!("1".parse::<WorkLocation>(), Ok(WorkLocation::OnSite));
        assert!("moon".parse::<WorkLocation>().is_err());
    }
}
