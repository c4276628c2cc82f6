use chrono::NaiveDate;

/// Keep only the part before the first comma: `"Amsterdam, North Holland, Netherlands"` -> `"Amsterdam"`
pub fn city_from_location(location: &str) -> String {
    location.split(',').next().unwrap_or_default().trim().to_string()
}

/// Strip tracking parameters from a job link
pub fn strip_query(link: &str) -> String {
    link.split(['?', '#']).next().unwrap_or_default().to_string()
}

/// Parse the `datetime` attribute of a listing date (`2024-04-10`)
pub fn parse_posted_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn location_is_cut_at_first_comma() {
        assert_eq!(city_from_location("Amsterdam, North Holland, Netherlands"), "Amsterdam");
        assert_eq!(city_from_location("Netherlands"), "Netherlands");
    }

    #[test]
    fn link_loses_query_string() {
        assert_eq!(
            strip_query("https://nl.linkedin.com/jobs/view/dev-123?refId=abc&trk=x"),
            "https://nl.linkedin.com/jobs/view/dev-123"
        );
    }

    #[test]
    fn posted_date_parses_iso_days_only() {
        assert_eq!(parse_posted_date("2024-04-10"), NaiveDate::from_ymd_opt(2024, 4, 10));
        assert_eq!(parse_posted_date("yesterday"), None);
    }
}
