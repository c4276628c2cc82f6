use once_cell::sync::Lazy;
use regex::Regex;

static COUNT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d[\d,.]*")
        .expect("Invalid job count regex")
});

/// Parse the result count shown on the search page, e.g. `"1,234+"` or `" 87 "`
pub fn parse_job_count(text: &str) -> Option<usize> {
    let matched = COUNT_REGEX.find(text)?;
    matched
        .as_str()
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect::<String>()
        .parse()
        .ok()
}

/// Number of pages needed to cover `n` items at `per_page` items per page
pub fn page_count(n: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    n.div_ceil(per_page)
}
