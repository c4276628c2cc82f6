pub mod card;
pub mod count;

pub use card::*;
pub use count::*;

use html_escape::decode_html_entities;
use scraper::{ElementRef, Selector};

/// Clean and normalize text by removing extra whitespace and decoding HTML entities
pub fn clean_text(text: &str) -> String {
    let decoded = decode_html_entities(text);
    decoded
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Cleaned text of the first element under `element` matching `selector`
pub fn first_text(element: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .next()
        .map(|el| clean_text(&el.text().collect::<String>()))
        .filter(|text| !text.is_empty())
}
