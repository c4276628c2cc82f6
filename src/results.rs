use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::debug;

use crate::filters::FilterRules;
use crate::models::Listing;

/// Ordered listings, at most one per URL.
///
/// The first listing seen for a URL wins; later ones are dropped.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ResultSet {
    listings: Vec<Listing>,
    #[serde(skip)]
    seen_urls: HashSet<String>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when a listing with the same URL is already present
    pub fn insert(&mut self, listing: Listing) -> bool {
        if self.seen_urls.contains(&listing.url) {
            debug!("Dropping duplicate listing {}", listing.url);
            return false;
        }
        self.seen_urls.insert(listing.url.clone());
        self.listings.push(listing);
        true
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Listing> {
        self.listings.iter()
    }

    pub fn as_slice(&self) -> &[Listing] {
        &self.listings
    }

    pub fn contains_url(&self, url: &str) -> bool {
        self.seen_urls.contains(url)
    }

    /// Keep only listings for which `keep` returns true; returns how many were removed
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&Listing) -> bool,
    {
        let before = self.listings.len();
        self.listings.retain(|listing| keep(listing));
        self.seen_urls = self.listings.iter().map(|listing| listing.url.clone()).collect();
        before - self.listings.len()
    }

    /// Stable sort, so equal listings keep their scrape order
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&Listing, &Listing) -> Ordering,
    {
        self.listings.sort_by(compare);
    }

    /// New set holding the listings that pass `rules`, order preserved
    pub fn filtered(&self, rules: &FilterRules) -> ResultSet {
        self.iter().filter(|listing| rules.passes(listing)).cloned().collect()
    }
}

impl FromIterator<Listing> for ResultSet {
    fn from_iter<T: IntoIterator<Item = Listing>>(iter: T) -> Self {
        let mut set = ResultSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<Listing> for ResultSet {
    fn extend<T: IntoIterator<Item = Listing>>(&mut self, iter: T) {
        for listing in iter {
            self.insert(listing);
        }
    }
}

impl IntoIterator for ResultSet {
    type Item = Listing;
    type IntoIter = std::vec::IntoIter<Listing>;

    fn into_iter(self) -> Self::IntoIter {
        self.listings.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Listing;
    type IntoIter = std::slice::Iter<'a, Listing>;

    fn into_iter(self) -> Self::IntoIter {
        self.listings.iter()
    }
}
