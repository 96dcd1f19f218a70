//! Pure visible-subset transforms.
//!
//! Everything here is data in, data out: the UI layer renders whatever
//! these functions return and never filters or sorts on its own, so the
//! selection logic stays testable without a terminal.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use crate::models::{BestByCategory, LogEntry, NewsItem, Service};

/// The three independent, composable service filter criteria.
#[derive(Debug, Clone, Default)]
pub struct ServiceFilter {
    /// Case-insensitive substring match over the record's searchable
    /// fields. Empty means no filter.
    pub query: String,
    /// Inclusive minimum rating; 0 disables the threshold.
    pub min_stars: u8,
    /// Single active category facet; the record's category list must
    /// contain it.
    pub category: Option<String>,
}

/// Compute the visible subset: stable sort descending by stars (equal
/// ratings keep their source order), then apply each criterion.
pub fn visible_services<'a>(services: &'a [Service], filter: &ServiceFilter) -> Vec<&'a Service> {
    let query = filter.query.trim().to_lowercase();

    let mut sorted: Vec<&Service> = services.iter().collect();
    sorted.sort_by_key(|s| Reverse(s.stars));

    sorted.retain(|s| {
        if filter.min_stars > 0 && s.stars < filter.min_stars {
            return false;
        }
        if let Some(ref cat) = filter.category {
            if !s.categories.iter().any(|c| c == cat) {
                return false;
            }
        }
        if query.is_empty() {
            return true;
        }
        s.search_text().contains(&query)
    });

    sorted
}

/// Union of all categories across the collection, deduplicated and
/// sorted lexicographically. Derived fresh each render so newly added
/// categories show up automatically.
pub fn all_categories(services: &[Service]) -> Vec<String> {
    let set: BTreeSet<&str> = services
        .iter()
        .flat_map(|s| s.categories.iter())
        .map(|c| c.as_str())
        .collect();
    set.into_iter().map(str::to_string).collect()
}

/// News entries matching the free-text query.
pub fn visible_news<'a>(news: &'a [NewsItem], query: &str) -> Vec<&'a NewsItem> {
    let query = query.trim().to_lowercase();
    news.iter()
        .filter(|n| query.is_empty() || n.search_text().contains(&query))
        .collect()
}

/// Log entries in descending lexicographic date order. Stable, so
/// entries sharing a date keep their append order. Only zero-padded
/// ISO dates sort chronologically; no date parsing happens here.
pub fn sorted_logs(logs: &[LogEntry]) -> Vec<&LogEntry> {
    let mut sorted: Vec<&LogEntry> = logs.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// A service is "currently best" if its name appears anywhere in the
/// mapping's values - best for at least one category. Reverse lookup,
/// recomputed per render rather than cached.
pub fn is_best_for_any(best: &BestByCategory, name: &str) -> bool {
    best.values().any(|n| n == name)
}
