//! Data models for the tracker.
//!
//! - `Service`: a cataloged AI service with rating and category facets
//! - `BestByCategory`: user-curated "best service" per category
//! - `NewsItem`: compiled-in news feed entries
//! - `LogEntry`: append-only daily journal entries

pub mod log;
pub mod news;
pub mod service;

pub use log::{clamp_score, LegacyLogEntry, LogEntry};
pub use news::{static_news, NewsItem};
pub use service::{seed_services, BestByCategory, Service};
