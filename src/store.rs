//! Persistent store: named JSON documents on disk.
//!
//! Each key maps to `<data_dir>/<key>.json`. Reads degrade to a
//! caller-supplied fallback on any failure; writes that fail are logged
//! and dropped, leaving the previous document untouched. There is no
//! transactionality and no embedded schema version - changing a shape
//! means a new key name plus an entry in [`Store::migrate`].

use std::path::PathBuf;

use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use crate::models::{LegacyLogEntry, LogEntry, Service};

/// Canonical storage keys.
pub const SERVICES_KEY: &str = "services_v2";
pub const BEST_KEY: &str = "best_by_category_v1";
pub const LOGS_KEY: &str = "logs_v2";

/// Legacy keys, readable only by `migrate`.
const LEGACY_SERVICES_KEY: &str = "services_v1";
const LEGACY_LOGS_KEY: &str = "logs_simple_v1";

pub struct Store {
    data_dir: PathBuf,
}

impl Store {
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    fn doc_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }

    /// Read a named document, returning `fallback` when the file is
    /// absent, unreadable, or fails to parse. Never errors.
    pub fn load<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        match self.try_load(key) {
            Ok(Some(value)) => value,
            Ok(None) => fallback,
            Err(e) => {
                warn!(key, error = %e, "Failed to load document, using fallback");
                fallback
            }
        }
    }

    fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.doc_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }

    /// Serialize and write a named document. On failure the write is
    /// logged and dropped - not retried, prior state untouched.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(e) = self.try_save(key, value) {
            warn!(key, error = %e, "Failed to save document, write dropped");
        }
    }

    fn try_save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let contents = serde_json::to_string_pretty(value)?;
        std::fs::write(self.doc_path(key), contents)?;
        Ok(())
    }

    fn has(&self, key: &str) -> bool {
        self.doc_path(key).exists()
    }

    /// One-shot upgrade from the legacy schema generation. Runs at
    /// startup before the first load; legacy files stay in place.
    ///
    /// - `services_v1` records share the canonical shape and carry over
    ///   as-is.
    /// - `logs_simple_v1` entries may be either the canonical
    ///   `{date, text, score}` shape or the structured
    ///   `{date, title, learning, feeling}` shape; both fold into the
    ///   canonical entry.
    pub fn migrate(&self) {
        if !self.has(SERVICES_KEY) && self.has(LEGACY_SERVICES_KEY) {
            match self.try_load::<Vec<Service>>(LEGACY_SERVICES_KEY) {
                Ok(Some(services)) => {
                    info!(count = services.len(), "Migrating legacy service list");
                    self.save(SERVICES_KEY, &services);
                }
                Ok(None) => {}
                Err(e) => warn!(error = %e, "Legacy service list unreadable, skipping migration"),
            }
        }

        if !self.has(LOGS_KEY) && self.has(LEGACY_LOGS_KEY) {
            match self.try_load::<Vec<serde_json::Value>>(LEGACY_LOGS_KEY) {
                Ok(Some(raw)) => {
                    let entries: Vec<LogEntry> = raw.into_iter().filter_map(migrate_log_value).collect();
                    info!(count = entries.len(), "Migrating legacy log entries");
                    self.save(LOGS_KEY, &entries);
                }
                Ok(None) => {}
                Err(e) => warn!(error = %e, "Legacy log unreadable, skipping migration"),
            }
        }

        debug!(dir = %self.data_dir.display(), "Store ready");
    }

    #[cfg(test)]
    pub fn data_dir(&self) -> &std::path::Path {
        &self.data_dir
    }
}

/// Interpret one legacy log value. Entries already in the canonical
/// shape pass through; structured entries are folded.
fn migrate_log_value(value: serde_json::Value) -> Option<LogEntry> {
    if let Ok(entry) = serde_json::from_value::<LogEntry>(value.clone()) {
        return Some(entry);
    }
    serde_json::from_value::<LegacyLogEntry>(value)
        .ok()
        .map(LegacyLogEntry::into_entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::seed_services;

    fn temp_store(tag: &str) -> Store {
        let dir = std::env::temp_dir().join(format!(
            "aicatchup-store-{}-{}",
            tag,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        Store::new(dir).unwrap()
    }

    #[test]
    fn test_round_trip() {
        let store = temp_store("roundtrip");
        let services = seed_services();
        store.save(SERVICES_KEY, &services);
        let loaded: Vec<Service> = store.load(SERVICES_KEY, Vec::new());
        assert_eq!(loaded.len(), services.len());
        assert_eq!(loaded[0].name, services[0].name);
    }

    #[test]
    fn test_load_missing_returns_fallback() {
        let store = temp_store("missing");
        let loaded: Vec<LogEntry> = store.load(LOGS_KEY, Vec::new());
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_load_corrupt_returns_fallback() {
        let store = temp_store("corrupt");
        std::fs::write(store.data_dir().join(format!("{}.json", LOGS_KEY)), "{not json").unwrap();
        let loaded: Vec<LogEntry> = store.load(LOGS_KEY, Vec::new());
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_migrate_services_from_legacy_key() {
        let store = temp_store("migrate-svc");
        let services = seed_services();
        store.save("services_v1", &services);
        store.migrate();
        let loaded: Vec<Service> = store.load(SERVICES_KEY, Vec::new());
        assert_eq!(loaded.len(), services.len());
    }

    #[test]
    fn test_migrate_does_not_overwrite_canonical() {
        let store = temp_store("migrate-noclobber");
        let canonical = vec![seed_services().remove(0)];
        store.save(SERVICES_KEY, &canonical);
        store.save("services_v1", &seed_services());
        store.migrate();
        let loaded: Vec<Service> = store.load(SERVICES_KEY, Vec::new());
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn test_migrate_structured_log_entries() {
        let store = temp_store("migrate-log");
        let legacy = serde_json::json!([
            { "date": "2025-09-01", "title": "Setup", "learning": "tokio basics", "feeling": "good" },
            { "date": "2025-09-02", "text": "already canonical", "score": 4 }
        ]);
        store.save("logs_simple_v1", &legacy);
        store.migrate();
        let loaded: Vec<LogEntry> = store.load(LOGS_KEY, Vec::new());
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].text, "Setup / tokio basics / good");
        assert_eq!(loaded[1].score, Some(4));
    }
}
