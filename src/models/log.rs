use serde::{Deserialize, Serialize};

/// A journal entry. Append-only: entries are never edited or deleted
/// once saved (the "clear" action only resets the input form).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// User-editable date string; ordering relies on zero-padded
    /// `YYYY-MM-DD` comparing lexicographically.
    pub date: String,
    pub text: String,
    pub score: Option<u8>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// The earlier structured journal shape, kept only so `Store::migrate`
/// can fold old entries into the canonical single-text form.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyLogEntry {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub learning: String,
    #[serde(default)]
    pub feeling: String,
}

impl LegacyLogEntry {
    /// Collapse the structured fields into one text line, skipping
    /// whichever parts are empty.
    pub fn into_entry(self) -> LogEntry {
        let parts: Vec<&str> = [&self.title, &self.learning, &self.feeling]
            .into_iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();
        LogEntry {
            date: self.date,
            text: parts.join(" / "),
            score: None,
            tags: Vec::new(),
        }
    }
}

/// Clamp raw score input to the closed range [0, 5]. Out-of-range
/// values clamp rather than reject.
pub fn clamp_score(raw: i64) -> u8 {
    raw.clamp(0, 5) as u8
}
