use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Category name -> service name. One winner per category; setting a new
/// best for a category overwrites the previous one. Values may reference
/// a service name that is no longer in the list (never validated).
pub type BestByCategory = BTreeMap<String, String>;

/// A tracked AI service. `name` is the conventional unique key; records
/// are only ever appended, never edited in place or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub categories: Vec<String>,
    /// Free-text status, no enum enforced ("in use", "watching", ...)
    #[serde(default)]
    pub status: String,
    /// Rating 0-5
    #[serde(default)]
    pub stars: u8,
    pub url: Option<String>,
    pub note: Option<String>,
}

impl Service {
    /// Concatenated lowercase text used by the free-text search filter.
    pub fn search_text(&self) -> String {
        let mut text = String::new();
        text.push_str(&self.name);
        text.push(' ');
        text.push_str(&self.provider);
        text.push(' ');
        text.push_str(&self.categories.join(" "));
        text.push(' ');
        text.push_str(&self.status);
        if let Some(ref note) = self.note {
            text.push(' ');
            text.push_str(note);
        }
        text.to_lowercase()
    }

    pub fn stars_display(&self) -> String {
        "★".repeat(self.stars as usize)
    }
}

/// Default catalog installed on first run (or when the stored list is
/// empty or unreadable).
pub fn seed_services() -> Vec<Service> {
    vec![
        Service {
            name: "ChatGPT".to_string(),
            provider: "OpenAI".to_string(),
            categories: vec![
                "LLM".to_string(),
                "Assistant".to_string(),
                "Dev Platform".to_string(),
            ],
            status: "in use".to_string(),
            stars: 5,
            url: Some("https://chatgpt.com".to_string()),
            note: Some("Core LLM; hub for apps and agent integrations.".to_string()),
        },
        Service {
            name: "Claude".to_string(),
            provider: "Anthropic".to_string(),
            categories: vec!["LLM".to_string(), "Assistant".to_string()],
            status: "watching".to_string(),
            stars: 4,
            url: Some("https://claude.ai".to_string()),
            note: Some("Comparison point for safety and long-context work.".to_string()),
        },
        Service {
            name: "Gemini".to_string(),
            provider: "Google".to_string(),
            categories: vec!["LLM".to_string(), "Search".to_string()],
            status: "watching".to_string(),
            stars: 4,
            url: Some("https://gemini.google.com".to_string()),
            note: Some("Baseline for Google service integration.".to_string()),
        },
        Service {
            name: "DALL-E".to_string(),
            provider: "OpenAI".to_string(),
            categories: vec!["Image".to_string()],
            status: "in use".to_string(),
            stars: 4,
            url: Some("https://openai.com".to_string()),
            note: Some("Image generation baseline.".to_string()),
        },
        Service {
            name: "Suno".to_string(),
            provider: "Suno".to_string(),
            categories: vec!["Music/Audio".to_string()],
            status: "in use".to_string(),
            stars: 4,
            url: Some("https://suno.com".to_string()),
            note: Some("Representative of the AI music space.".to_string()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_text_includes_all_fields() {
        let svc = Service {
            name: "ChatGPT".to_string(),
            provider: "OpenAI".to_string(),
            categories: vec!["LLM".to_string(), "Assistant".to_string()],
            status: "in use".to_string(),
            stars: 5,
            url: None,
            note: Some("Core LLM".to_string()),
        };
        let text = svc.search_text();
        assert!(text.contains("chatgpt"));
        assert!(text.contains("openai"));
        assert!(text.contains("assistant"));
        assert!(text.contains("in use"));
        assert!(text.contains("core llm"));
    }

    #[test]
    fn test_seed_services_have_unique_names() {
        let seeds = seed_services();
        let mut names: Vec<&str> = seeds.iter().map(|s| s.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), seeds.len());
    }

    #[test]
    fn test_service_deserializes_with_missing_optionals() {
        let svc: Service = serde_json::from_str(r#"{"name": "Mystery"}"#).unwrap();
        assert_eq!(svc.name, "Mystery");
        assert_eq!(svc.stars, 0);
        assert!(svc.categories.is_empty());
        assert!(svc.url.is_none());
    }
}
