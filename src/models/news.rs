/// A news feed entry. The feed is compiled in and immutable at runtime;
/// it is never persisted and never user-editable.
#[derive(Debug, Clone)]
pub struct NewsItem {
    pub tag: &'static str,
    pub title: &'static str,
    pub source: &'static str,
    /// ISO-like date string, unvalidated
    pub date: &'static str,
    pub note: &'static str,
}

/// The static feed. A future revision could replace this with items
/// fetched from a remote feed endpoint; nothing else depends on the
/// feed being compiled in.
pub fn static_news() -> Vec<NewsItem> {
    vec![
        NewsItem {
            tag: "Model",
            title: "Major LLM vendors ship new models with better reasoning efficiency and multimodal performance",
            source: "Official Blogs",
            date: "2025-10-01",
            note: "Track OpenAI / Anthropic / Google movements.",
        },
        NewsItem {
            tag: "Safety",
            title: "AI safety framework discussions advance across jurisdictions as evaluation metrics take shape",
            source: "Policy Reports",
            date: "2025-09-15",
            note: "Relevant to long-term rulemaking.",
        },
        NewsItem {
            tag: "Biz",
            title: "Large SaaS platforms roll out AI agent features, pushing day-to-day automation into production",
            source: "Tech News",
            date: "2025-10-20",
            note: "Read with an eye on direct impact to daily work.",
        },
    ]
}

impl NewsItem {
    /// Concatenated lowercase text used by the news search filter.
    pub fn search_text(&self) -> String {
        format!("{} {} {} {}", self.tag, self.title, self.source, self.note).to_lowercase()
    }
}
