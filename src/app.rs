//! Application state management.
//!
//! The `App` struct owns all state explicitly - the stored collections,
//! the filter inputs, the overlay forms, and the asset-cache background
//! channel - and is constructed once per run. Render and input code
//! receive it by reference; nothing lives in module-level globals.

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::assets::AssetCache;
use crate::config::Config;
use crate::filter::{self, ServiceFilter};
use crate::models::{
    clamp_score, seed_services, static_news, BestByCategory, LogEntry, NewsItem, Service,
};
use crate::store::{Store, BEST_KEY, LOGS_KEY, SERVICES_KEY};
use crate::utils::today_string;

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the asset-cache event channel. Install and activate
/// report once each; 8 leaves headroom.
const CHANNEL_BUFFER_SIZE: usize = 8;

/// Maximum length for any single text input field.
const MAX_INPUT_LENGTH: usize = 200;

/// Rating ceiling shared by service stars and log scores.
pub const MAX_STARS: u8 = 5;

// ============================================================================
// UI State Types
// ============================================================================

/// Main navigation tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Services,
    News,
    Log,
}

impl Tab {
    /// Get the display title for this tab.
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Services => "Services",
            Tab::News => "News",
            Tab::Log => "Log",
        }
    }

    /// Get the next tab (wrapping around)
    pub fn next(&self) -> Self {
        match self {
            Tab::Services => Tab::News,
            Tab::News => Tab::Log,
            Tab::Log => Tab::Services,
        }
    }

    /// Get the previous tab (wrapping around)
    pub fn prev(&self) -> Self {
        match self {
            Tab::Services => Tab::Log,
            Tab::News => Tab::Services,
            Tab::Log => Tab::News,
        }
    }
}

/// Current UI focus area on the Services tab (list panel or detail panel)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Detail,
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    Searching,
    AddingService,
    AddingLog,
    ShowingHelp,
    ConfirmingQuit,
    Quitting,
}

/// Add-service form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceField {
    Name,
    Provider,
    Categories,
    Status,
    Stars,
    Url,
    Note,
}

impl ServiceField {
    pub fn next(&self) -> Self {
        match self {
            ServiceField::Name => ServiceField::Provider,
            ServiceField::Provider => ServiceField::Categories,
            ServiceField::Categories => ServiceField::Status,
            ServiceField::Status => ServiceField::Stars,
            ServiceField::Stars => ServiceField::Url,
            ServiceField::Url => ServiceField::Note,
            ServiceField::Note => ServiceField::Name,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            ServiceField::Name => ServiceField::Note,
            ServiceField::Provider => ServiceField::Name,
            ServiceField::Categories => ServiceField::Provider,
            ServiceField::Status => ServiceField::Categories,
            ServiceField::Stars => ServiceField::Status,
            ServiceField::Url => ServiceField::Stars,
            ServiceField::Note => ServiceField::Url,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ServiceField::Name => "Name",
            ServiceField::Provider => "Provider",
            ServiceField::Categories => "Categories",
            ServiceField::Status => "Status",
            ServiceField::Stars => "Stars",
            ServiceField::Url => "URL",
            ServiceField::Note => "Note",
        }
    }
}

impl Default for ServiceField {
    fn default() -> Self {
        ServiceField::Name
    }
}

/// Add-service overlay form. Categories are comma-separated in the
/// input and split on save.
#[derive(Debug, Default)]
pub struct ServiceForm {
    pub name: String,
    pub provider: String,
    pub categories: String,
    pub status: String,
    pub stars: String,
    pub url: String,
    pub note: String,
    pub focus: ServiceField,
}

impl ServiceForm {
    pub fn field_mut(&mut self, field: ServiceField) -> &mut String {
        match field {
            ServiceField::Name => &mut self.name,
            ServiceField::Provider => &mut self.provider,
            ServiceField::Categories => &mut self.categories,
            ServiceField::Status => &mut self.status,
            ServiceField::Stars => &mut self.stars,
            ServiceField::Url => &mut self.url,
            ServiceField::Note => &mut self.note,
        }
    }

    pub fn field(&self, field: ServiceField) -> &str {
        match field {
            ServiceField::Name => &self.name,
            ServiceField::Provider => &self.provider,
            ServiceField::Categories => &self.categories,
            ServiceField::Status => &self.status,
            ServiceField::Stars => &self.stars,
            ServiceField::Url => &self.url,
            ServiceField::Note => &self.note,
        }
    }

    /// Build a record from the form. Name is required; an empty name
    /// yields `None` and the save is a silent no-op.
    pub fn build(&self) -> Option<Service> {
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }
        let categories: Vec<String> = self
            .categories
            .split(',')
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        let status = match self.status.trim() {
            "" => "noted".to_string(),
            s => s.to_string(),
        };
        let stars = self
            .stars
            .trim()
            .parse::<i64>()
            .map(|n| n.clamp(0, MAX_STARS as i64) as u8)
            .unwrap_or(0);
        let url = match self.url.trim() {
            "" => None,
            u => Some(u.to_string()),
        };
        let note = match self.note.trim() {
            "" => None,
            n => Some(n.to_string()),
        };
        Some(Service {
            name: name.to_string(),
            provider: self.provider.trim().to_string(),
            categories,
            status,
            stars,
            url,
            note,
        })
    }
}

/// Log-entry form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogField {
    Date,
    Text,
    Score,
}

impl LogField {
    pub fn next(&self) -> Self {
        match self {
            LogField::Date => LogField::Text,
            LogField::Text => LogField::Score,
            LogField::Score => LogField::Date,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LogField::Date => "Date",
            LogField::Text => "Text",
            LogField::Score => "Score",
        }
    }
}

/// Log overlay form. The date defaults to today and survives a save;
/// text and score are cleared after each append.
#[derive(Debug)]
pub struct LogForm {
    pub date: String,
    pub text: String,
    pub score: String,
    pub focus: LogField,
}

impl LogForm {
    pub fn new() -> Self {
        Self {
            date: today_string(),
            text: String::new(),
            score: String::new(),
            focus: LogField::Text,
        }
    }

    pub fn field_mut(&mut self, field: LogField) -> &mut String {
        match field {
            LogField::Date => &mut self.date,
            LogField::Text => &mut self.text,
            LogField::Score => &mut self.score,
        }
    }

    /// Reset text and score only; the "clear" control never touches
    /// stored history or the date.
    pub fn clear_inputs(&mut self) {
        self.text.clear();
        self.score.clear();
    }
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Events from the asset-cache background task.
#[derive(Debug)]
pub enum AssetEvent {
    /// Install and activate both completed
    Installed { assets: usize, evicted: usize },
    /// Install failed; no usable offline copy was produced
    InstallFailed(String),
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    // Core services
    pub config: Config,
    pub store: Store,

    // UI state
    pub state: AppState,
    pub current_tab: Tab,
    pub focus: Focus,
    pub search_query: String,
    pub min_stars: u8,
    pub active_category: Option<String>,

    // Selection indices
    pub service_selection: usize,
    pub news_selection: usize,
    pub log_selection: usize,

    // Stored collections
    pub services: Vec<Service>,
    pub best_by_category: BestByCategory,
    pub logs: Vec<LogEntry>,
    pub news: Vec<NewsItem>,

    // Overlay forms
    pub service_form: ServiceForm,
    pub log_form: LogForm,

    // Asset cache background channel
    asset_rx: mpsc::Receiver<AssetEvent>,
    asset_tx: mpsc::Sender<AssetEvent>,

    // Status message for the status bar
    pub status_message: Option<String>,
    pub offline_ready: bool,
}

impl App {
    /// Create the application: open the store, run the legacy-key
    /// migration, and load (seeding the service list on first run).
    pub fn new(config: Config) -> Result<Self> {
        let data_dir = config.data_dir()?;
        debug!(?data_dir, "Data directory configured");

        let store = Store::new(data_dir)?;
        store.migrate();

        let mut services: Vec<Service> = store.load(SERVICES_KEY, Vec::new());
        if services.is_empty() {
            info!("No stored services, installing seed catalog");
            services = seed_services();
            store.save(SERVICES_KEY, &services);
        }

        let best_by_category: BestByCategory = store.load(BEST_KEY, BestByCategory::new());
        let logs: Vec<LogEntry> = store.load(LOGS_KEY, Vec::new());

        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        Ok(Self {
            config,
            store,

            state: AppState::Normal,
            current_tab: Tab::Services,
            focus: Focus::List,
            search_query: String::new(),
            min_stars: 0,
            active_category: None,

            service_selection: 0,
            news_selection: 0,
            log_selection: 0,

            services,
            best_by_category,
            logs,
            news: static_news(),

            service_form: ServiceForm::default(),
            log_form: LogForm::new(),

            asset_rx: rx,
            asset_tx: tx,

            status_message: None,
            offline_ready: false,
        })
    }

    // =========================================================================
    // Offline Asset Cache
    // =========================================================================

    /// Kick off the background install/activate cycle. Does nothing
    /// when no asset base URL is configured. The tab controllers never
    /// wait on this; results arrive through the event channel.
    pub fn start_asset_refresh(&mut self) {
        let base_url = match self.config.asset_base_url() {
            Some(url) => url,
            None => {
                debug!("No asset base URL configured, offline cache disabled");
                return;
            }
        };
        let cache_root = match self.config.cache_dir() {
            Ok(dir) => dir,
            Err(e) => {
                warn!(error = %e, "No cache directory, offline cache disabled");
                return;
            }
        };

        // An earlier install keeps serving while this one runs
        let cache = match AssetCache::new(cache_root, &base_url) {
            Ok(cache) => cache,
            Err(e) => {
                warn!(error = %e, "Asset cache setup failed");
                return;
            }
        };
        self.offline_ready = cache.is_installed();

        let tx = self.asset_tx.clone();
        tokio::spawn(async move {
            let event = match cache.install().await {
                Ok(assets) => {
                    let evicted = match cache.activate() {
                        Ok(n) => n,
                        Err(e) => {
                            warn!(error = %e, "Asset bucket eviction failed");
                            0
                        }
                    };
                    AssetEvent::Installed { assets, evicted }
                }
                Err(e) => AssetEvent::InstallFailed(e.to_string()),
            };
            if tx.send(event).await.is_err() {
                warn!("Asset event channel closed");
            }
        });
    }

    /// Drain pending asset-cache events and fold them into the status
    /// bar state. Called from the main loop every tick.
    pub fn check_background_tasks(&mut self) {
        while let Ok(event) = self.asset_rx.try_recv() {
            match event {
                AssetEvent::Installed { assets, evicted } => {
                    info!(assets, evicted, "Offline asset copy refreshed");
                    self.offline_ready = true;
                    self.status_message = Some(format!("Offline copy ready ({} assets)", assets));
                }
                AssetEvent::InstallFailed(msg) => {
                    warn!(error = %msg, "Asset install failed");
                    // A pre-existing bucket keeps serving; only flag
                    // when there is no usable copy at all
                    if !self.offline_ready {
                        self.status_message = Some("No offline copy (install failed)".to_string());
                    }
                }
            }
        }
    }

    // =========================================================================
    // Filtering
    // =========================================================================

    /// The active filter criteria for the Services tab.
    pub fn service_filter(&self) -> ServiceFilter {
        ServiceFilter {
            query: self.search_query.clone(),
            min_stars: self.min_stars,
            category: self.active_category.clone(),
        }
    }

    /// Visible service records, rating-descending.
    pub fn visible_services(&self) -> Vec<&Service> {
        filter::visible_services(&self.services, &self.service_filter())
    }

    /// Category facets derived fresh from the current collection.
    pub fn categories(&self) -> Vec<String> {
        filter::all_categories(&self.services)
    }

    pub fn visible_news(&self) -> Vec<&NewsItem> {
        filter::visible_news(&self.news, &self.search_query)
    }

    pub fn sorted_logs(&self) -> Vec<&LogEntry> {
        filter::sorted_logs(&self.logs)
    }

    pub fn service_is_best(&self, name: &str) -> bool {
        filter::is_best_for_any(&self.best_by_category, name)
    }

    /// Category/winner pairs for the best-by-category summary line,
    /// sorted by category.
    pub fn best_summary(&self) -> Vec<(&str, &str)> {
        self.best_by_category
            .iter()
            .map(|(category, name)| (category.as_str(), name.as_str()))
            .collect()
    }

    /// Cycle the active category facet: all -> first -> ... -> last ->
    /// all. Selecting the same facet again via the cycle clears it,
    /// matching single-select toggle behavior.
    pub fn cycle_category(&mut self) {
        let categories = self.categories();
        self.active_category = match &self.active_category {
            None => categories.first().cloned(),
            Some(current) => match categories.iter().position(|c| c == current) {
                Some(idx) => categories.get(idx + 1).cloned(),
                // Facet vanished from the collection
                None => None,
            },
        };
        self.service_selection = 0;
    }

    pub fn clear_category(&mut self) {
        self.active_category = None;
        self.service_selection = 0;
    }

    pub fn raise_min_stars(&mut self) {
        if self.min_stars < MAX_STARS {
            self.min_stars += 1;
            self.service_selection = 0;
        }
    }

    pub fn lower_min_stars(&mut self) {
        if self.min_stars > 0 {
            self.min_stars -= 1;
            self.service_selection = 0;
        }
    }

    // =========================================================================
    // Best-Service Marking
    // =========================================================================

    /// Mark a service best for every category it carries: each of its
    /// categories maps to its name, silently overwriting any previous
    /// winner, then the mapping is persisted. Last write wins; no
    /// confirmation, no undo.
    pub fn set_best_for_categories(&mut self, service: &Service) {
        for category in &service.categories {
            if category.is_empty() {
                continue;
            }
            self.best_by_category
                .insert(category.clone(), service.name.clone());
        }
        self.store.save(BEST_KEY, &self.best_by_category);
    }

    /// Mark the currently selected visible service.
    pub fn set_best_for_selected(&mut self) {
        let selected = self
            .visible_services()
            .get(self.service_selection)
            .map(|s| (*s).clone());
        if let Some(service) = selected {
            self.set_best_for_categories(&service);
            self.status_message = Some(format!(
                "{} marked best for {} categor{}",
                service.name,
                service.categories.len(),
                if service.categories.len() == 1 { "y" } else { "ies" }
            ));
        }
    }

    // =========================================================================
    // Record Append
    // =========================================================================

    /// Append the add-form record. Returns false (and leaves the form
    /// open) when the required name is missing; the failed save shows
    /// no error, matching the silent-no-op input policy.
    pub fn submit_service_form(&mut self) -> bool {
        let service = match self.service_form.build() {
            Some(service) => service,
            None => return false,
        };
        let name = service.name.clone();
        self.services.push(service);
        self.store.save(SERVICES_KEY, &self.services);
        self.service_form = ServiceForm::default();
        self.status_message = Some(format!("Added {}", name));
        true
    }

    /// Append a log entry. Empty text is a silent no-op; the score is
    /// clamped to [0, 5]; the stored list is persisted in full and the
    /// text/score inputs cleared (date kept for the next entry).
    pub fn submit_log_form(&mut self) -> bool {
        let text = self.log_form.text.trim().to_string();
        if text.is_empty() {
            return false;
        }
        let score = self
            .log_form
            .score
            .trim()
            .parse::<i64>()
            .ok()
            .map(clamp_score);
        self.logs.push(LogEntry {
            date: self.log_form.date.trim().to_string(),
            text,
            score,
            tags: Vec::new(),
        });
        self.store.save(LOGS_KEY, &self.logs);
        self.log_form.clear_inputs();
        true
    }

    // =========================================================================
    // Selection Movement
    // =========================================================================

    fn visible_len(&self) -> usize {
        match self.current_tab {
            Tab::Services => self.visible_services().len(),
            Tab::News => self.visible_news().len(),
            Tab::Log => self.logs.len(),
        }
    }

    fn selection_mut(&mut self) -> &mut usize {
        match self.current_tab {
            Tab::Services => &mut self.service_selection,
            Tab::News => &mut self.news_selection,
            Tab::Log => &mut self.log_selection,
        }
    }

    pub fn select_next(&mut self) {
        let len = self.visible_len();
        let sel = self.selection_mut();
        if len > 0 && *sel + 1 < len {
            *sel += 1;
        }
    }

    pub fn select_prev(&mut self) {
        let sel = self.selection_mut();
        *sel = sel.saturating_sub(1);
    }

    /// Clamp the selection after the visible set shrinks.
    pub fn clamp_selection(&mut self) {
        let len = self.visible_len();
        let sel = self.selection_mut();
        if len == 0 {
            *sel = 0;
        } else if *sel >= len {
            *sel = len - 1;
        }
    }
}

// ============================================================================
// Input validation helpers (exported for use in input.rs)
// ============================================================================

/// Check if a character is accepted into a text field (no control
/// characters, capped length).
pub fn can_add_input_char(current_len: usize, c: char) -> bool {
    current_len < MAX_INPUT_LENGTH && !c.is_control()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_app(tag: &str) -> App {
        let dir = std::env::temp_dir().join(format!("aicatchup-app-{}-{}", tag, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let config = Config {
            asset_base_url: None,
            data_dir: Some(dir.clone()),
            cache_dir: Some(dir.join("cache")),
        };
        App::new(config).unwrap()
    }

    fn service(name: &str, categories: &[&str]) -> Service {
        Service {
            name: name.to_string(),
            provider: String::new(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            status: "noted".to_string(),
            stars: 3,
            url: None,
            note: None,
        }
    }

    #[test]
    fn test_first_run_seeds_and_persists() {
        let app = temp_app("seed");
        assert_eq!(app.services.len(), 5);
        // Seed set was written through the store
        let reloaded: Vec<Service> = app.store.load(SERVICES_KEY, Vec::new());
        assert_eq!(reloaded.len(), 5);
    }

    #[test]
    fn test_set_best_marks_every_category() {
        let mut app = temp_app("best");
        app.set_best_for_categories(&service("Atlas", &["X", "Y"]));
        assert_eq!(app.best_by_category.get("X").map(String::as_str), Some("Atlas"));
        assert_eq!(app.best_by_category.get("Y").map(String::as_str), Some("Atlas"));
    }

    #[test]
    fn test_set_best_overwrites_shared_category_only() {
        let mut app = temp_app("best-overwrite");
        app.set_best_for_categories(&service("Atlas", &["X", "Y"]));
        app.set_best_for_categories(&service("Borealis", &["X"]));
        assert_eq!(app.best_by_category.get("X").map(String::as_str), Some("Borealis"));
        assert_eq!(app.best_by_category.get("Y").map(String::as_str), Some("Atlas"));
        assert!(app.service_is_best("Atlas"));
        assert!(app.service_is_best("Borealis"));
    }

    #[test]
    fn test_best_mapping_is_persisted() {
        let mut app = temp_app("best-persist");
        app.set_best_for_categories(&service("Atlas", &["X"]));
        let reloaded: BestByCategory = app.store.load(BEST_KEY, BestByCategory::new());
        assert_eq!(reloaded.get("X").map(String::as_str), Some("Atlas"));
    }

    #[test]
    fn test_best_summary_lists_category_winner_pairs() {
        let mut app = temp_app("best-summary");
        assert!(app.best_summary().is_empty());

        app.set_best_for_categories(&service("Atlas", &["Y", "X"]));
        app.set_best_for_categories(&service("Borealis", &["X"]));

        // Sorted by category, one winner each
        assert_eq!(app.best_summary(), vec![("X", "Borealis"), ("Y", "Atlas")]);
    }

    #[test]
    fn test_check_background_tasks_drains_events() {
        let mut app = temp_app("bg-events");
        app.asset_tx
            .try_send(AssetEvent::Installed { assets: 8, evicted: 1 })
            .unwrap();
        app.check_background_tasks();
        assert!(app.offline_ready);
        assert_eq!(app.status_message.as_deref(), Some("Offline copy ready (8 assets)"));

        // A failed install does not retract a usable copy
        app.asset_tx
            .try_send(AssetEvent::InstallFailed("timeout".to_string()))
            .unwrap();
        app.check_background_tasks();
        assert!(app.offline_ready);
        assert_eq!(app.status_message.as_deref(), Some("Offline copy ready (8 assets)"));
    }

    #[test]
    fn test_submit_service_form_requires_name() {
        let mut app = temp_app("form-noname");
        let before = app.services.len();
        app.service_form.provider = "Someone".to_string();
        assert!(!app.submit_service_form());
        assert_eq!(app.services.len(), before);
    }

    #[test]
    fn test_submit_service_form_appends_and_persists() {
        let mut app = temp_app("form-ok");
        let before = app.services.len();
        app.service_form.name = "Newcomer".to_string();
        app.service_form.categories = "Video, , Agents".to_string();
        app.service_form.stars = "7".to_string();
        assert!(app.submit_service_form());
        assert_eq!(app.services.len(), before + 1);

        let added = app.services.last().unwrap();
        assert_eq!(added.categories, vec!["Video", "Agents"]);
        assert_eq!(added.stars, 5); // clamped
        assert_eq!(added.status, "noted"); // default when left blank

        let reloaded: Vec<Service> = app.store.load(SERVICES_KEY, Vec::new());
        assert_eq!(reloaded.len(), before + 1);
    }

    #[test]
    fn test_submit_log_clamps_score() {
        let mut app = temp_app("log-clamp");
        for (input, expected) in [("-3", 0u8), ("9", 5), ("3", 3)] {
            app.log_form.text = "entry".to_string();
            app.log_form.score = input.to_string();
            assert!(app.submit_log_form());
            assert_eq!(app.logs.last().unwrap().score, Some(expected));
        }
    }

    #[test]
    fn test_submit_log_empty_text_is_noop() {
        let mut app = temp_app("log-noop");
        app.log_form.date = String::new();
        app.log_form.text = "   ".to_string();
        app.log_form.score = String::new();
        assert!(!app.submit_log_form());
        assert!(app.logs.is_empty());
        let reloaded: Vec<LogEntry> = app.store.load(LOGS_KEY, Vec::new());
        assert!(reloaded.is_empty());
    }

    #[test]
    fn test_submit_log_clears_inputs_keeps_date() {
        let mut app = temp_app("log-clear");
        app.log_form.date = "2025-10-01".to_string();
        app.log_form.text = "shipped the thing".to_string();
        app.log_form.score = "4".to_string();
        assert!(app.submit_log_form());
        assert!(app.log_form.text.is_empty());
        assert!(app.log_form.score.is_empty());
        assert_eq!(app.log_form.date, "2025-10-01");
    }

    #[test]
    fn test_non_numeric_score_stores_none() {
        let mut app = temp_app("log-nan");
        app.log_form.text = "entry".to_string();
        app.log_form.score = "great".to_string();
        assert!(app.submit_log_form());
        assert_eq!(app.logs.last().unwrap().score, None);
    }

    #[test]
    fn test_cycle_category_wraps_through_all() {
        let mut app = temp_app("cycle");
        let categories = app.categories();
        assert!(!categories.is_empty());

        assert!(app.active_category.is_none());
        for expected in &categories {
            app.cycle_category();
            assert_eq!(app.active_category.as_ref(), Some(expected));
        }
        app.cycle_category();
        assert!(app.active_category.is_none());
    }

    #[test]
    fn test_min_stars_bounds() {
        let mut app = temp_app("stars");
        for _ in 0..10 {
            app.raise_min_stars();
        }
        assert_eq!(app.min_stars, MAX_STARS);
        for _ in 0..10 {
            app.lower_min_stars();
        }
        assert_eq!(app.min_stars, 0);
    }

    #[test]
    fn test_selection_clamps_to_visible() {
        let mut app = temp_app("clamp");
        app.service_selection = 100;
        app.clamp_selection();
        assert!(app.service_selection < app.visible_services().len());

        app.search_query = "zzz-no-match".to_string();
        app.clamp_selection();
        assert_eq!(app.service_selection, 0);
    }

    #[test]
    fn test_can_add_input_char() {
        assert!(can_add_input_char(0, 'a'));
        assert!(can_add_input_char(199, '!'));
        assert!(!can_add_input_char(200, 'a'));
        assert!(!can_add_input_char(0, '\n'));
        assert!(!can_add_input_char(0, '\x00'));
    }
}
