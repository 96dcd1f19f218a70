//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{can_add_input_char, App, AppState, Focus, LogField, Tab};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return Ok(false);
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    // Handle form overlays
    if matches!(app.state, AppState::AddingService) {
        handle_service_form_input(app, key);
        return Ok(false);
    }
    if matches!(app.state, AppState::AddingLog) {
        handle_log_form_input(app, key);
        return Ok(false);
    }

    // Handle search mode
    if matches!(app.state, AppState::Searching) {
        handle_search_input(app, key);
        return Ok(false);
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
        }
        KeyCode::Char('1') => {
            app.current_tab = Tab::Services;
            app.focus = Focus::List;
        }
        KeyCode::Char('2') => {
            app.current_tab = Tab::News;
            app.focus = Focus::List;
        }
        KeyCode::Char('3') => {
            app.current_tab = Tab::Log;
            app.focus = Focus::List;
        }
        KeyCode::Left => {
            app.current_tab = app.current_tab.prev();
            app.focus = Focus::List;
        }
        KeyCode::Right => {
            app.current_tab = app.current_tab.next();
            app.focus = Focus::List;
        }
        KeyCode::Tab => {
            if app.current_tab == Tab::Services {
                app.focus = match app.focus {
                    Focus::List => Focus::Detail,
                    Focus::Detail => Focus::List,
                };
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_prev();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next();
        }
        KeyCode::Char('/') => {
            // Search filters the Services and News tabs; the log has no
            // free-text filter
            if matches!(app.current_tab, Tab::Services | Tab::News) {
                app.state = AppState::Searching;
            }
        }
        KeyCode::Char('a') => {
            match app.current_tab {
                Tab::Services => app.state = AppState::AddingService,
                // Adding a log entry is the only append on the other tabs
                Tab::News | Tab::Log => app.state = AppState::AddingLog,
            }
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            if app.current_tab == Tab::Services {
                app.raise_min_stars();
            }
        }
        KeyCode::Char('-') => {
            if app.current_tab == Tab::Services {
                app.lower_min_stars();
            }
        }
        KeyCode::Char('c') => {
            if app.current_tab == Tab::Services {
                app.cycle_category();
            }
        }
        KeyCode::Char('C') => {
            if app.current_tab == Tab::Services {
                app.clear_category();
            }
        }
        KeyCode::Char('b') => {
            if app.current_tab == Tab::Services {
                app.set_best_for_selected();
            }
        }
        KeyCode::Esc => {
            if !app.search_query.is_empty() {
                app.search_query.clear();
                app.clamp_selection();
            }
        }
        _ => {}
    }

    Ok(false)
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            app.state = AppState::Normal;
            app.clamp_selection();
        }
        KeyCode::Esc => {
            app.search_query.clear();
            app.state = AppState::Normal;
            app.clamp_selection();
        }
        KeyCode::Backspace => {
            app.search_query.pop();
            app.clamp_selection();
        }
        KeyCode::Char(c) => {
            if can_add_input_char(app.search_query.len(), c) {
                app.search_query.push(c);
                app.clamp_selection();
            }
        }
        _ => {}
    }
}

fn handle_service_form_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::Normal;
        }
        KeyCode::Tab | KeyCode::Down => {
            app.service_form.focus = app.service_form.focus.next();
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.service_form.focus = app.service_form.focus.prev();
        }
        KeyCode::Enter => {
            // An empty name keeps the form open; nothing is saved
            if app.submit_service_form() {
                app.state = AppState::Normal;
                app.clamp_selection();
            }
        }
        KeyCode::Backspace => {
            let focus = app.service_form.focus;
            app.service_form.field_mut(focus).pop();
        }
        KeyCode::Char(c) => {
            let focus = app.service_form.focus;
            let field = app.service_form.field_mut(focus);
            if can_add_input_char(field.len(), c) {
                field.push(c);
            }
        }
        _ => {}
    }
}

fn handle_log_form_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::Normal;
        }
        KeyCode::Tab | KeyCode::Down => {
            app.log_form.focus = app.log_form.focus.next();
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.log_form.focus = match app.log_form.focus {
                LogField::Date => LogField::Score,
                LogField::Text => LogField::Date,
                LogField::Score => LogField::Text,
            };
        }
        KeyCode::Enter => {
            // Empty text keeps the form open; on save the text and
            // score clear so the next entry can follow immediately
            app.submit_log_form();
        }
        KeyCode::Backspace => {
            let focus = app.log_form.focus;
            app.log_form.field_mut(focus).pop();
        }
        KeyCode::Char(c) => {
            let focus = app.log_form.focus;
            let field = app.log_form.field_mut(focus);
            if can_add_input_char(field.len(), c) {
                field.push(c);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn temp_app(tag: &str) -> App {
        let dir = std::env::temp_dir().join(format!("aicatchup-input-{}-{}", tag, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let config = Config {
            asset_base_url: None,
            data_dir: Some(dir.clone()),
            cache_dir: Some(dir.join("cache")),
        };
        App::new(config).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_input(app, KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    #[test]
    fn test_quit_requires_confirmation() {
        let mut app = temp_app("quit");
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.state, AppState::ConfirmingQuit);

        assert!(!press(&mut app, KeyCode::Char('n')));
        assert_eq!(app.state, AppState::Normal);

        press(&mut app, KeyCode::Char('q'));
        assert!(press(&mut app, KeyCode::Char('y')));
        assert_eq!(app.state, AppState::Quitting);
    }

    #[test]
    fn test_tab_switching() {
        let mut app = temp_app("tabs");
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.current_tab, Tab::News);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.current_tab, Tab::Log);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.current_tab, Tab::Services);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.current_tab, Tab::Log);
    }

    #[test]
    fn test_search_typing_and_clear() {
        let mut app = temp_app("search");
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.state, AppState::Searching);

        for c in "chat".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.search_query, "chat");

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state, AppState::Normal);
        assert_eq!(app.search_query, "chat");

        // Esc in normal mode clears an applied query
        press(&mut app, KeyCode::Esc);
        assert!(app.search_query.is_empty());
    }

    #[test]
    fn test_search_esc_discards_query() {
        let mut app = temp_app("search-esc");
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state, AppState::Normal);
        assert!(app.search_query.is_empty());
    }

    #[test]
    fn test_search_unavailable_on_log_tab() {
        let mut app = temp_app("search-log");
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.state, AppState::Normal);
    }

    #[test]
    fn test_service_form_flow() {
        let mut app = temp_app("svc-form");
        let before = app.services.len();

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.state, AppState::AddingService);

        // Enter with no name keeps the form open
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state, AppState::AddingService);
        assert_eq!(app.services.len(), before);

        for c in "Zephyr".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state, AppState::Normal);
        assert_eq!(app.services.len(), before + 1);
        assert_eq!(app.services.last().unwrap().name, "Zephyr");
    }

    #[test]
    fn test_log_form_saves_and_stays_open() {
        let mut app = temp_app("log-form");
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.state, AppState::AddingLog);
        assert_eq!(app.log_form.focus, LogField::Text);

        for c in "tried the new model".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        // Saved, inputs cleared, form still open for the next entry
        assert_eq!(app.state, AppState::AddingLog);
        assert_eq!(app.logs.len(), 1);
        assert!(app.log_form.text.is_empty());

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state, AppState::Normal);
    }

    #[test]
    fn test_star_and_category_keys_only_on_services() {
        let mut app = temp_app("filter-keys");
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.min_stars, 1);

        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.min_stars, 1);

        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('c'));
        assert!(app.active_category.is_some());
        press(&mut app, KeyCode::Char('C'));
        assert!(app.active_category.is_none());
    }

    #[test]
    fn test_best_marking_from_keyboard() {
        let mut app = temp_app("best-key");
        press(&mut app, KeyCode::Char('b'));
        // Top visible service has categories, so the mapping is non-empty
        assert!(!app.best_by_category.is_empty());
    }
}
