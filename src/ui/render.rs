use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AppState, LogField, ServiceField, Tab};

use super::styles;
use super::tabs::{log, news, services};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Tabs
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_tabs(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    // Render overlays
    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame);
    }

    if matches!(app.state, AppState::AddingService) {
        render_service_form_overlay(frame, app);
    }

    if matches!(app.state, AppState::AddingLog) {
        render_log_form_overlay(frame, app);
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  AI Catchup";
    let offline = if app.offline_ready { "● offline copy " } else { "" };
    let help_hint = "[?] Help";

    // Pad by display columns, not byte length (the badge glyph is
    // multi-byte but one column wide)
    let used = title.chars().count() + offline.chars().count() + help_hint.chars().count() + 4;
    let padding = (area.width as usize).saturating_sub(used);

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(padding)),
        Span::styled(offline, styles::success_style()),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let main_tabs = vec![
        ("[1] Services", app.current_tab == Tab::Services),
        ("[2] News", app.current_tab == Tab::News),
        ("[3] Log", app.current_tab == Tab::Log),
    ];

    let mut spans = vec![Span::raw(" ")];
    for (i, (label, selected)) in main_tabs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style()));
        }
        if *selected {
            spans.push(Span::styled(*label, styles::tab_style(true)));
        } else {
            spans.push(Span::styled(*label, styles::muted_style()));
        }
    }

    let line = Line::from(spans);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.current_tab {
        Tab::Services => services::render(frame, app, area),
        Tab::News => news::render(frame, app, area),
        Tab::Log => log::render(frame, app, area),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Search mode takes over the whole bar with a live input line
    if matches!(app.state, AppState::Searching) {
        let search_line = Line::from(vec![
            Span::styled(" Search: ", styles::search_style()),
            Span::styled(app.search_query.clone(), styles::list_item_style()),
            Span::styled("▌", styles::search_style()),
            Span::styled("  (Enter to apply, Esc to clear)", styles::muted_style()),
        ]);
        let paragraph = Paragraph::new(search_line).style(styles::status_bar_style());
        frame.render_widget(paragraph, area);
        return;
    }

    let shortcuts = match app.current_tab {
        Tab::Services => "[/] search | [+/-] stars | [c]ategory | [b]est | [a]dd | [q]uit",
        Tab::News => "[/] search | [a]dd log | [q]uit",
        Tab::Log => "[a]dd | [q]uit",
    };

    let left_text = if let Some(ref msg) = app.status_message {
        format!(" {} ", msg)
    } else {
        String::from(" ")
    };
    let right_text = format!(" {} ", shortcuts);

    let width = area.width as usize;
    let padding_len = width.saturating_sub(left_text.len()).saturating_sub(right_text.len());
    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(52, 24, frame.area());

    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled("          AI Catchup", styles::title_style())),
        Line::from(Span::styled(
            format!("          version {}", version),
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::highlight_style())),
        Line::from(vec![
            Span::styled("  1-3       ", styles::help_key_style()),
            Span::styled("Switch tabs", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  ←/→       ", styles::help_key_style()),
            Span::styled("Prev/next tab", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  ↑/↓       ", styles::help_key_style()),
            Span::styled("Navigate list", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  Tab       ", styles::help_key_style()),
            Span::styled("Switch focus (list ↔ detail)", styles::help_desc_style()),
        ]),
        Line::from(""),
        Line::from(Span::styled(" Services Tab", styles::highlight_style())),
        Line::from(vec![
            Span::styled("  /         ", styles::help_key_style()),
            Span::styled("Search services and news", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  + / -     ", styles::help_key_style()),
            Span::styled("Raise/lower minimum stars", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  c         ", styles::help_key_style()),
            Span::styled("Cycle category filter", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  b         ", styles::help_key_style()),
            Span::styled("Mark selection best for its categories", styles::help_desc_style()),
        ]),
        Line::from(vec![
            Span::styled("  a         ", styles::help_key_style()),
            Span::styled("Add service (or log entry on Log tab)", styles::help_desc_style()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(help_text).block(block);

    frame.render_widget(paragraph, area);
}

fn form_field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let style = if focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let display = format!("{:<28}", value);
    let cursor = if focused { "▌" } else { "" };
    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{:<11}[", format!("{}:", label)), styles::muted_style()),
        Span::styled(format!("{}{}", display, cursor), style),
        Span::styled("]", styles::muted_style()),
    ])
}

fn render_service_form_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(48, 15, frame.area());

    frame.render_widget(Clear, area);

    let form = &app.service_form;
    let fields = [
        ServiceField::Name,
        ServiceField::Provider,
        ServiceField::Categories,
        ServiceField::Status,
        ServiceField::Stars,
        ServiceField::Url,
        ServiceField::Note,
    ];

    let mut lines = vec![
        Line::from(Span::styled("  Add Service", styles::title_style())),
        Line::from(""),
    ];
    for field in fields {
        lines.push(form_field_line(field.label(), form.field(field), form.focus == field));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Categories comma-separated, stars 0-5",
        styles::muted_style(),
    )));
    lines.push(Line::from(vec![
        Span::styled("  Tab", styles::help_key_style()),
        Span::styled(" next field  ", styles::muted_style()),
        Span::styled("Enter", styles::help_key_style()),
        Span::styled(" save  ", styles::muted_style()),
        Span::styled("Esc", styles::help_key_style()),
        Span::styled(" cancel", styles::muted_style()),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_log_form_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(48, 11, frame.area());

    frame.render_widget(Clear, area);

    let form = &app.log_form;
    let fields = [LogField::Date, LogField::Text, LogField::Score];

    let mut lines = vec![
        Line::from(Span::styled("  Log Entry", styles::title_style())),
        Line::from(""),
    ];
    for field in fields {
        let value = match field {
            LogField::Date => &form.date,
            LogField::Text => &form.text,
            LogField::Score => &form.score,
        };
        lines.push(form_field_line(field.label(), value, form.focus == field));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Text required, score 0-5 (blank for none)",
        styles::muted_style(),
    )));
    lines.push(Line::from(vec![
        Span::styled("  Tab", styles::help_key_style()),
        Span::styled(" next field  ", styles::muted_style()),
        Span::styled("Enter", styles::help_key_style()),
        Span::styled(" save  ", styles::muted_style()),
        Span::styled("Esc", styles::help_key_style()),
        Span::styled(" close", styles::muted_style()),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 8, frame.area());

    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled("      AI Catchup", styles::title_style())),
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to quit, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::Terminal;

    fn temp_app(tag: &str) -> App {
        let dir = std::env::temp_dir().join(format!("aicatchup-render-{}-{}", tag, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let config = Config {
            asset_base_url: None,
            data_dir: Some(dir.clone()),
            cache_dir: Some(dir.join("cache")),
        };
        App::new(config).unwrap()
    }

    fn draw(app: &App) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).unwrap().symbol())
            .collect()
    }

    #[test]
    fn test_title_bar_right_aligns_help_hint_with_offline_badge() {
        let mut app = temp_app("title-pad");
        app.offline_ready = true;
        let buf = draw(&app);

        // The badge glyph is one column wide; the hint must still end
        // four columns short of the right edge
        let row = row_text(&buf, 0);
        let trimmed = row.trim_end();
        assert!(trimmed.ends_with("[?] Help"), "row was: {:?}", row);
        assert_eq!(trimmed.chars().count(), 76);
        assert!(trimmed.contains("● offline copy"));
    }

    #[test]
    fn test_services_tab_shows_best_summary_pairs() {
        let mut app = temp_app("best-line");
        let chatgpt = app.services[0].clone();
        assert_eq!(chatgpt.name, "ChatGPT");
        app.set_best_for_categories(&chatgpt);

        let buf = draw(&app);
        // Category line at the top of the main area, summary beneath it
        let summary = row_text(&buf, 7);
        assert!(summary.contains("Best:"), "row was: {:?}", summary);
        assert!(summary.contains("LLM: ChatGPT"), "row was: {:?}", summary);
        assert!(summary.contains("Assistant: ChatGPT"), "row was: {:?}", summary);
    }

    #[test]
    fn test_best_summary_placeholder_before_any_marking() {
        let app = temp_app("best-empty");
        let buf = draw(&app);
        let summary = row_text(&buf, 7);
        assert!(summary.contains("none yet"), "row was: {:?}", summary);
    }
}
