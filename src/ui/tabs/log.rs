use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::app::App;
use crate::ui::styles;
use crate::utils::truncate;

/// Render the Log tab - newest entries first, one line each.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let sorted = app.sorted_logs();

    let items: Vec<ListItem> = if sorted.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            " No entries yet. Press [a] to add one.",
            styles::muted_style(),
        )))]
    } else {
        sorted
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let style = if i == app.log_selection {
                    styles::selected_style()
                } else {
                    styles::list_item_style()
                };

                let mut spans = vec![Span::styled(
                    format!(" {} ", if entry.date.is_empty() { "----------" } else { &entry.date }),
                    styles::muted_style(),
                )];
                if let Some(score) = entry.score {
                    spans.push(Span::styled(format!("★{} ", score), styles::star_style()));
                }
                let width = area.width.saturating_sub(16) as usize;
                spans.push(Span::raw(truncate(&entry.text, width)));

                ListItem::new(Line::from(spans)).style(style)
            })
            .collect()
    };

    let title = format!(" Log ({}) - [a] add entry ", sorted.len());

    let list = List::new(items).block(
        Block::default()
            .title(title)
            .title_style(styles::muted_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(true)),
    );

    let mut state = ListState::default();
    if !sorted.is_empty() {
        state.select(Some(app.log_selection));
    }

    frame.render_stateful_widget(list, area, &mut state);
}
