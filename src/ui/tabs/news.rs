use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::styles;

/// Render the News tab - built-in digest list with a reading pane.
/// Entries are a fixed editorial set, not a live feed.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_news_list(frame, app, chunks[0]);
    render_news_detail(frame, app, chunks[1]);
}

fn render_news_list(frame: &mut Frame, app: &App, area: Rect) {
    let visible = app.visible_news();

    let items: Vec<ListItem> = if visible.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            " No news items match the query",
            styles::muted_style(),
        )))]
    } else {
        visible
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let style = if i == app.news_selection {
                    styles::selected_style()
                } else {
                    styles::list_item_style()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("[{}] ", item.tag), styles::highlight_style()),
                    Span::raw(item.title),
                    Span::styled(format!("  {}", item.date), styles::muted_style()),
                ]))
                .style(style)
            })
            .collect()
    };

    let title = if app.search_query.is_empty() {
        format!(" News ({}) ", visible.len())
    } else {
        format!(" News ({}) - \"{}\" ", visible.len(), app.search_query)
    };

    let list = List::new(items).block(
        Block::default()
            .title(title)
            .title_style(styles::muted_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(true)),
    );

    let mut state = ListState::default();
    state.select(Some(app.news_selection));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_news_detail(frame: &mut Frame, app: &App, area: Rect) {
    let visible = app.visible_news();
    let selected = visible.get(app.news_selection);

    let content = match selected {
        Some(item) => vec![
            Line::from(Span::styled(item.title, styles::title_style())),
            Line::from(vec![
                Span::styled(format!("[{}] ", item.tag), styles::highlight_style()),
                Span::styled(format!("{} - {}", item.source, item.date), styles::muted_style()),
            ]),
            Line::from(""),
            Line::from(item.note),
        ],
        None => vec![Line::from(Span::styled(
            "No news items match the query",
            styles::muted_style(),
        ))],
    };

    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Story ")
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(false)),
        );

    frame.render_widget(paragraph, area);
}
