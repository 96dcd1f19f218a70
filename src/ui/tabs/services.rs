use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::app::{App, Focus};
use crate::ui::styles;

/// Render the Services tab - category facet line, best-by-category
/// summary, then a rating-sorted table with a detail panel beside it.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Category facets
            Constraint::Length(1), // Best-by-category summary
            Constraint::Min(5),    // Table + detail
        ])
        .split(area);

    render_category_line(frame, app, chunks[0]);
    render_best_summary(frame, app, chunks[1]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[2]);

    render_service_table(frame, app, panes[0]);
    render_service_detail(frame, app, panes[1]);
}

fn render_category_line(frame: &mut Frame, app: &App, area: Rect) {
    let categories = app.categories();

    let mut spans = vec![
        Span::styled(" Categories: ", styles::muted_style()),
        Span::styled("[All]", styles::category_pill_style(app.active_category.is_none())),
    ];
    for category in &categories {
        spans.push(Span::raw(" "));
        let active = app.active_category.as_deref() == Some(category.as_str());
        spans.push(Span::styled(
            format!("[{}]", category),
            styles::category_pill_style(active),
        ));
    }
    spans.push(Span::styled("  ([c] cycle)", styles::muted_style()));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// One pill per curated category winner, straight from the mapping.
fn render_best_summary(frame: &mut Frame, app: &App, area: Rect) {
    let pairs = app.best_summary();

    let mut spans = vec![Span::styled(" Best: ", styles::muted_style())];
    if pairs.is_empty() {
        spans.push(Span::styled(
            "none yet ([b] marks the selection)",
            styles::muted_style(),
        ));
    } else {
        for (i, (category, name)) in pairs.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", styles::muted_style()));
            }
            spans.push(Span::styled(format!("{}: ", category), styles::muted_style()));
            spans.push(Span::styled((*name).to_string(), styles::best_style()));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_service_table(frame: &mut Frame, app: &App, area: Rect) {
    let visible = app.visible_services();
    let focused = matches!(app.focus, Focus::List);

    let header = Row::new([
        Cell::from("Name"),
        Cell::from("Provider"),
        Cell::from("Stars"),
        Cell::from("Status"),
        Cell::from("Best"),
    ])
    .style(styles::title_style())
    .height(1);

    let rows: Vec<Row> = if visible.is_empty() {
        vec![Row::new(vec![Cell::from(Span::styled(
            "No services match the current filters",
            styles::muted_style(),
        ))])]
    } else {
        visible
            .iter()
            .enumerate()
            .map(|(i, service)| {
                let style = if i == app.service_selection {
                    styles::selected_style()
                } else {
                    styles::list_item_style()
                };

                let best = if app.service_is_best(&service.name) { "✔" } else { "" };

                Row::new(vec![
                    Cell::from(service.name.clone()),
                    Cell::from(service.provider.clone()),
                    Cell::from(Span::styled(service.stars_display(), styles::star_style())),
                    Cell::from(service.status.clone()),
                    Cell::from(Span::styled(best, styles::best_style())),
                ])
                .style(style)
            })
            .collect()
    };

    let widths = [
        Constraint::Percentage(30), // Name
        Constraint::Fill(2),        // Provider
        Constraint::Length(6),      // Stars
        Constraint::Fill(2),        // Status
        Constraint::Length(4),      // Best
    ];

    let mut filters = Vec::new();
    if app.min_stars > 0 {
        filters.push(format!("{}★+", app.min_stars));
    }
    if let Some(ref cat) = app.active_category {
        filters.push(cat.clone());
    }
    if !app.search_query.is_empty() {
        filters.push(format!("\"{}\"", app.search_query));
    }
    let title = if filters.is_empty() {
        format!(" Services ({}) ", visible.len())
    } else {
        format!(" Services ({}) - {} ", visible.len(), filters.join(", "))
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(focused)),
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    state.select(Some(app.service_selection));

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_service_detail(frame: &mut Frame, app: &App, area: Rect) {
    let visible = app.visible_services();
    let selected = visible.get(app.service_selection);
    let focused = matches!(app.focus, Focus::Detail);
    let placeholder = "-";

    let content = match selected {
        Some(service) => {
            let mut lines = vec![
                Line::from(Span::styled(service.name.clone(), styles::title_style())),
            ];
            if app.service_is_best(&service.name) {
                lines.push(Line::from(Span::styled(
                    "✔ best in category",
                    styles::best_style(),
                )));
            }
            lines.push(Line::from(""));

            lines.push(Line::from(vec![
                Span::styled("Provider:   ", styles::muted_style()),
                Span::raw(if service.provider.is_empty() {
                    placeholder.to_string()
                } else {
                    service.provider.clone()
                }),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Stars:      ", styles::muted_style()),
                Span::styled(service.stars_display(), styles::star_style()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Status:     ", styles::muted_style()),
                Span::raw(service.status.clone()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Categories: ", styles::muted_style()),
                Span::raw(if service.categories.is_empty() {
                    placeholder.to_string()
                } else {
                    service.categories.join(", ")
                }),
            ]));
            lines.push(Line::from(vec![
                Span::styled("URL:        ", styles::muted_style()),
                Span::raw(service.url.clone().unwrap_or_else(|| placeholder.to_string())),
            ]));

            lines.push(Line::from(""));
            if let Some(ref note) = service.note {
                lines.push(Line::from(Span::styled("Note", styles::highlight_style())));
                lines.push(Line::from(note.clone()));
            }

            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "[b] mark best for its categories",
                styles::muted_style(),
            )));

            lines
        }
        None => vec![Line::from(Span::styled(
            "No services match the current filters",
            styles::muted_style(),
        ))],
    };

    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Detail ")
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(focused)),
        );

    frame.render_widget(paragraph, area);
}
