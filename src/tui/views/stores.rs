//! Partner branch listing, reachable from the offers grid and detail view.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use crate::tui::app::App;
use crate::tui::theme::{colors, page_badge};
use crate::tui::widgets;

pub fn render_stores(frame: &mut Frame, area: Rect, app: &mut App) {
    let Some(stores) = &app.stores else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(1)])
        .split(area);

    if stores.loading {
        widgets::render_loading_state(frame, chunks[0], "Loading branches...", app.tick);
    } else if stores.data.items.is_empty() {
        widgets::render_empty_state(
            frame,
            chunks[0],
            "No branches listed for this partner",
            Some("Press Esc to go back"),
        );
    } else {
        render_table(frame, chunks[0], app);
    }

    render_footer(frame, chunks[1], app);
}

fn render_table(frame: &mut Frame, area: Rect, app: &App) {
    let Some(stores) = &app.stores else {
        return;
    };
    let scheme = colors();

    let header_cells = ["Name", "Category", "Phone", "Address", "Hours", "Parking"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(scheme.accent).bold()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = stores
        .data
        .items
        .iter()
        .map(|store| {
            let hours = store
                .hours
                .as_ref()
                .map(|h| format!("{}-{}", h.open, h.close))
                .unwrap_or_else(|| "-".to_string());
            let parking = if store.has_parking { "○" } else { "-" };
            Row::new(vec![
                Cell::from(store.name.clone()),
                Cell::from(store.category.clone()),
                Cell::from(store.phone.clone()),
                Cell::from(widgets::truncate_str(&store.address, 30)),
                Cell::from(hours),
                Cell::from(parking),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(14),
        Constraint::Length(8),
        Constraint::Length(14),
        Constraint::Min(20),
        Constraint::Length(12),
        Constraint::Length(7),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(" Branches: {} ", stores.title))
                .title_style(Style::default().fg(scheme.accent).bold())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(scheme.border)),
        )
        .row_highlight_style(Style::default().bg(scheme.selection).bold())
        .highlight_symbol("▶ ");

    let mut state = TableState::default().with_selected(Some(stores.list.selected));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let Some(stores) = &app.stores else {
        return;
    };
    let scheme = colors();
    let line = Line::from(vec![
        page_badge(stores.window.current(), stores.window.total_pages()),
        Span::styled("  ←/→ page  Esc back", Style::default().fg(scheme.text_muted)),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
