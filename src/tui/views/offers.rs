//! Offer listing view with filter bar, featured strip, and card grid.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::catalog::FacetKind;
use crate::model::Offer;
use crate::tui::app::App;
use crate::tui::theme::{colors, discount_badge, featured_badge, page_badge, tag_badge};
use crate::tui::widgets::{
    self, render_facet_dropdown, render_facet_trigger, render_sort_dropdown, render_sort_trigger,
};

/// Cards per grid row.
const GRID_COLS: usize = 3;
/// Grid rows per page; `GRID_COLS * GRID_ROWS` matches the default page size.
const GRID_ROWS: usize = 3;

pub fn render_offers(frame: &mut Frame, area: Rect, app: &mut App) {
    let has_featured = !app.offers.featured.is_empty() && !app.offers_loading;
    let featured_height = if has_featured { 5 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(featured_height),
            Constraint::Min(9),
            Constraint::Length(1),
        ])
        .split(area);

    render_category_chips(frame, chunks[0], app);
    render_filter_row(frame, chunks[1], app);
    if has_featured {
        render_featured_strip(frame, chunks[2], app);
    }
    render_grid(frame, chunks[3], app);
    render_pagination(frame, chunks[4], app);

    // Dropdowns paint over the content, so they go last.
    render_facet_dropdown(
        frame,
        area,
        app.filter.facet(FacetKind::Organization),
        &mut app.filter_bar.organization,
    );
    render_facet_dropdown(
        frame,
        area,
        app.filter.facet(FacetKind::BenefitType),
        &mut app.filter_bar.benefit,
    );
    render_sort_dropdown(frame, area, app.filter.sort(), &mut app.filter_bar.sort);
}

/// Single-choice category row. Chip 0 shows everything; the rest pick
/// exactly one category. Chip rectangles are recorded for mouse clicks.
fn render_category_chips(frame: &mut Frame, area: Rect, app: &mut App) {
    let scheme = colors();
    let facet = app.filter.facet(FacetKind::Category);
    let mut chips: Vec<(String, bool)> = vec![("All".to_string(), facet.is_all())];
    for option in facet.options() {
        chips.push((option.clone(), facet.is_selected(option)));
    }

    app.category_chips.clear();
    let mut spans = Vec::new();
    let mut x = area.x;
    for (label, active) in &chips {
        let text = format!(" {label} ");
        let width = text.width() as u16;
        if x + width > area.x + area.width {
            break;
        }
        app.category_chips.push(Rect::new(x, area.y, width, 1));
        let style = if *active {
            Style::default()
                .fg(scheme.badge_fg_dark)
                .bg(scheme.category)
                .bold()
        } else {
            Style::default().fg(scheme.text_muted)
        };
        spans.push(Span::styled(text, style));
        spans.push(Span::raw(" "));
        x += width + 1;
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Organization and benefit dropdowns on the left, sort on the right.
fn render_filter_row(frame: &mut Frame, area: Rect, app: &mut App) {
    let org_label = app
        .filter_bar
        .organization
        .trigger_label(app.filter.facet(FacetKind::Organization));
    let benefit_label = app
        .filter_bar
        .benefit
        .trigger_label(app.filter.facet(FacetKind::BenefitType));
    let sort_label = format!("Sort: {}", app.filter.sort().label());

    // Trigger text is wrapped in one space plus an arrow on each render.
    let org_width = org_label.width() as u16 + 4;
    let benefit_width = benefit_label.width() as u16 + 4;
    let sort_width = sort_label.width() as u16 + 4;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(org_width),
            Constraint::Length(2),
            Constraint::Length(benefit_width),
            Constraint::Min(1),
            Constraint::Length(sort_width),
        ])
        .split(area);

    render_facet_trigger(
        frame,
        chunks[0],
        app.filter.facet(FacetKind::Organization),
        &mut app.filter_bar.organization,
        false,
    );
    render_facet_trigger(
        frame,
        chunks[2],
        app.filter.facet(FacetKind::BenefitType),
        &mut app.filter_bar.benefit,
        false,
    );
    render_sort_trigger(
        frame,
        chunks[4],
        app.filter.sort(),
        &mut app.filter_bar.sort,
        false,
    );
}

fn render_featured_strip(frame: &mut Frame, area: Rect, app: &App) {
    let scheme = colors();
    let lines: Vec<Line> = app
        .offers
        .featured
        .iter()
        .take(3)
        .map(|offer| {
            Line::from(vec![
                featured_badge(),
                Span::raw(" "),
                Span::styled(
                    widgets::truncate_str(&offer.title, area.width.saturating_sub(20) as usize),
                    Style::default().fg(scheme.text).bold(),
                ),
                Span::raw(" "),
                discount_badge(offer.discount_percent),
            ])
        })
        .collect();

    let strip = Paragraph::new(lines).block(
        Block::default()
            .title(" Featured ")
            .title_style(Style::default().fg(scheme.featured).bold())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(scheme.border)),
    );
    frame.render_widget(strip, area);
}

fn render_grid(frame: &mut Frame, area: Rect, app: &App) {
    if app.offers_loading {
        widgets::render_loading_state(frame, area, "Loading offers...", app.tick);
        return;
    }
    if app.offers.items.is_empty() {
        widgets::render_empty_state(
            frame,
            area,
            "No offers match the current filters",
            Some("Press c, o, or b to adjust filters"),
        );
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 3); GRID_ROWS])
        .split(area);

    for (row_idx, row_area) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); GRID_COLS])
            .split(*row_area);

        for (col_idx, cell) in cols.iter().enumerate() {
            let idx = row_idx * GRID_COLS + col_idx;
            if let Some(offer) = app.offers.items.get(idx) {
                render_offer_card(frame, *cell, offer, idx == app.grid.selected);
            }
        }
    }
}

fn render_offer_card(frame: &mut Frame, area: Rect, offer: &Offer, selected: bool) {
    let scheme = colors();
    let inner_width = area.width.saturating_sub(2) as usize;

    let mut title_spans = Vec::new();
    if offer.is_featured {
        title_spans.push(featured_badge());
        title_spans.push(Span::raw(" "));
    }
    title_spans.push(Span::styled(
        widgets::truncate_str(&offer.title, inner_width.saturating_sub(8)),
        Style::default().fg(scheme.text).bold(),
    ));

    let mut tag_spans = vec![Span::styled(
        widgets::truncate_str(&offer.merchant_name, inner_width.saturating_sub(10)),
        Style::default().fg(scheme.text_muted),
    )];
    tag_spans.push(Span::raw(" "));
    tag_spans.push(tag_badge(FacetKind::Category, &offer.category));

    let lines = vec![
        Line::from(title_spans),
        Line::from(tag_spans),
        Line::from(vec![
            discount_badge(offer.discount_percent),
            Span::styled(
                format!(" {} views", widgets::format_count(offer.view_count)),
                Style::default().fg(scheme.text_muted),
            ),
        ]),
        Line::from(Span::styled(
            widgets::truncate_str(&offer.deadline_text, inner_width),
            Style::default().fg(scheme.deadline),
        )),
    ];

    let border_style = if selected {
        Style::default().fg(scheme.border_focused).bold()
    } else {
        Style::default().fg(scheme.border)
    };
    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(card, area);
}

fn render_pagination(frame: &mut Frame, area: Rect, app: &App) {
    let scheme = colors();
    let window = app.filter.page();
    let line = Line::from(vec![
        page_badge(window.current(), window.total_pages()),
        Span::styled("  ←/→ page", Style::default().fg(scheme.text_muted)),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
