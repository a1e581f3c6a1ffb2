//! Offer detail view with info and review tabs.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::catalog::FacetKind;
use crate::tui::app::{App, DetailTab};
use crate::tui::theme::{colors, discount_badge, featured_badge, tag_badge};
use crate::tui::widgets;

pub fn render_detail(frame: &mut Frame, area: Rect, app: &mut App) {
    let Some(screen) = &app.detail else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(8)])
        .split(area);

    render_tabs(frame, chunks[0], screen.tab);

    if screen.loading {
        widgets::render_loading_state(frame, chunks[1], "Loading offer...", app.tick);
        return;
    }
    if screen.failed {
        widgets::render_error_state(
            frame,
            chunks[1],
            "Could not load this offer",
            "The catalog service did not respond",
            Some("Press Esc to go back"),
        );
        return;
    }

    match screen.tab {
        DetailTab::Info => render_info(frame, chunks[1], app),
        DetailTab::Reviews => render_reviews(frame, chunks[1], app),
    }
}

fn render_tabs(frame: &mut Frame, area: Rect, current: DetailTab) {
    let scheme = colors();
    let tab_span = |label: &str, active: bool| {
        if active {
            Span::styled(
                format!(" {label} "),
                Style::default()
                    .fg(scheme.badge_fg_dark)
                    .bg(scheme.accent)
                    .bold(),
            )
        } else {
            Span::styled(format!(" {label} "), Style::default().fg(scheme.text_muted))
        }
    };

    let line = Line::from(vec![
        tab_span("Info", current == DetailTab::Info),
        Span::raw(" "),
        tab_span("Reviews", current == DetailTab::Reviews),
        Span::styled("   [ ] switch", Style::default().fg(scheme.text_muted)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_info(frame: &mut Frame, area: Rect, app: &App) {
    let Some(screen) = &app.detail else {
        return;
    };
    let scheme = colors();
    let offer = &screen.offer;

    let mut title_spans = Vec::new();
    if offer.is_featured {
        title_spans.push(featured_badge());
        title_spans.push(Span::raw(" "));
    }
    title_spans.push(Span::styled(
        offer.title.clone(),
        Style::default().fg(scheme.text).bold(),
    ));

    let mut badge_spans = vec![tag_badge(FacetKind::Category, &offer.category)];
    for tag in &offer.organization_tags {
        badge_spans.push(Span::raw(" "));
        badge_spans.push(tag_badge(FacetKind::Organization, tag));
    }
    for tag in &offer.benefit_type_tags {
        badge_spans.push(Span::raw(" "));
        badge_spans.push(tag_badge(FacetKind::BenefitType, tag));
    }

    let mut lines = vec![
        Line::from(title_spans),
        Line::from(vec![
            Span::styled("Partner: ", Style::default().fg(scheme.text_muted)),
            Span::styled(offer.merchant_name.clone(), Style::default().fg(scheme.text)),
        ]),
        Line::from(badge_spans),
        Line::from(vec![
            discount_badge(offer.discount_percent),
            Span::styled(
                format!(" {} views  ", widgets::format_count(offer.view_count)),
                Style::default().fg(scheme.text_muted),
            ),
            Span::styled(offer.deadline_text.clone(), Style::default().fg(scheme.deadline)),
        ]),
        Line::from(""),
    ];

    if let Some(detail) = &screen.detail {
        let field = |label: &str, value: &str| {
            Line::from(vec![
                Span::styled(format!("{label}: "), Style::default().fg(scheme.text_muted)),
                Span::styled(value.to_string(), Style::default().fg(scheme.text)),
            ])
        };
        lines.push(field("Eligible", &detail.target));
        lines.push(field("Benefit", &detail.benefit_type));
        lines.push(field(
            "Offer period",
            &format!("{} ~ {}", detail.sale_start, detail.sale_end),
        ));
        lines.push(field(
            "Valid for use",
            &format!("{} ~ {}", detail.use_start, detail.use_end),
        ));
        if !detail.note.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::styled(
                detail.note.clone(),
                Style::default().fg(scheme.text_muted),
            ));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("[2]", Style::default().fg(scheme.accent)),
        Span::styled(" branches  ", Style::default().fg(scheme.text_muted)),
        Span::styled("[r]", Style::default().fg(scheme.accent)),
        Span::styled(" write review", Style::default().fg(scheme.text_muted)),
    ]));

    widgets::render_detail_panel(frame, area, &offer.title, lines, scheme.border);
}

fn render_reviews(frame: &mut Frame, area: Rect, app: &App) {
    let Some(screen) = &app.detail else {
        return;
    };
    let scheme = colors();

    let Some(reviews) = &screen.reviews else {
        widgets::render_empty_state(frame, area, "No reviews yet", Some("Press r to write one"));
        return;
    };
    if reviews.is_empty() {
        widgets::render_empty_state(frame, area, "No reviews yet", Some("Press r to write one"));
        return;
    }

    let mut lines = Vec::new();
    if !reviews.digest.is_empty() {
        lines.push(Line::styled(
            reviews.digest.clone(),
            Style::default().fg(scheme.text).bold(),
        ));
        lines.push(Line::from(""));
    }
    for entry in &reviews.entries {
        lines.push(Line::from(vec![
            Span::styled("• ", Style::default().fg(scheme.accent)),
            Span::styled(entry.text.clone(), Style::default().fg(scheme.text)),
        ]));
        if !entry.photo_urls.is_empty() {
            lines.push(Line::styled(
                format!("  {} photo(s)", entry.photo_urls.len()),
                Style::default().fg(scheme.text_muted),
            ));
        }
        lines.push(Line::from(""));
    }

    let panel = Paragraph::new(lines)
        .block(
            Block::default()
                .title(format!(" Reviews ({}) ", reviews.entries.len()))
                .title_style(Style::default().fg(scheme.accent).bold())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(scheme.border)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(panel, area);
}
