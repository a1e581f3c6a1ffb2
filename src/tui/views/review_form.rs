//! Review submission form, drawn as a modal over the detail view.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::api::{PHOTO_SLOTS, TEXT_LIMIT};
use crate::tui::app::{App, ReviewField, ReviewForm};
use crate::tui::theme::colors;
use crate::tui::widgets::centered_rect;

pub fn render_review_form(frame: &mut Frame, app: &App) {
    let Some(form) = &app.review else {
        return;
    };
    let scheme = colors();

    let popup = centered_rect(70, 80, frame.area());
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(format!(" Write Review: {} ", form.offer_title))
        .title_style(Style::default().fg(scheme.accent).bold())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(scheme.accent))
        .style(Style::default().bg(scheme.background_alt));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let mut constraints = vec![Constraint::Length(6), Constraint::Length(3)];
    constraints.extend(std::iter::repeat(Constraint::Length(3)).take(PHOTO_SLOTS));
    constraints.push(Constraint::Min(2));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    render_text_field(frame, chunks[0], form);
    render_path_field(
        frame,
        chunks[1],
        "Receipt photo (required)",
        &form.receipt_path,
        form.field == ReviewField::Receipt,
    );
    for slot in 0..PHOTO_SLOTS {
        render_path_field(
            frame,
            chunks[2 + slot],
            &format!("Photo {} (optional)", slot + 1),
            &form.photo_paths[slot],
            form.field == ReviewField::Photo(slot),
        );
    }
    render_footer(frame, chunks[2 + PHOTO_SLOTS], app, form);
}

fn render_text_field(frame: &mut Frame, area: Rect, form: &ReviewForm) {
    let scheme = colors();
    let active = form.field == ReviewField::Text;

    let over_limit = form.text.chars().count() > TEXT_LIMIT;
    let count_style = if over_limit {
        Style::default().fg(scheme.error).bold()
    } else {
        Style::default().fg(scheme.text_muted)
    };

    let mut value = form.text.clone();
    if active {
        value.push('█');
    }

    let field = Paragraph::new(value)
        .block(
            Block::default()
                .title(" Your review ")
                .title_style(field_title_style(active))
                .title_bottom(
                    Line::from(Span::styled(
                        format!(" {}/{} ", form.text.chars().count(), TEXT_LIMIT),
                        count_style,
                    ))
                    .right_aligned(),
                )
                .borders(Borders::ALL)
                .border_style(field_border_style(active)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(field, area);
}

fn render_path_field(frame: &mut Frame, area: Rect, label: &str, value: &str, active: bool) {
    let scheme = colors();
    let shown = if active {
        format!("{value}█")
    } else if value.is_empty() {
        "(none)".to_string()
    } else {
        value.to_string()
    };
    let style = if value.is_empty() && !active {
        Style::default().fg(scheme.text_muted)
    } else {
        Style::default().fg(scheme.text)
    };

    let field = Paragraph::new(Line::styled(shown, style)).block(
        Block::default()
            .title(format!(" {label} "))
            .title_style(field_title_style(active))
            .borders(Borders::ALL)
            .border_style(field_border_style(active)),
    );
    frame.render_widget(field, area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App, form: &ReviewForm) {
    let scheme = colors();
    let line = if form.submitting {
        let spinner_frames = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
        let spinner = spinner_frames[(app.tick / 2) as usize % spinner_frames.len()];
        Line::styled(
            format!("{spinner} Submitting..."),
            Style::default().fg(scheme.accent),
        )
    } else if let Some(error) = &form.error {
        Line::styled(format!("✗ {error}"), Style::default().fg(scheme.error).bold())
    } else {
        Line::from(vec![
            Span::styled("Tab", Style::default().fg(scheme.accent)),
            Span::styled(" next field  ", Style::default().fg(scheme.text_muted)),
            Span::styled("Ctrl+S", Style::default().fg(scheme.accent)),
            Span::styled(" submit  ", Style::default().fg(scheme.text_muted)),
            Span::styled("Esc", Style::default().fg(scheme.accent)),
            Span::styled(" discard", Style::default().fg(scheme.text_muted)),
        ])
    };
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn field_border_style(active: bool) -> Style {
    let scheme = colors();
    if active {
        Style::default().fg(scheme.border_focused)
    } else {
        Style::default().fg(scheme.border)
    }
}

fn field_title_style(active: bool) -> Style {
    let scheme = colors();
    if active {
        Style::default().fg(scheme.accent).bold()
    } else {
        Style::default().fg(scheme.text_muted)
    }
}
