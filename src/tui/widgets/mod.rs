//! Rendering helpers shared across the views, plus the dropdown menus
//! used by the filter bar.

mod select;

pub use select::{
    render_facet_dropdown, render_facet_trigger, render_sort_dropdown, render_sort_trigger,
    FacetMenu, MenuAction, SortMenu,
};

use crate::tui::theme::colors;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Bordered, titled panel that wraps its content lines.
pub fn render_detail_panel(
    frame: &mut ratatui::Frame,
    area: Rect,
    title: &str,
    lines: Vec<Line<'static>>,
    border: Color,
) {
    let panel = Paragraph::new(lines)
        .block(
            Block::default()
                .title(format!(" {title} "))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(panel, area);
}

/// Centered lines inside a plain border, shared by the placeholder states.
fn render_placeholder(frame: &mut ratatui::Frame, area: Rect, lines: Vec<Line>, border: Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let body = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(body, area);
}

/// Placeholder for a list with nothing to show.
pub fn render_empty_state(
    frame: &mut ratatui::Frame,
    area: Rect,
    message: &str,
    hint: Option<&str>,
) {
    let scheme = colors();
    let muted = Style::default().fg(scheme.text_muted);

    let mut lines = vec![Line::from(""), Line::styled(message.to_string(), muted)];
    if let Some(hint) = hint {
        lines.push(Line::from(""));
        lines.push(Line::styled(hint.to_string(), muted.italic()));
    }

    render_placeholder(frame, area, lines, scheme.border);
}

/// In-flight fetch placeholder; the spinner advances with the app tick.
pub fn render_loading_state(frame: &mut ratatui::Frame, area: Rect, message: &str, tick: u64) {
    const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    let scheme = colors();
    let spinner = FRAMES[(tick / 2) as usize % FRAMES.len()];

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(format!(" {spinner} "), Style::default().fg(scheme.primary)),
            Span::styled(message.to_string(), Style::default().fg(scheme.text)),
        ]),
    ];

    render_placeholder(frame, area, lines, scheme.border);
}

/// Failed fetch placeholder, with an optional recovery hint.
pub fn render_error_state(
    frame: &mut ratatui::Frame,
    area: Rect,
    title: &str,
    message: &str,
    action: Option<&str>,
) {
    let scheme = colors();
    let alert = Style::default().fg(scheme.error).bold();

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(" ✗ ", alert),
            Span::styled(title.to_string(), alert),
        ]),
        Line::from(""),
        Line::styled(message.to_string(), Style::default().fg(scheme.text)),
    ];
    if let Some(hint) = action {
        lines.push(Line::from(""));
        lines.push(Line::styled(
            hint.to_string(),
            Style::default().fg(scheme.text_muted),
        ));
    }

    render_placeholder(frame, area, lines, scheme.error);
}

/// Rect of `percent_x` by `percent_y` of `r`, centered inside it.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let width = r.width * percent_x.min(100) / 100;
    let height = r.height * percent_y.min(100) / 100;
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}

/// Cut a string to a column budget, appending dots when it was longer.
///
/// Offer titles and store names are mostly Hangul, which is double-width in
/// the terminal, so byte or char counts would overflow the cells.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }

    // No room for dots below four cells; plain cut instead.
    let ellipsis = if max_width > 3 { "..." } else { "" };
    let budget = max_width - ellipsis.len();

    let mut used = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push_str(ellipsis);
    out
}

/// Compact count for badges: 950, 1.2K, 2.5M.
pub fn format_count(count: u64) -> String {
    match count {
        0..=999 => count.to_string(),
        1_000..=999_999 => format!("{:.1}K", count as f64 / 1_000.0),
        _ => format!("{:.1}M", count as f64 / 1_000_000.0),
    }
}

/// Horizontal view switcher for the header row.
///
/// Span widths are part of the contract: the mouse handler converts header
/// clicks to tabs by column offset.
pub fn render_tab_bar(
    frame: &mut ratatui::Frame,
    area: Rect,
    tabs: &[(&str, &str)],
    selected: usize,
    accent: Color,
) {
    let scheme = colors();
    let mut spans = Vec::with_capacity(tabs.len() * 3);

    for (i, (name, shortcut)) in tabs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(scheme.border)));
        }
        let (key_style, name_style) = if i == selected {
            (
                Style::default().fg(accent).bold(),
                Style::default()
                    .fg(scheme.badge_fg_dark)
                    .bg(accent)
                    .bold(),
            )
        } else {
            let muted = Style::default().fg(scheme.text_muted);
            (muted, muted)
        };
        spans.push(Span::styled(format!("[{shortcut}]"), key_style));
        spans.push(Span::styled(format!(" {name} "), name_style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Smallest terminal the layout can fit in.
pub const MIN_WIDTH: u16 = 80;
pub const MIN_HEIGHT: u16 = 24;

/// Err carries the required size when the terminal is too small.
pub fn check_terminal_size(width: u16, height: u16) -> Result<(), (u16, u16)> {
    if width < MIN_WIDTH || height < MIN_HEIGHT {
        Err((MIN_WIDTH, MIN_HEIGHT))
    } else {
        Ok(())
    }
}

/// Full-screen notice shown instead of the UI when the terminal is too small.
pub fn render_size_warning(
    frame: &mut ratatui::Frame,
    area: Rect,
    need_width: u16,
    need_height: u16,
) {
    let scheme = colors();
    let lines = vec![
        Line::styled(
            "Terminal too small",
            Style::default().fg(scheme.warning).bold(),
        ),
        Line::from(""),
        Line::from(vec![
            Span::raw(format!("have {}x{}, ", area.width, area.height)),
            Span::styled(
                format!("need {need_width}x{need_height}"),
                Style::default().fg(scheme.accent),
            ),
        ]),
    ];

    render_placeholder(frame, area, lines, scheme.warning);
}
