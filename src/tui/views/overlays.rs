//! Help overlay listing every key binding.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::tui::theme::colors;

struct HelpSection {
    heading: &'static str,
    entries: &'static [(&'static str, &'static str)],
}

const SECTIONS: &[HelpSection] = &[
    HelpSection {
        heading: "Views",
        entries: &[
            ("1", "offers grid"),
            ("2", "branches of the selected partner"),
            ("Enter", "open offer detail"),
            ("Esc", "back / close"),
        ],
    },
    HelpSection {
        heading: "Offers",
        entries: &[
            ("c", "cycle category"),
            ("o", "organization menu"),
            ("b", "benefit menu"),
            ("s", "sort menu"),
            ("← →", "previous / next page"),
            ("↑ ↓ / j k", "move selection"),
            ("g / G", "first / last card"),
        ],
    },
    HelpSection {
        heading: "Menus",
        entries: &[
            ("↑ ↓", "highlight option"),
            ("Enter / Space", "toggle option"),
            ("Esc", "close menu"),
        ],
    },
    HelpSection {
        heading: "Detail & reviews",
        entries: &[
            ("[ ]", "switch info / reviews tab"),
            ("r", "write a review"),
            ("Tab", "next form field"),
            ("Ctrl+S", "submit review"),
        ],
    },
    HelpSection {
        heading: "General",
        entries: &[
            ("T", "toggle theme"),
            ("?", "this help"),
            ("q / Ctrl+C", "quit"),
        ],
    },
];

/// Render the keyboard help overlay.
pub fn render_help_overlay(frame: &mut Frame) {
    let scheme = colors();
    let area = frame.area();

    let overlay_width = 56.min(area.width.saturating_sub(4));
    let overlay_height = 28.min(area.height.saturating_sub(2));
    let overlay = Rect::new(
        area.x + (area.width.saturating_sub(overlay_width)) / 2,
        area.y + (area.height.saturating_sub(overlay_height)) / 2,
        overlay_width,
        overlay_height,
    );

    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .title(" Keyboard Shortcuts ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(scheme.accent))
        .style(Style::default().bg(scheme.background_alt));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let mut lines = Vec::new();
    for section in SECTIONS {
        lines.push(Line::from(section.heading.fg(scheme.accent).bold()));
        for &(key, action) in section.entries {
            lines.push(Line::from(vec![
                format!("{key:>width$}", width = 12).fg(scheme.primary).bold(),
                Span::raw("  "),
                action.fg(scheme.text),
            ]));
        }
        lines.push(Line::default());
    }
    lines.push(Line::from(vec![
        "Press ".fg(scheme.text_muted),
        "Esc".fg(scheme.accent),
        " or ".fg(scheme.text_muted),
        "?".fg(scheme.accent),
        " to close".fg(scheme.text_muted),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}
