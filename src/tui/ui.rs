//! Terminal lifecycle and the top-level frame layout.

use std::io::{self, Stdout, stdout};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::app::{App, ViewKind};
use super::events::{Event, EventHandler, handle_key_event, handle_mouse_event};
use super::theme::{FooterHints, Theme, colors, render_footer_hints, set_theme};
use super::views;
use super::widgets::{
    MIN_HEIGHT, MIN_WIDTH, check_terminal_size, render_size_warning, render_tab_bar,
};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Drive the interactive browser until the user quits.
pub fn run_tui(app: &mut App) -> io::Result<()> {
    set_theme(Theme::from_name(&app.config.tui.theme));
    let mouse_enabled = app.config.tui.mouse_enabled;

    let mut terminal = enter_terminal(mouse_enabled)?;
    let events = EventHandler::new(app.config.tui.tick_rate_ms);

    while !app.should_quit {
        // Fold in whatever the background fetches have delivered, then draw.
        app.drain_commits();
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            Event::Key(key) => handle_key_event(app, key),
            Event::Mouse(mouse) => handle_mouse_event(app, mouse),
            Event::Tick => app.tick = app.tick.wrapping_add(1),
            Event::Resize(_, _) => {}
        }
    }

    leave_terminal(&mut terminal, mouse_enabled)
}

fn enter_terminal(mouse_enabled: bool) -> io::Result<Tui> {
    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen)?;
    if mouse_enabled {
        execute!(out, EnableMouseCapture)?;
    }
    Terminal::new(CrosstermBackend::new(out))
}

fn leave_terminal(terminal: &mut Tui, mouse_enabled: bool) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    if mouse_enabled {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    terminal.show_cursor()
}

fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    if check_terminal_size(area.width, area.height).is_err() {
        render_size_warning(frame, area, MIN_WIDTH, MIN_HEIGHT);
        return;
    }

    let [header, content, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(10),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(frame, header, app);
    match app.view {
        ViewKind::Offers => views::render_offers(frame, content, app),
        ViewKind::Stores => views::render_stores(frame, content, app),
        ViewKind::Detail => views::render_detail(frame, content, app),
    }
    render_footer(frame, footer, app);

    // Overlays sit on top of whichever view is active.
    views::render_review_form(frame, app);
    if app.show_help {
        views::render_help_overlay(frame);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    // The mouse handler maps header clicks by these column offsets.
    let [brand, tabs, status] = Layout::horizontal([
        Constraint::Length(20),
        Constraint::Length(26),
        Constraint::Min(0),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(" campus-partners".fg(colors().primary).bold()),
        brand,
    );

    let selected = match app.view {
        ViewKind::Offers | ViewKind::Detail => 0,
        ViewKind::Stores => 1,
    };
    render_tab_bar(
        frame,
        tabs,
        &[("Offers", "1"), ("Stores", "2")],
        selected,
        colors().accent,
    );

    let source = if app.is_sample() {
        "sample data ".fg(colors().warning)
    } else {
        "live ".fg(colors().text_muted)
    };
    frame.render_widget(Paragraph::new(Line::from(source)).right_aligned(), status);
}

/// A transient status message takes the whole footer; otherwise the
/// footer shows the key hints for the focused screen.
fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    if let Some(msg) = &app.status_message {
        let line = Line::from(vec![
            "ℹ ".fg(colors().accent),
            msg.as_str().fg(colors().accent).bold(),
        ]);
        frame.render_widget(Paragraph::new(line).centered(), area);
        return;
    }

    let view_name = if app.review.is_some() {
        "review"
    } else {
        match app.view {
            ViewKind::Offers => "offers",
            ViewKind::Stores => "stores",
            ViewKind::Detail => "detail",
        }
    };
    let hints = FooterHints::for_view(view_name);
    frame.render_widget(Paragraph::new(Line::from(render_footer_hints(&hints))), area);
}
