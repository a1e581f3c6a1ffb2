//! Event handling for the TUI.
//!
//! Input is dispatched in layers: the review form captures everything while
//! it is open, then open dropdown menus, then the help overlay, and finally
//! the global and view-specific bindings.

pub mod mouse;

use std::time::Duration;

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers, MouseEvent,
};

use crate::catalog::FacetKind;
use crate::tui::app::{App, ReviewField, ViewKind};
use crate::tui::state::ListNavigation;
use crate::tui::theme::toggle_theme;

pub use mouse::handle_mouse_event;

/// Application event
#[derive(Debug)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Mouse event
    Mouse(MouseEvent),
    /// Terminal tick (for animations)
    Tick,
    /// Resize event
    Resize(u16, u16),
}

/// Event handler
pub struct EventHandler {
    /// Tick rate in milliseconds
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler
    pub const fn new(tick_rate: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate),
        }
    }

    /// Poll for the next event
    pub fn next(&self) -> Result<Event, std::io::Error> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                CrosstermEvent::Key(key) => Ok(Event::Key(key)),
                CrosstermEvent::Mouse(mouse) => Ok(Event::Mouse(mouse)),
                CrosstermEvent::Resize(width, height) => Ok(Event::Resize(width, height)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(250)
    }
}

/// Handle key events and update app state
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Clear any status message on key press
    app.clear_status_message();

    // The review form owns the keyboard while it is open.
    if app.review.is_some() {
        handle_review_form_keys(app, key);
        return;
    }

    // Open dropdown menus are next in line.
    if app.filter_bar.any_open() {
        handle_menu_keys(app, key);
        return;
    }

    // Help overlay.
    if app.show_help {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => app.show_help = false,
            _ => {}
        }
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Global key bindings
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
            return;
        }
        KeyCode::Char('T') => {
            let name = toggle_theme();
            app.set_status_message(format!("Theme: {name}"));
            return;
        }
        KeyCode::Char('1') => {
            app.detail = None;
            app.stores = None;
            app.view = ViewKind::Offers;
            return;
        }
        KeyCode::Char('2') => {
            mouse::open_stores_for_selection(app);
            return;
        }
        KeyCode::Esc => {
            app.navigate_back();
            return;
        }
        _ => {}
    }

    // View-specific key bindings
    match app.view {
        ViewKind::Offers => handle_offers_keys(app, key),
        ViewKind::Stores => handle_stores_keys(app, key),
        ViewKind::Detail => handle_detail_keys(app, key),
    }
}

fn handle_offers_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('c') => app.cycle_category(),
        KeyCode::Char('o') => app.filter_bar.organization.open(),
        KeyCode::Char('b') => app.filter_bar.benefit.open(),
        KeyCode::Char('s') => {
            let current = app.filter.sort();
            app.filter_bar.sort.open_at(current);
        }
        KeyCode::Left | KeyCode::Char('h') => app.change_page(false),
        KeyCode::Right | KeyCode::Char('l') => app.change_page(true),
        KeyCode::Up | KeyCode::Char('k') => app.grid.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.grid.select_next(),
        KeyCode::PageUp => app.grid.jump_up(),
        KeyCode::PageDown => app.grid.jump_down(),
        KeyCode::Home | KeyCode::Char('g') => app.grid.go_first(),
        KeyCode::End | KeyCode::Char('G') => app.grid.go_last(),
        KeyCode::Enter => {
            if let Some(offer) = app.selected_offer().cloned() {
                app.open_detail(offer);
            }
        }
        _ => {}
    }
}

fn handle_stores_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.change_store_page(false),
        KeyCode::Right | KeyCode::Char('l') => app.change_store_page(true),
        _ => {
            let Some(stores) = &mut app.stores else {
                return;
            };
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => stores.list.select_prev(),
                KeyCode::Down | KeyCode::Char('j') => stores.list.select_next(),
                KeyCode::PageUp => stores.list.jump_up(),
                KeyCode::PageDown => stores.list.jump_down(),
                KeyCode::Home | KeyCode::Char('g') => stores.list.go_first(),
                KeyCode::End | KeyCode::Char('G') => stores.list.go_last(),
                _ => {}
            }
        }
    }
}

fn handle_detail_keys(app: &mut App, key: KeyEvent) {
    let Some(screen) = &mut app.detail else {
        return;
    };
    match key.code {
        KeyCode::Char('[') | KeyCode::Char(']') => screen.tab = screen.tab.next(),
        KeyCode::Char('r') => app.open_review_form(),
        _ => {}
    }
}

/// Keys while a dropdown menu is open. Toggling options keeps a facet menu
/// open; picking a sort key closes the sort menu.
fn handle_menu_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.filter_bar.close_all(),
        // The menu's own key closes it again; a sibling key switches menus.
        KeyCode::Char('o') => {
            let was_open = app.filter_bar.organization.is_open();
            app.filter_bar.close_all();
            if !was_open {
                app.filter_bar.organization.open();
            }
        }
        KeyCode::Char('b') => {
            let was_open = app.filter_bar.benefit.is_open();
            app.filter_bar.close_all();
            if !was_open {
                app.filter_bar.benefit.open();
            }
        }
        KeyCode::Char('s') => {
            let was_open = app.filter_bar.sort.is_open();
            app.filter_bar.close_all();
            if !was_open {
                let current = app.filter.sort();
                app.filter_bar.sort.open_at(current);
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if app.filter_bar.organization.is_open() {
                app.filter_bar.organization.highlight_prev();
            } else if app.filter_bar.benefit.is_open() {
                app.filter_bar.benefit.highlight_prev();
            } else {
                app.filter_bar.sort.highlight_prev();
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.filter_bar.organization.is_open() {
                let facet = app.filter.facet(FacetKind::Organization);
                app.filter_bar.organization.highlight_next(facet);
            } else if app.filter_bar.benefit.is_open() {
                let facet = app.filter.facet(FacetKind::BenefitType);
                app.filter_bar.benefit.highlight_next(facet);
            } else {
                app.filter_bar.sort.highlight_next();
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            if app.filter_bar.organization.is_open() {
                let action = app.filter_bar.organization.action_for_highlight();
                app.apply_facet_action(FacetKind::Organization, action);
            } else if app.filter_bar.benefit.is_open() {
                let action = app.filter_bar.benefit.action_for_highlight();
                app.apply_facet_action(FacetKind::BenefitType, action);
            } else {
                let picked = app.filter_bar.sort.highlighted_key();
                app.filter_bar.sort.close();
                app.apply_sort(picked);
            }
        }
        _ => {}
    }
}

fn handle_review_form_keys(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('s') => app.submit_review(),
            KeyCode::Char('c') => app.should_quit = true,
            _ => {}
        }
        return;
    }

    let Some(form) = &mut app.review else {
        return;
    };
    // Swallow edits while the submission is in flight.
    if form.submitting {
        return;
    }

    match key.code {
        KeyCode::Esc => app.review = None,
        KeyCode::Tab => form.field = form.field.next(),
        KeyCode::BackTab => form.field = form.field.prev(),
        KeyCode::Backspace => {
            form.active_input_mut().pop();
        }
        KeyCode::Enter => {
            // Newlines only make sense in the review text itself.
            if form.field == ReviewField::Text {
                form.active_input_mut().push('\n');
            } else {
                form.field = form.field.next();
            }
        }
        KeyCode::Char(c) => form.active_input_mut().push(c),
        _ => {}
    }
}
