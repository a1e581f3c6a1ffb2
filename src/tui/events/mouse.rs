//! Mouse event handlers.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::catalog::FacetKind;
use crate::tui::app::{App, ViewKind};
use crate::tui::state::ListNavigation;

pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    // Clear status message on any mouse action
    app.clear_status_message();

    match mouse.kind {
        MouseEventKind::ScrollUp => scroll_up(app),
        MouseEventKind::ScrollDown => scroll_down(app),
        MouseEventKind::Down(MouseButton::Left) => {
            handle_left_click(app, mouse.column, mouse.row);
        }
        MouseEventKind::Down(MouseButton::Right) => {
            // Right-click closes whatever floats on top
            if app.show_help {
                app.show_help = false;
            } else {
                app.filter_bar.close_all();
            }
        }
        _ => {}
    }
}

fn scroll_up(app: &mut App) {
    if app.filter_bar.any_open() {
        if app.filter_bar.organization.is_open() {
            app.filter_bar.organization.highlight_prev();
        } else if app.filter_bar.benefit.is_open() {
            app.filter_bar.benefit.highlight_prev();
        } else {
            app.filter_bar.sort.highlight_prev();
        }
        return;
    }
    match app.view {
        ViewKind::Offers => app.grid.select_prev(),
        ViewKind::Stores => {
            if let Some(stores) = &mut app.stores {
                stores.list.select_prev();
            }
        }
        ViewKind::Detail => {}
    }
}

fn scroll_down(app: &mut App) {
    if app.filter_bar.any_open() {
        if app.filter_bar.organization.is_open() {
            let facet = app.filter.facet(FacetKind::Organization);
            app.filter_bar.organization.highlight_next(facet);
        } else if app.filter_bar.benefit.is_open() {
            let facet = app.filter.facet(FacetKind::BenefitType);
            app.filter_bar.benefit.highlight_next(facet);
        } else {
            app.filter_bar.sort.highlight_next();
        }
        return;
    }
    match app.view {
        ViewKind::Offers => app.grid.select_next(),
        ViewKind::Stores => {
            if let Some(stores) = &mut app.stores {
                stores.list.select_next();
            }
        }
        ViewKind::Detail => {}
    }
}

fn handle_left_click(app: &mut App, x: u16, y: u16) {
    // First click dismisses the help overlay.
    if app.show_help {
        app.show_help = false;
        return;
    }
    // The review form is keyboard-driven; ignore clicks while it is open.
    if app.review.is_some() {
        return;
    }

    // Open dropdowns catch the click before anything underneath.
    if app.filter_bar.any_open() {
        if app.filter_bar.organization.is_open() {
            let facet = app.filter.facet(FacetKind::Organization);
            if let Some(action) = app.filter_bar.organization.action_for_click(facet, x, y) {
                app.apply_facet_action(FacetKind::Organization, action);
                return;
            }
        } else if app.filter_bar.benefit.is_open() {
            let facet = app.filter.facet(FacetKind::BenefitType);
            if let Some(action) = app.filter_bar.benefit.action_for_click(facet, x, y) {
                app.apply_facet_action(FacetKind::BenefitType, action);
                return;
            }
        } else if let Some(picked) = app.filter_bar.sort.key_for_click(x, y) {
            app.filter_bar.sort.close();
            app.apply_sort(picked);
            return;
        }
        // Anywhere else, including the trigger itself, closes the menu.
        app.filter_bar.close_all();
        return;
    }

    // Header tab strip; positions match the layout in `ui::render_header`.
    if y == 0 {
        if (20..33).contains(&x) {
            app.detail = None;
            app.stores = None;
            app.view = ViewKind::Offers;
        } else if (33..46).contains(&x) {
            open_stores_for_selection(app);
        }
        return;
    }

    if app.view == ViewKind::Offers {
        if app.filter_bar.organization.hit_trigger(x, y) {
            app.filter_bar.organization.open();
            return;
        }
        if app.filter_bar.benefit.hit_trigger(x, y) {
            app.filter_bar.benefit.open();
            return;
        }
        if app.filter_bar.sort.hit_trigger(x, y) {
            let current = app.filter.sort();
            app.filter_bar.sort.open_at(current);
            return;
        }
        let clicked_chip = app
            .category_chips
            .iter()
            .position(|rect| rect.contains(Position::new(x, y)));
        if let Some(chip) = clicked_chip {
            app.select_category_chip(chip);
        }
    }
}

/// Open the branch listing for whichever offer the user is looking at.
pub(super) fn open_stores_for_selection(app: &mut App) {
    if app.view == ViewKind::Stores {
        return;
    }
    let offer = match app.view {
        ViewKind::Detail => app.detail.as_ref().map(|d| d.offer.clone()),
        _ => app.selected_offer().cloned(),
    };
    if let Some(offer) = offer {
        app.open_stores(&offer);
    }
}
