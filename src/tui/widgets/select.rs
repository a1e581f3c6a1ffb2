//! Dropdown menus for the filter bar.
//!
//! Two flavors share one state machine: the facet menus are multi-select
//! (toggling an option keeps the menu open, so several tags can be picked
//! in one visit), while the sort menu closes as soon as a key is picked.
//! Both close on Escape and on a click anywhere outside the dropdown.
//!
//! The menus never own the selection. They read the [`Facet`] or
//! [`SortKey`] they render and emit [`MenuAction`]s for the app to apply,
//! which keeps the ALL-collapse rules in one place.

use crate::catalog::{Facet, FacetKind, SortKey};
use crate::tui::theme::colors;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

/// What the app should do with the row the user activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Select the ALL sentinel for the facet.
    SelectAll,
    /// Toggle the vocabulary option at this index.
    ToggleOption(usize),
}

/// Dropdown state shared by both menu flavors.
///
/// The rendered rectangles are recorded each frame so mouse events can be
/// routed without re-deriving the layout.
#[derive(Debug, Clone, Copy, Default)]
struct MenuState {
    open: bool,
    highlighted: usize,
    trigger: Rect,
    dropdown: Rect,
}

impl MenuState {
    fn open_at(&mut self, highlighted: usize) {
        self.open = true;
        self.highlighted = highlighted;
    }

    fn close(&mut self) {
        self.open = false;
        self.dropdown = Rect::default();
    }

    fn highlight_next(&mut self, rows: usize) {
        if rows > 0 && self.highlighted < rows - 1 {
            self.highlighted += 1;
        }
    }

    fn highlight_prev(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }
}

/// Map a click row inside a bordered dropdown back to an entry index.
fn row_at(dropdown: Rect, x: u16, y: u16, rows: usize) -> Option<usize> {
    if x <= dropdown.x || x >= dropdown.x.saturating_add(dropdown.width).saturating_sub(1) {
        return None;
    }
    let first_row = dropdown.y.saturating_add(1);
    if y < first_row {
        return None;
    }
    let idx = usize::from(y - first_row);
    (idx < rows).then_some(idx)
}

fn contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x
        && x < rect.x.saturating_add(rect.width)
        && y >= rect.y
        && y < rect.y.saturating_add(rect.height)
}

// ============================================================================
// Facet Menu (multi-select)
// ============================================================================

/// Multi-select dropdown over one facet's vocabulary.
///
/// Row 0 is the ALL entry; rows 1.. mirror the vocabulary in order.
#[derive(Debug, Clone, Copy)]
pub struct FacetMenu {
    kind: FacetKind,
    state: MenuState,
}

impl FacetMenu {
    #[must_use]
    pub fn new(kind: FacetKind) -> Self {
        Self {
            kind,
            state: MenuState::default(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> FacetKind {
        self.kind
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.open
    }

    pub fn open(&mut self) {
        self.state.open_at(0);
    }

    pub fn close(&mut self) {
        self.state.close();
    }

    pub fn highlight_next(&mut self, facet: &Facet) {
        self.state.highlight_next(facet.options().len() + 1);
    }

    pub fn highlight_prev(&mut self) {
        self.state.highlight_prev();
    }

    /// Action for the highlighted row (Enter/Space).
    #[must_use]
    pub fn action_for_highlight(&self) -> MenuAction {
        if self.state.highlighted == 0 {
            MenuAction::SelectAll
        } else {
            MenuAction::ToggleOption(self.state.highlighted - 1)
        }
    }

    /// Action for a click, if it lands on a dropdown row.
    #[must_use]
    pub fn action_for_click(&self, facet: &Facet, x: u16, y: u16) -> Option<MenuAction> {
        if !self.state.open {
            return None;
        }
        let idx = row_at(self.state.dropdown, x, y, facet.options().len() + 1)?;
        Some(if idx == 0 {
            MenuAction::SelectAll
        } else {
            MenuAction::ToggleOption(idx - 1)
        })
    }

    #[must_use]
    pub fn hit_trigger(&self, x: u16, y: u16) -> bool {
        contains(self.state.trigger, x, y)
    }

    #[must_use]
    pub fn hit_dropdown(&self, x: u16, y: u16) -> bool {
        self.state.open && contains(self.state.dropdown, x, y)
    }

    /// Closed-state label: the facet name, plus the selected count when a
    /// subset is active.
    #[must_use]
    pub fn trigger_label(&self, facet: &Facet) -> String {
        if facet.is_all() {
            format!("{}: All", self.kind.label())
        } else {
            format!("{} ({})", self.kind.label(), facet.selected_count())
        }
    }
}

/// Render the closed trigger button for a facet menu.
pub fn render_facet_trigger(
    frame: &mut ratatui::Frame,
    area: Rect,
    facet: &Facet,
    menu: &mut FacetMenu,
    focused: bool,
) {
    menu.state.trigger = area;

    let scheme = colors();
    let style = if menu.is_open() || focused {
        Style::default()
            .fg(scheme.badge_fg_dark)
            .bg(scheme.facet_color(menu.kind))
            .bold()
    } else if facet.is_all() {
        Style::default().fg(scheme.text_muted)
    } else {
        Style::default().fg(scheme.facet_color(menu.kind)).bold()
    };

    let arrow = if menu.is_open() { "▴" } else { "▾" };
    let label = format!(" {} {} ", menu.trigger_label(facet), arrow);
    frame.render_widget(Paragraph::new(Line::styled(label, style)), area);
}

/// Render the open dropdown for a facet menu, on top of the content.
pub fn render_facet_dropdown(
    frame: &mut ratatui::Frame,
    full_area: Rect,
    facet: &Facet,
    menu: &mut FacetMenu,
) {
    if !menu.state.open {
        return;
    }

    let scheme = colors();
    let rows = facet.options().len() + 1;
    let width = dropdown_width(facet, menu.kind);
    let area = dropdown_area(menu.state.trigger, full_area, rows, width);
    menu.state.dropdown = area;

    let mut lines = Vec::with_capacity(rows);
    lines.push(menu_row(
        "All",
        facet.is_all(),
        menu.state.highlighted == 0,
    ));
    for (i, option) in facet.options().iter().enumerate() {
        lines.push(menu_row(
            option,
            facet.is_selected(option),
            menu.state.highlighted == i + 1,
        ));
    }

    frame.render_widget(Clear, area);
    let dropdown = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(scheme.facet_color(menu.kind))),
    );
    frame.render_widget(dropdown, area);
}

// ============================================================================
// Sort Menu (single-select)
// ============================================================================

/// Single-select dropdown over the six sort keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortMenu {
    state: MenuState,
}

impl SortMenu {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.open
    }

    /// Open with the highlight on the active key.
    pub fn open_at(&mut self, current: SortKey) {
        let idx = SortKey::ALL.iter().position(|k| *k == current).unwrap_or(0);
        self.state.open_at(idx);
    }

    pub fn close(&mut self) {
        self.state.close();
    }

    pub fn highlight_next(&mut self) {
        self.state.highlight_next(SortKey::ALL.len());
    }

    pub fn highlight_prev(&mut self) {
        self.state.highlight_prev();
    }

    /// The key under the highlight (Enter picks it and closes).
    #[must_use]
    pub fn highlighted_key(&self) -> SortKey {
        SortKey::ALL[self.state.highlighted.min(SortKey::ALL.len() - 1)]
    }

    /// The key under a click, if it lands on a dropdown row.
    #[must_use]
    pub fn key_for_click(&self, x: u16, y: u16) -> Option<SortKey> {
        if !self.state.open {
            return None;
        }
        let idx = row_at(self.state.dropdown, x, y, SortKey::ALL.len())?;
        Some(SortKey::ALL[idx])
    }

    #[must_use]
    pub fn hit_trigger(&self, x: u16, y: u16) -> bool {
        contains(self.state.trigger, x, y)
    }

    #[must_use]
    pub fn hit_dropdown(&self, x: u16, y: u16) -> bool {
        self.state.open && contains(self.state.dropdown, x, y)
    }
}

/// Render the closed trigger button for the sort menu.
pub fn render_sort_trigger(
    frame: &mut ratatui::Frame,
    area: Rect,
    current: SortKey,
    menu: &mut SortMenu,
    focused: bool,
) {
    menu.state.trigger = area;

    let scheme = colors();
    let style = if menu.is_open() || focused {
        Style::default()
            .fg(scheme.badge_fg_dark)
            .bg(scheme.accent)
            .bold()
    } else {
        Style::default().fg(scheme.accent)
    };

    let arrow = if menu.is_open() { "▴" } else { "▾" };
    let label = format!(" Sort: {} {} ", current.label(), arrow);
    frame.render_widget(Paragraph::new(Line::styled(label, style)), area);
}

/// Render the open dropdown for the sort menu.
pub fn render_sort_dropdown(
    frame: &mut ratatui::Frame,
    full_area: Rect,
    current: SortKey,
    menu: &mut SortMenu,
) {
    if !menu.state.open {
        return;
    }

    let scheme = colors();
    let rows = SortKey::ALL.len();
    let width = SortKey::ALL
        .iter()
        .map(|k| k.label().len() as u16)
        .max()
        .unwrap_or(0)
        + 6;
    let area = dropdown_area(menu.state.trigger, full_area, rows, width);
    menu.state.dropdown = area;

    let lines: Vec<Line> = SortKey::ALL
        .iter()
        .enumerate()
        .map(|(i, key)| menu_row(key.label(), *key == current, menu.state.highlighted == i))
        .collect();

    frame.render_widget(Clear, area);
    let dropdown = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(scheme.accent)),
    );
    frame.render_widget(dropdown, area);
}

// ============================================================================
// Shared rendering helpers
// ============================================================================

fn menu_row(label: &str, checked: bool, highlighted: bool) -> Line<'static> {
    let scheme = colors();
    let marker = if checked { "✓" } else { " " };
    let style = if highlighted {
        Style::default()
            .bg(scheme.selection_bg)
            .fg(scheme.text)
            .bold()
    } else if checked {
        Style::default().fg(scheme.text)
    } else {
        Style::default().fg(scheme.text_muted)
    };
    Line::styled(format!(" {marker} {label} "), style)
}

fn dropdown_width(facet: &Facet, kind: FacetKind) -> u16 {
    use unicode_width::UnicodeWidthStr;
    facet
        .options()
        .iter()
        .map(|o| UnicodeWidthStr::width(o.as_str()) as u16)
        .chain(std::iter::once(kind.label().len() as u16))
        .max()
        .unwrap_or(0)
        + 6
}

/// Place the dropdown under its trigger, clamped to the frame.
fn dropdown_area(trigger: Rect, full_area: Rect, rows: usize, width: u16) -> Rect {
    let height = (rows as u16).saturating_add(2);
    let max_x = full_area
        .x
        .saturating_add(full_area.width)
        .saturating_sub(width);
    let x = trigger.x.min(max_x.max(full_area.x));
    let y = trigger.y.saturating_add(1);
    let height = height.min(full_area.height.saturating_sub(y.saturating_sub(full_area.y)));
    Rect {
        x,
        y,
        width: width.min(full_area.width),
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facet() -> Facet {
        Facet::new(["음식", "카페", "생활", "문화"])
    }

    #[test]
    fn facet_menu_starts_closed_with_all_label() {
        let menu = FacetMenu::new(FacetKind::Category);
        assert!(!menu.is_open());
        assert_eq!(menu.trigger_label(&facet()), "Category: All");
    }

    #[test]
    fn trigger_label_shows_selected_count() {
        let menu = FacetMenu::new(FacetKind::Category);
        let mut f = facet();
        f.toggle("음식");
        f.toggle("카페");
        assert_eq!(menu.trigger_label(&f), "Category (2)");
    }

    #[test]
    fn highlight_maps_to_all_then_options() {
        let mut menu = FacetMenu::new(FacetKind::Category);
        let f = facet();
        menu.open();
        assert_eq!(menu.action_for_highlight(), MenuAction::SelectAll);

        menu.highlight_next(&f);
        assert_eq!(menu.action_for_highlight(), MenuAction::ToggleOption(0));

        // Clamp at the last row.
        for _ in 0..10 {
            menu.highlight_next(&f);
        }
        assert_eq!(menu.action_for_highlight(), MenuAction::ToggleOption(3));

        menu.highlight_prev();
        assert_eq!(menu.action_for_highlight(), MenuAction::ToggleOption(2));
    }

    #[test]
    fn sort_menu_opens_on_current_key() {
        let mut menu = SortMenu::new();
        menu.open_at(SortKey::DiscountDesc);
        assert_eq!(menu.highlighted_key(), SortKey::DiscountDesc);

        menu.highlight_next();
        assert_eq!(menu.highlighted_key(), SortKey::DiscountAsc);
    }

    #[test]
    fn click_rows_map_inside_borders() {
        // Dropdown at (10, 5), 12 wide, 6 tall: rows start at y=6, x in 11..21.
        let rect = Rect::new(10, 5, 12, 6);
        assert_eq!(row_at(rect, 12, 6, 4), Some(0));
        assert_eq!(row_at(rect, 12, 9, 4), Some(3));
        // Border column and top border row miss.
        assert_eq!(row_at(rect, 10, 6, 4), None);
        assert_eq!(row_at(rect, 12, 5, 4), None);
        // Below the listed rows misses even inside the rect.
        assert_eq!(row_at(rect, 12, 10, 4), None);
    }

    #[test]
    fn closed_menu_swallows_no_clicks() {
        let menu = FacetMenu::new(FacetKind::Organization);
        assert_eq!(menu.action_for_click(&facet(), 12, 6), None);
        assert!(!menu.hit_dropdown(12, 6));
    }
}
