//! Selection state shared by the offer grid and the store table.
//!
//! Both views track a cursor over a flat item list whose length changes
//! whenever a fetch commits. All motions funnel through one clamp so the
//! cursor can never point past the data, no matter how the list shrank.

/// Rows skipped by `jump_up`/`jump_down`.
pub(crate) const JUMP_STEP: usize = 5;

/// Cursor movement over a selectable list.
///
/// Implementors only store the cursor and the item count; every motion
/// below is derived from those two accessor pairs.
pub trait ListNavigation {
    /// Current cursor index.
    fn selected(&self) -> usize;

    /// Move the cursor without bounds checking.
    fn set_selected(&mut self, idx: usize);

    /// Number of selectable items.
    fn total(&self) -> usize;

    /// Replace the item count. Call [`ListNavigation::clamp_selection`]
    /// afterwards when the cursor should survive the change.
    fn set_total(&mut self, total: usize);

    /// Last selectable index, or `None` for an empty list.
    fn last_index(&self) -> Option<usize> {
        self.total().checked_sub(1)
    }

    /// Select `target`, pulled back into range if it overshoots.
    fn select_clamped(&mut self, target: usize) {
        match self.last_index() {
            Some(last) => self.set_selected(target.min(last)),
            None => self.set_selected(0),
        }
    }

    fn select_next(&mut self) {
        self.select_clamped(self.selected().saturating_add(1));
    }

    fn select_prev(&mut self) {
        self.set_selected(self.selected().saturating_sub(1));
    }

    fn jump_up(&mut self) {
        self.set_selected(self.selected().saturating_sub(JUMP_STEP));
    }

    fn jump_down(&mut self) {
        self.select_clamped(self.selected().saturating_add(JUMP_STEP));
    }

    fn go_first(&mut self) {
        self.set_selected(0);
    }

    fn go_last(&mut self) {
        if let Some(last) = self.last_index() {
            self.set_selected(last);
        }
    }

    /// Pull the cursor back into range after the item count changed.
    fn clamp_selection(&mut self) {
        self.select_clamped(self.selected());
    }
}

/// Plain cursor-plus-count state, embeddable in view structs.
#[derive(Debug, Clone, Default)]
pub struct ListState {
    pub selected: usize,
    pub total: usize,
}

impl ListState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ListNavigation for ListState {
    fn selected(&self) -> usize {
        self.selected
    }

    fn set_selected(&mut self, idx: usize) {
        self.selected = idx;
    }

    fn total(&self) -> usize {
        self.total
    }

    fn set_total(&mut self, total: usize) {
        self.total = total;
    }
}
