//! Page window arithmetic for listing results.
//!
//! Both listing modes share this controller. In the server-paginated mode
//! the total page count comes from the response and each snapshot is already
//! one page; in the client-filtered mode the count is computed from the
//! filtered item total and [`slice_for_page`] cuts the visible window.

/// Total page count for `total_items` items at `page_size` per page.
///
/// Never below one: an empty result set still renders as a single page.
#[must_use]
pub fn total_pages(total_items: usize, page_size: u32) -> u32 {
    let size = page_size.max(1) as usize;
    let pages = total_items.div_ceil(size).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// The half-open window of `items` belonging to `page` (1-based).
///
/// Out-of-range pages yield an empty slice rather than panicking.
#[must_use]
pub fn slice_for_page<T>(items: &[T], page: u32, page_size: u32) -> &[T] {
    let size = page_size.max(1) as usize;
    let start = (page.max(1) as usize - 1).saturating_mul(size);
    if start >= items.len() {
        return &[];
    }
    let end = (start + size).min(items.len());
    &items[start..end]
}

/// Current page position within a known page count.
///
/// Out-of-range targets are rejected, never clamped; the caller decides how
/// to recover (the listing flow resets to page 1 and re-fetches once when
/// the server reports fewer pages than the current position).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    page: u32,
    page_size: u32,
    total_pages: u32,
}

impl PageWindow {
    /// A window at page 1 of 1 with the given page size (minimum 1).
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            total_pages: 1,
        }
    }

    /// 1-based current page.
    #[must_use]
    pub fn current(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Whether the current page points past the known page count. Happens
    /// when a fetch reports fewer pages than the position we asked for.
    #[must_use]
    pub fn is_overflowing(&self) -> bool {
        self.page > self.total_pages
    }

    /// Back to page 1 without touching the page count.
    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Records a server-reported page count (minimum 1). The current page is
    /// left alone; callers check [`PageWindow::is_overflowing`] and recover.
    pub fn set_total_pages(&mut self, total: u32) {
        self.total_pages = total.max(1);
    }

    /// Recomputes the page count from a client-side item total.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_pages = total_pages(total_items, self.page_size);
    }

    /// Moves to `page` if it lies in `[1, total_pages]`.
    ///
    /// Returns false and leaves the window unchanged otherwise.
    pub fn set_page(&mut self, page: u32) -> bool {
        if page < 1 || page > self.total_pages {
            return false;
        }
        self.page = page;
        true
    }

    /// Moves one page forward, if there is one.
    pub fn next_page(&mut self) -> bool {
        self.set_page(self.page.saturating_add(1))
    }

    /// Moves one page back, if there is one.
    pub fn prev_page(&mut self) -> bool {
        self.set_page(self.page.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_is_one_page() {
        assert_eq!(total_pages(0, 9), 1);
    }

    #[test]
    fn twenty_three_items_at_nine_per_page_is_three_pages() {
        assert_eq!(total_pages(23, 9), 3);
    }

    #[test]
    fn exact_multiple_has_no_trailing_page() {
        assert_eq!(total_pages(18, 9), 2);
    }

    #[test]
    fn last_page_slice_is_partial() {
        let items: Vec<u32> = (0..23).collect();
        assert_eq!(slice_for_page(&items, 1, 9).len(), 9);
        assert_eq!(slice_for_page(&items, 3, 9).len(), 5);
        assert_eq!(slice_for_page(&items, 4, 9).len(), 0);
    }

    #[test]
    fn out_of_range_pages_are_rejected() {
        let mut window = PageWindow::new(9);
        window.set_total_items(23);
        assert_eq!(window.total_pages(), 3);

        assert!(window.set_page(3));
        assert!(!window.set_page(4));
        assert_eq!(window.current(), 3);
        assert!(!window.set_page(0));
        assert_eq!(window.current(), 3);
    }

    #[test]
    fn next_and_prev_stop_at_the_edges() {
        let mut window = PageWindow::new(9);
        window.set_total_pages(2);
        assert!(!window.prev_page());
        assert!(window.next_page());
        assert_eq!(window.current(), 2);
        assert!(!window.next_page());
        assert!(window.prev_page());
        assert_eq!(window.current(), 1);
    }

    #[test]
    fn shrinking_total_leaves_page_overflowing() {
        let mut window = PageWindow::new(9);
        window.set_total_pages(5);
        assert!(window.set_page(3));
        window.set_total_pages(1);
        assert!(window.is_overflowing());
        window.reset();
        assert!(!window.is_overflowing());
        assert_eq!(window.current(), 1);
    }

    #[test]
    fn zero_page_size_is_clamped() {
        let window = PageWindow::new(0);
        assert_eq!(window.page_size(), 1);
        assert_eq!(total_pages(10, 0), 10);
    }
}
