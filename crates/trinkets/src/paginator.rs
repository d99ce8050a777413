//! Page arithmetic and pagination display.
//!
//! The [`Paginator`] tracks a 1-based page over a fixed page size and
//! derives the record offset a list query needs: for page `p`,
//! `offset = (p - 1) * per_page`. Navigation clamps to
//! `[1, total_pages]`.
//!
//! # Example
//!
//! ```rust
//! use trinkets::paginator::Paginator;
//!
//! let mut pager = Paginator::new().per_page(10);
//! pager.set_total_items(42);
//!
//! assert_eq!(pager.total_pages(), 5);
//! pager.next_page();
//! assert_eq!(pager.page(), 2);
//! assert_eq!(pager.offset(), 10);
//! ```

use crate::binding::{Binding, matches};
use tea::{KeyMsg, Message};

/// Pagination display type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Type {
    /// Arabic numerals: "2/5".
    #[default]
    Arabic,
    /// Dot indicators: "○●○○○".
    Dots,
}

/// Key bindings for page navigation.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Go to the previous page.
    pub prev_page: Binding,
    /// Go to the next page.
    pub next_page: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            prev_page: Binding::new()
                .keys(&["pgup", "left", "h"])
                .help("←/h", "prev page"),
            next_page: Binding::new()
                .keys(&["pgdown", "right", "l"])
                .help("→/l", "next page"),
        }
    }
}

/// Pagination model with a 1-based current page.
#[derive(Debug, Clone)]
pub struct Paginator {
    /// Display type (Arabic or Dots).
    pub display_type: Type,
    /// Current page, always in `[1, total_pages]`.
    page: u64,
    /// Items per page, at least 1.
    per_page: u64,
    /// Total number of pages, at least 1.
    total_pages: u64,
    /// Character for the active page in Dots mode.
    pub active_dot: String,
    /// Character for inactive pages in Dots mode.
    pub inactive_dot: String,
    /// Key bindings.
    pub key_map: KeyMap,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new()
    }
}

impl Paginator {
    /// Create a paginator on page 1 with one item per page.
    #[must_use]
    pub fn new() -> Self {
        Self {
            display_type: Type::Arabic,
            page: 1,
            per_page: 1,
            total_pages: 1,
            active_dot: "•".to_string(),
            inactive_dot: "○".to_string(),
            key_map: KeyMap::default(),
        }
    }

    /// Set the number of items per page.
    #[must_use]
    pub fn per_page(mut self, n: u64) -> Self {
        self.per_page = n.max(1);
        self
    }

    /// Set the display type.
    #[must_use]
    pub fn display_type(mut self, t: Type) -> Self {
        self.display_type = t;
        self
    }

    /// The current page (1-based).
    #[must_use]
    pub fn page(&self) -> u64 {
        self.page
    }

    /// The items per page.
    #[must_use]
    pub fn get_per_page(&self) -> u64 {
        self.per_page
    }

    /// The total number of pages.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// The record offset of the current page: `(page - 1) * per_page`.
    #[must_use]
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.per_page
    }

    /// Set the current page, clamped to `[1, total_pages]`.
    pub fn set_page(&mut self, page: u64) {
        self.page = page.clamp(1, self.total_pages);
    }

    /// Recompute total pages from an item count and clamp the current
    /// page. Zero items still yield one (empty) page.
    pub fn set_total_items(&mut self, items: u64) {
        self.total_pages = items.div_ceil(self.per_page).max(1);
        if self.page > self.total_pages {
            self.page = self.total_pages;
        }
    }

    /// Go back to page 1.
    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Go to the previous page. Returns whether the page changed.
    pub fn prev_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Go to the next page. Returns whether the page changed.
    pub fn next_page(&mut self) -> bool {
        if self.page < self.total_pages {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Whether the current page is the first.
    #[must_use]
    pub fn on_first_page(&self) -> bool {
        self.page == 1
    }

    /// Whether the current page is the last.
    #[must_use]
    pub fn on_last_page(&self) -> bool {
        self.page == self.total_pages
    }

    /// Handle key input, returning whether the page changed.
    pub fn update(&mut self, msg: &Message) -> bool {
        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            if matches(key, &[&self.key_map.next_page]) {
                return self.next_page();
            }
            if matches(key, &[&self.key_map.prev_page]) {
                return self.prev_page();
            }
        }
        false
    }

    /// Render the pagination display.
    #[must_use]
    pub fn view(&self) -> String {
        match self.display_type {
            Type::Dots => (1..=self.total_pages)
                .map(|p| {
                    if p == self.page {
                        self.active_dot.as_str()
                    } else {
                        self.inactive_dot.as_str()
                    }
                })
                .collect(),
            Type::Arabic => format!("{}/{}", self.page, self.total_pages),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tea::KeyType;

    #[test]
    fn test_new_starts_on_page_one() {
        let pager = Paginator::new();
        assert_eq!(pager.page(), 1);
        assert_eq!(pager.total_pages(), 1);
        assert_eq!(pager.offset(), 0);
    }

    #[test]
    fn test_offset_is_page_minus_one_times_per_page() {
        let mut pager = Paginator::new().per_page(10);
        pager.set_total_items(100);

        for p in 1..=10 {
            pager.set_page(p);
            assert_eq!(pager.offset(), (p - 1) * 10);
        }
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let mut pager = Paginator::new().per_page(10);

        pager.set_total_items(0);
        assert_eq!(pager.total_pages(), 1);

        pager.set_total_items(10);
        assert_eq!(pager.total_pages(), 1);

        pager.set_total_items(11);
        assert_eq!(pager.total_pages(), 2);

        pager.set_total_items(42);
        assert_eq!(pager.total_pages(), 5);
    }

    #[test]
    fn test_navigation_clamps_at_bounds() {
        let mut pager = Paginator::new().per_page(10);
        pager.set_total_items(30);

        assert!(pager.on_first_page());
        assert!(!pager.prev_page());

        assert!(pager.next_page());
        assert!(pager.next_page());
        assert!(pager.on_last_page());
        assert!(!pager.next_page());
        assert_eq!(pager.page(), 3);

        assert!(pager.prev_page());
        assert_eq!(pager.page(), 2);
    }

    #[test]
    fn test_shrinking_total_clamps_page() {
        let mut pager = Paginator::new().per_page(10);
        pager.set_total_items(50);
        pager.set_page(5);

        pager.set_total_items(12);
        assert_eq!(pager.page(), 2);
    }

    #[test]
    fn test_reset_goes_to_first_page() {
        let mut pager = Paginator::new().per_page(10);
        pager.set_total_items(50);
        pager.set_page(4);
        pager.reset();
        assert_eq!(pager.page(), 1);
        assert_eq!(pager.offset(), 0);
    }

    #[test]
    fn test_update_handles_navigation_keys() {
        let mut pager = Paginator::new().per_page(10);
        pager.set_total_items(30);

        let right = Message::new(KeyMsg::from_type(KeyType::Right));
        assert!(pager.update(&right));
        assert_eq!(pager.page(), 2);

        let h = Message::new(KeyMsg::from_char('h'));
        assert!(pager.update(&h));
        assert_eq!(pager.page(), 1);

        // First page: prev is a no-op.
        let left = Message::new(KeyMsg::from_type(KeyType::Left));
        assert!(!pager.update(&left));
    }

    #[test]
    fn test_arabic_view() {
        let mut pager = Paginator::new().per_page(10);
        pager.set_total_items(42);
        pager.set_page(2);
        assert_eq!(pager.view(), "2/5");
    }

    #[test]
    fn test_dots_view() {
        let mut pager = Paginator::new().per_page(10).display_type(Type::Dots);
        pager.set_total_items(30);
        pager.set_page(2);
        assert_eq!(pager.view(), "○•○");
    }
}
