//! Listing query state: pagination, sorting, debounced search, and the
//! fetch generation guard.
//!
//! Every user action that changes the query funnels through this state,
//! which derives the fetch parameters and decides whether a fetch is
//! due. Responses carry the generation current when their fetch was
//! issued; a response with a stale generation lost the race to a newer
//! fetch and is dropped.

use std::time::Duration;

use trinkets::Paginator;

use crate::data::{ListQuery, SortColumn, SortDir};

/// Delay between the last search edit and applying the text.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(400);

/// Shortest non-empty search the server is asked about.
pub const MIN_SEARCH_LEN: usize = 3;

/// Default rows per page.
pub const DEFAULT_PER_PAGE: u64 = 10;

/// Query state for the dispatch listing.
#[derive(Debug, Clone)]
pub struct QueryState {
    /// Page navigation state (1-based).
    pub paginator: Paginator,
    sort: SortColumn,
    order: SortDir,
    search_text: String,
    debounced_search: String,
    debounce_seq: u64,
    fetch_gen: u64,
    loading: bool,
}

impl QueryState {
    /// Create query state with the given page size.
    ///
    /// Starts loading: generation zero is reserved for the initial
    /// fetch issued at program start.
    #[must_use]
    pub fn new(per_page: u64) -> Self {
        Self {
            paginator: Paginator::new().per_page(per_page),
            sort: SortColumn::Started,
            order: SortDir::Desc,
            search_text: String::new(),
            debounced_search: String::new(),
            debounce_seq: 0,
            fetch_gen: 0,
            loading: true,
        }
    }

    /// Current page (1-based).
    #[must_use]
    pub fn page(&self) -> u64 {
        self.paginator.page()
    }

    /// Row offset derived from the current page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.paginator.offset()
    }

    /// Active sort column.
    #[must_use]
    pub fn sort(&self) -> SortColumn {
        self.sort
    }

    /// Active sort direction.
    #[must_use]
    pub fn order(&self) -> SortDir {
        self.order
    }

    /// Raw search text, before debouncing.
    #[must_use]
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// The applied (debounced) search text.
    #[must_use]
    pub fn debounced_search(&self) -> &str {
        &self.debounced_search
    }

    /// Whether a fetch is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The generation of the newest fetch.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.fetch_gen
    }

    /// Fetch parameters derived from the current state.
    #[must_use]
    pub fn to_query(&self) -> ListQuery {
        ListQuery {
            offset: self.paginator.offset(),
            limit: self.paginator.get_per_page(),
            sort: self.sort,
            order: self.order,
            search: self.debounced_search.clone(),
        }
    }

    /// Activate a sort column.
    ///
    /// The already-active column toggles direction; a new column starts
    /// ascending. Either way pagination resets to page 1.
    pub fn set_sort(&mut self, column: SortColumn) {
        if self.sort == column {
            self.order = self.order.toggled();
        } else {
            self.sort = column;
            self.order = SortDir::Asc;
        }
        self.paginator.reset();
    }

    /// Go to the next page. Returns whether the page changed.
    pub fn next_page(&mut self) -> bool {
        self.paginator.next_page()
    }

    /// Go to the previous page. Returns whether the page changed.
    pub fn prev_page(&mut self) -> bool {
        self.paginator.prev_page()
    }

    /// Update the total row count from a fetch result, clamping the
    /// current page into range. Returns whether the clamp moved the
    /// page (the fetched data no longer matches the query).
    pub fn set_total(&mut self, total: u64) -> bool {
        let before = self.paginator.page();
        self.paginator.set_total_items(total);
        self.paginator.page() != before
    }

    /// Record a search edit and arm a new debounce window.
    ///
    /// Returns the sequence number the debounce timer must carry; only
    /// the newest sequence is honored when a timer fires.
    pub fn edit_search(&mut self, text: &str) -> u64 {
        self.search_text = text.to_string();
        self.debounce_seq += 1;
        self.debounce_seq
    }

    /// Handle a fired debounce timer.
    ///
    /// Stale timers (superseded by a later edit) are ignored. Text of
    /// length 1 to `MIN_SEARCH_LEN - 1` never applies; cleared text and
    /// text of `MIN_SEARCH_LEN` or longer applies when it differs from
    /// the current debounced text. Applying a new search resets
    /// pagination to page 1. Returns whether a fetch is due.
    pub fn debounce_fired(&mut self, seq: u64) -> bool {
        if seq != self.debounce_seq {
            return false;
        }

        let len = self.search_text.chars().count();
        if len > 0 && len < MIN_SEARCH_LEN {
            return false;
        }
        if self.search_text == self.debounced_search {
            return false;
        }

        self.debounced_search = self.search_text.clone();
        self.paginator.reset();
        true
    }

    /// Apply the raw search text immediately, bypassing the debounce
    /// window (used when the user confirms the edit). Same length rules
    /// as [`QueryState::debounce_fired`]; returns whether a fetch is
    /// due.
    pub fn apply_search_now(&mut self) -> bool {
        let seq = self.debounce_seq;
        self.debounce_fired(seq)
    }

    /// Discard an in-progress search edit, restoring the applied text.
    pub fn cancel_search_edit(&mut self) {
        self.search_text = self.debounced_search.clone();
        self.debounce_seq += 1;
    }

    /// Begin a new fetch: bump the generation and set the loading flag.
    /// Returns the generation the fetch command must carry.
    pub fn begin_fetch(&mut self) -> u64 {
        self.fetch_gen += 1;
        self.loading = true;
        self.fetch_gen
    }

    /// Handle a fetch response (success or failure) for `generation`.
    ///
    /// Returns `false` when the response is stale and must be dropped;
    /// otherwise clears the loading flag.
    pub fn finish_fetch(&mut self, generation: u64) -> bool {
        if generation != self.fetch_gen {
            return false;
        }
        self.loading = false;
        true
    }
}
