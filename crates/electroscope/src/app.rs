//! The application model: routes events to query and selection state,
//! issues fetch and delete commands, and folds their results back in.

use std::sync::Arc;

use tea::{Cmd, KeyMsg, KeyType, Message, Model, WindowSizeMsg};
use tracing::{debug, warn};
use trinkets::TextInput;
use trinkets::spinner::{SpinnerModel, TickMsg};
use trinkets::table::{Column, Table};

use crate::api::Client;
use crate::config::Config;
use crate::data::{Dispatch, SortColumn, SortDir, StatusCounts};
use crate::messages::{
    DeleteDoneMsg, DeleteFailedMsg, FetchFailedMsg, PageLoadedMsg, SearchTickMsg,
};
use crate::query::{QueryState, SEARCH_DEBOUNCE};
use crate::selection::Selection;
use crate::theme::Theme;
use crate::view;

/// Which pane receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    /// The dispatch table.
    Table,
    /// The search input.
    Search,
}

/// Transient one-line feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Notice {
    /// Neutral feedback (deletions, refreshes).
    Info(String),
    /// Something went wrong.
    Error(String),
}

/// The delete confirmation dialog.
#[derive(Debug, Clone, Default)]
pub(crate) struct Dialog {
    /// Set while the delete command is in flight.
    pub pending: bool,
    /// Error from a failed delete, shown inside the dialog.
    pub error: Option<String>,
}

/// Table column index per sortable column; column 0 is the selection
/// mark, column 2 the dispatch id.
fn table_column(sort: SortColumn) -> usize {
    match sort {
        SortColumn::Lattice => 1,
        SortColumn::Status => 3,
        SortColumn::Started => 4,
        SortColumn::Ended => 5,
    }
}

/// The dispatch dashboard.
pub struct App {
    pub(crate) client: Arc<dyn Client>,
    pub(crate) theme: Theme,
    pub(crate) source: String,
    pub(crate) query: QueryState,
    pub(crate) selection: Selection,
    pub(crate) dispatches: Vec<Dispatch>,
    pub(crate) counts: StatusCounts,
    pub(crate) total: u64,
    pub(crate) table: Table,
    pub(crate) search: TextInput,
    pub(crate) spinner: SpinnerModel,
    pub(crate) dialog: Option<Dialog>,
    pub(crate) notice: Option<Notice>,
    pub(crate) focus: Focus,
    pub(crate) width: usize,
}

impl App {
    /// Create the application model.
    ///
    /// The model starts in the loading state; `init` issues the first
    /// fetch.
    #[must_use]
    pub fn new(client: Arc<dyn Client>, config: &Config) -> Self {
        let source = config
            .server
            .clone()
            .unwrap_or_else(|| format!("demo (seed {})", config.seed));

        let per_page = config.page_size;
        let columns = vec![
            Column::new("", 3),
            Column::new(SortColumn::Lattice.title(), 26),
            Column::new("Dispatch", 11),
            Column::new(SortColumn::Status.title(), 12),
            Column::new(SortColumn::Started.title(), 13),
            Column::new(SortColumn::Ended.title(), 13),
            Column::new("Electrons", 9),
        ];

        #[allow(clippy::cast_possible_truncation)]
        let skeleton = per_page as usize;
        let table = Table::new()
            .columns(columns)
            .focused(true)
            .skeleton_rows(skeleton);

        let mut search = TextInput::new();
        search.set_prompt("Search: ");
        search.set_placeholder("press / to filter");

        let theme = if config.color {
            Theme::dark()
        } else {
            Theme::plain()
        };

        let mut app = Self {
            client,
            theme,
            source,
            query: QueryState::new(per_page),
            selection: Selection::new(),
            dispatches: Vec::new(),
            counts: StatusCounts::default(),
            total: 0,
            table,
            search,
            spinner: SpinnerModel::new(),
            dialog: None,
            notice: None,
            focus: Focus::Table,
            width: 100,
        };
        app.table.set_loading(true);
        app.sync_sort_indicator();
        app
    }

    /// Rows currently loaded.
    #[must_use]
    pub fn dispatches(&self) -> &[Dispatch] {
        &self.dispatches
    }

    /// Total matching dispatches across pages.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Per-status totals from the latest fetch.
    #[must_use]
    pub fn counts(&self) -> &StatusCounts {
        &self.counts
    }

    /// The query state.
    #[must_use]
    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// The selection state.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Whether the delete confirmation dialog is open.
    #[must_use]
    pub fn dialog_open(&self) -> bool {
        self.dialog.is_some()
    }

    /// Whether the search input has focus.
    #[must_use]
    pub fn searching(&self) -> bool {
        self.focus == Focus::Search
    }

    /// The current transient notice text, if any.
    #[must_use]
    pub fn notice_text(&self) -> Option<&str> {
        self.notice.as_ref().map(|n| match n {
            Notice::Info(s) | Notice::Error(s) => s.as_str(),
        })
    }

    fn fetch_cmd(&self, generation: u64) -> Cmd {
        let client = Arc::clone(&self.client);
        let query = self.query.to_query();
        Cmd::new(move || match client.list(&query) {
            Ok(page) => Message::new(PageLoadedMsg { generation, page }),
            Err(error) => Message::new(FetchFailedMsg { generation, error }),
        })
    }

    fn delete_cmd(&self) -> Cmd {
        let client = Arc::clone(&self.client);
        let ids = self.selection.ids();
        Cmd::new(move || match client.delete(&ids) {
            Ok(deleted) => Message::new(DeleteDoneMsg { deleted }),
            Err(error) => Message::new(DeleteFailedMsg { error }),
        })
    }

    fn spin_cmd(&self) -> Cmd {
        let msg = self.spinner.tick();
        Cmd::new(move || msg)
    }

    /// Begin a fetch of the current query.
    fn issue_fetch(&mut self) -> Option<Cmd> {
        let was_loading = self.query.is_loading();
        let generation = self.query.begin_fetch();
        self.table.set_loading(true);

        let spin = if was_loading {
            None
        } else {
            Some(self.spin_cmd())
        };
        tea::batch(vec![Some(self.fetch_cmd(generation)), spin])
    }

    /// Rebuild table rows from loaded dispatches and selection marks.
    fn sync_rows(&mut self) {
        let rows = self
            .dispatches
            .iter()
            .map(|d| view::dispatch_row(d, self.selection.contains(&d.dispatch_id)))
            .collect();
        self.table.set_rows(rows);
    }

    fn sync_sort_indicator(&mut self) {
        let descending = self.query.order() == SortDir::Desc;
        self.table
            .set_sort_indicator(Some(table_column(self.query.sort())), descending);
    }

    fn change_page(&mut self, forward: bool) -> Option<Cmd> {
        let moved = if forward {
            self.query.next_page()
        } else {
            self.query.prev_page()
        };
        if moved { self.issue_fetch() } else { None }
    }

    fn on_page_loaded(&mut self, loaded: PageLoadedMsg) -> Option<Cmd> {
        if !self.query.finish_fetch(loaded.generation) {
            debug!(generation = loaded.generation, "dropping stale page");
            return None;
        }

        self.dispatches = loaded.page.dispatches;
        self.counts = loaded.page.counts;
        self.total = loaded.page.total;
        if let Some(Notice::Error(_)) = self.notice {
            self.notice = None;
        }
        self.table.set_loading(false);
        self.sync_rows();

        // Deletions can leave the current page beyond the last one;
        // clamp and refetch the page that actually exists.
        if self.query.set_total(loaded.page.total) {
            return self.issue_fetch();
        }
        None
    }

    fn on_fetch_failed(&mut self, failed: &FetchFailedMsg) {
        if !self.query.finish_fetch(failed.generation) {
            debug!(generation = failed.generation, "dropping stale failure");
            return;
        }
        warn!(error = %failed.error, "fetch failed");
        self.table.set_loading(false);
        self.notice = Some(Notice::Error(format!("fetch failed: {}", failed.error)));
    }

    fn on_delete_done(&mut self, done: DeleteDoneMsg) -> Option<Cmd> {
        self.selection.clear();
        self.dialog = None;
        self.notice = Some(Notice::Info(if done.deleted == 1 {
            "deleted 1 dispatch".to_string()
        } else {
            format!("deleted {} dispatches", done.deleted)
        }));
        self.issue_fetch()
    }

    fn on_delete_failed(&mut self, failed: &DeleteFailedMsg) {
        warn!(error = %failed.error, "delete failed");
        if let Some(dialog) = &mut self.dialog {
            dialog.pending = false;
            dialog.error = Some(failed.error.to_string());
        }
    }

    fn on_dialog_key(&mut self, key: &KeyMsg) -> Option<Cmd> {
        let pending = self.dialog.as_ref().is_some_and(|d| d.pending);
        if pending {
            return None;
        }

        match key.key_type {
            KeyType::Enter => self.confirm_delete(),
            KeyType::Esc => {
                self.dialog = None;
                None
            }
            KeyType::Runes => match key.runes.as_slice() {
                ['y'] => self.confirm_delete(),
                ['n'] => {
                    self.dialog = None;
                    None
                }
                _ => None,
            },
            _ => None,
        }
    }

    fn confirm_delete(&mut self) -> Option<Cmd> {
        let dialog = self.dialog.as_mut()?;
        dialog.pending = true;
        dialog.error = None;
        Some(self.delete_cmd())
    }

    fn on_search_key(&mut self, key: &KeyMsg) -> Option<Cmd> {
        match key.key_type {
            KeyType::Enter => {
                self.search.blur();
                self.table.focus();
                self.focus = Focus::Table;
                if self.query.apply_search_now() {
                    return self.issue_fetch();
                }
                None
            }
            KeyType::Esc => {
                self.query.cancel_search_edit();
                self.search.set_value(self.query.debounced_search());
                self.search.blur();
                self.table.focus();
                self.focus = Focus::Table;
                None
            }
            _ => {
                let msg = Message::new(key.clone());
                if self.search.update(&msg) {
                    let seq = self.query.edit_search(&self.search.value());
                    return Some(tea::tick(SEARCH_DEBOUNCE, move |_| {
                        Message::new(SearchTickMsg { seq })
                    }));
                }
                None
            }
        }
    }

    fn on_table_key(&mut self, key: &KeyMsg) -> Option<Cmd> {
        match key.key_type {
            KeyType::Runes => match key.runes.as_slice() {
                ['q'] => Some(tea::quit()),
                ['/'] => {
                    self.table.blur();
                    self.search.focus();
                    self.focus = Focus::Search;
                    None
                }
                ['a'] => {
                    self.selection.toggle_all(&self.dispatches);
                    self.sync_rows();
                    None
                }
                ['d'] => {
                    if !self.selection.is_empty() {
                        self.dialog = Some(Dialog::default());
                    }
                    None
                }
                ['r'] => self.issue_fetch(),
                ['h'] => self.change_page(false),
                ['l'] => self.change_page(true),
                ['j'] => {
                    self.table.move_down(1);
                    None
                }
                ['k'] => {
                    self.table.move_up(1);
                    None
                }
                ['g'] => {
                    self.table.goto_top();
                    None
                }
                ['G'] => {
                    self.table.goto_bottom();
                    None
                }
                [c @ '1'..='4'] => {
                    let idx = (*c as usize) - ('1' as usize);
                    self.query.set_sort(SortColumn::ALL[idx]);
                    self.sync_sort_indicator();
                    self.issue_fetch()
                }
                _ => None,
            },
            KeyType::Space => {
                if let Some(id) = self
                    .dispatches
                    .get(self.table.cursor())
                    .map(|d| d.dispatch_id.clone())
                {
                    self.selection.toggle(&id);
                    self.sync_rows();
                }
                None
            }
            KeyType::Left => self.change_page(false),
            KeyType::Right => self.change_page(true),
            KeyType::Up => {
                self.table.move_up(1);
                None
            }
            KeyType::Down => {
                self.table.move_down(1);
                None
            }
            KeyType::Home => {
                self.table.goto_top();
                None
            }
            KeyType::End => {
                self.table.goto_bottom();
                None
            }
            KeyType::Esc => {
                self.notice = None;
                None
            }
            _ => None,
        }
    }

    fn on_key(&mut self, key: &KeyMsg) -> Option<Cmd> {
        if key.key_type == KeyType::CtrlC {
            return Some(tea::quit());
        }
        if self.dialog.is_some() {
            return self.on_dialog_key(key);
        }
        match self.focus {
            Focus::Search => self.on_search_key(key),
            Focus::Table => self.on_table_key(key),
        }
    }
}

impl Model for App {
    fn init(&self) -> Option<Cmd> {
        // Generation zero is reserved in QueryState::new for this fetch.
        tea::batch(vec![Some(self.fetch_cmd(0)), Some(self.spin_cmd())])
    }

    fn update(&mut self, msg: Message) -> Option<Cmd> {
        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            self.width = usize::from(size.width);
            return None;
        }

        if msg.is::<TickMsg>() {
            if self.query.is_loading() {
                return self.spinner.update(&msg);
            }
            return None;
        }

        if msg.is::<PageLoadedMsg>() {
            let Some(loaded) = msg.downcast::<PageLoadedMsg>() else {
                return None;
            };
            return self.on_page_loaded(loaded);
        }

        if let Some(failed) = msg.downcast_ref::<FetchFailedMsg>() {
            self.on_fetch_failed(failed);
            return None;
        }

        if let Some(tick) = msg.downcast_ref::<SearchTickMsg>() {
            if self.query.debounce_fired(tick.seq) {
                return self.issue_fetch();
            }
            return None;
        }

        if let Some(done) = msg.downcast_ref::<DeleteDoneMsg>() {
            return self.on_delete_done(*done);
        }

        if let Some(failed) = msg.downcast_ref::<DeleteFailedMsg>() {
            self.on_delete_failed(failed);
            return None;
        }

        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            return self.on_key(key);
        }

        None
    }

    fn view(&self) -> String {
        view::render(self)
    }
}
