//! Sortable, selectable data table.
//!
//! The table renders a header row, a page of data rows, and a cursor
//! highlight. It is presentational: sorting and pagination happen in
//! the host's data layer, and the table only marks the active sort
//! column with a direction indicator. While the host is loading a page
//! it can switch the body to a fixed number of skeleton placeholder
//! rows so stale data and placeholders never mix.
//!
//! # Example
//!
//! ```rust
//! use trinkets::table::{Column, Table};
//!
//! let table = Table::new()
//!     .columns(vec![Column::new("Name", 20), Column::new("Status", 10)])
//!     .rows(vec![
//!         vec!["benchmark-run".into(), "RUNNING".into()],
//!         vec!["etl-nightly".into(), "COMPLETED".into()],
//!     ]);
//!
//! let view = table.view();
//! assert!(view.contains("Name"));
//! ```

use crate::binding::{Binding, matches};
use tea::{KeyMsg, Message, Style};
use unicode_width::UnicodeWidthStr;

/// A column definition: header title and display width.
#[derive(Debug, Clone)]
pub struct Column {
    /// Title shown in the header row.
    pub title: String,
    /// Width in terminal columns.
    pub width: usize,
}

impl Column {
    /// Create a column with the given title and width.
    #[must_use]
    pub fn new(title: impl Into<String>, width: usize) -> Self {
        Self {
            title: title.into(),
            width,
        }
    }
}

/// A table row: one cell value per column.
pub type Row = Vec<String>;

/// Key bindings for cursor navigation.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Move the cursor up one row.
    pub line_up: Binding,
    /// Move the cursor down one row.
    pub line_down: Binding,
    /// Move the cursor to the first row.
    pub goto_top: Binding,
    /// Move the cursor to the last row.
    pub goto_bottom: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            line_up: Binding::new().keys(&["up", "k"]).help("↑/k", "up"),
            line_down: Binding::new().keys(&["down", "j"]).help("↓/j", "down"),
            goto_top: Binding::new().keys(&["home", "g"]).help("g", "first row"),
            goto_bottom: Binding::new().keys(&["end", "G"]).help("G", "last row"),
        }
    }
}

/// Render styles for the table.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Header row.
    pub header: Style,
    /// Ordinary cells.
    pub cell: Style,
    /// The row under the cursor.
    pub cursor: Style,
    /// Skeleton placeholder rows.
    pub skeleton: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            header: Style::new().bold(),
            cell: Style::new(),
            cursor: Style::new().reverse(),
            skeleton: Style::new().faint(),
        }
    }
}

/// Sort direction indicator for the active column header.
const ARROW_ASC: &str = "↑";
const ARROW_DESC: &str = "↓";

/// Table model.
#[derive(Debug, Clone)]
pub struct Table {
    /// Key bindings.
    pub key_map: KeyMap,
    /// Render styles.
    pub styles: Styles,
    columns: Vec<Column>,
    rows: Vec<Row>,
    cursor: usize,
    focus: bool,
    sort_column: Option<usize>,
    sort_descending: bool,
    loading: bool,
    skeleton_rows: usize,
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            key_map: KeyMap::default(),
            styles: Styles::default(),
            columns: Vec::new(),
            rows: Vec::new(),
            cursor: 0,
            focus: false,
            sort_column: None,
            sort_descending: false,
            loading: false,
            skeleton_rows: 10,
        }
    }

    /// Set the columns (builder).
    #[must_use]
    pub fn columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    /// Set the rows (builder).
    #[must_use]
    pub fn rows(mut self, rows: Vec<Row>) -> Self {
        self.set_rows(rows);
        self
    }

    /// Set the focus state (builder).
    #[must_use]
    pub fn focused(mut self, focus: bool) -> Self {
        self.focus = focus;
        self
    }

    /// Set the number of skeleton rows rendered while loading (builder).
    #[must_use]
    pub fn skeleton_rows(mut self, n: usize) -> Self {
        self.skeleton_rows = n;
        self
    }

    /// Set the styles (builder).
    #[must_use]
    pub fn with_styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    /// Replace the columns.
    pub fn set_columns(&mut self, columns: Vec<Column>) {
        self.columns = columns;
    }

    /// Replace the rows, clamping the cursor into range.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        if self.cursor >= self.rows.len() {
            self.cursor = self.rows.len().saturating_sub(1);
        }
    }

    /// The current rows.
    #[must_use]
    pub fn get_rows(&self) -> &[Row] {
        &self.rows
    }

    /// Mark a column as the active sort column.
    ///
    /// `None` clears the indicator.
    pub fn set_sort_indicator(&mut self, column: Option<usize>, descending: bool) {
        self.sort_column = column;
        self.sort_descending = descending;
    }

    /// Switch the body between data rows and skeleton placeholders.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Whether skeleton placeholders are being rendered.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the table handles key messages.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focus
    }

    /// Start handling key messages.
    pub fn focus(&mut self) {
        self.focus = true;
    }

    /// Stop handling key messages.
    pub fn blur(&mut self) {
        self.focus = false;
    }

    /// The cursor position (row index).
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Set the cursor position, clamped to the last row.
    pub fn set_cursor(&mut self, n: usize) {
        self.cursor = n.min(self.rows.len().saturating_sub(1));
    }

    /// The row under the cursor, if any.
    #[must_use]
    pub fn cursor_row(&self) -> Option<&Row> {
        self.rows.get(self.cursor)
    }

    /// Move the cursor up `n` rows.
    pub fn move_up(&mut self, n: usize) {
        self.cursor = self.cursor.saturating_sub(n);
    }

    /// Move the cursor down `n` rows.
    pub fn move_down(&mut self, n: usize) {
        if !self.rows.is_empty() {
            self.cursor = (self.cursor + n).min(self.rows.len() - 1);
        }
    }

    /// Move the cursor to the first row.
    pub fn goto_top(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor to the last row.
    pub fn goto_bottom(&mut self) {
        self.cursor = self.rows.len().saturating_sub(1);
    }

    /// Handle navigation keys when focused.
    ///
    /// Keys are ignored while skeleton rows are shown; there is nothing
    /// to point the cursor at.
    pub fn update(&mut self, msg: &Message) {
        if !self.focus || self.loading {
            return;
        }
        let Some(key) = msg.downcast_ref::<KeyMsg>() else {
            return;
        };

        if matches(key, &[&self.key_map.line_up]) {
            self.move_up(1);
        } else if matches(key, &[&self.key_map.line_down]) {
            self.move_down(1);
        } else if matches(key, &[&self.key_map.goto_top]) {
            self.goto_top();
        } else if matches(key, &[&self.key_map.goto_bottom]) {
            self.goto_bottom();
        }
    }

    fn header_view(&self) -> String {
        let cells: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, col)| col.width > 0)
            .map(|(i, col)| {
                let title = if self.sort_column == Some(i) {
                    let arrow = if self.sort_descending {
                        ARROW_DESC
                    } else {
                        ARROW_ASC
                    };
                    format!("{} {arrow}", col.title)
                } else {
                    col.title.clone()
                };
                self.styles.header.render(&pad(&title, col.width))
            })
            .collect();
        cells.join(" ")
    }

    fn data_row(&self, idx: usize) -> String {
        let row = &self.rows[idx];
        let cells: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, col)| col.width > 0)
            .map(|(i, col)| {
                let value = row.get(i).map(String::as_str).unwrap_or("");
                pad(value, col.width)
            })
            .collect();
        let line = cells.join(" ");

        if idx == self.cursor && self.focus {
            self.styles.cursor.render(&line)
        } else {
            self.styles.cell.render(&line)
        }
    }

    fn skeleton_row(&self) -> String {
        let cells: Vec<String> = self
            .columns
            .iter()
            .filter(|col| col.width > 0)
            .map(|col| "░".repeat(col.width))
            .collect();
        self.styles.skeleton.render(&cells.join(" "))
    }

    /// Render the table: header plus data or skeleton body.
    #[must_use]
    pub fn view(&self) -> String {
        let mut lines = vec![self.header_view()];

        if self.loading {
            for _ in 0..self.skeleton_rows {
                lines.push(self.skeleton_row());
            }
        } else {
            for idx in 0..self.rows.len() {
                lines.push(self.data_row(idx));
            }
        }

        lines.join("\n")
    }
}

/// Truncate to `width` display columns (with an ellipsis) and pad with
/// spaces to exactly `width`.
fn pad(s: &str, width: usize) -> String {
    let truncated = truncate(s, width);
    let used = truncated.width();
    format!("{truncated}{}", " ".repeat(width.saturating_sub(used)))
}

/// Truncate a string to the given display width, adding an ellipsis
/// when anything was cut.
fn truncate(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width.saturating_sub(1) {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tea::KeyType;
    use tea::style::strip_ansi;

    fn sample() -> Table {
        Table::new()
            .columns(vec![Column::new("Name", 12), Column::new("Status", 9)])
            .rows(vec![
                vec!["alpha".into(), "RUNNING".into()],
                vec!["beta".into(), "COMPLETED".into()],
                vec!["gamma".into(), "FAILED".into()],
            ])
            .focused(true)
    }

    #[test]
    fn test_view_contains_headers_and_rows() {
        let view = strip_ansi(&sample().view());
        assert!(view.contains("Name"));
        assert!(view.contains("alpha"));
        assert!(view.contains("COMPLETED"));
    }

    #[test]
    fn test_cursor_navigation() {
        let mut table = sample();
        assert_eq!(table.cursor(), 0);

        table.move_down(1);
        assert_eq!(table.cursor(), 1);
        table.move_down(10);
        assert_eq!(table.cursor(), 2);
        table.move_up(1);
        assert_eq!(table.cursor(), 1);
        table.goto_top();
        assert_eq!(table.cursor(), 0);
        table.goto_bottom();
        assert_eq!(table.cursor(), 2);
    }

    #[test]
    fn test_update_routes_keys() {
        let mut table = sample();
        table.update(&Message::new(KeyMsg::from_char('j')));
        assert_eq!(table.cursor(), 1);
        table.update(&Message::new(KeyMsg::from_type(KeyType::Up)));
        assert_eq!(table.cursor(), 0);
        table.update(&Message::new(KeyMsg::from_char('G')));
        assert_eq!(table.cursor(), 2);
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let mut table = sample();
        table.blur();
        table.update(&Message::new(KeyMsg::from_char('j')));
        assert_eq!(table.cursor(), 0);
    }

    #[test]
    fn test_set_rows_clamps_cursor() {
        let mut table = sample();
        table.goto_bottom();
        table.set_rows(vec![vec!["only".into(), "RUNNING".into()]]);
        assert_eq!(table.cursor(), 0);
        assert_eq!(table.cursor_row().unwrap()[0], "only");
    }

    #[test]
    fn test_sort_indicator_in_header() {
        let mut table = sample();
        table.set_sort_indicator(Some(0), false);
        assert!(strip_ansi(&table.view()).contains("Name ↑"));

        table.set_sort_indicator(Some(0), true);
        assert!(strip_ansi(&table.view()).contains("Name ↓"));

        table.set_sort_indicator(None, false);
        assert!(!strip_ansi(&table.view()).contains('↑'));
    }

    #[test]
    fn test_loading_renders_fixed_skeleton_count() {
        let mut table = sample().skeleton_rows(10);
        table.set_loading(true);

        let view = strip_ansi(&table.view());
        let lines: Vec<&str> = view.lines().collect();
        // Header plus exactly ten placeholder rows, no data rows.
        assert_eq!(lines.len(), 11);
        assert!(lines[1].contains('░'));
        assert!(!view.contains("alpha"));
    }

    #[test]
    fn test_loading_ignores_navigation() {
        let mut table = sample();
        table.set_loading(true);
        table.update(&Message::new(KeyMsg::from_char('j')));
        assert_eq!(table.cursor(), 0);
    }

    #[test]
    fn test_pad_and_truncate() {
        assert_eq!(pad("ab", 4), "ab  ");
        assert_eq!(truncate("hello world", 5), "hell…");
        assert_eq!(truncate("hi", 5), "hi");
        assert_eq!(truncate("anything", 0), "");
    }

    #[test]
    fn test_missing_cells_render_empty() {
        let table = Table::new()
            .columns(vec![Column::new("A", 3), Column::new("B", 3)])
            .rows(vec![vec!["x".into()]]);
        let view = strip_ansi(&table.view());
        assert!(view.lines().nth(1).unwrap().starts_with("x  "));
    }
}
