//! Rendering: pure functions from application state to terminal text.

use chrono::{DateTime, Utc};

use crate::app::{App, Notice};
use crate::data::{Dispatch, DispatchStatus};
use crate::theme::Theme;

/// Selection mark cells. Plain text so table width math stays exact.
const MARK_SELECTED: &str = "[x]";
const MARK_EMPTY: &str = "[ ]";

/// Width of the delete dialog box.
const DIALOG_WIDTH: usize = 46;

/// Build one table row from a dispatch.
pub(crate) fn dispatch_row(dispatch: &Dispatch, selected: bool) -> trinkets::table::Row {
    let mark = if selected { MARK_SELECTED } else { MARK_EMPTY };
    vec![
        mark.to_string(),
        dispatch.lattice_name.clone(),
        short_id(&dispatch.dispatch_id),
        format!("{} {}", dispatch.status.icon(), dispatch.status.name()),
        format_time(dispatch.started_at),
        format_time(dispatch.ended_at),
        format!(
            "{}/{}",
            dispatch.completed_electrons, dispatch.total_electrons
        ),
    ]
}

/// First id segment, enough to identify a dispatch at a glance.
pub(crate) fn short_id(id: &str) -> String {
    let head: String = id.chars().take(8).collect();
    if head.len() < id.len() {
        format!("{head}…")
    } else {
        head
    }
}

/// Compact timestamp, em-dash for absent.
pub(crate) fn format_time(time: Option<DateTime<Utc>>) -> String {
    time.map_or_else(|| "—".to_string(), |t| t.format("%b %d %H:%M").to_string())
}

fn header(app: &App) -> String {
    let title = app.theme.title_style().render("electroscope");
    let source = app.theme.muted_style().render(&format!("· {}", app.source));
    if app.query.is_loading() {
        format!("{title} {source}  {}", app.spinner.view())
    } else {
        format!("{title} {source}")
    }
}

fn rule(app: &App) -> String {
    app.theme.muted_style().render(&"─".repeat(app.width.clamp(20, 120)))
}

fn summary_bar(app: &App) -> String {
    let theme = &app.theme;
    let counts = &app.counts;

    let mut parts = vec![format!("{} dispatches:", counts.total)];
    for status in DispatchStatus::ALL {
        let n = counts.get(status);
        let text = format!("{n} {}", status.name().to_lowercase());
        let styled = if n == 0 {
            theme.muted_style().render(&text)
        } else {
            theme.status_style(status).render(&text)
        };
        parts.push(styled);
    }
    parts.join("  ")
}

fn status_line(app: &App) -> String {
    let page = app.theme.muted_style().render(&format!(
        "page {}",
        app.query.paginator.view()
    ));
    let selected = if app.selection.is_empty() {
        app.theme.muted_style().render("none selected")
    } else {
        app.theme
            .info_style()
            .render(&format!("{} selected", app.selection.len()))
    };
    format!("{page}  ·  {selected}")
}

fn notice_line(app: &App) -> Option<String> {
    app.notice.as_ref().map(|notice| match notice {
        Notice::Info(text) => app.theme.success_style().render(text),
        Notice::Error(text) => app.theme.error_style().render(text),
    })
}

fn footer(app: &App) -> String {
    let hints = if app.searching() {
        "enter apply  esc cancel"
    } else {
        "j/k move  space select  a all  h/l page  / search  1-4 sort  d delete  r refresh  q quit"
    };
    app.theme.muted_style().render(hints)
}

fn dialog(app: &App, theme: &Theme) -> Option<Vec<String>> {
    let dialog = app.dialog.as_ref()?;
    let inner = DIALOG_WIDTH - 4;

    let question = if dialog.pending {
        "Deleting…".to_string()
    } else if app.selection.len() == 1 {
        "Delete 1 dispatch? (y/n)".to_string()
    } else {
        format!("Delete {} dispatches? (y/n)", app.selection.len())
    };

    let mut lines = vec![
        format!("┌{}┐", "─".repeat(DIALOG_WIDTH - 2)),
        boxed_line(&theme.title_style().render(&question), &question, inner),
    ];
    if let Some(error) = &dialog.error {
        let text: String = error.chars().take(inner).collect();
        lines.push(boxed_line(
            &theme.error_style().render(&text),
            &text,
            inner,
        ));
    }
    lines.push(format!("└{}┘", "─".repeat(DIALOG_WIDTH - 2)));
    Some(lines)
}

/// Pad a styled cell into the dialog box using its plain-text width.
fn boxed_line(styled: &str, plain: &str, inner: usize) -> String {
    let pad = inner.saturating_sub(tea::style::width(plain));
    format!("│ {styled}{} │", " ".repeat(pad))
}

/// Render the whole dashboard.
pub(crate) fn render(app: &App) -> String {
    let mut lines = vec![
        header(app),
        rule(app),
        app.search.view(),
        summary_bar(app),
        String::new(),
        app.table.view(),
        String::new(),
        status_line(app),
    ];

    if let Some(notice) = notice_line(app) {
        lines.push(notice);
    }
    lines.push(footer(app));

    if let Some(dialog_lines) = dialog(app, &app.theme) {
        lines.push(String::new());
        lines.extend(dialog_lines);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_short_id_truncates_uuids() {
        let id = "aabbccdd-1122-3344-5566-778899aabbcc";
        assert_eq!(short_id(id), "aabbccdd…");
        assert_eq!(short_id("tiny"), "tiny");
    }

    #[test]
    fn test_format_time() {
        let t = Utc.with_ymd_and_hms(2026, 8, 30, 14, 5, 0).unwrap();
        assert_eq!(format_time(Some(t)), "Aug 30 14:05");
        assert_eq!(format_time(None), "—");
    }

    #[test]
    fn test_dispatch_row_marks_selection() {
        let dispatch = Dispatch {
            dispatch_id: "aabbccdd-0000-0000-0000-000000000000".to_string(),
            lattice_name: "geometry-relax-prod-001".to_string(),
            status: DispatchStatus::Running,
            started_at: None,
            ended_at: None,
            total_electrons: 12,
            completed_electrons: 5,
        };

        let row = dispatch_row(&dispatch, true);
        assert_eq!(row[0], "[x]");
        assert_eq!(row[2], "aabbccdd…");
        assert!(row[3].contains("Running"));
        assert_eq!(row[6], "5/12");

        let row = dispatch_row(&dispatch, false);
        assert_eq!(row[0], "[ ]");
    }
}
