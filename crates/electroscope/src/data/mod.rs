//! Domain types for the dispatch dashboard.
//!
//! A *dispatch* is one execution instance of a workflow (a *lattice*)
//! on the orchestration server. The server tracks per-dispatch status
//! and the progress of its task units (*electrons*). The types here
//! mirror the server's record shape and double as the wire DTOs for
//! the JSON API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod generator;

/// Opaque dispatch identifier (a UUID string on the real server).
pub type DispatchId = String;

/// Lifecycle status of a dispatch.
///
/// Serialized with the server's uppercase wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DispatchStatus {
    /// Registered but not yet started.
    #[serde(rename = "NEW_OBJECT")]
    NewObject,
    /// Currently executing.
    #[serde(rename = "RUNNING")]
    Running,
    /// Finished successfully.
    #[serde(rename = "COMPLETED")]
    Completed,
    /// Finished with an error.
    #[serde(rename = "FAILED")]
    Failed,
    /// Cancelled before completion.
    #[serde(rename = "CANCELLED")]
    Cancelled,
}

impl DispatchStatus {
    /// Every status, in display order.
    pub const ALL: [Self; 5] = [
        Self::NewObject,
        Self::Running,
        Self::Completed,
        Self::Failed,
        Self::Cancelled,
    ];

    /// Human-readable name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::NewObject => "Pending",
            Self::Running => "Running",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Single-character status icon.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::NewObject => "○",
            Self::Running => "◐",
            Self::Completed => "●",
            Self::Failed => "✕",
            Self::Cancelled => "⊘",
        }
    }

    /// Whether the dispatch can no longer make progress.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

/// One workflow execution instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dispatch {
    /// Unique identifier.
    pub dispatch_id: DispatchId,
    /// Name of the workflow this dispatch executes.
    pub lattice_name: String,
    /// Current lifecycle status.
    pub status: DispatchStatus,
    /// When execution began; `None` while pending.
    pub started_at: Option<DateTime<Utc>>,
    /// When execution finished; `None` until terminal.
    pub ended_at: Option<DateTime<Utc>>,
    /// Total task units in the workflow.
    pub total_electrons: u32,
    /// Task units finished so far.
    pub completed_electrons: u32,
}

/// Per-status totals across the whole (filtered) collection.
///
/// Returned by every list fetch; not restricted to the current page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    /// Grand total.
    pub total: u64,
    /// Dispatches not yet started.
    pub new_object: u64,
    /// Dispatches currently running.
    pub running: u64,
    /// Dispatches that completed.
    pub completed: u64,
    /// Dispatches that failed.
    pub failed: u64,
    /// Dispatches that were cancelled.
    pub cancelled: u64,
}

impl StatusCounts {
    /// Count for one status.
    #[must_use]
    pub fn get(&self, status: DispatchStatus) -> u64 {
        match status {
            DispatchStatus::NewObject => self.new_object,
            DispatchStatus::Running => self.running,
            DispatchStatus::Completed => self.completed,
            DispatchStatus::Failed => self.failed,
            DispatchStatus::Cancelled => self.cancelled,
        }
    }

    /// Increment the count for one status (and the grand total).
    pub fn bump(&mut self, status: DispatchStatus) {
        self.total += 1;
        match status {
            DispatchStatus::NewObject => self.new_object += 1,
            DispatchStatus::Running => self.running += 1,
            DispatchStatus::Completed => self.completed += 1,
            DispatchStatus::Failed => self.failed += 1,
            DispatchStatus::Cancelled => self.cancelled += 1,
        }
    }

    /// Tally a set of dispatches.
    #[must_use]
    pub fn tally<'a, I: IntoIterator<Item = &'a Dispatch>>(dispatches: I) -> Self {
        let mut counts = Self::default();
        for dispatch in dispatches {
            counts.bump(dispatch.status);
        }
        counts
    }
}

/// A sortable display column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    /// Workflow name.
    Lattice,
    /// Lifecycle status.
    Status,
    /// Start timestamp.
    Started,
    /// End timestamp.
    Ended,
}

impl SortColumn {
    /// Every sortable column, in display order.
    pub const ALL: [Self; 4] = [Self::Lattice, Self::Status, Self::Started, Self::Ended];

    /// Field name used in the server's query string.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Lattice => "lattice_name",
            Self::Status => "status",
            Self::Started => "started_at",
            Self::Ended => "ended_at",
        }
    }

    /// Header title.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Lattice => "Lattice",
            Self::Status => "Status",
            Self::Started => "Started",
            Self::Ended => "Ended",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortDir {
    /// The opposite direction.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Value used in the server's query string.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Parameters of one list fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Number of rows to skip.
    pub offset: u64,
    /// Maximum rows to return (the page size).
    pub limit: u64,
    /// Column to sort by.
    pub sort: SortColumn,
    /// Sort direction.
    pub order: SortDir,
    /// Substring filter over lattice name and dispatch id; empty means
    /// no filter.
    pub search: String,
}

/// Result of one list fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPage {
    /// The requested page of dispatches.
    pub dispatches: Vec<Dispatch>,
    /// Total matching dispatches across all pages.
    pub total: u64,
    /// Per-status totals over the filtered collection.
    pub counts: StatusCounts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        let json = serde_json::to_string(&DispatchStatus::NewObject).unwrap();
        assert_eq!(json, "\"NEW_OBJECT\"");

        let status: DispatchStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(status, DispatchStatus::Cancelled);
    }

    #[test]
    fn test_status_terminal() {
        assert!(DispatchStatus::Completed.is_terminal());
        assert!(DispatchStatus::Failed.is_terminal());
        assert!(DispatchStatus::Cancelled.is_terminal());
        assert!(!DispatchStatus::Running.is_terminal());
        assert!(!DispatchStatus::NewObject.is_terminal());
    }

    #[test]
    fn test_counts_tally() {
        let dispatches = vec![
            sample("a", DispatchStatus::Running),
            sample("b", DispatchStatus::Running),
            sample("c", DispatchStatus::Failed),
        ];
        let counts = StatusCounts::tally(&dispatches);
        assert_eq!(counts.total, 3);
        assert_eq!(counts.running, 2);
        assert_eq!(counts.failed, 1);
        assert_eq!(counts.get(DispatchStatus::Completed), 0);
    }

    #[test]
    fn test_sort_dir_toggle() {
        assert_eq!(SortDir::Asc.toggled(), SortDir::Desc);
        assert_eq!(SortDir::Desc.toggled(), SortDir::Asc);
    }

    #[test]
    fn test_sort_column_wire_names() {
        assert_eq!(SortColumn::Lattice.wire_name(), "lattice_name");
        assert_eq!(SortColumn::Ended.wire_name(), "ended_at");
    }

    #[test]
    fn test_dispatch_round_trips_through_json() {
        let dispatch = sample("d1", DispatchStatus::Completed);
        let json = serde_json::to_string(&dispatch).unwrap();
        let back: Dispatch = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dispatch);
    }

    fn sample(id: &str, status: DispatchStatus) -> Dispatch {
        Dispatch {
            dispatch_id: id.to_string(),
            lattice_name: format!("lattice-{id}"),
            status,
            started_at: None,
            ended_at: None,
            total_electrons: 4,
            completed_electrons: 0,
        }
    }
}
