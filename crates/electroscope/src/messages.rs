//! Application messages.
//!
//! Results of commands (fetches, deletes, timers) flow back into the
//! update loop as these types. Fetch results carry the generation of
//! the fetch that produced them so stale responses can be dropped.

use crate::api::ClientError;
use crate::data::ListPage;

/// A list fetch succeeded.
#[derive(Debug)]
pub struct PageLoadedMsg {
    /// Generation of the fetch that produced this page.
    pub generation: u64,
    /// The fetched page.
    pub page: ListPage,
}

/// A list fetch failed.
#[derive(Debug)]
pub struct FetchFailedMsg {
    /// Generation of the failed fetch.
    pub generation: u64,
    /// What went wrong.
    pub error: ClientError,
}

/// The search debounce timer fired.
#[derive(Debug, Clone, Copy)]
pub struct SearchTickMsg {
    /// Sequence number armed by the edit that started this timer.
    pub seq: u64,
}

/// A bulk delete succeeded.
#[derive(Debug, Clone, Copy)]
pub struct DeleteDoneMsg {
    /// How many dispatches the server deleted.
    pub deleted: u64,
}

/// A bulk delete failed.
#[derive(Debug)]
pub struct DeleteFailedMsg {
    /// What went wrong.
    pub error: ClientError,
}
