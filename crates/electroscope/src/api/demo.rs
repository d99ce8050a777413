//! In-memory demo client.
//!
//! Serves a seeded dispatch dataset with the same search, sort,
//! pagination, and counting semantics as the real server, so the
//! binary runs stand-alone and tests run hermetically.

use std::cmp::Ordering;
use std::sync::Mutex;
use std::time::Duration;

use tracing::debug;

use super::{Client, ClientError};
use crate::data::generator::{DEFAULT_COUNT, Generator};
use crate::data::{Dispatch, DispatchId, ListPage, ListQuery, SortColumn, SortDir, StatusCounts};

/// Client over a seeded in-memory dispatch set.
pub struct DemoClient {
    dispatches: Mutex<Vec<Dispatch>>,
    latency: Option<Duration>,
}

impl DemoClient {
    /// Create a demo client with the default dataset size.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_count(seed, DEFAULT_COUNT)
    }

    /// Create a demo client with `count` dispatches.
    #[must_use]
    pub fn with_count(seed: u64, count: usize) -> Self {
        let dispatches = Generator::new(seed).dispatches(count);
        Self {
            dispatches: Mutex::new(dispatches),
            latency: None,
        }
    }

    /// Sleep this long before answering, for demo realism.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            std::thread::sleep(latency);
        }
    }

    /// Case-insensitive substring match over lattice name and id.
    fn matches(dispatch: &Dispatch, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let needle = needle.to_lowercase();
        dispatch.lattice_name.to_lowercase().contains(&needle)
            || dispatch.dispatch_id.to_lowercase().contains(&needle)
    }

    /// Compare by the sort column, missing timestamps last.
    fn compare(a: &Dispatch, b: &Dispatch, sort: SortColumn) -> Ordering {
        match sort {
            SortColumn::Lattice => a.lattice_name.cmp(&b.lattice_name),
            SortColumn::Status => a.status.name().cmp(b.status.name()),
            SortColumn::Started => cmp_time(a.started_at, b.started_at),
            SortColumn::Ended => cmp_time(a.ended_at, b.ended_at),
        }
    }
}

fn cmp_time(
    a: Option<chrono::DateTime<chrono::Utc>>,
    b: Option<chrono::DateTime<chrono::Utc>>,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl Client for DemoClient {
    fn list(&self, query: &ListQuery) -> Result<ListPage, ClientError> {
        self.simulate_latency();

        let dispatches = self
            .dispatches
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let mut filtered: Vec<Dispatch> = dispatches
            .iter()
            .filter(|d| Self::matches(d, &query.search))
            .cloned()
            .collect();
        drop(dispatches);

        let counts = StatusCounts::tally(&filtered);
        let total = filtered.len() as u64;

        filtered.sort_by(|a, b| {
            let ord = Self::compare(a, b, query.sort);
            match query.order {
                SortDir::Asc => ord,
                SortDir::Desc => ord.reverse(),
            }
        });

        let page: Vec<Dispatch> = filtered
            .into_iter()
            .skip(usize::try_from(query.offset).unwrap_or(usize::MAX))
            .take(usize::try_from(query.limit).unwrap_or(usize::MAX))
            .collect();

        debug!(rows = page.len(), total, "demo list");
        Ok(ListPage {
            dispatches: page,
            total,
            counts,
        })
    }

    fn delete(&self, ids: &[DispatchId]) -> Result<u64, ClientError> {
        self.simulate_latency();

        let mut dispatches = self
            .dispatches
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let before = dispatches.len();
        dispatches.retain(|d| !ids.contains(&d.dispatch_id));
        let deleted = (before - dispatches.len()) as u64;

        debug!(deleted, "demo delete");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DispatchStatus;

    fn query() -> ListQuery {
        ListQuery {
            offset: 0,
            limit: 10,
            sort: SortColumn::Started,
            order: SortDir::Desc,
            search: String::new(),
        }
    }

    #[test]
    fn test_list_is_deterministic_per_seed() {
        let a = DemoClient::new(11).list(&query()).unwrap();
        let b = DemoClient::new(11).list(&query()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_limit_and_offset_slice_pages() {
        let client = DemoClient::with_count(5, 25);

        let first = client.list(&query()).unwrap();
        assert_eq!(first.dispatches.len(), 10);
        assert_eq!(first.total, 25);

        let mut q = query();
        q.offset = 20;
        let last = client.list(&q).unwrap();
        assert_eq!(last.dispatches.len(), 5);
        assert_eq!(last.total, 25);
    }

    #[test]
    fn test_counts_cover_all_pages_not_just_one() {
        let client = DemoClient::with_count(5, 25);
        let page = client.list(&query()).unwrap();
        assert_eq!(page.counts.total, 25);
        let summed = page.counts.new_object
            + page.counts.running
            + page.counts.completed
            + page.counts.failed
            + page.counts.cancelled;
        assert_eq!(summed, 25);
    }

    #[test]
    fn test_search_filters_and_recounts() {
        let client = DemoClient::with_count(5, 30);
        let all = client.list(&query()).unwrap();

        let needle = all.dispatches[0].lattice_name[..8].to_uppercase();
        let mut q = query();
        q.search = needle.clone();
        let filtered = client.list(&q).unwrap();

        assert!(filtered.total > 0);
        assert!(filtered.total < 30);
        assert_eq!(filtered.counts.total, filtered.total);
        for d in &filtered.dispatches {
            assert!(
                d.lattice_name
                    .to_lowercase()
                    .contains(&needle.to_lowercase())
            );
        }
    }

    #[test]
    fn test_search_matches_dispatch_id() {
        let client = DemoClient::with_count(5, 10);
        let all = client.list(&query()).unwrap();

        let mut q = query();
        q.search = all.dispatches[3].dispatch_id.clone();
        let hit = client.list(&q).unwrap();
        assert_eq!(hit.total, 1);
        assert_eq!(hit.dispatches[0].dispatch_id, q.search);
    }

    #[test]
    fn test_sort_by_lattice_both_directions() {
        let client = DemoClient::with_count(5, 20);

        let mut q = query();
        q.sort = SortColumn::Lattice;
        q.order = SortDir::Asc;
        q.limit = 20;
        let asc = client.list(&q).unwrap();
        let names: Vec<_> = asc.dispatches.iter().map(|d| &d.lattice_name).collect();
        assert!(names.is_sorted());

        q.order = SortDir::Desc;
        let desc = client.list(&q).unwrap();
        let mut reversed: Vec<_> = desc.dispatches.iter().map(|d| &d.lattice_name).collect();
        reversed.reverse();
        assert!(reversed.is_sorted());
    }

    #[test]
    fn test_sort_by_ended_puts_unfinished_last() {
        let client = DemoClient::with_count(5, 40);
        let mut q = query();
        q.sort = SortColumn::Ended;
        q.order = SortDir::Asc;
        q.limit = 40;
        let page = client.list(&q).unwrap();

        let first_none = page.dispatches.iter().position(|d| d.ended_at.is_none());
        if let Some(idx) = first_none {
            assert!(page.dispatches[idx..].iter().all(|d| d.ended_at.is_none()));
        }
    }

    #[test]
    fn test_delete_removes_and_reports_count() {
        let client = DemoClient::with_count(5, 12);
        let page = client.list(&query()).unwrap();

        let ids: Vec<DispatchId> = page
            .dispatches
            .iter()
            .take(3)
            .map(|d| d.dispatch_id.clone())
            .collect();
        let deleted = client.delete(&ids).unwrap();
        assert_eq!(deleted, 3);

        let after = client.list(&query()).unwrap();
        assert_eq!(after.total, 9);
        for id in &ids {
            assert!(after.dispatches.iter().all(|d| &d.dispatch_id != id));
        }
    }

    #[test]
    fn test_delete_unknown_id_deletes_nothing() {
        let client = DemoClient::with_count(5, 5);
        let deleted = client.delete(&["no-such-id".to_string()]).unwrap();
        assert_eq!(deleted, 0);

        let page = client.list(&query()).unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.counts.get(DispatchStatus::Completed), page.counts.completed);
    }
}
