//! Property tests for the listing state machine and the demo client.

use proptest::prelude::*;

use electroscope::data::{ListQuery, SortColumn, SortDir};
use electroscope::query::QueryState;
use electroscope::selection::Selection;
use electroscope::{Client, DemoClient};

fn any_sort_column() -> impl Strategy<Value = SortColumn> {
    prop_oneof![
        Just(SortColumn::Lattice),
        Just(SortColumn::Status),
        Just(SortColumn::Started),
        Just(SortColumn::Ended),
    ]
}

proptest! {
    /// offset = (page - 1) * per_page, for every reachable page.
    #[test]
    fn offset_is_page_minus_one_times_per_page(page in 1u64..=10_000) {
        let mut state = QueryState::new(10);
        state.set_total(page * 10);
        state.paginator.set_page(page);
        prop_assert_eq!(state.offset(), (page - 1) * 10);
    }

    /// Select-all selects when the selection is smaller than the loaded
    /// rows and clears when the sizes match.
    #[test]
    fn select_all_toggle_hinges_on_size(n in 1usize..50, picked in 0usize..50) {
        let rows: Vec<_> = (0..n)
            .map(|i| electroscope::data::Dispatch {
                dispatch_id: format!("id-{i}"),
                lattice_name: format!("lat-{i}"),
                status: electroscope::data::DispatchStatus::Running,
                started_at: None,
                ended_at: None,
                total_electrons: 1,
                completed_electrons: 0,
            })
            .collect();

        let mut sel = Selection::new();
        for row in rows.iter().take(picked.min(n)) {
            sel.toggle(&row.dispatch_id);
        }

        let was_full = sel.len() == rows.len();
        sel.toggle_all(&rows);
        if was_full {
            prop_assert!(sel.is_empty());
        } else {
            prop_assert_eq!(sel.len(), rows.len());
        }
    }

    /// Non-empty search text shorter than three characters never
    /// applies; cleared or three-plus text applies when it changed.
    #[test]
    fn search_length_gates_fetches(text in "[a-z]{0,6}") {
        let mut state = QueryState::new(10);
        let seq = state.edit_search(&text);
        let fetched = state.debounce_fired(seq);

        match text.len() {
            1 | 2 => {
                prop_assert!(!fetched);
                prop_assert_eq!(state.debounced_search(), "");
            }
            0 => prop_assert!(!fetched), // unchanged from the initial empty text
            _ => {
                prop_assert!(fetched);
                prop_assert_eq!(state.debounced_search(), text.as_str());
                prop_assert_eq!(state.page(), 1);
            }
        }
    }

    /// Re-activating the active column toggles direction; a new column
    /// starts ascending. Sorting always lands on page 1.
    #[test]
    fn sort_activation_rules(columns in prop::collection::vec(any_sort_column(), 1..20)) {
        let mut state = QueryState::new(10);
        state.set_total(500);
        state.paginator.set_page(7);

        let mut prev = state.sort();
        let mut prev_order = state.order();
        for column in columns {
            state.set_sort(column);
            if column == prev {
                prop_assert_eq!(state.order(), prev_order.toggled());
            } else {
                prop_assert_eq!(state.order(), SortDir::Asc);
            }
            prop_assert_eq!(state.sort(), column);
            prop_assert_eq!(state.page(), 1);
            prev = column;
            prev_order = state.order();
        }
    }

    /// The demo client's pagination is a plain slice of the sorted,
    /// filtered collection: pages tile it without gaps or overlap.
    #[test]
    fn demo_pages_tile_the_collection(seed in 0u64..500, limit in 1u64..20) {
        let client = DemoClient::with_count(seed, 33);
        let full = client.list(&ListQuery {
            offset: 0,
            limit: 100,
            sort: SortColumn::Lattice,
            order: SortDir::Asc,
            search: String::new(),
        }).unwrap();

        let mut stitched = Vec::new();
        let mut offset = 0;
        while offset < full.total {
            let page = client.list(&ListQuery {
                offset,
                limit,
                sort: SortColumn::Lattice,
                order: SortDir::Asc,
                search: String::new(),
            }).unwrap();
            prop_assert_eq!(page.total, full.total);
            stitched.extend(page.dispatches);
            offset += limit;
        }
        prop_assert_eq!(stitched, full.dispatches);
    }

    /// Every row the demo client returns for a search actually matches
    /// it, and the counts agree with the filtered total.
    #[test]
    fn demo_search_results_all_match(seed in 0u64..500, needle in "[a-z]{3,5}") {
        let client = DemoClient::with_count(seed, 40);
        let page = client.list(&ListQuery {
            offset: 0,
            limit: 40,
            sort: SortColumn::Started,
            order: SortDir::Desc,
            search: needle.clone(),
        }).unwrap();

        prop_assert_eq!(page.counts.total, page.total);
        for d in &page.dispatches {
            prop_assert!(
                d.lattice_name.to_lowercase().contains(&needle)
                    || d.dispatch_id.to_lowercase().contains(&needle)
            );
        }
    }
}
