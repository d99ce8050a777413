//! Multi-select tracking for the dispatch listing.
//!
//! The selection survives page, sort, and search changes by design, so
//! a bulk delete can span pages. It may therefore reference rows no
//! longer displayed; the delete operation sends whatever is selected.

use std::collections::BTreeSet;

use crate::data::{Dispatch, DispatchId};

/// The set of selected dispatch identifiers.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    ids: BTreeSet<DispatchId>,
}

impl Selection {
    /// Empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of one dispatch.
    pub fn toggle(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
    }

    /// Select-all toggle over the currently loaded rows.
    ///
    /// Clears exactly when the selection size equals the loaded row
    /// count; otherwise adds every loaded row, keeping picks carried
    /// over from other pages.
    pub fn toggle_all(&mut self, loaded: &[Dispatch]) {
        if self.ids.len() == loaded.len() {
            self.ids.clear();
        } else {
            for dispatch in loaded {
                self.ids.insert(dispatch.dispatch_id.clone());
            }
        }
    }

    /// Whether a dispatch is selected.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Number of selected dispatches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// The selected identifiers, in sorted order.
    #[must_use]
    pub fn ids(&self) -> Vec<DispatchId> {
        self.ids.iter().cloned().collect()
    }
}
