//! Generic selection state utilities.
//!
//! `SelectionState` is a single-selection cursor over a list (tabs, lanes).
//! `MultiSelection` is a checkbox-style set of ids (grid rows).

use std::collections::BTreeSet;

/// State for single-item selection in a list.
#[derive(Clone, Debug, Default)]
pub struct SelectionState {
    selected_index: Option<usize>,
}

impl SelectionState {
    /// Create a new selection state with no selection.
    pub fn new() -> Self {
        Self {
            selected_index: None,
        }
    }

    /// Get the currently selected index.
    pub fn get(&self) -> Option<usize> {
        self.selected_index
    }

    /// Set the selected index.
    pub fn set(&mut self, index: Option<usize>) {
        self.selected_index = index;
    }

    /// Move selection to the next item.
    pub fn next(&mut self, max_count: usize) {
        if max_count == 0 {
            return;
        }
        self.selected_index = Some(match self.selected_index {
            Some(idx) => (idx + 1).min(max_count - 1),
            None => 0,
        });
    }

    /// Move selection to the previous item.
    pub fn prev(&mut self) {
        self.selected_index = Some(match self.selected_index {
            Some(idx) => idx.saturating_sub(1),
            None => 0,
        });
    }
}

/// A set of selected ids, kept in ascending order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiSelection<Id: Ord + Copy> {
    ids: BTreeSet<Id>,
}

impl<Id: Ord + Copy> Default for MultiSelection<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id: Ord + Copy> MultiSelection<Id> {
    pub fn new() -> Self {
        Self {
            ids: BTreeSet::new(),
        }
    }

    /// Add the id if absent, remove it if present.
    pub fn toggle(&mut self, id: Id) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// Select every id in `all`, or clear when all of them are already selected.
    pub fn toggle_all(&mut self, all: impl IntoIterator<Item = Id>) {
        let all: BTreeSet<Id> = all.into_iter().collect();
        if self.ids == all {
            self.ids.clear();
        } else {
            self.ids = all;
        }
    }

    pub fn contains(&self, id: Id) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop ids that are no longer present in `existing`.
    pub fn retain_existing(&mut self, existing: impl IntoIterator<Item = Id>) {
        let existing: BTreeSet<Id> = existing.into_iter().collect();
        self.ids.retain(|id| existing.contains(id));
    }

    /// Return the selected ids and clear the selection.
    pub fn take(&mut self) -> Vec<Id> {
        std::mem::take(&mut self.ids).into_iter().collect()
    }

    pub fn to_vec(&self) -> Vec<Id> {
        self.ids.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_selection_is_empty() {
        let selection = SelectionState::new();
        assert!(selection.get().is_none());
    }

    #[test]
    fn test_next_clamps_to_last() {
        let mut selection = SelectionState::new();
        selection.next(2);
        assert_eq!(selection.get(), Some(0));
        selection.next(2);
        selection.next(2);
        assert_eq!(selection.get(), Some(1));
    }

    #[test]
    fn test_prev_saturates() {
        let mut selection = SelectionState::new();
        selection.set(Some(1));
        selection.prev();
        selection.prev();
        assert_eq!(selection.get(), Some(0));
    }

    #[test]
    fn test_multi_toggle() {
        let mut selection = MultiSelection::new();
        selection.toggle(3u32);
        selection.toggle(1);
        assert_eq!(selection.to_vec(), vec![1, 3]);
        selection.toggle(3);
        assert_eq!(selection.to_vec(), vec![1]);
    }

    #[test]
    fn test_multi_toggle_all() {
        let mut selection = MultiSelection::new();
        selection.toggle(2u32);
        selection.toggle_all([1, 2, 3]);
        assert_eq!(selection.to_vec(), vec![1, 2, 3]);
        selection.toggle_all([1, 2, 3]);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_multi_toggle_all_on_empty_list_clears() {
        let mut selection = MultiSelection::new();
        selection.toggle(7u32);
        selection.toggle_all(std::iter::empty());
        assert!(selection.is_empty());
    }

    #[test]
    fn test_multi_retain_existing() {
        let mut selection = MultiSelection::new();
        selection.toggle_all([1u32, 2, 3]);
        selection.retain_existing([2, 3, 4]);
        assert_eq!(selection.to_vec(), vec![2, 3]);
    }

    #[test]
    fn test_multi_take_clears() {
        let mut selection = MultiSelection::new();
        selection.toggle_all([4u32, 2]);
        assert_eq!(selection.take(), vec![2, 4]);
        assert!(selection.is_empty());
        assert!(!selection.contains(4));
    }
}
