//! Translation between the keyed selection set and a table's row indices

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Selectable, SelectionSet};
use crate::types::{PageQuery, PagedResult};

/// Row index of the visible page → checked.
///
/// Derived state only. Absent indices are unchecked; serialized as a JSON
/// object keyed by the index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionalSelection(BTreeMap<usize, bool>);

impl PositionalSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the given indices checked.
    #[must_use]
    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        Self(indices.into_iter().map(|i| (i, true)).collect())
    }

    pub fn set(&mut self, index: usize, checked: bool) {
        self.0.insert(index, checked);
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.0.get(&index).copied().unwrap_or(false)
    }

    /// Checked indices, ascending.
    pub fn selected_indices(&self) -> Vec<usize> {
        self.0
            .iter()
            .filter_map(|(&index, &checked)| checked.then_some(index))
            .collect()
    }

    /// Whether both maps check exactly the same indices, ignoring explicit `false` entries.
    pub fn same_selection(&self, other: &Self) -> bool {
        self.selected_indices() == other.selected_indices()
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|checked| !checked)
    }
}

/// `positional[i]` is `true` iff the set contains the key of `rows[i]`.
pub fn derive_positional_selection<T: Selectable>(
    rows: &[T],
    set: &SelectionSet<T>,
) -> PositionalSelection {
    PositionalSelection::from_indices(
        rows.iter()
            .enumerate()
            .filter(|(_, row)| set.contains(row.key()))
            .map(|(index, _)| index),
    )
}

/// Apply a full positional map emitted by the table to the keyed set.
///
/// Checked rows are upserted, unchecked (or absent) rows removed. Rows that
/// are already selected keep their recorded attributes. Keys that are not on
/// `rows` are never touched.
pub fn apply_positional_change<T: Selectable>(
    positional: &PositionalSelection,
    rows: &[T],
    set: &mut SelectionSet<T>,
) {
    for (index, row) in rows.iter().enumerate() {
        if positional.is_selected(index) {
            let mut entity = row.clone();
            if set.contains(entity.key()) {
                entity.clear_attributes();
            }
            set.upsert(entity);
        } else {
            set.remove(row.key());
        }
    }
}

/// Per-table view state: the visible page and its published positional map.
#[derive(Debug, Clone)]
pub struct PageSelectionAdapter<T> {
    query: PageQuery,
    rows: Vec<T>,
    total: u32,
    positional: PositionalSelection,
    revision: u64,
}

impl<T: Selectable> PageSelectionAdapter<T> {
    #[must_use]
    pub fn new(query: PageQuery) -> Self {
        Self {
            query,
            rows: Vec::new(),
            total: 0,
            positional: PositionalSelection::new(),
            revision: 0,
        }
    }

    /// Install a freshly fetched page and re-derive its checkboxes.
    pub fn show_page(&mut self, query: PageQuery, page: PagedResult<T>, set: &SelectionSet<T>) {
        self.query = query;
        self.rows = page.rows;
        self.total = page.total;
        self.refresh(set);
    }

    /// Re-derive the positional map from `set`.
    ///
    /// The published map is only replaced when the checked indices differ,
    /// so a table echoing its own state back never loops. Returns whether a
    /// new map was published.
    pub fn refresh(&mut self, set: &SelectionSet<T>) -> bool {
        let derived = derive_positional_selection(&self.rows, set);
        if derived.same_selection(&self.positional) {
            return false;
        }
        self.positional = derived;
        self.revision += 1;
        true
    }

    /// Apply a positional map emitted by the table, then re-derive.
    pub fn apply_change(&mut self, positional: &PositionalSelection, set: &mut SelectionSet<T>) -> bool {
        apply_positional_change(positional, &self.rows, set);
        self.refresh(set)
    }

    /// Check or uncheck a single row. Indices outside the visible page are ignored.
    pub fn toggle_row(&mut self, index: usize, checked: bool, set: &mut SelectionSet<T>) -> bool {
        if index >= self.rows.len() {
            log::debug!(
                "Ignoring toggle of row {index}: page {} has {} rows",
                self.query.page,
                self.rows.len()
            );
            return false;
        }
        let mut positional = self.positional.clone();
        positional.set(index, checked);
        self.apply_change(&positional, set)
    }

    /// Header checkbox: check or uncheck every row of the visible page.
    pub fn set_page_checked(&mut self, checked: bool, set: &mut SelectionSet<T>) -> bool {
        let positional = if checked {
            PositionalSelection::from_indices(0..self.rows.len())
        } else {
            PositionalSelection::new()
        };
        self.apply_change(&positional, set)
    }

    /// Refresh the stored details of selected entities shown on this page.
    /// Recorded attributes are kept.
    pub fn merge_visible(&self, set: &mut SelectionSet<T>) {
        for row in &self.rows {
            if !set.contains(row.key()) {
                continue;
            }
            let mut entity = row.clone();
            entity.clear_attributes();
            set.upsert(entity);
        }
    }

    /// Whether every row of a non-empty page is checked.
    pub fn page_fully_checked(&self) -> bool {
        !self.rows.is_empty() && self.positional.selected_indices().len() == self.rows.len()
    }

    pub fn current_rows(&self) -> &[T] {
        &self.rows
    }

    pub fn query(&self) -> &PageQuery {
        &self.query
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn positional(&self) -> &PositionalSelection {
        &self.positional
    }

    /// Incremented every time a new positional map is published.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Drop the visible page and go back to `query`.
    pub fn reset(&mut self, query: PageQuery) {
        self.query = query;
        self.rows.clear();
        self.total = 0;
        if !self.positional.is_empty() {
            self.positional = PositionalSelection::new();
            self.revision += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::ProductAttribute;
    use crate::test_utils::{product, products_page};
    use crate::types::Product;

    fn rows(codes: &[&str]) -> Vec<Product> {
        codes.iter().map(|code| product(code, code)).collect()
    }

    #[test]
    fn derives_exactly_the_selected_rows() {
        let page: Vec<Product> = (0..10).map(|i| product(&format!("P-{i}"), "row")).collect();
        let set: SelectionSet<_> = [2, 5, 9].iter().map(|&i| page[i].clone()).collect();

        let positional = derive_positional_selection(&page, &set);

        assert_eq!(positional.selected_indices(), [2, 5, 9]);
        for i in [0, 1, 3, 4, 6, 7, 8] {
            assert!(!positional.is_selected(i));
        }
    }

    #[test]
    fn positional_serializes_as_index_map() {
        let positional = PositionalSelection::from_indices([1, 3]);
        let json = serde_json::to_string(&positional).unwrap();
        assert_eq!(json, r#"{"1":true,"3":true}"#);
        let back: PositionalSelection = serde_json::from_str(r#"{"1":true,"2":false}"#).unwrap();
        assert_eq!(back.selected_indices(), [1]);
    }

    #[test]
    fn apply_leaves_off_page_keys_alone() {
        let page_one = rows(&["A", "B"]);
        let mut set: SelectionSet<_> = rows(&["A", "Z"]).into_iter().collect();

        apply_positional_change(&PositionalSelection::from_indices([1]), &page_one, &mut set);

        assert_eq!(set.keys().collect::<Vec<_>>(), ["Z", "B"]);
    }

    #[test]
    fn apply_keeps_quantity_of_already_selected_row() {
        let page = rows(&["A"]);
        let mut set: SelectionSet<_> = page.iter().cloned().collect();
        set.set_attribute("A", ProductAttribute::AnnualVolumeQuantity(9));

        let mut catalog_row = page.clone();
        catalog_row[0].annual_volume_quantity = Some(1);
        apply_positional_change(&PositionalSelection::from_indices([0]), &catalog_row, &mut set);

        assert_eq!(set.get("A").unwrap().annual_volume_quantity, Some(9));
    }

    #[test]
    fn refresh_only_publishes_on_index_change() {
        let mut set = SelectionSet::new();
        let mut adapter = PageSelectionAdapter::new(PageQuery::new(1, 10));
        adapter.show_page(PageQuery::new(1, 10), products_page(&["A", "B", "C"], 1, 10, 3), &set);
        let revision = adapter.revision();

        assert!(!adapter.refresh(&set));
        assert_eq!(adapter.revision(), revision);

        assert!(adapter.toggle_row(1, true, &mut set));
        assert_eq!(adapter.revision(), revision + 1);
        assert!(!adapter.apply_change(&PositionalSelection::from_indices([1]), &mut set));
        assert_eq!(adapter.revision(), revision + 1);
    }

    #[test]
    fn merge_visible_refreshes_details_and_keeps_quantity() {
        let mut set = SelectionSet::new();
        let mut seeded = product("A", "A");
        seeded.item_name.clear();
        seeded.annual_volume_quantity = Some(12);
        set.upsert(seeded);

        let mut adapter = PageSelectionAdapter::new(PageQuery::new(1, 10));
        let mut page = products_page(&["A", "B"], 1, 10, 2);
        page.rows[0].item_name = "Nitrile gloves".to_string();
        adapter.show_page(PageQuery::new(1, 10), page, &set);
        adapter.merge_visible(&mut set);

        let merged = set.get("A").unwrap();
        assert_eq!(merged.item_name, "Nitrile gloves");
        assert_eq!(merged.annual_volume_quantity, Some(12));
        assert!(!set.contains("B"));
        assert_eq!(adapter.positional().selected_indices(), [0]);
    }

    #[test]
    fn out_of_range_toggle_is_ignored() {
        let mut set = SelectionSet::new();
        let mut adapter = PageSelectionAdapter::new(PageQuery::new(3, 10));
        adapter.show_page(PageQuery::new(3, 10), products_page(&["A", "B"], 3, 10, 22), &set);

        assert!(!adapter.toggle_row(7, true, &mut set));
        assert!(set.is_empty());
        assert_eq!(adapter.total(), 22);
    }

    #[test]
    fn header_checkbox_selects_and_clears_page() {
        let mut set: SelectionSet<_> = rows(&["OFF"]).into_iter().collect();
        let mut adapter = PageSelectionAdapter::new(PageQuery::new(1, 10));
        adapter.show_page(PageQuery::new(1, 10), products_page(&["A", "B"], 1, 10, 2), &set);

        adapter.set_page_checked(true, &mut set);
        assert!(adapter.page_fully_checked());
        assert_eq!(set.len(), 3);

        adapter.set_page_checked(false, &mut set);
        assert!(adapter.positional().is_empty());
        assert_eq!(set.keys().collect::<Vec<_>>(), ["OFF"]);
    }

    #[test]
    fn empty_page_is_tolerated() {
        let mut set = SelectionSet::<Product>::new();
        let mut adapter = PageSelectionAdapter::new(PageQuery::new(1, 10));
        adapter.show_page(PageQuery::new(1, 10), PagedResult::empty(1, 10), &set);

        assert!(!adapter.set_page_checked(true, &mut set));
        assert!(!adapter.page_fully_checked());
        assert!(adapter.current_rows().is_empty());
    }
}
