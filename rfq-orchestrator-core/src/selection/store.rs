use std::fmt;

use serde::{Deserialize, Serialize};

use super::SelectionSet;
use crate::types::{Product, Vendor};

/// Category of a selection, as named by "remove" actions in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionCategory {
    Products,
    Vendors,
}

impl fmt::Display for SelectionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Products => write!(f, "products"),
            Self::Vendors => write!(f, "vendors"),
        }
    }
}

/// Canonical selection state of one wizard session, one set per category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionStore {
    products: SelectionSet<Product>,
    vendors: SelectionSet<Vendor>,
}

impl SelectionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &SelectionSet<Product> {
        &self.products
    }

    pub fn products_mut(&mut self) -> &mut SelectionSet<Product> {
        &mut self.products
    }

    pub fn vendors(&self) -> &SelectionSet<Vendor> {
        &self.vendors
    }

    pub fn vendors_mut(&mut self) -> &mut SelectionSet<Vendor> {
        &mut self.vendors
    }

    /// Remove `key` from the given category. Returns whether anything was removed.
    pub fn remove(&mut self, category: SelectionCategory, key: &str) -> bool {
        match category {
            SelectionCategory::Products => self.products.remove(key).is_some(),
            SelectionCategory::Vendors => self.vendors.remove(key).is_some(),
        }
    }

    /// Empty both categories.
    pub fn clear(&mut self) {
        self.products.clear();
        self.vendors.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.vendors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{product, vendor};

    #[test]
    fn remove_only_touches_named_category() {
        let mut store = SelectionStore::new();
        store.products_mut().upsert(product("X-1", "Shared key"));
        store.vendors_mut().upsert(vendor("X-1", "Shared key"));

        assert!(store.remove(SelectionCategory::Vendors, "X-1"));
        assert!(store.products().contains("X-1"));
        assert!(store.vendors().is_empty());
        assert!(!store.remove(SelectionCategory::Vendors, "X-1"));
    }

    #[test]
    fn clear_empties_both_categories() {
        let mut store = SelectionStore::new();
        store.products_mut().upsert(product("P-1", "Gloves"));
        store.vendors_mut().upsert(vendor("V-1", "Acme"));
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn category_serializes_camel_case() {
        assert_eq!(
            serde_json::to_string(&SelectionCategory::Vendors).unwrap(),
            "\"vendors\""
        );
        assert_eq!(SelectionCategory::Products.to_string(), "products");
    }
}
