use indexmap::IndexMap;

use super::Selectable;

/// Ordered, keyed collection of selected entities.
///
/// Display order is insertion order. Keys are unique. All operations are
/// total: unknown keys are ignored rather than reported, since a click may
/// race a page refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionSet<T> {
    entries: IndexMap<String, T>,
}

impl<T> Default for SelectionSet<T> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<T: Selectable> SelectionSet<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `entity`, or merge it over the existing entry with the same key.
    ///
    /// Returns `true` when the key was not selected before.
    pub fn upsert(&mut self, entity: T) -> bool {
        match self.entries.get_mut(entity.key()) {
            Some(existing) => {
                existing.merge_from(entity);
                false
            }
            None => {
                self.entries.insert(entity.key().to_string(), entity);
                true
            }
        }
    }

    /// Remove the entry under `key`; `None` if it was not selected.
    pub fn remove(&mut self, key: &str) -> Option<T> {
        self.entries.shift_remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Update an attribute of an already-selected entity.
    ///
    /// Never selects: returns `false` and does nothing when `key` is absent.
    pub fn set_attribute(&mut self, key: &str, attribute: T::Attribute) -> bool {
        match self.entries.get_mut(key) {
            Some(entity) => {
                entity.apply_attribute(attribute);
                true
            }
            None => {
                log::debug!("Ignoring attribute {attribute:?} for unselected key '{key}'");
                false
            }
        }
    }

    /// Current entries in display order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<T> {
        self.entries.values().cloned().collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }
}

impl<T: Selectable> FromIterator<T> for SelectionSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for entity in iter {
            set.upsert(entity);
        }
        set
    }
}
