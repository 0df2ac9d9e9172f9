//! Page-independent selection of catalog entities
//!
//! The keyed [`SelectionSet`] is the only source of truth for "is this
//! entity selected". The row-indexed [`PositionalSelection`] a table widget
//! needs is always derived from it by [`PageSelectionAdapter`] and never
//! stored anywhere else.

mod adapter;
mod set;
mod store;

pub use adapter::{
    PageSelectionAdapter, PositionalSelection, apply_positional_change,
    derive_positional_selection,
};
pub use set::SelectionSet;
pub use store::{SelectionCategory, SelectionStore};

use crate::types::{Product, Vendor};

/// An entity that can be selected across pages.
///
/// Two values with the same [`key`](Self::key) are the same selection no
/// matter which page or search returned them.
pub trait Selectable: Clone {
    /// Mutable, user-entered attribute carried alongside the selection.
    type Attribute: Clone + std::fmt::Debug;

    /// Canonical key.
    fn key(&self) -> &str;

    /// Overwrite `self` with `incoming`, keeping any recorded attribute the
    /// incoming value leaves unset.
    fn merge_from(&mut self, incoming: Self);

    /// Record an attribute value.
    fn apply_attribute(&mut self, attribute: Self::Attribute);

    /// Drop attribute values so a later [`merge_from`](Self::merge_from)
    /// cannot overwrite what the user entered.
    fn clear_attributes(&mut self);
}

/// Mutable attribute of a selected product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductAttribute {
    AnnualVolumeQuantity(u32),
}

/// Mutable attribute of a selected vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorAttribute {
    Preferred(bool),
}

impl Selectable for Product {
    type Attribute = ProductAttribute;

    fn key(&self) -> &str {
        &self.item_code
    }

    fn merge_from(&mut self, incoming: Self) {
        let quantity = incoming
            .annual_volume_quantity
            .or(self.annual_volume_quantity);
        *self = incoming;
        self.annual_volume_quantity = quantity;
    }

    fn apply_attribute(&mut self, attribute: Self::Attribute) {
        match attribute {
            ProductAttribute::AnnualVolumeQuantity(quantity) => {
                self.annual_volume_quantity = Some(quantity);
            }
        }
    }

    fn clear_attributes(&mut self) {
        self.annual_volume_quantity = None;
    }
}

impl Selectable for Vendor {
    type Attribute = VendorAttribute;

    fn key(&self) -> &str {
        &self.id
    }

    fn merge_from(&mut self, incoming: Self) {
        let preferred = incoming.preferred.or(self.preferred);
        *self = incoming;
        self.preferred = preferred;
    }

    fn apply_attribute(&mut self, attribute: Self::Attribute) {
        match attribute {
            VendorAttribute::Preferred(preferred) => self.preferred = Some(preferred),
        }
    }

    fn clear_attributes(&mut self) {
        self.preferred = None;
    }
}
