use chrono::NaiveDate;

use crate::error::CoreResult;
use crate::selection::{ProductAttribute, SelectionCategory, SelectionStore, VendorAttribute};
use crate::types::{Attachment, Product, RfqFormData, RfqItem, RfqSubmission, Vendor};

/// Parse a raw quantity keystroke.
///
/// Surrounding whitespace is ignored. Anything that is not a non-negative
/// integer fitting in `u32` (empty, negative, non-numeric, overflow) is `0`.
#[must_use]
pub fn parse_quantity(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

/// Owns the selection store and the form, and keeps the selection-derived
/// form fields (`items`, `selected_vendors`, `preferred_vendors`) in sync.
#[derive(Debug, Clone, Default)]
pub struct FormAggregator {
    store: SelectionStore,
    form: RfqFormData,
}

impl FormAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from an existing RFQ being edited.
    #[must_use]
    pub fn from_submission(submission: &RfqSubmission) -> Self {
        let mut aggregator = Self {
            store: SelectionStore::new(),
            form: RfqFormData::scalars_from_submission(submission),
        };
        for item in &submission.items {
            aggregator
                .store
                .products_mut()
                .upsert(Product::from(item.clone()));
        }
        for vendor_id in &submission.selected_vendors {
            aggregator.store.vendors_mut().upsert(Vendor {
                id: vendor_id.clone(),
                name: String::new(),
                email: String::new(),
                vendor_code: String::new(),
                status: String::new(),
                preferred: Some(submission.preferred_vendors.contains(vendor_id)),
            });
        }
        aggregator.sync_products();
        aggregator.sync_vendors();
        aggregator
    }

    pub fn form(&self) -> &RfqFormData {
        &self.form
    }

    pub fn store(&self) -> &SelectionStore {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut SelectionStore {
        &mut self.store
    }

    /// Record a quantity keystroke for a selected product and return the
    /// parsed value. Unselected products are left unselected.
    pub fn on_quantity_change(&mut self, item_code: &str, raw: &str) -> u32 {
        let quantity = parse_quantity(raw);
        self.store
            .products_mut()
            .set_attribute(item_code, ProductAttribute::AnnualVolumeQuantity(quantity));
        self.sync_products();
        quantity
    }

    /// Flag a selected vendor as preferred or not. No-op for unselected vendors.
    pub fn on_preferred_change(&mut self, vendor_id: &str, preferred: bool) -> bool {
        let changed = self
            .store
            .vendors_mut()
            .set_attribute(vendor_id, VendorAttribute::Preferred(preferred));
        self.sync_vendors();
        changed
    }

    pub fn on_remove(&mut self, category: SelectionCategory, key: &str) -> bool {
        let removed = self.store.remove(category, key);
        match category {
            SelectionCategory::Products => self.sync_products(),
            SelectionCategory::Vendors => self.sync_vendors(),
        }
        removed
    }

    pub fn on_clear_all(&mut self) {
        self.store.clear();
        self.sync_products();
        self.sync_vendors();
    }

    /// Recompute `items` from the product snapshot; unset quantities become `0`.
    pub fn sync_products(&mut self) {
        self.form.items = self
            .store
            .products()
            .snapshot()
            .into_iter()
            .map(RfqItem::from)
            .collect();
    }

    /// Recompute `selected_vendors` and `preferred_vendors` from the vendor set.
    pub fn sync_vendors(&mut self) {
        let vendors = self.store.vendors();
        self.form.selected_vendors = vendors.keys().map(str::to_string).collect();
        self.form.preferred_vendors = vendors
            .iter()
            .filter(|v| v.preferred == Some(true))
            .map(|v| v.id.clone())
            .collect();
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.form.title = title.into();
    }

    pub fn set_department(&mut self, department: Option<String>) {
        self.form.department = department;
    }

    pub fn set_item_type(&mut self, item_type: Option<String>) {
        self.form.item_type = item_type;
    }

    pub fn set_date_range(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        self.form.start_date = start;
        self.form.end_date = end;
    }

    pub fn set_payment_terms(&mut self, payment_terms: Option<String>) {
        self.form.payment_terms = payment_terms;
    }

    pub fn set_technical_specifications(&mut self, specifications: Option<String>) {
        self.form.technical_specifications = specifications;
    }

    /// Add a collaborator id; returns `false` if already present.
    pub fn add_collaborator(&mut self, user_id: &str) -> bool {
        if self.form.collaborators.iter().any(|id| id == user_id) {
            return false;
        }
        self.form.collaborators.push(user_id.to_string());
        true
    }

    pub fn remove_collaborator(&mut self, user_id: &str) -> bool {
        let before = self.form.collaborators.len();
        self.form.collaborators.retain(|id| id != user_id);
        self.form.collaborators.len() != before
    }

    pub fn add_attachment(&mut self, attachment: Attachment) {
        self.form.attachments.push(attachment);
    }

    pub fn remove_attachment(&mut self, index: usize) -> Option<Attachment> {
        (index < self.form.attachments.len()).then(|| self.form.attachments.remove(index))
    }

    /// Flat submission payload built from the current form.
    pub fn submission(&self) -> CoreResult<RfqSubmission> {
        self.form.to_submission()
    }

    /// Drop every selection and form field.
    pub fn reset(&mut self) {
        self.store.clear();
        self.form = RfqFormData::default();
    }
}
