//! Per-field validation issues reported by the wizard step gates

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One unmet precondition of a wizard step.
///
/// The UI renders these next to the field named by [`field`](Self::field).
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "camelCase")]
pub enum ValidationIssue {
    #[error("Title is required")]
    TitleRequired,

    #[error("Department is required")]
    DepartmentRequired,

    #[error("Item type is required")]
    ItemTypeRequired,

    #[error("Select at least one product")]
    NoProductsSelected,

    #[error("Quantity for '{item_code}' must be greater than 0")]
    #[serde(rename_all = "camelCase")]
    QuantityRequired { item_code: String },

    #[error("End date {end} is before start date {start}")]
    EndDateBeforeStartDate { start: NaiveDate, end: NaiveDate },

    #[error("Select at least one vendor")]
    NoVendorsSelected,

    #[error("Preferred vendor '{vendor_id}' is not selected")]
    #[serde(rename_all = "camelCase")]
    PreferredVendorNotSelected { vendor_id: String },

    #[error("Technical specifications are {length} characters long (max {max})")]
    TechnicalSpecificationsTooLong { length: usize, max: usize },

    #[error("Attachment #{index} needs a file name and URL")]
    AttachmentIncomplete { index: usize },

    #[error("Collaborator '{user_id}' is listed more than once")]
    #[serde(rename_all = "camelCase")]
    DuplicateCollaborator { user_id: String },
}

impl ValidationIssue {
    /// Form field (payload name) the issue belongs to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::TitleRequired => "title",
            Self::DepartmentRequired => "department",
            Self::ItemTypeRequired => "itemType",
            Self::NoProductsSelected | Self::QuantityRequired { .. } => "items",
            Self::EndDateBeforeStartDate { .. } => "endDate",
            Self::NoVendorsSelected => "selectedVendors",
            Self::PreferredVendorNotSelected { .. } => "preferredVendors",
            Self::TechnicalSpecificationsTooLong { .. } => "technicalSpecifications",
            Self::AttachmentIncomplete { .. } => "attachments",
            Self::DuplicateCollaborator { .. } => "collaborators",
        }
    }
}
