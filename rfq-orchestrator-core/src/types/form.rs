//! RFQ form state

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{Attachment, RfqItem, RfqSubmission, ValidationIssue};
use crate::wizard::WizardStep;

/// Aggregate form state of one RFQ wizard session.
///
/// `items`, `selected_vendors` and `preferred_vendors` are projections of the
/// selection store and are only rewritten by
/// [`FormAggregator`](crate::form::FormAggregator).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RfqFormData {
    pub title: String,
    pub department: Option<String>,
    pub item_type: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub payment_terms: Option<String>,
    pub technical_specifications: Option<String>,
    pub items: Vec<RfqItem>,
    pub selected_vendors: Vec<String>,
    pub preferred_vendors: Vec<String>,
    pub collaborators: Vec<String>,
    pub attachments: Vec<Attachment>,
}

impl RfqFormData {
    /// Flatten into the submission payload.
    ///
    /// Fails with the missing required scalar fields listed, never panics.
    pub fn to_submission(&self) -> CoreResult<RfqSubmission> {
        let mut issues = Vec::new();
        let title = self.title.trim();
        if title.is_empty() {
            issues.push(ValidationIssue::TitleRequired);
        }
        let department = non_blank(self.department.as_deref());
        if department.is_none() {
            issues.push(ValidationIssue::DepartmentRequired);
        }
        let item_type = non_blank(self.item_type.as_deref());
        if item_type.is_none() {
            issues.push(ValidationIssue::ItemTypeRequired);
        }

        let (Some(department), Some(item_type)) = (department, item_type) else {
            return Err(CoreError::StepValidation {
                step: WizardStep::RfqDetails,
                issues,
            });
        };
        if !issues.is_empty() {
            return Err(CoreError::StepValidation {
                step: WizardStep::RfqDetails,
                issues,
            });
        }

        Ok(RfqSubmission {
            title: title.to_string(),
            department: department.to_string(),
            item_type: item_type.to_string(),
            items: self.items.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            payment_terms: non_blank(self.payment_terms.as_deref()).map(str::to_string),
            selected_vendors: self.selected_vendors.clone(),
            preferred_vendors: self.preferred_vendors.clone(),
            collaborators: self.collaborators.clone(),
            technical_specifications: non_blank(self.technical_specifications.as_deref())
                .map(str::to_string),
            attachments: self.attachments.clone(),
        })
    }

    /// Scalar fields of an existing RFQ, for editing. Selection-derived
    /// fields are rebuilt by the aggregator from the seeded store.
    #[must_use]
    pub fn scalars_from_submission(submission: &RfqSubmission) -> Self {
        Self {
            title: submission.title.clone(),
            department: Some(submission.department.clone()),
            item_type: Some(submission.item_type.clone()),
            start_date: submission.start_date,
            end_date: submission.end_date,
            payment_terms: submission.payment_terms.clone(),
            technical_specifications: submission.technical_specifications.clone(),
            collaborators: submission.collaborators.clone(),
            attachments: submission.attachments.clone(),
            ..Self::default()
        }
    }
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
