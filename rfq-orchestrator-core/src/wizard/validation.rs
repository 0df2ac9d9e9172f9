//! Step gates

use std::collections::HashSet;

use super::WizardStep;
use crate::types::{RfqFormData, ValidationIssue, non_blank};

/// Upper bound on the technical specifications text, in characters.
pub const MAX_TECHNICAL_SPECIFICATIONS_CHARS: usize = 5000;

/// Whether `form` satisfies the gate of `step`.
#[must_use]
pub fn validate(step: WizardStep, form: &RfqFormData) -> bool {
    validation_issues(step, form).is_empty()
}

/// Every unmet precondition of `step`, in field order.
#[must_use]
pub fn validation_issues(step: WizardStep, form: &RfqFormData) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    match step {
        WizardStep::RfqDetails => details_issues(form, &mut issues),
        WizardStep::VendorSelection => vendor_issues(form, &mut issues),
        WizardStep::TechnicalSpecs => technical_issues(form, &mut issues),
        WizardStep::Collaboration => collaboration_issues(form, &mut issues),
        WizardStep::Review => {
            details_issues(form, &mut issues);
            vendor_issues(form, &mut issues);
            technical_issues(form, &mut issues);
            collaboration_issues(form, &mut issues);
        }
    }
    issues
}

fn details_issues(form: &RfqFormData, issues: &mut Vec<ValidationIssue>) {
    if form.title.trim().is_empty() {
        issues.push(ValidationIssue::TitleRequired);
    }
    if non_blank(form.department.as_deref()).is_none() {
        issues.push(ValidationIssue::DepartmentRequired);
    }
    if non_blank(form.item_type.as_deref()).is_none() {
        issues.push(ValidationIssue::ItemTypeRequired);
    }
    if form.items.is_empty() {
        issues.push(ValidationIssue::NoProductsSelected);
    }
    issues.extend(
        form.items
            .iter()
            .filter(|item| item.annual_volume_quantity == 0)
            .map(|item| ValidationIssue::QuantityRequired {
                item_code: item.item_code.clone(),
            }),
    );
    if let (Some(start), Some(end)) = (form.start_date, form.end_date)
        && end < start
    {
        issues.push(ValidationIssue::EndDateBeforeStartDate { start, end });
    }
}

fn vendor_issues(form: &RfqFormData, issues: &mut Vec<ValidationIssue>) {
    if form.selected_vendors.is_empty() {
        issues.push(ValidationIssue::NoVendorsSelected);
    }
    issues.extend(
        form.preferred_vendors
            .iter()
            .filter(|id| !form.selected_vendors.contains(id))
            .map(|id| ValidationIssue::PreferredVendorNotSelected {
                vendor_id: id.clone(),
            }),
    );
}

fn technical_issues(form: &RfqFormData, issues: &mut Vec<ValidationIssue>) {
    if let Some(specs) = &form.technical_specifications {
        let length = specs.chars().count();
        if length > MAX_TECHNICAL_SPECIFICATIONS_CHARS {
            issues.push(ValidationIssue::TechnicalSpecificationsTooLong {
                length,
                max: MAX_TECHNICAL_SPECIFICATIONS_CHARS,
            });
        }
    }
    issues.extend(
        form.attachments
            .iter()
            .enumerate()
            .filter(|(_, a)| a.file_name.trim().is_empty() || a.url.trim().is_empty())
            .map(|(index, _)| ValidationIssue::AttachmentIncomplete { index }),
    );
}

fn collaboration_issues(form: &RfqFormData, issues: &mut Vec<ValidationIssue>) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for user_id in &form.collaborators {
        if !seen.insert(user_id.as_str()) && reported.insert(user_id.as_str()) {
            issues.push(ValidationIssue::DuplicateCollaborator {
                user_id: user_id.clone(),
            });
        }
    }
}
