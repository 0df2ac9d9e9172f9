//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

use crate::types::ValidationIssue;
use crate::wizard::WizardStep;

// Re-export library error type
pub use rfq_orchestrator_provider::ProviderError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// A wizard step gate failed; `issues` lists every unmet precondition
    #[error("Step '{step}' is incomplete: {}", join_issues(.issues))]
    StepValidation {
        step: WizardStep,
        issues: Vec<ValidationIssue>,
    },

    /// Jump target is ahead of the current step
    #[error("Cannot jump to '{requested}' from '{current}': step not visited yet")]
    StepNotVisited {
        requested: WizardStep,
        current: WizardStep,
    },

    /// Submission attempted before reaching the review step
    #[error("Submission is only possible from the review step (current: '{0}')")]
    NotOnReviewStep(WizardStep),

    /// The session was torn down after a successful submission
    #[error("Wizard session is closed")]
    SessionClosed,

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::StepValidation { .. }
            | Self::StepNotVisited { .. }
            | Self::NotOnReviewStep(_)
            | Self::SessionClosed
            | Self::InvalidConfig(_) => true,
            Self::Provider(e) => e.is_expected(),
            Self::SerializationError(_) => false,
        }
    }

    /// Validation issues carried by a failed step gate, empty otherwise.
    #[must_use]
    pub fn validation_issues(&self) -> &[ValidationIssue] {
        match self {
            Self::StepValidation { issues, .. } => issues,
            _ => &[],
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_validation_lists_every_issue() {
        let err = CoreError::StepValidation {
            step: WizardStep::RfqDetails,
            issues: vec![
                ValidationIssue::TitleRequired,
                ValidationIssue::QuantityRequired {
                    item_code: "P-1".to_string(),
                },
            ],
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Step 'RFQ Details & Items' is incomplete"));
        assert!(msg.contains("Title is required"));
        assert!(msg.contains("P-1"));
        assert_eq!(err.validation_issues().len(), 2);
        assert!(err.is_expected());
    }

    #[test]
    fn provider_errors_keep_their_classification() {
        let err: CoreError = ProviderError::ServerError {
            endpoint: "rfq".to_string(),
            status: 503,
            raw_message: None,
        }
        .into();
        assert!(!err.is_expected());
        assert!(err.validation_issues().is_empty());
    }

    #[test]
    fn serializes_with_code_and_details() {
        let err = CoreError::NotOnReviewStep(WizardStep::VendorSelection);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NotOnReviewStep");
        assert_eq!(json["details"], "vendorSelection");
    }
}
