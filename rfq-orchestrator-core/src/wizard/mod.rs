//! Multi-step wizard sequencing

mod validation;

pub use validation::{MAX_TECHNICAL_SPECIFICATIONS_CHARS, validate, validation_issues};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::RfqFormData;

/// Wizard steps in display order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum WizardStep {
    #[default]
    RfqDetails,
    VendorSelection,
    TechnicalSpecs,
    Collaboration,
    Review,
}

impl WizardStep {
    pub const ALL: [Self; 5] = [
        Self::RfqDetails,
        Self::VendorSelection,
        Self::TechnicalSpecs,
        Self::Collaboration,
        Self::Review,
    ];

    /// Zero-based position.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    #[must_use]
    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::RfqDetails => "RFQ Details & Items",
            Self::VendorSelection => "Vendor Selection",
            Self::TechnicalSpecs => "Technical Specs",
            Self::Collaboration => "Collaboration",
            Self::Review => "Review",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Whether the wizard creates a new RFQ or edits an existing one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum WizardMode {
    #[default]
    Create,
    #[serde(rename_all = "camelCase")]
    Update { rfq_id: String },
}

/// Result of pressing "next".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextOutcome {
    /// Moved to the given step.
    Advanced(WizardStep),
    /// The review step passed its gate; the caller should submit.
    Submit,
}

/// Current step plus the gate rules for moving between steps.
#[derive(Debug, Clone, Default)]
pub struct WizardController {
    current: WizardStep,
    mode: WizardMode,
}

impl WizardController {
    #[must_use]
    pub fn new(mode: WizardMode) -> Self {
        Self {
            current: WizardStep::RfqDetails,
            mode,
        }
    }

    pub fn current(&self) -> WizardStep {
        self.current
    }

    pub fn mode(&self) -> &WizardMode {
        &self.mode
    }

    pub fn can_advance(&self, form: &RfqFormData) -> bool {
        validate(self.current, form)
    }

    /// Advance if the current step's gate passes.
    ///
    /// On the review step a passing gate yields [`NextOutcome::Submit`] and
    /// the step does not change.
    pub fn next(&mut self, form: &RfqFormData) -> CoreResult<NextOutcome> {
        let issues = validation_issues(self.current, form);
        if !issues.is_empty() {
            return Err(CoreError::StepValidation {
                step: self.current,
                issues,
            });
        }
        match self.current.next() {
            Some(step) => {
                self.current = step;
                Ok(NextOutcome::Advanced(step))
            }
            None => Ok(NextOutcome::Submit),
        }
    }

    /// Go back one step without re-validating. Stays on the first step.
    pub fn previous(&mut self) -> WizardStep {
        if let Some(step) = self.current.previous() {
            self.current = step;
        }
        self.current
    }

    /// Jump back to a visited step (or stay on the current one).
    pub fn jump_to(&mut self, step: WizardStep) -> CoreResult<WizardStep> {
        if step > self.current {
            return Err(CoreError::StepNotVisited {
                requested: step,
                current: self.current,
            });
        }
        self.current = step;
        Ok(step)
    }

    /// Back to the first step, keeping the mode.
    pub fn reset(&mut self) {
        self.current = WizardStep::RfqDetails;
    }
}
