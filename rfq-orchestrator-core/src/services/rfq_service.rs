//! RFQ submission service

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::{ServiceContext, log_failure};
use crate::types::{RfqReceipt, RfqSubmission};
use crate::wizard::WizardMode;

/// Sends finished RFQs to the backend
pub struct RfqService {
    ctx: Arc<ServiceContext>,
}

impl RfqService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Create or update depending on `mode`.
    pub async fn submit(
        &self,
        mode: &WizardMode,
        submission: &RfqSubmission,
    ) -> CoreResult<RfqReceipt> {
        match mode {
            WizardMode::Create => self.create(submission).await,
            WizardMode::Update { rfq_id } => self.update(rfq_id, submission).await,
        }
    }

    pub async fn create(&self, submission: &RfqSubmission) -> CoreResult<RfqReceipt> {
        match self.ctx.submitter.create_rfq(submission).await {
            Ok(receipt) => {
                log::info!(
                    "Created RFQ '{}' as {} ({} items, {} vendors)",
                    submission.title,
                    receipt.id,
                    submission.items.len(),
                    submission.selected_vendors.len()
                );
                Ok(receipt)
            }
            Err(e) => {
                let err = CoreError::Provider(e);
                log_failure("Creating RFQ", &err);
                Err(err)
            }
        }
    }

    pub async fn update(&self, rfq_id: &str, submission: &RfqSubmission) -> CoreResult<RfqReceipt> {
        match self.ctx.submitter.update_rfq(rfq_id, submission).await {
            Ok(receipt) => {
                log::info!("Updated RFQ {rfq_id} ('{}')", submission.title);
                Ok(receipt)
            }
            Err(e) => {
                let err = CoreError::Provider(e);
                log_failure(&format!("Updating RFQ {rfq_id}"), &err);
                Err(err)
            }
        }
    }
}
