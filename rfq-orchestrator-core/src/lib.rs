//! RFQ Orchestrator Core Library
//!
//! Client-side state engine behind the multi-step "create RFQ" wizard:
//! - Selection store keyed by entity id, independent of pagination
//! - Page adapter deriving row checkboxes from the store and back
//! - Form aggregation into the flat submission payload
//! - Wizard step gating and the caller-owned session
//!
//! Backend access goes through the [`PagedResultProvider`] and
//! [`RfqSubmitter`] traits, so the engine runs against the HTTP client of
//! `rfq-orchestrator-provider` or any in-memory implementation.

pub mod config;
pub mod error;
pub mod form;
pub mod selection;
pub mod services;
pub mod session;
pub mod types;
pub mod wizard;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use async_trait::async_trait;
pub use config::WizardConfig;
pub use error::{CoreError, CoreResult};
pub use rfq_orchestrator_provider::{PagedResultProvider, RfqSubmitter};
pub use services::{CatalogService, RfqService, ServiceContext};
pub use session::RfqWizardSession;
