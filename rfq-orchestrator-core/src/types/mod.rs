//! Type definition module

mod form;
mod validation;

pub use form::RfqFormData;
pub(crate) use form::non_blank;
pub use validation::ValidationIssue;

// Re-export the provider library's public types
pub use rfq_orchestrator_provider::{
    Attachment, ClientConfig, PageQuery, PagedResult, Product, RfqItem, RfqReceipt,
    RfqSubmission, User, Vendor,
};
