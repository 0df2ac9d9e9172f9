//! Business logic service layer

mod catalog_service;
mod rfq_service;

pub use catalog_service::CatalogService;
pub use rfq_service::RfqService;

use std::sync::Arc;

use rfq_orchestrator_provider::{PagedResultProvider, ProcurementClient, RfqSubmitter};

use crate::error::CoreError;
use crate::types::{Product, User, Vendor};

/// Service context - holds every backend collaborator
///
/// The embedding layer builds this once, usually with
/// [`from_client`](Self::from_client), and shares it between services.
pub struct ServiceContext {
    /// Product catalog
    pub products: Arc<dyn PagedResultProvider<Product>>,
    /// Vendor catalog
    pub vendors: Arc<dyn PagedResultProvider<Vendor>>,
    /// User directory, for collaborator search
    pub users: Arc<dyn PagedResultProvider<User>>,
    /// RFQ create/update endpoint
    pub submitter: Arc<dyn RfqSubmitter>,
}

impl ServiceContext {
    #[must_use]
    pub fn new(
        products: Arc<dyn PagedResultProvider<Product>>,
        vendors: Arc<dyn PagedResultProvider<Vendor>>,
        users: Arc<dyn PagedResultProvider<User>>,
        submitter: Arc<dyn RfqSubmitter>,
    ) -> Self {
        Self {
            products,
            vendors,
            users,
            submitter,
        }
    }

    /// Route every collaborator through one HTTP client.
    #[must_use]
    pub fn from_client(client: Arc<ProcurementClient>) -> Self {
        Self {
            products: client.clone(),
            vendors: client.clone(),
            users: client.clone(),
            submitter: client,
        }
    }
}

/// Log a failed operation at `warn` when expected, `error` otherwise.
pub(crate) fn log_failure(operation: &str, err: &CoreError) {
    if err.is_expected() {
        log::warn!("{operation} failed: {err}");
    } else {
        log::error!("{operation} failed: {err}");
    }
}
