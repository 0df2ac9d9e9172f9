//! reqwest client for the procurement REST API

mod http;
mod types;

use std::time::Duration;

use reqwest::Client;

use crate::error::{ProviderError, Result};
use crate::types::ClientConfig;

pub(crate) use types::{CatalogEnvelope, ReceiptEnvelope};

pub(crate) const PRODUCTS_PATH: &str = "products";
pub(crate) const VENDORS_PATH: &str = "vendors";
pub(crate) const USERS_PATH: &str = "users";
pub(crate) const RFQ_PATH: &str = "rfq";

/// Procurement API client.
///
/// Implements [`PagedResultProvider`](crate::PagedResultProvider) for
/// [`Product`](crate::Product), [`Vendor`](crate::Vendor) and
/// [`User`](crate::User), and [`RfqSubmitter`](crate::RfqSubmitter).
#[derive(Clone)]
pub struct ProcurementClient {
    pub(crate) client: Client,
    pub(crate) config: ClientConfig,
}

impl ProcurementClient {
    /// Build a client with the configured timeouts.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(ProviderError::InvalidParameter {
                endpoint: "client".to_string(),
                param: "base_url".to_string(),
                detail: "must not be empty".to_string(),
            });
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ProviderError::NetworkError {
                endpoint: "client".to_string(),
                detail: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}
