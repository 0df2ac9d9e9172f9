//! Shared helpers for live API tests

#![allow(dead_code)]

use std::env;

use rfq_orchestrator_provider::{ClientConfig, ProcurementClient};

/// Skip the test when an environment variable is missing.
#[macro_export]
macro_rules! skip_if_no_env {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// Live test context built from `RFQ_API_BASE_URL` and optional `RFQ_API_TOKEN`.
pub struct TestContext {
    pub client: ProcurementClient,
    pub search_term: Option<String>,
}

impl TestContext {
    pub fn from_env() -> Option<Self> {
        let base_url = env::var("RFQ_API_BASE_URL").ok()?;
        let mut config = ClientConfig::new(base_url);
        if let Ok(token) = env::var("RFQ_API_TOKEN") {
            config = config.with_token(token);
        }
        let client = ProcurementClient::new(config).ok()?;
        Some(Self {
            client,
            search_term: env::var("RFQ_TEST_SEARCH").ok(),
        })
    }
}
