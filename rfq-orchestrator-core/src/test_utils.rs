//! Test helpers
//!
//! In-memory catalogs, a recording submitter and fixture factories.

use std::sync::Arc;

use async_trait::async_trait;
use rfq_orchestrator_provider::{PagedResultProvider, ProviderError, RfqSubmitter};
use tokio::sync::RwLock;

use crate::services::ServiceContext;
use crate::types::{PageQuery, PagedResult, Product, RfqItem, RfqReceipt, RfqSubmission, User, Vendor};

// ===== MockCatalog =====

pub struct MockCatalog<T> {
    resource: &'static str,
    rows: RwLock<Vec<T>>,
    matches: fn(&T, &str) -> bool,
    fail: RwLock<bool>,
    queries: RwLock<Vec<PageQuery>>,
}

impl<T: Clone + Send + Sync> MockCatalog<T> {
    pub fn new(resource: &'static str, rows: Vec<T>, matches: fn(&T, &str) -> bool) -> Self {
        Self {
            resource,
            rows: RwLock::new(rows),
            matches,
            fail: RwLock::new(false),
            queries: RwLock::new(Vec::new()),
        }
    }

    /// Make every following fetch fail with a network error.
    pub async fn set_fail(&self, fail: bool) {
        *self.fail.write().await = fail;
    }

    pub async fn last_query(&self) -> Option<PageQuery> {
        self.queries.read().await.last().cloned()
    }

    pub async fn call_count(&self) -> usize {
        self.queries.read().await.len()
    }
}

#[async_trait]
impl<T: Clone + Send + Sync> PagedResultProvider<T> for MockCatalog<T> {
    fn resource(&self) -> &'static str {
        self.resource
    }

    async fn fetch_page(&self, query: &PageQuery) -> rfq_orchestrator_provider::Result<PagedResult<T>> {
        self.queries.write().await.push(query.clone());
        if *self.fail.read().await {
            return Err(ProviderError::NetworkError {
                endpoint: self.resource.to_string(),
                detail: "connection refused".to_string(),
            });
        }

        let rows = self.rows.read().await;
        let hits: Vec<&T> = match &query.search {
            Some(term) => rows.iter().filter(|row| (self.matches)(row, term)).collect(),
            None => rows.iter().collect(),
        };
        let total = u32::try_from(hits.len()).unwrap_or(u32::MAX);
        let offset = (query.page.saturating_sub(1) * query.limit) as usize;
        let page = hits
            .into_iter()
            .skip(offset)
            .take(query.limit as usize)
            .cloned()
            .collect();
        Ok(PagedResult::new(page, query.page, query.limit, total))
    }
}

// ===== MockSubmitter =====

pub struct MockSubmitter {
    /// `(rfq_id, submission)`; `rfq_id` is `None` for creates.
    recorded: RwLock<Vec<(Option<String>, RfqSubmission)>>,
    fail_next: RwLock<bool>,
}

impl MockSubmitter {
    pub fn new() -> Self {
        Self {
            recorded: RwLock::new(Vec::new()),
            fail_next: RwLock::new(false),
        }
    }

    /// Make the next create/update fail with a 500.
    pub async fn fail_next(&self) {
        *self.fail_next.write().await = true;
    }

    pub async fn recorded(&self) -> Vec<(Option<String>, RfqSubmission)> {
        self.recorded.read().await.clone()
    }

    async fn take_failure(&self) -> rfq_orchestrator_provider::Result<()> {
        let mut fail = self.fail_next.write().await;
        if *fail {
            *fail = false;
            return Err(ProviderError::ServerError {
                endpoint: "rfq".to_string(),
                status: 500,
                raw_message: Some("internal error".to_string()),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RfqSubmitter for MockSubmitter {
    async fn create_rfq(&self, submission: &RfqSubmission) -> rfq_orchestrator_provider::Result<RfqReceipt> {
        self.take_failure().await?;
        let mut recorded = self.recorded.write().await;
        recorded.push((None, submission.clone()));
        Ok(RfqReceipt {
            id: format!("rfq-{}", recorded.len()),
            rfq_number: Some(format!("RFQ-2026-{:04}", recorded.len())),
            status: Some("draft".to_string()),
        })
    }

    async fn update_rfq(
        &self,
        rfq_id: &str,
        submission: &RfqSubmission,
    ) -> rfq_orchestrator_provider::Result<RfqReceipt> {
        self.take_failure().await?;
        self.recorded
            .write()
            .await
            .push((Some(rfq_id.to_string()), submission.clone()));
        Ok(RfqReceipt {
            id: rfq_id.to_string(),
            rfq_number: None,
            status: Some("updated".to_string()),
        })
    }
}

// ===== Fixtures =====

pub fn product(item_code: &str, item_name: &str) -> Product {
    Product {
        item_code: item_code.to_string(),
        item_name: item_name.to_string(),
        annual_volume_quantity: None,
        brand_name: None,
        generic_name: None,
        category_name: None,
        tag: None,
    }
}

pub fn vendor(id: &str, name: &str) -> Vendor {
    Vendor {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@vendors.example.com", id.to_lowercase()),
        vendor_code: format!("VC-{id}"),
        status: "active".to_string(),
        preferred: None,
    }
}

pub fn user(id: &str, name: &str) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{id}@example.com"),
        role: None,
    }
}

/// A page of products named after their codes.
pub fn products_page(codes: &[&str], page: u32, limit: u32, total: u32) -> PagedResult<Product> {
    let rows = codes.iter().map(|code| product(code, code)).collect();
    PagedResult::new(rows, page, limit, total)
}

/// A submission that passes every step gate.
pub fn sample_submission() -> RfqSubmission {
    RfqSubmission {
        title: "Q3 PPE".to_string(),
        department: "Operations".to_string(),
        item_type: "consumable".to_string(),
        items: vec![RfqItem {
            item_code: "P-01".to_string(),
            item_name: "Nitrile gloves".to_string(),
            annual_volume_quantity: 5,
            brand_name: Some("Acme".to_string()),
            generic_name: None,
            category_name: Some("PPE".to_string()),
            tag: None,
        }],
        start_date: None,
        end_date: None,
        payment_terms: Some("Net 30".to_string()),
        selected_vendors: vec!["V-01".to_string(), "V-02".to_string()],
        preferred_vendors: vec!["V-02".to_string()],
        collaborators: vec!["u-1".to_string()],
        technical_specifications: None,
        attachments: Vec::new(),
    }
}

// ===== Factories =====

pub struct TestMocks {
    pub products: Arc<MockCatalog<Product>>,
    pub vendors: Arc<MockCatalog<Vendor>>,
    pub users: Arc<MockCatalog<User>>,
    pub submitter: Arc<MockSubmitter>,
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Create a `ServiceContext` backed by 25 products, 12 vendors and a handful of users.
pub fn create_test_context() -> (Arc<ServiceContext>, TestMocks) {
    let products = Arc::new(MockCatalog::new(
        "products",
        (1..=25)
            .map(|i| product(&format!("P-{i:02}"), &format!("Product {i}")))
            .collect(),
        |p: &Product, term: &str| contains_ignore_case(&p.item_name, term),
    ));
    let vendors = Arc::new(MockCatalog::new(
        "vendors",
        (1..=12)
            .map(|i| vendor(&format!("V-{i:02}"), &format!("Vendor {i}")))
            .collect(),
        |v: &Vendor, term: &str| contains_ignore_case(&v.name, term),
    ));
    let users = Arc::new(MockCatalog::new(
        "users",
        vec![
            user("u-1", "Alice Martin"),
            user("u-2", "Alina Chen"),
            user("u-3", "Bob Okafor"),
        ],
        |u: &User, term: &str| contains_ignore_case(&u.name, term),
    ));
    let submitter = Arc::new(MockSubmitter::new());

    let ctx = Arc::new(ServiceContext::new(
        products.clone(),
        vendors.clone(),
        users.clone(),
        submitter.clone(),
    ));

    (
        ctx,
        TestMocks {
            products,
            vendors,
            users,
            submitter,
        },
    )
}
