use async_trait::async_trait;

use crate::error::Result;
use crate::types::{PageQuery, PagedResult, RfqReceipt, RfqSubmission};

/// Paginated catalog lookup.
///
/// Stateless request/response: the same query may be issued any number of
/// times and responses may resolve out of order. Callers that display the
/// result are responsible for discarding superseded responses.
///
/// Implementations:
/// - [`ProcurementClient`](crate::ProcurementClient) for products, vendors and users
/// - in-memory fakes in tests
#[async_trait]
pub trait PagedResultProvider<T>: Send + Sync
where
    T: Send,
{
    /// Short resource name used in logs and errors (`products`, `vendors`, ...).
    fn resource(&self) -> &'static str;

    /// Fetch one page.
    ///
    /// # Arguments
    /// * `query` - page, limit, search term and filters
    async fn fetch_page(&self, query: &PageQuery) -> Result<PagedResult<T>>;
}

/// RFQ create/update endpoint.
#[async_trait]
pub trait RfqSubmitter: Send + Sync {
    /// Create a new RFQ.
    async fn create_rfq(&self, submission: &RfqSubmission) -> Result<RfqReceipt>;

    /// Replace an existing RFQ.
    ///
    /// # Arguments
    /// * `rfq_id` - server-side RFQ identifier
    /// * `submission` - full payload
    async fn update_rfq(&self, rfq_id: &str, submission: &RfqSubmission) -> Result<RfqReceipt>;
}
