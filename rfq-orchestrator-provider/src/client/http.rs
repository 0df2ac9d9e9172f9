//! Endpoint implementations

use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{PagedResultProvider, RfqSubmitter};
use crate::types::{PageQuery, PagedResult, Product, RfqReceipt, RfqSubmission, User, Vendor};
use crate::utils::join_url;

use super::{
    CatalogEnvelope, PRODUCTS_PATH, ProcurementClient, RFQ_PATH, ReceiptEnvelope, USERS_PATH,
    VENDORS_PATH,
};

impl ProcurementClient {
    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.config.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Build the full URL of a catalog page, query string included.
    pub(crate) fn catalog_url(&self, path: &str, query: &PageQuery) -> String {
        let query_string = query
            .to_query_pairs()
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{query_string}", join_url(&self.config.base_url, path))
    }

    /// GET one catalog page.
    pub(crate) async fn get_page<T: DeserializeOwned>(
        &self,
        path: &'static str,
        query: &PageQuery,
    ) -> Result<PagedResult<T>> {
        if query.page == 0 || query.limit == 0 {
            return Err(ProviderError::InvalidParameter {
                endpoint: path.to_string(),
                param: if query.page == 0 { "page" } else { "limit" }.to_string(),
                detail: "must be >= 1".to_string(),
            });
        }

        let url = self.catalog_url(path, query);
        let request = self.authorized(self.client.get(&url));

        let (status, body) = HttpUtils::execute_request_with_retry(
            request,
            path,
            "GET",
            &url,
            self.config.max_retries,
        )
        .await?;
        HttpUtils::check_status(status, &body, path, path)?;

        let envelope: CatalogEnvelope<T> = HttpUtils::parse_json(&body, path)?;
        Ok(PagedResult::new(
            envelope.data,
            query.page,
            query.limit,
            envelope.total,
        ))
    }

    /// POST or PUT an RFQ. Never retried: a timed-out POST may have been applied.
    async fn send_submission(
        &self,
        rfq_id: Option<&str>,
        submission: &RfqSubmission,
    ) -> Result<RfqReceipt> {
        let body = serde_json::to_string(submission).map_err(|e| {
            ProviderError::SerializationError {
                endpoint: RFQ_PATH.to_string(),
                detail: e.to_string(),
            }
        })?;

        let (method, url) = match rfq_id {
            Some(id) => (
                "PUT",
                join_url(
                    &self.config.base_url,
                    &format!("{RFQ_PATH}/{}", urlencoding::encode(id)),
                ),
            ),
            None => ("POST", join_url(&self.config.base_url, RFQ_PATH)),
        };

        let builder = if rfq_id.is_some() {
            self.client.put(&url)
        } else {
            self.client.post(&url)
        };
        let request = self
            .authorized(builder)
            .header("Content-Type", "application/json")
            .body(body);

        let (status, response_text) =
            HttpUtils::execute_request(request, RFQ_PATH, method, &url).await?;
        HttpUtils::check_status(status, &response_text, RFQ_PATH, rfq_id.unwrap_or(RFQ_PATH))?;

        let envelope: ReceiptEnvelope = HttpUtils::parse_json(&response_text, RFQ_PATH)?;
        Ok(envelope.into_receipt())
    }
}

#[async_trait]
impl PagedResultProvider<Product> for ProcurementClient {
    fn resource(&self) -> &'static str {
        PRODUCTS_PATH
    }

    async fn fetch_page(&self, query: &PageQuery) -> Result<PagedResult<Product>> {
        self.get_page(PRODUCTS_PATH, query).await
    }
}

#[async_trait]
impl PagedResultProvider<Vendor> for ProcurementClient {
    fn resource(&self) -> &'static str {
        VENDORS_PATH
    }

    async fn fetch_page(&self, query: &PageQuery) -> Result<PagedResult<Vendor>> {
        self.get_page(VENDORS_PATH, query).await
    }
}

#[async_trait]
impl PagedResultProvider<User> for ProcurementClient {
    fn resource(&self) -> &'static str {
        USERS_PATH
    }

    async fn fetch_page(&self, query: &PageQuery) -> Result<PagedResult<User>> {
        self.get_page(USERS_PATH, query).await
    }
}

#[async_trait]
impl RfqSubmitter for ProcurementClient {
    async fn create_rfq(&self, submission: &RfqSubmission) -> Result<RfqReceipt> {
        self.send_submission(None, submission).await
    }

    async fn update_rfq(&self, rfq_id: &str, submission: &RfqSubmission) -> Result<RfqReceipt> {
        if rfq_id.trim().is_empty() {
            return Err(ProviderError::InvalidParameter {
                endpoint: RFQ_PATH.to_string(),
                param: "rfq_id".to_string(),
                detail: "must not be empty".to_string(),
            });
        }
        self.send_submission(Some(rfq_id), submission).await
    }
}
