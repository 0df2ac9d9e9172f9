use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============ Pagination ============

/// Query parameters for paginated catalog lookups.
///
/// Pages are 1-indexed. `filters` are forwarded verbatim as extra query
/// parameters (for example `categoryName` or `status`).
///
/// # Default
///
/// The default is `page = 1, limit = 10`, with no search term and no filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    /// Page number (1-indexed).
    pub page: u32,
    /// Number of rows per page.
    pub limit: u32,
    /// Free-text search term.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Additional equality filters.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub filters: BTreeMap<String, String>,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            search: None,
            filters: BTreeMap::new(),
        }
    }
}

impl PageQuery {
    /// Create a query for the given page and limit without search or filters.
    #[must_use]
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            ..Self::default()
        }
    }

    /// Set the search term. Blank terms clear the search.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = if search.trim().is_empty() {
            None
        } else {
            Some(search)
        };
        self
    }

    /// Add an equality filter.
    #[must_use]
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Clamp pagination values to valid ranges.
    ///
    /// - `page` is clamped to `>= 1`
    /// - `limit` is clamped to `1..=max_limit`
    /// - `search` is trimmed; a blank search becomes `None`
    /// - `filters` are preserved as-is
    #[must_use]
    pub fn validated(&self, max_limit: u32) -> Self {
        Self {
            page: self.page.max(1),
            limit: self.limit.clamp(1, max_limit.max(1)),
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            filters: self.filters.clone(),
        }
    }

    /// Flatten into ordered `(name, value)` query pairs.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        for (key, value) in &self.filters {
            pairs.push((key.clone(), value.clone()));
        }
        pairs
    }
}

/// One page of catalog rows.
///
/// `rows.len()` may be smaller than `limit` on the last page and `total`
/// may be `0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    /// Rows on this page, in display order.
    pub rows: Vec<T>,
    /// Page number this result answers.
    pub page: u32,
    /// Page size used for this request.
    pub limit: u32,
    /// Total number of rows across all pages.
    pub total: u32,
    /// Whether there are more pages after this one.
    pub has_more: bool,
}

impl<T> PagedResult<T> {
    /// Create a page result, computing [`has_more`](Self::has_more).
    pub fn new(rows: Vec<T>, page: u32, limit: u32, total: u32) -> Self {
        let has_more = u64::from(page) * u64::from(limit) < u64::from(total);
        Self {
            rows,
            page,
            limit,
            total,
            has_more,
        }
    }

    /// An empty page, as returned for a search with no hits.
    pub fn empty(page: u32, limit: u32) -> Self {
        Self::new(Vec::new(), page, limit, 0)
    }

    /// Number of pages implied by `total` and `limit`.
    pub fn page_count(&self) -> u32 {
        if self.limit == 0 {
            return 0;
        }
        self.total.div_ceil(self.limit)
    }
}

// ============ Catalog Types ============

/// A catalog product. `item_code` is unique across all pages and searches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Canonical key.
    pub item_code: String,
    pub item_name: String,
    /// Requested annual volume; `None` until the user types one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_volume_quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generic_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// A vendor. `id` is unique across all pages and searches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    /// Canonical key.
    pub id: String,
    pub name: String,
    pub email: String,
    pub vendor_code: String,
    pub status: String,
    /// Marked as preferred for this RFQ. Client-side only, never sent by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred: Option<bool>,
}

/// A user returned by the collaborator search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

// ============ Submission Types ============

/// One product line of an RFQ submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RfqItem {
    pub item_code: String,
    pub item_name: String,
    pub annual_volume_quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generic_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl From<Product> for RfqItem {
    /// Unset quantities become `0`.
    fn from(product: Product) -> Self {
        Self {
            item_code: product.item_code,
            item_name: product.item_name,
            annual_volume_quantity: product.annual_volume_quantity.unwrap_or(0),
            brand_name: product.brand_name,
            generic_name: product.generic_name,
            category_name: product.category_name,
            tag: product.tag,
        }
    }
}

impl From<RfqItem> for Product {
    fn from(item: RfqItem) -> Self {
        Self {
            item_code: item.item_code,
            item_name: item.item_name,
            annual_volume_quantity: Some(item.annual_volume_quantity),
            brand_name: item.brand_name,
            generic_name: item.generic_name,
            category_name: item.category_name,
            tag: item.tag,
        }
    }
}

/// A file attached to an RFQ (already uploaded; only the reference travels).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub file_name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
}

/// Flat payload POSTed to create, or PUT to update, an RFQ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RfqSubmission {
    pub title: String,
    pub department: String,
    pub item_type: String,
    pub items: Vec<RfqItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_terms: Option<String>,
    pub selected_vendors: Vec<String>,
    pub preferred_vendors: Vec<String>,
    pub collaborators: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_specifications: Option<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Server acknowledgement of a create/update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RfqReceipt {
    /// Server-side RFQ identifier.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rfq_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

// ============ Client Configuration ============

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    2
}

/// Connection settings for [`ProcurementClient`](crate::ProcurementClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// API root, e.g. `https://procurement.example.com/api`. A trailing `/` is ignored.
    pub base_url: String,
    /// Bearer token sent as `Authorization` header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Retries for transient failures on idempotent GETs. Submissions are never retried.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl ClientConfig {
    /// Config with default timeouts and retries.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: None,
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }
}
