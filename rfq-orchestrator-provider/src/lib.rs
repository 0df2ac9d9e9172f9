//! # rfq-orchestrator-provider
//!
//! Request/response access to the procurement back-office API: paginated
//! catalog lookups (products, vendors, users) and RFQ create/update.
//!
//! The crate holds no state. Everything that remembers a selection lives in
//! `rfq-orchestrator-core`; this crate only answers "give me page N of X" and
//! "store this RFQ".
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for cross-compilation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rfq_orchestrator_provider::{
//!     ClientConfig, PageQuery, PagedResultProvider, ProcurementClient, Product,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ProcurementClient::new(
//!         ClientConfig::new("https://procure.example.com/api").with_token("token"),
//!     )?;
//!
//!     let query = PageQuery::new(1, 10).with_search("gloves");
//!     let page = <ProcurementClient as PagedResultProvider<Product>>::fetch_page(&client, &query)
//!         .await?;
//!     for product in &page.rows {
//!         println!("{} {}", product.item_code, product.item_name);
//!     }
//!     println!("{} of {}", page.rows.len(), page.total);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError).
//! Transient errors (`NetworkError`, `Timeout`, `RateLimited`) are retried
//! with exponential backoff on catalog reads. Submissions are sent once.

mod client;
mod error;
mod http_client;
mod traits;
mod types;
mod utils;

pub use error::{ProviderError, Result};

pub use client::ProcurementClient;

pub use traits::{PagedResultProvider, RfqSubmitter};

pub use types::{
    Attachment, ClientConfig, PageQuery, PagedResult, Product, RfqItem, RfqReceipt,
    RfqSubmission, User, Vendor,
};
