//! Catalog lookup service

use std::sync::Arc;

use rfq_orchestrator_provider::PagedResultProvider;

use crate::config::WizardConfig;
use crate::error::{CoreError, CoreResult};
use crate::services::{ServiceContext, log_failure};
use crate::types::{PageQuery, PagedResult, Product, User, Vendor};

/// Paginated product, vendor and user lookups with clamped queries
pub struct CatalogService {
    ctx: Arc<ServiceContext>,
    max_limit: u32,
    user_search_limit: u32,
}

impl CatalogService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>, config: &WizardConfig) -> Self {
        Self {
            ctx,
            max_limit: config.max_page_size,
            user_search_limit: config.user_search_limit,
        }
    }

    /// One page of the product catalog.
    pub async fn fetch_products(&self, query: &PageQuery) -> CoreResult<PagedResult<Product>> {
        self.fetch(self.ctx.products.as_ref(), query).await
    }

    /// One page of the vendor catalog.
    pub async fn fetch_vendors(&self, query: &PageQuery) -> CoreResult<PagedResult<Vendor>> {
        self.fetch(self.ctx.vendors.as_ref(), query).await
    }

    /// First page of users matching `term`; a blank term lists users unfiltered.
    pub async fn search_users(&self, term: &str) -> CoreResult<PagedResult<User>> {
        let query = PageQuery::new(1, self.user_search_limit).with_search(term);
        self.fetch_users(&query).await
    }

    /// One page of users for an already built query.
    pub async fn fetch_users(&self, query: &PageQuery) -> CoreResult<PagedResult<User>> {
        self.fetch(self.ctx.users.as_ref(), query).await
    }

    async fn fetch<T: Send>(
        &self,
        provider: &dyn PagedResultProvider<T>,
        query: &PageQuery,
    ) -> CoreResult<PagedResult<T>> {
        let query = query.validated(self.max_limit);
        log::debug!(
            "Fetching {} page={} limit={} search={:?}",
            provider.resource(),
            query.page,
            query.limit,
            query.search
        );
        match provider.fetch_page(&query).await {
            Ok(page) => Ok(page),
            Err(e) => {
                let err = CoreError::Provider(e);
                log_failure(&format!("Fetching {}", provider.resource()), &err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_context;

    #[tokio::test]
    async fn queries_are_clamped_before_reaching_provider() {
        let (ctx, mocks) = create_test_context();
        let config = WizardConfig {
            max_page_size: 25,
            ..WizardConfig::default()
        };
        let service = CatalogService::new(ctx, &config);

        let page = service
            .fetch_products(&PageQuery::new(0, 500).with_search("  gloves "))
            .await
            .unwrap();

        let seen = mocks.products.last_query().await.unwrap();
        assert_eq!(seen.page, 1);
        assert_eq!(seen.limit, 25);
        assert_eq!(seen.search.as_deref(), Some("gloves"));
        assert_eq!(page.page, 1);
    }

    #[tokio::test]
    async fn provider_failure_surfaces_as_core_error() {
        let (ctx, mocks) = create_test_context();
        mocks.vendors.set_fail(true).await;
        let service = CatalogService::new(ctx, &WizardConfig::default());

        let err = service
            .fetch_vendors(&PageQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Provider(_)));
    }

    #[tokio::test]
    async fn user_search_uses_configured_limit() {
        let (ctx, mocks) = create_test_context();
        let service = CatalogService::new(ctx, &WizardConfig::default());

        let result = service.search_users("ali").await.unwrap();

        assert_eq!(mocks.users.last_query().await.unwrap().limit, 20);
        assert!(result.rows.iter().all(|u| u.name.to_lowercase().contains("ali")));
        assert!(!result.rows.is_empty());
    }
}
