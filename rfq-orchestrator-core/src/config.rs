//! Wizard configuration

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::PageQuery;

fn default_page_size() -> u32 {
    10
}

fn default_max_page_size() -> u32 {
    100
}

fn default_page_size_options() -> Vec<u32> {
    vec![10, 20, 50, 100]
}

fn default_user_search_limit() -> u32 {
    20
}

/// Paging limits shared by every catalog table of the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardConfig {
    /// Rows per page when a table is first shown.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    /// Upper bound applied to every outgoing page query.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
    /// Choices offered by the page-size selector.
    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<u32>,
    /// Rows requested per collaborator search.
    #[serde(default = "default_user_search_limit")]
    pub user_search_limit: u32,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            page_size_options: default_page_size_options(),
            user_search_limit: default_user_search_limit(),
        }
    }
}

impl WizardConfig {
    /// Parse and validate a JSON config; missing keys take their defaults.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CoreError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.max_page_size == 0 {
            return Err(CoreError::InvalidConfig(
                "maxPageSize must be at least 1".to_string(),
            ));
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(CoreError::InvalidConfig(format!(
                "defaultPageSize must be within 1..={}",
                self.max_page_size
            )));
        }
        if let Some(bad) = self
            .page_size_options
            .iter()
            .find(|&&size| size == 0 || size > self.max_page_size)
        {
            return Err(CoreError::InvalidConfig(format!(
                "page size option {bad} must be within 1..={}",
                self.max_page_size
            )));
        }
        if self.user_search_limit == 0 {
            return Err(CoreError::InvalidConfig(
                "userSearchLimit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// First page at the default size.
    #[must_use]
    pub fn initial_query(&self) -> PageQuery {
        PageQuery::new(1, self.default_page_size)
    }

    /// Largest page-size option not above `limit`, or the smallest option
    /// when every option is larger. Without options the limit is only
    /// capped at `max_page_size`.
    #[must_use]
    pub fn snap_page_size(&self, limit: u32) -> u32 {
        let options = self.page_size_options.iter().copied();
        options
            .clone()
            .filter(|&size| size <= limit)
            .max()
            .or_else(|| options.min())
            .unwrap_or_else(|| limit.clamp(1, self.max_page_size))
    }

    /// Clamp `query` and snap its limit to a page-size option.
    #[must_use]
    pub fn page_query(&self, query: &PageQuery) -> PageQuery {
        let mut query = query.validated(self.max_page_size);
        query.limit = self.snap_page_size(query.limit);
        query
    }
}
