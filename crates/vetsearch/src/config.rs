//! Search configuration.
//!
//! Pagination policy lives here rather than inside the specification
//! builder: callers pass a [`SearchConfig`] to
//! [`Specification::empty`](crate::Specification::empty) and executors
//! resolve a specification's window through [`SearchConfig::resolve`].
//!
//! ```yaml
//! default_page_size: 25
//! max_page_size: 200
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, SearchError};
use crate::pagination::Pagination;

/// Page size used when the configuration does not name one.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Upper bound on page size used when the configuration does not name one.
pub const DEFAULT_MAX_PAGE_SIZE: usize = 500;

/// Pagination policy for searches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Window size applied when a search carries no pagination.
    pub default_page_size: usize,
    /// Largest window a search may request; larger requests are clamped.
    pub max_page_size: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}

impl SearchConfig {
    /// Parses and validates a YAML configuration document.
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        let config: SearchConfig = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a YAML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = SearchConfig::from_yaml_str(&source)?;
        debug!(
            path = %path.display(),
            default_page_size = config.default_page_size,
            max_page_size = config.max_page_size,
            "Search configuration loaded"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_page_size == 0 || self.max_page_size == 0 {
            return Err(SearchError::ZeroPageSize);
        }
        if self.default_page_size > self.max_page_size {
            return Err(SearchError::DefaultExceedsMax {
                default: self.default_page_size,
                max: self.max_page_size,
            });
        }
        Ok(())
    }

    /// The first page at the default page size.
    pub fn default_pagination(&self) -> Pagination {
        Pagination::new(self.default_page_size, 0)
    }

    /// Resolves the window an executor should apply.
    ///
    /// - No pagination: the default window.
    /// - Zero limit: [`SearchError::ZeroPageSize`].
    /// - Limit above the maximum: clamped to the maximum.
    pub fn resolve(&self, requested: Option<Pagination>) -> Result<Pagination> {
        let Some(requested) = requested else {
            return Ok(self.default_pagination());
        };
        if requested.limit == 0 {
            return Err(SearchError::ZeroPageSize);
        }
        if requested.limit > self.max_page_size {
            warn!(
                requested = requested.limit,
                max = self.max_page_size,
                "Page size above maximum, clamping"
            );
            return Ok(Pagination::new(self.max_page_size, requested.offset));
        }
        Ok(requested)
    }
}
