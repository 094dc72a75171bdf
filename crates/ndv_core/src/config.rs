use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::filter::FacetField;
use crate::paginate::PaginationPolicy;
use crate::{Error, Result};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_STATUS_TTL_MS: u64 = 3000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub page_size: usize,
    pub pagination: PaginationPolicy,
    /// Field the facet list and facet filter read.
    pub facet: FacetField,
    /// How long a status message stays visible.
    pub status_ttl_ms: u64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            pagination: PaginationPolicy::default(),
            facet: FacetField::default(),
            status_ttl_ms: DEFAULT_STATUS_TTL_MS,
        }
    }
}

impl ViewConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::Config("page_size must be at least 1".to_string()));
        }
        if let PaginationPolicy::Windowed { max_visible: 0 } = self.pagination {
            return Err(Error::Config("max_visible must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn status_ttl(&self) -> Duration {
        Duration::from_millis(self.status_ttl_ms)
    }
}
