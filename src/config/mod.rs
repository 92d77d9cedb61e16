//! Configuration loading for named query definitions
//!
//! Queries can be declared in YAML instead of being assembled in code:
//!
//! ```yaml
//! queries:
//!   adventures:
//!     model: adventure
//!     pagination: cursor
//!     fields:
//!       - title
//!       - price
//!     sort:
//!       - price DESC
//!       - title
//! ```

use crate::core::{FragmentError, PaginationMode, Query, QueryBuilder};
use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Declarative form of a single query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Content fragment model name (e.g., "adventure")
    pub model: String,

    /// Field paths to select, in order
    #[serde(default)]
    pub fields: Vec<String>,

    /// Sort clauses in `field [ASC|DESC]` form
    #[serde(default)]
    pub sort: Vec<String>,

    /// `list` (default) or `cursor`
    #[serde(default)]
    pub pagination: PaginationMode,
}

impl QueryConfig {
    /// Create a builder pre-populated from this definition
    ///
    /// The builder is left unsealed so an executor can still be bound.
    pub fn to_builder(&self) -> Result<QueryBuilder, FragmentError> {
        let mut builder = QueryBuilder::new();
        builder
            .content_fragment_model_name(self.model.as_str())?
            .fields(&self.fields)?
            .sort_by_clauses(&self.sort)?
            .paginated_with(self.pagination)?;
        Ok(builder)
    }

    /// Build the query directly (no executor bound)
    pub fn build(&self) -> Result<Query, FragmentError> {
        self.to_builder()?.build()
    }
}

/// A set of named query definitions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueriesConfig {
    /// Query definitions keyed by name, in declaration order
    #[serde(default)]
    pub queries: IndexMap<String, QueryConfig>,
}

impl QueriesConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Find a query definition by name
    pub fn query(&self, name: &str) -> Option<&QueryConfig> {
        self.queries.get(name)
    }

    /// Merge several configurations
    ///
    /// Later definitions replace earlier ones with the same name while
    /// keeping the position of the first declaration.
    pub fn merge(configs: Vec<QueriesConfig>) -> Self {
        let mut merged = QueriesConfig::default();
        for config in configs {
            merged.queries.extend(config.queries);
        }
        merged
    }
}
