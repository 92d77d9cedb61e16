//! # Fragment GraphQL
//!
//! A fluent builder for GraphQL queries against a headless content-fragment
//! API, and a cursor that walks cursor-paginated results page by page.
//!
//! ## Features
//!
//! - **Fluent Builder**: Model name, field selection, sort clauses and pagination mode
//! - **Single-Use Builders**: A builder produces exactly one immutable query
//! - **Cursor Pagination**: `first`/`after` continuation driven by `pageInfo`
//! - **Retry-Safe Cursors**: Error responses never move the cursor
//! - **Pluggable Transport**: Bring your own HTTP client through [`QueryExecutor`](core::QueryExecutor)
//! - **Configuration-Based**: Declare named queries in YAML
//! - **In-Memory Backend**: Serve queries from local fragments for tests and development
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fragment_graphql::prelude::*;
//!
//! let mut builder = Query::builder();
//! builder
//!     .content_fragment_model_name("adventure")?
//!     .fields(["title", "price", "primaryImage { _path }"])?
//!     .sort_by_clauses(["price DESC"])?
//!     .paginated()?
//!     .executor(my_http_executor)?;
//! let query = builder.build()?;
//!
//! let mut cursor = query.open_cursor()?;
//! while cursor.has_more() {
//!     let page = cursor.next(20).await?;
//!     if page.has_errors() {
//!         break;
//!     }
//!     for adventure in page.nodes(cursor.root_field()) {
//!         println!("{}", adventure["title"]);
//!     }
//! }
//! ```

pub mod config;
pub mod core;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Builder & Query ===
    pub use crate::core::{
        ArgumentValue, Arguments, PaginationMode, Query, QueryBuilder, SortClause, SortOrder,
    };

    // === Pagination ===
    pub use crate::core::{CursorState, PaginationCursor};

    // === Execution ===
    pub use crate::core::{GraphQlError, GraphQlResponse, PageInfo, QueryExecutor};

    // === Errors ===
    pub use crate::core::{ConfigurationError, ExecutionError, FragmentError, SortParseError};

    // === Config ===
    pub use crate::config::{QueriesConfig, QueryConfig};

    // === Storage ===
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemoryContentStore;

    // === External dependencies ===
    pub use async_trait::async_trait;
}
