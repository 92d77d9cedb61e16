//! Core module containing the query builder, the rendered query model and
//! cursor pagination

pub mod argument;
pub mod builder;
pub mod cursor;
pub mod error;
pub mod executor;
pub mod query;
pub mod response;
pub mod sort;

pub use argument::{ArgumentValue, Arguments};
pub use builder::QueryBuilder;
pub use cursor::{CursorState, PaginationCursor};
pub use error::{ConfigurationError, ExecutionError, FragmentError, SortParseError};
pub use executor::QueryExecutor;
pub use query::{PaginationMode, Query};
pub use response::{ErrorLocation, GraphQlError, GraphQlResponse, PageInfo};
pub use sort::{SortClause, SortOrder};
