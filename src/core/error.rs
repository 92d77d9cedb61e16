//! Typed error handling for query building and cursor pagination
//!
//! Errors are grouped by category so callers can match on exactly what went
//! wrong instead of inspecting strings.
//!
//! # Error Categories
//!
//! - [`ConfigurationError`]: the builder or query was used incorrectly. These
//!   are raised before any request leaves the process.
//! - [`SortParseError`]: a `"field [ASC|DESC]"` clause could not be parsed.
//! - [`ExecutionError`]: the executor failed, or its response did not carry
//!   the pagination fields the cursor needs.
//!
//! Errors reported by the GraphQL server itself are *not* represented here.
//! They come back as a normal [`GraphQlResponse`](crate::core::GraphQlResponse)
//! with [`has_errors`](crate::core::GraphQlResponse::has_errors) set.
//!
//! # Example
//!
//! ```rust,ignore
//! match builder.field("title") {
//!     Ok(_) => {}
//!     Err(FragmentError::Config(ConfigurationError::BuilderSealed)) => {
//!         eprintln!("builder already produced its query");
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use std::fmt;

/// The main error type of the crate
#[derive(Debug)]
pub enum FragmentError {
    /// Builder or query misuse
    Config(ConfigurationError),

    /// Malformed sort clause
    Sort(SortParseError),

    /// Executor or response-shape failures
    Execution(ExecutionError),
}

impl fmt::Display for FragmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FragmentError::Config(e) => write!(f, "{}", e),
            FragmentError::Sort(e) => write!(f, "{}", e),
            FragmentError::Execution(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for FragmentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FragmentError::Config(e) => Some(e),
            FragmentError::Sort(e) => Some(e),
            FragmentError::Execution(e) => Some(e),
        }
    }
}

impl FragmentError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            FragmentError::Config(e) => e.error_code(),
            FragmentError::Sort(e) => e.error_code(),
            FragmentError::Execution(e) => e.error_code(),
        }
    }

    /// Whether this error was raised before any request was issued
    pub fn is_configuration(&self) -> bool {
        matches!(self, FragmentError::Config(_) | FragmentError::Sort(_))
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors caused by using the builder, query or cursor incorrectly
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// No content fragment model name was configured
    MissingModelName,

    /// An empty string was given as model name
    EmptyModelName,

    /// The builder already produced its query
    BuilderSealed,

    /// A cursor was requested on a query that is not cursor-paginated
    NotPaginated { model_name: String },

    /// A cursor was requested on a query with no executor bound to it
    MissingExecutor { model_name: String },

    /// Page sizes must be positive
    InvalidPageSize { page_size: u32 },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::MissingModelName => {
                write!(f, "Content fragment model name must be set")
            }
            ConfigurationError::EmptyModelName => {
                write!(f, "Content fragment model name must not be empty")
            }
            ConfigurationError::BuilderSealed => {
                write!(f, "Builder can only be used to create one query")
            }
            ConfigurationError::NotPaginated { model_name } => {
                write!(
                    f,
                    "Query for '{}' is not cursor paginated; call paginated() on the builder",
                    model_name
                )
            }
            ConfigurationError::MissingExecutor { model_name } => {
                write!(f, "No query executor bound to query for '{}'", model_name)
            }
            ConfigurationError::InvalidPageSize { page_size } => {
                write!(f, "Page size must be positive, got {}", page_size)
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

impl ConfigurationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigurationError::MissingModelName => "MISSING_MODEL_NAME",
            ConfigurationError::EmptyModelName => "EMPTY_MODEL_NAME",
            ConfigurationError::BuilderSealed => "BUILDER_SEALED",
            ConfigurationError::NotPaginated { .. } => "NOT_PAGINATED",
            ConfigurationError::MissingExecutor { .. } => "MISSING_EXECUTOR",
            ConfigurationError::InvalidPageSize { .. } => "INVALID_PAGE_SIZE",
        }
    }
}

impl From<ConfigurationError> for FragmentError {
    fn from(err: ConfigurationError) -> Self {
        FragmentError::Config(err)
    }
}

// =============================================================================
// Sort Errors
// =============================================================================

/// Errors raised while constructing a sort clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortParseError {
    /// The clause string had no tokens at all
    Empty,

    /// The sort field was empty
    EmptyField,

    /// The order token was neither `ASC` nor `DESC`
    UnknownOrder { clause: String, order: String },

    /// More than `field ORDER` was given
    TrailingTokens { clause: String },
}

impl fmt::Display for SortParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortParseError::Empty => write!(f, "Sort clause is empty"),
            SortParseError::EmptyField => write!(f, "Sort field must not be empty"),
            SortParseError::UnknownOrder { clause, order } => {
                write!(
                    f,
                    "Unknown sort order '{}' in '{}' (expected ASC or DESC)",
                    order, clause
                )
            }
            SortParseError::TrailingTokens { clause } => {
                write!(
                    f,
                    "Sort clause '{}' has trailing tokens (expected 'field [ASC|DESC]')",
                    clause
                )
            }
        }
    }
}

impl std::error::Error for SortParseError {}

impl SortParseError {
    pub fn error_code(&self) -> &'static str {
        match self {
            SortParseError::Empty => "EMPTY_SORT_CLAUSE",
            SortParseError::EmptyField => "EMPTY_SORT_FIELD",
            SortParseError::UnknownOrder { .. } => "UNKNOWN_SORT_ORDER",
            SortParseError::TrailingTokens { .. } => "MALFORMED_SORT_CLAUSE",
        }
    }
}

impl From<SortParseError> for FragmentError {
    fn from(err: SortParseError) -> Self {
        FragmentError::Sort(err)
    }
}

// =============================================================================
// Execution Errors
// =============================================================================

/// Errors raised while executing a query or reading its response
#[derive(Debug)]
pub enum ExecutionError {
    /// The executor could not produce a response at all
    Transport(anyhow::Error),

    /// An error-free response did not have the expected shape
    MalformedResponse { root_field: String, message: String },
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionError::Transport(e) => write!(f, "Query execution failed: {}", e),
            ExecutionError::MalformedResponse {
                root_field,
                message,
            } => {
                write!(f, "Malformed response for '{}': {}", root_field, message)
            }
        }
    }
}

impl std::error::Error for ExecutionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExecutionError::Transport(e) => Some(&**e),
            ExecutionError::MalformedResponse { .. } => None,
        }
    }
}

impl ExecutionError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ExecutionError::Transport(_) => "TRANSPORT_ERROR",
            ExecutionError::MalformedResponse { .. } => "MALFORMED_RESPONSE",
        }
    }

    pub(crate) fn malformed(root_field: &str, message: impl Into<String>) -> Self {
        ExecutionError::MalformedResponse {
            root_field: root_field.to_string(),
            message: message.into(),
        }
    }
}

impl From<ExecutionError> for FragmentError {
    fn from(err: ExecutionError) -> Self {
        FragmentError::Execution(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_errors_are_flagged() {
        let err: FragmentError = ConfigurationError::BuilderSealed.into();
        assert!(err.is_configuration());
        assert_eq!(err.error_code(), "BUILDER_SEALED");

        let err: FragmentError = SortParseError::Empty.into();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_transport_error_keeps_source() {
        use std::error::Error;

        let err: FragmentError =
            ExecutionError::Transport(anyhow::anyhow!("connection reset")).into();
        assert!(!err.is_configuration());
        assert!(err.to_string().contains("connection reset"));
        assert!(err.source().and_then(|s| s.source()).is_some());
    }
}
