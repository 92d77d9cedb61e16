//! GraphQL response model
//!
//! Mirrors the standard `{ "data": ..., "errors": [...] }` response body.
//! Only the pieces the cursor needs are interpreted; the rest of `data` is
//! handed back to the caller untouched.

use super::error::ExecutionError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Response returned by a [`QueryExecutor`](crate::core::QueryExecutor)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    errors: Vec<GraphQlError>,
}

/// One entry of the response `errors` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlError {
    pub message: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<ErrorLocation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

/// Position in the query document an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorLocation {
    pub line: u32,
    pub column: u32,
}

/// Continuation state reported under `<root>.pageInfo`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

impl GraphQlError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: Vec::new(),
            path: None,
            extensions: None,
        }
    }
}

impl fmt::Display for GraphQlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.locations.first() {
            Some(loc) => write!(f, "{} (line {}, column {})", self.message, loc.line, loc.column),
            None => write!(f, "{}", self.message),
        }
    }
}

impl GraphQlResponse {
    /// Error-free response carrying `data`
    pub fn from_data(data: Value) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// Response carrying only errors
    pub fn from_errors(errors: Vec<GraphQlError>) -> Self {
        Self { data: None, errors }
    }

    /// Parse a raw response body
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[GraphQlError] {
        &self.errors
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// The node stored under a top-level data field
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.as_ref()?.get(name)
    }

    /// Read `pageInfo` under a paginated root field
    pub fn page_info(&self, root_field: &str) -> Result<PageInfo, ExecutionError> {
        let root = self
            .field(root_field)
            .filter(|v| !v.is_null())
            .ok_or_else(|| ExecutionError::malformed(root_field, "root field missing from data"))?;

        let page_info = root
            .get("pageInfo")
            .ok_or_else(|| ExecutionError::malformed(root_field, "pageInfo missing"))?;

        let has_next_page = page_info
            .get("hasNextPage")
            .and_then(Value::as_bool)
            .ok_or_else(|| {
                ExecutionError::malformed(root_field, "pageInfo.hasNextPage missing or not a boolean")
            })?;

        let end_cursor = match page_info.get("endCursor") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                return Err(ExecutionError::malformed(
                    root_field,
                    format!("pageInfo.endCursor is not a string: {}", other),
                ));
            }
        };

        Ok(PageInfo {
            has_next_page,
            end_cursor,
        })
    }

    /// The content fragments under a root field
    ///
    /// Paginated roots yield `edges[].node`, list roots yield `items[]`.
    /// Missing pieces yield an empty list.
    pub fn nodes(&self, root_field: &str) -> Vec<&Value> {
        let Some(root) = self.field(root_field) else {
            return Vec::new();
        };

        if let Some(edges) = root.get("edges").and_then(Value::as_array) {
            return edges.iter().filter_map(|edge| edge.get("node")).collect();
        }

        root.get("items")
            .and_then(Value::as_array)
            .map(|items| items.iter().collect())
            .unwrap_or_default()
    }
}
