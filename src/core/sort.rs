//! Sort clauses for the top-level `sort` argument

use super::error::SortParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sorting direction of a [`SortClause`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = SortParseError;

    /// Parses `ASC` / `DESC`, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("ASC") {
            Ok(SortOrder::Asc)
        } else if s.eq_ignore_ascii_case("DESC") {
            Ok(SortOrder::Desc)
        } else {
            Err(SortParseError::UnknownOrder {
                clause: s.to_string(),
                order: s.to_string(),
            })
        }
    }
}

/// One `field ORDER` entry of the `sort` argument
///
/// # Example
///
/// ```rust,ignore
/// let clause: SortClause = "price desc".parse()?;
/// assert_eq!(clause.order(), SortOrder::Desc);
/// assert_eq!(clause.to_string(), "price DESC");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortClause {
    field: String,
    order: SortOrder,
}

impl SortClause {
    /// Create a clause from an explicit field and order
    pub fn new(field: impl Into<String>, order: SortOrder) -> Result<Self, SortParseError> {
        let field = field.into();
        if field.trim().is_empty() {
            return Err(SortParseError::EmptyField);
        }
        Ok(Self { field, order })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }
}

impl FromStr for SortClause {
    type Err = SortParseError;

    /// Parses `"field"` or `"field ORDER"`; the order defaults to ascending
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();

        let field = tokens.next().ok_or(SortParseError::Empty)?;
        let order = match tokens.next() {
            None => SortOrder::Asc,
            Some(token) => token.parse().map_err(|_| SortParseError::UnknownOrder {
                clause: s.to_string(),
                order: token.to_string(),
            })?,
        };

        if tokens.next().is_some() {
            return Err(SortParseError::TrailingTokens {
                clause: s.to_string(),
            });
        }

        SortClause::new(field, order)
    }
}

impl fmt::Display for SortClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.order)
    }
}

/// Render clauses as the value of the `sort` argument
pub(crate) fn join_clauses(clauses: &[SortClause]) -> String {
    clauses
        .iter()
        .map(SortClause::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
