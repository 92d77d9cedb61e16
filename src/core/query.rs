//! Immutable query definition and GraphQL document rendering

use super::argument::{ArgumentValue, Arguments};
use super::builder::QueryBuilder;
use super::cursor::PaginationCursor;
use super::error::{ConfigurationError, FragmentError};
use super::executor::QueryExecutor;
use super::sort::{self, SortClause};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

const INDENT: &str = "  ";

/// How the model's root field is queried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginationMode {
    /// `<model>List { items { ... } }`
    #[default]
    List,

    /// `<model>Paginated { edges { node { ... } } pageInfo { ... } }`
    Cursor,
}

impl PaginationMode {
    /// Suffix appended to the model name to form the root field
    pub fn root_suffix(&self) -> &'static str {
        match self {
            PaginationMode::List => "List",
            PaginationMode::Cursor => "Paginated",
        }
    }
}

/// A content fragment query produced by [`QueryBuilder`]
///
/// # Example
///
/// ```rust,ignore
/// let mut builder = Query::builder();
/// builder
///     .content_fragment_model_name("article")?
///     .fields(["title", "author { name }"])?
///     .sort_by_clauses(["title", "publishDate DESC"])?;
/// let query = builder.build()?;
///
/// let document = query.generate_with([("limit", 5)])?;
/// ```
#[derive(Clone, Default)]
pub struct Query {
    pub(crate) model_name: Option<String>,
    pub(crate) fields: Vec<String>,
    pub(crate) sort_clauses: Vec<SortClause>,
    pub(crate) pagination: PaginationMode,
    pub(crate) executor: Option<Arc<dyn QueryExecutor>>,
}

impl fmt::Debug for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("model_name", &self.model_name)
            .field("fields", &self.fields)
            .field("sort_clauses", &self.sort_clauses)
            .field("pagination", &self.pagination)
            .field("has_executor", &self.executor.is_some())
            .finish()
    }
}

impl Query {
    /// Start configuring a new query
    pub fn builder() -> QueryBuilder {
        QueryBuilder::new()
    }

    pub fn model_name(&self) -> Option<&str> {
        self.model_name.as_deref()
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn sort_clauses(&self) -> &[SortClause] {
        &self.sort_clauses
    }

    pub fn pagination(&self) -> PaginationMode {
        self.pagination
    }

    /// Root field name for the configured pagination mode
    pub fn root_field(&self) -> Result<String, FragmentError> {
        self.root_field_for(self.pagination)
    }

    /// Render the document without extra top-level arguments
    pub fn generate(&self) -> Result<String, FragmentError> {
        self.render(self.pagination, Arguments::new())
    }

    /// Render the document with extra top-level arguments
    ///
    /// Caller arguments are applied after the configured `sort`, so a caller
    /// supplied `sort` replaces it.
    pub fn generate_with<I, K, V>(&self, arguments: I) -> Result<String, FragmentError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ArgumentValue>,
    {
        let arguments = arguments
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.render(self.pagination, arguments)
    }

    /// Open a cursor walking this query page by page
    ///
    /// Each call returns an independent cursor starting from the first page.
    pub fn open_cursor(&self) -> Result<PaginationCursor, FragmentError> {
        let model_name = self
            .model_name
            .as_ref()
            .ok_or(ConfigurationError::MissingModelName)?;

        if self.pagination != PaginationMode::Cursor {
            return Err(ConfigurationError::NotPaginated {
                model_name: model_name.clone(),
            }
            .into());
        }

        let executor = self
            .executor
            .clone()
            .ok_or_else(|| ConfigurationError::MissingExecutor {
                model_name: model_name.clone(),
            })?;

        let root_field = format!("{}{}", model_name, PaginationMode::Cursor.root_suffix());
        Ok(PaginationCursor::new(self.clone(), executor, root_field))
    }

    pub(crate) fn root_field_for(&self, mode: PaginationMode) -> Result<String, FragmentError> {
        let model_name = self
            .model_name
            .as_ref()
            .ok_or(ConfigurationError::MissingModelName)?;
        Ok(format!("{}{}", model_name, mode.root_suffix()))
    }

    pub(crate) fn render(
        &self,
        mode: PaginationMode,
        arguments: Arguments,
    ) -> Result<String, FragmentError> {
        let root_field = self.root_field_for(mode)?;

        let mut effective = Arguments::new();
        if !self.sort_clauses.is_empty() {
            effective.insert(
                "sort".to_string(),
                ArgumentValue::Text(sort::join_clauses(&self.sort_clauses)),
            );
        }
        effective.extend(arguments);

        let mut doc = String::from("query {\n");
        doc.push_str(INDENT);
        doc.push_str(&root_field);

        if !effective.is_empty() {
            let rendered = effective
                .iter()
                .map(|(key, value)| format!("{}: {}", key, value))
                .collect::<Vec<_>>()
                .join(", ");
            doc.push('(');
            doc.push_str(&rendered);
            doc.push(')');
        }
        doc.push_str(" {\n");

        match mode {
            PaginationMode::Cursor => {
                doc.push_str("    edges {\n");
                doc.push_str("      node {\n");
                self.push_fields(&mut doc, 4);
                doc.push_str("      }\n");
                doc.push_str("    }\n");
                doc.push_str("    pageInfo {\n");
                doc.push_str("      hasNextPage\n");
                doc.push_str("      endCursor\n");
                doc.push_str("    }\n");
            }
            PaginationMode::List => {
                doc.push_str("    items {\n");
                self.push_fields(&mut doc, 3);
                doc.push_str("    }\n");
            }
        }

        doc.push_str("  }\n");
        doc.push_str("}\n");
        Ok(doc)
    }

    fn push_fields(&self, doc: &mut String, depth: usize) {
        let indent = INDENT.repeat(depth);
        for field in &self.fields {
            doc.push_str(&indent);
            doc.push_str(field);
            doc.push('\n');
        }
    }
}
