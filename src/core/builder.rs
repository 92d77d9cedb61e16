//! QueryBuilder for fluent query configuration

use super::error::{ConfigurationError, FragmentError};
use super::executor::QueryExecutor;
use super::query::{PaginationMode, Query};
use super::sort::{SortClause, SortOrder};
use std::sync::Arc;

/// Builder accumulating the configuration of a single [`Query`]
///
/// A builder produces exactly one query. Once [`build`](Self::build) has
/// succeeded, every further call fails with
/// [`ConfigurationError::BuilderSealed`]. A failed call leaves the
/// accumulated configuration untouched.
///
/// # Example
///
/// ```ignore
/// let mut builder = QueryBuilder::new();
/// builder
///     .content_fragment_model_name("adventure")?
///     .field("title")?
///     .field("price")?
///     .sort_by("price", SortOrder::Desc)?
///     .paginated()?
///     .executor(client)?;
///
/// let mut cursor = builder.build()?.open_cursor()?;
/// ```
#[derive(Debug, Default)]
pub struct QueryBuilder {
    query: Query,
    sealed: bool,
}

impl QueryBuilder {
    /// Create a new QueryBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the content fragment model queried (required)
    pub fn content_fragment_model_name(
        &mut self,
        name: impl Into<String>,
    ) -> Result<&mut Self, FragmentError> {
        self.assert_not_sealed()?;
        let name = name.into();
        if name.is_empty() {
            return Err(ConfigurationError::EmptyModelName.into());
        }
        self.query.model_name = Some(name);
        Ok(self)
    }

    /// Append one field path to the selection
    ///
    /// The path is emitted verbatim, so nested selections such as
    /// `"author { name }"` are allowed.
    pub fn field(&mut self, name: impl Into<String>) -> Result<&mut Self, FragmentError> {
        self.assert_not_sealed()?;
        self.query.fields.push(name.into());
        Ok(self)
    }

    /// Append several field paths, keeping their order and duplicates
    pub fn fields<I, S>(&mut self, names: I) -> Result<&mut Self, FragmentError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assert_not_sealed()?;
        self.query.fields.extend(names.into_iter().map(Into::into));
        Ok(self)
    }

    /// Query with cursor pagination
    pub fn paginated(&mut self) -> Result<&mut Self, FragmentError> {
        self.paginated_with(PaginationMode::Cursor)
    }

    /// Query with an explicit pagination mode
    pub fn paginated_with(&mut self, mode: PaginationMode) -> Result<&mut Self, FragmentError> {
        self.assert_not_sealed()?;
        self.query.pagination = mode;
        Ok(self)
    }

    /// Append one explicit sort clause
    pub fn sort_by(
        &mut self,
        field: impl Into<String>,
        order: SortOrder,
    ) -> Result<&mut Self, FragmentError> {
        self.assert_not_sealed()?;
        let clause = SortClause::new(field, order)?;
        self.query.sort_clauses.push(clause);
        Ok(self)
    }

    /// Parse and append `"field"` / `"field ORDER"` clauses
    ///
    /// All clauses are parsed before any is appended, so a malformed clause
    /// leaves the builder unchanged.
    pub fn sort_by_clauses<I, S>(&mut self, clauses: I) -> Result<&mut Self, FragmentError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.assert_not_sealed()?;
        let parsed = clauses
            .into_iter()
            .map(|clause| clause.as_ref().parse::<SortClause>())
            .collect::<Result<Vec<_>, _>>()?;
        self.query.sort_clauses.extend(parsed);
        Ok(self)
    }

    /// Bind the executor used by cursors opened on the query
    pub fn executor(
        &mut self,
        executor: impl QueryExecutor + 'static,
    ) -> Result<&mut Self, FragmentError> {
        self.assert_not_sealed()?;
        self.query.executor = Some(Arc::new(executor));
        Ok(self)
    }

    /// Seal the builder and return the configured query
    pub fn build(&mut self) -> Result<Query, FragmentError> {
        self.assert_not_sealed()?;
        self.sealed = true;
        Ok(std::mem::take(&mut self.query))
    }

    /// Build and render the document without extra arguments
    pub fn generate(&mut self) -> Result<String, FragmentError> {
        self.build()?.generate()
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    fn assert_not_sealed(&self) -> Result<(), ConfigurationError> {
        if self.sealed {
            return Err(ConfigurationError::BuilderSealed);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::SortParseError;

    #[test]
    fn test_fields_keep_order_and_duplicates() {
        let mut builder = QueryBuilder::new();
        builder
            .content_fragment_model_name("article")
            .unwrap()
            .field("title")
            .unwrap()
            .fields(["body", "title"])
            .unwrap();

        let query = builder.build().unwrap();
        assert_eq!(query.fields(), ["title", "body", "title"]);
        assert_eq!(query.pagination(), PaginationMode::List);
    }

    #[test]
    fn test_build_twice_fails() {
        let mut builder = QueryBuilder::new();
        builder.content_fragment_model_name("article").unwrap();
        builder.build().unwrap();

        for _ in 0..2 {
            assert!(matches!(
                builder.build(),
                Err(FragmentError::Config(ConfigurationError::BuilderSealed))
            ));
        }
    }

    #[test]
    fn test_mutation_after_build_fails() {
        let mut builder = QueryBuilder::new();
        builder.build().unwrap();

        assert!(builder.field("title").is_err());
        assert!(builder.fields(["a"]).is_err());
        assert!(builder.content_fragment_model_name("x").is_err());
        assert!(builder.paginated().is_err());
        assert!(builder.sort_by("title", SortOrder::Asc).is_err());
        assert!(builder.sort_by_clauses(["title"]).is_err());
        assert!(builder.generate().is_err());
    }

    #[test]
    fn test_malformed_clause_leaves_builder_unchanged() {
        let mut builder = QueryBuilder::new();
        builder.content_fragment_model_name("article").unwrap();

        let err = builder
            .sort_by_clauses(["title", "price SIDEWAYS"])
            .unwrap_err();
        assert!(matches!(
            err,
            FragmentError::Sort(SortParseError::UnknownOrder { .. })
        ));

        let query = builder.build().unwrap();
        assert!(query.sort_clauses().is_empty());
    }

    #[test]
    fn test_empty_model_name_rejected() {
        let mut builder = QueryBuilder::new();
        assert!(matches!(
            builder.content_fragment_model_name(""),
            Err(FragmentError::Config(ConfigurationError::EmptyModelName))
        ));
    }

    #[test]
    fn test_generate_seals_builder() {
        let mut builder = QueryBuilder::new();
        builder
            .content_fragment_model_name("article")
            .unwrap()
            .field("title")
            .unwrap();

        let doc = builder.generate().unwrap();
        assert!(doc.contains("articleList"));
        assert!(builder.is_sealed());
    }
}
