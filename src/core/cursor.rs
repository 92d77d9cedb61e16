//! Cursor pagination over a content fragment query
//!
//! A [`PaginationCursor`] holds two pieces of state: whether the server
//! reported more pages, and the continuation token of the last page seen.
//! Both change only when an error-free response arrives, so a failed call
//! can be retried from exactly the same position.

use super::argument::Arguments;
use super::error::{ConfigurationError, ExecutionError, FragmentError};
use super::executor::QueryExecutor;
use super::query::{PaginationMode, Query};
use super::response::GraphQlResponse;
use futures::stream::{self, Stream};
use std::sync::Arc;
use tracing::{debug, trace};

/// Observable state of a cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// The server may have more pages
    Ready,

    /// The last page reported `hasNextPage: false`
    Exhausted,
}

/// Stateful walker over the pages of a cursor-paginated query
///
/// Obtained from [`Query::open_cursor`]. Calling [`next`](Self::next) after
/// the cursor is exhausted still issues a request, which the server answers
/// with an empty page; check [`has_more`](Self::has_more) first to avoid the
/// round-trip.
///
/// # Example
///
/// ```rust,ignore
/// let mut cursor = query.open_cursor()?;
/// while cursor.has_more() {
///     let page = cursor.next(50).await?;
///     if page.has_errors() {
///         // cursor did not move; retry or give up
///         break;
///     }
///     for node in page.nodes("adventurePaginated") {
///         println!("{}", node["title"]);
///     }
/// }
/// ```
pub struct PaginationCursor {
    query: Query,
    executor: Arc<dyn QueryExecutor>,
    root_field: String,
    has_more: bool,
    end_cursor: Option<String>,
}

impl std::fmt::Debug for PaginationCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationCursor")
            .field("root_field", &self.root_field)
            .field("has_more", &self.has_more)
            .field("end_cursor", &self.end_cursor)
            .finish_non_exhaustive()
    }
}

impl PaginationCursor {
    pub(crate) fn new(query: Query, executor: Arc<dyn QueryExecutor>, root_field: String) -> Self {
        Self {
            query,
            executor,
            root_field,
            has_more: true,
            end_cursor: None,
        }
    }

    /// Whether the last successful page reported more pages
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Continuation token sent with the next request, if any
    pub fn end_cursor(&self) -> Option<&str> {
        self.end_cursor.as_deref()
    }

    pub fn state(&self) -> CursorState {
        if self.has_more {
            CursorState::Ready
        } else {
            CursorState::Exhausted
        }
    }

    /// Root field the pages are read from (`<model>Paginated`)
    pub fn root_field(&self) -> &str {
        &self.root_field
    }

    /// Fetch the next page of at most `page_size` fragments
    ///
    /// A response carrying GraphQL errors is returned as `Ok` and leaves the
    /// cursor where it was. `Err` is returned for an invalid page size, a
    /// transport failure, or an error-free response without usable
    /// `pageInfo`; none of these move the cursor either.
    pub async fn next(&mut self, page_size: u32) -> Result<GraphQlResponse, FragmentError> {
        if page_size == 0 {
            return Err(ConfigurationError::InvalidPageSize { page_size }.into());
        }

        let mut arguments = Arguments::new();
        arguments.insert("first".to_string(), page_size.into());
        if let Some(after) = &self.end_cursor {
            arguments.insert("after".to_string(), after.into());
        }

        let document = self.query.render(PaginationMode::Cursor, arguments)?;

        debug!(
            root_field = %self.root_field,
            page_size,
            resume = self.end_cursor.is_some(),
            "Requesting page"
        );
        trace!(%document, "Rendered page query");

        let response = self
            .executor
            .run_query(&document)
            .await
            .map_err(ExecutionError::Transport)?;

        if response.has_errors() {
            return Ok(response);
        }

        let page_info = response.page_info(&self.root_field)?;
        match (page_info.has_next_page, page_info.end_cursor) {
            (true, None) => {
                return Err(ExecutionError::malformed(
                    &self.root_field,
                    "hasNextPage is true but endCursor is null",
                )
                .into());
            }
            (has_next_page, Some(end_cursor)) => {
                self.has_more = has_next_page;
                self.end_cursor = Some(end_cursor);
            }
            (false, None) => {
                // Empty trailing page; keep resuming after the last token seen.
                self.has_more = false;
            }
        }

        debug!(
            root_field = %self.root_field,
            has_more = self.has_more,
            "Cursor advanced"
        );

        Ok(response)
    }

    /// Turn the cursor into a stream of pages of `page_size`
    ///
    /// The stream ends after the page reporting `hasNextPage: false`. A
    /// response carrying errors, or an `Err`, is yielded as the final item.
    pub fn into_stream(
        self,
        page_size: u32,
    ) -> impl Stream<Item = Result<GraphQlResponse, FragmentError>> {
        stream::unfold(Some(self), move |state| async move {
            let mut cursor = state?;
            if !cursor.has_more {
                return None;
            }

            match cursor.next(page_size).await {
                Ok(response) if response.has_errors() => Some((Ok(response), None)),
                Ok(response) => Some((Ok(response), Some(cursor))),
                Err(e) => Some((Err(e), None)),
            }
        })
    }
}
