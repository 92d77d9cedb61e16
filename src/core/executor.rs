//! Execution collaborator
//!
//! The crate never talks to the network itself. Whatever owns the HTTP
//! client, endpoint and credentials implements [`QueryExecutor`] and hands
//! it to the builder.

use super::response::GraphQlResponse;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Runs a rendered GraphQL document against a content-fragment endpoint
///
/// Server-side GraphQL errors must be returned as `Ok` with the errors
/// recorded in the [`GraphQlResponse`]. `Err` is reserved for failures that
/// produced no response at all (connection refused, undecodable body, ...).
///
/// # Example
///
/// ```rust,ignore
/// struct HttpExecutor { client: reqwest::Client, endpoint: String }
///
/// #[async_trait]
/// impl QueryExecutor for HttpExecutor {
///     async fn run_query(&self, document: &str) -> Result<GraphQlResponse> {
///         let body = serde_json::json!({ "query": document });
///         let response = self.client.post(&self.endpoint).json(&body).send().await?;
///         Ok(response.json().await?)
///     }
/// }
/// ```
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Execute the document and return the decoded response
    async fn run_query(&self, document: &str) -> Result<GraphQlResponse>;
}

#[async_trait]
impl<T: QueryExecutor + ?Sized> QueryExecutor for Arc<T> {
    async fn run_query(&self, document: &str) -> Result<GraphQlResponse> {
        (**self).run_query(document).await
    }
}
