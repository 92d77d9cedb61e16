//! In-memory content fragment backend for testing and development
//!
//! [`InMemoryContentStore`] answers the documents produced by
//! [`Query`](crate::core::Query) the way a headless content-fragment endpoint
//! would: `<model>List` roots return `items`, `<model>Paginated` roots return
//! `edges`/`pageInfo` and honor `first`/`after`.

use crate::core::{GraphQlError, GraphQlResponse, QueryExecutor, SortClause, SortOrder};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use graphql_parser::query::{
    Definition, Field, OperationDefinition, Selection, SelectionSet, Value as GqlValue,
};
use serde_json::{Map, Value, json};
use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};
use tracing::debug;

/// In-memory query executor over content fragments grouped by model
///
/// Clones share the same fragments and request log.
#[derive(Clone, Default)]
pub struct InMemoryContentStore {
    fragments: Arc<RwLock<HashMap<String, Vec<Value>>>>,
    executed: Arc<RwLock<Vec<String>>>,
    failures: Arc<RwLock<VecDeque<String>>>,
}

impl InMemoryContentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one fragment of the given model
    pub fn insert(&self, model: &str, fragment: Value) -> Result<()> {
        self.insert_many(model, [fragment])
    }

    /// Add several fragments of the given model, keeping their order
    pub fn insert_many(&self, model: &str, fragments: impl IntoIterator<Item = Value>) -> Result<()> {
        let mut store = self
            .fragments
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        store
            .entry(model.to_string())
            .or_default()
            .extend(fragments);

        Ok(())
    }

    /// Number of fragments stored for a model
    pub fn count(&self, model: &str) -> Result<usize> {
        let store = self
            .fragments
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(store.get(model).map_or(0, Vec::len))
    }

    /// Answer the next request with a GraphQL error instead of data
    ///
    /// Calls queue up; each pending failure is consumed by one request.
    pub fn fail_next(&self, message: impl Into<String>) -> Result<()> {
        self.failures
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?
            .push_back(message.into());
        Ok(())
    }

    /// Every document executed so far, oldest first
    pub fn executed_queries(&self) -> Result<Vec<String>> {
        let executed = self
            .executed
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(executed.clone())
    }

    fn resolve(&self, document: &str) -> Result<GraphQlResponse> {
        let doc = match graphql_parser::parse_query::<String>(document) {
            Ok(doc) => doc,
            Err(e) => return Ok(error_response(format!("Syntax Error: {}", e))),
        };

        let Some(root) = root_field(&doc.definitions) else {
            return Ok(error_response("Document has no query operation"));
        };

        let (model, paginated) = if let Some(model) = root.name.strip_suffix("Paginated") {
            (model, true)
        } else if let Some(model) = root.name.strip_suffix("List") {
            (model, false)
        } else {
            return Ok(unknown_field(&root.name));
        };

        let mut fragments = {
            let store = self
                .fragments
                .read()
                .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

            match store.get(model) {
                Some(fragments) => fragments.clone(),
                None => return Ok(unknown_field(&root.name)),
            }
        };

        if let Some(sort) = get_string_arg(root, "sort") {
            let clauses = match parse_sort(&sort) {
                Ok(clauses) => clauses,
                Err(message) => return Ok(error_response(message)),
            };
            fragments.sort_by(|a, b| compare_fragments(a, b, &clauses));
        }

        let payload = if paginated {
            let selected = nested_field_names(&root.selection_set, &["edges", "node"]);
            match paginate(root, &fragments, &selected) {
                Ok(payload) => payload,
                Err(message) => return Ok(error_response(message)),
            }
        } else {
            let selected = nested_field_names(&root.selection_set, &["items"]);
            let offset = get_int_arg(root, "offset").unwrap_or(0).max(0) as usize;
            let limit = get_int_arg(root, "limit").map(|l| l.max(0) as usize);
            let items: Vec<Value> = fragments
                .iter()
                .skip(offset)
                .take(limit.unwrap_or(usize::MAX))
                .map(|fragment| project(fragment, &selected))
                .collect();

            debug!(root_field = %root.name, served = items.len(), "Served list");
            json!({ "items": items })
        };

        let mut data = Map::new();
        data.insert(root.name.clone(), payload);
        Ok(GraphQlResponse::from_data(Value::Object(data)))
    }
}

#[async_trait]
impl QueryExecutor for InMemoryContentStore {
    async fn run_query(&self, document: &str) -> Result<GraphQlResponse> {
        self.executed
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?
            .push(document.to_string());

        let failure = self
            .failures
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?
            .pop_front();
        if let Some(message) = failure {
            return Ok(error_response(message));
        }

        self.resolve(document)
    }
}

fn paginate(
    root: &Field<'_, String>,
    fragments: &[Value],
    selected: &[String],
) -> std::result::Result<Value, String> {
    let start = match get_string_arg(root, "after") {
        Some(after) => after
            .parse::<usize>()
            .ok()
            .and_then(|index| index.checked_add(1))
            .ok_or_else(|| format!("Invalid cursor '{}'", after))?,
        None => 0,
    };
    let first = match get_int_arg(root, "first") {
        Some(first) if first < 0 => return Err("Argument 'first' must not be negative".to_string()),
        Some(first) => first as usize,
        None => fragments.len(),
    };

    let start = start.min(fragments.len());
    let end = start.saturating_add(first).min(fragments.len());

    let edges: Vec<Value> = (start..end)
        .map(|index| {
            json!({
                "cursor": index.to_string(),
                "node": project(&fragments[index], selected),
            })
        })
        .collect();

    let end_cursor = if end > start {
        Value::String((end - 1).to_string())
    } else {
        Value::Null
    };

    debug!(root_field = %root.name, start, served = edges.len(), "Served page");

    Ok(json!({
        "edges": edges,
        "pageInfo": {
            "hasNextPage": end < fragments.len(),
            "endCursor": end_cursor,
        }
    }))
}

/// First field selected by the first query operation
fn root_field<'d, 'a>(definitions: &'d [Definition<'a, String>]) -> Option<&'d Field<'a, String>> {
    definitions.iter().find_map(|definition| {
        let selection_set = match definition {
            Definition::Operation(OperationDefinition::Query(query)) => &query.selection_set,
            Definition::Operation(OperationDefinition::SelectionSet(set)) => set,
            _ => return None,
        };
        first_field(selection_set)
    })
}

fn first_field<'d, 'a>(selection_set: &'d SelectionSet<'a, String>) -> Option<&'d Field<'a, String>> {
    selection_set.items.iter().find_map(|selection| match selection {
        Selection::Field(field) => Some(field),
        _ => None,
    })
}

/// Names of the fields selected under a path of nested fields
fn nested_field_names(selection_set: &SelectionSet<'_, String>, path: &[&str]) -> Vec<String> {
    let mut current = selection_set;
    for name in path {
        let next = current.items.iter().find_map(|selection| match selection {
            Selection::Field(field) if field.name == *name => Some(&field.selection_set),
            _ => None,
        });
        match next {
            Some(set) => current = set,
            None => return Vec::new(),
        }
    }

    current
        .items
        .iter()
        .filter_map(|selection| match selection {
            Selection::Field(field) => Some(field.name.clone()),
            _ => None,
        })
        .collect()
}

fn project(fragment: &Value, selected: &[String]) -> Value {
    let mut projected = Map::new();
    for name in selected {
        if let Some(value) = fragment.get(name) {
            projected.insert(name.clone(), value.clone());
        }
    }
    Value::Object(projected)
}

/// Get string argument from field
fn get_string_arg(field: &Field<'_, String>, arg_name: &str) -> Option<String> {
    field
        .arguments
        .iter()
        .find(|(name, _)| name.as_str() == arg_name)
        .and_then(|(_, value)| match value {
            GqlValue::String(s) => Some(s.clone()),
            _ => None,
        })
}

/// Get int argument from field
fn get_int_arg(field: &Field<'_, String>, arg_name: &str) -> Option<i64> {
    field
        .arguments
        .iter()
        .find(|(name, _)| name.as_str() == arg_name)
        .and_then(|(_, value)| match value {
            GqlValue::Int(i) => i.as_i64(),
            _ => None,
        })
}

fn parse_sort(sort: &str) -> std::result::Result<Vec<SortClause>, String> {
    sort.split(',')
        .map(|clause| {
            clause
                .parse::<SortClause>()
                .map_err(|e| format!("Invalid sort argument: {}", e))
        })
        .collect()
}

fn compare_fragments(a: &Value, b: &Value, clauses: &[SortClause]) -> Ordering {
    for clause in clauses {
        let ordering = compare_values(a.get(clause.field()), b.get(clause.field()));
        let ordering = match clause.order() {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Missing values sort after present ones
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

fn error_response(message: impl Into<String>) -> GraphQlResponse {
    GraphQlResponse::from_errors(vec![GraphQlError::new(message)])
}

fn unknown_field(name: &str) -> GraphQlResponse {
    error_response(format!(
        "Validation error: Field '{}' in type 'Query' is undefined",
        name
    ))
}
