//! Structural tests for generated GraphQL documents
//!
//! Documents are parsed with `graphql-parser` so assertions target the root
//! field, its arguments and the selection shape rather than whitespace.

use fragment_graphql::prelude::*;
use graphql_parser::query::{
    Definition, Document, Field, OperationDefinition, Selection, SelectionSet, Value as GqlValue,
    parse_query,
};

// =============================================================================
// Helpers
// =============================================================================

fn parse(document: &str) -> Document<'_, String> {
    parse_query::<String>(document).expect("generated document should be valid GraphQL")
}

fn root<'d, 'a>(doc: &'d Document<'a, String>) -> &'d Field<'a, String> {
    let selection_set = match &doc.definitions[0] {
        Definition::Operation(OperationDefinition::Query(query)) => &query.selection_set,
        Definition::Operation(OperationDefinition::SelectionSet(set)) => set,
        other => panic!("unexpected definition: {:?}", other),
    };
    assert_eq!(selection_set.items.len(), 1, "exactly one root field");
    match &selection_set.items[0] {
        Selection::Field(field) => field,
        other => panic!("unexpected selection: {:?}", other),
    }
}

fn child<'d, 'a>(set: &'d SelectionSet<'a, String>, name: &str) -> &'d Field<'a, String> {
    set.items
        .iter()
        .find_map(|selection| match selection {
            Selection::Field(field) if field.name == name => Some(field),
            _ => None,
        })
        .unwrap_or_else(|| panic!("missing selection '{}'", name))
}

fn names(set: &SelectionSet<'_, String>) -> Vec<String> {
    set.items
        .iter()
        .filter_map(|selection| match selection {
            Selection::Field(field) => Some(field.name.clone()),
            _ => None,
        })
        .collect()
}

fn argument<'d, 'a>(field: &'d Field<'a, String>, name: &str) -> Option<&'d GqlValue<'a, String>> {
    field
        .arguments
        .iter()
        .find(|(arg, _)| arg == name)
        .map(|(_, value)| value)
}

fn argument_names(field: &Field<'_, String>) -> Vec<String> {
    field.arguments.iter().map(|(name, _)| name.clone()).collect()
}

fn article_builder() -> QueryBuilder {
    let mut builder = Query::builder();
    builder
        .content_fragment_model_name("article")
        .unwrap()
        .fields(["title", "author"])
        .unwrap();
    builder
}

// =============================================================================
// Root field and selection shape
// =============================================================================

#[test]
fn test_list_query_root_and_items_selection() {
    for model in ["article", "adventure", "x"] {
        let mut builder = Query::builder();
        builder
            .content_fragment_model_name(model)
            .unwrap()
            .fields(["title", "slug"])
            .unwrap();
        let document = builder.generate().unwrap();

        let doc = parse(&document);
        let root = root(&doc);
        assert_eq!(root.name, format!("{}List", model));
        assert_eq!(names(&root.selection_set), ["items"]);

        let items = child(&root.selection_set, "items");
        assert_eq!(names(&items.selection_set), ["title", "slug"]);
    }
}

#[test]
fn test_paginated_query_root_and_edges_selection() {
    let mut builder = article_builder();
    builder.paginated().unwrap();
    let document = builder.generate().unwrap();

    let doc = parse(&document);
    let root = root(&doc);
    assert_eq!(root.name, "articlePaginated");
    assert_eq!(names(&root.selection_set), ["edges", "pageInfo"]);

    let node = child(&child(&root.selection_set, "edges").selection_set, "node");
    assert_eq!(names(&node.selection_set), ["title", "author"]);

    let page_info = child(&root.selection_set, "pageInfo");
    assert_eq!(names(&page_info.selection_set), ["hasNextPage", "endCursor"]);
}

#[test]
fn test_explicit_list_mode() {
    let mut builder = article_builder();
    builder.paginated().unwrap().paginated_with(PaginationMode::List).unwrap();

    let query = builder.build().unwrap();
    assert_eq!(query.root_field().unwrap(), "articleList");
}

#[test]
fn test_nested_field_paths_are_emitted_verbatim() {
    let mut builder = Query::builder();
    builder
        .content_fragment_model_name("adventure")
        .unwrap()
        .field("title")
        .unwrap()
        .field("primaryImage { ... on ImageRef { _path } }")
        .unwrap();
    let document = builder.generate().unwrap();

    assert!(document.contains("primaryImage { ... on ImageRef { _path } }"));
    let doc = parse(&document);
    let items = child(&root(&doc).selection_set, "items");
    assert_eq!(names(&items.selection_set), ["title", "primaryImage"]);
}

#[test]
fn test_duplicate_fields_are_kept() {
    let mut builder = article_builder();
    builder.field("title").unwrap();

    let query = builder.build().unwrap();
    assert_eq!(query.fields(), ["title", "author", "title"]);
    assert_eq!(query.generate().unwrap().matches("title").count(), 2);
}

// =============================================================================
// Arguments
// =============================================================================

#[test]
fn test_no_arguments_renders_no_parentheses() {
    let document = article_builder().generate().unwrap();
    assert!(!document.contains('('));
    assert!(root(&parse(&document)).arguments.is_empty());
}

#[test]
fn test_sort_clauses_serialized_in_order() {
    let mut builder = article_builder();
    builder
        .sort_by("title", SortOrder::Asc)
        .unwrap()
        .sort_by_clauses(["publishDate desc", "rating"])
        .unwrap();
    let document = builder.generate().unwrap();

    let doc = parse(&document);
    assert_eq!(
        argument(root(&doc), "sort"),
        Some(&GqlValue::String(
            "title ASC, publishDate DESC, rating ASC".to_string()
        ))
    );
}

#[test]
fn test_caller_sort_overrides_configured_sort() {
    let mut builder = article_builder();
    builder.sort_by_clauses(["title"]).unwrap();
    let query = builder.build().unwrap();

    let document = query.generate_with([("sort", "custom")]).unwrap();
    let doc = parse(&document);
    let root = root(&doc);

    assert_eq!(argument_names(root), ["sort"]);
    assert_eq!(
        argument(root, "sort"),
        Some(&GqlValue::String("custom".to_string()))
    );
}

#[test]
fn test_numeric_arguments_unquoted_and_strings_quoted() {
    let mut builder = article_builder();
    builder.paginated().unwrap();
    let query = builder.build().unwrap();

    let document = query
        .generate_with([
            ("first", ArgumentValue::from(10)),
            ("after", ArgumentValue::from("xyz")),
        ])
        .unwrap();

    assert!(document.contains("first: 10"));
    assert!(document.contains(r#"after: "xyz""#));

    let doc = parse(&document);
    let root = root(&doc);
    assert_eq!(argument_names(root), ["first", "after"]);
    assert!(matches!(argument(root, "first"), Some(GqlValue::Int(n)) if n.as_i64() == Some(10)));
    assert_eq!(
        argument(root, "after"),
        Some(&GqlValue::String("xyz".to_string()))
    );
}

#[test]
fn test_sort_precedes_caller_arguments() {
    let mut builder = article_builder();
    builder.sort_by("title", SortOrder::Desc).unwrap();
    let query = builder.build().unwrap();

    let mut arguments = Arguments::new();
    arguments.insert("limit".to_string(), 5.into());
    arguments.insert("offset".to_string(), 10.into());

    let doc_text = query.generate_with(arguments).unwrap();
    let doc = parse(&doc_text);
    assert_eq!(argument_names(root(&doc)), ["sort", "limit", "offset"]);
}

#[test]
fn test_query_is_reusable_for_generation() {
    let query = article_builder().build().unwrap();
    assert_eq!(query.generate().unwrap(), query.generate().unwrap());
}

// =============================================================================
// Configuration errors
// =============================================================================

#[test]
fn test_generate_without_model_name_fails() {
    let mut builder = Query::builder();
    builder.field("title").unwrap();

    let err = builder.generate().unwrap_err();
    assert!(matches!(
        err,
        FragmentError::Config(ConfigurationError::MissingModelName)
    ));
}

#[test]
fn test_builder_is_single_use() {
    let mut builder = article_builder();
    builder.build().unwrap();

    for _ in 0..2 {
        let err = builder.build().unwrap_err();
        assert_eq!(err.error_code(), "BUILDER_SEALED");
    }
    assert!(builder.field("body").is_err());
    assert!(builder.sort_by_clauses(["title"]).is_err());
    assert!(builder.paginated().is_err());
}

#[test]
fn test_malformed_sort_fails_at_parse_time() {
    let mut builder = article_builder();

    let err = builder.sort_by_clauses([""]).unwrap_err();
    assert!(matches!(err, FragmentError::Sort(SortParseError::Empty)));

    let err = builder.sort_by_clauses(["title UPWARDS"]).unwrap_err();
    assert_eq!(err.error_code(), "UNKNOWN_SORT_ORDER");

    // Failed calls leave the builder usable and unchanged.
    let query = builder.build().unwrap();
    assert!(query.sort_clauses().is_empty());
}
