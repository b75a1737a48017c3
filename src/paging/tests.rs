//! Pagination projector tests

use super::*;
use crate::overrides::OverrideView;
use crate::schema::{Field, ScalarField, ScalarKind, SchemaParser};
use serde_json::json;

fn parse(example: &serde_json::Value) -> Field {
    let view = OverrideView::empty();
    SchemaParser::new(&view)
        .parse("SearchResponse", example)
        .unwrap()
}

#[test]
fn test_nested_paging_object_is_the_source() {
    let tree = parse(&json!({
        "paging": {"pageIndex": 1, "pageSize": 50, "total": 3},
        "components": [{"key": "a"}]
    }));

    assert_eq!(
        extract_paging_field(&tree),
        Some(PagingSource::Nested {
            accessor: "Paging".to_string()
        })
    );
}

#[test]
fn test_flattened_paging_is_synthesized() {
    let tree = parse(&json!({
        "total": 3,
        "p": 1,
        "ps": 50,
        "components": [{"key": "a"}]
    }));

    assert_eq!(
        extract_paging_field(&tree),
        Some(PagingSource::Flattened {
            page: Some("P".to_string()),
            page_size: Some("Ps".to_string()),
            total: Some("Total".to_string()),
        })
    );
}

#[test]
fn test_partially_flattened_paging() {
    let tree = parse(&json!({"total": 12, "rules": []}));

    assert_eq!(
        extract_paging_field(&tree),
        Some(PagingSource::Flattened {
            page: None,
            page_size: None,
            total: Some("Total".to_string()),
        })
    );
}

#[test]
fn test_projection_strips_paging_artifacts() {
    // The canonical projection example: nested paging plus flattened
    // page-index/page-size/total all disappear; the collection stays.
    let tree = parse(&json!({
        "total": 3,
        "p": 1,
        "ps": 50,
        "paging": {"pageIndex": 1, "pageSize": 50, "total": 3},
        "components": [{"key": "a"}, {"key": "b"}]
    }));

    let projected = project_collection_schema(&tree, "SearchResponseAll").unwrap();
    assert_eq!(projected.name, "SearchResponseAll");
    assert_eq!(projected.accessors(), vec!["Components"]);

    let Field::Collection(collection) = &projected.get("Components").unwrap().field else {
        panic!("expected collection member");
    };
    let element = collection.element.as_map().unwrap();
    assert_eq!(element.accessors(), vec!["Key"]);

    // The source tree is untouched: paging extraction still works after
    // projection.
    assert_eq!(
        extract_paging_field(&tree),
        Some(PagingSource::Nested {
            accessor: "Paging".to_string()
        })
    );
}

#[test]
fn test_projection_keeps_unrelated_scalars() {
    let tree = parse(&json!({
        "p": 1,
        "ps": 50,
        "total": 3,
        "baseComponent": {"key": "root"},
        "components": [{"key": "a"}]
    }));

    let projected = project_collection_schema(&tree, "TreeResponseAll").unwrap();
    assert_eq!(projected.accessors(), vec!["BaseComponent", "Components"]);
}

#[test]
fn test_non_map_roots_are_unsupported() {
    let scalar = Field::Scalar(ScalarField::new("PingResponse", ScalarKind::Text));
    assert_eq!(extract_paging_field(&scalar), None);
    assert!(project_collection_schema(&scalar, "PingResponseAll").is_none());

    let collection = parse(&json!([{"key": "a"}]));
    assert_eq!(extract_paging_field(&collection), None);
    assert!(project_collection_schema(&collection, "ListResponseAll").is_none());
}
