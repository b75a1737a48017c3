//! Code emission tests

use super::*;
use crate::metadata::{Action, Param, Service};
use crate::overrides::OverrideView;
use crate::paging::{extract_paging_field, project_collection_schema};
use crate::schema::{Field, SchemaParser};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

fn parse(name: &str, example: &serde_json::Value) -> Field {
    let view = OverrideView::empty();
    SchemaParser::new(&view).parse(name, example).unwrap()
}

fn param(key: &str, required: bool) -> Param {
    Param {
        key: key.to_string(),
        required,
        ..Default::default()
    }
}

fn search_action() -> Action {
    Action {
        key: "search".to_string(),
        description: "Search for projects".to_string(),
        has_response_example: true,
        params: vec![param("p", false), param("ps", false), param("q", false)],
        ..Default::default()
    }
}

fn codegen_for(action: Action, example: &serde_json::Value) -> ActionCodegen {
    let response = parse(&action.response_type_name(), example);
    let paging = if action.has_paging() {
        extract_paging_field(&response)
    } else {
        None
    };
    let projected = if action.has_paging() {
        project_collection_schema(&response, &action.response_all_type_name())
    } else {
        None
    };
    ActionCodegen {
        action,
        response,
        projected,
        paging,
    }
}

#[test_case("search", "Search"; "plain word")]
#[test_case("bulk_update_key", "BulkUpdateKey"; "snake case")]
#[test_case("lastAnalysisDate", "LastAnalysisDate"; "camel case")]
#[test_case("quality-gate", "QualityGate"; "kebab case")]
#[test_case("ps", "Ps"; "short key")]
#[test_case("5xx", "N5xx"; "leading digit")]
fn test_to_pascal_case(input: &str, expected: &str) {
    assert_eq!(to_pascal_case(input), expected);
}

#[test_case("Search", "search"; "plain word")]
#[test_case("BulkUpdateKey", "bulk_update_key"; "multi word")]
#[test_case("LastAnalysisDate", "last_analysis_date"; "date accessor")]
#[test_case("ID", "id"; "acronym")]
#[test_case("BaseComponentID", "base_component_id"; "trailing acronym")]
#[test_case("P", "p"; "single letter")]
fn test_to_snake_case(input: &str, expected: &str) {
    assert_eq!(to_snake_case(input), expected);
}

#[test]
fn test_keyword_escaping() {
    assert_eq!(escape_ident("type"), "r#type");
    assert_eq!(escape_ident("loop"), "r#loop");
    assert_eq!(escape_ident("self"), "self_");
    assert_eq!(escape_ident("severity"), "severity");
    assert_eq!(field_ident("Type"), "r#type");
}

#[test]
fn test_doc_text_strips_html() {
    let text = doc_text("Search for projects.<br>Requires permission:<ul><li>Browse</li></ul>");
    assert_eq!(text, "Search for projects.\nRequires permission:\n* Browse");
}

#[test]
fn test_request_struct_skips_paging_params() {
    let action = search_action();
    let code = render_request_struct(&action, &[]);

    assert!(code.contains("pub struct SearchRequest {"));
    assert!(code.contains("pub q: Option<String>,"));
    // Paging parameters travel separately
    assert!(!code.contains("pub p:"));
    assert!(!code.contains("pub ps:"));
}

#[test]
fn test_request_struct_required_and_skipped_fields() {
    let action = Action {
        key: "create".to_string(),
        post: true,
        params: vec![param("project", true), param("organization", false)],
        ..Default::default()
    };

    let code = render_request_struct(&action, &["organization".to_string()]);
    assert!(code.contains("pub project: String,"));
    assert!(!code.contains("organization"));
}

#[test]
fn test_keyword_param_uses_raw_ident() {
    let action = Action {
        key: "search".to_string(),
        params: vec![param("type", false)],
        ..Default::default()
    };

    let code = render_request_struct(&action, &[]);
    assert!(code.contains("#[serde(rename = \"type\", skip_serializing_if = \"Option::is_none\")]"));
    assert!(code.contains("pub r#type: Option<String>,"));
}

#[test]
fn test_module_renders_nested_structs() {
    let service = Service {
        path: "api/projects".to_string(),
        actions: vec![search_action()],
        ..Default::default()
    };
    let codegen = codegen_for(search_action(), &json!({
        "paging": {"pageIndex": 1, "pageSize": 50, "total": 3},
        "components": [{"key": "a", "meta": {"visibility": "public"}}]
    }));

    let code = render_module(&service, &[codegen], &[]);

    assert!(code.contains("const PATH: &str = \"api/projects\";"));
    assert!(code.contains("pub struct SearchResponse {"));
    // Collection of maps gets a named element struct
    assert!(code.contains("pub struct SearchResponseComponents {"));
    assert!(code.contains("pub components: Vec<SearchResponseComponents>,"));
    // Nested map below the element
    assert!(code.contains("pub struct SearchResponseComponentsMeta {"));
    // Nested paging renders as the shared type
    assert!(code.contains("pub paging: Paging,"));
    // Service struct and method
    assert!(code.contains("pub struct ProjectsService<'c> {"));
    assert!(code.contains(
        "pub async fn search(&self, r: &SearchRequest, p: &PagingParams) -> Result<SearchResponse, ClientError> {"
    ));
    assert!(code.contains("let u = format!(\"{PATH}/search\");"));
}

#[test]
fn test_nested_paging_accessor() {
    let codegen = codegen_for(search_action(), &json!({
        "paging": {"pageIndex": 1, "pageSize": 50, "total": 3},
        "components": [{"key": "a"}]
    }));
    let service = Service {
        path: "api/projects".to_string(),
        ..Default::default()
    };
    let code = render_module(&service, &[codegen], &[]);

    assert!(code.contains("pub fn get_paging(&self) -> Paging {"));
    assert!(code.contains("self.paging.clone()"));
}

#[test]
fn test_flattened_paging_is_synthesized() {
    let codegen = codegen_for(search_action(), &json!({
        "total": 3,
        "p": 1,
        "ps": 50,
        "components": [{"key": "a"}]
    }));
    let service = Service {
        path: "api/projects".to_string(),
        ..Default::default()
    };
    let code = render_module(&service, &[codegen], &[]);

    assert!(code.contains("page_index: self.p as u32,"));
    assert!(code.contains("page_size: self.ps as u32,"));
    assert!(code.contains("total: self.total as u64,"));
    assert!(code.contains("..Paging::default()"));
}

#[test]
fn test_all_struct_and_method() {
    let codegen = codegen_for(search_action(), &json!({
        "paging": {"pageIndex": 1, "pageSize": 50, "total": 3},
        "components": [{"key": "a"}]
    }));
    let service = Service {
        path: "api/projects".to_string(),
        ..Default::default()
    };
    let code = render_module(&service, &[codegen], &[]);

    // Accumulator struct shares the element type with the primary response
    assert!(code.contains("pub struct SearchResponseAll {"));
    assert!(code.contains("#[serde(rename = \"components\", default)]"));
    assert!(code
        .contains("pub async fn search_all(&self, r: &SearchRequest) -> Result<SearchResponseAll, ClientError> {"));
    assert!(code.contains("response.components.extend(res.components.clone());"));
    assert!(code.contains("if res.get_paging().end() {"));
}

#[test]
fn test_opaque_response_renders_alias() {
    let action = Action {
        key: "health".to_string(),
        has_response_example: true,
        ..Default::default()
    };
    let codegen = codegen_for(action, &json!({"format": "txt", "example": "GREEN"}));
    let service = Service {
        path: "api/system".to_string(),
        ..Default::default()
    };
    let code = render_module(&service, &[codegen], &[]);

    assert!(code.contains("pub type HealthResponse = String;"));
    assert!(code.contains("self.client.get_text(&u, r, None).await"));
}

#[test]
fn test_action_without_example_renders_raw_response() {
    let action = Action {
        key: "delete".to_string(),
        post: true,
        ..Default::default()
    };
    let codegen = ActionCodegen {
        action,
        response: Field::Empty,
        projected: None,
        paging: None,
    };
    let service = Service {
        path: "api/projects".to_string(),
        ..Default::default()
    };
    let code = render_module(&service, &[codegen], &[]);

    assert!(code.contains(
        "pub async fn delete(&self, r: &DeleteRequest) -> Result<reqwest::Response, ClientError> {"
    ));
    assert!(code.contains("self.client.post_raw(&u, r).await"));
    assert!(!code.contains("DeleteResponse"));
}

#[test]
fn test_module_output_is_deterministic() {
    let service = Service {
        path: "api/projects".to_string(),
        actions: vec![search_action()],
        ..Default::default()
    };
    let example = json!({
        "total": 3, "p": 1, "ps": 50,
        "components": [{"key": "a", "name": "A"}, {"key": "b"}]
    });

    let a = render_module(&service, &[codegen_for(search_action(), &example)], &[]);
    let b = render_module(&service, &[codegen_for(search_action(), &example)], &[]);
    assert_eq!(a, b);
}

#[test]
fn test_scaffold_client_lists_service_accessors() {
    let services = vec![
        Service {
            path: "api/projects".to_string(),
            ..Default::default()
        },
        Service {
            path: "api/quality_gates".to_string(),
            ..Default::default()
        },
    ];

    let code = render_client("sonar_client", &services).unwrap();
    assert!(code.contains("pub struct Client {"));
    assert!(code.contains("pub fn projects(&self) -> crate::projects::ProjectsService<'_> {"));
    assert!(code.contains(
        "pub fn quality_gates(&self) -> crate::quality_gates::QualityGatesService<'_> {"
    ));
    // No template variables leak through
    assert!(!code.contains("{{"));
}

#[test]
fn test_scaffold_mod_is_sorted() {
    let code = render_mod(
        "sonar_client",
        &["projects".to_string(), "components".to_string()],
    );
    let components = code.find("pub mod components;").unwrap();
    let projects = code.find("pub mod projects;").unwrap();
    assert!(components < projects);
    assert!(code.contains("pub use client::{Client, ClientError};"));
}

#[test]
fn test_module_name_escapes_keywords() {
    assert_eq!(module_name("components"), "components");
    assert_eq!(module_name("type"), "r#type");
}
