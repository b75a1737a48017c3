//! End-to-end generation against a mock introspection server

use introgen::config::GeneratorConfig;
use introgen::engine::GeneratorEngine;
use introgen::fetch::{HttpClient, HttpClientConfig, IntrospectionClient};
use introgen::overrides::OverrideRegistry;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_server() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/webservices/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "webServices": [
                {
                    "path": "api/projects",
                    "description": "Manage projects",
                    "actions": [
                        {
                            "key": "search",
                            "description": "Search for projects",
                            "hasResponseExample": true,
                            "since": "6.3",
                            "params": [
                                {"key": "p"},
                                {"key": "ps"},
                                {"key": "q", "description": "Limit search"}
                            ]
                        },
                        {
                            "key": "delete",
                            "description": "Delete a project",
                            "post": true,
                            "params": [{"key": "project", "required": true}]
                        }
                    ]
                },
                {
                    "path": "api/system",
                    "actions": [
                        {"key": "health", "hasResponseExample": true, "params": []}
                    ]
                }
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/webservices/response_example"))
        .and(query_param("controller", "api/projects"))
        .and(query_param("action", "search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "format": "json",
            "example": serde_json::to_string(&json!({
                "paging": {"pageIndex": 1, "pageSize": 100, "total": 2},
                "components": [
                    {"key": "a", "name": "A", "qualifier": "TRK"},
                    {"key": "b", "qualifier": "TRK"}
                ]
            }))
            .unwrap()
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/webservices/response_example"))
        .and(query_param("controller", "api/system"))
        .and(query_param("action", "health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "format": "txt",
            "example": "GREEN"
        })))
        .mount(&server)
        .await;

    server
}

fn config_for(server: &MockServer, dir: &tempfile::TempDir) -> GeneratorConfig {
    GeneratorConfig {
        host: server.uri(),
        output_dir: dir.path().to_path_buf(),
        package: "sonar_client".to_string(),
        requests_per_second: 100,
        ..Default::default()
    }
}

fn fetcher_for(config: &GeneratorConfig) -> IntrospectionClient {
    let http = HttpClientConfig::builder()
        .base_url(&config.host)
        .no_rate_limit()
        .build();
    IntrospectionClient::new(HttpClient::with_config(http), false)
}

#[tokio::test]
async fn generates_full_module_tree() {
    let server = mock_server().await;
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&server, &dir);

    let engine = GeneratorEngine::new(fetcher_for(&config), OverrideRegistry::new(), config);
    let stats = engine.run().await.unwrap();

    assert_eq!(stats.services, 2);
    assert_eq!(stats.actions, 3);
    assert_eq!(stats.actions_failed, 0);
    // mod.rs + client.rs + paging.rs + projects.rs + system.rs
    assert_eq!(stats.files_written, 5);

    let root = std::fs::read_to_string(dir.path().join("mod.rs")).unwrap();
    assert!(root.contains("pub mod projects;"));
    assert!(root.contains("pub mod system;"));

    let projects = std::fs::read_to_string(dir.path().join("projects.rs")).unwrap();
    // Request structs: paging params stay out, plain params stay in
    assert!(projects.contains("pub struct SearchRequest {"));
    assert!(projects.contains("pub q: Option<String>,"));
    assert!(!projects.contains("pub ps:"));
    // Response structs with the unified element map; "name" was missing from
    // one element so it is optional
    assert!(projects.contains("pub struct SearchResponseComponents {"));
    assert!(projects.contains("pub name: Option<String>,"));
    assert!(projects.contains("pub qualifier: String,"));
    // Paging: nested paging object becomes the shared type, plus the
    // auto-paginating method over the projected schema
    assert!(projects.contains("pub paging: Paging,"));
    assert!(projects.contains("pub struct SearchResponseAll {"));
    assert!(projects.contains("pub async fn search_all"));
    // The POST action without an example returns the raw response
    assert!(projects.contains("pub async fn delete"));
    assert!(projects.contains("post_raw"));

    let system = std::fs::read_to_string(dir.path().join("system.rs")).unwrap();
    assert!(system.contains("pub type HealthResponse = String;"));

    let client = std::fs::read_to_string(dir.path().join("client.rs")).unwrap();
    assert!(client.contains("pub fn projects(&self)"));
    assert!(client.contains("pub fn system(&self)"));
    assert!(client.contains("sonar_client"));
}

#[tokio::test]
async fn override_rules_shape_the_output() {
    let server = mock_server().await;
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&server, &dir);

    let overrides = OverrideRegistry::from_yaml_str(
        r#"
rules:
  - endpoint: projects
    action: search
    path: components.qualifier
    type: skip
  - endpoint: projects
    action: search
    path: components.name
    type: rename
    name: DisplayName
"#,
    )
    .unwrap();

    let engine = GeneratorEngine::new(fetcher_for(&config), overrides, config);
    engine.run().await.unwrap();

    let projects = std::fs::read_to_string(dir.path().join("projects.rs")).unwrap();
    assert!(!projects.contains("qualifier"));
    assert!(projects.contains("pub display_name: Option<String>,"));
    assert!(projects.contains("#[serde(rename = \"name\")]"));
}

#[tokio::test]
async fn repeated_runs_produce_identical_files() {
    let server = mock_server().await;

    let mut outputs = Vec::new();
    for _ in 0..2 {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&server, &dir);
        let engine =
            GeneratorEngine::new(fetcher_for(&config), OverrideRegistry::new(), config);
        engine.run().await.unwrap();

        let mut run = String::new();
        for file in ["mod.rs", "client.rs", "paging.rs", "projects.rs", "system.rs"] {
            run.push_str(&std::fs::read_to_string(dir.path().join(file)).unwrap());
        }
        outputs.push(run);
    }

    assert_eq!(outputs[0], outputs[1]);
}
