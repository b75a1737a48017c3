//! Introspection metadata model
//!
//! Typed representation of the self-describing metadata document served by
//! the target API (`/api/webservices/list`-style): a list of services, each
//! with actions and their declared parameters.

use serde::{Deserialize, Serialize};

use crate::codegen::to_pascal_case;

/// Paging parameter keys declared by paging-capable actions
pub const PAGE_INDEX_PARAM: &str = "p";
/// Page size parameter key
pub const PAGE_SIZE_PARAM: &str = "ps";

/// The full introspection document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Api {
    /// All services exposed by the remote API
    #[serde(rename = "webServices", default)]
    pub web_services: Vec<Service>,
}

/// One service (endpoint group) in the metadata document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Service {
    /// Service path, e.g. `api/components`
    pub path: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Actions exposed by this service
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Service {
    /// The endpoint key: last segment of the service path
    pub fn endpoint(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// PascalCase getter name used for the generated service accessor
    pub fn getter(&self) -> String {
        to_pascal_case(self.endpoint())
    }
}

/// One action (operation) of a service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    /// Action key, e.g. `search`
    pub key: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Whether this action is marked internal by the remote API
    #[serde(default)]
    pub internal: bool,

    /// Whether this action is invoked via POST
    #[serde(default)]
    pub post: bool,

    /// Whether a response example is available for this action
    #[serde(default)]
    pub has_response_example: bool,

    /// Declared request parameters
    #[serde(default)]
    pub params: Vec<Param>,

    /// Version changelog entries
    #[serde(default, rename = "changelog")]
    pub change_log: Vec<ChangeLogEntry>,

    /// First version this action appeared in
    #[serde(default)]
    pub since: String,

    /// Version this action was deprecated in, if any
    #[serde(default)]
    pub deprecated_since: String,
}

impl Action {
    /// PascalCase identifier for this action
    pub fn id(&self) -> String {
        to_pascal_case(&self.key)
    }

    /// Type name of the generated request struct
    pub fn request_type_name(&self) -> String {
        format!("{}Request", self.id())
    }

    /// Type name of the generated response struct
    pub fn response_type_name(&self) -> String {
        format!("{}Response", self.id())
    }

    /// Type name of the generated merged-pages response struct
    pub fn response_all_type_name(&self) -> String {
        format!("{}ResponseAll", self.id())
    }

    /// Whether this action is paging-capable.
    ///
    /// An action supports paging when it declares both a page-index and a
    /// page-size request parameter.
    pub fn has_paging(&self) -> bool {
        let mut has_p = false;
        let mut has_ps = false;
        for param in &self.params {
            match param.key.as_str() {
                PAGE_INDEX_PARAM => has_p = true,
                PAGE_SIZE_PARAM => has_ps = true,
                _ => {}
            }
        }
        has_p && has_ps
    }
}

/// One changelog entry of an action
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangeLogEntry {
    /// Version the change shipped in
    #[serde(default)]
    pub version: String,
    /// Description of the change
    #[serde(default)]
    pub description: String,
}

/// One declared request parameter of an action
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Param {
    /// Parameter key as sent on the wire
    pub key: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Whether this parameter is marked internal
    #[serde(default)]
    pub internal: bool,

    /// Whether this parameter is required
    #[serde(default)]
    pub required: bool,

    /// First version this parameter appeared in
    #[serde(default)]
    pub since: String,

    /// Version this parameter was deprecated in, if any
    #[serde(default)]
    pub deprecated_since: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action_with_params(keys: &[&str]) -> Action {
        Action {
            key: "search".to_string(),
            params: keys
                .iter()
                .map(|k| Param {
                    key: (*k).to_string(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_endpoint_from_path() {
        let service = Service {
            path: "api/components".to_string(),
            ..Default::default()
        };
        assert_eq!(service.endpoint(), "components");
        assert_eq!(service.getter(), "Components");
    }

    #[test]
    fn test_has_paging_requires_both_params() {
        assert!(action_with_params(&["p", "ps", "q"]).has_paging());
        assert!(!action_with_params(&["p", "q"]).has_paging());
        assert!(!action_with_params(&["ps"]).has_paging());
        assert!(!action_with_params(&[]).has_paging());
    }

    #[test]
    fn test_type_names() {
        let action = Action {
            key: "bulk_update_key".to_string(),
            ..Default::default()
        };
        assert_eq!(action.id(), "BulkUpdateKey");
        assert_eq!(action.request_type_name(), "BulkUpdateKeyRequest");
        assert_eq!(action.response_type_name(), "BulkUpdateKeyResponse");
        assert_eq!(action.response_all_type_name(), "BulkUpdateKeyResponseAll");
    }

    #[test]
    fn test_deserialize_metadata_document() {
        let doc = serde_json::json!({
            "webServices": [{
                "path": "api/projects",
                "description": "Manage projects",
                "actions": [{
                    "key": "search",
                    "description": "Search for projects",
                    "hasResponseExample": true,
                    "post": false,
                    "params": [
                        {"key": "p", "description": "page index"},
                        {"key": "ps", "description": "page size"},
                        {"key": "q", "required": false}
                    ],
                    "changelog": [
                        {"version": "8.4", "description": "Field 'id' removed"}
                    ],
                    "since": "6.3"
                }]
            }]
        });

        let api: Api = serde_json::from_value(doc).unwrap();
        assert_eq!(api.web_services.len(), 1);

        let service = &api.web_services[0];
        assert_eq!(service.endpoint(), "projects");

        let action = &service.actions[0];
        assert!(action.has_response_example);
        assert!(action.has_paging());
        assert_eq!(action.since, "6.3");
        assert_eq!(action.change_log.len(), 1);
    }
}
