//! Rust source emission from field trees
//!
//! Renders one module per endpoint: request structs from declared params,
//! response structs from the inferred field tree (nested maps become nested
//! named structs), the paging accessor, the merged-pages struct and the
//! service methods including the auto-paginating `*_all` loop.
//!
//! The emitter consumes only field trees and metadata; it never re-inspects
//! original JSON.

use crate::metadata::{Action, Service, PAGE_INDEX_PARAM, PAGE_SIZE_PARAM};
use crate::paging::{PagingSource, PAGING_ACCESSOR};
use crate::schema::{Field, MapField, ScalarKind};

use super::ident::{doc_text, escape_ident, field_ident, to_snake_case};

/// Header written to every generated file
pub const GENERATED_HEADER: &str = "// AUTOMATICALLY GENERATED, DO NOT EDIT BY HAND!\n";

/// Everything the emitter needs for one action
#[derive(Debug, Clone)]
pub struct ActionCodegen {
    /// The action's metadata
    pub action: Action,
    /// Primary response field tree; `Field::Empty` when the action has no
    /// response example
    pub response: Field,
    /// Collection-only schema, present only for paging-capable Map responses
    pub projected: Option<MapField>,
    /// Paging source on the primary tree, present only when paging-capable
    pub paging: Option<PagingSource>,
}

/// Render the complete module for one endpoint
pub fn render_module(
    service: &Service,
    actions: &[ActionCodegen],
    skipped_request_fields: &[String],
) -> String {
    let endpoint = service.endpoint();
    let mut out = String::new();

    out.push_str(GENERATED_HEADER);
    out.push('\n');
    if service.description.is_empty() {
        out.push_str(&format!("//! `{endpoint}` endpoint\n\n"));
    } else {
        for line in doc_text(&service.description).lines() {
            out.push_str(&format!("//! {line}\n"));
        }
        out.push('\n');
    }

    let uses_paging = actions.iter().any(|a| a.paging.is_some());
    let has_responses = actions.iter().any(|a| !a.response.is_empty());

    out.push_str("use serde::Serialize;\n");
    if has_responses {
        out.push_str("use serde::Deserialize;\n");
    }
    out.push_str("\nuse crate::client::{Client, ClientError};\n");
    if uses_paging {
        out.push_str("use crate::paging::{Paging, PagingParams};\n");
    }
    out.push('\n');
    out.push_str(&format!("const PATH: &str = \"{}\";\n\n", service.path));

    // Type definitions, one action after another
    for codegen in actions {
        out.push_str(&render_request_struct(&codegen.action, skipped_request_fields));
        out.push('\n');

        if !codegen.response.is_empty() {
            out.push_str(&render_response_types(codegen));
        }
    }

    // Service struct and methods
    let service_type = format!("{}Service", service.getter());
    out.push_str(&format!(
        "/// Access to the `{endpoint}` actions\npub struct {service_type}<'c> {{\n    pub(crate) client: &'c Client,\n}}\n\n"
    ));
    out.push_str(&format!("impl<'c> {service_type}<'c> {{\n"));
    for codegen in actions {
        out.push_str(&render_service_method(codegen));
        if codegen.projected.is_some() {
            out.push_str(&render_all_method(codegen));
        }
    }
    out.push_str("}\n");

    out
}

/// Render the request struct for an action
pub fn render_request_struct(action: &Action, skipped_request_fields: &[String]) -> String {
    let type_name = action.request_type_name();
    let mut out = String::new();

    if action.description.is_empty() {
        out.push_str(&format!("/// Request for {}\n", action.id()));
    } else {
        for line in doc_text(&action.description).lines() {
            out.push_str(&format!("/// {line}\n"));
        }
    }
    if !action.deprecated_since.is_empty() {
        out.push_str(&format!(
            "///\n/// Deprecated since {}\n",
            action.deprecated_since
        ));
    }

    out.push_str("#[derive(Debug, Clone, Default, Serialize)]\n");
    out.push_str(&format!("pub struct {type_name} {{\n"));

    for param in &action.params {
        // Paging parameters travel separately as PagingParams
        if param.key == PAGE_INDEX_PARAM || param.key == PAGE_SIZE_PARAM {
            continue;
        }
        if skipped_request_fields.contains(&param.key) {
            continue;
        }

        let mut doc = String::new();
        if !param.since.is_empty() {
            doc.push_str(&format!("Since {}; ", param.since));
        }
        if !param.deprecated_since.is_empty() {
            doc.push_str(&format!("Deprecated since {}; ", param.deprecated_since));
        }
        doc.push_str(&doc_text(&param.description).replace('\n', " "));
        let doc = doc.trim();
        if !doc.is_empty() {
            out.push_str(&format!("    /// {doc}\n"));
        }

        let ident = field_ident(&param.key);
        if param.required {
            out.push_str(&format!("    #[serde(rename = \"{}\")]\n", param.key));
            out.push_str(&format!("    pub {ident}: String,\n"));
        } else {
            out.push_str(&format!(
                "    #[serde(rename = \"{}\", skip_serializing_if = \"Option::is_none\")]\n",
                param.key
            ));
            out.push_str(&format!("    pub {ident}: Option<String>,\n"));
        }
    }

    out.push_str("}\n");
    out
}

/// Render response structs, paging accessor and merged-pages struct
fn render_response_types(codegen: &ActionCodegen) -> String {
    let action = &codegen.action;
    let mut out = String::new();

    let shared_paging = matches!(codegen.paging, Some(PagingSource::Nested { .. }));

    out.push_str(&render_root(
        &codegen.response,
        &action.response_type_name(),
        &format!("Response for {}", action.request_type_name()),
        false,
        shared_paging,
    ));

    if let (Some(source), Some(map)) = (&codegen.paging, codegen.response.as_map()) {
        out.push_str(&render_paging_impl(&action.response_type_name(), map, source));
    }

    if let Some(projected) = &codegen.projected {
        out.push_str(&render_all_struct(
            projected,
            &action.response_all_type_name(),
            &action.response_type_name(),
        ));
    }

    out
}

/// Render the merged-pages accumulator struct.
///
/// Nested member types are shared with the primary response struct, so only
/// the accumulator itself is emitted. Collection members are plain vectors;
/// everything else is optional, since per-page scalars are ill-defined once
/// pages are merged.
fn render_all_struct(projected: &MapField, all_type: &str, primary_type: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "/// Pages of {primary_type} merged by auto-pagination\n"
    ));
    out.push_str("#[derive(Debug, Clone, Default, Deserialize)]\n");
    out.push_str(&format!("pub struct {all_type} {{\n"));

    for entry in projected.entries() {
        let ident = field_ident(&entry.accessor);
        let prefix = format!("{primary_type}{}", entry.accessor);
        // Nested member types were already emitted next to the primary
        // response struct under the same names.
        let base = field_type(&entry.field, prefix, &mut Vec::new());

        if matches!(entry.field, Field::Collection(_)) {
            out.push_str(&format!(
                "    #[serde(rename = \"{}\", default)]\n",
                entry.key
            ));
            out.push_str(&format!("    pub {ident}: {base},\n"));
        } else {
            out.push_str(&format!("    #[serde(rename = \"{}\")]\n", entry.key));
            out.push_str(&format!("    pub {ident}: Option<{base}>,\n"));
        }
    }

    out.push_str("}\n\n");
    out
}

/// Render a response root: struct for maps, alias for scalars and collections
fn render_root(
    field: &Field,
    type_name: &str,
    doc: &str,
    derive_default: bool,
    shared_paging: bool,
) -> String {
    match field {
        Field::Map(map) => render_struct(map, type_name, doc, derive_default, shared_paging),
        Field::Collection(collection) => {
            let mut out = String::new();
            let mut nested = Vec::new();
            let element = field_type(&collection.element, format!("{type_name}Item"), &mut nested);
            out.push_str(&format!("/// {doc}\npub type {type_name} = Vec<{element}>;\n\n"));
            for (map, name) in nested {
                out.push_str(&render_struct(
                    &map,
                    &name,
                    &format!("Element of {type_name}"),
                    derive_default,
                    false,
                ));
            }
            out
        }
        Field::Scalar(scalar) => format!(
            "/// {doc}\npub type {type_name} = {};\n\n",
            scalar_type(scalar.kind)
        ),
        Field::Empty => String::new(),
    }
}

/// Render one map as a named struct, recursing into nested maps
fn render_struct(
    map: &MapField,
    type_name: &str,
    doc: &str,
    derive_default: bool,
    shared_paging: bool,
) -> String {
    let mut out = String::new();
    let mut nested: Vec<(MapField, String)> = Vec::new();

    out.push_str(&format!("/// {doc}\n"));
    if derive_default {
        out.push_str("#[derive(Debug, Clone, Default, Deserialize)]\n");
    } else {
        out.push_str("#[derive(Debug, Clone, Deserialize)]\n");
    }
    out.push_str(&format!("pub struct {type_name} {{\n"));

    for entry in map.entries() {
        let ident = field_ident(&entry.accessor);
        let prefix = format!("{type_name}{}", entry.accessor);

        let base = if shared_paging
            && entry.accessor == PAGING_ACCESSOR
            && entry.field.as_map().is_some()
        {
            "Paging".to_string()
        } else {
            field_type(&entry.field, prefix, &mut nested)
        };

        let is_collection = matches!(entry.field, Field::Collection(_));
        let ty = if entry.required {
            base
        } else {
            format!("Option<{base}>")
        };

        if entry.required && is_collection {
            out.push_str(&format!(
                "    #[serde(rename = \"{}\", default)]\n",
                entry.key
            ));
        } else {
            out.push_str(&format!("    #[serde(rename = \"{}\")]\n", entry.key));
        }
        out.push_str(&format!("    pub {ident}: {ty},\n"));
    }

    out.push_str("}\n\n");

    for (child, name) in nested {
        out.push_str(&render_struct(
            &child,
            &name,
            &format!("Nested member of {type_name}"),
            derive_default,
            false,
        ));
    }

    out
}

/// Rust type for a field, collecting nested maps that need their own structs
fn field_type(field: &Field, prefix: String, nested: &mut Vec<(MapField, String)>) -> String {
    match field {
        Field::Scalar(scalar) => scalar_type(scalar.kind).to_string(),
        Field::Map(map) => {
            nested.push((map.clone(), prefix.clone()));
            prefix
        }
        Field::Collection(collection) => {
            let element = field_type(&collection.element, prefix, nested);
            format!("Vec<{element}>")
        }
        Field::Empty => "()".to_string(),
    }
}

/// Rust type for a scalar leaf
fn scalar_type(kind: ScalarKind) -> &'static str {
    match kind {
        ScalarKind::String | ScalarKind::Text => "String",
        ScalarKind::Number => "f64",
        ScalarKind::Boolean => "bool",
        ScalarKind::Unknown => "serde_json::Value",
    }
}

/// Render the paging accessor on a response struct
fn render_paging_impl(type_name: &str, map: &MapField, source: &PagingSource) -> String {
    let mut out = String::new();
    out.push_str(&format!("impl {type_name} {{\n"));
    out.push_str(&format!(
        "    /// Extract the paging metadata from {type_name}\n"
    ));
    out.push_str("    pub fn get_paging(&self) -> Paging {\n");

    match source {
        PagingSource::Nested { accessor } => {
            let ident = field_ident(accessor);
            let optional = map.get(accessor).is_some_and(|e| !e.required);
            if optional {
                out.push_str(&format!(
                    "        self.{ident}.clone().unwrap_or_default()\n"
                ));
            } else {
                out.push_str(&format!("        self.{ident}.clone()\n"));
            }
        }
        PagingSource::Flattened {
            page,
            page_size,
            total,
        } => {
            // Synthesize a paging literal from the flattened accessors
            out.push_str("        Paging {\n");
            let mut any = false;
            if let Some(line) = flattened_member(map, page.as_deref(), "page_index", "u32") {
                out.push_str(&line);
                any = true;
            }
            if let Some(line) = flattened_member(map, page_size.as_deref(), "page_size", "u32") {
                out.push_str(&line);
                any = true;
            }
            if let Some(line) = flattened_member(map, total.as_deref(), "total", "u64") {
                out.push_str(&line);
                any = true;
            }
            if any {
                out.push_str("            ..Paging::default()\n");
            }
            out.push_str("        }\n");
        }
    }

    out.push_str("    }\n}\n\n");
    out
}

/// One member line of the synthesized paging literal
fn flattened_member(
    map: &MapField,
    accessor: Option<&str>,
    member: &str,
    target: &str,
) -> Option<String> {
    let entry = map.get(accessor?)?;
    let Field::Scalar(scalar) = &entry.field else {
        return None;
    };
    if scalar.kind != ScalarKind::Number {
        return None;
    }
    let ident = field_ident(&entry.accessor);
    let line = if entry.required {
        format!("            {member}: self.{ident} as {target},\n")
    } else {
        format!(
            "            {member}: self.{ident}.unwrap_or_default() as {target},\n"
        )
    };
    Some(line)
}

/// Name of the auto-paginating method for an action
fn all_method_name(action: &Action) -> String {
    format!("{}_all", to_snake_case(&action.id()))
}

/// Render the service method for one action
fn render_service_method(codegen: &ActionCodegen) -> String {
    let action = &codegen.action;
    let method = to_snake_case(&action.id());
    let method = escape_ident(&method);
    let request_type = action.request_type_name();
    let has_response = !codegen.response.is_empty();
    let has_paging = codegen.paging.is_some();

    let mut out = String::new();

    let mut doc = format!("{} - {}", action.id(), doc_text(&action.description));
    if !action.since.is_empty() {
        doc.push_str(&format!("\nSince {}", action.since));
    }
    if !action.deprecated_since.is_empty() {
        doc.push_str(&format!("\nDeprecated since {}", action.deprecated_since));
    }
    if !action.change_log.is_empty() {
        doc.push_str("\nChangelog:");
        for change in &action.change_log {
            doc.push_str(&format!(
                "\n  {}: {}",
                change.version,
                doc_text(&change.description).replace('\n', " ")
            ));
        }
    }
    for line in doc.lines() {
        out.push_str(&format!("    /// {}\n", line.trim_end()));
    }

    let takes_paging = has_paging && !action.post;
    let paging_param = if takes_paging { ", p: &PagingParams" } else { "" };
    let return_type = if has_response {
        action.response_type_name()
    } else {
        "reqwest::Response".to_string()
    };

    out.push_str(&format!(
        "    pub async fn {method}(&self, r: &{request_type}{paging_param}) -> Result<{return_type}, ClientError> {{\n"
    ));
    out.push_str(&format!(
        "        let u = format!(\"{{PATH}}/{}\");\n",
        action.key
    ));

    let call = if has_response {
        if is_text_response(&codegen.response) && !action.post {
            "get_text"
        } else if action.post {
            "post"
        } else {
            "get"
        }
    } else if action.post {
        "post_raw"
    } else {
        "get_raw"
    };

    let paging_arg = if action.post {
        ""
    } else if takes_paging {
        ", Some(p)"
    } else {
        ", None"
    };

    out.push_str(&format!(
        "        self.client.{call}(&u, r{paging_arg}).await\n"
    ));
    out.push_str("    }\n\n");

    out
}

/// Whether the response root is an opaque text payload
fn is_text_response(field: &Field) -> bool {
    matches!(field, Field::Scalar(scalar) if scalar.kind == ScalarKind::Text)
}

/// Render the auto-paginating `*_all` method
fn render_all_method(codegen: &ActionCodegen) -> String {
    let action = &codegen.action;
    let method = to_snake_case(&action.id());
    let method = escape_ident(&method);
    let all_method = all_method_name(action);
    let request_type = action.request_type_name();
    let all_type = action.response_all_type_name();

    let Some(projected) = &codegen.projected else {
        return String::new();
    };

    let mut out = String::new();
    out.push_str(&format!(
        "    /// {} fetches every page of {} and merges the collections\n",
        action.id(),
        action.id()
    ));
    out.push_str(&format!(
        "    pub async fn {all_method}(&self, r: &{request_type}) -> Result<{all_type}, ClientError> {{\n"
    ));
    out.push_str("        let mut p = PagingParams { p: 1, ps: 100 };\n");
    out.push_str(&format!(
        "        let mut response = {all_type}::default();\n"
    ));
    out.push_str("        loop {\n");
    out.push_str(&format!(
        "            let res = self.{method}(r, &p).await?;\n"
    ));

    for entry in projected.entries() {
        if !matches!(entry.field, Field::Collection(_)) {
            continue;
        }
        let ident = field_ident(&entry.accessor);
        if entry.required {
            out.push_str(&format!(
                "            response.{ident}.extend(res.{ident}.clone());\n"
            ));
        } else {
            out.push_str(&format!(
                "            response.{ident}.extend(res.{ident}.clone().unwrap_or_default());\n"
            ));
        }
    }

    out.push_str("            if res.get_paging().end() {\n");
    out.push_str("                break;\n");
    out.push_str("            }\n");
    out.push_str("            p.p += 1;\n");
    out.push_str("        }\n");
    out.push_str("        Ok(response)\n");
    out.push_str("    }\n\n");

    out
}
