//! Static scaffold files for the generated client
//!
//! The client and paging modules are the same for every target API; they are
//! shipped as templates and interpolated with the generated package name and
//! the list of service accessors.

use crate::error::Result;
use crate::metadata::Service;
use crate::template::{self, TemplateContext};

use super::ident::{escape_ident, to_snake_case};
use super::render::GENERATED_HEADER;

const CLIENT_TEMPLATE: &str = include_str!("../../templates/client.rs.tpl");
const PAGING_TEMPLATE: &str = include_str!("../../templates/paging.rs.tpl");

/// Module name for an endpoint, keyword-escaped
pub fn module_name(endpoint: &str) -> String {
    escape_ident(&to_snake_case(endpoint))
}

/// Render the shared client module
pub fn render_client(package: &str, services: &[Service]) -> Result<String> {
    let mut accessors = String::new();
    for service in services {
        let endpoint = service.endpoint();
        let module = module_name(endpoint);
        let service_type = format!("{}Service", service.getter());
        let method = escape_ident(&to_snake_case(endpoint));
        accessors.push_str(&format!(
            "    /// Access the `{endpoint}` service\n    pub fn {method}(&self) -> crate::{module}::{service_type}<'_> {{\n        crate::{module}::{service_type} {{ client: self }}\n    }}\n\n"
        ));
    }

    let context = TemplateContext::new()
        .set("package", package)
        .set("service_accessors", accessors);
    template::render(CLIENT_TEMPLATE, &context)
}

/// Render the shared paging module
pub fn render_paging() -> String {
    PAGING_TEMPLATE.to_string()
}

/// Render the module listing for the generated package root.
///
/// Endpoints are listed in sorted order so repeated runs produce identical
/// files.
pub fn render_mod(package: &str, endpoints: &[String]) -> String {
    let mut out = String::new();
    out.push_str(GENERATED_HEADER);
    out.push('\n');
    out.push_str(&format!("//! Generated `{package}` API client.\n\n"));
    out.push_str("pub mod client;\npub mod paging;\n");

    let mut sorted: Vec<&String> = endpoints.iter().collect();
    sorted.sort();
    for endpoint in sorted {
        out.push_str(&format!("pub mod {};\n", module_name(endpoint)));
    }

    out.push_str("\npub use client::{Client, ClientError};\n");
    out
}
