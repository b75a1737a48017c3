//! Generation engine
//!
//! Orchestrates one run: fetch the metadata document, process every service
//! in its own task (actions sequentially within a service), and write the
//! generated module tree.
//!
//! Error isolation is per action: a shape conflict or unsupported example
//! format loses that one action's response types, never its siblings. A
//! failing service loses its file but the run continues.

mod types;

pub use types::{GenStats, ServiceModule};

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::codegen::{self, ActionCodegen};
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::fetch::ExampleFetcher;
use crate::metadata::{Action, Service};
use crate::overrides::OverrideRegistry;
use crate::paging::{extract_paging_field, project_collection_schema};
use crate::schema::{Field, SchemaParser};

/// The generation engine
pub struct GeneratorEngine<F> {
    fetcher: Arc<F>,
    overrides: Arc<OverrideRegistry>,
    config: Arc<GeneratorConfig>,
}

impl<F: ExampleFetcher + 'static> GeneratorEngine<F> {
    /// Create an engine over a fetcher, override registry and config
    pub fn new(fetcher: F, overrides: OverrideRegistry, config: GeneratorConfig) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            overrides: Arc::new(overrides),
            config: Arc::new(config),
        }
    }

    /// Run one full generation
    pub async fn run(&self) -> Result<GenStats> {
        let api = self.fetcher.fetch_definitions().await?;
        let mut stats = GenStats::default();

        // Sorted service order keeps file output deterministic even though
        // services are processed in parallel.
        let mut services = api.web_services;
        services.sort_by(|a, b| a.path.cmp(&b.path));

        let mut kept = Vec::with_capacity(services.len());
        for service in services {
            if self.config.is_endpoint_skipped(service.endpoint()) {
                info!(endpoint = service.endpoint(), "Skipping endpoint");
                stats.endpoints_skipped += 1;
                continue;
            }
            kept.push(service);
        }

        let mut handles = Vec::with_capacity(kept.len());
        for service in kept.clone() {
            let fetcher = Arc::clone(&self.fetcher);
            let overrides = Arc::clone(&self.overrides);
            let config = Arc::clone(&self.config);
            handles.push(tokio::spawn(async move {
                process_service(fetcher.as_ref(), &overrides, &config, &service).await
            }));
        }

        let mut modules = Vec::with_capacity(handles.len());
        for (service, joined) in kept.iter().zip(join_all(handles).await) {
            match joined {
                Ok(Ok(module)) => {
                    stats.add_service(&module);
                    modules.push(module);
                }
                Ok(Err(e)) => {
                    warn!(endpoint = service.endpoint(), error = %e, "Service generation failed");
                    stats.services_failed += 1;
                }
                Err(e) => {
                    warn!(endpoint = service.endpoint(), error = %e, "Service task panicked");
                    stats.services_failed += 1;
                }
            }
        }

        stats.files_written = self.write_output(&kept, &modules)?;

        info!(
            services = stats.services,
            actions = stats.actions,
            files = stats.files_written,
            "Generation complete"
        );
        Ok(stats)
    }

    /// Write scaffold and service modules to the output directory
    fn write_output(&self, services: &[Service], modules: &[ServiceModule]) -> Result<usize> {
        let out = &self.config.output_dir;
        std::fs::create_dir_all(out)?;

        let endpoints: Vec<String> = modules.iter().map(|m| m.endpoint.clone()).collect();

        let mut written = 0;

        let generated: Vec<Service> = services
            .iter()
            .filter(|s| endpoints.iter().any(|e| e == s.endpoint()))
            .cloned()
            .collect();
        let client = codegen::render_client(&self.config.package, &generated)?;
        std::fs::write(out.join("client.rs"), client)?;
        written += 1;

        std::fs::write(out.join("paging.rs"), codegen::render_paging())?;
        written += 1;

        std::fs::write(
            out.join("mod.rs"),
            codegen::render_mod(&self.config.package, &endpoints),
        )?;
        written += 1;

        for module in modules {
            std::fs::write(out.join(&module.file_name), &module.content)?;
            written += 1;
        }

        Ok(written)
    }
}

/// Process one service: fetch each action's example, infer its schemas and
/// render the endpoint module. Actions are strictly sequential; they share no
/// state but their order fixes the file layout.
async fn process_service<F: ExampleFetcher>(
    fetcher: &F,
    overrides: &OverrideRegistry,
    config: &GeneratorConfig,
    service: &Service,
) -> Result<ServiceModule> {
    let endpoint = service.endpoint();
    let mut parts = Vec::with_capacity(service.actions.len());
    let mut actions_failed = 0;

    for action in &service.actions {
        if config.is_action_skipped(endpoint, &action.key) {
            info!(endpoint, action = %action.key, "Skipping action");
            continue;
        }
        if action.internal && !config.include_internal {
            debug!(endpoint, action = %action.key, "Skipping internal action");
            continue;
        }

        debug!(endpoint, action = %action.key, "Processing action");

        let response = if action.has_response_example {
            match infer_response(fetcher, overrides, endpoint, action).await {
                Ok(field) => field,
                Err(e) => {
                    // Fatal for this action only; the request struct is still
                    // emitted without response types.
                    warn!(endpoint, action = %action.key, error = %e, "Response inference failed");
                    actions_failed += 1;
                    Field::Empty
                }
            }
        } else {
            Field::Empty
        };

        let paginate = action.has_paging() && !action.post;
        let paging = if paginate {
            extract_paging_field(&response)
        } else {
            None
        };
        let projected = if paginate {
            project_collection_schema(&response, &action.response_all_type_name())
        } else {
            None
        };
        if paginate && projected.is_none() && !response.is_empty() {
            debug!(
                endpoint,
                action = %action.key,
                kind = response.kind_label(),
                "Response is not a map; skipping paging-aware generation"
            );
        }

        parts.push(ActionCodegen {
            action: action.clone(),
            response,
            projected,
            paging,
        });
    }

    let content = codegen::render_module(service, &parts, &config.skipped_request_fields);
    let actions = parts.len();

    Ok(ServiceModule {
        endpoint: endpoint.to_string(),
        file_name: format!("{}.rs", codegen::module_name(endpoint).replace("r#", "")),
        content,
        actions,
        actions_failed,
    })
}

/// Fetch and parse one action's response example
async fn infer_response<F: ExampleFetcher>(
    fetcher: &F,
    overrides: &OverrideRegistry,
    endpoint: &str,
    action: &Action,
) -> Result<Field> {
    let example = fetcher.fetch_example(endpoint, &action.key).await?;
    let view = overrides.filter(endpoint, &action.key);
    let parser = SchemaParser::new(&view);
    parser.parse(&action.response_type_name(), &example)
}
