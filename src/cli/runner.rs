//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::GeneratorConfig;
use crate::engine::GeneratorEngine;
use crate::error::Result;
use crate::fetch::{ExampleFetcher, HttpClient, IntrospectionClient};
use crate::overrides::OverrideRegistry;
use crate::schema::{Field, SchemaParser};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.build_config()?;
        let overrides = self.load_overrides()?;

        match &self.cli.command {
            Commands::Generate {
                output,
                package,
                skip,
            } => {
                let mut config = config;
                if let Some(output) = output {
                    config.output_dir.clone_from(output);
                }
                if let Some(package) = package {
                    config.package.clone_from(package);
                }
                config.skipped_endpoints.extend(skip.iter().cloned());
                self.generate(config, overrides).await
            }
            Commands::List => self.list(config).await,
            Commands::Schema { endpoint, action } => {
                self.schema(config, overrides, endpoint, action).await
            }
        }
    }

    /// Assemble the run configuration from file and flags
    fn build_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.cli.config {
            Some(path) => GeneratorConfig::load(path)?,
            None => GeneratorConfig::default(),
        };

        if let Some(host) = &self.cli.host {
            config.host.clone_from(host);
        }
        if let Some(auth) = &self.cli.auth {
            config.authorization = Some(auth.clone());
        }
        if self.cli.internal {
            config.include_internal = true;
        }

        Ok(config)
    }

    /// Load the override registry, empty when no file is given
    fn load_overrides(&self) -> Result<OverrideRegistry> {
        match &self.cli.overrides {
            Some(path) => OverrideRegistry::load(path),
            None => Ok(OverrideRegistry::new()),
        }
    }

    fn fetcher(&self, config: &GeneratorConfig) -> IntrospectionClient {
        IntrospectionClient::new(
            HttpClient::with_config(config.http_config()),
            config.include_internal,
        )
    }

    async fn generate(&self, config: GeneratorConfig, overrides: OverrideRegistry) -> Result<()> {
        let fetcher = self.fetcher(&config);
        let output_dir = config.output_dir.clone();
        let engine = GeneratorEngine::new(fetcher, overrides, config);
        let stats = engine.run().await?;

        println!(
            "Generated {} services ({} actions, {} files) into {}",
            stats.services,
            stats.actions,
            stats.files_written,
            output_dir.display()
        );
        if stats.actions_failed > 0 || stats.services_failed > 0 {
            println!(
                "Warning: {} actions and {} services failed; see log output",
                stats.actions_failed, stats.services_failed
            );
        }
        Ok(())
    }

    async fn list(&self, config: GeneratorConfig) -> Result<()> {
        let fetcher = self.fetcher(&config);
        let api = fetcher.fetch_definitions().await?;

        let mut services = api.web_services;
        services.sort_by(|a, b| a.path.cmp(&b.path));

        for service in &services {
            println!("{}", service.endpoint());
            for action in &service.actions {
                let mut notes = Vec::new();
                if action.post {
                    notes.push("POST");
                }
                if action.has_paging() {
                    notes.push("paged");
                }
                if action.internal {
                    notes.push("internal");
                }
                if !action.deprecated_since.is_empty() {
                    notes.push("deprecated");
                }
                let notes = if notes.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", notes.join(", "))
                };
                println!("  {}{notes}", action.key);
            }
        }
        Ok(())
    }

    async fn schema(
        &self,
        config: GeneratorConfig,
        overrides: OverrideRegistry,
        endpoint: &str,
        action: &str,
    ) -> Result<()> {
        let fetcher = self.fetcher(&config);
        let example = fetcher.fetch_example(endpoint, action).await?;

        let view = overrides.filter(endpoint, action);
        let parser = SchemaParser::new(&view);
        let field = parser.parse("Response", &example)?;

        print_tree(&field, "Response", true, 0);
        Ok(())
    }
}

/// Print a field tree, one accessor per line
fn print_tree(field: &Field, label: &str, required: bool, depth: usize) {
    let indent = "  ".repeat(depth);
    let optional = if required { "" } else { "?" };
    match field {
        Field::Scalar(scalar) => println!("{indent}{label}{optional}: {}", scalar.kind),
        Field::Map(map) => {
            println!("{indent}{label}{optional}: map");
            for entry in map.entries() {
                print_tree(&entry.field, &entry.accessor, entry.required, depth + 1);
            }
        }
        Field::Collection(collection) => {
            println!("{indent}{label}{optional}: collection");
            print_tree(&collection.element, "element", true, depth + 1);
        }
        Field::Empty => println!("{indent}{label}: (empty)"),
    }
}
