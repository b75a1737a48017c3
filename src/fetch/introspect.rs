//! Introspection endpoints
//!
//! Fetches the metadata document and per-action response examples. The
//! `ExampleFetcher` trait is the seam between the network and the engine so
//! tests can substitute a canned fetcher.

use async_trait::async_trait;
use serde_json::Value;

use super::client::HttpClient;
use crate::decode::decode_example;
use crate::error::Result;
use crate::metadata::Api;

/// Path of the metadata listing endpoint
pub const DEFINITIONS_PATH: &str = "api/webservices/list";
/// Path of the response example endpoint
pub const EXAMPLE_PATH: &str = "api/webservices/response_example";

/// Source of metadata and response examples for the generator
#[async_trait]
pub trait ExampleFetcher: Send + Sync {
    /// Fetch the full introspection document
    async fn fetch_definitions(&self) -> Result<Api>;

    /// Fetch one action's response example.
    ///
    /// Returns the decoded JSON value, or the synthetic `{format, example}`
    /// envelope for opaque bodies. An unknown format tag is an error here,
    /// before the schema parser is involved.
    async fn fetch_example(&self, endpoint: &str, action: &str) -> Result<Value>;
}

/// HTTP-backed fetcher against a live service
#[derive(Debug)]
pub struct IntrospectionClient {
    http: HttpClient,
    include_internal: bool,
}

impl IntrospectionClient {
    /// Create a fetcher over an HTTP client
    pub fn new(http: HttpClient, include_internal: bool) -> Self {
        Self {
            http,
            include_internal,
        }
    }
}

#[async_trait]
impl ExampleFetcher for IntrospectionClient {
    async fn fetch_definitions(&self) -> Result<Api> {
        let query: &[(&str, &str)] = if self.include_internal {
            &[("include_internals", "true")]
        } else {
            &[]
        };
        self.http.get_json(DEFINITIONS_PATH, query).await
    }

    async fn fetch_example(&self, endpoint: &str, action: &str) -> Result<Value> {
        let controller = format!("api/{endpoint}");
        let body = self
            .http
            .get_text(
                EXAMPLE_PATH,
                &[("controller", controller.as_str()), ("action", action)],
            )
            .await?;
        decode_example(&body)
    }
}
