//! Generator configuration
//!
//! Settings for one generation run, loadable from a YAML file and
//! overridable from the command line.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;
use crate::fetch::{HttpClientConfig, RateLimiterConfig};

/// Complete configuration for a generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Base URL of the remote service
    #[serde(default = "default_host")]
    pub host: String,

    /// Literal `Authorization` header value, e.g. `Basic YWRtaW46YWRtaW4=`
    #[serde(default)]
    pub authorization: Option<String>,

    /// Generate code for internal actions as well
    #[serde(default)]
    pub include_internal: bool,

    /// Directory the generated module tree is written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Name of the generated package, used in scaffold docs
    #[serde(default = "default_package")]
    pub package: String,

    /// Endpoints that cannot or should not be generated
    #[serde(default = "default_skipped_endpoints")]
    pub skipped_endpoints: Vec<String>,

    /// Single actions to skip, as `endpoint/action` pairs
    #[serde(default = "default_skipped_actions")]
    pub skipped_actions: Vec<String>,

    /// Request parameters dropped from every request struct
    #[serde(default)]
    pub skipped_request_fields: Vec<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum number of retries per request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Requests per second against the metadata endpoint
    #[serde(default = "default_rps")]
    pub requests_per_second: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            authorization: None,
            include_internal: false,
            output_dir: default_output_dir(),
            package: default_package(),
            skipped_endpoints: default_skipped_endpoints(),
            skipped_actions: default_skipped_actions(),
            skipped_request_fields: Vec::new(),
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            requests_per_second: default_rps(),
        }
    }
}

fn default_host() -> String {
    "http://localhost:9000".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("generated")
}

fn default_package() -> String {
    "api_client".to_string()
}

fn default_skipped_endpoints() -> Vec<String> {
    vec![
        // numeric map keys cannot become accessors
        "duplications".to_string(),
        // deprecated endpoint with unparseable examples
        "properties".to_string(),
        // deprecated in favour of favorites
        "favourites".to_string(),
        // would collide with the generated paging module
        "paging".to_string(),
    ]
}

fn default_skipped_actions() -> Vec<String> {
    vec!["sources/index".to_string()]
}

fn default_timeout() -> u64 {
    15
}

fn default_max_retries() -> u32 {
    3
}

fn default_rps() -> u32 {
    10
}

impl GeneratorConfig {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Whether an endpoint is excluded from generation
    pub fn is_endpoint_skipped(&self, endpoint: &str) -> bool {
        self.skipped_endpoints.iter().any(|e| e == endpoint)
    }

    /// Whether a single action is excluded from generation
    pub fn is_action_skipped(&self, endpoint: &str, action: &str) -> bool {
        let key = format!("{endpoint}/{action}");
        self.skipped_actions.iter().any(|a| *a == key)
    }

    /// HTTP client configuration for this run
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(&self.host)
            .timeout(Duration::from_secs(self.timeout_seconds))
            .max_retries(self.max_retries)
            .rate_limit(RateLimiterConfig::new(
                self.requests_per_second,
                self.requests_per_second,
            ));
        if let Some(ref auth) = self.authorization {
            builder = builder.authorization(auth);
        }
        builder.build()
    }
}
