//! Response example envelope types

use serde::{Deserialize, Serialize};

/// Format tag of a fetched response example
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExampleFormat {
    /// JSON body; the example string is itself a JSON document
    Json,
    /// Plain text body
    Txt,
    /// XML body
    Xml,
    /// SVG body
    Svg,
    /// Log output body
    Log,
    /// Protobuf description body
    Proto,
}

impl ExampleFormat {
    /// Parse a wire format tag. Returns `None` outside the known set.
    pub fn from_tag(tag: &str) -> Option<ExampleFormat> {
        match tag {
            "json" => Some(ExampleFormat::Json),
            "txt" => Some(ExampleFormat::Txt),
            "xml" => Some(ExampleFormat::Xml),
            "svg" => Some(ExampleFormat::Svg),
            "log" => Some(ExampleFormat::Log),
            "proto" => Some(ExampleFormat::Proto),
            _ => None,
        }
    }

    /// The wire tag for this format
    pub fn as_tag(self) -> &'static str {
        match self {
            ExampleFormat::Json => "json",
            ExampleFormat::Txt => "txt",
            ExampleFormat::Xml => "xml",
            ExampleFormat::Svg => "svg",
            ExampleFormat::Log => "log",
            ExampleFormat::Proto => "proto",
        }
    }

    /// Whether this format carries an opaque (non-JSON) body
    pub fn is_opaque(self) -> bool {
        !matches!(self, ExampleFormat::Json)
    }
}

impl std::fmt::Display for ExampleFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

/// The raw response-example document as served by the metadata endpoint.
///
/// The `example` member is a string even for JSON bodies; the JSON document
/// is nested as text and decoded separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseExample {
    /// Wire format tag
    pub format: String,
    /// Raw example body
    #[serde(default)]
    pub example: String,
}
