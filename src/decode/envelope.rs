//! Response example decoding
//!
//! Turns the raw `{format, example}` document served by the metadata
//! endpoint into the value handed to the schema parser: either the decoded
//! JSON example itself, or a synthetic `{format, example}` envelope for
//! opaque (non-JSON) bodies.

use serde_json::{json, Value};

use super::types::{ExampleFormat, ResponseExample};
use crate::error::{Error, Result};

/// Decode a raw response-example body.
///
/// A format tag outside the known set is a fatal fetch-level error for the
/// action; it never reaches the schema parser.
pub fn decode_example(body: &str) -> Result<Value> {
    let raw: ResponseExample = serde_json::from_str(body)?;
    decode_response_example(&raw)
}

/// Decode an already-parsed response-example document
pub fn decode_response_example(raw: &ResponseExample) -> Result<Value> {
    let format = ExampleFormat::from_tag(&raw.format)
        .ok_or_else(|| Error::unsupported_format(&raw.format))?;

    if format.is_opaque() {
        // Wrap the raw text so the parser's escape hatch produces a single
        // opaque-text leaf.
        return Ok(json!({
            "format": format.as_tag(),
            "example": raw.example,
        }));
    }

    // The example member is a string containing the JSON document.
    Ok(serde_json::from_str(&raw.example)?)
}
