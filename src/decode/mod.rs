//! Response example decoding
//!
//! The metadata endpoint serves each action's example as a
//! `{format, example}` document where `example` is always a string. JSON
//! examples are decoded into a value; `txt`/`xml`/`svg`/`log`/`proto` bodies
//! are re-wrapped into a synthetic envelope that the schema parser collapses
//! to an opaque-text leaf. Anything else is an `UnsupportedFormat` error.

mod envelope;
mod types;

pub use envelope::{decode_example, decode_response_example};
pub use types::{ExampleFormat, ResponseExample};
