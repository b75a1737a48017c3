//! # introgen
//!
//! Introspection-driven API client generator. Points at a service that
//! describes itself (`/api/webservices/list`-style), fetches one example
//! response per action, infers a normalized field tree from it and emits a
//! typed Rust client.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        GeneratorEngine                          │
//! │   one task per service · actions sequential · files on disk    │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬─────────────┐
//! │  Fetch   │  Decode   │    Schema     │  Paging   │   Codegen   │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────────┤
//! │ metadata │ envelope  │ classify      │ extract   │ requests    │
//! │ examples │ json/txt/ │ unify arrays  │ project   │ responses   │
//! │ retry    │ xml/svg/  │ overrides     │ strip     │ services    │
//! │ backoff  │ log/proto │ sort keys     │ paging    │ scaffold    │
//! └──────────┴───────────┴───────────────┴───────────┴─────────────┘
//! ```
//!
//! The schema engine is a pure transform: for a fixed example document it
//! produces bit-for-bit identical output across runs, even though the remote
//! document's key order is not stable. Override rules are loaded once at
//! startup and shared read-only across service tasks.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::match_same_arms)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the generator
pub mod error;

/// Introspection metadata model
pub mod metadata;

/// Schema inference from example documents
pub mod schema;

/// Override rules applied during inference
pub mod overrides;

/// Pagination projection for paging-capable actions
pub mod paging;

/// Response example envelope decoding
pub mod decode;

/// Metadata and example fetching
pub mod fetch;

/// Code emission
pub mod codegen;

/// Generation engine
pub mod engine;

/// Generator configuration
pub mod config;

/// Template interpolation for scaffold files
pub mod template;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::GeneratorConfig;
pub use engine::{GenStats, GeneratorEngine};
pub use error::{Error, Result};
pub use overrides::{OverrideRegistry, OverrideView};
pub use schema::{Field, ScalarKind, SchemaParser};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
