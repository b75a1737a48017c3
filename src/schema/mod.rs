//! Schema inference
//!
//! Turns one example document (or a non-JSON opaque payload) into a
//! normalized, deterministic field tree.
//!
//! # Features
//!
//! - **Scalar classification**: strings, numbers, booleans, nulls
//! - **Array unification**: superset maps across heterogeneous elements
//! - **Override application**: per-action force-type/rename/skip/optional
//! - **Deterministic output**: sorted-by-key map children, stable accessors
//!
//! The parser never fails on well-formed JSON; the only inference error is a
//! `ShapeConflict` when array elements disagree in their top-level kind.

mod field;
mod parser;

pub use field::{CollectionField, Field, MapEntry, MapField, ScalarField, ScalarKind};
pub use parser::{SchemaParser, FORMAT_KEY};
