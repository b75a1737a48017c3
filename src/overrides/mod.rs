//! Override rules
//!
//! Manually curated exceptions applied during schema inference to correct,
//! rename, or suppress fields the raw example would otherwise produce.
//!
//! The registry is loaded once at startup (from a YAML rule file) and shared
//! read-only across concurrent service tasks; `filter` carves out the rules
//! for a single (endpoint, action) pair.

mod registry;

pub use registry::{OverrideRegistry, OverrideRule, OverrideView, RuleKind};

#[cfg(test)]
mod tests;
