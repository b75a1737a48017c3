//! Override rule registry
//!
//! Holds the full set of per-(endpoint, action, field-path) rules and
//! partitions it on demand into an action-scoped, read-only view.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::schema::ScalarKind;

/// What an override rule does to the field it targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleKind {
    /// Short-circuit recursion and use the given leaf kind
    ForceType {
        /// Forced leaf kind
        kind: ScalarKind,
    },
    /// Use the given name as the rendered accessor; the original key still
    /// drives matching and wire (de)serialization
    Rename {
        /// New accessor name
        name: String,
    },
    /// Omit the field entirely
    Skip,
    /// Mark the field optional even when the example always carries it
    Optional,
}

/// One override rule, identified by (endpoint, action key, dotted field path)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRule {
    /// Endpoint key the rule applies to
    pub endpoint: String,
    /// Action key the rule applies to
    pub action: String,
    /// Dotted field path within the action's example document
    pub path: String,
    /// The rule itself
    #[serde(flatten)]
    pub rule: RuleKind,
}

/// The full, immutable set of override rules.
///
/// Built once at process start and never mutated afterward; this is what
/// makes concurrent per-service access safe without locks. A rule whose path
/// never occurs in an example is silently unused, since example-driven
/// schemas vary release to release.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverrideRegistry {
    /// All loaded rules
    #[serde(default)]
    rules: Vec<OverrideRule>,
}

impl OverrideRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry from a rule list
    pub fn from_rules(rules: Vec<OverrideRule>) -> Self {
        Self { rules }
    }

    /// Parse a registry from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a registry from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Number of loaded rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the registry holds no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Partition the registry into a view scoped to one action.
    ///
    /// Returns an empty view when no rules match; never an error.
    pub fn filter(&self, endpoint: &str, action: &str) -> OverrideView {
        let rules = self
            .rules
            .iter()
            .filter(|r| r.endpoint == endpoint && r.action == action)
            .map(|r| (r.path.clone(), r.rule.clone()))
            .collect();
        OverrideView { rules }
    }
}

/// Read-only override lookup scoped to one action, keyed by dotted field path
#[derive(Debug, Clone, Default)]
pub struct OverrideView {
    rules: Vec<(String, RuleKind)>,
}

impl OverrideView {
    /// A view with no rules
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of rules in scope
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the view holds no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether a skip rule targets the given path
    pub fn is_skipped(&self, path: &str) -> bool {
        self.matching(path).any(|r| matches!(r, RuleKind::Skip))
    }

    /// Whether an optional rule targets the given path
    pub fn is_optional(&self, path: &str) -> bool {
        self.matching(path).any(|r| matches!(r, RuleKind::Optional))
    }

    /// The rename accessor for the given path, if any
    pub fn rename(&self, path: &str) -> Option<String> {
        self.matching(path).find_map(|r| match r {
            RuleKind::Rename { name } => Some(name.clone()),
            _ => None,
        })
    }

    /// The forced leaf kind for the given path, if any
    pub fn forced_kind(&self, path: &str) -> Option<ScalarKind> {
        self.matching(path).find_map(|r| match r {
            RuleKind::ForceType { kind } => Some(*kind),
            _ => None,
        })
    }

    fn matching<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a RuleKind> {
        self.rules
            .iter()
            .filter(move |(p, _)| p.as_str() == path)
            .map(|(_, r)| r)
    }
}
