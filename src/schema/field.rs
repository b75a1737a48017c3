//! Field model
//!
//! The normalized, typed representation of a response shape, built from a
//! single example document. Every consumer (emitter, pagination projector,
//! accessor enumerator) dispatches over the closed `Field` enum.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codegen::to_pascal_case;

/// Semantic kind of a scalar leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    /// JSON string
    String,
    /// JSON number; no int/float disambiguation from a single sample
    Number,
    /// JSON boolean
    Boolean,
    /// Opaque text payload (non-JSON response bodies, widened conflicts)
    Text,
    /// Null or absent; rendered as an unconstrained type downstream
    Unknown,
}

impl ScalarKind {
    /// Classify a single decoded JSON scalar.
    ///
    /// Objects and arrays are never routed here; they belong to the schema
    /// parser. A non-scalar value classifies as `Unknown`.
    pub fn classify(value: &Value) -> ScalarKind {
        match value {
            Value::String(_) => ScalarKind::String,
            Value::Number(_) => ScalarKind::Number,
            Value::Bool(_) => ScalarKind::Boolean,
            _ => ScalarKind::Unknown,
        }
    }

    /// Unify two scalar classifications from sibling array elements.
    ///
    /// `Unknown` (null) absorbs into any concrete kind; disagreeing concrete
    /// kinds widen to `Text` rather than failing.
    pub fn unify(self, other: ScalarKind) -> ScalarKind {
        match (self, other) {
            (a, b) if a == b => a,
            (ScalarKind::Unknown, b) => b,
            (a, ScalarKind::Unknown) => a,
            _ => ScalarKind::Text,
        }
    }
}

impl std::fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalarKind::String => write!(f, "string"),
            ScalarKind::Number => write!(f, "number"),
            ScalarKind::Boolean => write!(f, "boolean"),
            ScalarKind::Text => write!(f, "text"),
            ScalarKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// A leaf field
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    /// Display name of this leaf
    pub name: String,
    /// Semantic kind
    pub kind: ScalarKind,
}

impl ScalarField {
    /// Create a new scalar field
    pub fn new(name: impl Into<String>, kind: ScalarKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// One child of a `MapField`
#[derive(Debug, Clone, PartialEq)]
pub struct MapEntry {
    /// Original JSON key; used for override matching and wire (de)serialization
    pub key: String,
    /// Rendered accessor name (PascalCase of the key, or an override rename)
    pub accessor: String,
    /// Child field
    pub field: Field,
    /// Whether the key was present in every observed occurrence
    pub required: bool,
}

impl MapEntry {
    /// Create an entry with the accessor derived from the key
    pub fn new(key: impl Into<String>, field: Field, required: bool) -> Self {
        let key = key.into();
        let accessor = to_pascal_case(&key);
        Self {
            key,
            accessor,
            field,
            required,
        }
    }

    /// Create an entry with an explicit accessor (override rename)
    pub fn renamed(
        key: impl Into<String>,
        accessor: impl Into<String>,
        field: Field,
        required: bool,
    ) -> Self {
        Self {
            key: key.into(),
            accessor: accessor.into(),
            field,
            required,
        }
    }
}

/// An ordered-for-output, name-unique set of child fields
#[derive(Debug, Clone, PartialEq)]
pub struct MapField {
    /// Display name of this map
    pub name: String,
    entries: Vec<MapEntry>,
}

impl MapField {
    /// Build a map from its children.
    ///
    /// Children are sorted by original key because the source document's key
    /// order is not guaranteed stable across fetches. Accessor collisions
    /// after renaming (e.g. `id` and `ID` both rendering as `Id`) are
    /// resolved by appending a numeric suffix in sorted-key order, so
    /// construction never fails on well-formed JSON.
    pub fn new(name: impl Into<String>, mut entries: Vec<MapEntry>) -> Self {
        entries.sort_by(|a, b| a.key.cmp(&b.key));

        let mut seen: Vec<String> = Vec::with_capacity(entries.len());
        for entry in &mut entries {
            if seen.contains(&entry.accessor) {
                let mut n = 2;
                while seen.contains(&format!("{}{n}", entry.accessor)) {
                    n += 1;
                }
                entry.accessor = format!("{}{n}", entry.accessor);
            }
            seen.push(entry.accessor.clone());
        }

        Self {
            name: name.into(),
            entries,
        }
    }

    /// Children in sorted-by-key order
    pub fn entries(&self) -> &[MapEntry] {
        &self.entries
    }

    /// Rendered accessor names, in output order
    pub fn accessors(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.accessor.as_str()).collect()
    }

    /// Look up a child by rendered accessor
    pub fn get(&self, accessor: &str) -> Option<&MapEntry> {
        self.entries.iter().find(|e| e.accessor == accessor)
    }

    /// Look up a child by original JSON key
    pub fn get_key(&self, key: &str) -> Option<&MapEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Whether a child with the given original key exists
    pub fn contains_key(&self, key: &str) -> bool {
        self.get_key(key).is_some()
    }
}

/// Wraps the unified element type of a JSON array
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionField {
    /// Display name of this collection
    pub name: String,
    /// Unified element field
    pub element: Box<Field>,
}

impl CollectionField {
    /// Create a new collection field
    pub fn new(name: impl Into<String>, element: Field) -> Self {
        Self {
            name: name.into(),
            element: Box::new(element),
        }
    }
}

/// A node of the field tree
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// A leaf value
    Scalar(ScalarField),
    /// A JSON object
    Map(MapField),
    /// A JSON array with a unified element type
    Collection(CollectionField),
    /// No response schema; never renders output
    Empty,
}

impl Field {
    /// Display name of this node
    pub fn name(&self) -> &str {
        match self {
            Field::Scalar(f) => &f.name,
            Field::Map(f) => &f.name,
            Field::Collection(f) => &f.name,
            Field::Empty => "",
        }
    }

    /// Whether this is the empty sentinel
    pub fn is_empty(&self) -> bool {
        matches!(self, Field::Empty)
    }

    /// The map behind this node, if it is one
    pub fn as_map(&self) -> Option<&MapField> {
        match self {
            Field::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Short label of the variant, for diagnostics
    pub fn kind_label(&self) -> &'static str {
        match self {
            Field::Scalar(_) => "scalar",
            Field::Map(_) => "map",
            Field::Collection(_) => "collection",
            Field::Empty => "empty",
        }
    }
}
