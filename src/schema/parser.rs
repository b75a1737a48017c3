//! Schema parser
//!
//! Recursive-descent builder that walks an example document and produces a
//! `Field` tree, consulting the action-scoped override view at each node.
//!
//! The parser is a pure, synchronous transform over an already-materialized
//! example value. For a fixed input document its output is deterministic:
//! map children are produced in sorted-key order regardless of the decoded
//! object's iteration order, and array elements are scanned in sequence
//! order.

use serde_json::{Map, Value};

use super::field::{CollectionField, Field, MapEntry, MapField, ScalarField, ScalarKind};
use crate::error::{Error, Result};
use crate::overrides::OverrideView;

/// Key that marks a synthetic `{format, example}` envelope.
///
/// Non-JSON response bodies (txt, xml, svg, log, proto) are wrapped into this
/// envelope upstream. A genuine JSON object using `format` as a top-level key
/// takes the same escape hatch; the collision is inherent to the envelope
/// design and is pinned by tests rather than special-cased.
pub const FORMAT_KEY: &str = "format";

/// Recursive-descent schema parser for one action's example document
#[derive(Debug)]
pub struct SchemaParser<'a> {
    overrides: &'a OverrideView,
}

impl<'a> SchemaParser<'a> {
    /// Create a parser bound to an action-scoped override view
    pub fn new(overrides: &'a OverrideView) -> Self {
        Self { overrides }
    }

    /// Parse an example document into a field tree.
    ///
    /// The opaque-payload escape hatch applies only here, at the document
    /// root: an object carrying a top-level `format` key parses to a single
    /// opaque-text leaf without descending into its keys.
    pub fn parse(&self, name: &str, example: &Value) -> Result<Field> {
        if let Value::Object(map) = example {
            if map.contains_key(FORMAT_KEY) {
                return Ok(Field::Scalar(ScalarField::new(name, ScalarKind::Text)));
            }
        }
        self.parse_value(name, "", example)
    }

    /// Parse any value below the root (no escape hatch)
    fn parse_value(&self, name: &str, path: &str, value: &Value) -> Result<Field> {
        match value {
            Value::Object(map) => self.parse_object(name, path, map),
            Value::Array(items) => {
                let element = self.unify_elements(name, path, items)?;
                Ok(Field::Collection(CollectionField::new(name, element)))
            }
            scalar => Ok(Field::Scalar(ScalarField::new(
                name,
                ScalarKind::classify(scalar),
            ))),
        }
    }

    /// Parse a JSON object into a `MapField`, applying overrides per key
    fn parse_object(&self, name: &str, path: &str, map: &Map<String, Value>) -> Result<Field> {
        let mut keys: Vec<&String> = map.keys().collect();
        keys.sort();

        let mut entries = Vec::with_capacity(keys.len());
        for key in keys {
            let child_path = join_path(path, key);
            if self.overrides.is_skipped(&child_path) {
                continue;
            }

            let required = !self.overrides.is_optional(&child_path);

            let field = if let Some(kind) = self.overrides.forced_kind(&child_path) {
                // Forced leaf kind short-circuits recursion entirely
                Field::Scalar(ScalarField::new(key.clone(), kind))
            } else {
                self.parse_value(key, &child_path, &map[key.as_str()])?
            };

            let entry = match self.overrides.rename(&child_path) {
                Some(accessor) => MapEntry::renamed(key.clone(), accessor, field, required),
                None => MapEntry::new(key.clone(), field, required),
            };
            entries.push(entry);
        }

        Ok(Field::Map(MapField::new(name, entries)))
    }

    /// Unify the elements of a JSON array into a single element field.
    ///
    /// Elements are scanned in their original sequence order. All elements
    /// must share a top-level JSON kind; a scalar next to an object (or an
    /// array next to either) is a diagnosable `ShapeConflict`, never a
    /// silent coercion.
    fn unify_elements(&self, name: &str, path: &str, items: &[Value]) -> Result<Field> {
        if items.is_empty() {
            return Ok(Field::Scalar(ScalarField::new(name, ScalarKind::Unknown)));
        }

        let mut scalars = 0usize;
        let mut objects = 0usize;
        let mut arrays = 0usize;
        for item in items {
            match item {
                Value::Object(_) => objects += 1,
                Value::Array(_) => arrays += 1,
                _ => scalars += 1,
            }
        }

        let mixed = [scalars, objects, arrays].iter().filter(|&&n| n > 0).count() > 1;
        if mixed {
            return Err(Error::shape_conflict(
                display_path(path, name),
                format!(
                    "array mixes element kinds ({scalars} scalar, {objects} object, {arrays} array)"
                ),
            ));
        }

        if objects > 0 {
            return self.unify_object_elements(name, path, items);
        }

        if arrays > 0 {
            // Arrays of arrays: unify each element as a collection, then
            // unify those collections element-wise.
            let mut unified: Option<Field> = None;
            for item in items {
                let parsed = self.parse_value(name, path, item)?;
                unified = Some(match unified {
                    Some(prev) => unify_fields(prev, parsed),
                    None => parsed,
                });
            }
            return Ok(unified.unwrap_or(Field::Scalar(ScalarField::new(
                name,
                ScalarKind::Unknown,
            ))));
        }

        // All scalars: classify each and widen on disagreement
        let mut kind = ScalarKind::classify(&items[0]);
        for item in &items[1..] {
            kind = kind.unify(ScalarKind::classify(item));
        }
        Ok(Field::Scalar(ScalarField::new(name, kind)))
    }

    /// Merge object elements into the superset map.
    ///
    /// The unified map contains the union of all keys seen across every
    /// element; a key present in every element stays required, any other key
    /// is optional. Child types for a shared key are unified recursively.
    fn unify_object_elements(&self, name: &str, path: &str, items: &[Value]) -> Result<Field> {
        let mut merged: Option<MapField> = None;
        for item in items {
            let Value::Object(map) = item else {
                // unify_elements guarantees homogeneous object elements
                continue;
            };
            let Field::Map(parsed) = self.parse_object(name, path, map)? else {
                continue;
            };
            merged = Some(match merged {
                Some(prev) => merge_maps(prev, parsed),
                None => parsed,
            });
        }

        Ok(match merged {
            Some(map) => Field::Map(map),
            None => Field::Scalar(ScalarField::new(name, ScalarKind::Unknown)),
        })
    }
}

/// Merge two sibling map shapes into their superset.
///
/// Keys present in both sides stay required only if required on both; keys
/// present on one side become optional. Shared children are unified.
fn merge_maps(a: MapField, b: MapField) -> MapField {
    let name = a.name.clone();
    let mut b_entries: Vec<MapEntry> = b.entries().to_vec();
    let mut merged: Vec<MapEntry> = Vec::with_capacity(a.entries().len() + b_entries.len());

    for a_entry in a.entries().iter().cloned() {
        if let Some(pos) = b_entries.iter().position(|e| e.key == a_entry.key) {
            let b_entry = b_entries.remove(pos);
            merged.push(MapEntry {
                key: a_entry.key,
                accessor: a_entry.accessor,
                required: a_entry.required && b_entry.required,
                field: unify_fields(a_entry.field, b_entry.field),
            });
        } else {
            merged.push(MapEntry {
                required: false,
                ..a_entry
            });
        }
    }

    for b_entry in b_entries {
        merged.push(MapEntry {
            required: false,
            ..b_entry
        });
    }

    MapField::new(name, merged)
}

/// Unify two fields inferred for the same position.
///
/// Same-variant pairs unify structurally; conflicting variants degrade to an
/// opaque text leaf rather than failing, since nested disagreement between
/// samples is common in release-to-release example drift.
fn unify_fields(a: Field, b: Field) -> Field {
    match (a, b) {
        (Field::Scalar(x), Field::Scalar(y)) => {
            Field::Scalar(ScalarField::new(x.name, x.kind.unify(y.kind)))
        }
        (Field::Map(x), Field::Map(y)) => Field::Map(merge_maps(x, y)),
        (Field::Collection(x), Field::Collection(y)) => {
            let element = unify_fields(*x.element, *y.element);
            Field::Collection(CollectionField::new(x.name, element))
        }
        (Field::Empty, other) | (other, Field::Empty) => other,
        (x, _) => Field::Scalar(ScalarField::new(x.name().to_string(), ScalarKind::Text)),
    }
}

/// Join a dotted field path with a child key
fn join_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

/// Path shown in diagnostics; falls back to the node name at the root
fn display_path(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        path.to_string()
    }
}
