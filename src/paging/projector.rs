//! Pagination projection
//!
//! Derives, from a paging-capable action's primary field tree, (a) the field
//! used to extract paging metadata and (b) a second schema with pagination
//! artifacts stripped. The projector never mutates the source tree; the
//! projected schema is a new tree, so the full-response schema remains
//! available for paging-field extraction afterward.

use crate::metadata::{PAGE_INDEX_PARAM, PAGE_SIZE_PARAM};
use crate::schema::{Field, MapField};

/// Original key of the nested paging-metadata object
pub const PAGING_KEY: &str = "paging";
/// Rendered accessor of the nested paging-metadata object
pub const PAGING_ACCESSOR: &str = "Paging";
/// Original key of the flattened total count
pub const TOTAL_KEY: &str = "total";

/// Where an action's paging metadata lives in its response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagingSource {
    /// The API nests paging under a sub-object; `accessor` names the child
    Nested {
        /// Accessor of the paging child on the primary tree
        accessor: String,
    },
    /// Paging is synthesized from flattened top-level fields. Each accessor
    /// is present only when the primary tree carries that field; an all-empty
    /// source still lets the emitter render a default paging literal.
    Flattened {
        /// Accessor of the flattened page index, if present
        page: Option<String>,
        /// Accessor of the flattened page size, if present
        page_size: Option<String>,
        /// Accessor of the flattened total count, if present
        total: Option<String>,
    },
}

/// Locate the paging metadata on a primary response tree.
///
/// Returns `None` for non-Map roots: a scalar or collection response cannot
/// be paginated and the caller must skip paging-aware generation.
pub fn extract_paging_field(tree: &Field) -> Option<PagingSource> {
    let map = tree.as_map()?;

    if map.get(PAGING_ACCESSOR).is_some() {
        return Some(PagingSource::Nested {
            accessor: PAGING_ACCESSOR.to_string(),
        });
    }

    let accessor_of = |key: &str| map.get_key(key).map(|e| e.accessor.clone());
    Some(PagingSource::Flattened {
        page: accessor_of(PAGE_INDEX_PARAM),
        page_size: accessor_of(PAGE_SIZE_PARAM),
        total: accessor_of(TOTAL_KEY),
    })
}

/// Build the collection-only schema for auto-pagination.
///
/// The projected tree equals the primary tree minus the paging-metadata key
/// and the flattened page-index/page-size/total-count keys; it represents the
/// payload shape accumulated across all pages. Returns `None` for non-Map
/// roots.
pub fn project_collection_schema(tree: &Field, name: &str) -> Option<MapField> {
    let map = tree.as_map()?;

    let entries = map
        .entries()
        .iter()
        .filter(|e| {
            !matches!(
                e.key.as_str(),
                PAGING_KEY | PAGE_INDEX_PARAM | PAGE_SIZE_PARAM | TOTAL_KEY
            )
        })
        .cloned()
        .collect();

    Some(MapField::new(name, entries))
}
