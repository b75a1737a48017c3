//! Pagination projection for paging-capable actions
//!
//! Applies only when an action declares both a page-index and a page-size
//! request parameter. Consumes the primary field tree and derives the paging
//! source plus the collection-only schema used by the generated `*_all`
//! auto-pagination methods.

mod projector;

pub use projector::{
    extract_paging_field, project_collection_schema, PagingSource, PAGING_ACCESSOR, PAGING_KEY,
    TOTAL_KEY,
};

#[cfg(test)]
mod tests;
