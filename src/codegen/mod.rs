//! Code emission
//!
//! Turns field trees and action metadata into Rust source text: one module
//! per endpoint plus the shared client/paging scaffold. Everything here is
//! pure string building over the trees; the network and the filesystem stay
//! outside.

mod ident;
mod render;
mod scaffold;

pub use ident::{doc_text, escape_ident, field_ident, to_pascal_case, to_snake_case};
pub use render::{render_module, render_request_struct, ActionCodegen, GENERATED_HEADER};
pub use scaffold::{module_name, render_client, render_mod, render_paging};

#[cfg(test)]
mod tests;
