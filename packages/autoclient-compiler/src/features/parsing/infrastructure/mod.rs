//! Parsing infrastructure (tree-sitter lives here)

pub mod node_kinds;
mod parser;

pub use parser::{Dialect, TypeScriptParser};
