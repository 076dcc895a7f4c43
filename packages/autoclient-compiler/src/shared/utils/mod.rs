//! Shared utilities

pub mod js;
pub mod tree_sitter;
