//! Parsing Feature
//!
//! Responsible for turning TypeScript source into a tree-sitter syntax tree.
//!
//! ## Structure
//! - `domain/` - ParsedTree
//! - `infrastructure/` - TypeScriptParser, node kind constants

pub mod domain;
pub mod infrastructure;

// Re-exports
pub use domain::ParsedTree;
pub use infrastructure::{node_kinds, Dialect, TypeScriptParser};
