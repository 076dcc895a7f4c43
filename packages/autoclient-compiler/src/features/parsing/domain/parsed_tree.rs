//! Parsed tree representation
//!
//! Owns the source text together with its syntax tree so nodes can be
//! resolved back to text for the whole lifetime of a compile.

use tree_sitter::{Node, Tree};

use crate::features::parsing::infrastructure::Dialect;

/// Parsed syntax tree
#[derive(Debug, Clone)]
pub struct ParsedTree {
    tree: Tree,

    /// Source code
    pub source: String,

    /// File path (for diagnostics)
    pub file_path: String,

    pub dialect: Dialect,
}

impl ParsedTree {
    pub fn new(tree: Tree, source: String, file_path: String, dialect: Dialect) -> Self {
        Self {
            tree,
            source,
            file_path,
            dialect,
        }
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }
}
