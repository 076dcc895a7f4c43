//! Program pipeline
//!
//! ```text
//! inputs ──load──▶ parse (tree-sitter) ──collect──▶ TypeTable
//!                                                     │
//!            RewrittenFile ◀──RewriteDriver (per file)┘
//! ```
//!
//! All declarations are collected before any file is rewritten, so call
//! sites may name types declared in other files.

mod program;
mod report;

pub use program::{transform_source, Program, RewrittenFile};
pub use report::{FileReport, TransformReport};
