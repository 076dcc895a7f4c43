//! Feature modules
//!
//! Leaves first:
//! - `parsing`               - tree-sitter TypeScript front end
//! - `type_system`           - arena-backed type graph, declaration table, introspection
//! - `validator_synthesis`   - type → validator expression compiler
//! - `descriptor_extraction` - endpoint descriptor extraction and output shapes
//! - `rewrite`               - call site recognition and program rewriting

pub mod descriptor_extraction;
pub mod parsing;
pub mod rewrite;
pub mod type_system;
pub mod validator_synthesis;
