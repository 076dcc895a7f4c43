//! Shared module - Common types and utilities
//!
//! Types shared across all features. Only `utils::tree_sitter` touches the
//! parser crate.

pub mod models;
pub mod utils;

// Re-exports for convenience
pub use models::*;
