//! Type System Feature
//!
//! The "host type system" the compiler reads: an append-only arena of
//! structural type nodes, a table of named declarations lowered from the
//! program, and side-effect-free introspection helpers over both.
//!
//! ## Structure
//! - `domain/` - TypeNode, TypeArena, Declaration, Env, rendering
//! - `infrastructure/` - lowering from tree-sitter, TypeTable, introspection

pub mod domain;
pub mod infrastructure;

pub use domain::*;
pub use infrastructure::{introspection, ResolvedProperty, ResolvedShape, TypeLowering, TypeTable};
