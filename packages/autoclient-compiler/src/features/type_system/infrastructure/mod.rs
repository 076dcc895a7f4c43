//! Type system infrastructure

pub mod introspection;
mod lowering;
mod type_table;

pub use introspection::{ResolvedProperty, ResolvedShape};
pub use lowering::TypeLowering;
pub use type_table::TypeTable;
