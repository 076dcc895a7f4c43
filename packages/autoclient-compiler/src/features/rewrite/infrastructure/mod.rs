//! Rewrite infrastructure

mod driver;
mod imports;

pub use driver::{RewriteDriver, RewriteOutput};
pub use imports::MarkerImports;
