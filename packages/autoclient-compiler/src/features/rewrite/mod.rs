//! Rewrite Feature
//!
//! Finds calls to the marker entry points and replaces them with generated
//! code in a single pre-order pass over the syntax tree.
//!
//! ## Structure
//! - `domain/` - EntryPoint, CallSite
//! - `infrastructure/` - MarkerImports (callee recognition), RewriteDriver

pub mod domain;
pub mod infrastructure;

pub use domain::{CallSite, EntryPoint};
pub use infrastructure::{MarkerImports, RewriteDriver, RewriteOutput};
