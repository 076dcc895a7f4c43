//! Validator Synthesis Feature
//!
//! Compiles a structural type into a validator expression over the
//! validator DSL (`V.String`, `V.Or(...)`, `new V({...})`, ...).
//!
//! ## Structure
//! - `domain/` - ValidatorExpr, ObjectKind
//! - `infrastructure/` - Synthesizer (type-directed dispatch)
//! - `error.rs` - SynthesisError

pub mod domain;
mod error;
pub mod infrastructure;

pub use domain::{ObjectKind, ValidatorExpr};
pub use error::{SynthesisError, SynthesisResult};
pub use infrastructure::{SynthesisOptions, Synthesizer};
