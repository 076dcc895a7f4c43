//! Validator synthesis domain models

mod validator_expr;

pub use validator_expr::{ObjectKind, ValidatorExpr};
