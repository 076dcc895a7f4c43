//! A recognized entry point call, ready to be replaced

use crate::features::type_system::TypeId;
use crate::shared::models::Span;

use super::EntryPoint;

#[derive(Debug, Clone)]
pub struct CallSite {
    pub entry: EntryPoint,
    /// The call's single type argument, lowered into the arena
    pub type_arg: TypeId,
    /// Value arguments as rewritten source text
    pub args: Vec<String>,
    pub span: Span,
}

impl CallSite {
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}
