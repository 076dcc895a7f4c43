//! Generic parameter environments
//!
//! An environment binds the declared parameters of one alias/interface to
//! the type arguments of the reference being expanded. Arguments were written
//! in the caller's scope, so each environment keeps a link to it: looking up
//! `T` yields the bound type *and* the scope it must be interpreted in.
//!
//! Environments are immutable and shared through `Rc`; a declaration body only
//! ever sees its own parameters.

use std::rc::Rc;

use super::arena::TypeId;

pub type Scope = Rc<Env>;

#[derive(Debug, Default)]
pub struct Env {
    bindings: Vec<(String, TypeId)>,
    caller: Option<Scope>,
}

impl Env {
    /// Scope with no bindings (top level of a call site)
    pub fn root() -> Scope {
        Rc::new(Env::default())
    }

    /// Bind `params` positionally to `args`; surplus params stay unbound
    pub fn bind(params: &[String], args: &[TypeId], caller: &Scope) -> Scope {
        let bindings = params
            .iter()
            .zip(args.iter())
            .map(|(name, ty)| (name.clone(), *ty))
            .collect();
        Rc::new(Env {
            bindings,
            caller: Some(Rc::clone(caller)),
        })
    }

    /// Resolve a parameter to its argument and the scope the argument lives in
    pub fn lookup(&self, name: &str) -> Option<(TypeId, Scope)> {
        let (_, ty) = self.bindings.iter().find(|(n, _)| n == name)?;
        let scope = self.caller.clone().unwrap_or_else(Env::root);
        Some((*ty, scope))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::type_system::domain::{PrimitiveKind, TypeArena};

    #[test]
    fn test_positional_binding() {
        let mut arena = TypeArena::new();
        let s = arena.primitive(PrimitiveKind::String);
        let n = arena.primitive(PrimitiveKind::Number);

        let root = Env::root();
        let env = Env::bind(&["K".to_string(), "V".to_string()], &[s, n], &root);

        assert_eq!(env.lookup("K").map(|(t, _)| t), Some(s));
        assert_eq!(env.lookup("V").map(|(t, _)| t), Some(n));
        assert!(env.lookup("W").is_none());
    }

    #[test]
    fn test_missing_arguments_stay_unbound() {
        let mut arena = TypeArena::new();
        let s = arena.primitive(PrimitiveKind::String);
        let env = Env::bind(&["A".to_string(), "B".to_string()], &[s], &Env::root());
        assert_eq!(env.lookup("A").map(|(t, _)| t), Some(s));
        assert!(env.lookup("B").is_none());
    }

    #[test]
    fn test_lookup_returns_caller_scope() {
        let mut arena = TypeArena::new();
        let s = arena.primitive(PrimitiveKind::String);
        let outer = Env::bind(&["T".to_string()], &[s], &Env::root());
        let t_ref = arena.alloc(crate::features::type_system::domain::TypeNode::Param("T".into()));
        let inner = Env::bind(&["U".to_string()], &[t_ref], &outer);

        let (bound, scope) = inner.lookup("U").unwrap();
        assert_eq!(bound, t_ref);
        // `T` resolves in the caller's scope, not the inner one
        assert_eq!(scope.lookup("T").map(|(t, _)| t), Some(s));
        assert!(inner.lookup("T").is_none());
    }
}
