//! Side-effect-free queries over the type table
//!
//! Nothing here fails: a query that cannot be answered yields `None`.

use std::rc::Rc;

use crate::features::type_system::domain::{
    CallSignature, DeclarationKind, Env, LiteralValue, Scope, TypeId, TypeNode,
};

use super::TypeTable;

/// Alias/interface chains longer than this are treated as unresolvable
const RESOLVE_BUDGET: u32 = 64;

/// A property after flattening aliases, interfaces and intersections.
///
/// Each declaration carries the scope its type must be read in.
#[derive(Debug, Clone)]
pub struct ResolvedProperty {
    pub name: String,
    pub optional: bool,
    pub declarations: Vec<(TypeId, Scope)>,
}

impl ResolvedProperty {
    pub fn primary(&self) -> Option<(TypeId, &Scope)> {
        self.declarations.first().map(|(ty, scope)| (*ty, scope))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResolvedShape {
    pub properties: Vec<ResolvedProperty>,
    pub call_signatures: Vec<(CallSignature, Scope)>,
}

impl ResolvedShape {
    pub fn property(&self, name: &str) -> Option<&ResolvedProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Endpoint-shaped: has at least one call signature
    pub fn is_callable(&self) -> bool {
        !self.call_signatures.is_empty()
    }

    pub fn property_names(&self) -> Vec<String> {
        self.properties.iter().map(|p| p.name.clone()).collect()
    }

    /// Fold `other` in; same-named properties accumulate declarations and
    /// stay optional only if optional everywhere
    fn merge(&mut self, other: ResolvedShape) {
        for prop in other.properties {
            match self.properties.iter_mut().find(|p| p.name == prop.name) {
                Some(existing) => {
                    existing.optional &= prop.optional;
                    existing.declarations.extend(prop.declarations);
                }
                None => self.properties.push(prop),
            }
        }
        self.call_signatures.extend(other.call_signatures);
    }

    /// Fold in a derived interface's own members. A redeclared property
    /// keeps its inherited position but takes the derived optionality, and
    /// the derived declarations come first.
    fn override_with(&mut self, own: ResolvedShape) {
        for prop in own.properties {
            match self.properties.iter_mut().find(|p| p.name == prop.name) {
                Some(inherited) => {
                    inherited.optional = prop.optional;
                    let base = std::mem::replace(&mut inherited.declarations, prop.declarations);
                    inherited.declarations.extend(base);
                }
                None => self.properties.push(prop),
            }
        }
        let base = std::mem::replace(&mut self.call_signatures, own.call_signatures);
        self.call_signatures.extend(base);
    }

    fn force_optional(&mut self, optional: bool) {
        for prop in &mut self.properties {
            prop.optional = optional;
        }
    }
}

/// Built-in mapped utility, unless the program declares its own type by that name
pub(crate) fn builtin_utility(table: &TypeTable, name: &str, arity: usize) -> bool {
    arity == 1
        && matches!(name, "Required" | "Partial" | "Readonly")
        && table.declaration(name).is_none()
}

/// Flatten the type at `ty` into properties and call signatures.
pub fn resolve_shape(table: &TypeTable, ty: TypeId, scope: &Scope) -> Option<ResolvedShape> {
    resolve_within(table, ty, scope, RESOLVE_BUDGET)
}

fn resolve_within(
    table: &TypeTable,
    ty: TypeId,
    scope: &Scope,
    budget: u32,
) -> Option<ResolvedShape> {
    let budget = budget.checked_sub(1)?;
    match table.node(ty) {
        TypeNode::Object(shape) => Some(ResolvedShape {
            properties: shape
                .properties
                .iter()
                .map(|p| ResolvedProperty {
                    name: p.name.clone(),
                    optional: p.optional,
                    declarations: p
                        .declarations
                        .iter()
                        .map(|t| (*t, Rc::clone(scope)))
                        .collect(),
                })
                .collect(),
            call_signatures: shape
                .call_signatures
                .iter()
                .map(|s| (s.clone(), Rc::clone(scope)))
                .collect(),
        }),
        TypeNode::Param(name) => {
            let (bound, caller) = scope.lookup(name)?;
            resolve_within(table, bound, &caller, budget)
        }
        TypeNode::Intersection(members) => {
            let mut shape = ResolvedShape::default();
            for member in members {
                shape.merge(resolve_within(table, *member, scope, budget)?);
            }
            Some(shape)
        }
        TypeNode::Reference { name, args } => {
            if builtin_utility(table, name, args.len()) {
                let mut shape = resolve_within(table, args[0], scope, budget)?;
                match name.as_str() {
                    "Required" => shape.force_optional(false),
                    "Partial" => shape.force_optional(true),
                    _ => {}
                }
                return Some(shape);
            }
            let decl = table.declaration(name)?;
            let env = Env::bind(&decl.type_params, args, scope);
            match &decl.kind {
                DeclarationKind::Alias { body } => resolve_within(table, *body, &env, budget),
                DeclarationKind::Interface { bodies, extends } => {
                    let mut own = ResolvedShape::default();
                    for body in bodies {
                        own.merge(resolve_within(table, *body, &env, budget)?);
                    }
                    if extends.is_empty() {
                        return Some(own);
                    }
                    let mut shape = ResolvedShape::default();
                    for base in extends {
                        shape.merge(resolve_within(table, *base, &env, budget)?);
                    }
                    shape.override_with(own);
                    Some(shape)
                }
                DeclarationKind::Enum { .. } => None,
            }
        }
        _ => None,
    }
}

/// Literal value of a type, seeing through parameters and plain aliases
fn literal_of(table: &TypeTable, ty: TypeId, scope: &Scope, budget: u32) -> Option<LiteralValue> {
    let budget = budget.checked_sub(1)?;
    match table.node(ty) {
        TypeNode::Literal(value) => Some(value.clone()),
        TypeNode::Param(name) => {
            let (bound, caller) = scope.lookup(name)?;
            literal_of(table, bound, &caller, budget)
        }
        TypeNode::Reference { name, args } => {
            let decl = table.declaration(name)?;
            let DeclarationKind::Alias { body } = &decl.kind else {
                return None;
            };
            let env = Env::bind(&decl.type_params, args, scope);
            literal_of(table, *body, &env, budget)
        }
        _ => None,
    }
}

fn scan_literals<T>(
    table: &TypeTable,
    property: &ResolvedProperty,
    pick: impl Fn(LiteralValue) -> Option<T>,
) -> Option<T> {
    property
        .declarations
        .iter()
        .find_map(|(ty, scope)| literal_of(table, *ty, scope, RESOLVE_BUDGET).and_then(&pick))
}

/// String literal value of a property (primary declaration first)
pub fn literal_string_of(table: &TypeTable, property: &ResolvedProperty) -> Option<String> {
    scan_literals(table, property, |value| match value {
        LiteralValue::Str(s) => Some(s),
        _ => None,
    })
}

/// `true` / `false` literal value of a property (primary declaration first)
pub fn literal_bool_of(table: &TypeTable, property: &ResolvedProperty) -> Option<bool> {
    scan_literals(table, property, |value| value.as_bool())
}

pub fn type_node_of_parameter(signature: &CallSignature, index: usize) -> Option<TypeId> {
    signature.params.get(index)?.ty
}

/// Property names of the type at a parameter position
pub fn property_names_of(table: &TypeTable, ty: TypeId, scope: &Scope) -> Option<Vec<String>> {
    resolve_shape(table, ty, scope).map(|shape| shape.property_names())
}
