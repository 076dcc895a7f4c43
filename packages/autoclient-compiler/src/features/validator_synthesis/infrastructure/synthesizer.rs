//! Type-directed validator synthesis
//!
//! One exhaustive match over [`TypeNode`]. Named references dispatch in a
//! fixed order: mapped utilities (`Required`, `Partial`, `Readonly`), then
//! built-in generics (`Array`, `Record`), then program declarations
//! (interface, enum, alias). Unknown names and unmodelled syntax are fatal.
//!
//! `Ok(None)` means "no contribution": a `Required<T>`/`Partial<T>` whose
//! argument has no resolvable shape. Object fields and union/intersection
//! operands with no contribution are dropped.

use tracing::{debug, warn};

use crate::features::type_system::introspection::{builtin_utility, resolve_shape};
use crate::features::type_system::{
    render_type, DeclarationKind, EnumInitializer, Env, PrimitiveKind, ResolvedShape, Scope,
    TypeId, TypeNode, TypeTable,
};
use crate::features::validator_synthesis::domain::{ObjectKind, ValidatorExpr};
use crate::features::validator_synthesis::{SynthesisError, SynthesisResult};

pub const DEFAULT_MAX_DEPTH: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthesisOptions {
    /// Nesting limit for type expansion; self-referential aliases hit it
    pub max_depth: u32,
    /// Attach rendered type labels to `Or` / `And`
    pub label_unions: bool,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            label_unions: true,
        }
    }
}

pub struct Synthesizer<'t> {
    table: &'t TypeTable,
    options: SynthesisOptions,
}

impl<'t> Synthesizer<'t> {
    pub fn new(table: &'t TypeTable, options: SynthesisOptions) -> Self {
        Self { table, options }
    }

    pub fn synthesize(&self, ty: TypeId, scope: &Scope) -> SynthesisResult<Option<ValidatorExpr>> {
        self.visit(ty, scope, 0)
    }

    fn visit(&self, ty: TypeId, scope: &Scope, depth: u32) -> SynthesisResult<Option<ValidatorExpr>> {
        if depth >= self.options.max_depth {
            return Err(SynthesisError::DepthExceeded {
                limit: self.options.max_depth,
                text: self.render(ty),
            });
        }
        let depth = depth + 1;

        match self.table.node(ty) {
            TypeNode::Union(members) => {
                let mut stripped = false;
                let mut operands = Vec::with_capacity(members.len());
                for member in members {
                    if self.table.node(*member).is_undefined() {
                        stripped = true;
                        continue;
                    }
                    if let Some(operand) = self.visit(*member, scope, depth)? {
                        operands.push(operand);
                    }
                }
                let or = ValidatorExpr::Or {
                    label: self.label(ty),
                    operands,
                };
                Ok(Some(if stripped {
                    ValidatorExpr::optional(or)
                } else {
                    or
                }))
            }
            TypeNode::Intersection(members) => {
                let mut operands = Vec::with_capacity(members.len());
                for member in members {
                    if let Some(operand) = self.visit(*member, scope, depth)? {
                        operands.push(operand);
                    }
                }
                Ok(Some(ValidatorExpr::And {
                    label: self.label(ty),
                    operands,
                }))
            }
            TypeNode::EnumMember { enum_name, member } => {
                self.enum_member(enum_name, member).map(Some)
            }
            TypeNode::Literal(value) => Ok(Some(ValidatorExpr::StrictValue(value.clone()))),
            TypeNode::Array(element) => self.array_of(*element, scope, depth),
            TypeNode::Primitive(kind) => Ok(Some(primitive(*kind))),
            TypeNode::Reference { name, args } => self.reference(ty, name, args, scope, depth),
            TypeNode::Param(name) => match scope.lookup(name) {
                Some((bound, caller)) => self.visit(bound, &caller, depth),
                None => Err(SynthesisError::UnresolvedTypeParameter(name.clone())),
            },
            TypeNode::Map(value) => Ok(self
                .visit(*value, scope, depth)?
                .map(|v| ValidatorExpr::Values(Box::new(v)))),
            TypeNode::Object(_) => {
                let shape = resolve_shape(self.table, ty, scope).unwrap_or_default();
                self.object_validator(&shape, ObjectKind::Plain, depth)
                    .map(Some)
            }
            TypeNode::Unsupported { kind, text } => Err(SynthesisError::UnsupportedType {
                kind: kind.clone(),
                text: text.clone(),
            }),
        }
    }

    fn reference(
        &self,
        ty: TypeId,
        name: &str,
        args: &[TypeId],
        scope: &Scope,
        depth: u32,
    ) -> SynthesisResult<Option<ValidatorExpr>> {
        if builtin_utility(self.table, name, args.len()) {
            let kind = match name {
                "Required" => ObjectKind::Required,
                "Partial" => ObjectKind::Partial,
                _ => return self.visit(args[0], scope, depth),
            };
            let Some(shape) = resolve_shape(self.table, args[0], scope) else {
                warn!(
                    utility = name,
                    argument = %self.render(args[0]),
                    "argument has no resolvable shape, no validator produced"
                );
                return Ok(None);
            };
            return self.object_validator(&shape, kind, depth).map(Some);
        }

        let Some(decl) = self.table.declaration(name) else {
            return match (name, args) {
                ("Array" | "ReadonlyArray", [element]) => self.array_of(*element, scope, depth),
                ("Record", [_, value]) => Ok(self
                    .visit(*value, scope, depth)?
                    .map(|v| ValidatorExpr::Values(Box::new(v)))),
                _ => Err(SynthesisError::UnknownType(self.render(ty))),
            };
        };

        match &decl.kind {
            DeclarationKind::Interface { .. } => {
                let shape = resolve_shape(self.table, ty, scope)
                    .ok_or_else(|| SynthesisError::UnknownType(self.render(ty)))?;
                self.object_validator(&shape, ObjectKind::Plain, depth)
                    .map(Some)
            }
            DeclarationKind::Enum { members } => {
                if members.is_empty() {
                    return Err(SynthesisError::EnumWithoutMembers(decl.name.clone()));
                }
                let mut values = Vec::with_capacity(members.len());
                for member in members {
                    match &member.initializer {
                        EnumInitializer::Literal(value) => values.push(value.clone()),
                        EnumInitializer::Missing | EnumInitializer::Computed(_) => {
                            return Err(SynthesisError::EnumMemberWithoutInitializer {
                                enum_name: decl.name.clone(),
                                member: member.name.clone(),
                            })
                        }
                    }
                }
                Ok(Some(ValidatorExpr::OneOfStrict {
                    label: self.render(ty),
                    values,
                }))
            }
            DeclarationKind::Alias { body } => {
                let env = Env::bind(&decl.type_params, args, scope);
                self.visit(*body, &env, depth)
            }
        }
    }

    fn array_of(
        &self,
        element: TypeId,
        scope: &Scope,
        depth: u32,
    ) -> SynthesisResult<Option<ValidatorExpr>> {
        Ok(self
            .visit(element, scope, depth)?
            .map(|v| ValidatorExpr::ArrayOf(Box::new(v))))
    }

    fn enum_member(&self, enum_name: &str, member: &str) -> SynthesisResult<ValidatorExpr> {
        let not_a_member = || SynthesisError::NotAnEnumMember {
            enum_name: enum_name.to_string(),
            member: member.to_string(),
        };
        let decl = self.table.declaration(enum_name).ok_or_else(not_a_member)?;
        let DeclarationKind::Enum { members } = &decl.kind else {
            return Err(not_a_member());
        };
        let found = members
            .iter()
            .find(|m| m.name == member)
            .ok_or_else(not_a_member)?;
        match &found.initializer {
            EnumInitializer::Literal(value) => Ok(ValidatorExpr::StrictValue(value.clone())),
            EnumInitializer::Missing | EnumInitializer::Computed(_) => {
                Err(SynthesisError::EnumMemberWithoutInitializer {
                    enum_name: enum_name.to_string(),
                    member: member.to_string(),
                })
            }
        }
    }

    fn object_validator(
        &self,
        shape: &ResolvedShape,
        kind: ObjectKind,
        depth: u32,
    ) -> SynthesisResult<ValidatorExpr> {
        let mut fields = Vec::with_capacity(shape.properties.len());
        for prop in &shape.properties {
            let Some((ty, scope)) = prop.primary() else {
                continue;
            };
            if let TypeNode::Param(param) = self.table.node(ty) {
                if scope.lookup(param).is_none() {
                    debug!(field = %prop.name, param = %param, "skipping field with unbound type parameter");
                    continue;
                }
            }
            let Some(validator) = self.visit(ty, scope, depth)? else {
                warn!(field = %prop.name, "field dropped, no validator produced");
                continue;
            };
            let validator = if kind == ObjectKind::Plain && prop.optional && !validator.is_optional()
            {
                ValidatorExpr::optional(validator)
            } else {
                validator
            };
            fields.push((prop.name.clone(), validator));
        }
        Ok(ValidatorExpr::Object { kind, fields })
    }

    fn label(&self, ty: TypeId) -> Option<String> {
        self.options.label_unions.then(|| self.render(ty))
    }

    fn render(&self, ty: TypeId) -> String {
        render_type(self.table.arena(), ty)
    }
}

fn primitive(kind: PrimitiveKind) -> ValidatorExpr {
    match kind {
        PrimitiveKind::Any | PrimitiveKind::Unknown => ValidatorExpr::Anything,
        PrimitiveKind::String => ValidatorExpr::String,
        PrimitiveKind::Number => ValidatorExpr::Number,
        PrimitiveKind::Boolean => ValidatorExpr::Boolean,
        PrimitiveKind::Null => ValidatorExpr::Null,
        // a lone `undefined` only ever accepts a missing value
        PrimitiveKind::Undefined => ValidatorExpr::optional(ValidatorExpr::Anything),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::TypeScriptParser;
    use crate::features::type_system::LiteralValue;
    use pretty_assertions::assert_eq;

    fn table(source: &str) -> TypeTable {
        let tree = TypeScriptParser::typescript().parse(source, "t.ts").unwrap();
        let mut table = TypeTable::new();
        table.collect(&tree);
        table
    }

    fn named(table: &mut TypeTable, name: &str) -> TypeId {
        table.alloc(TypeNode::Reference {
            name: name.to_string(),
            args: vec![],
        })
    }

    fn synth(source: &str, name: &str) -> SynthesisResult<Option<ValidatorExpr>> {
        let mut t = table(source);
        let ty = named(&mut t, name);
        Synthesizer::new(&t, SynthesisOptions::default()).synthesize(ty, &Env::root())
    }

    fn render(source: &str, name: &str) -> String {
        synth(source, name).unwrap().unwrap().render("V")
    }

    #[test]
    fn test_object_with_optional_fields() {
        assert_eq!(
            render("type U = { id: number; name?: string; tag?: string | undefined };", "U"),
            "new V({ id: V.Number, name: V.Optional(V.String), tag: V.Optional(V.Or(\"string | undefined\", V.String)) })"
        );
    }

    #[test]
    fn test_union_strips_undefined() {
        let expr = synth(r#"type X = "a" | "b" | undefined;"#, "X").unwrap().unwrap();
        let ValidatorExpr::Optional(inner) = expr else {
            panic!("expected optional");
        };
        assert_eq!(inner.operands().unwrap().len(), 2);
    }

    #[test]
    fn test_array_spellings_agree() {
        let a = render("type A = { xs: string[] };", "A");
        let b = render("type A = { xs: Array<string> };", "A");
        assert_eq!(a, b);
        assert_eq!(a, "new V({ xs: V.ArrayOf(V.String) })");
    }

    #[test]
    fn test_enum_one_of_strict() {
        assert_eq!(
            render("enum Level { A = 1, B = 2 }", "Level"),
            "V.OneOfStrict(\"Level\", 1, 2)"
        );
    }

    #[test]
    fn test_enum_member_strict_value() {
        let expr = synth(
            "enum Color { Red = \"red\" }\ntype R = { c: Color.Red };",
            "R",
        )
        .unwrap()
        .unwrap();
        assert_eq!(
            expr.fields().unwrap()[0].1,
            ValidatorExpr::StrictValue(LiteralValue::Str("red".into()))
        );
    }

    #[test]
    fn test_enum_errors() {
        assert_eq!(
            synth("enum E { A, B }", "E").unwrap_err(),
            SynthesisError::EnumMemberWithoutInitializer {
                enum_name: "E".into(),
                member: "A".into()
            }
        );
        assert_eq!(
            synth("enum E {}", "E").unwrap_err(),
            SynthesisError::EnumWithoutMembers("E".into())
        );
        assert!(matches!(
            synth("type T = { a: string };\ntype X = { v: T.a };", "X").unwrap_err(),
            SynthesisError::NotAnEnumMember { .. }
        ));
    }

    #[test]
    fn test_required_and_partial() {
        let source = "type P = { a?: string; b: number };\ntype R = Required<P>;\ntype Q = Partial<P>;";
        assert_eq!(render(source, "R"), "V.Required({ a: V.String, b: V.Number })");
        assert_eq!(render(source, "Q"), "V.Partial({ a: V.String, b: V.Number })");
    }

    #[test]
    fn test_required_of_unresolvable_is_open_gap() {
        assert_eq!(synth("type R = Required<string>;", "R").unwrap(), None);
        assert_eq!(
            render("type O = { r: Required<string>; n: number };", "O"),
            "new V({ n: V.Number })"
        );
    }

    #[test]
    fn test_generic_alias_binds_arguments() {
        let source = "type Page<T> = { items: T[]; total: number };\ntype Users = Page<{ id: string }>;";
        assert_eq!(
            render(source, "Users"),
            "new V({ items: V.ArrayOf(new V({ id: V.String })), total: V.Number })"
        );
    }

    #[test]
    fn test_unbound_param_field_is_skipped() {
        assert_eq!(
            render("type Box<T> = { value: T; n: number };\ntype B = Box;", "B"),
            "new V({ n: V.Number })"
        );
        assert_eq!(
            synth("type Box<T> = { value: T[] };\ntype B = Box;", "B").unwrap_err(),
            SynthesisError::UnresolvedTypeParameter("T".into())
        );
    }

    #[test]
    fn test_interface_extends_and_merging() {
        let source = r#"
            interface Base { id: number }
            interface User extends Base { name: string }
            interface User { email?: string }
        "#;
        assert_eq!(
            render(source, "User"),
            "new V({ id: V.Number, name: V.String, email: V.Optional(V.String) })"
        );
    }

    #[test]
    fn test_derived_interface_narrows_inherited_fields() {
        let source = r#"
            interface Base { kind: string; id: string | number }
            interface Derived extends Base { kind: "derived"; id: number }
        "#;
        assert_eq!(
            render(source, "Derived"),
            "new V({ kind: V.StrictValue(\"derived\"), id: V.Number })"
        );
    }

    #[test]
    fn test_map_and_record() {
        assert_eq!(
            render("type M = { [k: string]: number };", "M"),
            "V.Values(V.Number)"
        );
        assert_eq!(render("type M = Record<string, boolean>;", "M"), "V.Values(V.Boolean)");
    }

    #[test]
    fn test_intersection_label() {
        let source = "type A = { a: string };\ntype B = { b: number };\ntype C = A & B;";
        assert_eq!(
            render(source, "C"),
            "V.And(\"A & B\", new V({ a: V.String }), new V({ b: V.Number }))"
        );
    }

    #[test]
    fn test_unknown_and_unsupported_are_fatal() {
        assert_eq!(
            synth("type X = { u: Usr };", "X").unwrap_err(),
            SynthesisError::UnknownType("Usr".into())
        );
        assert!(matches!(
            synth("type X = { f: () => void };", "X").unwrap_err(),
            SynthesisError::UnsupportedType { .. }
        ));
    }

    #[test]
    fn test_self_reference_hits_depth_limit() {
        let mut t = table("type Loop = { next: Loop };");
        let ty = named(&mut t, "Loop");
        let options = SynthesisOptions {
            max_depth: 8,
            label_unions: true,
        };
        let err = Synthesizer::new(&t, options)
            .synthesize(ty, &Env::root())
            .unwrap_err();
        assert!(matches!(err, SynthesisError::DepthExceeded { limit: 8, .. }));
    }

    #[test]
    fn test_labels_can_be_disabled() {
        let mut t = table("type X = string | number;");
        let ty = named(&mut t, "X");
        let options = SynthesisOptions {
            label_unions: false,
            ..SynthesisOptions::default()
        };
        let expr = Synthesizer::new(&t, options)
            .synthesize(ty, &Env::root())
            .unwrap()
            .unwrap();
        assert_eq!(expr.render("V"), "V.Or(V.String, V.Number)");
    }
}
