//! Lowering from tree-sitter type syntax to arena type nodes
//!
//! Handles:
//! - Keywords (string, number, boolean, any, unknown, null, undefined)
//! - Literal types ("GET", 42, -1, true)
//! - Named / generic references (User, Page<T>, Array<T>)
//! - Qualified names (Color.Red)
//! - Union / intersection types (flattened)
//! - Array, readonly and parenthesized types
//! - Object types, interface bodies, index signatures and mapped types
//!
//! Anything else becomes `TypeNode::Unsupported`; the synthesizer decides
//! whether that is fatal.

use tracing::debug;
use tree_sitter::Node;

use crate::features::parsing::node_kinds;
use crate::features::type_system::domain::{
    CallSignature, Declaration, DeclarationKind, EnumInitializer, EnumMemberDecl, LiteralValue,
    ObjectShape, Parameter, PrimitiveKind, Property, TypeArena, TypeId, TypeNode,
};
use crate::shared::utils::tree_sitter::{
    field_text, first_named_child, has_child_token, named_children, node_text, node_to_span,
    unquote_string_literal,
};

/// Lowers type syntax written inside one declaration (or one call site).
///
/// `params` are the generic parameters in scope; bare references to them
/// become `TypeNode::Param`.
pub struct TypeLowering<'a> {
    arena: &'a mut TypeArena,
    source: &'a str,
    params: &'a [String],
}

impl<'a> TypeLowering<'a> {
    pub fn new(arena: &'a mut TypeArena, source: &'a str, params: &'a [String]) -> Self {
        Self {
            arena,
            source,
            params,
        }
    }

    pub fn lower(&mut self, node: Node<'_>) -> TypeId {
        match node.kind() {
            node_kinds::PREDEFINED_TYPE => self.lower_keyword(node),
            node_kinds::LITERAL_TYPE => match first_named_child(node) {
                Some(inner) => self.lower_literal(inner),
                None => self.unsupported(node),
            },
            node_kinds::STRING
            | node_kinds::NUMBER
            | node_kinds::TRUE
            | node_kinds::FALSE
            | node_kinds::NULL
            | node_kinds::UNDEFINED
            | node_kinds::UNARY_EXPRESSION => self.lower_literal(node),
            node_kinds::TYPE_IDENTIFIER | node_kinds::IDENTIFIER => {
                let name = node_text(node, self.source).to_string();
                self.lower_name(name, Vec::new())
            }
            node_kinds::NESTED_TYPE_IDENTIFIER => self.lower_qualified(node),
            node_kinds::GENERIC_TYPE => self.lower_generic(node),
            node_kinds::UNION_TYPE => {
                let mut members = Vec::new();
                self.flatten(node, node_kinds::UNION_TYPE, &mut members);
                self.arena.alloc(TypeNode::Union(members))
            }
            node_kinds::INTERSECTION_TYPE => {
                let mut members = Vec::new();
                self.flatten(node, node_kinds::INTERSECTION_TYPE, &mut members);
                self.arena.alloc(TypeNode::Intersection(members))
            }
            node_kinds::ARRAY_TYPE => match first_named_child(node) {
                Some(element) => {
                    let element = self.lower(element);
                    self.arena.alloc(TypeNode::Array(element))
                }
                None => self.unsupported(node),
            },
            node_kinds::READONLY_TYPE
            | node_kinds::PARENTHESIZED_TYPE
            | node_kinds::TYPE_ANNOTATION => match first_named_child(node) {
                Some(inner) => self.lower(inner),
                None => self.unsupported(node),
            },
            node_kinds::OBJECT_TYPE | node_kinds::INTERFACE_BODY => self.lower_object(node),
            _ => self.unsupported(node),
        }
    }

    fn unsupported(&mut self, node: Node<'_>) -> TypeId {
        self.arena.alloc(TypeNode::Unsupported {
            kind: node.kind().to_string(),
            text: node_text(node, self.source).to_string(),
        })
    }

    fn lower_keyword(&mut self, node: Node<'_>) -> TypeId {
        match PrimitiveKind::from_keyword(node_text(node, self.source).trim()) {
            Some(kind) => self.arena.primitive(kind),
            None => self.unsupported(node),
        }
    }

    fn lower_literal(&mut self, node: Node<'_>) -> TypeId {
        match literal_value(node, self.source) {
            Some(value) => self.arena.alloc(TypeNode::Literal(value)),
            None => match node.kind() {
                node_kinds::NULL => self.arena.primitive(PrimitiveKind::Null),
                node_kinds::UNDEFINED => self.arena.primitive(PrimitiveKind::Undefined),
                _ => self.unsupported(node),
            },
        }
    }

    fn lower_name(&mut self, name: String, args: Vec<TypeId>) -> TypeId {
        if args.is_empty() {
            if self.params.iter().any(|p| *p == name) {
                return self.arena.alloc(TypeNode::Param(name));
            }
            if let Some(kind @ (PrimitiveKind::Null | PrimitiveKind::Undefined)) =
                PrimitiveKind::from_keyword(&name)
            {
                return self.arena.primitive(kind);
            }
        }
        self.arena.alloc(TypeNode::Reference { name, args })
    }

    fn lower_qualified(&mut self, node: Node<'_>) -> TypeId {
        let module = field_text(node, "module", self.source);
        let name = field_text(node, "name", self.source);
        match (module, name) {
            (Some(enum_name), Some(member)) => {
                self.arena.alloc(TypeNode::EnumMember { enum_name, member })
            }
            _ => self.unsupported(node),
        }
    }

    fn lower_generic(&mut self, node: Node<'_>) -> TypeId {
        let Some(name_node) = node.child_by_field_name("name") else {
            return self.unsupported(node);
        };
        if name_node.kind() == node_kinds::NESTED_TYPE_IDENTIFIER {
            return self.unsupported(node);
        }
        let name = node_text(name_node, self.source).to_string();

        let args = node
            .child_by_field_name("type_arguments")
            .map(|type_args| {
                named_children(type_args)
                    .into_iter()
                    .map(|arg| self.lower(arg))
                    .collect()
            })
            .unwrap_or_default();

        self.lower_name(name, args)
    }

    fn flatten(&mut self, node: Node<'_>, kind: &str, out: &mut Vec<TypeId>) {
        for child in named_children(node) {
            if child.kind() == kind {
                self.flatten(child, kind, out);
            } else {
                let id = self.lower(child);
                out.push(id);
            }
        }
    }

    fn lower_object(&mut self, node: Node<'_>) -> TypeId {
        let mut shape = ObjectShape::default();
        let mut index_values = Vec::new();

        for member in named_children(node) {
            match member.kind() {
                node_kinds::PROPERTY_SIGNATURE => {
                    if let Some(prop) = self.lower_property(member) {
                        shape.properties.push(prop);
                    }
                }
                node_kinds::CALL_SIGNATURE => {
                    let signature = self.lower_call_signature(member);
                    shape.call_signatures.push(signature);
                }
                node_kinds::INDEX_SIGNATURE => {
                    let value = self.lower_index_signature(member);
                    index_values.push(value);
                }
                other => {
                    debug!(kind = other, "skipping object type member");
                }
            }
        }

        if shape.properties.is_empty() && shape.call_signatures.is_empty() && index_values.len() == 1
        {
            return self.arena.alloc(TypeNode::Map(index_values[0]));
        }
        if !index_values.is_empty() {
            debug!(
                count = index_values.len(),
                "index signatures ignored on object type with other members"
            );
        }
        self.arena.alloc(TypeNode::Object(shape))
    }

    fn lower_property(&mut self, member: Node<'_>) -> Option<Property> {
        let name_node = member.child_by_field_name("name")?;
        let name = property_name(name_node, self.source);
        let optional = has_child_token(member, "?");
        let ty = match member.child_by_field_name("type") {
            Some(annotation) => self.lower(annotation),
            None => self.arena.primitive(PrimitiveKind::Any),
        };
        Some(Property::new(name, ty, optional))
    }

    fn lower_call_signature(&mut self, member: Node<'_>) -> CallSignature {
        let formal = member.child_by_field_name("parameters").or_else(|| {
            named_children(member)
                .into_iter()
                .find(|c| c.kind() == node_kinds::FORMAL_PARAMETERS)
        });

        let mut signature = CallSignature::default();
        let Some(formal) = formal else {
            return signature;
        };

        for param in named_children(formal) {
            let optional = match param.kind() {
                node_kinds::REQUIRED_PARAMETER => false,
                node_kinds::OPTIONAL_PARAMETER => true,
                _ => continue,
            };
            let name = field_text(param, "pattern", self.source).unwrap_or_default();
            if name == "this" {
                continue;
            }
            let ty = param
                .child_by_field_name("type")
                .map(|annotation| self.lower(annotation));
            signature.params.push(Parameter { name, ty, optional });
        }
        signature
    }

    fn lower_index_signature(&mut self, member: Node<'_>) -> TypeId {
        let annotation = member.child_by_field_name("type").or_else(|| {
            named_children(member)
                .into_iter()
                .rev()
                .find(|c| c.kind().ends_with("type_annotation"))
        });
        match annotation.and_then(first_named_child) {
            Some(value) => self.lower(value),
            None => self.arena.primitive(PrimitiveKind::Any),
        }
    }
}

/// Lower a top-level `type` / `interface` / `enum` declaration
pub(crate) fn lower_declaration(
    arena: &mut TypeArena,
    node: Node<'_>,
    source: &str,
    file: &str,
) -> Option<Declaration> {
    let name = field_text(node, "name", source)?;
    let type_params = type_parameters(node, source);
    let span = node_to_span(node);

    let kind = match node.kind() {
        node_kinds::TYPE_ALIAS_DECLARATION => {
            let value = node.child_by_field_name("value")?;
            let body = TypeLowering::new(arena, source, &type_params).lower(value);
            DeclarationKind::Alias { body }
        }
        node_kinds::INTERFACE_DECLARATION => {
            let body_node = node.child_by_field_name("body")?;
            let mut lowering = TypeLowering::new(arena, source, &type_params);
            let body = lowering.lower(body_node);
            let extends = named_children(node)
                .into_iter()
                .filter(|c| {
                    c.kind() == node_kinds::EXTENDS_TYPE_CLAUSE || c.kind() == "extends_clause"
                })
                .flat_map(named_children)
                .map(|base| lowering.lower(base))
                .collect();
            DeclarationKind::Interface {
                bodies: vec![body],
                extends,
            }
        }
        node_kinds::ENUM_DECLARATION => {
            let body = node.child_by_field_name("body")?;
            DeclarationKind::Enum {
                members: enum_members(body, source),
            }
        }
        _ => return None,
    };

    Some(Declaration {
        name,
        type_params,
        kind,
        file: file.to_string(),
        span,
    })
}

fn type_parameters(node: Node<'_>, source: &str) -> Vec<String> {
    let Some(params) = node.child_by_field_name("type_parameters") else {
        return Vec::new();
    };
    named_children(params)
        .into_iter()
        .filter(|p| p.kind() == node_kinds::TYPE_PARAMETER)
        .filter_map(|p| {
            field_text(p, "name", source)
                .or_else(|| first_named_child(p).map(|n| node_text(n, source).to_string()))
        })
        .collect()
}

fn enum_members(body: Node<'_>, source: &str) -> Vec<EnumMemberDecl> {
    let mut members = Vec::new();
    for member in named_children(body) {
        match member.kind() {
            node_kinds::ENUM_ASSIGNMENT => {
                let Some(name_node) = member.child_by_field_name("name") else {
                    continue;
                };
                let initializer = match member.child_by_field_name("value") {
                    Some(value) => match literal_value(value, source) {
                        Some(literal) => EnumInitializer::Literal(literal),
                        None => EnumInitializer::Computed(node_text(value, source).to_string()),
                    },
                    None => EnumInitializer::Missing,
                };
                members.push(EnumMemberDecl {
                    name: property_name(name_node, source),
                    initializer,
                });
            }
            node_kinds::PROPERTY_IDENTIFIER | node_kinds::STRING | node_kinds::IDENTIFIER => {
                members.push(EnumMemberDecl {
                    name: property_name(member, source),
                    initializer: EnumInitializer::Missing,
                });
            }
            other => debug!(kind = other, "skipping enum body member"),
        }
    }
    members
}

fn property_name(node: Node<'_>, source: &str) -> String {
    let text = node_text(node, source);
    if node.kind() == node_kinds::STRING {
        unquote_string_literal(text)
    } else {
        text.to_string()
    }
}

/// Literal value of a string/number/boolean token or a negated number
fn literal_value(node: Node<'_>, source: &str) -> Option<LiteralValue> {
    let text = node_text(node, source);
    match node.kind() {
        node_kinds::STRING => Some(LiteralValue::Str(unquote_string_literal(text))),
        node_kinds::NUMBER => parse_number_literal(text).map(LiteralValue::Num),
        node_kinds::TRUE => Some(LiteralValue::Bool(true)),
        node_kinds::FALSE => Some(LiteralValue::Bool(false)),
        node_kinds::UNARY_EXPRESSION => {
            let operator = field_text(node, "operator", source)?;
            let argument = node.child_by_field_name("argument")?;
            if argument.kind() != node_kinds::NUMBER {
                return None;
            }
            let value = parse_number_literal(node_text(argument, source))?;
            match operator.as_str() {
                "-" => Some(LiteralValue::Num(-value)),
                "+" => Some(LiteralValue::Num(value)),
                _ => None,
            }
        }
        _ => None,
    }
}

/// JS numeric literal text (decimal, hex, octal, binary, `_` separators).
/// BigInt literals (`10n`) are not numbers and yield `None`.
pub(crate) fn parse_number_literal(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|c| *c != '_').collect();
    let lower = cleaned.to_ascii_lowercase();
    if lower.ends_with('n') {
        return None;
    }
    let radix = |digits: &str, radix: u32| u64::from_str_radix(digits, radix).ok().map(|v| v as f64);
    if let Some(hex) = lower.strip_prefix("0x") {
        radix(hex, 16)
    } else if let Some(oct) = lower.strip_prefix("0o") {
        radix(oct, 8)
    } else if let Some(bin) = lower.strip_prefix("0b") {
        radix(bin, 2)
    } else {
        lower.parse::<f64>().ok()
    }
}
