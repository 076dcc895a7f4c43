//! Structural type graph nodes
//!
//! Nodes are allocated in a [`super::TypeArena`] and never mutated once
//! allocated. Children are referenced by [`TypeId`].

use serde::Serialize;

use super::arena::TypeId;
use crate::shared::utils::js;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PrimitiveKind {
    String,
    Number,
    Boolean,
    Null,
    Undefined,
    Any,
    Unknown,
}

impl PrimitiveKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Number => "number",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Null => "null",
            PrimitiveKind::Undefined => "undefined",
            PrimitiveKind::Any => "any",
            PrimitiveKind::Unknown => "unknown",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "string" => PrimitiveKind::String,
            "number" => PrimitiveKind::Number,
            "boolean" => PrimitiveKind::Boolean,
            "null" => PrimitiveKind::Null,
            "undefined" => PrimitiveKind::Undefined,
            "any" => PrimitiveKind::Any,
            "unknown" => PrimitiveKind::Unknown,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LiteralValue {
    Str(String),
    Num(f64),
    Bool(bool),
}

impl LiteralValue {
    /// JS source text for the value
    pub fn to_js(&self) -> String {
        match self {
            LiteralValue::Str(s) => js::string_literal(s),
            LiteralValue::Num(n) => js::number_literal(*n),
            LiteralValue::Bool(b) => b.to_string(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            LiteralValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            LiteralValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// A declared member of an object shape.
///
/// `declarations` holds one type per declaration site; the first one is the
/// primary declaration. Merged interfaces and intersections contribute more.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub declarations: Vec<TypeId>,
    pub optional: bool,
}

impl Property {
    pub fn new(name: impl Into<String>, ty: TypeId, optional: bool) -> Self {
        Self {
            name: name.into(),
            declarations: vec![ty],
            optional,
        }
    }

    pub fn primary(&self) -> Option<TypeId> {
        self.declarations.first().copied()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: Option<TypeId>,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CallSignature {
    pub params: Vec<Parameter>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectShape {
    pub properties: Vec<Property>,
    pub call_signatures: Vec<CallSignature>,
}

impl ObjectShape {
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeNode {
    Primitive(PrimitiveKind),
    Literal(LiteralValue),
    Union(Vec<TypeId>),
    Intersection(Vec<TypeId>),
    /// `T[]`
    Array(TypeId),
    /// Named reference, resolved against the declaration table on use
    Reference { name: String, args: Vec<TypeId> },
    /// `Enum.Member` in type position
    EnumMember { enum_name: String, member: String },
    /// Generic parameter of the enclosing declaration
    Param(String),
    Object(ObjectShape),
    /// Single index signature / mapped type: only the value type matters
    Map(TypeId),
    /// Syntax the lowering does not model
    Unsupported { kind: String, text: String },
}

impl TypeNode {
    /// Short variant name used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeNode::Primitive(_) => "primitive",
            TypeNode::Literal(_) => "literal",
            TypeNode::Union(_) => "union",
            TypeNode::Intersection(_) => "intersection",
            TypeNode::Array(_) => "array",
            TypeNode::Reference { .. } => "reference",
            TypeNode::EnumMember { .. } => "enum member",
            TypeNode::Param(_) => "type parameter",
            TypeNode::Object(_) => "object",
            TypeNode::Map(_) => "map",
            TypeNode::Unsupported { .. } => "unsupported",
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, TypeNode::Primitive(PrimitiveKind::Undefined))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_keyword_roundtrip() {
        for kind in [
            PrimitiveKind::String,
            PrimitiveKind::Number,
            PrimitiveKind::Boolean,
            PrimitiveKind::Null,
            PrimitiveKind::Undefined,
            PrimitiveKind::Any,
            PrimitiveKind::Unknown,
        ] {
            assert_eq!(PrimitiveKind::from_keyword(kind.keyword()), Some(kind));
        }
        assert_eq!(PrimitiveKind::from_keyword("symbol"), None);
    }

    #[test]
    fn test_literal_to_js() {
        assert_eq!(LiteralValue::Str("GET".into()).to_js(), "\"GET\"");
        assert_eq!(LiteralValue::Num(2.0).to_js(), "2");
        assert_eq!(LiteralValue::Bool(true).to_js(), "true");
    }
}
