//! Named type declarations (`type`, `interface`, `enum`)

use super::arena::TypeId;
use super::type_node::LiteralValue;
use crate::shared::models::Span;

#[derive(Debug, Clone, PartialEq)]
pub enum EnumInitializer {
    Missing,
    Literal(LiteralValue),
    /// Non-literal expression, kept as source text for error messages
    Computed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumMemberDecl {
    pub name: String,
    pub initializer: EnumInitializer,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeclarationKind {
    /// `type Name<P> = body`
    Alias { body: TypeId },
    /// `interface Name<P> extends E1, E2 { ... }`; `bodies` has one entry per
    /// merged declaration
    Interface { bodies: Vec<TypeId>, extends: Vec<TypeId> },
    /// `enum Name { ... }`
    Enum { members: Vec<EnumMemberDecl> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub type_params: Vec<String>,
    pub kind: DeclarationKind,
    pub file: String,
    pub span: Span,
}

impl Declaration {
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            DeclarationKind::Alias { .. } => "type alias",
            DeclarationKind::Interface { .. } => "interface",
            DeclarationKind::Enum { .. } => "enum",
        }
    }

    /// Fold a later declaration with the same name into this one.
    ///
    /// Interfaces and enums merge; anything else keeps the first declaration.
    /// Returns false when the two could not be merged.
    pub fn merge(&mut self, other: Declaration) -> bool {
        match (&mut self.kind, other.kind) {
            (
                DeclarationKind::Interface { bodies, extends },
                DeclarationKind::Interface {
                    bodies: more_bodies,
                    extends: more_extends,
                },
            ) => {
                bodies.extend(more_bodies);
                extends.extend(more_extends);
                true
            }
            (
                DeclarationKind::Enum { members },
                DeclarationKind::Enum {
                    members: more_members,
                },
            ) => {
                members.extend(more_members);
                true
            }
            _ => false,
        }
    }
}
