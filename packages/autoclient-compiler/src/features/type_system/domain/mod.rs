//! Type system domain models

mod arena;
mod declaration;
mod environment;
mod render;
mod type_node;

pub use arena::{TypeArena, TypeId};
pub use declaration::{Declaration, DeclarationKind, EnumInitializer, EnumMemberDecl};
pub use environment::{Env, Scope};
pub use render::render_type;
pub use type_node::{
    CallSignature, LiteralValue, ObjectShape, Parameter, PrimitiveKind, Property, TypeNode,
};
