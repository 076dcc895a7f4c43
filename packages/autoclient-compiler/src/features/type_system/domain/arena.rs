//! Append-only arena of type nodes
//!
//! Declarations are lowered once per program; call-site type arguments are
//! appended later as new entries. Existing entries are never touched, so a
//! `TypeId` stays valid for the life of the arena.

use std::ops::Index;

use super::type_node::{PrimitiveKind, TypeNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Default)]
pub struct TypeArena {
    nodes: Vec<TypeNode>,
}

impl TypeArena {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn alloc(&mut self, node: TypeNode) -> TypeId {
        let id = TypeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn primitive(&mut self, kind: PrimitiveKind) -> TypeId {
        self.alloc(TypeNode::Primitive(kind))
    }

    #[inline]
    pub fn get(&self, id: TypeId) -> &TypeNode {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Index<TypeId> for TypeArena {
    type Output = TypeNode;

    fn index(&self, id: TypeId) -> &TypeNode {
        self.get(id)
    }
}
