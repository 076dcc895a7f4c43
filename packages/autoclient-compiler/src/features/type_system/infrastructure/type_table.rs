//! Program-wide table of named declarations
//!
//! Collected from every parsed file before any call site is rewritten, so
//! references may point forward or across files.

use rustc_hash::FxHashMap;
use tracing::{debug, warn};
use tree_sitter::Node;

use super::lowering::{lower_declaration, TypeLowering};
use crate::features::parsing::{node_kinds, ParsedTree};
use crate::features::type_system::domain::{Declaration, TypeArena, TypeId, TypeNode};
use crate::shared::utils::tree_sitter::{first_named_child, named_children};

#[derive(Debug, Default)]
pub struct TypeTable {
    arena: TypeArena,
    declarations: FxHashMap<String, Declaration>,
    /// Declaration names in first-seen order
    order: Vec<String>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arena(&self) -> &TypeArena {
        &self.arena
    }

    #[inline]
    pub fn node(&self, id: TypeId) -> &TypeNode {
        self.arena.get(id)
    }

    pub fn alloc(&mut self, node: TypeNode) -> TypeId {
        self.arena.alloc(node)
    }

    pub fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations.get(name)
    }

    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.order.iter().filter_map(|name| self.declarations.get(name))
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Register a declaration, merging interfaces and enums with earlier ones
    pub fn declare(&mut self, decl: Declaration) {
        match self.declarations.get_mut(&decl.name) {
            Some(existing) => {
                let name = decl.name.clone();
                let (file, line) = (decl.file.clone(), decl.span.start_line);
                if !existing.merge(decl) {
                    warn!(
                        name = %name,
                        file = %file,
                        line,
                        first = %existing.file,
                        "duplicate declaration ignored"
                    );
                }
            }
            None => {
                self.order.push(decl.name.clone());
                self.declarations.insert(decl.name.clone(), decl);
            }
        }
    }

    /// Lower every top-level `type`, `interface` and `enum` in `tree`.
    ///
    /// Returns the number of declarations seen.
    pub fn collect(&mut self, tree: &ParsedTree) -> usize {
        let mut seen = 0;
        for statement in named_children(tree.root()) {
            let Some(node) = declaration_node(statement) else {
                continue;
            };
            if let Some(decl) =
                lower_declaration(&mut self.arena, node, &tree.source, &tree.file_path)
            {
                debug!(name = %decl.name, kind = decl.kind_name(), "collected declaration");
                self.declare(decl);
                seen += 1;
            }
        }
        seen
    }

    /// Lower a type written at a call site (`addAPI<T>`), outside any generic scope
    pub fn lower_type_arg(&mut self, node: Node<'_>, source: &str) -> TypeId {
        TypeLowering::new(&mut self.arena, source, &[]).lower(node)
    }
}

/// Unwrap `export` / `declare` down to the declaration node
fn declaration_node(statement: Node<'_>) -> Option<Node<'_>> {
    match statement.kind() {
        node_kinds::TYPE_ALIAS_DECLARATION
        | node_kinds::INTERFACE_DECLARATION
        | node_kinds::ENUM_DECLARATION => Some(statement),
        node_kinds::EXPORT_STATEMENT => statement
            .child_by_field_name("declaration")
            .and_then(declaration_node),
        node_kinds::AMBIENT_DECLARATION => first_named_child(statement).and_then(declaration_node),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::TypeScriptParser;
    use crate::features::type_system::domain::{DeclarationKind, EnumInitializer, LiteralValue};

    fn table(source: &str) -> TypeTable {
        let tree = TypeScriptParser::typescript().parse(source, "t.ts").unwrap();
        let mut table = TypeTable::new();
        table.collect(&tree);
        table
    }

    #[test]
    fn test_collect_declarations() {
        let t = table(
            r#"
            type Id = string;
            export interface User { id: Id; name: string }
            declare enum Color { Red = "red", Blue = "blue" }
            const x = 1;
            "#,
        );
        assert_eq!(t.len(), 3);
        assert_eq!(t.declaration("User").unwrap().kind_name(), "interface");
        assert_eq!(t.declaration("Color").unwrap().kind_name(), "enum");
        let names: Vec<_> = t.declarations().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Id", "User", "Color"]);
    }

    #[test]
    fn test_interface_merging() {
        let t = table("interface A { x: string }\ninterface A { y: number }");
        let DeclarationKind::Interface { bodies, .. } = &t.declaration("A").unwrap().kind else {
            panic!("expected interface");
        };
        assert_eq!(bodies.len(), 2);
    }

    #[test]
    fn test_duplicate_alias_keeps_first() {
        let t = table("type A = string;\ntype A = number;");
        assert_eq!(t.len(), 1);
        assert_eq!(t.declaration("A").unwrap().span.start_line, 1);
    }

    #[test]
    fn test_enum_initializers() {
        let t = table("enum E { A = 1, B = -2, C, D = 1 << 2 }");
        let DeclarationKind::Enum { members } = &t.declaration("E").unwrap().kind else {
            panic!("expected enum");
        };
        assert_eq!(members[0].initializer, EnumInitializer::Literal(LiteralValue::Num(1.0)));
        assert_eq!(members[1].initializer, EnumInitializer::Literal(LiteralValue::Num(-2.0)));
        assert_eq!(members[2].initializer, EnumInitializer::Missing);
        assert!(matches!(members[3].initializer, EnumInitializer::Computed(_)));
    }

    #[test]
    fn test_generic_params_lower_to_param_nodes() {
        let t = table("type Page<T> = { items: T[] };");
        let decl = t.declaration("Page").unwrap();
        assert_eq!(decl.type_params, vec!["T".to_string()]);
        let DeclarationKind::Alias { body } = decl.kind else {
            panic!("expected alias");
        };
        let TypeNode::Object(shape) = t.node(body) else {
            panic!("expected object");
        };
        let items = shape.property("items").unwrap().primary().unwrap();
        let TypeNode::Array(element) = t.node(items) else {
            panic!("expected array");
        };
        assert_eq!(t.node(*element), &TypeNode::Param("T".into()));
    }
}
