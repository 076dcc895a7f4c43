//! Marker module import bindings
//!
//! A call is only an entry point when its callee was imported from a
//! marker module:
//!
//! ```text
//! import { apiURL, validator as v } from "auto-client-api";   // named / aliased
//! import * as api from "auto-client-api";                     // api.apiURL<T>()
//! import api from "auto-client-api";                          // api.apiURL<T>()
//! ```

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;
use tree_sitter::Node;

use crate::config::TransformConfig;
use crate::features::parsing::{node_kinds, ParsedTree};
use crate::features::rewrite::domain::EntryPoint;
use crate::shared::utils::tree_sitter::{
    field_text, find_child_by_kind, named_children, node_text, unquote_string_literal,
};

#[derive(Debug, Default)]
pub struct MarkerImports {
    /// Local binding → entry point
    named: FxHashMap<String, EntryPoint>,
    /// Locals bound to the whole marker module
    namespaces: FxHashSet<String>,
    /// Byte ranges of marker import statements
    statements: Vec<(usize, usize)>,
}

impl MarkerImports {
    pub fn scan(tree: &ParsedTree, config: &TransformConfig) -> Self {
        let mut imports = Self::default();
        for statement in named_children(tree.root()) {
            if statement.kind() != node_kinds::IMPORT_STATEMENT {
                continue;
            }
            let Some(source) = import_source(statement, &tree.source) else {
                continue;
            };
            if !config.is_marker_module(&source) {
                continue;
            }
            debug!(module = %source, file = %tree.file_path, "found marker import");
            imports
                .statements
                .push((statement.start_byte(), statement.end_byte()));
            if let Some(clause) = find_child_by_kind(statement, node_kinds::IMPORT_CLAUSE) {
                imports.collect_clause(clause, &tree.source);
            }
        }
        imports
    }

    fn collect_clause(&mut self, clause: Node<'_>, source: &str) {
        for part in named_children(clause) {
            match part.kind() {
                node_kinds::IDENTIFIER => {
                    self.namespaces.insert(node_text(part, source).to_string());
                }
                node_kinds::NAMESPACE_IMPORT => {
                    if let Some(local) = find_child_by_kind(part, node_kinds::IDENTIFIER) {
                        self.namespaces.insert(node_text(local, source).to_string());
                    }
                }
                node_kinds::NAMED_IMPORTS => {
                    for specifier in named_children(part) {
                        if specifier.kind() != node_kinds::IMPORT_SPECIFIER {
                            continue;
                        }
                        let Some(imported) = field_text(specifier, "name", source) else {
                            continue;
                        };
                        let imported = unquote_string_literal(&imported);
                        let Some(entry) = EntryPoint::from_name(&imported) else {
                            continue;
                        };
                        let local = field_text(specifier, "alias", source).unwrap_or(imported);
                        self.named.insert(local, entry);
                    }
                }
                _ => {}
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Whether `node` is a marker import statement
    pub fn is_marker_statement(&self, node: Node<'_>) -> bool {
        node.kind() == node_kinds::IMPORT_STATEMENT
            && self
                .statements
                .contains(&(node.start_byte(), node.end_byte()))
    }

    /// Entry point named by a call's callee expression
    pub fn resolve_callee(&self, callee: Node<'_>, source: &str) -> Option<EntryPoint> {
        match callee.kind() {
            node_kinds::IDENTIFIER => self.named.get(node_text(callee, source)).copied(),
            node_kinds::MEMBER_EXPRESSION => {
                let object = callee.child_by_field_name("object")?;
                let property = callee.child_by_field_name("property")?;
                if object.kind() != node_kinds::IDENTIFIER
                    || !self.namespaces.contains(node_text(object, source))
                {
                    return None;
                }
                EntryPoint::from_name(node_text(property, source))
            }
            _ => None,
        }
    }
}

fn import_source(statement: Node<'_>, source: &str) -> Option<String> {
    let literal = statement
        .child_by_field_name("source")
        .or_else(|| find_child_by_kind(statement, node_kinds::STRING))?;
    Some(unquote_string_literal(node_text(literal, source)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::TypeScriptParser;

    fn scan(source: &str) -> (ParsedTree, MarkerImports) {
        let tree = TypeScriptParser::typescript().parse(source, "t.ts").unwrap();
        let imports = MarkerImports::scan(&tree, &TransformConfig::default());
        (tree, imports)
    }

    fn first_call_callee(tree: &ParsedTree) -> Node<'_> {
        fn find(node: Node<'_>) -> Option<Node<'_>> {
            if node.kind() == node_kinds::CALL_EXPRESSION {
                return node.child_by_field_name("function");
            }
            named_children(node).into_iter().find_map(find)
        }
        find(tree.root()).unwrap()
    }

    #[test]
    fn test_named_and_aliased_imports() {
        let (tree, imports) = scan(
            "import { apiURL, validator as v, other } from \"auto-client-api\";\nv<string>(V);",
        );
        assert!(!imports.is_empty());
        let callee = first_call_callee(&tree);
        assert_eq!(
            imports.resolve_callee(callee, &tree.source),
            Some(EntryPoint::Validator)
        );
        assert_eq!(imports.named.get("apiURL"), Some(&EntryPoint::ApiUrl));
        assert!(!imports.named.contains_key("other"));
    }

    #[test]
    fn test_namespace_import() {
        let (tree, imports) =
            scan("import * as api from 'auto-client-api';\nconst u = api.apiURL<Ep>();");
        let callee = first_call_callee(&tree);
        assert_eq!(
            imports.resolve_callee(callee, &tree.source),
            Some(EntryPoint::ApiUrl)
        );
    }

    #[test]
    fn test_other_modules_ignored() {
        let (tree, imports) =
            scan("import { apiURL } from \"./local\";\nconst u = apiURL<Ep>();");
        assert!(imports.is_empty());
        let callee = first_call_callee(&tree);
        assert_eq!(imports.resolve_callee(callee, &tree.source), None);
    }
}
