//! Tree-sitter parser implementation
//!
//! This is where the tree-sitter-typescript dependency lives.

use std::path::Path;

use tree_sitter::{Node, Parser as TSParser};

use crate::errors::{CompileError, Result};
use crate::features::parsing::domain::ParsedTree;

/// Grammar flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    TypeScript,
    Tsx,
}

/// Tree-sitter based TypeScript parser
pub struct TypeScriptParser {
    dialect: Dialect,
}

impl TypeScriptParser {
    pub fn typescript() -> Self {
        Self {
            dialect: Dialect::TypeScript,
        }
    }

    pub fn tsx() -> Self {
        Self {
            dialect: Dialect::Tsx,
        }
    }

    /// Pick the grammar from the file extension (`.tsx` → TSX)
    pub fn for_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some("tsx") => Self::tsx(),
            _ => Self::typescript(),
        }
    }

    fn get_ts_language(&self) -> tree_sitter::Language {
        match self.dialect {
            Dialect::TypeScript => tree_sitter_typescript::language_typescript(),
            Dialect::Tsx => tree_sitter_typescript::language_tsx(),
        }
    }

    pub fn parse(&self, source: &str, file_path: &str) -> Result<ParsedTree> {
        let mut parser = TSParser::new();
        parser
            .set_language(&self.get_ts_language())
            .map_err(|e| CompileError::Language(e.to_string()))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| CompileError::parse(file_path, 0, 0, "end of input"))?;

        if tree.root_node().has_error() {
            if let Some(bad) = first_error(tree.root_node()) {
                let pos = bad.start_position();
                let kind = if bad.is_missing() {
                    format!("missing {}", bad.kind())
                } else {
                    bad.kind().to_string()
                };
                return Err(CompileError::parse(
                    file_path,
                    pos.row as u32 + 1,
                    pos.column as u32,
                    kind,
                ));
            }
        }

        Ok(ParsedTree::new(
            tree,
            source.to_string(),
            file_path.to_string(),
            self.dialect,
        ))
    }
}

/// First ERROR or MISSING node in document order
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    (0..node.child_count())
        .filter_map(|i| node.child(i))
        .find_map(first_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_typescript_alias() {
        let parser = TypeScriptParser::typescript();
        let tree = parser
            .parse("type User = { name: string };", "user.ts")
            .unwrap();
        assert_eq!(tree.root().kind(), "program");
        assert_eq!(tree.file_path, "user.ts");
    }

    #[test]
    fn test_parse_generic_call() {
        let parser = TypeScriptParser::typescript();
        let tree = parser.parse("const u = apiURL<Ep>();", "call.ts").unwrap();
        assert!(!tree.root().has_error());
    }

    #[test]
    fn test_parse_error_reports_location() {
        let parser = TypeScriptParser::typescript();
        let err = parser.parse("type = = ;", "broken.ts").unwrap_err();
        assert!(matches!(err, CompileError::Parse { ref file, line: 1, .. } if file == "broken.ts"));
    }

    #[test]
    fn test_for_path_picks_dialect() {
        assert_eq!(TypeScriptParser::for_path("a/b.tsx").dialect, Dialect::Tsx);
        assert_eq!(TypeScriptParser::for_path("a/b.ts").dialect, Dialect::TypeScript);
    }
}
