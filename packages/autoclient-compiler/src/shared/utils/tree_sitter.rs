//! Tree-sitter Utility Functions
//!
//! Common utilities for working with tree-sitter AST nodes, shared by the
//! type lowering, import scanning and the rewrite driver.

use crate::shared::models::Span;
use tree_sitter::Node;

// ═══════════════════════════════════════════════════════════════════════════
// Node Traversal Utilities
// ═══════════════════════════════════════════════════════════════════════════

/// Find a direct child node by kind
///
/// # Example
/// ```ignore
/// let body = find_child_by_kind(enum_node, "enum_body");
/// ```
#[inline]
pub fn find_child_by_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    (0..node.child_count())
        .filter_map(|i| node.child(i))
        .find(|child| child.kind() == kind)
}

/// Whether the node has a direct (possibly anonymous) child token of `kind`
#[inline]
pub fn has_child_token(node: Node<'_>, kind: &str) -> bool {
    find_child_by_kind(node, kind).is_some()
}

/// Named children, skipping extras (comments)
pub fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    (0..node.named_child_count())
        .filter_map(|i| node.named_child(i))
        .filter(|child| !child.is_extra())
        .collect()
}

/// All children including anonymous tokens, in source order
pub fn all_children(node: Node<'_>) -> Vec<Node<'_>> {
    (0..node.child_count()).filter_map(|i| node.child(i)).collect()
}

/// First named, non-extra child
#[inline]
pub fn first_named_child(node: Node<'_>) -> Option<Node<'_>> {
    named_children(node).into_iter().next()
}

// ═══════════════════════════════════════════════════════════════════════════
// Text Extraction Utilities
// ═══════════════════════════════════════════════════════════════════════════

/// Extract text content from a node
#[inline]
pub fn node_text<'a>(node: Node<'_>, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

/// Extract text content from a node as owned String
#[inline]
pub fn node_text_owned(node: Node<'_>, source: &str) -> String {
    node_text(node, source).to_string()
}

/// Text of a named field, if present
#[inline]
pub fn field_text(node: Node<'_>, field: &str, source: &str) -> Option<String> {
    node.child_by_field_name(field)
        .map(|n| node_text_owned(n, source))
}

/// Decode a JS/TS string literal node's text (`"a\"b"` or `'a'`) to its value
pub fn unquote_string_literal(text: &str) -> String {
    let inner = if text.len() >= 2
        && ((text.starts_with('"') && text.ends_with('"'))
            || (text.starts_with('\'') && text.ends_with('\''))
            || (text.starts_with('`') && text.ends_with('`')))
    {
        &text[1..text.len() - 1]
    } else {
        text
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('v') => out.push('\u{b}'),
            Some('x') => {
                let hex: String = chars.by_ref().take(2).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\x");
                        out.push_str(&hex);
                    }
                }
            }
            Some('u') => {
                let rest = chars.as_str();
                let (hex, consumed): (String, usize) = if let Some(braced) = rest.strip_prefix('{') {
                    let hex: String = braced.chars().take_while(|c| *c != '}').collect();
                    let consumed = hex.chars().count() + 2;
                    (hex, consumed)
                } else {
                    let hex: String = rest.chars().take(4).collect();
                    let consumed = hex.chars().count();
                    (hex, consumed)
                };
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => {
                        out.push(decoded);
                        for _ in 0..consumed {
                            chars.next();
                        }
                    }
                    None => out.push_str("\\u"),
                }
            }
            // Line continuation
            Some('\n') => {}
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

// ═══════════════════════════════════════════════════════════════════════════
// Span Conversion Utilities
// ═══════════════════════════════════════════════════════════════════════════

/// Convert tree-sitter node to Span (1-indexed lines)
#[inline]
pub fn node_to_span(node: Node<'_>) -> Span {
    let start_pos = node.start_position();
    let end_pos = node.end_position();

    Span::new(
        start_pos.row as u32 + 1,
        start_pos.column as u32,
        end_pos.row as u32 + 1,
        end_pos.column as u32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unquote_simple() {
        assert_eq!(unquote_string_literal("\"/api/x\""), "/api/x");
        assert_eq!(unquote_string_literal("'POST'"), "POST");
    }

    #[test]
    fn test_unquote_escapes() {
        assert_eq!(unquote_string_literal(r#""a\"b""#), "a\"b");
        assert_eq!(unquote_string_literal(r"'it\'s'"), "it's");
        assert_eq!(unquote_string_literal(r#""tab\there""#), "tab\there");
        assert_eq!(unquote_string_literal(r#""A\x42""#), "AB");
        assert_eq!(unquote_string_literal(r#""\u{1F600}""#), "\u{1F600}");
    }

    #[test]
    fn test_unquote_without_quotes_is_identity() {
        assert_eq!(unquote_string_literal("plain"), "plain");
    }
}
