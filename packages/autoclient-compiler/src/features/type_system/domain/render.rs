//! Human-readable rendering of type nodes (TypeScript syntax)
//!
//! Used for `Or`/`And`/`OneOfStrict` labels and error messages.

use super::arena::{TypeArena, TypeId};
use super::type_node::TypeNode;
use crate::shared::utils::js;

pub fn render_type(arena: &TypeArena, id: TypeId) -> String {
    let mut out = String::new();
    write_type(arena, id, &mut out);
    out
}

fn write_type(arena: &TypeArena, id: TypeId, out: &mut String) {
    match arena.get(id) {
        TypeNode::Primitive(kind) => out.push_str(kind.keyword()),
        TypeNode::Literal(value) => out.push_str(&value.to_js()),
        TypeNode::Union(members) => write_joined(arena, members, " | ", out),
        TypeNode::Intersection(members) => write_joined(arena, members, " & ", out),
        TypeNode::Array(element) => {
            let compound = matches!(
                arena.get(*element),
                TypeNode::Union(_) | TypeNode::Intersection(_)
            );
            if compound {
                out.push('(');
                write_type(arena, *element, out);
                out.push(')');
            } else {
                write_type(arena, *element, out);
            }
            out.push_str("[]");
        }
        TypeNode::Reference { name, args } => {
            out.push_str(name);
            if !args.is_empty() {
                out.push('<');
                write_joined(arena, args, ", ", out);
                out.push('>');
            }
        }
        TypeNode::EnumMember { enum_name, member } => {
            out.push_str(enum_name);
            out.push('.');
            out.push_str(member);
        }
        TypeNode::Param(name) => out.push_str(name),
        TypeNode::Object(shape) => {
            if shape.properties.is_empty() && shape.call_signatures.is_empty() {
                out.push_str("{}");
                return;
            }
            let mut members = Vec::new();
            for signature in &shape.call_signatures {
                let params: Vec<String> = signature
                    .params
                    .iter()
                    .map(|p| {
                        let ty = p
                            .ty
                            .map(|t| render_type(arena, t))
                            .unwrap_or_else(|| "any".to_string());
                        format!("{}{}: {}", p.name, if p.optional { "?" } else { "" }, ty)
                    })
                    .collect();
                members.push(format!("({})", params.join(", ")));
            }
            for prop in &shape.properties {
                let ty = prop
                    .primary()
                    .map(|t| render_type(arena, t))
                    .unwrap_or_else(|| "any".to_string());
                members.push(format!(
                    "{}{}: {}",
                    js::property_key(&prop.name),
                    if prop.optional { "?" } else { "" },
                    ty
                ));
            }
            out.push_str("{ ");
            out.push_str(&members.join("; "));
            out.push_str(" }");
        }
        TypeNode::Map(value) => {
            out.push_str("{ [key: string]: ");
            write_type(arena, *value, out);
            out.push_str(" }");
        }
        TypeNode::Unsupported { text, .. } => out.push_str(text),
    }
}

fn write_joined(arena: &TypeArena, ids: &[TypeId], sep: &str, out: &mut String) {
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        write_type(arena, *id, out);
    }
}
