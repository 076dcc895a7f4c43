//! JS text for the descriptor-based entry points
//!
//! Every argument is the already rewritten source text of the call's
//! argument; callees and member-accessed values go through `js::operand`.

use crate::features::descriptor_extraction::domain::{ApiTreeNode, EndpointDescriptor};
use crate::shared::utils::js;

/// Value arguments of `generateRequest<T>(...)`
#[derive(Debug, Clone, Copy)]
pub struct RequestArgs<'a> {
    pub test_connection: &'a str,
    pub account: &'a str,
    pub params: &'a str,
    pub body: &'a str,
    pub conf: &'a str,
    pub member: Option<&'a str>,
    pub session: Option<&'a str>,
}

fn bool_literal(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// `adder("url", "METHOD", "member", needsToken, useValidator, BODY)(endpoint)`
pub fn render_add_api(
    descriptor: &EndpointDescriptor,
    body_validator: &str,
    adder: &str,
    endpoint: &str,
) -> String {
    format!(
        "{}({}, {}, {}, {}, {}, {})({})",
        js::operand(adder),
        js::string_literal(&descriptor.url),
        js::string_literal(&descriptor.method),
        js::string_literal(&descriptor.requires_member),
        bool_literal(descriptor.needs_token),
        bool_literal(descriptor.use_validator),
        body_validator,
        endpoint.trim()
    )
}

/// `adder({ paramKeys, url, method, requiresMember, needsToken })`
pub fn render_api_call(descriptor: &EndpointDescriptor, adder: &str) -> String {
    let fields = [
        ("paramKeys", js::string_array(&descriptor.param_keys)),
        ("url", js::string_literal(&descriptor.url)),
        ("method", js::string_literal(&descriptor.method)),
        ("requiresMember", js::string_literal(&descriptor.requires_member)),
        ("needsToken", bool_literal(descriptor.needs_token).to_string()),
    ];
    format!("{}({})", js::operand(adder), js::object_literal(fields))
}

pub fn render_api_url(descriptor: &EndpointDescriptor) -> String {
    js::string_literal(&descriptor.url)
}

/// Request envelope; the member/session branch is present only when a
/// member argument was passed
pub fn render_generate_request(descriptor: &EndpointDescriptor, args: &RequestArgs<'_>) -> String {
    let conf = js::operand(args.conf);
    let url = js::string_literal(&descriptor.url);

    let mut fields: Vec<(&str, String)> = vec![
        ("body", args.body.trim().to_string()),
        ("params", args.params.trim().to_string()),
        ("method", js::string_literal(&descriptor.method)),
        ("headers", format!("{{ ...{}.headers }}", conf)),
        ("hostname", format!("{}.hostname", conf)),
        ("originalName", url.clone()),
        ("_originalName", url),
        (
            "...",
            format!("{}({})", js::operand(args.test_connection), args.account.trim()),
        ),
    ];

    if let Some(member) = args.member {
        let session = args.session.map(str::trim).unwrap_or("undefined");
        let member_fields = [
            ("member", member.trim().to_string()),
            ("session", session.to_string()),
            ("requiresMember", js::string_literal(&descriptor.requires_member)),
            ("needsToken", bool_literal(descriptor.needs_token).to_string()),
        ];
        fields.push(("...", js::object_literal(member_fields)));
    }

    js::object_literal(fields)
}

/// Nested object literal; each endpoint becomes `caller({ ... })`
pub fn render_api_tree(tree: &ApiTreeNode, caller: &str) -> String {
    let caller = js::operand(caller);
    let mut out = String::new();
    write_tree(tree, &caller, &mut out);
    out
}

fn write_tree(node: &ApiTreeNode, caller: &str, out: &mut String) {
    match node {
        ApiTreeNode::Endpoint(descriptor) => {
            let fields = [
                ("url", js::string_literal(&descriptor.url)),
                ("method", js::string_literal(&descriptor.method)),
                ("requiresMember", js::string_literal(&descriptor.requires_member)),
                ("needsToken", bool_literal(descriptor.needs_token).to_string()),
                ("useValidator", bool_literal(descriptor.use_validator).to_string()),
                ("paramKeys", js::string_array(&descriptor.param_keys)),
            ];
            out.push_str(caller);
            out.push('(');
            out.push_str(&js::object_literal(fields));
            out.push(')');
        }
        ApiTreeNode::Group(children) => {
            let rendered: Vec<(&str, String)> = children
                .iter()
                .map(|(name, child)| {
                    let mut text = String::new();
                    write_tree(child, caller, &mut text);
                    (name.as_str(), text)
                })
                .collect();
            out.push_str(&js::object_literal(rendered));
        }
    }
}
