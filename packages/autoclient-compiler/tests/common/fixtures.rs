//! TypeScript fixture generators

/// `import { names... } from "auto-client-api";`
pub fn fixture_marker_import(names: &[&str]) -> String {
    format!("import {{ {} }} from \"auto-client-api\";\n", names.join(", "))
}

/// Endpoint interface with all five descriptor fields and a body parameter
pub fn fixture_endpoint(name: &str, url: &str, method: &str, use_validator: bool) -> String {
    format!(
        r#"interface {name} {{
    url: "{url}";
    method: "{method}";
    requiresMember: "member";
    needsToken: true;
    useValidator: {use_validator};
    (member: string, body: {{ title: string; tags?: string[] }}): void;
}}
"#
    )
}

/// Endpoint interface without the given descriptor field
pub fn fixture_endpoint_without(name: &str, field: &str) -> String {
    fixture_endpoint(name, "/api/x", "POST", false)
        .lines()
        .filter(|line| !line.trim_start().starts_with(&format!("{field}:")))
        .map(|line| format!("{line}\n"))
        .collect()
}

/// `type Name = m1 | m2 | ...;`
pub fn fixture_union(name: &str, members: &[String]) -> String {
    format!("type {name} = {};\n", members.join(" | "))
}

/// `type Name = { p0: T0; p1?: T1; ... };`
pub fn fixture_object(name: &str, props: &[(String, bool, String)]) -> String {
    let body: Vec<String> = props
        .iter()
        .map(|(prop, optional, ty)| format!("{prop}{}: {ty}", if *optional { "?" } else { "" }))
        .collect();
    format!("type {name} = {{ {} }};\n", body.join("; "))
}
