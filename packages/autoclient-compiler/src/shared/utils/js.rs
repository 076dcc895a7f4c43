//! JavaScript source emission helpers
//!
//! Everything the compiler splices back into a program goes through these
//! helpers so quoting and number formatting stay consistent.

/// Double-quoted JS string literal (JSON escaping is a valid subset)
pub fn string_literal(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{}\"", value))
}

/// JS number literal; integral values print without a fraction
pub fn number_literal(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if value == 0.0 && value.is_sign_negative() {
        "-0".to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Whether `name` can be written as a bare property key / identifier
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Object literal key, quoted only when required
pub fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        string_literal(name)
    }
}

/// Wrap an expression in parens unless it is a plain identifier or dotted path,
/// so it can safely be called or member-accessed
pub fn operand(expr: &str) -> String {
    let trimmed = expr.trim();
    if !trimmed.is_empty() && trimmed.split('.').all(is_identifier) {
        trimmed.to_string()
    } else {
        format!("({})", trimmed)
    }
}

/// `{ a: x, "b-c": y }` from ordered entries; `{}` when empty.
/// Entries whose key starts with `...` are emitted as spreads.
pub fn object_literal<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let parts: Vec<String> = entries
        .into_iter()
        .map(|(key, value)| {
            let key = key.as_ref();
            if key == "..." {
                format!("...{}", value.as_ref())
            } else {
                format!("{}: {}", property_key(key), value.as_ref())
            }
        })
        .collect();

    if parts.is_empty() {
        "{}".to_string()
    } else {
        format!("{{ {} }}", parts.join(", "))
    }
}

/// `["a", "b"]`
pub fn string_array(values: &[String]) -> String {
    let items: Vec<String> = values.iter().map(|v| string_literal(v)).collect();
    format!("[{}]", items.join(", "))
}
