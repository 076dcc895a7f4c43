//! Recoverable compile diagnostics
//!
//! A diagnostic never stops the pass. The call site it points at is left
//! unrewritten and a later compilation stage is expected to reject it.

use serde::Serialize;

use super::span::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub file: String,
    pub span: Span,
    pub message: String,
    /// Descriptor fields that could not be read, in extraction order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_fields: Vec<String>,
}

impl Diagnostic {
    pub fn warning(file: impl Into<String>, span: Span, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            file: file.into(),
            span,
            message: message.into(),
            missing_fields: Vec::new(),
        }
    }

    pub fn error(file: impl Into<String>, span: Span, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            ..Self::warning(file, span, message)
        }
    }

    pub fn with_missing_fields(mut self, fields: Vec<String>) -> Self {
        self.missing_fields = fields;
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{}:{}: {}: {}", self.file, self.span, level, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_location() {
        let diag = Diagnostic::error("api.ts", Span::new(4, 2, 4, 30), "missing field");
        assert_eq!(diag.to_string(), "api.ts:4:2: error: missing field");
    }

    #[test]
    fn test_missing_fields_serialized_only_when_present() {
        let plain = Diagnostic::warning("a.ts", Span::zero(), "x");
        let json = serde_json::to_value(&plain).unwrap();
        assert!(json.get("missing_fields").is_none());
        assert_eq!(json["severity"], "warning");

        let with_fields = plain.with_missing_fields(vec!["url".to_string()]);
        let json = serde_json::to_value(&with_fields).unwrap();
        assert_eq!(json["missing_fields"][0], "url");
    }
}
