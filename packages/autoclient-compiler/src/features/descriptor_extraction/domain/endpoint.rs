//! Endpoint descriptor model

use std::fmt;

use crate::features::type_system::{Scope, TypeId};

/// Literal fields read from an endpoint type, in reporting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorField {
    Url,
    Method,
    RequiresMember,
    NeedsToken,
    UseValidator,
    /// Second call-signature parameter, required by `addAPI` when `useValidator` is true
    Body,
}

impl DescriptorField {
    pub fn key(&self) -> &'static str {
        match self {
            DescriptorField::Url => "url",
            DescriptorField::Method => "method",
            DescriptorField::RequiresMember => "requiresMember",
            DescriptorField::NeedsToken => "needsToken",
            DescriptorField::UseValidator => "useValidator",
            DescriptorField::Body => "body",
        }
    }
}

impl fmt::Display for DescriptorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone)]
pub struct EndpointDescriptor {
    pub url: String,
    pub method: String,
    pub requires_member: String,
    pub needs_token: bool,
    pub use_validator: bool,
    /// Declared body type and the scope to read it in
    pub body: Option<(TypeId, Scope)>,
    /// Property names of the body type
    pub param_keys: Vec<String>,
}

/// `generateAPITree` result: endpoints at the leaves, groups in between
#[derive(Debug, Clone)]
pub enum ApiTreeNode {
    Endpoint(EndpointDescriptor),
    Group(Vec<(String, ApiTreeNode)>),
}

impl ApiTreeNode {
    pub fn endpoint_count(&self) -> usize {
        match self {
            ApiTreeNode::Endpoint(_) => 1,
            ApiTreeNode::Group(children) => children.iter().map(|(_, c)| c.endpoint_count()).sum(),
        }
    }
}

/// Outcome of a recoverable extraction
#[derive(Debug, Clone)]
pub enum Extraction<T> {
    Found(T),
    /// Literal fields absent; `at` is the dotted property path inside an API tree
    Missing {
        at: Option<String>,
        fields: Vec<DescriptorField>,
    },
    /// An API tree member that is neither an endpoint nor an object
    NotAnEndpoint { at: String, text: String },
}

impl<T> Extraction<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Extraction<U> {
        match self {
            Extraction::Found(value) => Extraction::Found(f(value)),
            Extraction::Missing { at, fields } => Extraction::Missing { at, fields },
            Extraction::NotAnEndpoint { at, text } => Extraction::NotAnEndpoint { at, text },
        }
    }

    pub fn found(self) -> Option<T> {
        match self {
            Extraction::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn missing_fields(&self) -> &[DescriptorField] {
        match self {
            Extraction::Missing { fields, .. } => fields,
            _ => &[],
        }
    }

    /// Human-readable reason the call cannot be rewritten
    pub fn problem(&self) -> Option<String> {
        match self {
            Extraction::Found(_) => None,
            Extraction::Missing { at, fields } => {
                let names: Vec<&str> = fields.iter().map(|f| f.key()).collect();
                let noun = if fields.len() == 1 { "field" } else { "fields" };
                Some(match at {
                    Some(path) => format!(
                        "endpoint `{}` is missing descriptor {}: {}",
                        path,
                        noun,
                        names.join(", ")
                    ),
                    None => format!("endpoint type is missing descriptor {}: {}", noun, names.join(", ")),
                })
            }
            Extraction::NotAnEndpoint { at, text } => Some(format!(
                "API tree member `{}` of type `{}` is neither an endpoint nor an object",
                at, text
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_problem_message() {
        let missing: Extraction<()> = Extraction::Missing {
            at: None,
            fields: vec![DescriptorField::NeedsToken],
        };
        assert_eq!(
            missing.problem().as_deref(),
            Some("endpoint type is missing descriptor field: needsToken")
        );
        assert_eq!(missing.missing_fields(), &[DescriptorField::NeedsToken]);

        let nested: Extraction<()> = Extraction::Missing {
            at: Some("users.create".into()),
            fields: vec![DescriptorField::Url, DescriptorField::Method],
        };
        assert_eq!(
            nested.problem().as_deref(),
            Some("endpoint `users.create` is missing descriptor fields: url, method")
        );
    }

    #[test]
    fn test_field_display_uses_key() {
        assert_eq!(DescriptorField::RequiresMember.to_string(), "requiresMember");
        assert_eq!(DescriptorField::Body.to_string(), "body");
    }
}
