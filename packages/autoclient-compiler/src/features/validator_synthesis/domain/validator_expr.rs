//! Validator expression tree and its JS rendering

use crate::features::type_system::LiteralValue;
use crate::shared::utils::js;

/// Which object constructor an object validator is emitted with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// `new V({...})`, optional fields carry `V.Optional`
    Plain,
    /// `V.Required({...})`, every field mandatory
    Required,
    /// `V.Partial({...})`, every field optional
    Partial,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidatorExpr {
    Anything,
    String,
    Number,
    Boolean,
    Null,
    StrictValue(LiteralValue),
    Optional(Box<ValidatorExpr>),
    Or {
        label: Option<String>,
        operands: Vec<ValidatorExpr>,
    },
    And {
        label: Option<String>,
        operands: Vec<ValidatorExpr>,
    },
    ArrayOf(Box<ValidatorExpr>),
    Values(Box<ValidatorExpr>),
    OneOfStrict {
        label: String,
        values: Vec<LiteralValue>,
    },
    Object {
        kind: ObjectKind,
        fields: Vec<(String, ValidatorExpr)>,
    },
}

impl ValidatorExpr {
    /// Validator accepting any value: `new V({})`
    pub fn always_pass() -> Self {
        ValidatorExpr::Object {
            kind: ObjectKind::Plain,
            fields: Vec::new(),
        }
    }

    pub fn optional(inner: ValidatorExpr) -> Self {
        ValidatorExpr::Optional(Box::new(inner))
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, ValidatorExpr::Optional(_))
    }

    /// Fields of an object validator
    pub fn fields(&self) -> Option<&[(String, ValidatorExpr)]> {
        match self {
            ValidatorExpr::Object { fields, .. } => Some(fields),
            _ => None,
        }
    }

    /// Operands of an `Or` / `And`
    pub fn operands(&self) -> Option<&[ValidatorExpr]> {
        match self {
            ValidatorExpr::Or { operands, .. } | ValidatorExpr::And { operands, .. } => {
                Some(operands)
            }
            _ => None,
        }
    }

    /// JS source for this validator; `namespace` is the DSL constructor
    /// expression as written at the call site
    pub fn render(&self, namespace: &str) -> String {
        let ns = js::operand(namespace);
        let mut out = String::new();
        self.write(&ns, &mut out);
        out
    }

    fn write(&self, ns: &str, out: &mut String) {
        match self {
            ValidatorExpr::Anything => write_atom(ns, "Anything", out),
            ValidatorExpr::String => write_atom(ns, "String", out),
            ValidatorExpr::Number => write_atom(ns, "Number", out),
            ValidatorExpr::Boolean => write_atom(ns, "Boolean", out),
            ValidatorExpr::Null => write_atom(ns, "Null", out),
            ValidatorExpr::StrictValue(value) => {
                out.push_str(ns);
                out.push_str(".StrictValue(");
                out.push_str(&value.to_js());
                out.push(')');
            }
            ValidatorExpr::Optional(inner) => write_call(ns, "Optional", None, &[inner.as_ref()], out),
            ValidatorExpr::ArrayOf(inner) => write_call(ns, "ArrayOf", None, &[inner.as_ref()], out),
            ValidatorExpr::Values(inner) => write_call(ns, "Values", None, &[inner.as_ref()], out),
            ValidatorExpr::Or { label, operands } => {
                let operands: Vec<&ValidatorExpr> = operands.iter().collect();
                write_call(ns, "Or", label.as_deref(), &operands, out)
            }
            ValidatorExpr::And { label, operands } => {
                let operands: Vec<&ValidatorExpr> = operands.iter().collect();
                write_call(ns, "And", label.as_deref(), &operands, out)
            }
            ValidatorExpr::OneOfStrict { label, values } => {
                out.push_str(ns);
                out.push_str(".OneOfStrict(");
                out.push_str(&js::string_literal(label));
                for value in values {
                    out.push_str(", ");
                    out.push_str(&value.to_js());
                }
                out.push(')');
            }
            ValidatorExpr::Object { kind, fields } => {
                let rendered: Vec<(&str, String)> = fields
                    .iter()
                    .map(|(name, field)| {
                        let mut text = String::new();
                        field.write(ns, &mut text);
                        (name.as_str(), text)
                    })
                    .collect();
                let literal = js::object_literal(rendered);
                match kind {
                    ObjectKind::Plain => {
                        out.push_str("new ");
                        out.push_str(ns);
                    }
                    ObjectKind::Required => {
                        out.push_str(ns);
                        out.push_str(".Required");
                    }
                    ObjectKind::Partial => {
                        out.push_str(ns);
                        out.push_str(".Partial");
                    }
                }
                out.push('(');
                out.push_str(&literal);
                out.push(')');
            }
        }
    }
}

fn write_atom(ns: &str, name: &str, out: &mut String) {
    out.push_str(ns);
    out.push('.');
    out.push_str(name);
}

fn write_call(
    ns: &str,
    name: &str,
    label: Option<&str>,
    args: &[&ValidatorExpr],
    out: &mut String,
) {
    out.push_str(ns);
    out.push('.');
    out.push_str(name);
    out.push('(');
    let mut first = true;
    if let Some(label) = label {
        out.push_str(&js::string_literal(label));
        first = false;
    }
    for arg in args {
        if !first {
            out.push_str(", ");
        }
        arg.write(ns, out);
        first = false;
    }
    out.push(')');
}
