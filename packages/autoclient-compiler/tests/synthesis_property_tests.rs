//! Property-based tests for validator synthesis
//!
//! Invariants:
//! 1. An object type yields one field per declared property
//! 2. An optional property is wrapped in exactly one `Optional`
//! 3. A union with `undefined` yields `Optional(Or)` with one operand fewer
//! 4. A union without `undefined` yields `Or` with one operand per member
//! 5. `T[]` and `Array<T>` synthesize the same validator

mod common;

use autoclient_compiler::ValidatorExpr;
use common::{fixture_object, fixture_union, synthesize};
use proptest::prelude::*;

fn member_type() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("string".to_string()),
        Just("number".to_string()),
        Just("boolean".to_string()),
        Just("null".to_string()),
        (0u8..20).prop_map(|n| format!("\"lit{}\"", n)),
        (0u32..1000).prop_map(|n| n.to_string()),
        Just("string[]".to_string()),
        Just("{ inner: number }".to_string()),
    ]
}

fn property() -> impl Strategy<Value = (bool, String)> {
    (
        any::<bool>(),
        prop_oneof![member_type(), Just("string | undefined".to_string())],
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Invariants 1 and 2
    #[test]
    fn prop_object_fields_match_properties(
        props in prop::collection::vec(property(), 0..8)
    ) {
        let props: Vec<(String, bool, String)> = props
            .into_iter()
            .enumerate()
            .map(|(i, (optional, ty))| (format!("p{}", i), optional, ty))
            .collect();
        let source = fixture_object("Obj", &props);

        let expr = synthesize(&source, "Obj").expect("object always yields a validator");
        let fields = expr.fields().expect("object validator");
        prop_assert_eq!(fields.len(), props.len());

        for ((name, field), (prop, optional, _)) in fields.iter().zip(&props) {
            prop_assert_eq!(name, prop);
            if *optional {
                let ValidatorExpr::Optional(inner) = field else {
                    return Err(TestCaseError::fail(format!("{} should be optional", name)));
                };
                prop_assert!(!inner.is_optional(), "{} wrapped twice", name);
            }
        }
    }

    /// Invariants 3 and 4
    #[test]
    fn prop_union_operand_count(
        members in prop::collection::vec(member_type(), 1..6),
        undefined_at in prop::option::of(0usize..6),
    ) {
        let mut members = members;
        let has_undefined = match undefined_at {
            Some(at) => {
                members.insert(at.min(members.len()), "undefined".to_string());
                true
            }
            None => false,
        };
        prop_assume!(members.len() >= 2);
        let source = fixture_union("U", &members);

        let expr = synthesize(&source, "U").expect("union yields a validator");
        let or = if has_undefined {
            let ValidatorExpr::Optional(inner) = expr else {
                return Err(TestCaseError::fail("expected Optional"));
            };
            *inner
        } else {
            expr
        };
        let is_or = matches!(or, ValidatorExpr::Or { .. });
        prop_assert!(is_or);
        let expected = members.len() - usize::from(has_undefined);
        prop_assert_eq!(or.operands().map(|o| o.len()), Some(expected));
    }

    /// Invariant 5
    #[test]
    fn prop_array_spellings_agree(element in member_type()) {
        let bracket = format!("type A = ({})[];", element);
        let generic = format!("type A = Array<{}>;", element);
        prop_assert_eq!(synthesize(&bracket, "A"), synthesize(&generic, "A"));
    }
}
