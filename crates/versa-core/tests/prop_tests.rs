//! Property-based tests for version ordering and value comparison
//!
//! These tests verify the ordering laws across a wide range of inputs.

use proptest::prelude::*;
use serde_json::Value as JsonValue;
use std::cmp::Ordering;
use versa_core::{compare, equals, Value, Version};

/// Strategy for generating versions with optional build and revision
fn version_strategy() -> impl Strategy<Value = Version> {
    (
        0u32..50,
        0u32..50,
        proptest::option::of(0u32..20),
        proptest::option::of(0u32..20),
    )
        .prop_map(|(major, minor, build, revision)| Version {
            major,
            minor,
            build: build.into(),
            revision: revision.into(),
        })
}

/// Strategy for generating version text with 2 to 4 segments
fn version_text_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(0u32..1000, 2..=4).prop_map(|parts| {
        parts
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(".")
    })
}

/// Strategy for generating random JSON values with controlled complexity
fn json_value_strategy() -> impl Strategy<Value = JsonValue> {
    let leaf = prop_oneof![
        Just(JsonValue::Null),
        any::<bool>().prop_map(JsonValue::Bool),
        (-100i64..100).prop_map(|n| JsonValue::Number(n.into())),
        "[a-c]{0,3}".prop_map(JsonValue::String),
    ];

    leaf.prop_recursive(
        3,  // max depth
        16, // max size
        4,  // items per collection
        |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..4).prop_map(JsonValue::Array),
                proptest::collection::vec(("[a-c]", inner), 0..4)
                    .prop_map(|entries| JsonValue::Object(entries.into_iter().collect())),
            ]
        },
    )
}

/// Expected rendering: zero components are hidden, revision only after a shown build
fn expected_rendering(text: &str) -> String {
    let parts: Vec<u32> = text.split('.').map(|p| p.parse().unwrap()).collect();
    let mut rendered = format!("{}.{}", parts[0], parts[1]);
    if let Some(&build) = parts.get(2).filter(|b| **b > 0) {
        rendered.push_str(&format!(".{}", build));
        if let Some(&revision) = parts.get(3).filter(|r| **r > 0) {
            rendered.push_str(&format!(".{}", revision));
        }
    }
    rendered
}

proptest! {
    /// Property: rendering follows the zero suppression rule
    #[test]
    fn prop_round_trip(text in version_text_strategy()) {
        let version = Version::parse(&text).unwrap();
        prop_assert_eq!(version.to_string(), expected_rendering(&text));

        // The rendered form parses back to the same rendering
        let reparsed = Version::parse(&version.to_string()).unwrap();
        prop_assert_eq!(reparsed.to_string(), version.to_string());
    }

    /// Property: every version equals and compares equal to itself
    #[test]
    fn prop_version_reflexive(v in version_strategy()) {
        prop_assert_eq!(v, v);
        prop_assert_eq!(Version::compare(&v, &v), Ordering::Equal);
        prop_assert_eq!(compare(&Value::from(v), &Value::from(v)), Some(Ordering::Equal));
    }

    /// Property: swapping operands flips the sign
    #[test]
    fn prop_version_antisymmetric(a in version_strategy(), b in version_strategy()) {
        prop_assert_eq!(Version::compare(&a, &b), Version::compare(&b, &a).reverse());
        prop_assert_eq!((Version::compare(&a, &b) == Ordering::Equal), (a == b));
    }

    /// Property: ordering is transitive
    #[test]
    fn prop_version_transitive(
        a in version_strategy(),
        b in version_strategy(),
        c in version_strategy(),
    ) {
        if Version::compare(&a, &b) == Ordering::Less && Version::compare(&b, &c) == Ordering::Less {
            prop_assert_eq!(Version::compare(&a, &c), Ordering::Less);
        }
    }

    /// Property: the generic comparator agrees with the version order
    #[test]
    fn prop_generic_agrees_with_version(a in version_strategy(), b in version_strategy()) {
        prop_assert_eq!(
            compare(&Value::from(a), &Value::from(b)),
            Some(Version::compare(&a, &b))
        );
    }

    /// Property: generic comparison is reflexive and antisymmetric on documents
    #[test]
    fn prop_values_antisymmetric(a in json_value_strategy(), b in json_value_strategy()) {
        let left = Value::from(a.clone());
        let right = Value::from(b);
        let copy = Value::from(a);

        prop_assert_eq!(compare(&left, &copy), Some(Ordering::Equal));
        prop_assert!(equals(&left, &copy));
        prop_assert_eq!(compare(&left, &right), compare(&right, &left).map(Ordering::reverse));
        prop_assert_eq!(equals(&left, &right), equals(&right, &left));
    }
}
