//! Property-based testing strategies for generating test data
//!
//! Values here stay within what JSON can carry, so they survive a trip
//! through text unchanged.

#![cfg(test)]

use proptest::collection::{btree_map, vec};
use proptest::prelude::*;

use crate::value::Value;

/// Mapping keys safe to use as path segments
pub fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}"
}

/// JSON-representable leaves
pub fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1_000_000i64..1_000_000).prop_map(|n| Value::F64(n as f64)),
        (-1.0e6f64..1.0e6).prop_map(Value::F64),
        "[a-zA-Z0-9 ]{0,16}".prop_map(Value::Text),
    ]
}

/// Nested values of limited depth
pub fn value_strategy() -> impl Strategy<Value = Value> {
    leaf_strategy().prop_recursive(3, 24, 5, |inner| {
        prop_oneof![
            vec(inner.clone(), 0..5).prop_map(Value::List),
            btree_map(key_strategy(), inner, 0..5).prop_map(Value::Map),
        ]
    })
}

/// Mappings at the root, the usual shape of decoded documents
pub fn document_strategy() -> impl Strategy<Value = Value> {
    btree_map(key_strategy(), value_strategy(), 0..6).prop_map(Value::Map)
}

/// Paths over generated keys, wildcards and indices
pub fn path_strategy() -> impl Strategy<Value = String> {
    let segment = prop_oneof![
        key_strategy(),
        Just("#".to_string()),
        Just("#k".to_string()),
        Just("#v".to_string()),
        (0usize..4).prop_map(|i| i.to_string()),
    ];
    vec(segment, 1..5).prop_map(|segments| segments.join("."))
}
