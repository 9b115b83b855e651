//! Integration tests for the coercion engine
//!
//! This file covers:
//! - Scalar targets across every source variant
//! - Stringification of aggregates and callables
//! - Structured, optional and mapping targets
//! - Forced conversion and helper round trips


use std::collections::BTreeMap;

use anyconv_core::helpers::{clone_cast, to_json, to_string_map};
use anyconv_core::{
    callable, convert_to, convert_to_force, stringify, Address, Callable, Complex32, Complex64,
    ConversionKind, ErrorValue, Value,
};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use test_support::{document, Rect};

// ============================================================================
// CALLABLE FIXTURES
// ============================================================================

fn join_words(words: &[&str], sep: &str) -> String {
    words.join(sep)
}

struct Square {
    side: f64,
}

impl Square {
    pub fn area(&self) -> f64 {
        self.side * self.side
    }
}

trait Shape {
    fn area(&self) -> f64;

    fn name(&self) -> String {
        String::from("shape")
    }
}

impl Shape for Square {
    fn area(&self) -> f64 {
        0.0
    }
}

impl Shape for &Square {
    fn area(&self) -> f64 {
        -1.0
    }
}

mod geometry {
    pub fn double(n: i32) -> i32 {
        n * 2
    }
}

fn located(path: &str, signature: &str) -> Callable {
    Callable::new(path, signature).with_location(file!(), env!("CARGO_MANIFEST_DIR"))
}

// ============================================================================
// SCALAR TARGETS
// ============================================================================

#[test]
fn test_identity_for_every_variant() {
    for sample in test_support::scalar_samples() {
        assert_eq!(convert_to::<Value>(&sample).unwrap(), sample);
    }
    assert_eq!(convert_to::<Complex32>(&Value::Complex32(Complex32::new(1.0, 2.0))).unwrap(), Complex32::new(1.0, 2.0));
    assert_eq!(convert_to::<Address>(&Value::Address(Address(3))).unwrap(), Address(3));
    assert_eq!(convert_to::<Vec<u8>>(&Value::Bytes(vec![1, 2])).unwrap(), vec![1, 2]);
}

#[test]
fn test_integers_from_text_and_numbers() {
    assert_eq!(convert_to::<i64>(&Value::from("77")).unwrap(), 77);
    assert_eq!(convert_to::<i64>(&Value::F64(77.0)).unwrap(), 77);
    assert_eq!(convert_to::<i8>(&Value::U64(77)).unwrap(), 77);
    assert_eq!(convert_to::<u16>(&Value::from("65535")).unwrap(), 65535);
    assert_eq!(convert_to::<isize>(&Value::from("-5")).unwrap(), -5);
    assert_eq!(convert_to::<usize>(&Value::Bool(true)).unwrap_err().conversion_kind(), Some(ConversionKind::Syntax));
}

#[test]
fn test_integer_failures() {
    let cases = [
        (Value::F64(77.1), ConversionKind::Syntax),
        (Value::from("77x"), ConversionKind::Syntax),
        (Value::Null, ConversionKind::Syntax),
        (Value::Complex64(Complex64::new(77.0, 0.0)), ConversionKind::Syntax),
        (Value::from("128"), ConversionKind::Range),
    ];
    for (value, kind) in cases {
        let err = convert_to::<i8>(&value).unwrap_err();
        assert_eq!(err.conversion_kind(), Some(kind), "{value:?}");
    }
    assert!(convert_to::<u32>(&Value::I32(-1)).is_err());
}

#[test]
fn test_floats() {
    assert_eq!(convert_to::<f64>(&Value::from("77.1")).unwrap(), 77.1);
    assert_eq!(convert_to::<f64>(&Value::I16(-3)).unwrap(), -3.0);
    assert_eq!(convert_to::<f32>(&Value::F64(0.5)).unwrap(), 0.5);
    assert_eq!(
        convert_to::<f32>(&Value::F64(1e39)).unwrap_err().conversion_kind(),
        Some(ConversionKind::Range)
    );
    assert!(convert_to::<f64>(&Value::Complex64(Complex64::new(1.0, 0.0))).is_err());
}

#[test]
fn test_complex() {
    assert_eq!(convert_to::<Complex64>(&Value::from("(1.5-2i)")).unwrap(), Complex64::new(1.5, -2.0));
    assert_eq!(convert_to::<Complex32>(&Value::I32(77)).unwrap(), Complex32::new(77.0, 0.0));
    assert_eq!(
        convert_to::<Complex64>(&Value::Complex32(Complex32::new(1.0, 1.0))).unwrap(),
        Complex64::new(1.0, 1.0)
    );
    assert!(convert_to::<Complex64>(&Value::from("abc")).is_err());
}

#[test]
fn test_bool() {
    let falsy = [Value::from(""), Value::Null, Value::from("<nil>"), Value::from("false"), Value::I64(0), Value::Bool(false)];
    for value in falsy {
        assert!(!convert_to::<bool>(&value).unwrap(), "{value:?}");
    }
    let truthy = [Value::from("yes"), Value::from("T"), Value::I64(1), Value::F64(7.7), Value::from("[]")];
    for value in truthy {
        assert!(convert_to::<bool>(&value).unwrap(), "{value:?}");
    }
}

#[test]
fn test_address_always_fails() {
    for value in [Value::from("77"), Value::U64(77), Value::Null] {
        let err = convert_to::<Address>(&value).unwrap_err();
        assert_eq!(err.conversion_kind(), Some(ConversionKind::Unsupported));
    }
}

#[test]
fn test_error_target() {
    assert_eq!(convert_to::<ErrorValue>(&Value::from("failed")).unwrap().message(), "failed");
    assert_eq!(convert_to::<ErrorValue>(&Value::I32(5)).unwrap().message(), "5");
}

// ============================================================================
// STRINGIFICATION
// ============================================================================

#[test]
fn test_text_of_scalars() {
    assert_eq!(convert_to::<String>(&Value::F64(77.0)).unwrap(), "77");
    assert_eq!(convert_to::<String>(&Value::F64(77.1)).unwrap(), "77.1");
    assert_eq!(convert_to::<String>(&Value::F32(7.7)).unwrap(), "7.7");
    assert_eq!(convert_to::<String>(&Value::Complex64(Complex64::new(77.0, 0.0))).unwrap(), "(77+0i)");
    assert_eq!(convert_to::<String>(&Value::Null).unwrap(), "<nil>");
    assert_eq!(convert_to::<String>(&Value::Error(ErrorValue::new("oops"))).unwrap(), "oops");
}

#[test]
fn test_text_of_aggregates() {
    let list = Value::list([
        Value::I64(777),
        Value::from("777"),
        Value::Bool(true),
        Value::F64(7.7),
        Value::Null,
    ]);
    assert_eq!(stringify(&list), r#"[777,"777",true,7.7,null]"#);

    let bytes = Value::Bytes(b"byte to string".to_vec());
    assert_eq!(
        stringify(&bytes),
        "[98,121,116,101,32,116,111,32,115,116,114,105,110,103]"
    );

    let rect = Value::from_serialize(&Rect { x: 777, y: 888 }).unwrap();
    assert_eq!(stringify(&rect), r#"{"X":777,"Y":888}"#);

    let map = Value::map([("b", Value::I32(2)), ("a", Value::list(vec![true]))]);
    assert_eq!(stringify(&map), r#"{"a":[true],"b":2}"#);
}

#[test]
fn test_text_of_decoded_document_is_stable() {
    let doc = document(r#"{"b":[1,2.5,"x"],"a":null}"#);
    assert_eq!(stringify(&doc), r#"{"a":null,"b":[1,2.5,"x"]}"#);
}

#[test]
fn test_text_of_free_function() {
    let value = Value::from(callable!(join_words => fn(&[&str], &str) -> String));
    assert_eq!(
        stringify(&value),
        "fn join_words(words: &[&str], sep: &str) -> String {\n    words.join(sep)\n}"
    );
}

#[test]
fn test_text_of_inline_module_function() {
    let callable = callable!(geometry::double => fn(i32) -> i32);
    assert_eq!(callable.render(), "pub fn double(n: i32) -> i32 {\n    n * 2\n}");
}

#[test]
fn test_text_of_inherent_method() {
    let callable = callable!(Square::area => fn(&Square) -> f64);
    assert_eq!(
        callable.render(),
        "pub fn area(&self) -> f64 {\n    self.side * self.side\n}"
    );
}

#[test]
fn test_text_of_trait_impls_by_self_type() {
    let by_value = callable!(<Square as Shape>::area => fn(&Square) -> f64);
    assert_eq!(by_value.render(), "fn area(&self) -> f64 {\n    0.0\n}");

    let by_ref = callable!(<&Square as Shape>::area => fn(&&'static Square) -> f64);
    assert_eq!(by_ref.render(), "fn area(&self) -> f64 {\n    -1.0\n}");
}

#[test]
fn test_text_of_trait_default_method() {
    let callable = located("Shape::name", "fn(&Square) -> String");
    assert_eq!(
        callable.render(),
        "fn name(&self) -> String {\n    String::from(\"shape\")\n}"
    );
    assert_eq!(Square { side: 1.0 }.name(), "shape");
}

#[test]
fn test_signature_fallbacks() {
    let no_body = located("Shape::area", "fn(&Square) -> f64");
    assert_eq!(no_body.render(), "fn(&Square) -> f64");

    let closure = callable!(|a: i32, b: i32| a * b => fn(i32, i32) -> i32);
    assert_eq!(stringify(&Value::from(closure)), "fn(i32, i32) -> i32");

    let square = Square { side: 2.0 };
    let bound = callable!(bound || square.area() => fn() -> f64);
    assert_eq!(bound.render(), "fn() -> f64");

    let missing = located("not_declared_anywhere", "fn()");
    assert_eq!(missing.render(), "fn()");

    let joined = callable!(bound |parts: &[&str]| parts.concat() => fn(&[&str]) -> String);
    assert_eq!(stringify(&Value::from(joined)), "fn(&[&str]) -> String");
}

#[test]
fn test_callable_identity() {
    let callable = callable!(join_words => fn(&[&str], &str) -> String);
    let value = Value::from(callable.clone());
    assert_eq!(value.exact::<Callable>(), Some(callable));
    assert_eq!(convert_to::<Value>(&value).unwrap(), value);
}

// ============================================================================
// STRUCTURED TARGETS
// ============================================================================

#[derive(Debug, Default, PartialEq, Deserialize)]
struct Other(String);

#[test]
fn test_struct_target() {
    for text in ["null", "<nil>", "", "{}"] {
        assert_eq!(convert_to::<Rect>(&Value::from(text)).unwrap(), Rect::default(), "{text}");
    }
    assert_eq!(convert_to::<Rect>(&Value::Null).unwrap(), Rect::default());
    assert_eq!(
        convert_to::<Rect>(&Value::from(r#"{"X":777,"Y":888}"#)).unwrap(),
        Rect { x: 777, y: 888 }
    );

    let from_tree = Value::map([("X", Value::F64(1.0)), ("Y", Value::I8(2))]);
    assert_eq!(convert_to::<Rect>(&from_tree).unwrap(), Rect { x: 1, y: 2 });
}

#[derive(Debug, Default, PartialEq, Deserialize)]
struct Stamp {
    ts: i64,
}

#[test]
fn test_struct_target_with_large_integer() {
    let decoded = Value::from_json_str(r#"{"ts":1700000000000000}"#).unwrap();
    assert_eq!(
        convert_to::<Stamp>(&decoded).unwrap(),
        Stamp { ts: 1_700_000_000_000_000 }
    );

    let built = Value::map([("ts", Value::F64(-9.0e15))]);
    assert_eq!(convert_to::<Stamp>(&built).unwrap(), Stamp { ts: -9_000_000_000_000_000 });
}

#[test]
fn test_optional_struct_target() {
    for value in [Value::from("null"), Value::Null, Value::from("")] {
        assert_eq!(convert_to::<Option<Rect>>(&value).unwrap(), None, "{value:?}");
    }
    assert_eq!(convert_to::<Option<Rect>>(&Value::from("{}")).unwrap(), Some(Rect::default()));
}

#[test]
fn test_map_target() {
    for value in [Value::from(""), Value::Null, Value::from("null"), Value::from("{}")] {
        assert!(convert_to::<BTreeMap<String, Value>>(&value).unwrap().is_empty(), "{value:?}");
    }

    let decoded = convert_to::<BTreeMap<String, Value>>(&Value::from(r#"{"a":7,"b":{"c":"d"}}"#)).unwrap();
    assert_eq!(decoded.get("a"), Some(&Value::F64(7.0)));
    assert_eq!(decoded.get("b"), Some(&Value::map([("c", "d")])));

    let typed = convert_to::<BTreeMap<String, i64>>(&Value::from(r#"{"a":7}"#)).unwrap();
    assert_eq!(typed, BTreeMap::from([("a".to_string(), 7)]));
}

#[test]
fn test_list_target() {
    let decoded = convert_to::<Vec<Value>>(&Value::from(r#"[1,"x",null]"#)).unwrap();
    assert_eq!(decoded, vec![Value::F64(1.0), Value::from("x"), Value::Null]);
    assert!(convert_to::<Vec<Value>>(&Value::from("")).unwrap().is_empty());
}

#[test]
fn test_any_target_returns_input() {
    let value = Value::from("{}");
    assert_eq!(convert_to::<Value>(&value).unwrap(), value);
}

#[test]
fn test_named_text_type_is_decoded_not_parsed() {
    assert_eq!(
        convert_to::<Other>(&Value::from("77")).unwrap_err().conversion_kind(),
        Some(ConversionKind::Decode)
    );
    assert!(convert_to::<Other>(&Value::U64(77)).is_err());
    assert_eq!(convert_to::<Other>(&Value::from(r#""77""#)).unwrap(), Other("77".to_string()));
}

#[test]
fn test_decode_error_names_both_types() {
    let err = convert_to::<Rect>(&Value::from("[1]")).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("string"), "{message}");
    assert!(message.contains("Rect"), "{message}");
    assert!(message.contains("[1]"), "{message}");
}

// ============================================================================
// FORCED CONVERSION AND HELPERS
// ============================================================================

#[test]
fn test_force_returns_default_on_failure() {
    assert_eq!(convert_to_force::<i8>(&Value::from("128")), 0);
    assert_eq!(convert_to_force::<f64>(&Value::from("1.25")), 1.25);
    assert_eq!(convert_to_force::<Rect>(&Value::from("[")), Rect::default());
    assert_eq!(convert_to_force::<Option<Rect>>(&Value::from("{}")), Some(Rect::default()));
}

#[test]
fn test_clone_cast_and_string_map() {
    let ints: Vec<i64> = clone_cast(&["0", "1", "2"]);
    assert_eq!(ints, vec![0, 1, 2]);

    let strings: Vec<String> = clone_cast(&[3.3f64, 4.4, 5.5]);
    assert_eq!(strings, vec!["3.3", "4.4", "5.5"]);

    let map = to_string_map(&Value::from(r#"{"x":null,"y":777}"#));
    assert_eq!(
        map,
        BTreeMap::from([
            ("x".to_string(), "<nil>".to_string()),
            ("y".to_string(), "777".to_string()),
        ])
    );
}

#[test]
fn test_to_json_of_values() {
    let value = Value::map([("a", Value::I32(7)), ("b", Value::from("8")), ("c", Value::Bool(true)), ("d", Value::Null)]);
    assert_eq!(to_json(&value, ""), r#"{"a":7,"b":"8","c":true,"d":null}"#);
    assert_eq!(
        to_json(&value, "\t"),
        "{\n\t\"a\": 7,\n\t\"b\": \"8\",\n\t\"c\": true,\n\t\"d\": null\n}"
    );
}
