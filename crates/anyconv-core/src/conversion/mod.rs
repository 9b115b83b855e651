//! Coercion engine
//!
//! `convert_to` turns any [`Value`] into a requested static type. A value
//! that already holds the target type is returned as is. Everything else is
//! rendered to text with [`stringify`] and parsed back as the target:
//! scalar literals for scalar targets, JSON for everything structured.
//!
//! ```
//! use anyconv_core::{convert_to, Value};
//!
//! let n: i64 = convert_to(&Value::from("77")).unwrap();
//! assert_eq!(n, 77);
//! assert!(convert_to::<i64>(&Value::F64(77.1)).is_err());
//! ```
//!
//! Copyright (c) 2025 Anyconv Team
//! Licensed under the Apache-2.0 license

mod parse;
pub(crate) mod source;
pub mod stringify;
pub mod target;

pub use stringify::{stringify, NIL_MARKER};
pub use target::{Target, TargetType};

use crate::error::{ConversionKind, Error, Result};
use crate::value::{ErrorValue, Value};

use parse::{
    parse_bool, parse_complex32, parse_complex64, parse_f32, parse_f64, parse_signed,
    parse_unsigned,
};

const NULL_LITERAL: &str = "null";

/// Convert `value` into `T`
pub fn convert_to<T: Target>(value: &Value) -> Result<T> {
    if let Some(out) = value.exact::<T>() {
        return Ok(out);
    }

    let target = TargetType::of::<T>();
    if target.is_structured() {
        return decode_structured(value, target);
    }

    let text = stringify(value);
    let fail = |kind: ConversionKind| Error::conversion(value, target.name(), kind);

    let converted = match target {
        TargetType::Bool => Value::Bool(to_bool(&text)),
        TargetType::I8 => Value::I8(parse_signed(&text).map_err(fail)?),
        TargetType::I16 => Value::I16(parse_signed(&text).map_err(fail)?),
        TargetType::I32 => Value::I32(parse_signed(&text).map_err(fail)?),
        TargetType::I64 => Value::I64(parse_signed(&text).map_err(fail)?),
        TargetType::Isize => Value::Isize(parse_signed(&text).map_err(fail)?),
        TargetType::U8 => Value::U8(parse_unsigned(&text).map_err(fail)?),
        TargetType::U16 => Value::U16(parse_unsigned(&text).map_err(fail)?),
        TargetType::U32 => Value::U32(parse_unsigned(&text).map_err(fail)?),
        TargetType::U64 => Value::U64(parse_unsigned(&text).map_err(fail)?),
        TargetType::Usize => Value::Usize(parse_unsigned(&text).map_err(fail)?),
        TargetType::F32 => Value::F32(parse_f32(&text).map_err(fail)?),
        TargetType::F64 => Value::F64(parse_f64(&text).map_err(fail)?),
        TargetType::Complex32 => Value::Complex32(parse_complex32(&text).map_err(fail)?),
        TargetType::Complex64 => Value::Complex64(parse_complex64(&text).map_err(fail)?),
        TargetType::Text => Value::Text(text),
        TargetType::Error => Value::Error(ErrorValue::new(text)),
        TargetType::Address
        | TargetType::Any
        | TargetType::Map
        | TargetType::List
        | TargetType::Structured(_) => return Err(fail(ConversionKind::Unsupported)),
    };

    converted
        .exact::<T>()
        .ok_or_else(|| fail(ConversionKind::Unsupported))
}

/// Convert `value` into `T`, falling back to `T::default()` on failure
pub fn convert_to_force<T: Target>(value: &Value) -> T {
    convert_to(value).unwrap_or_else(|err| {
        log::debug!("Forced conversion fell back to default: {}", err);
        T::default()
    })
}

/// Pick `when_true` or `when_false`
pub fn ternary<T>(condition: bool, when_true: T, when_false: T) -> T {
    if condition {
        when_true
    } else {
        when_false
    }
}

/// Empty text and the nil marker are false, unknown literals are true
fn to_bool(text: &str) -> bool {
    if text.is_empty() || text == NIL_MARKER {
        return false;
    }
    parse_bool(text).unwrap_or(true)
}

fn decode_structured<T: Target>(value: &Value, target: TargetType) -> Result<T> {
    let text = stringify(value);
    if text.is_empty() {
        return Ok(T::default());
    }
    let text = if text == NIL_MARKER { NULL_LITERAL } else { text.as_str() };

    match serde_json::from_str::<T>(text) {
        Ok(out) => Ok(out),
        // types that cannot hold null take their default instead
        Err(_) if text == NULL_LITERAL => Ok(T::default()),
        Err(err) => {
            log::debug!("Cannot decode {} as {}: {}", value.type_name(), target, err);
            Err(Error::conversion(value, target.name(), ConversionKind::Decode))
        }
    }
}
