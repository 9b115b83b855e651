//! Canonical text rendering of values
//!
//! Every coercion goes through this rendering first, so it doubles as the
//! wire format between source and target types.
//!
//! Copyright (c) 2025 Anyconv Team
//! Licensed under the Apache-2.0 license

use crate::value::Value;

/// Text rendering of `Value::Null`
pub const NIL_MARKER: &str = "<nil>";

/// Render a value as text.
///
/// Scalars render as their literal, bytes as a JSON number array,
/// aggregates as compact JSON with sorted keys, and callables as their
/// source text or, failing that, their signature. An aggregate holding a
/// value with no JSON form renders as the empty string.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => NIL_MARKER.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::I8(n) => n.to_string(),
        Value::I16(n) => n.to_string(),
        Value::I32(n) => n.to_string(),
        Value::I64(n) => n.to_string(),
        Value::Isize(n) => n.to_string(),
        Value::U8(n) => n.to_string(),
        Value::U16(n) => n.to_string(),
        Value::U32(n) => n.to_string(),
        Value::U64(n) => n.to_string(),
        Value::Usize(n) => n.to_string(),
        Value::Address(a) => a.0.to_string(),
        Value::F32(n) => format_f32(*n),
        Value::F64(n) => format_f64(*n),
        Value::Complex32(c) => c.to_string(),
        Value::Complex64(c) => c.to_string(),
        Value::Text(s) => s.clone(),
        Value::Error(err) => err.message().to_string(),
        Value::Func(callable) => callable.render(),
        Value::Bytes(_) | Value::List(_) | Value::Map(_) => match value.to_json_string() {
            Ok(json) => json,
            Err(err) => {
                log::debug!("Rendering {} as empty text: {}", value.type_name(), err);
                String::new()
            }
        },
    }
}

/// Shortest round-trip rendering of an `f64`
pub(crate) fn format_f64(n: f64) -> String {
    if let Some(special) = non_finite(n.is_nan(), n.is_infinite(), n > 0.0) {
        return special.to_string();
    }
    exponent_form(format!("{n:e}")).unwrap_or_else(|| n.to_string())
}

/// Shortest round-trip rendering of an `f32`
pub(crate) fn format_f32(n: f32) -> String {
    if let Some(special) = non_finite(n.is_nan(), n.is_infinite(), n > 0.0) {
        return special.to_string();
    }
    exponent_form(format!("{n:e}")).unwrap_or_else(|| n.to_string())
}

fn non_finite(nan: bool, infinite: bool, positive: bool) -> Option<&'static str> {
    match (nan, infinite, positive) {
        (true, _, _) => Some("NaN"),
        (false, true, true) => Some("+Inf"),
        (false, true, false) => Some("-Inf"),
        _ => None,
    }
}

/// Rewrite `1.5e-7` as `1.5e-07` when the exponent is below -4 or at
/// least 21; `None` means plain decimal notation should be used.
fn exponent_form(scientific: String) -> Option<String> {
    let (mantissa, exponent) = scientific.split_once('e')?;
    let exponent: i32 = exponent.parse().ok()?;
    if (-4..21).contains(&exponent) {
        return None;
    }
    let sign = if exponent < 0 { '-' } else { '+' };
    Some(format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs()))
}
