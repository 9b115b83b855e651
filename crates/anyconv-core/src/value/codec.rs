//! Serde support for `Value`
//!
//! Decoding mirrors schema-less JSON: every number becomes `F64`. Encoding
//! writes bytes as a numeric array and error values as their message;
//! complex numbers, callables and non-finite floats have no JSON form and
//! fail to encode.

use std::collections::BTreeMap;
use std::fmt;
use std::io;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{self, Serializer};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::ser::{CompactFormatter, Formatter};

use super::Value;
use crate::{Error, Result};

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::I8(n) => serializer.serialize_i8(*n),
            Value::I16(n) => serializer.serialize_i16(*n),
            Value::I32(n) => serializer.serialize_i32(*n),
            Value::I64(n) => serializer.serialize_i64(*n),
            Value::Isize(n) => serializer.serialize_i64(*n as i64),
            Value::U8(n) => serializer.serialize_u8(*n),
            Value::U16(n) => serializer.serialize_u16(*n),
            Value::U32(n) => serializer.serialize_u32(*n),
            Value::U64(n) => serializer.serialize_u64(*n),
            Value::Usize(n) => serializer.serialize_u64(*n as u64),
            Value::Address(a) => serializer.serialize_u64(a.0 as u64),
            Value::F32(n) if !n.is_finite() => Err(non_finite(f64::from(*n))),
            Value::F64(n) if !n.is_finite() => Err(non_finite(*n)),
            Value::F32(n) => match integral(f64::from(*n)) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f32(*n),
            },
            Value::F64(n) => match integral(*n) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
            Value::Complex32(_) | Value::Complex64(_) => Err(ser::Error::custom(
                "unsupported type: complex numbers have no JSON form",
            )),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Bytes(bytes) => serializer.collect_seq(bytes),
            Value::Error(err) => serializer.serialize_str(err.message()),
            Value::Func(_) => Err(ser::Error::custom(
                "unsupported type: callables have no JSON form",
            )),
            Value::List(items) => serializer.collect_seq(items),
            Value::Map(map) => serializer.collect_map(map),
        }
    }
}

/// Whole floats in `i64` range encode as integers, so a decoded `777`
/// encodes back as `777` rather than `777.0`. Larger ones are left to
/// [`FloatFormatter`].
fn integral(n: f64) -> Option<i64> {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    (n.fract() == 0.0 && (-LIMIT..LIMIT).contains(&n)).then_some(n as i64)
}

fn non_finite<E: ser::Error>(n: f64) -> E {
    E::custom(format!("unsupported value: {n} has no JSON form"))
}

/// Writes floats in plain decimal unless the magnitude is below `1e-6` or
/// at least `1e21`, where `1.5e-7` and `1e+21` forms are used. Everything
/// else is delegated to the wrapped formatter.
pub(crate) struct FloatFormatter<F>(pub(crate) F);

impl<F: Formatter> Formatter for FloatFormatter<F> {
    fn write_f64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: f64) -> io::Result<()> {
        let magnitude = value.abs();
        let exponent = magnitude != 0.0 && !(1e-6..1e21).contains(&magnitude);
        writer.write_all(json_float(exponent, value.to_string(), format!("{value:e}")).as_bytes())
    }

    fn write_f32<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: f32) -> io::Result<()> {
        let magnitude = value.abs();
        let exponent = magnitude != 0.0 && !(1e-6..1e21).contains(&magnitude);
        writer.write_all(json_float(exponent, value.to_string(), format!("{value:e}")).as_bytes())
    }

    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.0.begin_object_key(writer, first)
    }

    fn end_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_key(writer)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_value(writer)
    }
}

/// `plain` is the shortest decimal form, `scientific` Rust's `{:e}` form
/// (`1.5e-7`, `1e21`). Positive exponents get a sign and two digits.
fn json_float(exponent: bool, plain: String, scientific: String) -> String {
    if !exponent {
        return plain;
    }
    match scientific.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power:0>2}"),
        _ => scientific,
    }
}

/// Encode `value` as JSON text through `formatter`, with floats written by
/// [`FloatFormatter`]
pub(crate) fn encode<T, F>(value: &T, formatter: F) -> Result<String>
where
    T: Serialize + ?Sized,
    F: Formatter,
{
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, FloatFormatter(formatter));
    value.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|err| Error::Json {
        message: err.to_string(),
    })
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Value, E> {
        Ok(Value::F64(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Value, E> {
        Ok(Value::F64(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Value, E> {
        Ok(Value::F64(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Value, E> {
        Ok(Value::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Value, E> {
        Ok(Value::Text(v))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> std::result::Result<Value, E> {
        Ok(Value::Bytes(v.to_vec()))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> std::result::Result<Value, D::Error> {
        Deserialize::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Value, A::Error> {
        let mut map = BTreeMap::new();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            map.insert(key, value);
        }
        Ok(Value::Map(map))
    }
}

impl Value {
    /// Decode JSON text into a value
    pub fn from_json_str(text: &str) -> Result<Value> {
        Ok(serde_json::from_str(text)?)
    }

    /// Encode as compact JSON text
    pub fn to_json_string(&self) -> Result<String> {
        encode(self, CompactFormatter)
    }
}
