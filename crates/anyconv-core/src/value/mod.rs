//! Dynamic value model
//!
//! `Value` is the closed set of shapes anyconv can coerce from and extract
//! through: scalars of every width, complex numbers, text, raw bytes,
//! error values, callable references, sequences and string-keyed mappings.
//! Mappings are `BTreeMap`s, so every walk over them is in sorted key order.
//!
//! Copyright (c) 2025 Anyconv Team
//! Licensed under the Apache-2.0 license

use std::any::{Any, TypeId};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

pub mod callable;
pub(crate) mod codec;
pub mod complex;

pub use callable::Callable;
pub use complex::{Complex, Complex32, Complex64};

/// A loosely-typed value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    Address(Address),
    F32(f32),
    F64(f64),
    Complex32(Complex32),
    Complex64(Complex64),
    Text(String),
    Bytes(Vec<u8>),
    Error(ErrorValue),
    Func(Callable),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

/// Address-sized integer, kept apart from `usize` so it can be targeted
/// (and refused) on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub usize);

/// An error carried as data
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorValue {
    message: String,
}

impl ErrorValue {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ErrorValue {}

impl Value {
    /// Build a sequence from anything convertible into values
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a mapping from key/value pairs
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Short name of the variant, used in error reports
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::I8(_) => "i8",
            Value::I16(_) => "i16",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::Isize(_) => "isize",
            Value::U8(_) => "u8",
            Value::U16(_) => "u16",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::Usize(_) => "usize",
            Value::Address(_) => "address",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::Complex32(_) => "complex32",
            Value::Complex64(_) => "complex64",
            Value::Text(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Error(_) => "error",
            Value::Func(_) => "fn",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Return the payload if this value holds exactly `T`.
    ///
    /// `T = Value` always matches. Otherwise the payload type of the
    /// variant must be `T` itself, e.g. `Value::I32` only yields `i32`.
    pub fn exact<T: 'static>(&self) -> Option<T> {
        if TypeId::of::<T>() == TypeId::of::<Value>() {
            return downcast(self.clone());
        }
        match self {
            Value::Null => None,
            Value::Bool(v) => downcast(*v),
            Value::I8(v) => downcast(*v),
            Value::I16(v) => downcast(*v),
            Value::I32(v) => downcast(*v),
            Value::I64(v) => downcast(*v),
            Value::Isize(v) => downcast(*v),
            Value::U8(v) => downcast(*v),
            Value::U16(v) => downcast(*v),
            Value::U32(v) => downcast(*v),
            Value::U64(v) => downcast(*v),
            Value::Usize(v) => downcast(*v),
            Value::Address(v) => downcast(*v),
            Value::F32(v) => downcast(*v),
            Value::F64(v) => downcast(*v),
            Value::Complex32(v) => downcast(*v),
            Value::Complex64(v) => downcast(*v),
            Value::Text(v) => downcast(v.clone()),
            Value::Bytes(v) => downcast(v.clone()),
            Value::Error(v) => downcast(v.clone()),
            Value::Func(v) => downcast(v.clone()),
            Value::List(v) => downcast(v.clone()),
            Value::Map(v) => downcast(v.clone()),
        }
    }

    /// Build a value from anything serde can serialize.
    ///
    /// Numbers come back as `F64`, exactly as if the JSON text had been
    /// decoded.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> crate::Result<Value> {
        Ok(serde_json::to_value(value)?.into())
    }
}

/// Move `value` into `T` when `U` and `T` are the same type
fn downcast<T: 'static, U: 'static>(value: U) -> Option<T> {
    let mut slot = Some(value);
    (&mut slot as &mut dyn Any)
        .downcast_mut::<Option<T>>()
        .and_then(Option::take)
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from_scalar! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    Address => Address,
    f32 => F32,
    f64 => F64,
    Complex32 => Complex32,
    Complex64 => Complex64,
    String => Text,
    Vec<u8> => Bytes,
    ErrorValue => Error,
    Callable => Func,
    Vec<Value> => List,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl<V: Into<Value>> From<Option<V>> for Value {
    fn from(v: Option<V>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<K: Into<String>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(map: BTreeMap<K, V>) -> Self {
        Value::map(map)
    }
}

impl<K: Into<String>, V: Into<Value>> From<HashMap<K, V>> for Value {
    fn from(map: HashMap<K, V>) -> Self {
        Value::map(map)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Value::Null, Value::F64),
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => Value::list(items),
            serde_json::Value::Object(map) => Value::map(map),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::conversion::stringify(self))
    }
}
