//! Target type descriptors
//!
//! The static type a caller asks for is mapped onto a small closed set of
//! conversion strategies. Anything not in the table is decoded from JSON.

use std::any::{type_name, TypeId};
use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;

use crate::value::{Address, Complex32, Complex64, ErrorValue, Value};

/// Types `convert_to` can produce.
///
/// Every `DeserializeOwned + Default` type qualifies; the default value is
/// what forced conversions fall back to.
pub trait Target: DeserializeOwned + Default + 'static {}

impl<T: DeserializeOwned + Default + 'static> Target for T {}

/// The conversion strategy selected for a requested type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetType {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    Address,
    F32,
    F64,
    Complex32,
    Complex64,
    Text,
    Error,
    /// `Value` itself
    Any,
    /// `BTreeMap<String, Value>`
    Map,
    /// `Vec<Value>`
    List,
    /// Any other deserializable type, by its type name
    Structured(&'static str),
}

impl TargetType {
    /// Descriptor for the static type `T`
    pub fn of<T: 'static>() -> Self {
        let id = TypeId::of::<T>();

        macro_rules! lookup {
            ($($ty:ty => $variant:ident),* $(,)?) => {
                $(
                    if id == TypeId::of::<$ty>() {
                        return TargetType::$variant;
                    }
                )*
            };
        }

        lookup! {
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
            ErrorValue => Error,
            Value => Any,
            BTreeMap<String, Value> => Map,
            Vec<Value> => List,
        }

        TargetType::Structured(type_name::<T>())
    }

    /// Human readable name used in error reports
    pub fn name(&self) -> &'static str {
        match self {
            TargetType::Bool => "bool",
            TargetType::I8 => "i8",
            TargetType::I16 => "i16",
            TargetType::I32 => "i32",
            TargetType::I64 => "i64",
            TargetType::Isize => "isize",
            TargetType::U8 => "u8",
            TargetType::U16 => "u16",
            TargetType::U32 => "u32",
            TargetType::U64 => "u64",
            TargetType::Usize => "usize",
            TargetType::Address => "address",
            TargetType::F32 => "f32",
            TargetType::F64 => "f64",
            TargetType::Complex32 => "complex32",
            TargetType::Complex64 => "complex64",
            TargetType::Text => "string",
            TargetType::Error => "error",
            TargetType::Any => "any",
            TargetType::Map => "map",
            TargetType::List => "list",
            TargetType::Structured(name) => name,
        }
    }

    /// Whether the target is reached by decoding JSON text
    pub fn is_structured(&self) -> bool {
        matches!(
            self,
            TargetType::Any | TargetType::Map | TargetType::List | TargetType::Structured(_)
        )
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
