//! Anyconv Core - type coercion and path extraction for loosely-typed values
//!
//! This crate turns schema-less data (decoded JSON, hand-built value trees)
//! into concrete Rust types, and pulls values out of nested trees with
//! wildcard and regex paths.
//!
//! # Main Components
//!
//! - **Value Model**: `Value`, a closed set of scalar, aggregate and
//!   callable shapes with a serde codec
//! - **Coercion Engine**: `convert_to` / `convert_to_force` into any
//!   deserializable type, via a canonical text rendering (`stringify`)
//! - **Path Extraction**: strict `get_item` and best-effort `get_items`
//! - **Helpers**: map merging and decoding, element-wise casts, string utilities
//!
//! # Example
//!
//! ```
//! use anyconv_core::{convert_to, get_items, Result, Value};
//!
//! fn example() -> Result<()> {
//!     let doc = Value::from_json_str(r#"{"items":[{"n":"7"},{"n":8}]}"#)?;
//!     let total: i64 = get_items(&doc, "items.#.n", &[])
//!         .iter()
//!         .map(convert_to::<i64>)
//!         .sum::<Result<i64>>()?;
//!     assert_eq!(total, 15);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod conversion;
pub mod error;
pub mod extraction;
pub mod helpers;
pub mod value;

#[cfg(test)]
mod proptest_strategies;

// Re-export main types for convenience
pub use conversion::{convert_to, convert_to_force, stringify, ternary, Target, TargetType, NIL_MARKER};
pub use error::{ConversionKind, Error, Result};
pub use extraction::{get_item, get_items, ExtractOption, ExtractionConfig, Extractor};
pub use value::{Address, Callable, Complex, Complex32, Complex64, ErrorValue, Value};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
