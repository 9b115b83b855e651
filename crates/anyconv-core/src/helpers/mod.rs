//! Small utilities built on top of the coercion engine
//!
//! Map merging and decoding, element-wise casts, and a handful of string
//! helpers.

pub mod maps;
pub mod slices;
pub mod strings;

pub use maps::{join, join_any, to_map, to_string_map};
pub use slices::clone_cast;
pub use strings::{index_of_nth, replace_all_submatch_func, snake_to_title, to_json, version_as_integer};
