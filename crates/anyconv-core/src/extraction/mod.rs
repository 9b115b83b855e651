//! Path extraction
//!
//! Two ways to reach into a [`Value`]:
//!
//! - [`get_item`] follows a literal path strictly and fails on the first
//!   segment that does not fit the node it lands on.
//! - [`get_items`] walks a path with wildcards (`#`, `#v`, `#k`) and regex
//!   key segments (`^...`) and collects every terminal it reaches. It never
//!   fails: branches that cannot be followed contribute nothing, or null
//!   when only the last segment is missing.
//!
//! ```
//! use anyconv_core::{get_items, Value};
//!
//! let value = Value::from_json_str(r#"{"items":[{"v":"a"},{"w":"b"}]}"#).unwrap();
//! assert_eq!(get_items(&value, "items.#.v", &[]), vec![Value::from("a"), Value::Null]);
//! ```
//!
//! Copyright (c) 2025 Anyconv Team
//! Licensed under the Apache-2.0 license

use std::collections::BTreeMap;

use regex::Regex;

pub mod config;
pub mod segment;


pub use config::{ExtractOption, ExtractionConfig, DEFAULT_SEPARATOR, DOT_ALTERNATIVE};
pub use segment::Segment;

use crate::conversion::{convert_to, Target};
use crate::error::{Error, Result};
use crate::value::Value;

static NULL: Value = Value::Null;

/// Resolve a literal path strictly and convert the result into `T`.
///
/// Segments that parse as integers index sequences; every other segment
/// is a mapping key. A missing key resolves to null and the walk goes on.
pub fn get_item<T: Target>(value: &Value, path: &str, separator: &str) -> Result<T> {
    let mut node = value;

    for segment in split_path(path, separator) {
        node = match segment.parse::<i64>() {
            Ok(index) => {
                let Value::List(items) = node else {
                    return Err(Error::shape(segment, path, "list", node));
                };
                usize::try_from(index)
                    .ok()
                    .and_then(|i| items.get(i))
                    .ok_or_else(|| Error::index_out_of_bounds(index, items.len(), segment, path))?
            }
            Err(_) => {
                let Value::Map(map) = node else {
                    return Err(Error::shape(segment, path, "map", node));
                };
                map.get(segment).unwrap_or(&NULL)
            }
        };
    }

    convert_to(node)
}

/// Collect every value `path` reaches, split on `.`
pub fn get_items(value: &Value, path: &str, options: &[ExtractOption]) -> Vec<Value> {
    Extractor::new().get_items_with(value, path, options)
}

/// Path extraction with a custom separator, dot alternative, or default
/// options
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractionConfig,
}

impl Extractor {
    /// Create an extractor with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Strict lookup using the configured separator
    pub fn get_item<T: Target>(&self, value: &Value, path: &str) -> Result<T> {
        get_item(value, path, &self.config.separator)
    }

    /// Best-effort extraction with the configured options
    pub fn get_items(&self, value: &Value, path: &str) -> Vec<Value> {
        self.get_items_with(value, path, &[])
    }

    /// Best-effort extraction with `options` added to the configured ones
    pub fn get_items_with(&self, value: &Value, path: &str, options: &[ExtractOption]) -> Vec<Value> {
        let omit_null = self.config.has_option(ExtractOption::OmitNull)
            || options.contains(&ExtractOption::OmitNull);
        let segments: Vec<Segment<'_>> = split_path(path, &self.config.separator)
            .into_iter()
            .map(Segment::parse)
            .collect();

        let walk = Walk {
            dot_alternative: &self.config.dot_alternative,
            omit_null,
        };
        let mut out = Vec::new();
        walk.descend(value, &segments, &mut out);
        out
    }
}

/// Split `path` on `separator`. An empty separator splits after every
/// character.
fn split_path<'p>(path: &'p str, separator: &str) -> Vec<&'p str> {
    if separator.is_empty() {
        return path
            .char_indices()
            .map(|(i, c)| &path[i..i + c.len_utf8()])
            .collect();
    }
    path.split(separator).collect()
}

struct Walk<'c> {
    dot_alternative: &'c str,
    omit_null: bool,
}

impl Walk<'_> {
    fn descend(&self, node: &Value, segments: &[Segment<'_>], out: &mut Vec<Value>) {
        let Some((segment, rest)) = segments.split_first() else {
            self.emit(node.clone(), out);
            return;
        };

        match node {
            Value::List(items) => self.descend_sequence(items, segment, rest, out),
            Value::Bytes(bytes) => {
                let items: Vec<Value> = bytes.iter().copied().map(Value::U8).collect();
                self.descend_sequence(&items, segment, rest, out);
            }
            Value::Map(map) => self.descend_map(map, segment, rest, out),
            // scalars have nothing left to walk into
            _ => {}
        }
    }

    fn descend_sequence(&self, items: &[Value], segment: &Segment<'_>, rest: &[Segment<'_>], out: &mut Vec<Value>) {
        match segment {
            Segment::Values => {
                for item in items {
                    self.descend(item, rest, out);
                }
            }
            Segment::Keys => {
                for index in 0..items.len() {
                    self.descend(&Value::Usize(index), rest, out);
                }
            }
            Segment::Pattern(_) | Segment::Literal(_) => {
                match segment.index().and_then(|i| items.get(i)) {
                    Some(item) => self.descend(item, rest, out),
                    None => self.missing(rest, out),
                }
            }
        }
    }

    fn descend_map(
        &self,
        map: &BTreeMap<String, Value>,
        segment: &Segment<'_>,
        rest: &[Segment<'_>],
        out: &mut Vec<Value>,
    ) {
        match segment {
            Segment::Values => {
                for value in map.values() {
                    self.descend(value, rest, out);
                }
            }
            Segment::Keys => {
                for key in map.keys() {
                    self.descend(&Value::Text(key.clone()), rest, out);
                }
            }
            Segment::Pattern(raw) => {
                let pattern = if self.dot_alternative.is_empty() {
                    raw.to_string()
                } else {
                    raw.replace(self.dot_alternative, ".")
                };
                match Regex::new(&pattern) {
                    Ok(re) => {
                        for (_, value) in map.iter().filter(|(key, _)| re.is_match(key)) {
                            self.descend(value, rest, out);
                        }
                    }
                    Err(err) => log::debug!("Skipping malformed key pattern '{}': {}", raw, err),
                }
            }
            Segment::Literal(key) => match map.get(*key) {
                Some(value) => self.descend(value, rest, out),
                None => self.missing(rest, out),
            },
        }
    }

    /// Only a miss on the last segment is reported, as null
    fn missing(&self, rest: &[Segment<'_>], out: &mut Vec<Value>) {
        if rest.is_empty() {
            self.emit(Value::Null, out);
        }
    }

    fn emit(&self, value: Value, out: &mut Vec<Value>) {
        if self.omit_null && value.is_null() {
            return;
        }
        out.push(value);
    }
}
