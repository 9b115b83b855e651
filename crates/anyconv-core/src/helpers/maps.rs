//! Map helpers

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::conversion::convert_to_force;
use crate::value::Value;

/// Copy entries from `inputs` into `out` without overwriting existing keys.
/// With `exclude_empty`, entries holding the type's default are skipped.
pub fn join<K, V>(out: &mut BTreeMap<K, V>, exclude_empty: bool, inputs: &[&BTreeMap<K, V>])
where
    K: Ord + Clone,
    V: Clone + Default + PartialEq,
{
    let empty = V::default();
    for input in inputs {
        for (key, value) in input.iter() {
            if exclude_empty && *value == empty {
                continue;
            }
            if !out.contains_key(key) {
                out.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Copy entries from `inputs` into `out` without overwriting existing keys
pub fn join_any<K, V>(out: &mut BTreeMap<K, V>, inputs: &[&BTreeMap<K, V>])
where
    K: Ord + Clone,
    V: Clone,
{
    for input in inputs {
        for (key, value) in input.iter() {
            out.entry(key.clone()).or_insert_with(|| value.clone());
        }
    }
}

/// Decode a value into a mapping.
///
/// Text and bytes are parsed as JSON; any other value is encoded and
/// decoded again. Anything that does not come out as a JSON object gives
/// an empty map.
pub fn to_map(value: &Value) -> BTreeMap<String, Value> {
    let text: Cow<'_, str> = match value {
        Value::Text(s) => Cow::Borrowed(s),
        Value::Bytes(bytes) => String::from_utf8_lossy(bytes),
        other => match other.to_json_string() {
            Ok(json) => Cow::Owned(json),
            Err(err) => {
                log::debug!("Cannot encode {} as a map: {}", other.type_name(), err);
                return BTreeMap::new();
            }
        },
    };
    serde_json::from_str(&text).unwrap_or_else(|err| {
        log::debug!("Cannot decode map: {}", err);
        BTreeMap::new()
    })
}

/// Like [`to_map`], with every value rendered as text
pub fn to_string_map(value: &Value) -> BTreeMap<String, String> {
    to_map(value)
        .into_iter()
        .map(|(key, value)| (key, convert_to_force::<String>(&value)))
        .collect()
}
