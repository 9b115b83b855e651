//! String helpers

use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde::Serialize;
use serde_json::ser::{CompactFormatter, PrettyFormatter};

use crate::value::codec::encode;

static UNDERSCORES: OnceLock<Regex> = OnceLock::new();
static WORD_START: OnceLock<Regex> = OnceLock::new();
static VERSION: OnceLock<Regex> = OnceLock::new();

fn underscores() -> &'static Regex {
    UNDERSCORES.get_or_init(|| Regex::new("_+").expect("underscore pattern is valid"))
}

fn word_start() -> &'static Regex {
    WORD_START.get_or_init(|| Regex::new(r"(^|\s)[0-9A-Za-z_]").expect("word start pattern is valid"))
}

fn version_pattern() -> &'static Regex {
    VERSION.get_or_init(|| {
        Regex::new(r"(\d+)(?:\.(\d+))?(?:\.(\d+))?").expect("version pattern is valid")
    })
}

/// Encode `value` as JSON, compact when `indent` is empty. Encoding
/// failures give an empty string.
pub fn to_json<T: Serialize + ?Sized>(value: &T, indent: &str) -> String {
    let encoded = if indent.is_empty() {
        encode(value, CompactFormatter)
    } else {
        encode(value, PrettyFormatter::with_indent(indent.as_bytes()))
    };

    encoded.unwrap_or_else(|err| {
        log::debug!("Cannot encode JSON: {}", err);
        String::new()
    })
}

/// `___snake__case_` becomes `Snake Case`
pub fn snake_to_title(text: &str) -> String {
    let spaced = underscores().replace_all(text.trim_matches('_'), " ");
    word_start()
        .replace_all(&spaced, |caps: &Captures<'_>| caps[0].to_uppercase())
        .into_owned()
}

/// Byte offset of the `nth` non-overlapping occurrence of `needle`.
/// `nth` below 1 counts as 1 and an empty needle is found at 0.
pub fn index_of_nth(haystack: &str, needle: &str, nth: isize) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }

    let mut found = None;
    for _ in 0..nth.max(1) {
        let from = found.map_or(0, |at: usize| at + needle.len());
        let at = haystack.get(from..)?.find(needle)?;
        found = Some(from + at);
    }
    found
}

/// Pack a dotted version into one sortable integer string.
///
/// Minor and patch take three digits each and saturate at 999, so
/// `1.2.3` becomes `1002003`. Text without any number gives `0`.
pub fn version_as_integer(version: &str) -> String {
    let Some(caps) = version_pattern().captures(version) else {
        return "0".to_string();
    };

    let part = |i: usize| -> u64 {
        caps.get(i)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };
    let packed = format!("{}{:03}{:03}", part(1), part(2).min(999), part(3).min(999));

    match packed.trim_start_matches('0') {
        "" => "0".to_string(),
        trimmed => trimmed.to_string(),
    }
}

/// Replace every match of `re` with what `replace` returns for it.
///
/// `replace` receives the whole match followed by the groups that took
/// part in it; groups that did not match are left out.
pub fn replace_all_submatch_func<F>(re: &Regex, text: &str, mut replace: F) -> String
where
    F: FnMut(&[&str]) -> String,
{
    re.replace_all(text, |caps: &Captures<'_>| {
        let groups: Vec<&str> = caps.iter().flatten().map(|m| m.as_str()).collect();
        replace(&groups)
    })
    .into_owned()
}
