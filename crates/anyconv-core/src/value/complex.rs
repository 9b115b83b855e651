//! Complex numbers at two precisions
//!
//! Rendered as `(re+imi)` and parsed from `(a+bi)`, `a+bi`, `a` or `bi`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::conversion::stringify::{format_f32, format_f64};

/// A complex number with real and imaginary parts of type `T`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

/// Complex number with `f32` parts
pub type Complex32 = Complex<f32>;

/// Complex number with `f64` parts
pub type Complex64 = Complex<f64>;

impl<T> Complex<T> {
    pub const fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
}

impl fmt::Display for Complex<f32> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_parts(f, &format_f32(self.re), &format_f32(self.im))
    }
}

impl fmt::Display for Complex<f64> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_parts(f, &format_f64(self.re), &format_f64(self.im))
    }
}

fn write_parts(f: &mut fmt::Formatter<'_>, re: &str, im: &str) -> fmt::Result {
    // the imaginary part always carries an explicit sign
    let sign = if im.starts_with('-') || im.starts_with('+') {
        ""
    } else {
        "+"
    };
    write!(f, "({re}{sign}{im}i)")
}

/// Split a complex literal into its real and imaginary text.
///
/// Returns `None` when the literal has no recognisable shape. The parts
/// themselves are still unparsed.
pub(crate) fn split_literal(text: &str) -> Option<(&str, &str)> {
    let body = text
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(text);

    let Some(body) = body.strip_suffix('i') else {
        return Some((body, "0"));
    };
    if body.is_empty() {
        return None;
    }

    // the imaginary part starts at the last sign that is neither leading
    // nor an exponent sign
    let bytes = body.as_bytes();
    let split = (1..bytes.len())
        .rev()
        .find(|&i| matches!(bytes[i], b'+' | b'-') && !matches!(bytes[i - 1], b'e' | b'E'));

    match split {
        Some(at) => Some((&body[..at], &body[at..])),
        None => Some(("0", body)),
    }
}
