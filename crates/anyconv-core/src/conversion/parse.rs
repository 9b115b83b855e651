//! Literal parsing for scalar targets
//!
//! Integers are strictly base 10, unsigned targets reject any sign, and a
//! finite literal that overflows a float width is a range error.

use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;

use crate::error::ConversionKind;
use crate::value::complex::{split_literal, Complex};

type ParseResult<T> = std::result::Result<T, ConversionKind>;

/// Parse a boolean literal. Only the fixed literal set is accepted.
pub(crate) fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

pub(crate) fn parse_signed<T>(text: &str) -> ParseResult<T>
where
    T: FromStr<Err = ParseIntError>,
{
    text.parse::<T>().map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ConversionKind::Range,
        _ => ConversionKind::Syntax,
    })
}

pub(crate) fn parse_unsigned<T>(text: &str) -> ParseResult<T>
where
    T: FromStr<Err = ParseIntError>,
{
    if text.starts_with(['+', '-']) {
        return Err(ConversionKind::Syntax);
    }
    parse_signed(text)
}

pub(crate) fn parse_f64(text: &str) -> ParseResult<f64> {
    let value: f64 = text.parse().map_err(|_| ConversionKind::Syntax)?;
    check_overflow(text, value.is_infinite()).map(|_| value)
}

pub(crate) fn parse_f32(text: &str) -> ParseResult<f32> {
    let value: f32 = text.parse().map_err(|_| ConversionKind::Syntax)?;
    check_overflow(text, value.is_infinite()).map(|_| value)
}

fn check_overflow(text: &str, infinite: bool) -> ParseResult<()> {
    let unsigned = text.trim_start_matches(['+', '-']);
    let literal_infinity =
        unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity");
    if infinite && !literal_infinity {
        Err(ConversionKind::Range)
    } else {
        Ok(())
    }
}

pub(crate) fn parse_complex64(text: &str) -> ParseResult<Complex<f64>> {
    let (re, im) = split_literal(text).ok_or(ConversionKind::Syntax)?;
    Ok(Complex::new(parse_f64(re)?, parse_f64(im)?))
}

pub(crate) fn parse_complex32(text: &str) -> ParseResult<Complex<f32>> {
    let (re, im) = split_literal(text).ok_or(ConversionKind::Syntax)?;
    Ok(Complex::new(parse_f32(re)?, parse_f32(im)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_literals() {
        for text in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(parse_bool(text), Some(true), "{text}");
        }
        for text in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(parse_bool(text), Some(false), "{text}");
        }
        assert_eq!(parse_bool("yes"), None);
        assert_eq!(parse_bool("tRUE"), None);
    }

    #[test]
    fn test_signed_errors_split_syntax_and_range() {
        assert_eq!(parse_signed::<i8>("-128"), Ok(-128));
        assert_eq!(parse_signed::<i8>("+7"), Ok(7));
        assert_eq!(parse_signed::<i8>("200"), Err(ConversionKind::Range));
        assert_eq!(parse_signed::<i8>("-200"), Err(ConversionKind::Range));
        assert_eq!(parse_signed::<i64>("77.1"), Err(ConversionKind::Syntax));
        assert_eq!(parse_signed::<i64>(""), Err(ConversionKind::Syntax));
    }

    #[test]
    fn test_unsigned_rejects_sign() {
        assert_eq!(parse_unsigned::<u32>("42"), Ok(42));
        assert_eq!(parse_unsigned::<u32>("+42"), Err(ConversionKind::Syntax));
        assert_eq!(parse_unsigned::<u32>("-1"), Err(ConversionKind::Syntax));
        assert_eq!(parse_unsigned::<u8>("256"), Err(ConversionKind::Range));
    }

    #[test]
    fn test_float_overflow_is_range() {
        assert_eq!(parse_f64("77.1"), Ok(77.1));
        assert_eq!(parse_f32("3.5e38"), Err(ConversionKind::Range));
        assert_eq!(parse_f64("1e400"), Err(ConversionKind::Range));
        assert_eq!(parse_f64("-Inf"), Ok(f64::NEG_INFINITY));
        assert_eq!(parse_f64("(77+0i)"), Err(ConversionKind::Syntax));
    }

    #[test]
    fn test_complex_literals() {
        assert_eq!(parse_complex64("(77+0i)"), Ok(Complex::new(77.0, 0.0)));
        assert_eq!(parse_complex64("77"), Ok(Complex::new(77.0, 0.0)));
        assert_eq!(parse_complex64("-2.5i"), Ok(Complex::new(0.0, -2.5)));
        assert_eq!(parse_complex32("1-1i"), Ok(Complex::new(1.0f32, -1.0)));
        assert_eq!(parse_complex64("x+1i"), Err(ConversionKind::Syntax));
        assert_eq!(parse_complex64(""), Err(ConversionKind::Syntax));
    }
}
