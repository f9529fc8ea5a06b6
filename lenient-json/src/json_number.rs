// SPDX-License-Identifier: Apache-2.0

use core::str::FromStr;

use rust_decimal::Decimal;

use crate::Value;

/// Returns true for characters that may appear in an unquoted token.
pub fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '.' | '-' | '_' | '+')
}

/// Classifies a primitive token as a keyword or a number.
///
/// Returns `None` when the token is neither, which the caller reports as an
/// illegal primitive.
pub fn classify_primitive(token: &str) -> Option<Value> {
    match token {
        "null" => Some(Value::Null),
        "true" => Some(Value::Bool(true)),
        "false" => Some(Value::Bool(false)),
        _ => parse_number(token),
    }
}

/// Parses a number token using the narrowest type that accepts it.
///
/// Without an exponent the candidates are `i32`, `i64` (only when there is
/// no decimal point either) and then `Decimal`. Anything left over, and
/// every token with an exponent, is tried as `f64`.
pub fn parse_number(token: &str) -> Option<Value> {
    let has_decimal_point = token.contains('.');
    let has_exponent = token.contains(['e', 'E']);

    if !has_exponent {
        if !has_decimal_point {
            if let Ok(n) = i32::from_str(token) {
                return Some(Value::Int32(n));
            }
            if let Ok(n) = i64::from_str(token) {
                return Some(Value::Int64(n));
            }
        }
        if let Some(d) = parse_decimal(token) {
            return Some(Value::Decimal(d));
        }
    }

    parse_float(token).map(Value::Float64)
}

fn parse_decimal(token: &str) -> Option<Decimal> {
    if !is_decimal_literal(token) {
        return None;
    }
    Decimal::from_str(token).ok()
}

fn parse_float(token: &str) -> Option<f64> {
    if !is_float_literal(token) {
        return None;
    }
    f64::from_str(token).ok().filter(|f| f.is_finite())
}

/// Skips an optional sign and a run of ASCII digits; returns the rest and the digit count.
fn split_digits(s: &str) -> (&str, usize) {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    (s.get(digits..).unwrap_or_default(), digits)
}

fn strip_sign(s: &str) -> &str {
    s.strip_prefix(['+', '-']).unwrap_or(s)
}

/// `[+-]digits[.digits]` with at least one digit overall.
fn split_mantissa(s: &str) -> Option<&str> {
    let (rest, int_digits) = split_digits(strip_sign(s));
    let (rest, frac_digits) = match rest.strip_prefix('.') {
        Some(frac) => split_digits(frac),
        None => (rest, 0),
    };
    (int_digits + frac_digits > 0).then_some(rest)
}

fn is_decimal_literal(s: &str) -> bool {
    split_mantissa(s).is_some_and(str::is_empty)
}

fn is_float_literal(s: &str) -> bool {
    let Some(rest) = split_mantissa(s) else {
        return false;
    };
    if rest.is_empty() {
        return true;
    }
    match rest.strip_prefix(['e', 'E']) {
        Some(exponent) => {
            let (tail, digits) = split_digits(strip_sign(exponent));
            digits > 0 && tail.is_empty()
        }
        None => false,
    }
}
