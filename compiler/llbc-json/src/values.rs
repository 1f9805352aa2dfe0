//! Literal values.
//!
//! Integer literals may not fit in 64 bits. The extraction tool writes them either as JSON
//! numbers of any magnitude or as decimal strings. Either way, the literal is checked against the
//! exact range of its integer type.

use crate::error::{decoding, DecodeError, DecodeResult};
use crate::primitive::{decode_bool, decode_string, decode_unary, decode_variant};
use crate::ty::integer_ty_from_tag;
use llbc_ast::ty::IntegerTy;
use llbc_ast::values::{PrimitiveValue, ScalarValue};
use serde_json::Value;

/// An integer literal before it is checked against its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Literal {
    negative: bool,
    magnitude: u128,
}

impl Literal {
    fn render(self) -> String {
        if self.negative {
            format!("-{}", self.magnitude)
        } else {
            self.magnitude.to_string()
        }
    }
}

/// Parse an optionally negated string of decimal digits.
///
/// `Ok(None)` means the literal is well-formed but does not even fit in 128 bits.
fn parse_literal(text: &str, value: &Value) -> DecodeResult<Option<Literal>> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, text),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecodeError::schema("an integer literal", value));
    }
    let magnitude = digits.bytes().try_fold(0u128, |acc, digit| {
        acc.checked_mul(10)?.checked_add(u128::from(digit - b'0'))
    });
    Ok(magnitude.map(|magnitude| Literal {
        negative,
        magnitude,
    }))
}

/// Decode the magnitude and sign of a literal.
///
/// Numbers are kept in their textual form by the parser, so a bare `u128` literal reaches this
/// point with all of its digits.
fn decode_literal(value: &Value) -> DecodeResult<Option<Literal>> {
    match value {
        Value::Number(n) => parse_literal(&n.to_string(), value),
        Value::String(s) => parse_literal(s, value),
        value => Err(DecodeError::schema("an integer literal", value)),
    }
}

/// Check a literal against the range of `ty`.
fn scalar_from_literal(ty: IntegerTy, literal: Literal) -> Option<ScalarValue> {
    let bits = ty.bit_width();
    let Literal {
        negative,
        magnitude,
    } = literal;
    let in_range = if ty.is_signed() {
        let bound = 1u128 << (bits - 1);
        if negative {
            magnitude <= bound
        } else {
            magnitude < bound
        }
    } else {
        let fits = magnitude.checked_shr(bits).map_or(true, |high| high == 0);
        magnitude == 0 || (!negative && fits)
    };
    if !in_range {
        return None;
    }
    // The range check above makes every cast below lossless.
    let signed = if negative {
        (magnitude as i128).wrapping_neg()
    } else {
        magnitude as i128
    };
    Some(match ty {
        IntegerTy::Isize => ScalarValue::Isize(signed as i64),
        IntegerTy::I8 => ScalarValue::I8(signed as i8),
        IntegerTy::I16 => ScalarValue::I16(signed as i16),
        IntegerTy::I32 => ScalarValue::I32(signed as i32),
        IntegerTy::I64 => ScalarValue::I64(signed as i64),
        IntegerTy::I128 => ScalarValue::I128(signed),
        IntegerTy::Usize => ScalarValue::Usize(magnitude as u64),
        IntegerTy::U8 => ScalarValue::U8(magnitude as u8),
        IntegerTy::U16 => ScalarValue::U16(magnitude as u16),
        IntegerTy::U32 => ScalarValue::U32(magnitude as u32),
        IntegerTy::U64 => ScalarValue::U64(magnitude as u64),
        IntegerTy::U128 => ScalarValue::U128(magnitude),
    })
}

/// Decode an integer literal of type `ty`.
pub fn decode_scalar_literal(ty: IntegerTy, value: &Value) -> DecodeResult<ScalarValue> {
    let literal = decode_literal(value)?;
    let scalar = literal.and_then(|literal| scalar_from_literal(ty, literal));
    scalar.ok_or_else(|| {
        let rendered = match (literal, value) {
            (Some(literal), _) => literal.render(),
            (None, Value::String(s)) => s.clone(),
            (None, value) => value.to_string(),
        };
        tracing::error!(value = %rendered, %ty, "integer literal out of range");
        DecodeError::out_of_range(rendered, ty)
    })
}

/// Decode a scalar, as in `{"U8": [255]}`.
pub fn decode_scalar_value(value: &Value) -> DecodeResult<ScalarValue> {
    decoding("scalar_value", || match decode_variant(value)? {
        (tag, Some(payload)) => {
            let ty = integer_ty_from_tag(tag)
                .ok_or_else(|| DecodeError::unknown_variant("ScalarValue", tag))?;
            decode_unary(payload, |v| decode_scalar_literal(ty, v))
        }
        (tag, None) => Err(DecodeError::unknown_variant("ScalarValue", tag)),
    })
}

fn decode_char(value: &Value) -> DecodeResult<char> {
    let mut chars = value
        .as_str()
        .ok_or_else(|| DecodeError::schema("a character", value))?
        .chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(DecodeError::schema("a single character", value)),
    }
}

pub fn decode_primitive_value(value: &Value) -> DecodeResult<PrimitiveValue> {
    decoding("primitive_value", || match decode_variant(value)? {
        ("Scalar", Some(payload)) => {
            decode_unary(payload, decode_scalar_value).map(PrimitiveValue::Scalar)
        }
        ("Bool", Some(payload)) => decode_unary(payload, decode_bool).map(PrimitiveValue::Bool),
        ("Char", Some(payload)) => decode_unary(payload, decode_char).map(PrimitiveValue::Char),
        ("String", Some(payload)) => {
            decode_unary(payload, decode_string).map(PrimitiveValue::String)
        }
        (tag, _) => Err(DecodeError::unknown_variant("PrimitiveValue", tag)),
    })
}

#[cfg(test)]
mod tests {
    use super::{decode_primitive_value, decode_scalar_literal, decode_scalar_value};
    use crate::error::DecodeError;
    use llbc_ast::ty::IntegerTy;
    use llbc_ast::values::{PrimitiveValue, ScalarValue};
    use llbc_macros::{assert_err, assert_matches, assert_ok};
    use serde_json::{json, Value};

    #[test]
    fn test_u8_bounds() {
        assert_eq!(
            assert_ok!(decode_scalar_value(&json!({"U8": [255]}))),
            ScalarValue::U8(255)
        );
        let err = assert_err!(decode_scalar_value(&json!({"U8": [256]})));
        let err = assert_matches!(err, DecodeError::ScalarOutOfRange(e) => e);
        assert_eq!(err.value, "256");
        assert_eq!(err.ty, IntegerTy::U8);
        assert_eq!(err.path.to_string(), "scalar_value");
    }

    /// Out of range literals are ordinary errors, the decoder never aborts on them.
    #[test]
    fn test_out_of_range_is_recoverable() {
        let results = [json!({"I8": [-129]}), json!({"U16": [-1]}), json!({"I8": [127]})]
            .iter()
            .map(decode_scalar_value)
            .collect::<Vec<_>>();
        assert_matches!(&results[0], Err(DecodeError::ScalarOutOfRange(_)));
        assert_matches!(&results[1], Err(DecodeError::ScalarOutOfRange(_)));
        assert_matches!(&results[2], Ok(ScalarValue::I8(127)));
    }

    #[test]
    fn test_every_type_accepts_its_bounds() {
        let bounds: [(IntegerTy, &str, &str); 12] = [
            (IntegerTy::Isize, "-9223372036854775808", "9223372036854775807"),
            (IntegerTy::I8, "-128", "127"),
            (IntegerTy::I16, "-32768", "32767"),
            (IntegerTy::I32, "-2147483648", "2147483647"),
            (IntegerTy::I64, "-9223372036854775808", "9223372036854775807"),
            (
                IntegerTy::I128,
                "-170141183460469231731687303715884105728",
                "170141183460469231731687303715884105727",
            ),
            (IntegerTy::Usize, "0", "18446744073709551615"),
            (IntegerTy::U8, "0", "255"),
            (IntegerTy::U16, "0", "65535"),
            (IntegerTy::U32, "0", "4294967295"),
            (IntegerTy::U64, "0", "18446744073709551615"),
            (IntegerTy::U128, "0", "340282366920938463463374607431768211455"),
        ];
        for (ty, min, max) in bounds {
            let lo = assert_ok!(decode_scalar_literal(ty, &json!(min)));
            let hi = assert_ok!(decode_scalar_literal(ty, &json!(max)));
            assert_eq!(lo.integer_ty(), ty);
            assert_eq!(hi.integer_ty(), ty);
            assert_eq!(lo.to_string(), format!("{} : {}", min, ty));
            assert_eq!(hi.to_string(), format!("{} : {}", max, ty));
        }
    }

    #[test]
    fn test_just_outside_the_bounds() {
        let outside: [(IntegerTy, &str); 6] = [
            (IntegerTy::I8, "128"),
            (IntegerTy::I8, "-129"),
            (IntegerTy::U64, "18446744073709551616"),
            (IntegerTy::I128, "170141183460469231731687303715884105728"),
            (IntegerTy::I128, "-170141183460469231731687303715884105729"),
            (IntegerTy::U128, "340282366920938463463374607431768211456"),
        ];
        for (ty, literal) in outside {
            let err = assert_err!(decode_scalar_literal(ty, &json!(literal)));
            let err = assert_matches!(err, DecodeError::ScalarOutOfRange(e) => e);
            assert_eq!(err.value, literal);
        }
    }

    #[test]
    fn test_128_bit_values_are_exact() {
        let value = assert_ok!(decode_scalar_value(&json!({
            "U128": ["340282366920938463463374607431768211455"]
        })));
        assert_eq!(value, ScalarValue::U128(u128::MAX));
        let value = assert_ok!(decode_scalar_value(&json!({
            "I128": ["-170141183460469231731687303715884105728"]
        })));
        assert_eq!(value, ScalarValue::I128(i128::MIN));
    }

    #[test]
    fn test_malformed_literals_are_schema_errors() {
        for literal in [json!("12a"), json!(""), json!("-"), json!(1.5), json!(true)] {
            let err = assert_err!(decode_scalar_literal(IntegerTy::U32, &literal));
            assert_matches!(err, DecodeError::SchemaMismatch(_));
        }
        let value: Value = assert_ok!(serde_json::from_str(r#"{"U32": [1e3]}"#));
        let err = assert_err!(decode_scalar_value(&value));
        assert_matches!(err, DecodeError::SchemaMismatch(_));
        let err = assert_err!(decode_scalar_value(&json!({"U7": [1]})));
        assert_matches!(err, DecodeError::SchemaMismatch(_));
    }

    #[test]
    fn test_wide_numbers_keep_their_digits() {
        let value: Value = assert_ok!(serde_json::from_str(
            r#"{"U128": [340282366920938463463374607431768211455]}"#
        ));
        assert_eq!(
            assert_ok!(decode_scalar_value(&value)),
            ScalarValue::U128(u128::MAX)
        );
        let value: Value = assert_ok!(serde_json::from_str(r#"{"U128": [18446744073709551616]}"#));
        assert_eq!(
            assert_ok!(decode_scalar_value(&value)),
            ScalarValue::U128(1 << 64)
        );
        let value: Value = assert_ok!(serde_json::from_str(
            r#"{"I128": [-170141183460469231731687303715884105728]}"#
        ));
        assert_eq!(
            assert_ok!(decode_scalar_value(&value)),
            ScalarValue::I128(i128::MIN)
        );
    }

    #[test]
    fn test_wide_numbers_out_of_range() {
        let outside = [
            (r#"{"U64": [18446744073709551616]}"#, "18446744073709551616"),
            (r#"{"I64": [-9223372036854775809]}"#, "-9223372036854775809"),
            (r#"{"Usize": [18446744073709551616]}"#, "18446744073709551616"),
            (
                r#"{"U128": [340282366920938463463374607431768211456]}"#,
                "340282366920938463463374607431768211456",
            ),
            (
                r#"{"I128": [999999999999999999999999999999999999999999]}"#,
                "999999999999999999999999999999999999999999",
            ),
        ];
        for (document, literal) in outside {
            let value: Value = assert_ok!(serde_json::from_str(document));
            let err = assert_err!(decode_scalar_value(&value));
            let err = assert_matches!(err, DecodeError::ScalarOutOfRange(e) => e);
            assert_eq!(err.value, literal);
        }
    }

    #[test]
    fn test_negative_zero_is_zero() {
        let value = assert_ok!(decode_scalar_literal(IntegerTy::U8, &json!("-0")));
        assert_eq!(value, ScalarValue::U8(0));
    }

    #[test]
    fn test_decode_primitive_values() {
        assert_eq!(
            assert_ok!(decode_primitive_value(&json!({"Bool": [true]}))),
            PrimitiveValue::Bool(true)
        );
        assert_eq!(
            assert_ok!(decode_primitive_value(&json!({"Char": "λ"}))),
            PrimitiveValue::Char('λ')
        );
        assert_eq!(
            assert_ok!(decode_primitive_value(&json!({"String": ["hi"]}))),
            PrimitiveValue::String("hi".to_owned())
        );
        assert_eq!(
            assert_ok!(decode_primitive_value(&json!({"Scalar": [{"I32": [-5]}]}))),
            PrimitiveValue::Scalar(ScalarValue::I32(-5))
        );
        assert_err!(decode_primitive_value(&json!({"Char": "ab"})));
    }
}
