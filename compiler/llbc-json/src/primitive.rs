//! Combinators for the generic encoding conventions of the serialized crates.
//!
//! - A variant without payload is a bare string holding its name.
//! - A variant with payload is an object with a single key, the name of the variant. A payload
//!   with several fields is the list of the fields.
//! - A record is an object with exactly the expected keys.
//! - An absent optional value is `null`.

use crate::error::{DecodeError, DecodeResult, Within};
use serde_json::Value;

pub fn decode_bool(value: &Value) -> DecodeResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| DecodeError::schema("a boolean", value))
}

pub fn decode_usize(value: &Value) -> DecodeResult<usize> {
    value
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| DecodeError::schema("a non-negative integer", value))
}

/// Decode any of the identifier types, which are all indices.
pub fn decode_id<I: From<usize>>(value: &Value) -> DecodeResult<I> {
    decode_usize(value).map(I::from).within("id")
}

pub fn decode_string(value: &Value) -> DecodeResult<String> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| DecodeError::schema("a string", value))
}

pub fn decode_option<T>(
    value: &Value,
    decode: impl FnOnce(&Value) -> DecodeResult<T>,
) -> DecodeResult<Option<T>> {
    match value {
        Value::Null => Ok(None),
        value => decode(value).map(Some),
    }
}

pub fn decode_list<T>(
    value: &Value,
    decode: impl FnMut(&Value) -> DecodeResult<T>,
) -> DecodeResult<Vec<T>> {
    value
        .as_array()
        .ok_or_else(|| DecodeError::schema("a list", value))?
        .iter()
        .map(decode)
        .collect()
}

/// Split a list of exactly `N` elements.
pub fn decode_tuple<const N: usize>(value: &Value) -> DecodeResult<[&Value; N]> {
    let elems = value
        .as_array()
        .ok_or_else(|| DecodeError::schema(format!("a list of {} elements", N), value))?;
    let elems = elems.iter().collect::<Vec<_>>();
    <[&Value; N]>::try_from(elems)
        .map_err(|_| DecodeError::schema(format!("a list of {} elements", N), value))
}

/// Split a tagged variant into its name and its payload, if any.
pub fn decode_variant(value: &Value) -> DecodeResult<(&str, Option<&Value>)> {
    match value {
        Value::String(tag) => Ok((tag.as_str(), None)),
        Value::Object(fields) if fields.len() == 1 => match fields.iter().next() {
            Some((tag, payload)) => Ok((tag.as_str(), Some(payload))),
            None => Err(DecodeError::schema("a tagged variant", value)),
        },
        value => Err(DecodeError::schema("a tagged variant", value)),
    }
}

/// Decode the payload of a variant with a single field.
///
/// The field is normally wrapped in a one-element list, like the fields of any other variant, but
/// the bare field is accepted as well. A payload which is itself a one-element list is read as
/// the wrapped form first.
pub fn decode_unary<T>(
    payload: &Value,
    mut decode: impl FnMut(&Value) -> DecodeResult<T>,
) -> DecodeResult<T> {
    match payload.as_array().map(Vec::as_slice) {
        Some([inner]) => decode(inner).or_else(|wrapped| decode(payload).map_err(|_| wrapped)),
        _ => decode(payload),
    }
}

/// Extract the fields of a record, in the order of `keys`.
///
/// The record must have exactly the given keys, no more and no less.
pub fn decode_record<'v, const N: usize>(
    value: &'v Value,
    keys: [&'static str; N],
) -> DecodeResult<[&'v Value; N]> {
    let expected = || format!("a record with fields {{{}}}", keys.join(", "));
    let fields = value
        .as_object()
        .ok_or_else(|| DecodeError::schema(expected(), value))?;
    if fields.len() != N {
        return Err(DecodeError::schema(expected(), value));
    }
    let values = keys
        .iter()
        .map(|key| fields.get(*key))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| DecodeError::schema(expected(), value))?;
    <[&Value; N]>::try_from(values).map_err(|_| DecodeError::schema(expected(), value))
}

#[cfg(test)]
mod tests {
    use super::{
        decode_id, decode_list, decode_option, decode_record, decode_tuple, decode_unary,
        decode_usize, decode_variant,
    };
    use crate::error::DecodeError;
    use llbc_macros::{assert_err, assert_matches, assert_ok};
    use serde_json::json;

    #[test]
    fn test_decode_usize_rejects_negative_and_floats() {
        assert_eq!(assert_ok!(decode_usize(&json!(7))), 7);
        assert_err!(decode_usize(&json!(-1)));
        assert_err!(decode_usize(&json!(1.5)));
        assert_err!(decode_usize(&json!("1")));
    }

    #[test]
    fn test_decode_id_records_path() {
        let err = assert_err!(decode_id::<usize>(&json!(null)));
        assert_eq!(err.path().to_string(), "id");
    }

    #[test]
    fn test_decode_option_null_is_none() {
        assert_eq!(assert_ok!(decode_option(&json!(null), decode_usize)), None);
        assert_eq!(assert_ok!(decode_option(&json!(3), decode_usize)), Some(3));
    }

    #[test]
    fn test_decode_list_fails_on_any_element() {
        assert_eq!(
            assert_ok!(decode_list(&json!([1, 2, 3]), decode_usize)),
            vec![1, 2, 3]
        );
        assert_err!(decode_list(&json!([1, "2"]), decode_usize));
        assert_err!(decode_list(&json!({}), decode_usize));
    }

    #[test]
    fn test_decode_tuple_checks_arity() {
        let pair = json!([1, 2]);
        let [a, b] = assert_ok!(decode_tuple::<2>(&pair));
        assert_eq!((a, b), (&json!(1), &json!(2)));
        assert_err!(decode_tuple::<2>(&json!([1, 2, 3])));
    }

    #[test]
    fn test_decode_variant_shapes() {
        assert_eq!(assert_ok!(decode_variant(&json!("Bool"))), ("Bool", None));
        let var = json!({"TypeVar": 1});
        let (tag, payload) = assert_ok!(decode_variant(&var));
        assert_eq!(tag, "TypeVar");
        assert_eq!(payload, Some(&json!(1)));
        assert_err!(decode_variant(&json!({"A": 1, "B": 2})));
        assert_err!(decode_variant(&json!(3)));
    }

    #[test]
    fn test_decode_unary_accepts_wrapped_and_bare() {
        assert_eq!(assert_ok!(decode_unary(&json!([5]), decode_usize)), 5);
        assert_eq!(assert_ok!(decode_unary(&json!(5), decode_usize)), 5);
        let list = |v: &serde_json::Value| decode_list(v, decode_usize);
        assert_eq!(assert_ok!(decode_unary(&json!([[5, 6]]), list)), vec![5, 6]);
        assert_eq!(assert_ok!(decode_unary(&json!([5, 6]), list)), vec![5, 6]);
        assert_eq!(assert_ok!(decode_unary(&json!([5]), list)), vec![5]);
    }

    #[test]
    fn test_decode_record_requires_exact_keys() {
        let loc = json!({"line": 1, "col": 2});
        let [line, col] = assert_ok!(decode_record(&loc, ["line", "col"]));
        assert_eq!((line, col), (&json!(1), &json!(2)));
        let err = assert_err!(decode_record(
            &json!({"line": 1, "col": 2, "extra": 3}),
            ["line", "col"]
        ));
        assert_matches!(err, DecodeError::SchemaMismatch(_));
        assert_err!(decode_record(&json!({"line": 1}), ["line", "col"]));
        assert_err!(decode_record(&json!({"line": 1, "row": 2}), ["line", "col"]));
    }
}
