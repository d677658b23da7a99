//! Conversion of JSON message values to field elements.

use crate::{
    EncodingError, TypedDataError,
    encoding::{ByteArray, cairo_short_string_to_felt},
};
use serde_json::Value;
use stark_curve::{FieldElement, U256, starknet_keccak};

/// An integer literal found in a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Integer {
    negative: bool,
    magnitude: FieldElement,
}

impl Integer {
    /// Value modulo the field prime.
    fn to_felt(self) -> FieldElement {
        if self.negative {
            -self.magnitude
        } else {
            self.magnitude
        }
    }
}

/// Parse booleans, JSON integers and strings holding `0x` hex or decimal.
///
/// Returns `Ok(None)` for values that are not numeric, such as strings of
/// text, and an error for numeric literals that do not fit a field element.
fn parse_integer(value: &Value) -> Result<Option<Integer>, EncodingError> {
    let positive = |magnitude| {
        Some(Integer {
            negative: false,
            magnitude,
        })
    };

    match value {
        Value::Bool(b) => Ok(positive(FieldElement::from_u64(u64::from(*b)))),
        Value::Number(number) => {
            if let Some(n) = number.as_u64() {
                Ok(positive(FieldElement::from_u64(n)))
            } else if let Some(n) = number.as_i64() {
                Ok(Some(Integer {
                    negative: true,
                    magnitude: FieldElement::from_u64(n.unsigned_abs()),
                }))
            } else {
                Err(EncodingError::InvalidNumber(number.to_string()))
            }
        }
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(positive(FieldElement::ZERO));
            }

            let (negative, digits) = match s.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, s),
            };

            let numeric = match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
                Some(hex) => {
                    !negative && !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit())
                }
                None => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
            };
            if !numeric {
                return Ok(None);
            }

            let magnitude = digits
                .parse::<FieldElement>()
                .map_err(|_| EncodingError::InvalidNumber(s.to_owned()))?;
            Ok(Some(Integer {
                negative,
                magnitude,
            }))
        }
        _ => Ok(None),
    }
}

fn invalid(name: &str, kind: &str, reason: impl Into<String>) -> TypedDataError {
    TypedDataError::InvalidValue {
        name: name.to_owned(),
        kind: kind.to_owned(),
        reason: reason.into(),
    }
}

/// `felt` and friends: a number, or else a short string.
pub(crate) fn felt(value: &Value, name: &str, kind: &str) -> Result<FieldElement, TypedDataError> {
    if let Some(integer) = parse_integer(value)? {
        return Ok(integer.to_felt());
    }

    match value {
        Value::String(s) => Ok(cairo_short_string_to_felt(s)?),
        _ => Err(invalid(name, kind, "expected a number or a string")),
    }
}

/// `bool`: `true`, `false`, `0` or `1`.
pub(crate) fn boolean(value: &Value, name: &str) -> Result<FieldElement, TypedDataError> {
    match value {
        Value::String(s) if s == "true" => Ok(FieldElement::ONE),
        Value::String(s) if s == "false" => Ok(FieldElement::ZERO),
        _ => match parse_integer(value)? {
            Some(integer) if !integer.negative && integer.magnitude <= FieldElement::ONE => {
                Ok(integer.magnitude)
            }
            _ => Err(invalid(name, "bool", "expected a boolean")),
        },
    }
}

/// `u128` and `timestamp`: an unsigned 128-bit integer.
pub(crate) fn uint128(
    value: &Value,
    name: &str,
    kind: &'static str,
) -> Result<FieldElement, TypedDataError> {
    let felt = felt(value, name, kind)?;
    if felt.to_uint() >= U256::ONE.shl_vartime(128) {
        return Err(EncodingError::OutOfRange {
            value: value.to_string(),
            target: kind,
        }
        .into());
    }
    Ok(felt)
}

/// `i128`: a signed 128-bit integer, negative values wrapping modulo the prime.
pub(crate) fn int128(value: &Value, name: &str) -> Result<FieldElement, TypedDataError> {
    let integer =
        parse_integer(value)?.ok_or_else(|| invalid(name, "i128", "expected an integer"))?;

    let bound = U256::ONE.shl_vartime(127);
    let magnitude = integer.magnitude.to_uint();
    let in_range = if integer.negative {
        magnitude <= bound
    } else {
        magnitude < bound
    };
    if !in_range {
        return Err(EncodingError::OutOfRange {
            value: value.to_string(),
            target: "i128",
        }
        .into());
    }

    Ok(integer.to_felt())
}

/// `selector`: a `0x` selector taken as is, or an entry point name.
pub(crate) fn selector(value: &Value, name: &str) -> Result<FieldElement, TypedDataError> {
    match value {
        Value::String(s) => {
            let is_hex = s
                .strip_prefix("0x")
                .is_some_and(|hex| !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()));
            if is_hex {
                s.parse::<FieldElement>()
                    .map_err(|_| EncodingError::InvalidNumber(s.clone()).into())
            } else {
                Ok(starknet_keccak(s.as_bytes()))
            }
        }
        _ => felt(value, name, "selector"),
    }
}

/// Revision 1 `string`: a byte array of any length.
pub(crate) fn byte_array(value: &Value, name: &str) -> Result<Vec<FieldElement>, TypedDataError> {
    match value {
        Value::String(s) => Ok(ByteArray::from(s.as_str()).to_elements()),
        _ => Err(invalid(name, "string", "expected a string")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn felts_from_numbers_and_strings() {
        assert_eq!(felt(&json!(1000), "n", "felt").unwrap(), FieldElement::from_u64(1000));
        assert_eq!(felt(&json!("0x3e8"), "n", "felt").unwrap(), FieldElement::from_u64(1000));
        assert_eq!(felt(&json!("1000"), "n", "felt").unwrap(), FieldElement::from_u64(1000));
        assert_eq!(felt(&json!(""), "n", "felt").unwrap(), FieldElement::ZERO);
        assert_eq!(felt(&json!(true), "n", "felt").unwrap(), FieldElement::ONE);
        assert_eq!(
            felt(&json!("Bob"), "n", "felt").unwrap(),
            FieldElement::from_u64(0x00_426f62)
        );
        assert!(matches!(
            felt(&json!({}), "n", "felt"),
            Err(TypedDataError::InvalidValue { .. })
        ));
    }

    #[test]
    fn long_text_is_not_a_felt() {
        let text = "a string that is longer than thirty-one bytes";
        assert!(matches!(
            felt(&json!(text), "n", "felt"),
            Err(TypedDataError::Encoding(EncodingError::ShortStringTooLong(_)))
        ));
    }

    #[test]
    fn integer_ranges() {
        assert_eq!(int128(&json!(-10), "n").unwrap(), -FieldElement::from_u64(10));
        assert_eq!(int128(&json!("-10"), "n").unwrap(), -FieldElement::from_u64(10));
        assert!(int128(&json!("-170141183460469231731687303715884105728"), "n").is_ok());
        assert!(int128(&json!("170141183460469231731687303715884105728"), "n").is_err());

        assert!(uint128(&json!("0xffffffffffffffffffffffffffffffff"), "n", "u128").is_ok());
        assert!(matches!(
            uint128(&json!("0x100000000000000000000000000000000"), "n", "u128"),
            Err(TypedDataError::Encoding(EncodingError::OutOfRange { target: "u128", .. }))
        ));
        assert!(uint128(&json!(-1), "n", "timestamp").is_err());
    }

    #[test]
    fn booleans() {
        assert_eq!(boolean(&json!(true), "n").unwrap(), FieldElement::ONE);
        assert_eq!(boolean(&json!("false"), "n").unwrap(), FieldElement::ZERO);
        assert_eq!(boolean(&json!(1), "n").unwrap(), FieldElement::ONE);
        assert!(boolean(&json!(2), "n").is_err());
    }

    #[test]
    fn selectors() {
        assert_eq!(selector(&json!("0x1"), "n").unwrap(), FieldElement::ONE);
        assert_eq!(
            selector(&json!("transfer"), "n").unwrap(),
            starknet_keccak(b"transfer")
        );
    }

    #[test]
    fn byte_arrays() {
        assert_eq!(
            byte_array(&json!("Example text"), "n").unwrap(),
            ByteArray::from("Example text").to_elements()
        );
        assert!(byte_array(&json!(1), "n").is_err());
    }
}
