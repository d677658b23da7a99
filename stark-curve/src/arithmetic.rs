//! A pure-Rust implementation of group operations on the STARK curve.

pub(crate) mod affine;
pub(crate) mod field;
pub(crate) mod mul;
pub(crate) mod projective;
pub(crate) mod scalar;

pub(crate) use self::{
    affine::AffinePoint, field::FieldElement, projective::ProjectivePoint, scalar::Scalar,
};

use crate::{Error, Result};
use core::fmt;
use crypto_bigint::{Encoding, U256};

/// Number of 64-bit limbs in a field element, independent of the target's word size.
pub(crate) const LIMBS: usize = U256::LIMBS;

/// `α` coefficient of the curve equation `y² = x³ + α·x + β`.
pub const CURVE_EQUATION_A: FieldElement = FieldElement::ONE;

/// `β` coefficient of the curve equation `y² = x³ + α·x + β`.
pub const CURVE_EQUATION_B: FieldElement =
    FieldElement::from_hex("06f21413efbe40de150e596d72f7a8c5609ad26c15c915c1f4cdfcb99cee9e89");

/// Write big endian bytes as hex without leading zeros (`0` for zero).
pub(crate) fn write_minimal_hex(f: &mut fmt::Formatter<'_>, bytes: &[u8; 32]) -> fmt::Result {
    let mut started = false;

    for byte in bytes {
        for nibble in [byte >> 4, byte & 0x0f] {
            if !started && nibble == 0 {
                continue;
            }
            started = true;
            write!(f, "{:x}", nibble)?;
        }
    }

    if !started {
        f.write_str("0")?;
    }

    Ok(())
}

/// Parse an unsigned integer given as `0x`-prefixed hex or as decimal.
///
/// Values must fit 252 bits; larger inputs fail with [`Error::OutOfRange`].
pub(crate) fn parse_uint(s: &str) -> Result<U256> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(digits) => parse_hex(digits),
        None => parse_decimal(s),
    }
}

fn parse_hex(digits: &str) -> Result<U256> {
    if digits.is_empty() {
        return Err(Error::InvalidEncoding);
    }
    if digits.len() > 64 {
        return Err(Error::OutOfRange);
    }

    // Left-pad to 64 digits so odd lengths decode.
    let mut padded = [b'0'; 64];
    padded[64 - digits.len()..].copy_from_slice(digits.as_bytes());

    let mut bytes = [0u8; 32];
    base16ct::mixed::decode(padded, &mut bytes).map_err(|_| Error::InvalidEncoding)?;
    Ok(U256::from_be_bytes(bytes))
}

fn parse_decimal(digits: &str) -> Result<U256> {
    if digits.is_empty() {
        return Err(Error::InvalidEncoding);
    }

    // 2^252 bounds every value this crate accepts, so `10 * acc + 9` never wraps.
    let bound = U256::ONE.shl_vartime(252);
    let ten = U256::from_u8(10);
    let mut acc = U256::ZERO;

    for digit in digits.bytes() {
        if !digit.is_ascii_digit() {
            return Err(Error::InvalidEncoding);
        }
        acc = acc
            .wrapping_mul(&ten)
            .wrapping_add(&U256::from_u8(digit - b'0'));
        if acc >= bound {
            return Err(Error::OutOfRange);
        }
    }

    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::{parse_uint, CURVE_EQUATION_B};
    use crate::{Error, FieldElement};
    use crypto_bigint::U256;
    use std::format;

    #[test]
    fn parses_hex_and_decimal() {
        assert_eq!(parse_uint("0x10").unwrap(), U256::from_u8(16));
        assert_eq!(parse_uint("0X0a").unwrap(), U256::from_u8(10));
        assert_eq!(parse_uint("1234").unwrap(), U256::from_u16(1234));
        assert_eq!(parse_uint("0").unwrap(), U256::ZERO);
    }

    #[test]
    fn parses_odd_length_and_mixed_case_hex() {
        assert_eq!(parse_uint("0xAbC").unwrap(), U256::from_u16(0xabc));
        assert_eq!(parse_uint("0x1").unwrap(), U256::ONE);
        assert_eq!(
            parse_uint(&format!("0x{}", "f".repeat(64))).unwrap(),
            U256::MAX
        );
        assert_eq!(parse_uint(&format!("0x{}", "0".repeat(65))), Err(Error::OutOfRange));
    }

    #[test]
    fn rejects_malformed_integers() {
        assert_eq!(parse_uint(""), Err(Error::InvalidEncoding));
        assert_eq!(parse_uint("0x"), Err(Error::InvalidEncoding));
        assert_eq!(parse_uint("0xg1"), Err(Error::InvalidEncoding));
        assert_eq!(parse_uint("12a"), Err(Error::InvalidEncoding));
        assert_eq!(parse_uint(&"1".repeat(80)), Err(Error::OutOfRange));
    }

    #[test]
    fn beta_matches_decimal_constant() {
        let beta: FieldElement =
            "3141592653589793238462643383279502884197169399375105820974944592307816406665"
                .parse()
                .unwrap();
        assert_eq!(beta, CURVE_EQUATION_B);
    }
}
