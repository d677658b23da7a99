//! Scalar multiplication.

use super::{AffinePoint, FieldElement, ProjectivePoint, Scalar};
use crate::MulError;
use core::ops::Mul;
use subtle::{Choice, ConditionallySelectable};

/// Number of multiplier bits consumed by [`mimic_ec_mult_air`].
pub const AIR_MULTIPLIER_BITS: usize = 251;

/// Returns `k * point`.
///
/// Every bit of the 256-bit multiplier is processed with one doubling and
/// one addition, selecting the result by the bit.
pub fn ec_mult(k: &Scalar, point: &AffinePoint) -> AffinePoint {
    mul_projective(k, point).to_affine()
}

fn mul_projective(k: &Scalar, point: &AffinePoint) -> ProjectivePoint {
    let bytes = k.to_bytes_be();
    let mut acc = ProjectivePoint::IDENTITY;

    for byte in bytes {
        for i in (0..8).rev() {
            acc = acc.double();
            let sum = acc.add_mixed(point);
            acc = ProjectivePoint::conditional_select(&acc, &sum, Choice::from((byte >> i) & 1));
        }
    }

    acc
}

/// Returns `shift_point + m * point`, computed the way the signature
/// verification AIR computes it.
///
/// Exactly [`AIR_MULTIPLIER_BITS`] iterations are run regardless of the bit
/// length of `m`, and the partial sum must never share its x-coordinate with
/// the doubled point.
pub fn mimic_ec_mult_air(
    m: &FieldElement,
    point: &AffinePoint,
    shift_point: &AffinePoint,
) -> Result<AffinePoint, MulError> {
    if bool::from(m.is_zero()) || m.bits() > AIR_MULTIPLIER_BITS {
        return Err(MulError::TooManyBits);
    }

    let mut partial_sum = ProjectivePoint::from(shift_point);
    let mut doubled = ProjectivePoint::from(point);

    for i in 0..AIR_MULTIPLIER_BITS {
        if partial_sum.x_eq(&doubled) {
            return Err(MulError::EqualXCoordinates);
        }
        if m.bit(i) {
            partial_sum += &doubled;
        }
        doubled = doubled.double();
    }

    if (AIR_MULTIPLIER_BITS..256).any(|i| m.bit(i)) {
        return Err(MulError::NonZeroResidual);
    }

    Ok(partial_sum.to_affine())
}

impl Mul<&Scalar> for &AffinePoint {
    type Output = AffinePoint;

    fn mul(self, k: &Scalar) -> AffinePoint {
        ec_mult(k, self)
    }
}

impl Mul<Scalar> for AffinePoint {
    type Output = AffinePoint;

    fn mul(self, k: Scalar) -> AffinePoint {
        ec_mult(&k, &self)
    }
}

impl Mul<&Scalar> for &ProjectivePoint {
    type Output = ProjectivePoint;

    fn mul(self, k: &Scalar) -> ProjectivePoint {
        mul_projective(k, &self.to_affine())
    }
}
