//! Support for verifying Stark ECDSA signatures.
//!
//! ## Algorithm
//!
//! ```text
//! 1: require 0 < s < n, 0 < r < 2^251, 0 < z < 2^251 and Q on the curve
//! 2: w = 1 / s mod n, require 0 < w < 2^251
//! 3: zG = -shift + z·G        (fixed 251 iterations)
//! 4: rQ = shift + r·Q         (fixed 251 iterations)
//! 5: wB = shift + w·(zG + rQ) (fixed 251 iterations)
//! 6: accept if x(wB - shift) = r, otherwise retry 3-6 once with -Q
//! ```

use super::Signature;
use crate::{AffinePoint, Error, FieldElement, Result, Scalar, StarkCurve, mimic_ec_mult_air};
use signature::hazmat::PrehashVerifier;

/// Stark ECDSA public key used for verifying signatures.
///
/// Starknet usually identifies a public key by its x-coordinate alone;
/// verification accepts signatures made for either of the two points
/// sharing that x-coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerifyingKey {
    point: AffinePoint,
}

impl VerifyingKey {
    /// Initialize [`VerifyingKey`] from an affine point on the curve.
    pub fn from_affine(point: AffinePoint) -> Result<Self> {
        if point.is_on_curve() {
            Ok(Self { point })
        } else {
            Err(Error::NotOnCurve)
        }
    }

    pub(crate) fn from_affine_unchecked(point: AffinePoint) -> Self {
        Self { point }
    }

    /// Initialize [`VerifyingKey`] from the x-coordinate of the public key.
    pub fn from_x(x: &FieldElement) -> Result<Self> {
        AffinePoint::from_x(*x, false).map(|point| Self { point })
    }

    /// Borrow the inner [`AffinePoint`] for this public key.
    pub fn as_affine(&self) -> &AffinePoint {
        &self.point
    }

    /// The x-coordinate of the public key.
    pub fn x(&self) -> FieldElement {
        self.point.x()
    }

    /// Verify `signature` over `msg_hash`.
    pub fn verify_hash(&self, msg_hash: &FieldElement, signature: &Signature) -> bool {
        verify_point(msg_hash, &signature.r(), &signature.s_scalar(), &self.point)
    }
}

/// Verify the signature `(r, s)` of `msg_hash` under the public key
/// `(public_key_x, public_key_y)`.
///
/// This is total: any malformed input yields `false`.
pub fn verify(
    msg_hash: &FieldElement,
    r: &FieldElement,
    s: &FieldElement,
    public_key_x: &FieldElement,
    public_key_y: &FieldElement,
) -> bool {
    if bool::from(s.is_zero()) || s.to_uint() >= StarkCurve::ORDER {
        tracing::debug!("signature rejected: s out of range");
        return false;
    }

    let public_key = AffinePoint::new_unchecked(*public_key_x, *public_key_y);
    verify_point(msg_hash, r, &Scalar::from_field_element(s), &public_key)
}

fn verify_point(
    msg_hash: &FieldElement,
    r: &FieldElement,
    s: &Scalar,
    public_key: &AffinePoint,
) -> bool {
    if bool::from(s.is_zero()) {
        tracing::debug!("signature rejected: s out of range");
        return false;
    }
    if !in_air_range(r) {
        tracing::debug!("signature rejected: r out of range");
        return false;
    }

    let w = match Option::<Scalar>::from(s.invert()) {
        Some(w) if in_air_range(&w.to_field_element()) => w.to_field_element(),
        _ => {
            tracing::debug!("signature rejected: w out of range");
            return false;
        }
    };

    if !in_air_range(msg_hash) {
        tracing::debug!("signature rejected: message hash out of range");
        return false;
    }
    if !public_key.is_on_curve() {
        tracing::debug!("signature rejected: public key not on curve");
        return false;
    }

    if matches_r(msg_hash, r, &w, public_key) == Some(true) {
        return true;
    }

    tracing::debug!("retrying verification with negated public key");
    matches_r(msg_hash, r, &w, &-public_key) == Some(true)
}

/// Is `0 < value < 2^251`?
fn in_air_range(value: &FieldElement) -> bool {
    !bool::from(value.is_zero()) && value.to_uint() < StarkCurve::MAX_VALUE
}

/// Run the AIR computation for one choice of public key.
///
/// Returns `None` when one of the fixed-iteration multiplications fails.
fn matches_r(
    msg_hash: &FieldElement,
    r: &FieldElement,
    w: &FieldElement,
    public_key: &AffinePoint,
) -> Option<bool> {
    let shift = AffinePoint::SHIFT_POINT;
    let minus_shift = AffinePoint::MINUS_SHIFT_POINT;

    let z_g = mimic_ec_mult_air(msg_hash, &AffinePoint::GENERATOR, &minus_shift)
        .map_err(|err| tracing::debug!(%err, "zG multiplication failed"))
        .ok()?;
    let r_q = mimic_ec_mult_air(r, public_key, &shift)
        .map_err(|err| tracing::debug!(%err, "rQ multiplication failed"))
        .ok()?;
    let w_b = mimic_ec_mult_air(w, &(z_g + r_q), &shift)
        .map_err(|err| tracing::debug!(%err, "wB multiplication failed"))
        .ok()?;

    let out = w_b + minus_shift;
    Some(out.x() == *r)
}

impl PrehashVerifier<Signature> for VerifyingKey {
    fn verify_prehash(&self, prehash: &[u8], signature: &Signature) -> signature::Result<()> {
        let msg_hash = FieldElement::from_be_slice(prehash).ok_or_else(signature::Error::new)?;

        if self.verify_hash(&msg_hash, signature) {
            Ok(())
        } else {
            Err(signature::Error::new())
        }
    }
}

impl AsRef<AffinePoint> for VerifyingKey {
    fn as_ref(&self) -> &AffinePoint {
        self.as_affine()
    }
}

impl From<VerifyingKey> for AffinePoint {
    fn from(verifying_key: VerifyingKey) -> AffinePoint {
        verifying_key.point
    }
}

impl From<&VerifyingKey> for AffinePoint {
    fn from(verifying_key: &VerifyingKey) -> AffinePoint {
        verifying_key.point
    }
}
