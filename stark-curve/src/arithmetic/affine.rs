//! Affine points

use super::{CURVE_EQUATION_A, CURVE_EQUATION_B, FieldElement, ProjectivePoint};
use crate::{Error, Result};
use core::ops::{Add, Neg, Sub};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Point on the STARK curve in affine coordinates.
///
/// The identity only arises internally as an intermediate value; keys and
/// hash outputs are always finite points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AffinePoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) infinity: bool,
}

impl AffinePoint {
    /// Additive identity of the group, the point at infinity.
    pub const IDENTITY: Self = Self {
        x: FieldElement::ZERO,
        y: FieldElement::ZERO,
        infinity: true,
    };

    /// Generator used for public keys and signature nonces.
    pub const GENERATOR: Self = Self::new_unchecked(
        FieldElement::from_hex("01ef15c18599971b7beced415a40f0c7deacfd9b0d1819e03d723d8bc943cfca"),
        FieldElement::from_hex("005668060aa49730b7be4801df46ec62de53ecd11abe43a32873000c36e8dc1f"),
    );

    /// Starting point of Pedersen hashing and of fixed-iteration multiplication.
    pub const SHIFT_POINT: Self = Self::new_unchecked(
        FieldElement::from_hex("049ee3eba8c1600700ee1b87eb599f16716b0b1022947733551fde4050ca6804"),
        FieldElement::from_hex("03ca0cfe4b3bc6ddf346d49d06ea0ed34e621062c0e056c1d0405d266e10268a"),
    );

    /// Negation of [`AffinePoint::SHIFT_POINT`].
    pub const MINUS_SHIFT_POINT: Self = Self::new_unchecked(
        FieldElement::from_hex("049ee3eba8c1600700ee1b87eb599f16716b0b1022947733551fde4050ca6804"),
        FieldElement::from_hex("0435f301b4c439330cb92b62f915f12cb19def9d3f1fa93e2fbfa2d991efd977"),
    );

    /// Create a point, checking that it lies on the curve.
    pub fn new(x: FieldElement, y: FieldElement) -> Result<Self> {
        let point = Self::new_unchecked(x, y);

        if point.is_on_curve() {
            Ok(point)
        } else {
            Err(Error::NotOnCurve)
        }
    }

    /// Create a point without checking the curve equation.
    pub const fn new_unchecked(x: FieldElement, y: FieldElement) -> Self {
        Self {
            x,
            y,
            infinity: false,
        }
    }

    /// Recover a point from its x-coordinate, choosing the `y` whose parity
    /// matches `y_is_odd`.
    pub fn from_x(x: FieldElement, y_is_odd: bool) -> Result<Self> {
        let rhs = x.cube() + CURVE_EQUATION_A * x + CURVE_EQUATION_B;
        let y = Option::<FieldElement>::from(rhs.sqrt()).ok_or(Error::NotOnCurve)?;
        let flip = y.is_odd() ^ Choice::from(u8::from(y_is_odd));

        Ok(Self::new_unchecked(
            x,
            FieldElement::conditional_select(&y, &-y, flip),
        ))
    }

    /// The x-coordinate.
    pub const fn x(&self) -> FieldElement {
        self.x
    }

    /// The y-coordinate.
    pub const fn y(&self) -> FieldElement {
        self.y
    }

    /// Is this point the identity?
    pub const fn is_identity(&self) -> bool {
        self.infinity
    }

    /// Does this point satisfy `y² = x³ + α·x + β`?
    ///
    /// The identity is not considered to be on the curve, since it has no
    /// coordinates to validate.
    pub fn is_on_curve(&self) -> bool {
        if self.infinity {
            return false;
        }

        let lhs = self.y.square();
        let rhs = self.x.cube() + CURVE_EQUATION_A * self.x + CURVE_EQUATION_B;
        lhs.ct_eq(&rhs).into()
    }

    /// Returns `self + self`.
    pub fn double(&self) -> Self {
        if self.infinity || bool::from(self.y.is_zero()) {
            return Self::IDENTITY;
        }

        // λ = (3x² + α) / 2y
        let numerator = self.x.square() * FieldElement::from_u64(3) + CURVE_EQUATION_A;
        let denominator = self.y.double();
        let lambda = numerator * Self::inverse(&denominator);

        self.chord(&lambda, &self.x)
    }

    /// Returns `self + other` with affine formulas.
    fn add_affine(&self, other: &Self) -> Self {
        if self.infinity {
            return *other;
        }
        if other.infinity {
            return *self;
        }
        if self.x == other.x {
            return if self.y == other.y {
                self.double()
            } else {
                Self::IDENTITY
            };
        }

        // λ = (y₂ - y₁) / (x₂ - x₁)
        let lambda = (other.y - self.y) * Self::inverse(&(other.x - self.x));
        self.chord(&lambda, &other.x)
    }

    /// Third intersection of the line with slope `lambda` through `self`,
    /// reflected.
    fn chord(&self, lambda: &FieldElement, other_x: &FieldElement) -> Self {
        let x = lambda.square() - self.x - other_x;
        let y = *lambda * (self.x - x) - self.y;
        Self::new_unchecked(x, y)
    }

    /// Inverse of a denominator that is non-zero by construction.
    fn inverse(fe: &FieldElement) -> FieldElement {
        Option::from(fe.invert()).unwrap_or(FieldElement::ZERO)
    }
}

impl Default for AffinePoint {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<ProjectivePoint> for AffinePoint {
    fn from(p: ProjectivePoint) -> AffinePoint {
        p.to_affine()
    }
}

impl From<&ProjectivePoint> for AffinePoint {
    fn from(p: &ProjectivePoint) -> AffinePoint {
        p.to_affine()
    }
}

impl Neg for AffinePoint {
    type Output = AffinePoint;

    fn neg(self) -> AffinePoint {
        -&self
    }
}

impl Neg for &AffinePoint {
    type Output = AffinePoint;

    fn neg(self) -> AffinePoint {
        AffinePoint {
            x: self.x,
            y: -self.y,
            infinity: self.infinity,
        }
    }
}

impl Add<AffinePoint> for AffinePoint {
    type Output = AffinePoint;

    fn add(self, other: AffinePoint) -> AffinePoint {
        self.add_affine(&other)
    }
}

impl Add<&AffinePoint> for &AffinePoint {
    type Output = AffinePoint;

    fn add(self, other: &AffinePoint) -> AffinePoint {
        self.add_affine(other)
    }
}

impl Sub<AffinePoint> for AffinePoint {
    type Output = AffinePoint;

    fn sub(self, other: AffinePoint) -> AffinePoint {
        self.add_affine(&-other)
    }
}

impl Sub<&AffinePoint> for &AffinePoint {
    type Output = AffinePoint;

    fn sub(self, other: &AffinePoint) -> AffinePoint {
        self.add_affine(&-other)
    }
}

#[cfg(test)]
mod tests {
    use super::AffinePoint;
    use crate::{Error, FieldElement};

    #[test]
    fn constants_are_on_curve() {
        assert!(AffinePoint::GENERATOR.is_on_curve());
        assert!(AffinePoint::SHIFT_POINT.is_on_curve());
        assert!(AffinePoint::MINUS_SHIFT_POINT.is_on_curve());
        assert!(!AffinePoint::IDENTITY.is_on_curve());
    }

    #[test]
    fn minus_shift_point_is_negated_shift_point() {
        assert_eq!(-AffinePoint::SHIFT_POINT, AffinePoint::MINUS_SHIFT_POINT);
        assert!((AffinePoint::SHIFT_POINT + AffinePoint::MINUS_SHIFT_POINT).is_identity());
    }

    #[test]
    fn new_rejects_points_off_the_curve() {
        let g = AffinePoint::GENERATOR;
        assert_eq!(AffinePoint::new(g.x(), g.y()), Ok(g));
        assert_eq!(
            AffinePoint::new(g.x(), g.y() + FieldElement::ONE),
            Err(Error::NotOnCurve)
        );
    }

    #[test]
    fn from_x_selects_parity() {
        let g = AffinePoint::GENERATOR;
        let odd = bool::from(g.y().is_odd());
        assert_eq!(AffinePoint::from_x(g.x(), odd).unwrap(), g);
        assert_eq!(AffinePoint::from_x(g.x(), !odd).unwrap(), -g);
    }

    #[test]
    fn double_matches_add() {
        let g = AffinePoint::GENERATOR;
        let two_g = g.double();
        assert!(two_g.is_on_curve());
        assert_eq!(g + g, two_g);
        assert_eq!(two_g - g, g);
        assert_eq!(two_g + g, g + two_g);
    }

    #[test]
    fn identity_is_neutral() {
        let g = AffinePoint::GENERATOR;
        assert_eq!(g + AffinePoint::IDENTITY, g);
        assert_eq!(AffinePoint::IDENTITY + g, g);
        assert!((g - g).is_identity());
    }
}
