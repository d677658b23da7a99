//! Jacobian points

use super::{AffinePoint, CURVE_EQUATION_A, FieldElement};
use core::ops::{Add, AddAssign, Neg};
use subtle::{Choice, ConditionallySelectable};

/// Point on the STARK curve in Jacobian coordinates, `(X/Z², Y/Z³)`.
///
/// Accumulating in this form avoids a field inversion per addition, which
/// is what makes Pedersen hashing and the fixed-iteration multiplication
/// affordable.
#[derive(Clone, Copy, Debug)]
pub struct ProjectivePoint {
    x: FieldElement,
    y: FieldElement,
    z: FieldElement,
}

impl ProjectivePoint {
    /// Additive identity of the group.
    pub const IDENTITY: Self = Self {
        x: FieldElement::ONE,
        y: FieldElement::ONE,
        z: FieldElement::ZERO,
    };

    /// Generator used for public keys and signature nonces.
    pub const GENERATOR: Self = Self::from_affine(&AffinePoint::GENERATOR);

    /// Lift an affine point.
    pub const fn from_affine(p: &AffinePoint) -> Self {
        if p.infinity {
            Self::IDENTITY
        } else {
            Self {
                x: p.x,
                y: p.y,
                z: FieldElement::ONE,
            }
        }
    }

    /// Is this point the identity?
    pub fn is_identity(&self) -> bool {
        self.z.is_zero().into()
    }

    /// Normalize to affine coordinates.
    pub fn to_affine(&self) -> AffinePoint {
        match Option::<FieldElement>::from(self.z.invert()) {
            Some(z_inv) => {
                let z_inv2 = z_inv.square();
                AffinePoint::new_unchecked(self.x * z_inv2, self.y * z_inv2 * z_inv)
            }
            None => AffinePoint::IDENTITY,
        }
    }

    /// Do `self` and `other` have the same affine x-coordinate?
    ///
    /// The identity only matches itself.
    pub fn x_eq(&self, other: &Self) -> bool {
        match (self.is_identity(), other.is_identity()) {
            (true, true) => true,
            (false, false) => self.x * other.z.square() == other.x * self.z.square(),
            _ => false,
        }
    }

    /// Does the affine x-coordinate of `self` equal `x`?
    pub fn x_eq_affine(&self, x: &FieldElement) -> bool {
        !self.is_identity() && self.x == *x * self.z.square()
    }

    /// Returns `self + self`.
    pub fn double(&self) -> Self {
        if self.is_identity() || bool::from(self.y.is_zero()) {
            return Self::IDENTITY;
        }

        let yy = self.y.square();
        let zz = self.z.square();
        let s = (self.x * yy).double().double();
        let m = self.x.square() * FieldElement::from_u64(3) + CURVE_EQUATION_A * zz.square();
        let x3 = m.square() - s.double();
        let y3 = m * (s - x3) - yy.square().double().double().double();
        let z3 = (self.y * self.z).double();

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Returns `self + other` for an affine `other`.
    pub fn add_mixed(&self, other: &AffinePoint) -> Self {
        if other.infinity {
            return *self;
        }
        if self.is_identity() {
            return Self::from_affine(other);
        }

        let z1z1 = self.z.square();
        let u2 = other.x * z1z1;
        let s2 = other.y * self.z * z1z1;
        let h = u2 - self.x;
        let r = s2 - self.y;

        if bool::from(h.is_zero()) {
            return if bool::from(r.is_zero()) {
                self.double()
            } else {
                Self::IDENTITY
            };
        }

        let hh = h.square();
        let hhh = h * hh;
        let v = self.x * hh;
        let x3 = r.square() - hhh - v.double();
        let y3 = r * (v - x3) - self.y * hhh;
        let z3 = self.z * h;

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Returns `self + other`.
    fn add_projective(&self, other: &Self) -> Self {
        if other.is_identity() {
            return *self;
        }
        if self.is_identity() {
            return *other;
        }

        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        let u1 = self.x * z2z2;
        let u2 = other.x * z1z1;
        let s1 = self.y * other.z * z2z2;
        let s2 = other.y * self.z * z1z1;
        let h = u2 - u1;
        let r = s2 - s1;

        if bool::from(h.is_zero()) {
            return if bool::from(r.is_zero()) {
                self.double()
            } else {
                Self::IDENTITY
            };
        }

        let hh = h.square();
        let hhh = h * hh;
        let v = u1 * hh;
        let x3 = r.square() - hhh - v.double();
        let y3 = r * (v - x3) - s1 * hhh;
        let z3 = self.z * other.z * h;

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }
}

impl Default for ProjectivePoint {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<AffinePoint> for ProjectivePoint {
    fn from(p: AffinePoint) -> Self {
        Self::from_affine(&p)
    }
}

impl From<&AffinePoint> for ProjectivePoint {
    fn from(p: &AffinePoint) -> Self {
        Self::from_affine(p)
    }
}

impl ConditionallySelectable for ProjectivePoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
            z: FieldElement::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl PartialEq for ProjectivePoint {
    fn eq(&self, other: &Self) -> bool {
        if !self.x_eq(other) {
            return false;
        }
        if self.is_identity() {
            return true;
        }

        let z1_cubed = self.z.square() * self.z;
        let z2_cubed = other.z.square() * other.z;
        self.y * z2_cubed == other.y * z1_cubed
    }
}

impl Eq for ProjectivePoint {}

impl Neg for ProjectivePoint {
    type Output = ProjectivePoint;

    fn neg(self) -> ProjectivePoint {
        ProjectivePoint {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }
}

impl Add<ProjectivePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: ProjectivePoint) -> ProjectivePoint {
        self.add_projective(&other)
    }
}

impl Add<&ProjectivePoint> for &ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: &ProjectivePoint) -> ProjectivePoint {
        self.add_projective(other)
    }
}

impl Add<&AffinePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: &AffinePoint) -> ProjectivePoint {
        self.add_mixed(other)
    }
}

impl AddAssign<&ProjectivePoint> for ProjectivePoint {
    fn add_assign(&mut self, rhs: &ProjectivePoint) {
        *self = self.add_projective(rhs);
    }
}

impl AddAssign<&AffinePoint> for ProjectivePoint {
    fn add_assign(&mut self, rhs: &AffinePoint) {
        *self = self.add_mixed(rhs);
    }
}
