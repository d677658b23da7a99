//! Pedersen hash over the STARK curve.
//!
//! The hash walks a table of constant points: starting from the shift point,
//! bit `j` of input `i` selects whether the constant point at index
//! `2 + 252·i + j` is added. The x-coordinate of the final point is the hash.

use crate::{AffinePoint, Error, FieldElement, ProjectivePoint, Result};
use once_cell::sync::Lazy;

/// Number of bits consumed per input element.
pub const ELEMENT_BITS: usize = 252;

/// Number of constant points in the standard table, enough for two inputs.
pub const TABLE_LEN: usize = 2 + 2 * ELEMENT_BITS;

/// Number of low bits of each element that are multiplied with the first
/// base point of the pair; the remaining high bits use the second one.
const LOW_PART_BITS: usize = 248;

const P1: AffinePoint = AffinePoint::new_unchecked(
    FieldElement::from_hex("0234287dcbaffe7f969c748655fca9e58fa8120b6d56eb0c1080d17957ebe47b"),
    FieldElement::from_hex("03b056f100f96fb21e889527d41f4e39940135dd7a6c94cc6ed0268ee89e5615"),
);

const P2: AffinePoint = AffinePoint::new_unchecked(
    FieldElement::from_hex("04fa56f376c83db33f9dab2656558f3399099ec1de5e3018b7a6932dba8aa378"),
    FieldElement::from_hex("03fa0984c931c9e38113e0c0e47e4401562761f92a7a23b45168f4e80ff5b54d"),
);

const P3: AffinePoint = AffinePoint::new_unchecked(
    FieldElement::from_hex("04ba4cc166be8dec764910f75b45f74b40c690c74709e90f3aa372f0bd2d6997"),
    FieldElement::from_hex("0040301cf5c1751f4b971e46c4ede85fcac5c59a5ce5ae7c48151f27b24b219c"),
);

const P4: AffinePoint = AffinePoint::new_unchecked(
    FieldElement::from_hex("054302dcb0e6cc1c6e44cca8f61a63bb2ca65048d53fb325d36ff12c49a58202"),
    FieldElement::from_hex("01b77b3e37d13504b348046268d8ae25ce98ad783c25561a879dcc77e99c2426"),
);

static CONSTANT_POINTS: Lazy<[AffinePoint; TABLE_LEN]> = Lazy::new(|| {
    tracing::trace!(len = TABLE_LEN, "generating pedersen constant points");

    let mut table = [AffinePoint::IDENTITY; TABLE_LEN];
    table[0] = AffinePoint::SHIFT_POINT;
    table[1] = AffinePoint::GENERATOR;

    let mut index = 2;
    for (base, count) in [
        (P1, LOW_PART_BITS),
        (P2, ELEMENT_BITS - LOW_PART_BITS),
        (P3, LOW_PART_BITS),
        (P4, ELEMENT_BITS - LOW_PART_BITS),
    ] {
        let mut point = base;
        for _ in 0..count {
            table[index] = point;
            point = point.double();
            index += 1;
        }
    }

    table
});

/// Table of constant points driving the Pedersen hash.
///
/// The first entry is the starting point, the second is unused by hashing,
/// and every following run of 252 entries serves one input element.
#[derive(Clone, Copy, Debug)]
pub struct ConstantPoints<'a> {
    points: &'a [AffinePoint],
}

impl ConstantPoints<'static> {
    /// The standard table, generated on first use and shared afterwards.
    pub fn standard() -> Self {
        Self {
            points: &CONSTANT_POINTS[..],
        }
    }
}

impl Default for ConstantPoints<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> ConstantPoints<'a> {
    /// Use a caller-provided table.
    pub const fn new(points: &'a [AffinePoint]) -> Self {
        Self { points }
    }

    /// The points of this table.
    pub const fn points(&self) -> &'a [AffinePoint] {
        self.points
    }

    /// Number of elements this table can hash at once.
    pub const fn capacity(&self) -> usize {
        self.points.len().saturating_sub(2) / ELEMENT_BITS
    }

    /// Walk the table over all bits of `elements`.
    ///
    /// Fails when the table is too short for the number of elements, or when
    /// a constant point has the x-coordinate of the running point.
    pub fn hash(&self, elements: &[FieldElement]) -> Result<FieldElement> {
        let start = self
            .points
            .first()
            .ok_or(Error::MissingConstantPoint { index: 0 })?;
        let mut acc = ProjectivePoint::from(start);

        for (i, element) in elements.iter().enumerate() {
            for j in 0..ELEMENT_BITS {
                let index = 2 + i * ELEMENT_BITS + j;
                let point = self
                    .points
                    .get(index)
                    .ok_or(Error::MissingConstantPoint { index })?;

                if acc.x_eq_affine(&point.x()) {
                    return Err(Error::ConstantPointDuplication { index });
                }
                if element.bit(j) {
                    acc += point;
                }
            }
        }

        Ok(acc.to_affine().x())
    }
}

/// Pedersen hash of two field elements.
pub fn pedersen_hash(a: &FieldElement, b: &FieldElement) -> Result<FieldElement> {
    ConstantPoints::standard().hash(&[*a, *b])
}

/// Left fold of `pedersen_hash` over `elements`, starting from zero.
///
/// An empty slice hashes as the single element `0`.
pub fn pedersen_array(elements: &[FieldElement]) -> Result<FieldElement> {
    if elements.is_empty() {
        return fold(&[FieldElement::ZERO]);
    }
    fold(elements)
}

fn fold(elements: &[FieldElement]) -> Result<FieldElement> {
    elements
        .iter()
        .try_fold(FieldElement::ZERO, |acc, element| pedersen_hash(&acc, element))
}

/// Hash of a sequence with its length appended, the "compute hash on
/// elements" construction.
///
/// Appending the length keeps sequences of different lengths apart.
pub fn pedersen_hash_on_elements(elements: &[FieldElement]) -> Result<FieldElement> {
    let len = FieldElement::from_u64(elements.len() as u64);
    pedersen_hash(&fold(elements)?, &len)
}

/// Streaming form of [`pedersen_hash_on_elements`].
#[derive(Clone, Copy, Debug, Default)]
pub struct PedersenHasher {
    acc: FieldElement,
    count: u64,
}

impl PedersenHasher {
    /// Create an empty hasher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb one element.
    pub fn update(&mut self, element: &FieldElement) -> Result<()> {
        self.acc = pedersen_hash(&self.acc, element)?;
        self.count += 1;
        Ok(())
    }

    /// Hash of all absorbed elements followed by their count.
    pub fn finalize(&self) -> Result<FieldElement> {
        pedersen_hash(&self.acc, &FieldElement::from_u64(self.count))
    }
}
