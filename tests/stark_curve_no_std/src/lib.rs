//! Builds `stark-curve` without `std`.

#![no_std]

use stark_curve::{FieldElement, poseidon_hash, verify};

pub fn hash_and_verify(
    msg: &FieldElement,
    r: &FieldElement,
    s: &FieldElement,
    public_key: (&FieldElement, &FieldElement),
) -> bool {
    verify(&poseidon_hash(msg, &FieldElement::ZERO), r, s, public_key.0, public_key.1)
}
