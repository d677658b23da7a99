//! Poseidon hash tests.

use proptest::prelude::*;
use stark_curve::{
    FieldElement, PoseidonHasher, poseidon_hash, poseidon_hash_many, poseidon_hash_single,
    poseidon_permute,
};

fn felt(s: &str) -> FieldElement {
    s.parse().unwrap()
}

#[test]
fn hash_of_two_small_elements() {
    assert_eq!(
        poseidon_hash(&FieldElement::ONE, &FieldElement::from_u64(2)),
        felt("0x5d44a3decb2b2e0cc71071f7b802f45dd792d064f0fc7316c46514f70f9891a"),
    );
}

#[test]
fn hash_many_pads_odd_and_even_lengths() {
    let three = [1u64, 2, 3].map(FieldElement::from_u64);
    let four = [1u64, 2, 3, 4].map(FieldElement::from_u64);

    assert_eq!(
        poseidon_hash_many(&three),
        felt("0x2f0d8840bcf3bc629598d8a6cc80cb7c0d9e52d93dab244bbf9cd0dca0ad082"),
    );
    assert_eq!(
        poseidon_hash_many(&four),
        felt("0x26e3ad8b876e02bc8a4fc43dad40a8f81a6384083cabffa190bcf40d512ae1d"),
    );
}

#[test]
fn single_is_a_capacity_tagged_permutation() {
    let x = FieldElement::ONE;
    let mut state = [x, FieldElement::ZERO, FieldElement::ONE];
    poseidon_permute(&mut state);
    assert_eq!(poseidon_hash_single(&x), state[0]);

    let y = FieldElement::from_u64(2);
    let mut state = [x, y, FieldElement::from_u64(2)];
    poseidon_permute(&mut state);
    assert_eq!(poseidon_hash(&x, &y), state[0]);
}

#[test]
fn many_of_one_differs_from_single() {
    let x = FieldElement::from_u64(7);
    assert_ne!(poseidon_hash_many(&[x]), poseidon_hash_single(&x));
}

fn field_element() -> impl Strategy<Value = FieldElement> {
    any::<[u8; 32]>().prop_map(|bytes| FieldElement::from_bytes_be_reduced(&bytes))
}

proptest! {
    #[test]
    fn streaming_matches_one_shot(elements in prop::collection::vec(field_element(), 0..8)) {
        let mut hasher = PoseidonHasher::new();
        for element in &elements {
            hasher.update(element);
        }
        prop_assert_eq!(hasher.finalize(), poseidon_hash_many(&elements));
    }
}
