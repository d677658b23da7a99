//! Poseidon hash over the base field, instantiated with the Hades
//! permutation of width 3.

use crate::FieldElement;
use once_cell::sync::Lazy;
use sha2::{Digest, Sha256};

/// Number of field elements in the permutation state.
pub const STATE_WIDTH: usize = 3;

/// Number of full rounds, split evenly before and after the partial rounds.
pub const FULL_ROUNDS: usize = 8;

/// Number of partial rounds.
pub const PARTIAL_ROUNDS: usize = 83;

const ROUNDS: usize = FULL_ROUNDS + PARTIAL_ROUNDS;

/// Round constant `i` is the SHA-256 digest of `"Hades" || decimal(i)`,
/// reduced by the field modulus.
static ROUND_CONSTANTS: Lazy<[[FieldElement; STATE_WIDTH]; ROUNDS]> = Lazy::new(|| {
    tracing::trace!(rounds = ROUNDS, "generating poseidon round constants");

    let mut constants = [[FieldElement::ZERO; STATE_WIDTH]; ROUNDS];
    for (round, lanes) in constants.iter_mut().enumerate() {
        for (lane, constant) in lanes.iter_mut().enumerate() {
            *constant = hades_constant(round * STATE_WIDTH + lane);
        }
    }
    constants
});

fn hades_constant(index: usize) -> FieldElement {
    let mut digits = [0u8; 20];
    let mut start = digits.len();
    let mut n = index;
    loop {
        start -= 1;
        digits[start] = b"0123456789"[n % 10];
        n /= 10;
        if n == 0 {
            break;
        }
    }

    let digest = Sha256::new()
        .chain_update(b"Hades")
        .chain_update(&digits[start..])
        .finalize();

    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest);
    FieldElement::from_bytes_be_reduced(&bytes)
}

/// Apply the Hades permutation to `state` in place.
pub fn poseidon_permute(state: &mut [FieldElement; STATE_WIDTH]) {
    let half_full = FULL_ROUNDS / 2;

    for (round, constants) in ROUND_CONSTANTS.iter().enumerate() {
        for (lane, constant) in state.iter_mut().zip(constants) {
            *lane += constant;
        }

        if round < half_full || round >= half_full + PARTIAL_ROUNDS {
            for lane in state.iter_mut() {
                *lane = lane.cube();
            }
        } else {
            state[2] = state[2].cube();
        }

        mix(state);
    }
}

/// Multiply by the MDS matrix `[[3, 1, 1], [1, -1, 1], [1, 1, -2]]`.
fn mix(state: &mut [FieldElement; STATE_WIDTH]) {
    let t = state[0] + state[1] + state[2];
    state[0] = t + state[0].double();
    state[1] = t - state[1].double();
    state[2] = t - state[2].double() - state[2];
}

/// Poseidon hash of two field elements.
pub fn poseidon_hash(x: &FieldElement, y: &FieldElement) -> FieldElement {
    let mut state = [*x, *y, FieldElement::TWO];
    poseidon_permute(&mut state);
    state[0]
}

/// Poseidon hash of one field element.
pub fn poseidon_hash_single(x: &FieldElement) -> FieldElement {
    let mut state = [*x, FieldElement::ZERO, FieldElement::ONE];
    poseidon_permute(&mut state);
    state[0]
}

/// Poseidon hash of an arbitrary number of field elements.
///
/// The input is padded with `1` and then with `0` to an even length, and
/// absorbed two elements at a time.
pub fn poseidon_hash_many(elements: &[FieldElement]) -> FieldElement {
    let mut hasher = PoseidonHasher::new();
    for element in elements {
        hasher.update(element);
    }
    hasher.finalize()
}

/// Streaming form of [`poseidon_hash_many`].
#[derive(Clone, Copy, Debug, Default)]
pub struct PoseidonHasher {
    state: [FieldElement; STATE_WIDTH],
    pending: Option<FieldElement>,
}

impl PoseidonHasher {
    /// Create an empty hasher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb one element.
    pub fn update(&mut self, element: &FieldElement) {
        match self.pending.take() {
            Some(previous) => {
                self.state[0] += previous;
                self.state[1] += element;
                poseidon_permute(&mut self.state);
            }
            None => self.pending = Some(*element),
        }
    }

    /// Pad, absorb the final block and squeeze.
    pub fn finalize(mut self) -> FieldElement {
        match self.pending.take() {
            Some(last) => {
                self.state[0] += last;
                self.state[1] += FieldElement::ONE;
            }
            None => self.state[0] += FieldElement::ONE,
        }

        poseidon_permute(&mut self.state);
        self.state[0]
    }
}

#[cfg(test)]
mod tests {
    use super::{PoseidonHasher, hades_constant, poseidon_hash_many, poseidon_permute};
    use crate::{FieldElement, poseidon_hash, poseidon_hash_single};

    #[test]
    fn round_constants_from_sha256() {
        assert_eq!(
            hades_constant(0),
            FieldElement::from_hex(
                "06861759ea556a2339dd92f9562a30b9e58e2ad98109ae4780b7fd8eac77fe6f"
            )
        );
        assert_eq!(
            hades_constant(272),
            FieldElement::from_hex(
                "061fc552b8eb75e17ad0fb7aaa4ca528f415e14f0d9cdbed861a8db0bfff0c5b"
            )
        );
    }

    #[test]
    fn permutation_of_zero_state() {
        let mut state = [FieldElement::ZERO; 3];
        poseidon_permute(&mut state);
        assert_eq!(
            state,
            [
                FieldElement::from_hex(
                    "079e8d1e78258000a28fc9d49e233bc6852357968577b1e386550ed6a9086133"
                ),
                FieldElement::from_hex(
                    "03840d003d0f3f96dbb796ff6aa6a63be5b5404b91ccaabca256154cbb6fb984"
                ),
                FieldElement::from_hex(
                    "01eb39da3f7d3b04142d0ac83d9da00c9325a61fb2ef326e50b70eaa8a3c7cc7"
                ),
            ]
        );
    }

    #[test]
    fn hash_of_two() {
        let x = FieldElement::from_hex(
            "000b662f9017fa7956fd70e26129b1833e10ad000fd37b4d9f4e0ce6884b7bbe",
        );
        let y = FieldElement::from_hex(
            "001fe356bf76102cdae1bfbdc173602ead228b12904c00dad9cf16e035468bea",
        );
        assert_eq!(
            poseidon_hash(&x, &y),
            FieldElement::from_hex(
                "075540825a6ecc5dc7d7c2f5f868164182742227f1367d66c43ee51ec7937a81"
            )
        );
    }

    #[test]
    fn hash_single_and_many() {
        assert_eq!(
            poseidon_hash_single(&FieldElement::ONE),
            FieldElement::from_hex(
                "06d226d4c804cd74567f5ac59c6a4af1fe2a6eced19fb7560a9124579877da25"
            )
        );
        assert_eq!(
            poseidon_hash_many(&[]),
            FieldElement::from_hex(
                "02272be0f580fd156823304800919530eaa97430e972d7213ee13f4fbf7a5dbc"
            )
        );
        assert_eq!(
            poseidon_hash_many(&[FieldElement::ONE, FieldElement::TWO]),
            FieldElement::from_hex(
                "0371cb6995ea5e7effcd2e174de264b5b407027a75a231a70c2c8d196107f0e7"
            )
        );
    }

    #[test]
    fn streaming_matches_slice() {
        let elements = [
            FieldElement::from_u64(7),
            FieldElement::from_u64(8),
            FieldElement::from_u64(9),
        ];
        let mut hasher = PoseidonHasher::new();
        for element in &elements {
            hasher.update(element);
        }
        assert_eq!(hasher.finalize(), poseidon_hash_many(&elements));
    }
}
