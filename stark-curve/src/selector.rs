//! Keccak-derived selectors.
//!
//! Entry point selectors and typed-data type hashes are the Keccak-256
//! digest of a name with everything above the low 250 bits cleared.

use crate::FieldElement;
use sha3::{Digest, Keccak256};

/// Number of digest bits kept by [`starknet_keccak`].
pub const SELECTOR_BITS: usize = 250;

/// Keccak-256 of `data`, truncated to its low 250 bits.
pub fn starknet_keccak(data: &[u8]) -> FieldElement {
    let digest = Keccak256::digest(data);

    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest);
    bytes[0] &= 0xff >> (256 - SELECTOR_BITS);

    // 250 bits are always below the modulus.
    FieldElement::from_bytes_be_reduced(&bytes)
}

/// Selector of the entry point or type called `name`.
pub fn get_selector_from_name(name: &str) -> FieldElement {
    starknet_keccak(name.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::{get_selector_from_name, starknet_keccak};
    use crate::FieldElement;

    #[test]
    fn known_selectors() {
        assert_eq!(
            get_selector_from_name("initialize"),
            FieldElement::from_hex(
                "0079dc0da7c54b95f10aa182ad0a46400db63156920adb65eca2654c0945a463"
            )
        );
        assert_eq!(
            get_selector_from_name("transfer"),
            FieldElement::from_hex(
                "0083afd3f4caedc6eebf44246fe54e38c95e3179a5ec9ea81740eca5b482d12e"
            )
        );
    }

    #[test]
    fn selectors_fit_250_bits() {
        for name in ["", "a", "balanceOf", "__execute__", "StarkNetDomain(name:felt)"] {
            assert!(get_selector_from_name(name).bits() <= 250);
        }
        assert_eq!(starknet_keccak(b"transfer"), get_selector_from_name("transfer"));
    }
}
