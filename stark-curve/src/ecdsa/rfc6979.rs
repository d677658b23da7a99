//! Deterministic nonce generation for Stark ECDSA.

use crate::{FieldElement, Scalar};
use crypto_bigint::{Encoding, U256};
use ::rfc6979::HmacDrbg;
use sha2::Sha256;
use zeroize::Zeroize;

/// Derive the signing nonce `k` for `msg_hash` under `private_key`.
///
/// This is HMAC-DRBG over SHA-256 as in RFC 6979, instantiated with the
/// private key and message hash as 32-byte big endian strings. A non-zero
/// `seed` is appended as additional data without leading zero bytes; signing
/// bumps it to draw a fresh nonce after a rejected candidate.
///
/// Candidates are converted to integers the way the reference signer does:
/// a 32-byte block is shifted right by 4 bits to fit the 252-bit order,
/// unless its leading byte is zero.
pub fn generate_k(
    msg_hash: &FieldElement,
    private_key: &Scalar,
    seed: Option<&FieldElement>,
) -> Scalar {
    let seed_bytes = seed.map(FieldElement::to_bytes_be).unwrap_or_default();
    let leading_zeros = seed_bytes.iter().take_while(|&&b| b == 0).count();

    let mut key_bytes = private_key.to_bytes_be();
    let mut drbg = HmacDrbg::<Sha256>::new(
        &key_bytes,
        &msg_hash.to_bytes_be(),
        &seed_bytes[leading_zeros..],
    );
    key_bytes.zeroize();

    loop {
        let mut bytes = [0u8; 32];
        drbg.fill_bytes(&mut bytes);

        let candidate = U256::from_be_bytes(bytes);
        let candidate = if bytes[0] == 0 {
            candidate
        } else {
            candidate.shr_vartime(4)
        };
        bytes.zeroize();

        if let Some(k) = Option::<Scalar>::from(Scalar::from_uint(&candidate)) {
            if !bool::from(k.is_zero()) {
                return k;
            }
        }
    }
}
