//! Support for Stark ECDSA signing.
//!
//! ## Algorithm
//!
//! ```text
//! 1: require 0 < z < 2^251 for the message hash z
//! 2: derive k from (d, z, seed) with RFC 6979
//! 3: r = x(k·G), retry with seed + 1 unless 0 < r < 2^251
//! 4: agg = r·d + z mod n, retry with seed + 1 if agg = 0
//! 5: w = k / agg mod n, retry with seed + 1 unless 0 < w < 2^251
//! 6: the signature is (r, s) with s = 1 / w mod n
//! ```

use super::{Signature, VerifyingKey, generate_k};
use crate::{AffinePoint, Error, FieldElement, Result, Scalar, StarkCurve, ec_mult};
use core::fmt::{self, Debug};
use rand_core::CryptoRngCore;
use signature::{KeypairRef, hazmat::PrehashSigner};
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Number of nonce candidates tried before signing gives up.
const MAX_NONCE_CANDIDATES: u64 = 1024;

/// Stark ECDSA private key used for signing message hashes.
///
/// ## Usage
///
/// Sign a field element directly with [`SigningKey::sign_hash`], or 32-byte
/// big endian digests through the [`PrehashSigner`] trait.
#[derive(Clone)]
pub struct SigningKey {
    /// Secret key.
    secret_scalar: Scalar,

    /// Verifying key for this signing key.
    verifying_key: VerifyingKey,
}

impl SigningKey {
    /// Create a signing key from a secret scalar, which must be non-zero.
    pub fn from_scalar(secret_scalar: Scalar) -> Result<Self> {
        if bool::from(secret_scalar.is_zero()) {
            return Err(Error::InvalidPrivateKey);
        }

        let public_key = ec_mult(&secret_scalar, &AffinePoint::GENERATOR);
        Ok(Self {
            secret_scalar,
            verifying_key: VerifyingKey::from_affine_unchecked(public_key),
        })
    }

    /// Create a signing key from a private key in `(0, n)`.
    pub fn from_field_element(private_key: &FieldElement) -> Result<Self> {
        let secret_scalar = Option::<Scalar>::from(Scalar::from_uint(&private_key.to_uint()))
            .ok_or(Error::InvalidPrivateKey)?;
        Self::from_scalar(secret_scalar)
    }

    /// Parse a signing key from its big endian encoding.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self> {
        let secret_scalar =
            Option::<Scalar>::from(Scalar::from_bytes_be(bytes)).ok_or(Error::InvalidPrivateKey)?;
        Self::from_scalar(secret_scalar)
    }

    /// Generate a random signing key.
    pub fn random(rng: &mut impl CryptoRngCore) -> Self {
        let secret_scalar = Scalar::random(rng);
        let public_key = ec_mult(&secret_scalar, &AffinePoint::GENERATOR);
        Self {
            secret_scalar,
            verifying_key: VerifyingKey::from_affine_unchecked(public_key),
        }
    }

    /// Serialize as big endian bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.secret_scalar.to_bytes_be()
    }

    /// Borrow the secret [`Scalar`] value for this key.
    ///
    /// # ⚠️ Warning
    ///
    /// This value is key material.
    ///
    /// Please treat it with the care it deserves!
    pub fn as_scalar(&self) -> &Scalar {
        &self.secret_scalar
    }

    /// Get the [`VerifyingKey`] which corresponds to this [`SigningKey`].
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// Sign a message hash with the deterministic nonce.
    pub fn sign_hash(&self, msg_hash: &FieldElement) -> Result<Signature> {
        self.sign_with_seed(msg_hash, None)
    }

    /// Sign a message hash, starting nonce derivation from `seed`.
    ///
    /// Different seeds give different, equally valid, signatures.
    pub fn sign_with_seed(
        &self,
        msg_hash: &FieldElement,
        seed: Option<&FieldElement>,
    ) -> Result<Signature> {
        if bool::from(msg_hash.is_zero()) || msg_hash.to_uint() >= StarkCurve::MAX_VALUE {
            return Err(Error::MessageHashOutOfRange);
        }

        let z = Scalar::from_field_element(msg_hash);
        let mut seed = seed.copied().unwrap_or(FieldElement::ZERO);

        for _ in 0..MAX_NONCE_CANDIDATES {
            let mut k = generate_k(msg_hash, &self.secret_scalar, Some(&seed));
            seed += FieldElement::ONE;

            let signature = try_sign_with_k(&self.secret_scalar, &z, &k);
            k.zeroize();

            match signature {
                Ok(signature) => return Ok(signature),
                Err(reason) => tracing::debug!(reason, "rejected signing nonce candidate"),
            }
        }

        Err(Error::NonceExhausted)
    }
}

/// One signing attempt, failing with the reason the nonce was rejected.
fn try_sign_with_k(
    secret_scalar: &Scalar,
    z: &Scalar,
    k: &Scalar,
) -> core::result::Result<Signature, &'static str> {
    let r = ec_mult(k, &AffinePoint::GENERATOR).x();
    if bool::from(r.is_zero()) || r.to_uint() >= StarkCurve::MAX_VALUE {
        return Err("r out of range");
    }

    let agg = Scalar::from_field_element(&r) * secret_scalar + z;
    let agg_inv = Option::<Scalar>::from(agg.invert()).ok_or("agg is zero")?;

    let w = *k * agg_inv;
    if bool::from(w.is_zero()) || w.to_uint() >= StarkCurve::MAX_VALUE {
        return Err("w out of range");
    }

    let s = Option::<Scalar>::from(w.invert()).ok_or("w is zero")?;
    Signature::new(r, s.to_field_element()).map_err(|_| "signature out of range")
}

/// Sign `msg_hash` with `private_key`.
pub fn sign(msg_hash: &FieldElement, private_key: &FieldElement) -> Result<Signature> {
    SigningKey::from_field_element(private_key)?.sign_hash(msg_hash)
}

/// Public key of `private_key`, the point `private_key·G`.
pub fn get_public_key(private_key: &FieldElement) -> Result<AffinePoint> {
    Ok(*SigningKey::from_field_element(private_key)?
        .verifying_key()
        .as_affine())
}

//
// `*Signer` trait impls
//

impl PrehashSigner<Signature> for SigningKey {
    fn sign_prehash(&self, prehash: &[u8]) -> signature::Result<Signature> {
        let msg_hash = FieldElement::from_be_slice(prehash).ok_or_else(signature::Error::new)?;
        self.sign_hash(&msg_hash)
            .map_err(|_| signature::Error::new())
    }
}

//
// Other trait impls
//

impl AsRef<VerifyingKey> for SigningKey {
    fn as_ref(&self) -> &VerifyingKey {
        &self.verifying_key
    }
}

impl ConstantTimeEq for SigningKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.secret_scalar.ct_eq(&other.secret_scalar)
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive()
    }
}

impl Drop for SigningKey {
    fn drop(&mut self) {
        self.secret_scalar.zeroize();
    }
}

impl ZeroizeOnDrop for SigningKey {}

/// Constant-time comparison
impl Eq for SigningKey {}
impl PartialEq for SigningKey {
    fn eq(&self, other: &SigningKey) -> bool {
        self.ct_eq(other).into()
    }
}

impl KeypairRef for SigningKey {
    type VerifyingKey = VerifyingKey;
}

#[cfg(test)]
mod tests {
    use super::SigningKey;
    use crate::{Error, FieldElement, Scalar};

    #[test]
    fn rejects_invalid_private_keys() {
        assert_eq!(
            SigningKey::from_field_element(&FieldElement::ZERO).unwrap_err(),
            Error::InvalidPrivateKey
        );
        let order = FieldElement::from_uint_reduced(&Scalar::MODULUS);
        assert_eq!(
            SigningKey::from_field_element(&order).unwrap_err(),
            Error::InvalidPrivateKey
        );
    }

    #[test]
    fn rejects_out_of_range_message_hashes() {
        let key = SigningKey::from_field_element(&FieldElement::from_u64(42)).unwrap();
        assert_eq!(
            key.sign_hash(&FieldElement::ZERO).unwrap_err(),
            Error::MessageHashOutOfRange
        );
        let two_pow_251 = FieldElement::from_hex(
            "0800000000000000000000000000000000000000000000000000000000000000",
        );
        assert_eq!(
            key.sign_hash(&two_pow_251).unwrap_err(),
            Error::MessageHashOutOfRange
        );
    }

    #[test]
    fn seeds_change_the_signature() {
        let key = SigningKey::from_field_element(&FieldElement::from_u64(42)).unwrap();
        let msg_hash = FieldElement::from_u64(7);
        let plain = key.sign_hash(&msg_hash).unwrap();
        let seeded = key
            .sign_with_seed(&msg_hash, Some(&FieldElement::from_u64(99)))
            .unwrap();
        assert_ne!(plain, seeded);
        assert!(key.verifying_key().verify_hash(&msg_hash, &seeded));
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let key = SigningKey::from_field_element(&FieldElement::from_u64(0xdead_beef)).unwrap();
        let debug = std::format!("{key:?}");
        assert!(!debug.contains("deadbeef"));
    }
}
