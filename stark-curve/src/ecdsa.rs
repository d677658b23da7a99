//! Stark ECDSA: the deterministic signature scheme verified by Starknet.
//!
//! Signatures are computed over a message hash that is already a field
//! element (typically a Pedersen or Poseidon hash) and differ from textbook
//! ECDSA in two ways: `r` is the raw x-coordinate of `k·G` bounded by
//! `2^251`, and verification retraces the fixed-iteration multiplication of
//! the on-chain AIR so that both accept exactly the same signatures.
//!
//! ## Usage
//!
#![cfg_attr(feature = "std", doc = "```")]
#![cfg_attr(not(feature = "std"), doc = "```ignore")]
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use stark_curve::{
//!     FieldElement,
//!     ecdsa::{SigningKey, VerifyingKey, signature::hazmat::PrehashVerifier},
//! };
//!
//! // Signing
//! let signing_key = SigningKey::from_field_element(&FieldElement::from_u64(0x5678))?;
//! let msg_hash = FieldElement::from_u64(0x1234);
//! let signature = signing_key.sign_hash(&msg_hash)?;
//!
//! // Verifying with only the x-coordinate of the public key
//! let verifying_key = VerifyingKey::from_x(&signing_key.verifying_key().x())?;
//! verifying_key.verify_prehash(&msg_hash.to_bytes_be(), &signature)?;
//! # Ok(())
//! # }
//! ```

mod rfc6979;
mod signing;
mod verifying;

pub use signature;

pub use self::{
    rfc6979::generate_k,
    signing::{SigningKey, get_public_key, sign},
    verifying::{VerifyingKey, verify},
};

use crate::{FieldElement, Scalar, StarkCurve};
use core::fmt::{self, Debug};
use signature::{Error, Result, SignatureEncoding};

#[cfg(feature = "serde")]
use serdect::serde::{Deserialize, Serialize, de, ser};

/// Stark ECDSA signature serialized as bytes: `r || s`, both big endian.
pub type SignatureBytes = [u8; Signature::BYTE_SIZE];

/// Stark ECDSA signature.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Signature {
    r: FieldElement,
    s: FieldElement,
}

impl Signature {
    /// Size of an encoded signature in bytes.
    pub const BYTE_SIZE: usize = 64;

    /// Create a signature from its components.
    ///
    /// Requires `0 < r < 2^251` and `0 < s < n`.
    pub fn new(r: FieldElement, s: FieldElement) -> Result<Self> {
        let r_ok = !bool::from(r.is_zero()) && r.to_uint() < StarkCurve::MAX_VALUE;
        let s_ok = !bool::from(s.is_zero()) && s.to_uint() < StarkCurve::ORDER;

        if r_ok && s_ok {
            Ok(Self { r, s })
        } else {
            Err(Error::new())
        }
    }

    /// Parse a signature from a byte array.
    pub fn from_bytes(bytes: &SignatureBytes) -> Result<Self> {
        let (r_bytes, s_bytes) = bytes.split_at(Self::BYTE_SIZE / 2);
        let r = FieldElement::from_be_slice(r_bytes).ok_or_else(Error::new)?;
        let s = FieldElement::from_be_slice(s_bytes).ok_or_else(Error::new)?;
        Self::new(r, s)
    }

    /// Parse a signature from a byte slice.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        SignatureBytes::try_from(bytes)
            .map_err(|_| Error::new())?
            .try_into()
    }

    /// Serialize this signature as bytes.
    pub fn to_bytes(&self) -> SignatureBytes {
        let mut ret = [0; Self::BYTE_SIZE];
        let (r_bytes, s_bytes) = ret.split_at_mut(Self::BYTE_SIZE / 2);
        r_bytes.copy_from_slice(&self.r.to_bytes_be());
        s_bytes.copy_from_slice(&self.s.to_bytes_be());
        ret
    }

    /// The `r` component.
    pub fn r(&self) -> FieldElement {
        self.r
    }

    /// The `s` component.
    pub fn s(&self) -> FieldElement {
        self.s
    }

    /// The `s` component as a scalar.
    pub(crate) fn s_scalar(&self) -> Scalar {
        Scalar::from_field_element(&self.s)
    }
}

impl Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signature")
            .field("r", &self.r)
            .field("s", &self.s)
            .finish()
    }
}

impl From<Signature> for SignatureBytes {
    fn from(signature: Signature) -> SignatureBytes {
        signature.to_bytes()
    }
}

impl From<&Signature> for SignatureBytes {
    fn from(signature: &Signature) -> SignatureBytes {
        signature.to_bytes()
    }
}

impl SignatureEncoding for Signature {
    type Repr = SignatureBytes;

    fn to_bytes(&self) -> Self::Repr {
        self.into()
    }

    fn encoded_len(&self) -> usize {
        Self::BYTE_SIZE
    }
}

impl TryFrom<SignatureBytes> for Signature {
    type Error = Error;

    fn try_from(signature: SignatureBytes) -> Result<Signature> {
        Signature::from_bytes(&signature)
    }
}

impl TryFrom<&SignatureBytes> for Signature {
    type Error = Error;

    fn try_from(signature: &SignatureBytes) -> Result<Signature> {
        Signature::from_bytes(signature)
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Signature> {
        Signature::from_slice(bytes)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serdect::array::serialize_hex_lower_or_bin(&self.to_bytes(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let mut bytes = [0u8; Self::BYTE_SIZE];
        serdect::array::deserialize_hex_or_bin(&mut bytes, deserializer)?;
        Self::from_bytes(&bytes).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::Signature;
    use crate::FieldElement;
    use hex_literal::hex;

    const SIGNATURE: [u8; 64] = hex!(
        "0157efe892f61628c638510f66cd1c2201d82aff054c77af483c985a4e063aad"
        "0100b929330239de2cf9ffb5332f18448bbb1f30c2cd0c0a91d46187833c3cfb"
    );

    #[test]
    fn bytes_round_trip() {
        let signature = Signature::from_bytes(&SIGNATURE).unwrap();
        assert_eq!(
            signature.r(),
            FieldElement::from_hex(
                "0157efe892f61628c638510f66cd1c2201d82aff054c77af483c985a4e063aad"
            )
        );
        assert_eq!(signature.to_bytes(), SIGNATURE);
        assert_eq!(Signature::try_from(&SIGNATURE[..]).unwrap(), signature);
    }

    #[test]
    fn rejects_out_of_range_components() {
        let r = FieldElement::from_u64(1);
        let s = FieldElement::from_u64(1);
        assert!(Signature::new(r, s).is_ok());
        assert!(Signature::new(FieldElement::ZERO, s).is_err());
        assert!(Signature::new(r, FieldElement::ZERO).is_err());

        // 2^251 is too large for r
        let two_pow_251 = FieldElement::from_hex(
            "0800000000000000000000000000000000000000000000000000000000000000",
        );
        assert!(Signature::new(two_pow_251, s).is_err());

        // n itself is too large for s
        let order = FieldElement::from_hex(
            "0800000000000010ffffffffffffffffb781126dcae7b2321e66a241adc64d2f",
        );
        assert!(Signature::new(r, order).is_err());
        assert!(Signature::new(r, order - FieldElement::ONE).is_ok());
    }

    #[test]
    fn rejects_wrong_lengths() {
        assert!(Signature::from_slice(&SIGNATURE[..63]).is_err());
        assert!(Signature::from_slice(&[0u8; 64]).is_err());
    }
}
