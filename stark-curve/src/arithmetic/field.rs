//! Field arithmetic modulo p = 2^251 + 17·2^192 + 1
//!
//! Arithmetic in prime fields is used for curve point coordinates and as the
//! native value type of every hash in this crate.

use crate::MODULUS_HEX;
use crypto_bigint::{U256, impl_modulus};
use ff::{Field, PrimeField};
use rand_core::RngCore;
use subtle::{Choice, CtOption};

#[cfg(feature = "serde")]
use {
    core::fmt,
    serdect::serde::{Deserialize, Serialize, de, ser},
};

impl_modulus!(FieldModulus, U256, MODULUS_HEX);

impl_field_element! {
    name: FieldElement,
    modulus: FieldModulus,
    modulus_hex: MODULUS_HEX,
    doc: "Element of the STARK curve's base field, the 252-bit prime field used for curve coordinates and hash values (\"felt\")."
}

/// `(t - 1) / 2` where `p - 1 = 2^192 · t`, as little endian limbs.
const T_MINUS_ONE_DIV_TWO: [u64; 4] = [0x0400_0000_0000_0008, 0, 0, 0];

impl FieldElement {
    /// The integer two.
    pub const TWO: Self = Self::from_u64(2);

    /// Square root, if it exists.
    ///
    /// Which of the two roots is returned is unspecified; callers that care
    /// about the sign select it by parity.
    pub fn sqrt(&self) -> CtOption<Self> {
        ff::helpers::sqrt_tonelli_shanks(self, T_MINUS_ONE_DIV_TWO)
    }
}

impl Field for FieldElement {
    const ZERO: Self = Self::ZERO;
    const ONE: Self = Self::ONE;

    fn random(mut rng: impl RngCore) -> Self {
        loop {
            let mut bytes = [0u8; 32];
            rng.fill_bytes(&mut bytes);
            bytes[0] &= 0x0f;

            if let Some(fe) = Option::from(Self::from_bytes_be(&bytes)) {
                return fe;
            }
        }
    }

    fn is_zero(&self) -> Choice {
        self.is_zero()
    }

    fn square(&self) -> Self {
        self.square()
    }

    fn double(&self) -> Self {
        self.double()
    }

    fn invert(&self) -> CtOption<Self> {
        self.invert()
    }

    fn sqrt(&self) -> CtOption<Self> {
        self.sqrt()
    }

    fn sqrt_ratio(num: &Self, div: &Self) -> (Choice, Self) {
        ff::helpers::sqrt_ratio_generic(num, div)
    }
}

impl PrimeField for FieldElement {
    type Repr = [u8; 32];

    const MODULUS: &'static str = "0x0800000000000011000000000000000000000000000000000000000000000001";
    const NUM_BITS: u32 = 252;
    const CAPACITY: u32 = 251;
    const TWO_INV: Self =
        Self::from_hex("0400000000000008800000000000000000000000000000000000000000000001");
    const MULTIPLICATIVE_GENERATOR: Self = Self::from_u64(3);
    const S: u32 = 192;
    const ROOT_OF_UNITY: Self =
        Self::from_hex("005282db87529cfa3f0464519c8b0fa5ad187148e11a61616070024f42f8ef94");
    const ROOT_OF_UNITY_INV: Self =
        Self::from_hex("003ae6a386329b25973ebc68dbf446534e6428affe8c0f24d90af58616019ce1");
    const DELTA: Self =
        Self::from_hex("00f66926e0ff773515a10661aa1f4d7e5cd6a000cc515a33cea96fa9c5262e50");

    fn from_repr(bytes: [u8; 32]) -> CtOption<Self> {
        Self::from_bytes_be(&bytes)
    }

    fn to_repr(&self) -> [u8; 32] {
        self.to_bytes_be()
    }

    fn is_odd(&self) -> Choice {
        self.is_odd()
    }
}

#[cfg(feature = "serde")]
impl Serialize for FieldElement {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            serdect::array::serialize_hex_lower_or_bin(&self.to_bytes_be(), serializer)
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for FieldElement {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            deserializer.deserialize_any(FieldElementVisitor)
        } else {
            let mut bytes = [0u8; 32];
            serdect::array::deserialize_hex_or_bin(&mut bytes, deserializer)?;
            Option::from(Self::from_bytes_be(&bytes))
                .ok_or_else(|| de::Error::custom("field element out of range"))
        }
    }
}

#[cfg(feature = "serde")]
struct FieldElementVisitor;

#[cfg(feature = "serde")]
impl de::Visitor<'_> for FieldElementVisitor {
    type Value = FieldElement;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a hex string, decimal string or integer below the field modulus")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> core::result::Result<FieldElement, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> core::result::Result<FieldElement, E> {
        Ok(FieldElement::from_u64(v))
    }
}
