//! Scalar field arithmetic modulo the curve order n.

use crate::{FieldElement, ORDER_HEX};
use crypto_bigint::{U256, impl_modulus};
use rand_core::CryptoRngCore;

impl_modulus!(ScalarModulus, U256, ORDER_HEX);

impl_field_element! {
    name: Scalar,
    modulus: ScalarModulus,
    modulus_hex: ORDER_HEX,
    doc: "Integer modulo the order of the STARK curve's generator, used for private keys and for the `s` half of signatures."
}

impl Scalar {
    /// Reinterpret a field element as a scalar, reducing it modulo the curve order.
    pub const fn from_field_element(fe: &FieldElement) -> Self {
        Self::from_uint_reduced(&fe.to_uint())
    }

    /// Reinterpret this scalar as a field element.
    ///
    /// Always exact, since the curve order is below the field modulus.
    pub const fn to_field_element(&self) -> FieldElement {
        FieldElement::from_uint_reduced(&self.to_uint())
    }

    /// Sample a uniformly random non-zero scalar by rejection.
    pub fn random(rng: &mut impl CryptoRngCore) -> Self {
        loop {
            let mut bytes = [0u8; 32];
            rng.fill_bytes(&mut bytes);
            bytes[0] &= 0x0f;

            if let Some(scalar) = Option::<Self>::from(Self::from_bytes_be(&bytes)) {
                if !bool::from(scalar.is_zero()) {
                    return scalar;
                }
            }
        }
    }
}
