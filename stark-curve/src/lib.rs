#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::checked_conversions,
    clippy::implicit_saturating_sub,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

//! ## Usage
//!
//! ```
//! use stark_curve::{FieldElement, SigningKey, pedersen_hash};
//!
//! let a = FieldElement::from_u64(0x12773);
//! let b = FieldElement::from_u64(0x872362);
//! let msg_hash = pedersen_hash(&a, &b)?;
//!
//! let signing_key = SigningKey::from_field_element(&FieldElement::from_hex(
//!     "003b162d58804dbfd3b0459e2fcf4d787d79fabbafdc2122761ad472cbf91191",
//! ))?;
//! let signature = signing_key.sign_hash(&msg_hash)?;
//! assert!(signing_key.verifying_key().verify_hash(&msg_hash, &signature));
//! # Ok::<(), stark_curve::Error>(())
//! ```

#[cfg(any(feature = "std", test))]
extern crate std;

#[cfg(not(any(feature = "std", feature = "critical-section")))]
compile_error!("either the `std` or the `critical-section` feature must be enabled");

#[macro_use]
mod macros;

pub mod ecdsa;
pub mod pedersen;
pub mod poseidon;
pub mod selector;

mod arithmetic;
mod error;

pub use crate::{
    arithmetic::{
        CURVE_EQUATION_A, CURVE_EQUATION_B,
        affine::AffinePoint,
        field::FieldElement,
        mul::{AIR_MULTIPLIER_BITS, ec_mult, mimic_ec_mult_air},
        projective::ProjectivePoint,
        scalar::Scalar,
    },
    ecdsa::{Signature, SigningKey, VerifyingKey, get_public_key, sign, verify},
    error::{Error, MulError, Result},
    pedersen::{PedersenHasher, pedersen_array, pedersen_hash, pedersen_hash_on_elements},
    poseidon::{
        PoseidonHasher, poseidon_hash, poseidon_hash_many, poseidon_hash_single, poseidon_permute,
    },
    selector::{get_selector_from_name, starknet_keccak},
};
pub use crypto_bigint::{self as bigint, U256};

/// Modulus of the base field serialized as hexadecimal.
const MODULUS_HEX: &str = "0800000000000011000000000000000000000000000000000000000000000001";

/// Order of the generator (i.e. scalar modulus) serialized as hexadecimal.
const ORDER_HEX: &str = "0800000000000010ffffffffffffffffb781126dcae7b2321e66a241adc64d2f";

/// The STARK-friendly elliptic curve `y² = x³ + α·x + β` used by Starknet.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, PartialOrd, Ord)]
pub struct StarkCurve;

impl StarkCurve {
    /// Modulus of the base field.
    pub const MODULUS: U256 = FieldElement::MODULUS;

    /// Order of the generator.
    pub const ORDER: U256 = Scalar::MODULUS;

    /// Exclusive upper bound `2^251` for signature components and message hashes.
    pub const MAX_VALUE: U256 = U256::ONE.shl_vartime(251);
}
