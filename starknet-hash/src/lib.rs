#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
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
//! use stark_curve::FieldElement;
//! use starknet_hash::{
//!     chain_id,
//!     encoding::Call,
//!     transaction::{InvokeV1, Transaction},
//! };
//!
//! let call = Call::new(
//!     FieldElement::from_u64(0x1234),
//!     "transfer",
//!     vec![FieldElement::from_u64(1), FieldElement::from_u64(2)],
//! );
//!
//! let transaction = Transaction::InvokeV1(InvokeV1 {
//!     sender_address: FieldElement::from_u64(0x5678),
//!     calldata: starknet_hash::encoding::encode_calls_legacy(&[call]),
//!     max_fee: FieldElement::from_u64(1_000_000),
//!     nonce: FieldElement::ZERO,
//! });
//!
//! let hash = transaction.hash(&chain_id::SEPOLIA)?;
//! assert_ne!(hash, FieldElement::ZERO);
//! # Ok::<(), starknet_hash::TransactionError>(())
//! ```

pub mod address;
pub mod chain_id;
pub mod encoding;
pub mod merkle;
pub mod transaction;
pub mod typed_data;

mod error;

pub use crate::{
    address::contract_address,
    error::{EncodingError, MerkleError, TransactionError, TypedDataError},
    merkle::{MerkleHasher, MerkleTree, pair_hash},
    transaction::Transaction,
    typed_data::{Revision, TypedData},
};
pub use stark_curve::{self, FieldElement};
