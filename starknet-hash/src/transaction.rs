//! Transaction hashes.
//!
//! Versions 0 to 2 hash with Pedersen:
//!
//! ```text
//! hash_on_elements([prefix, version, address, selector, calldata_hash,
//!                   max_fee, chain_id, extra...])
//! ```
//!
//! Version 3 hashes with Poseidon:
//!
//! ```text
//! hash_many([prefix, 3, address, tip_and_resources_hash, hash_many(paymaster_data),
//!            chain_id, nonce, data_availability_modes, kind specific...])
//! ```

mod resource_bounds;

pub use self::resource_bounds::{
    DataAvailabilityMode, Resource, ResourceBounds, ResourceBoundsMapping,
    data_availability_modes, tip_and_resources_hash,
};

use self::resource_bounds::deserialize_u64;
use crate::{
    TransactionError, contract_address,
    encoding::{DECLARE_PREFIX, DEPLOY_ACCOUNT_PREFIX, INVOKE_PREFIX},
};
use serde::Deserialize;
use stark_curve::{FieldElement, pedersen_hash_on_elements, poseidon_hash_many};

/// Added to the version of transactions only used for fee estimation, `2^128`.
pub const QUERY_VERSION_OFFSET: FieldElement =
    FieldElement::from_hex("0000000000000000000000000000000100000000000000000000000000000000");

/// Invoke transaction of version 0, calling an entry point directly.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct InvokeV0 {
    /// Called contract.
    pub contract_address: FieldElement,
    /// Called entry point.
    pub entry_point_selector: FieldElement,
    /// Arguments.
    pub calldata: Vec<FieldElement>,
    /// Maximum fee.
    pub max_fee: FieldElement,
}

/// Invoke transaction of version 1, sent through an account.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct InvokeV1 {
    /// Account sending the transaction.
    pub sender_address: FieldElement,
    /// Calldata of the account's `__execute__`.
    pub calldata: Vec<FieldElement>,
    /// Maximum fee.
    pub max_fee: FieldElement,
    /// Account nonce.
    pub nonce: FieldElement,
}

/// Invoke transaction of version 3.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct InvokeV3 {
    /// Account sending the transaction.
    pub sender_address: FieldElement,
    /// Calldata of the account's `__execute__`.
    pub calldata: Vec<FieldElement>,
    /// Account nonce.
    pub nonce: FieldElement,
    /// Fee bounds.
    pub resource_bounds: ResourceBoundsMapping,
    /// Tip for the sequencer.
    #[serde(default, deserialize_with = "deserialize_u64")]
    pub tip: u64,
    /// Paymaster data.
    #[serde(default)]
    pub paymaster_data: Vec<FieldElement>,
    /// Data for deploying the account in the same transaction.
    #[serde(default)]
    pub account_deployment_data: Vec<FieldElement>,
    /// Where the nonce is accounted.
    #[serde(default)]
    pub nonce_data_availability_mode: DataAvailabilityMode,
    /// Where the fee is accounted.
    #[serde(default)]
    pub fee_data_availability_mode: DataAvailabilityMode,
}

/// Declare transaction of version 0. Its hash is not supported.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DeclareV0 {
    /// Declaring account.
    pub sender_address: FieldElement,
    /// Hash of the declared class.
    pub class_hash: FieldElement,
    /// Maximum fee.
    pub max_fee: FieldElement,
}

/// Declare transaction of version 1, for Cairo 0 classes.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DeclareV1 {
    /// Declaring account.
    pub sender_address: FieldElement,
    /// Hash of the declared class.
    pub class_hash: FieldElement,
    /// Maximum fee.
    pub max_fee: FieldElement,
    /// Account nonce.
    pub nonce: FieldElement,
}

/// Declare transaction of version 2, for Sierra classes.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DeclareV2 {
    /// Declaring account.
    pub sender_address: FieldElement,
    /// Hash of the declared Sierra class.
    pub class_hash: FieldElement,
    /// Hash of the compiled CASM class.
    pub compiled_class_hash: FieldElement,
    /// Maximum fee.
    pub max_fee: FieldElement,
    /// Account nonce.
    pub nonce: FieldElement,
}

/// Declare transaction of version 3.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DeclareV3 {
    /// Declaring account.
    pub sender_address: FieldElement,
    /// Hash of the declared Sierra class.
    pub class_hash: FieldElement,
    /// Hash of the compiled CASM class.
    pub compiled_class_hash: FieldElement,
    /// Account nonce.
    pub nonce: FieldElement,
    /// Fee bounds.
    pub resource_bounds: ResourceBoundsMapping,
    /// Tip for the sequencer.
    #[serde(default, deserialize_with = "deserialize_u64")]
    pub tip: u64,
    /// Paymaster data.
    #[serde(default)]
    pub paymaster_data: Vec<FieldElement>,
    /// Data for deploying the account in the same transaction.
    #[serde(default)]
    pub account_deployment_data: Vec<FieldElement>,
    /// Where the nonce is accounted.
    #[serde(default)]
    pub nonce_data_availability_mode: DataAvailabilityMode,
    /// Where the fee is accounted.
    #[serde(default)]
    pub fee_data_availability_mode: DataAvailabilityMode,
}

/// Account deployment of version 1.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DeployAccountV1 {
    /// Class of the account.
    pub class_hash: FieldElement,
    /// Salt of the account address.
    pub contract_address_salt: FieldElement,
    /// Arguments of the account constructor.
    pub constructor_calldata: Vec<FieldElement>,
    /// Maximum fee.
    pub max_fee: FieldElement,
    /// Account nonce.
    pub nonce: FieldElement,
}

/// Account deployment of version 3.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DeployAccountV3 {
    /// Class of the account.
    pub class_hash: FieldElement,
    /// Salt of the account address.
    pub contract_address_salt: FieldElement,
    /// Arguments of the account constructor.
    pub constructor_calldata: Vec<FieldElement>,
    /// Account nonce.
    pub nonce: FieldElement,
    /// Fee bounds.
    pub resource_bounds: ResourceBoundsMapping,
    /// Tip for the sequencer.
    #[serde(default, deserialize_with = "deserialize_u64")]
    pub tip: u64,
    /// Paymaster data.
    #[serde(default)]
    pub paymaster_data: Vec<FieldElement>,
    /// Where the nonce is accounted.
    #[serde(default)]
    pub nonce_data_availability_mode: DataAvailabilityMode,
    /// Where the fee is accounted.
    #[serde(default)]
    pub fee_data_availability_mode: DataAvailabilityMode,
}

impl DeployAccountV1 {
    /// Address the account will be deployed at.
    pub fn contract_address(&self) -> Result<FieldElement, TransactionError> {
        Ok(contract_address(
            &self.contract_address_salt,
            &self.class_hash,
            &self.constructor_calldata,
            &FieldElement::ZERO,
        )?)
    }
}

impl DeployAccountV3 {
    /// Address the account will be deployed at.
    pub fn contract_address(&self) -> Result<FieldElement, TransactionError> {
        Ok(contract_address(
            &self.contract_address_salt,
            &self.class_hash,
            &self.constructor_calldata,
            &FieldElement::ZERO,
        )?)
    }
}

/// Any transaction whose hash an account signs.
///
/// Deserialises from JSON objects tagged with `"type"`, e.g.
/// `{"type": "INVOKE_V1", ...}`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Transaction {
    /// Invoke, version 0.
    InvokeV0(InvokeV0),
    /// Invoke, version 1.
    InvokeV1(InvokeV1),
    /// Invoke, version 3.
    InvokeV3(InvokeV3),
    /// Declare, version 0.
    DeclareV0(DeclareV0),
    /// Declare, version 1.
    DeclareV1(DeclareV1),
    /// Declare, version 2.
    DeclareV2(DeclareV2),
    /// Declare, version 3.
    DeclareV3(DeclareV3),
    /// Deploy account, version 1.
    DeployAccountV1(DeployAccountV1),
    /// Deploy account, version 3.
    DeployAccountV3(DeployAccountV3),
}

impl Transaction {
    /// Transaction kind: `invoke`, `declare` or `deploy_account`.
    pub fn kind(&self) -> &'static str {
        match self {
            Transaction::InvokeV0(_) | Transaction::InvokeV1(_) | Transaction::InvokeV3(_) => {
                "invoke"
            }
            Transaction::DeclareV0(_)
            | Transaction::DeclareV1(_)
            | Transaction::DeclareV2(_)
            | Transaction::DeclareV3(_) => "declare",
            Transaction::DeployAccountV1(_) | Transaction::DeployAccountV3(_) => "deploy_account",
        }
    }

    /// Transaction version.
    pub fn version(&self) -> u8 {
        match self {
            Transaction::InvokeV0(_) | Transaction::DeclareV0(_) => 0,
            Transaction::InvokeV1(_)
            | Transaction::DeclareV1(_)
            | Transaction::DeployAccountV1(_) => 1,
            Transaction::DeclareV2(_) => 2,
            Transaction::InvokeV3(_)
            | Transaction::DeclareV3(_)
            | Transaction::DeployAccountV3(_) => 3,
        }
    }

    /// Hash of the transaction on the chain `chain_id`.
    pub fn hash(&self, chain_id: &FieldElement) -> Result<FieldElement, TransactionError> {
        self.hash_with_version(chain_id, FieldElement::from_u64(u64::from(self.version())))
    }

    /// Hash of the query variant of the transaction, with version `2^128 + version`.
    ///
    /// Such a transaction is only accepted for fee estimation and simulation.
    pub fn query_hash(&self, chain_id: &FieldElement) -> Result<FieldElement, TransactionError> {
        let version = FieldElement::from_u64(u64::from(self.version())) + QUERY_VERSION_OFFSET;
        self.hash_with_version(chain_id, version)
    }

    fn hash_with_version(
        &self,
        chain_id: &FieldElement,
        version: FieldElement,
    ) -> Result<FieldElement, TransactionError> {
        match self {
            Transaction::InvokeV0(tx) => Ok(legacy_hash(
                INVOKE_PREFIX,
                version,
                tx.contract_address,
                tx.entry_point_selector,
                pedersen_hash_on_elements(&tx.calldata)?,
                tx.max_fee,
                *chain_id,
                &[],
            )?),
            Transaction::InvokeV1(tx) => Ok(legacy_hash(
                INVOKE_PREFIX,
                version,
                tx.sender_address,
                FieldElement::ZERO,
                pedersen_hash_on_elements(&tx.calldata)?,
                tx.max_fee,
                *chain_id,
                &[tx.nonce],
            )?),
            Transaction::InvokeV3(tx) => Ok(V3Fields {
                prefix: INVOKE_PREFIX,
                version,
                address: tx.sender_address,
                tip: tx.tip,
                resource_bounds: &tx.resource_bounds,
                paymaster_data: &tx.paymaster_data,
                chain_id: *chain_id,
                nonce: tx.nonce,
                nonce_mode: tx.nonce_data_availability_mode,
                fee_mode: tx.fee_data_availability_mode,
            }
            .hash(&[
                poseidon_hash_many(&tx.account_deployment_data),
                poseidon_hash_many(&tx.calldata),
            ])),
            Transaction::DeclareV0(_) => Err(TransactionError::UnsupportedVersion {
                kind: self.kind(),
                version: 0,
            }),
            Transaction::DeclareV1(tx) => Ok(legacy_hash(
                DECLARE_PREFIX,
                version,
                tx.sender_address,
                FieldElement::ZERO,
                pedersen_hash_on_elements(&[tx.class_hash])?,
                tx.max_fee,
                *chain_id,
                &[tx.nonce],
            )?),
            Transaction::DeclareV2(tx) => Ok(legacy_hash(
                DECLARE_PREFIX,
                version,
                tx.sender_address,
                FieldElement::ZERO,
                pedersen_hash_on_elements(&[tx.class_hash])?,
                tx.max_fee,
                *chain_id,
                &[tx.nonce, tx.compiled_class_hash],
            )?),
            Transaction::DeclareV3(tx) => Ok(V3Fields {
                prefix: DECLARE_PREFIX,
                version,
                address: tx.sender_address,
                tip: tx.tip,
                resource_bounds: &tx.resource_bounds,
                paymaster_data: &tx.paymaster_data,
                chain_id: *chain_id,
                nonce: tx.nonce,
                nonce_mode: tx.nonce_data_availability_mode,
                fee_mode: tx.fee_data_availability_mode,
            }
            .hash(&[
                poseidon_hash_many(&tx.account_deployment_data),
                tx.class_hash,
                tx.compiled_class_hash,
            ])),
            Transaction::DeployAccountV1(tx) => {
                let mut calldata = vec![tx.class_hash, tx.contract_address_salt];
                calldata.extend_from_slice(&tx.constructor_calldata);

                Ok(legacy_hash(
                    DEPLOY_ACCOUNT_PREFIX,
                    version,
                    tx.contract_address()?,
                    FieldElement::ZERO,
                    pedersen_hash_on_elements(&calldata)?,
                    tx.max_fee,
                    *chain_id,
                    &[tx.nonce],
                )?)
            }
            Transaction::DeployAccountV3(tx) => Ok(V3Fields {
                prefix: DEPLOY_ACCOUNT_PREFIX,
                version,
                address: tx.contract_address()?,
                tip: tx.tip,
                resource_bounds: &tx.resource_bounds,
                paymaster_data: &tx.paymaster_data,
                chain_id: *chain_id,
                nonce: tx.nonce,
                nonce_mode: tx.nonce_data_availability_mode,
                fee_mode: tx.fee_data_availability_mode,
            }
            .hash(&[
                poseidon_hash_many(&tx.constructor_calldata),
                tx.class_hash,
                tx.contract_address_salt,
            ])),
        }
    }
}

/// Pedersen hash of a version 0, 1 or 2 transaction.
#[allow(clippy::too_many_arguments)]
fn legacy_hash(
    prefix: FieldElement,
    version: FieldElement,
    address: FieldElement,
    entry_point_selector: FieldElement,
    calldata_hash: FieldElement,
    max_fee: FieldElement,
    chain_id: FieldElement,
    extra: &[FieldElement],
) -> Result<FieldElement, stark_curve::Error> {
    let mut elements = vec![
        prefix,
        version,
        address,
        entry_point_selector,
        calldata_hash,
        max_fee,
        chain_id,
    ];
    elements.extend_from_slice(extra);

    tracing::trace!(elements = elements.len(), "hashing legacy transaction");
    pedersen_hash_on_elements(&elements)
}

/// Fields shared by every version 3 transaction.
struct V3Fields<'a> {
    prefix: FieldElement,
    version: FieldElement,
    address: FieldElement,
    tip: u64,
    resource_bounds: &'a ResourceBoundsMapping,
    paymaster_data: &'a [FieldElement],
    chain_id: FieldElement,
    nonce: FieldElement,
    nonce_mode: DataAvailabilityMode,
    fee_mode: DataAvailabilityMode,
}

impl V3Fields<'_> {
    /// Poseidon hash of the common fields followed by `extra`.
    fn hash(&self, extra: &[FieldElement]) -> FieldElement {
        let mut elements = vec![
            self.prefix,
            self.version,
            self.address,
            tip_and_resources_hash(self.tip, self.resource_bounds),
            poseidon_hash_many(self.paymaster_data),
            self.chain_id,
            self.nonce,
            data_availability_modes(self.fee_mode, self.nonce_mode),
        ];
        elements.extend_from_slice(extra);

        tracing::trace!(elements = elements.len(), "hashing v3 transaction");
        poseidon_hash_many(&elements)
    }
}
