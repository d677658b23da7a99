//! V3 fee market fields.

use crate::EncodingError;
use serde::{Deserialize, Deserializer, de};
use stark_curve::{FieldElement, poseidon_hash_many};

/// A resource whose price is bounded by a V3 transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    /// L1 gas.
    L1Gas,
    /// L2 gas.
    L2Gas,
    /// L1 data (blob) gas.
    L1DataGas,
}

impl Resource {
    /// ASCII name folded into the bound encoding.
    pub const fn name(self) -> &'static str {
        match self {
            Resource::L1Gas => "L1_GAS",
            Resource::L2Gas => "L2_GAS",
            Resource::L1DataGas => "L1_DATA",
        }
    }
}

/// Upper bounds on the amount and unit price of one resource.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ResourceBounds {
    /// Maximum amount of the resource.
    #[serde(deserialize_with = "deserialize_u64")]
    pub max_amount: u64,
    /// Maximum price per unit.
    #[serde(deserialize_with = "deserialize_u128")]
    pub max_price_per_unit: u128,
}

impl ResourceBounds {
    /// `(name << 192) | (max_amount << 128) | max_price_per_unit`.
    pub fn encode(&self, resource: Resource) -> FieldElement {
        let name = resource.name().as_bytes();

        let mut bytes = [0u8; 32];
        bytes[8 - name.len()..8].copy_from_slice(name);
        bytes[8..16].copy_from_slice(&self.max_amount.to_be_bytes());
        bytes[16..].copy_from_slice(&self.max_price_per_unit.to_be_bytes());

        // Names are 7 bytes at most, so the top byte stays clear.
        FieldElement::from_bytes_be_reduced(&bytes)
    }
}

/// Bounds for every resource.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ResourceBoundsMapping {
    /// L1 gas bounds.
    pub l1_gas: ResourceBounds,
    /// L1 data gas bounds.
    pub l1_data_gas: ResourceBounds,
    /// L2 gas bounds.
    pub l2_gas: ResourceBounds,
}

/// Where the nonce or fee is accounted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum DataAvailabilityMode {
    /// Ethereum.
    #[default]
    L1,
    /// Starknet.
    L2,
}

impl DataAvailabilityMode {
    /// Numeric value of the mode.
    pub const fn value(self) -> u64 {
        match self {
            DataAvailabilityMode::L1 => 0,
            DataAvailabilityMode::L2 => 1,
        }
    }
}

/// `fee_mode + (nonce_mode << 32)`.
pub fn data_availability_modes(
    fee_mode: DataAvailabilityMode,
    nonce_mode: DataAvailabilityMode,
) -> FieldElement {
    FieldElement::from_u64(fee_mode.value() + (nonce_mode.value() << 32))
}

/// Poseidon hash of the tip followed by the L1 gas, L2 gas and L1 data gas
/// bounds.
pub fn tip_and_resources_hash(tip: u64, bounds: &ResourceBoundsMapping) -> FieldElement {
    poseidon_hash_many(&[
        FieldElement::from_u64(tip),
        bounds.l1_gas.encode(Resource::L1Gas),
        bounds.l2_gas.encode(Resource::L2Gas),
        bounds.l1_data_gas.encode(Resource::L1DataGas),
    ])
}

/// JSON numbers or hex/decimal strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum Number {
    Int(u64),
    Text(String),
}

/// Parse `number` as an unsigned integer of `width` bytes.
fn parse_be_bytes(
    number: Number,
    width: usize,
    target: &'static str,
) -> Result<[u8; 32], EncodingError> {
    let felt = match number {
        Number::Int(value) => FieldElement::from_u64(value),
        Number::Text(text) => text
            .parse::<FieldElement>()
            .map_err(|_| EncodingError::InvalidNumber(text.clone()))?,
    };

    let bytes = felt.to_bytes_be();
    if bytes[..32 - width].iter().any(|&b| b != 0) {
        return Err(EncodingError::OutOfRange {
            value: felt.to_string(),
            target,
        });
    }
    Ok(bytes)
}

pub(crate) fn deserialize_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let bytes = parse_be_bytes(Number::deserialize(deserializer)?, 8, "u64")
        .map_err(de::Error::custom)?;
    let mut word = [0u8; 8];
    word.copy_from_slice(&bytes[24..]);
    Ok(u64::from_be_bytes(word))
}

pub(crate) fn deserialize_u128<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<u128, D::Error> {
    let bytes = parse_be_bytes(Number::deserialize(deserializer)?, 16, "u128")
        .map_err(de::Error::custom)?;
    let mut word = [0u8; 16];
    word.copy_from_slice(&bytes[16..]);
    Ok(u128::from_be_bytes(word))
}
