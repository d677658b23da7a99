//! SNIP-12 revisions.

use super::types::TypeParameter;
use crate::merkle::MerkleHasher;
use core::fmt;
use stark_curve::{FieldElement, pedersen_hash_on_elements, poseidon_hash_many};

/// Version of the SNIP-12 encoding a document uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Revision {
    /// Legacy encoding: Pedersen, `StarkNetDomain`, unquoted type strings.
    V0,
    /// Active encoding: Poseidon, `StarknetDomain`, quoted type strings,
    /// enums, byte array strings and preset types.
    V1,
}

impl Revision {
    /// Numeric revision as it appears in the domain.
    pub const fn version(self) -> u8 {
        match self {
            Revision::V0 => 0,
            Revision::V1 => 1,
        }
    }

    /// Name of the domain separator type.
    pub const fn domain_type(self) -> &'static str {
        match self {
            Revision::V0 => "StarkNetDomain",
            Revision::V1 => "StarknetDomain",
        }
    }

    /// Type every domain field must have.
    pub(crate) const fn domain_field_type(self) -> &'static str {
        match self {
            Revision::V0 => "felt",
            Revision::V1 => "shortstring",
        }
    }

    /// Hash used for type hashes, struct hashes and arrays.
    pub(crate) fn hash(
        self,
        elements: &[FieldElement],
    ) -> Result<FieldElement, stark_curve::Error> {
        match self {
            Revision::V0 => pedersen_hash_on_elements(elements),
            Revision::V1 => Ok(poseidon_hash_many(elements)),
        }
    }

    /// Hash combining the nodes of `merkletree` values.
    pub(crate) const fn merkle_hasher(self) -> MerkleHasher {
        match self {
            Revision::V0 => MerkleHasher::Pedersen,
            Revision::V1 => MerkleHasher::Poseidon,
        }
    }

    /// Write a type or parameter name as it appears in a type string.
    pub(crate) fn escape(self, out: &mut String, name: &str) {
        match self {
            Revision::V0 => out.push_str(name),
            Revision::V1 => {
                out.push('"');
                out.push_str(name);
                out.push('"');
            }
        }
    }

    /// Types every document of this revision may use without defining them.
    pub(crate) fn preset_types(self) -> Vec<(&'static str, Vec<TypeParameter>)> {
        match self {
            Revision::V0 => Vec::new(),
            Revision::V1 => vec![
                (
                    "NftId",
                    vec![
                        TypeParameter::new("collection_address", "ContractAddress"),
                        TypeParameter::new("token_id", "u256"),
                    ],
                ),
                (
                    "TokenAmount",
                    vec![
                        TypeParameter::new("token_address", "ContractAddress"),
                        TypeParameter::new("amount", "u256"),
                    ],
                ),
                (
                    "u256",
                    vec![
                        TypeParameter::new("low", "u128"),
                        TypeParameter::new("high", "u128"),
                    ],
                ),
            ],
        }
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version())
    }
}

/// Names of the preset types, which no document may redefine.
pub(crate) const PRESET_TYPE_NAMES: [&str; 3] = ["NftId", "TokenAmount", "u256"];
