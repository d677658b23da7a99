//! Type definitions of a typed data document.

use super::revision::Revision;
use serde::{Deserialize, Serialize};

/// One parameter of a type definition, e.g. `{"name": "to", "type": "Person"}`.
///
/// In a type used as an enum, each parameter is a variant and its type is a
/// parenthesised tuple such as `(u128,felt*)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParameter {
    /// Parameter name.
    pub name: String,
    /// Type name: a basic type, a defined type, either followed by `*` for
    /// arrays, or a tuple for enum variants.
    #[serde(rename = "type")]
    pub kind: String,
    /// Element type of `enum` and `merkletree` parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains: Option<String>,
}

impl TypeParameter {
    /// Parameter `name` of type `kind`, without `contains`.
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            contains: None,
        }
    }

    /// Parameter `name` of type `kind` holding elements of type `contains`.
    pub fn with_contains(
        name: impl Into<String>,
        kind: impl Into<String>,
        contains: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            contains: Some(contains.into()),
        }
    }
}

/// Types SNIP-12 defines natively.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BasicType {
    Felt,
    Bool,
    String,
    Selector,
    MerkleTree,
    Enum,
    U128,
    I128,
    ContractAddress,
    ClassHash,
    Timestamp,
    ShortString,
}

impl BasicType {
    const ALL: [BasicType; 12] = [
        BasicType::Felt,
        BasicType::Bool,
        BasicType::String,
        BasicType::Selector,
        BasicType::MerkleTree,
        BasicType::Enum,
        BasicType::U128,
        BasicType::I128,
        BasicType::ContractAddress,
        BasicType::ClassHash,
        BasicType::Timestamp,
        BasicType::ShortString,
    ];

    pub(crate) const fn name(self) -> &'static str {
        match self {
            BasicType::Felt => "felt",
            BasicType::Bool => "bool",
            BasicType::String => "string",
            BasicType::Selector => "selector",
            BasicType::MerkleTree => "merkletree",
            BasicType::Enum => "enum",
            BasicType::U128 => "u128",
            BasicType::I128 => "i128",
            BasicType::ContractAddress => "ContractAddress",
            BasicType::ClassHash => "ClassHash",
            BasicType::Timestamp => "timestamp",
            BasicType::ShortString => "shortstring",
        }
    }

    /// Basic type called `name`, in any revision.
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|basic| basic.name() == name)
    }

    /// First revision defining the type.
    pub(crate) const fn since(self) -> Revision {
        match self {
            BasicType::Felt
            | BasicType::Bool
            | BasicType::String
            | BasicType::Selector
            | BasicType::MerkleTree => Revision::V0,
            _ => Revision::V1,
        }
    }

    /// Does the type take a `contains` element type?
    pub(crate) const fn uses_contains(self) -> bool {
        matches!(self, BasicType::Enum | BasicType::MerkleTree)
    }
}

/// Element types of a tuple `(a,b*,c)`, or `None` if `kind` is not a tuple.
///
/// The unit tuple `()` has no elements.
pub(crate) fn tuple_elements(kind: &str) -> Option<Vec<&str>> {
    let inner = kind.strip_prefix('(')?.strip_suffix(')')?;
    if inner.is_empty() {
        Some(Vec::new())
    } else {
        Some(inner.split(',').collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{BasicType, TypeParameter, tuple_elements};
    use crate::typed_data::Revision;

    #[test]
    fn basic_types_by_name() {
        assert_eq!(BasicType::from_name("u128"), Some(BasicType::U128));
        assert_eq!(BasicType::from_name("Person"), None);
        assert_eq!(BasicType::from_name("felt*"), None);
        assert_eq!(BasicType::Felt.since(), Revision::V0);
        assert_eq!(BasicType::ShortString.since(), Revision::V1);
    }

    #[test]
    fn tuples() {
        assert_eq!(tuple_elements("()"), Some(Vec::new()));
        assert_eq!(tuple_elements("(u128,felt*)"), Some(vec!["u128", "felt*"]));
        assert_eq!(tuple_elements("u128"), None);
    }

    #[test]
    fn parameter_json() {
        let parameter: TypeParameter =
            serde_json::from_str(r#"{"name": "root", "type": "merkletree", "contains": "Policy"}"#)
                .unwrap();
        assert_eq!(
            parameter,
            TypeParameter::with_contains("root", "merkletree", "Policy")
        );
    }
}
