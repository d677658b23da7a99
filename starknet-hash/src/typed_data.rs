//! SNIP-12 typed data: hashes of structured messages for off-chain signing.
//!
//! ## Encoding
//!
//! ```text
//! encode_type(T)    = T(p1:t1,...) followed by the blocks of T's dependencies,
//!                     sorted by name
//! type_hash(T)      = starknet_keccak(encode_type(T))
//! struct_hash(T, v) = hash([type_hash(T), encode(t1, v.p1), ...])
//! message_hash      = hash(["StarkNet Message", struct_hash(domain),
//!                           account, struct_hash(primaryType, message)])
//! ```
//!
//! where `hash` is Pedersen `hash_on_elements` in revision 0 and Poseidon
//! `hash_many` in revision 1.
//!
//! ## Usage
//!
//! ```
//! use starknet_hash::{FieldElement, TypedData};
//!
//! let typed_data: TypedData = r#"{
//!     "types": {
//!         "StarkNetDomain": [
//!             { "name": "name", "type": "felt" },
//!             { "name": "version", "type": "felt" },
//!             { "name": "chainId", "type": "felt" }
//!         ],
//!         "Mail": [{ "name": "contents", "type": "felt" }]
//!     },
//!     "primaryType": "Mail",
//!     "domain": { "name": "Mail", "version": "1", "chainId": 1 },
//!     "message": { "contents": "Hello, Bob!" }
//! }"#
//! .parse()?;
//!
//! assert_eq!(typed_data.encode_type("Mail")?, "Mail(contents:felt)");
//! let hash = typed_data.message_hash(&FieldElement::from_u64(0x1234))?;
//! assert_ne!(hash, FieldElement::ZERO);
//! # Ok::<(), starknet_hash::TypedDataError>(())
//! ```

mod revision;
mod types;
mod validation;
mod value;

pub use self::{revision::Revision, types::TypeParameter};

use self::types::{BasicType, tuple_elements};
use crate::{MerkleTree, TypedDataError};
use core::str::FromStr;
use serde::Deserialize;
use serde_json::{Map, Value};
use stark_curve::{FieldElement, starknet_keccak};
use std::collections::{BTreeMap, BTreeSet};

/// `"StarkNet Message"` as a short string.
pub const MESSAGE_PREFIX: FieldElement =
    FieldElement::from_hex("00000000000000000000000000000000537461726b4e6574204d657373616765");

/// Encoded type string and its hash.
#[derive(Clone, Debug, PartialEq, Eq)]
struct EncodedType {
    encoding: String,
    hash: FieldElement,
}

/// Document as it appears in JSON, before validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTypedData {
    types: BTreeMap<String, Vec<TypeParameter>>,
    primary_type: String,
    domain: Map<String, Value>,
    message: Value,
}

/// A validated SNIP-12 document.
///
/// Type strings and type hashes are computed once, when the document is
/// created.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawTypedData")]
pub struct TypedData {
    revision: Revision,
    /// Defined types and, in revision 1, the preset types.
    types: BTreeMap<String, Vec<TypeParameter>>,
    primary_type: String,
    domain: Value,
    message: Value,
    encoded_types: BTreeMap<String, EncodedType>,
}

impl TypedData {
    /// Validate a document and precompute its type hashes.
    pub fn new(
        types: BTreeMap<String, Vec<TypeParameter>>,
        primary_type: impl Into<String>,
        domain: Map<String, Value>,
        message: Value,
    ) -> Result<Self, TypedDataError> {
        let primary_type = primary_type.into();

        let revision = validation::detect_revision(&types, &domain)
            .and_then(|revision| {
                validation::validate(&types, revision, &primary_type, &domain).map(|()| revision)
            })
            .inspect_err(|err| tracing::debug!(%err, "typed data rejected"))?;

        let mut types = types;
        for (name, params) in revision.preset_types() {
            types.entry(name.to_owned()).or_insert(params);
        }

        let encoded_types = types
            .keys()
            .map(|name| {
                let encoding = encode_type(&types, revision, name);
                let hash = starknet_keccak(encoding.as_bytes());
                (name.clone(), EncodedType { encoding, hash })
            })
            .collect();

        Ok(Self {
            revision,
            types,
            primary_type,
            domain: Value::Object(domain),
            message,
            encoded_types,
        })
    }

    /// Revision of the document.
    pub fn revision(&self) -> Revision {
        self.revision
    }

    /// Name of the type of the message.
    pub fn primary_type(&self) -> &str {
        &self.primary_type
    }

    /// Domain separator values.
    pub fn domain(&self) -> &Value {
        &self.domain
    }

    /// Message values.
    pub fn message(&self) -> &Value {
        &self.message
    }

    /// Definition of `type_name`, including preset types.
    pub fn type_definition(&self, type_name: &str) -> Option<&[TypeParameter]> {
        self.types.get(type_name).map(Vec::as_slice)
    }

    fn encoded_type(&self, type_name: &str) -> Result<&EncodedType, TypedDataError> {
        self.encoded_types
            .get(type_name)
            .ok_or_else(|| TypedDataError::UndefinedType(type_name.to_owned()))
    }

    /// Type string of `type_name` and its dependencies.
    pub fn encode_type(&self, type_name: &str) -> Result<&str, TypedDataError> {
        Ok(&self.encoded_type(type_name)?.encoding)
    }

    /// Keccak selector of the type string of `type_name`.
    pub fn type_hash(&self, type_name: &str) -> Result<FieldElement, TypedDataError> {
        Ok(self.encoded_type(type_name)?.hash)
    }

    /// Hash of `data` as a value of `type_name`.
    pub fn struct_hash(
        &self,
        type_name: &str,
        data: &Value,
    ) -> Result<FieldElement, TypedDataError> {
        let params = self
            .types
            .get(type_name)
            .ok_or_else(|| TypedDataError::UndefinedType(type_name.to_owned()))?;
        let object = data.as_object().ok_or_else(|| TypedDataError::InvalidValue {
            name: type_name.to_owned(),
            kind: type_name.to_owned(),
            reason: "expected an object".to_owned(),
        })?;

        let mut elements = Vec::with_capacity(params.len() + 1);
        elements.push(self.type_hash(type_name)?);
        for param in params {
            let value = object
                .get(&param.name)
                .ok_or_else(|| TypedDataError::MissingValue(param.name.clone()))?;
            elements.push(self.encode_value(
                &param.kind,
                param.contains.as_deref(),
                value,
                &param.name,
            )?);
        }

        Ok(self.revision.hash(&elements)?)
    }

    /// Hash of the domain separator.
    pub fn domain_hash(&self) -> Result<FieldElement, TypedDataError> {
        self.struct_hash(self.revision.domain_type(), &self.domain)
    }

    /// Hash of the message that `account` signs.
    pub fn message_hash(&self, account: &FieldElement) -> Result<FieldElement, TypedDataError> {
        let elements = [
            MESSAGE_PREFIX,
            self.domain_hash()?,
            *account,
            self.struct_hash(&self.primary_type, &self.message)?,
        ];
        Ok(self.revision.hash(&elements)?)
    }

    /// Encode a single value of type `kind`.
    fn encode_value(
        &self,
        kind: &str,
        contains: Option<&str>,
        value: &Value,
        name: &str,
    ) -> Result<FieldElement, TypedDataError> {
        if let Some(element_kind) = kind.strip_suffix('*') {
            let items = value.as_array().ok_or_else(|| TypedDataError::InvalidValue {
                name: name.to_owned(),
                kind: kind.to_owned(),
                reason: "expected an array".to_owned(),
            })?;
            let elements = items
                .iter()
                .map(|item| self.encode_value(element_kind, contains, item, name))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(self.revision.hash(&elements)?);
        }

        let Some(basic) = BasicType::from_name(kind) else {
            return self.struct_hash(kind, value);
        };

        match basic {
            BasicType::Felt
            | BasicType::ShortString
            | BasicType::ContractAddress
            | BasicType::ClassHash => value::felt(value, name, basic.name()),
            BasicType::Bool => value::boolean(value, name),
            BasicType::String => match self.revision {
                Revision::V0 => value::felt(value, name, basic.name()),
                Revision::V1 => Ok(self.revision.hash(&value::byte_array(value, name)?)?),
            },
            BasicType::Selector => value::selector(value, name),
            BasicType::U128 | BasicType::Timestamp => value::uint128(value, name, basic.name()),
            BasicType::I128 => value::int128(value, name),
            BasicType::MerkleTree => self.merkle_root(contains, value, name),
            BasicType::Enum => self.encode_enum(contains, value, name),
        }
    }

    /// Root of the tree whose leaves are the encoded `contains` values.
    fn merkle_root(
        &self,
        contains: Option<&str>,
        value: &Value,
        name: &str,
    ) -> Result<FieldElement, TypedDataError> {
        let contains = contains.ok_or_else(|| TypedDataError::MissingContains(name.to_owned()))?;
        let items = value.as_array().ok_or_else(|| TypedDataError::InvalidValue {
            name: name.to_owned(),
            kind: "merkletree".to_owned(),
            reason: "expected an array".to_owned(),
        })?;

        let leaves = items
            .iter()
            .map(|item| self.encode_value(contains, None, item, name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(MerkleTree::new(leaves, self.revision.merkle_hasher())?.root())
    }

    /// `{"Variant": [values...]}` encodes as `hash([index, values...])`.
    ///
    /// The unit variant `()` encodes as `hash([index, 0])`.
    fn encode_enum(
        &self,
        contains: Option<&str>,
        value: &Value,
        name: &str,
    ) -> Result<FieldElement, TypedDataError> {
        let enum_type = contains.ok_or_else(|| TypedDataError::MissingContains(name.to_owned()))?;
        let variants = self
            .types
            .get(enum_type)
            .ok_or_else(|| TypedDataError::UndefinedType(enum_type.to_owned()))?;

        let invalid = |reason: &str| TypedDataError::InvalidValue {
            name: name.to_owned(),
            kind: enum_type.to_owned(),
            reason: reason.to_owned(),
        };

        let (variant_name, data) = match value.as_object() {
            Some(object) if object.len() == 1 => object
                .iter()
                .next()
                .ok_or_else(|| invalid("expected a single variant"))?,
            _ => return Err(invalid("expected an object with a single variant")),
        };

        let (index, variant) = variants
            .iter()
            .enumerate()
            .find(|(_, variant)| variant.name == *variant_name)
            .ok_or_else(|| TypedDataError::UnknownVariant {
                enum_type: enum_type.to_owned(),
                variant: variant_name.clone(),
            })?;
        let element_kinds = tuple_elements(&variant.kind)
            .ok_or_else(|| TypedDataError::InvalidEnumVariant(variant.name.clone()))?;
        let data = data
            .as_array()
            .ok_or_else(|| invalid("expected an array of variant values"))?;

        let mut elements = vec![FieldElement::from_u64(index as u64)];
        if element_kinds.is_empty() {
            elements.push(FieldElement::ZERO);
        } else {
            if data.len() != element_kinds.len() {
                return Err(invalid("wrong number of variant values"));
            }
            for (kind, item) in element_kinds.into_iter().zip(data) {
                elements.push(self.encode_value(kind, None, item, name)?);
            }
        }

        Ok(self.revision.hash(&elements)?)
    }
}

impl TryFrom<RawTypedData> for TypedData {
    type Error = TypedDataError;

    fn try_from(raw: RawTypedData) -> Result<Self, TypedDataError> {
        Self::new(raw.types, raw.primary_type, raw.domain, raw.message)
    }
}

impl FromStr for TypedData {
    type Err = TypedDataError;

    /// Parse and validate a JSON document.
    fn from_str(json: &str) -> Result<Self, TypedDataError> {
        let raw: RawTypedData =
            serde_json::from_str(json).map_err(|err| TypedDataError::Json(err.to_string()))?;
        raw.try_into()
    }
}

/// Custom types `type_name` depends on, itself included.
fn collect_dependencies<'a>(
    types: &'a BTreeMap<String, Vec<TypeParameter>>,
    revision: Revision,
    type_name: &'a str,
    found: &mut BTreeSet<&'a str>,
) {
    let Some(params) = types.get(type_name) else {
        return;
    };
    if !found.insert(type_name) {
        return;
    }

    for param in params {
        let references = match tuple_elements(&param.kind) {
            Some(elements) => elements,
            None if param.kind == "enum" && revision == Revision::V1 => {
                param.contains.as_deref().into_iter().collect()
            }
            None => vec![param.kind.as_str()],
        };

        for reference in references {
            collect_dependencies(types, revision, reference.trim_end_matches('*'), found);
        }
    }
}

/// `Name(param:type,...)` for `type_name` followed by its dependencies.
fn encode_type(
    types: &BTreeMap<String, Vec<TypeParameter>>,
    revision: Revision,
    type_name: &str,
) -> String {
    let mut dependencies = BTreeSet::new();
    collect_dependencies(types, revision, type_name, &mut dependencies);
    dependencies.remove(type_name);

    let mut out = String::new();
    for name in core::iter::once(type_name).chain(dependencies) {
        let Some(params) = types.get(name) else {
            continue;
        };

        revision.escape(&mut out, name);
        out.push('(');
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            revision.escape(&mut out, &param.name);
            out.push(':');

            match (tuple_elements(&param.kind), param.contains.as_deref()) {
                (_, Some(contains)) if param.kind == "enum" && revision == Revision::V1 => {
                    revision.escape(&mut out, contains);
                }
                (Some(elements), _) => {
                    out.push('(');
                    for (j, element) in elements.into_iter().enumerate() {
                        if j > 0 {
                            out.push(',');
                        }
                        revision.escape(&mut out, element);
                    }
                    out.push(')');
                }
                (None, _) => revision.escape(&mut out, &param.kind),
            }
        }
        out.push(')');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mail() -> TypedData {
        serde_json::from_value(json!({
            "types": {
                "StarkNetDomain": [
                    { "name": "name", "type": "felt" },
                    { "name": "version", "type": "felt" },
                    { "name": "chainId", "type": "felt" }
                ],
                "Person": [
                    { "name": "name", "type": "felt" },
                    { "name": "wallet", "type": "felt" }
                ],
                "Mail": [
                    { "name": "from", "type": "Person" },
                    { "name": "to", "type": "Person" },
                    { "name": "contents", "type": "felt" }
                ]
            },
            "primaryType": "Mail",
            "domain": { "name": "StarkNet Mail", "version": "1", "chainId": 1 },
            "message": {
                "from": { "name": "Cow", "wallet": "0x1" },
                "to": { "name": "Bob", "wallet": "0x2" },
                "contents": "Hello, Bob!"
            }
        }))
        .unwrap()
    }

    #[test]
    fn message_prefix() {
        assert_eq!(
            MESSAGE_PREFIX,
            crate::encoding::cairo_short_string_to_felt("StarkNet Message").unwrap()
        );
    }

    #[test]
    fn dependencies_follow_the_primary_type() {
        let typed_data = mail();
        assert_eq!(typed_data.revision(), Revision::V0);
        assert_eq!(
            typed_data.encode_type("Mail").unwrap(),
            "Mail(from:Person,to:Person,contents:felt)Person(name:felt,wallet:felt)"
        );
        assert_eq!(
            typed_data.type_hash("Person").unwrap(),
            starknet_keccak(b"Person(name:felt,wallet:felt)")
        );
    }

    #[test]
    fn struct_hash_is_hash_of_encoded_values() {
        let typed_data = mail();
        let person = json!({ "name": "Cow", "wallet": "0x1" });
        let expected = stark_curve::pedersen_hash_on_elements(&[
            typed_data.type_hash("Person").unwrap(),
            FieldElement::from_u64(0x436f77),
            FieldElement::ONE,
        ])
        .unwrap();
        assert_eq!(typed_data.struct_hash("Person", &person).unwrap(), expected);
    }

    #[test]
    fn missing_and_undefined() {
        let typed_data = mail();
        assert_eq!(
            typed_data.struct_hash("Person", &json!({ "name": "Cow" })),
            Err(TypedDataError::MissingValue("wallet".to_owned()))
        );
        assert_eq!(
            typed_data.type_hash("Ghost"),
            Err(TypedDataError::UndefinedType("Ghost".to_owned()))
        );
    }

    #[test]
    fn invalid_json() {
        assert!(matches!(
            "{".parse::<TypedData>(),
            Err(TypedDataError::Json(_))
        ));
    }
}
