//! SNIP-12 documents of both revisions, hashed for the same account.

use starknet_hash::{FieldElement, Revision, TypedData, TypedDataError};

const ACCOUNT: &str = "0xCD2a3d9F938E13CD947Ec05AbC7FE734Df8DD826";

fn felt(s: &str) -> FieldElement {
    s.parse().unwrap()
}

fn load(json: &str) -> TypedData {
    json.parse().unwrap()
}

struct Expected {
    json: &'static str,
    revision: Revision,
    encoded_type: Option<&'static str>,
    type_hash: &'static str,
    struct_hash: &'static str,
    message_hash: &'static str,
}

fn check(expected: Expected) {
    let typed_data = load(expected.json);
    let primary_type = typed_data.primary_type().to_owned();

    assert_eq!(typed_data.revision(), expected.revision);
    if let Some(encoded_type) = expected.encoded_type {
        assert_eq!(typed_data.encode_type(&primary_type).unwrap(), encoded_type);
    }
    assert_eq!(
        typed_data.type_hash(&primary_type).unwrap(),
        felt(expected.type_hash)
    );
    assert_eq!(
        typed_data
            .struct_hash(&primary_type, typed_data.message())
            .unwrap(),
        felt(expected.struct_hash)
    );
    assert_eq!(
        typed_data.message_hash(&felt(ACCOUNT)).unwrap(),
        felt(expected.message_hash)
    );
}

#[test]
fn mail() {
    check(Expected {
        json: include_str!("data/baseExample.json"),
        revision: Revision::V0,
        encoded_type: Some("Mail(from:Person,to:Person,contents:felt)Person(name:felt,wallet:felt)"),
        type_hash: "0x13d89452df9512bf750f539ba3001b945576243288137ddb6c788457d4b2f79",
        struct_hash: "0x4758f1ed5e7503120c228cbcaba626f61514559e9ef5ed653b0b885e0f38aec",
        message_hash: "0x6fcff244f63e38b9d88b9e3378d44757710d1b244282b435cb472053c8d78d0",
    });
}

#[test]
fn mail_domain() {
    let typed_data = load(include_str!("data/baseExample.json"));
    assert_eq!(
        typed_data.domain_hash().unwrap(),
        felt("0x54833b121883a3e3aebff48ec08a962f5742e5f7b973469c1f8f4f55d470b07")
    );
}

#[test]
fn base_types() {
    check(Expected {
        json: include_str!("data/example_baseTypes.json"),
        revision: Revision::V1,
        encoded_type: None,
        type_hash: "0x1f94cd0be8b4097a41486170fdf09a4cd23aefbc74bb2344718562994c2c111",
        struct_hash: "0x6dec1cc3b3d522dc6c0e646157e0330963026d8d3d63663dd0fec1d0a7cca43",
        message_hash: "0x3e5b70c11addb9bfaa75936fb802f30744ec7c5caf8229396a722f2ed7f938d",
    });
}

#[test]
fn revision_1_domain() {
    let typed_data = load(include_str!("data/example_baseTypes.json"));
    assert_eq!(
        typed_data.domain_hash().unwrap(),
        felt("0x555f72e550b308e50c1a4f8611483a174026c982a9893a05c185eeb85399657")
    );
}

#[test]
fn enums() {
    check(Expected {
        json: include_str!("data/example_enum.json"),
        revision: Revision::V1,
        encoded_type: Some(concat!(
            r#""Example"("someEnum1":"EnumA","someEnum2":"EnumB")"#,
            r#""EnumA"("Variant 1":(),"Variant 2":("u128","u128*"),"Variant 3":("u128"))"#,
            r#""EnumB"("Variant 1":(),"Variant 2":("u128"))"#,
        )),
        type_hash: "0x8eb4aeac64b707f3e843284c4258df6df1f0f7fd38dcffdd8a153a495cd351",
        struct_hash: "0x1e1bb5d477e92cbf562b3b766c5c1e5f8590f2df868d4c8249c0db8416f8c37",
        message_hash: "0x6e61abaf480b1370bbf231f54e298c5f4872f40a6d2dd409ff30accee5bbd1e",
    });
}

#[test]
fn preset_types() {
    check(Expected {
        json: include_str!("data/example_presetTypes.json"),
        revision: Revision::V1,
        encoded_type: Some(concat!(
            r#""Example"("n0":"TokenAmount","n1":"NftId")"#,
            r#""NftId"("collection_address":"ContractAddress","token_id":"u256")"#,
            r#""TokenAmount"("token_address":"ContractAddress","amount":"u256")"#,
            r#""u256"("low":"u128","high":"u128")"#,
        )),
        type_hash: "0x1a25a8bb84b761090b1fadaebe762c4b679b0d8883d2bedda695ea340839a55",
        struct_hash: "0xd4632a4d8270d51be62df46ae0b3c2b33f365fedf3210b3f46e07f0376b2d2",
        message_hash: "0x6a569ea36152b96c2251a7337ccc624585cd6e5fc1d6b16342399cee33ac891",
    });
}

#[test]
fn merkle_tree() {
    check(Expected {
        json: include_str!("data/session_MerkleTree.json"),
        revision: Revision::V0,
        encoded_type: Some("Session(key:felt,expires:felt,root:merkletree)"),
        type_hash: "0x1aa0e1c56b45cf06a54534fa1707c54e520b842feb21d03b7deddb6f1e340c",
        struct_hash: "0x73602062421caf6ad2e942253debfad4584bff58930981364dcd378021defe8",
        message_hash: "0x5d28fa1b31f92e63022f7d85271606e52bed89c046c925f16b09e644dc99794",
    });
}

#[test]
fn empty_merkle_tree() {
    let json = include_str!("data/session_MerkleTree.json");
    let mut document: serde_json::Value = serde_json::from_str(json).unwrap();
    document["message"]["root"] = serde_json::json!([]);

    let typed_data: TypedData = serde_json::from_value(document).unwrap();
    assert!(matches!(
        typed_data.message_hash(&felt(ACCOUNT)),
        Err(TypedDataError::Merkle(_))
    ));
}

#[test]
fn unknown_enum_variant() {
    let json = include_str!("data/example_enum.json");
    let mut document: serde_json::Value = serde_json::from_str(json).unwrap();
    document["message"]["someEnum2"] = serde_json::json!({ "Variant 9": [] });

    let typed_data: TypedData = serde_json::from_value(document).unwrap();
    assert_eq!(
        typed_data.message_hash(&felt(ACCOUNT)),
        Err(TypedDataError::UnknownVariant {
            enum_type: "EnumB".to_owned(),
            variant: "Variant 9".to_owned(),
        })
    );
}

#[test]
fn domain_revision_must_match_domain_type() {
    let json = include_str!("data/example_enum.json");
    let mut document: serde_json::Value = serde_json::from_str(json).unwrap();
    document["domain"]
        .as_object_mut()
        .unwrap()
        .remove("revision");

    let err = serde_json::from_value::<TypedData>(document).unwrap_err();
    assert!(err.to_string().contains("does not match"), "{err}");
}
