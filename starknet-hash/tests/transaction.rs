//! Hashes of transactions accepted on Sepolia.

use serde::Deserialize;
use starknet_hash::{
    FieldElement, Transaction, TransactionError, chain_id,
    transaction::{DeclareV0, InvokeV0, QUERY_VERSION_OFFSET},
};

#[derive(Deserialize)]
struct Fixture {
    hash: FieldElement,
    address: Option<FieldElement>,
    transaction: Transaction,
}

fn fixtures() -> Vec<Fixture> {
    serde_json::from_str(include_str!("data/sepolia_transactions.json")).unwrap()
}

fn felt(s: &str) -> FieldElement {
    s.parse().unwrap()
}

#[test]
fn sepolia_hashes() {
    let fixtures = fixtures();
    assert_eq!(fixtures.len(), 6);

    for fixture in fixtures {
        let tx = &fixture.transaction;
        assert_eq!(
            tx.hash(&chain_id::SEPOLIA).unwrap(),
            fixture.hash,
            "{} v{}",
            tx.kind(),
            tx.version()
        );
    }
}

#[test]
fn deployed_account_addresses() {
    for fixture in fixtures() {
        let address = match &fixture.transaction {
            Transaction::DeployAccountV1(tx) => tx.contract_address().unwrap(),
            Transaction::DeployAccountV3(tx) => tx.contract_address().unwrap(),
            _ => continue,
        };
        assert_eq!(Some(address), fixture.address);
    }
}

#[test]
fn kinds_and_versions() {
    let found: Vec<_> = fixtures()
        .iter()
        .map(|fixture| (fixture.transaction.kind(), fixture.transaction.version()))
        .collect();
    assert_eq!(
        found,
        [
            ("invoke", 1),
            ("invoke", 3),
            ("declare", 2),
            ("declare", 3),
            ("deploy_account", 1),
            ("deploy_account", 3),
        ]
    );
}

#[test]
fn hashes_depend_on_the_chain() {
    for fixture in fixtures() {
        let tx = &fixture.transaction;
        assert_ne!(tx.hash(&chain_id::MAINNET).unwrap(), fixture.hash);
    }
}

#[test]
fn query_versions_give_other_hashes() {
    assert_eq!(
        QUERY_VERSION_OFFSET,
        felt("0x100000000000000000000000000000000")
    );
    for fixture in fixtures() {
        let tx = &fixture.transaction;
        assert_ne!(tx.query_hash(&chain_id::SEPOLIA).unwrap(), fixture.hash);
    }
}

#[test]
fn invoke_v0() {
    let tx = Transaction::InvokeV0(InvokeV0 {
        contract_address: felt("0x1234"),
        entry_point_selector: stark_curve::get_selector_from_name("transfer"),
        calldata: vec![FieldElement::ONE, FieldElement::TWO],
        max_fee: FieldElement::ZERO,
    });

    let expected = stark_curve::pedersen_hash_on_elements(&[
        starknet_hash::encoding::INVOKE_PREFIX,
        FieldElement::ZERO,
        felt("0x1234"),
        stark_curve::get_selector_from_name("transfer"),
        stark_curve::pedersen_hash_on_elements(&[FieldElement::ONE, FieldElement::TWO]).unwrap(),
        FieldElement::ZERO,
        chain_id::SEPOLIA,
    ])
    .unwrap();
    assert_eq!(tx.hash(&chain_id::SEPOLIA).unwrap(), expected);
}

#[test]
fn declare_v0_has_no_hash() {
    let tx = Transaction::DeclareV0(DeclareV0 {
        sender_address: FieldElement::ONE,
        class_hash: FieldElement::ONE,
        max_fee: FieldElement::ZERO,
    });
    assert_eq!(
        tx.hash(&chain_id::MAINNET),
        Err(TransactionError::UnsupportedVersion {
            kind: "declare",
            version: 0,
        })
    );
}

#[test]
fn unknown_type_is_rejected() {
    let result = serde_json::from_str::<Transaction>(r#"{ "type": "DEPLOY_V0" }"#);
    assert!(result.is_err());
}
