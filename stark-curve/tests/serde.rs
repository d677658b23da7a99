//! `serde` support for field elements and signatures.

#![cfg(feature = "serde")]

use stark_curve::{FieldElement, Signature};

#[test]
fn field_element_as_hex_string() {
    let felt = FieldElement::from_u64(0x1234);
    assert_eq!(serde_json::to_string(&felt).unwrap(), r#""0x1234""#);
    assert_eq!(serde_json::from_str::<FieldElement>(r#""0x1234""#).unwrap(), felt);
}

#[test]
fn field_element_from_decimal_and_integers() {
    let felt = FieldElement::from_u64(4660);
    assert_eq!(serde_json::from_str::<FieldElement>(r#""4660""#).unwrap(), felt);
    assert_eq!(serde_json::from_str::<FieldElement>("4660").unwrap(), felt);
}

#[test]
fn field_element_out_of_range() {
    let modulus = r#""0x800000000000011000000000000000000000000000000000000000000000001""#;
    assert!(serde_json::from_str::<FieldElement>(modulus).is_err());
}

#[test]
fn signature_round_trip() {
    let signature = Signature::new(FieldElement::from_u64(1), FieldElement::from_u64(2)).unwrap();
    let json = serde_json::to_string(&signature).unwrap();
    assert_eq!(json.len(), 2 + 2 * Signature::BYTE_SIZE);
    assert_eq!(serde_json::from_str::<Signature>(&json).unwrap(), signature);
}

#[test]
fn zero_signature_is_rejected() {
    let json = format!(r#""{}""#, "0".repeat(2 * Signature::BYTE_SIZE));
    assert!(serde_json::from_str::<Signature>(&json).is_err());
}
