//! Contract addresses.

use crate::encoding::CONTRACT_ADDRESS_PREFIX;
use stark_curve::{FieldElement, U256, pedersen_hash_on_elements};

/// Exclusive upper bound of contract addresses, `2^251 - 256`.
pub const ADDRESS_UPPER_BOUND: U256 =
    U256::from_be_hex("07ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff00");

/// Address of a contract deployed by `deployer` (zero for accounts deployed
/// through `deploy_account`).
pub fn contract_address(
    salt: &FieldElement,
    class_hash: &FieldElement,
    constructor_calldata: &[FieldElement],
    deployer: &FieldElement,
) -> Result<FieldElement, stark_curve::Error> {
    let hash = pedersen_hash_on_elements(&[
        CONTRACT_ADDRESS_PREFIX,
        *deployer,
        *salt,
        *class_hash,
        pedersen_hash_on_elements(constructor_calldata)?,
    ])?;

    // p < 2 * bound, so one subtraction reduces any field element.
    let mut address = hash.to_uint();
    if address >= ADDRESS_UPPER_BOUND {
        address = address.wrapping_sub(&ADDRESS_UPPER_BOUND);
    }
    Ok(FieldElement::from_uint_reduced(&address))
}

#[cfg(test)]
mod tests {
    use super::contract_address;
    use stark_curve::FieldElement;

    fn felt(s: &str) -> FieldElement {
        s.parse().unwrap()
    }

    #[test]
    fn deploy_account_address() {
        let address = contract_address(
            &felt("0x15d621f9515c6197d3117eb1a25c7a4a669317be8f49831e03fcc00d855352e"),
            &felt("0x1e60c8722677cfb7dd8dbea5be86c09265db02cdfe77113e77da7d44c017388"),
            &[felt("0x960532cfba33384bbec41aa669727a9c51e995c87e101c86706aaf244f7e4e")],
            &FieldElement::ZERO,
        )
        .unwrap();

        assert_eq!(
            address,
            felt("0x5dd5faeddd4a9e01231f3bb9b95ec93426d08977b721c222e45fd98c5f353ff")
        );
    }
}
