//! Well-known chain ids.
//!
//! A chain id is the Cairo short string of the network name. Any other
//! network can be addressed with
//! [`cairo_short_string_to_felt`](crate::encoding::cairo_short_string_to_felt).

use stark_curve::FieldElement;

/// `SN_MAIN`
pub const MAINNET: FieldElement =
    FieldElement::from_hex("00000000000000000000000000000000000000000000000000534e5f4d41494e");

/// `SN_SEPOLIA`
pub const SEPOLIA: FieldElement =
    FieldElement::from_hex("00000000000000000000000000000000000000000000534e5f5345504f4c4941");

#[cfg(test)]
mod tests {
    use super::{MAINNET, SEPOLIA};
    use crate::encoding::cairo_short_string_to_felt;

    #[test]
    fn chain_ids_are_short_strings() {
        assert_eq!(cairo_short_string_to_felt("SN_MAIN").unwrap(), MAINNET);
        assert_eq!(cairo_short_string_to_felt("SN_SEPOLIA").unwrap(), SEPOLIA);
    }
}
