//! Macros for defining prime field element types.
//!
//! Both the base field and the scalar field of the STARK curve are 252-bit
//! prime fields represented in Montgomery form by [`crypto_bigint`]. The
//! element newtypes share their whole API, which is generated here.

/// Define a prime field element newtype over a `crypto_bigint` residue.
///
/// The generated type has the following inherent API:
///
/// - `ZERO`, `ONE`, `MODULUS`
/// - `from_hex`, `from_u64`, `from_u128`
/// - `from_uint`, `from_uint_reduced`, `to_uint`
/// - `from_bytes_be`, `from_bytes_be_reduced`, `from_be_slice`, `to_bytes_be`
/// - `is_zero`, `is_odd`, `bits`, `bit`
/// - `square`, `double`, `cube`, `invert`, `pow`
///
/// and implements the following traits:
///
/// - `Add`, `Sub`, `Mul`, `Neg` (by value and by reference) and their `*Assign` forms
/// - `Sum`, `Product`
/// - `ConditionallySelectable`, `ConstantTimeEq`, `PartialEq`, `Eq`, `Ord`, `Hash`
/// - `Default`, `Debug`, `Display`, `LowerHex`, `FromStr`, `From<u64>`, `DefaultIsZeroes`
macro_rules! impl_field_element {
    (
        name: $fe:ident,
        modulus: $modulus:ty,
        modulus_hex: $modulus_hex:expr,
        doc: $doc:expr
    ) => {
        #[doc = $doc]
        #[derive(Clone, Copy)]
        pub struct $fe(
            pub(crate) ::crypto_bigint::modular::constant_mod::Residue<$modulus, { $crate::arithmetic::LIMBS }>,
        );

        impl $fe {
            /// Zero element.
            pub const ZERO: Self = Self(::crypto_bigint::modular::constant_mod::Residue::ZERO);

            /// Multiplicative identity.
            pub const ONE: Self = Self(::crypto_bigint::modular::constant_mod::Residue::ONE);

            /// Modulus of the field as an integer.
            pub const MODULUS: ::crypto_bigint::U256 = ::crypto_bigint::U256::from_be_hex($modulus_hex);

            /// Decode from big endian hex of exactly 64 digits.
            ///
            /// This is intended for defining constants; the value is reduced
            /// by the modulus.
            ///
            /// # Panics
            ///
            /// When the hex is malformed or has the wrong length.
            pub const fn from_hex(hex: &str) -> Self {
                Self::from_uint_reduced(&::crypto_bigint::U256::from_be_hex(hex))
            }

            /// Convert a `u64` into a field element.
            pub const fn from_u64(w: u64) -> Self {
                Self::from_uint_reduced(&::crypto_bigint::U256::from_u64(w))
            }

            /// Convert a `u128` into a field element.
            pub const fn from_u128(w: u128) -> Self {
                Self::from_uint_reduced(&::crypto_bigint::U256::from_u128(w))
            }

            /// Convert an integer into a field element, reducing it by the modulus.
            pub const fn from_uint_reduced(uint: &::crypto_bigint::U256) -> Self {
                Self(::crypto_bigint::modular::constant_mod::Residue::new(uint))
            }

            /// Convert an integer into a field element, failing when it is not
            /// below the modulus.
            pub fn from_uint(uint: &::crypto_bigint::U256) -> ::subtle::CtOption<Self> {
                let in_range = ::subtle::Choice::from(u8::from(uint < &Self::MODULUS));
                ::subtle::CtOption::new(Self::from_uint_reduced(uint), in_range)
            }

            /// Canonical integer value in `[0, MODULUS)`.
            pub const fn to_uint(&self) -> ::crypto_bigint::U256 {
                self.0.retrieve()
            }

            /// Decode from canonical 32-byte big endian encoding.
            pub fn from_bytes_be(bytes: &[u8; 32]) -> ::subtle::CtOption<Self> {
                use ::crypto_bigint::Encoding as _;
                Self::from_uint(&::crypto_bigint::U256::from_be_bytes(*bytes))
            }

            /// Decode from 32-byte big endian encoding, reducing by the modulus.
            pub fn from_bytes_be_reduced(bytes: &[u8; 32]) -> Self {
                use ::crypto_bigint::Encoding as _;
                Self::from_uint_reduced(&::crypto_bigint::U256::from_be_bytes(*bytes))
            }

            /// Decode from a big endian byte slice of at most 32 bytes.
            ///
            /// Returns `None` if the slice is too long or the value is not
            /// below the modulus.
            pub fn from_be_slice(slice: &[u8]) -> Option<Self> {
                if slice.len() > 32 {
                    return None;
                }

                let mut bytes = [0u8; 32];
                bytes[32 - slice.len()..].copy_from_slice(slice);
                Self::from_bytes_be(&bytes).into()
            }

            /// Canonical 32-byte big endian encoding.
            pub fn to_bytes_be(&self) -> [u8; 32] {
                use ::crypto_bigint::Encoding as _;
                self.to_uint().to_be_bytes()
            }

            /// Determine if this element is zero.
            pub fn is_zero(&self) -> ::subtle::Choice {
                use ::subtle::ConstantTimeEq as _;
                self.ct_eq(&Self::ZERO)
            }

            /// Determine if the canonical integer value is odd.
            pub fn is_odd(&self) -> ::subtle::Choice {
                ::subtle::Choice::from(self.to_bytes_be()[31] & 1)
            }

            /// Number of significant bits of the canonical integer value.
            pub fn bits(&self) -> usize {
                let bytes = self.to_bytes_be();
                match bytes.iter().position(|&b| b != 0) {
                    Some(i) => (31 - i) * 8 + (8 - bytes[i].leading_zeros() as usize),
                    None => 0,
                }
            }

            /// Bit `index` (least significant first) of the canonical integer value.
            pub fn bit(&self, index: usize) -> bool {
                if index >= 256 {
                    return false;
                }

                (self.to_bytes_be()[31 - index / 8] >> (index % 8)) & 1 == 1
            }

            /// Returns `self * self`.
            pub const fn square(&self) -> Self {
                Self(self.0.square())
            }

            /// Returns `self + self`.
            pub const fn double(&self) -> Self {
                Self(self.0.add(&self.0))
            }

            /// Returns `self * self * self`.
            pub const fn cube(&self) -> Self {
                Self(self.0.square().mul(&self.0))
            }

            /// Multiplicative inverse, which exists for every non-zero element.
            pub fn invert(&self) -> ::subtle::CtOption<Self> {
                let (inverse, _) = self.0.invert();
                ::subtle::CtOption::new(Self(inverse), !self.is_zero())
            }

            /// Returns `self^exp`.
            pub const fn pow(&self, exp: &::crypto_bigint::U256) -> Self {
                Self(self.0.pow(exp))
            }
        }

        impl ::core::ops::Add<$fe> for $fe {
            type Output = $fe;

            fn add(self, rhs: $fe) -> $fe {
                $fe(self.0.add(&rhs.0))
            }
        }

        impl ::core::ops::Add<&$fe> for $fe {
            type Output = $fe;

            fn add(self, rhs: &$fe) -> $fe {
                $fe(self.0.add(&rhs.0))
            }
        }

        impl ::core::ops::Add<&$fe> for &$fe {
            type Output = $fe;

            fn add(self, rhs: &$fe) -> $fe {
                $fe(self.0.add(&rhs.0))
            }
        }

        impl ::core::ops::AddAssign<$fe> for $fe {
            fn add_assign(&mut self, rhs: $fe) {
                *self = *self + rhs;
            }
        }

        impl ::core::ops::AddAssign<&$fe> for $fe {
            fn add_assign(&mut self, rhs: &$fe) {
                *self = *self + rhs;
            }
        }

        impl ::core::ops::Sub<$fe> for $fe {
            type Output = $fe;

            fn sub(self, rhs: $fe) -> $fe {
                $fe(self.0.sub(&rhs.0))
            }
        }

        impl ::core::ops::Sub<&$fe> for $fe {
            type Output = $fe;

            fn sub(self, rhs: &$fe) -> $fe {
                $fe(self.0.sub(&rhs.0))
            }
        }

        impl ::core::ops::Sub<&$fe> for &$fe {
            type Output = $fe;

            fn sub(self, rhs: &$fe) -> $fe {
                $fe(self.0.sub(&rhs.0))
            }
        }

        impl ::core::ops::SubAssign<$fe> for $fe {
            fn sub_assign(&mut self, rhs: $fe) {
                *self = *self - rhs;
            }
        }

        impl ::core::ops::SubAssign<&$fe> for $fe {
            fn sub_assign(&mut self, rhs: &$fe) {
                *self = *self - rhs;
            }
        }

        impl ::core::ops::Mul<$fe> for $fe {
            type Output = $fe;

            fn mul(self, rhs: $fe) -> $fe {
                $fe(self.0.mul(&rhs.0))
            }
        }

        impl ::core::ops::Mul<&$fe> for $fe {
            type Output = $fe;

            fn mul(self, rhs: &$fe) -> $fe {
                $fe(self.0.mul(&rhs.0))
            }
        }

        impl ::core::ops::Mul<&$fe> for &$fe {
            type Output = $fe;

            fn mul(self, rhs: &$fe) -> $fe {
                $fe(self.0.mul(&rhs.0))
            }
        }

        impl ::core::ops::MulAssign<$fe> for $fe {
            fn mul_assign(&mut self, rhs: $fe) {
                *self = *self * rhs;
            }
        }

        impl ::core::ops::MulAssign<&$fe> for $fe {
            fn mul_assign(&mut self, rhs: &$fe) {
                *self = *self * rhs;
            }
        }

        impl ::core::ops::Neg for $fe {
            type Output = $fe;

            fn neg(self) -> $fe {
                $fe(self.0.neg())
            }
        }

        impl ::core::ops::Neg for &$fe {
            type Output = $fe;

            fn neg(self) -> $fe {
                $fe(self.0.neg())
            }
        }

        impl ::core::iter::Sum for $fe {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(Self::ZERO, ::core::ops::Add::add)
            }
        }

        impl<'a> ::core::iter::Sum<&'a $fe> for $fe {
            fn sum<I: Iterator<Item = &'a $fe>>(iter: I) -> Self {
                iter.fold(Self::ZERO, ::core::ops::Add::add)
            }
        }

        impl ::core::iter::Product for $fe {
            fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(Self::ONE, ::core::ops::Mul::mul)
            }
        }

        impl<'a> ::core::iter::Product<&'a $fe> for $fe {
            fn product<I: Iterator<Item = &'a $fe>>(iter: I) -> Self {
                iter.fold(Self::ONE, ::core::ops::Mul::mul)
            }
        }

        impl ::subtle::ConditionallySelectable for $fe {
            fn conditional_select(a: &Self, b: &Self, choice: ::subtle::Choice) -> Self {
                Self(::subtle::ConditionallySelectable::conditional_select(&a.0, &b.0, choice))
            }
        }

        impl ::subtle::ConstantTimeEq for $fe {
            fn ct_eq(&self, other: &Self) -> ::subtle::Choice {
                ::subtle::ConstantTimeEq::ct_eq(&self.0, &other.0)
            }
        }

        impl PartialEq for $fe {
            fn eq(&self, other: &Self) -> bool {
                use ::subtle::ConstantTimeEq as _;
                self.ct_eq(other).into()
            }
        }

        impl Eq for $fe {}

        impl PartialOrd for $fe {
            fn partial_cmp(&self, other: &Self) -> Option<::core::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $fe {
            fn cmp(&self, other: &Self) -> ::core::cmp::Ordering {
                self.to_uint().cmp(&other.to_uint())
            }
        }

        impl ::core::hash::Hash for $fe {
            fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                ::core::hash::Hash::hash(&self.to_bytes_be(), state);
            }
        }

        impl Default for $fe {
            fn default() -> Self {
                Self::ZERO
            }
        }

        impl From<u64> for $fe {
            fn from(n: u64) -> $fe {
                Self::from_u64(n)
            }
        }

        impl From<u128> for $fe {
            fn from(n: u128) -> $fe {
                Self::from_u128(n)
            }
        }

        impl From<bool> for $fe {
            fn from(b: bool) -> $fe {
                Self::from_u64(u64::from(b))
            }
        }

        impl ::zeroize::DefaultIsZeroes for $fe {}

        impl ::core::fmt::LowerHex for $fe {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                if f.alternate() {
                    f.write_str("0x")?;
                }
                $crate::arithmetic::write_minimal_hex(f, &self.to_bytes_be())
            }
        }

        impl ::core::fmt::Display for $fe {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{:#x}", self)
            }
        }

        impl ::core::fmt::Debug for $fe {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}({:#x})", stringify!($fe), self)
            }
        }

        impl ::core::str::FromStr for $fe {
            type Err = $crate::Error;

            fn from_str(s: &str) -> $crate::Result<Self> {
                let uint = $crate::arithmetic::parse_uint(s)?;
                Option::from(Self::from_uint(&uint)).ok_or($crate::Error::OutOfRange)
            }
        }
    };
}
