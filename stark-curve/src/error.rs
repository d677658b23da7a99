//! Error types.

use core::fmt;

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Malformed hex, decimal or byte encoding.
    InvalidEncoding,

    /// Value is not below the modulus or bound it must respect.
    OutOfRange,

    /// Coordinates do not satisfy the curve equation.
    NotOnCurve,

    /// Private key is zero or not below the curve order.
    InvalidPrivateKey,

    /// Message hash is zero or does not fit 251 bits.
    MessageHashOutOfRange,

    /// Every nonce candidate was rejected while signing.
    NonceExhausted,

    /// A Pedersen constant point shares its x-coordinate with the running point.
    ConstantPointDuplication {
        /// Position of the constant point in the table.
        index: usize,
    },

    /// The Pedersen constant table is too short for the number of inputs.
    MissingConstantPoint {
        /// Position of the first missing constant point.
        index: usize,
    },

    /// Fixed-iteration scalar multiplication failed.
    Multiplication(MulError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidEncoding => f.write_str("invalid encoding"),
            Error::OutOfRange => f.write_str("value out of range"),
            Error::NotOnCurve => f.write_str("point is not on the curve"),
            Error::InvalidPrivateKey => f.write_str("invalid private key"),
            Error::MessageHashOutOfRange => f.write_str("message hash out of range"),
            Error::NonceExhausted => f.write_str("no valid nonce found"),
            Error::ConstantPointDuplication { index } => {
                write!(f, "constant point duplication at index {index}")
            }
            Error::MissingConstantPoint { index } => {
                write!(
                    f,
                    "must initiate precomputed constant points (missing index {index})"
                )
            }
            Error::Multiplication(err) => write!(f, "scalar multiplication failed: {err}"),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Error::Multiplication(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MulError> for Error {
    fn from(err: MulError) -> Error {
        Error::Multiplication(err)
    }
}

/// Failure of the fixed 251-iteration scalar multiplication.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MulError {
    /// The multiplier is zero or does not fit 251 bits.
    TooManyBits,

    /// The accumulator and the doubled point have equal x-coordinates.
    EqualXCoordinates,

    /// Bits of the multiplier remained after 251 iterations.
    NonZeroResidual,
}

impl fmt::Display for MulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MulError::TooManyBits => "too many bits",
            MulError::EqualXCoordinates => "x-coordinates are equal",
            MulError::NonZeroResidual => "residual multiplier is not zero",
        })
    }
}

impl core::error::Error for MulError {}
