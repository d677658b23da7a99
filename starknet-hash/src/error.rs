//! Error types.

use thiserror::Error;

/// Errors converting strings and integers to field elements.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    /// Short strings hold at most 31 bytes.
    #[error("short string '{0}' is longer than 31 bytes")]
    ShortStringTooLong(String),

    /// Short strings are ASCII only.
    #[error("short string '{0}' contains non-ASCII characters")]
    NonAsciiShortString(String),

    /// A field element does not decode to a short string.
    #[error("field element {0} is not a valid short string")]
    InvalidShortString(String),

    /// A numeric value does not fit the target type.
    #[error("value '{value}' does not fit in {target}")]
    OutOfRange {
        /// Offending value.
        value: String,
        /// Name of the target type.
        target: &'static str,
    },

    /// A value could not be parsed as a number.
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
}

/// Errors computing a transaction hash.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TransactionError {
    /// The transaction kind and version have no defined hash.
    #[error("{kind} transactions of version {version} are not supported")]
    UnsupportedVersion {
        /// Transaction kind.
        kind: &'static str,
        /// Transaction version.
        version: u8,
    },

    /// The underlying curve operation failed.
    #[error("hashing failed: {0}")]
    Hash(#[from] stark_curve::Error),
}

/// Errors building or querying a Merkle tree.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MerkleError {
    /// A tree needs at least one leaf.
    #[error("a merkle tree needs at least one leaf")]
    Empty,

    /// The leaf is not part of the tree.
    #[error("leaf {0} not found in the tree")]
    LeafNotFound(String),

    /// The underlying curve operation failed.
    #[error("hashing failed: {0}")]
    Hash(#[from] stark_curve::Error),
}

/// Errors validating or hashing SNIP-12 typed data.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TypedDataError {
    /// The document is not valid JSON of the expected shape.
    #[error("invalid typed data document: {0}")]
    Json(String),

    /// A type is referenced but never defined.
    #[error("type '{0}' is not defined")]
    UndefinedType(String),

    /// A type name is not allowed.
    #[error("invalid type name '{name}': {reason}")]
    InvalidTypeName {
        /// Offending type name.
        name: String,
        /// Which naming rule it breaks.
        reason: &'static str,
    },

    /// The domain type is missing or malformed.
    #[error("invalid domain: {0}")]
    InvalidDomain(String),

    /// The domain revision does not match the domain type.
    #[error("revision {revision} does not match domain type '{domain}'")]
    RevisionMismatch {
        /// Declared revision.
        revision: String,
        /// Domain type name found in `types`.
        domain: String,
    },

    /// An `enum` or `merkletree` parameter without `contains`.
    #[error("parameter '{0}' needs a 'contains' type")]
    MissingContains(String),

    /// `contains` on a parameter type that does not use it.
    #[error("parameter '{name}' of type '{kind}' does not use 'contains'")]
    UnexpectedContains {
        /// Parameter name.
        name: String,
        /// Parameter type.
        kind: String,
    },

    /// A variant of an enum type is not a parenthesised tuple.
    #[error("variant '{0}' of an enum type must be a parenthesised tuple of types")]
    InvalidEnumVariant(String),

    /// A type refers back to itself.
    #[error("type '{0}' is recursive")]
    RecursiveType(String),

    /// A type is defined but never referenced.
    #[error("type '{0}' is never referenced")]
    DanglingType(String),

    /// The feature is only available in another revision.
    #[error("type '{kind}' is not available in revision {revision}")]
    UnsupportedType {
        /// Type name.
        kind: String,
        /// Revision of the document.
        revision: u8,
    },

    /// A message field is missing.
    #[error("missing value for '{0}'")]
    MissingValue(String),

    /// A message value does not have the shape its type requires.
    #[error("invalid value for '{name}' of type '{kind}': {reason}")]
    InvalidValue {
        /// Field name.
        name: String,
        /// Field type.
        kind: String,
        /// What was wrong.
        reason: String,
    },

    /// An enum value names no variant of its type.
    #[error("'{variant}' is not a variant of enum '{enum_type}'")]
    UnknownVariant {
        /// Enum type name.
        enum_type: String,
        /// Requested variant.
        variant: String,
    },

    /// A string or integer could not be encoded.
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// A merkle tree field could not be built.
    #[error(transparent)]
    Merkle(#[from] MerkleError),

    /// The underlying curve operation failed.
    #[error("hashing failed: {0}")]
    Hash(#[from] stark_curve::Error),
}
