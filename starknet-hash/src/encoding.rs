//! Cairo string and calldata encodings.

use crate::EncodingError;
use stark_curve::{FieldElement, get_selector_from_name};

/// Maximum length in bytes of a Cairo short string.
pub const SHORT_STRING_MAX_LEN: usize = 31;

/// `invoke`
pub const INVOKE_PREFIX: FieldElement =
    FieldElement::from_hex("0000000000000000000000000000000000000000000000000000696e766f6b65");

/// `declare`
pub const DECLARE_PREFIX: FieldElement =
    FieldElement::from_hex("000000000000000000000000000000000000000000000000006465636c617265");

/// `deploy_account`
pub const DEPLOY_ACCOUNT_PREFIX: FieldElement =
    FieldElement::from_hex("0000000000000000000000000000000000006465706c6f795f6163636f756e74");

/// `STARKNET_CONTRACT_ADDRESS`
pub const CONTRACT_ADDRESS_PREFIX: FieldElement =
    FieldElement::from_hex("00000000000000535441524b4e45545f434f4e54524143545f41444452455353");

/// Encode an ASCII string of at most 31 bytes as a big endian integer.
pub fn cairo_short_string_to_felt(s: &str) -> Result<FieldElement, EncodingError> {
    if !s.is_ascii() {
        return Err(EncodingError::NonAsciiShortString(s.to_owned()));
    }
    if s.len() > SHORT_STRING_MAX_LEN {
        return Err(EncodingError::ShortStringTooLong(s.to_owned()));
    }

    Ok(bytes_to_felt(s.as_bytes()))
}

/// Decode a short string, dropping the leading zero bytes.
pub fn parse_cairo_short_string(felt: &FieldElement) -> Result<String, EncodingError> {
    let bytes = felt.to_bytes_be();
    if bytes[0] != 0 {
        return Err(EncodingError::InvalidShortString(felt.to_string()));
    }

    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    let text = &bytes[start..];
    if !text.is_ascii() {
        return Err(EncodingError::InvalidShortString(felt.to_string()));
    }

    Ok(text.iter().map(|&b| char::from(b)).collect())
}

/// Big endian integer of at most 31 bytes.
fn bytes_to_felt(bytes: &[u8]) -> FieldElement {
    debug_assert!(bytes.len() <= SHORT_STRING_MAX_LEN);
    let mut buf = [0u8; 32];
    buf[32 - bytes.len()..].copy_from_slice(bytes);
    FieldElement::from_bytes_be_reduced(&buf)
}

/// Cairo `ByteArray`: a string of any length split into 31-byte words.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ByteArray {
    /// Full 31-byte words.
    pub data: Vec<FieldElement>,
    /// Remaining bytes that do not fill a word.
    pub pending_word: FieldElement,
    /// Number of bytes in `pending_word`.
    pub pending_word_len: usize,
}

impl ByteArray {
    /// Serialize as `[data.len(), data..., pending_word, pending_word_len]`.
    pub fn to_elements(&self) -> Vec<FieldElement> {
        let mut elements = Vec::with_capacity(self.data.len() + 3);
        elements.push(FieldElement::from_u64(self.data.len() as u64));
        elements.extend_from_slice(&self.data);
        elements.push(self.pending_word);
        elements.push(FieldElement::from_u64(self.pending_word_len as u64));
        elements
    }
}

impl From<&[u8]> for ByteArray {
    fn from(bytes: &[u8]) -> Self {
        let mut chunks = bytes.chunks(SHORT_STRING_MAX_LEN);
        let mut array = ByteArray::default();

        let remainder = bytes.len() % SHORT_STRING_MAX_LEN;
        let full_words = bytes.len() / SHORT_STRING_MAX_LEN;
        array.data = chunks.by_ref().take(full_words).map(bytes_to_felt).collect();

        if remainder != 0 {
            if let Some(pending) = chunks.next() {
                array.pending_word = bytes_to_felt(pending);
                array.pending_word_len = pending.len();
            }
        }

        array
    }
}

impl From<&str> for ByteArray {
    fn from(s: &str) -> Self {
        Self::from(s.as_bytes())
    }
}

/// A contract call as it appears in account calldata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Call {
    /// Called contract.
    pub to: FieldElement,
    /// Entry point selector.
    pub selector: FieldElement,
    /// Arguments.
    pub calldata: Vec<FieldElement>,
}

impl Call {
    /// Call the entry point named `entry_point` on `to`.
    pub fn new(to: FieldElement, entry_point: &str, calldata: Vec<FieldElement>) -> Self {
        Self {
            to,
            selector: get_selector_from_name(entry_point),
            calldata,
        }
    }
}

/// Calldata of a multicall for Cairo 0 accounts:
/// `[n, (to, selector, offset, len)*, total_len, data...]`.
pub fn encode_calls_legacy(calls: &[Call]) -> Vec<FieldElement> {
    let mut headers = Vec::with_capacity(1 + 4 * calls.len());
    let mut data = Vec::new();

    headers.push(FieldElement::from_u64(calls.len() as u64));
    for call in calls {
        headers.push(call.to);
        headers.push(call.selector);
        headers.push(FieldElement::from_u64(data.len() as u64));
        headers.push(FieldElement::from_u64(call.calldata.len() as u64));
        data.extend_from_slice(&call.calldata);
    }

    headers.push(FieldElement::from_u64(data.len() as u64));
    headers.extend(data);
    headers
}

/// Calldata of a multicall for Cairo 1 accounts:
/// `[n, (to, selector, len, data...)*]`.
pub fn encode_calls(calls: &[Call]) -> Vec<FieldElement> {
    let mut calldata = vec![FieldElement::from_u64(calls.len() as u64)];
    for call in calls {
        calldata.push(call.to);
        calldata.push(call.selector);
        calldata.push(FieldElement::from_u64(call.calldata.len() as u64));
        calldata.extend_from_slice(&call.calldata);
    }
    calldata
}
