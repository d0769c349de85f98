//! # RLP Codec
//!
//! Recursive Length Prefix encoding used for trie keys, trie nodes and
//! transaction payloads.
//!
//! ## Integer Encoding
//!
//! Integers are encoded as their minimal big-endian byte string. Zero has no
//! significant bytes, so it encodes as the empty string `0x80`. Values
//! `1..=127` are a single byte equal to the value; everything else carries a
//! `0x80 + len` prefix.

use super::{Hash, RlpError};
use sha3::{Digest, Keccak256};

/// Offset for short strings (`0x80 + len`).
pub const EMPTY_STRING_CODE: u8 = 0x80;

/// Offset for short lists (`0xc0 + len`).
pub const EMPTY_LIST_CODE: u8 = 0xc0;

const LONG_STRING_OFFSET: u8 = 0xb7;
const LONG_LIST_OFFSET: u8 = 0xf7;
const SHORT_PAYLOAD_LIMIT: usize = 56;

// =============================================================================
// ENCODING
// =============================================================================

/// RLP-encode a byte slice.
pub fn encode_bytes(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + 9);
    append_bytes(&mut out, data);
    out
}

/// Append the RLP encoding of a byte slice to `out`.
pub fn append_bytes(out: &mut Vec<u8>, data: &[u8]) {
    if data.len() == 1 && data[0] < EMPTY_STRING_CODE {
        out.push(data[0]);
    } else {
        append_header(out, EMPTY_STRING_CODE, LONG_STRING_OFFSET, data.len());
        out.extend_from_slice(data);
    }
}

/// Append the minimal RLP encoding of `value` to `out`.
///
/// `append_uint64(out, 0)` writes `0x80`, the same byte as an empty string.
pub fn append_uint64(out: &mut Vec<u8>, value: u64) {
    append_uint_be(out, &value.to_be_bytes());
}

/// RLP-encode an unsigned integer.
pub fn encode_uint64(value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(9);
    append_uint64(&mut out, value);
    out
}

/// Append an unsigned integer given as big-endian bytes of any width.
///
/// Leading zero bytes are stripped so the encoding is canonical.
pub fn append_uint_be(out: &mut Vec<u8>, be_bytes: &[u8]) {
    let start = be_bytes
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(be_bytes.len());
    append_bytes(out, &be_bytes[start..]);
}

/// Append a list header for a payload of `payload_len` bytes.
pub fn append_list_header(out: &mut Vec<u8>, payload_len: usize) {
    append_header(out, EMPTY_LIST_CODE, LONG_LIST_OFFSET, payload_len);
}

/// Wrap already-encoded items into an RLP list.
pub fn encode_list(items: &[Vec<u8>]) -> Vec<u8> {
    let payload_len: usize = items.iter().map(Vec::len).sum();
    let mut out = Vec::with_capacity(payload_len + 9);
    append_list_header(&mut out, payload_len);
    for item in items {
        out.extend_from_slice(item);
    }
    out
}

fn append_header(out: &mut Vec<u8>, short_offset: u8, long_offset: u8, len: usize) {
    if len < SHORT_PAYLOAD_LIMIT {
        out.push(short_offset + len as u8);
    } else {
        let len_bytes = encode_length(len);
        out.push(long_offset + len_bytes.len() as u8);
        out.extend_from_slice(&len_bytes);
    }
}

/// Encode a length as minimal big-endian bytes.
fn encode_length(len: usize) -> Vec<u8> {
    let bytes = len.to_be_bytes();
    let start = bytes
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(bytes.len() - 1);
    bytes[start..].to_vec()
}

/// Compute Keccak256 hash.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

// =============================================================================
// DECODING
// =============================================================================

/// Decoded item header: kind plus the byte ranges of header and payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// True for lists, false for byte strings.
    pub is_list: bool,
    /// Bytes taken by the prefix.
    pub header_len: usize,
    /// Bytes taken by the payload.
    pub payload_len: usize,
}

impl Header {
    /// Total encoded length of the item.
    pub fn total_len(&self) -> usize {
        self.header_len + self.payload_len
    }
}

/// Decode the header of the first item in `data`.
///
/// Rejects non-canonical encodings and items that run past the input.
pub fn decode_header(data: &[u8]) -> Result<Header, RlpError> {
    let first = *data.first().ok_or(RlpError::Truncated)?;

    let header = match first {
        0x00..=0x7f => Header {
            is_list: false,
            header_len: 0,
            payload_len: 1,
        },
        0x80..=0xb7 => {
            let payload_len = (first - EMPTY_STRING_CODE) as usize;
            if payload_len == 1 && data.get(1).is_some_and(|&b| b < EMPTY_STRING_CODE) {
                return Err(RlpError::NonCanonical);
            }
            Header {
                is_list: false,
                header_len: 1,
                payload_len,
            }
        }
        0xb8..=0xbf => long_header(data, first - LONG_STRING_OFFSET, false)?,
        0xc0..=0xf7 => Header {
            is_list: true,
            header_len: 1,
            payload_len: (first - EMPTY_LIST_CODE) as usize,
        },
        0xf8..=0xff => long_header(data, first - LONG_LIST_OFFSET, true)?,
    };

    if data.len() < header.total_len() {
        return Err(RlpError::Truncated);
    }
    Ok(header)
}

fn long_header(data: &[u8], len_of_len: u8, is_list: bool) -> Result<Header, RlpError> {
    let len_of_len = len_of_len as usize;
    let len_bytes = data.get(1..1 + len_of_len).ok_or(RlpError::Truncated)?;
    if len_bytes[0] == 0 || len_of_len > std::mem::size_of::<usize>() {
        return Err(RlpError::NonCanonical);
    }
    let payload_len = len_bytes
        .iter()
        .fold(0usize, |acc, &b| (acc << 8) | b as usize);
    if payload_len < SHORT_PAYLOAD_LIMIT {
        return Err(RlpError::NonCanonical);
    }
    // Payload must fit in what follows the header.
    if payload_len > data.len() - 1 - len_of_len {
        return Err(RlpError::Truncated);
    }
    Ok(Header {
        is_list,
        header_len: 1 + len_of_len,
        payload_len,
    })
}

/// Decode a byte string that spans exactly `data`.
pub fn decode_bytes(data: &[u8]) -> Result<&[u8], RlpError> {
    let header = decode_header(data)?;
    if header.is_list {
        return Err(RlpError::UnexpectedList);
    }
    if header.total_len() != data.len() {
        return Err(RlpError::TrailingBytes);
    }
    Ok(&data[header.header_len..])
}

/// Decode a list that spans exactly `data` into the raw encodings of its items.
pub fn decode_list(data: &[u8]) -> Result<Vec<&[u8]>, RlpError> {
    let header = decode_header(data)?;
    if !header.is_list {
        return Err(RlpError::UnexpectedString);
    }
    if header.total_len() != data.len() {
        return Err(RlpError::TrailingBytes);
    }

    let mut items = Vec::new();
    let mut rest = &data[header.header_len..];
    while !rest.is_empty() {
        let item = decode_header(rest)?;
        let (raw, tail) = rest.split_at(item.total_len());
        items.push(raw);
        rest = tail;
    }
    Ok(items)
}

/// Returns true if `item` is the raw encoding of a list.
pub fn is_list(item: &[u8]) -> bool {
    item.first().is_some_and(|&b| b >= EMPTY_LIST_CODE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uint_encoding() {
        assert_eq!(encode_uint64(0), vec![0x80]);
        assert_eq!(encode_uint64(1), vec![0x01]);
        assert_eq!(encode_uint64(0x7f), vec![0x7f]);
        assert_eq!(encode_uint64(0x80), vec![0x81, 0x80]);
        assert_eq!(encode_uint64(0x0400), vec![0x82, 0x04, 0x00]);
        assert_eq!(
            encode_uint64(u64::MAX),
            vec![0x88, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
        );
    }

    #[test]
    fn test_zero_matches_empty_string() {
        assert_eq!(encode_uint64(0), encode_bytes(&[]));
    }

    #[test]
    fn test_uint_be_strips_leading_zeros() {
        let mut out = Vec::new();
        append_uint_be(&mut out, &[0, 0, 0, 0x05]);
        assert_eq!(out, vec![0x05]);

        let mut out = Vec::new();
        append_uint_be(&mut out, &[0; 32]);
        assert_eq!(out, vec![0x80]);
    }

    #[test]
    fn test_bytes_encoding() {
        assert_eq!(encode_bytes(b"dog"), vec![0x83, b'd', b'o', b'g']);
        assert_eq!(encode_bytes(&[0x80]), vec![0x81, 0x80]);

        let long = vec![0xAA; 60];
        let encoded = encode_bytes(&long);
        assert_eq!(&encoded[..2], &[0xb8, 60]);
        assert_eq!(encoded.len(), 62);
    }

    #[test]
    fn test_list_encoding() {
        let items = vec![encode_bytes(b"cat"), encode_bytes(b"dog")];
        assert_eq!(
            encode_list(&items),
            vec![0xc8, 0x83, b'c', b'a', b't', 0x83, b'd', b'o', b'g']
        );
        assert_eq!(encode_list(&[]), vec![0xc0]);
    }

    #[test]
    fn test_decode_list_items() {
        let items = vec![encode_bytes(b"cat"), encode_uint64(0), encode_list(&[])];
        let encoded = encode_list(&items);
        let decoded = decode_list(&encoded).unwrap();

        assert_eq!(decoded.len(), 3);
        assert_eq!(decode_bytes(decoded[0]).unwrap(), b"cat");
        assert_eq!(decode_bytes(decoded[1]).unwrap(), b"");
        assert!(is_list(decoded[2]));
    }

    #[test]
    fn test_decode_long_list() {
        let items: Vec<Vec<u8>> = (0..20).map(|_| encode_bytes(&[0x11; 4])).collect();
        let encoded = encode_list(&items);
        assert_eq!(encoded[0], 0xf8);
        assert_eq!(decode_list(&encoded).unwrap().len(), 20);
    }

    #[test]
    fn test_decode_rejects_non_canonical() {
        // Single byte below 0x80 must not carry a prefix
        assert_eq!(decode_bytes(&[0x81, 0x05]), Err(RlpError::NonCanonical));
        // Long form for a short payload
        let mut data = vec![0xb8, 0x01, 0xAA];
        assert_eq!(decode_bytes(&data), Err(RlpError::NonCanonical));
        data = vec![0xb9, 0x00, 0x40];
        assert_eq!(decode_header(&data), Err(RlpError::NonCanonical));
    }

    #[test]
    fn test_decode_rejects_truncated_and_trailing() {
        assert_eq!(decode_bytes(&[0x83, b'd', b'o']), Err(RlpError::Truncated));
        assert_eq!(decode_bytes(&[]), Err(RlpError::Truncated));
        assert_eq!(decode_bytes(&[0x05, 0x06]), Err(RlpError::TrailingBytes));
        assert_eq!(decode_list(&[0x05]), Err(RlpError::UnexpectedString));
        assert_eq!(decode_bytes(&[0xc0]), Err(RlpError::UnexpectedList));
    }

    #[test]
    fn test_decode_rejects_oversized_long_length() {
        let mut string = vec![0xbf];
        string.extend_from_slice(&[0xff; 8]);
        assert_eq!(decode_header(&string), Err(RlpError::Truncated));

        let mut list = vec![0xff];
        list.extend_from_slice(&[0xff; 8]);
        assert_eq!(decode_header(&list), Err(RlpError::Truncated));
        assert_eq!(decode_list(&list), Err(RlpError::Truncated));

        // Length one past the available payload
        assert_eq!(decode_header(&[0xb8, 0x39, 0x00]), Err(RlpError::Truncated));
    }

    #[test]
    fn test_keccak_of_empty_string() {
        assert_eq!(keccak256(&[0x80]), super::super::EMPTY_TRIE_ROOT);
    }
}
