//! Field reading utilities for fixed-layout records
//!
//! Helpers for pulling big-endian integers and padded ASCII text out of
//! byte slices. Out-of-range reads yield defaults rather than panicking.

/// Read a big-endian i16 at `offset`, or 0 when the slice is too short
pub fn read_i16_be(bytes: &[u8], offset: usize) -> i16 {
    match bytes.get(offset..offset + 2) {
        Some(&[hi, lo]) => i16::from_be_bytes([hi, lo]),
        _ => 0,
    }
}

/// Decode `len` bytes at `offset` as ASCII and trim spaces and nulls
pub fn read_ascii_trimmed(bytes: &[u8], offset: usize, len: usize) -> String {
    let end = (offset + len).min(bytes.len());
    if offset >= end {
        return String::new();
    }
    decode_ascii(&bytes[offset..end])
}

/// Decode raw bytes as text, trimming whitespace and null padding
///
/// Bytes outside the ASCII range are replaced rather than rejected.
pub fn decode_ascii(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .trim_matches(|c: char| c.is_whitespace() || c == '\0')
        .to_string()
}

/// True when every byte is an ASCII space or a null
pub fn is_padding(bytes: &[u8]) -> bool {
    bytes.iter().all(|&b| b == b' ' || b == 0)
}

/// Position of `needle` in `haystack` at or after `from`
pub fn find_bytes(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if needle.is_empty() || from >= haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|pos| pos + from)
}
