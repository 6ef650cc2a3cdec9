//! Hexadecimal floating-point cell decoding
//!
//! Numeric cells are stored as 8-byte base-16 floating-point values: bit 7 of
//! the first byte is the sign, the remaining 7 bits an exponent biased by 64,
//! and the next 7 bytes a big-endian 56-bit fraction.

use crate::constants::{MISSING_NUMERIC_MARKER, NUMERIC_CELL_LEN};
use crate::models::Cell;

const EXPONENT_BIAS: i32 = 64;
const FRACTION_SCALE: f64 = 72_057_594_037_927_936.0; // 2^56

/// Decode one 8-byte numeric cell, returning `None` for missing values
pub fn decode_hex_float(bytes: [u8; NUMERIC_CELL_LEN]) -> Option<f64> {
    if bytes.iter().all(|&b| b == 0) {
        return Some(0.0);
    }
    if bytes[0] == MISSING_NUMERIC_MARKER {
        return None;
    }

    let negative = bytes[0] & 0x80 != 0;
    let exponent = (bytes[0] & 0x7F) as i32 - EXPONENT_BIAS;
    let fraction = bytes[1..]
        .iter()
        .fold(0u64, |acc, &b| (acc << 8) | b as u64);

    if fraction == 0 {
        return Some(if negative { -0.0 } else { 0.0 });
    }

    let magnitude = (fraction as f64 / FRACTION_SCALE) * 16f64.powi(exponent);
    let value = if negative { -magnitude } else { magnitude };
    value.is_finite().then_some(value)
}

/// Decode a numeric column's raw bytes into a cell
///
/// Only the first eight bytes carry the value; shorter slices are missing.
pub fn decode_numeric_cell(raw: &[u8]) -> Cell {
    let Some(bytes) = raw
        .get(..NUMERIC_CELL_LEN)
        .and_then(|b| <[u8; NUMERIC_CELL_LEN]>::try_from(b).ok())
    else {
        return Cell::Missing;
    };
    match decode_hex_float(bytes) {
        Some(value) => Cell::Number(value),
        None => Cell::Missing,
    }
}

/// Render a decoded value with at most `fraction_digits` fractional digits
///
/// Integral values print without a fractional part and negative zero prints
/// as `0`.
pub fn format_numeric(value: f64, fraction_digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 {
        return format!("{:.0}", value);
    }

    let text = format!("{:.*}", fraction_digits, value);
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    };
    // Rounding can collapse tiny values to "-0"
    if text == "-0" { "0".to_string() } else { text }
}
