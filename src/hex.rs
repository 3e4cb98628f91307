//! Hexadecimal string arithmetic.
//!
//! Addresses and opcodes travel through the assembler as uppercase hex
//! strings, the same way they appear in the listing and object records.

use bitvec::prelude::*;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HexError {
    #[error("`{0}` is not a valid hexadecimal string")]
    Malformed(String),
    #[error("{lhs} - {rhs} yields a negative address")]
    Negative { lhs: String, rhs: String },
}

/// Parse a bare hex string (no sign, no `0x`, no whitespace) into a `u32`.
pub fn parse_hex(s: &str) -> Result<u32, HexError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(HexError::Malformed(s.to_string()));
    }
    u32::from_str_radix(s, 16).map_err(|_| HexError::Malformed(s.to_string()))
}

/// `a + b`, uppercase, no leading zeros.
pub fn add_hex(a: &str, b: &str) -> Result<String, HexError> {
    let sum = (parse_hex(a)? as u64) + (parse_hex(b)? as u64);
    Ok(format!("{sum:X}"))
}

/// `a - b`, uppercase, no leading zeros. Negative results are rejected since
/// every consumer treats the result as an address or a length.
pub fn sub_hex(a: &str, b: &str) -> Result<String, HexError> {
    let (x, y) = (parse_hex(a)?, parse_hex(b)?);
    match x.checked_sub(y) {
        Some(diff) => Ok(format!("{diff:X}")),
        None => Err(HexError::Negative {
            lhs: a.to_string(),
            rhs: b.to_string(),
        }),
    }
}

/// Left-pad with `'0'` to `len` digits. Longer input is returned unchanged.
pub fn format_hex_to_length(hex: &str, len: usize) -> Result<String, HexError> {
    parse_hex(hex)?;
    Ok(format!("{hex:0>len$}"))
}

/// Right-pad with `'0'` to `len` digits; never truncates.
pub fn pad_right(hex: &str, len: usize) -> String {
    format!("{hex:0<len$}")
}

/// Expand every digit into its 4-bit big-endian form, in digit order.
pub fn bits_of(hex: &str) -> Result<BitVec<u8, Msb0>, HexError> {
    let mut bits = BitVec::<u8, Msb0>::with_capacity(hex.len() * 4);
    for c in hex.chars() {
        let nibble = c
            .to_digit(16)
            .ok_or_else(|| HexError::Malformed(hex.to_string()))? as u8;
        bits.extend_from_bitslice(&nibble.view_bits::<Msb0>()[4..]);
    }
    if bits.is_empty() {
        return Err(HexError::Malformed(hex.to_string()));
    }
    Ok(bits)
}

/// Render a bit sequence as a `'0'`/`'1'` string.
pub fn bit_string(bits: &BitSlice<u8, Msb0>) -> String {
    bits.iter().map(|b| if *b { '1' } else { '0' }).collect()
}

/// Read a bit sequence back as an integer and render it as uppercase hex.
pub fn hex_of_bits(bits: &BitSlice<u8, Msb0>) -> String {
    let value = bits.iter().fold(0u64, |acc, b| (acc << 1) | (*b as u64));
    format!("{value:X}")
}
