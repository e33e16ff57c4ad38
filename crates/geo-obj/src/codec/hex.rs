//! Hex helpers for WKB payloads.
//!
//! PostGIS and most WKB fixtures exchange binary geometry as upper-case
//! hex text.

use crate::error::{Error, Result};

const DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Formats bytes as upper-case hex.
pub fn encode_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(DIGITS[(byte >> 4) as usize] as char);
        out.push(DIGITS[(byte & 0x0F) as usize] as char);
    }
    out
}

/// Parses hex text (either case) into bytes.
pub fn decode_hex(text: &str) -> Result<Vec<u8>> {
    let digits = text.as_bytes();
    if digits.len() % 2 != 0 {
        return Err(Error::UnexpectedValue(format!(
            "hex string has odd length {}",
            digits.len()
        )));
    }

    digits
        .chunks_exact(2)
        .map(|pair| Ok((hex_digit(pair[0])? << 4) | hex_digit(pair[1])?))
        .collect()
}

fn hex_digit(c: u8) -> Result<u8> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(Error::UnexpectedValue(format!(
            "invalid hex digit {:?}",
            c as char
        ))),
    }
}
