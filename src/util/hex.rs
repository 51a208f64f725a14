//! # Hex Encoding/Decoding Utilities
//!
//! Payloads usually reach the decoders as hex strings copied out of a network
//! server console. This module validates and converts them, and formats bytes
//! for log output.
//!
//! ## Usage
//!
//! ```rust
//! use lora_payload_rs::util::hex::{decode_hex, encode_hex_upper, format_hex_compact};
//!
//! let data = decode_hex("0100eb0232").unwrap();
//! assert_eq!(data, vec![0x01, 0x00, 0xEB, 0x02, 0x32]);
//! assert_eq!(encode_hex_upper(&data[..2]), "0100");
//! assert_eq!(format_hex_compact(&data[..2]), "01 00");
//! ```

use thiserror::Error;

/// Errors that can occur while validating a hex payload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HexError {
    #[error("Invalid hex character: {0:?}")]
    InvalidCharacter(char),

    #[error("Odd number of hex characters: {0}")]
    OddLength(usize),

    #[error("Empty hex string")]
    EmptyString,
}

/// Encode bytes to uppercase hex string
pub fn encode_hex_upper(data: &[u8]) -> String {
    hex::encode_upper(data)
}

/// Check a payload string without decoding it.
///
/// Accepts upper and lower case digits. Whitespace and separators are
/// rejected, the string must be exactly an even number of hex digits.
pub fn validate_hex(hex_str: &str) -> Result<(), HexError> {
    if hex_str.is_empty() {
        return Err(HexError::EmptyString);
    }

    if let Some(c) = hex_str.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(HexError::InvalidCharacter(c));
    }

    if hex_str.len() % 2 != 0 {
        return Err(HexError::OddLength(hex_str.len()));
    }

    Ok(())
}

/// Decode hex string to bytes
pub fn decode_hex(hex_str: &str) -> Result<Vec<u8>, HexError> {
    validate_hex(hex_str)?;

    hex::decode(hex_str).map_err(|e| match e {
        hex::FromHexError::InvalidHexCharacter { c, .. } => HexError::InvalidCharacter(c),
        hex::FromHexError::OddLength => HexError::OddLength(hex_str.len()),
        hex::FromHexError::InvalidStringLength => HexError::OddLength(hex_str.len()),
    })
}

/// Format hex data for compact display (useful for logs)
///
/// Formats data as "01 00 eb" with spaces between bytes.
pub fn format_hex_compact(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}
