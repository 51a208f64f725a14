//! # Decode Error Handling
//!
//! This module defines the `DecodeError` enum, the fatal conditions that abort a
//! whole decode. Everything else a decoder runs into is accumulated as a
//! [`DecodeIssue`](crate::payload::issue::DecodeIssue) next to the partial result.

use crate::util::hex::HexError;
use thiserror::Error;

/// Represents the conditions that abort a decode invocation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The hex input was rejected before a cursor was constructed.
    #[error("Payload is not a valid hex string: {0}")]
    InvalidHex(#[from] HexError),

    /// A read asked for more bits than the buffer still holds.
    #[error("Not enough bits left to fulfill request: requested {requested}, remaining {remaining}")]
    InsufficientData { requested: usize, remaining: usize },

    /// `read_bits` was called with a width outside 2..=7.
    #[error("Cannot extract {0} bits at a time: use read_bit() for one bit, at most 7 bits per call")]
    InvalidBitCount(u8),
}

impl DecodeError {
    /// True when the payload itself was too short for the requested layout.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, DecodeError::InsufficientData { .. })
    }
}
