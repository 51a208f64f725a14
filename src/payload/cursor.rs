//! Bit-level read cursor over an immutable payload buffer.
//!
//! The cursor is the only mutable state of a decode. It tracks a
//! `(byte_index, bit_offset)` position with `bit_offset < 8`, hands out whole
//! bytes (after discarding the rest of a partially read byte) and single bits
//! in least-significant-bit-first order.

use crate::error::DecodeError;

/// Position of a [`BitCursor`] inside its buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPosition {
    pub byte_index: usize,
    pub bit_offset: u8,
}

impl CursorPosition {
    /// Number of bits consumed up to this position.
    pub fn bits(&self) -> usize {
        self.byte_index * 8 + self.bit_offset as usize
    }
}

/// Forward-only cursor over a byte buffer.
///
/// One cursor belongs to exactly one decode invocation. It never rewinds;
/// the `peek_*` methods compute their result without moving.
#[derive(Debug, Clone)]
pub struct BitCursor<'a> {
    bytes: &'a [u8],
    byte_pos: usize,
    bit_offset: u8,
}

impl<'a> BitCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            byte_pos: 0,
            bit_offset: 0,
        }
    }

    pub fn total_bits(&self) -> usize {
        self.bytes.len() * 8
    }

    pub fn position(&self) -> CursorPosition {
        CursorPosition {
            byte_index: self.byte_pos,
            bit_offset: self.bit_offset,
        }
    }

    pub fn consumed_bits(&self) -> usize {
        self.position().bits()
    }

    /// Bits not yet consumed, including the unread tail of a partial byte.
    pub fn remaining_bits(&self) -> usize {
        self.total_bits() - self.consumed_bits()
    }

    pub fn is_aligned(&self) -> bool {
        self.bit_offset == 0
    }

    /// Discard the unread bits of the current byte, if any.
    pub fn align(&mut self) {
        self.byte_pos = self.aligned_byte_pos();
        self.bit_offset = 0;
    }

    /// Consume `count` whole bytes, aligning first.
    pub fn take_bytes(&mut self, count: usize) -> Result<&'a [u8], DecodeError> {
        let start = self.check_aligned(count)?;
        self.byte_pos = start + count;
        self.bit_offset = 0;
        Ok(&self.bytes[start..start + count])
    }

    /// Same as [`take_bytes`](Self::take_bytes) but leaves the position untouched.
    pub fn peek_bytes(&self, count: usize) -> Result<&'a [u8], DecodeError> {
        let start = self.check_aligned(count)?;
        Ok(&self.bytes[start..start + count])
    }

    /// Consume up to 8 bits without aligning, least significant bit first.
    ///
    /// A group that runs past the end of the current byte continues with bit 0
    /// of the next one.
    pub fn take_bits(&mut self, count: u8) -> Result<u8, DecodeError> {
        debug_assert!(count <= 8);
        let requested = count as usize;
        let remaining = self.remaining_bits();
        if requested > remaining {
            return Err(DecodeError::InsufficientData {
                requested,
                remaining,
            });
        }

        let mut value = 0u8;
        for shift in 0..count {
            let bit = (self.bytes[self.byte_pos] >> self.bit_offset) & 1;
            value |= bit << shift;
            self.advance_bit();
        }
        Ok(value)
    }

    fn advance_bit(&mut self) {
        self.bit_offset += 1;
        if self.bit_offset == 8 {
            self.bit_offset = 0;
            self.byte_pos += 1;
        }
    }

    fn aligned_byte_pos(&self) -> usize {
        if self.bit_offset == 0 {
            self.byte_pos
        } else {
            self.byte_pos + 1
        }
    }

    /// Returns the aligned start index if `count` bytes are available there.
    fn check_aligned(&self, count: usize) -> Result<usize, DecodeError> {
        let start = self.aligned_byte_pos();
        let remaining = self.total_bits().saturating_sub(start * 8);
        let requested = count * 8;
        if requested > remaining {
            return Err(DecodeError::InsufficientData {
                requested,
                remaining,
            });
        }
        Ok(start)
    }
}
