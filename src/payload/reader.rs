//! Typed primitive reads on top of [`BitCursor`].
//!
//! Rules shared by every decoder:
//!
//! - Whole-byte reads (8 to 64 bit integers, hex and UTF-8 strings) first skip
//!   to the next byte boundary. Bits left over from earlier bit reads are
//!   discarded, never reinterpreted.
//! - Bit reads do not align and return bits least significant first.
//! - Multi-byte integers are little-endian unless the method name ends in
//!   `_be`. The big-endian variants take their bytes in wire order and
//!   assemble them high byte first, so a field layout can mix both orders
//!   field by field.
//! - A read that needs more bits than remain fails with
//!   [`DecodeError::InsufficientData`] and returns no partial value.

use chrono::{DateTime, Utc};

use crate::error::DecodeError;
use crate::payload::cursor::{BitCursor, CursorPosition};
use crate::util::hex::encode_hex_upper;

/// Primitive reader for one payload.
#[derive(Debug, Clone)]
pub struct PayloadReader<'a> {
    cursor: BitCursor<'a>,
}

impl<'a> PayloadReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            cursor: BitCursor::new(bytes),
        }
    }

    pub fn remaining_bits(&self) -> usize {
        self.cursor.remaining_bits()
    }

    pub fn consumed_bits(&self) -> usize {
        self.cursor.consumed_bits()
    }

    pub fn position(&self) -> CursorPosition {
        self.cursor.position()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining_bits() == 0
    }

    /// Discard the unread bits of the current byte.
    pub fn align(&mut self) {
        self.cursor.align();
    }

    /// Skip `count` whole bytes after aligning.
    pub fn skip_bytes(&mut self, count: usize) -> Result<(), DecodeError> {
        self.cursor.take_bytes(count).map(|_| ())
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.cursor.take_bytes(N)?);
        Ok(out)
    }

    fn peek_array<const N: usize>(&self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.cursor.peek_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let [b] = self.take_array::<1>()?;
        Ok(b)
    }

    /// The byte [`read_u8`](Self::read_u8) would return, without consuming it.
    pub fn peek_u8(&self) -> Result<u8, DecodeError> {
        let [b] = self.peek_array::<1>()?;
        Ok(b)
    }

    pub fn read_i8(&mut self) -> Result<i8, DecodeError> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        Ok(u16::from_le_bytes(self.take_array()?))
    }

    pub fn read_i16(&mut self) -> Result<i16, DecodeError> {
        Ok(i16::from_le_bytes(self.take_array()?))
    }

    /// Big-endian; the bytes are taken in wire order and assembled high first.
    pub fn read_u16_be(&mut self) -> Result<u16, DecodeError> {
        let [high, low] = self.take_array::<2>()?;
        Ok(u16::from_be_bytes([high, low]))
    }

    pub fn read_i16_be(&mut self) -> Result<i16, DecodeError> {
        Ok(self.read_u16_be()? as i16)
    }

    /// Three bytes, little-endian.
    pub fn read_u24(&mut self) -> Result<u32, DecodeError> {
        let [b0, b1, b2] = self.take_array::<3>()?;
        Ok(u32::from_le_bytes([b0, b1, b2, 0]))
    }

    /// Three bytes, little-endian, sign-extended from bit 23.
    pub fn read_i24(&mut self) -> Result<i32, DecodeError> {
        let [b0, b1, b2] = self.take_array::<3>()?;
        let extension = if b2 & 0x80 != 0 { 0xFF } else { 0x00 };
        Ok(i32::from_le_bytes([b0, b1, b2, extension]))
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_le_bytes(self.take_array()?))
    }

    /// The value [`read_u32`](Self::read_u32) would return, without consuming it.
    pub fn peek_u32(&self) -> Result<u32, DecodeError> {
        Ok(u32::from_le_bytes(self.peek_array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32, DecodeError> {
        Ok(i32::from_le_bytes(self.take_array()?))
    }

    pub fn read_u32_be(&mut self) -> Result<u32, DecodeError> {
        let [b0, b1, b2, b3] = self.take_array::<4>()?;
        Ok(u32::from_be_bytes([b0, b1, b2, b3]))
    }

    pub fn read_i32_be(&mut self) -> Result<i32, DecodeError> {
        Ok(self.read_u32_be()? as i32)
    }

    pub fn read_u64(&mut self) -> Result<u64, DecodeError> {
        Ok(u64::from_le_bytes(self.take_array()?))
    }

    /// `byte_count` bytes rendered as uppercase hex.
    pub fn read_hex_string(&mut self, byte_count: usize) -> Result<String, DecodeError> {
        Ok(encode_hex_upper(self.cursor.take_bytes(byte_count)?))
    }

    /// `byte_count` bytes decoded as UTF-8; invalid sequences become U+FFFD.
    pub fn read_string(&mut self, byte_count: usize) -> Result<String, DecodeError> {
        let bytes = self.cursor.take_bytes(byte_count)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn read_bit(&mut self) -> Result<bool, DecodeError> {
        Ok(self.cursor.take_bits(1)? == 1)
    }

    /// Read a group of 2 to 7 bits, least significant bit first.
    ///
    /// Single bits go through [`read_bit`](Self::read_bit); whole bytes through
    /// the byte reads.
    pub fn read_bits(&mut self, count: u8) -> Result<u8, DecodeError> {
        if !(2..=7).contains(&count) {
            return Err(DecodeError::InvalidBitCount(count));
        }
        let value = self.cursor.take_bits(count)?;
        Ok(value & ((1u8 << count) - 1))
    }

    /// Seconds since 1970-01-01T00:00:00Z as an unsigned 32-bit little-endian value.
    pub fn read_unix_epoch(&mut self) -> Result<DateTime<Utc>, DecodeError> {
        let seconds = self.read_u32()?;
        Ok(DateTime::from_timestamp(i64::from(seconds), 0).unwrap_or_default())
    }
}
