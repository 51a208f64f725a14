//! Tests for the bit cursor rules of `PayloadReader`.

use lora_payload_rs::payload::{CursorPosition, PayloadReader};
use lora_payload_rs::{decode_payload, DecodeError, DecodeOptions, DeviceModel};

/// Bits of a single byte come out least significant first.
#[test]
fn test_read_bit_lsb_first() {
    let data = [0b1011_0010];
    let mut reader = PayloadReader::new(&data);
    let bits: Vec<u8> = (0..8).map(|_| reader.read_bit().unwrap() as u8).collect();
    assert_eq!(bits, vec![0, 1, 0, 0, 1, 1, 0, 1]);
    assert_eq!(reader.remaining_bits(), 0);
}

/// Peeking twice returns the same byte and leaves the position alone.
#[test]
fn test_peek_u8_does_not_advance() {
    let data = [0x2A, 0x07];
    let mut reader = PayloadReader::new(&data);
    let before = reader.position();
    assert_eq!(reader.peek_u8().unwrap(), 0x2A);
    assert_eq!(reader.peek_u8().unwrap(), 0x2A);
    assert_eq!(reader.position(), before);
    assert_eq!(reader.read_u8().unwrap(), 0x2A);
    assert_eq!(
        reader.position(),
        CursorPosition {
            byte_index: 1,
            bit_offset: 0
        }
    );
}

#[test]
fn test_peek_u32_does_not_advance() {
    let data = [0x78, 0x56, 0x34, 0x12];
    let mut reader = PayloadReader::new(&data);
    assert_eq!(reader.peek_u32().unwrap(), 0x1234_5678);
    assert_eq!(reader.peek_u32().unwrap(), 0x1234_5678);
    assert_eq!(reader.remaining_bits(), 32);
    assert_eq!(reader.read_u32().unwrap(), 0x1234_5678);
    assert!(reader.is_empty());
}

/// A byte read after a partial byte skips the unread bits.
#[test]
fn test_byte_read_realigns() {
    let data = [0b1000_0000, 0b1111_1111];
    let mut reader = PayloadReader::new(&data);
    assert!(!reader.read_bit().unwrap());
    assert_eq!(reader.read_u8().unwrap(), 0xFF);
    assert!(reader.is_empty());
}

#[test]
fn test_odd_bit_counts_realign() {
    let data = [0xFF, 0x5A];
    for consumed in [1, 3, 5, 7] {
        let mut reader = PayloadReader::new(&data);
        for _ in 0..consumed {
            reader.read_bit().unwrap();
        }
        assert_eq!(reader.read_u8().unwrap(), 0x5A, "after {consumed} bits");
    }
}

#[test]
fn test_endianness() {
    let data = [0x01, 0x02];
    assert_eq!(PayloadReader::new(&data).read_u16_be().unwrap(), 0x0102);
    assert_eq!(PayloadReader::new(&data).read_u16().unwrap(), 0x0201);

    let data = [0x01, 0x02, 0x03, 0x04];
    assert_eq!(PayloadReader::new(&data).read_u32_be().unwrap(), 0x0102_0304);
    assert_eq!(PayloadReader::new(&data).read_u32().unwrap(), 0x0403_0201);
    assert_eq!(PayloadReader::new(&[0xFF, 0xFE]).read_i16_be().unwrap(), -2);
}

#[test]
fn test_wide_little_endian_values() {
    assert_eq!(PayloadReader::new(&[0xFE, 0xFF, 0xFF, 0xFF]).read_i32().unwrap(), -2);
    assert_eq!(PayloadReader::new(&[0x10, 0x27, 0x00, 0x00]).read_i32().unwrap(), 10_000);

    let data = [0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01];
    let mut reader = PayloadReader::new(&data);
    assert_eq!(reader.read_u64().unwrap(), 0x0102_0304_0506_0708);
    assert!(reader.is_empty());
    assert!(PayloadReader::new(&data[..7]).read_u64().unwrap_err().is_insufficient_data());
}

#[test]
fn test_exact_remaining_succeeds() {
    let data = [0xAA, 0xBB, 0xCC];
    let mut reader = PayloadReader::new(&data);
    reader.read_u8().unwrap();
    assert_eq!(reader.remaining_bits(), 16);
    assert_eq!(reader.read_u16().unwrap(), 0xCCBB);
}

#[test]
fn test_one_bit_too_many_fails() {
    let data = [0xAA, 0xBB, 0xCC];
    let mut reader = PayloadReader::new(&data);
    reader.read_u16().unwrap();
    let err = reader.read_u16().unwrap_err();
    assert_eq!(
        err,
        DecodeError::InsufficientData {
            requested: 16,
            remaining: 8
        }
    );
    // A failed read leaves the cursor where it was.
    assert_eq!(reader.read_u8().unwrap(), 0xCC);
}

#[test]
fn test_bit_reads_at_the_boundary() {
    let data = [0x00];
    let mut reader = PayloadReader::new(&data);
    reader.read_bits(7).unwrap();
    assert_eq!(reader.remaining_bits(), 1);
    reader.read_bit().unwrap();
    assert!(reader.read_bit().unwrap_err().is_insufficient_data());
}

#[test]
fn test_read_bits_range() {
    let data = [0xFF];
    assert_eq!(PayloadReader::new(&data).read_bits(7).unwrap(), 127);
    assert_eq!(PayloadReader::new(&data).read_bits(2).unwrap(), 3);
    assert_eq!(
        PayloadReader::new(&data).read_bits(1).unwrap_err(),
        DecodeError::InvalidBitCount(1)
    );
    assert_eq!(
        PayloadReader::new(&data).read_bits(8).unwrap_err(),
        DecodeError::InvalidBitCount(8)
    );
}

#[test]
fn test_read_bits_continue_into_next_byte() {
    // both nibbles of 0xF0, then the low 3 bits of 0x0F
    let data = [0xF0, 0x0F];
    let mut reader = PayloadReader::new(&data);
    assert_eq!(reader.read_bits(4).unwrap(), 0x0);
    assert_eq!(reader.read_bits(4).unwrap(), 0xF);
    assert_eq!(reader.read_bits(3).unwrap(), 0b111);
}

#[test]
fn test_strings_and_epoch() {
    let data = [0xDE, 0xAD, b'o', b'k', 0x00, 0x5E, 0x0B, 0x5F];
    let mut reader = PayloadReader::new(&data);
    assert_eq!(reader.read_hex_string(2).unwrap(), "DEAD");
    assert_eq!(reader.read_string(2).unwrap(), "ok");
    // 0x5F0B5E00 = 1594580480
    let time = reader.read_unix_epoch().unwrap();
    assert_eq!(time.timestamp(), 1_594_580_480);
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Bit,
        Bits(u8),
        U8,
        PeekU8,
        U16,
        U24,
        U32Be,
        U64,
        Skip(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Bit),
            (2u8..=7).prop_map(Op::Bits),
            Just(Op::U8),
            Just(Op::PeekU8),
            Just(Op::U16),
            Just(Op::U24),
            Just(Op::U32Be),
            Just(Op::U64),
            (0usize..4).prop_map(Op::Skip),
        ]
    }

    fn apply(reader: &mut PayloadReader<'_>, op: &Op) -> Result<(), DecodeError> {
        match op {
            Op::Bit => reader.read_bit().map(drop),
            Op::Bits(n) => reader.read_bits(*n).map(drop),
            Op::U8 => reader.read_u8().map(drop),
            Op::PeekU8 => reader.peek_u8().map(drop),
            Op::U16 => reader.read_u16().map(drop),
            Op::U24 => reader.read_u24().map(drop),
            Op::U32Be => reader.read_u32_be().map(drop),
            Op::U64 => reader.read_u64().map(drop),
            Op::Skip(n) => reader.skip_bytes(*n),
        }
    }

    proptest! {
        #[test]
        fn prop_remaining_bits_never_grow(
            data in proptest::collection::vec(any::<u8>(), 0..32),
            ops in proptest::collection::vec(op(), 0..64),
        ) {
            let total = data.len() * 8;
            let mut reader = PayloadReader::new(&data);
            let mut last = reader.remaining_bits();
            prop_assert_eq!(last, total);

            for op in &ops {
                let result = apply(&mut reader, op);
                let now = reader.remaining_bits();
                prop_assert!(now <= last);
                prop_assert!(reader.consumed_bits() <= total);
                prop_assert_eq!(reader.consumed_bits() + now, total);
                if let Err(err) = result {
                    prop_assert!(err.is_insufficient_data());
                    prop_assert_eq!(now, last);
                }
                last = now;
            }
        }

        #[test]
        fn prop_decoders_fail_cleanly(
            data in proptest::collection::vec(any::<u8>(), 0..48),
            port in prop_oneof![Just(23u8), Just(24), Just(25), Just(50), Just(99)],
        ) {
            for model in [DeviceModel::Elsys, DeviceModel::Nas] {
                match decode_payload(&data, model, port, DecodeOptions::default()) {
                    Ok(_) => {}
                    Err(err) => prop_assert!(err.is_insufficient_data()),
                }
            }
        }
    }
}
