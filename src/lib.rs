//! # lora-payload-rs - Decoders for LoRaWAN Device Payloads
//!
//! The lora-payload-rs crate turns the compact binary payloads sent by LoRaWAN
//! end devices into ordered, self-describing records that serialize to JSON.
//!
//! ## Features
//!
//! - Bit-level payload reader with byte alignment, mixed endianness and peeking
//! - Uniform field wrapping (value, raw, unit, bounds) with a compact mode
//! - Non-fatal issue accumulation next to a best-effort partial record
//! - Elsys tag stream decoder with per-firmware tag support
//! - NAS street-light controller decoders (status, usage, config, boot)
//!
//! ## Usage
//!
//! ```rust
//! use lora_payload_rs::{decode_hex_payload, DecodeOptions, DeviceModel};
//!
//! let result = decode_hex_payload("0100EB0232", DeviceModel::Elsys, 5, DecodeOptions::compact())
//!     .expect("well-formed payload");
//! let json = serde_json::to_string(&result).unwrap();
//! assert_eq!(json, r#"{"data":{"temperature":"23.5 °C","humidity":"50 %"},"errors":[]}"#);
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod lora;
pub mod payload;
pub mod util;

pub use crate::config::{ConfigError, CounterSignedness, DecodeOptions};
pub use crate::error::DecodeError;
pub use crate::logging::{init_logger, log_debug, log_info, log_warn};

pub use lora::{
    decode_hex_payload, decode_payload, select_decoder, DecodeContext, DeviceModel, Dispatch,
    ElsysFirmware, PayloadDecoder,
};
pub use payload::{
    merge_occurrences, DecodeIssue, DecodeResult, FieldFormatter, IssueKind, OutputShape,
    PayloadReader, Record, Unit, Value,
};
pub use util::hex::HexError;
