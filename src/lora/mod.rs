//! # LoRaWAN Payload Decoders
//!
//! Device-specific decoders built on the [`payload`](crate::payload) core and
//! the dispatcher that selects between them.

pub mod decoder;
pub mod decoders;

pub use decoder::{
    decode_hex_payload, decode_payload, select_decoder, DecodeContext, DeviceModel, Dispatch,
    PayloadDecoder, UnknownModel,
};
pub use decoders::elsys::{ElsysDecoder, ElsysFirmware};
