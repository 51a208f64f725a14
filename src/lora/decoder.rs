//! Decoder selection and the shared decode context.
//!
//! A decode goes through three steps:
//!
//! 1. [`select_decoder`] routes a `(model, port)` pair to a [`Dispatch`] outcome.
//! 2. The chosen [`PayloadDecoder`] reads fields from the [`DecodeContext`].
//!    Non-fatal problems are reported into the context.
//! 3. [`DecodeContext::finish`] packs the record and the issues into a
//!    [`DecodeResult`] of the caller's [`OutputShape`](crate::payload::OutputShape).
//!
//! Only [`DecodeError`] aborts a decode; everything else becomes a [`DecodeIssue`].

use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::DecodeOptions;
use crate::constants::*;
use crate::error::DecodeError;
use crate::logging::log_payload;
use crate::lora::decoders::elsys::ElsysDecoder;
use crate::lora::decoders::nas::{
    BootDecoder, ConfigDecoder, LegacyStatusDecoder, StatusDecoder, UsageDecoder,
};
use crate::payload::field::FieldFormatter;
use crate::payload::issue::{DecodeIssue, IssueKind};
use crate::payload::reader::PayloadReader;
use crate::payload::result::DecodeResult;
use crate::payload::value::Record;
use crate::util::hex::decode_hex;

/// Outcome of looking up a discriminator (model+port, header or tag).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch<T> {
    /// Known and implemented.
    Decoder(T),
    /// Known, but not implemented yet. Carries the schema name.
    Unsupported(&'static str),
    /// Not a known value.
    Unrecognized,
}

impl<T> Dispatch<T> {
    pub fn is_decoder(&self) -> bool {
        matches!(self, Dispatch::Decoder(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Dispatch<U> {
        match self {
            Dispatch::Decoder(decoder) => Dispatch::Decoder(f(decoder)),
            Dispatch::Unsupported(name) => Dispatch::Unsupported(name),
            Dispatch::Unrecognized => Dispatch::Unrecognized,
        }
    }
}

/// Mutable state of one decode: the reader, the output conventions and the
/// accumulated issues. Lives for a single call.
pub struct DecodeContext<'a> {
    pub reader: PayloadReader<'a>,
    pub fields: FieldFormatter,
    pub options: DecodeOptions,
    issues: Vec<DecodeIssue>,
}

impl<'a> DecodeContext<'a> {
    pub fn new(bytes: &'a [u8], options: DecodeOptions) -> Self {
        Self {
            reader: PayloadReader::new(bytes),
            fields: options.formatter(),
            options,
            issues: Vec::new(),
        }
    }

    /// Record a non-fatal issue.
    pub fn report(&mut self, issue: DecodeIssue) {
        match issue.kind() {
            IssueKind::Unrecognized => warn!("{issue}, stopping"),
            _ => debug!("{issue}"),
        }
        self.issues.push(issue);
    }

    pub fn issues(&self) -> &[DecodeIssue] {
        &self.issues
    }

    pub fn finish(self, data: Record) -> DecodeResult {
        DecodeResult::new(data, self.issues, self.options.shape)
    }
}

/// A schema-specific decode procedure.
pub trait PayloadDecoder: Send + Sync {
    /// Short name used in logs.
    fn decoder_type(&self) -> &'static str;

    /// Decode the whole payload. Only out-of-data conditions are returned as
    /// errors; everything else goes through [`DecodeContext::report`].
    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<Record, DecodeError>;
}

/// Supported device families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceModel {
    /// NAS street-light controller, fixed layouts selected by fPort
    Nas,
    /// Elsys sensors, tag stream on any fPort
    Elsys,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("No decoder found for model '{0}'")]
pub struct UnknownModel(pub String);

impl FromStr for DeviceModel {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nas" => Ok(DeviceModel::Nas),
            "elsys" => Ok(DeviceModel::Elsys),
            _ => Err(UnknownModel(s.to_string())),
        }
    }
}

impl fmt::Display for DeviceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceModel::Nas => f.write_str("nas"),
            DeviceModel::Elsys => f.write_str("elsys"),
        }
    }
}

static ELSYS: ElsysDecoder = ElsysDecoder;
static NAS_STATUS: StatusDecoder = StatusDecoder;
static NAS_STATUS_LEGACY: LegacyStatusDecoder = LegacyStatusDecoder;
static NAS_USAGE: UsageDecoder = UsageDecoder;
static NAS_CONFIG: ConfigDecoder = ConfigDecoder;
static NAS_BOOT: BootDecoder = BootDecoder;

/// Route a model and fPort to a decoder.
pub fn select_decoder(model: DeviceModel, port: u8) -> Dispatch<&'static dyn PayloadDecoder> {
    match model {
        DeviceModel::Elsys => Dispatch::Decoder(&ELSYS),
        DeviceModel::Nas => match port {
            NAS_PORT_STATUS => Dispatch::Decoder(&NAS_STATUS),
            NAS_PORT_STATUS_LEGACY => Dispatch::Decoder(&NAS_STATUS_LEGACY),
            NAS_PORT_USAGE => Dispatch::Decoder(&NAS_USAGE),
            NAS_PORT_CONFIG => Dispatch::Decoder(&NAS_CONFIG),
            NAS_PORT_BOOT => Dispatch::Decoder(&NAS_BOOT),
            NAS_PORT_CONFIG_REQUEST => Dispatch::Unsupported("config_request"),
            NAS_PORT_FIRMWARE_UPDATE => Dispatch::Unsupported("firmware_update"),
            NAS_PORT_COMMAND => Dispatch::Unsupported("command"),
            _ => Dispatch::Unrecognized,
        },
    }
}

/// Decode raw payload bytes.
///
/// Unknown or unsupported ports produce an empty record plus one issue.
pub fn decode_payload(
    bytes: &[u8],
    model: DeviceModel,
    port: u8,
    options: DecodeOptions,
) -> Result<DecodeResult, DecodeError> {
    log_payload(model, port, bytes);
    let mut ctx = DecodeContext::new(bytes, options);

    let data = match select_decoder(model, port) {
        Dispatch::Decoder(decoder) => {
            debug!("Using {} decoder", decoder.decoder_type());
            decoder.decode(&mut ctx)?
        }
        Dispatch::Unsupported(name) => {
            ctx.report(DecodeIssue::UnsupportedPort { port, name });
            Record::new()
        }
        Dispatch::Unrecognized => {
            ctx.report(DecodeIssue::UnknownPort { port });
            Record::new()
        }
    };

    Ok(ctx.finish(data))
}

/// Validate a hex string, then decode it. Malformed hex fails before any
/// byte is read.
pub fn decode_hex_payload(
    hex: &str,
    model: DeviceModel,
    port: u8,
    options: DecodeOptions,
) -> Result<DecodeResult, DecodeError> {
    let bytes = decode_hex(hex)?;
    decode_payload(&bytes, model, port, options)
}
