//! Non-fatal decode issues.
//!
//! Issues are collected next to the partial record instead of aborting the
//! decode. Each one has an [`IssueKind`] so callers can tell an invalid payload
//! apart from a valid one this crate cannot decode yet.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Broad classification of a [`DecodeIssue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    /// Unknown model, port, header or tag. The enclosing unit stopped decoding.
    Unrecognized,
    /// A known discriminator without a decoder.
    Unsupported,
    /// A field decoded but its value is not valid; decoding went on.
    Semantic,
    /// The device itself reported a failure in the payload.
    Reported,
}

/// A non-fatal entry of a decode's error list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeIssue {
    #[error("No decoder found for port {port}")]
    UnknownPort { port: u8 },

    #[error("Unknown type 0x{0:02X}")]
    UnknownTag(u8),

    #[error("invalid_header 0x{header:02X}")]
    UnknownHeader { header: u8 },

    #[error("Not yet supported: fPort {port} ({name})")]
    UnsupportedPort { port: u8, name: &'static str },

    #[error("Not yet supported: {name} (0x{discriminator:02X})")]
    Unsupported {
        name: &'static str,
        discriminator: u8,
    },

    #[error("Invalid DALI address 0x{0:02X}")]
    InvalidDaliAddress(u8),

    #[error("Invalid device config {0}")]
    InvalidDeviceConfig(u8),

    #[error("Config failed: {0}")]
    ConfigFailed(&'static str),
}

impl DecodeIssue {
    pub fn kind(&self) -> IssueKind {
        match self {
            DecodeIssue::UnknownPort { .. }
            | DecodeIssue::UnknownTag(_)
            | DecodeIssue::UnknownHeader { .. } => IssueKind::Unrecognized,
            DecodeIssue::UnsupportedPort { .. } | DecodeIssue::Unsupported { .. } => {
                IssueKind::Unsupported
            }
            DecodeIssue::InvalidDaliAddress(_) | DecodeIssue::InvalidDeviceConfig(_) => {
                IssueKind::Semantic
            }
            DecodeIssue::ConfigFailed(_) => IssueKind::Reported,
        }
    }

    pub fn is_unsupported(&self) -> bool {
        self.kind() == IssueKind::Unsupported
    }
}

impl Serialize for DecodeIssue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
