//! Decode options.
//!
//! Callers pick the output conventions here. The options can be built in code
//! or loaded from a JSON file; missing keys take their defaults.
//!
//! ```json
//! { "compact": true, "shape": "flat", "counter_signedness": "signed" }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lora::decoders::elsys::ElsysFirmware;
use crate::payload::field::FieldFormatter;
use crate::payload::result::OutputShape;

/// How the Elsys absolute pulse counters (`pulseAbs`, `pulseAbs2`) are read.
///
/// Device documentation calls them unsigned while some firmware reference
/// code returns a signed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterSignedness {
    #[default]
    Unsigned,
    Signed,
}

/// Per-call decode options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    pub compact: bool,
    pub shape: OutputShape,
    pub counter_signedness: CounterSignedness,
    pub elsys_firmware: ElsysFirmware,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl DecodeOptions {
    pub fn compact() -> Self {
        Self {
            compact: true,
            ..Self::default()
        }
    }

    pub fn with_shape(mut self, shape: OutputShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_counter_signedness(mut self, signedness: CounterSignedness) -> Self {
        self.counter_signedness = signedness;
        self
    }

    pub fn with_elsys_firmware(mut self, firmware: ElsysFirmware) -> Self {
        self.elsys_firmware = firmware;
        self
    }

    pub fn formatter(&self) -> FieldFormatter {
        FieldFormatter::new(self.compact)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
