//! NAS street-light controller decoders.
//!
//! Each fPort carries a fixed layout; config and boot packets add a header
//! byte that selects the inner layout.

pub mod boot;
pub mod config;
pub mod helpers;
pub mod status;
pub mod usage;

pub use boot::BootDecoder;
pub use config::ConfigDecoder;
pub use status::{LegacyStatusDecoder, StatusDecoder};
pub use usage::UsageDecoder;
