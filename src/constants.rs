//! LoRaWAN Payload Constants
//!
//! fPort numbers, Elsys type tags and NAS packet headers used by the decoders.

// ----------------------------------------------------------------------------
// NAS lighting controller fPorts
// ----------------------------------------------------------------------------

/// Status packet, v1.1 layout with a leading header byte
pub const NAS_PORT_STATUS: u8 = 23;
/// Status packet, legacy layout
pub const NAS_PORT_STATUS_LEGACY: u8 = 24;
/// Usage (metering) packet
pub const NAS_PORT_USAGE: u8 = 25;
pub const NAS_PORT_CONFIG_REQUEST: u8 = 49;
/// Configuration packet with a nested header
pub const NAS_PORT_CONFIG: u8 = 50;
pub const NAS_PORT_FIRMWARE_UPDATE: u8 = 51;
pub const NAS_PORT_COMMAND: u8 = 60;
/// Boot packet with a nested header
pub const NAS_PORT_BOOT: u8 = 99;

// ----------------------------------------------------------------------------
// NAS config (fPort 50) headers
// ----------------------------------------------------------------------------

pub const NAS_CONFIG_LDR: u8 = 0x01;
pub const NAS_CONFIG_DIG: u8 = 0x03;
pub const NAS_CONFIG_OPEN_DRAIN_OUT: u8 = 0x05;
pub const NAS_CONFIG_CALENDAR: u8 = 0x06;
pub const NAS_CONFIG_STATUS: u8 = 0x07;
pub const NAS_CONFIG_PROFILE: u8 = 0x08;
pub const NAS_CONFIG_TIME: u8 = 0x09;
pub const NAS_CONFIG_LEGACY_DEFAULTS: u8 = 0x0A;
pub const NAS_CONFIG_USAGE: u8 = 0x0B;
pub const NAS_CONFIG_HOLIDAY: u8 = 0x0C;
pub const NAS_CONFIG_BOOT_DELAY: u8 = 0x0D;
pub const NAS_CONFIG_DEFAULTS: u8 = 0x0E;
pub const NAS_CONFIG_LOCATION: u8 = 0x13;
pub const NAS_CONFIG_LED: u8 = 0x15;
pub const NAS_CONFIG_METERING_ALERT: u8 = 0x16;
pub const NAS_CONFIG_MULTICAST: u8 = 0x52;
pub const NAS_CONFIG_CLEAR: u8 = 0xFF;

// ----------------------------------------------------------------------------
// NAS boot (fPort 99) headers
// ----------------------------------------------------------------------------

pub const NAS_BOOT_PACKET: u8 = 0x00;
pub const NAS_BOOT_INVALID_DOWNLINK: u8 = 0x13;

/// Status v1.1 header byte
pub const NAS_STATUS_HEADER: u8 = 0x00;

// ----------------------------------------------------------------------------
// DALI short addresses
// ----------------------------------------------------------------------------

pub const DALI_ADDRESS_BROADCAST: u8 = 0xFE;
pub const DALI_ADDRESS_SPECIAL: u8 = 0xFF;

// ----------------------------------------------------------------------------
// Elsys type tags
// ----------------------------------------------------------------------------

pub const ELSYS_TEMP: u8 = 0x01; // 2 bytes, -3276.8°C..3276.7°C
pub const ELSYS_RH: u8 = 0x02; // 1 byte, 0-100%
pub const ELSYS_ACC: u8 = 0x03; // 3 bytes X,Y,Z, ±63 = 1G
pub const ELSYS_LIGHT: u8 = 0x04;
pub const ELSYS_MOTION: u8 = 0x05;
pub const ELSYS_CO2: u8 = 0x06;
pub const ELSYS_VDD: u8 = 0x07;
pub const ELSYS_ANALOG1: u8 = 0x08;
pub const ELSYS_GPS: u8 = 0x09; // 3 bytes lat, 3 bytes long, little-endian
pub const ELSYS_PULSE1: u8 = 0x0A;
pub const ELSYS_PULSE1_ABS: u8 = 0x0B;
pub const ELSYS_EXT_TEMP1: u8 = 0x0C;
pub const ELSYS_EXT_DIGITAL: u8 = 0x0D;
pub const ELSYS_EXT_DISTANCE: u8 = 0x0E;
pub const ELSYS_ACC_MOTION: u8 = 0x0F;
pub const ELSYS_IR_TEMP: u8 = 0x10; // internal then external
pub const ELSYS_OCCUPANCY: u8 = 0x11;
pub const ELSYS_WATERLEAK: u8 = 0x12;
pub const ELSYS_GRIDEYE: u8 = 0x13; // 1 byte ref + 64 pixels
pub const ELSYS_PRESSURE: u8 = 0x14;
pub const ELSYS_SOUND: u8 = 0x15; // peak then average
pub const ELSYS_PULSE2: u8 = 0x16;
pub const ELSYS_PULSE2_ABS: u8 = 0x17;
pub const ELSYS_ANALOG2: u8 = 0x18;
pub const ELSYS_EXT_TEMP2: u8 = 0x19;
pub const ELSYS_EXT_DIGITAL2: u8 = 0x1A;
pub const ELSYS_EXT_ANALOG_UV: u8 = 0x1B;
pub const ELSYS_TVOC: u8 = 0x1C;
pub const ELSYS_DEBUG: u8 = 0x3D;

/// Number of pixels in a Grid-EYE frame
pub const ELSYS_GRIDEYE_PIXELS: usize = 64;
