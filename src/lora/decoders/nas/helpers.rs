//! Pieces shared by the NAS packet decoders.

use bitflags::bitflags;

use crate::constants::{DALI_ADDRESS_BROADCAST, DALI_ADDRESS_SPECIAL};
use crate::error::DecodeError;
use crate::lora::decoder::DecodeContext;
use crate::payload::issue::DecodeIssue;
use crate::payload::unit::Unit;
use crate::payload::value::Record;

/// Turn a DALI short-address byte into its text form.
///
/// `0xFF` maps to `special` when the packet gives it a meaning. Invalid
/// addresses are reported and come back as `"invalid"`.
pub fn dali_address(
    ctx: &mut DecodeContext<'_>,
    address: u8,
    special: Option<&'static str>,
) -> String {
    match describe_dali_address(address, special) {
        Some(text) => text,
        None => {
            ctx.report(DecodeIssue::InvalidDaliAddress(address));
            "invalid".to_string()
        }
    }
}

pub fn describe_dali_address(address: u8, special: Option<&'static str>) -> Option<String> {
    match address {
        DALI_ADDRESS_BROADCAST => Some("broadcast".to_string()),
        DALI_ADDRESS_SPECIAL => special.map(str::to_string),
        a if a & 0x01 != 0 => None,
        a if a & 0x80 != 0 => Some(format!("group {}", (a >> 1) & 0x0F)),
        a => Some(format!("single {}", (a >> 1) & 0x3F)),
    }
}

/// Profile block of the status packets, followed by the dimming level.
pub fn decode_profile(ctx: &mut DecodeContext<'_>) -> Result<Record, DecodeError> {
    let fields = ctx.fields;
    let id = ctx.reader.read_u8()?;
    let version = ctx.reader.read_u8()?;
    let address = ctx.reader.read_u8()?;

    let mut profile = Record::new();
    profile.insert(
        "profile_id",
        if id == 0xFF {
            fields.value_raw("no_profile", id)
        } else {
            fields.value(id)
        },
    );
    profile.insert(
        "profile_version",
        if version > 240 {
            fields.value_raw("n/a", version)
        } else {
            fields.value(version)
        },
    );
    // Versions above 240 carry the override reason.
    profile.insert(
        "profile_override",
        fields.value_raw(profile_override_reason(version), version),
    );
    let dali = dali_address(ctx, address, None);
    profile.insert("dali_address_short", fields.value_raw(dali, address));

    let raw_days = ctx.reader.peek_u8()?;
    let mut days = Vec::new();
    for day in ["holiday", "mon", "tue", "wed", "thu", "fri", "sat", "sun"] {
        if ctx.reader.read_bit()? {
            days.push(day);
        }
    }
    profile.insert("days_active", fields.value_raw(days, raw_days));

    let dimming = ctx.reader.read_u8()?;
    profile.insert(
        "dimming_level",
        fields.value_unit_bounds(dimming, Unit::Percent, 0, 100),
    );
    Ok(profile)
}

/// Bytes taken by [`decode_profile`].
pub const PROFILE_BLOCK_BYTES: usize = 5;

pub fn profile_override_reason(reason: u8) -> &'static str {
    match reason {
        246 => "driver_not_found",
        247 => "calendar_active",
        248 => "init_active",
        249 => "profile_not_active",
        250 => "ldr_active",
        251 => "thr_active",
        252 => "dig_active",
        253 => "manual_active",
        254 => "value_differ",
        255 => "unknown",
        _ => "none",
    }
}

pub fn device_config_name(config: u8) -> Option<&'static str> {
    Some(match config {
        0 => "dali",
        1 => "dali_nc",
        2 => "dali_no",
        3 => "analog_nc",
        4 => "analog_no",
        5 => "dali_analog_nc",
        6 => "dali_analog_no",
        7 => "dali_analog_nc_no",
        _ => return None,
    })
}

/// Downlink parse error codes reported by the device.
pub fn error_code_text(code: u8) -> &'static str {
    match code {
        0x00 | 0x01 => "n/a",
        0x02 => "unknown_fport",
        0x03 => "packet_size_short",
        0x04 => "packet_size_long",
        0x05 => "value_error",
        0x06 => "protocol_parse_error",
        0x07 => "reserved_flag_set",
        0x08 => "invalid_flag_combination",
        0x09 => "unavailable_feature_request",
        0x0A => "unsupported_header",
        0x0B => "unreachable_hw_request",
        0x0C => "address_not_available",
        0x0D => "internal_error",
        0x0E => "packet_size_error",
        128 => "no_room",
        129 => "id_seq_error",
        130 => "destination_eror",
        131 => "days_error",
        132 => "step_count_error",
        133 => "step_value_error",
        134 => "step_unsorted",
        135 => "days_overlap",
        _ => "invalid_error_code",
    }
}

bitflags! {
    /// Reset causes in the boot packet.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ResetReason: u8 {
        const RESET_0 = 1 << 0;
        const WATCHDOG = 1 << 1;
        const SOFT = 1 << 2;
        const RESET_3 = 1 << 3;
        const RESET_4 = 1 << 4;
        const RESET_5 = 1 << 5;
        const RESET_6 = 1 << 6;
        const RESET_7 = 1 << 7;
    }
}

impl ResetReason {
    const NAMES: [(Self, &'static str); 8] = [
        (Self::RESET_0, "reset_0"),
        (Self::WATCHDOG, "watchdog_reset"),
        (Self::SOFT, "soft_reset"),
        (Self::RESET_3, "reset_3"),
        (Self::RESET_4, "reset_4"),
        (Self::RESET_5, "reset_5"),
        (Self::RESET_6, "reset_6"),
        (Self::RESET_7, "reset_7"),
    ];

    pub fn names(self) -> Vec<&'static str> {
        flag_names(self, &Self::NAMES)
    }
}

bitflags! {
    /// Optional hardware features in the boot packet. Bit 0 is reserved.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct OptionalFeatures: u8 {
        const THR = 1 << 1;
        const DIG = 1 << 2;
        const LDR = 1 << 3;
        const OPEN_DRAIN_OUT = 1 << 4;
        const METERING = 1 << 5;
        const CUSTOM_REQUEST = 1 << 6;
    }
}

impl OptionalFeatures {
    const NAMES: [(Self, &'static str); 6] = [
        (Self::THR, "thr"),
        (Self::DIG, "dig"),
        (Self::LDR, "ldr"),
        (Self::OPEN_DRAIN_OUT, "open_drain_out"),
        (Self::METERING, "metering"),
        (Self::CUSTOM_REQUEST, "custom_request"),
    ];

    pub fn names(self) -> Vec<&'static str> {
        flag_names(self, &Self::NAMES)
    }
}

fn flag_names<F: bitflags::Flags + Copy>(
    flags: F,
    table: &[(F, &'static str)],
) -> Vec<&'static str> {
    table
        .iter()
        .filter(|(flag, _)| flags.contains(*flag))
        .map(|(_, name)| *name)
        .collect()
}
