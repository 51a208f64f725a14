//! Boot packet (fPort 99), selected by a leading header byte.

use crate::constants::{NAS_BOOT_INVALID_DOWNLINK, NAS_BOOT_PACKET};
use crate::error::DecodeError;
use crate::lora::decoder::{DecodeContext, Dispatch, PayloadDecoder};
use crate::lora::decoders::nas::helpers::{
    device_config_name, error_code_text, OptionalFeatures, ResetReason,
};
use crate::payload::issue::DecodeIssue;
use crate::payload::reader::PayloadReader;
use crate::payload::unit::Unit;
use crate::payload::value::{Record, Value};

type BootFn = fn(&mut DecodeContext<'_>, &mut Record) -> Result<(), DecodeError>;

pub fn select_boot(header: u8) -> Dispatch<BootFn> {
    match header {
        NAS_BOOT_PACKET => Dispatch::Decoder(boot_packet),
        NAS_BOOT_INVALID_DOWNLINK => Dispatch::Decoder(invalid_downlink_packet),
        _ => Dispatch::Unrecognized,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BootDecoder;

impl PayloadDecoder for BootDecoder {
    fn decoder_type(&self) -> &'static str {
        "nas_boot"
    }

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<Record, DecodeError> {
        let mut packet = Record::new();
        let header = ctx.reader.read_u8()?;
        match select_boot(header) {
            Dispatch::Decoder(decode) => decode(ctx, &mut packet)?,
            Dispatch::Unsupported(name) => ctx.report(DecodeIssue::Unsupported {
                name,
                discriminator: header,
            }),
            Dispatch::Unrecognized => ctx.report(DecodeIssue::UnknownHeader { header }),
        }
        Ok(packet)
    }
}

fn boot_packet(ctx: &mut DecodeContext<'_>, packet: &mut Record) -> Result<(), DecodeError> {
    let fields = ctx.fields;
    packet.insert("packet_type", fields.value("boot_packet"));

    let serial = ctx.reader.read_u32()?;
    packet.insert("device_serial", fields.value(format!("{serial:08X}")));

    let major = ctx.reader.read_u8()?;
    let minor = ctx.reader.read_u8()?;
    let patch = ctx.reader.read_u8()?;
    let raw_version = (u32::from(major) << 16) | (u32::from(minor) << 8) | u32::from(patch);
    packet.insert(
        "firmware_version",
        fields.value_raw(format!("{major}.{minor}.{patch}"), raw_version.to_string()),
    );

    let raw_epoch = ctx.reader.peek_u32()?;
    let epoch = ctx.reader.read_unix_epoch()?;
    packet.insert("device_unix_epoch", fields.value_raw(epoch, raw_epoch));

    let config = ctx.reader.read_u8()?;
    let config_name = match device_config_name(config) {
        Some(name) => name,
        None => {
            ctx.report(DecodeIssue::InvalidDeviceConfig(config));
            "invalid"
        }
    };
    packet.insert("device_config", fields.value_raw(config_name, config));

    let features = ctx.reader.read_u8()?;
    packet.insert(
        "optional_features",
        fields.value_raw(OptionalFeatures::from_bits_truncate(features).names(), features),
    );

    // Supply state and driver count are 7-bit values with a flag in bit 7.
    let dali_info = [ctx.reader.read_u8()?];
    let mut info = PayloadReader::new(&dali_info);
    let supply = info.read_bits(7)?;
    packet.insert("dali_supply_state", dali_supply_state(ctx, supply));
    let external = info.read_bit()?;
    packet.insert(
        "dali_power_source",
        fields.value_raw(if external { "external" } else { "internal" }, external),
    );

    let driver_info = [ctx.reader.read_u8()?];
    let mut drivers = PayloadReader::new(&driver_info);
    packet.insert("dali_addressed_driver_count", fields.value(drivers.read_bits(7)?));
    packet.insert("dali_unadressed_driver_found", fields.value(drivers.read_bit()?));

    if ctx.reader.remaining_bits() >= 8 {
        let reset = ctx.reader.read_u8()?;
        packet.insert(
            "reset_reason",
            fields.value_raw(ResetReason::from_bits_retain(reset).names(), reset),
        );
    }
    Ok(())
}

fn dali_supply_state(ctx: &DecodeContext<'_>, supply: u8) -> Value {
    match supply {
        s if s < 0x70 => ctx.fields.value_raw_unit(s, s, Unit::Volt),
        0x7E => ctx.fields.value_raw("bus_high", supply),
        0x7F => ctx.fields.value_raw("dali_error", supply),
        _ => ctx.fields.value_raw("invalid_value", supply),
    }
}

fn invalid_downlink_packet(
    ctx: &mut DecodeContext<'_>,
    packet: &mut Record,
) -> Result<(), DecodeError> {
    let fields = ctx.fields;
    packet.insert("packet_type", fields.value("invalid_downlink_packet"));
    packet.insert("packet_from_fport", fields.value(ctx.reader.read_u8()?));
    let code = ctx.reader.read_u8()?;
    let text = error_code_text(code);
    packet.insert("parse_error_code", fields.value_raw(text, code));
    ctx.report(DecodeIssue::ConfigFailed(text));
    Ok(())
}
