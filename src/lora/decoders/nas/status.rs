//! Status packets (fPort 23 and the legacy fPort 24).

use crate::constants::NAS_STATUS_HEADER;
use crate::error::DecodeError;
use crate::lora::decoder::{DecodeContext, PayloadDecoder};
use crate::lora::decoders::nas::helpers::{decode_profile, PROFILE_BLOCK_BYTES};
use crate::payload::issue::DecodeIssue;
use crate::payload::unit::Unit;
use crate::payload::value::Record;

/// Status packet with a leading `0x00` header.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusDecoder;

impl PayloadDecoder for StatusDecoder {
    fn decoder_type(&self) -> &'static str {
        "nas_status"
    }

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<Record, DecodeError> {
        let fields = ctx.fields;
        let mut packet = Record::new();
        packet.insert("packet_type", fields.value("status_packet"));

        let header = ctx.reader.read_u8()?;
        if header != NAS_STATUS_HEADER {
            ctx.report(DecodeIssue::UnknownHeader { header });
            return Ok(packet);
        }

        insert_epoch(ctx, &mut packet)?;

        let r = &mut ctx.reader;
        r.read_bit()?;
        let mut status = Record::new();
        status.insert("dali_connection_error", fields.value(r.read_bit()?));
        status.insert("ldr_input_on", fields.value(r.read_bit()?));
        r.read_bit()?;
        status.insert("dig_input_on", fields.value(r.read_bit()?));
        status.insert("metering_com_error", fields.value(r.read_bit()?));
        status.insert("rtc_com_error", fields.value(r.read_bit()?));
        status.insert("internal_relay_closed", fields.value(r.read_bit()?));
        packet.insert("status", status);

        let rssi = -i16::from(r.read_u8()?);
        packet.insert("downlink_rssi", fields.value_unit(rssi, Unit::DecibelMilliwatt));
        packet.insert("downlink_snr", fields.value_unit(r.read_i8()?, Unit::Decibel));
        packet.insert("mcu_temperature", fields.value_unit(r.read_i8()?, Unit::DegreeCelsius));

        // legacy thr flag
        r.read_bit()?;
        let ldr_sent = r.read_bit()?;
        let mut analog = Record::new();
        analog.insert("open_drain_out_state", fields.value(r.read_bit()?));
        r.read_bit()?;
        let alerts_sent = r.read_bit()?;

        if ldr_sent {
            packet.insert("ldr_value", fields.value(r.read_u8()?));
        }
        if alerts_sent {
            insert_alerts(ctx, &mut analog)?;
        }
        packet.insert("analog_interfaces", analog);

        insert_profile(ctx, &mut packet)?;
        Ok(packet)
    }
}

/// Status packet without a header, used by older firmware.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyStatusDecoder;

impl PayloadDecoder for LegacyStatusDecoder {
    fn decoder_type(&self) -> &'static str {
        "nas_status_legacy"
    }

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<Record, DecodeError> {
        let fields = ctx.fields;
        let mut packet = Record::new();
        packet.insert("packet_type", fields.value("status_packet"));

        insert_epoch(ctx, &mut packet)?;

        let r = &mut ctx.reader;
        let mut status = Record::new();
        status.insert("dali_error_external", fields.value(r.read_bit()?));
        status.insert("dali_error_connection", fields.value(r.read_bit()?));
        status.insert("ldr_state", fields.value(r.read_bit()?));
        r.read_bit()?;
        status.insert("dig_state", fields.value(r.read_bit()?));
        status.insert("hardware_error", fields.value(r.read_bit()?));
        status.insert("firmware_error", fields.value(r.read_bit()?));
        status.insert("internal_relay_state", fields.value(r.read_bit()?));
        packet.insert("status_field", status);

        packet.insert("downlink_rssi", fields.value_unit(r.read_u8()?, Unit::DecibelMilliwatt));
        packet.insert("downlink_snr", fields.value_unit(r.read_i8()?, Unit::Decibel));
        packet.insert("mcu_temperature", fields.value_unit(r.read_i8()?, Unit::DegreeCelsius));

        let thr_sent = r.read_bit()?;
        let ldr_sent = r.read_bit()?;
        let mut analog = Record::new();
        analog.insert("open_drain_out_state", fields.value(r.read_bit()?));
        r.read_bit()?;
        insert_alerts(ctx, &mut analog)?;
        packet.insert("analog_interfaces", analog);

        if thr_sent {
            packet.insert("thr_value", fields.value(ctx.reader.read_u8()?));
        }
        if ldr_sent {
            packet.insert("ldr_value", fields.value(ctx.reader.read_u8()?));
        }

        insert_profile(ctx, &mut packet)?;
        Ok(packet)
    }
}

fn insert_epoch(ctx: &mut DecodeContext<'_>, packet: &mut Record) -> Result<(), DecodeError> {
    let raw = ctx.reader.peek_u32()?;
    let time = ctx.reader.read_unix_epoch()?;
    packet.insert("device_unix_epoch", ctx.fields.value_raw(time, raw));
    Ok(())
}

fn insert_alerts(ctx: &mut DecodeContext<'_>, analog: &mut Record) -> Result<(), DecodeError> {
    for name in [
        "voltage_alert_in_24h",
        "lamp_error_alert_in_24h",
        "power_alert_in_24h",
        "power_factor_alert_in_24h",
    ] {
        analog.insert(name, ctx.fields.value(ctx.reader.read_bit()?));
    }
    Ok(())
}

fn insert_profile(ctx: &mut DecodeContext<'_>, packet: &mut Record) -> Result<(), DecodeError> {
    if ctx.reader.remaining_bits() >= PROFILE_BLOCK_BYTES * 8 {
        let profile = decode_profile(ctx)?;
        packet.insert("profile", profile);
    }
    Ok(())
}
