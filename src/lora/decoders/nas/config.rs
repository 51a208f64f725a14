//! Configuration packet (fPort 50), selected by a leading header byte.

use log::debug;

use crate::constants::*;
use crate::error::DecodeError;
use crate::lora::decoder::{DecodeContext, Dispatch, PayloadDecoder};
use crate::lora::decoders::nas::helpers::dali_address;
use crate::payload::issue::DecodeIssue;
use crate::payload::unit::Unit;
use crate::payload::value::{Record, Value};

type ConfigFn = fn(&mut DecodeContext<'_>, &mut Record) -> Result<(), DecodeError>;

/// Route a config header to its decoder.
pub fn select_config(header: u8) -> Dispatch<ConfigFn> {
    match header {
        NAS_CONFIG_LDR => Dispatch::Decoder(ldr_config),
        NAS_CONFIG_DIG => Dispatch::Decoder(dig_config),
        NAS_CONFIG_OPEN_DRAIN_OUT => Dispatch::Decoder(open_drain_out_config),
        NAS_CONFIG_CALENDAR => Dispatch::Decoder(calendar_config),
        NAS_CONFIG_STATUS => Dispatch::Decoder(status_config),
        NAS_CONFIG_PROFILE => Dispatch::Unsupported("profile_config"),
        NAS_CONFIG_TIME => Dispatch::Unsupported("time_config"),
        NAS_CONFIG_LEGACY_DEFAULTS => Dispatch::Unsupported("legacy_defaults_config"),
        NAS_CONFIG_USAGE => Dispatch::Unsupported("usage_config"),
        NAS_CONFIG_HOLIDAY => Dispatch::Unsupported("holiday_config"),
        NAS_CONFIG_BOOT_DELAY => Dispatch::Unsupported("boot_delay_config"),
        NAS_CONFIG_DEFAULTS => Dispatch::Unsupported("defaults_config"),
        NAS_CONFIG_LOCATION => Dispatch::Unsupported("location_config"),
        NAS_CONFIG_LED => Dispatch::Unsupported("led_config"),
        NAS_CONFIG_METERING_ALERT => Dispatch::Unsupported("metering_alert_config"),
        NAS_CONFIG_MULTICAST => Dispatch::Unsupported("multicast_config"),
        NAS_CONFIG_CLEAR => Dispatch::Unsupported("clear_config"),
        _ => Dispatch::Unrecognized,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigDecoder;

impl PayloadDecoder for ConfigDecoder {
    fn decoder_type(&self) -> &'static str {
        "nas_config"
    }

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<Record, DecodeError> {
        let mut packet = Record::new();
        let header = ctx.reader.read_u8()?;
        match select_config(header) {
            Dispatch::Decoder(decode) => {
                debug!("config header 0x{header:02X}");
                decode(ctx, &mut packet)?;
            }
            Dispatch::Unsupported(name) => {
                packet.insert("packet_type", ctx.fields.value(format!("{name}_packet")));
                ctx.report(DecodeIssue::Unsupported {
                    name,
                    discriminator: header,
                });
            }
            Dispatch::Unrecognized => ctx.report(DecodeIssue::UnknownHeader { header }),
        }
        Ok(packet)
    }
}

fn threshold(value: u8) -> String {
    if value == 0xFF {
        "disabled".to_string()
    } else {
        value.to_string()
    }
}

fn ldr_config(ctx: &mut DecodeContext<'_>, packet: &mut Record) -> Result<(), DecodeError> {
    let fields = ctx.fields;
    packet.insert("packet_type", fields.value("ldr_config_packet"));
    let high = ctx.reader.read_u8()?;
    let low = ctx.reader.read_u8()?;
    packet.insert("switch_threshold_high", fields.value_raw(threshold(high), high));
    packet.insert("switch_threshold_low", fields.value_raw(threshold(low), low));
    ctx.reader.read_bits(2)?;
    packet.insert("switch_trigger_alert_enabled", ctx.reader.read_bit()?);
    Ok(())
}

fn dig_config(ctx: &mut DecodeContext<'_>, packet: &mut Record) -> Result<(), DecodeError> {
    let fields = ctx.fields;
    packet.insert("packet_type", fields.value("dig_config_packet"));

    let time = ctx.reader.read_u16()?;
    let time_text = if time == 0xFFFF {
        "disabled".to_string()
    } else {
        time.to_string()
    };
    packet.insert("switch_time", fields.value_raw_unit(time_text, time, Unit::Second));

    ctx.reader.read_bit()?;
    let edge = ctx.reader.read_bit()?;
    packet.insert(
        "switch_transition",
        fields.value_raw(if edge { "enabled" } else { "disabled" }, edge),
    );
    packet.insert("switch_trigger_alert_enabled", ctx.reader.read_bit()?);

    let address = ctx.reader.read_u8()?;
    let dali = dali_address(ctx, address, None);
    packet.insert("dali_address_short", fields.value_raw(dali, address));
    packet.insert("dimming_level", fields.value_unit(ctx.reader.read_u8()?, Unit::Percent));
    Ok(())
}

fn open_drain_out_config(
    ctx: &mut DecodeContext<'_>,
    packet: &mut Record,
) -> Result<(), DecodeError> {
    packet.insert("packet_type", ctx.fields.value("open_drain_out_config_packet"));
    let mut steps = Vec::new();
    while !ctx.reader.is_empty() {
        steps.push(Value::Map(switching_step(ctx)?));
    }
    packet.insert("switching_steps", steps);
    Ok(())
}

/// One step: time of day in units of ten minutes, then the output state.
fn switching_step(ctx: &mut DecodeContext<'_>) -> Result<Record, DecodeError> {
    let minutes = u16::from(ctx.reader.read_u8()?) * 10;
    let mut step = Record::new();
    step.insert(
        "step_time",
        ctx.fields.value_raw_unit(
            format!("{:02}:{:02}", minutes / 60, minutes % 60),
            minutes,
            Unit::HourAndMinute,
        ),
    );
    step.insert("open_drain_out_state", ctx.reader.read_u8()? != 0);
    Ok(step)
}

fn calendar_config(ctx: &mut DecodeContext<'_>, packet: &mut Record) -> Result<(), DecodeError> {
    let fields = ctx.fields;
    packet.insert("packet_type", fields.value("calendar_config_packet"));

    let sunrise = ctx.reader.read_i8()?;
    let sunset = ctx.reader.read_i8()?;
    let cleared = sunrise == -1 && sunset == -1;
    let offset = |value: i8| {
        if cleared {
            "disabled".to_string()
        } else {
            value.to_string()
        }
    };
    packet.insert(
        "sunrise_offset",
        fields.value_raw_unit(offset(sunrise), sunrise, Unit::Minute),
    );
    packet.insert(
        "sunset_offset",
        fields.value_raw_unit(offset(sunset), sunset, Unit::Minute),
    );

    let latitude = f64::from(ctx.reader.read_i16()?) / 100.0;
    let longitude = f64::from(ctx.reader.read_i16()?) / 100.0;
    packet.insert("latitude", fields.value_unit(latitude, Unit::Degree));
    packet.insert("longitude", fields.value_unit(longitude, Unit::Degree));
    Ok(())
}

fn status_config(ctx: &mut DecodeContext<'_>, packet: &mut Record) -> Result<(), DecodeError> {
    packet.insert("packet_type", ctx.fields.value("status_config_packet"));
    let interval = ctx.reader.read_u32()?;
    packet.insert("status_interval", ctx.fields.value_unit(interval, Unit::Second));
    Ok(())
}
