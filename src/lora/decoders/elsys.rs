//! Elsys tag stream decoder.
//!
//! An Elsys payload is a sequence of `tag, data` pairs. The tag byte selects a
//! fixed-width field from [`TAGS`]; widths are never on the wire, so an unknown
//! tag ends the stream. Multi-byte values are big-endian except GPS.
//!
//! Which tags a device can decode depends on its firmware, see [`ElsysFirmware`].

use std::fmt;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::config::CounterSignedness;
use crate::constants::*;
use crate::error::DecodeError;
use crate::lora::decoder::{DecodeContext, PayloadDecoder};
use crate::payload::issue::DecodeIssue;
use crate::payload::result::Occurrences;
use crate::payload::unit::Unit;
use crate::payload::value::{Record, Value};

type TagFn = fn(&mut DecodeContext<'_>, &mut Occurrences) -> Result<(), DecodeError>;

/// One entry of the tag table.
pub struct TagSpec {
    pub tag: u8,
    pub name: &'static str,
    /// Payload bytes following the tag.
    pub width: usize,
    decode: TagFn,
}

impl fmt::Debug for TagSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagSpec")
            .field("tag", &format_args!("0x{:02X}", self.tag))
            .field("name", &self.name)
            .field("width", &self.width)
            .finish()
    }
}

const fn spec(tag: u8, name: &'static str, width: usize, decode: TagFn) -> TagSpec {
    TagSpec {
        tag,
        name,
        width,
        decode,
    }
}

/// Every tag known to any firmware.
pub static TAGS: [TagSpec; 29] = [
    spec(ELSYS_TEMP, "temperature", 2, temperature),
    spec(ELSYS_RH, "humidity", 1, humidity),
    spec(ELSYS_ACC, "acceleration", 3, acceleration),
    spec(ELSYS_LIGHT, "light", 2, light),
    spec(ELSYS_MOTION, "motion", 1, motion),
    spec(ELSYS_CO2, "co2", 2, co2),
    spec(ELSYS_VDD, "vdd", 2, vdd),
    spec(ELSYS_ANALOG1, "analog1", 2, analog1),
    spec(ELSYS_GPS, "gps", 6, gps),
    spec(ELSYS_PULSE1, "pulse1", 2, pulse1),
    spec(ELSYS_PULSE1_ABS, "pulseAbs", 4, pulse_abs),
    spec(ELSYS_EXT_TEMP1, "externalTemperature", 2, external_temperature),
    spec(ELSYS_EXT_DIGITAL, "digital", 1, digital),
    spec(ELSYS_EXT_DISTANCE, "distance", 2, distance),
    spec(ELSYS_ACC_MOTION, "accMotion", 1, acc_motion),
    spec(ELSYS_IR_TEMP, "irTemperature", 4, ir_temperature),
    spec(ELSYS_OCCUPANCY, "occupancy", 1, occupancy),
    spec(ELSYS_WATERLEAK, "waterleak", 1, waterleak),
    spec(ELSYS_GRIDEYE, "grideye", 1 + ELSYS_GRIDEYE_PIXELS, grideye),
    spec(ELSYS_PRESSURE, "pressure", 4, pressure),
    spec(ELSYS_SOUND, "sound", 2, sound),
    spec(ELSYS_PULSE2, "pulse2", 2, pulse2),
    spec(ELSYS_PULSE2_ABS, "pulseAbs2", 4, pulse_abs2),
    spec(ELSYS_ANALOG2, "analog2", 2, analog2),
    spec(ELSYS_EXT_TEMP2, "externalTemperature2", 2, external_temperature2),
    spec(ELSYS_EXT_DIGITAL2, "digital2", 1, digital2),
    spec(ELSYS_EXT_ANALOG_UV, "analogUV", 4, analog_uv),
    spec(ELSYS_TVOC, "tvoc", 2, tvoc),
    spec(ELSYS_DEBUG, "debug", 4, debug),
];

pub fn lookup(tag: u8) -> Option<&'static TagSpec> {
    TAGS.iter().find(|spec| spec.tag == tag)
}

/// Firmware generation of the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElsysFirmware {
    /// Decodes every tag in [`TAGS`].
    #[default]
    Current,
    /// Knows the debug tag (0x3D) but cannot decode it.
    Legacy,
}

/// What a firmware can do with a tag.
#[derive(Debug, Clone, Copy)]
pub enum TagSupport {
    Implemented(&'static TagSpec),
    Unsupported(&'static TagSpec),
    Unknown,
}

impl ElsysFirmware {
    pub fn support(self, tag: u8) -> TagSupport {
        let Some(spec) = lookup(tag) else {
            return TagSupport::Unknown;
        };
        match (self, tag) {
            (ElsysFirmware::Legacy, ELSYS_DEBUG) => TagSupport::Unsupported(spec),
            _ => TagSupport::Implemented(spec),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ElsysDecoder;

impl PayloadDecoder for ElsysDecoder {
    fn decoder_type(&self) -> &'static str {
        "elsys"
    }

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<Record, DecodeError> {
        let firmware = ctx.options.elsys_firmware;
        let mut out = Occurrences::default();

        // A tag needs at least one whole byte.
        while ctx.reader.remaining_bits() > 7 {
            let tag = ctx.reader.read_u8()?;
            match firmware.support(tag) {
                TagSupport::Implemented(spec) => {
                    trace!("tag 0x{tag:02X} {}", spec.name);
                    (spec.decode)(ctx, &mut out)?;
                }
                TagSupport::Unsupported(spec) => {
                    ctx.report(DecodeIssue::Unsupported {
                        name: spec.name,
                        discriminator: tag,
                    });
                    ctx.reader.skip_bytes(spec.width)?;
                }
                TagSupport::Unknown => {
                    ctx.report(DecodeIssue::UnknownTag(tag));
                    break;
                }
            }
        }

        Ok(out.into_record(ctx.fields))
    }
}

fn tenths(raw: i16) -> f64 {
    f64::from(raw) / 10.0
}

fn absolute_count(ctx: &mut DecodeContext<'_>) -> Result<Value, DecodeError> {
    Ok(match ctx.options.counter_signedness {
        CounterSignedness::Unsigned => ctx.reader.read_u32_be()?.into(),
        CounterSignedness::Signed => ctx.reader.read_i32_be()?.into(),
    })
}

fn temperature(ctx: &mut DecodeContext<'_>, out: &mut Occurrences) -> Result<(), DecodeError> {
    out.push("temperature", tenths(ctx.reader.read_i16_be()?), Unit::DegreeCelsius);
    Ok(())
}

fn humidity(ctx: &mut DecodeContext<'_>, out: &mut Occurrences) -> Result<(), DecodeError> {
    out.push("humidity", ctx.reader.read_u8()?, Unit::Percent);
    Ok(())
}

fn acceleration(ctx: &mut DecodeContext<'_>, out: &mut Occurrences) -> Result<(), DecodeError> {
    for axis in ["x", "y", "z"] {
        out.push(axis, ctx.reader.read_i8()?, Unit::OneSixtyThirdG);
    }
    Ok(())
}

fn light(ctx: &mut DecodeContext<'_>, out: &mut Occurrences) -> Result<(), DecodeError> {
    out.push("light", ctx.reader.read_u16_be()?, Unit::Lux);
    Ok(())
}

fn motion(ctx: &mut DecodeContext<'_>, out: &mut Occurrences) -> Result<(), DecodeError> {
    out.push("motion", ctx.reader.read_u8()?, Unit::Unknown);
    Ok(())
}

fn co2(ctx: &mut DecodeContext<'_>, out: &mut Occurrences) -> Result<(), DecodeError> {
    out.push("co2", ctx.reader.read_u16_be()?, Unit::PartsPerMillion);
    Ok(())
}

fn vdd(ctx: &mut DecodeContext<'_>, out: &mut Occurrences) -> Result<(), DecodeError> {
    out.push("vdd", ctx.reader.read_u16_be()?, Unit::Millivolt);
    Ok(())
}

fn analog1(ctx: &mut DecodeContext<'_>, out: &mut Occurrences) -> Result<(), DecodeError> {
    out.push("analog1", ctx.reader.read_u16_be()?, Unit::Millivolt);
    Ok(())
}

// Little-endian, unlike every other Elsys field.
fn gps(ctx: &mut DecodeContext<'_>, out: &mut Occurrences) -> Result<(), DecodeError> {
    out.push("lat", f64::from(ctx.reader.read_i24()?) / 10000.0, Unit::Unknown);
    out.push("long", f64::from(ctx.reader.read_i24()?) / 10000.0, Unit::Unknown);
    Ok(())
}

fn pulse1(ctx: &mut DecodeContext<'_>, out: &mut Occurrences) -> Result<(), DecodeError> {
    out.push("pulse1", ctx.reader.read_u16_be()?, Unit::RelativeCount);
    Ok(())
}

fn pulse_abs(ctx: &mut DecodeContext<'_>, out: &mut Occurrences) -> Result<(), DecodeError> {
    let count = absolute_count(ctx)?;
    out.push("pulseAbs", count, Unit::Count);
    Ok(())
}

fn external_temperature(
    ctx: &mut DecodeContext<'_>,
    out: &mut Occurrences,
) -> Result<(), DecodeError> {
    out.push("externalTemperature", tenths(ctx.reader.read_i16_be()?), Unit::DegreeCelsius);
    Ok(())
}

// Bit 0 only; the next tag read realigns past the rest of the byte.
fn digital(ctx: &mut DecodeContext<'_>, out: &mut Occurrences) -> Result<(), DecodeError> {
    out.push("digital", ctx.reader.read_bit()?, Unit::Boolean);
    Ok(())
}

fn distance(ctx: &mut DecodeContext<'_>, out: &mut Occurrences) -> Result<(), DecodeError> {
    out.push("distance", ctx.reader.read_u16_be()?, Unit::Millimeter);
    Ok(())
}

fn acc_motion(ctx: &mut DecodeContext<'_>, out: &mut Occurrences) -> Result<(), DecodeError> {
    out.push("accMotion", ctx.reader.read_u8()?, Unit::Unknown);
    Ok(())
}

fn ir_temperature(ctx: &mut DecodeContext<'_>, out: &mut Occurrences) -> Result<(), DecodeError> {
    out.push("irInternalTemperature", tenths(ctx.reader.read_i16_be()?), Unit::DegreeCelsius);
    out.push("irExternalTemperature", tenths(ctx.reader.read_i16_be()?), Unit::DegreeCelsius);
    Ok(())
}

fn occupancy(ctx: &mut DecodeContext<'_>, out: &mut Occurrences) -> Result<(), DecodeError> {
    out.push("occupancy", ctx.reader.read_u8()?, Unit::Unknown);
    Ok(())
}

fn waterleak(ctx: &mut DecodeContext<'_>, out: &mut Occurrences) -> Result<(), DecodeError> {
    out.push("waterleak", ctx.reader.read_u8()?, Unit::Unknown);
    Ok(())
}

fn grideye(ctx: &mut DecodeContext<'_>, out: &mut Occurrences) -> Result<(), DecodeError> {
    let reference = f64::from(ctx.reader.read_u8()?);
    let mut pixels = Vec::with_capacity(ELSYS_GRIDEYE_PIXELS);
    for _ in 0..ELSYS_GRIDEYE_PIXELS {
        pixels.push(reference + f64::from(ctx.reader.read_u8()?) / 10.0);
    }
    out.push("grideye", pixels, Unit::DegreeCelsius);
    Ok(())
}

// Signed so that a 0xFFFFFFFF error reading shows up as -0.001.
fn pressure(ctx: &mut DecodeContext<'_>, out: &mut Occurrences) -> Result<(), DecodeError> {
    out.push("pressure", f64::from(ctx.reader.read_i32_be()?) / 1000.0, Unit::HectoPascal);
    Ok(())
}

fn sound(ctx: &mut DecodeContext<'_>, out: &mut Occurrences) -> Result<(), DecodeError> {
    out.push("soundPeak", ctx.reader.read_u8()?, Unit::Unknown);
    out.push("soundAvg", ctx.reader.read_u8()?, Unit::Unknown);
    Ok(())
}

fn pulse2(ctx: &mut DecodeContext<'_>, out: &mut Occurrences) -> Result<(), DecodeError> {
    out.push("pulse2", ctx.reader.read_u16_be()?, Unit::RelativeCount);
    Ok(())
}

fn pulse_abs2(ctx: &mut DecodeContext<'_>, out: &mut Occurrences) -> Result<(), DecodeError> {
    let count = absolute_count(ctx)?;
    out.push("pulseAbs2", count, Unit::Count);
    Ok(())
}

fn analog2(ctx: &mut DecodeContext<'_>, out: &mut Occurrences) -> Result<(), DecodeError> {
    out.push("analog2", ctx.reader.read_u16_be()?, Unit::Millivolt);
    Ok(())
}

fn external_temperature2(
    ctx: &mut DecodeContext<'_>,
    out: &mut Occurrences,
) -> Result<(), DecodeError> {
    out.push("externalTemperature2", tenths(ctx.reader.read_i16_be()?), Unit::DegreeCelsius);
    Ok(())
}

fn digital2(ctx: &mut DecodeContext<'_>, out: &mut Occurrences) -> Result<(), DecodeError> {
    out.push("digital2", ctx.reader.read_bit()?, Unit::Boolean);
    Ok(())
}

fn analog_uv(ctx: &mut DecodeContext<'_>, out: &mut Occurrences) -> Result<(), DecodeError> {
    out.push("analogUV", ctx.reader.read_i32_be()?, Unit::Microvolt);
    Ok(())
}

fn tvoc(ctx: &mut DecodeContext<'_>, out: &mut Occurrences) -> Result<(), DecodeError> {
    out.push("tvoc", ctx.reader.read_u16_be()?, Unit::PartsPerBillion);
    Ok(())
}

fn debug(ctx: &mut DecodeContext<'_>, out: &mut Occurrences) -> Result<(), DecodeError> {
    out.push("debug", ctx.reader.read_u32_be()?, Unit::Unknown);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DecodeOptions;

    fn decode(bytes: &[u8], options: DecodeOptions) -> (Record, Vec<DecodeIssue>) {
        let mut ctx = DecodeContext::new(bytes, options);
        let record = ElsysDecoder.decode(&mut ctx).unwrap();
        (record, ctx.issues().to_vec())
    }

    #[test]
    fn test_table_is_sorted_and_unique() {
        assert!(TAGS.windows(2).all(|pair| pair[0].tag < pair[1].tag));
    }

    #[test]
    fn test_table_widths_match_decoders() {
        // Every decoder must consume exactly its declared width.
        for spec in TAGS.iter() {
            let bytes = vec![0u8; spec.width];
            let mut ctx = DecodeContext::new(&bytes, DecodeOptions::default());
            let mut out = Occurrences::default();
            (spec.decode)(&mut ctx, &mut out).unwrap();
            ctx.reader.align();
            assert_eq!(ctx.reader.remaining_bits(), 0, "tag 0x{:02X}", spec.tag);
        }
    }

    #[test]
    fn test_temperature_and_humidity() {
        let (record, issues) = decode(&[0x01, 0x00, 0xEB, 0x02, 0x32], DecodeOptions::compact());
        assert!(issues.is_empty());
        assert_eq!(record.get("temperature"), Some(&Value::Text("23.5 °C".into())));
        assert_eq!(record.get("humidity"), Some(&Value::Text("50 %".into())));
    }

    #[test]
    fn test_negative_temperature() {
        let (record, _) = decode(&[0x01, 0xFF, 0x9C], DecodeOptions::default());
        assert_eq!(
            record.get_path(&["temperature", "value"]),
            Some(&Value::Float(-10.0))
        );
    }

    #[test]
    fn test_gps_little_endian() {
        // 0x0B71B0 = 750000 -> 75.0, 0xFFFFFF = -1 -> -0.0001
        let (record, _) = decode(
            &[0x09, 0xB0, 0x71, 0x0B, 0xFF, 0xFF, 0xFF],
            DecodeOptions::default(),
        );
        assert_eq!(record.get_path(&["lat", "value"]), Some(&Value::Float(75.0)));
        assert_eq!(record.get_path(&["long", "value"]), Some(&Value::Float(-0.0001)));
    }

    #[test]
    fn test_digital_then_next_tag() {
        let (record, issues) = decode(&[0x0D, 0x03, 0x05, 0x07], DecodeOptions::compact());
        assert!(issues.is_empty());
        assert_eq!(record.get("digital"), Some(&Value::Text("true bool".into())));
        assert_eq!(record.get("motion"), Some(&Value::Text("7 ??".into())));
    }

    #[test]
    fn test_legacy_skips_debug() {
        let options = DecodeOptions::default().with_elsys_firmware(ElsysFirmware::Legacy);
        let (record, issues) = decode(
            &[0x3D, 0xDE, 0xAD, 0xBE, 0xEF, 0x05, 0x01],
            options,
        );
        assert_eq!(
            issues,
            vec![DecodeIssue::Unsupported {
                name: "debug",
                discriminator: 0x3D
            }]
        );
        assert!(!record.contains_key("debug"));
        assert_eq!(record.get_path(&["motion", "value"]), Some(&Value::UInt(1)));
    }

    #[test]
    fn test_truncated_field_is_fatal() {
        let mut ctx = DecodeContext::new(&[0x01, 0x00], DecodeOptions::default());
        let err = ElsysDecoder.decode(&mut ctx).unwrap_err();
        assert!(err.is_insufficient_data());
    }
}
