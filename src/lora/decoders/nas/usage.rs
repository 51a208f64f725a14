//! Usage packet (fPort 25): one consumption entry per DALI address.

use bitflags::bitflags;

use crate::constants::DALI_ADDRESS_SPECIAL;
use crate::error::DecodeError;
use crate::lora::decoder::{DecodeContext, PayloadDecoder};
use crate::lora::decoders::nas::helpers::dali_address;
use crate::payload::unit::Unit;
use crate::payload::value::{Record, Value};

bitflags! {
    /// Which measurements follow the address byte, in wire order.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ConsumptionFields: u8 {
        const ACTIVE_ENERGY_TOTAL = 1 << 0;
        const ACTIVE_ENERGY_INSTANT = 1 << 1;
        const LOAD_SIDE_ENERGY_TOTAL = 1 << 2;
        const LOAD_SIDE_ENERGY_INSTANT = 1 << 3;
        const POWER_FACTOR_INSTANT = 1 << 4;
        const MAINS_VOLTAGE = 1 << 5;
        const DRIVER_OPERATING_TIME = 1 << 6;
        const LAMP_ON_TIME = 1 << 7;
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UsageDecoder;

impl PayloadDecoder for UsageDecoder {
    fn decoder_type(&self) -> &'static str {
        "nas_usage"
    }

    fn decode(&self, ctx: &mut DecodeContext<'_>) -> Result<Record, DecodeError> {
        let mut packet = Record::new();
        packet.insert("packet_type", ctx.fields.value("usage_packet"));

        let mut consumption = Vec::new();
        while !ctx.reader.is_empty() {
            consumption.push(Value::Map(decode_consumption(ctx)?));
        }
        packet.insert("consumption", consumption);
        Ok(packet)
    }
}

fn decode_consumption(ctx: &mut DecodeContext<'_>) -> Result<Record, DecodeError> {
    let fields = ctx.fields;
    let mut entry = Record::new();

    let address = ctx.reader.read_u8()?;
    let dali = dali_address(ctx, address, Some("internal_measurement"));
    entry.insert("dali_address_short", fields.value_raw(dali, address));

    let present = ConsumptionFields::from_bits_retain(ctx.reader.read_u8()?);
    let r = &mut ctx.reader;

    if present.contains(ConsumptionFields::ACTIVE_ENERGY_TOTAL) {
        entry.insert("active_energy_total", fields.value_unit(r.read_u32()?, Unit::WattHour));
    }
    if present.contains(ConsumptionFields::ACTIVE_ENERGY_INSTANT) {
        entry.insert("active_energy_instant", fields.value_unit(r.read_u16()?, Unit::Watt));
    }
    if present.contains(ConsumptionFields::LOAD_SIDE_ENERGY_TOTAL) {
        entry.insert("load_side_energy_total", fields.value_unit(r.read_u32()?, Unit::WattHour));
    }
    if present.contains(ConsumptionFields::LOAD_SIDE_ENERGY_INSTANT) {
        entry.insert("load_side_energy_instant", fields.value_unit(r.read_u16()?, Unit::Watt));
    }
    if present.contains(ConsumptionFields::POWER_FACTOR_INSTANT) {
        let factor = f64::from(r.read_u8()?) / 100.0;
        entry.insert("power_factor_instant", fields.value(factor));
    }
    if present.contains(ConsumptionFields::MAINS_VOLTAGE) {
        entry.insert("mains_voltage", fields.value_unit(r.read_u8()?, Unit::Volt));
    }
    if present.contains(ConsumptionFields::DRIVER_OPERATING_TIME) {
        entry.insert("driver_operating_time", fields.value_unit(r.read_u32()?, Unit::Second));
    }
    if present.contains(ConsumptionFields::LAMP_ON_TIME) {
        // The controller's own meter counts hours, drivers count seconds.
        let unit = if address == DALI_ADDRESS_SPECIAL {
            Unit::Hour
        } else {
            Unit::Second
        };
        entry.insert("lamp_on_time", fields.value_unit(r.read_u32()?, unit));
    }

    Ok(entry)
}
