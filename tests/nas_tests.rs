//! Tests for the NAS street-light controller decoders.

use lora_payload_rs::payload::IssueKind;
use lora_payload_rs::{
    decode_hex_payload, DecodeIssue, DecodeOptions, DecodeResult, DeviceModel, Value,
};

fn nas(hex: &str, port: u8, options: DecodeOptions) -> DecodeResult {
    decode_hex_payload(hex, DeviceModel::Nas, port, options).unwrap()
}

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

#[test]
fn test_boot_packet() {
    let hex = concat!(
        "00",       // header
        "78563412", // serial
        "010203",   // firmware 1.2.3
        "00000000", // epoch
        "09",       // invalid device config
        "0A",       // thr, ldr
        "8C",       // 12 V, external supply
        "83",       // 3 drivers, unaddressed found
        "02",       // watchdog reset
    );
    let result = nas(hex, 99, DecodeOptions::default());
    let data = &result.data;

    assert_eq!(data.get_path(&["packet_type", "value"]), Some(&text("boot_packet")));
    assert_eq!(data.get_path(&["device_serial", "value"]), Some(&text("12345678")));
    assert_eq!(data.get_path(&["firmware_version", "value"]), Some(&text("1.2.3")));
    assert_eq!(data.get_path(&["firmware_version", "raw"]), Some(&text("66051")));
    assert_eq!(
        data.get_path(&["device_unix_epoch", "value"]),
        Some(&text("1970-01-01T00:00:00Z"))
    );
    assert_eq!(data.get_path(&["device_config", "value"]), Some(&text("invalid")));
    assert_eq!(
        data.get_path(&["optional_features", "value"]),
        Some(&Value::List(vec!["thr".into(), "ldr".into()]))
    );
    assert_eq!(data.get_path(&["dali_supply_state", "value"]), Some(&Value::UInt(12)));
    assert_eq!(data.get_path(&["dali_supply_state", "unit"]), Some(&text("V")));
    assert_eq!(data.get_path(&["dali_power_source", "value"]), Some(&text("external")));
    assert_eq!(
        data.get_path(&["dali_addressed_driver_count", "value"]),
        Some(&Value::UInt(3))
    );
    assert_eq!(
        data.get_path(&["dali_unadressed_driver_found", "value"]),
        Some(&Value::Bool(true))
    );
    assert_eq!(
        data.get_path(&["reset_reason", "value"]),
        Some(&Value::List(vec!["watchdog_reset".into()]))
    );

    assert_eq!(result.errors, vec![DecodeIssue::InvalidDeviceConfig(9)]);
    assert_eq!(result.errors[0].kind(), IssueKind::Semantic);
}

#[test]
fn test_boot_packet_without_reset_reason() {
    let hex = concat!("00", "78563412", "010203", "00000000", "00", "00", "7E", "00");
    let result = nas(hex, 99, DecodeOptions::compact());
    assert!(!result.data.contains_key("reset_reason"));
    assert_eq!(result.data.get("device_config"), Some(&text("dali")));
    assert_eq!(result.data.get("optional_features"), Some(&Value::List(Vec::new())));
    assert_eq!(result.data.get("dali_supply_state"), Some(&text("bus_high")));
    assert!(result.errors.is_empty());
}

#[test]
fn test_invalid_downlink_packet() {
    let result = nas("13320A", 99, DecodeOptions::compact());
    assert_eq!(result.data.get("packet_type"), Some(&text("invalid_downlink_packet")));
    assert_eq!(result.data.get("parse_error_code"), Some(&text("unsupported_header")));
    assert_eq!(result.error_messages(), vec!["Config failed: unsupported_header"]);
    assert_eq!(result.errors[0].kind(), IssueKind::Reported);
}

#[test]
fn test_legacy_status_with_profile() {
    let hex = concat!(
        "00000000", // epoch
        "01",       // dali_error_external
        "46",       // rssi
        "05",       // snr
        "14",       // temperature
        "13",       // thr and ldr sent, voltage alert
        "10",       // thr
        "20",       // ldr
        "05",       // profile id
        "02",       // profile version
        "01",       // invalid DALI address
        "03",       // holiday, mon
        "64",       // dimming 100 %
    );
    let result = nas(hex, 24, DecodeOptions::compact());
    let data = &result.data;

    assert_eq!(
        data.get_path(&["status_field", "dali_error_external"]),
        Some(&Value::Bool(true))
    );
    assert_eq!(data.get("downlink_rssi"), Some(&text("70 dBm")));
    assert_eq!(data.get("mcu_temperature"), Some(&text("20 °C")));
    assert_eq!(
        data.get_path(&["analog_interfaces", "voltage_alert_in_24h"]),
        Some(&Value::Bool(true))
    );
    assert_eq!(data.get("thr_value"), Some(&Value::UInt(0x10)));
    assert_eq!(data.get("ldr_value"), Some(&Value::UInt(0x20)));
    assert_eq!(data.get_path(&["profile", "profile_id"]), Some(&Value::UInt(5)));
    assert_eq!(data.get_path(&["profile", "profile_override"]), Some(&text("none")));
    assert_eq!(data.get_path(&["profile", "dali_address_short"]), Some(&text("invalid")));
    assert_eq!(
        data.get_path(&["profile", "days_active"]),
        Some(&Value::List(vec!["holiday".into(), "mon".into()]))
    );
    assert_eq!(data.get_path(&["profile", "dimming_level", "value"]), Some(&text("100 %")));
    assert_eq!(data.get_path(&["profile", "dimming_level", "max"]), Some(&Value::Int(100)));

    assert_eq!(result.errors, vec![DecodeIssue::InvalidDaliAddress(0x01)]);
}

#[test]
fn test_status_profile_without_active_profile() {
    let hex = concat!("00", "00000000", "00", "50", "00", "19", "00", "FF", "F6", "FE", "FE", "32");
    let result = nas(hex, 23, DecodeOptions::default());
    let profile = result.data.get("profile").unwrap();
    assert_eq!(profile.get("profile_id").and_then(|v| v.get("value")), Some(&text("no_profile")));
    assert_eq!(profile.get("profile_version").and_then(|v| v.get("value")), Some(&text("n/a")));
    assert_eq!(
        profile.get("profile_override").and_then(|v| v.get("value")),
        Some(&text("driver_not_found"))
    );
    assert_eq!(
        profile.get("dali_address_short").and_then(|v| v.get("value")),
        Some(&text("broadcast"))
    );
    assert!(result.errors.is_empty());
}

#[test]
fn test_status_bad_header() {
    let result = nas("0100000000", 23, DecodeOptions::compact());
    assert_eq!(result.data.keys().collect::<Vec<_>>(), vec!["packet_type"]);
    assert_eq!(result.error_messages(), vec!["invalid_header 0x01"]);
}

#[test]
fn test_usage_entries() {
    let hex = concat!(
        "FF", "03", "E8030000", "3200", // internal: 1000 Wh, 50 W
        "03", "20", "E6",               // invalid address, 230 V
        "84", "80", "10000000",         // group 2, lamp on 16 s
    );
    let result = nas(hex, 25, DecodeOptions::compact());
    let entries = result.data.get("consumption").and_then(Value::as_list).unwrap();
    assert_eq!(entries.len(), 3);

    assert_eq!(entries[0].get("dali_address_short"), Some(&text("internal_measurement")));
    assert_eq!(entries[0].get("active_energy_total"), Some(&text("1000 Wh")));
    assert_eq!(entries[0].get("active_energy_instant"), Some(&text("50 W")));

    assert_eq!(entries[1].get("dali_address_short"), Some(&text("invalid")));
    assert_eq!(entries[1].get("mains_voltage"), Some(&text("230 V")));

    assert_eq!(entries[2].get("dali_address_short"), Some(&text("group 2")));
    assert_eq!(entries[2].get("lamp_on_time"), Some(&text("16 s")));

    assert_eq!(result.errors, vec![DecodeIssue::InvalidDaliAddress(0x03)]);
}

#[test]
fn test_ldr_config() {
    let result = nas("01FF1404", 50, DecodeOptions::default());
    let data = &result.data;
    assert_eq!(
        data.get_path(&["packet_type", "value"]),
        Some(&text("ldr_config_packet"))
    );
    assert_eq!(data.get_path(&["switch_threshold_high", "value"]), Some(&text("disabled")));
    assert_eq!(data.get_path(&["switch_threshold_high", "raw"]), Some(&Value::UInt(255)));
    assert_eq!(data.get_path(&["switch_threshold_low", "value"]), Some(&text("20")));
    assert_eq!(data.get("switch_trigger_alert_enabled"), Some(&Value::Bool(true)));
}

#[test]
fn test_status_config() {
    let result = nas("07100E0000", 50, DecodeOptions::compact());
    assert_eq!(result.data.get("packet_type"), Some(&text("status_config_packet")));
    assert_eq!(result.data.get("status_interval"), Some(&text("3600 s")));
}

#[test]
fn test_unsupported_config_headers() {
    for (header, name) in [(0x09u8, "time_config_packet"), (0x52, "multicast_config_packet")] {
        let result = nas(&format!("{header:02X}0000"), 50, DecodeOptions::compact());
        assert_eq!(result.data.get("packet_type"), Some(&text(name)));
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].is_unsupported());
    }
}
