//! Display units attached to decoded values.

use std::fmt;

/// Units used by the decoders. [`Unit::as_str`] is the single source of the
/// display strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Byte,
    Count,
    Decibel,
    DecibelMilliwatt,
    Degree,
    DegreeCelsius,
    HectoPascal,
    Hour,
    HourAndMinute,
    Lux,
    Microvolt,
    Millimeter,
    Millivolt,
    Minute,
    PartsPerBillion,
    PartsPerMillion,
    Percent,
    RelativeCount,
    Second,
    Unknown,
    Volt,
    Watt,
    WattHour,
    OneSixtyThirdG,
    Boolean,
}

impl Unit {
    pub const fn as_str(self) -> &'static str {
        match self {
            Unit::Byte => "B",
            Unit::Count => "count",
            Unit::Decibel => "dB",
            Unit::DecibelMilliwatt => "dBm",
            Unit::Degree => "°",
            Unit::DegreeCelsius => "°C",
            Unit::HectoPascal => "hPa",
            Unit::Hour => "h",
            Unit::HourAndMinute => "hh:mm",
            Unit::Lux => "lx",
            Unit::Microvolt => "uV",
            Unit::Millimeter => "mm",
            Unit::Millivolt => "mV",
            Unit::Minute => "min",
            Unit::PartsPerBillion => "ppb",
            Unit::PartsPerMillion => "ppm",
            Unit::Percent => "%",
            Unit::RelativeCount => "relative count",
            Unit::Second => "s",
            Unit::Unknown => "??",
            Unit::Volt => "V",
            Unit::Watt => "W",
            Unit::WattHour => "Wh",
            Unit::OneSixtyThirdG => "1/63G",
            Unit::Boolean => "bool",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
