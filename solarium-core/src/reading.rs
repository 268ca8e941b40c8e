//! Sensor readings and telemetry payloads
//!
//! Readings are fixed-point ×10 values. A fresh, fully-constructed
//! `SensorReading` is published on every successful poll; consumers keep
//! the previous one when a poll fails.

use core::fmt::Write as _;

use heapless::String;
use serde::{Deserialize, Serialize};

use crate::traits::RawSample;

/// Capacity of the formatted status line
pub const STATUS_LEN: usize = 32;

/// One environment reading, ready for display and telemetry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorReading {
    /// Temperature in 0.1 °F units
    pub temp_f_x10: i16,
    /// Relative humidity in 0.1 % units
    pub rh_x10: u16,
    /// Seconds since boot when the sample was taken
    pub timestamp_s: u64,
}

impl SensorReading {
    /// Convert a raw Celsius sample into a reading
    pub fn from_sample(sample: RawSample, timestamp_s: u64) -> Self {
        Self {
            temp_f_x10: celsius_to_fahrenheit_x10(sample.temp_c_x10),
            rh_x10: sample.rh_x10,
            timestamp_s,
        }
    }

    /// Temperature rounded to whole degrees Fahrenheit
    pub fn temp_f_rounded(&self) -> i16 {
        round_x10_i(self.temp_f_x10)
    }

    /// Humidity rounded to whole percent
    pub fn rh_rounded(&self) -> u16 {
        ((self.rh_x10 + 5) / 10) as u16
    }

    /// Status line for the scrolling readout, e.g. `72°F, 45%`
    pub fn status_text(&self) -> String<STATUS_LEN> {
        let mut text = String::new();
        let _ = write!(text, "{}°F, {}%", self.temp_f_rounded(), self.rh_rounded());
        text
    }
}

/// Convert 0.1 °C fixed point to 0.1 °F fixed point
pub fn celsius_to_fahrenheit_x10(temp_c_x10: i16) -> i16 {
    ((temp_c_x10 as i32 * 9) / 5 + 320) as i16
}

fn round_x10_i(value_x10: i16) -> i16 {
    if value_x10 >= 0 {
        (value_x10 + 5) / 10
    } else {
        (value_x10 - 5) / 10
    }
}

/// Outbound telemetry payload: `{"ts":…,"d":…,"h":…}`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    /// Timestamp of the reading (seconds)
    pub ts: u64,
    /// Temperature in °F
    pub d: f32,
    /// Relative humidity in %
    pub h: f32,
}

impl TelemetryRecord {
    /// Build the payload for a reading
    pub fn from_reading(reading: &SensorReading) -> Self {
        Self {
            ts: reading.timestamp_s,
            d: reading.temp_f_x10 as f32 / 10.0,
            h: reading.rh_x10 as f32 / 10.0,
        }
    }

    /// Serialize to the JSON wire form
    pub fn to_json(&self) -> Result<String<96>, serde_json_core::ser::Error> {
        serde_json_core::ser::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn celsius_conversion() {
        assert_eq!(celsius_to_fahrenheit_x10(0), 320); // 0 °C = 32.0 °F
        assert_eq!(celsius_to_fahrenheit_x10(1000), 2120); // 100 °C = 212.0 °F
        assert_eq!(celsius_to_fahrenheit_x10(255), 779); // 25.5 °C = 77.9 °F
        assert_eq!(celsius_to_fahrenheit_x10(-100), 140); // -10 °C = 14.0 °F
    }

    #[test]
    fn status_text_rounds_to_whole_units() {
        let reading = SensorReading {
            temp_f_x10: 779,
            rh_x10: 454,
            timestamp_s: 0,
        };
        assert_eq!(reading.status_text().as_str(), "78°F, 45%");
    }

    #[test]
    fn telemetry_roundtrip() {
        let reading = SensorReading {
            temp_f_x10: 725,
            rh_x10: 461,
            timestamp_s: 1234,
        };
        let record = TelemetryRecord::from_reading(&reading);
        let json = record.to_json().unwrap();
        assert!(json.starts_with(r#"{"ts":1234"#));

        let (back, _) = serde_json_core::de::from_str::<TelemetryRecord>(&json).unwrap();
        assert_eq!(back.ts, 1234);
        assert!((back.d - 72.5).abs() < 0.01);
        assert!((back.h - 46.1).abs() < 0.01);
    }
}
