//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic and
//! hardware-specific implementations.

/// Errors that can occur reading the environment sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor did not respond in time
    Timeout,
    /// Response failed its checksum
    Checksum,
    /// Reading outside the sensor's plausible range
    OutOfRange,
    /// Bus or wiring fault
    Bus,
}

/// A raw combined temperature/humidity sample
///
/// Fixed-point values with 0.1 resolution, matching what single-wire
/// hygrometers report natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    /// Temperature in 0.1 °C units (e.g. 21.5 °C is 215)
    pub temp_c_x10: i16,
    /// Relative humidity in 0.1 % units
    pub rh_x10: u16,
}

impl RawSample {
    /// Both channels exactly zero, which the sensor reports before its
    /// first real conversion
    ///
    /// Must be checked before unit conversion: 0.0 °C converts to a
    /// legitimate-looking 32.0 °F.
    pub fn is_zero(&self) -> bool {
        self.temp_c_x10 == 0 && self.rh_x10 == 0
    }
}

/// Trait for combined temperature/humidity sensors
///
/// Reads may fail transiently; callers retain the last known reading,
/// log, and continue.
pub trait EnvironmentSensor {
    /// Take one sample from the sensor
    ///
    /// Takes `&mut self` because single-wire reads drive the bus.
    fn sample(&mut self) -> Result<RawSample, SensorError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::{celsius_to_fahrenheit_x10, SensorReading};

    #[test]
    fn zero_sample_is_detected_before_conversion() {
        let zero = RawSample {
            temp_c_x10: 0,
            rh_x10: 0,
        };
        assert!(zero.is_zero());

        // 0.0 °C converts to 32.0 °F, so a converted reading no longer
        // looks zero; the skip has to happen on the raw sample.
        assert_eq!(celsius_to_fahrenheit_x10(0), 320);
        let converted = SensorReading::from_sample(zero, 7);
        assert_eq!(converted.temp_f_x10, 320);

        let real = RawSample {
            temp_c_x10: 215,
            rh_x10: 500,
        };
        assert!(!real.is_zero());
    }
}
