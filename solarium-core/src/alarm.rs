//! Temperature alarm thresholds
//!
//! Watches readings against a configured band and reports each transition
//! exactly once, so the alarm output (or log line) does not retrigger on
//! every poll while the condition persists.

use crate::reading::SensorReading;

/// Default alarm band in 0.1 °F units (40.0 °F – 100.0 °F)
pub const DEFAULT_MIN_F_X10: i16 = 400;
pub const DEFAULT_MAX_F_X10: i16 = 1000;

/// Temperature band considered safe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Thresholds {
    /// Lower bound in 0.1 °F units
    pub min_f_x10: i16,
    /// Upper bound in 0.1 °F units
    pub max_f_x10: i16,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_f_x10: DEFAULT_MIN_F_X10,
            max_f_x10: DEFAULT_MAX_F_X10,
        }
    }
}

/// Alarm condition derived from a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmState {
    /// Temperature within the band
    Normal,
    /// Below the lower bound
    TooCold,
    /// Above the upper bound
    TooHot,
}

/// A reported transition between alarm states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmEvent {
    /// The state entered
    pub state: AlarmState,
    /// Temperature that triggered the transition, 0.1 °F units
    pub temp_f_x10: i16,
}

/// Threshold monitor with transition de-duplication
#[derive(Debug, Clone)]
pub struct ThresholdMonitor {
    thresholds: Thresholds,
    current: AlarmState,
}

impl ThresholdMonitor {
    /// Create a monitor starting in the normal state
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            current: AlarmState::Normal,
        }
    }

    /// Current alarm state
    pub fn state(&self) -> AlarmState {
        self.current
    }

    /// Evaluate a reading; returns an event only on a state change
    pub fn update(&mut self, reading: &SensorReading) -> Option<AlarmEvent> {
        let next = if reading.temp_f_x10 < self.thresholds.min_f_x10 {
            AlarmState::TooCold
        } else if reading.temp_f_x10 > self.thresholds.max_f_x10 {
            AlarmState::TooHot
        } else {
            AlarmState::Normal
        };

        if next == self.current {
            return None;
        }
        self.current = next;
        Some(AlarmEvent {
            state: next,
            temp_f_x10: reading.temp_f_x10,
        })
    }
}

impl Default for ThresholdMonitor {
    fn default() -> Self {
        Self::new(Thresholds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(temp_f_x10: i16) -> SensorReading {
        SensorReading {
            temp_f_x10,
            rh_x10: 500,
            timestamp_s: 0,
        }
    }

    #[test]
    fn transitions_fire_once() {
        let mut monitor = ThresholdMonitor::default();

        assert_eq!(monitor.update(&reading(720)), None);

        let event = monitor.update(&reading(1050)).unwrap();
        assert_eq!(event.state, AlarmState::TooHot);

        // Still hot: no repeat event.
        assert_eq!(monitor.update(&reading(1100)), None);

        let event = monitor.update(&reading(800)).unwrap();
        assert_eq!(event.state, AlarmState::Normal);
    }

    #[test]
    fn cold_side_of_the_band() {
        let mut monitor = ThresholdMonitor::default();
        let event = monitor.update(&reading(350)).unwrap();
        assert_eq!(event.state, AlarmState::TooCold);
        assert_eq!(monitor.state(), AlarmState::TooCold);
    }

    #[test]
    fn bounds_are_inclusive() {
        let mut monitor = ThresholdMonitor::default();
        assert_eq!(monitor.update(&reading(400)), None);
        assert_eq!(monitor.update(&reading(1000)), None);
        assert_eq!(monitor.state(), AlarmState::Normal);
    }
}
