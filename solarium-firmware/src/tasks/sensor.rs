//! Sensor polling task
//!
//! Polls the DHT22 on the periodic runner. Every good sample becomes a
//! fresh reading published to the render task and a telemetry record
//! queued for the broker. Failed polls are logged and skipped; consumers
//! keep showing the previous reading.

use defmt::{debug, warn};
use embassy_time::{Duration, Instant};

use solarium_core::alarm::ThresholdMonitor;
use solarium_core::reading::{SensorReading, TelemetryRecord};
use solarium_core::traits::{EnvironmentSensor, SensorError};

use crate::channels::{READING, TELEMETRY};
use crate::config;
use crate::drivers::dht22::Dht22;
use crate::periodic::{run_periodic, PeriodicTask, ShutdownToken};

/// Shutdown handshake for the poll runner; `request` stops polling after
/// any in-flight read completes, `wait` blocks until it has
pub static SHUTDOWN: ShutdownToken = ShutdownToken::new();

struct SensorPoll<S> {
    sensor: S,
    monitor: ThresholdMonitor,
}

impl<S: EnvironmentSensor> SensorPoll<S> {
    fn new(sensor: S) -> Self {
        Self {
            sensor,
            monitor: ThresholdMonitor::new(config::ALARM_THRESHOLDS),
        }
    }
}

impl<S: EnvironmentSensor> PeriodicTask for SensorPoll<S> {
    const NAME: &'static str = "sensor-poll";
    type Error = SensorError;

    async fn tick(&mut self) -> Result<(), SensorError> {
        let sample = self.sensor.sample()?;

        // The sensor reports all-zero before its first real conversion.
        // Checked raw: 0 °C would convert to a plausible 32 °F.
        if sample.is_zero() {
            debug!("zero sample, skipping");
            return Ok(());
        }

        let reading = SensorReading::from_sample(sample, Instant::now().as_secs());

        if let Some(event) = self.monitor.update(&reading) {
            warn!(
                "temperature alarm: {} at {}.{} °F",
                event.state,
                event.temp_f_x10 / 10,
                (event.temp_f_x10 % 10).unsigned_abs()
            );
        }

        READING.signal(reading);
        if TELEMETRY
            .try_send(TelemetryRecord::from_reading(&reading))
            .is_err()
        {
            warn!("telemetry queue full, dropping record");
        }
        Ok(())
    }
}

#[embassy_executor::task]
pub async fn sensor_task(sensor: Dht22<'static>) {
    run_periodic(
        Duration::from_secs(config::SENSOR_POLL_SECS),
        &SHUTDOWN,
        SensorPoll::new(sensor),
    )
    .await;
}
