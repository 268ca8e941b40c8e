//! DHT22 (AM2302) single-wire driver
//!
//! Wire protocol: the host pulls the line low for >1ms and releases it;
//! the sensor answers with an 80µs low / 80µs high preamble, then 40 bits.
//! Each bit is a ~50µs low followed by a high whose length encodes the
//! value (~26µs = 0, ~70µs = 1). The fifth byte is the checksum: the low
//! byte of the sum of the first four.
//!
//! The transfer is bit-banged with busy waits, so a full frame blocks the
//! executor for about 5ms. At one poll every few seconds that is fine.

use embassy_rp::gpio::{Flex, Pull};
use embassy_time::{block_for, Duration, Instant};

use solarium_core::traits::{EnvironmentSensor, RawSample, SensorError};

/// High pulses longer than this are a 1 bit
const BIT_THRESHOLD_US: u64 = 48;

pub struct Dht22<'d> {
    pin: Flex<'d>,
}

impl<'d> Dht22<'d> {
    pub fn new(mut pin: Flex<'d>) -> Self {
        pin.set_as_input();
        pin.set_pull(Pull::Up);
        Self { pin }
    }

    /// Busy-wait until the line reaches `level`, returning the wait in µs
    fn wait_for(&mut self, level: bool, timeout_us: u64) -> Result<u64, SensorError> {
        let start = Instant::now();
        let timeout = Duration::from_micros(timeout_us);
        while self.pin.is_high() != level {
            if start.elapsed() > timeout {
                return Err(SensorError::Timeout);
            }
        }
        Ok(start.elapsed().as_micros())
    }

    fn read_frame(&mut self) -> Result<[u8; 5], SensorError> {
        // Start signal: hold the line low, then release to the pull-up.
        self.pin.set_as_output();
        self.pin.set_low();
        block_for(Duration::from_millis(2));
        self.pin.set_as_input();
        self.pin.set_pull(Pull::Up);

        // Sensor preamble.
        self.wait_for(false, 100)?;
        self.wait_for(true, 100)?;
        self.wait_for(false, 100)?;

        let mut data = [0u8; 5];
        for bit in 0..40 {
            self.wait_for(true, 80)?;
            let high_us = self.wait_for(false, 120)?;
            if high_us > BIT_THRESHOLD_US {
                data[bit / 8] |= 1 << (7 - (bit % 8));
            }
        }
        Ok(data)
    }
}

impl EnvironmentSensor for Dht22<'_> {
    fn sample(&mut self) -> Result<RawSample, SensorError> {
        let data = self.read_frame()?;

        let sum = data[0]
            .wrapping_add(data[1])
            .wrapping_add(data[2])
            .wrapping_add(data[3]);
        if sum != data[4] {
            return Err(SensorError::Checksum);
        }

        let rh_x10 = u16::from_be_bytes([data[0], data[1]]);
        let raw_temp = u16::from_be_bytes([data[2], data[3]]);
        // Sign-magnitude encoding: the top bit marks negative temperatures.
        let temp_c_x10 = if raw_temp & 0x8000 != 0 {
            -((raw_temp & 0x7fff) as i16)
        } else {
            raw_temp as i16
        };

        // Datasheet range: -40..80 °C, 0..100 %RH.
        if rh_x10 > 1000 || !(-400..=800).contains(&temp_c_x10) {
            return Err(SensorError::OutOfRange);
        }

        Ok(RawSample { temp_c_x10, rh_x10 })
    }
}
