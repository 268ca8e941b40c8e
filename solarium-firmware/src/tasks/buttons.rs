//! Button input task
//!
//! The green button appends a random letter glyph to the scrolling
//! message. The black button is the maintenance stop: it shuts the sensor
//! poll runner down gracefully so the probe can be unplugged without a
//! half-finished read on the wire.

use defmt::{info, warn};
use embassy_futures::select::{select, Either};
use embassy_rp::clocks::RoscRng;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Timer};
use rand_core::RngCore;

use crate::channels::GLYPHS;
use crate::tasks::sensor;

const DEBOUNCE: Duration = Duration::from_millis(300);

#[embassy_executor::task]
pub async fn buttons_task(mut green: Input<'static>, mut black: Input<'static>) {
    info!("buttons task started");
    let mut rng = RoscRng;
    let mut sensor_stopped = false;

    loop {
        match select(green.wait_for_rising_edge(), black.wait_for_rising_edge()).await {
            Either::First(()) => {
                let ch = (b'a' + (rng.next_u32() % 26) as u8) as char;
                info!("green button: appending '{}'", ch);
                if GLYPHS.try_send(ch).is_err() {
                    warn!("glyph queue full");
                }
            }
            Either::Second(()) => {
                if sensor_stopped {
                    info!("black button: sensor already stopped");
                } else {
                    info!("black button: stopping sensor polling");
                    sensor::SHUTDOWN.request();
                    sensor::SHUTDOWN.wait().await;
                    sensor_stopped = true;
                    info!("sensor polling stopped");
                }
            }
        }
        Timer::after(DEBOUNCE).await;
    }
}
