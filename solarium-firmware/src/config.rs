//! Compile-time configuration
//!
//! Network credentials are injected through environment variables at build
//! time so they never land in the repository. Everything else is a plain
//! constant; edit and reflash to change.

use core::net::Ipv4Addr;

use embedded_graphics::mono_font::iso_8859_1::{FONT_10X20, FONT_9X15_BOLD};
use profont::PROFONT_18_POINT;

use solarium_core::alarm::Thresholds;
use solarium_core::style::StyleRegistry;
use solarium_display::MonoGlyphs;

/// Wi-Fi credentials, e.g. `WIFI_SSID=shed WIFI_PASSWORD=… cargo build …`
pub const WIFI_SSID: &str = match option_env!("WIFI_SSID") {
    Some(ssid) => ssid,
    None => "greenhouse",
};
pub const WIFI_PASSWORD: &str = match option_env!("WIFI_PASSWORD") {
    Some(password) => password,
    None => "",
};

/// MQTT broker on the local network
pub const BROKER_ADDR: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 10);
pub const BROKER_PORT: u16 = 1883;
pub const MQTT_CLIENT_ID: &str = "solarium-greenhouse";

/// Telemetry is published here
pub const TOPIC_STATS: &str = "Greenhouse/Stats";
/// Commands arrive here
pub const TOPIC_CMDS: &str = "Greenhouse/Cmds";

/// Sensor poll cadence; the DHT22 needs at least 2s between conversions
pub const SENSOR_POLL_SECS: u64 = 5;

/// Scroll frame cadence (20 fps, one pixel per frame)
pub const FRAME_INTERVAL_MS: u64 = 50;

/// Reconnect pacing after a lost broker session
pub const RECONNECT_DELAY_SECS: u64 = 5;

/// Temperature alarm band
pub const ALARM_THRESHOLDS: Thresholds = Thresholds {
    min_f_x10: 400,
    max_f_x10: 1000,
};

/// Message scrolled until the first remote command arrives
pub const GREETING: &str = "Welcome to the greenhouse";

// Style table. "message" is the default; unknown font names in commands
// fall back to it.
static STYLE_ENTRIES: &[(&str, MonoGlyphs)] = &[
    ("message", MonoGlyphs::new(&FONT_10X20)),
    ("status", MonoGlyphs::new(&PROFONT_18_POINT)),
    ("butterfly", MonoGlyphs::new(&FONT_9X15_BOLD)),
];

static STYLES: StyleRegistry<'static, MonoGlyphs> = StyleRegistry::new(STYLE_ENTRIES, 0);

/// The shared style registry
pub fn styles() -> &'static StyleRegistry<'static, MonoGlyphs> {
    &STYLES
}
