//! Solarium - Greenhouse Monitor Firmware
//!
//! Main firmware binary for the Raspberry Pi Pico W greenhouse monitor:
//! polls a DHT22, scrolls readings and remote messages on an SSD1306
//! OLED, and talks MQTT over the on-board Wi-Fi chip.
//!
//! Named after the Latin "solarium" (sun room) - a glassed-in space that
//! traps warmth for whatever grows inside, which is also exactly the
//! thing this firmware keeps an eye on.

#![no_std]
#![no_main]

use cyw43_pio::{PioSpi, DEFAULT_CLOCK_DIVIDER};
use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_net::StackResources;
use embassy_rp::bind_interrupts;
use embassy_rp::clocks::RoscRng;
use embassy_rp::gpio::{Flex, Input, Level, Output, Pull};
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{InterruptHandler as PioInterruptHandler, Pio};
use embassy_rp::spi::{Config as SpiConfig, Spi};
use rand_core::RngCore;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

mod channels;
mod config;
mod display;
mod drivers;
mod net;
mod periodic;
mod tasks;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
});

// Wi-Fi chip firmware blobs; see cyw43-firmware/README.md.
const WIFI_FW: &[u8] = include_bytes!("../cyw43-firmware/43439A0.bin");
const WIFI_CLM: &[u8] = include_bytes!("../cyw43-firmware/43439A0_clm.bin");

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Solarium firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // --- OLED on SPI0 ---
    let mut spi_config = SpiConfig::default();
    spi_config.frequency = 8_000_000;
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_2, p.PIN_3, spi_config);
    let cs = Output::new(p.PIN_5, Level::High);
    let dc = Output::new(p.PIN_6, Level::Low);
    let rst = Output::new(p.PIN_7, Level::High);
    let oled = display::init(spi, cs, dc, rst).await;

    // --- DHT22 on a single data line ---
    let sensor = drivers::dht22::Dht22::new(Flex::new(p.PIN_22));

    // --- Buttons ---
    let green = Input::new(p.PIN_16, Pull::Down);
    let black = Input::new(p.PIN_17, Pull::Down);

    // --- Wi-Fi chip (fixed pins on the Pico W) ---
    let pwr = Output::new(p.PIN_23, Level::Low);
    let wifi_cs = Output::new(p.PIN_25, Level::High);
    let mut pio = Pio::new(p.PIO0, Irqs);
    let wifi_spi = PioSpi::new(
        &mut pio.common,
        pio.sm0,
        DEFAULT_CLOCK_DIVIDER,
        pio.irq0,
        wifi_cs,
        p.PIN_24,
        p.PIN_29,
        p.DMA_CH0,
    );

    static STATE: StaticCell<cyw43::State> = StaticCell::new();
    let state = STATE.init(cyw43::State::new());
    let (net_device, mut control, runner) = cyw43::new(state, pwr, wifi_spi, WIFI_FW).await;
    unwrap!(spawner.spawn(net::wifi_task(runner)));

    control.init(WIFI_CLM).await;
    control
        .set_power_management(cyw43::PowerManagementMode::PowerSave)
        .await;

    // --- Network stack (DHCP) ---
    let net_config = embassy_net::Config::dhcpv4(Default::default());
    let seed = RoscRng.next_u64();
    static RESOURCES: StaticCell<StackResources<4>> = StaticCell::new();
    let (stack, net_runner) =
        embassy_net::new(net_device, net_config, RESOURCES.init(StackResources::new()), seed);
    unwrap!(spawner.spawn(net::net_task(net_runner)));

    net::join_wifi(&mut control).await;

    // --- Application tasks ---
    unwrap!(spawner.spawn(tasks::render_task(oled)));
    unwrap!(spawner.spawn(tasks::sensor_task(sensor)));
    unwrap!(spawner.spawn(tasks::command_task()));
    unwrap!(spawner.spawn(tasks::buttons_task(green, black)));
    unwrap!(spawner.spawn(net::mqtt_task(stack)));

    info!("All tasks started");
}
