//! SSD1306 OLED bring-up (SPI, 128x64)

use defmt::Debug2Format;
use display_interface_spi::SPIInterface;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::{Delay, Duration, Timer};
use embedded_hal_bus::spi::ExclusiveDevice;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::Ssd1306;

/// Panel dimensions in pixels
pub const WIDTH: u16 = 128;
pub const HEIGHT: u16 = 64;

type OledInterface =
    SPIInterface<ExclusiveDevice<Spi<'static, SPI0, Blocking>, Output<'static>, Delay>, Output<'static>>;

/// The concrete panel type handed to the render task
pub type Oled = Ssd1306<OledInterface, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Reset and initialize the panel
pub async fn init(
    spi: Spi<'static, SPI0, Blocking>,
    cs: Output<'static>,
    dc: Output<'static>,
    mut rst: Output<'static>,
) -> Oled {
    // Hardware reset pulse before any command traffic.
    rst.set_high();
    Timer::after(Duration::from_millis(1)).await;
    rst.set_low();
    Timer::after(Duration::from_millis(10)).await;
    rst.set_high();
    Timer::after(Duration::from_millis(10)).await;

    let device = match ExclusiveDevice::new(spi, cs, Delay) {
        Ok(device) => device,
        Err(_) => defmt::panic!("OLED chip-select setup failed"),
    };
    let interface = SPIInterface::new(device, dc);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();

    if let Err(e) = display.init() {
        defmt::panic!("OLED init failed: {}", Debug2Format(&e));
    }
    display
}
