//! Matrix panel check
//!
//! Shows each fixed pattern once, ramps the brightness, then walks a single
//! lit pixel across every row of every panel forever. A panel that stays
//! dark or lights the wrong row points at chain order or wiring.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::Timer;
use esp_hal::clock::CpuClock;
use esp_hal::timer::timg::TimerGroup;
use {esp_backtrace as _, esp_println as _};

use summit_core::config::types::{MAX_INTENSITY, PANEL_COUNT};
use summit_core::display::ROWS_PER_PANEL;
use summit_core::traits::MatrixDisplay;
use summit_core::units::diagnostic::SWEEP_STEP_MS;
use summit_core::units::{PixelSweep, TestPattern};
use summit_firmware::config::DISPLAY;
use summit_firmware::{board, halt};

esp_bootloader_esp_idf::esp_app_desc!();

/// How long each fixed pattern stays up
const PATTERN_MS: u64 = 1000;

/// Time per brightness step
const RAMP_STEP_MS: u64 = 100;

#[esp_hal_embassy::main]
async fn main(_spawner: Spawner) {
    let peripherals = esp_hal::init(esp_hal::Config::default().with_cpu_clock(CpuClock::max()));
    esp_alloc::heap_allocator!(size: 32 * 1024);

    let timg1 = TimerGroup::new(peripherals.TIMG1);
    esp_hal_embassy::init(timg1.timer0);
    info!("Panel check starting");

    let mut matrix = match board::matrix(
        peripherals.SPI2,
        peripherals.GPIO5,
        peripherals.GPIO16,
        peripherals.GPIO17,
        DISPLAY,
    ) {
        Ok(matrix) => matrix,
        Err(e) => {
            error!("Display init failed: {}", e);
            halt().await
        }
    };

    // Rows then columns: a module that swaps them is column-wired
    let patterns = (0..PANEL_COUNT)
        .map(TestPattern::FullPanel)
        .chain((0..ROWS_PER_PANEL).map(TestPattern::Row))
        .chain((0..ROWS_PER_PANEL).map(TestPattern::Column))
        .chain([TestPattern::Checkerboard, TestPattern::Diagonal]);
    for pattern in patterns {
        info!("Pattern {}", pattern);
        if let Err(e) = matrix.show(&pattern.frame()) {
            warn!("Pattern {} failed: {}", pattern, e);
        }
        Timer::after_millis(PATTERN_MS).await;
    }

    info!("Brightness ramp");
    for level in 0..=MAX_INTENSITY {
        if let Err(e) = matrix.set_intensity(level) {
            warn!("Intensity {} failed: {}", level, Debug2Format(&e));
        }
        Timer::after_millis(RAMP_STEP_MS).await;
    }
    if let Err(e) = matrix.set_intensity(DISPLAY.intensity) {
        warn!("Restoring intensity failed: {}", Debug2Format(&e));
    }

    info!("Pixel sweep");
    loop {
        for (panel, row, frame) in PixelSweep::new() {
            trace!("Panel {} row {}", panel, row);
            if let Err(e) = matrix.show(&frame) {
                warn!("Panel {} row {} failed: {}", panel, row, e);
            }
            Timer::after_millis(SWEEP_STEP_MS.into()).await;
        }
    }
}
