//! Single-unit stopwatch
//!
//! One button and the matrix, no radio: release to start, press to stop,
//! press again to clear.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::{Duration, Ticker};
use esp_hal::clock::CpuClock;
use esp_hal::timer::timg::TimerGroup;
use {esp_backtrace as _, esp_println as _};

use summit_core::display::Readout;
use summit_core::units::{SoloState, SoloUnit};
use summit_firmware::config::{DISPLAY, TIMING};
use summit_firmware::{board, halt, now_ms};

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_hal_embassy::main]
async fn main(_spawner: Spawner) {
    let peripherals = esp_hal::init(esp_hal::Config::default().with_cpu_clock(CpuClock::max()));
    esp_alloc::heap_allocator!(size: 32 * 1024);

    let timg1 = TimerGroup::new(peripherals.TIMG1);
    esp_hal_embassy::init(timg1.timer0);
    info!("Summit solo stopwatch starting");

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

    let button = board::button(peripherals.GPIO33);
    let mut unit = SoloUnit::new(TIMING);

    let mut ticker = Ticker::every(Duration::from_millis(TIMING.poll_interval_ms.into()));
    loop {
        match unit.poll(now_ms(), button.is_low(), &mut matrix) {
            Ok(Some(state)) => match state {
                SoloState::Running { .. } => info!("Running"),
                SoloState::StopHeld { elapsed_ms } => {
                    info!("Stopped at {}", Readout::from_millis(elapsed_ms));
                }
                SoloState::ResetHeld => info!("Cleared"),
                _ => debug!("{}", state),
            },
            Ok(None) => {}
            Err(e) => warn!("Display update failed: {}", e),
        }

        ticker.next().await;
    }
}
