//! Button and status-light check
//!
//! Cycles red, green, blue at power-up, then shows the raw button level:
//! orange while held, white for a second after release. Sampling is not
//! debounced, so contact bounce shows up on the light and in the log.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::{Duration, Ticker};
use esp_hal::clock::CpuClock;
use esp_hal::timer::timg::TimerGroup;
use {esp_backtrace as _, esp_println as _};

use summit_core::traits::Indicator;
use summit_core::units::diagnostic::BUTTON_SAMPLE_MS;
use summit_core::units::ButtonCheck;
use summit_firmware::{board, halt, now_ms};

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_hal_embassy::main]
async fn main(_spawner: Spawner) {
    let peripherals = esp_hal::init(esp_hal::Config::default().with_cpu_clock(CpuClock::max()));
    esp_alloc::heap_allocator!(size: 32 * 1024);

    let timg1 = TimerGroup::new(peripherals.TIMG1);
    esp_hal_embassy::init(timg1.timer0);
    info!("Button check starting");

    let mut led = match board::status_led(
        peripherals.LEDC,
        peripherals.GPIO19,
        peripherals.GPIO23,
        peripherals.GPIO18,
    ) {
        Ok(led) => led,
        Err(e) => {
            error!("Status light init failed: {}", e);
            halt().await
        }
    };

    let button = board::button(peripherals.GPIO32);

    let (mut check, first) = ButtonCheck::begin(now_ms());
    if let Err(e) = led.set_color(first) {
        warn!("Status light failed: {}", e);
    }

    let mut was_pressed = false;
    let mut ticker = Ticker::every(Duration::from_millis(BUTTON_SAMPLE_MS.into()));
    loop {
        let pressed = button.is_low();
        if check.ready() && pressed != was_pressed {
            info!("Button {}", if pressed { "pressed" } else { "released" });
        }
        was_pressed = pressed;

        if let Some(color) = check.poll(now_ms(), pressed) {
            debug!("Light {}", color);
            if let Err(e) = led.set_color(color) {
                warn!("Status light failed: {}", e);
            }
        }

        ticker.next().await;
    }
}
