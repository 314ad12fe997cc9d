//! Bottom unit
//!
//! Start pad and reset button. Leaving the pad sends START, the reset
//! button sends RESET; the status light follows the pad.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::{Duration, Ticker};
use esp_hal::clock::CpuClock;
use esp_hal::timer::timg::TimerGroup;
use {esp_backtrace as _, esp_println as _};

use summit_core::input::Edge;
use summit_core::units::BottomUnit;
use summit_firmware::channels::INBOUND;
use summit_firmware::config::{TIMING, TOP_ADDRESS};
use summit_firmware::tasks::{link_rx_task, link_tx_task};
use summit_firmware::{board, halt, now_ms, radio};

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_hal_embassy::main]
async fn main(spawner: Spawner) {
    let peripherals = esp_hal::init(esp_hal::Config::default().with_cpu_clock(CpuClock::max()));
    esp_alloc::heap_allocator!(size: 72 * 1024);

    let timg1 = TimerGroup::new(peripherals.TIMG1);
    esp_hal_embassy::init(timg1.timer0);
    info!("Summit bottom unit starting");

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

    let pad = board::button(peripherals.GPIO33);
    let reset = board::button(peripherals.GPIO25);

    let radio = match radio::init(
        peripherals.TIMG0,
        peripherals.RNG,
        peripherals.WIFI,
        TOP_ADDRESS,
    ) {
        Ok(radio) => radio,
        Err(e) => {
            error!("Radio init failed: {}", e);
            halt().await
        }
    };
    spawner.must_spawn(link_rx_task(radio.receiver));
    spawner.must_spawn(link_tx_task(radio.sender, TOP_ADDRESS));

    let mut unit = BottomUnit::new(TIMING);
    if let Err(e) = unit.begin(&mut led) {
        warn!("Status light off failed: {}", e);
    }
    info!("Ready");

    let mut ticker = Ticker::every(Duration::from_millis(TIMING.poll_interval_ms.into()));
    loop {
        while let Ok(inbound) = INBOUND.try_receive() {
            if let Err(e) = unit.handle_message(&inbound.message, inbound.received_ms) {
                warn!("Handling {} failed: {}", inbound.message.kind, e);
            }
        }

        match unit.poll(now_ms(), pad.is_low(), reset.is_low(), &mut led) {
            Ok(report) => {
                if report.pad == Some(Edge::Pressed) {
                    info!("Climber on the pad");
                }
                if report.started() {
                    info!("Pad released, START sent");
                }
                if report.reset {
                    info!("RESET sent");
                }
            }
            Err(e) => warn!("Poll failed: {}", e),
        }

        radio::send_all(unit.take_outbox());
        ticker.next().await;
    }
}
