//! Top unit
//!
//! Stop button, LED matrix, and status light. Shows PAIR until the bottom
//! unit answers, runs the clock from its START, and freezes the final time
//! when the stop button is hit.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::{Duration, Ticker};
use esp_hal::clock::CpuClock;
use esp_hal::timer::timg::TimerGroup;
use {esp_backtrace as _, esp_println as _};

use summit_core::display::Readout;
use summit_core::link::LinkChange;
use summit_core::stopwatch::{Event, State};
use summit_core::units::{TopReport, TopUnit};
use summit_firmware::channels::INBOUND;
use summit_firmware::config::{BOTTOM_ADDRESS, DISPLAY, TIMING};
use summit_firmware::tasks::{link_rx_task, link_tx_task};
use summit_firmware::{board, halt, now_ms, radio};

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_hal_embassy::main]
async fn main(spawner: Spawner) {
    let peripherals = esp_hal::init(esp_hal::Config::default().with_cpu_clock(CpuClock::max()));
    esp_alloc::heap_allocator!(size: 72 * 1024);

    let timg1 = TimerGroup::new(peripherals.TIMG1);
    esp_hal_embassy::init(timg1.timer0);
    info!("Summit top unit starting");

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

    let stop = board::button(peripherals.GPIO33);

    let radio = match radio::init(
        peripherals.TIMG0,
        peripherals.RNG,
        peripherals.WIFI,
        BOTTOM_ADDRESS,
    ) {
        Ok(radio) => radio,
        Err(e) => {
            error!("Radio init failed: {}", e);
            halt().await
        }
    };
    spawner.must_spawn(link_rx_task(radio.receiver));
    spawner.must_spawn(link_tx_task(radio.sender, BOTTOM_ADDRESS));

    let mut unit = TopUnit::new(TIMING);
    if let Err(e) = unit.begin(now_ms(), &mut matrix) {
        warn!("Startup failed: {}", e);
    }
    radio::send_all(unit.take_outbox());
    info!("Waiting for the bottom unit");

    let mut ticker = Ticker::every(Duration::from_millis(TIMING.poll_interval_ms.into()));
    loop {
        while let Ok(inbound) = INBOUND.try_receive() {
            let handled =
                unit.handle_message(&inbound.message, inbound.received_ms, &mut matrix, &mut led);
            match handled {
                Ok(report) => log_report(&report),
                Err(e) => warn!("Handling {} failed: {}", inbound.message.kind, e),
            }
        }

        match unit.poll(now_ms(), stop.is_low(), &mut matrix, &mut led) {
            Ok(report) => log_report(&report),
            Err(e) => warn!("Poll failed: {}", e),
        }

        radio::send_all(unit.take_outbox());
        ticker.next().await;
    }
}

fn log_report(report: &TopReport) {
    match report.link {
        Some(LinkChange::Connected) => info!("Bottom unit connected"),
        Some(LinkChange::Lost) => warn!("Bottom unit lost"),
        None => {}
    }

    match (report.applied, report.state) {
        (Some(Event::StartReceived { .. }), _) => info!("START received, clock running"),
        (Some(Event::StopPressed { .. }), State::Stopped { elapsed_ms }) => {
            info!("Stopped at {}", Readout::from_millis(elapsed_ms));
        }
        (Some(Event::ResetReceived), _) => info!("RESET received"),
        _ => {}
    }
}
