//! Summit stopwatch firmware support
//!
//! Board bring-up, radio plumbing, and tasks shared by the unit images in
//! `src/bin`. Each image owns one controller from `summit-core` and steps it
//! from a fixed-rate loop; the radio runs in its own tasks and talks to the
//! loop through the queues in [`channels`].

#![no_std]

pub mod board;
pub mod channels;
pub mod config;
pub mod radio;
pub mod tasks;

use embassy_time::{Instant, Timer};

/// Place a value in a `StaticCell` and return the `&'static mut`
#[macro_export]
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write(($val));
        x
    }};
}

/// Milliseconds since boot, wrapping like every timestamp in the units
pub fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

/// Park the unit after a fatal init error
///
/// The loop keeps the executor alive so the log stays readable.
pub async fn halt() -> ! {
    loop {
        Timer::after_millis(500).await;
    }
}
