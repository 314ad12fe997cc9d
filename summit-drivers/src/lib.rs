//! Hardware driver implementations
//!
//! Concrete implementations of the traits defined in summit-core:
//!
//! - MAX7219 8x8 LED matrix chain over SPI
//! - RGB status light on three PWM channels

#![no_std]
#![deny(unsafe_code)]

pub mod max7219;
pub mod rgb;

pub use max7219::Max7219;
pub use rgb::RgbLed;
