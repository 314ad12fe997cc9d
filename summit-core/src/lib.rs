//! Board-agnostic core logic for the Summit stopwatch
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (matrix display, indicator light)
//! - Debounced button input
//! - Stopwatch session state machine
//! - Link health tracking
//! - Digit formatting and panel glyph tables
//! - Per-unit controllers (top, bottom, solo, diagnostics)
//! - Configuration type definitions
//!
//! Time is passed in explicitly as wrapping `u32` milliseconds so that every
//! piece of logic can be driven from host tests.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod display;
pub mod input;
pub mod link;
pub mod stopwatch;
pub mod traits;
pub mod units;
