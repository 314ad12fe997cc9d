//! Configuration types
//!
//! Values are baked in at build time by the firmware (see `stopwatch.toml`);
//! the defaults here match the units already on the wall.

pub mod types;

pub use types::{DisplayConfig, TimingConfig};
