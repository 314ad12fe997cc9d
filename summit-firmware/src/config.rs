//! Build-time configuration
//!
//! Generated by `build.rs` from `stopwatch.toml`.

use summit_core::config::{DisplayConfig, TimingConfig};
use summit_protocol::PeerAddress;

include!(concat!(env!("OUT_DIR"), "/config.rs"));
