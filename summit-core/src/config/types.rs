//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of 8x8 panels in the display chain
pub const PANEL_COUNT: usize = 4;

/// Maximum MAX7219 intensity step
pub const MAX_INTENSITY: u8 = 15;

/// Timing parameters shared by all units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimingConfig {
    /// Minimum stable time before a button level is accepted (ms)
    pub debounce_ms: u32,
    /// Main loop polling period (ms)
    pub poll_interval_ms: u32,
    /// Display repaint period while running (ms)
    pub refresh_interval_ms: u32,
    /// Heartbeat (PING) period (ms)
    pub heartbeat_interval_ms: u32,
    /// Receive silence after which the link is considered lost (ms)
    pub link_timeout_ms: u32,
    /// How long the "OK" banner stays up after the peer connects (ms)
    pub banner_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 5,
            poll_interval_ms: 10,
            refresh_interval_ms: 10,
            heartbeat_interval_ms: 1000,
            link_timeout_ms: 3000,
            banner_ms: 2000,
        }
    }
}

impl TimingConfig {
    /// Check that the values make sense together
    ///
    /// The timeout must cover at least one heartbeat interval, otherwise the
    /// link would flap between every PING.
    pub fn is_valid(&self) -> bool {
        self.poll_interval_ms > 0
            && self.refresh_interval_ms > 0
            && self.heartbeat_interval_ms > 0
            && self.link_timeout_ms > self.heartbeat_interval_ms
    }
}

/// Display chain settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayConfig {
    /// Brightness, 0-15
    pub intensity: u8,
    /// Modules wired with digit lines driving columns instead of rows
    pub column_wired: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            intensity: MAX_INTENSITY,
            column_wired: false,
        }
    }
}
