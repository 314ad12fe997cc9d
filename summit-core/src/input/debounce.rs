//! Polled button debouncing
//!
//! Turns raw pin samples into single press/release edges. A new level is
//! only accepted once it has been stable for strictly longer than the
//! debounce window, so contact bounce never produces an edge.
//!
//! The filter can only see what the polling loop samples: with a 10 ms loop
//! a bounce shorter than one poll is invisible, which is fine.

/// A debounced button transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Button went down (pin pulled low)
    Pressed,
    /// Button came back up
    Released,
}

/// Debounce state for one physical button
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    /// Raw level seen on the previous poll (true = pressed)
    raw_last: bool,
    /// Last accepted level
    stable: bool,
    /// When `raw_last` last changed (ms)
    last_change_ms: u32,
    /// Required stable time (ms)
    window_ms: u32,
}

impl Debouncer {
    /// Create a debouncer for a button that starts released
    pub const fn new(window_ms: u32) -> Self {
        Self {
            raw_last: false,
            stable: false,
            last_change_ms: 0,
            window_ms,
        }
    }

    /// Feed one raw sample
    ///
    /// # Arguments
    /// - `pressed`: true if the button reads as pressed (active-low pin is low)
    /// - `now_ms`: monotonic time of the sample
    ///
    /// Returns the edge if this sample completes a debounced transition.
    pub fn update(&mut self, pressed: bool, now_ms: u32) -> Option<Edge> {
        if pressed != self.raw_last {
            // Level moved: restart the stability timer
            self.raw_last = pressed;
            self.last_change_ms = now_ms;
            return None;
        }

        let held_ms = now_ms.wrapping_sub(self.last_change_ms);
        if held_ms > self.window_ms && pressed != self.stable {
            self.stable = pressed;
            return Some(if pressed { Edge::Pressed } else { Edge::Released });
        }

        None
    }

    /// Last accepted level
    pub fn is_pressed(&self) -> bool {
        self.stable
    }
}
