//! Events that drive the stopwatch session

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// START arrived from the bottom unit
    StartReceived {
        /// Local receive time (ms)
        at_ms: u32,
    },
    /// Stop button on the top unit was pressed
    StopPressed {
        /// Local press time (ms)
        at_ms: u32,
    },
    /// RESET arrived from the bottom unit
    ResetReceived,
}
