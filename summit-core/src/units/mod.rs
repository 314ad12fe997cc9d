//! Per-unit controllers
//!
//! Each controller owns the state of one firmware image and is stepped by
//! the board loop with the current time, raw button levels, and inbound
//! messages. Outbound messages are queued in the controller's outbox for the
//! radio task to drain; hardware is reached only through the `traits`.

pub mod bottom;
pub mod diagnostic;
pub mod solo;
pub mod top;

pub use bottom::{BottomReport, BottomUnit};
pub use diagnostic::{ButtonCheck, PixelSweep, TestPattern};
pub use solo::{SoloState, SoloUnit};
pub use top::{TopReport, TopUnit};

use heapless::Vec;
use summit_protocol::LinkMessage;

use crate::traits::{DisplayError, IndicatorError};

/// Messages a unit can queue between two drains
pub const OUTBOX_CAPACITY: usize = 4;

/// Outbound messages waiting for the radio
pub type Outbox = Vec<LinkMessage, OUTBOX_CAPACITY>;

/// Errors surfaced by a unit step
///
/// The unit's own state is always updated before any hardware is touched,
/// so a step that fails here has still taken effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UnitError {
    Display(DisplayError),
    Indicator(IndicatorError),
    /// Outbox was not drained in time; the message was dropped
    OutboxFull,
}

impl From<DisplayError> for UnitError {
    fn from(e: DisplayError) -> Self {
        UnitError::Display(e)
    }
}

impl From<IndicatorError> for UnitError {
    fn from(e: IndicatorError) -> Self {
        UnitError::Indicator(e)
    }
}

fn queue(outbox: &mut Outbox, message: LinkMessage) -> Result<(), UnitError> {
    outbox.push(message).map_err(|_| UnitError::OutboxFull)
}
