//! Bottom unit: start pad and reset button
//!
//! A stateless trigger forwarder. The only local state is debouncing; the
//! indicator follows pad contact.

use summit_protocol::{LinkMessage, MessageKind};

use super::{queue, Outbox, UnitError};
use crate::config::TimingConfig;
use crate::input::{Debouncer, Edge};
use crate::traits::{Color, Indicator};

/// What a single bottom-unit poll did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BottomReport {
    /// Pad edge seen this poll
    pub pad: Option<Edge>,
    /// Reset button was pressed this poll
    pub reset: bool,
}

impl BottomReport {
    /// Check if a START went out
    pub fn started(&self) -> bool {
        self.pad == Some(Edge::Released)
    }
}

/// Bottom unit controller
pub struct BottomUnit {
    pad: Debouncer,
    reset: Debouncer,
    outbox: Outbox,
}

impl BottomUnit {
    pub fn new(timing: TimingConfig) -> Self {
        Self {
            pad: Debouncer::new(timing.debounce_ms),
            reset: Debouncer::new(timing.debounce_ms),
            outbox: Outbox::new(),
        }
    }

    /// Turn the indicator off at power-up
    pub fn begin<I: Indicator>(&mut self, indicator: &mut I) -> Result<(), UnitError> {
        indicator.off()?;
        Ok(())
    }

    /// Sample both inputs
    ///
    /// Pad press lights white; pad release lights orange and sends START;
    /// reset press turns the light off and sends RESET.
    pub fn poll<I: Indicator>(
        &mut self,
        now_ms: u32,
        pad_pressed: bool,
        reset_pressed: bool,
        indicator: &mut I,
    ) -> Result<BottomReport, UnitError> {
        let pad = self.pad.update(pad_pressed, now_ms);
        let reset = self.reset.update(reset_pressed, now_ms) == Some(Edge::Pressed);

        if pad == Some(Edge::Released) {
            queue(&mut self.outbox, LinkMessage::start(now_ms))?;
        }
        if reset {
            queue(&mut self.outbox, LinkMessage::reset(now_ms))?;
        }

        match pad {
            Some(Edge::Pressed) => indicator.set_color(Color::WHITE)?,
            Some(Edge::Released) => indicator.set_color(Color::ORANGE)?,
            None => {}
        }
        if reset {
            indicator.off()?;
        }

        Ok(BottomReport { pad, reset })
    }

    /// Process one inbound message; only PING needs an answer
    pub fn handle_message(&mut self, message: &LinkMessage, now_ms: u32) -> Result<(), UnitError> {
        if message.kind == MessageKind::Ping {
            queue(&mut self.outbox, LinkMessage::pong(now_ms))?;
        }
        Ok(())
    }

    /// Take every queued outbound message
    pub fn take_outbox(&mut self) -> Outbox {
        core::mem::take(&mut self.outbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::mock::MockIndicator;

    fn unit() -> (BottomUnit, MockIndicator) {
        (BottomUnit::new(TimingConfig::default()), MockIndicator::default())
    }

    #[test]
    fn test_pad_cycle_sends_start_on_release() {
        let (mut unit, mut led) = unit();

        unit.poll(0, true, false, &mut led).unwrap();
        let report = unit.poll(10, true, false, &mut led).unwrap();
        assert_eq!(report.pad, Some(Edge::Pressed));
        assert_eq!(led.last(), Some(Color::WHITE));
        assert!(unit.take_outbox().is_empty());

        unit.poll(2_000, false, false, &mut led).unwrap();
        let report = unit.poll(2_010, false, false, &mut led).unwrap();
        assert!(report.started());
        assert_eq!(led.last(), Some(Color::ORANGE));
        assert_eq!(unit.take_outbox().as_slice(), &[LinkMessage::start(2_010)]);
    }

    #[test]
    fn test_reset_button() {
        let (mut unit, mut led) = unit();
        unit.poll(0, false, true, &mut led).unwrap();
        let report = unit.poll(10, false, true, &mut led).unwrap();
        assert!(report.reset);
        assert_eq!(led.last(), Some(Color::OFF));
        assert_eq!(unit.take_outbox().as_slice(), &[LinkMessage::reset(10)]);

        // Releasing the reset button sends nothing
        unit.poll(100, false, false, &mut led).unwrap();
        unit.poll(110, false, false, &mut led).unwrap();
        assert!(unit.take_outbox().is_empty());
    }

    #[test]
    fn test_pad_bounce_sends_nothing() {
        let (mut unit, mut led) = unit();
        for (t, level) in [(0, true), (2, false), (4, true), (6, false), (8, true)] {
            unit.poll(t, level, false, &mut led).unwrap();
        }
        unit.poll(10, false, false, &mut led).unwrap();
        unit.poll(12, false, false, &mut led).unwrap();
        assert!(led.colors.is_empty());
        assert!(unit.take_outbox().is_empty());
    }

    #[test]
    fn test_answers_ping_only() {
        let (mut unit, _) = unit();
        unit.handle_message(&LinkMessage::pong(1), 5).unwrap();
        unit.handle_message(&LinkMessage::start(1), 5).unwrap();
        assert!(unit.take_outbox().is_empty());

        unit.handle_message(&LinkMessage::ping(1), 7).unwrap();
        assert_eq!(unit.take_outbox().as_slice(), &[LinkMessage::pong(7)]);
    }
}
