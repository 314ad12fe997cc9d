//! Single-unit stopwatch on one button
//!
//! Release starts the clock, the next press stops it, and the press after
//! that clears the display. Each press waits for its release before the
//! button is armed again, so a held button cannot skip a step.

use super::UnitError;
use crate::config::TimingConfig;
use crate::display::Readout;
use crate::input::{Debouncer, Edge};
use crate::traits::MatrixDisplay;

/// Solo stopwatch states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SoloState {
    /// Display clear, waiting for the button to be released
    Ready,
    /// Clock running since `started_at_ms`
    Running { started_at_ms: u32 },
    /// Stopped; waiting for the stop press to be released
    StopHeld { elapsed_ms: u32 },
    /// Stopped with the final time on the display
    Paused { elapsed_ms: u32 },
    /// Cleared; waiting for the reset press to be released
    ResetHeld,
}

impl SoloState {
    /// Process a button edge and return the next state
    pub fn transition(self, edge: Edge, now_ms: u32) -> Self {
        use Edge::*;
        use SoloState::*;

        match (self, edge) {
            (Ready, Released) => Running {
                started_at_ms: now_ms,
            },
            (Running { started_at_ms }, Pressed) => StopHeld {
                elapsed_ms: now_ms.wrapping_sub(started_at_ms),
            },
            (StopHeld { elapsed_ms }, Released) => Paused { elapsed_ms },
            (Paused { .. }, Pressed) => ResetHeld,
            (ResetHeld, Released) => Ready,
            _ => self,
        }
    }

    /// Stopped time, if the clock has been stopped
    pub fn elapsed(&self) -> Option<u32> {
        match self {
            SoloState::StopHeld { elapsed_ms } | SoloState::Paused { elapsed_ms } => {
                Some(*elapsed_ms)
            }
            _ => None,
        }
    }
}

/// Single-button stopwatch controller
pub struct SoloUnit {
    state: SoloState,
    button: Debouncer,
    refresh_interval_ms: u32,
    last_refresh_ms: Option<u32>,
}

impl SoloUnit {
    pub fn new(timing: TimingConfig) -> Self {
        Self {
            state: SoloState::Ready,
            button: Debouncer::new(timing.debounce_ms),
            refresh_interval_ms: timing.refresh_interval_ms,
            last_refresh_ms: None,
        }
    }

    pub fn state(&self) -> SoloState {
        self.state
    }

    /// Sample the button and repaint
    ///
    /// Returns the new state when it changed.
    pub fn poll<D: MatrixDisplay>(
        &mut self,
        now_ms: u32,
        pressed: bool,
        display: &mut D,
    ) -> Result<Option<SoloState>, UnitError> {
        let mut changed = None;

        if let Some(edge) = self.button.update(pressed, now_ms) {
            let next = self.state.transition(edge, now_ms);
            if next != self.state {
                self.state = next;
                changed = Some(next);

                match next {
                    SoloState::Running { .. } => self.last_refresh_ms = None,
                    SoloState::StopHeld { elapsed_ms } => {
                        display.show(&Readout::from_millis(elapsed_ms).to_frame())?;
                    }
                    SoloState::ResetHeld => display.clear()?,
                    _ => {}
                }
            }
        }

        if let SoloState::Running { started_at_ms } = self.state {
            let due = self
                .last_refresh_ms
                .map_or(true, |last| now_ms.wrapping_sub(last) >= self.refresh_interval_ms);
            if due {
                self.last_refresh_ms = Some(now_ms);
                let elapsed_ms = now_ms.wrapping_sub(started_at_ms);
                display.show(&Readout::from_millis(elapsed_ms).to_frame())?;
            }
        }

        Ok(changed)
    }
}
