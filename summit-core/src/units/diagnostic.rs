//! Bench diagnostics for the button, status light, and panel chain

use crate::config::types::PANEL_COUNT;
use crate::display::{PanelFrame, ROWS_PER_PANEL};
use crate::traits::Color;

/// Raw sampling period for the button check (ms)
pub const BUTTON_SAMPLE_MS: u32 = 30;

/// Time each startup colour is shown (ms)
pub const STARTUP_STEP_MS: u32 = 500;

/// How long the light stays white after a release (ms)
pub const WHITE_HOLD_MS: u32 = 1000;

/// Time each pixel stays lit during the sweep (ms)
pub const SWEEP_STEP_MS: u32 = 200;

const STARTUP_COLORS: [Color; 3] = [Color::RED, Color::GREEN, Color::BLUE];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Phase {
    /// Cycling through the startup colours
    Startup { step: u8, since_ms: u32 },
    Idle,
    Held,
    White { since_ms: u32 },
}

/// Button and status-light check
///
/// Samples the button without debouncing so that bounce is visible on the
/// light. Orange while held, white for a second after release, then off.
#[derive(Debug, Clone)]
pub struct ButtonCheck {
    phase: Phase,
    last_pressed: bool,
}

impl ButtonCheck {
    /// Start the check; the returned colour must be applied immediately
    pub fn begin(now_ms: u32) -> (Self, Color) {
        let check = Self {
            phase: Phase::Startup {
                step: 0,
                since_ms: now_ms,
            },
            last_pressed: false,
        };
        (check, STARTUP_COLORS[0])
    }

    /// Feed one raw sample; returns a colour when the light should change
    pub fn poll(&mut self, now_ms: u32, pressed: bool) -> Option<Color> {
        if let Phase::Startup { step, since_ms } = self.phase {
            if now_ms.wrapping_sub(since_ms) < STARTUP_STEP_MS {
                return None;
            }
            let next = usize::from(step) + 1;
            return match STARTUP_COLORS.get(next) {
                Some(color) => {
                    self.phase = Phase::Startup {
                        step: next as u8,
                        since_ms: now_ms,
                    };
                    Some(*color)
                }
                None => {
                    self.phase = Phase::Idle;
                    Some(Color::OFF)
                }
            };
        }

        let was_pressed = core::mem::replace(&mut self.last_pressed, pressed);

        if pressed {
            // A new press cancels the white hold
            if self.phase != Phase::Held {
                self.phase = Phase::Held;
                return Some(Color::ORANGE);
            }
            return None;
        }

        if was_pressed {
            self.phase = Phase::White { since_ms: now_ms };
            return Some(Color::WHITE);
        }

        if let Phase::White { since_ms } = self.phase {
            if now_ms.wrapping_sub(since_ms) >= WHITE_HOLD_MS {
                self.phase = Phase::Idle;
                return Some(Color::OFF);
            }
        }

        None
    }

    /// Check if the startup sequence is finished
    pub fn ready(&self) -> bool {
        !matches!(self.phase, Phase::Startup { .. })
    }
}

/// Walks one lit pixel across every row of every panel
///
/// Panel 0 first, rows top to bottom; each item is shown for
/// [`SWEEP_STEP_MS`]. The sweep is finite; restart it to loop.
#[derive(Debug, Clone, Default)]
pub struct PixelSweep {
    index: usize,
}

impl PixelSweep {
    pub const STEPS: usize = PANEL_COUNT * ROWS_PER_PANEL;

    pub const fn new() -> Self {
        Self { index: 0 }
    }
}

impl Iterator for PixelSweep {
    /// (panel, row, frame)
    type Item = (usize, usize, PanelFrame);

    fn next(&mut self) -> Option<Self::Item> {
        let panel = self.index / ROWS_PER_PANEL;
        let row = self.index % ROWS_PER_PANEL;
        let frame = PanelFrame::single_pixel(panel, row)?;
        self.index += 1;
        Some((panel, row, frame))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = Self::STEPS.saturating_sub(self.index);
        (left, Some(left))
    }
}

impl ExactSizeIterator for PixelSweep {}

/// Fixed patterns shown once at the start of the panel check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TestPattern {
    /// Every pixel of one panel
    FullPanel(usize),
    /// One row lit across all panels
    Row(usize),
    /// One column lit across all panels, 0 leftmost
    Column(usize),
    /// Alternating 0x55 / 0xAA rows
    Checkerboard,
    /// One diagonal per panel
    Diagonal,
}

impl TestPattern {
    /// Render the pattern; an out-of-range index gives a blank frame
    pub fn frame(&self) -> PanelFrame {
        let mut panels = [[0u8; ROWS_PER_PANEL]; PANEL_COUNT];

        match *self {
            TestPattern::FullPanel(panel) => {
                if let Some(glyph) = panels.get_mut(panel) {
                    *glyph = [0xFF; ROWS_PER_PANEL];
                }
            }
            TestPattern::Row(row) => {
                for glyph in panels.iter_mut() {
                    if let Some(bits) = glyph.get_mut(row) {
                        *bits = 0xFF;
                    }
                }
            }
            TestPattern::Column(col) => {
                if col < ROWS_PER_PANEL {
                    for glyph in panels.iter_mut() {
                        *glyph = [0x80 >> col; ROWS_PER_PANEL];
                    }
                }
            }
            TestPattern::Checkerboard => {
                for glyph in panels.iter_mut() {
                    for (row, bits) in glyph.iter_mut().enumerate() {
                        *bits = if row % 2 == 0 { 0x55 } else { 0xAA };
                    }
                }
            }
            TestPattern::Diagonal => {
                for glyph in panels.iter_mut() {
                    for (row, bits) in glyph.iter_mut().enumerate() {
                        *bits = 1 << row;
                    }
                }
            }
        }

        PanelFrame::new(panels)
    }
}
