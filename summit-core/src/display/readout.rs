//! Elapsed-time readout
//!
//! Converts a millisecond count into the four digits shown as `SS.CC`.
//! The display has no room for a third seconds digit, so anything at or
//! beyond 100 s is pinned to 99.99 instead of wrapping.

use core::fmt;

use super::frame::PanelFrame;
use super::glyphs::{self, DECIMAL_LEFT, DECIMAL_RIGHT};

/// Four-digit `SS.CC` readout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Readout {
    /// Tens of seconds
    pub tens: u8,
    /// Seconds
    pub ones: u8,
    /// Tenths of a second
    pub tenths: u8,
    /// Hundredths of a second
    pub hundredths: u8,
}

impl Readout {
    /// 0.00
    pub const ZERO: Readout = Readout {
        tens: 0,
        ones: 0,
        tenths: 0,
        hundredths: 0,
    };

    /// 99.99, shown for anything that does not fit
    pub const MAX: Readout = Readout {
        tens: 9,
        ones: 9,
        tenths: 9,
        hundredths: 9,
    };

    /// Build a readout from elapsed milliseconds, truncating to centiseconds
    pub fn from_millis(elapsed_ms: u32) -> Self {
        let centiseconds = elapsed_ms / 10;
        let seconds = centiseconds / 100;

        if seconds >= 100 {
            return Self::MAX;
        }

        let fraction = centiseconds % 100;

        Self {
            tens: (seconds / 10) as u8,
            ones: (seconds % 10) as u8,
            tenths: (fraction / 10) as u8,
            hundredths: (fraction % 10) as u8,
        }
    }

    /// Total value shown, in centiseconds
    pub fn centiseconds(&self) -> u32 {
        u32::from(self.tens) * 1000
            + u32::from(self.ones) * 100
            + u32::from(self.tenths) * 10
            + u32::from(self.hundredths)
    }

    /// Render onto the panel chain
    ///
    /// Panel 0 is left dark when the tens digit is zero.
    pub fn to_frame(&self) -> PanelFrame {
        let tens = if self.tens == 0 {
            glyphs::BLANK
        } else {
            glyphs::digit(self.tens)
        };

        PanelFrame::new([
            tens,
            glyphs::overlay(glyphs::digit(self.ones), DECIMAL_LEFT),
            glyphs::overlay(glyphs::digit(self.tenths), DECIMAL_RIGHT),
            glyphs::digit(self.hundredths),
        ])
    }
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tens != 0 {
            write!(f, "{}", self.tens)?;
        }
        write!(f, "{}.{}{}", self.ones, self.tenths, self.hundredths)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Readout {
    fn format(&self, f: defmt::Formatter) {
        if self.tens != 0 {
            defmt::write!(f, "{}", self.tens);
        }
        defmt::write!(f, "{}.{}{}", self.ones, self.tenths, self.hundredths);
    }
}
