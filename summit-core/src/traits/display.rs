//! Matrix display trait

use crate::display::PanelFrame;

/// Errors that can occur while driving the display chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer failed
    Bus,
    /// Chip select could not be driven
    ChipSelect,
    /// Panel or row index outside the chain
    OutOfRange,
}

/// Trait for the four-panel LED matrix chain
///
/// Implementations write every row of every panel; callers hand over a
/// complete frame and never patch individual pixels.
pub trait MatrixDisplay {
    /// Paint a complete frame
    fn show(&mut self, frame: &PanelFrame) -> Result<(), DisplayError>;

    /// Turn every pixel off
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.show(&PanelFrame::BLANK)
    }
}
