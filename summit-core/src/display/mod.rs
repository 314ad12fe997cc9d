//! Display formatting
//!
//! Everything here is pure data: glyph tables, the elapsed-time readout and
//! the frame type handed to a [`crate::traits::MatrixDisplay`].

pub mod frame;
pub mod glyphs;
pub mod readout;

pub use frame::{Glyph, PanelFrame, ROWS_PER_PANEL};
pub use readout::Readout;
