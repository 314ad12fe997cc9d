//! Hardware abstraction traits
//!
//! These traits define the interface between the unit controllers and the
//! board-specific drivers.

pub mod display;
pub mod indicator;

pub use display::{DisplayError, MatrixDisplay};
pub use indicator::{Color, Indicator, IndicatorError};
