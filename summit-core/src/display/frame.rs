//! Frames for the four-panel matrix chain

use super::glyphs::{self, BLANK};
use crate::config::types::PANEL_COUNT;

/// Rows in one 8x8 panel
pub const ROWS_PER_PANEL: usize = 8;

/// One panel's worth of row bytes
pub type Glyph = [u8; ROWS_PER_PANEL];

/// Content for the whole chain, panel 0 leftmost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelFrame {
    panels: [Glyph; PANEL_COUNT],
}

impl Default for PanelFrame {
    fn default() -> Self {
        Self::BLANK
    }
}

impl PanelFrame {
    /// All panels dark
    pub const BLANK: PanelFrame = PanelFrame {
        panels: [BLANK; PANEL_COUNT],
    };

    pub const fn new(panels: [Glyph; PANEL_COUNT]) -> Self {
        Self { panels }
    }

    /// "PAIR" shown while waiting for the bottom unit
    pub const fn pair() -> Self {
        Self::new([
            glyphs::LETTER_P,
            glyphs::LETTER_A,
            glyphs::LETTER_I,
            glyphs::LETTER_R,
        ])
    }

    /// "OK" on the two middle panels, shown when the bottom unit appears
    pub const fn ok() -> Self {
        Self::new([BLANK, glyphs::LETTER_O, glyphs::LETTER_K, BLANK])
    }

    /// A frame with exactly one pixel lit: leftmost column of `row` on `panel`
    pub fn single_pixel(panel: usize, row: usize) -> Option<Self> {
        if panel >= PANEL_COUNT || row >= ROWS_PER_PANEL {
            return None;
        }
        let mut frame = Self::BLANK;
        frame.panels[panel][row] = 0b1000_0000;
        Some(frame)
    }

    pub fn panels(&self) -> &[Glyph; PANEL_COUNT] {
        &self.panels
    }

    pub fn panel(&self, index: usize) -> Option<&Glyph> {
        self.panels.get(index)
    }

    pub fn is_blank(&self) -> bool {
        *self == Self::BLANK
    }

    /// Number of lit pixels across the chain
    pub fn lit_pixels(&self) -> u32 {
        self.panels
            .iter()
            .flat_map(|panel| panel.iter())
            .map(|row| row.count_ones())
            .sum()
    }
}
