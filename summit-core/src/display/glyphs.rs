//! 8x8 glyph tables
//!
//! Each glyph is eight row bytes, row 0 at the top, MSB is the leftmost
//! pixel. The bottom row is always empty so the decimal point has room.

use super::frame::Glyph;

/// Empty panel
pub const BLANK: Glyph = [0; 8];

/// Digits 0-9
pub const DIGITS: [Glyph; 10] = [
    // 0
    [
        0b00111100, 0b01100110, 0b01100110, 0b01100110, 0b01100110, 0b01100110, 0b00111100,
        0b00000000,
    ],
    // 1
    [
        0b00011000, 0b00111000, 0b00011000, 0b00011000, 0b00011000, 0b00011000, 0b01111100,
        0b00000000,
    ],
    // 2
    [
        0b00111100, 0b01100110, 0b00000110, 0b00001100, 0b00110000, 0b01100000, 0b01111100,
        0b00000000,
    ],
    // 3
    [
        0b00111100, 0b01100110, 0b00000110, 0b00011100, 0b00000110, 0b01100110, 0b00111100,
        0b00000000,
    ],
    // 4
    [
        0b00001100, 0b00011100, 0b00111100, 0b01101100, 0b01111110, 0b00001100, 0b00001100,
        0b00000000,
    ],
    // 5
    [
        0b01111110, 0b01100000, 0b01100000, 0b01111100, 0b00000110, 0b01100110, 0b00111100,
        0b00000000,
    ],
    // 6
    [
        0b00111100, 0b01100110, 0b01100000, 0b01111100, 0b01100110, 0b01100110, 0b00111100,
        0b00000000,
    ],
    // 7
    [
        0b01111110, 0b00000110, 0b00001100, 0b00011000, 0b00110000, 0b00110000, 0b00110000,
        0b00000000,
    ],
    // 8
    [
        0b00111100, 0b01100110, 0b01100110, 0b00111100, 0b01100110, 0b01100110, 0b00111100,
        0b00000000,
    ],
    // 9
    [
        0b00111100, 0b01100110, 0b01100110, 0b00111110, 0b00000110, 0b01100110, 0b00111100,
        0b00000000,
    ],
];

/// Left half of the decimal point, drawn in the rightmost column of the
/// seconds panel
pub const DECIMAL_LEFT: Glyph = [0, 0, 0, 0, 0, 0, 0b00000001, 0];

/// Right half of the decimal point on the tenths panel.
///
/// Left dark: the gap between 10888AS modules already reads as part of the
/// dot and a second pixel makes it look like a colon.
pub const DECIMAL_RIGHT: Glyph = BLANK;

pub const LETTER_P: Glyph = [
    0b01111100, 0b01100110, 0b01100110, 0b01111100, 0b01100000, 0b01100000, 0b01100000,
    0b00000000,
];

pub const LETTER_A: Glyph = [
    0b00111100, 0b01100110, 0b01100110, 0b01111110, 0b01100110, 0b01100110, 0b01100110,
    0b00000000,
];

pub const LETTER_I: Glyph = [
    0b01111110, 0b00011000, 0b00011000, 0b00011000, 0b00011000, 0b00011000, 0b01111110,
    0b00000000,
];

pub const LETTER_R: Glyph = [
    0b01111100, 0b01100110, 0b01100110, 0b01111100, 0b01101100, 0b01100110, 0b01100110,
    0b00000000,
];

pub const LETTER_O: Glyph = [
    0b00111100, 0b01100110, 0b01100110, 0b01100110, 0b01100110, 0b01100110, 0b00111100,
    0b00000000,
];

pub const LETTER_K: Glyph = [
    0b01100110, 0b01101100, 0b01111000, 0b01110000, 0b01111000, 0b01101100, 0b01100110,
    0b00000000,
];

/// Look up a digit glyph; values above 9 render blank
pub fn digit(value: u8) -> Glyph {
    DIGITS.get(value as usize).copied().unwrap_or(BLANK)
}

/// Overlay two glyphs (bitwise OR per row)
pub fn overlay(base: Glyph, mark: Glyph) -> Glyph {
    let mut out = base;
    for (row, bits) in out.iter_mut().zip(mark.iter()) {
        *row |= *bits;
    }
    out
}
