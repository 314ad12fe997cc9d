//! MAX7219 LED matrix chain driver
//!
//! Drives a daisy chain of MAX7219 modules, one 8x8 panel each, over a
//! single SPI device. Every write is one chip-select frame carrying a
//! 16-bit (register, data) word for each module in the chain.
//!
//! # Chain order
//!
//! Words shift through the chain, so the first word clocked out ends up
//! in the module furthest from the MCU. Panel 0 is the module wired to
//! the MCU and its word is sent last.
//!
//! ```ignore
//! let mut matrix = Max7219::new(spi, DisplayConfig::default());
//! matrix.init()?;
//! matrix.show(&Readout::from_millis(12_345).to_frame())?;
//! ```

use embedded_hal::spi::SpiDevice;
use summit_core::config::types::{DisplayConfig, MAX_INTENSITY, PANEL_COUNT};
use summit_core::display::{Glyph, PanelFrame, ROWS_PER_PANEL};
use summit_core::traits::{DisplayError, MatrixDisplay};

/// MAX7219 register addresses
pub mod reg {
    pub const NOOP: u8 = 0x00;
    /// Row 0; rows 1-7 follow at consecutive addresses
    pub const DIGIT0: u8 = 0x01;
    pub const DECODE_MODE: u8 = 0x09;
    pub const INTENSITY: u8 = 0x0A;
    pub const SCAN_LIMIT: u8 = 0x0B;
    pub const SHUTDOWN: u8 = 0x0C;
    pub const DISPLAY_TEST: u8 = 0x0F;
}

/// Bytes in one chain-wide write
const FRAME_BYTES: usize = PANEL_COUNT * 2;

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// SPI transfer failed
    Spi(E),
    /// Panel or row outside the chain
    OutOfRange,
}

/// MAX7219 chain
pub struct Max7219<SPI> {
    spi: SPI,
    intensity: u8,
    /// Modules whose digit lines drive columns need glyphs transposed
    column_wired: bool,
}

impl<SPI: SpiDevice> Max7219<SPI> {
    /// Create a driver; nothing is sent until [`init`](Self::init)
    pub fn new(spi: SPI, config: DisplayConfig) -> Self {
        Self {
            spi,
            intensity: config.intensity.min(MAX_INTENSITY),
            column_wired: config.column_wired,
        }
    }

    /// Bring every module out of power-on state
    ///
    /// Display test off, all eight rows scanned, raw (no BCD decode),
    /// rows cleared, configured intensity, then shutdown released.
    pub fn init(&mut self) -> Result<(), Error<SPI::Error>> {
        self.write_all(reg::DISPLAY_TEST, 0)?;
        self.write_all(reg::SCAN_LIMIT, 7)?;
        self.write_all(reg::DECODE_MODE, 0)?;
        self.write_frame(&PanelFrame::BLANK)?;
        self.write_all(reg::INTENSITY, self.intensity)?;
        self.shutdown(false)
    }

    /// Set brightness on every module (0-15, clamped)
    pub fn set_intensity(&mut self, level: u8) -> Result<(), Error<SPI::Error>> {
        self.intensity = level.min(MAX_INTENSITY);
        self.write_all(reg::INTENSITY, self.intensity)
    }

    pub fn intensity(&self) -> u8 {
        self.intensity
    }

    /// Enter or leave low-power shutdown; display RAM is kept
    pub fn shutdown(&mut self, off: bool) -> Result<(), Error<SPI::Error>> {
        self.write_all(reg::SHUTDOWN, if off { 0 } else { 1 })
    }

    /// Write one row of one panel; other modules get a no-op
    pub fn write_row(
        &mut self,
        panel: usize,
        row: usize,
        bits: u8,
    ) -> Result<(), Error<SPI::Error>> {
        if panel >= PANEL_COUNT || row >= ROWS_PER_PANEL {
            return Err(Error::OutOfRange);
        }

        let mut words = [(reg::NOOP, 0); PANEL_COUNT];
        words[panel] = (reg::DIGIT0 + row as u8, bits);
        self.transfer(&words)
    }

    /// Write a whole frame, one chain-wide transfer per row
    pub fn write_frame(&mut self, frame: &PanelFrame) -> Result<(), Error<SPI::Error>> {
        let mut panels = *frame.panels();
        if self.column_wired {
            for glyph in panels.iter_mut() {
                *glyph = transpose(glyph);
            }
        }

        for row in 0..ROWS_PER_PANEL {
            let mut words = [(reg::NOOP, 0); PANEL_COUNT];
            for (word, glyph) in words.iter_mut().zip(panels.iter()) {
                *word = (reg::DIGIT0 + row as u8, glyph[row]);
            }
            self.transfer(&words)?;
        }
        Ok(())
    }

    /// Release the SPI device
    pub fn release(self) -> SPI {
        self.spi
    }

    fn write_all(&mut self, register: u8, data: u8) -> Result<(), Error<SPI::Error>> {
        self.transfer(&[(register, data); PANEL_COUNT])
    }

    /// Send one word per panel, indexed by panel number
    fn transfer(&mut self, words: &[(u8, u8); PANEL_COUNT]) -> Result<(), Error<SPI::Error>> {
        let mut buf = [0u8; FRAME_BYTES];
        // Furthest panel first
        for (chunk, (register, data)) in buf.chunks_exact_mut(2).zip(words.iter().rev()) {
            chunk[0] = *register;
            chunk[1] = *data;
        }
        self.spi.write(&buf).map_err(Error::Spi)
    }
}

impl<SPI: SpiDevice> MatrixDisplay for Max7219<SPI> {
    fn show(&mut self, frame: &PanelFrame) -> Result<(), DisplayError> {
        self.write_frame(frame).map_err(|e| match e {
            Error::Spi(_) => DisplayError::Bus,
            Error::OutOfRange => DisplayError::OutOfRange,
        })
    }
}

/// Swap rows and columns, keeping the MSB as the leftmost pixel
pub fn transpose(glyph: &Glyph) -> Glyph {
    let mut out = [0u8; ROWS_PER_PANEL];
    for (row, bits) in glyph.iter().enumerate() {
        for (col, out_bits) in out.iter_mut().enumerate() {
            if bits & (0x80 >> col) != 0 {
                *out_bits |= 0x80 >> row;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::spi::{ErrorKind, ErrorType, Operation};
    use heapless::Vec;
    use summit_core::display::glyphs;

    /// SPI device that records every write
    #[derive(Default)]
    struct MockSpi {
        writes: Vec<Vec<u8, FRAME_BYTES>, 32>,
    }

    impl ErrorType for MockSpi {
        type Error = Infallible;
    }

    impl SpiDevice for MockSpi {
        fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Infallible> {
            for op in operations.iter() {
                if let Operation::Write(data) = op {
                    self.writes
                        .push(Vec::from_slice(data).unwrap())
                        .unwrap();
                }
            }
            Ok(())
        }
    }

    /// SPI device that fails every transfer
    struct BrokenSpi;

    impl ErrorType for BrokenSpi {
        type Error = ErrorKind;
    }

    impl SpiDevice for BrokenSpi {
        fn transaction(&mut self, _: &mut [Operation<'_, u8>]) -> Result<(), ErrorKind> {
            Err(ErrorKind::Other)
        }
    }

    fn driver() -> Max7219<MockSpi> {
        Max7219::new(MockSpi::default(), DisplayConfig::default())
    }

    #[test]
    fn test_init_sequence() {
        let mut matrix = driver();
        matrix.init().unwrap();
        let spi = matrix.release();

        // 3 config writes, 8 row clears, intensity, shutdown
        assert_eq!(spi.writes.len(), 13);
        assert_eq!(spi.writes[0].as_slice(), &[0x0F, 0, 0x0F, 0, 0x0F, 0, 0x0F, 0]);
        assert_eq!(spi.writes[1].as_slice(), &[0x0B, 7, 0x0B, 7, 0x0B, 7, 0x0B, 7]);
        assert_eq!(spi.writes[2].as_slice(), &[0x09, 0, 0x09, 0, 0x09, 0, 0x09, 0]);
        assert_eq!(spi.writes[11].as_slice(), &[0x0A, 15, 0x0A, 15, 0x0A, 15, 0x0A, 15]);
        assert_eq!(spi.writes[12].as_slice(), &[0x0C, 1, 0x0C, 1, 0x0C, 1, 0x0C, 1]);
    }

    #[test]
    fn test_panel_zero_sent_last() {
        let mut matrix = driver();
        matrix.write_row(0, 2, 0xAB).unwrap();
        let spi = matrix.release();
        assert_eq!(spi.writes[0].as_slice(), &[0, 0, 0, 0, 0, 0, 0x03, 0xAB]);
    }

    #[test]
    fn test_write_row_out_of_range() {
        let mut matrix = driver();
        assert_eq!(matrix.write_row(4, 0, 0xFF), Err(Error::OutOfRange));
        assert_eq!(matrix.write_row(0, 8, 0xFF), Err(Error::OutOfRange));
        assert!(matrix.release().writes.is_empty());
    }

    #[test]
    fn test_frame_rows() {
        let mut matrix = driver();
        let frame = PanelFrame::new([
            glyphs::digit(1),
            glyphs::digit(2),
            glyphs::digit(3),
            glyphs::digit(4),
        ]);
        matrix.show(&frame).unwrap();
        let spi = matrix.release();

        assert_eq!(spi.writes.len(), ROWS_PER_PANEL);
        for (row, write) in spi.writes.iter().enumerate() {
            let reg = 0x01 + row as u8;
            assert_eq!(
                write.as_slice(),
                &[
                    reg,
                    glyphs::digit(4)[row],
                    reg,
                    glyphs::digit(3)[row],
                    reg,
                    glyphs::digit(2)[row],
                    reg,
                    glyphs::digit(1)[row],
                ]
            );
        }
    }

    #[test]
    fn test_intensity_clamped() {
        let mut matrix = driver();
        matrix.set_intensity(40).unwrap();
        assert_eq!(matrix.intensity(), 15);
        let spi = matrix.release();
        assert_eq!(spi.writes[0][1], 15);
    }

    #[test]
    fn test_shutdown() {
        let mut matrix = driver();
        matrix.shutdown(true).unwrap();
        let spi = matrix.release();
        assert_eq!(spi.writes[0].as_slice(), &[0x0C, 0, 0x0C, 0, 0x0C, 0, 0x0C, 0]);
    }

    #[test]
    fn test_transpose() {
        // Top row lit becomes left column lit
        let glyph = [0xFF, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(transpose(&glyph), [0x80; 8]);
        let digit = glyphs::digit(7);
        assert_eq!(transpose(&transpose(&digit)), digit);
    }

    #[test]
    fn test_column_wired_transposes() {
        let config = DisplayConfig {
            column_wired: true,
            ..DisplayConfig::default()
        };
        let mut matrix = Max7219::new(MockSpi::default(), config);
        let frame = PanelFrame::new([[0xFF, 0, 0, 0, 0, 0, 0, 0]; PANEL_COUNT]);
        matrix.write_frame(&frame).unwrap();
        let spi = matrix.release();
        for write in spi.writes.iter() {
            assert_eq!(write[1], 0x80);
        }
    }

    #[test]
    fn test_bus_error_maps_to_display_error() {
        let mut matrix = Max7219::new(BrokenSpi, DisplayConfig::default());
        assert_eq!(matrix.init(), Err(Error::Spi(ErrorKind::Other)));
        assert_eq!(matrix.show(&PanelFrame::BLANK), Err(DisplayError::Bus));
        assert_eq!(matrix.clear(), Err(DisplayError::Bus));
    }
}
