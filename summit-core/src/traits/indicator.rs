//! Status light trait

/// Errors from the indicator output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IndicatorError {
    /// PWM channel rejected the duty cycle
    Pwm,
}

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const OFF: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Check if every channel is off
    pub fn is_off(&self) -> bool {
        *self == Self::OFF
    }
}

/// Trait for a single RGB status light
pub trait Indicator {
    /// Set the light colour
    fn set_color(&mut self, color: Color) -> Result<(), IndicatorError>;

    /// Turn the light off
    fn off(&mut self) -> Result<(), IndicatorError> {
        self.set_color(Color::OFF)
    }
}
