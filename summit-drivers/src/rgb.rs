//! RGB status light on three PWM channels
//!
//! Channel levels are 0-255 and scaled onto each channel's duty range.

use embedded_hal::pwm::SetDutyCycle;
use summit_core::traits::{Color, Indicator, IndicatorError};

/// PWM-driven RGB LED
pub struct RgbLed<R, G, B> {
    red: R,
    green: G,
    blue: B,
    /// Common anode LEDs light when the pin is low
    common_anode: bool,
    color: Color,
}

impl<R, G, B> RgbLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    /// Create a common-cathode LED and turn it off
    pub fn new(red: R, green: G, blue: B) -> Result<Self, IndicatorError> {
        Self::with_polarity(red, green, blue, false)
    }

    /// Create a common-anode LED and turn it off
    pub fn new_common_anode(red: R, green: G, blue: B) -> Result<Self, IndicatorError> {
        Self::with_polarity(red, green, blue, true)
    }

    fn with_polarity(
        red: R,
        green: G,
        blue: B,
        common_anode: bool,
    ) -> Result<Self, IndicatorError> {
        let mut led = Self {
            red,
            green,
            blue,
            common_anode,
            color: Color::OFF,
        };
        led.set_color(Color::OFF)?;
        Ok(led)
    }

    /// Last colour written
    pub fn color(&self) -> Color {
        self.color
    }
}

fn apply<P: SetDutyCycle>(
    pin: &mut P,
    level: u8,
    common_anode: bool,
) -> Result<(), IndicatorError> {
    let level = if common_anode { u8::MAX - level } else { level };
    pin.set_duty_cycle_fraction(u16::from(level), u16::from(u8::MAX))
        .map_err(|_| IndicatorError::Pwm)
}

impl<R, G, B> Indicator for RgbLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    fn set_color(&mut self, color: Color) -> Result<(), IndicatorError> {
        apply(&mut self.red, color.r, self.common_anode)?;
        apply(&mut self.green, color.g, self.common_anode)?;
        apply(&mut self.blue, color.b, self.common_anode)?;
        self.color = color;
        Ok(())
    }
}
