//! Pin assignments and peripheral bring-up
//!
//! Every unit uses the same wiring, so one board layout serves all images:
//!
//! | Function                       | GPIO |
//! |--------------------------------|------|
//! | Matrix CLK                     | 5    |
//! | Matrix DATA (MOSI)             | 16   |
//! | Matrix CS                      | 17   |
//! | Stop button / start pad        | 33   |
//! | Reset button (bottom unit)     | 25   |
//! | Diagnostic button              | 32   |
//! | Status light R / G / B         | 19 / 23 / 18 |
//!
//! Buttons are active-low against the internal pull-up.

use embedded_hal::pwm::{ErrorKind, ErrorType, SetDutyCycle};
use embedded_hal_bus::spi::ExclusiveDevice;
use esp_hal::delay::Delay;
use esp_hal::gpio::{Input, InputConfig, InputPin, Level, Output, OutputConfig, Pull};
use esp_hal::ledc::channel::{self, ChannelIFace};
use esp_hal::ledc::timer::{self, TimerIFace};
use esp_hal::ledc::{LSGlobalClkSource, Ledc, LowSpeed};
use esp_hal::peripherals::{GPIO16, GPIO17, GPIO18, GPIO19, GPIO23, GPIO5, LEDC, SPI2};
use esp_hal::spi::master::{Config as SpiConfig, Spi};
use esp_hal::spi::Mode;
use esp_hal::time::Rate;
use esp_hal::Blocking;

use summit_core::config::DisplayConfig;
use summit_drivers::{Max7219, RgbLed};

use crate::mk_static;

/// MAX7219 is good for 10 MHz; the long ribbon to the panels is not
const MATRIX_SPI_KHZ: u32 = 1_000;

/// Status light PWM frequency
const LED_PWM_KHZ: u32 = 5;

/// Board bring-up errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum BoardError {
    /// SPI bus configuration rejected
    Spi,
    /// Chip select could not be driven
    ChipSelect,
    /// Matrix init sequence failed
    Matrix,
    /// LEDC timer or channel configuration rejected
    Pwm,
}

pub type Matrix = Max7219<ExclusiveDevice<Spi<'static, Blocking>, Output<'static>, Delay>>;

pub type StatusLed = RgbLed<LedcDuty, LedcDuty, LedcDuty>;

/// Bring up the 4-panel matrix on SPI2 and run its init sequence
pub fn matrix(
    spi: SPI2<'static>,
    clk: GPIO5<'static>,
    data: GPIO16<'static>,
    cs: GPIO17<'static>,
    config: DisplayConfig,
) -> Result<Matrix, BoardError> {
    let spi_config = SpiConfig::default()
        .with_frequency(Rate::from_khz(MATRIX_SPI_KHZ))
        .with_mode(Mode::_0);
    let bus = Spi::new(spi, spi_config)
        .map_err(|_| BoardError::Spi)?
        .with_sck(clk)
        .with_mosi(data);

    let cs = Output::new(cs, Level::High, OutputConfig::default());
    let device = ExclusiveDevice::new(bus, cs, Delay::new()).map_err(|_| BoardError::ChipSelect)?;

    let mut matrix = Max7219::new(device, config);
    matrix.init().map_err(|_| BoardError::Matrix)?;
    Ok(matrix)
}

/// Active-low button with the internal pull-up enabled
pub fn button<'d>(pin: impl InputPin + 'd) -> Input<'d> {
    Input::new(pin, InputConfig::default().with_pull(Pull::Up))
}

/// Bring up the RGB status light on three LEDC channels, turned off
pub fn status_led(
    ledc: LEDC<'static>,
    red: GPIO19<'static>,
    green: GPIO23<'static>,
    blue: GPIO18<'static>,
) -> Result<StatusLed, BoardError> {
    let ledc = mk_static!(Ledc<'static>, Ledc::new(ledc));
    ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);

    let pwm_timer = mk_static!(
        timer::Timer<'static, LowSpeed>,
        ledc.timer::<LowSpeed>(timer::Number::Timer0)
    );
    pwm_timer
        .configure(timer::config::Config {
            duty: timer::config::Duty::Duty8Bit,
            clock_source: timer::LSClockSource::APBClk,
            frequency: Rate::from_khz(LED_PWM_KHZ),
        })
        .map_err(|_| BoardError::Pwm)?;
    let pwm_timer: &'static timer::Timer<'static, LowSpeed> = pwm_timer;

    let config = || channel::config::Config {
        timer: pwm_timer,
        duty_pct: 0,
        pin_config: channel::config::PinConfig::PushPull,
    };

    let mut red = ledc.channel(channel::Number::Channel0, red);
    red.configure(config()).map_err(|_| BoardError::Pwm)?;
    let mut green = ledc.channel(channel::Number::Channel1, green);
    green.configure(config()).map_err(|_| BoardError::Pwm)?;
    let mut blue = ledc.channel(channel::Number::Channel2, blue);
    blue.configure(config()).map_err(|_| BoardError::Pwm)?;

    RgbLed::new(LedcDuty(red), LedcDuty(green), LedcDuty(blue)).map_err(|_| BoardError::Pwm)
}

/// LEDC channel as an `embedded-hal` PWM output
///
/// LEDC takes whole percent, so the duty range is 0-100.
pub struct LedcDuty(channel::Channel<'static, LowSpeed>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwmError;

impl embedded_hal::pwm::Error for PwmError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

impl ErrorType for LedcDuty {
    type Error = PwmError;
}

impl SetDutyCycle for LedcDuty {
    fn max_duty_cycle(&self) -> u16 {
        100
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), PwmError> {
        self.0.set_duty(duty.min(100) as u8).map_err(|_| PwmError)
    }
}
