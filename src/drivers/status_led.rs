//! Single-colour status LED driver.
//!
//! The LED is a plain GPIO output; signalling is done by blinking it a
//! fixed number of times.  Blinking blocks the caller for the whole pulse
//! train (`times * 2 * wait - wait`), there is no background task.
//!
//! ## Dual-target design
//!
//! Generic over `embedded-hal` 1.0 [`OutputPin`] and [`DelayNs`]: on
//! ESP-IDF a `PinDriver` and `FreeRtos`; on host/test, recording mocks.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::debug;

use crate::config::IndicatorConfig;

/// Pulse `pin` HIGH `times` times, each HIGH and LOW period `wait_ms` long.
///
/// There is no LOW gap after the final pulse; the pin is LOW when the
/// function returns.  `times == 0` does nothing.
pub fn flash_led<P, D>(pin: &mut P, delay: &mut D, times: u32, wait_ms: u32) -> Result<(), P::Error>
where
    P: OutputPin,
    D: DelayNs,
{
    for i in 0..times {
        pin.set_high()?;
        delay.delay_ms(wait_ms);
        pin.set_low()?;

        if i + 1 < times {
            delay.delay_ms(wait_ms);
        }
    }
    Ok(())
}

/// What the LED is telling the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indication {
    /// Firmware started.
    Boot,
    /// At least one persisted threshold was restored to its default.
    ThresholdsRepaired,
}

pub struct StatusLed<P, D> {
    pin: P,
    delay: D,
    config: IndicatorConfig,
}

impl<P: OutputPin, D: DelayNs> StatusLed<P, D> {
    pub fn new(pin: P, delay: D, config: IndicatorConfig) -> Self {
        Self { pin, delay, config }
    }

    /// Blink `times` pulses at the configured pulse width.
    pub fn flash(&mut self, times: u32) -> Result<(), P::Error> {
        flash_led(&mut self.pin, &mut self.delay, times, self.config.pulse_ms)
    }

    pub fn signal(&mut self, indication: Indication) -> Result<(), P::Error> {
        let times = match indication {
            Indication::Boot => self.config.boot_pulses,
            Indication::ThresholdsRepaired => self.config.repair_pulses,
        };
        debug!("status LED: {:?} ({} pulses)", indication, times);
        self.flash(times)
    }

    pub fn off(&mut self) -> Result<(), P::Error> {
        self.pin.set_low()
    }

    /// Give back the pin and delay.
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }
}
