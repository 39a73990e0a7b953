//! System configuration parameters
//!
//! Where each threshold lives in the persistent store, the range it must
//! stay within, and how the status LED signals.  The threshold *values*
//! live in the store; this struct only describes them.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::threshold::{ThresholdLayout, ThresholdSlot};

/// Slot name of the heating threshold.
pub const HEAT_THRESHOLD: &str = "heat";
/// Slot name of the cooling threshold.
pub const COOL_THRESHOLD: &str = "cool";

/// Address and allowed range of one persisted threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdBounds {
    /// Store address of the first byte
    pub address: usize,
    pub minimum: f32,
    pub maximum: f32,
    /// Value written back when the stored one is out of range
    pub default: f32,
}

impl ThresholdBounds {
    pub fn slot(&self, name: &'static str) -> ThresholdSlot {
        ThresholdSlot::new(name, self.address, self.minimum, self.maximum, self.default)
    }
}

/// Status LED timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// HIGH and LOW period of one pulse (milliseconds)
    pub pulse_ms: u32,
    /// Pulses shown at boot
    pub boot_pulses: u32,
    /// Pulses shown when a threshold had to be restored
    pub repair_pulses: u32,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            pulse_ms: 100,
            boot_pulses: 1,
            repair_pulses: 3,
        }
    }
}

/// Core thermostat configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermostatConfig {
    // --- Store ---
    /// Size of the persistent store in bytes
    pub store_capacity: usize,

    // --- Thresholds (degrees Celsius) ---
    /// Heating turns on below this temperature
    pub heat_threshold: ThresholdBounds,
    /// Cooling turns on above this temperature
    pub cool_threshold: ThresholdBounds,

    // --- Indicator ---
    pub led: IndicatorConfig,
}

impl Default for ThermostatConfig {
    fn default() -> Self {
        Self {
            store_capacity: crate::adapters::eeprom::DEFAULT_CAPACITY,

            heat_threshold: ThresholdBounds {
                address: 0,
                minimum: 5.0,
                maximum: 30.0,
                default: 19.0,
            },
            cool_threshold: ThresholdBounds {
                address: 4,
                minimum: 10.0,
                maximum: 35.0,
                default: 24.0,
            },

            led: IndicatorConfig::default(),
        }
    }
}

impl ThermostatConfig {
    /// Check cross-field constraints that the layout cannot see.
    pub fn validate(&self) -> Result<()> {
        if self.heat_threshold.default >= self.cool_threshold.default {
            return Err(Error::Config(
                "heat threshold default must be below cool threshold default",
            ));
        }
        if self.led.pulse_ms == 0 {
            return Err(Error::Config("led pulse_ms must be non-zero"));
        }
        if self.led.boot_pulses == self.led.repair_pulses {
            return Err(Error::Config(
                "boot and repair pulse counts must differ",
            ));
        }
        Ok(())
    }

    /// Validate the configuration and build the threshold layout.
    pub fn layout(&self) -> Result<ThresholdLayout> {
        self.validate()?;
        let mut layout = ThresholdLayout::new(self.store_capacity);
        layout.push(self.heat_threshold.slot(HEAT_THRESHOLD))?;
        layout.push(self.cool_threshold.slot(COOL_THRESHOLD))?;
        Ok(layout)
    }
}
