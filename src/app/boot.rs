//! Startup sequence: validate the threshold map, load every threshold
//! (repairing corrupted or erased cells), and report on the status LED.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{Error as _, OutputPin};
use log::info;

use crate::app::ports::ByteStore;
use crate::config::ThermostatConfig;
use crate::drivers::status_led::{Indication, StatusLed};
use crate::error::{Error, Result};
use crate::threshold::ThresholdSet;

/// Load all thresholds from `store` and signal the result on `led`.
///
/// Blinks [`Indication::Boot`], then [`Indication::ThresholdsRepaired`]
/// if any slot had to be restored.  Fails only on an invalid
/// configuration (before touching the store) or an LED pin error.
pub fn boot<S, P, D>(
    config: &ThermostatConfig,
    store: &mut S,
    led: &mut StatusLed<P, D>,
) -> Result<ThresholdSet>
where
    S: ByteStore + ?Sized,
    P: OutputPin,
    D: DelayNs,
{
    let layout = config.layout()?;
    if layout.capacity() > store.capacity() {
        return Err(Error::Config("configured store capacity exceeds the device store"));
    }

    let thresholds = layout.load_all(store);
    for (name, value) in thresholds.iter() {
        info!("Threshold '{}' = {:.2}", name, value);
    }

    led.signal(Indication::Boot).map_err(|e| Error::Indicator(e.kind()))?;

    if thresholds.repaired_count() > 0 {
        info!(
            "Boot: {} threshold(s) restored to defaults",
            thresholds.repaired_count()
        );
        led.signal(Indication::ThresholdsRepaired)
            .map_err(|e| Error::Indicator(e.kind()))?;
    }

    Ok(thresholds)
}
