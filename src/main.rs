//! Thermostat Firmware: Main Entry Point
//!
//! ```text
//!   EepromAdapter (NVS)   PinDriver + FreeRtos
//!          │                     │
//!     ByteStore             StatusLed
//!          └────────┬────────────┘
//!                 boot()
//!                   │
//!             ThresholdSet
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyOutputPin, PinDriver};
use log::{info, warn};

use thermostat::adapters::eeprom::EepromAdapter;
use thermostat::app::boot::boot;
use thermostat::config::{COOL_THRESHOLD, HEAT_THRESHOLD, ThermostatConfig};
use thermostat::drivers::status_led::StatusLed;
use thermostat::pins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("Thermostat v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Persistent store ───────────────────────────────────
    let config = ThermostatConfig::default();
    let mut store = match EepromAdapter::new(config.store_capacity) {
        Ok(store) => store,
        Err(e) => {
            // Thresholds still load (as defaults); they just won't persist
            // until NVS recovers on a later boot.
            warn!("EEPROM init failed ({}), running without persistence", e);
            EepromAdapter::volatile(config.store_capacity)
        }
    };

    // ── 3. Status LED ─────────────────────────────────────────
    // SAFETY: STATUS_LED_GPIO is owned by nothing else on this board.
    let pin = PinDriver::output(unsafe { AnyOutputPin::new(pins::STATUS_LED_GPIO) })?;
    let mut led = StatusLed::new(pin, FreeRtos, config.led);

    // ── 4. Load thresholds ────────────────────────────────────
    let thresholds = boot(&config, &mut store, &mut led)?;
    info!(
        "Ready: heat={:?} cool={:?} (persistent={})",
        thresholds.get(HEAT_THRESHOLD),
        thresholds.get(COOL_THRESHOLD),
        store.is_persistent()
    );

    loop {
        FreeRtos::delay_ms(1000);
    }
}
