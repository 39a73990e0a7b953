//! Fuzz target: threshold load over arbitrary store images
//!
//! Loads the default layout from an arbitrary 16-byte store image and
//! verifies:
//! - No panics under arbitrary byte inputs
//! - Every loaded value lies inside its slot's range
//! - A second load finds nothing left to repair
//!
//! cargo fuzz run fuzz_threshold_load

#![no_main]

use libfuzzer_sys::fuzz_target;
use thermostat::adapters::ram::RamStore;
use thermostat::config::ThermostatConfig;

fuzz_target!(|data: &[u8]| {
    let config = ThermostatConfig {
        store_capacity: 16,
        ..Default::default()
    };
    let Ok(layout) = config.layout() else {
        return;
    };

    let mut store = RamStore::<16>::from_image(data);
    let first = layout.load_all(&mut store);

    for slot in layout.slots() {
        let value = first.get(slot.name).expect("every slot is loaded");
        assert!(slot.contains(value), "{} = {} escaped its range", slot.name, value);
    }

    let second = layout.load_all(&mut store);
    assert_eq!(second.repaired_count(), 0);
});
