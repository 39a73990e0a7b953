//! Output drivers.

pub mod status_led;
