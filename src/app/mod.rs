//! Application core: startup logic, zero direct I/O.
//!
//! All interaction with hardware happens through the [`ports::ByteStore`]
//! trait and the `embedded-hal` pin/delay traits, keeping this layer fully
//! testable without real peripherals.

pub mod boot;
pub mod ports;
