//! Thermostat firmware library.
//!
//! Persisted threshold storage (byte codec, range-checked accessors with
//! self-repair, validated layouts) and status LED signalling.  All
//! ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module, so everything here builds and tests on the host.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod codec;
pub mod config;
pub mod drivers;
pub mod error;
pub mod pins;
pub mod threshold;

pub use error::{Error, LayoutError, Result};
