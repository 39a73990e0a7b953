//! Unified error types for the thermostat firmware.
//!
//! The persistence primitives themselves are total; errors only arise when
//! a threshold layout is assembled, when a validated write is rejected, or
//! when the status LED pin reports a fault.  All variants are `Copy` so
//! they can be logged and passed around without allocation.

use core::fmt;

use embedded_hal::digital::ErrorKind;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The threshold address map is invalid.
    Layout(LayoutError),
    /// A configuration value was rejected.
    Config(&'static str),
    /// The status LED pin could not be driven.
    Indicator(ErrorKind),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(e) => write!(f, "layout: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Indicator(kind) => write!(f, "indicator: {kind}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Layout errors
// ---------------------------------------------------------------------------

/// Reasons a threshold slot cannot join a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    /// The slot's bytes extend past the end of the store.
    OutOfBounds {
        name: &'static str,
        address: usize,
        capacity: usize,
    },
    /// Two slots share at least one byte.
    Overlap {
        first: &'static str,
        second: &'static str,
    },
    /// Another slot already uses this name.
    DuplicateName(&'static str),
    /// `minimum > maximum`, so every read would repair.
    EmptyRange(&'static str),
    /// The default would itself be repaired on the next read.
    DefaultOutOfRange(&'static str),
    /// The layout table is full.
    TooManySlots,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                name,
                address,
                capacity,
            } => write!(
                f,
                "slot '{name}' at {address} does not fit a {capacity}-byte store"
            ),
            Self::Overlap { first, second } => {
                write!(f, "slots '{first}' and '{second}' overlap")
            }
            Self::DuplicateName(name) => write!(f, "duplicate slot name '{name}'"),
            Self::EmptyRange(name) => write!(f, "slot '{name}' has minimum > maximum"),
            Self::DefaultOutOfRange(name) => {
                write!(f, "slot '{name}' default lies outside its range")
            }
            Self::TooManySlots => write!(f, "layout table full"),
        }
    }
}

impl From<LayoutError> for Error {
    fn from(e: LayoutError) -> Self {
        Self::Layout(e)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::Indicator(kind)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
