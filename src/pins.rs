//! GPIO assignments for the thermostat controller board.
//!
//! Single source of truth: drivers reference this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Status LED
// ---------------------------------------------------------------------------

/// Digital output: on-board status LED (active HIGH).
pub const STATUS_LED_GPIO: i32 = 2;
