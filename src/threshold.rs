//! Persisted threshold access with range validation and self-repair.
//!
//! A threshold is an `f32` stored at a fixed address.  Reading it checks
//! the value against a closed range; anything outside the range is
//! replaced by the default *and the default is written back*, so
//! corrupted or never-initialised storage converges to a known-good value
//! on the first read.  NaN (including the all-`0xFF` pattern of an erased
//! EEPROM cell) counts as out of range.
//!
//! [`read_threshold`] / [`write_threshold`] are the raw accessors.
//! [`ThresholdSlot`] and [`ThresholdLayout`] add names and a validated
//! address map on top of them.

use heapless::Vec;
use log::{debug, warn};

use crate::app::ports::ByteStore;
use crate::codec::{StoreCodec, decode, encode};
use crate::error::{Error, LayoutError, Result};

/// Store bytes occupied by one threshold.
pub const THRESHOLD_SIZE: usize = <f32 as StoreCodec>::SIZE;

/// Maximum number of slots in a [`ThresholdLayout`].
pub const MAX_SLOTS: usize = 8;

/// `minimum <= value <= maximum`; false for NaN.
fn in_range(value: f32, minimum: f32, maximum: f32) -> bool {
    value >= minimum && value <= maximum
}

/// Outcome of a validated read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdReading {
    pub value: f32,
    /// The stored value was out of range and has been overwritten.
    pub repaired: bool,
}

fn read_checked<S: ByteStore + ?Sized>(
    store: &mut S,
    address: usize,
    minimum: f32,
    maximum: f32,
    default: f32,
) -> ThresholdReading {
    let value: f32 = decode(store, address);

    if in_range(value, minimum, maximum) {
        debug!("threshold @{}: {}", address, value);
        return ThresholdReading {
            value,
            repaired: false,
        };
    }

    warn!(
        "threshold @{}: stored {} outside [{}, {}], restoring default {}",
        address, value, minimum, maximum, default
    );
    encode(store, address, &default);
    ThresholdReading {
        value: default,
        repaired: true,
    }
}

/// Read the threshold at `address`, repairing it if out of range.
///
/// Returns the stored value when `minimum <= value <= maximum`; otherwise
/// writes `default` to `address` and returns it.  Every out-of-range read
/// performs the write.  With `minimum > maximum`, or with either bound
/// NaN, no value is in range and every read repairs.
pub fn read_threshold<S: ByteStore + ?Sized>(
    store: &mut S,
    address: usize,
    minimum: f32,
    maximum: f32,
    default: f32,
) -> f32 {
    read_checked(store, address, minimum, maximum, default).value
}

/// Unconditionally store `value` at `address`.
pub fn write_threshold<S: ByteStore + ?Sized>(store: &mut S, address: usize, value: f32) {
    encode(store, address, &value);
}

// ---------------------------------------------------------------------------
// Named slots
// ---------------------------------------------------------------------------

/// A named threshold with its address and allowed range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdSlot {
    pub name: &'static str,
    pub address: usize,
    pub minimum: f32,
    pub maximum: f32,
    pub default: f32,
}

impl ThresholdSlot {
    pub const fn new(
        name: &'static str,
        address: usize,
        minimum: f32,
        maximum: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            address,
            minimum,
            maximum,
            default,
        }
    }

    /// One past the last store byte used by this slot.
    pub fn end(&self) -> usize {
        self.address.saturating_add(THRESHOLD_SIZE)
    }

    pub fn contains(&self, value: f32) -> bool {
        in_range(value, self.minimum, self.maximum)
    }

    fn overlaps(&self, other: &Self) -> bool {
        self.address < other.end() && other.address < self.end()
    }

    pub fn read<S: ByteStore + ?Sized>(&self, store: &mut S) -> ThresholdReading {
        read_checked(store, self.address, self.minimum, self.maximum, self.default)
    }

    /// Store `value` without validation.
    pub fn write<S: ByteStore + ?Sized>(&self, store: &mut S, value: f32) {
        write_threshold(store, self.address, value);
    }

    /// Store `value` only if it lies inside the slot's range.
    ///
    /// Rejected values are not clamped and the store is left untouched.
    pub fn set<S: ByteStore + ?Sized>(&self, store: &mut S, value: f32) -> Result<()> {
        if !self.contains(value) {
            warn!(
                "threshold '{}': rejected {} outside [{}, {}]",
                self.name, value, self.minimum, self.maximum
            );
            return Err(Error::Config("threshold outside its allowed range"));
        }
        self.write(store, value);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Validated, non-overlapping map of threshold slots for one store.
#[derive(Debug, Clone)]
pub struct ThresholdLayout {
    capacity: usize,
    slots: Vec<ThresholdSlot, MAX_SLOTS>,
}

impl ThresholdLayout {
    /// Empty layout for a store of `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            slots: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Add a slot after checking its range, default, bounds and neighbours.
    pub fn push(&mut self, slot: ThresholdSlot) -> Result<()> {
        if slot.minimum.is_nan() || slot.maximum.is_nan() || slot.minimum > slot.maximum {
            return Err(LayoutError::EmptyRange(slot.name).into());
        }
        if !slot.contains(slot.default) {
            return Err(LayoutError::DefaultOutOfRange(slot.name).into());
        }
        if slot.address >= self.capacity || slot.end() > self.capacity {
            return Err(LayoutError::OutOfBounds {
                name: slot.name,
                address: slot.address,
                capacity: self.capacity,
            }
            .into());
        }
        for existing in &self.slots {
            if existing.name == slot.name {
                return Err(LayoutError::DuplicateName(slot.name).into());
            }
            if existing.overlaps(&slot) {
                return Err(LayoutError::Overlap {
                    first: existing.name,
                    second: slot.name,
                }
                .into());
            }
        }
        self.slots
            .push(slot)
            .map_err(|_| Error::from(LayoutError::TooManySlots))
    }

    pub fn slot(&self, name: &str) -> Option<&ThresholdSlot> {
        self.slots.iter().find(|s| s.name == name)
    }

    pub fn slots(&self) -> &[ThresholdSlot] {
        &self.slots
    }

    /// Read every slot, repairing out-of-range values.
    pub fn load_all<S: ByteStore + ?Sized>(&self, store: &mut S) -> ThresholdSet {
        let mut set = ThresholdSet::default();
        for slot in &self.slots {
            let reading = slot.read(store);
            if reading.repaired {
                set.repaired += 1;
            }
            let pushed = set.values.push((slot.name, reading.value));
            debug_assert!(pushed.is_ok(), "layout holds at most MAX_SLOTS slots");
        }
        set
    }
}

/// Threshold values loaded from a layout, in slot order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThresholdSet {
    values: Vec<(&'static str, f32), MAX_SLOTS>,
    repaired: usize,
}

impl ThresholdSet {
    pub fn get(&self, name: &str) -> Option<f32> {
        self.values
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    /// Number of slots that were repaired during the load.
    pub fn repaired_count(&self) -> usize {
        self.repaired
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f32)> + '_ {
        self.values.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
