//! Port traits: the boundary between the persistence logic and the
//! hardware it runs on.
//!
//! ```text
//!   Store adapter ──▶ ByteStore ──▶ codec / threshold (domain)
//! ```
//!
//! GPIO and timing use the `embedded-hal` 1.0 traits directly
//! (`OutputPin`, `DelayNs`); only the persistent store needs a port of
//! its own because `embedded-hal` has no byte-addressable storage trait.

// ───────────────────────────────────────────────────────────────
// Byte store port (driven adapter: domain ↔ EEPROM / flash)
// ───────────────────────────────────────────────────────────────

/// Value read from an address that holds no data (erased EEPROM cell).
pub const ERASED_BYTE: u8 = 0xFF;

/// A linear, byte-addressable, persistent memory region.
///
/// The interface is total: implementations never report failure to the
/// caller.  Addresses at or beyond [`capacity`](Self::capacity) read as
/// [`ERASED_BYTE`] and writes to them are dropped.  Platform write
/// failures are handled (logged) inside the adapter.
///
/// The store is a handle passed explicitly to every accessor; there is
/// exactly one instance per device and one caller at a time.
pub trait ByteStore {
    /// Number of addressable bytes.
    fn capacity(&self) -> usize;

    /// Read the byte at `address`.
    fn read_byte(&self, address: usize) -> u8;

    /// Persist `value` at `address`.
    ///
    /// Buffered stores may hold the byte until [`commit`](Self::commit).
    fn write_byte(&mut self, address: usize, value: u8);

    /// Flush buffered writes to the backing medium.
    ///
    /// The codec calls this once per encoded value, so a multi-byte field
    /// costs one flash cycle.  Unbuffered stores keep the no-op default.
    fn commit(&mut self) {}
}

