//! RAM-backed byte store.
//!
//! Behaves like a freshly erased EEPROM: every cell starts at
//! [`ERASED_BYTE`].  Used for host tests and simulation.

use crate::app::ports::{ByteStore, ERASED_BYTE};

pub struct RamStore<const N: usize> {
    cells: [u8; N],
}

impl<const N: usize> RamStore<N> {
    pub const fn new() -> Self {
        Self {
            cells: [ERASED_BYTE; N],
        }
    }

    /// Build a store pre-loaded with `image` (truncated to `N` bytes).
    pub fn from_image(image: &[u8]) -> Self {
        let mut store = Self::new();
        let len = image.len().min(N);
        store.cells[..len].copy_from_slice(&image[..len]);
        store
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }
}

impl<const N: usize> Default for RamStore<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ByteStore for RamStore<N> {
    fn capacity(&self) -> usize {
        N
    }

    fn read_byte(&self, address: usize) -> u8 {
        self.cells.get(address).copied().unwrap_or(ERASED_BYTE)
    }

    fn write_byte(&mut self, address: usize, value: u8) {
        if let Some(cell) = self.cells.get_mut(address) {
            *cell = value;
        }
    }
}
