//! EEPROM emulation on top of NVS (Non-Volatile Storage).
//!
//! The ESP32 has no byte-addressable EEPROM, so the thermostat's
//! persistent store is a RAM mirror of `capacity` bytes that is written
//! through to a single NVS blob whenever a stored value changes.  The blob is the
//! exact byte image an AVR EEPROM would hold, so the codec layout is the
//! same on every target.
//!
//! ## Dual-target design
//!
//! - **`target_os = "espidf"`**: mirror persisted to NVS namespace
//!   `thermo`, key `eeprom`.
//! - **`not(target_os = "espidf")`**: mirror only; commits are counted so
//!   tests can observe write-through behaviour.
//!
//! Byte writes only mark the mirror dirty; [`ByteStore::commit`] (called
//! by the codec once per value) writes the blob.  If the stored image
//! cannot be read at boot the adapter stays volatile, so repairing the
//! blank mirror never overwrites thresholds that are still in flash.
//!
//! [`ByteStore`] is total, so platform write failures are logged here and
//! never reach the threshold logic.

use log::{info, warn};

use crate::app::ports::{ByteStore, ERASED_BYTE};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

/// Classic ATmega328 EEPROM size.
pub const DEFAULT_CAPACITY: usize = 512;

#[cfg(target_os = "espidf")]
const EEPROM_NAMESPACE: &[u8] = b"thermo\0";
#[cfg(target_os = "espidf")]
const EEPROM_KEY: &[u8] = b"eeprom\0";

/// Result of reading the stored image at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageLoad {
    /// A stored image was loaded; holds the number of bytes copied.
    Loaded(usize),
    /// First boot: nothing stored yet.
    Missing,
    /// An image may exist but could not be read.
    Failed,
}

impl ImageLoad {
    /// Whether writes may reach flash after this outcome.
    fn allows_persistence(self) -> bool {
        !matches!(self, Self::Failed)
    }
}

pub struct EepromAdapter {
    mirror: Vec<u8>,
    /// `false` when NVS is unavailable; writes then live in RAM only.
    persistent: bool,
    /// Mirror holds changes not yet committed.
    dirty: bool,
    commits: u32,
}

impl EepromAdapter {
    /// Initialise NVS flash and load the stored image.
    ///
    /// A missing or short blob is padded with erased cells.  Returns
    /// `Err(Error::Config)` if flash initialisation fails unrecoverably.
    pub fn new(capacity: usize) -> crate::error::Result<Self> {
        let mut adapter = Self::volatile(capacity);

        #[cfg(target_os = "espidf")]
        let load = {
            Self::init_flash().map_err(|_| crate::error::Error::Config("NVS flash init failed"))?;
            match adapter.load_blob() {
                Ok(len) => ImageLoad::Loaded(len),
                Err(e) if e == ESP_ERR_NVS_NOT_FOUND => ImageLoad::Missing,
                Err(e) => {
                    warn!("EepromAdapter: NVS read error {}", e);
                    ImageLoad::Failed
                }
            }
        };

        #[cfg(not(target_os = "espidf"))]
        let load = ImageLoad::Missing;

        adapter.apply_load(load);
        Ok(adapter)
    }

    fn apply_load(&mut self, load: ImageLoad) {
        match load {
            ImageLoad::Loaded(len) => info!("EepromAdapter: loaded {} byte image", len),
            ImageLoad::Missing => info!(
                "EepromAdapter: no stored image, starting erased ({} bytes)",
                self.mirror.len()
            ),
            ImageLoad::Failed => warn!(
                "EepromAdapter: stored image unreadable, keeping writes in RAM this boot"
            ),
        }
        self.persistent = load.allows_persistence();
    }

    /// An erased store that never touches flash.
    pub fn volatile(capacity: usize) -> Self {
        Self {
            mirror: vec![ERASED_BYTE; capacity],
            persistent: false,
            dirty: false,
            commits: 0,
        }
    }

    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    /// Number of times the image has been written through to storage.
    pub fn commit_count(&self) -> u32 {
        self.commits
    }

    fn persist(&mut self) {
        if !self.persistent || !self.dirty {
            return;
        }

        #[cfg(target_os = "espidf")]
        {
            if let Err(e) = self.store_blob() {
                warn!("EepromAdapter: NVS write error {}", e);
                return;
            }
        }

        self.dirty = false;
        self.commits = self.commits.wrapping_add(1);
    }

    #[cfg(target_os = "espidf")]
    fn init_flash() -> Result<(), i32> {
        // SAFETY: called once from the main task before any other NVS access.
        let ret = unsafe { nvs_flash_init() };
        if ret == ESP_ERR_NVS_NO_FREE_PAGES || ret == ESP_ERR_NVS_NEW_VERSION_FOUND {
            warn!("NVS: erasing and re-initialising flash partition");
            let ret = unsafe { nvs_flash_erase() };
            if ret != ESP_OK {
                return Err(ret);
            }
            let ret = unsafe { nvs_flash_init() };
            if ret != ESP_OK {
                return Err(ret);
            }
        } else if ret != ESP_OK {
            return Err(ret);
        }
        Ok(())
    }

    /// Open the EEPROM namespace, run `f` with the handle, then close.
    #[cfg(target_os = "espidf")]
    fn with_nvs_handle<F, T>(write: bool, f: F) -> Result<T, i32>
    where
        F: FnOnce(nvs_handle_t) -> Result<T, i32>,
    {
        let mut handle: nvs_handle_t = 0;
        let mode = if write {
            nvs_open_mode_t_NVS_READWRITE
        } else {
            nvs_open_mode_t_NVS_READONLY
        };

        let ret = unsafe { nvs_open(EEPROM_NAMESPACE.as_ptr() as *const _, mode, &mut handle) };
        if ret != ESP_OK {
            return Err(ret);
        }

        let result = f(handle);
        unsafe {
            nvs_close(handle);
        }
        result
    }

    #[cfg(target_os = "espidf")]
    fn load_blob(&mut self) -> Result<usize, i32> {
        let mirror = &mut self.mirror;
        Self::with_nvs_handle(false, |handle| {
            let mut size: usize = 0;
            let ret = unsafe {
                nvs_get_blob(
                    handle,
                    EEPROM_KEY.as_ptr() as *const _,
                    core::ptr::null_mut(),
                    &mut size,
                )
            };
            if ret != ESP_OK {
                return Err(ret);
            }

            let mut buf = vec![ERASED_BYTE; size];
            let ret = unsafe {
                nvs_get_blob(
                    handle,
                    EEPROM_KEY.as_ptr() as *const _,
                    buf.as_mut_ptr() as *mut _,
                    &mut size,
                )
            };
            if ret != ESP_OK {
                return Err(ret);
            }

            let len = size.min(mirror.len());
            mirror[..len].copy_from_slice(&buf[..len]);
            Ok(len)
        })
    }

    #[cfg(target_os = "espidf")]
    fn store_blob(&self) -> Result<(), i32> {
        Self::with_nvs_handle(true, |handle| {
            let ret = unsafe {
                nvs_set_blob(
                    handle,
                    EEPROM_KEY.as_ptr() as *const _,
                    self.mirror.as_ptr() as *const _,
                    self.mirror.len(),
                )
            };
            if ret != ESP_OK {
                return Err(ret);
            }
            let ret = unsafe { nvs_commit(handle) };
            if ret != ESP_OK {
                return Err(ret);
            }
            Ok(())
        })
    }
}

impl ByteStore for EepromAdapter {
    fn capacity(&self) -> usize {
        self.mirror.len()
    }

    fn read_byte(&self, address: usize) -> u8 {
        self.mirror.get(address).copied().unwrap_or(ERASED_BYTE)
    }

    fn write_byte(&mut self, address: usize, value: u8) {
        let Some(cell) = self.mirror.get_mut(address) else {
            return;
        };
        // Same as EEPROM.update(): skip the flash cycle if nothing changes.
        if *cell == value {
            return;
        }
        *cell = value;
        self.dirty = true;
    }

    fn commit(&mut self) {
        self.persist();
    }
}
