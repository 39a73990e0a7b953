//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter  | Implements | Connects to                    |
//! |----------|------------|--------------------------------|
//! | `eeprom` | ByteStore  | NVS blob / in-memory simulation |
//! | `ram`    | ByteStore  | Plain RAM array (host, tests)   |

pub mod eeprom;
pub mod ram;
