//! Fixed-size value codec for the persistent byte store.
//!
//! A value's on-store image is its native-endian byte representation,
//! written one byte per ascending address starting at the field's base
//! address.  For `f32` that is the 4-byte IEEE-754 bit pattern, which is
//! the persisted format thresholds have always used on the device, so
//! values written by earlier firmware decode unchanged.
//!
//! There is no validation and no transformation: `decode(encode(v)) == v`
//! bit-for-bit, NaN payloads included.

use crate::app::ports::{ByteStore, ERASED_BYTE};

/// A type with an explicit, fixed-size byte image in the store.
pub trait StoreCodec: Copy {
    /// Number of store bytes the value occupies.
    const SIZE: usize;

    /// Byte buffer holding exactly [`SIZE`](Self::SIZE) bytes.
    type Bytes: AsRef<[u8]> + AsMut<[u8]> + Default;

    fn to_store_bytes(&self) -> Self::Bytes;

    fn from_store_bytes(bytes: Self::Bytes) -> Self;
}

macro_rules! impl_native_codec {
    ($($ty:ty),* $(,)?) => {
        $(
            impl StoreCodec for $ty {
                const SIZE: usize = core::mem::size_of::<$ty>();
                type Bytes = [u8; core::mem::size_of::<$ty>()];

                fn to_store_bytes(&self) -> Self::Bytes {
                    self.to_ne_bytes()
                }

                fn from_store_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_ne_bytes(bytes)
                }
            }
        )*
    };
}

impl_native_codec!(f32, f64, u8, u16, u32, u64, i8, i16, i32, i64);

/// Write `value` into `store` starting at `address`.
///
/// Returns the number of bytes written (always `T::SIZE`).  The caller
/// guarantees `address..address + T::SIZE` lies inside the store and does
/// not overlap another field.  Bytes whose address would overflow `usize`
/// are dropped like any other out-of-range write; they never wrap to 0.
pub fn encode<S, T>(store: &mut S, address: usize, value: &T) -> usize
where
    S: ByteStore + ?Sized,
    T: StoreCodec,
{
    let bytes = value.to_store_bytes();
    let bytes = bytes.as_ref();
    for (offset, byte) in bytes.iter().enumerate() {
        if let Some(at) = address.checked_add(offset) {
            store.write_byte(at, *byte);
        }
    }
    store.commit();
    bytes.len()
}

/// Read `T::SIZE` bytes from `store` at `address` into `value`.
///
/// Returns the number of bytes read.
pub fn decode_into<S, T>(store: &S, address: usize, value: &mut T) -> usize
where
    S: ByteStore + ?Sized,
    T: StoreCodec,
{
    *value = decode(store, address);
    T::SIZE
}

/// Read a `T` from `store` at `address`.
///
/// Addresses that would overflow `usize` read as [`ERASED_BYTE`].
pub fn decode<S, T>(store: &S, address: usize) -> T
where
    S: ByteStore + ?Sized,
    T: StoreCodec,
{
    let mut bytes = T::Bytes::default();
    for (offset, byte) in bytes.as_mut().iter_mut().enumerate() {
        *byte = address
            .checked_add(offset)
            .map_or(ERASED_BYTE, |at| store.read_byte(at));
    }
    T::from_store_bytes(bytes)
}
