//! Fixed-width value codec.
//!
//! Wire format: every multi-byte integer and floating-point value is
//! little-endian. Floats travel as their IEEE-754 bit patterns, so NaN
//! payloads survive a round trip. `bool` is one byte, `0` for `false` and any
//! other value for `true` (written as `1`).

/// A value with a fixed-size little-endian wire representation.
pub trait Primitive: Sized + Copy {
    /// Encoded size in bytes.
    const SIZE: usize;

    /// Decode from exactly [`Self::SIZE`] bytes.
    ///
    /// Callers hand in a slice of length `SIZE`; implementations may panic
    /// otherwise.
    fn decode(bytes: &[u8]) -> Self;

    /// Encode into exactly [`Self::SIZE`] bytes.
    fn encode(self, out: &mut [u8]);
}

macro_rules! le_primitive {
    ($($ty:ty),* $(,)?) => {$(
        impl Primitive for $ty {
            const SIZE: usize = core::mem::size_of::<$ty>();

            #[inline]
            fn decode(bytes: &[u8]) -> Self {
                let mut raw = [0u8; core::mem::size_of::<$ty>()];
                raw.copy_from_slice(bytes);
                <$ty>::from_le_bytes(raw)
            }

            #[inline]
            fn encode(self, out: &mut [u8]) {
                out.copy_from_slice(&self.to_le_bytes());
            }
        }
    )*};
}

le_primitive!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

impl Primitive for bool {
    const SIZE: usize = 1;

    #[inline]
    fn decode(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }

    #[inline]
    fn encode(self, out: &mut [u8]) {
        out[0] = u8::from(self);
    }
}
