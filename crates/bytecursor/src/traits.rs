//! The cursor contract shared by [`Reader`](crate::Reader) and
//! [`Writer`](crate::Writer).
//!
//! Implementors supply the cursor bookkeeping and raw byte access; the
//! per-type methods are provided on top of [`Primitive`], so both directions
//! agree on the wire format by construction.

use alloc::borrow::Cow;

use crate::{Primitive, Result, Seek};

macro_rules! read_methods {
    ($($(#[$doc:meta])* $name:ident => $ty:ty;)*) => {$(
        $(#[$doc])*
        #[inline]
        fn $name(&mut self) -> Result<$ty> {
            self.read_value::<$ty>()
        }
    )*};
}

macro_rules! write_methods {
    ($($(#[$doc:meta])* $name:ident => $ty:ty;)*) => {$(
        $(#[$doc])*
        #[inline]
        fn $name(&mut self, value: $ty) -> Result<()> {
            self.write_value::<$ty>(value)
        }
    )*};
}

/// Decoding side of the cursor contract.
pub trait BinaryRead {
    /// Total number of bytes in the source.
    fn len(&self) -> usize;

    /// Whether the source holds no bytes at all.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Offset of the next byte to be read.
    fn position(&self) -> usize;

    /// Bytes left between the cursor and the end; zero when the cursor was
    /// moved past the end.
    fn bytes_available(&self) -> usize {
        self.len().saturating_sub(self.position())
    }

    /// Borrow exactly `count` bytes at the cursor and advance past them.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`](crate::Error::OutOfRange) when fewer than
    /// `count` bytes remain; the cursor does not move.
    fn read_span(&mut self, count: usize) -> Result<&[u8]>;

    /// Decode `count` raw bytes as UTF-8 text, with no length prefix.
    ///
    /// # Errors
    ///
    /// Out-of-range reads, and invalid UTF-8 under the strict policy. The
    /// cursor does not move on failure.
    fn read_string(&mut self, count: usize) -> Result<Cow<'_, str>>;

    /// Decode a `u16` byte count followed by that many bytes of UTF-8 text.
    ///
    /// # Errors
    ///
    /// As [`read_string`](Self::read_string); on failure the cursor is
    /// restored to before the prefix.
    fn read_utf(&mut self) -> Result<Cow<'_, str>>;

    /// Move the cursor and return the new position.
    ///
    /// # Errors
    ///
    /// [`Error::SeekOutOfRange`](crate::Error::SeekOutOfRange) when the
    /// target would be negative.
    fn seek(&mut self, seek: Seek) -> Result<usize>;

    /// Decode one fixed-width value.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`](crate::Error::OutOfRange) when fewer than
    /// `T::SIZE` bytes remain.
    #[inline]
    fn read_value<T: Primitive>(&mut self) -> Result<T> {
        let bytes = self.read_span(T::SIZE)?;
        Ok(T::decode(bytes))
    }

    read_methods! {
        /// Read one byte.
        read_u8 => u8;
        /// Read one signed byte.
        read_i8 => i8;
        /// Read a one-byte boolean; any non-zero byte is `true`.
        read_bool => bool;
        /// Read a little-endian `u16`.
        read_u16 => u16;
        /// Read a little-endian `i16`.
        read_i16 => i16;
        /// Read a little-endian `u32`.
        read_u32 => u32;
        /// Read a little-endian `i32`.
        read_i32 => i32;
        /// Read a little-endian `u64`.
        read_u64 => u64;
        /// Read a little-endian `i64`.
        read_i64 => i64;
        /// Read a little-endian IEEE-754 `f32`.
        read_f32 => f32;
        /// Read a little-endian IEEE-754 `f64`.
        read_f64 => f64;
    }
}

/// Encoding side of the cursor contract.
pub trait BinaryWrite {
    /// Bytes addressable without growing.
    fn capacity(&self) -> usize;

    /// Offset of the next byte to be written.
    fn position(&self) -> usize;

    /// Capacity left after the cursor before the next write grows the
    /// buffer.
    fn bytes_available(&self) -> usize {
        self.capacity().saturating_sub(self.position())
    }

    /// Make sure `count` bytes at the cursor are addressable, growing if
    /// needed. Does not move the cursor.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationLimit`](crate::Error::AllocationLimit) when the
    /// growth would exceed the configured maximum.
    fn reserve(&mut self, count: usize) -> Result<()>;

    /// Reserve `count` bytes, advance past them and hand them out for
    /// filling. Bytes not previously written read as zero.
    ///
    /// # Errors
    ///
    /// As [`reserve`](Self::reserve).
    fn claim(&mut self, count: usize) -> Result<&mut [u8]>;

    /// Move the cursor and return the new position.
    ///
    /// # Errors
    ///
    /// [`Error::SeekOutOfRange`](crate::Error::SeekOutOfRange) or
    /// [`Error::AllocationLimit`](crate::Error::AllocationLimit).
    fn seek(&mut self, seek: Seek) -> Result<usize>;

    /// Copy `bytes` to the cursor.
    ///
    /// # Errors
    ///
    /// As [`reserve`](Self::reserve).
    #[inline]
    fn write_span(&mut self, bytes: &[u8]) -> Result<()> {
        self.claim(bytes.len())?.copy_from_slice(bytes);
        Ok(())
    }

    /// Copy any byte container to the cursor.
    ///
    /// # Errors
    ///
    /// As [`reserve`](Self::reserve).
    #[inline]
    fn write_memory(&mut self, bytes: impl AsRef<[u8]>) -> Result<()> {
        self.write_span(bytes.as_ref())
    }

    /// Encode one fixed-width value.
    ///
    /// # Errors
    ///
    /// As [`reserve`](Self::reserve).
    #[inline]
    fn write_value<T: Primitive>(&mut self, value: T) -> Result<()> {
        value.encode(self.claim(T::SIZE)?);
        Ok(())
    }

    /// Append the UTF-8 bytes of `value` with no length prefix.
    ///
    /// # Errors
    ///
    /// As [`reserve`](Self::reserve).
    fn write_string(&mut self, value: &str) -> Result<()> {
        self.write_span(value.as_bytes())
    }

    /// Append a `u16` byte count followed by the UTF-8 bytes of `value`.
    ///
    /// # Errors
    ///
    /// [`Error::StringTooLong`](crate::Error::StringTooLong) when the payload
    /// exceeds 65535 bytes, or a growth failure. Nothing is written in
    /// either case.
    fn write_utf(&mut self, value: &str) -> Result<()> {
        let len = u16::try_from(value.len())
            .map_err(|_| crate::Error::StringTooLong { len: value.len() })?;
        self.reserve(u16::SIZE + value.len())?;
        self.write_u16(len)?;
        self.write_span(value.as_bytes())
    }

    write_methods! {
        /// Write one byte.
        write_u8 => u8;
        /// Write one signed byte.
        write_i8 => i8;
        /// Write a boolean as `0` or `1`.
        write_bool => bool;
        /// Write a little-endian `u16`.
        write_u16 => u16;
        /// Write a little-endian `i16`.
        write_i16 => i16;
        /// Write a little-endian `u32`.
        write_u32 => u32;
        /// Write a little-endian `i32`.
        write_i32 => i32;
        /// Write a little-endian `u64`.
        write_u64 => u64;
        /// Write a little-endian `i64`.
        write_i64 => i64;
        /// Write a little-endian IEEE-754 `f32`.
        write_f32 => f32;
        /// Write a little-endian IEEE-754 `f64`.
        write_f64 => f64;
    }
}
