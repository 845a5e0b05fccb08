//! Cursor-based binary codec: a [`Reader`] over an immutable byte region and
//! a [`Writer`] over a growable buffer rented from a shared [`BufferPool`].
//!
//! Both sides speak the same wire format (see [`Primitive`]): fixed-width
//! little-endian values, raw UTF-8 strings, and `u16`-length-prefixed UTF-8
//! strings. Framing and schema are left to the caller.
//!
//! ```rust
//! use bytecursor::{BinaryRead, BinaryWrite, Reader, Writer};
//!
//! let mut writer = Writer::new();
//! writer.write_u16(1).unwrap();
//! writer.write_i32(-5).unwrap();
//! writer.write_utf("ok").unwrap();
//! let bytes = writer.finish();
//!
//! let mut reader = Reader::new(&bytes);
//! assert_eq!(reader.read_u16().unwrap(), 1);
//! assert_eq!(reader.read_i32().unwrap(), -5);
//! assert_eq!(reader.read_utf().unwrap(), "ok");
//! ```

extern crate alloc;

mod error;
mod options;
mod pool;
mod primitive;
mod reader;
mod seek;
mod source;
mod traits;
mod writer;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use options::{
    DEFAULT_MAX_CAPACITY, DEFAULT_MIN_GROWTH, ReaderOptions, Utf8Policy, WriterOptions,
};
pub use pool::{BufferPool, Lease, PoolConfig, PoolStats};
pub use primitive::Primitive;
pub use reader::Reader;
pub use seek::Seek;
pub use source::{Drain, IntoSource, Segments, Source};
pub use traits::{BinaryRead, BinaryWrite};
pub use writer::Writer;
