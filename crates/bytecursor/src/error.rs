use core::str::Utf8Error;
use std::io;

use thiserror::Error;

/// Result alias used by every fallible cursor operation.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors raised by [`Reader`](crate::Reader) and [`Writer`](crate::Writer).
///
/// Every error is local to the call that produced it: the cursor is left
/// where it was before the call and nothing is partially written.
#[derive(Error, Debug)]
pub enum Error {
    /// A read asked for more bytes than remain after the cursor.
    #[error("read of {requested} bytes at position {position} exceeds the {available} bytes available")]
    OutOfRange {
        /// Cursor position when the read was attempted.
        position: usize,
        /// Number of bytes the read needed.
        requested: usize,
        /// Number of bytes left between the cursor and the end.
        available: usize,
    },

    /// A seek resolved to a position that cannot be represented.
    #[error("seek target {target} is outside the addressable range")]
    SeekOutOfRange {
        /// The signed position the seek resolved to.
        target: i128,
    },

    /// Growing the writer would exceed its configured maximum capacity.
    #[error("growing to {requested} bytes would exceed the {limit} byte allocation limit")]
    AllocationLimit {
        /// Total capacity the pending operation required.
        requested: usize,
        /// The writer's `max_capacity`.
        limit: usize,
    },

    /// A length-prefixed string does not fit its 16-bit prefix.
    #[error("string of {len} UTF-8 bytes does not fit a 16-bit length prefix")]
    StringTooLong {
        /// UTF-8 byte length of the rejected string.
        len: usize,
    },

    /// Strict UTF-8 decoding failed.
    #[error("invalid UTF-8 at position {position}: {source}")]
    InvalidUtf8 {
        /// Cursor position where the string payload starts.
        position: usize,
        /// Decoder diagnostics, relative to the start of the payload.
        #[source]
        source: Utf8Error,
    },

    /// Draining a stream source failed.
    #[error("failed to drain stream source: {0}")]
    Io(#[from] io::Error),
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        let kind = match &err {
            Error::OutOfRange { .. } => io::ErrorKind::UnexpectedEof,
            Error::SeekOutOfRange { .. } | Error::StringTooLong { .. } => {
                io::ErrorKind::InvalidInput
            }
            Error::AllocationLimit { .. } => io::ErrorKind::OutOfMemory,
            Error::InvalidUtf8 { .. } => io::ErrorKind::InvalidData,
            Error::Io(inner) => inner.kind(),
        };
        match err {
            Error::Io(inner) => inner,
            other => io::Error::new(kind, other),
        }
    }
}
