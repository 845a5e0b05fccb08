/// How string reads treat byte sequences that are not valid UTF-8.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Utf8Policy {
    /// Fail the read with [`Error::InvalidUtf8`](crate::Error::InvalidUtf8)
    /// and leave the cursor where it was.
    #[default]
    Strict,
    /// Replace each invalid sequence with U+FFFD and consume the bytes.
    Lossy,
}

/// Configuration options for a [`Reader`](crate::Reader).
///
/// # Examples
///
/// ```rust
/// use bytecursor::{BinaryRead, Reader, ReaderOptions, Utf8Policy};
///
/// let options = ReaderOptions {
///     utf8: Utf8Policy::Lossy,
/// };
/// let mut reader = Reader::new(b"\xffok").with_options(options);
/// assert_eq!(reader.read_string(3).unwrap(), "\u{fffd}ok");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReaderOptions {
    /// Decoding policy applied to `read_string` and `read_utf`.
    ///
    /// # Default
    ///
    /// [`Utf8Policy::Strict`]
    pub utf8: Utf8Policy,
}

/// Smallest growth step applied when a zero-length reservation forces the
/// writer to grow.
pub const DEFAULT_MIN_GROWTH: usize = 256;

/// Largest single allocation a writer will request by default.
pub const DEFAULT_MAX_CAPACITY: usize = isize::MAX as usize;

/// Configuration options for a [`Writer`](crate::Writer).
///
/// The growth policy doubles the capacity (or grows by the pending write,
/// whichever is larger) and never exceeds `max_capacity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WriterOptions {
    /// Growth floor used when a reservation of zero bytes has to grow.
    ///
    /// # Default
    ///
    /// [`DEFAULT_MIN_GROWTH`] (256 bytes)
    pub min_growth: usize,

    /// Upper bound on the writer's capacity. A write or seek that needs more
    /// fails with [`Error::AllocationLimit`](crate::Error::AllocationLimit).
    ///
    /// # Default
    ///
    /// [`DEFAULT_MAX_CAPACITY`] (`isize::MAX`, the largest allocation Rust
    /// permits)
    pub max_capacity: usize,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            min_growth: DEFAULT_MIN_GROWTH,
            max_capacity: DEFAULT_MAX_CAPACITY,
        }
    }
}
