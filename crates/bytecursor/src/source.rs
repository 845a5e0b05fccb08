//! Source acquisition for [`Reader`](crate::Reader).
//!
//! A reader always decodes from one contiguous region. How that region is
//! obtained depends on the input:
//!
//! - contiguous borrowed input is viewed in place;
//! - owned input (`Vec<u8>`, [`Bytes`]) is taken over without copying;
//! - segmented input is viewed in place when only one segment carries data,
//!   and linearized with a single copy otherwise;
//! - a stream is drained into memory up front.

use alloc::collections::VecDeque;
use core::ops::{Deref, Range};
use std::io;

use bytes::{Bytes, BytesMut};

use crate::Result;

/// An immutable, contiguous byte region a reader decodes from.
///
/// Slicing a `Source` never copies: borrowed sources hand out sub-slices with
/// the source lifetime and shared sources bump a reference count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source<'a> {
    /// A view into caller-owned memory.
    Borrowed(&'a [u8]),
    /// Reference-counted memory owned by the reader.
    Shared(Bytes),
}

impl<'a> Source<'a> {
    /// Number of bytes in the region.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Whether the region is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The region as a slice.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Source::Borrowed(bytes) => bytes,
            Source::Shared(bytes) => &bytes[..],
        }
    }

    /// Zero-copy sub-region. `range` must lie within the region.
    pub(crate) fn slice(&self, range: Range<usize>) -> Source<'a> {
        match self {
            Source::Borrowed(bytes) => Source::Borrowed(&bytes[range]),
            Source::Shared(bytes) => Source::Shared(bytes.slice(range)),
        }
    }

    /// Detach from the borrowed lifetime, copying only if the region is
    /// borrowed.
    #[must_use]
    pub fn into_owned(self) -> Source<'static> {
        match self {
            Source::Borrowed(bytes) => Source::Shared(Bytes::copy_from_slice(bytes)),
            Source::Shared(bytes) => Source::Shared(bytes),
        }
    }
}

impl Deref for Source<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for Source<'_> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Default for Source<'_> {
    fn default() -> Self {
        Source::Borrowed(&[])
    }
}

/// Conversion into a [`Source`], performed once when a reader is built.
pub trait IntoSource<'a> {
    /// Acquire the bytes.
    ///
    /// # Errors
    ///
    /// Only stream-backed sources can fail, with
    /// [`Error::Io`](crate::Error::Io).
    fn into_source(self) -> Result<Source<'a>>;
}

impl<'a> IntoSource<'a> for Source<'a> {
    fn into_source(self) -> Result<Source<'a>> {
        Ok(self)
    }
}

impl<'a> IntoSource<'a> for &'a [u8] {
    fn into_source(self) -> Result<Source<'a>> {
        Ok(Source::Borrowed(self))
    }
}

impl<'a, const N: usize> IntoSource<'a> for &'a [u8; N] {
    fn into_source(self) -> Result<Source<'a>> {
        Ok(Source::Borrowed(self))
    }
}

impl<'a> IntoSource<'a> for &'a Vec<u8> {
    fn into_source(self) -> Result<Source<'a>> {
        Ok(Source::Borrowed(self))
    }
}

impl IntoSource<'static> for Vec<u8> {
    fn into_source(self) -> Result<Source<'static>> {
        Ok(Source::Shared(Bytes::from(self)))
    }
}

impl IntoSource<'static> for Bytes {
    fn into_source(self) -> Result<Source<'static>> {
        Ok(Source::Shared(self))
    }
}

impl<'a> IntoSource<'a> for &'a VecDeque<u8> {
    fn into_source(self) -> Result<Source<'a>> {
        let (front, back) = self.as_slices();
        Ok(Segments::new(&[front, back]).linearize())
    }
}

/// A byte region split across several slices.
#[derive(Debug, Clone, Copy)]
pub struct Segments<'s, 'a> {
    parts: &'s [&'a [u8]],
}

impl<'s, 'a> Segments<'s, 'a> {
    /// Wrap a list of segments, in order.
    #[must_use]
    pub fn new(parts: &'s [&'a [u8]]) -> Self {
        Self { parts }
    }

    /// Total length over all segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.iter().map(|part| part.len()).sum()
    }

    /// Whether every segment is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(|part| part.is_empty())
    }

    /// View the single filled segment in place, or join all of them.
    pub(crate) fn linearize(self) -> Source<'a> {
        let mut filled = self.parts.iter().copied().filter(|part| !part.is_empty());
        match (filled.next(), filled.next()) {
            (None, _) => Source::default(),
            (Some(only), None) => Source::Borrowed(only),
            (Some(_), Some(_)) => {
                let mut joined = BytesMut::with_capacity(self.len());
                for part in self.parts {
                    joined.extend_from_slice(part);
                }
                tracing::trace!(
                    segments = self.parts.len(),
                    len = joined.len(),
                    "linearized segmented source"
                );
                Source::Shared(joined.freeze())
            }
        }
    }
}

impl<'a> IntoSource<'a> for Segments<'_, 'a> {
    fn into_source(self) -> Result<Source<'a>> {
        Ok(self.linearize())
    }
}

/// A readable stream, drained to its end when the reader is built.
#[derive(Debug)]
pub struct Drain<R>(pub R);

impl<R: io::Read> IntoSource<'static> for Drain<R> {
    fn into_source(self) -> Result<Source<'static>> {
        let Drain(mut stream) = self;
        let mut drained = Vec::new();
        stream.read_to_end(&mut drained)?;
        tracing::debug!(len = drained.len(), "drained stream source");
        Ok(Source::Shared(Bytes::from(drained)))
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::VecDeque;

    use super::{Drain, IntoSource, Segments, Source};

    #[test]
    fn single_filled_segment_is_borrowed() {
        let data = [1u8, 2, 3];
        let parts: [&[u8]; 3] = [&[], &data, &[]];
        let source = Segments::new(&parts).into_source().unwrap();
        assert!(matches!(source, Source::Borrowed(bytes) if bytes.as_ptr() == data.as_ptr()));
    }

    #[test]
    fn several_segments_are_joined_in_order() {
        let parts: [&[u8]; 3] = [b"ab", b"", b"cd"];
        let source = Segments::new(&parts).into_source().unwrap();
        assert!(matches!(source, Source::Shared(_)));
        assert_eq!(source.as_bytes(), b"abcd");
    }

    #[test]
    fn wrapped_deque_is_linearized() {
        let mut deque: VecDeque<u8> = VecDeque::with_capacity(4);
        deque.extend([0, 0, 1, 2]);
        deque.pop_front();
        deque.pop_front();
        deque.extend([3, 4]);
        let source = (&deque).into_source().unwrap();
        assert_eq!(source.as_bytes(), [1, 2, 3, 4]);
    }

    #[test]
    fn stream_is_drained_completely() {
        let stream = std::io::Cursor::new(vec![9u8; 10_000]);
        let source = Drain(stream).into_source().unwrap();
        assert_eq!(source.len(), 10_000);
    }

    #[test]
    fn slicing_shared_source_does_not_copy() {
        let source = Vec::from(*b"hello").into_source().unwrap();
        let slice = source.slice(1..3);
        assert_eq!(slice.as_bytes(), b"el");
        assert_eq!(slice.as_bytes().as_ptr(), source.as_bytes()[1..].as_ptr());
    }
}
