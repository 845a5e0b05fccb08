use alloc::{borrow::Cow, string::String};
use core::str;
use std::io;

use bstr::ByteSlice;

use crate::{
    BinaryRead, Error, ReaderOptions, Result, Seek, Utf8Policy,
    source::{Drain, IntoSource, Segments, Source},
};

/// Cursor over an immutable byte region.
///
/// The region is fixed when the reader is built; only the cursor moves
/// afterwards. Every read either succeeds completely or fails without moving
/// the cursor.
///
/// ```rust
/// use bytecursor::{BinaryRead, Reader, Seek};
///
/// let mut reader = Reader::new(&[0x34, 0x12, 0xff]);
/// assert_eq!(reader.read_u16().unwrap(), 0x1234);
/// reader.seek(Seek::End(1)).unwrap();
/// assert_eq!(reader.read_u8().unwrap(), 0xff);
/// assert!(reader.read_u8().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    source: Source<'a>,
    position: usize,
    options: ReaderOptions,
}

impl<'a> Reader<'a> {
    /// View contiguous bytes without copying.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::from_parts(Source::Borrowed(bytes))
    }

    /// Build from any [`IntoSource`].
    ///
    /// # Errors
    ///
    /// Propagates acquisition failures (stream sources only).
    pub fn from_source(source: impl IntoSource<'a>) -> Result<Self> {
        Ok(Self::from_parts(source.into_source()?))
    }

    /// Build over segmented input, linearizing it when more than one
    /// segment carries data.
    #[must_use]
    pub fn from_segments(parts: &[&'a [u8]]) -> Self {
        Self::from_parts(Segments::new(parts).linearize())
    }

    fn from_parts(source: Source<'a>) -> Self {
        Self {
            source,
            position: 0,
            options: ReaderOptions::default(),
        }
    }

    /// Replace the reader's options.
    #[must_use]
    pub fn with_options(mut self, options: ReaderOptions) -> Self {
        self.options = options;
        self
    }

    /// The options in effect.
    #[must_use]
    pub fn options(&self) -> ReaderOptions {
        self.options
    }

    /// The whole underlying region, independent of the cursor.
    #[must_use]
    pub fn source(&self) -> &Source<'a> {
        &self.source
    }

    /// The bytes after the cursor; empty when the cursor is past the end.
    #[must_use]
    pub fn remaining(&self) -> &[u8] {
        self.source.get(self.position..).unwrap_or_default()
    }

    /// Take exactly `count` bytes at the cursor as a region that outlives
    /// the reader borrow, and advance past them.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] when fewer than `count` bytes remain.
    pub fn read_memory(&mut self, count: usize) -> Result<Source<'a>> {
        let range = self.take(count)?;
        Ok(self.source.slice(range))
    }

    /// Like [`BinaryRead::read_utf`] but always returns an owned string.
    ///
    /// # Errors
    ///
    /// As [`BinaryRead::read_utf`].
    pub fn read_utf_owned(&mut self) -> Result<String> {
        self.read_utf().map(Cow::into_owned)
    }

    /// Check that `count` bytes remain and advance past them, returning
    /// their range. A cursor past the end fails even for empty reads.
    fn take(&mut self, count: usize) -> Result<core::ops::Range<usize>> {
        let available = self.bytes_available();
        if count > available || self.position > self.source.len() {
            return Err(Error::OutOfRange {
                position: self.position,
                requested: count,
                available,
            });
        }
        let start = self.position;
        self.position += count;
        Ok(start..self.position)
    }

    /// Decode `count` bytes at `start` under the configured policy. The
    /// cursor must already sit past them; on failure it is put back to
    /// `rewind`.
    fn decode_text(&mut self, start: usize, count: usize, rewind: usize) -> Result<Cow<'_, str>> {
        let bytes = &self.source[start..start + count];
        match self.options.utf8 {
            Utf8Policy::Strict => match str::from_utf8(bytes) {
                Ok(text) => Ok(Cow::Borrowed(text)),
                Err(source) => {
                    self.position = rewind;
                    Err(Error::InvalidUtf8 {
                        position: start,
                        source,
                    })
                }
            },
            Utf8Policy::Lossy => Ok(bytes.to_str_lossy()),
        }
    }
}

impl Reader<'static> {
    /// Drain `stream` to its end and read from the drained bytes.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] when the stream fails.
    pub fn from_stream(stream: impl io::Read) -> Result<Self> {
        Self::from_source(Drain(stream))
    }
}

impl Default for Reader<'_> {
    fn default() -> Self {
        Self::from_parts(Source::default())
    }
}

impl From<Vec<u8>> for Reader<'static> {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_parts(Source::Shared(bytes.into()))
    }
}

impl From<bytes::Bytes> for Reader<'static> {
    fn from(bytes: bytes::Bytes) -> Self {
        Self::from_parts(Source::Shared(bytes))
    }
}

impl BinaryRead for Reader<'_> {
    fn len(&self) -> usize {
        self.source.len()
    }

    fn position(&self) -> usize {
        self.position
    }

    fn read_span(&mut self, count: usize) -> Result<&[u8]> {
        let range = self.take(count)?;
        Ok(&self.source[range])
    }

    fn read_string(&mut self, count: usize) -> Result<Cow<'_, str>> {
        let rewind = self.position;
        let range = self.take(count)?;
        self.decode_text(range.start, count, rewind)
    }

    fn read_utf(&mut self) -> Result<Cow<'_, str>> {
        let rewind = self.position;
        let count = usize::from(self.read_u16()?);
        let range = match self.take(count) {
            Ok(range) => range,
            Err(err) => {
                self.position = rewind;
                return Err(err);
            }
        };
        self.decode_text(range.start, count, rewind)
    }

    /// Positions past the end are accepted here and surface as
    /// [`Error::OutOfRange`] on the next read.
    fn seek(&mut self, seek: Seek) -> Result<usize> {
        self.position = seek.resolve(self.position, self.source.len())?;
        Ok(self.position)
    }
}

impl io::Read for Reader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let count = buf.len().min(self.bytes_available());
        if count == 0 {
            return Ok(0);
        }
        buf[..count].copy_from_slice(self.read_span(count)?);
        Ok(count)
    }
}
