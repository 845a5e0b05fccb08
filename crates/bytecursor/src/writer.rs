use alloc::vec::Vec;
use std::io;

use crate::{
    BinaryWrite, Error, Result, Seek, WriterOptions,
    pool::{BufferPool, Lease},
};

/// Cursor over a growable byte buffer backed by pooled storage.
///
/// The writer starts with no storage and rents from its [`BufferPool`] on
/// first use. It remembers the furthest position ever reached (the
/// high-water mark, [`written`](Self::written)); the produced output is
/// always `[0, written)`, however far the storage was over-allocated or the
/// cursor was moved back.
///
/// Storage is handed back to the pool by [`dispose`](Self::dispose),
/// [`finish`](Self::finish) or drop, exactly once.
///
/// ```rust
/// use bytecursor::{BinaryWrite, Seek, Writer};
///
/// let mut writer = Writer::new();
/// writer.write_u32(0xdead_beef).unwrap();
/// writer.seek(Seek::Begin(0)).unwrap();
/// writer.write_u8(0xff).unwrap();
/// assert_eq!(writer.finish(), [0xff, 0xbe, 0xad, 0xde]);
/// ```
#[derive(Debug)]
pub struct Writer {
    lease: Lease,
    position: usize,
    written: usize,
    options: WriterOptions,
    pool: BufferPool,
}

impl Writer {
    /// An empty writer renting from the process-wide pool.
    #[must_use]
    pub fn new() -> Self {
        Self::with_pool(BufferPool::shared().clone())
    }

    /// An empty writer renting from `pool`.
    #[must_use]
    pub fn with_pool(pool: BufferPool) -> Self {
        Self {
            lease: Lease::empty(),
            position: 0,
            written: 0,
            options: WriterOptions::default(),
            pool,
        }
    }

    /// Replace the writer's options.
    ///
    /// A `max_capacity` below the current capacity caps further growth; it
    /// does not shrink storage already rented.
    #[must_use]
    pub fn with_options(mut self, options: WriterOptions) -> Self {
        self.options = options;
        self
    }

    /// The options in effect.
    #[must_use]
    pub fn options(&self) -> WriterOptions {
        self.options
    }

    /// The high-water mark: length of the produced output.
    #[must_use]
    pub fn written(&self) -> usize {
        self.written
    }

    /// Whether nothing has been produced yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.written == 0
    }

    /// The produced output, `[0, written)`.
    #[must_use]
    pub fn buffer(&self) -> &[u8] {
        &self.lease[..self.written]
    }

    /// The produced output, mutable in place.
    #[must_use]
    pub fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.lease[..self.written]
    }

    /// An owned copy of the produced output.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.buffer().to_vec()
    }

    /// Take the produced output and hand the storage back to the pool.
    #[must_use]
    pub fn finish(mut self) -> Vec<u8> {
        let output = self.to_vec();
        self.dispose();
        output
    }

    /// Forget the output but keep the storage for reuse.
    pub fn clear(&mut self) {
        self.position = 0;
        self.written = 0;
    }

    /// Hand pooled storage back and reset to an empty writer.
    ///
    /// Calling this more than once, or dropping the writer afterwards, does
    /// not return anything a second time.
    pub fn dispose(&mut self) {
        if self.lease.release() {
            tracing::trace!(written = self.written, "disposed writer storage");
        }
        self.position = 0;
        self.written = 0;
    }

    /// Panic unless `position <= written <= storage length`, with storage
    /// present only while it is leased.
    #[cfg(any(test, feature = "fuzzing"))]
    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        assert!(
            self.position <= self.written,
            "position {} beyond high-water mark {}",
            self.position,
            self.written
        );
        assert!(
            self.written <= self.lease.len(),
            "high-water mark {} beyond storage {}",
            self.written,
            self.lease.len()
        );
        assert!(self.lease.is_pooled() || self.lease.is_empty());
    }

    /// Make `[at, at + count)` addressable.
    fn ensure(&mut self, count: usize, at: usize) -> Result<()> {
        let capacity = self.capacity();
        let limit = self.options.max_capacity;
        let Some(needed) = at.checked_add(count) else {
            return Err(Error::AllocationLimit {
                requested: usize::MAX,
                limit,
            });
        };
        if needed <= capacity {
            return Ok(());
        }

        let mut grow_by = count.max(capacity);
        if count == 0 {
            grow_by = grow_by.max(self.options.min_growth);
        }
        let mut target = capacity.saturating_add(grow_by).max(needed);
        if target > limit {
            if needed > limit {
                tracing::debug!(needed, limit, "writer growth refused");
                return Err(Error::AllocationLimit {
                    requested: needed,
                    limit,
                });
            }
            target = limit;
        }

        let mut lease = self.pool.rent(target).map_err(|err| match err {
            Error::AllocationLimit { requested, .. } => Error::AllocationLimit { requested, limit },
            other => other,
        })?;
        lease[..self.written].copy_from_slice(&self.lease[..self.written]);
        let mut previous = core::mem::replace(&mut self.lease, lease);
        previous.release();
        tracing::trace!(
            from = capacity,
            to = self.capacity(),
            written = self.written,
            "grew writer storage"
        );
        Ok(())
    }

    /// Move the cursor to an addressable `position`, raising the high-water
    /// mark and zeroing any skipped gap.
    fn set_position(&mut self, position: usize) {
        if position > self.written {
            self.lease[self.written..position].fill(0);
            self.written = position;
        }
        self.position = position;
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl BinaryWrite for Writer {
    /// Bytes addressable without growing; never above
    /// [`WriterOptions::max_capacity`].
    fn capacity(&self) -> usize {
        self.lease.len().min(self.options.max_capacity)
    }

    fn position(&self) -> usize {
        self.position
    }

    fn reserve(&mut self, count: usize) -> Result<()> {
        self.ensure(count, self.position)
    }

    /// Claimed bytes beyond the high-water mark are zeroed, so recycled
    /// storage never shows through bytes the caller leaves untouched.
    fn claim(&mut self, count: usize) -> Result<&mut [u8]> {
        self.ensure(count, self.position)?;
        let start = self.position;
        let end = start + count;
        if end > self.written {
            self.lease[self.written.max(start)..end].fill(0);
            self.written = end;
        }
        self.position = end;
        Ok(&mut self.lease[start..end])
    }

    /// `Begin` and `Current` grow the storage so the target is addressable.
    /// `End(n)` lands `n` bytes before the current capacity and never grows.
    fn seek(&mut self, seek: Seek) -> Result<usize> {
        let target = seek.resolve(self.position, self.capacity())?;
        self.ensure(0, target)?;
        self.set_position(target);
        Ok(self.position)
    }
}

impl io::Write for Writer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_span(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
