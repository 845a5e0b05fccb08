//! Shared pool of byte buffers backing [`Writer`](crate::Writer) storage.
//!
//! Buffers are grouped in power-of-two size classes between
//! [`PoolConfig::min_bucket`] and [`PoolConfig::max_bucket`]. A request is
//! served from the smallest class that fits; requests above the largest class
//! get a dedicated allocation that is dropped instead of pooled when returned.
//!
//! Returned buffers keep their old contents. Callers must not rely on
//! recycled storage being zeroed.

use alloc::{boxed::Box, sync::Arc, vec::Vec};
use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

use parking_lot::Mutex;

use crate::{Error, Result, options::DEFAULT_MAX_CAPACITY};

/// Smallest size class by default.
const DEFAULT_MIN_BUCKET: usize = 16;

/// Largest pooled size class by default (1 MiB).
const DEFAULT_MAX_BUCKET: usize = 1 << 20;

/// Buffers kept per size class by default.
const DEFAULT_BUFFERS_PER_BUCKET: usize = 32;

/// Configuration for a [`BufferPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolConfig {
    /// Smallest size class, rounded up to a power of two.
    pub min_bucket: usize,

    /// Largest pooled size class, rounded up to a power of two.
    pub max_bucket: usize,

    /// Maximum number of idle buffers kept per size class.
    pub buffers_per_bucket: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            min_bucket: DEFAULT_MIN_BUCKET,
            max_bucket: DEFAULT_MAX_BUCKET,
            buffers_per_bucket: DEFAULT_BUFFERS_PER_BUCKET,
        }
    }
}

impl PoolConfig {
    /// Create a new pool configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the smallest size class.
    #[must_use]
    pub fn min_bucket(mut self, size: usize) -> Self {
        self.min_bucket = size;
        self
    }

    /// Set the largest pooled size class.
    #[must_use]
    pub fn max_bucket(mut self, size: usize) -> Self {
        self.max_bucket = size;
        self
    }

    /// Set how many idle buffers each size class keeps.
    #[must_use]
    pub fn buffers_per_bucket(mut self, count: usize) -> Self {
        self.buffers_per_bucket = count;
        self
    }
}

/// Lifetime counters of a [`BufferPool`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Buffers handed out.
    pub rented: usize,
    /// Buffers handed back, whether kept or dropped.
    pub returned: usize,
    /// Rents that had to allocate fresh memory.
    pub allocated: usize,
    /// Returned buffers dropped because they were oversized or their class
    /// was full.
    pub discarded: usize,
}

impl PoolStats {
    /// Buffers currently checked out.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.rented.saturating_sub(self.returned)
    }
}

#[derive(Default)]
struct Counters {
    rented: AtomicUsize,
    returned: AtomicUsize,
    allocated: AtomicUsize,
    discarded: AtomicUsize,
}

struct BufferPoolInner {
    buckets: Vec<Mutex<Vec<Box<[u8]>>>>,
    min_shift: u32,
    max_bucket: usize,
    buffers_per_bucket: usize,
    counters: Counters,
}

impl BufferPoolInner {
    /// Size class serving `len`, as `(index, class size)`.
    fn class_for(&self, len: usize) -> Option<(usize, usize)> {
        let size = len.max(1 << self.min_shift).checked_next_power_of_two()?;
        if size > self.max_bucket {
            return None;
        }
        let index = (size.trailing_zeros() - self.min_shift) as usize;
        Some((index, size))
    }

    fn release(&self, buffer: Box<[u8]>) {
        self.counters.returned.fetch_add(1, Ordering::Relaxed);
        let len = buffer.len();
        if let Some((index, _)) = self.class_for(len).filter(|&(_, size)| size == len) {
            let mut idle = self.buckets[index].lock();
            if idle.len() < self.buffers_per_bucket {
                idle.push(buffer);
                tracing::trace!(len, "returned buffer to pool");
                return;
            }
        }
        self.counters.discarded.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(len, "discarded returned buffer");
    }
}

/// Pool of reusable byte buffers.
///
/// Cloning is cheap and yields a handle to the same pool. A pool may be used
/// from many threads at once; each [`Lease`] it hands out is owned by a
/// single holder.
///
/// ## Example
///
/// ```rust
/// use bytecursor::{BufferPool, PoolConfig};
///
/// let pool = BufferPool::with_config(PoolConfig::new().max_bucket(4096));
///
/// let lease = pool.rent(100).unwrap();
/// assert_eq!(lease.len(), 128);
///
/// // Buffer goes back to the pool when the lease is dropped
/// drop(lease);
/// assert_eq!(pool.available(), 1);
/// ```
#[derive(Clone)]
pub struct BufferPool {
    inner: Arc<BufferPoolInner>,
}

impl BufferPool {
    /// Create a pool with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(PoolConfig::default())
    }

    /// Create a pool with custom size classes and retention.
    #[must_use]
    pub fn with_config(config: PoolConfig) -> Self {
        let min = round_to_class(config.min_bucket.max(1));
        let max = round_to_class(config.max_bucket.max(min));
        let classes = (max.trailing_zeros() - min.trailing_zeros() + 1) as usize;
        Self {
            inner: Arc::new(BufferPoolInner {
                buckets: (0..classes).map(|_| Mutex::new(Vec::new())).collect(),
                min_shift: min.trailing_zeros(),
                max_bucket: max,
                buffers_per_bucket: config.buffers_per_bucket,
                counters: Counters::default(),
            }),
        }
    }

    /// The process-wide pool used by writers built without an explicit
    /// pool.
    #[must_use]
    pub fn shared() -> &'static BufferPool {
        static SHARED: OnceLock<BufferPool> = OnceLock::new();
        SHARED.get_or_init(BufferPool::new)
    }

    /// Check out a buffer of at least `min_len` bytes.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationLimit`] when fresh memory of that size cannot be
    /// allocated.
    pub fn rent(&self, min_len: usize) -> Result<Lease> {
        let class = self.inner.class_for(min_len);
        let recycled = class.and_then(|(index, _)| self.inner.buckets[index].lock().pop());
        let buffer = match recycled {
            Some(buffer) => buffer,
            None => {
                let len = class.map_or(min_len, |(_, size)| size);
                let buffer = allocate(len)?;
                self.inner.counters.allocated.fetch_add(1, Ordering::Relaxed);
                buffer
            }
        };
        self.inner.counters.rented.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(requested = min_len, len = buffer.len(), "rented buffer");
        Ok(Lease {
            buffer,
            pool: Some(self.inner.clone()),
        })
    }

    /// Number of idle buffers across all size classes.
    #[must_use]
    pub fn available(&self) -> usize {
        self.inner.buckets.iter().map(|bucket| bucket.lock().len()).sum()
    }

    /// Snapshot of the pool's counters.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        let counters = &self.inner.counters;
        PoolStats {
            rented: counters.rented.load(Ordering::Relaxed),
            returned: counters.returned.load(Ordering::Relaxed),
            allocated: counters.allocated.load(Ordering::Relaxed),
            discarded: counters.discarded.load(Ordering::Relaxed),
        }
    }

    /// Drop every idle buffer.
    pub fn clear(&self) {
        for bucket in &self.inner.buckets {
            bucket.lock().clear();
        }
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BufferPool")
            .field("max_bucket", &self.inner.max_bucket)
            .field("available", &self.available())
            .field("stats", &self.stats())
            .finish()
    }
}

/// `size` rounded up to a power of two, saturating at the largest one.
fn round_to_class(size: usize) -> usize {
    size.checked_next_power_of_two().unwrap_or(1 << (usize::BITS - 1))
}

fn allocate(len: usize) -> Result<Box<[u8]>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| Error::AllocationLimit {
            requested: len,
            limit: DEFAULT_MAX_CAPACITY,
        })?;
    buffer.resize(len, 0);
    Ok(buffer.into_boxed_slice())
}

/// Storage checked out from a [`BufferPool`], or an empty placeholder.
///
/// The storage goes back to its pool exactly once: on [`Lease::release`] or
/// on drop, whichever comes first.
pub struct Lease {
    buffer: Box<[u8]>,
    pool: Option<Arc<BufferPoolInner>>,
}

impl Lease {
    /// A zero-length lease that owns nothing and returns nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            buffer: Box::default(),
            pool: None,
        }
    }

    /// Whether this lease still holds pooled storage.
    #[must_use]
    pub fn is_pooled(&self) -> bool {
        self.pool.is_some()
    }

    /// Hand the storage back to its pool and become empty. Returns whether
    /// anything was handed back.
    pub fn release(&mut self) -> bool {
        let buffer = core::mem::take(&mut self.buffer);
        match self.pool.take() {
            Some(pool) => {
                pool.release(buffer);
                true
            }
            None => false,
        }
    }
}

impl core::ops::Deref for Lease {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.buffer
    }
}

impl core::ops::DerefMut for Lease {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }
}

impl Default for Lease {
    fn default() -> Self {
        Self::empty()
    }
}

impl core::fmt::Debug for Lease {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Lease")
            .field("len", &self.buffer.len())
            .field("pooled", &self.is_pooled())
            .finish()
    }
}

impl Drop for Lease {
    fn drop(&mut self) {
        self.release();
    }
}
