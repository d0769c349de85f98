//! # Scratch Buffer Pool
//!
//! Reusable encode buffers shared by concurrent proof requests.
//!
//! ## Ownership
//!
//! ```text
//! acquire() ──→ PooledBuffer (exclusive) ──drop──→ cleared, back on free list
//! ```
//!
//! A buffer is owned by exactly one guard while checked out, so two requests
//! never write into the same buffer. The guard hands it back on every exit
//! path, including early returns and unwinding.

use lazy_static::lazy_static;
use parking_lot::Mutex;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::domain::{ProofConfig, MAX_RETAINED_BUFFER};

lazy_static! {
    /// Process-wide pool used by the default proof service.
    pub static ref GLOBAL_BUFFER_POOL: Arc<EncodeBufferPool> =
        Arc::new(EncodeBufferPool::from_config(&ProofConfig::default()));
}

/// Pool of scratch buffers for transaction encoding.
#[derive(Debug)]
pub struct EncodeBufferPool {
    free: Mutex<Vec<Vec<u8>>>,
    capacity: usize,
    buffer_capacity: usize,
    outstanding: AtomicUsize,
}

impl EncodeBufferPool {
    /// Create a pool that keeps at most `capacity` idle buffers, each
    /// starting with `buffer_capacity` bytes.
    pub fn new(capacity: usize, buffer_capacity: usize) -> Self {
        Self {
            free: Mutex::new(Vec::with_capacity(capacity)),
            capacity,
            buffer_capacity,
            outstanding: AtomicUsize::new(0),
        }
    }

    pub fn from_config(config: &ProofConfig) -> Self {
        Self::new(config.pool_capacity, config.buffer_capacity)
    }

    /// Check out an empty buffer.
    pub fn acquire(&self) -> PooledBuffer<'_> {
        let buf = self
            .free
            .lock()
            .pop()
            .unwrap_or_else(|| Vec::with_capacity(self.buffer_capacity));
        self.outstanding.fetch_add(1, Ordering::AcqRel);
        PooledBuffer { pool: self, buf }
    }

    /// Idle buffers waiting for reuse.
    pub fn idle(&self) -> usize {
        self.free.lock().len()
    }

    /// Buffers currently checked out.
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Acquire)
    }

    fn release(&self, mut buf: Vec<u8>) {
        self.outstanding.fetch_sub(1, Ordering::AcqRel);
        if buf.capacity() > MAX_RETAINED_BUFFER {
            return;
        }
        buf.clear();
        let mut free = self.free.lock();
        if free.len() < self.capacity {
            free.push(buf);
        }
    }
}

impl Default for EncodeBufferPool {
    fn default() -> Self {
        Self::from_config(&ProofConfig::default())
    }
}

/// Exclusive handle on a pooled buffer; returns it to the pool on drop.
#[derive(Debug)]
pub struct PooledBuffer<'a> {
    pool: &'a EncodeBufferPool,
    buf: Vec<u8>,
}

impl Deref for PooledBuffer<'_> {
    type Target = Vec<u8>;

    fn deref(&self) -> &Vec<u8> {
        &self.buf
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.buf));
    }
}
