//! Bounded byte ring for interleaved PCM.
//!
//! The ingest side (host push callback) writes into the ring and the supply
//! side (sink pull callback) reads from it. Both sides run under real-time
//! deadlines, so every operation here is non-blocking: the only lock is held
//! for a bounded copy and there is no condition-variable wait in either
//! direction. Overflow and underrun are the caller's policy decisions; the
//! ring just reports how many bytes it could accept or produce.

use std::collections::VecDeque;
use std::sync::Mutex;

/// Fixed-capacity FIFO of PCM bytes shared between the two audio contexts.
///
/// ## Design
/// - **Bounded** by `capacity` bytes; occupancy never exceeds it.
/// - **Non-blocking**: `write` accepts what fits and returns, `read_upto`
///   returns what is buffered and returns. Neither waits for the other side.
/// - Each call is atomic with respect to the other side: one lock
///   acquisition per call, held only for the copy.
///
/// Byte-granular on purpose: the upstream delivery length is not guaranteed
/// to be frame-aligned, and splitting a frame across two reads is harmless
/// because the consumer reassembles a contiguous byte stream.
pub struct PcmRing {
    capacity: usize,
    inner: Mutex<VecDeque<u8>>,
}

impl PcmRing {
    /// Create a ring holding at most `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Maximum occupancy in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current occupancy in bytes (best-effort snapshot).
    ///
    /// This value can change immediately after the call returns.
    pub fn len(&self) -> usize {
        let g = self.inner.lock().unwrap();
        g.len()
    }

    /// Whether the ring currently holds no data (best-effort snapshot).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append as much of `bytes` as free space allows.
    ///
    /// Returns the number of bytes accepted; the caller decides what to do
    /// with the unaccepted tail (the ingest handler applies drop-oldest).
    pub fn write(&self, bytes: &[u8]) -> usize {
        let mut g = self.inner.lock().unwrap();
        let free = self.capacity - g.len();
        let take = bytes.len().min(free);
        g.extend(&bytes[..take]);
        take
    }

    /// Remove and return up to `max` bytes from the front.
    ///
    /// An empty return means the ring held no data at the time of the call;
    /// the supply handler treats that as the underrun signal.
    pub fn read_upto(&self, max: usize) -> Vec<u8> {
        let mut g = self.inner.lock().unwrap();
        let take = g.len().min(max);
        g.drain(..take).collect()
    }
}
