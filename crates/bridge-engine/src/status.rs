//! Diagnostic counters updated by the audio path.
//!
//! The counters are write-only from the engine's point of view: the audio
//! handlers bump them with relaxed atomics and never read them back. A
//! reporting context takes periodic snapshots for the status log.

use std::sync::atomic::{AtomicU64, Ordering};

/// Shared counters for both audio directions.
#[derive(Debug, Default)]
pub struct EngineCounters {
    /// Bytes accepted from the host into the ring.
    pub ingested_bytes: AtomicU64,
    /// Bytes lost to the drop-oldest overflow policy (discarded + unwritable).
    pub dropped_bytes: AtomicU64,
    /// Ingest deliveries that hit a full ring.
    pub overflow_events: AtomicU64,
    /// Bytes handed to the sink (real data and silence together).
    pub supplied_bytes: AtomicU64,
    /// Bytes of silence substituted on underrun.
    pub silence_bytes: AtomicU64,
    /// Supply requests that drained the ring before completion.
    pub underrun_events: AtomicU64,
}

/// Point-in-time copy of [`EngineCounters`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CountersSnapshot {
    pub ingested_bytes: u64,
    pub dropped_bytes: u64,
    pub overflow_events: u64,
    pub supplied_bytes: u64,
    pub silence_bytes: u64,
    pub underrun_events: u64,
}

impl EngineCounters {
    pub fn add_ingested(&self, bytes: usize) {
        self.ingested_bytes.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    pub fn add_dropped(&self, bytes: usize) {
        self.dropped_bytes.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    pub fn note_overflow(&self) {
        self.overflow_events.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_supplied(&self, bytes: usize) {
        self.supplied_bytes.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    pub fn add_silence(&self, bytes: usize) {
        self.silence_bytes.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    pub fn note_underrun(&self) {
        self.underrun_events.fetch_add(1, Ordering::Relaxed);
    }

    /// Best-effort consistent copy for reporting.
    pub fn snapshot(&self) -> CountersSnapshot {
        CountersSnapshot {
            ingested_bytes: self.ingested_bytes.load(Ordering::Relaxed),
            dropped_bytes: self.dropped_bytes.load(Ordering::Relaxed),
            overflow_events: self.overflow_events.load(Ordering::Relaxed),
            supplied_bytes: self.supplied_bytes.load(Ordering::Relaxed),
            silence_bytes: self.silence_bytes.load(Ordering::Relaxed),
            underrun_events: self.underrun_events.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_copies_all_counters() {
        let counters = EngineCounters::default();
        counters.add_ingested(100);
        counters.add_dropped(8);
        counters.note_overflow();
        counters.add_supplied(64);
        counters.add_silence(16);
        counters.note_underrun();
        counters.note_underrun();

        let snap = counters.snapshot();
        assert_eq!(snap.ingested_bytes, 100);
        assert_eq!(snap.dropped_bytes, 8);
        assert_eq!(snap.overflow_events, 1);
        assert_eq!(snap.supplied_bytes, 64);
        assert_eq!(snap.silence_bytes, 16);
        assert_eq!(snap.underrun_events, 2);
    }

    #[test]
    fn default_snapshot_is_zero() {
        assert_eq!(EngineCounters::default().snapshot(), CountersSnapshot::default());
    }
}
