//! Shared mute/volume playback state.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Mute flag and canonical volume percent read by the supply path.
///
/// The two fields are independent relaxed atomics: the output callback reads
/// each on every request, and the control context mutates them at a much
/// lower rate. There is no invariant coupling them, so no lock is needed.
#[derive(Debug)]
pub struct PlaybackState {
    muted: AtomicBool,
    volume_percent: AtomicU8,
}

impl PlaybackState {
    pub fn new(volume_percent: u8, muted: bool) -> Self {
        Self {
            muted: AtomicBool::new(muted),
            volume_percent: AtomicU8::new(volume_percent.min(100)),
        }
    }

    /// `(volume_percent, muted)` pair read.
    pub fn snapshot(&self) -> (u8, bool) {
        (
            self.volume_percent.load(Ordering::Relaxed),
            self.muted.load(Ordering::Relaxed),
        )
    }

    pub fn muted(&self) -> bool {
        self.muted.load(Ordering::Relaxed)
    }

    pub fn set_muted(&self, muted: bool) {
        self.muted.store(muted, Ordering::Relaxed);
    }

    /// Flip the mute flag and return the new value.
    pub fn toggle_muted(&self) -> bool {
        !self.muted.fetch_xor(true, Ordering::Relaxed)
    }

    pub fn volume_percent(&self) -> u8 {
        self.volume_percent.load(Ordering::Relaxed)
    }

    pub fn set_volume_percent(&self, percent: u8) {
        self.volume_percent.store(percent.min(100), Ordering::Relaxed);
    }
}

impl Default for PlaybackState {
    /// Full volume, unmuted.
    fn default() -> Self {
        Self::new(100, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_stores() {
        let state = PlaybackState::default();
        assert_eq!(state.snapshot(), (100, false));

        state.set_volume_percent(30);
        state.set_muted(true);
        assert_eq!(state.snapshot(), (30, true));
    }

    #[test]
    fn volume_is_clamped_to_percent_range() {
        let state = PlaybackState::new(250, false);
        assert_eq!(state.volume_percent(), 100);
        state.set_volume_percent(200);
        assert_eq!(state.volume_percent(), 100);
    }

    #[test]
    fn toggle_returns_new_value() {
        let state = PlaybackState::default();
        assert!(state.toggle_muted());
        assert!(state.muted());
        assert!(!state.toggle_muted());
        assert!(!state.muted());
    }
}
