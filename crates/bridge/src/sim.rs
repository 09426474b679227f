//! Simulated collaborators for the loopback harness.
//!
//! On target hardware the host side is the USB audio class driver and the
//! sink side is the wireless stack; both deliver callbacks the bootstrap
//! registers against the engine. Host-side there are no such drivers, so the
//! harness stands in two stand-ins running on their own cadences, plus a
//! sink volume display that records the forwarded 0–127 level.

use std::f32::consts::TAU;
use std::sync::atomic::{AtomicU8, Ordering};

use bridge_engine::engine::SinkControl;

/// Control events the harness script can deliver to the engine.
#[derive(Clone, Copy, Debug)]
pub enum ControlEvent {
    Mute(bool),
    Volume(u32),
    Remote { code: u8, released: bool },
}

/// Sine-tone generator standing in for the host playback stream.
///
/// Produces 16-bit little-endian interleaved stereo, same signal on both
/// channels, phase continuous across chunks.
pub struct ToneSource {
    sample_rate_hz: u32,
    tone_hz: f32,
    amplitude: i16,
    phase: f32,
}

impl ToneSource {
    pub fn new(sample_rate_hz: u32, tone_hz: f32, amplitude: i16) -> Self {
        Self {
            sample_rate_hz,
            tone_hz,
            amplitude,
            phase: 0.0,
        }
    }

    /// Generate `frames` stereo frames of tone as raw PCM bytes.
    pub fn next_chunk(&mut self, frames: usize) -> Vec<u8> {
        let step = TAU * self.tone_hz / self.sample_rate_hz as f32;
        let mut pcm = Vec::with_capacity(frames * 4);
        for _ in 0..frames {
            let sample = (self.phase.sin() * self.amplitude as f32) as i16;
            let bytes = sample.to_le_bytes();
            pcm.extend_from_slice(&bytes);
            pcm.extend_from_slice(&bytes);
            self.phase += step;
            if self.phase >= TAU {
                self.phase -= TAU;
            }
        }
        pcm
    }
}

/// Sink-side volume indicator fed by the engine's `SinkControl` calls.
#[derive(Debug, Default)]
pub struct SinkVolumeDisplay {
    absolute: AtomicU8,
}

impl SinkVolumeDisplay {
    pub fn absolute(&self) -> u8 {
        self.absolute.load(Ordering::Relaxed)
    }
}

impl SinkControl for SinkVolumeDisplay {
    fn set_absolute_volume(&self, volume: u8) {
        self.absolute.store(volume, Ordering::Relaxed);
        tracing::debug!(volume, "sink volume indicator updated");
    }
}
