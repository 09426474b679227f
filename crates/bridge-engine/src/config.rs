//! Build-time audio constants for the bridge.

use anyhow::{Result, bail};

/// Bytes per interleaved frame: 2 channels x 16-bit samples.
pub const FRAME_BYTES: usize = 4;

/// Fixed audio format and buffer sizing for the bridge.
///
/// These mirror the assumptions baked into the transport drivers (the host
/// stream descriptor and the sink codec input) and are not runtime-mutable.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Sample rate of the stream on both sides, in Hz.
    pub sample_rate_hz: u32,
    /// Interleaved channel count.
    pub channels: u16,
    /// Bits per sample; only 16-bit signed little-endian is supported.
    pub bits_per_sample: u16,
    /// Ring capacity in bytes between the ingest and supply contexts.
    ///
    /// Larger values ride out bigger timing mismatches at the cost of
    /// latency; 8 KiB is ~21 ms at 48 kHz stereo 16-bit.
    pub buffer_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 48_000,
            channels: 2,
            bits_per_sample: 16,
            buffer_capacity: 8 * 1024,
        }
    }
}

impl EngineConfig {
    /// Validate the configuration before the bridge starts.
    ///
    /// Failures here are fatal to startup; once streaming begins no
    /// configuration error can occur.
    pub fn validate(&self) -> Result<()> {
        if self.channels != 2 || self.bits_per_sample != 16 {
            bail!(
                "unsupported format: {} ch / {}-bit (only 2 ch / 16-bit)",
                self.channels,
                self.bits_per_sample
            );
        }
        if self.sample_rate_hz == 0 {
            bail!("sample rate must be nonzero");
        }
        if self.buffer_capacity == 0 {
            bail!("buffer capacity must be nonzero");
        }
        if self.buffer_capacity % FRAME_BYTES != 0 {
            bail!(
                "buffer capacity {} is not a multiple of the {}-byte frame size",
                self.buffer_capacity,
                FRAME_BYTES
            );
        }
        Ok(())
    }
}
