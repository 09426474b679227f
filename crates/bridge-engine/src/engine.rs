//! The bridging engine: ingest and supply handlers plus control callbacks.
//!
//! The transport drivers own the execution contexts; the engine only reacts:
//! - the host push callback lands in [`AudioBridge::on_input_chunk`]
//! - the sink pull callback lands in [`AudioBridge::on_output_request`]
//! - mute/volume/button events land in the three control callbacks
//!
//! Both audio handlers run under real-time deadlines and therefore never
//! block, never allocate unboundedly, and never surface an error: overflow
//! recovers by dropping the oldest audio, underrun by substituting silence.

use std::sync::Arc;

use anyhow::Result;

use crate::buffer::PcmRing;
use crate::config::EngineConfig;
use crate::remote::{self, RemoteAction};
use crate::state::PlaybackState;
use crate::status::EngineCounters;
use crate::volume;

/// Callback surface the bootstrap registers against the transport drivers.
pub trait AudioBridge {
    /// Host delivered `pcm` bytes; accept them unconditionally and quickly.
    fn on_input_chunk(&self, pcm: &[u8]);
    /// Sink wants `out` filled completely, synchronously.
    fn on_output_request(&self, out: &mut [u8]);
    /// Host changed the mute state.
    fn on_mute_changed(&self, muted: bool);
    /// Host reported a volume value of undeclared scale.
    fn on_volume_changed(&self, raw: u32);
    /// Sink delivered a remote-control button event.
    fn on_remote_command(&self, code: u8, released: bool);
}

/// Downstream volume indication: the sink mirrors a 0–127 level so its own
/// indicator tracks the bridge's gain stage.
pub trait SinkControl: Send + Sync {
    fn set_absolute_volume(&self, volume: u8);
}

/// Driver glue usually holds the sink handle in an `Arc`; let it register
/// the shared handle directly.
impl<T: SinkControl> SinkControl for Arc<T> {
    fn set_absolute_volume(&self, volume: u8) {
        (**self).set_absolute_volume(volume);
    }
}

/// Engine state shared by the three execution contexts.
///
/// Owns the ring, the playback scalars, and the diagnostic counters; no
/// ambient statics. Construct once at startup and hand `&`/`Arc` references
/// to the driver glue.
pub struct BridgeEngine {
    ring: Arc<PcmRing>,
    playback: PlaybackState,
    counters: Arc<EngineCounters>,
    sink: Box<dyn SinkControl>,
}

impl BridgeEngine {
    /// Validate the configuration and allocate the ring.
    ///
    /// Errors here are fatal to startup; the bridge must not begin streaming
    /// with an invalid buffer.
    pub fn new(config: &EngineConfig, sink: Box<dyn SinkControl>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            ring: Arc::new(PcmRing::new(config.buffer_capacity)),
            playback: PlaybackState::default(),
            counters: Arc::new(EngineCounters::default()),
            sink,
        })
    }

    pub fn ring(&self) -> &Arc<PcmRing> {
        &self.ring
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    pub fn counters(&self) -> &Arc<EngineCounters> {
        &self.counters
    }
}

impl AudioBridge for BridgeEngine {
    /// Write the delivery into the ring, reclaiming space with the
    /// drop-oldest policy on overflow.
    ///
    /// There is no flow-control channel back to the host, so the handler
    /// retries exactly once after discarding and then lets the remainder go.
    fn on_input_chunk(&self, pcm: &[u8]) {
        if pcm.is_empty() {
            return;
        }

        let accepted = self.ring.write(pcm);
        self.counters.add_ingested(accepted);
        if accepted == pcm.len() {
            return;
        }

        // Overflow: discard the oldest bytes the retry needs, at most the
        // shortfall, so surviving audio keeps its FIFO order.
        self.counters.note_overflow();
        let shortfall = pcm.len() - accepted;
        let discarded = self.ring.read_upto(shortfall).len();

        let retried = self.ring.write(&pcm[accepted..]);
        self.counters.add_ingested(retried);

        let lost = discarded + (shortfall - retried);
        self.counters.add_dropped(lost);
        tracing::trace!(
            delivery = pcm.len(),
            discarded,
            dropped = shortfall - retried,
            "ring overflow, oldest audio dropped"
        );
    }

    /// Assemble exactly `out.len()` bytes for the sink.
    ///
    /// Mute and zero volume short-circuit to silence without draining the
    /// ring, so unmuting resumes where the host left off. Underrun is
    /// detected by a single empty read and fills the tail once.
    fn on_output_request(&self, out: &mut [u8]) {
        let (volume_percent, muted) = self.playback.snapshot();
        if muted || volume_percent == 0 {
            out.fill(0);
            self.counters.add_supplied(out.len());
            return;
        }

        let mut filled = 0;
        while filled < out.len() {
            let chunk = self.ring.read_upto(out.len() - filled);
            if chunk.is_empty() {
                out[filled..].fill(0);
                self.counters.note_underrun();
                self.counters.add_silence(out.len() - filled);
                tracing::trace!(
                    requested = out.len(),
                    real = filled,
                    "ring underrun, tail silenced"
                );
                break;
            }
            out[filled..filled + chunk.len()].copy_from_slice(&chunk);
            filled += chunk.len();
        }

        volume::apply_gain(out, volume_percent);
        self.counters.add_supplied(out.len());
    }

    fn on_mute_changed(&self, muted: bool) {
        self.playback.set_muted(muted);
        tracing::info!(muted, "host set mute");
    }

    /// Store the canonical percent and mirror a 0–127 level to the sink.
    ///
    /// The raw value's scale is undeclared; `volume::normalize_reported`
    /// documents the heuristic and its known ambiguity.
    fn on_volume_changed(&self, raw: u32) {
        let update = volume::normalize_reported(raw);
        self.playback.set_volume_percent(update.percent);
        self.sink.set_absolute_volume(update.absolute);
        tracing::info!(
            raw,
            percent = update.percent,
            absolute = update.absolute,
            "host set volume"
        );
    }

    fn on_remote_command(&self, code: u8, released: bool) {
        match remote::interpret(code, released) {
            None => {
                tracing::trace!(code, "remote button pressed");
            }
            Some(RemoteAction::TogglePause) => {
                let muted = self.playback.toggle_muted();
                tracing::info!(muted, "pause toggled by remote");
            }
            Some(RemoteAction::LogOnly(key)) => {
                tracing::info!(?key, "remote command has no media effect here");
            }
            Some(RemoteAction::Ignore) => {
                tracing::info!(code, "unhandled remote command");
            }
        }
    }
}
