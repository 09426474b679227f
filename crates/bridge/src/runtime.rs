//! Harness wiring: engine construction, timing-domain threads, control
//! script delivery, and periodic status logging.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossbeam_channel::{RecvTimeoutError, Sender};

use crate::{cli, sim};
use bridge_engine::config::{EngineConfig, FRAME_BYTES};
use bridge_engine::engine::{AudioBridge, BridgeEngine};

/// Build the engine, run the two timing domains plus the control loop,
/// and block until the run duration expires or Ctrl-C fires.
pub fn run(args: &cli::Args, install_ctrlc: bool) -> Result<()> {
    let config = EngineConfig {
        buffer_capacity: args.buffer_capacity,
        ..EngineConfig::default()
    };

    let sink = Arc::new(sim::SinkVolumeDisplay::default());
    let engine = Arc::new(
        BridgeEngine::new(&config, Box::new(sink.clone())).context("bridge startup failed")?,
    );
    tracing::info!(
        capacity_bytes = config.buffer_capacity,
        rate_hz = config.sample_rate_hz,
        channels = config.channels,
        "bridge ready"
    );

    let running = Arc::new(AtomicBool::new(true));
    if install_ctrlc {
        let running = running.clone();
        let _ = ctrlc::set_handler(move || {
            running.store(false, Ordering::Relaxed);
        });
    }

    let host = spawn_host(engine.clone(), running.clone(), &config, args);
    let sink_domain = spawn_sink(engine.clone(), running.clone(), &config, args);

    // Control events arrive on their own low-frequency context; the loop
    // below is that context, with status logging on the idle ticks.
    let (ctl_tx, ctl_rx) = crossbeam_channel::unbounded();
    let script = args
        .exercise_controls
        .then(|| spawn_control_script(ctl_tx.clone(), running.clone()));

    let deadline = (args.duration_secs > 0)
        .then(|| Instant::now() + Duration::from_secs(args.duration_secs));
    let interval = Duration::from_secs(args.status_interval_secs.max(1));

    while running.load(Ordering::Relaxed) {
        if let Some(deadline) = deadline {
            if Instant::now() >= deadline {
                break;
            }
        }
        match ctl_rx.recv_timeout(interval) {
            Ok(event) => dispatch(engine.as_ref(), event),
            Err(RecvTimeoutError::Timeout) => log_status(&engine),
            // Unreachable while ctl_tx is alive in this scope.
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    running.store(false, Ordering::Relaxed);
    let _ = host.join();
    let _ = sink_domain.join();
    if let Some(script) = script {
        let _ = script.join();
    }
    drop(ctl_tx);

    log_status(&engine);
    tracing::info!(sink_volume = sink.absolute(), "bridge stopped");
    Ok(())
}

/// Deliver one scripted control event to the engine's callback surface.
fn dispatch(engine: &BridgeEngine, event: sim::ControlEvent) {
    match event {
        sim::ControlEvent::Mute(muted) => engine.on_mute_changed(muted),
        sim::ControlEvent::Volume(raw) => engine.on_volume_changed(raw),
        sim::ControlEvent::Remote { code, released } => engine.on_remote_command(code, released),
    }
}

fn log_status(engine: &Arc<BridgeEngine>) {
    let snap = engine.counters().snapshot();
    tracing::info!(
        ingested = snap.ingested_bytes,
        dropped = snap.dropped_bytes,
        overflows = snap.overflow_events,
        supplied = snap.supplied_bytes,
        silence = snap.silence_bytes,
        underruns = snap.underrun_events,
        buffered = engine.ring().len(),
        "bridge status"
    );
}

/// Host timing domain: pushes tone chunks at its own fixed cadence.
fn spawn_host(
    engine: Arc<BridgeEngine>,
    running: Arc<AtomicBool>,
    config: &EngineConfig,
    args: &cli::Args,
) -> thread::JoinHandle<()> {
    let rate = config.sample_rate_hz;
    let period_ms = args.host_chunk_ms.max(1);
    let frames = (rate as u64 * period_ms / 1000) as usize;
    let tone_hz = args.tone_hz;

    thread::spawn(move || {
        let mut source = sim::ToneSource::new(rate, tone_hz, 16_000);
        let period = Duration::from_millis(period_ms);
        while running.load(Ordering::Relaxed) {
            let chunk = source.next_chunk(frames);
            engine.on_input_chunk(&chunk);
            thread::sleep(period);
        }
    })
}

/// Sink timing domain: pulls fixed-size requests at its own fixed cadence.
fn spawn_sink(
    engine: Arc<BridgeEngine>,
    running: Arc<AtomicBool>,
    config: &EngineConfig,
    args: &cli::Args,
) -> thread::JoinHandle<()> {
    let period_ms = args.sink_chunk_ms.max(1);
    let bytes = (config.sample_rate_hz as u64 * period_ms / 1000) as usize * FRAME_BYTES;

    thread::spawn(move || {
        let mut out = vec![0u8; bytes];
        let period = Duration::from_millis(period_ms);
        while running.load(Ordering::Relaxed) {
            engine.on_output_request(&mut out);
            thread::sleep(period);
        }
    })
}

/// Scripted control traffic: a volume sweep across all three reported
/// scales, then a remote play/pause press+release pair.
fn spawn_control_script(
    tx: Sender<sim::ControlEvent>,
    running: Arc<AtomicBool>,
) -> thread::JoinHandle<()> {
    const PLAY: u8 = 0x44;
    const PAUSE: u8 = 0x46;

    let script: &[(u64, sim::ControlEvent)] = &[
        (1000, sim::ControlEvent::Volume(64)),
        (1000, sim::ControlEvent::Volume(200)),
        (1000, sim::ControlEvent::Remote { code: PLAY, released: false }),
        (100, sim::ControlEvent::Remote { code: PLAY, released: true }),
        (2000, sim::ControlEvent::Remote { code: PAUSE, released: false }),
        (100, sim::ControlEvent::Remote { code: PAUSE, released: true }),
        (1000, sim::ControlEvent::Volume(100)),
    ];

    let steps: Vec<(u64, sim::ControlEvent)> = script.to_vec();
    thread::spawn(move || {
        for (delay_ms, event) in steps {
            thread::sleep(Duration::from_millis(delay_ms));
            if !running.load(Ordering::Relaxed) {
                return;
            }
            if tx.send(event).is_err() {
                return;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_args() -> cli::Args {
        cli::Args {
            buffer_capacity: 1024,
            host_chunk_ms: 5,
            sink_chunk_ms: 5,
            duration_secs: 1,
            status_interval_secs: 1,
            exercise_controls: false,
            tone_hz: 440.0,
        }
    }

    #[test]
    fn run_completes_after_duration() {
        assert!(run(&test_args(), false).is_ok());
    }

    #[test]
    fn invalid_capacity_is_fatal_at_startup() {
        let args = cli::Args {
            buffer_capacity: 3,
            ..test_args()
        };
        assert!(run(&args, false).is_err());
    }
}
