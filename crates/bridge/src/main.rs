//! Bridge harness — runs the audio bridging engine between two simulated
//! transport callbacks.
//!
//! ## Wiring
//! 1. **Host domain**: a thread pushes fixed-cadence PCM chunks into the
//!    engine's input callback, the way the USB audio class driver would.
//! 2. **Sink domain**: a thread pulls fixed-size chunks from the engine's
//!    output callback, the way the wireless stack's data callback would.
//! 3. **Control domain**: mute/volume/remote events arrive over a channel
//!    and are dispatched to the engine's control callbacks.
//!
//! The engine itself (ring buffer, overflow/underrun policies, gain stage,
//! remote interpretation) lives in the `bridge-engine` crate.

mod cli;
mod runtime;
mod sim;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = cli::Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("info,bridge=info")
        }))
        .init();

    runtime::run(&args, true)
}
