use clap::Parser;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_SHA"),
    ", ",
    env!("BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "bridge", version = VERSION)]
pub struct Args {
    /// Ring capacity in bytes between the host and sink timing domains
    #[arg(long, default_value_t = 8 * 1024)]
    pub buffer_capacity: usize,

    /// Host delivery period in milliseconds (push cadence)
    #[arg(long, default_value_t = 10)]
    pub host_chunk_ms: u64,

    /// Sink request period in milliseconds (pull cadence)
    #[arg(long, default_value_t = 10)]
    pub sink_chunk_ms: u64,

    /// Run for this many seconds, then exit (0 = run until Ctrl-C)
    #[arg(long, default_value_t = 10)]
    pub duration_secs: u64,

    /// Seconds between status log lines
    #[arg(long, default_value_t = 1)]
    pub status_interval_secs: u64,

    /// Drive a scripted volume sweep and remote pause toggle during the run
    #[arg(long)]
    pub exercise_controls: bool,

    /// Test-tone frequency for the simulated host source, in Hz
    #[arg(long, default_value_t = 440.0)]
    pub tone_hz: f32,
}
