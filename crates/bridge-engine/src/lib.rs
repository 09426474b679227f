//! Bridge engine — routes a host-driven PCM stream to a pull-driven
//! wireless sink through a bounded ring, with drop-oldest overflow,
//! silence-fill underrun, an integer gain stage, and remote-control
//! pause handling.
//!
//! ## Data flow
//! host push callback → [`engine::AudioBridge::on_input_chunk`] →
//! [`buffer::PcmRing`] → [`engine::AudioBridge::on_output_request`] →
//! sink pull callback.
//!
//! The transport drivers themselves (USB audio class, wireless stack) are
//! collaborators wired up by the hosting binary; this crate is only the
//! part between their callbacks.

pub mod buffer;
pub mod config;
pub mod engine;
pub mod remote;
pub mod state;
pub mod status;
pub mod volume;
