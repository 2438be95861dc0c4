//! Ambilight - six-zone screen color sampler
//!
//! Reads a captured screen image, reduces it to six zone colors and sends
//! them to a networked light controller. The color math lives in the
//! `zone-color` crate; this library adds configuration, the parallel frame
//! pipeline, wire encodings and UDP transport.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod runner;
pub mod services;

pub use runner::{FrameOutcome, RunSummary, Runner};
