//! Output sinks.
//!
//! Sinks consume rendered frames in timeline order, pushed by the render pipeline.

/// `ffmpeg`-based MP4 output via the system binary.
pub(crate) mod ffmpeg;
/// Animated GIF preview output.
pub(crate) mod gif;
/// Generic frame sink trait and the in-memory sink.
pub(crate) mod sink;
