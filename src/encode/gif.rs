use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use image::codecs::gif::{GifEncoder, Repeat};
use image::imageops::FilterType;

use crate::encode::ffmpeg::{ensure_parent_dir, staging_path_for};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{WrappedError, WrappedResult};
use crate::render::frame::FrameRGBA;

/// NeuQuant sampling factor; 10 is the `gif` crate's recommended speed/quality balance.
const QUANTIZER_SPEED: i32 = 10;

#[derive(Clone, Debug)]
pub struct GifSinkOpts {
    pub out_path: PathBuf,
    /// Output size; frames are resampled to it.
    pub width: u32,
    pub height: u32,
    /// How long each pushed frame stays on screen.
    pub frame_delay: Duration,
}

/// Looping animated GIF where every pushed frame is one slide.
///
/// Frames are downsampled as they arrive and encoded in [`FrameSink::end`].
pub struct GifSink {
    opts: GifSinkOpts,
    frames: Vec<image::Frame>,
    started: bool,
}

impl GifSink {
    pub fn new(opts: GifSinkOpts) -> Self {
        Self {
            opts,
            frames: Vec::new(),
            started: false,
        }
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, _cfg: SinkConfig) -> WrappedResult<()> {
        if self.opts.width == 0 || self.opts.height == 0 {
            return Err(WrappedError::validation(
                "gif preview width/height must be non-zero",
            ));
        }
        if self.opts.frame_delay.is_zero() {
            return Err(WrappedError::validation("gif frame delay must be > 0"));
        }
        ensure_parent_dir(&self.opts.out_path)?;
        self.frames.clear();
        self.started = true;
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, frame: &FrameRGBA) -> WrappedResult<()> {
        if !self.started {
            return Err(WrappedError::encode("gif sink not started"));
        }
        let full = frame.to_image()?;
        let small = if full.dimensions() == (self.opts.width, self.opts.height) {
            full
        } else {
            image::imageops::resize(
                &full,
                self.opts.width,
                self.opts.height,
                FilterType::Triangle,
            )
        };
        let delay = image::Delay::from_saturating_duration(self.opts.frame_delay);
        self.frames
            .push(image::Frame::from_parts(small, 0, 0, delay));
        Ok(())
    }

    fn end(&mut self) -> WrappedResult<()> {
        if !self.started {
            return Err(WrappedError::encode("gif sink not started"));
        }
        self.started = false;
        if self.frames.is_empty() {
            return Err(WrappedError::encode("gif preview has no frames"));
        }

        let mut bytes = Vec::new();
        {
            let mut encoder = GifEncoder::new_with_speed(&mut bytes, QUANTIZER_SPEED);
            encoder
                .set_repeat(Repeat::Infinite)
                .map_err(|e| WrappedError::encode(format!("gif repeat setup failed: {e}")))?;
            encoder
                .encode_frames(std::mem::take(&mut self.frames))
                .map_err(|e| WrappedError::encode(format!("gif encoding failed: {e}")))?;
        }

        let staging = staging_path_for(&self.opts.out_path);
        std::fs::write(&staging, &bytes)
            .with_context(|| format!("write gif '{}'", staging.display()))?;
        if let Err(e) = std::fs::rename(&staging, &self.opts.out_path) {
            let _ = std::fs::remove_file(&staging);
            return Err(WrappedError::encode(format!(
                "failed to move gif into place at '{}': {e}",
                self.opts.out_path.display()
            )));
        }
        tracing::info!(out = %self.opts.out_path.display(), bytes = bytes.len(), "gif written");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
