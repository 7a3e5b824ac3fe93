//! Render configuration.
//!
//! Every entry point takes an explicit [`RenderConfig`]. It is plain data: JSON-loadable, with a
//! default for every field, and checked once by [`RenderConfig::validate`] before rendering.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::core::{Canvas, Fps, Rgb8};
use crate::foundation::error::{WrappedError, WrappedResult};

const X264_PRESETS: [&str; 10] = [
    "ultrafast",
    "superfast",
    "veryfast",
    "faster",
    "fast",
    "medium",
    "slow",
    "slower",
    "veryslow",
    "placebo",
];

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Top-level settings shared by the renderer, audio composer and encoders.
pub struct RenderConfig {
    /// Output canvas; layout constants are scaled from 1080x1920.
    pub canvas: Canvas,
    /// Output frame rate.
    pub fps: Fps,
    /// Colour scheme.
    pub palette: Palette,
    /// Directory that relative output paths resolve against.
    pub output_dir: PathBuf,
    /// Preferred font file. Falls back to system fonts when absent or unreadable.
    pub font_path: Option<PathBuf>,
    /// Animation tuning knobs.
    pub animation: AnimationThresholds,
    /// Video encoder settings.
    pub encoder: EncoderSettings,
    /// GIF preview settings.
    pub gif: GifPreviewConfig,
    /// Audio mix constants.
    pub audio: AudioMixConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::REFERENCE,
            fps: Fps { num: 30, den: 1 },
            palette: Palette::default(),
            output_dir: PathBuf::from("output"),
            font_path: None,
            animation: AnimationThresholds::default(),
            encoder: EncoderSettings::default(),
            gif: GifPreviewConfig::default(),
            audio: AudioMixConfig::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Rgb8,
    pub primary: Rgb8,
    pub text: Rgb8,
    pub secondary: Rgb8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb8::new(0x12, 0x12, 0x12),
            primary: Rgb8::new(0x1D, 0xB9, 0x54),
            text: Rgb8::WHITE,
            secondary: Rgb8::new(0xB3, 0xB3, 0xB3),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimationThresholds {
    /// Count-up progress after which the numeral bounces.
    pub bounce_window_start: f64,
    /// Bar progress after which the value label is drawn above a bar.
    pub bar_label_min_progress: f64,
}

impl Default for AnimationThresholds {
    fn default() -> Self {
        Self {
            bounce_window_start: 0.95,
            bar_label_min_progress: 0.8,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EncoderSettings {
    /// `ffmpeg` executable name or path.
    pub ffmpeg: String,
    /// libx264 preset.
    pub preset: String,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            preset: "medium".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GifPreviewConfig {
    pub width: u32,
    pub height: u32,
    /// How long each slide is held.
    pub slide_secs: f64,
}

impl Default for GifPreviewConfig {
    fn default() -> Self {
        Self {
            width: 540,
            height: 960,
            slide_secs: 2.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AudioMixConfig {
    /// Delay between a clip's start and its narration.
    pub narration_lead_in_secs: f64,
    pub music_gain: f64,
    /// Extra music multiplier applied when narration is present.
    pub music_duck_factor: f64,
    pub music_fade_in_secs: f64,
    pub music_fade_out_secs: f64,
}

impl Default for AudioMixConfig {
    fn default() -> Self {
        Self {
            narration_lead_in_secs: 0.5,
            music_gain: 0.3,
            music_duck_factor: 0.5,
            music_fade_in_secs: 2.0,
            music_fade_out_secs: 3.0,
        }
    }
}

impl RenderConfig {
    /// Load a JSON config; missing fields take their defaults.
    pub fn from_path(path: &Path) -> WrappedResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&text)
            .map_err(|e| WrappedError::serde(format!("parse config '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> WrappedResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(WrappedError::validation("canvas width/height must be > 0"));
        }
        if self.canvas.width % 2 != 0 || self.canvas.height % 2 != 0 {
            return Err(WrappedError::validation(
                "canvas width/height must be even for yuv420p output",
            ));
        }
        Fps::new(self.fps.num, self.fps.den)?;

        for (name, v) in [
            ("bounce_window_start", self.animation.bounce_window_start),
            (
                "bar_label_min_progress",
                self.animation.bar_label_min_progress,
            ),
        ] {
            if !v.is_finite() || !(0.0..1.0).contains(&v) {
                return Err(WrappedError::validation(format!(
                    "animation.{name} must be in [0, 1)"
                )));
            }
        }

        if self.encoder.ffmpeg.trim().is_empty() {
            return Err(WrappedError::validation("encoder.ffmpeg must be non-empty"));
        }
        if !X264_PRESETS.contains(&self.encoder.preset.as_str()) {
            return Err(WrappedError::validation(format!(
                "encoder.preset '{}' is not a libx264 preset",
                self.encoder.preset
            )));
        }

        if self.gif.width == 0 || self.gif.height == 0 {
            return Err(WrappedError::validation("gif width/height must be > 0"));
        }
        if !self.gif.slide_secs.is_finite() || self.gif.slide_secs <= 0.0 {
            return Err(WrappedError::validation("gif.slide_secs must be > 0"));
        }

        for (name, v) in [
            ("narration_lead_in_secs", self.audio.narration_lead_in_secs),
            ("music_gain", self.audio.music_gain),
            ("music_duck_factor", self.audio.music_duck_factor),
            ("music_fade_in_secs", self.audio.music_fade_in_secs),
            ("music_fade_out_secs", self.audio.music_fade_out_secs),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(WrappedError::validation(format!(
                    "audio.{name} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }

    /// Resolve `path` against [`RenderConfig::output_dir`] unless it is already absolute.
    pub fn output_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.output_dir.join(path)
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
