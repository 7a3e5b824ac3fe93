use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::audio::compose::{AudioInputs, compose_audio};
use crate::audio::media::AudioLoader;
use crate::config::RenderConfig;
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::gif::{GifSink, GifSinkOpts};
use crate::encode::sink::{AudioInputConfig, FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{WrappedError, WrappedResult};
use crate::render::cpu::FrameRenderer;
use crate::render::frame::FrameRGBA;
use crate::stats::record::StatisticsRecord;
use crate::timeline::builder::build_timeline;
use crate::timeline::clip::Timeline;

/// What kind of file a pipeline entry point produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactKind {
    /// MP4 with an AAC track.
    Video,
    /// MP4 without audio.
    SilentVideo,
    GifPreview,
    StillPng,
}

/// The single output file of a pipeline run.
#[derive(Clone, Debug)]
pub struct RenderedArtifact {
    pub path: PathBuf,
    pub kind: ArtifactKind,
    /// Frames pushed to the encoder.
    pub frames: u64,
    /// Playback length; zero for stills.
    pub duration_secs: f64,
    /// Non-fatal problems, e.g. audio assets that failed to load.
    pub warnings: Vec<String>,
}

/// Pull every frame of `timeline` through `renderer` into `sink`, in order.
///
/// Frame `n` is located on the timeline, evaluated at its clip-local time, rasterized, and pushed
/// before frame `n + 1` is requested.
pub fn render_timeline(
    timeline: &Timeline,
    cfg: &RenderConfig,
    renderer: &mut FrameRenderer,
    sink: &mut dyn FrameSink,
    audio: Option<AudioInputConfig>,
) -> WrappedResult<u64> {
    check_canvas(renderer, cfg)?;
    sink.begin(SinkConfig {
        width: cfg.canvas.width,
        height: cfg.canvas.height,
        fps: timeline.fps(),
        audio,
    })?;

    let mut current_clip = None;
    for f in 0..timeline.total_frames() {
        let idx = FrameIndex(f);
        let Some((clip_idx, t)) = timeline.locate(idx) else {
            break;
        };
        let clip = &timeline.clips()[clip_idx];
        if current_clip != Some(clip_idx) {
            tracing::debug!(clip = clip.id, frames = clip.frame_count(), "rendering clip");
            current_clip = Some(clip_idx);
        }
        let frame = renderer.render(&clip.scene_at(t, cfg))?;
        sink.push_frame(idx, &frame)?;
    }

    sink.end()?;
    Ok(timeline.total_frames())
}

/// Push one settled frame per clip: the moment every reveal is done and the fade-out has not
/// begun.
pub fn render_settled_frames(
    timeline: &Timeline,
    cfg: &RenderConfig,
    renderer: &mut FrameRenderer,
    sink: &mut dyn FrameSink,
    slide_fps: Fps,
) -> WrappedResult<u64> {
    check_canvas(renderer, cfg)?;
    sink.begin(SinkConfig {
        width: cfg.canvas.width,
        height: cfg.canvas.height,
        fps: slide_fps,
        audio: None,
    })?;
    for (i, clip) in timeline.clips().iter().enumerate() {
        let frame = renderer.render(&clip.scene_at(clip.settled_time(), cfg))?;
        sink.push_frame(FrameIndex(i as u64), &frame)?;
    }
    sink.end()?;
    Ok(timeline.len() as u64)
}

/// Render the full video: every clip, with narration and music when any survive loading.
///
/// With no usable audio the result is a silent MP4 of the same length.
#[tracing::instrument(skip_all, fields(repo = %stats.repo_name, out = %out_path.display()))]
pub fn render_video(
    stats: &StatisticsRecord,
    inputs: &AudioInputs,
    out_path: &Path,
    cfg: &RenderConfig,
    loader: &dyn AudioLoader,
) -> WrappedResult<RenderedArtifact> {
    cfg.validate()?;
    stats.validate()?;
    let timeline = build_timeline(stats, cfg)?;
    let composed = compose_audio(&timeline, inputs, &cfg.audio, loader);

    let audio_path = out_path.with_file_name(format!(
        ".{}.audio.f32le",
        out_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    ));
    let audio = match composed.mix.as_ref() {
        Some(mix) => {
            mix.write_f32le(&audio_path)?;
            Some(AudioInputConfig {
                path: audio_path.clone(),
                sample_rate: mix.sample_rate,
                channels: mix.channels,
            })
        }
        None => None,
    };
    let kind = if audio.is_some() {
        ArtifactKind::Video
    } else {
        ArtifactKind::SilentVideo
    };

    let result = FrameRenderer::new(cfg).and_then(|mut renderer| {
        let mut sink = FfmpegSink::new(
            FfmpegSinkOpts::new(out_path)
                .with_encoder(cfg.encoder.ffmpeg.clone(), cfg.encoder.preset.clone()),
        );
        render_timeline(&timeline, cfg, &mut renderer, &mut sink, audio.clone())
    });
    if audio.is_some() {
        let _ = std::fs::remove_file(&audio_path);
    }
    let frames = result?;

    tracing::info!(
        frames,
        secs = timeline.duration_secs(),
        audio = kind == ArtifactKind::Video,
        "video rendered"
    );
    Ok(RenderedArtifact {
        path: out_path.to_path_buf(),
        kind,
        frames,
        duration_secs: timeline.duration_secs(),
        warnings: composed.warnings,
    })
}

/// Render the looping GIF preview: one settled slide per clip, downsampled, uniform duration.
#[tracing::instrument(skip_all, fields(repo = %stats.repo_name, out = %out_path.display()))]
pub fn render_gif_preview(
    stats: &StatisticsRecord,
    out_path: &Path,
    cfg: &RenderConfig,
) -> WrappedResult<RenderedArtifact> {
    cfg.validate()?;
    stats.validate()?;
    let timeline = build_timeline(stats, cfg)?;
    let mut renderer = FrameRenderer::new(cfg)?;
    let mut sink = GifSink::new(GifSinkOpts {
        out_path: out_path.to_path_buf(),
        width: cfg.gif.width,
        height: cfg.gif.height,
        frame_delay: Duration::from_secs_f64(cfg.gif.slide_secs),
    });
    let slide_ms = (cfg.gif.slide_secs * 1000.0).round().max(1.0) as u32;
    let frames = render_settled_frames(
        &timeline,
        cfg,
        &mut renderer,
        &mut sink,
        Fps::new(1000, slide_ms)?,
    )?;

    Ok(RenderedArtifact {
        path: out_path.to_path_buf(),
        kind: ArtifactKind::GifPreview,
        frames,
        duration_secs: frames as f64 * cfg.gif.slide_secs,
        warnings: Vec::new(),
    })
}

/// Render clip `clip_idx` at local time `t` seconds.
pub fn render_still(
    stats: &StatisticsRecord,
    clip_idx: usize,
    t: f64,
    cfg: &RenderConfig,
) -> WrappedResult<FrameRGBA> {
    cfg.validate()?;
    stats.validate()?;
    let timeline = build_timeline(stats, cfg)?;
    let clip = timeline.clips().get(clip_idx).ok_or_else(|| {
        WrappedError::validation(format!(
            "clip index {clip_idx} out of range (timeline has {} clips)",
            timeline.len()
        ))
    })?;
    if !t.is_finite() || t < 0.0 || t > clip.duration {
        return Err(WrappedError::validation(format!(
            "time {t}s is outside clip '{}' (0..={}s)",
            clip.id, clip.duration
        )));
    }
    let mut renderer = FrameRenderer::new(cfg)?;
    renderer.render(&clip.scene_at(t, cfg))
}

/// [`render_still`], written as PNG.
#[tracing::instrument(skip_all, fields(clip = clip_idx, t = t, out = %out_path.display()))]
pub fn render_still_png(
    stats: &StatisticsRecord,
    clip_idx: usize,
    t: f64,
    out_path: &Path,
    cfg: &RenderConfig,
) -> WrappedResult<RenderedArtifact> {
    let frame = render_still(stats, clip_idx, t, cfg)?;
    frame.save_png(out_path)?;
    Ok(RenderedArtifact {
        path: out_path.to_path_buf(),
        kind: ArtifactKind::StillPng,
        frames: 1,
        duration_secs: 0.0,
        warnings: Vec::new(),
    })
}

fn check_canvas(renderer: &FrameRenderer, cfg: &RenderConfig) -> WrappedResult<()> {
    if renderer.canvas() != cfg.canvas {
        return Err(WrappedError::validation(format!(
            "renderer canvas {}x{} does not match configured {}x{}",
            renderer.canvas().width,
            renderer.canvas().height,
            cfg.canvas.width,
            cfg.canvas.height
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
