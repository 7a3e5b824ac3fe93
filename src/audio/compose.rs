//! Narration and background music layering.
//!
//! Narration for clip `i` starts a short lead-in after the clip begins and is cut at the clip's
//! end, so it never bleeds into the next slide or past the video. Music is looped or truncated
//! to the full video length, faded at both ends, and ducked whenever narration is present.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::audio::media::{AudioLoader, AudioPcm, MIX_CHANNELS, MIX_SAMPLE_RATE};
use crate::audio::mix::{
    AudioManifest, AudioSegment, loop_to_length, mix_manifest, secs_to_sample,
    write_mix_to_f32le_file,
};
use crate::config::AudioMixConfig;
use crate::foundation::error::WrappedResult;
use crate::timeline::clip::Timeline;

/// Optional audio assets: one narration slot per clip position plus one music track.
#[derive(Clone, Debug, Default)]
pub struct AudioInputs {
    pub narration: Vec<Option<PathBuf>>,
    pub music: Option<PathBuf>,
}

impl AudioInputs {
    pub fn is_empty(&self) -> bool {
        self.music.is_none() && self.narration.iter().all(Option::is_none)
    }
}

/// Final 48 kHz stereo mix.
#[derive(Clone, Debug)]
pub struct AudioMix {
    pub sample_rate: u32,
    pub channels: u16,
    pub interleaved_f32: Vec<f32>,
    /// Clip indices whose narration made it into the mix.
    pub narrated_clips: Vec<usize>,
    pub has_music: bool,
    /// Gain applied to the music track after ducking.
    pub music_gain: f32,
}

impl AudioMix {
    pub fn frames(&self) -> usize {
        self.interleaved_f32.len() / usize::from(self.channels.max(1))
    }

    pub fn write_f32le(&self, path: &Path) -> WrappedResult<()> {
        write_mix_to_f32le_file(&self.interleaved_f32, path)
    }
}

/// Result of composing: `mix` is `None` when nothing survived loading.
#[derive(Clone, Debug, Default)]
pub struct ComposedAudio {
    pub mix: Option<AudioMix>,
    /// One entry per asset that was dropped.
    pub warnings: Vec<String>,
}

/// Load, place and mix every audio asset against `timeline`.
///
/// Load failures never abort: the asset is dropped, logged and reported in
/// [`ComposedAudio::warnings`].
#[tracing::instrument(skip_all, fields(narration = inputs.narration.len(), music = inputs.music.is_some()))]
pub fn compose_audio(
    timeline: &Timeline,
    inputs: &AudioInputs,
    cfg: &AudioMixConfig,
    loader: &dyn AudioLoader,
) -> ComposedAudio {
    let mut warnings = Vec::new();
    let mut warn = |msg: String| {
        tracing::warn!("{msg}");
        warnings.push(msg);
    };

    let total_samples = secs_to_sample(timeline.duration_secs(), MIX_SAMPLE_RATE);

    if inputs.narration.len() > timeline.len() {
        warn(format!(
            "{} narration tracks given for {} clips; extras ignored",
            inputs.narration.len(),
            timeline.len()
        ));
    }

    let mut narration_segments = Vec::new();
    let mut narrated_clips = Vec::new();
    for (idx, path) in inputs.narration.iter().enumerate().take(timeline.len()) {
        let Some(path) = path else {
            continue;
        };
        let pcm = match load_checked(loader, path) {
            Ok(pcm) => pcm,
            Err(e) => {
                warn(format!(
                    "narration {idx} '{}' dropped: {e}",
                    path.display()
                ));
                continue;
            }
        };

        let clip_start = timeline.clip_start_secs(idx);
        let clip_end = clip_start + timeline.clips()[idx].duration;
        let start = clip_start + cfg.narration_lead_in_secs;
        let end = (start + pcm.duration_secs()).min(clip_end);
        if end <= start {
            warn(format!(
                "narration {idx} '{}' dropped: clip too short for the lead-in",
                path.display()
            ));
            continue;
        }
        if start + pcm.duration_secs() > clip_end {
            tracing::debug!(clip = idx, "narration longer than its clip; truncated");
        }

        narration_segments.push(AudioSegment {
            timeline_start_sample: secs_to_sample(start, MIX_SAMPLE_RATE),
            timeline_end_sample: secs_to_sample(end, MIX_SAMPLE_RATE),
            volume: 1.0,
            fade_in_sec: 0.0,
            fade_out_sec: 0.0,
            source: Arc::new(pcm),
        });
        narrated_clips.push(idx);
    }

    let mut music_gain = cfg.music_gain as f32;
    if !narration_segments.is_empty() {
        music_gain *= cfg.music_duck_factor as f32;
    }

    let music_segment = inputs.music.as_ref().and_then(|path| {
        match load_checked(loader, path) {
            Ok(pcm) => {
                let src_target = secs_to_sample(timeline.duration_secs(), pcm.sample_rate);
                let looped = loop_to_length(&pcm, src_target as usize);
                tracing::debug!(
                    source_secs = pcm.duration_secs(),
                    looped_secs = looped.duration_secs(),
                    "music fitted to video length"
                );
                Some(AudioSegment {
                    timeline_start_sample: 0,
                    timeline_end_sample: total_samples,
                    volume: music_gain,
                    fade_in_sec: cfg.music_fade_in_secs,
                    fade_out_sec: cfg.music_fade_out_secs,
                    source: Arc::new(looped),
                })
            }
            Err(e) => {
                warn(format!("music '{}' dropped: {e}", path.display()));
                None
            }
        }
    });

    let has_music = music_segment.is_some();
    let segments: Vec<AudioSegment> = music_segment.into_iter().chain(narration_segments).collect();
    if segments.is_empty() {
        return ComposedAudio {
            mix: None,
            warnings,
        };
    }

    let manifest = AudioManifest {
        sample_rate: MIX_SAMPLE_RATE,
        channels: MIX_CHANNELS,
        total_samples,
        segments,
    };
    let interleaved_f32 = mix_manifest(&manifest);
    tracing::info!(
        narrated = narrated_clips.len(),
        has_music,
        samples = total_samples,
        "audio composed"
    );

    ComposedAudio {
        mix: Some(AudioMix {
            sample_rate: MIX_SAMPLE_RATE,
            channels: MIX_CHANNELS,
            interleaved_f32,
            narrated_clips,
            has_music,
            music_gain: if has_music { music_gain } else { 0.0 },
        }),
        warnings,
    }
}

fn load_checked(loader: &dyn AudioLoader, path: &Path) -> WrappedResult<AudioPcm> {
    let pcm = loader.load(path)?;
    pcm.validate()?;
    Ok(pcm)
}

#[cfg(test)]
#[path = "../../tests/unit/audio/compose.rs"]
mod tests;
