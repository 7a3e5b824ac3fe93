use std::collections::HashMap;

use super::*;
use crate::foundation::core::{Fps, Rgb8};
use crate::foundation::error::WrappedError;
use crate::timeline::clip::{ClipDef, ClipKind, Gradient, LinesClip};

const RATE: u32 = MIX_SAMPLE_RATE;

struct FakeLoader {
    tracks: HashMap<PathBuf, AudioPcm>,
}

impl FakeLoader {
    fn new(tracks: &[(&str, AudioPcm)]) -> Self {
        Self {
            tracks: tracks
                .iter()
                .map(|(p, pcm)| (PathBuf::from(p), pcm.clone()))
                .collect(),
        }
    }
}

impl AudioLoader for FakeLoader {
    fn load(&self, path: &Path) -> WrappedResult<AudioPcm> {
        self.tracks
            .get(path)
            .cloned()
            .ok_or_else(|| WrappedError::audio(format!("no such track {}", path.display())))
    }
}

fn constant(secs: f64, v: f32) -> AudioPcm {
    let frames = (secs * f64::from(RATE)).round() as usize;
    AudioPcm {
        sample_rate: RATE,
        channels: 2,
        interleaved_f32: vec![v; frames * 2],
    }
}

fn timeline(durations: &[f64]) -> Timeline {
    let fps = Fps { num: 30, den: 1 };
    let clips = durations
        .iter()
        .map(|&duration| ClipDef {
            id: "lines_of_code",
            kind: ClipKind::LinesOfCode(LinesClip {
                added: 1,
                deleted: 1,
            }),
            duration,
            fps,
            fade_in: 0.3,
            fade_out: 0.5,
            gradient: Gradient {
                top: Rgb8::BLACK,
                bottom: Rgb8::WHITE,
            },
        })
        .collect();
    Timeline::new(clips, fps).unwrap()
}

fn flat_cfg() -> AudioMixConfig {
    AudioMixConfig {
        music_fade_in_secs: 0.0,
        music_fade_out_secs: 0.0,
        ..AudioMixConfig::default()
    }
}

fn left_at(mix: &AudioMix, secs: f64) -> f32 {
    mix.interleaved_f32[secs_to_sample(secs, RATE) as usize * 2]
}

#[test]
fn no_inputs_yields_no_mix() {
    let out = compose_audio(
        &timeline(&[1.0, 1.0]),
        &AudioInputs::default(),
        &flat_cfg(),
        &FakeLoader::new(&[]),
    );
    assert!(out.mix.is_none());
    assert!(out.warnings.is_empty());
}

#[test]
fn music_alone_is_looped_to_exact_video_length() {
    let loader = FakeLoader::new(&[("music.mp3", constant(0.7, 0.5))]);
    let inputs = AudioInputs {
        narration: vec![None, None, None],
        music: Some(PathBuf::from("music.mp3")),
    };
    let out = compose_audio(&timeline(&[1.0, 1.0, 1.0]), &inputs, &flat_cfg(), &loader);
    let mix = out.mix.unwrap();

    assert_eq!(mix.frames(), 3 * RATE as usize);
    assert!(mix.has_music);
    assert!((mix.music_gain - 0.3).abs() < 1e-6);
    // Past the first loop seam.
    assert!((left_at(&mix, 2.9) - 0.15).abs() < 1e-4);
}

#[test]
fn narration_ducks_music_and_starts_after_lead_in() {
    let loader = FakeLoader::new(&[
        ("music.mp3", constant(3.0, 0.5)),
        ("n1.mp3", constant(0.25, 0.2)),
    ]);
    let inputs = AudioInputs {
        narration: vec![None, Some(PathBuf::from("n1.mp3")), None],
        music: Some(PathBuf::from("music.mp3")),
    };
    let out = compose_audio(&timeline(&[1.0, 1.0, 1.0]), &inputs, &flat_cfg(), &loader);
    let mix = out.mix.unwrap();

    assert_eq!(mix.narrated_clips, vec![1]);
    assert!((mix.music_gain - 0.15).abs() < 1e-6);
    let ducked = 0.5 * 0.15;
    assert!((left_at(&mix, 1.25) - ducked).abs() < 1e-4);
    assert!((left_at(&mix, 1.6) - (ducked + 0.2)).abs() < 1e-4);
    assert!((left_at(&mix, 1.9) - ducked).abs() < 1e-4);
}

#[test]
fn long_narration_is_cut_at_its_clip_end() {
    let loader = FakeLoader::new(&[("n0.mp3", constant(5.0, 0.4))]);
    let inputs = AudioInputs {
        narration: vec![Some(PathBuf::from("n0.mp3")), None],
        music: None,
    };
    let out = compose_audio(&timeline(&[1.0, 2.0]), &inputs, &flat_cfg(), &loader);
    let mix = out.mix.unwrap();

    assert_eq!(mix.frames(), 3 * RATE as usize);
    assert!(!mix.has_music);
    assert_eq!(left_at(&mix, 0.25), 0.0);
    assert!((left_at(&mix, 0.75) - 0.4).abs() < 1e-6);
    assert_eq!(left_at(&mix, 1.5), 0.0);
}

#[test]
fn failed_loads_are_dropped_with_warnings() {
    let loader = FakeLoader::new(&[("music.mp3", constant(1.0, 0.5))]);
    let inputs = AudioInputs {
        narration: vec![Some(PathBuf::from("missing.mp3")), None],
        music: Some(PathBuf::from("music.mp3")),
    };
    let out = compose_audio(&timeline(&[1.0, 1.0]), &inputs, &flat_cfg(), &loader);

    assert_eq!(out.warnings.len(), 1);
    assert!(out.warnings[0].contains("missing.mp3"));
    let mix = out.mix.unwrap();
    assert!(mix.narrated_clips.is_empty());
    // Nothing narrated, so no ducking.
    assert!((mix.music_gain - 0.3).abs() < 1e-6);
}

#[test]
fn only_failures_yield_no_mix() {
    let inputs = AudioInputs {
        narration: vec![Some(PathBuf::from("a.mp3"))],
        music: Some(PathBuf::from("b.mp3")),
    };
    let out = compose_audio(&timeline(&[1.0]), &inputs, &flat_cfg(), &FakeLoader::new(&[]));
    assert!(out.mix.is_none());
    assert_eq!(out.warnings.len(), 2);
}

#[test]
fn lead_in_longer_than_clip_drops_narration() {
    let loader = FakeLoader::new(&[("n0.mp3", constant(1.0, 0.4))]);
    let inputs = AudioInputs {
        narration: vec![Some(PathBuf::from("n0.mp3"))],
        music: None,
    };
    let cfg = AudioMixConfig {
        narration_lead_in_secs: 1.0,
        ..flat_cfg()
    };
    let out = compose_audio(&timeline(&[1.0]), &inputs, &cfg, &loader);
    assert!(out.mix.is_none());
    assert_eq!(out.warnings.len(), 1);
}

#[test]
fn surplus_narration_slots_are_reported() {
    let inputs = AudioInputs {
        narration: vec![None, None, None],
        music: None,
    };
    assert!(inputs.is_empty());
    let out = compose_audio(&timeline(&[1.0]), &inputs, &flat_cfg(), &FakeLoader::new(&[]));
    assert!(out.mix.is_none());
    assert_eq!(out.warnings.len(), 1);
}

#[test]
fn music_fades_in_from_silence() {
    let loader = FakeLoader::new(&[("music.mp3", constant(4.0, 0.5))]);
    let inputs = AudioInputs {
        narration: Vec::new(),
        music: Some(PathBuf::from("music.mp3")),
    };
    let out = compose_audio(
        &timeline(&[2.0, 2.0]),
        &inputs,
        &AudioMixConfig::default(),
        &loader,
    );
    let mix = out.mix.unwrap();
    assert_eq!(left_at(&mix, 0.0), 0.0);
    assert!(left_at(&mix, 0.5) < left_at(&mix, 1.5));
    assert!(left_at(&mix, 3.9) < left_at(&mix, 2.0));
}
