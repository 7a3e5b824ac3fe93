use super::*;

fn constant(rate: u32, channels: u16, frames: usize, v: f32) -> Arc<AudioPcm> {
    Arc::new(AudioPcm {
        sample_rate: rate,
        channels,
        interleaved_f32: vec![v; frames * usize::from(channels)],
    })
}

fn segment(start: u64, end: u64, source: Arc<AudioPcm>) -> AudioSegment {
    AudioSegment {
        timeline_start_sample: start,
        timeline_end_sample: end,
        volume: 1.0,
        fade_in_sec: 0.0,
        fade_out_sec: 0.0,
        source,
    }
}

#[test]
fn secs_to_sample_rounds_and_clamps() {
    assert_eq!(secs_to_sample(0.5, 48_000), 24_000);
    assert_eq!(secs_to_sample(1.0 / 3.0, 3), 1);
    assert_eq!(secs_to_sample(-2.0, 48_000), 0);
}

#[test]
fn loop_to_length_repeats_whole_track_then_truncates() {
    let pcm = AudioPcm {
        sample_rate: 4,
        channels: 1,
        interleaved_f32: vec![1.0, 2.0, 3.0],
    };
    let looped = loop_to_length(&pcm, 7);
    assert_eq!(looped.interleaved_f32, vec![1.0, 2.0, 3.0, 1.0, 2.0, 3.0, 1.0]);
    assert_eq!(looped.sample_rate, 4);

    let cut = loop_to_length(&pcm, 2);
    assert_eq!(cut.interleaved_f32, vec![1.0, 2.0]);
}

#[test]
fn loop_to_length_keeps_stereo_frames_intact() {
    let pcm = AudioPcm {
        sample_rate: 4,
        channels: 2,
        interleaved_f32: vec![0.1, 0.2, 0.3, 0.4],
    };
    let looped = loop_to_length(&pcm, 3);
    assert_eq!(looped.frames(), 3);
    assert_eq!(looped.interleaved_f32, vec![0.1, 0.2, 0.3, 0.4, 0.1, 0.2]);
}

#[test]
fn mix_applies_overlap_and_fades() {
    let seg_a = segment(0, 4, constant(4, 2, 4, 0.25));
    let mut seg_b = segment(2, 4, constant(4, 2, 2, 1.0));
    seg_b.fade_in_sec = 0.5;

    let manifest = AudioManifest {
        sample_rate: 4,
        channels: 2,
        total_samples: 4,
        segments: vec![seg_a, seg_b],
    };
    let out = mix_manifest(&manifest);
    assert_eq!(out.len(), 8);
    assert!((out[0] - 0.25).abs() < 1e-6);
    assert!((out[4] - 0.25).abs() < 1e-6);
    assert!(out[6] > out[4]);
}

#[test]
fn mono_sources_are_upmixed_and_volume_scaled() {
    let mut seg = segment(0, 2, constant(4, 1, 2, 0.5));
    seg.volume = 0.5;
    let manifest = AudioManifest {
        sample_rate: 4,
        channels: 2,
        total_samples: 2,
        segments: vec![seg],
    };
    let out = mix_manifest(&manifest);
    assert!(out.iter().all(|s| (s - 0.25).abs() < 1e-6));
}

#[test]
fn mix_clamps_sums_and_stops_at_source_end() {
    let loud = segment(0, 4, constant(4, 2, 4, 0.8));
    let short = segment(0, 4, constant(4, 2, 1, 0.8));
    let manifest = AudioManifest {
        sample_rate: 4,
        channels: 2,
        total_samples: 4,
        segments: vec![loud, short],
    };
    let out = mix_manifest(&manifest);
    assert_eq!(out[0], 1.0);
    assert!((out[2] - 0.8).abs() < 1e-6);
}

#[test]
fn segments_past_the_output_end_are_cut() {
    let manifest = AudioManifest {
        sample_rate: 4,
        channels: 2,
        total_samples: 2,
        segments: vec![segment(1, 10, constant(4, 2, 10, 0.5))],
    };
    let out = mix_manifest(&manifest);
    assert_eq!(out, vec![0.0, 0.0, 0.5, 0.5]);
}

#[test]
fn fade_out_reaches_silence_at_segment_end() {
    let mut seg = segment(0, 4, constant(4, 2, 4, 1.0));
    seg.fade_out_sec = 1.0;
    let manifest = AudioManifest {
        sample_rate: 4,
        channels: 2,
        total_samples: 4,
        segments: vec![seg],
    };
    let out = mix_manifest(&manifest);
    assert!((out[0] - 1.0).abs() < 1e-6);
    assert!((out[6] - 0.25).abs() < 1e-6);
}

#[test]
fn f32le_file_round_trips_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("mix.f32le");
    write_mix_to_f32le_file(&[0.5, -0.25], &path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len(), 8);
    assert_eq!(&bytes[..4], &0.5f32.to_le_bytes());
    assert_eq!(&bytes[4..], &(-0.25f32).to_le_bytes());
}
