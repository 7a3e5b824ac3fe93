use super::*;

fn stereo(frames: usize, rate: u32) -> AudioPcm {
    AudioPcm {
        sample_rate: rate,
        channels: 2,
        interleaved_f32: vec![0.1; frames * 2],
    }
}

#[test]
fn frames_and_duration_follow_channel_count() {
    let pcm = stereo(24_000, 48_000);
    assert_eq!(pcm.frames(), 24_000);
    assert!((pcm.duration_secs() - 0.5).abs() < 1e-12);

    let mono = AudioPcm {
        sample_rate: 8,
        channels: 1,
        interleaved_f32: vec![0.0; 4],
    };
    assert_eq!(mono.frames(), 4);
    assert!((mono.duration_secs() - 0.5).abs() < 1e-12);
}

#[test]
fn validate_rejects_malformed_tracks() {
    assert!(stereo(10, 48_000).validate().is_ok());
    assert!(stereo(10, 0).validate().is_err());
    assert!(stereo(0, 48_000).validate().is_err());

    let surround = AudioPcm {
        sample_rate: 48_000,
        channels: 6,
        interleaved_f32: vec![0.0; 12],
    };
    assert!(surround.validate().is_err());

    let ragged = AudioPcm {
        sample_rate: 48_000,
        channels: 2,
        interleaved_f32: vec![0.0; 3],
    };
    assert!(matches!(ragged.validate(), Err(WrappedError::Audio(_))));
}

#[test]
fn f32le_bytes_decode_little_endian() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&0.5f32.to_le_bytes());
    bytes.extend_from_slice(&(-1.0f32).to_le_bytes());
    assert_eq!(f32le_bytes_to_samples(&bytes).unwrap(), vec![0.5, -1.0]);
    assert!(f32le_bytes_to_samples(&bytes[..5]).is_err());
    assert!(f32le_bytes_to_samples(&[]).unwrap().is_empty());
}

#[test]
fn loader_reports_missing_file_without_spawning_ffmpeg() {
    let dir = tempfile::tempdir().unwrap();
    let loader = FfmpegAudioLoader::new("definitely-not-an-ffmpeg-binary");
    let err = loader.load(&dir.path().join("missing.mp3")).unwrap_err();
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn loader_surfaces_spawn_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("voice.mp3");
    std::fs::write(&path, b"not audio").unwrap();
    let loader = FfmpegAudioLoader::new("definitely-not-an-ffmpeg-binary");
    assert!(matches!(loader.load(&path), Err(WrappedError::Audio(_))));
}
