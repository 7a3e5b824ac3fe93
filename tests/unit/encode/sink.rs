use super::*;

fn frame(v: u8) -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 2,
        data: vec![v; 16],
        premultiplied: false,
    }
}

#[test]
fn in_memory_sink_records_frames_in_order() {
    let mut sink = InMemorySink::new();
    sink.begin(SinkConfig {
        width: 2,
        height: 2,
        fps: Fps { num: 30, den: 1 },
        audio: None,
    })
    .unwrap();
    sink.push_frame(FrameIndex(0), &frame(1)).unwrap();
    sink.push_frame(FrameIndex(1), &frame(2)).unwrap();
    assert!(!sink.is_finished());
    sink.end().unwrap();

    assert!(sink.is_finished());
    assert_eq!(sink.config().unwrap().width, 2);
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 1]);
    assert_eq!(sink.frames()[1].1.data[0], 2);
}

#[test]
fn begin_resets_previous_run() {
    let mut sink = InMemorySink::new();
    let cfg = SinkConfig {
        width: 2,
        height: 2,
        fps: Fps { num: 1, den: 2 },
        audio: Some(AudioInputConfig {
            path: PathBuf::from("mix.f32le"),
            sample_rate: 48_000,
            channels: 2,
        }),
    };
    sink.begin(cfg.clone()).unwrap();
    sink.push_frame(FrameIndex(0), &frame(1)).unwrap();
    sink.end().unwrap();
    sink.begin(cfg).unwrap();
    assert!(sink.frames().is_empty());
    assert!(!sink.is_finished());
    assert!(sink.config().unwrap().audio.is_some());
}
