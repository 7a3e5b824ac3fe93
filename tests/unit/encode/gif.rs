use super::*;
use crate::foundation::core::Fps;

fn solid(width: u32, height: u32, rgb: [u8; 3]) -> FrameRGBA {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for _ in 0..width * height {
        data.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
    }
    FrameRGBA {
        width,
        height,
        data,
        premultiplied: false,
    }
}

fn sink_cfg() -> SinkConfig {
    SinkConfig {
        width: 20,
        height: 40,
        fps: Fps { num: 1, den: 2 },
        audio: None,
    }
}

fn opts(out_path: PathBuf) -> GifSinkOpts {
    GifSinkOpts {
        out_path,
        width: 10,
        height: 20,
        frame_delay: Duration::from_secs(2),
    }
}

#[test]
fn writes_downsampled_looping_gif() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("preview").join("wrapped.gif");
    let mut sink = GifSink::new(opts(out.clone()));
    sink.begin(sink_cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &solid(20, 40, [200, 0, 0]))
        .unwrap();
    sink.push_frame(FrameIndex(1), &solid(20, 40, [0, 0, 200]))
        .unwrap();
    sink.end().unwrap();

    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(&bytes[..6], b"GIF89a");
    assert!(!staging_path_for(&out).exists());

    use image::AnimationDecoder as _;
    let decoder =
        image::codecs::gif::GifDecoder::new(std::io::Cursor::new(bytes)).unwrap();
    let frames = decoder.into_frames().collect_frames().unwrap();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].buffer().dimensions(), (10, 20));
    let (num, den) = frames[1].delay().numer_denom_ms();
    assert_eq!(num / den, 2000);
}

#[test]
fn empty_preview_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = GifSink::new(opts(dir.path().join("x.gif")));
    sink.begin(sink_cfg()).unwrap();
    assert!(matches!(sink.end(), Err(WrappedError::Encode(_))));
    assert!(!dir.path().join("x.gif").exists());
}

#[test]
fn zero_size_or_delay_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut o = opts(dir.path().join("x.gif"));
    o.width = 0;
    assert!(GifSink::new(o).begin(sink_cfg()).is_err());

    let mut o = opts(dir.path().join("x.gif"));
    o.frame_delay = Duration::ZERO;
    assert!(GifSink::new(o).begin(sink_cfg()).is_err());
}

#[test]
fn push_before_begin_fails() {
    let mut sink = GifSink::new(opts(PathBuf::from("unused.gif")));
    assert!(sink.push_frame(FrameIndex(0), &solid(2, 2, [0, 0, 0])).is_err());
}
