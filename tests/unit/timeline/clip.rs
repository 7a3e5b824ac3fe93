use super::*;

fn clip(id: &'static str, duration: f64) -> ClipDef {
    ClipDef {
        id,
        kind: ClipKind::LinesOfCode(LinesClip {
            added: 10,
            deleted: 3,
        }),
        duration,
        fps: Fps { num: 30, den: 1 },
        fade_in: 0.3,
        fade_out: 0.5,
        gradient: Gradient {
            top: Rgb8::BLACK,
            bottom: Rgb8::WHITE,
        },
    }
}

#[test]
fn fade_is_black_at_start_and_full_mid_clip() {
    let c = clip("a", 5.0);
    assert_eq!(c.fade_factor(0.0), 0.0);
    assert!((c.fade_factor(0.15) - 0.5).abs() < 1e-9);
    assert_eq!(c.fade_factor(2.5), 1.0);
    assert!((c.fade_factor(4.75) - 0.5).abs() < 1e-9);
    assert_eq!(c.fade_factor(5.0), 0.0);
    assert_eq!(c.settled_time(), 4.5);
}

#[test]
fn locate_maps_boundary_frames_to_next_clip() {
    let tl = Timeline::new(vec![clip("a", 1.0), clip("b", 2.0)], Fps { num: 30, den: 1 }).unwrap();
    assert_eq!(tl.total_frames(), 90);
    assert_eq!(tl.locate(FrameIndex(0)), Some((0, 0.0)));
    let (idx, t) = tl.locate(FrameIndex(29)).unwrap();
    assert_eq!(idx, 0);
    assert!((t - 29.0 / 30.0).abs() < 1e-9);
    assert_eq!(tl.locate(FrameIndex(30)), Some((1, 0.0)));
    assert_eq!(tl.locate(FrameIndex(90)), None);
    assert_eq!(tl.clip_frames(1), Some(30..90));
    assert_eq!(tl.clip_start_secs(1), 1.0);
}

#[test]
fn invalid_clips_are_rejected() {
    let fps = Fps { num: 30, den: 1 };
    assert!(Timeline::new(vec![], fps).is_err());
    assert!(Timeline::new(vec![clip("zero", 0.0)], fps).is_err());

    let mut long_fade = clip("fade", 1.0);
    long_fade.fade_out = 2.0;
    assert!(Timeline::new(vec![long_fade], fps).is_err());

    let mut other_fps = clip("fps", 1.0);
    other_fps.fps = Fps { num: 24, den: 1 };
    assert!(Timeline::new(vec![other_fps], fps).is_err());
}

#[test]
fn net_lines_is_signed() {
    let lines = LinesClip {
        added: 5,
        deleted: 12,
    };
    assert_eq!(lines.net(), -7);
}
