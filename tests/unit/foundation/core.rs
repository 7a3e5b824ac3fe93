use super::*;

#[test]
fn fps_frames_secs_roundtrip_floor() {
    let fps = Fps::new(30000, 1001).unwrap();
    let secs = fps.frames_to_secs(123);
    assert_eq!(fps.secs_to_frames_floor(secs), 123);
}

#[test]
fn fps_rejects_zero() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    assert_eq!(Fps::whole(30).unwrap().secs_to_frames_round(5.0), 150);
}

#[test]
fn reference_canvas_has_unit_scale() {
    assert_eq!(Canvas::REFERENCE.layout_scale(), 1.0);
    let half = Canvas {
        width: 540,
        height: 960,
    };
    assert_eq!(half.layout_scale(), 0.5);
    assert_eq!(Canvas::REFERENCE.center_y(), 960.0);
}

#[test]
fn hex_colours_parse_and_print() {
    let c = Rgb8::from_hex("#1DB954").unwrap();
    assert_eq!(c, Rgb8::new(0x1d, 0xb9, 0x54));
    assert_eq!(c.to_hex(), "#1DB954");
    assert_eq!(Rgb8::from_hex("b3b3b3").unwrap(), Rgb8::new(179, 179, 179));
    assert!(Rgb8::from_hex("#12345").is_err());
    assert!(Rgb8::from_hex("#zzzzzz").is_err());
}

#[test]
fn colour_serde_uses_hex_strings() {
    let c: Rgb8 = serde_json::from_str("\"#FFFFFF\"").unwrap();
    assert_eq!(c, Rgb8::WHITE);
    assert_eq!(serde_json::to_string(&Rgb8::BLACK).unwrap(), "\"#000000\"");
    assert!(serde_json::from_str::<Rgb8>("\"white\"").is_err());
}

#[test]
fn lerp_truncates_toward_start() {
    let a = Rgb8::new(0, 10, 200);
    let b = Rgb8::new(255, 11, 100);
    assert_eq!(a.lerp_trunc(b, 0.0), a);
    assert_eq!(a.lerp_trunc(b, 0.5), Rgb8::new(127, 10, 150));
    assert_eq!(a.lerp_trunc(b, 1.0), b);
}
