use super::*;

fn engine() -> TextLayoutEngine {
    TextLayoutEngine::new(resolve_font(None)).unwrap()
}

#[test]
fn brush_is_opaque() {
    let b = TextBrushRgba8::from(Rgb8::new(1, 2, 3));
    assert_eq!((b.r, b.g, b.b, b.a), (1, 2, 3, 255));
}

#[test]
fn unreadable_configured_font_falls_back_without_error() {
    let font = resolve_font(Some(Path::new("/no/such/font.ttf")));
    assert!(!matches!(font.origin, FontOrigin::Configured(_)));
    assert!(!font.bytes.is_empty());
}

#[test]
fn bundled_face_registers() {
    let engine = TextLayoutEngine::new(ResolvedFont::bundled()).unwrap();
    assert_eq!(engine.origin(), &FontOrigin::Bundled);
    assert!(engine.family_name().starts_with("DejaVu Sans"));
}

#[test]
fn garbage_font_bytes_are_rejected() {
    let res = TextLayoutEngine::new(ResolvedFont {
        bytes: vec![0u8; 16],
        index: 0,
        origin: FontOrigin::Configured(PathBuf::from("junk.ttf")),
    });
    assert!(res.is_err());
}

#[test]
fn measured_width_grows_with_text_and_size() {
    let mut engine = engine();
    assert!(!engine.family_name().is_empty());
    let brush = TextBrushRgba8::from(Rgb8::WHITE);
    let short = measure_width(&engine.layout_line("1,2", 40.0, brush).unwrap());
    let long = measure_width(&engine.layout_line("1,234,567", 40.0, brush).unwrap());
    let big = measure_width(&engine.layout_line("1,2", 80.0, brush).unwrap());
    assert!(short > 0.0);
    assert!(long > short);
    assert!(big > short * 1.5);
    assert_eq!(measure_width(&engine.layout_line("", 40.0, brush).unwrap()), 0.0);
}

#[test]
fn non_positive_sizes_are_rejected() {
    let mut engine = engine();
    let brush = TextBrushRgba8::default();
    assert!(engine.layout_line("x", 0.0, brush).is_err());
    assert!(engine.layout_line("x", f32::NAN, brush).is_err());
}
