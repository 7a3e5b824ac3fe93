use super::*;

#[test]
fn layout_space_keeps_reference_units() {
    let l = LayoutSpace::for_canvas(Canvas::REFERENCE);
    assert_eq!((l.width, l.height, l.scale), (1080.0, 1920.0, 1.0));
    assert_eq!(l.center_y(), 960.0);

    let wide = LayoutSpace::for_canvas(Canvas {
        width: 1920,
        height: 1920,
    });
    assert_eq!(wide.scale, 1.0);
    assert_eq!(wide.width, 1920.0);
}

#[test]
fn alignment_resolves_against_measured_width() {
    assert_eq!(HAlign::Center.resolve_x(1080.0, 201.0), 439.0);
    assert_eq!(HAlign::Left(120.0).resolve_x(1080.0, 50.0), 120.0);
    assert_eq!(HAlign::Right(960.0).resolve_x(1080.0, 60.0), 900.0);
    assert_eq!(
        HAlign::CenterIn {
            left: 90.0,
            width: 65.0
        }
        .resolve_x(1080.0, 25.0),
        110.0
    );
}

#[test]
fn lookup_by_key() {
    let mut scene = FrameScene::new(
        LayoutSpace::for_canvas(Canvas::REFERENCE),
        Gradient {
            top: Rgb8::BLACK,
            bottom: Rgb8::WHITE,
        },
        1.0,
    );
    scene.push(TextItem::new(
        ElementKey::Title,
        "hi",
        10.0,
        Rgb8::WHITE,
        HAlign::Center,
        0.0,
    ).with_opacity(3.0));
    scene.rect(ElementKey::Bar(0), Rect::new(0.0, 0.0, 1.0, 1.0), Rgb8::BLACK);

    assert_eq!(scene.find_text(ElementKey::Title).unwrap().opacity, 1.0);
    assert!(scene.find_rect(ElementKey::Title).is_none());
    assert!(scene.find_rect(ElementKey::Bar(0)).is_some());
    assert!(scene.find(ElementKey::Footer).is_none());
}
