use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        WrappedError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(WrappedError::render("x").to_string().contains("render error:"));
    assert!(WrappedError::audio("x").to_string().contains("audio error:"));
    assert!(WrappedError::encode("x").to_string().contains("encode error:"));
    assert!(
        WrappedError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = WrappedError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
