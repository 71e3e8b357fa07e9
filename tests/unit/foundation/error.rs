use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ShortsError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ShortsError::empty_input("x")
            .to_string()
            .contains("empty input:")
    );
    assert!(
        ShortsError::external_tool("x")
            .to_string()
            .contains("external tool error:")
    );
    assert!(
        ShortsError::extraction("x")
            .to_string()
            .contains("extraction error:")
    );
    assert!(
        ShortsError::synthesis("x")
            .to_string()
            .contains("synthesis error:")
    );
    assert!(
        ShortsError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ShortsError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn pipeline_wraps_stage_and_keeps_empty_input_kind() {
    let err = ShortsError::pipeline("video", ShortsError::empty_input("no frames"));
    let msg = err.to_string();
    assert!(msg.contains("'video'"));
    assert!(msg.contains("no frames"));
    assert!(err.is_empty_input());
    assert!(!ShortsError::validation("x").is_empty_input());
}
