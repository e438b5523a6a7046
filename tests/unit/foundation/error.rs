use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        EngineError::suggestion_fetch("x")
            .to_string()
            .contains("suggestion fetch failed:")
    );
    assert!(
        EngineError::collaborator("x")
            .to_string()
            .contains("collaborator error:")
    );
    assert!(
        EngineError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        EngineError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = EngineError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn serde_json_errors_convert() {
    let bad = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err = EngineError::from(bad);
    assert!(matches!(err, EngineError::Serde(_)));
}

#[test]
fn fallback_messages_name_the_offender() {
    let f = Fallback::InvalidLayerIndex { index: 7, len: 2 };
    assert_eq!(f.to_string(), "layer index 7 out of range (len 2)");

    let f = Fallback::ConcurrentDragConflict {
        previous: 0,
        next: 3,
    };
    assert!(f.to_string().contains("layer 0"));
    assert!(f.to_string().contains("layer 3"));
}
