use super::*;

fn key(text: &str) -> SuggestionKey {
    SuggestionKey {
        background_ref: "bg.png".to_string(),
        text: text.to_string(),
        position: WirePoint { x: 10, y: 20 },
        font_name: FontName::Anton,
    }
}

fn result(sizes: &[u32]) -> SuggestionResult {
    SuggestionResult {
        sizes: sizes.to_vec(),
        previews: sizes.iter().map(|s| (*s, format!("p{s}.png"))).collect(),
    }
}

#[test]
fn identical_key_is_not_reissued() {
    let mut s = SuggestionSession::new();
    let r0 = s.issue(LayerId(0), key("A")).unwrap();
    assert_eq!(r0.seq, 0);
    assert!(s.issue(LayerId(0), key("A")).is_none());
    let r1 = s.issue(LayerId(0), key("AB")).unwrap();
    assert_eq!(r1.seq, 1);
    assert_eq!(s.latest(), Some(&r1));
}

#[test]
fn newer_response_first_then_stale_older_is_discarded() {
    let mut s = SuggestionSession::new();
    let t1 = s.issue(LayerId(0), key("T1")).unwrap();
    let t2 = s.issue(LayerId(0), key("T2")).unwrap();

    assert_eq!(s.apply(&t2, Ok(result(&[80, 100, 120]))).unwrap(), Some(100));
    assert_eq!(s.apply(&t1, Ok(result(&[10, 20, 30]))).unwrap(), None);

    let cur = s.current().unwrap();
    assert_eq!(cur.key, key("T2"));
    assert_eq!(cur.sizes, vec![80, 100, 120]);
}

#[test]
fn older_response_arriving_first_is_discarded_too() {
    let mut s = SuggestionSession::new();
    let t1 = s.issue(LayerId(0), key("T1")).unwrap();
    let t2 = s.issue(LayerId(0), key("T2")).unwrap();

    assert_eq!(s.apply(&t1, Ok(result(&[10]))).unwrap(), None);
    assert!(s.current().is_none());
    assert_eq!(s.apply(&t2, Ok(result(&[50]))).unwrap(), Some(50));
}

#[test]
fn returning_to_an_old_key_accepts_its_late_answer() {
    let mut s = SuggestionSession::new();
    let a = s.issue(LayerId(0), key("A")).unwrap();
    s.issue(LayerId(0), key("AB")).unwrap();
    s.issue(LayerId(0), key("A")).unwrap();
    assert_eq!(s.apply(&a, Ok(result(&[70]))).unwrap(), Some(70));
}

#[test]
fn sizes_are_sorted_deduplicated_and_middle_selected() {
    let mut s = SuggestionSession::new();
    let r = s.issue(LayerId(4), key("A")).unwrap();
    assert_eq!(
        s.apply(&r, Ok(result(&[150, 90, 120, 90, 60]))).unwrap(),
        Some(120)
    );
    let cur = s.current().unwrap();
    assert_eq!(cur.sizes, vec![60, 90, 120, 150]);
    assert_eq!(cur.selected, 2);
    assert_eq!(cur.layer, LayerId(4));
    assert_eq!(cur.selected_preview(), Some("p120.png"));

    assert_eq!(s.select_index(0), Some(60));
    assert_eq!(s.select_index(9), None);
    assert_eq!(s.current().unwrap().selected_size(), 60);
}

#[test]
fn failure_keeps_previous_state_and_surfaces() {
    let mut s = SuggestionSession::new();
    let r = s.issue(LayerId(0), key("A")).unwrap();
    s.apply(&r, Ok(result(&[100]))).unwrap();

    let r2 = s.issue(LayerId(0), key("B")).unwrap();
    let err = s
        .apply(&r2, Err(EngineError::collaborator("timeout")))
        .unwrap_err();
    assert!(matches!(err, EngineError::SuggestionFetch(_)));
    assert!(err.to_string().contains("timeout"));
    assert_eq!(s.current().unwrap().key, key("A"));

    let err = s.apply(&r2, Ok(result(&[]))).unwrap_err();
    assert!(matches!(err, EngineError::SuggestionFetch(_)));
    assert_eq!(s.current().unwrap().key, key("A"));
}

#[test]
fn stale_failure_is_not_surfaced() {
    let mut s = SuggestionSession::new();
    let r1 = s.issue(LayerId(0), key("A")).unwrap();
    s.issue(LayerId(0), key("B")).unwrap();
    assert_eq!(
        s.apply(&r1, Err(EngineError::suggestion_fetch("502"))).unwrap(),
        None
    );
}

#[test]
fn retry_reissues_latest_key() {
    let mut s = SuggestionSession::new();
    assert!(s.retry().is_none());
    s.issue(LayerId(2), key("A")).unwrap();
    let again = s.retry().unwrap();
    assert_eq!(again.seq, 1);
    assert_eq!(again.key, key("A"));
    assert_eq!(again.layer, LayerId(2));
}
