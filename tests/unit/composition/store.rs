use super::*;

fn abc() -> LayerStore {
    let mut s = LayerStore::new();
    for t in ["A", "B", "C"] {
        s.add(t, Point::new(10.0, 10.0), TextStyle::default());
    }
    s
}

fn texts(s: &LayerStore) -> Vec<&str> {
    s.layers().iter().map(|l| l.text.as_str()).collect()
}

#[test]
fn add_appends_and_allocates_fresh_ids() {
    let mut s = abc();
    assert_eq!(texts(&s), ["A", "B", "C"]);
    s.remove(2);
    let idx = s.add("D", Point::ZERO, TextStyle::default());
    assert_eq!(idx, 2);
    assert_eq!(s.get(2).unwrap().id, LayerId(3));
    assert_eq!(s.index_of(LayerId(1)), Some(1));
    assert_eq!(s.index_of(LayerId(2)), None);
}

#[test]
fn move_up_swaps_with_previous_and_stops_at_zero() {
    let mut s = abc();
    assert_eq!(s.move_up(2), Some(Reindex::Swapped(1, 2)));
    assert_eq!(texts(&s), ["A", "C", "B"]);

    let before = s.snapshot();
    assert_eq!(s.move_up(0), None);
    assert!(Arc::ptr_eq(&before, &s.snapshot()));
}

#[test]
fn move_down_stops_at_last() {
    let mut s = abc();
    assert_eq!(s.move_down(2), None);
    assert_eq!(s.move_down(0), Some(Reindex::Swapped(0, 1)));
    assert_eq!(texts(&s), ["B", "A", "C"]);
}

#[test]
fn move_up_then_down_restores_order() {
    let mut s = abc();
    let original: Vec<LayerId> = s.layers().iter().map(|l| l.id).collect();
    s.move_up(1);
    s.move_down(0);
    let after: Vec<LayerId> = s.layers().iter().map(|l| l.id).collect();
    assert_eq!(original, after);
}

#[test]
fn updates_replace_only_the_target_layer() {
    let mut s = abc();
    let before = s.snapshot();

    assert!(s.update_text(1, "b2"));
    let after = s.snapshot();
    assert!(Arc::ptr_eq(&before[0], &after[0]));
    assert!(!Arc::ptr_eq(&before[1], &after[1]));
    assert!(Arc::ptr_eq(&before[2], &after[2]));

    // Old snapshot is untouched.
    assert_eq!(before[1].text, "B");
    assert_eq!(after[1].text, "b2");
    assert_eq!(after[1].id, before[1].id);
}

#[test]
fn every_update_operation_lands() {
    let mut s = abc();
    assert!(s.update_position(0, Point::new(1.0, 2.0)));
    assert!(s.update_font_size(0, 64.0));
    assert!(s.update_font_name(0, FontName::Boldonse));
    assert!(s.update_color(0, HexColor::BLACK));
    assert!(s.update_effect(0, EffectDescriptor::glow(HexColor::WHITE, 4.0, 0.5)));

    let l = s.get(0).unwrap();
    assert_eq!(l.position, Point::new(1.0, 2.0));
    assert_eq!(l.style.font_size, 64.0);
    assert_eq!(l.style.font_name, FontName::Boldonse);
    assert_eq!(l.style.color, HexColor::BLACK);
    assert_eq!(l.style.effect.kind, "glow");
}

#[test]
fn out_of_range_mutations_are_noops() {
    let mut s = abc();
    let before = s.snapshot();
    assert_eq!(s.remove(3), None);
    assert_eq!(s.move_up(9), None);
    assert_eq!(s.move_down(9), None);
    assert!(!s.update_text(3, "x"));
    assert!(!s.update_position(usize::MAX, Point::ZERO));
    assert!(Arc::ptr_eq(&before, &s.snapshot()));
}

#[test]
fn reindex_remap_rules() {
    let removed = Reindex::Removed(1);
    assert_eq!(removed.remap(0), Some(0));
    assert_eq!(removed.remap(1), None);
    assert_eq!(removed.remap(2), Some(1));

    let swapped = Reindex::Swapped(1, 2);
    assert_eq!(swapped.remap(1), Some(2));
    assert_eq!(swapped.remap(2), Some(1));
    assert_eq!(swapped.remap(0), Some(0));
}
