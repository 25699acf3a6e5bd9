//! Checks over the MiniWoB registry shipped in `data/miniwobs.json`.

use wob_catalog::{check_ordering, check_records, check_tags, Catalog, TaskRecord};

fn builtin() -> Catalog {
    Catalog::builtin().expect("builtin catalog parses")
}

#[test]
fn builtin_catalog_shape() {
    let c = builtin();
    assert_eq!(c.version(), "0.1");
    assert_eq!(c.tag_set().iter().collect::<Vec<_>>(), vec!["click", "drag", "mouse"]);
    assert_eq!(c.len(), 83);
}

#[test]
fn builtin_records_are_complete_and_tagged_correctly() {
    let c = builtin();
    assert!(check_tags(&c).is_empty());
    assert!(check_records(&c).is_empty());
}

#[test]
fn builtin_ordering_break_is_reported_at_first_record() {
    let c = builtin();
    let found = check_ordering(&c);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].index, 0);
    assert_eq!(found[0].record.sort_key(), "wob.mini.AnExperiment-v0");
}

#[test]
fn builtin_modality_filters() {
    let c = builtin();
    assert_eq!(c.with_tag("click").count(), 45);
    assert_eq!(c.with_tag("drag").count(), 20);
    assert_eq!(c.with_tag("mouse").count(), 7);

    let keyboard: Vec<_> = c.keyboard_required().map(TaskRecord::sort_key).collect();
    assert_eq!(keyboard.len(), 11);
    assert!(keyboard.contains(&"wob.mini.Terminal-v0"));
}

#[test]
fn builtin_lookup_by_id() {
    let c = builtin();
    let r = c.get("wob.mini.VisualAddition-v0").expect("record present");
    assert_eq!(r.filename.as_deref(), Some("visual-addition"));
    assert!(r.requires_keyboard());
}
