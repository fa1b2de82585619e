#![allow(clippy::float_cmp)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::*;
use crate::factory::{ColorProvider, IdProvider};
use crate::input::{DragDelta, DragTracker};
use crate::persistence::InMemoryStateRepository;

fn sequential_ids() -> IdProvider {
    let counter = Cell::new(0_u32);
    Box::new(move || {
        counter.set(counter.get() + 1);
        format!("box-{}", counter.get())
    })
}

fn fixed_color() -> ColorProvider {
    Box::new(|| "#FACADE".to_owned())
}

fn test_factory() -> BoxFactory {
    BoxFactory::new(sequential_ids(), fixed_color())
}

fn make_box(id: &str, color: &str, left: f64, top: f64) -> CanvasBox {
    CanvasBox::new(id.to_owned(), color.to_owned(), Position::new(left, top))
}

/// Store over an in-memory repository pre-seeded with `boxes`; the returned
/// handle observes everything the store persists.
fn seeded_store(boxes: Vec<CanvasBox>) -> (CanvasStore, InMemoryStateRepository) {
    let repository = InMemoryStateRepository::new();
    repository.save(&CanvasSnapshot { boxes });
    let store = CanvasStore::new(Box::new(repository.clone()), test_factory());
    (store, repository)
}

fn empty_store() -> (CanvasStore, InMemoryStateRepository) {
    let repository = InMemoryStateRepository::new();
    let store = CanvasStore::new(Box::new(repository.clone()), test_factory());
    (store, repository)
}

fn box_ids(store: &CanvasStore) -> Vec<&str> {
    store.boxes().iter().map(|obj| obj.id.as_str()).collect()
}

// =============================================================
// Construction
// =============================================================

#[test]
fn empty_load_seeds_one_default_box() {
    let (store, _) = empty_store();
    assert_eq!(store.boxes().len(), 1);
    assert_eq!(store.boxes()[0].position(), Position::new(0.0, 0.0));
}

#[test]
fn empty_persisted_snapshot_also_seeds_the_default_box() {
    let (store, _) = seeded_store(Vec::new());
    assert_eq!(store.boxes().len(), 1);
    assert_eq!(store.boxes()[0].position(), Position::new(0.0, 0.0));
}

#[test]
fn restored_snapshot_hydrates_the_collection() {
    let (store, _) = seeded_store(vec![
        make_box("a", "#111111", 0.0, 0.0),
        make_box("b", "#222222", 10.0, 10.0),
    ]);
    assert_eq!(box_ids(&store), ["a", "b"]);
    assert!(store.selected_ids().is_empty());
}

#[test]
fn initial_state_is_persisted_immediately() {
    let (store, repository) = empty_store();
    let stored = repository.stored().unwrap();
    assert_eq!(stored, store.snapshot());
    assert_eq!(stored.boxes.len(), 1);
}

// =============================================================
// Adding boxes
// =============================================================

#[test]
fn add_box_at_position_appends_with_given_coordinates() {
    let (mut store, _) = empty_store();
    store.add_box_at_position(Position::new(42.0, 24.0));

    let latest = store.boxes().last().unwrap();
    assert_eq!(latest.left, 42.0);
    assert_eq!(latest.top, 24.0);
    assert_eq!(store.boxes().len(), 2);
}

#[test]
fn add_box_at_default_position_lands_at_origin() {
    let (mut store, _) = empty_store();
    store.add_box_at_default_position();
    assert_eq!(store.boxes().last().unwrap().position(), Position::new(0.0, 0.0));
}

#[test]
fn adding_does_not_touch_the_selection() {
    let (mut store, _) = seeded_store(vec![make_box("a", "#111111", 0.0, 0.0)]);
    store.select_box("a");
    store.add_box_at_default_position();
    assert_eq!(store.selected_ids(), ["a".to_owned()]);
}

// =============================================================
// Selection
// =============================================================

#[test]
fn select_box_twice_equals_select_box_once() {
    let (mut store, _) = seeded_store(vec![make_box("a", "#111111", 0.0, 0.0)]);
    store.select_box("a");
    let once = store.selected_ids().to_vec();
    store.select_box("a");
    assert_eq!(store.selected_ids(), once);
}

#[test]
fn select_unknown_id_is_a_no_op() {
    let (mut store, _) = seeded_store(vec![make_box("a", "#111111", 0.0, 0.0)]);
    store.select_box("ghost");
    assert!(store.selected_ids().is_empty());
}

#[test]
fn selection_keeps_insertion_order() {
    let (mut store, _) = seeded_store(vec![
        make_box("a", "#111111", 0.0, 0.0),
        make_box("b", "#222222", 0.0, 0.0),
    ]);
    store.select_box("b");
    store.select_box("a");

    let selected: Vec<&str> = store.selected_boxes().iter().map(|obj| obj.id.as_str()).collect();
    assert_eq!(selected, ["b", "a"]);
    assert_eq!(store.last_selected_box().map(|obj| obj.id.as_str()), Some("a"));
}

#[test]
fn is_box_selected_follows_the_selection() {
    let (mut store, _) = seeded_store(vec![
        make_box("a", "#111111", 0.0, 0.0),
        make_box("b", "#222222", 0.0, 0.0),
    ]);
    store.select_box("a");
    assert!(store.is_box_selected("a"));
    assert!(!store.is_box_selected("b"));
}

#[test]
fn clear_selection_empties_it() {
    let (mut store, _) = seeded_store(vec![make_box("a", "#111111", 0.0, 0.0)]);
    store.select_box("a");
    store.clear_selection();
    assert!(store.selected_ids().is_empty());
    assert!(!store.is_box_selected("a"));
}

// =============================================================
// Removal
// =============================================================

#[test]
fn removing_all_selected_boxes_empties_collection_and_selection() {
    let (mut store, _) = seeded_store(vec![
        make_box("a", "#111111", 0.0, 0.0),
        make_box("b", "#222222", 0.0, 0.0),
    ]);
    store.select_box("a");
    store.select_box("b");

    store.remove_selected_boxes();

    assert!(store.boxes().is_empty());
    assert!(store.selected_ids().is_empty());
}

#[test]
fn removal_spares_unselected_boxes() {
    let (mut store, _) = seeded_store(vec![
        make_box("a", "#111111", 0.0, 0.0),
        make_box("b", "#222222", 0.0, 0.0),
        make_box("c", "#333333", 0.0, 0.0),
    ]);
    store.select_box("b");
    store.remove_selected_boxes();
    assert_eq!(box_ids(&store), ["a", "c"]);
}

#[test]
fn removal_with_empty_selection_is_a_no_op() {
    let (mut store, repository) = seeded_store(vec![make_box("a", "#111111", 0.0, 0.0)]);
    let before = repository.stored();
    store.remove_selected_boxes();
    assert_eq!(box_ids(&store), ["a"]);
    assert_eq!(repository.stored(), before);
}

// =============================================================
// Moving boxes
// =============================================================

#[test]
fn update_position_for_unknown_id_is_a_no_op() {
    let (mut store, _) = seeded_store(vec![make_box("a", "#111111", 5.0, 5.0)]);
    store.update_box_position("ghost", Position::new(50.0, 50.0), None);
    assert_eq!(store.boxes()[0].position(), Position::new(5.0, 5.0));
}

#[test]
fn update_position_without_bounds_is_unclamped() {
    let (mut store, _) = seeded_store(vec![make_box("a", "#111111", 0.0, 0.0)]);
    store.update_box_position("a", Position::new(-400.0, 9000.0), None);
    assert_eq!(store.boxes()[0].position(), Position::new(-400.0, 9000.0));
}

#[test]
fn update_position_clamps_against_bounds() {
    // 200×100 box dragged to (400, 300) inside 250×220 commits at (50, 120).
    let (mut store, _) = seeded_store(vec![make_box("a", "#111111", 0.0, 0.0)]);
    store.update_box_position(
        "a",
        Position::new(400.0, 300.0),
        Some(CanvasBounds { width: 250.0, height: 220.0 }),
    );
    assert_eq!(store.boxes()[0].position(), Position::new(50.0, 120.0));
}

#[test]
fn update_position_leaves_selection_alone() {
    let (mut store, _) = seeded_store(vec![make_box("a", "#111111", 0.0, 0.0)]);
    store.select_box("a");
    store.update_box_position("a", Position::new(30.0, 40.0), None);
    assert!(store.is_box_selected("a"));
}

// =============================================================
// Recoloring
// =============================================================

#[test]
fn recolor_applies_to_every_selected_box_and_nothing_else() {
    let (mut store, _) = seeded_store(vec![
        make_box("a", "#111111", 0.0, 0.0),
        make_box("b", "#222222", 10.0, 10.0),
        make_box("c", "#333333", 20.0, 20.0),
    ]);
    store.select_box("a");
    store.select_box("c");

    store.update_selected_boxes_color("#ABCDEF");

    assert_eq!(store.boxes()[0].color, "#ABCDEF");
    assert_eq!(store.boxes()[1].color, "#222222");
    assert_eq!(store.boxes()[2].color, "#ABCDEF");
}

#[test]
fn recolor_with_empty_selection_changes_nothing() {
    let (mut store, repository) = seeded_store(vec![make_box("a", "#111111", 0.0, 0.0)]);
    let before = repository.stored();
    store.update_selected_boxes_color("#ABCDEF");
    assert_eq!(store.boxes()[0].color, "#111111");
    assert_eq!(repository.stored(), before);
}

// =============================================================
// Hydration and reset
// =============================================================

#[test]
fn hydrate_boxes_replaces_collection_and_clears_selection() {
    let (mut store, _) = seeded_store(vec![make_box("a", "#111111", 0.0, 0.0)]);
    store.select_box("a");

    store.hydrate_boxes(vec![make_box("x", "#444444", 1.0, 1.0), make_box("y", "#555555", 2.0, 2.0)]);

    assert_eq!(box_ids(&store), ["x", "y"]);
    assert!(store.selected_ids().is_empty());
    assert!(!store.is_box_selected("a"));
}

#[test]
fn reset_returns_to_a_single_default_box() {
    let (mut store, repository) = seeded_store(vec![
        make_box("a", "#111111", 0.0, 0.0),
        make_box("b", "#222222", 10.0, 10.0),
    ]);
    store.select_box("a");

    store.reset();

    assert_eq!(store.boxes().len(), 1);
    assert_eq!(store.boxes()[0].position(), Position::new(0.0, 0.0));
    assert!(store.selected_ids().is_empty());
    assert_eq!(repository.stored().map(|snapshot| snapshot.boxes.len()), Some(1));
}

// =============================================================
// Persistence and subscription
// =============================================================

#[test]
fn every_mutation_persists_a_fresh_snapshot() {
    let (mut store, repository) = empty_store();

    store.add_box_at_default_position();
    assert_eq!(repository.stored().map(|snapshot| snapshot.boxes.len()), Some(2));

    let first_id = store.boxes()[0].id.clone();
    store.select_box(&first_id);
    store.remove_selected_boxes();
    assert_eq!(repository.stored().map(|snapshot| snapshot.boxes.len()), Some(1));
}

#[test]
fn persisted_snapshot_carries_no_selection() {
    let (mut store, repository) = seeded_store(vec![make_box("a", "#111111", 0.0, 0.0)]);
    store.select_box("a");

    let value = serde_json::to_value(repository.stored().unwrap()).unwrap();
    let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(keys, [&"boxes".to_owned()]);
}

#[test]
fn subscribers_observe_post_mutation_snapshots() {
    let (mut store, _) = empty_store();
    let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    store.subscribe(move |snapshot| sink.borrow_mut().push(snapshot.boxes.len()));

    store.add_box_at_default_position();
    store.add_box_at_default_position();
    store.clear_selection();

    assert_eq!(*seen.borrow(), [2, 3, 3]);
}

// =============================================================
// Drag flow
// =============================================================

#[test]
fn drag_end_commits_a_clamped_position_into_the_store() {
    let (mut store, _) = seeded_store(vec![make_box("a", "#111111", 0.0, 0.0)]);
    let mut tracker = DragTracker::new();

    tracker.start("a", store.boxes()[0].position());
    tracker.move_by(DragDelta { dx: 250.0, dy: 180.0 });
    tracker.move_by(DragDelta { dx: 150.0, dy: 120.0 });

    let commit = tracker.end().unwrap();
    store.update_box_position(
        &commit.id,
        commit.position,
        Some(CanvasBounds { width: 250.0, height: 220.0 }),
    );

    assert_eq!(store.boxes()[0].position(), Position::new(50.0, 120.0));
}
