//! Selection reconciliation and color-target resolution.
//!
//! The store keeps the selection as a plain ordered id list; everything here
//! is a pure function over that list and the live box collection, invoked
//! fresh at each read site. There is no cached index to go stale when a box
//! is removed out from under the selection.
//!
//! The same resolution algorithm serves two policies — which boxes are
//! selected for interaction, and which boxes receive a bulk color change.
//! They are separate call sites in the store so the color policy can
//! diverge later (e.g. locked boxes) without touching selection reads.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use std::collections::HashMap;

use crate::doc::CanvasBox;

/// Id → box index. The first occurrence of a duplicated id wins.
fn build_index(boxes: &[CanvasBox]) -> HashMap<&str, &CanvasBox> {
    let mut index: HashMap<&str, &CanvasBox> = HashMap::new();
    for obj in boxes {
        index.entry(obj.id.as_str()).or_insert(obj);
    }
    index
}

/// Reconcile a selection id list against the live collection: keep ids that
/// resolve to a box, preserve input order, drop duplicates (first kept).
#[must_use]
pub fn reconcile(boxes: &[CanvasBox], selected_ids: &[String]) -> Vec<String> {
    let index = build_index(boxes);
    let mut seen: Vec<&str> = Vec::new();
    let mut next = Vec::new();
    for id in selected_ids {
        if seen.contains(&id.as_str()) || !index.contains_key(id.as_str()) {
            continue;
        }
        seen.push(id.as_str());
        next.push(id.clone());
    }
    next
}

/// Reconcile, then append `id` if it names a live box and is not already
/// selected. An unknown id leaves the (reconciled) selection unchanged.
#[must_use]
pub fn select(boxes: &[CanvasBox], selected_ids: &[String], id: &str) -> Vec<String> {
    let mut next = reconcile(boxes, selected_ids);
    if boxes.iter().any(|obj| obj.id == id) && !next.iter().any(|selected| selected == id) {
        next.push(id.to_owned());
    }
    next
}

/// Whether `id` is selected: present in the id list and resolving to a
/// live box.
#[must_use]
pub fn is_selected(boxes: &[CanvasBox], selected_ids: &[String], id: &str) -> bool {
    selected_ids.iter().any(|selected| selected == id) && boxes.iter().any(|obj| obj.id == id)
}

/// Resolve each reconciled id to its box, in input order.
#[must_use]
pub fn resolve_targets<'a>(boxes: &'a [CanvasBox], selected_ids: &[String]) -> Vec<&'a CanvasBox> {
    let index = build_index(boxes);
    let mut seen: Vec<&str> = Vec::new();
    let mut targets = Vec::new();
    for id in selected_ids {
        if seen.contains(&id.as_str()) {
            continue;
        }
        if let Some(obj) = index.get(id.as_str()) {
            seen.push(id.as_str());
            targets.push(*obj);
        }
    }
    targets
}

/// The most recently appended selected box, or `None` when the selection is
/// empty (or nothing resolves).
#[must_use]
pub fn last_selected<'a>(boxes: &'a [CanvasBox], selected_ids: &[String]) -> Option<&'a CanvasBox> {
    resolve_targets(boxes, selected_ids).last().copied()
}
