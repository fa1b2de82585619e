//! The canvas state store — aggregate root over boxes and selection.
//!
//! DESIGN
//! ======
//! Every UI event lands here as one synchronous operation: the store
//! resolves which boxes the operation affects (selection / color targets),
//! where a moved box may legally land (clamp against the measured bounds),
//! applies the mutation, then publishes: persist a full snapshot through
//! the repository and notify subscribers. Reads resolve the selection fresh
//! against the live collection on every call, so no cached view can go
//! stale between mutations.
//!
//! Construction is explicit (repository and factory are injected at the
//! composition root); there is no process-wide store instance.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use crate::bounds::{CanvasBounds, Position, limit_position_within_canvas};
use crate::doc::{BoxCollection, CanvasBox};
use crate::factory::BoxFactory;
use crate::persistence::{CanvasSnapshot, CanvasStateRepository};
use crate::selection;

/// Post-mutation snapshot observer.
pub type SnapshotSubscriber = Box<dyn Fn(&CanvasSnapshot)>;

/// Owns the box collection and the selection, and composes the factory,
/// clamp, selection resolution, and repository per operation.
pub struct CanvasStore {
    boxes: BoxCollection,
    selected_ids: Vec<String>,
    factory: BoxFactory,
    repository: Box<dyn CanvasStateRepository>,
    subscribers: Vec<SnapshotSubscriber>,
}

impl CanvasStore {
    /// Build the store against a repository: a non-empty restored snapshot
    /// hydrates the collection, otherwise one default box is seeded. Either
    /// way the resulting state is persisted immediately.
    #[must_use]
    pub fn new(repository: Box<dyn CanvasStateRepository>, factory: BoxFactory) -> Self {
        let mut store = Self {
            boxes: BoxCollection::new(),
            selected_ids: Vec::new(),
            factory,
            repository,
            subscribers: Vec::new(),
        };

        match store.repository.load() {
            Some(snapshot) if !snapshot.boxes.is_empty() => {
                store.boxes.load_snapshot(snapshot.boxes);
            }
            _ => {
                let obj = store.factory.create_default();
                store.boxes.insert(obj);
            }
        }

        store.publish();
        store
    }

    /// Observe every post-mutation snapshot. The rendering layer subscribes
    /// here instead of relying on implicit dependency tracking.
    pub fn subscribe(&mut self, subscriber: impl Fn(&CanvasSnapshot) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    // --- Mutations ---

    /// Create a box at `position` and append it. Selection is untouched.
    pub fn add_box_at_position(&mut self, position: Position) {
        let obj = self.factory.create(position);
        self.boxes.insert(obj);
        self.publish();
    }

    /// Create a box at the default origin and append it.
    pub fn add_box_at_default_position(&mut self) {
        let obj = self.factory.create_default();
        self.boxes.insert(obj);
        self.publish();
    }

    /// Append `id` to the selection. Unknown ids are ignored; selecting an
    /// already-selected box is a no-op. Stale selection ids are pruned as a
    /// side effect of reconciling against the live collection.
    pub fn select_box(&mut self, id: &str) {
        self.selected_ids = selection::select(self.boxes.as_slice(), &self.selected_ids, id);
        self.publish();
    }

    /// Empty the selection.
    pub fn clear_selection(&mut self) {
        self.selected_ids.clear();
        self.publish();
    }

    /// Remove every selected box and empty the selection. No-op when the
    /// selection is already empty.
    pub fn remove_selected_boxes(&mut self) {
        if self.selected_ids.is_empty() {
            return;
        }

        self.boxes.remove_all(&self.selected_ids);
        self.selected_ids.clear();
        self.publish();
    }

    /// Move a box to `position`, clamped against `bounds` using the box's
    /// own size. Unknown ids are ignored.
    pub fn update_box_position(
        &mut self,
        id: &str,
        position: Position,
        bounds: Option<CanvasBounds>,
    ) {
        let Some(obj) = self.boxes.get_mut(id) else {
            return;
        };

        let limited = limit_position_within_canvas(position, obj.size(), bounds);
        obj.set_position(limited);
        self.publish();
    }

    /// Recolor the current color targets. Targets are resolved here,
    /// independently of the selection views — same algorithm, separate
    /// policy. No targets, no mutation.
    pub fn update_selected_boxes_color(&mut self, color: &str) {
        let targets: Vec<String> = selection::resolve_targets(self.boxes.as_slice(), &self.selected_ids)
            .into_iter()
            .map(|obj| obj.id.clone())
            .collect();

        if targets.is_empty() {
            return;
        }

        for id in &targets {
            if let Some(obj) = self.boxes.get_mut(id) {
                obj.set_color(color.to_owned());
            }
        }
        self.publish();
    }

    /// Replace the entire collection (initial load path) and clear the
    /// selection.
    pub fn hydrate_boxes(&mut self, boxes: Vec<CanvasBox>) {
        self.boxes.load_snapshot(boxes);
        self.selected_ids.clear();
        self.publish();
    }

    /// Clear the canvas back to a single default box.
    pub fn reset(&mut self) {
        self.boxes.clear();
        self.selected_ids.clear();
        let obj = self.factory.create_default();
        self.boxes.insert(obj);
        self.publish();
    }

    // --- Queries ---

    /// All boxes in display order.
    #[must_use]
    pub fn boxes(&self) -> &[CanvasBox] {
        self.boxes.as_slice()
    }

    /// The raw selection id list, most-recently-selected last.
    #[must_use]
    pub fn selected_ids(&self) -> &[String] {
        &self.selected_ids
    }

    #[must_use]
    pub fn is_box_selected(&self, id: &str) -> bool {
        selection::is_selected(self.boxes.as_slice(), &self.selected_ids, id)
    }

    /// Selected boxes in selection order.
    #[must_use]
    pub fn selected_boxes(&self) -> Vec<&CanvasBox> {
        selection::resolve_targets(self.boxes.as_slice(), &self.selected_ids)
    }

    /// The most recently selected box, if any.
    #[must_use]
    pub fn last_selected_box(&self) -> Option<&CanvasBox> {
        selection::last_selected(self.boxes.as_slice(), &self.selected_ids)
    }

    /// Serializable projection of the collection. Selection is never part
    /// of it.
    #[must_use]
    pub fn snapshot(&self) -> CanvasSnapshot {
        CanvasSnapshot { boxes: self.boxes.to_vec() }
    }

    // --- Publication ---

    /// Persist the current snapshot (full overwrite) and notify
    /// subscribers. Runs after every mutation; a failing save is the
    /// repository's to swallow.
    fn publish(&self) {
        let snapshot = self.snapshot();
        self.repository.save(&snapshot);
        for subscriber in &self.subscribers {
            subscriber(&snapshot);
        }
    }
}
