//! Snapshot persistence: the repository seam and snapshot sanitizing.
//!
//! Persistence is best-effort and never a correctness dependency: load
//! failures degrade to "no snapshot found" (treated as first run) and save
//! failures are swallowed by implementations. Malformed persisted data is
//! recovered partially — entries that deserialize as a complete box are
//! kept, the rest are dropped.

#[cfg(test)]
#[path = "persistence_test.rs"]
mod persistence_test;

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::doc::CanvasBox;

/// Serializable, selection-free projection of the box collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasSnapshot {
    pub boxes: Vec<CanvasBox>,
}

/// Storage failures surfaced by repository internals. Every one of them
/// degrades to "no snapshot" on load or a skipped write on save.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("storage is not available")]
    Unavailable,
    #[error("storage access rejected")]
    AccessRejected,
    #[error("persisted snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("persisted snapshot has an unexpected shape")]
    MalformedSnapshot,
}

/// Loads and saves canvas snapshots.
///
/// `load` returns `None` for missing or malformed data; sanitizing is the
/// repository's responsibility, never the store's.
pub trait CanvasStateRepository {
    fn load(&self) -> Option<CanvasSnapshot>;
    fn save(&self, snapshot: &CanvasSnapshot);
}

/// Sanitize a parsed snapshot value.
///
/// The value must be an object with a `boxes` array; each entry missing a
/// required field or carrying a wrong-typed field is discarded, valid
/// entries are kept.
#[must_use]
pub fn sanitize_snapshot(value: &Value) -> Option<CanvasSnapshot> {
    let entries = value.get("boxes")?.as_array()?;

    let boxes = entries
        .iter()
        .filter_map(|entry| match serde_json::from_value::<CanvasBox>(entry.clone()) {
            Ok(obj) => Some(obj),
            Err(err) => {
                log::warn!("discarding malformed box entry: {err}");
                None
            }
        })
        .collect();

    Some(CanvasSnapshot { boxes })
}

/// In-memory repository for tests and native hosts.
///
/// Clones share the same underlying slot, so a caller can keep a handle on
/// the stored snapshot after moving the repository into the store.
#[derive(Clone, Default)]
pub struct InMemoryStateRepository {
    slot: Rc<RefCell<Option<CanvasSnapshot>>>,
}

impl InMemoryStateRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The last saved snapshot, if any.
    #[must_use]
    pub fn stored(&self) -> Option<CanvasSnapshot> {
        self.slot.borrow().clone()
    }
}

impl CanvasStateRepository for InMemoryStateRepository {
    fn load(&self) -> Option<CanvasSnapshot> {
        self.stored()
    }

    fn save(&self, snapshot: &CanvasSnapshot) {
        *self.slot.borrow_mut() = Some(snapshot.clone());
    }
}
