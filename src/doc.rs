//! Document model: the box record and the ordered in-memory collection.
//!
//! `CanvasBox` is both the live record and the wire shape — snapshots
//! serialize boxes field-for-field, and sanitizing on load relies on
//! deserialization rejecting entries with missing or wrong-typed fields, so
//! none of the fields carry serde defaults.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};

use crate::bounds::{BoxSize, Position};
use crate::consts::{DEFAULT_BOX_HEIGHT, DEFAULT_BOX_WIDTH};

/// A rectangular, colored, positioned box — the unit of selection and
/// manipulation on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasBox {
    /// Unique identifier, stable for the box's lifetime.
    pub id: String,
    /// Width in CSS pixels.
    pub width: f64,
    /// Height in CSS pixels.
    pub height: f64,
    /// Fill color as a CSS color string.
    pub color: String,
    /// Left edge relative to the canvas origin.
    pub left: f64,
    /// Top edge relative to the canvas origin.
    pub top: f64,
}

impl CanvasBox {
    /// A box at `position` with the default 200×100 size.
    #[must_use]
    pub fn new(id: String, color: String, position: Position) -> Self {
        Self {
            id,
            width: DEFAULT_BOX_WIDTH,
            height: DEFAULT_BOX_HEIGHT,
            color,
            left: position.left,
            top: position.top,
        }
    }

    #[must_use]
    pub fn size(&self) -> BoxSize {
        BoxSize { width: self.width, height: self.height }
    }

    #[must_use]
    pub fn position(&self) -> Position {
        Position { left: self.left, top: self.top }
    }

    pub fn set_position(&mut self, position: Position) {
        self.left = position.left;
        self.top = position.top;
    }

    pub fn set_color(&mut self, color: String) {
        self.color = color;
    }
}

/// Ordered collection of boxes, unique by id.
///
/// Insertion order is display order, so storage is a `Vec` rather than a
/// map; collections are small and lookups stay linear.
#[derive(Debug, Clone, Default)]
pub struct BoxCollection {
    boxes: Vec<CanvasBox>,
}

impl BoxCollection {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self { boxes: Vec::new() }
    }

    /// Append a box. If a box with the same `id` already exists it is
    /// replaced in place, keeping its display position.
    pub fn insert(&mut self, obj: CanvasBox) {
        match self.boxes.iter_mut().find(|existing| existing.id == obj.id) {
            Some(existing) => *existing = obj,
            None => self.boxes.push(obj),
        }
    }

    /// Remove a box by id, returning it if it was present.
    pub fn remove(&mut self, id: &str) -> Option<CanvasBox> {
        let index = self.boxes.iter().position(|obj| obj.id == id)?;
        Some(self.boxes.remove(index))
    }

    /// Remove every box whose id is in `ids`.
    pub fn remove_all(&mut self, ids: &[String]) {
        self.boxes.retain(|obj| !ids.iter().any(|id| *id == obj.id));
    }

    /// Remove every box.
    pub fn clear(&mut self) {
        self.boxes.clear();
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CanvasBox> {
        self.boxes.iter().find(|obj| obj.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut CanvasBox> {
        self.boxes.iter_mut().find(|obj| obj.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Replace all boxes with a full snapshot. A duplicated id keeps its
    /// first occurrence.
    pub fn load_snapshot(&mut self, boxes: Vec<CanvasBox>) {
        self.boxes.clear();
        for obj in boxes {
            if !self.contains(&obj.id) {
                self.boxes.push(obj);
            }
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[CanvasBox] {
        &self.boxes
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<CanvasBox> {
        self.boxes.clone()
    }

    /// Number of boxes currently in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Returns `true` if the collection contains no boxes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}
