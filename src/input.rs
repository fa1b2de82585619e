//! Drag gestures as an explicit state machine.
//!
//! A gesture source reports `start` / `move {dx, dy}` / `end` callbacks per
//! draggable element — relative deltas, not absolute positions. Moves
//! accumulate into an ephemeral preview position owned by the view layer;
//! only `end` yields a position for the store to commit (and clamp). All of
//! it is synchronous callback dispatch: Idle → Dragging → Idle.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::bounds::Position;

/// Relative pointer movement since the previous move event, in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragDelta {
    pub dx: f64,
    pub dy: f64,
}

/// The position a finished drag asks the store to commit.
#[derive(Debug, Clone, PartialEq)]
pub struct DragCommit {
    /// Id of the dragged box.
    pub id: String,
    /// Raw, unclamped end position; the store clamps it against the
    /// measured canvas bounds.
    pub position: Position,
}

/// Gesture state for one draggable element.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    /// No gesture in progress; waiting for the next start.
    #[default]
    Idle,
    /// An active gesture, carrying the context needed to compute the
    /// preview position and the final commit.
    Dragging {
        /// Id of the box being dragged.
        id: String,
        /// Box position when the gesture started.
        origin: Position,
        /// Horizontal delta accumulated across move events.
        dx: f64,
        /// Vertical delta accumulated across move events.
        dy: f64,
    },
}

/// Tracks one element's drag session.
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    state: DragState,
}

impl DragTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a session for the box at `origin`. A start during an active
    /// session replaces it — pointer capture was lost.
    pub fn start(&mut self, id: &str, origin: Position) {
        self.state = DragState::Dragging { id: id.to_owned(), origin, dx: 0.0, dy: 0.0 };
    }

    /// Accumulate a relative delta. No-op when idle.
    pub fn move_by(&mut self, delta: DragDelta) {
        if let DragState::Dragging { dx, dy, .. } = &mut self.state {
            *dx += delta.dx;
            *dy += delta.dy;
        }
    }

    /// Ephemeral position for the renderer while a gesture is active.
    #[must_use]
    pub fn preview(&self) -> Option<Position> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging { origin, dx, dy, .. } => {
                Some(Position::new(origin.left + dx, origin.top + dy))
            }
        }
    }

    /// Finish the gesture, yielding the commit exactly once and returning
    /// to idle. An end without a matching start is a no-op.
    pub fn end(&mut self) -> Option<DragCommit> {
        match std::mem::take(&mut self.state) {
            DragState::Idle => None,
            DragState::Dragging { id, origin, dx, dy } => Some(DragCommit {
                id,
                position: Position::new(origin.left + dx, origin.top + dy),
            }),
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.state != DragState::Idle
    }

    /// The current gesture state, for the renderer.
    #[must_use]
    pub fn state(&self) -> &DragState {
        &self.state
    }
}
