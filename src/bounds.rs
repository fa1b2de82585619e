//! Canvas geometry: positions, box sizes, and the drop-area clamp.
//!
//! Bounds are measured by the host from the canvas element just before a
//! drag commits, and are optional: an unmeasured canvas (zero-sized or not
//! yet laid out) leaves positions unclamped.

#[cfg(test)]
#[path = "bounds_test.rs"]
mod bounds_test;

/// A box's top-left corner relative to the canvas origin, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub left: f64,
    pub top: f64,
}

impl Position {
    #[must_use]
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }
}

/// Width and height of a box, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSize {
    pub width: f64,
    pub height: f64,
}

/// The visible drop area of the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasBounds {
    pub width: f64,
    pub height: f64,
}

/// Clamp `position` so a box of `size` stays inside `bounds` by its top-left
/// corner. A box larger than the canvas pins to the origin instead of
/// producing an inverted range.
#[must_use]
pub fn clamp_position_within_bounds(
    position: Position,
    size: BoxSize,
    bounds: CanvasBounds,
) -> Position {
    let max_left = (bounds.width - size.width).max(0.0);
    let max_top = (bounds.height - size.height).max(0.0);

    Position {
        left: position.left.clamp(0.0, max_left),
        top: position.top.clamp(0.0, max_top),
    }
}

/// Clamp against optional bounds. `None` means the canvas has not been
/// measured yet and the position passes through unchanged.
#[must_use]
pub fn limit_position_within_canvas(
    position: Position,
    size: BoxSize,
    bounds: Option<CanvasBounds>,
) -> Position {
    match bounds {
        Some(bounds) => clamp_position_within_bounds(position, size, bounds),
        None => position,
    }
}
