//! Shared constants for the box editor.

/// Width of a newly created box, in CSS pixels.
pub const DEFAULT_BOX_WIDTH: f64 = 200.0;

/// Height of a newly created box, in CSS pixels.
pub const DEFAULT_BOX_HEIGHT: f64 = 100.0;

/// localStorage key the canvas snapshot is persisted under.
pub const STORAGE_KEY: &str = "canvas-state";

/// Color reported to the toolbar picker when nothing is selected.
pub const FALLBACK_PICKER_COLOR: &str = "#000000";
