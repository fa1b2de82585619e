//! Toolbar view-model.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use crate::consts::FALLBACK_PICKER_COLOR;
use crate::store::CanvasStore;

/// What the toolbar needs from the store: the add/remove buttons are always
/// live, the color picker follows the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarView {
    /// Selection summary, e.g. `"No boxes selected"` or `"2 boxes selected"`.
    pub selection_label: String,
    /// Picker value: the most recently selected box's color.
    pub color_value: String,
    /// The picker is disabled when nothing is selected.
    pub color_picker_disabled: bool,
}

impl ToolbarView {
    #[must_use]
    pub fn from_store(store: &CanvasStore) -> Self {
        let count = store.selected_boxes().len();
        let selection_label = match count {
            0 => "No boxes selected".to_owned(),
            1 => "1 box selected".to_owned(),
            n => format!("{n} boxes selected"),
        };
        let color_value = store
            .last_selected_box()
            .map_or_else(|| FALLBACK_PICKER_COLOR.to_owned(), |obj| obj.color.clone());

        Self { selection_label, color_value, color_picker_disabled: count == 0 }
    }
}
