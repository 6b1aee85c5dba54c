//! Edit mode transitions.

use super::DispatchResult;
use crate::EditMode;
use tracing::debug;

pub(crate) fn set_edit_mode(current: &mut EditMode, next: EditMode) {
    if *current != next {
        debug!(target: "actions.command", from = ?*current, to = ?next, "edit_mode_changed");
        *current = next;
    }
}

/// Overwrite <-> insert; a read-only document stays read-only.
pub(crate) fn toggle_insert_mode(current: &mut EditMode) -> DispatchResult {
    let next = match *current {
        EditMode::ReadOnly => return DispatchResult::clean(),
        EditMode::Overwrite => EditMode::Insert,
        EditMode::Insert => EditMode::Overwrite,
    };
    set_edit_mode(current, next);
    DispatchResult::dirty()
}
