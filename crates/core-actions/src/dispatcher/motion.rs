//! Caret movement, selection and pointer placement.
//!
//! A selecting gesture extends the selection from its anchor: the caret
//! position before the first selecting move (or the pressed position for a
//! drag). A non-selecting move collapses the selection onto the caret. Every
//! caret change is followed by a reveal so the caret stays in view.

use super::DispatchResult;
use core_layout::{CaretPosition, MovementDirection, PositionOverflowMode, Zone};
use core_model::Navigator;
use core_state::{ScrollingDirection, SelectionRange};
use tracing::trace;

fn commit_caret(
    navigator: &mut Navigator,
    target: CaretPosition,
    selecting: bool,
) -> DispatchResult {
    let before = navigator.caret_position();
    let selection_before = navigator.selection();
    navigator.set_caret_position(target);
    let caret = navigator.caret_position();
    if selecting {
        let anchor = navigator.selection_anchor().unwrap_or(before);
        navigator.set_selection_anchor(Some(anchor));
        navigator.set_selection(SelectionRange::new(anchor.data_position, caret.data_position));
    } else {
        navigator.clear_selection();
    }
    let scrolled = navigator.reveal_caret();
    if caret != before || scrolled || navigator.selection() != selection_before {
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}

pub(crate) fn handle_move(
    navigator: &mut Navigator,
    direction: MovementDirection,
    selecting: bool,
) -> DispatchResult {
    let target = navigator.compute_move_position(direction);
    trace!(
        target: "actions.command",
        ?direction,
        selecting,
        from = navigator.caret_position().data_position,
        to = target.data_position,
        "move_caret"
    );
    commit_caret(navigator, target, selecting)
}

pub(crate) fn handle_scroll(
    navigator: &mut Navigator,
    direction: ScrollingDirection,
) -> DispatchResult {
    if navigator.scroll(direction) {
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}

pub(crate) fn handle_select_all(navigator: &mut Navigator) -> DispatchResult {
    let size = navigator.data_size();
    let section = navigator.caret_position().section;
    navigator.set_selection_anchor(Some(CaretPosition::origin(section)));
    navigator.set_selection(SelectionRange::new(0, size));
    DispatchResult::dirty()
}

/// Presses outside the code area (header, gutter, scrollbars) are left to
/// the host.
pub(crate) fn handle_mouse_pressed(
    navigator: &mut Navigator,
    x: i32,
    y: i32,
    selecting: bool,
) -> DispatchResult {
    if navigator.dimensions().get_position_zone(x, y) != Zone::CodeArea {
        return DispatchResult::clean();
    }
    let target =
        navigator.mouse_position_to_closest_caret_position(x, y, PositionOverflowMode::NoOverflow);
    commit_caret(navigator, target, selecting)
}

pub(crate) fn handle_mouse_dragged(navigator: &mut Navigator, x: i32, y: i32) -> DispatchResult {
    let target =
        navigator.mouse_position_to_closest_caret_position(x, y, PositionOverflowMode::Overflow);
    commit_caret(navigator, target, true)
}
