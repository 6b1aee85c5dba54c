//! Dispatcher applying [`Action`] to the navigator and the document buffer.
//!
//! * `motion` - caret movement, selection, pointer placement, scrolling
//! * `edit`   - digit/character entry, delete, backspace
//! * `mode`   - edit mode transitions (overwrite <-> insert)

use crate::{Action, EditError, EditMode};
use core_layout::MovementDirection;
use core_model::{EditableByteBuffer, Navigator};
use core_state::ScrollingDirection;

mod edit;
mod mode;
mod motion;

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchResult {
    /// View state (caret, selection or scroll) changed; repaint needed.
    pub dirty: bool,
    /// Buffer content or size changed.
    pub data_changed: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            data_changed: false,
        }
    }
    pub fn clean() -> Self {
        Self::default()
    }
    pub fn data_changed() -> Self {
        Self {
            dirty: true,
            data_changed: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CommandHandler {
    edit_mode: EditMode,
}

impl CommandHandler {
    pub fn new(edit_mode: EditMode) -> Self {
        Self { edit_mode }
    }

    pub fn edit_mode(&self) -> EditMode {
        self.edit_mode
    }

    pub fn dispatch(
        &mut self,
        action: Action,
        navigator: &mut Navigator,
        buffer: &mut impl EditableByteBuffer,
    ) -> Result<DispatchResult, EditError> {
        tracing::trace!(target: "actions.command", ?action, "dispatch");
        Ok(match action {
            Action::Move {
                direction,
                selecting,
            } => self.move_caret(navigator, direction, selecting),
            Action::Scroll(direction) => self.scroll(navigator, direction),
            Action::CenterOnCaret => self.center_on_caret(navigator),
            Action::SelectAll => self.select_all(navigator),
            Action::ClearSelection => self.clear_selection(navigator),
            Action::MousePressed { x, y, selecting } => {
                self.mouse_pressed(navigator, x, y, selecting)
            }
            Action::MouseDragged { x, y } => self.mouse_dragged(navigator, x, y),
            Action::Type(ch) => self.key_typed(navigator, buffer, ch)?,
            Action::Delete => self.delete(navigator, buffer)?,
            Action::Backspace => self.backspace(navigator, buffer)?,
            Action::ToggleInsertMode => self.toggle_insert_mode(),
        })
    }

    pub fn move_caret(
        &mut self,
        navigator: &mut Navigator,
        direction: MovementDirection,
        selecting: bool,
    ) -> DispatchResult {
        motion::handle_move(navigator, direction, selecting)
    }

    pub fn scroll(
        &mut self,
        navigator: &mut Navigator,
        direction: ScrollingDirection,
    ) -> DispatchResult {
        motion::handle_scroll(navigator, direction)
    }

    pub fn center_on_caret(&mut self, navigator: &mut Navigator) -> DispatchResult {
        if navigator.center_on_caret() {
            DispatchResult::dirty()
        } else {
            DispatchResult::clean()
        }
    }

    pub fn select_all(&mut self, navigator: &mut Navigator) -> DispatchResult {
        motion::handle_select_all(navigator)
    }

    pub fn clear_selection(&mut self, navigator: &mut Navigator) -> DispatchResult {
        let had_selection = !navigator.selection().is_empty();
        navigator.clear_selection();
        if had_selection {
            DispatchResult::dirty()
        } else {
            DispatchResult::clean()
        }
    }

    pub fn mouse_pressed(
        &mut self,
        navigator: &mut Navigator,
        x: i32,
        y: i32,
        selecting: bool,
    ) -> DispatchResult {
        motion::handle_mouse_pressed(navigator, x, y, selecting)
    }

    pub fn mouse_dragged(&mut self, navigator: &mut Navigator, x: i32, y: i32) -> DispatchResult {
        motion::handle_mouse_dragged(navigator, x, y)
    }

    pub fn key_typed(
        &mut self,
        navigator: &mut Navigator,
        buffer: &mut impl EditableByteBuffer,
        ch: char,
    ) -> Result<DispatchResult, EditError> {
        edit::handle_key_typed(self.edit_mode, navigator, buffer, ch)
    }

    pub fn delete(
        &mut self,
        navigator: &mut Navigator,
        buffer: &mut impl EditableByteBuffer,
    ) -> Result<DispatchResult, EditError> {
        edit::handle_delete(self.edit_mode, navigator, buffer)
    }

    pub fn backspace(
        &mut self,
        navigator: &mut Navigator,
        buffer: &mut impl EditableByteBuffer,
    ) -> Result<DispatchResult, EditError> {
        edit::handle_backspace(self.edit_mode, navigator, buffer)
    }

    pub fn set_edit_mode(&mut self, edit_mode: EditMode) {
        mode::set_edit_mode(&mut self.edit_mode, edit_mode);
    }

    pub fn toggle_insert_mode(&mut self) -> DispatchResult {
        mode::toggle_insert_mode(&mut self.edit_mode)
    }
}
