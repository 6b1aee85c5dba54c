//! Host commands for the hex grid: caret movement with selection, scrolling,
//! pointer placement and byte editing.
//!
//! A host translates its own input events into [`Action`] values and hands
//! them to [`CommandHandler::dispatch`] together with the `Navigator` and the
//! document buffer. Each named handler is also callable directly.
//!
//! Editing rules:
//! * Code section: the typed character must be a digit of the active code
//!   type. It replaces the digit under the caret; the caret then moves RIGHT.
//!   In insert mode a zero byte is inserted first when the caret sits on the
//!   first digit of a byte. Typing at the end of the document always appends.
//! * Preview section: the character must fit one byte (Latin-1); it replaces
//!   (or in insert mode, inserts) the byte under the caret.
//! * A non-empty selection is removed before typing, delete and backspace.
//! * Invalid input never mutates the buffer.

pub mod dispatcher;

use core_layout::{CodeType, MovementDirection};
use core_model::DataError;
use core_state::ScrollingDirection;
use thiserror::Error;

pub use dispatcher::{CommandHandler, DispatchResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    ReadOnly,
    #[default]
    Overwrite,
    Insert,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("document is read-only")]
    ReadOnly,
    #[error("'{ch}' is not a digit of the {code_type:?} code type")]
    InvalidDigit { ch: char, code_type: CodeType },
    #[error("digit '{ch}' would push the byte value above 255")]
    ValueOverflow { ch: char },
    #[error("'{ch}' cannot be stored in a single byte")]
    UnrepresentableChar { ch: char },
    #[error(transparent)]
    Data(#[from] DataError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move {
        direction: MovementDirection,
        selecting: bool,
    },
    Scroll(ScrollingDirection),
    CenterOnCaret,
    SelectAll,
    ClearSelection,
    MousePressed {
        x: i32,
        y: i32,
        selecting: bool,
    },
    MouseDragged {
        x: i32,
        y: i32,
    },
    Type(char),
    Delete,
    Backspace,
    ToggleInsertMode,
}
