//! Byte mutation: digit/character entry, delete and backspace.
//!
//! Every input is validated before the buffer is touched, so a rejected
//! keystroke leaves buffer, caret and selection unchanged.

use super::DispatchResult;
use crate::{EditError, EditMode};
use core_layout::{CaretPosition, MovementDirection, Section};
use core_model::{EditableByteBuffer, Navigator};
use tracing::trace;

fn ensure_writable(mode: EditMode) -> Result<(), EditError> {
    if mode == EditMode::ReadOnly {
        Err(EditError::ReadOnly)
    } else {
        Ok(())
    }
}

/// Remove the selected bytes and park the caret at their start. Returns
/// false when nothing was selected.
fn remove_selection(
    navigator: &mut Navigator,
    buffer: &mut impl EditableByteBuffer,
) -> Result<bool, EditError> {
    let selection = navigator.selection();
    if selection.is_empty() {
        return Ok(false);
    }
    buffer.remove(selection.first(), selection.length())?;
    let section = navigator.caret_position().section;
    navigator.notify_data_size_changed(buffer.data_size());
    navigator.set_caret_position(CaretPosition::new(selection.first(), 0, section));
    navigator.clear_selection();
    Ok(true)
}

/// Where a typed value lands: position, code offset and whether a fresh
/// byte has to be inserted. Accounts for a selection that is removed first.
struct EntryPoint {
    position: u64,
    code_offset: usize,
    inserts: bool,
    current: u8,
}

fn entry_point(
    mode: EditMode,
    navigator: &Navigator,
    buffer: &impl EditableByteBuffer,
    whole_byte: bool,
) -> EntryPoint {
    let caret = navigator.caret_position();
    let selection = navigator.selection();
    let (position, source, code_offset, size_after) = if selection.is_empty() {
        (
            caret.data_position,
            caret.data_position,
            caret.code_offset,
            buffer.data_size(),
        )
    } else {
        (
            selection.first(),
            selection.range().end,
            0,
            buffer.data_size().saturating_sub(selection.length()),
        )
    };
    let appends = position >= size_after;
    let inserts = appends || (mode == EditMode::Insert && (whole_byte || code_offset == 0));
    let current = if inserts {
        0
    } else {
        buffer.byte_at(source).unwrap_or(0)
    };
    EntryPoint {
        position,
        code_offset,
        inserts,
        current,
    }
}

fn write_value(
    navigator: &mut Navigator,
    buffer: &mut impl EditableByteBuffer,
    entry: &EntryPoint,
    value: u8,
    section: Section,
) -> Result<(), EditError> {
    remove_selection(navigator, buffer)?;
    if entry.inserts {
        buffer.insert(entry.position, &[value])?;
    } else {
        buffer.set_byte(entry.position, value)?;
    }
    navigator.notify_data_size_changed(buffer.data_size());
    navigator.set_caret_position(CaretPosition::new(entry.position, entry.code_offset, section));
    let next = navigator.compute_move_position(MovementDirection::Right);
    navigator.set_caret_position(next);
    navigator.clear_selection();
    navigator.reveal_caret();
    Ok(())
}

pub(crate) fn handle_key_typed(
    mode: EditMode,
    navigator: &mut Navigator,
    buffer: &mut impl EditableByteBuffer,
    ch: char,
) -> Result<DispatchResult, EditError> {
    ensure_writable(mode)?;
    let section = navigator.caret_position().section;
    let (entry, value) = match section {
        Section::CodeMatrix => {
            let code_type = navigator.code_type();
            let digit = code_type
                .digit_value(ch)
                .ok_or(EditError::InvalidDigit { ch, code_type })?;
            let entry = entry_point(mode, navigator, buffer, false);
            let value = code_type
                .set_digit(entry.current, entry.code_offset, digit)
                .ok_or(EditError::ValueOverflow { ch })?;
            (entry, value)
        }
        Section::TextPreview => {
            let value =
                u8::try_from(u32::from(ch)).map_err(|_| EditError::UnrepresentableChar { ch })?;
            (entry_point(mode, navigator, buffer, true), value)
        }
    };
    trace!(
        target: "actions.command",
        op = "key_typed",
        position = entry.position,
        code_offset = entry.code_offset,
        inserts = entry.inserts,
        value,
        "edit"
    );
    write_value(navigator, buffer, &entry, value, section)?;
    Ok(DispatchResult::data_changed())
}

pub(crate) fn handle_delete(
    mode: EditMode,
    navigator: &mut Navigator,
    buffer: &mut impl EditableByteBuffer,
) -> Result<DispatchResult, EditError> {
    ensure_writable(mode)?;
    if remove_selection(navigator, buffer)? {
        navigator.reveal_caret();
        return Ok(DispatchResult::data_changed());
    }
    let caret = navigator.caret_position();
    if caret.data_position >= buffer.data_size() {
        return Ok(DispatchResult::clean());
    }
    buffer.remove(caret.data_position, 1)?;
    trace!(target: "actions.command", op = "delete", position = caret.data_position, "edit");
    navigator.notify_data_size_changed(buffer.data_size());
    navigator.set_caret_position(caret.in_section(caret.section));
    navigator.clear_selection();
    navigator.reveal_caret();
    Ok(DispatchResult::data_changed())
}

pub(crate) fn handle_backspace(
    mode: EditMode,
    navigator: &mut Navigator,
    buffer: &mut impl EditableByteBuffer,
) -> Result<DispatchResult, EditError> {
    ensure_writable(mode)?;
    if remove_selection(navigator, buffer)? {
        navigator.reveal_caret();
        return Ok(DispatchResult::data_changed());
    }
    let caret = navigator.caret_position();
    if caret.data_position == 0 {
        return Ok(DispatchResult::clean());
    }
    let position = caret.data_position - 1;
    buffer.remove(position, 1)?;
    trace!(target: "actions.command", op = "backspace", position, "edit");
    navigator.notify_data_size_changed(buffer.data_size());
    navigator.set_caret_position(CaretPosition::new(position, 0, caret.section));
    navigator.clear_selection();
    navigator.reveal_caret();
    Ok(DispatchResult::data_changed())
}
