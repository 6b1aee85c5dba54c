mod common;

use common::{code, handler, preview, setup};
use core_actions::{Action, DispatchResult, EditError, EditMode};
use core_layout::CodeType;
use core_state::SelectionRange;
use pretty_assertions::assert_eq;

#[test]
fn overwrite_hex_digits_and_advance() -> anyhow::Result<()> {
    let (mut nav, mut buf) = setup(&[0x12, 0x34], CodeType::Hexadecimal);
    let mut h = handler(EditMode::Overwrite);
    assert_eq!(h.key_typed(&mut nav, &mut buf, 'a')?, DispatchResult::data_changed());
    assert_eq!(buf.as_slice(), &[0xa2, 0x34]);
    assert_eq!(nav.caret_position(), code(0, 1));
    h.key_typed(&mut nav, &mut buf, 'F')?;
    assert_eq!(buf.as_slice(), &[0xaf, 0x34]);
    assert_eq!(nav.caret_position(), code(1, 0));
    Ok(())
}

#[test]
fn insert_mode_inserts_on_first_digit() -> anyhow::Result<()> {
    let (mut nav, mut buf) = setup(&[0x12, 0x34], CodeType::Hexadecimal);
    let mut h = handler(EditMode::Insert);
    nav.set_caret_position(code(1, 0));
    h.key_typed(&mut nav, &mut buf, '7')?;
    assert_eq!(buf.as_slice(), &[0x12, 0x70, 0x34]);
    assert_eq!(nav.caret_position(), code(1, 1));
    h.key_typed(&mut nav, &mut buf, '5')?;
    assert_eq!(buf.as_slice(), &[0x12, 0x75, 0x34]);
    assert_eq!(nav.caret_position(), code(2, 0));
    assert_eq!(nav.data_size(), 3);
    Ok(())
}

#[test]
fn typing_at_end_appends() -> anyhow::Result<()> {
    let (mut nav, mut buf) = setup(&[0x12], CodeType::Hexadecimal);
    let mut h = handler(EditMode::Overwrite);
    nav.set_caret_position(code(1, 0));
    h.key_typed(&mut nav, &mut buf, 'b')?;
    assert_eq!(buf.as_slice(), &[0x12, 0xb0]);
    assert_eq!(nav.caret_position(), code(1, 1));
    Ok(())
}

#[test]
fn invalid_input_leaves_buffer_untouched() {
    let (mut nav, mut buf) = setup(&[0x00], CodeType::Decimal);
    let mut h = handler(EditMode::Overwrite);
    assert_eq!(
        h.key_typed(&mut nav, &mut buf, 'a'),
        Err(EditError::InvalidDigit {
            ch: 'a',
            code_type: CodeType::Decimal
        })
    );
    assert_eq!(
        h.key_typed(&mut nav, &mut buf, '3'),
        Err(EditError::ValueOverflow { ch: '3' })
    );
    assert_eq!(buf.as_slice(), &[0x00]);
    assert_eq!(nav.caret_position(), code(0, 0));
    h.key_typed(&mut nav, &mut buf, '2').unwrap();
    assert_eq!(buf.as_slice(), &[200]);
}

#[test]
fn preview_typing_writes_latin1() -> anyhow::Result<()> {
    let (mut nav, mut buf) = setup(&[0, 0], CodeType::Hexadecimal);
    let mut h = handler(EditMode::Overwrite);
    nav.set_caret_position(preview(0));
    h.key_typed(&mut nav, &mut buf, 'Z')?;
    h.key_typed(&mut nav, &mut buf, '\u{e9}')?;
    assert_eq!(buf.as_slice(), &[0x5a, 0xe9]);
    assert_eq!(nav.caret_position(), preview(2));
    assert_eq!(
        h.key_typed(&mut nav, &mut buf, '\u{20ac}'),
        Err(EditError::UnrepresentableChar { ch: '\u{20ac}' })
    );
    assert_eq!(buf.as_slice().len(), 2);
    Ok(())
}

#[test]
fn read_only_rejects_edits() {
    let (mut nav, mut buf) = setup(&[1, 2, 3], CodeType::Hexadecimal);
    let mut h = handler(EditMode::ReadOnly);
    assert_eq!(h.key_typed(&mut nav, &mut buf, '1'), Err(EditError::ReadOnly));
    assert_eq!(h.delete(&mut nav, &mut buf), Err(EditError::ReadOnly));
    assert_eq!(h.backspace(&mut nav, &mut buf), Err(EditError::ReadOnly));
    assert_eq!(buf.as_slice(), &[1, 2, 3]);
}

#[test]
fn typing_replaces_selection() -> anyhow::Result<()> {
    let (mut nav, mut buf) = setup(&[1, 2, 3, 4, 5], CodeType::Hexadecimal);
    let mut h = handler(EditMode::Overwrite);
    nav.set_caret_position(code(3, 0));
    nav.set_selection(SelectionRange::new(1, 3));
    h.key_typed(&mut nav, &mut buf, 'f')?;
    assert_eq!(buf.as_slice(), &[1, 0xf4, 5]);
    assert_eq!(nav.caret_position(), code(1, 1));
    assert!(nav.selection().is_empty());
    Ok(())
}

#[test]
fn delete_and_backspace() -> anyhow::Result<()> {
    let (mut nav, mut buf) = setup(&[1, 2, 3], CodeType::Hexadecimal);
    let mut h = handler(EditMode::Overwrite);
    nav.set_caret_position(code(1, 1));
    h.delete(&mut nav, &mut buf)?;
    assert_eq!(buf.as_slice(), &[1, 3]);
    assert_eq!(nav.caret_position(), code(1, 0));
    h.backspace(&mut nav, &mut buf)?;
    assert_eq!(buf.as_slice(), &[3]);
    assert_eq!(nav.caret_position(), code(0, 0));
    assert_eq!(h.backspace(&mut nav, &mut buf)?, DispatchResult::clean());
    nav.set_caret_position(code(1, 0));
    assert_eq!(h.delete(&mut nav, &mut buf)?, DispatchResult::clean());
    Ok(())
}

#[test]
fn delete_removes_backwards_selection() -> anyhow::Result<()> {
    let (mut nav, mut buf) = setup(&[1, 2, 3], CodeType::Hexadecimal);
    let mut h = handler(EditMode::Insert);
    nav.set_selection(SelectionRange::new(2, 0));
    h.delete(&mut nav, &mut buf)?;
    assert_eq!(buf.as_slice(), &[3]);
    assert_eq!(nav.caret_position(), code(0, 0));
    assert_eq!(nav.data_size(), 1);
    Ok(())
}

#[test]
fn dispatch_routes_actions() -> anyhow::Result<()> {
    let (mut nav, mut buf) = setup(&[0x00, 0x00], CodeType::Hexadecimal);
    let mut h = handler(EditMode::Overwrite);
    h.dispatch(Action::ToggleInsertMode, &mut nav, &mut buf)?;
    assert_eq!(h.edit_mode(), EditMode::Insert);
    h.dispatch(Action::Type('9'), &mut nav, &mut buf)?;
    assert_eq!(buf.as_slice(), &[0x90, 0x00, 0x00]);
    h.dispatch(Action::Delete, &mut nav, &mut buf)?;
    assert_eq!(buf.as_slice(), &[0x00, 0x00]);
    assert_eq!(nav.caret_position(), code(0, 0));
    Ok(())
}
