mod common;

use common::{code, handler, setup};
use core_actions::{Action, DispatchResult, EditMode};
use core_layout::{CodeType, MovementDirection};
use core_state::{ScrollingDirection, SelectionRange};
use pretty_assertions::assert_eq;

use MovementDirection::*;

#[test]
fn selecting_moves_extend_from_anchor() {
    let (mut nav, _) = setup(&[0u8; 32], CodeType::Hexadecimal);
    let mut h = handler(EditMode::Overwrite);
    h.move_caret(&mut nav, Down, true);
    assert_eq!(nav.caret_position(), code(8, 0));
    assert_eq!(nav.selection(), SelectionRange::new(0, 8));
    h.move_caret(&mut nav, Down, true);
    assert_eq!(nav.selection(), SelectionRange::new(0, 16));
    h.move_caret(&mut nav, Up, true);
    h.move_caret(&mut nav, Up, true);
    h.move_caret(&mut nav, Up, true);
    assert!(nav.selection().is_empty());
    h.move_caret(&mut nav, DocEnd, true);
    assert_eq!(nav.selection(), SelectionRange::new(0, 32));
    h.move_caret(&mut nav, Left, false);
    assert!(nav.selection().is_empty());
    assert_eq!(nav.caret_position(), code(31, 1));
}

#[test]
fn select_all_and_clear() {
    let (mut nav, _) = setup(&[0u8; 20], CodeType::Hexadecimal);
    let mut h = handler(EditMode::ReadOnly);
    h.select_all(&mut nav);
    assert_eq!(nav.selection(), SelectionRange::new(0, 20));
    assert_eq!(h.clear_selection(&mut nav), DispatchResult::dirty());
    assert!(nav.selection().is_empty());
    assert_eq!(h.clear_selection(&mut nav), DispatchResult::clean());
}

// data view starts at (30, 20): two digit row positions and one header row
#[test]
fn press_then_drag_selects() {
    let (mut nav, _) = setup(&[0u8; 32], CodeType::Hexadecimal);
    let mut h = handler(EditMode::Overwrite);
    h.mouse_pressed(&mut nav, 35, 25, false);
    assert_eq!(nav.caret_position(), code(0, 0));
    h.mouse_dragged(&mut nav, 30 + 35, 45);
    assert_eq!(nav.caret_position(), code(9, 0));
    assert_eq!(nav.selection(), SelectionRange::new(0, 9));
    // left of the view while dragging reaches the end of the previous row
    h.mouse_dragged(&mut nav, 5, 65);
    assert_eq!(nav.caret_position(), code(15, 0));
    assert_eq!(nav.selection(), SelectionRange::new(0, 15));
}

#[test]
fn press_outside_code_area_is_ignored() {
    let (mut nav, _) = setup(&[0u8; 32], CodeType::Hexadecimal);
    let mut h = handler(EditMode::Overwrite);
    nav.set_caret_position(code(5, 1));
    assert_eq!(h.mouse_pressed(&mut nav, 100, 5, false), DispatchResult::clean());
    assert_eq!(h.mouse_pressed(&mut nav, 5, 100, false), DispatchResult::clean());
    assert_eq!(nav.caret_position(), code(5, 1));
}

#[test]
fn shift_press_extends_selection() {
    let (mut nav, _) = setup(&[0u8; 32], CodeType::Hexadecimal);
    let mut h = handler(EditMode::Overwrite);
    nav.set_caret_position(code(2, 0));
    h.mouse_pressed(&mut nav, 35, 65, true);
    assert_eq!(nav.selection(), SelectionRange::new(2, 16));
}

#[test]
fn moves_reveal_the_caret() {
    let (mut nav, _) = setup(&[0u8; 400], CodeType::Hexadecimal);
    let mut h = handler(EditMode::Overwrite);
    h.move_caret(&mut nav, PageDown, false);
    assert_eq!(nav.caret_position(), code(80, 0));
    assert_eq!(nav.scroll_position().row_position, 1);
    h.move_caret(&mut nav, DocStart, false);
    assert_eq!(nav.scroll_position().row_position, 0);
}

#[test]
fn scroll_reports_change() -> anyhow::Result<()> {
    let (mut nav, mut buf) = setup(&[0u8; 400], CodeType::Hexadecimal);
    let mut h = handler(EditMode::Overwrite);
    assert_eq!(
        h.dispatch(Action::Scroll(ScrollingDirection::Up), &mut nav, &mut buf)?,
        DispatchResult::clean()
    );
    assert_eq!(
        h.dispatch(Action::Scroll(ScrollingDirection::PageDown), &mut nav, &mut buf)?,
        DispatchResult::dirty()
    );
    assert_eq!(nav.scroll_position().row_position, 10);
    h.dispatch(Action::CenterOnCaret, &mut nav, &mut buf)?;
    assert_eq!(nav.scroll_position().row_position, 0);
    Ok(())
}
