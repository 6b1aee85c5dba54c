#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_actions::{CommandHandler, EditMode};
use core_layout::{CaretPosition, CodeType, Metrics, Section};
use core_model::{BytesPerRow, MemoryBuffer, Navigator};
use core_state::ScrollbarVisibility;

/// Navigator over `bytes` with a 10x20 cell grid, 8 bytes per row and a
/// 10 row page; no scrollbars.
pub fn setup(bytes: &[u8], code_type: CodeType) -> (Navigator, MemoryBuffer) {
    let mut nav = Navigator::new(bytes.len() as u64);
    nav.set_scrollbar_visibility(ScrollbarVisibility::Never, ScrollbarVisibility::Never);
    nav.set_code_type(code_type);
    nav.set_bytes_per_row(BytesPerRow::Fixed(8)).unwrap();
    nav.set_metrics(Metrics::new(10, 20));
    nav.set_component_bounds(0, 0, 600, 220);
    (nav, MemoryBuffer::from(bytes))
}

pub fn handler(mode: EditMode) -> CommandHandler {
    CommandHandler::new(mode)
}

pub fn code(position: u64, offset: usize) -> CaretPosition {
    CaretPosition::new(position, offset, Section::CodeMatrix)
}

pub fn preview(position: u64) -> CaretPosition {
    CaretPosition::new(position, 0, Section::TextPreview)
}
