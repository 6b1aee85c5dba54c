//! Logical character grid of one row and the caret movement state machine.
//!
//! Row layout in character columns:
//!
//! ```text
//! CodeMatrix : [ code section ]
//! TextPreview: [ preview: bytes_per_row columns ]
//! Dual       : [ code section ][ separator ][ preview: bytes_per_row columns ]
//! ```
//!
//! The code section holds `bytes_per_row * digits` digit columns followed, in
//! dual mode, by the separator run described in [`crate::profile`].
//!
//! Invariants (after every `compute`):
//! * `bytes_per_row >= 1`.
//! * `characters_per_row == characters_per_code_section + (dual ? 1 + bytes_per_row : 0)`
//!   when a code section exists, else `bytes_per_row`.
//! * `rows_per_document == ceil(data_size / bytes_per_row)`.
//!
//! Movement never fails: every out-of-range target is clamped into
//! `[0, data_size]`.

use crate::LayoutError;
use crate::position::{CaretPosition, MovementDirection};
use crate::profile::LayoutProfile;
use crate::types::{CodeType, Section, ViewMode};

/// Upper bound accepted for a fixed bytes-per-row setting.
pub const MAX_BYTES_PER_ROW: usize = 1 << 16;

pub fn check_bytes_per_row(bytes_per_row: usize) -> Result<usize, LayoutError> {
    match bytes_per_row {
        0 => Err(LayoutError::ZeroBytesPerRow),
        n if n > MAX_BYTES_PER_ROW => Err(LayoutError::BytesPerRowTooLarge {
            value: n,
            max: MAX_BYTES_PER_ROW,
        }),
        n => Ok(n),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Structure {
    view_mode: ViewMode,
    code_type: CodeType,
    profile: LayoutProfile,
    bytes_per_row: usize,
    characters_per_code_section: usize,
    characters_per_row: usize,
    preview_char_pos: usize,
    rows_per_document: u64,
    data_size: u64,
}

impl Default for Structure {
    /// Dual hexadecimal view, 16 bytes per row, empty document.
    fn default() -> Self {
        Self::build(
            ViewMode::Dual,
            CodeType::Hexadecimal,
            LayoutProfile::default(),
            16,
            0,
        )
    }
}

/// Column counts of one row: code section (with the dual separator run),
/// preview start and whole row.
fn row_columns(
    view_mode: ViewMode,
    code_type: CodeType,
    profile: &LayoutProfile,
    bytes_per_row: usize,
) -> (usize, usize, usize) {
    let code_section = profile.code_section_columns(code_type, view_mode, bytes_per_row);
    match view_mode {
        ViewMode::CodeMatrix => (code_section, 0, code_section),
        ViewMode::TextPreview => (code_section, 0, bytes_per_row),
        ViewMode::Dual => {
            let preview = code_section + 1;
            (code_section, preview, preview + bytes_per_row)
        }
    }
}

impl Structure {
    pub fn compute(
        view_mode: ViewMode,
        code_type: CodeType,
        profile: LayoutProfile,
        bytes_per_row: usize,
        data_size: u64,
    ) -> Result<Self, LayoutError> {
        let bytes_per_row = check_bytes_per_row(bytes_per_row)?;
        Ok(Self::build(
            view_mode,
            code_type,
            profile,
            bytes_per_row,
            data_size,
        ))
    }

    /// Like [`Structure::compute`] but clamps the row width into
    /// `1..=MAX_BYTES_PER_ROW` instead of failing.
    pub fn compute_clamped(
        view_mode: ViewMode,
        code_type: CodeType,
        profile: LayoutProfile,
        bytes_per_row: usize,
        data_size: u64,
    ) -> Self {
        Self::build(
            view_mode,
            code_type,
            profile,
            bytes_per_row.clamp(1, MAX_BYTES_PER_ROW),
            data_size,
        )
    }

    fn build(
        view_mode: ViewMode,
        code_type: CodeType,
        profile: LayoutProfile,
        bytes_per_row: usize,
        data_size: u64,
    ) -> Self {
        let (characters_per_code_section, preview_char_pos, characters_per_row) =
            row_columns(view_mode, code_type, &profile, bytes_per_row);
        let rows_per_document = data_size.div_ceil(bytes_per_row as u64);
        tracing::trace!(
            target: "layout.structure",
            ?view_mode,
            ?code_type,
            bytes_per_row,
            characters_per_row,
            rows_per_document,
            "structure_computed"
        );
        Self {
            view_mode,
            code_type,
            profile,
            bytes_per_row,
            characters_per_code_section,
            characters_per_row,
            preview_char_pos,
            rows_per_document,
            data_size,
        }
    }

    /// Largest bytes-per-row whose full row fits into `available_width`
    /// pixels; at least 1.
    pub fn compute_fitting_bytes_per_row(
        view_mode: ViewMode,
        code_type: CodeType,
        profile: &LayoutProfile,
        available_width: u64,
        character_width: u32,
    ) -> usize {
        if character_width == 0 {
            return 1;
        }
        let fits = |bytes_per_row: usize| {
            let (_, _, columns) = row_columns(view_mode, code_type, profile, bytes_per_row);
            let width = profile.compute_pixel_position(
                columns,
                character_width,
                view_mode,
                code_type,
                bytes_per_row,
            );
            width <= available_width
        };
        // Row width grows with every added byte; each byte takes at least
        // one cell, which bounds the search.
        let cells = (available_width / u64::from(character_width)) as usize;
        let (mut low, mut high) = (1, cells.min(MAX_BYTES_PER_ROW));
        if high < low || !fits(low) {
            return 1;
        }
        while low < high {
            let mid = low + (high - low).div_ceil(2);
            if fits(mid) {
                low = mid;
            } else {
                high = mid - 1;
            }
        }
        low
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn code_type(&self) -> CodeType {
        self.code_type
    }

    pub fn profile(&self) -> &LayoutProfile {
        &self.profile
    }

    pub fn bytes_per_row(&self) -> usize {
        self.bytes_per_row
    }

    pub fn characters_per_row(&self) -> usize {
        self.characters_per_row
    }

    pub fn characters_per_code_section(&self) -> usize {
        self.characters_per_code_section
    }

    pub fn preview_char_pos(&self) -> usize {
        self.preview_char_pos
    }

    pub fn rows_per_document(&self) -> u64 {
        self.rows_per_document
    }

    pub fn data_size(&self) -> u64 {
        self.data_size
    }

    pub fn max_digits(&self) -> usize {
        self.code_type.max_digits_for_byte()
    }

    /// Rows a caret can occupy: one more than `rows_per_document` when the
    /// end position starts a fresh row.
    pub fn rows_including_end(&self) -> u64 {
        self.rows_per_document
            .max(self.data_size / self.bytes_per_row as u64 + 1)
    }

    pub fn compute_first_code_character_pos(&self, byte_on_row: usize) -> usize {
        byte_on_row * self.max_digits()
    }

    pub fn compute_last_code_character_pos(&self, byte_on_row: usize) -> usize {
        self.compute_first_code_character_pos(byte_on_row) + self.max_digits() - 1
    }

    /// Byte on row covering the code `column`. Columns past the digits of the
    /// last byte (the dual separator run) yield values `>= bytes_per_row`.
    pub fn compute_position_byte(&self, column: usize) -> usize {
        column / self.max_digits()
    }

    /// Character column the caret occupies.
    pub fn caret_column(&self, caret: &CaretPosition) -> usize {
        let byte_on_row = caret.byte_on_row(self.bytes_per_row);
        match caret.section {
            Section::CodeMatrix => {
                self.compute_first_code_character_pos(byte_on_row) + caret.code_offset
            }
            Section::TextPreview => self.preview_char_pos + byte_on_row,
        }
    }

    pub fn compute_pixel_position(&self, column: usize, character_width: u32) -> u64 {
        self.profile.compute_pixel_position(
            column,
            character_width,
            self.view_mode,
            self.code_type,
            self.bytes_per_row,
        )
    }

    pub fn compute_column_at_pixel(&self, x: u64, character_width: u32) -> usize {
        self.profile.compute_column_at_pixel(
            x,
            character_width,
            self.view_mode,
            self.code_type,
            self.bytes_per_row,
        )
    }

    /// Pixel width of a whole row.
    pub fn row_pixel_width(&self, character_width: u32) -> u64 {
        self.compute_pixel_position(self.characters_per_row, character_width)
    }

    /// Bring an arbitrary caret into the valid range for this structure.
    pub fn clamp_caret(&self, caret: CaretPosition) -> CaretPosition {
        let section = if self.view_mode == ViewMode::Dual {
            caret.section
        } else {
            self.view_mode.default_section()
        };
        let data_position = caret.data_position.min(self.data_size);
        let code_offset = if section == Section::TextPreview || data_position == self.data_size {
            0
        } else {
            caret.code_offset.min(self.max_digits() - 1)
        };
        CaretPosition::new(data_position, code_offset, section)
    }

    /// Caret position after moving in `direction`. Total: never fails,
    /// clamps instead.
    pub fn compute_move_position(
        &self,
        caret: CaretPosition,
        direction: MovementDirection,
        rows_per_page: usize,
    ) -> CaretPosition {
        let mut target = self.clamp_caret(caret);
        let bytes_per_row = self.bytes_per_row as u64;
        let data_size = self.data_size;
        let digits = self.max_digits();
        let in_code = target.section == Section::CodeMatrix;
        match direction {
            MovementDirection::Left => {
                if in_code && target.code_offset > 0 {
                    target.code_offset -= 1;
                } else if target.data_position > 0 {
                    target.data_position -= 1;
                    target.code_offset = if in_code { digits - 1 } else { 0 };
                }
            }
            MovementDirection::Right => {
                if target.data_position < data_size {
                    if in_code && target.code_offset + 1 < digits {
                        target.code_offset += 1;
                    } else {
                        target.data_position += 1;
                        target.code_offset = 0;
                    }
                }
            }
            MovementDirection::Up => {
                if target.data_position >= bytes_per_row {
                    target.data_position -= bytes_per_row;
                }
            }
            MovementDirection::Down => {
                let position = target.data_position;
                if position + bytes_per_row <= data_size {
                    target.data_position = position + bytes_per_row;
                } else if position / bytes_per_row < data_size / bytes_per_row {
                    target.data_position = data_size;
                }
            }
            MovementDirection::RowStart => {
                target.data_position -= target.data_position % bytes_per_row;
                target.code_offset = 0;
            }
            MovementDirection::RowEnd => {
                let row_start = target.data_position - target.data_position % bytes_per_row;
                target.data_position = (row_start + bytes_per_row - 1).min(data_size);
                target.code_offset = 0;
            }
            MovementDirection::DocStart => {
                target.data_position = 0;
                target.code_offset = 0;
            }
            MovementDirection::DocEnd => {
                target.data_position = data_size;
                target.code_offset = 0;
            }
            MovementDirection::PageUp => {
                let shift = bytes_per_row.saturating_mul(rows_per_page.max(1) as u64);
                target.data_position = match target.data_position.checked_sub(shift) {
                    Some(position) => position,
                    None => target.data_position % bytes_per_row,
                };
            }
            MovementDirection::PageDown => {
                let shift = bytes_per_row.saturating_mul(rows_per_page.max(1) as u64);
                let position = target.data_position;
                match position.checked_add(shift) {
                    Some(moved) if moved <= data_size => target.data_position = moved,
                    _ => {
                        // furthest position on the same column, else the
                        // end of a shorter last row, as DOWN does
                        let furthest = data_size - (data_size - position) % bytes_per_row;
                        if furthest / bytes_per_row > position / bytes_per_row {
                            target.data_position = furthest;
                        } else if position / bytes_per_row < data_size / bytes_per_row {
                            target.data_position = data_size;
                        }
                    }
                }
            }
            MovementDirection::SwitchSection => {
                if self.view_mode == ViewMode::Dual {
                    target.section = target.section.toggled();
                    target.code_offset = 0;
                }
            }
        }
        if target.data_position == data_size {
            target.code_offset = 0;
        }
        target
    }
}
