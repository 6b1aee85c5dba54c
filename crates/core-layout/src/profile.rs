//! Digit grouping profile and the per-row position iterator.
//!
//! A row's code section is a run of digit columns, `max_digits_for_byte`
//! per byte. Grouping is expressed as gaps *after* a column: the last digit
//! of byte `b` carries the gap that separates it from byte `b + 1`. Three
//! byte-count moduli select the gap (widest wins):
//!
//! * `double_space_group_size` -> [`SpaceType::Double`]
//! * `space_group_size` -> [`SpaceType::Single`]
//! * `half_space_group_size` -> [`SpaceType::Half`]
//!
//! A modulus of 0 disables that group. In dual mode the gap after the last
//! byte separates the code block from the preview block and is followed by
//! a run of blank separator columns, one per half-cell unit of that gap.
//!
//! Gaps are pixel gaps: they never consume character cells, so the
//! character grid of the code section stays `bytes_per_row * digits` plus
//! the dual separator run.

use crate::LayoutError;
use crate::types::{CodeType, SpaceType, ViewMode};

/// Upper bound accepted for any group size.
pub const MAX_GROUP_SIZE: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutProfile {
    half_space_group_size: usize,
    space_group_size: usize,
    double_space_group_size: usize,
}

impl Default for LayoutProfile {
    fn default() -> Self {
        Self {
            half_space_group_size: 0,
            space_group_size: 1,
            double_space_group_size: 0,
        }
    }
}

fn check_group_size(name: &'static str, value: usize) -> Result<usize, LayoutError> {
    if value > MAX_GROUP_SIZE {
        return Err(LayoutError::GroupSizeTooLarge {
            name,
            value,
            max: MAX_GROUP_SIZE,
        });
    }
    Ok(value)
}

impl LayoutProfile {
    pub fn new(
        half_space_group_size: usize,
        space_group_size: usize,
        double_space_group_size: usize,
    ) -> Result<Self, LayoutError> {
        Ok(Self {
            half_space_group_size: check_group_size("half space", half_space_group_size)?,
            space_group_size: check_group_size("space", space_group_size)?,
            double_space_group_size: check_group_size("double space", double_space_group_size)?,
        })
    }

    /// Profile without any grouping gaps.
    pub const fn ungrouped() -> Self {
        Self {
            half_space_group_size: 0,
            space_group_size: 0,
            double_space_group_size: 0,
        }
    }

    pub fn half_space_group_size(&self) -> usize {
        self.half_space_group_size
    }

    pub fn space_group_size(&self) -> usize {
        self.space_group_size
    }

    pub fn double_space_group_size(&self) -> usize {
        self.double_space_group_size
    }

    pub fn set_half_space_group_size(&mut self, size: usize) -> Result<(), LayoutError> {
        self.half_space_group_size = check_group_size("half space", size)?;
        Ok(())
    }

    pub fn set_space_group_size(&mut self, size: usize) -> Result<(), LayoutError> {
        self.space_group_size = check_group_size("space", size)?;
        Ok(())
    }

    pub fn set_double_space_group_size(&mut self, size: usize) -> Result<(), LayoutError> {
        self.double_space_group_size = check_group_size("double space", size)?;
        Ok(())
    }

    /// Gap separating byte `byte_index - 1` from byte `byte_index`.
    pub fn space_before_byte(&self, byte_index: usize) -> SpaceType {
        let matches = |group: usize| group > 0 && byte_index % group == 0;
        if byte_index == 0 {
            SpaceType::None
        } else if matches(self.double_space_group_size) {
            SpaceType::Double
        } else if matches(self.space_group_size) {
            SpaceType::Single
        } else if matches(self.half_space_group_size) {
            SpaceType::Half
        } else {
            SpaceType::None
        }
    }

    fn closing_space(&self, view_mode: ViewMode, bytes_per_row: usize) -> SpaceType {
        if view_mode == ViewMode::Dual {
            self.space_before_byte(bytes_per_row)
        } else {
            SpaceType::None
        }
    }

    pub fn create_position_iterator(
        &self,
        code_type: CodeType,
        view_mode: ViewMode,
        bytes_per_row: usize,
    ) -> PositionIterator {
        let digits = code_type.max_digits_for_byte();
        let code_columns = if view_mode.has_code_matrix() {
            bytes_per_row * digits
        } else {
            0
        };
        let closing = self.closing_space(view_mode, bytes_per_row);
        let separator_columns = if code_columns > 0 {
            closing.half_units()
        } else {
            0
        };
        PositionIterator {
            profile: *self,
            digits,
            bytes_per_row,
            closing,
            code_columns,
            total: code_columns + separator_columns,
            position: 0,
        }
    }

    /// Number of character columns of the code section including the dual
    /// separator run. Equals the number of `next_space_type` calls a fresh
    /// iterator accepts.
    pub fn code_section_columns(
        &self,
        code_type: CodeType,
        view_mode: ViewMode,
        bytes_per_row: usize,
    ) -> usize {
        self.create_position_iterator(code_type, view_mode, bytes_per_row)
            .total
    }

    /// Pixel offset of `column` from the start of the row.
    ///
    /// Sums `character_width` plus the gap of every column strictly before
    /// `column`; columns past the code section advance by one character
    /// width each.
    pub fn compute_pixel_position(
        &self,
        column: usize,
        character_width: u32,
        view_mode: ViewMode,
        code_type: CodeType,
        bytes_per_row: usize,
    ) -> u64 {
        let cw = u64::from(character_width);
        let mut x = 0u64;
        let mut walked = 0usize;
        for space in self.create_position_iterator(code_type, view_mode, bytes_per_row) {
            if walked == column {
                break;
            }
            x += cw + u64::from(space.pixel_width(character_width));
            walked += 1;
        }
        x + (column - walked) as u64 * cw
    }

    /// Column whose pixel span `[pixel(c), pixel(c + 1))` contains `x`.
    pub fn compute_column_at_pixel(
        &self,
        x: u64,
        character_width: u32,
        view_mode: ViewMode,
        code_type: CodeType,
        bytes_per_row: usize,
    ) -> usize {
        if character_width == 0 {
            return 0;
        }
        let cw = u64::from(character_width);
        let mut start = 0u64;
        let mut column = 0usize;
        for space in self.create_position_iterator(code_type, view_mode, bytes_per_row) {
            let next = start + cw + u64::from(space.pixel_width(character_width));
            if x < next {
                return column;
            }
            start = next;
            column += 1;
        }
        column + ((x - start) / cw) as usize
    }
}

/// Stateful walk over the code-section columns of one row.
///
/// Finite and not rewindable; create a new one to restart. Calling
/// [`PositionIterator::next_space_type`] after the end is a programmer
/// error and panics. The [`Iterator`] impl yields `None` instead.
#[derive(Debug, Clone)]
pub struct PositionIterator {
    profile: LayoutProfile,
    digits: usize,
    bytes_per_row: usize,
    closing: SpaceType,
    code_columns: usize,
    total: usize,
    position: usize,
}

impl PositionIterator {
    pub fn is_end_reached(&self) -> bool {
        self.position >= self.total
    }

    /// Columns visited so far.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn next_space_type(&mut self) -> SpaceType {
        assert!(
            !self.is_end_reached(),
            "position iterator advanced past the end of the row ({} columns)",
            self.total
        );
        let column = self.position;
        self.position += 1;
        if column >= self.code_columns || (column + 1) % self.digits != 0 {
            return SpaceType::None;
        }
        let next_byte = column / self.digits + 1;
        if next_byte < self.bytes_per_row {
            self.profile.space_before_byte(next_byte)
        } else {
            self.closing
        }
    }
}

impl Iterator for PositionIterator {
    type Item = SpaceType;

    fn next(&mut self) -> Option<SpaceType> {
        if self.is_end_reached() {
            None
        } else {
            Some(self.next_space_type())
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total.saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PositionIterator {}
