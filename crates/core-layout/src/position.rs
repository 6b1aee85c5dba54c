use crate::types::Section;

/// Caret location inside the document.
///
/// `data_position` ranges over `0..=data_size` (the end position addresses
/// the slot after the last byte). `code_offset` is the digit within the byte
/// and is only meaningful in [`Section::CodeMatrix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CaretPosition {
    pub data_position: u64,
    pub code_offset: usize,
    pub section: Section,
}

impl CaretPosition {
    pub fn new(data_position: u64, code_offset: usize, section: Section) -> Self {
        Self {
            data_position,
            code_offset,
            section,
        }
    }

    pub fn origin(section: Section) -> Self {
        Self::new(0, 0, section)
    }

    /// Same position with `section` and the code offset reset.
    pub fn in_section(self, section: Section) -> Self {
        Self::new(self.data_position, 0, section)
    }

    /// Row index for the given row width.
    pub fn row(&self, bytes_per_row: usize) -> u64 {
        self.data_position / bytes_per_row.max(1) as u64
    }

    /// Byte index within its row.
    pub fn byte_on_row(&self, bytes_per_row: usize) -> usize {
        (self.data_position % bytes_per_row.max(1) as u64) as usize
    }
}

/// Caret movement requested by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementDirection {
    Left,
    Right,
    Up,
    Down,
    RowStart,
    RowEnd,
    DocStart,
    DocEnd,
    PageUp,
    PageDown,
    SwitchSection,
}

/// Policy for pointer coordinates before the data view (left of it or above
/// it).
///
/// `NoOverflow` saturates to the first visible column/row. `Overflow` maps
/// to the column/row *before* it, which lets a drag left of the data view
/// reach the end of the previous row and a drag above it scroll upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionOverflowMode {
    Overflow,
    #[default]
    NoOverflow,
}
