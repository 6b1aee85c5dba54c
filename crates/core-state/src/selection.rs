use std::ops::Range;

/// Anchor/end pair over byte offsets. `start` is where selecting began,
/// `end` follows the caret; `start == end` means nothing is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SelectionRange {
    start: u64,
    end: u64,
}

impl SelectionRange {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    pub fn empty_at(position: u64) -> Self {
        Self::new(position, position)
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Lowest selected offset.
    pub fn first(&self) -> u64 {
        self.start.min(self.end)
    }

    /// Highest selected offset (inclusive). Only meaningful when non-empty.
    pub fn last(&self) -> u64 {
        self.start.max(self.end).saturating_sub(1)
    }

    pub fn length(&self) -> u64 {
        self.start.abs_diff(self.end)
    }

    /// Selected offsets as a half-open range.
    pub fn range(&self) -> Range<u64> {
        self.first()..self.start.max(self.end)
    }

    pub fn contains(&self, position: u64) -> bool {
        self.range().contains(&position)
    }

    /// Keep the anchor and move the end.
    pub fn with_end(self, end: u64) -> Self {
        Self::new(self.start, end)
    }

    pub fn clamp_to(self, data_size: u64) -> Self {
        Self::new(self.start.min(data_size), self.end.min(data_size))
    }
}
