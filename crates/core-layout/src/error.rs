use thiserror::Error;

/// Rejected layout configuration. The previously accepted configuration
/// stays in effect whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("bytes per row must be at least 1")]
    ZeroBytesPerRow,
    #[error("bytes per row {value} exceeds the maximum of {max}")]
    BytesPerRowTooLarge { value: usize, max: usize },
    #[error("{name} group size {value} exceeds the maximum of {max}")]
    GroupSizeTooLarge {
        name: &'static str,
        value: usize,
        max: usize,
    },
    #[error("row position length {value} exceeds the maximum of {max}")]
    RowPositionLengthTooLarge { value: usize, max: usize },
}
