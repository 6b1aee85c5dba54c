//! Composition root of the hex grid engine.
//!
//! `Navigator` owns the layout configuration (code type, view mode, bytes per
//! row policy, grouping profile, row position length), the measured
//! `Metrics`, the derived `Structure` and `Dimensions`, and the view state
//! (`Scrolling`, `Caret`, `SelectionRange`). It answers the questions a host
//! asks:
//! - which caret position is closest to pixel (x, y)?
//! - where does the caret go after movement direction D?
//! - which scroll position reveals (or centers on) position P?
//!
//! Recompute order on every accepted change: dimensions -> structure (auto
//! bytes per row needs the data view width) -> scrollbar visibility, repeated
//! until the scrollbars settle; then scroll, caret and selection are clamped.
//!
//! `data` holds the byte storage contracts (`ByteSource`,
//! `EditableByteBuffer`) and the `Vec`-backed `MemoryBuffer`. The navigator
//! never reads content; only the document size flows in.
//!
//! Telemetry: configuration changes log `info!` on target `model.navigator`,
//! relayouts log `debug!` there.

pub mod data;
pub mod navigator;

pub use data::{ByteSource, DataError, EditableByteBuffer, MemoryBuffer};
pub use navigator::{
    BytesPerRow, DEFAULT_SCROLLBAR_SIZE, MAX_ROW_POSITION_LENGTH, Navigator, hex_digit_count,
};
