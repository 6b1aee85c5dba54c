//! Layout engine for the hex grid: how bytes map onto character columns,
//! pixels and viewport areas.
//!
//! Pipeline:
//! - `types`: code types (binary..hexadecimal), view modes, sections and gap
//!   widths shared by every other crate.
//! - `profile`: digit grouping (`LayoutProfile`) and the per-row
//!   `PositionIterator` that reports the gap after each code column.
//! - `structure`: the logical character grid of one row for a given view mode,
//!   code type and bytes per row, plus the total caret movement state machine.
//! - `metrics`: character cell size measured by the host through
//!   `FontMetricsProvider`.
//! - `dimensions`: splits the component rectangle into header, row position
//!   gutter, data view and scrollbars, and derives rows/characters per page.
//!
//! Units:
//! - Columns are character cells. Grouping gaps never consume columns; they
//!   are pixel gaps applied by `compute_pixel_position`.
//! - Dual mode appends a separator run (one column per half-cell unit of the
//!   closing gap) and one blank column before the preview block.
//!
//! Everything here is pure computation. Scroll state, caret blinking and the
//! selection live in `core-state`; the `Navigator` in `core-model` wires the
//! pieces together and owns recomputation order.

pub mod dimensions;
pub mod error;
pub mod metrics;
pub mod position;
pub mod profile;
pub mod structure;
pub mod types;

pub use dimensions::{Dimensions, Rect, Zone};
pub use error::LayoutError;
pub use metrics::{FontMetricsProvider, Metrics, MonospaceCells};
pub use position::{CaretPosition, MovementDirection, PositionOverflowMode};
pub use profile::{LayoutProfile, MAX_GROUP_SIZE, PositionIterator};
pub use structure::{MAX_BYTES_PER_ROW, Structure, check_bytes_per_row};
pub use types::{CodeType, DigitCase, Section, SpaceType, ViewMode};
