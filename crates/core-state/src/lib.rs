//! Mutable view state of the hex grid: scroll position, caret and selection.
//!
//! Everything here is a plain value owned by the `Navigator` (core-model);
//! nothing inspects byte content.
//!
//! - `scroll`: `ScrollPosition` bookkeeping (coarse index + pixel remainder
//!   per axis) and the pure line/page/reveal/center computations over
//!   `ScrollBounds`, plus the per-axis scrollbar policy held by `Scrolling`.
//! - `caret`: the committed `CaretPosition` and its blink phase. Blinking is
//!   driven by an injected `BlinkTimer`; every move restarts the phase.
//! - `selection`: `SelectionRange` anchor/end pair with normalized
//!   `first`/`last` queries (inclusive end).
//!
//! Logging: scroll clamping and scrollbar changes emit `debug!` events on
//! target `state.scroll`; caret moves emit `trace!` on `state.caret`.

pub mod caret;
pub mod scroll;
pub mod selection;

pub use caret::{BlinkTimer, Caret, DEFAULT_BLINK_RATE};
pub use scroll::{
    CellSpan, HORIZONTAL_STEP, PositionScrollVisibility, ScrollBounds, ScrollPosition,
    ScrollbarVisibility, Scrolling, ScrollingDirection,
};
pub use selection::SelectionRange;
