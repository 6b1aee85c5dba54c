//! Scroll position bookkeeping and the scroll computations.
//!
//! Vertical scroll is `(row_position, row_offset)` with pixel value
//! `row_position * row_height + row_offset`; horizontal scroll is
//! `(char_position, char_offset)` with pixel value
//! `char_position * character_width + char_offset`. Vertical pixel values are
//! carried as `u128`: a document of 2^63 bytes has more rows than fit into a
//! `u64` worth of pixels.
//!
//! The `compute_*` functions are pure; [`Scrolling`] holds the committed
//! position and the scrollbar state.

use core_layout::{Dimensions, Structure};
use serde::Deserialize;
use tracing::debug;

/// Characters moved by a single horizontal scroll step.
pub const HORIZONTAL_STEP: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScrollPosition {
    pub row_position: u64,
    pub row_offset: u32,
    pub char_position: usize,
    pub char_offset: u32,
}

impl ScrollPosition {
    pub fn new(row_position: u64, row_offset: u32, char_position: usize, char_offset: u32) -> Self {
        Self {
            row_position,
            row_offset,
            char_position,
            char_offset,
        }
    }

    /// Roll offsets that reached a full cell into the coarse positions.
    pub fn normalize(&mut self, character_width: u32, row_height: u32) {
        if row_height > 0 && self.row_offset >= row_height {
            self.row_position = self
                .row_position
                .saturating_add(u64::from(self.row_offset / row_height));
            self.row_offset %= row_height;
        }
        if character_width > 0 && self.char_offset >= character_width {
            self.char_position = self
                .char_position
                .saturating_add((self.char_offset / character_width) as usize);
            self.char_offset %= character_width;
        }
    }

    pub fn vertical_pixel(&self, row_height: u32) -> u128 {
        u128::from(self.row_position) * u128::from(row_height) + u128::from(self.row_offset)
    }

    pub fn horizontal_pixel(&self, character_width: u32) -> u64 {
        (self.char_position as u64)
            .saturating_mul(u64::from(character_width))
            .saturating_add(u64::from(self.char_offset))
    }

    fn with_vertical_pixel(self, pixel: u128, row_height: u32) -> Self {
        let row_height = u128::from(row_height.max(1));
        Self {
            row_position: u64::try_from(pixel / row_height).unwrap_or(u64::MAX),
            row_offset: (pixel % row_height) as u32,
            ..self
        }
    }

    fn with_horizontal_pixel(self, pixel: u64, character_width: u32) -> Self {
        let character_width = u64::from(character_width.max(1));
        Self {
            char_position: (pixel / character_width) as usize,
            char_offset: (pixel % character_width) as u32,
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollingDirection {
    Up,
    Down,
    PageUp,
    PageDown,
    Left,
    Right,
    PageLeft,
    PageRight,
}

/// Scrollbar policy for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollbarVisibility {
    Never,
    #[default]
    IfNeeded,
    Always,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionScrollVisibility {
    FullyVisible,
    PartiallyVisible,
    NotVisible,
}

/// Pixel extent of one character cell of the document.
///
/// `x` is measured from the start of the row (unscrolled), `row` is the
/// document row; the cell is one row high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellSpan {
    pub row: u64,
    pub x: u64,
    pub width: u32,
}

/// Document extent and viewport size used by the scroll computations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollBounds {
    pub character_width: u32,
    pub row_height: u32,
    /// Rows the caret can occupy, including a trailing end-position row.
    pub rows: u64,
    pub row_pixel_width: u64,
    pub rows_per_page: usize,
    pub characters_per_page: usize,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl ScrollBounds {
    pub fn from_layout(structure: &Structure, dimensions: &Dimensions) -> Self {
        let character_width = dimensions.character_width();
        let data_view = dimensions.data_view();
        Self {
            character_width,
            row_height: dimensions.row_height(),
            rows: structure.rows_including_end(),
            row_pixel_width: structure.row_pixel_width(character_width),
            rows_per_page: dimensions.rows_per_page(),
            characters_per_page: dimensions.characters_per_page(),
            viewport_width: data_view.width,
            viewport_height: data_view.height,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.character_width == 0 || self.row_height == 0
    }

    /// Largest first visible row: the last row ends up on the last full row
    /// of the page.
    pub fn max_row_position(&self) -> u64 {
        self.rows.saturating_sub(self.rows_per_page as u64)
    }

    fn max_vertical_pixel(&self) -> u128 {
        u128::from(self.max_row_position()) * u128::from(self.row_height)
    }

    fn max_horizontal_pixel(&self) -> u64 {
        self.row_pixel_width
            .saturating_sub(u64::from(self.viewport_width))
    }

    pub fn max_scroll_position(&self) -> ScrollPosition {
        if self.is_degenerate() {
            return ScrollPosition::default();
        }
        ScrollPosition::default()
            .with_vertical_pixel(self.max_vertical_pixel(), self.row_height)
            .with_horizontal_pixel(self.max_horizontal_pixel(), self.character_width)
    }

    pub fn has_vertical_overflow(&self) -> bool {
        self.rows > self.rows_per_page as u64
    }

    pub fn has_horizontal_overflow(&self) -> bool {
        self.row_pixel_width > u64::from(self.viewport_width)
    }

    /// Bring `position` into `[0, max_scroll_position]` on both axes.
    pub fn clamp(&self, mut position: ScrollPosition) -> ScrollPosition {
        if self.is_degenerate() {
            return ScrollPosition::default();
        }
        position.normalize(self.character_width, self.row_height);
        let vertical = position
            .vertical_pixel(self.row_height)
            .min(self.max_vertical_pixel());
        let horizontal = position
            .horizontal_pixel(self.character_width)
            .min(self.max_horizontal_pixel());
        position
            .with_vertical_pixel(vertical, self.row_height)
            .with_horizontal_pixel(horizontal, self.character_width)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Overlap {
    None,
    Partial,
    Full,
}

fn overlap(view_start: u128, view_size: u128, cell_start: u128, cell_size: u128) -> Overlap {
    let view_end = view_start + view_size;
    let cell_end = cell_start + cell_size;
    if cell_start >= view_start && cell_end <= view_end && view_size > 0 {
        Overlap::Full
    } else if cell_start < view_end && cell_end > view_start {
        Overlap::Partial
    } else {
        Overlap::None
    }
}

/// Nearest view start that shows the whole cell; the cell start wins when
/// the cell is larger than the view.
fn reveal_axis(view_start: u128, view_size: u128, cell_start: u128, cell_size: u128) -> u128 {
    let cell_end = cell_start + cell_size;
    if cell_start < view_start || cell_size > view_size {
        cell_start
    } else if cell_end > view_start + view_size {
        cell_end - view_size
    } else {
        view_start
    }
}

fn center_axis(view_size: u128, cell_start: u128, cell_size: u128) -> u128 {
    (cell_start + cell_size / 2).saturating_sub(view_size / 2)
}

struct CellAxes {
    vertical: (u128, u128),
    horizontal: (u128, u128),
}

impl CellAxes {
    fn new(cell: CellSpan, bounds: &ScrollBounds) -> Self {
        let row_height = u128::from(bounds.row_height);
        Self {
            vertical: (u128::from(cell.row) * row_height, row_height),
            horizontal: (u128::from(cell.x), u128::from(cell.width)),
        }
    }
}

fn from_pixels(vertical: u128, horizontal: u128, bounds: &ScrollBounds) -> ScrollPosition {
    let horizontal = u64::try_from(horizontal).unwrap_or(u64::MAX);
    bounds.clamp(
        ScrollPosition::default()
            .with_vertical_pixel(vertical, bounds.row_height)
            .with_horizontal_pixel(horizontal, bounds.character_width),
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scrolling {
    position: ScrollPosition,
    vertical_visibility: ScrollbarVisibility,
    horizontal_visibility: ScrollbarVisibility,
    vertical_scrollbar_visible: bool,
    horizontal_scrollbar_visible: bool,
}

impl Default for Scrolling {
    fn default() -> Self {
        Self::new(ScrollbarVisibility::default(), ScrollbarVisibility::default())
    }
}

impl Scrolling {
    pub fn new(vertical: ScrollbarVisibility, horizontal: ScrollbarVisibility) -> Self {
        Self {
            position: ScrollPosition::default(),
            vertical_visibility: vertical,
            horizontal_visibility: horizontal,
            vertical_scrollbar_visible: vertical == ScrollbarVisibility::Always,
            horizontal_scrollbar_visible: horizontal == ScrollbarVisibility::Always,
        }
    }

    pub fn position(&self) -> ScrollPosition {
        self.position
    }

    /// Commit a new position, clamped to `bounds`. Returns true if it changed.
    pub fn set_position(&mut self, position: ScrollPosition, bounds: &ScrollBounds) -> bool {
        let clamped = bounds.clamp(position);
        let changed = clamped != self.position;
        self.position = clamped;
        changed
    }

    pub fn reset(&mut self) {
        self.position = ScrollPosition::default();
    }

    /// Re-clamp after a resize or document size change.
    pub fn clamp_to(&mut self, bounds: &ScrollBounds) -> bool {
        let before = self.position;
        let changed = self.set_position(before, bounds);
        if changed {
            debug!(
                target: "state.scroll",
                from_row = before.row_position,
                to_row = self.position.row_position,
                from_char = before.char_position,
                to_char = self.position.char_position,
                "scroll_clamped"
            );
        }
        changed
    }

    pub fn scroll(&mut self, direction: ScrollingDirection, bounds: &ScrollBounds) -> bool {
        let target = Self::compute_scrolling(self.position, direction, bounds);
        self.set_position(target, bounds)
    }

    pub fn vertical_visibility(&self) -> ScrollbarVisibility {
        self.vertical_visibility
    }

    pub fn horizontal_visibility(&self) -> ScrollbarVisibility {
        self.horizontal_visibility
    }

    pub fn set_visibility(
        &mut self,
        vertical: ScrollbarVisibility,
        horizontal: ScrollbarVisibility,
    ) {
        self.vertical_visibility = vertical;
        self.horizontal_visibility = horizontal;
    }

    pub fn is_vertical_scrollbar_visible(&self) -> bool {
        self.vertical_scrollbar_visible
    }

    pub fn is_horizontal_scrollbar_visible(&self) -> bool {
        self.horizontal_scrollbar_visible
    }

    /// Decide which scrollbars take space for the given bounds. Returns true
    /// if either visibility changed; the caller then recomputes dimensions
    /// and calls this again until it settles.
    pub fn update_scrollbars(&mut self, bounds: &ScrollBounds) -> bool {
        let decide = |policy: ScrollbarVisibility, overflow: bool| match policy {
            ScrollbarVisibility::Never => false,
            ScrollbarVisibility::Always => true,
            ScrollbarVisibility::IfNeeded => overflow,
        };
        let vertical = decide(self.vertical_visibility, bounds.has_vertical_overflow());
        let horizontal = decide(self.horizontal_visibility, bounds.has_horizontal_overflow());
        let changed = vertical != self.vertical_scrollbar_visible
            || horizontal != self.horizontal_scrollbar_visible;
        if changed {
            debug!(target: "state.scroll", vertical, horizontal, "scrollbars_updated");
        }
        self.vertical_scrollbar_visible = vertical;
        self.horizontal_scrollbar_visible = horizontal;
        changed
    }

    pub fn compute_scrolling(
        start: ScrollPosition,
        direction: ScrollingDirection,
        bounds: &ScrollBounds,
    ) -> ScrollPosition {
        let rows_per_page = bounds.rows_per_page.max(1) as u64;
        let characters_per_page = bounds.characters_per_page.max(1);
        let mut target = start;
        match direction {
            ScrollingDirection::Up | ScrollingDirection::PageUp => {
                let shift = if direction == ScrollingDirection::Up { 1 } else { rows_per_page };
                target.row_position = start.row_position.saturating_sub(shift);
                target.row_offset = 0;
            }
            ScrollingDirection::Down | ScrollingDirection::PageDown => {
                let shift = if direction == ScrollingDirection::Down { 1 } else { rows_per_page };
                target.row_position = start.row_position.saturating_add(shift);
                target.row_offset = 0;
            }
            ScrollingDirection::Left | ScrollingDirection::PageLeft => {
                let shift = if direction == ScrollingDirection::Left {
                    HORIZONTAL_STEP
                } else {
                    characters_per_page
                };
                target.char_position = start.char_position.saturating_sub(shift);
                target.char_offset = 0;
            }
            ScrollingDirection::Right | ScrollingDirection::PageRight => {
                let shift = if direction == ScrollingDirection::Right {
                    HORIZONTAL_STEP
                } else {
                    characters_per_page
                };
                target.char_position = start.char_position.saturating_add(shift);
                target.char_offset = 0;
            }
        }
        bounds.clamp(target)
    }

    pub fn compute_position_scroll_visibility(
        start: ScrollPosition,
        cell: CellSpan,
        bounds: &ScrollBounds,
    ) -> PositionScrollVisibility {
        if bounds.is_degenerate() {
            return PositionScrollVisibility::NotVisible;
        }
        let axes = CellAxes::new(cell, bounds);
        let vertical = overlap(
            start.vertical_pixel(bounds.row_height),
            u128::from(bounds.viewport_height),
            axes.vertical.0,
            axes.vertical.1,
        );
        let horizontal = overlap(
            u128::from(start.horizontal_pixel(bounds.character_width)),
            u128::from(bounds.viewport_width),
            axes.horizontal.0,
            axes.horizontal.1,
        );
        match (vertical, horizontal) {
            (Overlap::Full, Overlap::Full) => PositionScrollVisibility::FullyVisible,
            (Overlap::None, _) | (_, Overlap::None) => PositionScrollVisibility::NotVisible,
            _ => PositionScrollVisibility::PartiallyVisible,
        }
    }

    /// Smallest scroll that brings `cell` into view. A cell whose rectangle
    /// already intersects the viewport leaves `start` unchanged; otherwise
    /// each axis scrolls to its near edge so the cell becomes fully visible.
    pub fn compute_reveal_scroll_position(
        start: ScrollPosition,
        cell: CellSpan,
        bounds: &ScrollBounds,
    ) -> ScrollPosition {
        if bounds.is_degenerate()
            || Self::compute_position_scroll_visibility(start, cell, bounds)
                != PositionScrollVisibility::NotVisible
        {
            return start;
        }
        let axes = CellAxes::new(cell, bounds);
        let vertical = reveal_axis(
            start.vertical_pixel(bounds.row_height),
            u128::from(bounds.viewport_height),
            axes.vertical.0,
            axes.vertical.1,
        );
        let horizontal = reveal_axis(
            u128::from(start.horizontal_pixel(bounds.character_width)),
            u128::from(bounds.viewport_width),
            axes.horizontal.0,
            axes.horizontal.1,
        );
        from_pixels(vertical, horizontal, bounds)
    }

    /// Scroll placing `cell` in the middle of the viewport, clamped near the
    /// document edges.
    pub fn compute_center_on_scroll_position(
        start: ScrollPosition,
        cell: CellSpan,
        bounds: &ScrollBounds,
    ) -> ScrollPosition {
        if bounds.is_degenerate() {
            return start;
        }
        let axes = CellAxes::new(cell, bounds);
        let vertical = center_axis(
            u128::from(bounds.viewport_height),
            axes.vertical.0,
            axes.vertical.1,
        );
        let horizontal = center_axis(
            u128::from(bounds.viewport_width),
            axes.horizontal.0,
            axes.horizontal.1,
        );
        from_pixels(vertical, horizontal, bounds)
    }
}
