//! Viewport geometry.
//!
//! Splits the component rectangle into the areas the engine reasons about:
//!
//! ```text
//! +--------------+-----------------------------+---+
//! | top-left     | header                      |   |
//! +--------------+-----------------------------+---+
//! | row          | data view (main area)       | v |
//! | positions    |                             |   |
//! +--------------+-----------------------------+---+
//! | bottom-left  | horizontal scrollbar        | c |
//! +--------------+-----------------------------+---+
//! ```
//!
//! All values are pixels. With uninitialized metrics every derived count is
//! zero and every area except the component itself is empty.

use crate::metrics::Metrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        let (x, y) = (i64::from(x), i64::from(y));
        x >= i64::from(self.x) && x < self.right() && y >= i64::from(self.y) && y < self.bottom()
    }
}

/// Geometric classification of a point relative to the component areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    TopLeftCorner,
    Header,
    RowPositions,
    CodeArea,
    VerticalScrollbar,
    HorizontalScrollbar,
    ScrollbarCorner,
    BottomLeftCorner,
}

fn to_coord(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dimensions {
    character_width: u32,
    row_height: u32,
    component: Rect,
    header_area: Rect,
    row_positions_area: Rect,
    scroll_panel: Rect,
    data_view: Rect,
    vertical_scrollbar: Rect,
    horizontal_scrollbar: Rect,
    rows_per_page: usize,
    characters_per_page: usize,
    rows_per_rect: usize,
    characters_per_rect: usize,
    last_row_offset: u32,
    last_char_offset: u32,
}

impl Dimensions {
    /// Recompute every area and page count.
    ///
    /// `row_position_length` is the number of digits of the row position
    /// gutter; 0 hides the gutter.
    #[allow(clippy::too_many_arguments)]
    pub fn recompute_sizes(
        &mut self,
        metrics: &Metrics,
        component_x: i32,
        component_y: i32,
        width: u32,
        height: u32,
        row_position_length: usize,
        vertical_scrollbar_size: u32,
        horizontal_scrollbar_size: u32,
    ) {
        let component = Rect::new(component_x, component_y, width, height);
        if !metrics.is_initialized() {
            *self = Dimensions {
                component,
                ..Dimensions::default()
            };
            return;
        }
        let character_width = metrics.character_width();
        let row_height = metrics.row_height();

        let gutter_width = if row_position_length == 0 {
            0
        } else {
            let digits = u32::try_from(row_position_length).unwrap_or(u32::MAX);
            character_width.saturating_mul(digits.saturating_add(1))
        }
        .min(width);
        let header_height = row_height.min(height);

        let inner_x = to_coord(i64::from(component_x) + i64::from(gutter_width));
        let inner_y = to_coord(i64::from(component_y) + i64::from(header_height));
        let inner_width = width - gutter_width;
        let inner_height = height - header_height;

        let header_area = Rect::new(inner_x, component_y, inner_width, header_height);
        let row_positions_area = Rect::new(component_x, inner_y, gutter_width, inner_height);
        let scroll_panel = Rect::new(inner_x, inner_y, inner_width, inner_height);

        let vertical_scrollbar_size = vertical_scrollbar_size.min(inner_width);
        let horizontal_scrollbar_size = horizontal_scrollbar_size.min(inner_height);
        let data_view = Rect::new(
            inner_x,
            inner_y,
            inner_width - vertical_scrollbar_size,
            inner_height - horizontal_scrollbar_size,
        );
        let vertical_scrollbar = Rect::new(
            to_coord(data_view.right()),
            inner_y,
            vertical_scrollbar_size,
            data_view.height,
        );
        let horizontal_scrollbar = Rect::new(
            inner_x,
            to_coord(data_view.bottom()),
            data_view.width,
            horizontal_scrollbar_size,
        );

        let rows_per_page = (data_view.height / row_height) as usize;
        let last_row_offset = data_view.height % row_height;
        let characters_per_page = (data_view.width / character_width) as usize;
        let last_char_offset = data_view.width % character_width;

        *self = Dimensions {
            character_width,
            row_height,
            component,
            header_area,
            row_positions_area,
            scroll_panel,
            data_view,
            vertical_scrollbar,
            horizontal_scrollbar,
            rows_per_page,
            characters_per_page,
            rows_per_rect: rows_per_page + usize::from(last_row_offset > 0),
            characters_per_rect: characters_per_page + usize::from(last_char_offset > 0),
            last_row_offset,
            last_char_offset,
        };
    }

    pub fn get_position_zone(&self, x: i32, y: i32) -> Zone {
        let (x, y) = (i64::from(x), i64::from(y));
        let in_gutter = x < i64::from(self.scroll_panel.x);
        let in_header = y < i64::from(self.scroll_panel.y);
        let below_data = y >= self.data_view.bottom();
        let right_of_data = x >= self.data_view.right();
        if in_gutter {
            if in_header {
                Zone::TopLeftCorner
            } else if below_data && !self.horizontal_scrollbar.is_empty() {
                Zone::BottomLeftCorner
            } else {
                Zone::RowPositions
            }
        } else if in_header {
            Zone::Header
        } else if right_of_data && below_data {
            Zone::ScrollbarCorner
        } else if right_of_data {
            Zone::VerticalScrollbar
        } else if below_data {
            Zone::HorizontalScrollbar
        } else {
            Zone::CodeArea
        }
    }

    pub fn character_width(&self) -> u32 {
        self.character_width
    }

    pub fn row_height(&self) -> u32 {
        self.row_height
    }

    pub fn component(&self) -> Rect {
        self.component
    }

    pub fn header_area(&self) -> Rect {
        self.header_area
    }

    pub fn row_positions_area(&self) -> Rect {
        self.row_positions_area
    }

    pub fn scroll_panel(&self) -> Rect {
        self.scroll_panel
    }

    /// Main area where rows of the document are laid out.
    pub fn data_view(&self) -> Rect {
        self.data_view
    }

    pub fn vertical_scrollbar(&self) -> Rect {
        self.vertical_scrollbar
    }

    pub fn horizontal_scrollbar(&self) -> Rect {
        self.horizontal_scrollbar
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn characters_per_page(&self) -> usize {
        self.characters_per_page
    }

    /// Rows touched by the data view, counting a trailing partial row.
    pub fn rows_per_rect(&self) -> usize {
        self.rows_per_rect
    }

    pub fn characters_per_rect(&self) -> usize {
        self.characters_per_rect
    }

    pub fn last_row_offset(&self) -> u32 {
        self.last_row_offset
    }

    pub fn last_char_offset(&self) -> u32 {
        self.last_char_offset
    }
}
