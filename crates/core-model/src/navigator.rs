use core_layout::{
    CaretPosition, CodeType, Dimensions, FontMetricsProvider, LayoutError, LayoutProfile, Metrics,
    MovementDirection, PositionOverflowMode, Rect, Section, Structure, ViewMode,
    check_bytes_per_row,
};
use core_state::{
    Caret, CellSpan, PositionScrollVisibility, ScrollBounds, ScrollPosition, ScrollbarVisibility,
    Scrolling, ScrollingDirection, SelectionRange,
};
use tracing::{debug, info};

/// Upper bound for a configured row position length.
pub const MAX_ROW_POSITION_LENGTH: usize = 32;

/// Scrollbar thickness used until the host reports its own.
pub const DEFAULT_SCROLLBAR_SIZE: u32 = 1;

/// Row width policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BytesPerRow {
    Fixed(usize),
    /// Widest row that fits the data view, at least one byte.
    Auto,
}

impl Default for BytesPerRow {
    fn default() -> Self {
        BytesPerRow::Fixed(16)
    }
}

/// Number of hexadecimal digits needed to print `value` (at least 1).
pub fn hex_digit_count(value: u64) -> usize {
    (((64 - value.leading_zeros()) as usize).div_ceil(4)).max(1)
}

/// Composition root: owns the layout configuration and every piece of view
/// state, answers pixel/logical queries and commits state changes.
///
/// Computations take `&self` and return new values; the host commits them
/// through the `&mut self` methods. Every accepted configuration change or
/// resize recomputes structure, dimensions and scrollbars and clamps scroll,
/// caret and selection.
#[derive(Debug)]
pub struct Navigator {
    code_type: CodeType,
    view_mode: ViewMode,
    bytes_per_row: BytesPerRow,
    profile: LayoutProfile,
    row_position_length: usize,
    data_size: u64,
    metrics: Metrics,
    component: Rect,
    vertical_scrollbar_size: u32,
    horizontal_scrollbar_size: u32,
    structure: Structure,
    dimensions: Dimensions,
    scrolling: Scrolling,
    caret: Caret,
    selection: SelectionRange,
    selection_anchor: Option<CaretPosition>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Navigator {
    pub fn new(data_size: u64) -> Self {
        let mut navigator = Self {
            code_type: CodeType::default(),
            view_mode: ViewMode::default(),
            bytes_per_row: BytesPerRow::default(),
            profile: LayoutProfile::default(),
            row_position_length: 0,
            data_size,
            metrics: Metrics::default(),
            component: Rect::default(),
            vertical_scrollbar_size: DEFAULT_SCROLLBAR_SIZE,
            horizontal_scrollbar_size: DEFAULT_SCROLLBAR_SIZE,
            structure: Structure::default(),
            dimensions: Dimensions::default(),
            scrolling: Scrolling::default(),
            caret: Caret::default(),
            selection: SelectionRange::default(),
            selection_anchor: None,
        };
        navigator.caret.set_position(CaretPosition::origin(
            navigator.view_mode.default_section(),
        ));
        navigator.relayout();
        navigator
    }

    // ---- configuration ----

    pub fn code_type(&self) -> CodeType {
        self.code_type
    }

    pub fn set_code_type(&mut self, code_type: CodeType) {
        if self.code_type != code_type {
            self.code_type = code_type;
            info!(target: "model.navigator", ?code_type, "code_type_changed");
            self.relayout();
        }
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        if self.view_mode != view_mode {
            self.view_mode = view_mode;
            info!(target: "model.navigator", ?view_mode, "view_mode_changed");
            self.relayout();
        }
    }

    pub fn bytes_per_row(&self) -> BytesPerRow {
        self.bytes_per_row
    }

    pub fn set_bytes_per_row(&mut self, bytes_per_row: BytesPerRow) -> Result<(), LayoutError> {
        if let BytesPerRow::Fixed(n) = bytes_per_row {
            check_bytes_per_row(n)?;
        }
        self.bytes_per_row = bytes_per_row;
        info!(target: "model.navigator", ?bytes_per_row, "bytes_per_row_changed");
        self.relayout();
        Ok(())
    }

    pub fn layout_profile(&self) -> &LayoutProfile {
        &self.profile
    }

    pub fn set_layout_profile(&mut self, profile: LayoutProfile) {
        self.profile = profile;
        self.relayout();
    }

    /// Configured row position length; 0 means derived from the data size.
    pub fn configured_row_position_length(&self) -> usize {
        self.row_position_length
    }

    pub fn row_position_length(&self) -> usize {
        match self.row_position_length {
            0 => hex_digit_count(self.data_size),
            n => n,
        }
    }

    pub fn set_row_position_length(&mut self, length: usize) -> Result<(), LayoutError> {
        if length > MAX_ROW_POSITION_LENGTH {
            return Err(LayoutError::RowPositionLengthTooLarge {
                value: length,
                max: MAX_ROW_POSITION_LENGTH,
            });
        }
        self.row_position_length = length;
        self.relayout();
        Ok(())
    }

    pub fn set_scrollbar_visibility(
        &mut self,
        vertical: ScrollbarVisibility,
        horizontal: ScrollbarVisibility,
    ) {
        self.scrolling.set_visibility(vertical, horizontal);
        self.relayout();
    }

    pub fn set_scrollbar_sizes(&mut self, vertical: u32, horizontal: u32) {
        self.vertical_scrollbar_size = vertical;
        self.horizontal_scrollbar_size = horizontal;
        self.relayout();
    }

    // ---- metrics and geometry ----

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn set_metrics(&mut self, metrics: Metrics) {
        self.metrics = metrics;
        self.relayout();
    }

    pub fn recompute_metrics(&mut self, provider: &impl FontMetricsProvider) {
        self.metrics.recompute(provider);
        self.relayout();
    }

    pub fn set_component_bounds(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.component = Rect::new(x, y, width, height);
        self.relayout();
    }

    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    pub fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    pub fn scrolling(&self) -> &Scrolling {
        &self.scrolling
    }

    pub fn scroll_bounds(&self) -> ScrollBounds {
        ScrollBounds::from_layout(&self.structure, &self.dimensions)
    }

    fn effective_bytes_per_row(&self) -> usize {
        match self.bytes_per_row {
            BytesPerRow::Fixed(n) => n,
            BytesPerRow::Auto => Structure::compute_fitting_bytes_per_row(
                self.view_mode,
                self.code_type,
                &self.profile,
                u64::from(self.dimensions.data_view().width),
                self.metrics.character_width(),
            ),
        }
    }

    fn recompute_dimensions(&mut self) {
        let vertical = if self.scrolling.is_vertical_scrollbar_visible() {
            self.vertical_scrollbar_size
        } else {
            0
        };
        let horizontal = if self.scrolling.is_horizontal_scrollbar_visible() {
            self.horizontal_scrollbar_size
        } else {
            0
        };
        self.dimensions.recompute_sizes(
            &self.metrics,
            self.component.x,
            self.component.y,
            self.component.width,
            self.component.height,
            self.row_position_length(),
            vertical,
            horizontal,
        );
    }

    fn relayout(&mut self) {
        // Scrollbar visibility feeds back into the data view size; showing
        // one only ever shrinks the view so this settles within a few passes.
        for _ in 0..3 {
            self.recompute_dimensions();
            self.structure = Structure::compute_clamped(
                self.view_mode,
                self.code_type,
                self.profile,
                self.effective_bytes_per_row(),
                self.data_size,
            );
            if !self.scrolling.update_scrollbars(&self.scroll_bounds()) {
                break;
            }
        }
        let bounds = self.scroll_bounds();
        self.scrolling.clamp_to(&bounds);
        let caret = self.structure.clamp_caret(self.caret.position());
        if caret != self.caret.position() {
            self.caret.set_position(caret);
        }
        self.selection = self.selection.clamp_to(self.data_size);
        if let Some(anchor) = self.selection_anchor {
            self.selection_anchor = Some(self.structure.clamp_caret(anchor));
        }
        debug!(
            target: "model.navigator",
            bytes_per_row = self.structure.bytes_per_row(),
            rows_per_page = self.dimensions.rows_per_page(),
            characters_per_page = self.dimensions.characters_per_page(),
            "relayout"
        );
    }

    // ---- document lifecycle ----

    pub fn data_size(&self) -> u64 {
        self.data_size
    }

    /// New document: caret, selection and scroll return to the origin.
    pub fn replace_document(&mut self, data_size: u64) {
        self.data_size = data_size;
        self.caret
            .set_position(CaretPosition::origin(self.view_mode.default_section()));
        self.selection = SelectionRange::default();
        self.selection_anchor = None;
        self.scrolling.reset();
        info!(target: "model.navigator", data_size, "document_replaced");
        self.relayout();
    }

    /// Same document, different length (edit): state is clamped.
    pub fn notify_data_size_changed(&mut self, data_size: u64) {
        if self.data_size != data_size {
            self.data_size = data_size;
            self.relayout();
        }
    }

    // ---- caret and selection ----

    pub fn caret(&self) -> &Caret {
        &self.caret
    }

    pub fn caret_mut(&mut self) -> &mut Caret {
        &mut self.caret
    }

    pub fn caret_position(&self) -> CaretPosition {
        self.caret.position()
    }

    pub fn set_caret_position(&mut self, position: CaretPosition) {
        self.caret.set_position(self.structure.clamp_caret(position));
    }

    pub fn selection(&self) -> SelectionRange {
        self.selection
    }

    pub fn set_selection(&mut self, selection: SelectionRange) {
        self.selection = selection.clamp_to(self.data_size);
    }

    /// Caret where the current selecting gesture started.
    pub fn selection_anchor(&self) -> Option<CaretPosition> {
        self.selection_anchor
    }

    pub fn set_selection_anchor(&mut self, anchor: Option<CaretPosition>) {
        self.selection_anchor = anchor.map(|a| self.structure.clamp_caret(a));
    }

    pub fn clear_selection(&mut self) {
        self.selection = SelectionRange::empty_at(self.caret.position().data_position);
        self.selection_anchor = None;
    }

    pub fn compute_move_position(&self, direction: MovementDirection) -> CaretPosition {
        self.structure.compute_move_position(
            self.caret.position(),
            direction,
            self.dimensions.rows_per_page(),
        )
    }

    // ---- scrolling ----

    pub fn scroll_position(&self) -> ScrollPosition {
        self.scrolling.position()
    }

    pub fn set_scroll_position(&mut self, position: ScrollPosition) -> bool {
        let bounds = self.scroll_bounds();
        self.scrolling.set_position(position, &bounds)
    }

    pub fn scroll(&mut self, direction: ScrollingDirection) -> bool {
        let bounds = self.scroll_bounds();
        self.scrolling.scroll(direction, &bounds)
    }

    /// Pixel cell of `caret` within the unscrolled document.
    pub fn caret_cell(&self, caret: &CaretPosition) -> CellSpan {
        let character_width = self.metrics.character_width();
        let column = self.structure.caret_column(caret);
        CellSpan {
            row: caret.row(self.structure.bytes_per_row()),
            x: self.structure.compute_pixel_position(column, character_width),
            width: character_width,
        }
    }

    /// Caret cell in component coordinates, `None` when it lies too far
    /// outside the viewport to be addressed.
    pub fn caret_rect(&self, caret: &CaretPosition) -> Option<Rect> {
        if !self.metrics.is_initialized() {
            return None;
        }
        let cell = self.caret_cell(caret);
        let scroll = self.scrolling.position();
        let row_height = self.metrics.row_height();
        let view = self.dimensions.data_view();
        let y = u128::from(cell.row) * u128::from(row_height);
        let dy = i128::try_from(y).ok()? - i128::try_from(scroll.vertical_pixel(row_height)).ok()?;
        let dx = i128::from(cell.x)
            - i128::from(scroll.horizontal_pixel(self.metrics.character_width()));
        let x = i32::try_from(i128::from(view.x) + dx).ok()?;
        let y = i32::try_from(i128::from(view.y) + dy).ok()?;
        Some(Rect::new(x, y, cell.width, row_height))
    }

    pub fn position_scroll_visibility(&self, caret: &CaretPosition) -> PositionScrollVisibility {
        Scrolling::compute_position_scroll_visibility(
            self.scrolling.position(),
            self.caret_cell(caret),
            &self.scroll_bounds(),
        )
    }

    pub fn compute_reveal_scroll(&self, caret: &CaretPosition) -> ScrollPosition {
        Scrolling::compute_reveal_scroll_position(
            self.scrolling.position(),
            self.caret_cell(caret),
            &self.scroll_bounds(),
        )
    }

    pub fn compute_center_on_scroll(&self, caret: &CaretPosition) -> ScrollPosition {
        Scrolling::compute_center_on_scroll_position(
            self.scrolling.position(),
            self.caret_cell(caret),
            &self.scroll_bounds(),
        )
    }

    /// Scroll just enough to show the caret. Returns true if scrolled.
    pub fn reveal_caret(&mut self) -> bool {
        let target = self.compute_reveal_scroll(&self.caret.position());
        self.set_scroll_position(target)
    }

    pub fn center_on_caret(&mut self) -> bool {
        let target = self.compute_center_on_scroll(&self.caret.position());
        self.set_scroll_position(target)
    }

    // ---- pointer mapping ----

    /// Closest caret position for a pointer at component coordinates.
    ///
    /// Points left of the data view use the first visible column
    /// (`NoOverflow`) or the column before it (`Overflow`); column -1 is the
    /// end of the previous row. Points above the data view use the first
    /// visible row or the row before it, the same way.
    pub fn mouse_position_to_closest_caret_position(
        &self,
        x: i32,
        y: i32,
        overflow_mode: PositionOverflowMode,
    ) -> CaretPosition {
        if !self.metrics.is_initialized() {
            return self.structure.clamp_caret(CaretPosition::origin(
                self.view_mode.default_section(),
            ));
        }
        let character_width = self.metrics.character_width();
        let row_height = self.metrics.row_height();
        let view = self.dimensions.data_view();
        let scroll = self.scrolling.position();
        let overflow = i128::from(overflow_mode == PositionOverflowMode::Overflow);

        let scroll_x = scroll.horizontal_pixel(character_width);
        let rel_x = i64::from(x) - i64::from(view.x);
        let column: i128 = if rel_x < 0 {
            self.structure.compute_column_at_pixel(scroll_x, character_width) as i128 - overflow
        } else {
            let px = scroll_x.saturating_add(rel_x as u64);
            self.structure.compute_column_at_pixel(px, character_width) as i128
        };

        let scroll_y = scroll.vertical_pixel(row_height);
        let rel_y = i64::from(y) - i64::from(view.y);
        let row: i128 = if rel_y < 0 {
            i128::from(scroll.row_position) - overflow
        } else {
            let px = scroll_y + rel_y as u128;
            i128::try_from(px / u128::from(row_height)).unwrap_or(i128::MAX)
        };

        let bytes_per_row = self.structure.bytes_per_row() as i128;
        let default_section = self.view_mode.default_section();
        let candidate = if column < 0 {
            // end of the previous row
            let position = row.saturating_mul(bytes_per_row) - 1;
            CaretPosition::new(clamp_position(position), 0, default_section)
        } else {
            let (byte_on_row, code_offset, section) = self.column_to_byte(column as usize);
            let position = row
                .saturating_mul(bytes_per_row)
                .saturating_add(byte_on_row as i128);
            CaretPosition::new(clamp_position(position), code_offset, section)
        };
        self.structure.clamp_caret(candidate)
    }

    /// Map a row column to (byte on row, code offset, section); columns past
    /// the end of a section resolve to its last byte.
    fn column_to_byte(&self, column: usize) -> (usize, usize, Section) {
        let structure = &self.structure;
        let last_byte = structure.bytes_per_row() - 1;
        let digits = structure.max_digits();
        let in_code = match self.view_mode {
            ViewMode::CodeMatrix => true,
            ViewMode::TextPreview => false,
            ViewMode::Dual => column < structure.preview_char_pos(),
        };
        if in_code {
            let byte = structure.compute_position_byte(column);
            if byte > last_byte {
                (last_byte, digits - 1, Section::CodeMatrix)
            } else {
                let offset = column - structure.compute_first_code_character_pos(byte);
                (byte, offset, Section::CodeMatrix)
            }
        } else {
            let byte = (column - structure.preview_char_pos()).min(last_byte);
            (byte, 0, Section::TextPreview)
        }
    }
}

fn clamp_position(position: i128) -> u64 {
    u64::try_from(position.max(0)).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sized(data_size: u64) -> Navigator {
        let mut nav = Navigator::new(data_size);
        nav.set_scrollbar_visibility(ScrollbarVisibility::Never, ScrollbarVisibility::Never);
        nav.set_metrics(Metrics::new(10, 20));
        nav.set_component_bounds(0, 0, 800, 220);
        nav
    }

    #[test]
    fn hex_digit_counts() {
        assert_eq!(hex_digit_count(0), 1);
        assert_eq!(hex_digit_count(0xff), 2);
        assert_eq!(hex_digit_count(0x100), 3);
        assert_eq!(hex_digit_count(u64::MAX), 16);
    }

    #[test]
    fn automatic_row_position_length_follows_size() {
        let mut nav = sized(0x1234);
        assert_eq!(nav.row_position_length(), 4);
        // gutter = 10 * (4 + 1)
        assert_eq!(nav.dimensions().data_view().x, 50);
        nav.set_row_position_length(8).unwrap();
        assert_eq!(nav.dimensions().data_view().x, 90);
        assert!(nav.set_row_position_length(MAX_ROW_POSITION_LENGTH + 1).is_err());
        assert_eq!(nav.row_position_length(), 8);
    }

    #[test]
    fn rejected_bytes_per_row_keeps_previous() {
        let mut nav = sized(100);
        assert_eq!(
            nav.set_bytes_per_row(BytesPerRow::Fixed(0)),
            Err(LayoutError::ZeroBytesPerRow)
        );
        assert_eq!(nav.structure().bytes_per_row(), 16);
        nav.set_bytes_per_row(BytesPerRow::Fixed(8)).unwrap();
        assert_eq!(nav.structure().bytes_per_row(), 8);
    }

    #[test]
    fn auto_bytes_per_row_fits_view() {
        let mut nav = sized(1000);
        nav.set_bytes_per_row(BytesPerRow::Auto).unwrap();
        let width = u64::from(nav.dimensions().data_view().width);
        let s = nav.structure();
        assert!(s.row_pixel_width(10) <= width);
        let wider = Structure::compute(
            s.view_mode(),
            s.code_type(),
            *s.profile(),
            s.bytes_per_row() + 1,
            0,
        )
        .unwrap();
        assert!(wider.row_pixel_width(10) > width);
    }

    #[test]
    fn view_mode_change_moves_caret_section() {
        let mut nav = sized(100);
        nav.set_caret_position(CaretPosition::new(10, 1, Section::CodeMatrix));
        nav.set_view_mode(ViewMode::TextPreview);
        assert_eq!(nav.caret_position(), CaretPosition::new(10, 0, Section::TextPreview));
    }

    #[test]
    fn code_type_change_clamps_offset() {
        let mut nav = sized(100);
        nav.set_code_type(CodeType::Binary);
        nav.set_caret_position(CaretPosition::new(10, 6, Section::CodeMatrix));
        nav.set_code_type(CodeType::Hexadecimal);
        assert_eq!(nav.caret_position().code_offset, 1);
    }

    #[test]
    fn size_change_clamps_and_replace_resets() {
        let mut nav = sized(1000);
        nav.set_caret_position(CaretPosition::new(900, 1, Section::CodeMatrix));
        nav.set_selection(SelectionRange::new(800, 950));
        nav.reveal_caret();
        assert!(nav.scroll_position().row_position > 0);
        nav.notify_data_size_changed(100);
        assert_eq!(nav.caret_position(), CaretPosition::new(100, 0, Section::CodeMatrix));
        assert_eq!(nav.selection(), SelectionRange::new(100, 100));
        assert!(nav.scroll_position().row_position <= nav.scroll_bounds().max_row_position());
        nav.replace_document(5000);
        assert_eq!(nav.caret_position(), CaretPosition::origin(Section::CodeMatrix));
        assert_eq!(nav.scroll_position(), ScrollPosition::default());
        assert!(nav.selection().is_empty());
    }

    #[test]
    fn caret_rect_tracks_scroll() {
        let mut nav = sized(1000);
        let caret = CaretPosition::new(33, 0, Section::CodeMatrix);
        let rect = nav.caret_rect(&caret).unwrap();
        // row 2, byte 1 on row: column 2, one single gap before it
        assert_eq!(rect, Rect::new(40 + 30, 20 + 40, 10, 20));
        nav.scroll(ScrollingDirection::Down);
        assert_eq!(nav.caret_rect(&caret).unwrap().y, 40);
    }

    #[test]
    fn uninitialized_metrics_are_neutral() {
        let nav = Navigator::new(100);
        assert_eq!(nav.dimensions().rows_per_page(), 0);
        assert_eq!(nav.caret_rect(&nav.caret_position()), None);
        assert_eq!(
            nav.mouse_position_to_closest_caret_position(50, 50, PositionOverflowMode::Overflow),
            CaretPosition::origin(Section::CodeMatrix)
        );
    }
}
