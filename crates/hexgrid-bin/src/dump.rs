//! Plain-text rendering of one page of the grid.
//!
//! Output follows the navigator's geometry in character cells: every gap is
//! as many blanks as its pixel width at a character width of 1, and the text
//! preview starts at the same column the navigator hit-tests against.

use core_layout::{DigitCase, Structure, ViewMode};
use core_model::{ByteSource, Navigator};
use std::fmt::Write as _;
use std::io::{self, Write};

/// Writes pages line by line through reusable row scratch buffers.
#[derive(Debug)]
pub struct PageWriter {
    case: DigitCase,
    row: String,
    bytes: Vec<u8>,
}

impl PageWriter {
    pub fn new(case: DigitCase) -> Self {
        Self {
            case,
            row: String::new(),
            bytes: Vec::new(),
        }
    }

    /// Header line followed by every row of the current page that holds
    /// data, starting at the scroll position.
    pub fn write_page(
        &mut self,
        navigator: &Navigator,
        source: &impl ByteSource,
        out: &mut impl Write,
    ) -> io::Result<()> {
        let bytes_per_row = navigator.structure().bytes_per_row() as u64;
        let first_row = navigator.scroll_position().row_position;
        let rows = navigator.dimensions().rows_per_page().max(1) as u64;

        self.fill_header(navigator);
        writeln!(out, "{}", self.row.trim_end())?;
        for row in first_row..first_row.saturating_add(rows) {
            let start = row.saturating_mul(bytes_per_row);
            if start >= source.data_size() {
                break;
            }
            self.fill_row(navigator, source, start);
            writeln!(out, "{}", self.row.trim_end())?;
        }
        tracing::debug!(target: "runtime.dump", first_row, rows, "page_written");
        Ok(())
    }

    fn fill_header(&mut self, navigator: &Navigator) {
        let structure = navigator.structure();
        let case = self.case;
        self.row.clear();
        for _ in 0..=navigator.row_position_length() {
            self.row.push(' ');
        }
        let digits = structure.max_digits();
        let modulus = 16u64.pow(digits as u32);
        push_code_section(&mut self.row, structure, |byte_on_row, out| {
            let label = byte_on_row as u64 % modulus;
            let _ = match case {
                DigitCase::Upper => write!(out, "{label:>digits$X}"),
                DigitCase::Lower => write!(out, "{label:>digits$x}"),
            };
        });
    }

    fn fill_row(&mut self, navigator: &Navigator, source: &impl ByteSource, start: u64) {
        let structure = navigator.structure();
        let case = self.case;
        self.bytes.clear();
        self.bytes.resize(structure.bytes_per_row(), 0);
        let available = source.copy_to_slice(start, &mut self.bytes);
        let bytes = &self.bytes[..available];

        self.row.clear();
        let width = navigator.row_position_length();
        let _ = match case {
            DigitCase::Upper => write!(self.row, "{start:0width$X} "),
            DigitCase::Lower => write!(self.row, "{start:0width$x} "),
        };

        let code_type = structure.code_type();
        let digits = structure.max_digits();
        push_code_section(&mut self.row, structure, |byte_on_row, out| {
            match bytes.get(byte_on_row) {
                Some(&value) => code_type.write_digits(value, case, out),
                None => out.extend(std::iter::repeat_n(' ', digits)),
            }
        });

        if structure.view_mode().has_text_preview() {
            if structure.view_mode() == ViewMode::Dual {
                self.row.push(' ');
            }
            self.row.extend(bytes.iter().map(|&b| preview_char(b)));
        }
    }
}

/// Walk the code-section columns of one row. `push_byte` appends exactly
/// `max_digits` characters for the byte at the given index on the row.
fn push_code_section(
    out: &mut String,
    structure: &Structure,
    mut push_byte: impl FnMut(usize, &mut String),
) {
    if !structure.view_mode().has_code_matrix() {
        return;
    }
    let digits = structure.max_digits();
    let code_columns = structure.bytes_per_row() * digits;
    let columns = structure.profile().create_position_iterator(
        structure.code_type(),
        structure.view_mode(),
        structure.bytes_per_row(),
    );
    for (column, space) in columns.enumerate() {
        if column >= code_columns {
            out.push(' ');
        } else if column % digits == 0 {
            push_byte(column / digits, out);
        }
        for _ in 0..space.pixel_width(1) {
            out.push(' ');
        }
    }
}

/// Latin-1 glyph for `byte`; control characters show as `.`.
fn preview_char(byte: u8) -> char {
    let ch = char::from(byte);
    if ch.is_control() { '.' } else { ch }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_layout::{CodeType, Metrics, MonospaceCells};
    use core_model::{BytesPerRow, MemoryBuffer};
    use core_state::{ScrollPosition, ScrollbarVisibility};
    use pretty_assertions::assert_eq;

    /// Terminal-cell navigator, 80x4 cells: one header line and three rows.
    fn navigator(size: u64, bytes_per_row: usize) -> Navigator {
        let mut navigator = Navigator::new(size);
        navigator.set_scrollbar_visibility(ScrollbarVisibility::Never, ScrollbarVisibility::Never);
        navigator
            .set_bytes_per_row(BytesPerRow::Fixed(bytes_per_row))
            .unwrap();
        navigator.set_metrics(Metrics::from_provider(&MonospaceCells::default()));
        navigator.set_component_bounds(0, 0, 80, 4);
        navigator
    }

    fn render(navigator: &Navigator, buffer: &MemoryBuffer, case: DigitCase) -> Vec<String> {
        let mut out = Vec::new();
        PageWriter::new(case)
            .write_page(navigator, buffer, &mut out)
            .unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn dual_hex_page() {
        let buffer = MemoryBuffer::from(&b"ABCDEFGHIJ"[..]);
        let navigator = navigator(10, 4);
        let lines = render(&navigator, &buffer, DigitCase::Upper);
        assert_eq!(
            lines,
            vec![
                "   0  1  2  3".to_string(),
                "0 41 42 43 44    ABCD".to_string(),
                "4 45 46 47 48    EFGH".to_string(),
                format!("8 49 4A{}IJ", " ".repeat(10)),
            ]
        );
    }

    #[test]
    fn preview_column_matches_navigator_geometry() {
        let buffer = MemoryBuffer::from(&b"ABCD"[..]);
        let navigator = navigator(4, 4);
        let lines = render(&navigator, &buffer, DigitCase::Upper);
        let structure = navigator.structure();
        let gutter = navigator.row_position_length() + 1;
        let preview_x = structure.compute_pixel_position(structure.preview_char_pos(), 1) as usize;
        assert_eq!(lines[1].find('A'), Some(gutter + preview_x));
    }

    #[test]
    fn starts_at_scroll_position() {
        let buffer = MemoryBuffer::from((0u8..40).collect::<Vec<_>>());
        let mut navigator = navigator(40, 4);
        navigator.set_scroll_position(ScrollPosition::new(2, 0, 0, 0));
        let lines = render(&navigator, &buffer, DigitCase::Upper);
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("08 08 09 0A 0B"));
        assert!(lines[3].starts_with("10 10 11 12 13"));
    }

    #[test]
    fn lower_case_and_latin1_preview() {
        let buffer = MemoryBuffer::from(vec![0xAB, 0x00]);
        let navigator = navigator(2, 2);
        let lines = render(&navigator, &buffer, DigitCase::Lower);
        assert_eq!(lines[1], "0 ab 00    \u{ab}.");
    }

    #[test]
    fn binary_code_matrix_only() {
        let buffer = MemoryBuffer::from(vec![0xAB]);
        let mut navigator = navigator(1, 1);
        navigator.set_code_type(CodeType::Binary);
        navigator.set_view_mode(ViewMode::CodeMatrix);
        let lines = render(&navigator, &buffer, DigitCase::Upper);
        assert_eq!(lines, vec!["         0".to_string(), "0 10101011".to_string()]);
    }

    #[test]
    fn text_preview_only() {
        let buffer = MemoryBuffer::from(&b"ABCDE"[..]);
        let mut navigator = navigator(5, 4);
        navigator.set_view_mode(ViewMode::TextPreview);
        let lines = render(&navigator, &buffer, DigitCase::Upper);
        assert_eq!(lines[1..], ["0 ABCD".to_string(), "4 E".to_string()]);
    }

    #[test]
    fn empty_document_writes_header_only() {
        let buffer = MemoryBuffer::new();
        let navigator = navigator(0, 4);
        let lines = render(&navigator, &buffer, DigitCase::Upper);
        assert_eq!(lines.len(), 1);
    }
}
