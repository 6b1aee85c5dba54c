//! Leaf value types shared by every layer of the engine.

use serde::Deserialize;

/// Numeric representation used for the code matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeType {
    Binary,
    Octal,
    Decimal,
    #[default]
    Hexadecimal,
}

/// Letter case for digits above 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigitCase {
    #[default]
    Upper,
    Lower,
}

impl CodeType {
    pub const ALL: [CodeType; 4] = [
        CodeType::Binary,
        CodeType::Octal,
        CodeType::Decimal,
        CodeType::Hexadecimal,
    ];

    pub const fn base(self) -> u32 {
        match self {
            CodeType::Binary => 2,
            CodeType::Octal => 8,
            CodeType::Decimal => 10,
            CodeType::Hexadecimal => 16,
        }
    }

    /// Number of digit cells one byte occupies in the code matrix.
    pub const fn max_digits_for_byte(self) -> usize {
        match self {
            CodeType::Binary => 8,
            CodeType::Octal => 3,
            CodeType::Decimal => 3,
            CodeType::Hexadecimal => 2,
        }
    }

    /// Value of `ch` as a digit of this code type, if it is one.
    pub fn digit_value(self, ch: char) -> Option<u8> {
        ch.to_digit(self.base()).map(|d| d as u8)
    }

    /// Append the zero-padded digits of `value` to `out`.
    pub fn write_digits(self, value: u8, case: DigitCase, out: &mut String) {
        let base = self.base();
        let digits = self.max_digits_for_byte();
        let mut weight = base.pow(digits as u32 - 1);
        let value = u32::from(value);
        for _ in 0..digits {
            let digit = (value / weight) % base;
            let ch = char::from_digit(digit, base).unwrap_or('?');
            out.push(match case {
                DigitCase::Upper => ch.to_ascii_uppercase(),
                DigitCase::Lower => ch,
            });
            weight /= base;
        }
    }

    /// Replace the digit at `code_offset` (0 = most significant) of `value`.
    ///
    /// Returns `None` when the result does not fit a byte (e.g. `9` typed into
    /// the hundreds digit of a decimal byte) or the offset/digit is invalid.
    pub fn set_digit(self, value: u8, code_offset: usize, digit: u8) -> Option<u8> {
        let base = self.base();
        let digits = self.max_digits_for_byte();
        if code_offset >= digits || u32::from(digit) >= base {
            return None;
        }
        let weight = base.pow((digits - 1 - code_offset) as u32);
        let value = u32::from(value);
        let current = (value / weight) % base;
        let updated = value - current * weight + u32::from(digit) * weight;
        u8::try_from(updated).ok()
    }
}

/// Which sections a row lays out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    CodeMatrix,
    TextPreview,
    #[default]
    Dual,
}

impl ViewMode {
    pub const fn has_code_matrix(self) -> bool {
        matches!(self, ViewMode::CodeMatrix | ViewMode::Dual)
    }

    pub const fn has_text_preview(self) -> bool {
        matches!(self, ViewMode::TextPreview | ViewMode::Dual)
    }

    /// Section a caret lands in when the mode is entered.
    pub const fn default_section(self) -> Section {
        match self {
            ViewMode::TextPreview => Section::TextPreview,
            ViewMode::CodeMatrix | ViewMode::Dual => Section::CodeMatrix,
        }
    }
}

/// Logical sub-area targeted by a caret or selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum Section {
    #[default]
    CodeMatrix,
    TextPreview,
}

impl Section {
    pub const fn toggled(self) -> Section {
        match self {
            Section::CodeMatrix => Section::TextPreview,
            Section::TextPreview => Section::CodeMatrix,
        }
    }
}

/// Horizontal gap following a character column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpaceType {
    #[default]
    None,
    Half,
    Single,
    Double,
}

impl SpaceType {
    /// Width in half character cells.
    pub const fn half_units(self) -> usize {
        match self {
            SpaceType::None => 0,
            SpaceType::Half => 1,
            SpaceType::Single => 2,
            SpaceType::Double => 4,
        }
    }

    /// Extra pixels this gap adds for the given character width.
    pub const fn pixel_width(self, character_width: u32) -> u32 {
        match self {
            SpaceType::None => 0,
            SpaceType::Half => character_width / 2,
            SpaceType::Single => character_width,
            SpaceType::Double => character_width * 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_counts_match_base() {
        for code_type in CodeType::ALL {
            let max = u32::from(u8::MAX);
            let digits = code_type.max_digits_for_byte() as u32;
            assert!(code_type.base().pow(digits) > max);
            assert!(code_type.base().pow(digits - 1) <= max);
        }
    }

    #[test]
    fn writes_padded_digits() {
        let mut out = String::new();
        CodeType::Hexadecimal.write_digits(0x0a, DigitCase::Upper, &mut out);
        CodeType::Binary.write_digits(5, DigitCase::Upper, &mut out);
        CodeType::Octal.write_digits(255, DigitCase::Upper, &mut out);
        CodeType::Decimal.write_digits(7, DigitCase::Upper, &mut out);
        CodeType::Hexadecimal.write_digits(0xbe, DigitCase::Lower, &mut out);
        assert_eq!(out, "0A00000101377007be");
    }

    #[test]
    fn set_digit_replaces_single_position() {
        assert_eq!(CodeType::Hexadecimal.set_digit(0x12, 0, 0xf), Some(0xf2));
        assert_eq!(CodeType::Hexadecimal.set_digit(0x12, 1, 0xf), Some(0x1f));
        assert_eq!(CodeType::Binary.set_digit(0, 7, 1), Some(1));
        assert_eq!(CodeType::Binary.set_digit(0, 0, 1), Some(0x80));
        assert_eq!(CodeType::Decimal.set_digit(55, 0, 2), Some(255));
        assert_eq!(CodeType::Decimal.set_digit(99, 0, 3), None);
        assert_eq!(CodeType::Octal.set_digit(0, 0, 4), None);
        assert_eq!(CodeType::Octal.set_digit(0, 3, 1), None);
        assert_eq!(CodeType::Hexadecimal.set_digit(0, 0, 16), None);
    }

    #[test]
    fn digit_value_respects_base() {
        assert_eq!(CodeType::Hexadecimal.digit_value('F'), Some(15));
        assert_eq!(CodeType::Hexadecimal.digit_value('g'), None);
        assert_eq!(CodeType::Octal.digit_value('8'), None);
        assert_eq!(CodeType::Binary.digit_value('1'), Some(1));
    }

    #[test]
    fn space_widths() {
        assert_eq!(SpaceType::Half.pixel_width(7), 3);
        assert_eq!(SpaceType::Double.pixel_width(7), 14);
        assert_eq!(SpaceType::Single.half_units(), 2);
    }
}
