//! Character cell metrics derived from an externally measured font.
//!
//! Font measurement itself belongs to the host toolkit; it is reached through
//! [`FontMetricsProvider`]. Until a provider reports non-zero sizes the
//! metrics stay uninitialized and every dependent computation degrades to
//! zero counts.

/// Font measurement supplied by the host.
pub trait FontMetricsProvider {
    /// Advance width of one monospaced character cell in pixels.
    fn character_width(&self) -> u32;
    /// Full line height of the font in pixels.
    fn font_height(&self) -> u32;
    /// Distance from the top of the line to the baseline.
    fn ascent(&self) -> u32;
    /// Upper bound of bytes needed to decode one preview glyph for the
    /// active charset.
    fn max_bytes_per_char(&self) -> u32;
}

/// Terminal-style provider where one character cell is one unit square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonospaceCells {
    pub max_bytes_per_char: u32,
}

impl Default for MonospaceCells {
    fn default() -> Self {
        Self {
            max_bytes_per_char: 1,
        }
    }
}

impl FontMetricsProvider for MonospaceCells {
    fn character_width(&self) -> u32 {
        1
    }
    fn font_height(&self) -> u32 {
        1
    }
    fn ascent(&self) -> u32 {
        1
    }
    fn max_bytes_per_char(&self) -> u32 {
        self.max_bytes_per_char
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Metrics {
    character_width: u32,
    row_height: u32,
    font_height: u32,
    sub_font_space: u32,
    max_bytes_per_char: u32,
}

impl Metrics {
    pub fn new(character_width: u32, row_height: u32) -> Self {
        Self {
            character_width,
            row_height,
            font_height: row_height,
            sub_font_space: 0,
            max_bytes_per_char: 1,
        }
    }

    /// Re-measure from the provider (font or charset change).
    pub fn recompute(&mut self, provider: &impl FontMetricsProvider) {
        self.character_width = provider.character_width();
        self.font_height = provider.font_height();
        self.row_height = self.font_height;
        self.sub_font_space = self.font_height.saturating_sub(provider.ascent());
        self.max_bytes_per_char = provider.max_bytes_per_char().max(1);
        tracing::debug!(
            target: "layout.metrics",
            character_width = self.character_width,
            row_height = self.row_height,
            max_bytes_per_char = self.max_bytes_per_char,
            "metrics_recomputed"
        );
    }

    pub fn from_provider(provider: &impl FontMetricsProvider) -> Self {
        let mut metrics = Self::default();
        metrics.recompute(provider);
        metrics
    }

    pub fn is_initialized(&self) -> bool {
        self.character_width > 0 && self.row_height > 0
    }

    pub fn character_width(&self) -> u32 {
        self.character_width
    }

    pub fn row_height(&self) -> u32 {
        self.row_height
    }

    pub fn font_height(&self) -> u32 {
        self.font_height
    }

    pub fn sub_font_space(&self) -> u32 {
        self.sub_font_space
    }

    pub fn max_bytes_per_char(&self) -> u32 {
        self.max_bytes_per_char
    }

    pub fn half_space_width(&self) -> u32 {
        self.character_width / 2
    }
}
