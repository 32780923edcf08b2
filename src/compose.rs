//! Pattern composition: digit strings → one combined, gauge-scaled chart.
//!
//! Each digit is resolved to a glyph, the glyphs are laid side by side with
//! one OPEN spacing column between neighbours, and every cell is repeated
//! `scale.x` times horizontally and `scale.y` times vertically. Glyphs smaller
//! than the largest one read as OPEN beyond their edges. Composition is a pure
//! function of the digits, the glyph set snapshot, and the gauge.

use serde::Serialize;

use crate::error::{FiletResult, PatternError};
use crate::gauge::{Gauge, GaugeScaler, Scale};
use crate::glyph::{Cell, GlyphGrid, GlyphRegistry, GlyphSet};

/// Unscaled spacing columns between adjacent digits.
pub const SPACING_COLUMNS: usize = 1;

/// Result of one composition call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposedPattern {
    /// The combined chart.
    pub grid: GlyphGrid,
    /// Total width in cells (equals `grid.width()`).
    pub total_width: usize,
    /// Total height in cells (equals `grid.height()`).
    pub total_height: usize,
    /// Digits the chart was built from, after filtering.
    pub source_digits: String,
    /// Scale factors that were applied.
    pub scale: Scale,
}

/// Keep only the ASCII digits of `input`.
pub fn clean_digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Composes digit glyphs into a single chart.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternComposer {
    registry: GlyphRegistry,
    scaler: GaugeScaler,
}

impl PatternComposer {
    pub fn new(registry: GlyphRegistry, scaler: GaugeScaler) -> Self {
        Self { registry, scaler }
    }

    pub fn registry(&self) -> &GlyphRegistry {
        &self.registry
    }

    pub fn scaler(&self) -> &GaugeScaler {
        &self.scaler
    }

    /// Compose `digits` into one chart.
    ///
    /// Non-digit characters are dropped first; if nothing remains the call
    /// fails with [`PatternError::InvalidInput`]. Every other irregularity
    /// (missing custom glyph, glyphs of differing sizes) is absorbed.
    pub fn compose(
        &self,
        digits: &str,
        set: Option<&GlyphSet>,
        gauge: Option<&Gauge>,
    ) -> FiletResult<ComposedPattern> {
        let source_digits = clean_digits(digits);
        if source_digits.is_empty() {
            return Err(PatternError::InvalidInput {
                input: digits.to_string(),
            }
            .into());
        }

        let glyphs: Vec<&GlyphGrid> = source_digits
            .chars()
            .map(|d| self.registry.resolve(d, set))
            .collect();

        let base_height = glyphs.iter().map(|g| g.height()).max().unwrap_or(1);
        let base_width = glyphs.iter().map(|g| g.width()).max().unwrap_or(1);

        let scale = self.scaler.compute_scale(gauge);
        let layout = Layout::new(glyphs.len(), base_width, base_height, scale);

        let mut cells = Vec::with_capacity(layout.total_width * layout.total_height);
        for row in 0..layout.total_height {
            let src_row = row / scale.y;
            for (i, glyph) in glyphs.iter().enumerate() {
                cells.extend(
                    (0..layout.digit_width).map(|col| glyph.cell_or_open(src_row, col / scale.x)),
                );
                if i + 1 < glyphs.len() {
                    cells.extend(std::iter::repeat_n(Cell::Open, layout.spacing));
                }
            }
        }

        let grid = GlyphGrid::from_cells(layout.total_width, layout.total_height, cells)?;

        tracing::debug!(
            digits = %source_digits,
            scale_x = scale.x,
            scale_y = scale.y,
            width = layout.total_width,
            height = layout.total_height,
            "composed pattern"
        );

        Ok(ComposedPattern {
            grid,
            total_width: layout.total_width,
            total_height: layout.total_height,
            source_digits,
            scale,
        })
    }
}

/// Output dimensions for `n` digits at a given scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    digit_width: usize,
    spacing: usize,
    total_width: usize,
    total_height: usize,
}

impl Layout {
    fn new(n: usize, base_width: usize, base_height: usize, scale: Scale) -> Self {
        let digit_width = base_width * scale.x;
        let spacing = SPACING_COLUMNS * scale.x;
        Self {
            digit_width,
            spacing,
            total_width: n * digit_width + n.saturating_sub(1) * spacing,
            total_height: base_height * scale.y,
        }
    }
}
