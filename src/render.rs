//! SVG rendering of glyph grids.
//!
//! Every cell becomes one `<rect>`: SOLID cells are filled black, OPEN cells
//! white, and all cells share a light-gray 1px stroke that draws the chart
//! mesh. The document has no external references, so its base64 data URI can
//! be used directly as an image source.

use std::fmt::Write as _;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use serde::{Deserialize, Serialize};

use crate::glyph::{Cell, GlyphGrid};

/// MIME type of rendered documents.
pub const SVG_MIME: &str = "image/svg+xml";

/// Default edge length of one cell, in pixels.
pub const DEFAULT_CELL_SIZE: u32 = 20;

/// Colors and sizing for rendered charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Edge length of one cell in pixels. Zero is treated as 1.
    pub cell_size: u32,
    pub solid_fill: String,
    pub open_fill: String,
    pub stroke: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            solid_fill: "#000000".into(),
            open_fill: "#ffffff".into(),
            stroke: "#cccccc".into(),
        }
    }
}

impl RenderConfig {
    /// Default colors at the given cell size.
    pub fn with_cell_size(cell_size: u32) -> Self {
        Self {
            cell_size,
            ..Default::default()
        }
    }
}

/// Serializes grids to SVG documents and data URIs.
#[derive(Debug, Clone, Default)]
pub struct VectorRenderer {
    config: RenderConfig,
}

impl VectorRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Pixel dimensions of the document for `grid`.
    pub fn dimensions(&self, grid: &GlyphGrid) -> (u64, u64) {
        let cell = u64::from(self.cell_size());
        (grid.width() as u64 * cell, grid.height() as u64 * cell)
    }

    /// Render `grid` as an SVG document.
    pub fn render_svg(&self, grid: &GlyphGrid) -> String {
        let cell = u64::from(self.cell_size());
        let (width, height) = self.dimensions(grid);

        // Each rect is roughly 100 bytes. Writes into a String are infallible.
        let mut svg = String::with_capacity(96 + grid.width() * grid.height() * 100);
        write!(
            svg,
            r#"<svg width="{width}" height="{height}" xmlns="http://www.w3.org/2000/svg">"#
        )
        .ok();
        for (row, cells) in grid.rows().enumerate() {
            let y = row as u64 * cell;
            for (col, c) in cells.iter().enumerate() {
                let x = col as u64 * cell;
                let fill = match c {
                    Cell::Solid => &self.config.solid_fill,
                    Cell::Open => &self.config.open_fill,
                };
                write!(
                    svg,
                    r#"<rect x="{x}" y="{y}" width="{cell}" height="{cell}" fill="{fill}" stroke="{stroke}" stroke-width="1"/>"#,
                    stroke = self.config.stroke,
                )
                .ok();
            }
        }
        svg.push_str("</svg>");
        svg
    }

    /// Render `grid` and wrap it as a `data:image/svg+xml;base64,` URI.
    pub fn render(&self, grid: &GlyphGrid) -> String {
        to_data_uri(&self.render_svg(grid))
    }

    fn cell_size(&self) -> u32 {
        self.config.cell_size.max(1)
    }
}

/// Base64-encode an SVG document as a data URI.
pub fn to_data_uri(svg: &str) -> String {
    format!("data:{SVG_MIME};base64,{}", B64.encode(svg.as_bytes()))
}

/// Decode a data URI produced by [`to_data_uri`]; `None` if it is not one.
pub fn decode_data_uri(uri: &str) -> Option<String> {
    let payload = uri.strip_prefix("data:image/svg+xml;base64,")?;
    let bytes = B64.decode(payload).ok()?;
    String::from_utf8(bytes).ok()
}
