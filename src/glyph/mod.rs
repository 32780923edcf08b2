//! Filet crochet glyphs: binary stitch grids for individual digits.
//!
//! A [`GlyphGrid`] is a rectangular matrix of [`Cell`]s. SOLID cells are
//! filled blocks of treble stitches, OPEN cells are the chain-space mesh
//! between them.
//!
//! ## Components
//!
//! - [`catalog`]: the ten built-in 5×7 digit glyphs
//! - [`registry`]: digit → glyph resolution with custom-set overrides and fallbacks

pub mod catalog;
pub mod registry;

pub use registry::{GlyphRegistry, GlyphSet};

use serde::{Deserialize, Serialize};

use crate::error::GlyphError;

/// Text character for a SOLID cell.
pub const SOLID_CHAR: char = '█';
/// Text character for an OPEN cell.
pub const OPEN_CHAR: char = '░';

/// Binary state of one chart cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// A filled block of stitches.
    Solid,
    /// An open mesh space.
    #[default]
    Open,
}

impl Cell {
    /// Parse one text character. `'█'` and `'#'` are SOLID, anything else is OPEN.
    pub fn from_char(c: char) -> Self {
        match c {
            SOLID_CHAR | '#' => Cell::Solid,
            _ => Cell::Open,
        }
    }

    /// The `'█'`/`'░'` character for this cell.
    pub fn to_char(self) -> char {
        match self {
            Cell::Solid => SOLID_CHAR,
            Cell::Open => OPEN_CHAR,
        }
    }

    pub fn is_solid(self) -> bool {
        self == Cell::Solid
    }
}

/// Immutable rectangular grid of cells, stored row-major.
///
/// Invariant: `width >= 1`, `height >= 1`, `cells.len() == width * height`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct GlyphGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl GlyphGrid {
    /// Build a grid from rows of cells. Rows must be non-empty and of equal length.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, GlyphError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(GlyphError::EmptyGrid);
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row, cols) in rows.into_iter().enumerate() {
            if cols.len() != width {
                return Err(GlyphError::RaggedRows {
                    row,
                    expected: width,
                    actual: cols.len(),
                });
            }
            cells.extend(cols);
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Parse rows of text art (see [`Cell::from_char`]).
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self, GlyphError> {
        Self::from_rows(
            rows.iter()
                .map(|r| r.as_ref().chars().map(Cell::from_char).collect())
                .collect(),
        )
    }

    /// Build a grid from a flat row-major cell buffer.
    pub fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self, GlyphError> {
        if width == 0 || height == 0 {
            return Err(GlyphError::EmptyGrid);
        }
        if cells.len() != width * height {
            return Err(GlyphError::DimensionMismatch {
                declared_width: width,
                declared_height: height,
                actual_width: cells.len() / height,
                actual_height: height,
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Fixed `W`×`H` grid from text art. Short rows read as OPEN past their
    /// end; characters beyond column `W` are ignored.
    pub(crate) fn from_art<const W: usize, const H: usize>(art: &[&str; H]) -> Self {
        const { assert!(W > 0 && H > 0) };
        let mut cells = Vec::with_capacity(W * H);
        for row in art {
            let mut padded = [Cell::Open; W];
            for (slot, c) in padded.iter_mut().zip(row.chars()) {
                *slot = Cell::from_char(c);
            }
            cells.extend(padded);
        }
        Self {
            width: W,
            height: H,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at `(row, col)`, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.height && col < self.width {
            Some(self.cells[row * self.width + col])
        } else {
            None
        }
    }

    /// Cell at `(row, col)`, reading OPEN outside the grid.
    pub fn cell_or_open(&self, row: usize, col: usize) -> Cell {
        self.get(row, col).unwrap_or(Cell::Open)
    }

    /// Iterate rows as cell slices.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Number of SOLID cells.
    pub fn solid_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_solid()).count()
    }

    /// Rows rendered as `'█'`/`'░'` text.
    pub fn to_text_rows(&self) -> Vec<String> {
        self.rows()
            .map(|row| row.iter().map(|c| c.to_char()).collect())
            .collect()
    }
}

impl TryFrom<Vec<String>> for GlyphGrid {
    type Error = GlyphError;

    fn try_from(rows: Vec<String>) -> Result<Self, Self::Error> {
        Self::parse(&rows)
    }
}

impl From<GlyphGrid> for Vec<String> {
    fn from(grid: GlyphGrid) -> Self {
        grid.to_text_rows()
    }
}

impl std::fmt::Display for GlyphGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.to_text_rows().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{row}")?;
        }
        Ok(())
    }
}
