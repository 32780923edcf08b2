//! Built-in glyph catalog: one 5×7 filet chart per digit.
//!
//! These are the baseline shapes every chart falls back to. The table is
//! built once and shared; callers borrow grids from it.

use std::sync::OnceLock;

use super::GlyphGrid;

/// Width of every default glyph, in cells.
pub const DEFAULT_WIDTH: usize = 5;
/// Height of every default glyph, in cells.
pub const DEFAULT_HEIGHT: usize = 7;

/// Digit used when a character has no glyph of its own.
pub const FALLBACK_DIGIT: char = '0';

const DIGIT_ART: [[&str; DEFAULT_HEIGHT]; 10] = [
    // 0
    ["█████", "█░░░█", "█░░░█", "█░░░█", "█░░░█", "█░░░█", "█████"],
    // 1
    ["░░█░░", "░██░░", "░░█░░", "░░█░░", "░░█░░", "░░█░░", "█████"],
    // 2
    ["█████", "░░░░█", "░░░░█", "█████", "█░░░░", "█░░░░", "█████"],
    // 3
    ["█████", "░░░░█", "░░░░█", "█████", "░░░░█", "░░░░█", "█████"],
    // 4
    ["█░░░█", "█░░░█", "█░░░█", "█████", "░░░░█", "░░░░█", "░░░░█"],
    // 5
    ["█████", "█░░░░", "█░░░░", "█████", "░░░░█", "░░░░█", "█████"],
    // 6
    ["█████", "█░░░░", "█░░░░", "█████", "█░░░█", "█░░░█", "█████"],
    // 7
    ["█████", "░░░░█", "░░░░█", "░░░█░", "░░█░░", "░█░░░", "█░░░░"],
    // 8
    ["█████", "█░░░█", "█░░░█", "█████", "█░░░█", "█░░░█", "█████"],
    // 9
    ["█████", "█░░░█", "█░░░█", "█████", "░░░░█", "░░░░█", "█████"],
];

static CATALOG: OnceLock<[GlyphGrid; 10]> = OnceLock::new();

fn build_catalog() -> [GlyphGrid; 10] {
    std::array::from_fn(|d| GlyphGrid::from_art::<DEFAULT_WIDTH, DEFAULT_HEIGHT>(&DIGIT_ART[d]))
}

/// All ten default glyphs, indexed by digit value.
pub fn all_defaults() -> &'static [GlyphGrid; 10] {
    CATALOG.get_or_init(build_catalog)
}

/// Default glyph for `digit`, or `None` if it is not `'0'`–`'9'`.
pub fn default_glyph(digit: char) -> Option<&'static GlyphGrid> {
    let index = digit.to_digit(10)?;
    all_defaults().get(index as usize)
}

/// Default glyph for `digit`, falling back to the glyph for `'0'`.
pub fn default_or_fallback(digit: char) -> &'static GlyphGrid {
    default_glyph(digit).unwrap_or(&all_defaults()[0])
}

/// The digits `'0'`–`'9'` in order.
pub fn digits() -> impl Iterator<Item = char> {
    '0'..='9'
}
