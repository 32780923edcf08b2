//! Digit → glyph resolution.
//!
//! A [`GlyphSet`] is an immutable snapshot of user-supplied overrides. The
//! [`GlyphRegistry`] resolves each digit against an optional preferred set,
//! then the built-in catalog, then the glyph for `'0'`. Resolution never fails.

use std::collections::HashMap;

use super::GlyphGrid;
use super::catalog;

/// Snapshot of custom glyphs keyed by digit. The first glyph inserted for a
/// digit is kept; later duplicates are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphSet {
    glyphs: HashMap<char, GlyphGrid>,
}

impl GlyphSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a glyph unless the digit already has one. Returns whether it was kept.
    pub fn insert(&mut self, digit: char, grid: GlyphGrid) -> bool {
        if self.glyphs.contains_key(&digit) {
            return false;
        }
        self.glyphs.insert(digit, grid);
        true
    }

    /// Glyph for `digit` in this set, if any.
    pub fn get(&self, digit: char) -> Option<&GlyphGrid> {
        self.glyphs.get(&digit)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl FromIterator<(char, GlyphGrid)> for GlyphSet {
    fn from_iter<I: IntoIterator<Item = (char, GlyphGrid)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (digit, grid) in iter {
            set.insert(digit, grid);
        }
        set
    }
}

/// Resolves digits to glyphs, holding the one canonical default table.
#[derive(Debug, Clone, Copy)]
pub struct GlyphRegistry {
    defaults: &'static [GlyphGrid],
}

impl GlyphRegistry {
    /// Registry backed by the built-in catalog.
    pub fn new() -> Self {
        Self {
            defaults: catalog::all_defaults(),
        }
    }

    /// Resolve `digit`: the preferred set first, then the default glyph,
    /// then the default glyph for `'0'`.
    pub fn resolve<'a>(&'a self, digit: char, preferred: Option<&'a GlyphSet>) -> &'a GlyphGrid {
        if let Some(grid) = preferred.and_then(|set| set.get(digit)) {
            return grid;
        }
        self.default_for(digit)
    }

    /// Default glyph for `digit`, falling back to `'0'` for anything else.
    pub fn default_for(&self, digit: char) -> &'static GlyphGrid {
        catalog::default_or_fallback(digit)
    }

    /// All default glyphs paired with their digit.
    pub fn defaults(&self) -> impl Iterator<Item = (char, &'static GlyphGrid)> {
        catalog::digits().zip(self.defaults.iter())
    }
}

impl Default for GlyphRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar() -> GlyphGrid {
        GlyphGrid::parse(&["#", "#", "#"]).unwrap()
    }

    #[test]
    fn resolves_defaults_without_set() {
        let reg = GlyphRegistry::new();
        for d in catalog::digits() {
            assert_eq!(reg.resolve(d, None), catalog::default_glyph(d).unwrap());
        }
    }

    #[test]
    fn preferred_set_overrides_default() {
        let reg = GlyphRegistry::new();
        let set: GlyphSet = [('1', bar())].into_iter().collect();
        assert_eq!(reg.resolve('1', Some(&set)), &bar());
        // Digits missing from the set still resolve to defaults.
        assert_eq!(reg.resolve('2', Some(&set)), catalog::default_glyph('2').unwrap());
    }

    #[test]
    fn unknown_character_falls_back_to_zero() {
        let reg = GlyphRegistry::new();
        let zero = catalog::default_glyph('0').unwrap();
        assert_eq!(reg.resolve('x', None), zero);
        assert_eq!(reg.resolve('-', Some(&GlyphSet::new())), zero);
    }

    #[test]
    fn first_insert_wins() {
        let mut set = GlyphSet::new();
        assert!(set.insert('4', bar()));
        assert!(!set.insert('4', GlyphGrid::parse(&["."]).unwrap()));
        assert_eq!(set.get('4'), Some(&bar()));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn defaults_pairs_every_digit() {
        let reg = GlyphRegistry::new();
        let pairs: Vec<_> = reg.defaults().collect();
        assert_eq!(pairs.len(), 10);
        assert_eq!(pairs[7].0, '7');
        assert_eq!(pairs[7].1, catalog::default_glyph('7').unwrap());
    }
}
