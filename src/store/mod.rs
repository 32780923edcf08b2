//! Keyed storage for glyph entries and tagged images.
//!
//! The engine only depends on the [`PatternStore`] trait; [`MemStore`] is the
//! in-memory implementation. Entries are partitioned into two sets by their
//! `is_default` flag: the built-in default set and one custom set.

pub mod mem;

pub use mem::MemStore;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FiletResult, GlyphError, StoreError};
use crate::glyph::{GlyphGrid, GlyphSet};
use crate::id::EntryId;
use crate::search::TaggedItem;

/// Which partition of glyph entries to compose with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternSet {
    /// Entries flagged `is_default`.
    #[default]
    Default,
    /// All user-created entries.
    Custom,
}

impl PatternSet {
    pub fn is_default(self) -> bool {
        self == PatternSet::Default
    }
}

/// A stored glyph for one digit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphEntry {
    pub id: EntryId,
    pub name: String,
    pub description: Option<String>,
    pub digit: char,
    pub pattern: GlyphGrid,
    pub width: usize,
    pub height: usize,
    pub is_default: bool,
}

/// Request to create a glyph entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGlyphEntry {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub digit: String,
    pub pattern: GlyphGrid,
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub is_default: bool,
}

impl NewGlyphEntry {
    /// Check the name, digit, and declared dimensions; returns the parsed digit.
    pub fn validate(&self) -> FiletResult<char> {
        if self.name.trim().is_empty() {
            return Err(StoreError::EmptyName.into());
        }

        let mut chars = self.digit.chars();
        let digit = match (chars.next(), chars.next()) {
            (Some(d), None) if d.is_ascii_digit() => d,
            _ => {
                return Err(GlyphError::InvalidDigit {
                    digit: self.digit.clone(),
                }
                .into());
            }
        };

        if self.pattern.width() != self.width || self.pattern.height() != self.height {
            return Err(GlyphError::DimensionMismatch {
                declared_width: self.width,
                declared_height: self.height,
                actual_width: self.pattern.width(),
                actual_height: self.pattern.height(),
            }
            .into());
        }

        Ok(digit)
    }
}

/// Request to store an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewImage {
    pub url: String,
    pub alt: String,
    pub tags: Vec<String>,
}

/// Read a JSON array of [`NewGlyphEntry`] values from `path`.
pub fn load_glyph_file(path: &Path) -> FiletResult<Vec<NewGlyphEntry>> {
    let content = std::fs::read_to_string(path).map_err(|e| StoreError::Read {
        path: path.display().to_string(),
        source: e,
    })?;
    let entries = serde_json::from_str(&content).map_err(|e| StoreError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(entries)
}

/// Storage collaborator for glyph entries and images.
///
/// Listing methods return entries in identity order.
pub trait PatternStore: Send + Sync + std::fmt::Debug {
    fn create_glyph(&self, entry: NewGlyphEntry) -> FiletResult<GlyphEntry>;
    fn get_glyph(&self, id: EntryId) -> Option<GlyphEntry>;
    fn all_glyphs(&self) -> Vec<GlyphEntry>;
    /// Delete an entry. Returns whether it existed.
    fn delete_glyph(&self, id: EntryId) -> bool;

    fn create_image(&self, image: NewImage) -> FiletResult<TaggedItem>;
    fn get_image(&self, id: EntryId) -> Option<TaggedItem>;
    fn all_images(&self) -> Vec<TaggedItem>;

    /// Entries whose `is_default` flag equals `is_default`.
    fn glyphs_by_set(&self, is_default: bool) -> Vec<GlyphEntry> {
        self.all_glyphs()
            .into_iter()
            .filter(|e| e.is_default == is_default)
            .collect()
    }

    /// Snapshot of one partition as a [`GlyphSet`]; the lowest id per digit wins.
    fn glyph_set(&self, set: PatternSet) -> GlyphSet {
        self.glyphs_by_set(set.is_default())
            .into_iter()
            .map(|e| (e.digit, e.pattern))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_entry(digit: &str, rows: &[&str], width: usize, height: usize) -> NewGlyphEntry {
        NewGlyphEntry {
            name: "Bold".into(),
            description: None,
            digit: digit.into(),
            pattern: GlyphGrid::parse(rows).unwrap(),
            width,
            height,
            is_default: false,
        }
    }

    #[test]
    fn valid_entry_yields_digit() {
        let e = new_entry("3", &["##", "##", "##"], 2, 3);
        assert_eq!(e.validate().unwrap(), '3');
    }

    #[test]
    fn rejects_bad_digits() {
        for digit in ["", "12", "a", "٣"] {
            let e = new_entry(digit, &["#"], 1, 1);
            assert!(e.validate().is_err(), "digit {digit:?} accepted");
        }
    }

    #[test]
    fn rejects_blank_name() {
        let mut e = new_entry("1", &["#"], 1, 1);
        e.name = "   ".into();
        assert!(matches!(
            e.validate(),
            Err(crate::error::FiletError::Store(StoreError::EmptyName))
        ));
    }

    #[test]
    fn rejects_dimension_mismatch() {
        let e = new_entry("1", &["##", "##"], 5, 7);
        assert!(matches!(
            e.validate(),
            Err(crate::error::FiletError::Glyph(
                GlyphError::DimensionMismatch { .. }
            ))
        ));
    }

    #[test]
    fn new_entry_deserializes_from_json() {
        let json = r#"{
            "name": "Slim one",
            "digit": "1",
            "pattern": ["░█░", "██░", "░█░", "███"],
            "width": 3,
            "height": 4
        }"#;
        let e: NewGlyphEntry = serde_json::from_str(json).unwrap();
        assert!(!e.is_default);
        assert_eq!(e.description, None);
        assert_eq!(e.pattern.width(), 3);
        assert_eq!(e.validate().unwrap(), '1');
    }

    #[test]
    fn glyph_file_loads_entries() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("glyphs.json");
        std::fs::write(
            &path,
            r##"[{"name": "Dot", "digit": "0", "pattern": ["#"], "width": 1, "height": 1}]"##,
        )
        .unwrap();
        let entries = load_glyph_file(&path).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Dot");

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            load_glyph_file(&path),
            Err(crate::error::FiletError::Store(StoreError::Parse { .. }))
        ));
        assert!(load_glyph_file(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn pattern_set_serde_names() {
        assert_eq!(serde_json::to_string(&PatternSet::Custom).unwrap(), r#""custom""#);
        assert!(PatternSet::default().is_default());
    }
}
