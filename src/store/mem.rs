//! In-memory store backed by DashMap.
//!
//! Glyph entries and images live in sharded concurrent maps; identities come
//! from an injected [`IdGenerator`]. All data is lost on process exit.

use std::sync::Arc;

use dashmap::DashMap;

use super::{GlyphEntry, NewGlyphEntry, NewImage, PatternStore};
use crate::error::FiletResult;
use crate::id::{AtomicIdAllocator, EntryId, IdGenerator};
use crate::search::TaggedItem;

/// Concurrent in-memory pattern store.
#[derive(Debug)]
pub struct MemStore {
    glyphs: DashMap<EntryId, GlyphEntry>,
    images: DashMap<EntryId, TaggedItem>,
    ids: Arc<dyn IdGenerator>,
}

impl MemStore {
    /// Empty store with its own sequential allocator.
    pub fn new() -> Self {
        Self::with_ids(Arc::new(AtomicIdAllocator::new()))
    }

    /// Empty store drawing identities from `ids`.
    pub fn with_ids(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            glyphs: DashMap::new(),
            images: DashMap::new(),
            ids,
        }
    }

    /// Number of glyph entries.
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Number of images.
    pub fn image_count(&self) -> usize {
        self.images.len()
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternStore for MemStore {
    fn create_glyph(&self, entry: NewGlyphEntry) -> FiletResult<GlyphEntry> {
        let digit = entry.validate()?;
        let id = self.ids.next_id()?;
        let stored = GlyphEntry {
            id,
            name: entry.name,
            description: entry.description,
            digit,
            pattern: entry.pattern,
            width: entry.width,
            height: entry.height,
            is_default: entry.is_default,
        };
        self.glyphs.insert(id, stored.clone());
        tracing::debug!(%id, %digit, is_default = stored.is_default, "stored glyph entry");
        Ok(stored)
    }

    fn get_glyph(&self, id: EntryId) -> Option<GlyphEntry> {
        self.glyphs.get(&id).map(|r| r.value().clone())
    }

    fn all_glyphs(&self) -> Vec<GlyphEntry> {
        let mut all: Vec<GlyphEntry> = self.glyphs.iter().map(|r| r.value().clone()).collect();
        all.sort_by_key(|e| e.id);
        all
    }

    fn delete_glyph(&self, id: EntryId) -> bool {
        let removed = self.glyphs.remove(&id).is_some();
        tracing::debug!(%id, removed, "delete glyph entry");
        removed
    }

    fn create_image(&self, image: NewImage) -> FiletResult<TaggedItem> {
        let id = self.ids.next_id()?;
        let item = TaggedItem {
            id,
            url: image.url,
            alt: image.alt,
            tags: image.tags,
        };
        self.images.insert(id, item.clone());
        Ok(item)
    }

    fn get_image(&self, id: EntryId) -> Option<TaggedItem> {
        self.images.get(&id).map(|r| r.value().clone())
    }

    fn all_images(&self) -> Vec<TaggedItem> {
        let mut all: Vec<TaggedItem> = self.images.iter().map(|r| r.value().clone()).collect();
        all.sort_by_key(|i| i.id);
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::GlyphGrid;
    use crate::store::PatternSet;

    fn entry(digit: &str, rows: &[&str], is_default: bool) -> NewGlyphEntry {
        let pattern = GlyphGrid::parse(rows).unwrap();
        NewGlyphEntry {
            name: format!("Glyph {digit}"),
            description: Some("test".into()),
            digit: digit.into(),
            width: pattern.width(),
            height: pattern.height(),
            pattern,
            is_default,
        }
    }

    #[test]
    fn create_assigns_sequential_ids() {
        let store = MemStore::new();
        let a = store.create_glyph(entry("1", &["#"], false)).unwrap();
        let b = store.create_glyph(entry("2", &["#"], false)).unwrap();
        assert_eq!(a.id.get(), 1);
        assert_eq!(b.id.get(), 2);
        assert_eq!(a.digit, '1');
        assert_eq!(store.get_glyph(a.id), Some(a));
    }

    #[test]
    fn invalid_entries_are_not_stored() {
        let store = MemStore::new();
        assert!(store.create_glyph(entry("x", &["#"], false)).is_err());
        assert_eq!(store.glyph_count(), 0);
    }

    #[test]
    fn delete_reports_found() {
        let store = MemStore::new();
        let a = store.create_glyph(entry("1", &["#"], false)).unwrap();
        assert!(store.delete_glyph(a.id));
        assert!(!store.delete_glyph(a.id));
        assert!(store.get_glyph(a.id).is_none());
    }

    #[test]
    fn list_by_set_partitions_on_flag() {
        let store = MemStore::new();
        store.create_glyph(entry("1", &["#"], true)).unwrap();
        store.create_glyph(entry("2", &["#"], false)).unwrap();
        store.create_glyph(entry("3", &["#"], false)).unwrap();
        assert_eq!(store.all_glyphs().len(), 3);
        assert_eq!(store.glyphs_by_set(true).len(), 1);
        let custom: Vec<char> = store.glyphs_by_set(false).iter().map(|e| e.digit).collect();
        assert_eq!(custom, vec!['2', '3']);
    }

    #[test]
    fn glyph_set_keeps_first_entry_per_digit() {
        let store = MemStore::new();
        store.create_glyph(entry("5", &["##"], false)).unwrap();
        store.create_glyph(entry("5", &["#."], false)).unwrap();
        let set = store.glyph_set(PatternSet::Custom);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get('5'), Some(&GlyphGrid::parse(&["##"]).unwrap()));
        assert!(store.glyph_set(PatternSet::Default).is_empty());
    }

    #[test]
    fn images_round_trip() {
        let store = MemStore::new();
        let img = store
            .create_image(NewImage {
                url: "data:x".into(),
                alt: "alt".into(),
                tags: vec!["a".into()],
            })
            .unwrap();
        assert_eq!(store.get_image(img.id), Some(img.clone()));
        assert_eq!(store.all_images(), vec![img]);
        assert_eq!(store.image_count(), 1);
    }

    #[test]
    fn shared_generator_spans_stores() {
        let ids: Arc<dyn IdGenerator> = Arc::new(AtomicIdAllocator::starting_from(50));
        let a = MemStore::with_ids(Arc::clone(&ids));
        let b = MemStore::with_ids(ids);
        let x = a.create_glyph(entry("1", &["#"], false)).unwrap();
        let y = b.create_glyph(entry("1", &["#"], false)).unwrap();
        assert_eq!((x.id.get(), y.id.get()), (50, 51));
    }

    #[test]
    fn concurrent_creates_get_unique_ids() {
        let store = Arc::new(MemStore::new());
        let handles: Vec<_> = (0..10)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    let digit = char::from(b'0' + i as u8).to_string();
                    store.create_glyph(entry(&digit, &["#"], false)).unwrap().id
                })
            })
            .collect();
        let mut ids: Vec<EntryId> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 10);
        assert_eq!(store.glyph_count(), 10);
    }
}
