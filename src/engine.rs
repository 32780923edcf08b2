//! Engine facade: top-level API for the filet pattern system.
//!
//! The `PatternEngine` owns the store, composer, renderer, and scorer, and
//! provides the operations callers use: generate a chart from digits, manage
//! custom glyphs, and search the image collection.

use std::sync::Arc;

use crate::compose::{ComposedPattern, PatternComposer};
use crate::config::EngineConfig;
use crate::error::FiletResult;
use crate::gauge::{Gauge, GaugeScaler};
use crate::glyph::catalog::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::glyph::{GlyphRegistry, GlyphSet};
use crate::id::EntryId;
use crate::render::{RenderConfig, VectorRenderer};
use crate::search::{RelevanceScorer, TaggedItem};
use crate::store::{GlyphEntry, MemStore, NewGlyphEntry, NewImage, PatternSet, PatternStore};

/// Tags shared by every generated chart, after the digit string itself.
const COMBINED_TAGS: [&str; 4] = ["combined", "filet", "crochet", "pattern"];

/// A generated chart and the image record stored for it.
#[derive(Debug, Clone)]
pub struct GeneratedPattern {
    pub image: TaggedItem,
    pub pattern: ComposedPattern,
}

/// The filet pattern engine.
pub struct PatternEngine {
    config: EngineConfig,
    store: Arc<dyn PatternStore>,
    composer: PatternComposer,
    renderer: VectorRenderer,
    scorer: RelevanceScorer,
}

impl PatternEngine {
    /// Create an engine over a fresh in-memory store.
    pub fn new(config: EngineConfig) -> FiletResult<Self> {
        Self::with_store(config, Arc::new(MemStore::new()))
    }

    /// Create an engine over `store`, registering the default glyphs (and
    /// sample images, if configured) into it.
    pub fn with_store(config: EngineConfig, store: Arc<dyn PatternStore>) -> FiletResult<Self> {
        config.validate()?;

        tracing::info!(
            cell_size = config.cell_size,
            baseline = config.baseline_gauge,
            search_limit = config.search_limit,
            "initializing filet pattern engine"
        );

        let engine = Self {
            composer: PatternComposer::new(
                GlyphRegistry::new(),
                GaugeScaler::new(config.baseline_gauge),
            ),
            renderer: VectorRenderer::new(RenderConfig::with_cell_size(config.cell_size)),
            scorer: RelevanceScorer::new(config.search_limit),
            store,
            config,
        };

        engine.seed_default_glyphs()?;
        if engine.config.seed_samples {
            engine.seed_sample_images()?;
        }
        Ok(engine)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn PatternStore> {
        &self.store
    }

    pub fn renderer(&self) -> &VectorRenderer {
        &self.renderer
    }

    /// Validate a user-supplied gauge against the configured maximum.
    pub fn gauge(&self, stitches_per_inch: f64, rows_per_inch: f64) -> FiletResult<Gauge> {
        Ok(Gauge::with_max(
            stitches_per_inch,
            rows_per_inch,
            self.config.max_gauge,
        )?)
    }

    // -----------------------------------------------------------------------
    // Pattern generation
    // -----------------------------------------------------------------------

    /// Compose a chart from `digits` using glyphs from `set`, without storing it.
    pub fn compose(
        &self,
        digits: &str,
        set: PatternSet,
        gauge: Option<&Gauge>,
    ) -> FiletResult<ComposedPattern> {
        let glyphs = self.store.glyph_set(set);
        self.compose_with(digits, Some(&glyphs), gauge)
    }

    /// Compose a chart from `digits` against an explicit glyph set snapshot.
    pub fn compose_with(
        &self,
        digits: &str,
        glyphs: Option<&GlyphSet>,
        gauge: Option<&Gauge>,
    ) -> FiletResult<ComposedPattern> {
        self.composer.compose(digits, glyphs, gauge)
    }

    /// Compose, render, and store a chart for `digits`.
    pub fn generate_pattern(
        &self,
        digits: &str,
        set: PatternSet,
        gauge: Option<&Gauge>,
    ) -> FiletResult<GeneratedPattern> {
        let pattern = self.compose(digits, set, gauge)?;
        let url = self.renderer.render(&pattern.grid);
        let source = &pattern.source_digits;

        let mut tags = Vec::with_capacity(1 + COMBINED_TAGS.len() + source.len());
        tags.push(source.clone());
        tags.extend(COMBINED_TAGS.iter().map(|t| t.to_string()));
        tags.extend(source.chars().map(String::from));

        let image = self.store.create_image(NewImage {
            url,
            alt: format!("Filet crochet pattern for \"{source}\""),
            tags,
        })?;

        tracing::info!(
            digits = %source,
            set = ?set,
            width = pattern.total_width,
            height = pattern.total_height,
            id = %image.id,
            "generated pattern"
        );

        Ok(GeneratedPattern { image, pattern })
    }

    // -----------------------------------------------------------------------
    // Glyph management
    // -----------------------------------------------------------------------

    /// Store a user-defined glyph. It always joins the custom set.
    pub fn create_custom_glyph(&self, mut entry: NewGlyphEntry) -> FiletResult<GlyphEntry> {
        entry.is_default = false;
        let stored = self.store.create_glyph(entry)?;
        tracing::info!(id = %stored.id, digit = %stored.digit, name = %stored.name, "created custom glyph");
        Ok(stored)
    }

    /// Delete a glyph entry. Returns whether it existed.
    pub fn delete_glyph(&self, id: EntryId) -> bool {
        self.store.delete_glyph(id)
    }

    pub fn get_glyph(&self, id: EntryId) -> Option<GlyphEntry> {
        self.store.get_glyph(id)
    }

    pub fn all_glyphs(&self) -> Vec<GlyphEntry> {
        self.store.all_glyphs()
    }

    pub fn glyphs_by_set(&self, set: PatternSet) -> Vec<GlyphEntry> {
        self.store.glyphs_by_set(set.is_default())
    }

    // -----------------------------------------------------------------------
    // Images and search
    // -----------------------------------------------------------------------

    pub fn get_image(&self, id: EntryId) -> Option<TaggedItem> {
        self.store.get_image(id)
    }

    pub fn all_images(&self) -> Vec<TaggedItem> {
        self.store.all_images()
    }

    /// Rank the image collection against `query`.
    pub fn search_images(&self, query: &str) -> Vec<TaggedItem> {
        let images = self.store.all_images();
        self.scorer
            .search(&images, query)
            .into_iter()
            .cloned()
            .collect()
    }

    // -----------------------------------------------------------------------
    // Seeding
    // -----------------------------------------------------------------------

    fn seed_default_glyphs(&self) -> FiletResult<()> {
        for (digit, grid) in self.composer.registry().defaults() {
            self.store.create_glyph(NewGlyphEntry {
                name: format!("Default {digit}"),
                description: Some(format!(
                    "Default filet crochet pattern for digit {digit}"
                )),
                digit: digit.to_string(),
                pattern: grid.clone(),
                width: DEFAULT_WIDTH,
                height: DEFAULT_HEIGHT,
                is_default: true,
            })?;
        }
        tracing::debug!("seeded default glyphs");
        Ok(())
    }

    fn seed_sample_images(&self) -> FiletResult<()> {
        for (digit, grid) in self.composer.registry().defaults() {
            self.store.create_image(NewImage {
                url: self.renderer.render(grid),
                alt: format!("Filet crochet pattern for digit {digit}"),
                tags: vec![
                    digit.to_string(),
                    format!("digit{digit}"),
                    "filet".into(),
                    "crochet".into(),
                    "pattern".into(),
                ],
            })?;
        }
        tracing::debug!("seeded sample images");
        Ok(())
    }
}

impl std::fmt::Debug for PatternEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternEngine")
            .field("config", &self.config)
            .field("glyphs", &self.store.all_glyphs().len())
            .field("images", &self.store.all_images().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FiletError, PatternError};
    use crate::glyph::{GlyphGrid, catalog};
    use crate::render::decode_data_uri;

    fn engine() -> PatternEngine {
        PatternEngine::new(EngineConfig::default()).unwrap()
    }

    fn custom(digit: &str, rows: &[&str]) -> NewGlyphEntry {
        let pattern = GlyphGrid::parse(rows).unwrap();
        NewGlyphEntry {
            name: format!("Custom {digit}"),
            description: None,
            digit: digit.into(),
            width: pattern.width(),
            height: pattern.height(),
            pattern,
            is_default: true,
        }
    }

    #[test]
    fn seeds_defaults_and_samples() {
        let e = engine();
        let defaults = e.glyphs_by_set(PatternSet::Default);
        assert_eq!(defaults.len(), 10);
        assert_eq!(defaults[3].name, "Default 3");
        assert_eq!(defaults[3].digit, '3');
        assert!(e.glyphs_by_set(PatternSet::Custom).is_empty());
        assert_eq!(e.all_images().len(), 10);
    }

    #[test]
    fn samples_can_be_disabled() {
        let e = PatternEngine::new(EngineConfig {
            seed_samples: false,
            ..Default::default()
        })
        .unwrap();
        assert!(e.all_images().is_empty());
        assert_eq!(e.all_glyphs().len(), 10);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let result = PatternEngine::new(EngineConfig {
            cell_size: 0,
            ..Default::default()
        });
        assert!(matches!(result, Err(FiletError::Config(_))));
    }

    #[test]
    fn generate_stores_tagged_image() {
        let e = engine();
        let generated = e.generate_pattern("4-2", PatternSet::Default, None).unwrap();
        assert_eq!(generated.pattern.source_digits, "42");
        assert_eq!(generated.image.alt, "Filet crochet pattern for \"42\"");
        assert_eq!(
            generated.image.tags,
            vec!["42", "combined", "filet", "crochet", "pattern", "4", "2"]
        );
        assert_eq!(e.get_image(generated.image.id), Some(generated.image.clone()));

        let svg = decode_data_uri(&generated.image.url).unwrap();
        assert!(svg.starts_with(r#"<svg width="220" height="140""#));
    }

    #[test]
    fn generate_rejects_empty_digits() {
        let e = engine();
        let before = e.all_images().len();
        let err = e.generate_pattern("no digits", PatternSet::Default, None).unwrap_err();
        assert!(matches!(
            err,
            FiletError::Pattern(PatternError::InvalidInput { .. })
        ));
        assert_eq!(e.all_images().len(), before);
    }

    #[test]
    fn custom_set_overrides_only_its_digits() {
        let e = engine();
        let created = e.create_custom_glyph(custom("1", &["#####"; 7])).unwrap();
        assert!(!created.is_default, "custom glyphs never join the default set");

        let p = e.compose("12", PatternSet::Custom, None).unwrap();
        assert_eq!(p.grid.get(0, 0), Some(crate::glyph::Cell::Solid));
        assert_eq!(p.grid.get(3, 0), Some(crate::glyph::Cell::Solid));
        let two = catalog::default_glyph('2').unwrap();
        for row in 0..7 {
            for col in 0..5 {
                assert_eq!(p.grid.get(row, 6 + col), two.get(row, col));
            }
        }

        // The default set is unaffected.
        let d = e.compose("1", PatternSet::Default, None).unwrap();
        assert_eq!(&d.grid, catalog::default_glyph('1').unwrap());
    }

    #[test]
    fn deleting_custom_glyph_restores_default() {
        let e = engine();
        let created = e.create_custom_glyph(custom("7", &["#"])).unwrap();
        assert!(e.delete_glyph(created.id));
        assert!(!e.delete_glyph(created.id));
        let p = e.compose("7", PatternSet::Custom, None).unwrap();
        assert_eq!(&p.grid, catalog::default_glyph('7').unwrap());
    }

    #[test]
    fn search_finds_generated_pattern() {
        let e = engine();
        e.generate_pattern("2024", PatternSet::Default, None).unwrap();
        let results = e.search_images("2024");
        assert_eq!(results[0].tags[0], "2024");
    }

    #[test]
    fn search_blank_query_returns_first_page() {
        let e = engine();
        let results = e.search_images("");
        assert_eq!(results.len(), 8);
        assert_eq!(results[0].tags[0], "0");
        assert_eq!(results[7].tags[0], "7");
    }

    #[test]
    fn gauge_uses_configured_maximum() {
        let e = PatternEngine::new(EngineConfig {
            max_gauge: 10.0,
            ..Default::default()
        })
        .unwrap();
        assert!(e.gauge(10.0, 4.0).is_ok());
        assert!(matches!(e.gauge(12.0, 4.0), Err(FiletError::Gauge(_))));
    }
}
