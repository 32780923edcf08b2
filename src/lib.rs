//! # filet-grid
//!
//! Turns short digit strings into filet crochet charts: binary grids of
//! solid blocks and open mesh, scaled to the crocheter's gauge and rendered
//! as self-contained SVG data URIs. A small tag/text scorer ranks the stored
//! charts for search.
//!
//! ## Architecture
//!
//! - **Glyphs** (`glyph`): 5×7 default digit grids and custom-set resolution
//! - **Gauge** (`gauge`): stitches/rows per inch → integer scale factors
//! - **Composition** (`compose`): digits → one combined, scaled grid
//! - **Rendering** (`render`): grid → SVG → base64 data URI
//! - **Search** (`search`): tiered tag/alt-text relevance ranking
//! - **Storage** (`store`): keyed glyph entries and images (in-memory DashMap)
//!
//! ## Library usage
//!
//! ```no_run
//! use filet_grid::engine::PatternEngine;
//! use filet_grid::config::EngineConfig;
//! use filet_grid::store::PatternSet;
//!
//! let engine = PatternEngine::new(EngineConfig::default()).unwrap();
//! let gauge = engine.gauge(8.0, 8.0).unwrap();
//! let generated = engine
//!     .generate_pattern("19", PatternSet::Default, Some(&gauge))
//!     .unwrap();
//! assert_eq!(generated.pattern.total_width, 22);
//! println!("{}", generated.image.url);
//! ```

pub mod compose;
pub mod config;
pub mod engine;
pub mod error;
pub mod gauge;
pub mod glyph;
pub mod id;
pub mod render;
pub mod search;
pub mod store;
