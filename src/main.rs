//! filet CLI: filet crochet charts from digit strings.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use filet_grid::config::EngineConfig;
use filet_grid::engine::PatternEngine;
use filet_grid::glyph::GlyphRegistry;
use filet_grid::store::{PatternSet, load_glyph_file};

#[derive(Parser)]
#[command(name = "filet", version, about = "Filet crochet chart generator")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a chart from a digit string.
    Generate {
        /// Digits to chart. Other characters are ignored.
        digits: String,

        /// Your stitches per inch (baseline 4).
        #[arg(long, requires = "rows")]
        stitches: Option<f64>,

        /// Your rows per inch (baseline 4).
        #[arg(long, requires = "stitches")]
        rows: Option<f64>,

        /// JSON file of custom digit glyphs to compose with.
        #[arg(long)]
        custom: Option<PathBuf>,

        /// Pixels per cell, overriding the config.
        #[arg(long)]
        cell_size: Option<u32>,

        /// Write the SVG document here instead of printing a data URI.
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Print the chart as block text.
        #[arg(long)]
        preview: bool,
    },

    /// Search the sample charts by tag and description.
    Search {
        /// Free-text query. Empty lists the first page.
        query: Vec<String>,
    },

    /// Show the built-in digit glyphs.
    Glyphs {
        /// Show only this digit.
        digit: Option<char>,
    },

    /// Print the effective configuration as TOML.
    Config {
        /// Also write it to this path.
        #[arg(long)]
        write: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Commands::Generate {
            digits,
            stitches,
            rows,
            custom,
            cell_size,
            output,
            preview,
        } => {
            if let Some(size) = cell_size {
                config.cell_size = size;
            }
            config.seed_samples = false;
            let engine = PatternEngine::new(config)?;

            let gauge = match (stitches, rows) {
                (Some(s), Some(r)) => Some(engine.gauge(s, r)?),
                _ => None,
            };

            let set = match custom {
                Some(path) => {
                    for entry in load_glyph_file(&path)? {
                        engine.create_custom_glyph(entry)?;
                    }
                    PatternSet::Custom
                }
                None => PatternSet::Default,
            };

            let generated = engine.generate_pattern(&digits, set, gauge.as_ref())?;
            let pattern = &generated.pattern;

            if preview {
                eprintln!("{}", pattern.grid);
                eprintln!();
            }
            if let Some(g) = &gauge {
                let (h, v) = g.percent_of(engine.config().baseline_gauge);
                eprintln!(
                    "Gauge {}x{} per inch: {h}% horizontally, {v}% vertically (scale {}x{})",
                    g.stitches_per_inch(),
                    g.rows_per_inch(),
                    pattern.scale.x,
                    pattern.scale.y,
                );
            }
            eprintln!(
                "\"{}\": {} x {} cells",
                pattern.source_digits, pattern.total_width, pattern.total_height
            );

            match output {
                Some(path) => {
                    let svg = engine.renderer().render_svg(&pattern.grid);
                    std::fs::write(&path, svg).into_diagnostic()?;
                    eprintln!("Wrote {}", path.display());
                }
                None => println!("{}", generated.image.url),
            }
        }

        Commands::Search { query } => {
            let engine = PatternEngine::new(config)?;
            let query = query.join(" ");
            let results = engine.search_images(&query);
            if results.is_empty() {
                println!("No charts match \"{query}\".");
            }
            for item in &results {
                println!("  {:>3}. {} [{}]", item.id, item.alt, item.tags.join(", "));
            }
        }

        Commands::Glyphs { digit } => {
            let registry = GlyphRegistry::new();
            for (d, grid) in registry.defaults() {
                if digit.is_some_and(|want| want != d) {
                    continue;
                }
                println!("{d}:");
                for row in grid.to_text_rows() {
                    println!("  {row}");
                }
                println!();
            }
        }

        Commands::Config { write } => {
            config.validate()?;
            let text = toml::to_string_pretty(&config).into_diagnostic()?;
            print!("{text}");
            if let Some(path) = write {
                config.save(&path)?;
                eprintln!("Wrote {}", path.display());
            }
        }
    }

    Ok(())
}
