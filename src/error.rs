//! Rich diagnostic error types for the filet pattern engine.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text so users know what went wrong and how to
//! fix it. Composition itself is permissive: unknown digits and missing glyphs
//! resolve through fallbacks, so the only composition failure is an input with
//! no digits at all.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the filet engine.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum FiletError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Gauge(#[from] GaugeError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Glyph(#[from] GlyphError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Pattern errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum PatternError {
    #[error("no valid digits in input: {input:?}")]
    #[diagnostic(
        code(filet::pattern::invalid_input),
        help(
            "Patterns are built from the digits 0-9 only. \
             Every other character is ignored, so the input must contain at least one digit."
        )
    )]
    InvalidInput { input: String },
}

// ---------------------------------------------------------------------------
// Gauge errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum GaugeError {
    #[error("{field} per inch must be in (0, {max}], got {value}")]
    #[diagnostic(
        code(filet::gauge::out_of_range),
        help(
            "Measure your gauge over a 4-inch swatch and divide by four. \
             Standard filet crochet is 4 stitches and 4 rows per inch."
        )
    )]
    OutOfRange {
        field: &'static str,
        value: f64,
        max: f64,
    },
}

// ---------------------------------------------------------------------------
// Glyph errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum GlyphError {
    #[error("glyph grid must have at least one row and one column")]
    #[diagnostic(
        code(filet::glyph::empty),
        help("Provide at least one non-empty row of cells.")
    )]
    EmptyGrid,

    #[error("glyph row {row} has {actual} cells, expected {expected}")]
    #[diagnostic(
        code(filet::glyph::ragged),
        help("Every row of a glyph must have the same number of cells.")
    )]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("invalid digit {digit:?}: expected a single character 0-9")]
    #[diagnostic(
        code(filet::glyph::invalid_digit),
        help("Custom glyphs can only be registered for the digits 0 through 9.")
    )]
    InvalidDigit { digit: String },

    #[error(
        "glyph is {actual_width}x{actual_height} but was declared as {declared_width}x{declared_height}"
    )]
    #[diagnostic(
        code(filet::glyph::dimension_mismatch),
        help("The declared width and height must match the grid's column and row counts.")
    )]
    DimensionMismatch {
        declared_width: usize,
        declared_height: usize,
        actual_width: usize,
        actual_height: usize,
    },
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("glyph entry name must not be empty")]
    #[diagnostic(
        code(filet::store::empty_name),
        help("Give the custom glyph a short descriptive name.")
    )]
    EmptyName,

    #[error("identity space exhausted: cannot allocate more than u64::MAX entries")]
    #[diagnostic(
        code(filet::store::ids_exhausted),
        help(
            "The entry ID space is exhausted. This requires 2^64 allocations; \
             check for ID allocation loops."
        )
    )]
    IdsExhausted,

    #[error("failed to read glyph file: {path}")]
    #[diagnostic(
        code(filet::store::read),
        help("Check that the file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse glyph file {path}: {message}")]
    #[diagnostic(
        code(filet::store::parse),
        help(
            "A glyph file is a JSON array of objects with `name`, `digit`, \
             `pattern` (rows of '█'/'░' text), `width` and `height`."
        )
    )]
    Parse { path: String, message: String },
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(filet::config::read),
        help("Ensure the config file exists and is valid TOML.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {path}")]
    #[diagnostic(
        code(filet::config::parse),
        help("Check the TOML syntax in the config file. {message}")
    )]
    Parse { path: String, message: String },

    #[error("failed to write config: {path}")]
    #[diagnostic(
        code(filet::config::write),
        help("Ensure you have write permissions to the config directory.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {message}")]
    #[diagnostic(
        code(filet::config::invalid),
        help("Check the EngineConfig fields. {message}")
    )]
    Invalid { message: String },
}

/// Convenience alias for functions returning filet results.
pub type FiletResult<T> = std::result::Result<T, FiletError>;
