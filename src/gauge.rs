//! Gauge: stitches and rows per inch, and the integer scale factors they imply.
//!
//! Charts are drawn at a standard baseline of 4 stitches and 4 rows per
//! inch. A tighter gauge repeats each cell so the finished piece keeps its
//! physical size: `scale = max(1, round(gauge / baseline))`. Ratios are
//! rounded half away from zero, which for positive gauges is round-half-up
//! (10 stitches per inch at baseline 4 gives 2.5, which scales by 3).

use serde::{Deserialize, Serialize};

use crate::error::GaugeError;

/// Standard filet crochet gauge, in stitches (and rows) per inch.
pub const BASELINE_PER_INCH: f64 = 4.0;

/// Largest stitches/rows per inch accepted by [`Gauge::new`].
pub const MAX_PER_INCH: f64 = 20.0;

/// Upper bound on either scale factor, whatever the gauge.
pub const MAX_SCALE: usize = 64;

/// A crocheter's measured gauge.
///
/// Only constructible through validation; deserializing runs the same checks
/// as [`Gauge::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGauge")]
pub struct Gauge {
    stitches_per_inch: f64,
    rows_per_inch: f64,
}

/// Unchecked wire form of [`Gauge`].
#[derive(Deserialize)]
struct RawGauge {
    stitches_per_inch: f64,
    rows_per_inch: f64,
}

impl TryFrom<RawGauge> for Gauge {
    type Error = GaugeError;

    fn try_from(raw: RawGauge) -> Result<Self, Self::Error> {
        Self::new(raw.stitches_per_inch, raw.rows_per_inch)
    }
}

impl Gauge {
    /// Validated gauge: both components must lie in `(0, MAX_PER_INCH]`.
    pub fn new(stitches_per_inch: f64, rows_per_inch: f64) -> Result<Self, GaugeError> {
        Self::with_max(stitches_per_inch, rows_per_inch, MAX_PER_INCH)
    }

    /// Validated gauge with a caller-chosen upper bound.
    pub fn with_max(
        stitches_per_inch: f64,
        rows_per_inch: f64,
        max: f64,
    ) -> Result<Self, GaugeError> {
        check("stitches", stitches_per_inch, max)?;
        check("rows", rows_per_inch, max)?;
        Ok(Self {
            stitches_per_inch,
            rows_per_inch,
        })
    }

    pub fn stitches_per_inch(&self) -> f64 {
        self.stitches_per_inch
    }

    pub fn rows_per_inch(&self) -> f64 {
        self.rows_per_inch
    }

    /// Horizontal and vertical size relative to `baseline`, as whole percentages.
    pub fn percent_of(&self, baseline: f64) -> (u32, u32) {
        let pct = |v: f64| ((v / baseline) * 100.0).round().max(0.0) as u32;
        (pct(self.stitches_per_inch), pct(self.rows_per_inch))
    }
}

fn check(field: &'static str, value: f64, max: f64) -> Result<(), GaugeError> {
    // NaN fails both comparisons.
    if value > 0.0 && value <= max {
        Ok(())
    } else {
        Err(GaugeError::OutOfRange { field, value, max })
    }
}

/// Integer cell repetition factors. Both are always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scale {
    pub x: usize,
    pub y: usize,
}

impl Scale {
    /// No scaling.
    pub const IDENTITY: Scale = Scale { x: 1, y: 1 };
}

impl Default for Scale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Computes scale factors from a gauge against a baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeScaler {
    baseline: f64,
}

impl GaugeScaler {
    /// Scaler for a custom baseline. Non-positive baselines use the standard one.
    pub fn new(baseline: f64) -> Self {
        let baseline = if baseline > 0.0 {
            baseline
        } else {
            BASELINE_PER_INCH
        };
        Self { baseline }
    }

    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    /// Scale factors for `gauge`; identity when no gauge is given.
    pub fn compute_scale(&self, gauge: Option<&Gauge>) -> Scale {
        match gauge {
            None => Scale::IDENTITY,
            Some(g) => Scale {
                x: self.factor(g.stitches_per_inch),
                y: self.factor(g.rows_per_inch),
            },
        }
    }

    fn factor(&self, per_inch: f64) -> usize {
        let ratio = (per_inch / self.baseline).round();
        if !ratio.is_finite() || ratio < 1.0 {
            1
        } else if ratio >= MAX_SCALE as f64 {
            MAX_SCALE
        } else {
            ratio as usize
        }
    }
}

impl Default for GaugeScaler {
    fn default() -> Self {
        Self::new(BASELINE_PER_INCH)
    }
}
