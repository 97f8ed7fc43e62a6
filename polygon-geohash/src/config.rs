//! Covering configuration types.
//!
//! Defines the inclusion mode and the tunable parameters of a covering.

use crate::codec::MAX_PRECISION;
use crate::error::{CoverError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default longitude/latitude nudge (degrees) applied at cell edges.
pub const DEFAULT_EDGE_EPSILON: f64 = 1e-5;

/// Inclusion rule applied to every candidate cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HashMode {
    /// Cells whose interior overlaps the polygon.
    #[default]
    #[serde(rename = "intersect")]
    Intersect,

    /// Every cell of the aligned bounding grid.
    #[serde(rename = "envelope")]
    Envelope,

    /// Cells lying completely inside the polygon.
    #[serde(rename = "insideOnly", alias = "inside-only", alias = "inside_only")]
    InsideOnly,

    /// Cells overlapping the polygon without lying completely inside it.
    #[serde(rename = "border")]
    Border,
}

impl HashMode {
    /// All modes, in declaration order.
    pub const ALL: [HashMode; 4] = [
        HashMode::Intersect,
        HashMode::Envelope,
        HashMode::InsideOnly,
        HashMode::Border,
    ];

    /// The string tag of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            HashMode::Intersect => "intersect",
            HashMode::Envelope => "envelope",
            HashMode::InsideOnly => "insideOnly",
            HashMode::Border => "border",
        }
    }

    /// Whether rows are intersected with the polygon before scanning.
    pub fn clips_rows(&self) -> bool {
        !matches!(self, HashMode::Envelope)
    }
}

impl fmt::Display for HashMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashMode {
    type Err = CoverError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "intersect" => Ok(HashMode::Intersect),
            "envelope" => Ok(HashMode::Envelope),
            "insideonly" | "inside-only" | "inside_only" => Ok(HashMode::InsideOnly),
            "border" => Ok(HashMode::Border),
            other => Err(CoverError::Config(format!(
                "unknown hash mode '{}' (expected intersect, envelope, insideOnly or border)",
                other
            ))),
        }
    }
}

/// Configuration for geohash covering generation.
///
/// Controls the granularity of the cells and the inclusion rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoveringConfig {
    /// Geohash length (1-12). Higher = smaller cells.
    /// Default: 6 (~1.2km x 0.6km)
    pub precision: usize,

    /// Inclusion rule.
    /// Default: intersect
    pub mode: HashMode,

    /// Minimum fraction (0-1) of a cell's area that must overlap the polygon.
    /// Only used in intersect mode.
    /// Default: 0
    pub min_intersect: f64,

    /// Nudge (degrees) used to step off shared cell edges.
    /// Clamped per axis to a thousandth of the cell extent.
    /// Default: 1e-5
    pub edge_epsilon: f64,

    /// Abort once a covering would emit more than this many cells.
    /// Default: unlimited
    pub max_cells: Option<usize>,
}

impl Default for CoveringConfig {
    fn default() -> Self {
        Self {
            precision: 6,
            mode: HashMode::Intersect,
            min_intersect: 0.0,
            edge_epsilon: DEFAULT_EDGE_EPSILON,
            max_cells: None,
        }
    }
}

impl CoveringConfig {
    /// Create a config with the given precision and mode.
    pub fn new(precision: usize, mode: HashMode) -> Self {
        Self {
            precision,
            mode,
            ..Self::default()
        }
    }

    /// Set the geohash precision.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Set the inclusion mode.
    pub fn with_mode(mut self, mode: HashMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the minimum intersecting fraction for intersect mode.
    pub fn with_min_intersect(mut self, min_intersect: f64) -> Self {
        self.min_intersect = min_intersect;
        self
    }

    /// Set the edge nudge in degrees.
    pub fn with_edge_epsilon(mut self, edge_epsilon: f64) -> Self {
        self.edge_epsilon = edge_epsilon;
        self
    }

    /// Limit the number of emitted cells.
    pub fn with_max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = Some(max_cells);
        self
    }

    /// Check every field against its supported range.
    pub fn validate(&self) -> Result<()> {
        if self.precision == 0 || self.precision > MAX_PRECISION {
            return Err(CoverError::InvalidPrecision(self.precision));
        }
        let in_unit_range =
            self.min_intersect.is_finite() && (0.0..=1.0).contains(&self.min_intersect);
        if self.mode == HashMode::Intersect && !in_unit_range {
            return Err(CoverError::Config(format!(
                "min_intersect must be within [0, 1], got {}",
                self.min_intersect
            )));
        }
        if !self.edge_epsilon.is_finite() || self.edge_epsilon <= 0.0 {
            return Err(CoverError::Config(format!(
                "edge_epsilon must be positive, got {}",
                self.edge_epsilon
            )));
        }
        if self.max_cells == Some(0) {
            return Err(CoverError::Config("max_cells must be at least 1".into()));
        }
        Ok(())
    }
}
