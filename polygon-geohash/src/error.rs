//! Error types for polygon coverings.

use thiserror::Error;

/// Covering errors.
///
/// Any error aborts the whole covering; partial cell lists are never returned.
#[derive(Error, Debug)]
pub enum CoverError {
    /// Malformed input geometry (empty ring, self-intersecting ring, holes, ...).
    #[error("Invalid geometry: {0}")]
    Geometry(String),

    /// WKT parsing error.
    #[error("WKT parse error: {0}")]
    WktParse(String),

    /// Polygon or aligned envelope has no extent to sweep.
    #[error("Degenerate polygon: width={width}, height={height}")]
    DegeneratePolygon { width: f64, height: f64 },

    /// Precision outside the geohash codec's supported range.
    #[error("Invalid geohash precision {0} (expected 1..=12)")]
    InvalidPrecision(usize),

    /// Error reported by the geohash codec.
    #[error("Geohash error: {0}")]
    Geohash(#[from] geohash::GeohashError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The covering grew past the configured cell limit.
    #[error("Cell limit exceeded: covering needs more than {limit} cells")]
    CellLimitExceeded { limit: usize },
}

/// Result type for covering operations.
pub type Result<T> = std::result::Result<T, CoverError>;
