//! Polygon to geohash covering.
//!
//! This crate converts a polygon into the list of geohash cells of a chosen
//! length that cover it. It supports four inclusion modes:
//!
//! - **intersect**: cells whose interior overlaps the polygon, optionally
//!   requiring a minimum shared fraction of the cell's area
//! - **envelope**: every cell of the polygon's geohash-aligned bounding grid
//! - **insideOnly**: cells lying completely inside the polygon
//! - **border**: overlapping cells that are not completely inside
//!
//! # Architecture
//!
//! The polygon's bounding box is snapped outward to geohash cell edges. The
//! aligned envelope is then swept one row at a time from north to south, and
//! each row is scanned from west to east by walking east neighbours.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                 ring / WKT / geo_types::Polygon              │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//!                    validate (simple, no holes)
//!                               │
//!                               ▼
//!                    AlignedEnvelope (snap corners)
//!                               │
//!                               ▼
//!                    for each row: clip polygon ──► pieces
//!                               │
//!                               ▼
//!                    RowScanner (encode, east neighbour, ...)
//!                               │
//!                               ▼
//!                    ModePredicate (per cell)
//!                               │
//!                               ▼
//!                    row merge (column order, dedup)
//!                               │
//!                               ▼
//!                    Vec<String> geohashes
//! ```
//!
//! # Modules
//!
//! - [`config`]: Inclusion modes and covering configuration
//! - [`codec`]: Geohash encode/decode/neighbour wrappers
//! - [`geometry`]: Polygon construction, WKT parsing, and areal predicates
//! - [`envelope`]: Geohash-aligned envelope and row layout
//! - [`predicate`]: Per-mode cell inclusion rules
//! - [`scanner`]: Row segment scanning
//! - [`covering`]: Sweep driver and public entry points
//! - [`error`]: Error types

pub mod codec;
pub mod config;
pub mod covering;
pub mod envelope;
pub mod error;
pub mod geometry;
pub mod predicate;
pub mod scanner;

// Re-export key types
pub use codec::MAX_PRECISION;
pub use config::{CoveringConfig, HashMode, DEFAULT_EDGE_EPSILON};
pub use covering::{
    covering_for_polygon, covering_for_wkt, polygon_to_geohashes, CoveringStats, GeohashCoverer,
};
pub use envelope::AlignedEnvelope;
pub use error::{CoverError, Result};
pub use geometry::BBox;
pub use scanner::ScanCursor;
