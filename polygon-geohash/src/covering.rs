//! Geohash covering generation.
//!
//! Sweeps the geohash-aligned envelope of a polygon one row at a time, top to
//! bottom. For every row except in envelope mode, the polygon is clipped to
//! the row and each resulting piece is scanned west to east; the accepted
//! cells of a row are merged into column order before being appended.
//!
//! ```text
//! polygon ─► AlignedEnvelope ─► row 0 ─► clip ─► pieces ─► RowScanner ─► cells
//!                               row 1 ─► clip ─► pieces ─► RowScanner ─► cells
//!                               ...
//! ```
//!
//! Nothing survives between calls: the scan cursor is created per covering
//! and reset before each piece.

use crate::config::{CoveringConfig, HashMode};
use crate::envelope::AlignedEnvelope;
use crate::error::{CoverError, Result};
use crate::geometry::{self, BBox};
use crate::predicate::ModePredicate;
use crate::scanner::{RowScanner, ScanCursor, ScannedCell};
use geo_types::Polygon;

/// Counters collected while sweeping one polygon.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoveringStats {
    /// Rows in the aligned envelope.
    pub rows: usize,

    /// Rows the polygon does not reach.
    pub rows_skipped: usize,

    /// Row pieces scanned.
    pub segments_scanned: usize,

    /// Row pieces dropped as slivers thinner than the edge nudge.
    pub segments_skipped: usize,

    /// Candidate cells evaluated.
    pub cells_visited: usize,

    /// Cells in the final covering.
    pub cells_emitted: usize,
}

/// Reusable covering generator with a validated configuration.
///
/// # Usage
///
/// ```ignore
/// let coverer = GeohashCoverer::new(CoveringConfig::new(7, HashMode::InsideOnly))?;
/// let cells = coverer.cover_wkt("POLYGON((2.29 48.85, 2.30 48.85, 2.30 48.86, 2.29 48.85))")?;
/// ```
#[derive(Debug, Clone)]
pub struct GeohashCoverer {
    config: CoveringConfig,
}

impl GeohashCoverer {
    /// Create a coverer, rejecting out-of-range configuration values.
    pub fn new(config: CoveringConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CoveringConfig {
        &self.config
    }

    /// Cover the polygon whose exterior ring is given as `(lng, lat)` pairs.
    pub fn cover_ring(&self, ring: &[(f64, f64)]) -> Result<Vec<String>> {
        let polygon = geometry::polygon_from_ring(ring)?;
        Ok(sweep(&polygon, &self.config)?.0)
    }

    /// Cover an already-built polygon.
    pub fn cover_polygon(&self, polygon: &Polygon<f64>) -> Result<Vec<String>> {
        Ok(self.cover_with_stats(polygon)?.0)
    }

    /// Cover a WKT `POLYGON`.
    pub fn cover_wkt(&self, wkt: &str) -> Result<Vec<String>> {
        let polygon = geometry::parse_wkt_polygon(wkt)?;
        Ok(sweep(&polygon, &self.config)?.0)
    }

    /// Cover a polygon and report sweep counters alongside the cells.
    pub fn cover_with_stats(
        &self,
        polygon: &Polygon<f64>,
    ) -> Result<(Vec<String>, CoveringStats)> {
        geometry::validate_polygon(polygon)?;
        sweep(polygon, &self.config)
    }
}

/// Geohash cells of length `precision` covering `ring` under `mode`.
///
/// `ring` is the polygon's outer boundary as `(lng, lat)` pairs; it is closed
/// automatically. `min_intersect` is the fraction of a cell's area that must
/// be shared with the polygon, and only applies to [`HashMode::Intersect`].
///
/// Cells come back row by row from north to south, west to east within a
/// row, each at most once.
pub fn polygon_to_geohashes(
    ring: &[(f64, f64)],
    precision: usize,
    mode: HashMode,
    min_intersect: f64,
) -> Result<Vec<String>> {
    let config = CoveringConfig::new(precision, mode).with_min_intersect(min_intersect);
    GeohashCoverer::new(config)?.cover_ring(ring)
}

/// Covering of an already-built polygon.
pub fn covering_for_polygon(
    polygon: &Polygon<f64>,
    config: &CoveringConfig,
) -> Result<Vec<String>> {
    GeohashCoverer::new(config.clone())?.cover_polygon(polygon)
}

/// Covering of a WKT `POLYGON`.
pub fn covering_for_wkt(wkt: &str, config: &CoveringConfig) -> Result<Vec<String>> {
    GeohashCoverer::new(config.clone())?.cover_wkt(wkt)
}

fn sweep(polygon: &Polygon<f64>, config: &CoveringConfig) -> Result<(Vec<String>, CoveringStats)> {
    let envelope = AlignedEnvelope::build(polygon, config.precision, config.min_intersect)?;
    let min_intersect_area = match config.mode {
        HashMode::Intersect => envelope.min_intersect_area,
        _ => 0.0,
    };
    let lng_nudge = envelope.lng_nudge(config.edge_epsilon);
    let lat_nudge = envelope.lat_nudge(config.edge_epsilon);

    tracing::debug!(
        precision = config.precision,
        mode = %config.mode,
        rows = envelope.rows,
        columns = envelope.columns,
        min_lng = envelope.bbox.min_lng,
        max_lat = envelope.bbox.max_lat,
        "Sweeping aligned envelope"
    );

    if let Some(limit) = config.max_cells {
        if config.mode == HashMode::Envelope && envelope.cell_count() > limit {
            return Err(CoverError::CellLimitExceeded { limit });
        }
    }

    let predicate = ModePredicate::new(config.mode, polygon, min_intersect_area);
    let east_limit = geometry::bounding_box(polygon)?.max_lng;
    let scanner =
        RowScanner::new(config.precision, lng_nudge, predicate).with_east_limit(east_limit);
    let mut cursor = ScanCursor::new();
    let mut stats = CoveringStats {
        rows: envelope.rows,
        ..CoveringStats::default()
    };
    let mut geohashes = Vec::new();

    for index in 0..envelope.rows {
        let row = envelope.row(index);
        let row_lat = row.center().0;

        let segments = match row_segments(polygon, &row, config.mode) {
            Some(segments) => segments,
            None => {
                stats.rows_skipped += 1;
                tracing::trace!(row = index, "Polygon does not reach row");
                continue;
            }
        };

        let mut row_cells: Vec<ScannedCell> = Vec::new();
        for segment in &segments {
            let bounds = geometry::bounding_box(segment)?;
            if bounds.width() <= lng_nudge || bounds.height() <= lat_nudge {
                stats.segments_skipped += 1;
                tracing::trace!(
                    row = index,
                    width = bounds.width(),
                    height = bounds.height(),
                    "Skipping sliver segment"
                );
                continue;
            }

            cursor.reset();
            let scan = scanner.scan(segment, row_lat, &mut cursor)?;
            stats.segments_scanned += 1;
            stats.cells_visited += scan.visited;
            row_cells.extend(scan.cells);
        }

        let before = geohashes.len();
        append_row(&mut geohashes, row_cells);
        tracing::trace!(
            row = index,
            segments = segments.len(),
            cells = geohashes.len() - before,
            "Row scanned"
        );

        if let Some(limit) = config.max_cells {
            if geohashes.len() > limit {
                return Err(CoverError::CellLimitExceeded { limit });
            }
        }
    }

    stats.cells_emitted = geohashes.len();
    tracing::debug!(
        cells = stats.cells_emitted,
        visited = stats.cells_visited,
        rows_skipped = stats.rows_skipped,
        "Covering complete"
    );

    Ok((geohashes, stats))
}

/// Pieces of `row` to scan: the row itself in envelope mode, otherwise the
/// polygon clipped to the row (`None` when they share no area).
fn row_segments(
    polygon: &Polygon<f64>,
    row: &BBox,
    mode: HashMode,
) -> Option<Vec<Polygon<f64>>> {
    let row_polygon = row.to_polygon();
    if !mode.clips_rows() {
        return Some(vec![row_polygon]);
    }
    geometry::intersection(polygon, &row_polygon).map(|pieces| pieces.0)
}

/// Append one row's cells in column order, dropping cells reached from more
/// than one piece.
fn append_row(geohashes: &mut Vec<String>, mut row_cells: Vec<ScannedCell>) {
    row_cells.sort_by(|a, b| a.bbox.min_lng.total_cmp(&b.bbox.min_lng));
    row_cells.dedup_by(|a, b| a.hash == b.hash);
    geohashes.extend(row_cells.into_iter().map(|cell| cell.hash));
}
