//! Left-to-right scan of the geohash cells under one row segment.
//!
//! A segment is one piece of a row: the polygon clipped to the row, or the
//! whole row rectangle in envelope mode. The scan starts at the cell under
//! the segment's left edge (or the [`ScanCursor`], whichever lies further
//! east) and walks east-neighbours until it reaches the segment's right edge.

use crate::codec;
use crate::error::Result;
use crate::geometry::{self, BBox};
use crate::predicate::ModePredicate;
use geo_types::Polygon;

/// Rightmost longitude already consumed by a scan.
///
/// Owned by the caller and passed by reference into every segment scan.
/// A fresh cursor sits at `-inf`, so nothing has been consumed yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanCursor {
    lng: f64,
}

impl ScanCursor {
    pub fn new() -> Self {
        Self {
            lng: f64::NEG_INFINITY,
        }
    }

    /// Forget everything consumed so far.
    pub fn reset(&mut self) {
        self.lng = f64::NEG_INFINITY;
    }

    pub fn position(&self) -> f64 {
        self.lng
    }

    /// Longitude at which a segment with left edge `min_lng` starts.
    pub fn start_lng(&self, min_lng: f64, nudge: f64) -> f64 {
        self.lng.max(min_lng + nudge)
    }

    /// Mark everything up to the right edge of `cell` as consumed.
    pub fn advance_past(&mut self, cell: &BBox, nudge: f64) {
        self.lng = cell.max_lng + nudge;
    }
}

impl Default for ScanCursor {
    fn default() -> Self {
        Self::new()
    }
}

/// A cell accepted by the scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScannedCell {
    pub hash: String,
    pub bbox: BBox,
}

/// Outcome of scanning one segment.
#[derive(Debug, Clone, Default)]
pub struct SegmentScan {
    /// Accepted cells, west to east.
    pub cells: Vec<ScannedCell>,

    /// Cells evaluated, accepted or not.
    pub visited: usize,
}

/// Scan parameters shared by every segment of a covering.
#[derive(Debug, Clone, Copy)]
pub struct RowScanner<'a> {
    pub precision: usize,
    pub lng_nudge: f64,
    pub predicate: ModePredicate<'a>,

    /// Easternmost longitude of the polygon being covered. Clipped pieces
    /// never reach past it, so a piece edge that does is clipping noise.
    pub east_limit: f64,
}

impl<'a> RowScanner<'a> {
    pub fn new(precision: usize, lng_nudge: f64, predicate: ModePredicate<'a>) -> Self {
        Self {
            precision,
            lng_nudge,
            predicate,
            east_limit: f64::INFINITY,
        }
    }

    pub fn with_east_limit(mut self, east_limit: f64) -> Self {
        self.east_limit = east_limit;
        self
    }

    /// Scan `segment`, which lies in the row whose centre latitude is `row_lat`.
    ///
    /// Columns are located at the row centre rather than on its edges, so the
    /// codec never has to break a tie between two rows.
    pub fn scan(
        &self,
        segment: &Polygon<f64>,
        row_lat: f64,
        cursor: &mut ScanCursor,
    ) -> Result<SegmentScan> {
        let bounds = geometry::bounding_box(segment)?;
        let right_edge = bounds.max_lng.min(self.east_limit);
        let mut result = SegmentScan::default();

        let start_lng = cursor.start_lng(bounds.min_lng, self.lng_nudge);
        if start_lng >= right_edge {
            return Ok(result);
        }

        let mut hash = codec::encode(row_lat, start_lng, self.precision)?;
        loop {
            let cell = codec::decode_box(&hash)?;
            result.visited += 1;

            let accepted = self.predicate.accepts(segment, &cell);
            cursor.advance_past(&cell, self.lng_nudge);

            // Last column: the cell reaches the segment's right edge.
            let done = cell.max_lng >= right_edge;
            let next = if done {
                None
            } else {
                Some(codec::east_neighbor(&hash)?)
            };

            if accepted {
                result.cells.push(ScannedCell { hash, bbox: cell });
            }
            match next {
                Some(east) => hash = east,
                None => break,
            }
        }

        Ok(result)
    }
}
