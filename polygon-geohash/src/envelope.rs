//! Geohash-aligned envelope of a polygon.
//!
//! The polygon's bounding box is grown outward until every edge lies on a
//! geohash cell boundary at the requested precision. Each strip of the
//! aligned envelope that is one cell tall is then exactly one geohash row.

use crate::codec::{self, MAX_PRECISION};
use crate::error::{CoverError, Result};
use crate::geometry::{self, BBox};
use geo_types::Polygon;
use geohash::Direction;

const MAX_LAT: f64 = 90.0;
const MAX_LNG: f64 = 180.0;

/// Fraction of a cell's extent the edge nudge may never exceed.
const MAX_NUDGE_FRACTION: f64 = 1e-3;

/// Aligned scan envelope and the cell metrics derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedEnvelope {
    /// Envelope snapped outward to cell boundaries.
    pub bbox: BBox,

    /// Cell holding the polygon's top-left corner.
    pub top_left: BBox,

    /// Cell holding the polygon's bottom-right corner.
    pub bottom_right: BBox,

    /// Height of one geohash cell (= one row).
    pub cell_height: f64,

    /// Width of one geohash cell.
    pub cell_width: f64,

    /// Width of every row (the aligned envelope's width).
    pub row_width: f64,

    /// Number of rows in the envelope.
    pub rows: usize,

    /// Number of cell columns in the envelope.
    pub columns: usize,

    /// Minimum shared area for intersect mode, in square degrees.
    pub min_intersect_area: f64,
}

impl AlignedEnvelope {
    /// Build the aligned envelope of `polygon` at `precision`.
    ///
    /// `min_intersect` is the fraction of a cell's area used to derive
    /// [`AlignedEnvelope::min_intersect_area`].
    pub fn build(polygon: &Polygon<f64>, precision: usize, min_intersect: f64) -> Result<Self> {
        if precision == 0 || precision > MAX_PRECISION {
            return Err(CoverError::InvalidPrecision(precision));
        }

        let envelope = geometry::bounding_box(polygon)?;
        if envelope.width() <= 0.0 || envelope.height() <= 0.0 || geometry::area(polygon) <= 0.0
        {
            return Err(CoverError::DegeneratePolygon {
                width: envelope.width(),
                height: envelope.height(),
            });
        }

        // The codec's domain is half-open: lat 90 and lng 180 encode to cells
        // on the opposite side of the globe, so those corners are pulled
        // half a cell back inside.
        let (width, height) = codec::cell_extent(precision)?;
        let top = envelope.max_lat.min(MAX_LAT - height / 2.0);
        let right = envelope.max_lng.min(MAX_LNG - width / 2.0);

        let top_left = snap_top_left(top, envelope.min_lng, precision)?;
        let bottom_right = snap_bottom_right(envelope.min_lat, right, precision)?;

        let bbox = BBox::new(
            bottom_right.min_lat,
            top_left.max_lat,
            top_left.min_lng,
            bottom_right.max_lng,
        );
        let cell_height = top_left.height();
        let cell_width = top_left.width();
        let row_width = bbox.width();

        let usable = |v: f64| v.is_finite() && v > 0.0;
        if !usable(cell_height)
            || !usable(cell_width)
            || !usable(row_width)
            || !usable(bbox.height())
        {
            return Err(CoverError::DegeneratePolygon {
                width: row_width,
                height: cell_height,
            });
        }

        let rows = (bbox.height() / cell_height).round() as usize;
        let columns = (row_width / cell_width).round() as usize;
        let min_intersect_area = min_intersect * geometry::area(&top_left.to_polygon());

        Ok(Self {
            bbox,
            top_left,
            bottom_right,
            cell_height,
            cell_width,
            row_width,
            rows,
            columns,
            min_intersect_area,
        })
    }

    /// Rectangle of row `index`, counted from the top.
    pub fn row(&self, index: usize) -> BBox {
        let top = self.bbox.max_lat - index as f64 * self.cell_height;
        BBox::new(
            top - self.cell_height,
            top,
            self.bbox.min_lng,
            self.bbox.min_lng + self.row_width,
        )
    }

    /// Longitude nudge: `edge_epsilon`, capped to a small fraction of a cell.
    pub fn lng_nudge(&self, edge_epsilon: f64) -> f64 {
        edge_epsilon.min(self.cell_width * MAX_NUDGE_FRACTION)
    }

    /// Latitude nudge: `edge_epsilon`, capped to a small fraction of a cell.
    pub fn lat_nudge(&self, edge_epsilon: f64) -> f64 {
        edge_epsilon.min(self.cell_height * MAX_NUDGE_FRACTION)
    }

    /// Total cells in the aligned grid.
    pub fn cell_count(&self) -> usize {
        self.rows * self.columns
    }
}

/// Cell extending right of and below the corner `(lat, lng)`.
fn snap_top_left(lat: f64, lng: f64, precision: usize) -> Result<BBox> {
    let (mut hash, mut cell) = codec::cell_at(lat, lng, precision)?;
    if cell.max_lng <= lng {
        (hash, cell) = step(&hash, Direction::E)?;
    }
    if cell.min_lat >= lat {
        (_, cell) = step(&hash, Direction::S)?;
    }
    Ok(cell)
}

/// Cell extending left of and above the corner `(lat, lng)`.
fn snap_bottom_right(lat: f64, lng: f64, precision: usize) -> Result<BBox> {
    let (mut hash, mut cell) = codec::cell_at(lat, lng, precision)?;
    if cell.min_lng >= lng {
        (hash, cell) = step(&hash, Direction::W)?;
    }
    if cell.max_lat <= lat {
        (_, cell) = step(&hash, Direction::N)?;
    }
    Ok(cell)
}

fn step(hash: &str, direction: Direction) -> Result<(String, BBox)> {
    let next = codec::neighbor(hash, direction)?;
    let cell = codec::decode_box(&next)?;
    Ok((next, cell))
}
