//! Geohash codec adapter.
//!
//! Thin wrappers around the `geohash` crate. Boxes come back as [`BBox`] so
//! callers never see the codec's own rectangle type, and precision is checked
//! before anything is encoded.

use crate::error::{CoverError, Result};
use crate::geometry::BBox;
use geo_types::Coord;
use geohash::Direction;

/// Longest geohash the codec supports.
pub const MAX_PRECISION: usize = 12;

/// Width and height, in degrees, of every cell at `precision`.
pub fn cell_extent(precision: usize) -> Result<(f64, f64)> {
    let (_, cell) = cell_at(0.0, 0.0, precision)?;
    Ok((cell.width(), cell.height()))
}

/// Reject precisions the codec cannot represent.
pub fn check_precision(precision: usize) -> Result<()> {
    if (1..=MAX_PRECISION).contains(&precision) {
        Ok(())
    } else {
        Err(CoverError::InvalidPrecision(precision))
    }
}

/// Encode a point at the given precision.
pub fn encode(lat: f64, lng: f64, precision: usize) -> Result<String> {
    check_precision(precision)?;
    Ok(geohash::encode(Coord { x: lng, y: lat }, precision)?)
}

/// Decode a geohash to its cell box.
pub fn decode_box(hash: &str) -> Result<BBox> {
    let rect = geohash::decode_bbox(hash)?;
    Ok(BBox::from_rect(&rect))
}

/// Adjacent cell in the given direction, at the same precision.
pub fn neighbor(hash: &str, direction: Direction) -> Result<String> {
    Ok(geohash::neighbor(hash, direction)?)
}

/// The cell immediately east of `hash`.
pub fn east_neighbor(hash: &str) -> Result<String> {
    neighbor(hash, Direction::E)
}

/// Encode a point and decode it straight back to its cell.
pub fn cell_at(lat: f64, lng: f64, precision: usize) -> Result<(String, BBox)> {
    let hash = encode(lat, lng, precision)?;
    let bbox = decode_box(&hash)?;
    Ok((hash, bbox))
}
