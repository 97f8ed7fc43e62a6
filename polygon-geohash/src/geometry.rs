//! Geometry adapter over the `geo` crate.
//!
//! This module provides:
//! - Polygon construction from a ring of `(lng, lat)` pairs, with validation
//! - WKT parsing
//! - Bounding boxes in `(min_lng, min_lat, max_lng, max_lat)` terms
//! - The areal predicates used by the covering (overlap, within, intersection,
//!   boundary splitting)
//!
//! # Design
//!
//! Every box handed to the rest of the crate is a [`BBox`], whatever the
//! coordinate order of the collaborator that produced it. Polygons only carry
//! an exterior ring; interior rings are rejected at construction.

use crate::error::{CoverError, Result};
use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::coordinate_position::CoordPos;
use geo::dimensions::Dimensions;
use geo::{Area, BooleanOps, BoundingRect, Relate, Within};
use geo_types::{Coord, Geometry, Line, LineString, MultiPolygon, Polygon, Rect};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BBox {
    /// Create a new bounding box.
    pub fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        }
    }

    /// Convert a geo-types rectangle (x = lng, y = lat).
    pub fn from_rect(rect: &Rect<f64>) -> Self {
        Self {
            min_lat: rect.min().y,
            max_lat: rect.max().y,
            min_lng: rect.min().x,
            max_lng: rect.max().x,
        }
    }

    /// Longitude extent.
    pub fn width(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    /// Latitude extent.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Centre point as `(lat, lng)`.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    /// The rectangle as a closed polygon.
    pub fn to_polygon(&self) -> Polygon<f64> {
        Rect::new(
            Coord {
                x: self.min_lng,
                y: self.min_lat,
            },
            Coord {
                x: self.max_lng,
                y: self.max_lat,
            },
        )
        .to_polygon()
    }

    /// Closed outline as eight points, each edge given by its two endpoints
    /// (top, right, bottom, left).
    pub fn boundary_line(&self) -> LineString<f64> {
        let top_left = (self.min_lng, self.max_lat);
        let top_right = (self.max_lng, self.max_lat);
        let bottom_right = (self.max_lng, self.min_lat);
        let bottom_left = (self.min_lng, self.min_lat);
        LineString::from(vec![
            top_left,
            top_right,
            top_right,
            bottom_right,
            bottom_right,
            bottom_left,
            bottom_left,
            top_left,
        ])
    }
}

/// Build a polygon from an exterior ring of `(lng, lat)` pairs.
///
/// The ring is closed if its last point differs from the first.
pub fn polygon_from_ring(ring: &[(f64, f64)]) -> Result<Polygon<f64>> {
    if ring.is_empty() {
        return Err(CoverError::Geometry("polygon ring is empty".into()));
    }
    let exterior: LineString<f64> = ring.iter().copied().collect();
    let polygon = Polygon::new(exterior, Vec::new());
    validate_polygon(&polygon)?;
    Ok(polygon)
}

/// Check that a polygon is a simple, hole-free ring of finite coordinates.
///
/// Collinear rings pass; the envelope builder reports them as degenerate.
pub fn validate_polygon(polygon: &Polygon<f64>) -> Result<()> {
    if !polygon.interiors().is_empty() {
        return Err(CoverError::Geometry(format!(
            "polygons with holes are not supported ({} interior rings)",
            polygon.interiors().len()
        )));
    }

    let exterior = polygon.exterior();
    if exterior.0.is_empty() {
        return Err(CoverError::Geometry("polygon ring is empty".into()));
    }
    if let Some(c) = exterior.coords().find(|c| !c.x.is_finite() || !c.y.is_finite()) {
        return Err(CoverError::Geometry(format!(
            "non-finite coordinate ({}, {})",
            c.x, c.y
        )));
    }

    let distinct: FxHashSet<(u64, u64)> = exterior
        .coords()
        .map(|c| (c.x.to_bits(), c.y.to_bits()))
        .collect();
    if distinct.len() < 3 {
        return Err(CoverError::Geometry(format!(
            "polygon ring needs at least 3 distinct points, got {}",
            distinct.len()
        )));
    }

    if !is_collinear(exterior) {
        check_simple_ring(exterior)?;
    }
    Ok(())
}

fn is_collinear(ring: &LineString<f64>) -> bool {
    let origin = ring.0[0];
    let Some(toward) = ring.coords().find(|c| **c != origin).copied() else {
        return true;
    };
    ring.coords().all(|c| {
        (toward.x - origin.x) * (c.y - origin.y) - (toward.y - origin.y) * (c.x - origin.x) == 0.0
    })
}

/// Reject rings whose edges cross or touch anywhere but at shared vertices.
fn check_simple_ring(ring: &LineString<f64>) -> Result<()> {
    let segments: Vec<Line<f64>> = ring.lines().filter(|l| l.start != l.end).collect();
    let n = segments.len();

    for i in 0..n {
        for j in (i + 1)..n {
            let adjacent = j == i + 1 || (i == 0 && j == n - 1);
            match line_intersection(segments[i], segments[j]) {
                None => {}
                Some(LineIntersection::SinglePoint { .. }) if adjacent => {}
                Some(_) => {
                    return Err(CoverError::Geometry(format!(
                        "polygon ring self-intersects (edges {} and {})",
                        i, j
                    )))
                }
            }
        }
    }
    Ok(())
}

/// Parse WKT string to geo-types Geometry.
pub fn parse_wkt(wkt: &str) -> Result<Geometry<f64>> {
    use std::str::FromStr;
    wkt::Wkt::from_str(wkt)
        .map_err(|e| CoverError::WktParse(format!("{:?}", e)))
        .and_then(|w| {
            w.try_into()
                .map_err(|e: wkt::conversion::Error| CoverError::WktParse(format!("{:?}", e)))
        })
}

/// Parse a WKT `POLYGON` and validate it.
pub fn parse_wkt_polygon(wkt: &str) -> Result<Polygon<f64>> {
    match parse_wkt(wkt)? {
        Geometry::Polygon(polygon) => {
            validate_polygon(&polygon)?;
            Ok(polygon)
        }
        other => Err(CoverError::Geometry(format!(
            "expected a POLYGON, got {}",
            wkt_keyword(&other)
        ))),
    }
}

fn wkt_keyword(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "POINT",
        Geometry::LineString(_) | Geometry::Line(_) => "LINESTRING",
        Geometry::Polygon(_) | Geometry::Rect(_) | Geometry::Triangle(_) => "POLYGON",
        Geometry::MultiPoint(_) => "MULTIPOINT",
        Geometry::MultiLineString(_) => "MULTILINESTRING",
        Geometry::MultiPolygon(_) => "MULTIPOLYGON",
        Geometry::GeometryCollection(_) => "GEOMETRYCOLLECTION",
    }
}

/// Bounding box of a polygon.
pub fn bounding_box(polygon: &Polygon<f64>) -> Result<BBox> {
    polygon
        .bounding_rect()
        .map(|rect| BBox::from_rect(&rect))
        .ok_or_else(|| CoverError::Geometry("cannot bound an empty polygon".into()))
}

/// Envelope (bounding rectangle) of a polygon, as a polygon.
pub fn envelope(polygon: &Polygon<f64>) -> Result<Polygon<f64>> {
    Ok(bounding_box(polygon)?.to_polygon())
}

/// Planar area in square degrees.
pub fn area(polygon: &Polygon<f64>) -> f64 {
    polygon.unsigned_area()
}

/// Areal intersection of two polygons.
///
/// Returns `None` when the polygons share no area; zero-area pieces are
/// dropped.
pub fn intersection(a: &Polygon<f64>, b: &Polygon<f64>) -> Option<MultiPolygon<f64>> {
    let pieces: Vec<Polygon<f64>> = a
        .intersection(b)
        .0
        .into_iter()
        .filter(|piece| piece.unsigned_area() > 0.0)
        .collect();
    if pieces.is_empty() {
        None
    } else {
        Some(MultiPolygon::new(pieces))
    }
}

/// Intersection area of two polygons, 0 when they are disjoint.
pub fn intersection_area(a: &Polygon<f64>, b: &Polygon<f64>) -> f64 {
    intersection(a, b).map_or(0.0, |shared| shared.unsigned_area())
}

/// True when the interiors of `a` and `b` share area.
///
/// Polygons that only touch along edges or at corners do not overlap.
pub fn overlaps(a: &Polygon<f64>, b: &Polygon<f64>) -> bool {
    a.relate(b).get(CoordPos::Inside, CoordPos::Inside) == Dimensions::TwoDimensional
}

/// True when `inner` lies within `outer` (boundaries may touch).
pub fn within(inner: &Polygon<f64>, outer: &Polygon<f64>) -> bool {
    inner.is_within(outer)
}

/// Split `line` wherever the exterior of `splitter` crosses it.
///
/// Only transversal crossings split; shared edges and touching vertices do
/// not. Returns no fragments at all when nothing crosses the line.
pub fn split_line(line: &LineString<f64>, splitter: &Polygon<f64>) -> Vec<LineString<f64>> {
    let edges: Vec<Line<f64>> = splitter.exterior().lines().collect();
    let mut fragments = Vec::new();
    let mut current: Vec<Coord<f64>> = Vec::new();

    for segment in line.lines() {
        if current.is_empty() {
            current.push(segment.start);
        }
        if segment.start == segment.end {
            continue;
        }

        let mut cuts: Vec<Coord<f64>> = edges
            .iter()
            .filter_map(|edge| match line_intersection(segment, *edge) {
                Some(LineIntersection::SinglePoint {
                    intersection,
                    is_proper: true,
                }) => Some(intersection),
                _ => None,
            })
            .collect();
        cuts.sort_by(|a, b| {
            distance_sq(segment.start, *a).total_cmp(&distance_sq(segment.start, *b))
        });

        for cut in cuts {
            current.push(cut);
            fragments.push(LineString::new(std::mem::take(&mut current)));
            current.push(cut);
        }
        current.push(segment.end);
    }

    if fragments.is_empty() {
        return fragments;
    }
    fragments.push(LineString::new(current));
    fragments
}

fn distance_sq(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(min: f64, max: f64) -> Polygon<f64> {
        polygon_from_ring(&[(min, min), (max, min), (max, max), (min, max), (min, min)]).unwrap()
    }

    #[test]
    fn test_parse_polygon() {
        let wkt = "POLYGON((0 0, 1 0, 1 1, 0 1, 0 0))";
        let geom = parse_wkt(wkt).unwrap();
        assert!(matches!(geom, Geometry::Polygon(_)));
        assert!(parse_wkt_polygon(wkt).is_ok());
    }

    #[test]
    fn test_parse_wkt_rejects_other_types() {
        let err = parse_wkt_polygon("LINESTRING(0 0, 1 1)").unwrap_err();
        assert!(matches!(err, CoverError::Geometry(_)));
        assert_eq!(err.to_string(), "Invalid geometry: expected a POLYGON, got LINESTRING");

        let err = parse_wkt_polygon("MULTIPOINT((0 0), (1 1))").unwrap_err();
        assert!(err.to_string().ends_with("got MULTIPOINT"));
        assert!(matches!(
            parse_wkt_polygon("POLYGON((0 0, 1 0"),
            Err(CoverError::WktParse(_))
        ));
    }

    #[test]
    fn test_bbox_computation() {
        let polygon = parse_wkt_polygon("POLYGON((0 0, 10 0, 10 20, 0 20, 0 0))").unwrap();
        let bbox = bounding_box(&polygon).unwrap();
        assert_eq!(bbox.min_lng, 0.0);
        assert_eq!(bbox.max_lng, 10.0);
        assert_eq!(bbox.min_lat, 0.0);
        assert_eq!(bbox.max_lat, 20.0);
        assert_eq!(bbox.center(), (10.0, 5.0));

        let env = envelope(&polygon).unwrap();
        assert_eq!(area(&env), 200.0);
        assert_eq!(bounding_box(&env).unwrap(), bbox);
    }

    #[test]
    fn test_ring_is_closed() {
        let polygon = polygon_from_ring(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]).unwrap();
        assert!(polygon.exterior().is_closed());
        assert_eq!(area(&polygon), 4.0);
    }

    #[test]
    fn test_malformed_rings() {
        assert!(matches!(polygon_from_ring(&[]), Err(CoverError::Geometry(_))));
        assert!(matches!(
            polygon_from_ring(&[(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)]),
            Err(CoverError::Geometry(_))
        ));
        assert!(matches!(
            polygon_from_ring(&[(0.0, 0.0), (f64::NAN, 0.0), (1.0, 1.0)]),
            Err(CoverError::Geometry(_))
        ));
        // bow tie
        assert!(matches!(
            polygon_from_ring(&[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0), (0.0, 0.0)]),
            Err(CoverError::Geometry(_))
        ));
    }

    #[test]
    fn test_collinear_ring_is_left_to_envelope_builder() {
        let polygon = polygon_from_ring(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]).unwrap();
        assert_eq!(area(&polygon), 0.0);
    }

    #[test]
    fn test_holes_rejected() {
        let wkt = "POLYGON((0 0, 10 0, 10 10, 0 10, 0 0), (2 2, 3 2, 3 3, 2 3, 2 2))";
        assert!(matches!(
            parse_wkt_polygon(wkt),
            Err(CoverError::Geometry(_))
        ));
    }

    #[test]
    fn test_overlaps_requires_shared_area() {
        let a = square(0.0, 2.0);
        let inside = square(0.5, 1.5);
        let touching = BBox::new(0.0, 2.0, 2.0, 4.0).to_polygon();
        let crossing = square(1.0, 3.0);

        assert!(overlaps(&a, &inside));
        assert!(overlaps(&a, &crossing));
        assert!(overlaps(&a, &a));
        assert!(!overlaps(&a, &touching));
    }

    #[test]
    fn test_within_allows_shared_boundary() {
        let a = square(0.0, 2.0);
        let corner = BBox::new(0.0, 1.0, 0.0, 1.0).to_polygon();
        assert!(within(&corner, &a));
        assert!(within(&a, &a));
        assert!(!within(&square(1.0, 3.0), &a));
    }

    #[test]
    fn test_intersection_none_when_disjoint() {
        let a = square(0.0, 1.0);
        assert!(intersection(&a, &square(2.0, 3.0)).is_none());
        let touching = BBox::new(0.0, 1.0, 1.0, 2.0).to_polygon();
        assert!(intersection(&a, &touching).is_none());
        assert_eq!(intersection_area(&a, &touching), 0.0);

        let shared = intersection_area(&square(0.0, 2.0), &square(1.0, 3.0));
        assert!((shared - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_boundary_line_has_eight_points() {
        let line = BBox::new(0.0, 1.0, 0.0, 2.0).boundary_line();
        assert_eq!(line.0.len(), 8);
        assert!(line.is_closed());
    }

    #[test]
    fn test_split_line() {
        let cell = BBox::new(0.0, 1.0, 0.0, 1.0);
        let line = cell.boundary_line();

        // Same rectangle: edges coincide, nothing crosses.
        assert!(split_line(&line, &cell.to_polygon()).is_empty());

        // Large polygon containing the cell.
        assert!(split_line(&line, &square(-5.0, 5.0)).is_empty());

        // Polygon whose edge cuts the top and bottom of the cell.
        let cutter = BBox::new(-1.0, 2.0, 0.5, 3.0).to_polygon();
        let fragments = split_line(&line, &cutter);
        assert_eq!(fragments.len(), 3);
    }
}
