//! Per-cell inclusion rules for each [`HashMode`].

use crate::config::HashMode;
use crate::geometry::{self, BBox};
use geo_types::Polygon;

/// Relative slack allowed when comparing a shared area to the threshold.
pub const AREA_TOLERANCE: f64 = 1e-9;

/// Inclusion rule bound to one covering's polygon and threshold.
#[derive(Debug, Clone, Copy)]
pub struct ModePredicate<'a> {
    mode: HashMode,
    original: &'a Polygon<f64>,
    min_intersect_area: f64,
}

impl<'a> ModePredicate<'a> {
    pub fn new(mode: HashMode, original: &'a Polygon<f64>, min_intersect_area: f64) -> Self {
        Self {
            mode,
            original,
            min_intersect_area,
        }
    }

    pub fn mode(&self) -> HashMode {
        self.mode
    }

    /// Decide whether `cell` belongs to the covering.
    ///
    /// `segment` is the row piece being scanned: the clipped row for the
    /// clipping modes, the bare row rectangle for envelope mode.
    pub fn accepts(&self, segment: &Polygon<f64>, cell: &BBox) -> bool {
        match self.mode {
            HashMode::Envelope => true,
            HashMode::Intersect => {
                let cell_polygon = cell.to_polygon();
                geometry::overlaps(segment, &cell_polygon)
                    && self.meets_area_threshold(&cell_polygon)
            }
            HashMode::InsideOnly => {
                let cell_polygon = cell.to_polygon();
                geometry::within(&cell_polygon, self.original) && self.edges_unsplit(cell)
            }
            HashMode::Border => {
                let cell_polygon = cell.to_polygon();
                geometry::overlaps(segment, &cell_polygon)
                    && !geometry::within(&cell_polygon, self.original)
            }
        }
    }

    fn meets_area_threshold(&self, cell_polygon: &Polygon<f64>) -> bool {
        if self.min_intersect_area <= 0.0 {
            return true;
        }
        let shared = geometry::intersection_area(self.original, cell_polygon);
        shared >= self.min_intersect_area * (1.0 - AREA_TOLERANCE)
    }

    // Containment alone can be fooled by boundaries running along the cell's
    // edges; the outline must also survive uncut.
    fn edges_unsplit(&self, cell: &BBox) -> bool {
        geometry::split_line(&cell.boundary_line(), self.original).is_empty()
    }
}
