//! Geohash covering benchmarks.
//!
//! Measures:
//! - Covering time per mode (box and star inputs)
//! - Scaling with precision
//! - Covering quality (cells emitted per mode)
//!
//! Every shape is centred on a geohash cell corner, so it straddles the
//! four cells meeting there at the anchor precision and every finer one.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use polygon_geohash::geometry::polygon_from_ring;
use polygon_geohash::{codec, CoveringConfig, GeohashCoverer, HashMode};
use std::f64::consts::PI;

const PARIS: (f64, f64) = (48.8566, 2.3522);

// ============================================================================
// Test Data Generation
// ============================================================================

/// South-west corner `(lat, lng)` of the cell holding `point` at `precision`.
fn cell_corner(point: (f64, f64), precision: usize) -> (f64, f64) {
    let (_, cell) = codec::cell_at(point.0, point.1, precision).unwrap();
    (cell.min_lat, cell.min_lng)
}

/// Box of `size_deg` centred on `corner`, as an open `(lng, lat)` ring.
fn straddling_box(corner: (f64, f64), size_deg: f64) -> Vec<(f64, f64)> {
    let (lat, lng) = corner;
    let half = size_deg / 2.0;
    vec![
        (lng - half, lat - half),
        (lng + half, lat - half),
        (lng + half, lat + half),
        (lng - half, lat + half),
    ]
}

/// Star with `points` spikes centred on `corner`. Most rows cut through
/// several spikes, so each row clips into more than one segment.
fn straddling_star(corner: (f64, f64), size_deg: f64, points: usize) -> Vec<(f64, f64)> {
    let (lat, lng) = corner;
    let outer = size_deg / 2.0;
    let inner = outer * 0.4;
    (0..points * 2)
        .map(|i| {
            let radius = if i % 2 == 0 { outer } else { inner };
            let angle = i as f64 * PI / points as f64 + PI / 2.0;
            (lng + radius * angle.cos(), lat + radius * angle.sin())
        })
        .collect()
}

// ============================================================================
// Covering Benchmarks
// ============================================================================

fn bench_covering_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("covering_modes");

    let corner = cell_corner(PARIS, 4);
    let shapes = [
        ("box_0.1deg", straddling_box(corner, 0.1)),
        ("star5_0.1deg", straddling_star(corner, 0.1, 5)),
    ];

    for (name, ring) in &shapes {
        let polygon = polygon_from_ring(ring).unwrap();
        for mode in HashMode::ALL {
            let coverer = GeohashCoverer::new(CoveringConfig::new(6, mode)).unwrap();
            group.bench_with_input(
                BenchmarkId::new(mode.as_str(), name),
                &polygon,
                |b, polygon| {
                    b.iter(|| {
                        let cells = coverer.cover_polygon(polygon).unwrap();
                        black_box(cells.len())
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_precision_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("precision_scaling");
    let polygon = polygon_from_ring(&straddling_star(cell_corner(PARIS, 4), 0.05, 7)).unwrap();

    for precision in [4, 5, 6, 7] {
        let coverer =
            GeohashCoverer::new(CoveringConfig::new(precision, HashMode::Intersect)).unwrap();
        let cells = coverer.cover_polygon(&polygon).unwrap().len();

        group.throughput(Throughput::Elements(cells as u64));
        group.bench_with_input(
            BenchmarkId::new("intersect", precision),
            &polygon,
            |b, polygon| {
                b.iter(|| black_box(coverer.cover_polygon(polygon).unwrap().len()));
            },
        );
    }

    group.finish();
}

// ============================================================================
// Covering Quality Measurement
// ============================================================================

fn bench_covering_quality(c: &mut Criterion) {
    let mut group = c.benchmark_group("covering_quality");

    // Compares how many cells each mode keeps for the same input; the gap
    // between envelope and intersect is the grid's false positive count.

    let corner = cell_corner(PARIS, 3);
    let test_cases = [
        ("box_0.1deg", straddling_box(corner, 0.1)),
        ("star5_0.1deg", straddling_star(corner, 0.1, 5)),
        ("star12_1deg", straddling_star(corner, 1.0, 12)),
    ];

    // First, print covering statistics (not timed)
    println!("\n=== Covering Quality Statistics (precision 5) ===");
    for (name, ring) in &test_cases {
        let polygon = polygon_from_ring(ring).unwrap();
        let counts: Vec<String> = HashMode::ALL
            .iter()
            .map(|mode| {
                let coverer = GeohashCoverer::new(CoveringConfig::new(5, *mode)).unwrap();
                let (cells, stats) = coverer.cover_with_stats(&polygon).unwrap();
                format!(
                    "{}={} (visited {}, segments {})",
                    mode,
                    cells.len(),
                    stats.cells_visited,
                    stats.segments_scanned
                )
            })
            .collect();
        println!("{}: {}", name, counts.join(", "));
    }
    println!();

    for (name, ring) in test_cases {
        let polygon = polygon_from_ring(&ring).unwrap();
        let coverer = GeohashCoverer::new(
            CoveringConfig::new(5, HashMode::Intersect).with_min_intersect(0.5),
        )
        .unwrap();

        group.bench_with_input(
            BenchmarkId::new("half_cell_threshold", name),
            &polygon,
            |b, polygon| {
                b.iter(|| {
                    let cells = coverer.cover_polygon(polygon).unwrap();
                    black_box(cells.len())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_covering_modes,
    bench_precision_scaling,
    bench_covering_quality,
);
criterion_main!(benches);
