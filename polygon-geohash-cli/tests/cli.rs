use assert_cmd::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

/// The 3x3 precision-2 grid over lng [0, 33.75] x lat [0, 16.875] with a
/// notch cut down from the top edge between lng 15 and 18.75.
const NOTCHED_WKT: &str = "POLYGON((0 0, 33.75 0, 33.75 16.875, 18.75 16.875, 18.75 8, \
                           15 8, 15 16.875, 0 16.875, 0 0))";

const CELL_S_RING: &str = "[[0,0],[45,0],[45,45],[0,45],[0,0]]";

fn geohash_cmd() -> Command {
    let mut cmd = cargo_bin_cmd!("polygon-geohash");
    cmd.env("NO_COLOR", "1");
    cmd
}

// ============================================================================
// Happy path tests
// ============================================================================

#[test]
fn version_flag() {
    cargo_bin_cmd!("polygon-geohash")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("polygon-geohash"));
}

#[test]
fn help_flag() {
    cargo_bin_cmd!("polygon-geohash")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cover a polygon with geohash cells"))
        .stdout(predicate::str::contains("--precision"))
        .stdout(predicate::str::contains("--min-intersect"));
}

#[test]
fn wkt_positional_lines() {
    geohash_cmd()
        .args(["-p", "2", NOTCHED_WKT])
        .assert()
        .success()
        .stdout("s4\ns6\nsd\ns1\ns3\ns9\ns0\ns2\ns8\n");
}

#[test]
fn border_mode() {
    geohash_cmd()
        .args(["-p", "2", "--mode", "border", NOTCHED_WKT])
        .assert()
        .success()
        .stdout("s6\ns3\n");
}

#[test]
fn inside_only_count() {
    geohash_cmd()
        .args(["-p", "2", "-m", "insideOnly", "--format", "count", NOTCHED_WKT])
        .assert()
        .success()
        .stdout("7\n");
}

#[test]
fn min_intersect_flag() {
    geohash_cmd()
        .args(["-p", "2", "--min-intersect", "0.7", "--format", "count", NOTCHED_WKT])
        .assert()
        .success()
        .stdout("8\n");
}

#[test]
fn ring_expr_json() {
    let output = geohash_cmd()
        .args(["-p", "1", "--format", "json", "-e", CELL_S_RING])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["precision"], 1);
    assert_eq!(json["mode"], "intersect");
    assert_eq!(json["count"], 1);
    assert_eq!(json["geohashes"][0], "s");
}

#[test]
fn empty_covering_prints_nothing() {
    geohash_cmd()
        .args(["-p", "1", "-m", "border", CELL_S_RING])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn geojson_from_stdin() {
    let feature = r#"{"type":"Feature","properties":{},"geometry":{"type":"Polygon",
        "coordinates":[[[40,40],[50,40],[50,50],[40,50],[40,40]]]}}"#;
    geohash_cmd()
        .args(["-p", "1"])
        .write_stdin(feature)
        .assert()
        .success()
        .stdout("u\nv\ns\nt\n");
}

#[test]
fn wkt_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notched.wkt");
    std::fs::write(&path, NOTCHED_WKT).unwrap();

    geohash_cmd()
        .args(["-p", "2", "-m", "envelope", "--format", "count", "-f"])
        .arg(&path)
        .assert()
        .success()
        .stdout("9\n");
}

#[test]
fn config_file_with_flag_override() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "precision = 3\nmode = \"border\"").unwrap();

    // precision comes from the flag, mode from the file
    geohash_cmd()
        .args(["-p", "2", "--config"])
        .arg(config.path())
        .arg(NOTCHED_WKT)
        .assert()
        .success()
        .stdout("s6\ns3\n");
}

#[test]
fn verbose_logs_to_stderr() {
    geohash_cmd()
        .args(["--verbose", "-p", "1", CELL_S_RING])
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stdout("s\n")
        .stderr(predicate::str::contains("Covering generated"));
}

// ============================================================================
// Error tests
// ============================================================================

#[test]
fn verbose_quiet_conflict() {
    cargo_bin_cmd!("polygon-geohash")
        .args(["--verbose", "--quiet", CELL_S_RING])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn unknown_mode_is_usage_error() {
    geohash_cmd()
        .args(["-m", "nearby", CELL_S_RING])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error: unknown mode 'nearby'"));
}

#[test]
fn precision_out_of_range() {
    geohash_cmd()
        .args(["-p", "13", CELL_S_RING])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("precision 13"));
}

#[test]
fn degenerate_polygon() {
    geohash_cmd()
        .args(["-p", "3", "[[0,0],[1,1],[2,2]]"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Degenerate polygon"));
}

#[test]
fn self_intersecting_ring() {
    geohash_cmd()
        .args(["[[0,0],[2,2],[2,0],[0,2],[0,0]]"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid geometry"));
}

#[test]
fn polygon_with_hole() {
    geohash_cmd()
        .args(["POLYGON((0 0, 10 0, 10 10, 0 10, 0 0), (2 2, 3 2, 3 3, 2 3, 2 2))"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("holes"));
}

#[test]
fn unrecognized_input() {
    geohash_cmd()
        .args(["LINESTRING(0 0, 1 1)"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("could not detect polygon format"));
}

#[test]
fn max_cells_exceeded() {
    geohash_cmd()
        .args(["-p", "2", "--max-cells", "4", NOTCHED_WKT])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("covering exceeds 4 cells"));
}

#[test]
fn blank_stdin() {
    geohash_cmd()
        .args(["-p", "2"])
        .write_stdin("\n  \n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no polygon in stdin"));
}

#[test]
fn missing_file() {
    geohash_cmd()
        .args(["-f", "/nonexistent/area.wkt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to read"));
}
