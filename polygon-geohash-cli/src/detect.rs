use crate::error::{CliError, CliResult};
use geo_types::{LineString, Polygon};
use polygon_geohash::geometry;
use serde_json::Value;
use std::path::Path;

/// Polygon input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonFormat {
    Wkt,
    GeoJson,
    /// Bare JSON rings: `[[lon, lat], ...]` or `[[[lon, lat], ...], ...]`.
    Rings,
}

/// Detect polygon format from file extension and content.
///
/// Priority: file extension > content sniffing.
pub fn detect_polygon_format(path: Option<&Path>, content: &str) -> CliResult<PolygonFormat> {
    if let Some(p) = path {
        if let Some(ext) = p.extension().and_then(|e| e.to_str()) {
            match ext.to_lowercase().as_str() {
                "wkt" => return Ok(PolygonFormat::Wkt),
                "geojson" => return Ok(PolygonFormat::GeoJson),
                _ => {}
            }
        }
    }
    sniff_polygon_format(content)
}

fn sniff_polygon_format(content: &str) -> CliResult<PolygonFormat> {
    let trimmed = content.trim_start();
    if trimmed.starts_with('{') {
        return Ok(PolygonFormat::GeoJson);
    }
    if trimmed.starts_with('[') {
        return Ok(PolygonFormat::Rings);
    }
    if trimmed.to_uppercase().starts_with("POLYGON") {
        return Ok(PolygonFormat::Wkt);
    }
    Err(CliError::Input(format!(
        "could not detect polygon format\n  {} expected WKT POLYGON, GeoJSON, or [[lon, lat], ...]",
        colored::Colorize::bold(colored::Colorize::cyan("help:"))
    )))
}

/// Parse `content` in the given format.
///
/// Holes are carried through so the covering reports them; nothing else is
/// validated here.
pub fn parse_polygon(content: &str, format: PolygonFormat) -> CliResult<Polygon<f64>> {
    match format {
        PolygonFormat::Wkt => Ok(geometry::parse_wkt_polygon(content.trim())?),
        PolygonFormat::GeoJson => {
            let json: Value = serde_json::from_str(content)?;
            polygon_from_geojson(&json)
        }
        PolygonFormat::Rings => {
            let json: Value = serde_json::from_str(content)?;
            polygon_from_rings(&json)
        }
    }
}

fn polygon_from_geojson(json: &Value) -> CliResult<Polygon<f64>> {
    let geometry = match json.get("type").and_then(Value::as_str) {
        Some("Feature") => json
            .get("geometry")
            .ok_or_else(|| CliError::Input("GeoJSON Feature has no geometry".into()))?,
        _ => json,
    };
    match geometry.get("type").and_then(Value::as_str) {
        Some("Polygon") => {
            let coordinates = geometry
                .get("coordinates")
                .ok_or_else(|| CliError::Input("GeoJSON Polygon has no coordinates".into()))?;
            polygon_from_rings(coordinates)
        }
        Some(other) => Err(CliError::Input(format!(
            "expected a GeoJSON Polygon, got {other}"
        ))),
        None => Err(CliError::Input("GeoJSON object has no type".into())),
    }
}

/// Accept either one ring or a list of rings (exterior first).
fn polygon_from_rings(json: &Value) -> CliResult<Polygon<f64>> {
    let items = json
        .as_array()
        .ok_or_else(|| CliError::Input("expected a JSON array of coordinates".into()))?;

    let nested = items.first().and_then(Value::as_array).is_some_and(|first| {
        first.first().is_some_and(Value::is_array)
    });
    let mut rings = if nested {
        items.iter().map(parse_ring).collect::<CliResult<Vec<_>>>()?
    } else {
        vec![parse_ring(json)?]
    };

    if rings.is_empty() {
        return Err(CliError::Input("polygon has no rings".into()));
    }
    let exterior = rings.remove(0);
    Ok(Polygon::new(exterior, rings))
}

fn parse_ring(json: &Value) -> CliResult<LineString<f64>> {
    let points = json
        .as_array()
        .ok_or_else(|| CliError::Input("ring must be an array of [lon, lat] pairs".into()))?;
    points
        .iter()
        .map(|point| match point.as_array().map(Vec::as_slice) {
            Some([lng, lat, ..]) => match (lng.as_f64(), lat.as_f64()) {
                (Some(lng), Some(lat)) => Ok((lng, lat)),
                _ => Err(CliError::Input(format!("non-numeric coordinate {point}"))),
            },
            _ => Err(CliError::Input(format!("expected [lon, lat], got {point}"))),
        })
        .collect::<CliResult<Vec<(f64, f64)>>>()
        .map(LineString::from)
}
