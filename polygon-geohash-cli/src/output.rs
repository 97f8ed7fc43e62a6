use crate::cli::OutputFormat;
use crate::error::CliResult;
use polygon_geohash::CoveringConfig;
use serde::Serialize;

/// JSON document printed by `--format json`.
#[derive(Debug, Serialize)]
struct CoveringOutput<'a> {
    precision: usize,
    mode: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_intersect: Option<f64>,
    count: usize,
    geohashes: &'a [String],
}

/// Format a covering for display.
pub fn format_covering(
    geohashes: &[String],
    config: &CoveringConfig,
    format: OutputFormat,
) -> CliResult<String> {
    match format {
        OutputFormat::Lines => Ok(geohashes.join("\n")),
        OutputFormat::Count => Ok(geohashes.len().to_string()),
        OutputFormat::Json => {
            let output = CoveringOutput {
                precision: config.precision,
                mode: config.mode.as_str(),
                min_intersect: (config.mode == polygon_geohash::HashMode::Intersect)
                    .then_some(config.min_intersect),
                count: geohashes.len(),
                geohashes,
            };
            Ok(serde_json::to_string_pretty(&output)?)
        }
    }
}
