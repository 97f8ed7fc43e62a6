use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "polygon-geohash",
    about = "Cover a polygon with geohash cells",
    version
)]
pub struct Cli {
    /// Polygon given inline: WKT, GeoJSON, or a JSON ring of [lon, lat] pairs
    pub polygon: Option<String>,

    /// Polygon expression (takes precedence over the positional argument)
    #[arg(short = 'e', long = "expr")]
    pub expr: Option<String>,

    /// Read the polygon from a file
    #[arg(short = 'f', long = "file")]
    pub file: Option<PathBuf>,

    /// Geohash length, 1-12 [default: 6]
    #[arg(short = 'p', long)]
    pub precision: Option<usize>,

    /// Inclusion mode: intersect, envelope, insideOnly or border [default: intersect]
    #[arg(short = 'm', long)]
    pub mode: Option<String>,

    /// Minimum fraction (0-1) of a cell's area that must overlap (intersect mode)
    #[arg(long)]
    pub min_intersect: Option<f64>,

    /// Fail when the covering would exceed this many cells
    #[arg(long)]
    pub max_cells: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Lines)]
    pub format: OutputFormat,

    /// TOML file with covering defaults (flags override it)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output (also respects NO_COLOR env var)
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// How the covering is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One geohash per line
    Lines,
    /// JSON object with the settings and the geohash list
    Json,
    /// Number of cells only
    Count,
}
