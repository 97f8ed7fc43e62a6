mod cli;
mod config;
mod detect;
mod error;
mod input;
mod output;

use clap::Parser;
use cli::{Cli, OutputFormat};
use error::exit_with_error;
use input::InputSource;
use polygon_geohash::GeohashCoverer;

/// Logs go to stderr and stay silent unless `--verbose` asks for them, so
/// the cell list on stdout can be piped as is. `RUST_LOG` refines the
/// verbose level.
fn init_tracing(cli: &Cli) {
    let filter = match (cli.verbose, cli.quiet) {
        (true, false) => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        _ => tracing_subscriber::EnvFilter::new("off"),
    };

    let ansi = !(cli.no_color || std::env::var_os("NO_COLOR").is_some());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(ansi)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    // Errors go to stderr, so piping stdout keeps them colored.
    if cli.no_color || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    init_tracing(&cli);

    if let Err(e) = run(cli) {
        exit_with_error(e);
    }
}

fn run(cli: Cli) -> error::CliResult<()> {
    let loaded = config::load_config(cli.config.as_deref())?;
    let covering_config = config::apply_overrides(loaded, &cli)?;

    let source = input::resolve_input(
        cli.expr.as_deref(),
        cli.polygon.as_deref(),
        cli.file.as_deref(),
    )?;
    let content = input::read_input(&source)?;
    let path = match &source {
        InputSource::File(path) => Some(path.as_path()),
        _ => None,
    };
    let format = detect::detect_polygon_format(path, &content)?;
    let polygon = detect::parse_polygon(&content, format)?;

    let coverer = GeohashCoverer::new(covering_config)?;
    let (geohashes, stats) = coverer.cover_with_stats(&polygon)?;
    tracing::info!(
        input_format = ?format,
        precision = coverer.config().precision,
        mode = %coverer.config().mode,
        rows = stats.rows,
        segments = stats.segments_scanned,
        visited = stats.cells_visited,
        cells = stats.cells_emitted,
        "Covering generated"
    );

    let text = output::format_covering(&geohashes, coverer.config(), cli.format)?;
    if !text.is_empty() || cli.format != OutputFormat::Lines {
        println!("{text}");
    }
    Ok(())
}
