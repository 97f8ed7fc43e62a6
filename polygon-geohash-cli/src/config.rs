use crate::cli::Cli;
use crate::error::{CliError, CliResult};
use polygon_geohash::{CoveringConfig, HashMode};
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve a `--config` path against the working directory.
fn resolve_config_path(p: &Path) -> CliResult<PathBuf> {
    let resolved = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if resolved.is_file() {
        Ok(resolved)
    } else {
        Err(CliError::Config(format!(
            "config file not found: {}",
            resolved.display()
        )))
    }
}

/// Load covering defaults from a TOML file, or the built-in defaults when no
/// file is given. Keys missing from the file keep their default values.
pub fn load_config(config_path: Option<&Path>) -> CliResult<CoveringConfig> {
    let Some(path) = config_path else {
        return Ok(CoveringConfig::default());
    };
    let path = resolve_config_path(path)?;
    let content = fs::read_to_string(&path)
        .map_err(|e| CliError::Config(format!("failed to read {}: {e}", path.display())))?;
    toml::from_str(&content)
        .map_err(|e| CliError::Config(format!("invalid config {}: {e}", path.display())))
}

/// Apply command-line flags on top of the loaded config.
pub fn apply_overrides(mut config: CoveringConfig, cli: &Cli) -> CliResult<CoveringConfig> {
    if let Some(precision) = cli.precision {
        config.precision = precision;
    }
    if let Some(mode) = cli.mode.as_deref() {
        config.mode = mode.parse::<HashMode>().map_err(|_| {
            CliError::Usage(format!(
                "unknown mode '{mode}'\n  {} valid modes: intersect, envelope, insideOnly, border",
                colored::Colorize::bold(colored::Colorize::cyan("help:"))
            ))
        })?;
    }
    if let Some(min_intersect) = cli.min_intersect {
        config.min_intersect = min_intersect;
    }
    if let Some(max_cells) = cli.max_cells {
        config.max_cells = Some(max_cells);
    }
    config.validate()?;
    Ok(config)
}
