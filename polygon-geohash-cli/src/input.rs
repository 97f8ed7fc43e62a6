use crate::error::{CliError, CliResult};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

/// Where the polygon comes from.
#[derive(Debug, PartialEq)]
pub enum InputSource {
    /// From a file on disk.
    File(PathBuf),
    /// From the `-e` flag or the positional argument.
    Inline(String),
    /// From stdin (piped).
    Stdin,
}

/// Resolve the input source with priority: `-e` > positional inline > `-f` > stdin.
pub fn resolve_input(
    expr: Option<&str>,
    positional_inline: Option<&str>,
    file_flag: Option<&Path>,
) -> CliResult<InputSource> {
    if let Some(e) = expr {
        return Ok(InputSource::Inline(e.to_string()));
    }
    if let Some(p) = positional_inline {
        return Ok(InputSource::Inline(p.to_string()));
    }
    if let Some(f) = file_flag {
        return Ok(InputSource::File(f.to_path_buf()));
    }
    if !io::stdin().is_terminal() {
        return Ok(InputSource::Stdin);
    }
    Err(CliError::Usage(format!(
        "no polygon provided\n  {} pass it inline, use -f for a file, or pipe via stdin",
        colored::Colorize::bold(colored::Colorize::cyan("help:"))
    )))
}

impl InputSource {
    fn label(&self) -> String {
        match self {
            InputSource::File(path) => path.display().to_string(),
            InputSource::Inline(_) => "the command line".to_string(),
            InputSource::Stdin => "stdin".to_string(),
        }
    }
}

/// Read the polygon text from `source`, trimmed. Blank input is an error.
pub fn read_input(source: &InputSource) -> CliResult<String> {
    let raw = match source {
        InputSource::File(path) => std::fs::read_to_string(path)
            .map_err(|e| CliError::Input(format!("failed to read {}: {e}", path.display())))?,
        InputSource::Inline(text) => text.clone(),
        InputSource::Stdin => io::read_to_string(io::stdin())?,
    };

    let text = raw.trim();
    if text.is_empty() {
        return Err(CliError::Input(format!("no polygon in {}", source.label())));
    }
    Ok(text.to_string())
}
