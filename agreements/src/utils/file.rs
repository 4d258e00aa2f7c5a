//! File utility functions

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Expand a path string to an absolute path.
///
/// Handles `~` / `~/path` (home directory) and resolves relative paths
/// against the current directory. Absolute paths pass through unchanged.
///
/// ```text
/// expand_path("~/.erm-agreements") // -> /home/user/.erm-agreements
/// expand_path("./rows.json")       // -> /current/dir/rows.json
/// expand_path("/etc/config")       // -> /etc/config
/// ```
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();

    if path.is_empty() {
        return std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    }

    let expanded = if path == "~" {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from(path))
    } else if let Some(rest) = path.strip_prefix("~/") {
        dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path))
    } else {
        PathBuf::from(path)
    };

    if expanded.is_relative() {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    } else {
        expanded
    }
}

/// Read a whole file, or stdin when no path is given
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            let path = expand_path(&path.to_string_lossy());
            tracing::debug!(path = %path.display(), "Reading input file");
            std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read input file: {}", path.display()))
        }
        None => {
            tracing::debug!("Reading input from stdin");
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read input from stdin")?;
            Ok(content)
        }
    }
}
