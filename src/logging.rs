//! File logging for the play session
//!
//! The terminal belongs to the UI while a game runs, so events go to a file.
//! Without `--log-file` no subscriber is installed and events are dropped.

use anyhow::{Context, Result, anyhow};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Install a global subscriber writing to `path`; `RUST_LOG` overrides the
/// default `info` level
pub fn init_file_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!("Failed to install logger: {err}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_land_in_file() {
        let path = std::env::temp_dir().join(format!("grid_snake_{}.log", std::process::id()));
        init_file_logging(&path).unwrap();

        tracing::error!("board exploded");

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("board exploded"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let path = Path::new("/nonexistent-grid-snake-dir/session.log");
        let err = init_file_logging(path).unwrap_err();
        assert!(err.to_string().contains("Failed to create log file"));
    }
}
