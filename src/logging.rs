//! Tracing subscriber setup
//!
//! Interactive modes draw over the whole terminal, so they log to a file instead
//! of stdout. The level comes from `RUST_LOG` and defaults to `info`.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    filter_from(&std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default())
}

/// Directives win; `info` applies only when there are none
fn filter_from(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .parse_lossy(directives)
}

/// Log to stdout
pub fn init_stdout() {
    tracing_subscriber::fmt().with_env_filter(env_filter()).init();
}

/// Append logs to `path`, without colors
pub fn init_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {:?}", parent))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_defaults_to_info() {
        assert_eq!(filter_from("").max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_directives_can_raise_verbosity() {
        assert_eq!(filter_from("debug").max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(filter_from("trace").max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn test_directives_can_lower_verbosity() {
        assert_eq!(filter_from("warn").max_level_hint(), Some(LevelFilter::WARN));
    }
}
