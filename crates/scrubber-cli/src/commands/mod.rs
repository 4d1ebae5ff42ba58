pub mod config;
pub mod placeholder;
pub mod probe;
pub mod replay;

use std::path::Path;

use anyhow::{Context, Result};
use scrubber_core::config::ScrubberConfig;

/// Load `path` if given, otherwise the built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<ScrubberConfig> {
    match path {
        Some(path) => ScrubberConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(ScrubberConfig::default()),
    }
}
