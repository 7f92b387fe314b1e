pub mod schema;

pub use schema::{AdaptiveBarConfig, LayoutConfig, MeasureConfig, PackerConfig};

use formbar_core::{LayoutError, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `LayoutConfig::default()` if
/// the file doesn't exist so the engine always has sensible metrics.
pub fn load(path: impl AsRef<Path>) -> Result<LayoutConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(LayoutConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| LayoutError::Config(format!("cannot read '{}': {e}", path.display())))?;

    parse(&raw)
}

/// Parse configuration from TOML text.
pub fn parse(raw: &str) -> Result<LayoutConfig> {
    toml::from_str(raw).map_err(|e| LayoutError::Config(format!("TOML parse error: {e}")))
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("formbar").join("formbar.toml")
}
