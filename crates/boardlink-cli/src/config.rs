//! Configuration loading and defaults

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub flash: FlashConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to the boards catalog JSON file
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

fn default_catalog_path() -> String {
    "./boards.json".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashConfig {
    /// Default serial port passed to upload tools when none is given
    #[serde(default)]
    pub default_port: Option<String>,
}

impl Default for FlashConfig {
    fn default() -> Self {
        Self { default_port: None }
    }
}

/// Load configuration from file, falling back to defaults when the file
/// does not exist.
pub fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    } else {
        info!(
            path = %path.display(),
            "Configuration file not found, using defaults"
        );
        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_missing_uses_defaults() {
        let config = load_config(Path::new("/no/such/boardlink.toml")).unwrap();
        assert_eq!(config.catalog.path, "./boards.json");
        assert!(config.flash.default_port.is_none());
    }

    #[test]
    fn test_load_partial_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[catalog]\npath = \"/etc/boardlink/boards.json\"\n")
            .unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.catalog.path, "/etc/boardlink/boards.json");
        assert!(config.flash.default_port.is_none());
    }

    #[test]
    fn test_load_full_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"[catalog]\npath = \"boards.json\"\n[flash]\ndefault_port = \"/dev/ttyACM0\"\n",
        )
        .unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.flash.default_port.as_deref(), Some("/dev/ttyACM0"));
    }
}
