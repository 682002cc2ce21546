// Codec settings loaded from TOML

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Forward codec diagnostics to the log
    #[serde(default)]
    pub debug: bool,

    /// Worker threads for batch decoding, 0 lets rayon decide
    #[serde(default)]
    pub thread_count: usize,

    #[serde(default = "default_export_prefix")]
    pub export_prefix: String,

    #[serde(default = "default_write_export_config")]
    pub write_export_config: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            debug: false,
            thread_count: 0,
            export_prefix: default_export_prefix(),
            write_export_config: default_write_export_config(),
        }
    }
}

impl CodecConfig {
    /// `<config dir>/xcursor-codec/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("xcursor-codec").join("config.toml"))
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml_string()?)
            .with_context(|| format!("Failed to write config {}", path.display()))
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Loads the config at `path`, or defaults when the file does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}

fn default_export_prefix() -> String {
    "cursor".to_string()
}

fn default_write_export_config() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_from_empty_toml() {
        let config = CodecConfig::from_toml_str("").unwrap();
        assert_eq!(config, CodecConfig::default());
        assert_eq!(config.export_prefix, "cursor");
        assert!(config.write_export_config);
        assert!(!config.debug);
    }

    #[test]
    fn test_partial_toml() {
        let config = CodecConfig::from_toml_str("debug = true\nthread_count = 4\n").unwrap();
        assert!(config.debug);
        assert_eq!(config.thread_count, 4);
        assert_eq!(config.export_prefix, "cursor");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = CodecConfig {
            export_prefix: "wait".to_string(),
            write_export_config: false,
            ..CodecConfig::default()
        };
        config.save_to_file(&path).unwrap();

        assert_eq!(CodecConfig::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempdir().unwrap();
        let config = CodecConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, CodecConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "thread_count = \"many\"").unwrap();
        assert!(CodecConfig::load_from_file(&path).is_err());
    }
}
