use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_TABLE_NAME_PREFIX: &str = "Table";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Prefix for the names of newly added tables ("Table 2", "Table 3", ...).
    #[serde(default)]
    pub table_name_prefix: Option<String>,

    /// Whether the store starts with the demo customers and tasks.
    #[serde(default)]
    pub seed_demo_data: Option<bool>,
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/crm/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("crm/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("crm\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    /// Load from the platform config file, falling back to defaults when the
    /// file is missing or malformed.
    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        std::fs::read_to_string(path)
            .ok()
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default()
    }

    pub fn effective_table_name_prefix(&self) -> &str {
        self.table_name_prefix
            .as_deref()
            .unwrap_or(DEFAULT_TABLE_NAME_PREFIX)
    }

    pub fn effective_seed_demo_data(&self) -> bool {
        self.seed_demo_data.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.effective_table_name_prefix(), "Table");
        assert!(config.effective_seed_demo_data());
    }

    #[test]
    fn test_parse_toml() {
        let config: AppConfig =
            toml::from_str("table_name_prefix = \"Sheet\"\nseed_demo_data = false\n").unwrap();
        assert_eq!(config.effective_table_name_prefix(), "Sheet");
        assert!(!config.effective_seed_demo_data());
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/crm/config.toml"));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_malformed_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "table_name_prefix = [not toml\n").unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "table_name_prefix = \"Sheet\"\n").unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.effective_table_name_prefix(), "Sheet");
        assert!(config.effective_seed_demo_data());
    }
}
