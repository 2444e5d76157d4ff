use crate::core::format::{Formatter, Locale};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HomeConfig {
    #[serde(default = "default_top_categories")]
    pub top_categories: usize,
    #[serde(default = "default_recent_count")]
    pub recent_count: usize,
}

fn default_top_categories() -> usize {
    3
}

fn default_recent_count() -> usize {
    5
}

fn default_locale() -> String {
    "en-US".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Default for HomeConfig {
    fn default() -> Self {
        HomeConfig {
            top_categories: default_top_categories(),
            recent_count: default_recent_count(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub data_path: Option<String>,
    #[serde(default)]
    pub home: HomeConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            locale: default_locale(),
            currency: default_currency(),
            data_path: None,
            home: HomeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the default config file, or built-in defaults if it does not exist.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "spendbook", "spendbook")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("org", "spendbook", "spendbook")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Configured locale, falling back to en-US when unsupported.
    pub fn locale(&self) -> Locale {
        self.locale.parse().unwrap_or_else(|e| {
            warn!("{}, falling back to en-US", e);
            Locale::EnUs
        })
    }

    pub fn formatter(&self) -> Formatter {
        Formatter::new(self.locale(), &self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
locale: "es-CL"
currency: "CLP"
data_path: "/tmp/spendbook"
home:
  top_categories: 4
  recent_count: 10
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.locale(), Locale::EsCl);
        assert_eq!(config.currency, "CLP");
        assert_eq!(config.data_path.as_deref(), Some("/tmp/spendbook"));
        assert_eq!(
            config.default_data_path().unwrap(),
            PathBuf::from("/tmp/spendbook")
        );
        assert_eq!(config.home.top_categories, 4);
        assert_eq!(config.home.recent_count, 10);
        assert_eq!(config.formatter().format_currency(1500.0), "$1.500");
    }

    #[test]
    fn test_config_defaults() {
        let config: AppConfig = serde_yaml::from_str("currency: EUR\n").unwrap();
        assert_eq!(config.locale(), Locale::EnUs);
        assert_eq!(config.currency, "EUR");
        assert!(config.data_path.is_none());
        assert_eq!(config.home.top_categories, 3);
        assert_eq!(config.home.recent_count, 5);

        let config: AppConfig = serde_yaml::from_str("home:\n  recent_count: 2\n").unwrap();
        assert_eq!(config.home.top_categories, 3);
        assert_eq!(config.home.recent_count, 2);
    }

    #[test]
    fn test_unknown_locale_falls_back() {
        let config: AppConfig = serde_yaml::from_str("locale: fr-FR\n").unwrap();
        assert_eq!(config.locale(), Locale::EnUs);
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load_from_path(dir.path().join("missing.yaml"));
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}
