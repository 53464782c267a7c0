use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ConfigError;
use crate::folders::FolderConfig;

/// Environment variable pointing at an explicit config file
pub(crate) const CONFIG_ENV: &str = "WEEKDIGEST_CONFIG";

/// What to do when the weekly note for this period already exists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OverwritePolicy {
    #[default]
    Refuse,
    Overwrite,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) api_key: String,
    #[serde(default)]
    pub(crate) ignore_patterns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) overwrite: Option<OverwritePolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) include_updated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) daily: Option<FolderConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) weekly: Option<FolderConfig>,
}

impl Config {
    pub(crate) fn overwrite_policy(&self) -> OverwritePolicy {
        self.overwrite.unwrap_or_default()
    }

    pub(crate) fn include_updated(&self) -> bool {
        self.include_updated.unwrap_or(true)
    }

    pub(crate) fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Config with the API key masked, for display
    pub(crate) fn redacted(&self) -> Self {
        let mut shown = self.clone();
        if self.has_api_key() {
            let key = self.api_key.trim();
            let tail: String = key
                .chars()
                .rev()
                .take(4)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            shown.api_key = if key.chars().count() > 8 {
                format!("****{tail}")
            } else {
                "****".to_string()
            };
        }
        shown
    }

    /// Add an ignore pattern; returns false if it was already present
    pub(crate) fn add_ignore_pattern(&mut self, pattern: &str) -> bool {
        let pattern = pattern.trim();
        if pattern.is_empty() || self.ignore_patterns.iter().any(|p| p == pattern) {
            return false;
        }
        self.ignore_patterns.push(pattern.to_string());
        true
    }

    /// Remove an ignore pattern; returns false if it was not present
    pub(crate) fn remove_ignore_pattern(&mut self, pattern: &str) -> bool {
        let before = self.ignore_patterns.len();
        self.ignore_patterns.retain(|p| p != pattern.trim());
        self.ignore_patterns.len() != before
    }
}

/// A config together with the file it was loaded from (and is saved to)
#[derive(Debug, Clone)]
pub(crate) struct ConfigFile {
    pub(crate) path: PathBuf,
    pub(crate) config: Config,
}

impl ConfigFile {
    /// Load the first existing config; defaults when none exists.
    pub(crate) fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let candidates = match explicit {
            Some(path) => vec![path.to_path_buf()],
            None => Self::get_config_paths(),
        };

        for path in &candidates {
            if path.exists() {
                let config = Self::read(path)?;
                debug!("loaded config from {}", path.display());
                return Ok(Self {
                    path: path.clone(),
                    config,
                });
            }
        }

        let path = candidates
            .into_iter()
            .next()
            .ok_or(ConfigError::NoConfigDir)?;
        debug!("no config file found, defaults apply (saves go to {})", path.display());
        Ok(Self {
            path,
            config: Config::default(),
        })
    }

    fn read(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str::<Config>(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub(crate) fn save(&self) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(&self.config)?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        fs::write(&self.path, content).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!("saved config to {}", self.path.display());
        Ok(())
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. Explicit override: $WEEKDIGEST_CONFIG
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            paths.push(PathBuf::from(path));
        }

        // 2. XDG config: ~/.config/weekdigest/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("weekdigest").join("config.toml"));
        }

        // 3. Platform config dir (e.g. ~/Library/Application Support on macOS)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("weekdigest").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 4. Home directory: ~/.weekdigest.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".weekdigest.toml"));
        }

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_paths() {
        let paths = ConfigFile::get_config_paths();
        assert!(!paths.is_empty());
    }

    #[test]
    fn defaults_are_empty_key_and_patterns() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.api_key, "");
        assert!(config.ignore_patterns.is_empty());
        assert_eq!(config.overwrite_policy(), OverwritePolicy::Refuse);
        assert!(config.include_updated());
        assert!(!config.has_api_key());
    }

    #[test]
    fn loaded_values_override_defaults() {
        let config: Config = toml::from_str(
            r#"
api_key = "sk-test"
ignore_patterns = ["Templates/**", "**/*.tmp"]
overwrite = "overwrite"
include_updated = false

[daily]
folder = "Journal"
format = "YYYY-MM-DD"

[weekly]
format = "YYYY-[W]WW"
"#,
        )
        .unwrap();
        assert!(config.has_api_key());
        assert_eq!(config.ignore_patterns, vec!["Templates/**", "**/*.tmp"]);
        assert_eq!(config.overwrite_policy(), OverwritePolicy::Overwrite);
        assert!(!config.include_updated());
        assert_eq!(
            config.daily.as_ref().and_then(|d| d.folder.as_deref()),
            Some("Journal")
        );
        assert_eq!(
            config.weekly.as_ref().and_then(|w| w.format.as_deref()),
            Some("YYYY-[W]WW")
        );
    }

    #[test]
    fn whitespace_key_is_not_a_key() {
        let config = Config {
            api_key: "   ".to_string(),
            ..Config::default()
        };
        assert!(!config.has_api_key());
    }

    #[test]
    fn redacted_masks_key() {
        let config = Config {
            api_key: "sk-abcdefghijkl1234".to_string(),
            ..Config::default()
        };
        assert_eq!(config.redacted().api_key, "****1234");

        let short = Config {
            api_key: "abc".to_string(),
            ..Config::default()
        };
        assert_eq!(short.redacted().api_key, "****");
        assert_eq!(Config::default().redacted().api_key, "");
    }

    #[test]
    fn ignore_pattern_edits() {
        let mut config = Config::default();
        assert!(config.add_ignore_pattern("**/*.tmp"));
        assert!(!config.add_ignore_pattern("**/*.tmp"));
        assert!(!config.add_ignore_pattern("  "));
        assert!(config.add_ignore_pattern("Archive/**"));
        assert_eq!(config.ignore_patterns, vec!["**/*.tmp", "Archive/**"]);

        assert!(config.remove_ignore_pattern("**/*.tmp"));
        assert!(!config.remove_ignore_pattern("**/*.tmp"));
        assert_eq!(config.ignore_patterns, vec!["Archive/**"]);
    }

    #[test]
    fn save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut file = ConfigFile::load(Some(&path)).unwrap();
        assert_eq!(file.config, Config::default());

        file.config.api_key = "sk-test".to_string();
        file.config.add_ignore_pattern("**/*.tmp");
        file.save().unwrap();

        let reloaded = ConfigFile::load(Some(&path)).unwrap();
        assert_eq!(reloaded.config, file.config);
    }

    #[test]
    fn parse_error_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_key = [").unwrap();
        let err = ConfigFile::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
