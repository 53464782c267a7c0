//! Folder settings for daily and weekly notes
//!
//! Each provider answers "where do notes of this kind live and how are they
//! named"; providers are layered and merged field by field.

mod obsidian;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::consts::{DEFAULT_DAILY_FORMAT, DEFAULT_WEEKLY_FOLDER};

pub(crate) use obsidian::ObsidianFolders;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NoteKind {
    Daily,
    Weekly,
}

/// Folder and name format for one kind of note; either may be unset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct FolderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) format: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl FolderConfig {
    pub(crate) fn new(folder: Option<String>, format: Option<String>) -> Self {
        Self {
            folder: non_blank(folder),
            format: non_blank(format),
        }
    }

    /// Fill unset fields from `fallback`
    pub(crate) fn or(self, fallback: FolderConfig) -> FolderConfig {
        FolderConfig {
            folder: self.folder.or(fallback.folder),
            format: self.format.or(fallback.format),
        }
    }

    fn is_empty(&self) -> bool {
        self.folder.is_none() && self.format.is_none()
    }
}

/// Source of folder settings
pub(crate) trait FolderSettings {
    /// Name shown in debug output
    fn name(&self) -> &'static str;

    fn folder_config(&self, kind: NoteKind) -> Option<FolderConfig>;
}

/// Folder settings from the `[daily]` / `[weekly]` tables of the config file
pub(crate) struct ConfigFolders<'a> {
    config: &'a Config,
}

impl<'a> ConfigFolders<'a> {
    pub(crate) fn new(config: &'a Config) -> Self {
        Self { config }
    }
}

impl FolderSettings for ConfigFolders<'_> {
    fn name(&self) -> &'static str {
        "config"
    }

    fn folder_config(&self, kind: NoteKind) -> Option<FolderConfig> {
        let entry = match kind {
            NoteKind::Daily => self.config.daily.as_ref(),
            NoteKind::Weekly => self.config.weekly.as_ref(),
        }?;
        let cfg = FolderConfig::new(entry.folder.clone(), entry.format.clone());
        (!cfg.is_empty()).then_some(cfg)
    }
}

/// Providers in priority order; the first one to set a field wins
pub(crate) struct LayeredFolders<'a> {
    layers: Vec<Box<dyn FolderSettings + 'a>>,
}

impl<'a> LayeredFolders<'a> {
    pub(crate) fn new() -> Self {
        Self { layers: Vec::new() }
    }

    pub(crate) fn with(mut self, layer: impl FolderSettings + 'a) -> Self {
        self.layers.push(Box::new(layer));
        self
    }
}

impl FolderSettings for LayeredFolders<'_> {
    fn name(&self) -> &'static str {
        "layered"
    }

    fn folder_config(&self, kind: NoteKind) -> Option<FolderConfig> {
        let merged = self
            .layers
            .iter()
            .filter_map(|layer| {
                let cfg = layer.folder_config(kind)?;
                tracing::debug!(source = layer.name(), ?kind, ?cfg, "folder settings layer");
                Some(cfg)
            })
            .fold(FolderConfig::default(), FolderConfig::or);
        (!merged.is_empty()).then_some(merged)
    }
}

/// Folder settings with defaults applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedFolders {
    pub(crate) daily_folder: String,
    pub(crate) daily_format: String,
    pub(crate) weekly_folder: String,
    pub(crate) weekly_format: Option<String>,
}

impl ResolvedFolders {
    pub(crate) fn resolve(settings: &dyn FolderSettings) -> Self {
        let daily = settings.folder_config(NoteKind::Daily).unwrap_or_default();
        let weekly = settings.folder_config(NoteKind::Weekly).unwrap_or_default();
        Self {
            daily_folder: trim_folder(daily.folder.as_deref().unwrap_or("")),
            daily_format: daily
                .format
                .unwrap_or_else(|| DEFAULT_DAILY_FORMAT.to_string()),
            weekly_folder: trim_folder(weekly.folder.as_deref().unwrap_or(DEFAULT_WEEKLY_FOLDER)),
            weekly_format: weekly.format,
        }
    }

    /// Folders whose contents never count as "updated files"
    pub(crate) fn excluded_folders(&self) -> Vec<String> {
        [&self.daily_folder, &self.weekly_folder]
            .into_iter()
            .filter(|f| !f.is_empty())
            .cloned()
            .collect()
    }
}

impl Default for ResolvedFolders {
    fn default() -> Self {
        Self::resolve(&LayeredFolders::new())
    }
}

fn trim_folder(folder: &str) -> String {
    folder.trim().trim_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        daily: Option<FolderConfig>,
        weekly: Option<FolderConfig>,
    }

    impl FolderSettings for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn folder_config(&self, kind: NoteKind) -> Option<FolderConfig> {
            match kind {
                NoteKind::Daily => self.daily.clone(),
                NoteKind::Weekly => self.weekly.clone(),
            }
        }
    }

    fn cfg(folder: Option<&str>, format: Option<&str>) -> FolderConfig {
        FolderConfig::new(folder.map(String::from), format.map(String::from))
    }

    #[test]
    fn defaults_when_nothing_configured() {
        let resolved = ResolvedFolders::default();
        assert_eq!(resolved.daily_folder, "");
        assert_eq!(resolved.daily_format, "YYYY-MM-DD");
        assert_eq!(resolved.weekly_folder, "Weekly");
        assert_eq!(resolved.weekly_format, None);
        assert_eq!(resolved.excluded_folders(), vec!["Weekly".to_string()]);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let c = cfg(Some("  "), Some(""));
        assert_eq!(c, FolderConfig::default());
    }

    #[test]
    fn layers_merge_field_by_field() {
        let layered = LayeredFolders::new()
            .with(Fixed {
                daily: Some(cfg(Some("Journal"), None)),
                weekly: None,
            })
            .with(Fixed {
                daily: Some(cfg(Some("Ignored"), Some("DD-MM-YYYY"))),
                weekly: Some(cfg(Some("/Reviews/"), Some("YYYY-[W]WW"))),
            });

        let resolved = ResolvedFolders::resolve(&layered);
        assert_eq!(resolved.daily_folder, "Journal");
        assert_eq!(resolved.daily_format, "DD-MM-YYYY");
        assert_eq!(resolved.weekly_folder, "Reviews");
        assert_eq!(resolved.weekly_format.as_deref(), Some("YYYY-[W]WW"));
        assert_eq!(
            resolved.excluded_folders(),
            vec!["Journal".to_string(), "Reviews".to_string()]
        );
    }

    #[test]
    fn config_folders_reads_tables() {
        let config = Config {
            daily: Some(cfg(Some("Daily"), None)),
            weekly: Some(cfg(None, None)),
            ..Config::default()
        };
        let folders = ConfigFolders::new(&config);
        assert_eq!(
            folders.folder_config(NoteKind::Daily),
            Some(cfg(Some("Daily"), None))
        );
        assert_eq!(folders.folder_config(NoteKind::Weekly), None);
    }
}
