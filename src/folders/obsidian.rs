//! Folder settings read from an Obsidian vault's `.obsidian` directory
//!
//! Sources, highest priority first:
//! - `.obsidian/plugins/periodic-notes/data.json` (`daily` and `weekly`)
//! - `.obsidian/daily-notes.json` (core Daily Notes plugin, daily only)

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::{FolderConfig, FolderSettings, NoteKind};

/// Raw plugin entry. Some plugin versions store the folder as `path`;
/// `folder` wins when both are present.
#[derive(Debug, Default, Deserialize)]
struct PluginEntry {
    #[serde(default)]
    enabled: Option<bool>,
    #[serde(default)]
    folder: Option<String>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    format: Option<String>,
}

impl PluginEntry {
    fn into_config(self) -> Option<FolderConfig> {
        if self.enabled == Some(false) {
            return None;
        }
        let folder = self
            .folder
            .filter(|f| !f.trim().is_empty())
            .or(self.path);
        let cfg = FolderConfig::new(folder, self.format);
        (!cfg.is_empty()).then_some(cfg)
    }
}

#[derive(Debug, Default, Deserialize)]
struct PeriodicNotes {
    #[serde(default)]
    daily: Option<PluginEntry>,
    #[serde(default)]
    weekly: Option<PluginEntry>,
}

#[derive(Debug, Default)]
pub(crate) struct ObsidianFolders {
    daily: Option<FolderConfig>,
    weekly: Option<FolderConfig>,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let content = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(value) => {
            debug!("loaded folder settings from {}", path.display());
            Some(value)
        }
        Err(e) => {
            warn!("ignoring unreadable settings {}: {}", path.display(), e);
            None
        }
    }
}

impl ObsidianFolders {
    pub(crate) fn load(vault_root: &Path) -> Self {
        let obsidian = vault_root.join(".obsidian");
        let periodic: PeriodicNotes = read_json(
            &obsidian
                .join("plugins")
                .join("periodic-notes")
                .join("data.json"),
        )
        .unwrap_or_default();
        let core_daily: Option<PluginEntry> = read_json(&obsidian.join("daily-notes.json"));

        let periodic_daily = periodic.daily.and_then(PluginEntry::into_config);
        let core_daily = core_daily.and_then(PluginEntry::into_config);
        let daily = match (periodic_daily, core_daily) {
            (Some(p), Some(c)) => Some(p.or(c)),
            (p, c) => p.or(c),
        };

        Self {
            daily,
            weekly: periodic.weekly.and_then(PluginEntry::into_config),
        }
    }
}

impl FolderSettings for ObsidianFolders {
    fn name(&self) -> &'static str {
        "obsidian"
    }

    fn folder_config(&self, kind: NoteKind) -> Option<FolderConfig> {
        match kind {
            NoteKind::Daily => self.daily.clone(),
            NoteKind::Weekly => self.weekly.clone(),
        }
    }
}
