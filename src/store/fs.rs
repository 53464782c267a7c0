//! Filesystem-backed document store rooted at a vault directory

use std::fs;
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::StoreError;

use super::{DocumentEntry, DocumentStore};

#[derive(Debug, Clone)]
pub(crate) struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub(crate) fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub(crate) fn root(&self) -> &Path {
        &self.root
    }

    /// Location of a vault path under the root; `..` segments are refused
    fn resolve(&self, path: &str) -> Result<PathBuf, StoreError> {
        let mut full = self.root.clone();
        for part in path.split('/').filter(|p| !p.is_empty() && *p != ".") {
            if part == ".." {
                return Err(StoreError::OutsideVault {
                    path: path.to_string(),
                });
            }
            full.push(part);
        }
        Ok(full)
    }

    /// Vault-relative `/`-separated path, or None for hidden entries
    fn relative(&self, full: &Path) -> Option<String> {
        // glob drops a leading `./`, so compare both sides without it
        let root = without_cur_dir(&self.root);
        let full = without_cur_dir(full);
        let rel = full.strip_prefix(&root).ok()?;
        let mut parts = Vec::new();
        for component in rel.components() {
            let Component::Normal(part) = component else {
                continue;
            };
            let part = part.to_str()?;
            if part.starts_with('.') {
                return None;
            }
            parts.push(part);
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("/"))
        }
    }
}

fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

impl DocumentStore for FsStore {
    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_ok_and(|full| full.is_file())
    }

    fn read(&self, path: &str) -> Result<String, StoreError> {
        fs::read_to_string(self.resolve(path)?).map_err(|e| StoreError::from_io(path, e))
    }

    fn write(&self, path: &str, content: &str) -> Result<(), StoreError> {
        fs::write(self.resolve(path)?, content).map_err(|e| StoreError::from_io(path, e))
    }

    fn create_folder(&self, path: &str) -> Result<(), StoreError> {
        let full = self.resolve(path)?;
        if full.exists() {
            return Err(StoreError::AlreadyExists {
                path: path.to_string(),
            });
        }
        fs::create_dir_all(&full).map_err(|e| StoreError::from_io(path, e))
    }

    fn list_all(&self) -> Result<Vec<DocumentEntry>, StoreError> {
        let root_display = self.root.display().to_string();
        let pattern = format!("{}/**/*", glob::Pattern::escape(&root_display));
        let entries = glob::glob(&pattern).map_err(|e| StoreError::Io {
            path: root_display.clone(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()),
        })?;

        let mut documents = Vec::new();
        for entry in entries {
            let full = match entry {
                Ok(full) => full,
                Err(err) => {
                    debug!("skipping unreadable entry: {err}");
                    continue;
                }
            };
            if !full.is_file() {
                continue;
            }
            if let Some(rel) = self.relative(&full) {
                documents.push(DocumentEntry::from_path(&rel));
            }
        }
        debug!(count = documents.len(), root = %root_display, "listed vault documents");
        Ok(documents)
    }

    fn modified_at(&self, path: &str) -> Result<DateTime<Utc>, StoreError> {
        let meta = fs::metadata(self.resolve(path)?).map_err(|e| StoreError::from_io(path, e))?;
        let modified = meta.modified().map_err(|e| StoreError::from_io(path, e))?;
        Ok(DateTime::<Utc>::from(modified))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_file(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn read_write_round_trip_and_exists() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());
        assert!(!store.exists("Weekly/2025-W22.md"));

        store.create_folder("Weekly").unwrap();
        store.write("Weekly/2025-W22.md", "summary").unwrap();
        assert!(store.exists("Weekly/2025-W22.md"));
        assert_eq!(store.read("Weekly/2025-W22.md").unwrap(), "summary");
    }

    #[test]
    fn read_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());
        assert!(matches!(
            store.read("nope.md"),
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            store.modified_at("nope.md"),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn create_folder_twice_reports_already_exists() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());
        store.create_folder("Weekly/Archive").unwrap();
        assert!(dir.path().join("Weekly").join("Archive").is_dir());
        assert!(matches!(
            store.create_folder("Weekly/Archive"),
            Err(StoreError::AlreadyExists { .. })
        ));
    }

    #[test]
    fn exists_is_false_for_folders() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());
        store.create_folder("Daily").unwrap();
        assert!(!store.exists("Daily"));
    }

    #[test]
    fn list_all_skips_hidden_entries_and_folders() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "Daily/2025-05-26.md", "a");
        write_file(dir.path(), "Projects/plan.md", "b");
        write_file(dir.path(), "scratch.tmp", "c");
        write_file(dir.path(), ".obsidian/daily-notes.json", "{}");
        write_file(dir.path(), "Projects/.hidden.md", "d");
        write_file(dir.path(), ".weekdigest.lock", "");

        let store = FsStore::new(dir.path());
        let mut paths: Vec<_> = store
            .list_all()
            .unwrap()
            .into_iter()
            .map(|e| e.path)
            .collect();
        paths.sort();
        assert_eq!(
            paths,
            vec!["Daily/2025-05-26.md", "Projects/plan.md", "scratch.tmp"]
        );
    }

    #[test]
    fn relative_handles_dot_root() {
        let store = FsStore::new(".");
        assert_eq!(
            store.relative(Path::new("Projects/plan.md")).as_deref(),
            Some("Projects/plan.md")
        );
        assert_eq!(
            store.relative(Path::new("./Projects/plan.md")).as_deref(),
            Some("Projects/plan.md")
        );
        assert_eq!(store.relative(Path::new("top.md")).as_deref(), Some("top.md"));
        assert_eq!(store.relative(Path::new(".obsidian/app.json")), None);
    }

    #[test]
    fn list_all_with_relative_root() {
        // unit tests run from the package root
        let dir = tempfile::Builder::new()
            .prefix("fs-store-")
            .tempdir_in(env!("CARGO_MANIFEST_DIR"))
            .unwrap();
        write_file(dir.path(), "top.md", "a");
        write_file(dir.path(), "Projects/plan.md", "b");

        let name = dir.path().file_name().unwrap();
        let store = FsStore::new(Path::new(".").join(name));
        let mut paths: Vec<_> = store
            .list_all()
            .unwrap()
            .into_iter()
            .map(|e| e.path)
            .collect();
        paths.sort();
        assert_eq!(paths, vec!["Projects/plan.md", "top.md"]);
    }

    #[test]
    fn parent_segments_are_refused() {
        let parent = tempfile::tempdir().unwrap();
        let vault = parent.path().join("vault");
        fs::create_dir_all(&vault).unwrap();
        write_file(parent.path(), "outside.md", "secret");

        let store = FsStore::new(&vault);
        assert!(!store.exists("../outside.md"));
        assert!(matches!(
            store.read("../outside.md"),
            Err(StoreError::OutsideVault { .. })
        ));
        assert!(matches!(
            store.write("Notes/../../outside.md", "replaced"),
            Err(StoreError::OutsideVault { .. })
        ));
        assert!(matches!(
            store.create_folder("../elsewhere"),
            Err(StoreError::OutsideVault { .. })
        ));
        assert!(matches!(
            store.modified_at("../outside.md"),
            Err(StoreError::OutsideVault { .. })
        ));
        assert_eq!(
            fs::read_to_string(parent.path().join("outside.md")).unwrap(),
            "secret"
        );
        assert!(!parent.path().join("elsewhere").exists());
    }

    #[test]
    fn modified_at_is_recent_for_new_file() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "a.md", "x");
        let store = FsStore::new(dir.path());
        let modified = store.modified_at("a.md").unwrap();
        let age = Utc::now() - modified;
        assert!(age.num_seconds().abs() < 120);
    }
}
