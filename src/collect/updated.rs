//! Documents modified during the window

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::core::{IgnoreSet, UpdatedFileRecord};
use crate::error::StoreError;
use crate::store::DocumentStore;

fn in_excluded_folder(path: &str, excluded_folders: &[String]) -> bool {
    excluded_folders
        .iter()
        .filter(|f| !f.is_empty())
        .any(|folder| {
            path.strip_prefix(folder.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
        })
}

/// Every document modified strictly after `cutoff`, outside the excluded
/// folders and not matching an ignore pattern, newest first.
pub(crate) fn scan_updated_files(
    store: &dyn DocumentStore,
    cutoff: DateTime<Utc>,
    excluded_folders: &[String],
    ignore: &IgnoreSet,
) -> Result<Vec<UpdatedFileRecord>, StoreError> {
    let mut records = Vec::new();

    for entry in store.list_all()? {
        if in_excluded_folder(&entry.path, excluded_folders) {
            continue;
        }
        if ignore.is_ignored(&entry.path) {
            debug!("ignoring {}", entry.path);
            continue;
        }
        let modified_at = store.modified_at(&entry.path)?;
        if modified_at <= cutoff {
            continue;
        }
        records.push(UpdatedFileRecord {
            path: entry.path,
            name: entry.name,
            modified_at,
        });
    }

    // Stable: equal timestamps keep enumeration order
    records.sort_by(|a, b| b.modified_at.cmp(&a.modified_at));
    debug!(count = records.len(), %cutoff, "updated files");
    Ok(records)
}
