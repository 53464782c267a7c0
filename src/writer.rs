//! Writing the aggregate note
//!
//! Two sinks: a new note in the weekly folder, or the summary inserted
//! into an existing document at a given line.

use tracing::debug;

use crate::config::OverwritePolicy;
use crate::consts::NOTE_EXTENSION;
use crate::core::{IsoWeek, UpdatedFileRecord, format_note_name};
use crate::error::{AppError, StoreError};
use crate::folders::ResolvedFolders;
use crate::store::DocumentStore;

/// Where a run's output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum OutputSink {
    /// Create the weekly note for the current ISO week
    NewNote,
    /// Insert into an existing document before 1-based `line` (end when None)
    Insert { path: String, line: Option<usize> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WriteOutcome {
    Created,
    Overwritten,
}

/// Vault-relative path of the weekly note for `week`.
pub(crate) fn destination_path(folders: &ResolvedFolders, week: IsoWeek) -> String {
    let name = format_note_name(folders.weekly_format.as_deref(), week);
    if folders.weekly_folder.is_empty() {
        format!("{name}.{NOTE_EXTENSION}")
    } else {
        format!("{}/{name}.{NOTE_EXTENSION}", folders.weekly_folder)
    }
}

/// Refuse early when the policy forbids replacing an existing note.
pub(crate) fn check_destination(
    store: &dyn DocumentStore,
    path: &str,
    policy: OverwritePolicy,
) -> Result<(), AppError> {
    if policy == OverwritePolicy::Refuse && store.exists(path) {
        return Err(AppError::DestinationExists {
            path: path.to_string(),
        });
    }
    Ok(())
}

/// Note body: the summary, then the updated-file links when there are any.
pub(crate) fn render_note(summary: &str, updated: Option<&[UpdatedFileRecord]>) -> String {
    let mut body = summary.trim_end().to_string();
    body.push('\n');

    if let Some(files) = updated.filter(|f| !f.is_empty()) {
        body.push_str("\n## Updated files\n\n");
        for file in files {
            body.push_str(&format!("- [[{}]]\n", file.name));
        }
    }
    body
}

fn parent_folder(path: &str) -> Option<&str> {
    path.rsplit_once('/').map(|(parent, _)| parent)
}

fn ensure_folder(store: &dyn DocumentStore, folder: &str) -> Result<(), StoreError> {
    match store.create_folder(folder) {
        Ok(()) => {
            debug!("created folder {folder}");
            Ok(())
        }
        Err(StoreError::AlreadyExists { .. }) => Ok(()),
        Err(e) => Err(e),
    }
}

pub(crate) fn write_new_note(
    store: &dyn DocumentStore,
    path: &str,
    body: &str,
    policy: OverwritePolicy,
) -> Result<WriteOutcome, AppError> {
    check_destination(store, path, policy)?;
    let existed = store.exists(path);

    if let Some(folder) = parent_folder(path) {
        ensure_folder(store, folder)?;
    }
    store.write(path, body)?;

    Ok(if existed {
        WriteOutcome::Overwritten
    } else {
        WriteOutcome::Created
    })
}

/// Insert `text` as its own block before `line` of an existing document.
pub(crate) fn insert_into(
    store: &dyn DocumentStore,
    path: &str,
    line: Option<usize>,
    text: &str,
) -> Result<(), AppError> {
    let existing = store.read(path)?;
    let mut lines: Vec<&str> = existing.lines().collect();
    let at = line
        .map(|l| l.saturating_sub(1).min(lines.len()))
        .unwrap_or(lines.len());

    let tail = lines.split_off(at);
    let before = lines.len();
    lines.extend(text.trim_end().lines());
    let inserted = lines.len() - before;
    lines.extend(tail);

    let mut updated = lines.join("\n");
    updated.push('\n');
    store.write(path, &updated)?;
    debug!("inserted {inserted} lines into {path} at line {}", at + 1);
    Ok(())
}
