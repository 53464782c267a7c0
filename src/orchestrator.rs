//! One summarization run, from collecting notes to writing the result

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::collect::{collect_daily_notes, scan_updated_files};
use crate::config::OverwritePolicy;
use crate::consts::{EMPTY_SUMMARY_FALLBACK, WINDOW_DAYS};
use crate::core::{DateWindow, IgnoreSet, iso_week};
use crate::error::{AppError, StoreError};
use crate::folders::ResolvedFolders;
use crate::store::DocumentStore;
use crate::summarize::{SUMMARY_INSTRUCTIONS, Summarizer, build_user_content};
use crate::writer::{
    OutputSink, WriteOutcome, check_destination, destination_path, insert_into, render_note,
    write_new_note,
};

/// Everything a run needs besides the store and the summarizer
#[derive(Debug, Clone)]
pub(crate) struct RunRequest {
    /// The run instant; the window ends on its local date
    pub(crate) now: DateTime<Utc>,
    pub(crate) window: DateWindow,
    pub(crate) folders: ResolvedFolders,
    pub(crate) ignore: IgnoreSet,
    pub(crate) policy: OverwritePolicy,
    pub(crate) include_updated: bool,
    pub(crate) sink: OutputSink,
    pub(crate) dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RunOutcome {
    Created { path: String, notes: usize },
    Overwritten { path: String, notes: usize },
    Inserted { path: String, notes: usize },
    /// Nothing sent or written; `content` is what would have been sent
    DryRun {
        path: String,
        notes: usize,
        content: String,
    },
}

impl RunOutcome {
    pub(crate) fn path(&self) -> &str {
        match self {
            RunOutcome::Created { path, .. }
            | RunOutcome::Overwritten { path, .. }
            | RunOutcome::Inserted { path, .. }
            | RunOutcome::DryRun { path, .. } => path,
        }
    }
}

pub(crate) fn run(
    store: &dyn DocumentStore,
    summarizer: Option<&dyn Summarizer>,
    request: &RunRequest,
) -> Result<RunOutcome, AppError> {
    let summarizer = match summarizer {
        Some(s) => Some(s),
        None if request.dry_run => None,
        None => return Err(AppError::MissingApiKey),
    };

    let folders = &request.folders;
    let notes = collect_daily_notes(
        store,
        &request.window,
        &folders.daily_folder,
        &folders.daily_format,
    )?;
    if notes.is_empty() {
        return Err(AppError::NoNotes { days: WINDOW_DAYS });
    }
    info!(
        "collected {} daily notes for {}",
        notes.len(),
        request.window.describe()
    );

    let path = match &request.sink {
        OutputSink::NewNote => {
            let path = destination_path(folders, iso_week(request.window.today()));
            check_destination(store, &path, request.policy)?;
            path
        }
        OutputSink::Insert { path, .. } => {
            if !store.exists(path) {
                return Err(StoreError::NotFound { path: path.clone() }.into());
            }
            path.clone()
        }
    };

    let content = build_user_content(&notes);
    let Some(summarizer) = summarizer.filter(|_| !request.dry_run) else {
        return Ok(RunOutcome::DryRun {
            path,
            notes: notes.len(),
            content,
        });
    };

    let summary = summarizer.summarize(SUMMARY_INSTRUCTIONS, &content)?;
    let summary = if summary.trim().is_empty() {
        EMPTY_SUMMARY_FALLBACK.to_string()
    } else {
        summary
    };

    let updated = if request.include_updated {
        let cutoff = request.now - Duration::days(WINDOW_DAYS);
        Some(scan_updated_files(
            store,
            cutoff,
            &folders.excluded_folders(),
            &request.ignore,
        )?)
    } else {
        None
    };
    let body = render_note(&summary, updated.as_deref());
    debug!(chars = body.len(), "rendered note");

    let count = notes.len();
    match &request.sink {
        OutputSink::NewNote => match write_new_note(store, &path, &body, request.policy)? {
            WriteOutcome::Created => Ok(RunOutcome::Created { path, notes: count }),
            WriteOutcome::Overwritten => Ok(RunOutcome::Overwritten { path, notes: count }),
        },
        OutputSink::Insert { line, .. } => {
            insert_into(store, &path, *line, &body)?;
            Ok(RunOutcome::Inserted { path, notes: count })
        }
    }
}
