//! Collectors that read the document store for one run

mod updated;
mod window;

pub(crate) use updated::scan_updated_files;
pub(crate) use window::{NoteStatus, WindowDay, collect_daily_notes, inspect_window};
