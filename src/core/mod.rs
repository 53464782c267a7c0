//! Core module - date windows, week numbers, templates and ignore patterns

mod glob;
mod template;
mod types;
mod week;

pub(crate) use glob::{GlobPattern, IgnoreSet};
pub(crate) use template::{date_label, daily_note_path, format_note_name};
pub(crate) use types::{DailyNoteRecord, DateWindow, UpdatedFileRecord};
pub(crate) use week::{IsoWeek, iso_week};
