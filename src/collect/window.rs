//! Daily notes inside the trailing window

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::consts::DATE_FORMAT;
use crate::core::{DailyNoteRecord, DateWindow, date_label, daily_note_path};
use crate::error::StoreError;
use crate::store::DocumentStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum NoteStatus {
    Missing,
    Empty,
    Found,
}

/// What the store holds for one day of the window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct WindowDay {
    pub(crate) date: NaiveDate,
    pub(crate) path: String,
    pub(crate) status: NoteStatus,
}

enum DayNote {
    Missing,
    Blank,
    Present(String),
}

fn load_day(store: &dyn DocumentStore, path: &str) -> Result<DayNote, StoreError> {
    if !store.exists(path) {
        return Ok(DayNote::Missing);
    }
    let content = store.read(path)?;
    if content.trim().is_empty() {
        Ok(DayNote::Blank)
    } else {
        Ok(DayNote::Present(content))
    }
}

/// Collect the non-blank daily notes of the window, oldest first.
///
/// An empty result is not an error; the caller decides how to report it.
pub(crate) fn collect_daily_notes(
    store: &dyn DocumentStore,
    window: &DateWindow,
    folder: &str,
    format: &str,
) -> Result<Vec<DailyNoteRecord>, StoreError> {
    let mut records = Vec::new();

    for date in window.newest_first() {
        let path = daily_note_path(folder, format, date);
        let DayNote::Present(content) = load_day(store, &path)? else {
            debug!("no usable daily note at {path}");
            continue;
        };

        let file_name = path.rsplit('/').next().unwrap_or(&path);
        let label = date_label(format, file_name)
            .unwrap_or_else(|| date.format(DATE_FORMAT).to_string());
        debug!("collected daily note {path} as {label}");
        records.push(DailyNoteRecord {
            date: label,
            content,
        });
    }

    // Summaries read chronologically
    records.reverse();
    Ok(records)
}

/// Status of every day in the window, oldest first
pub(crate) fn inspect_window(
    store: &dyn DocumentStore,
    window: &DateWindow,
    folder: &str,
    format: &str,
) -> Result<Vec<WindowDay>, StoreError> {
    window
        .oldest_first()
        .map(|date| {
            let path = daily_note_path(folder, format, date);
            let status = match load_day(store, &path)? {
                DayNote::Missing => NoteStatus::Missing,
                DayNote::Blank => NoteStatus::Empty,
                DayNote::Present(_) => NoteStatus::Found,
            };
            Ok(WindowDay { date, path, status })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn window() -> DateWindow {
        // 2025-05-20 ..= 2025-05-26
        DateWindow::ending(date(2025, 5, 26))
    }

    #[test]
    fn days_one_three_seven_yield_three_records_oldest_first() {
        let store = MemoryStore::new()
            .with_doc("Daily/2025-05-20.md", "day one")
            .with_doc("Daily/2025-05-22.md", "day three")
            .with_doc("Daily/2025-05-26.md", "day seven");

        let records = collect_daily_notes(&store, &window(), "Daily", "YYYY-MM-DD").unwrap();
        let dates: Vec<_> = records.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2025-05-20", "2025-05-22", "2025-05-26"]);
        assert_eq!(records[0].content, "day one");
        assert_eq!(records[2].content, "day seven");
    }

    #[test]
    fn blank_notes_are_skipped() {
        let store = MemoryStore::new()
            .with_doc("2025-05-21.md", "  \n\t")
            .with_doc("2025-05-23.md", "real");

        let records = collect_daily_notes(&store, &window(), "", "YYYY-MM-DD").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, "2025-05-23");
    }

    #[test]
    fn notes_outside_window_are_ignored() {
        let store = MemoryStore::new()
            .with_doc("2025-05-19.md", "too old")
            .with_doc("2025-05-27.md", "future");
        let records = collect_daily_notes(&store, &window(), "", "YYYY-MM-DD").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn custom_format_labels_with_file_stem() {
        let store = MemoryStore::new().with_doc("Journal/24 May 2025.md", "saturday");
        let records = collect_daily_notes(&store, &window(), "Journal", "DD MMMM YYYY").unwrap();
        assert_eq!(
            records,
            vec![DailyNoteRecord {
                date: "24 May 2025".to_string(),
                content: "saturday".to_string(),
            }]
        );
    }

    #[test]
    fn nested_format_resolves_folders() {
        let store = MemoryStore::new().with_doc("Daily/2025/05/2025-05-25.md", "sunday");
        let records =
            collect_daily_notes(&store, &window(), "Daily", "YYYY/MM/YYYY-MM-DD").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, "2025-05-25");
    }

    #[test]
    fn read_failure_aborts() {
        let store = MemoryStore::new().with_doc("2025-05-24.md", "x");
        store.break_path("2025-05-24.md");
        let err = collect_daily_notes(&store, &window(), "", "YYYY-MM-DD").unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[test]
    fn inspect_reports_every_day() {
        let store = MemoryStore::new()
            .with_doc("2025-05-20.md", "one")
            .with_doc("2025-05-21.md", " ");
        let days = inspect_window(&store, &window(), "", "YYYY-MM-DD").unwrap();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].date, date(2025, 5, 20));
        assert_eq!(days[0].status, NoteStatus::Found);
        assert_eq!(days[1].status, NoteStatus::Empty);
        assert!(days[2..].iter().all(|d| d.status == NoteStatus::Missing));
        assert_eq!(days[6].path, "2025-05-26.md");
    }
}
