//! Core data types shared by the collectors, the writer and the output layer

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::consts::{DATE_FORMAT, WINDOW_DAYS};

/// One daily note that made it into the window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct DailyNoteRecord {
    /// Display label, usually the note's date
    pub(crate) date: String,
    pub(crate) content: String,
}

/// A document modified inside the window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct UpdatedFileRecord {
    /// Vault-relative path, `/`-separated
    pub(crate) path: String,
    /// Base name without extension
    pub(crate) name: String,
    pub(crate) modified_at: DateTime<Utc>,
}

/// The trailing window of calendar days ending at (and including) today.
///
/// Stored most-recent-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DateWindow {
    days: Vec<NaiveDate>,
}

impl DateWindow {
    pub(crate) fn ending(today: NaiveDate) -> Self {
        let days = (0..WINDOW_DAYS)
            .map(|offset| today - Duration::days(offset))
            .collect();
        Self { days }
    }

    pub(crate) fn today(&self) -> NaiveDate {
        self.days[0]
    }

    pub(crate) fn first_day(&self) -> NaiveDate {
        self.days[self.days.len() - 1]
    }

    pub(crate) fn newest_first(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.iter().copied()
    }

    pub(crate) fn oldest_first(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.iter().rev().copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.days.len()
    }

    /// Human-readable span, e.g. "2025-05-20 to 2025-05-26"
    pub(crate) fn describe(&self) -> String {
        format!(
            "{} to {}",
            self.first_day().format(DATE_FORMAT),
            self.today().format(DATE_FORMAT)
        )
    }
}
