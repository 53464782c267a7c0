/// Standard date format used throughout the codebase: "2025-01-15"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Number of calendar days in the trailing window, today included
pub(crate) const WINDOW_DAYS: i64 = 7;

/// Daily note format when no folder settings provide one
pub(crate) const DEFAULT_DAILY_FORMAT: &str = "YYYY-MM-DD";

/// Folder for generated weekly notes when none is configured
pub(crate) const DEFAULT_WEEKLY_FOLDER: &str = "Weekly";

/// Extension appended to every note path
pub(crate) const NOTE_EXTENSION: &str = "md";

/// Written in place of the summary when the service returns nothing
pub(crate) const EMPTY_SUMMARY_FALLBACK: &str = "No summary was generated.";

/// Lock file created in the vault root while a run is in flight
pub(crate) const LOCK_FILE_NAME: &str = ".weekdigest.lock";
