use chrono::{DateTime, Utc};
use comfy_table::{Cell, Color};

use crate::collect::{NoteStatus, WindowDay};
use crate::consts::DATE_FORMAT;
use crate::core::{DateWindow, UpdatedFileRecord};
use crate::utils::Timezone;

use super::format::{create_styled_table, plural, right_cell, styled_cell, tint};

fn status_color(status: NoteStatus) -> Color {
    match status {
        NoteStatus::Found => Color::Green,
        NoteStatus::Empty => Color::Yellow,
        NoteStatus::Missing => Color::DarkGrey,
    }
}

fn status_label(status: NoteStatus) -> &'static str {
    match status {
        NoteStatus::Found => "found",
        NoteStatus::Empty => "empty",
        NoteStatus::Missing => "missing",
    }
}

pub(crate) fn print_window_table(window: &DateWindow, days: &[WindowDay], use_color: bool) {
    let mut table = create_styled_table(&["Date", "Day", "Note", "Status"], use_color);
    for day in days {
        table.add_row(vec![
            Cell::new(day.date.format(DATE_FORMAT).to_string()),
            Cell::new(day.date.format("%a").to_string()),
            Cell::new(&day.path),
            styled_cell(
                status_label(day.status),
                tint(use_color, status_color(day.status)),
                false,
            ),
        ]);
    }

    let found = days
        .iter()
        .filter(|d| d.status == NoteStatus::Found)
        .count();
    println!("\n  Daily notes, {}\n", window.describe());
    println!("{table}");
    println!("\n  {found} of {} days have a note.\n", window.len());
}

fn format_modified(at: DateTime<Utc>, timezone: Timezone) -> String {
    timezone
        .to_fixed_offset(at)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

pub(crate) fn print_updated_table(
    files: &[UpdatedFileRecord],
    timezone: Timezone,
    use_color: bool,
) {
    if files.is_empty() {
        println!("No documents were modified in the last week.");
        return;
    }

    let mut table = create_styled_table(&["Modified", "Name", "Path"], use_color);
    for file in files {
        table.add_row(vec![
            right_cell(&format_modified(file.modified_at, timezone), None, false),
            styled_cell(&file.name, None, true),
            Cell::new(&file.path),
        ]);
    }
    println!("{table}");
    println!(
        "\n  {} document{} modified.\n",
        files.len(),
        plural(files.len())
    );
}
