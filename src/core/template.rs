//! Date-format and note-name templates
//!
//! Both template flavours share one single-pass tokenizer. At every position
//! the longest recognized token wins and `[...]` spans are copied verbatim.
//! Substituted output is never rescanned.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::consts::{DEFAULT_DAILY_FORMAT, NOTE_EXTENSION};
use crate::core::week::IsoWeek;

/// Date tokens, longest first within each family
const DATE_TOKENS: &[&str] = &["YYYY", "YY", "MMMM", "MMM", "MM", "DD", "dddd", "ddd"];

/// Week-name tokens, longest first within each family
const NAME_TOKENS: &[&str] = &["YYYY", "YY", "WW", "W"];

static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{4}-\d{2}-\d{2}").expect("static ISO date regex is valid")
});

#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    Token(&'static str),
}

fn tokenize<'a>(template: &'a str, tokens: &[&'static str]) -> Vec<Segment<'a>> {
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;

    while i < template.len() {
        let rest = &template[i..];

        if rest.starts_with('[')
            && let Some(close) = rest[1..].find(']')
        {
            if literal_start < i {
                segments.push(Segment::Literal(&template[literal_start..i]));
            }
            segments.push(Segment::Literal(&rest[1..1 + close]));
            i += close + 2;
            literal_start = i;
            continue;
        }

        if let Some(token) = tokens.iter().find(|t| rest.starts_with(**t)) {
            if literal_start < i {
                segments.push(Segment::Literal(&template[literal_start..i]));
            }
            segments.push(Segment::Token(token));
            i += token.len();
            literal_start = i;
            continue;
        }

        // Advance by one whole character
        i += rest.chars().next().map_or(1, char::len_utf8);
    }

    if literal_start < template.len() {
        segments.push(Segment::Literal(&template[literal_start..]));
    }
    segments
}

fn render(template: &str, tokens: &[&'static str], value: impl Fn(&str) -> String) -> String {
    let mut out = String::with_capacity(template.len() + 8);
    for segment in tokenize(template, tokens) {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Token(token) => out.push_str(&value(token)),
        }
    }
    out
}

fn two_digit_year(year: i32) -> String {
    format!("{:02}", year.rem_euclid(100))
}

/// Expand a daily-note date format (`YYYY-MM-DD`, `YYYY/MMMM/DD`, ...) for `date`.
pub(crate) fn format_date(format: &str, date: NaiveDate) -> String {
    render(format, DATE_TOKENS, |token| match token {
        "YYYY" => format!("{:04}", date.year()),
        "YY" => two_digit_year(date.year()),
        "MMMM" => date.format("%B").to_string(),
        "MMM" => date.format("%b").to_string(),
        "MM" => format!("{:02}", date.month()),
        "DD" => format!("{:02}", date.day()),
        "dddd" => date.format("%A").to_string(),
        "ddd" => date.format("%a").to_string(),
        other => other.to_string(),
    })
}

/// Vault-relative path of the daily note for `date`.
pub(crate) fn daily_note_path(folder: &str, format: &str, date: NaiveDate) -> String {
    let name = format_date(format, date);
    let folder = folder.trim_matches('/');
    if folder.is_empty() {
        format!("{name}.{NOTE_EXTENSION}")
    } else {
        format!("{folder}/{name}.{NOTE_EXTENSION}")
    }
}

/// Recover a display date from a note's file name.
///
/// Only the default `YYYY-MM-DD` format is parsed back; every other format
/// yields the bare file stem.
pub(crate) fn date_label(format: &str, file_name: &str) -> Option<String> {
    let stem = file_name
        .strip_suffix(&format!(".{NOTE_EXTENSION}"))
        .unwrap_or(file_name);

    if format == DEFAULT_DAILY_FORMAT {
        return ISO_DATE.find(stem).map(|m| m.as_str().to_string());
    }
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}

/// File name (without extension) of the weekly note for `week`.
///
/// With no format, falls back to `{year}-W{week:02}`.
pub(crate) fn format_note_name(format: Option<&str>, week: IsoWeek) -> String {
    let Some(format) = format.filter(|f| !f.trim().is_empty()) else {
        return format!("{}-W{:02}", week.year, week.week);
    };

    render(format, NAME_TOKENS, |token| match token {
        "YYYY" => format!("{:04}", week.year),
        "YY" => two_digit_year(week.year),
        "WW" => format!("{:02}", week.week),
        "W" => week.week.to_string(),
        other => other.to_string(),
    })
}
