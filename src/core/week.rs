use chrono::{Datelike, Duration, NaiveDate};

/// ISO-8601 week and the ISO year it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IsoWeek {
    pub(crate) year: i32,
    pub(crate) week: u32,
}

/// Week 1 is the week containing the year's first Thursday, so the
/// Thursday of a date's own week decides both week and year.
pub(crate) fn iso_week(date: NaiveDate) -> IsoWeek {
    let weekday = i64::from(date.weekday().number_from_monday());
    let thursday = date + Duration::days(4 - weekday);
    let offset = thursday.ordinal0();
    IsoWeek {
        year: thursday.year(),
        week: (offset + 1).div_ceil(7),
    }
}
