use chrono::offset::Offset;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

use crate::error::AppError;

#[derive(Debug, Clone, Copy)]
pub(crate) enum Timezone {
    Local,
    Named(Tz),
}

impl Timezone {
    pub(crate) fn parse(value: Option<&str>) -> Result<Self, AppError> {
        let Some(raw) = value else {
            return Ok(Timezone::Local);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("local") {
            return Ok(Timezone::Local);
        }
        if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
            return Ok(Timezone::Named(chrono_tz::UTC));
        }
        Tz::from_str(trimmed)
            .map(Timezone::Named)
            .map_err(|_| AppError::InvalidTimezone {
                input: trimmed.to_string(),
            })
    }

    pub(crate) fn to_fixed_offset(self, utc: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Timezone::Local => {
                let local = utc.with_timezone(&Local);
                let offset = local.offset().fix();
                local.with_timezone(&offset)
            }
            Timezone::Named(tz) => {
                let local = utc.with_timezone(&tz);
                let offset = local.offset().fix();
                local.with_timezone(&offset)
            }
        }
    }

    /// Calendar date of `utc` in this timezone
    pub(crate) fn local_date(self, utc: DateTime<Utc>) -> NaiveDate {
        self.to_fixed_offset(utc).date_naive()
    }

    /// Last second of `date` in this timezone, as a UTC instant
    pub(crate) fn end_of_day(self, date: NaiveDate) -> DateTime<Utc> {
        let naive = date.and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN));
        let resolved = match self {
            Timezone::Local => Local
                .from_local_datetime(&naive)
                .latest()
                .map(|dt| dt.with_timezone(&Utc)),
            Timezone::Named(tz) => tz
                .from_local_datetime(&naive)
                .latest()
                .map(|dt| dt.with_timezone(&Utc)),
        };
        // Only a DST gap at 23:59:59 leaves this unresolved
        resolved.unwrap_or_else(|| naive.and_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_none_returns_local() {
        assert!(matches!(Timezone::parse(None).unwrap(), Timezone::Local));
    }

    #[test]
    fn parse_local_string_returns_local() {
        assert!(matches!(
            Timezone::parse(Some("local")).unwrap(),
            Timezone::Local
        ));
        assert!(matches!(
            Timezone::parse(Some("LOCAL")).unwrap(),
            Timezone::Local
        ));
        assert!(matches!(
            Timezone::parse(Some("Local")).unwrap(),
            Timezone::Local
        ));
    }

    #[test]
    fn parse_utc_variants() {
        let tz = Timezone::parse(Some("utc")).unwrap();
        assert!(matches!(tz, Timezone::Named(chrono_tz::UTC)));

        let tz = Timezone::parse(Some("UTC")).unwrap();
        assert!(matches!(tz, Timezone::Named(chrono_tz::UTC)));

        let tz = Timezone::parse(Some("z")).unwrap();
        assert!(matches!(tz, Timezone::Named(chrono_tz::UTC)));

        let tz = Timezone::parse(Some("Z")).unwrap();
        assert!(matches!(tz, Timezone::Named(chrono_tz::UTC)));
    }

    #[test]
    fn parse_named_timezone() {
        let tz = Timezone::parse(Some("America/New_York")).unwrap();
        assert!(matches!(tz, Timezone::Named(chrono_tz::America::New_York)));
    }

    #[test]
    fn parse_invalid_timezone_returns_error() {
        let err = Timezone::parse(Some("Mars/Olympus")).unwrap_err();
        assert!(err.to_string().contains("Mars/Olympus"));
    }

    #[test]
    fn to_fixed_offset_utc_preserves_time() {
        let utc = "2026-02-12T10:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let tz = Timezone::Named(chrono_tz::UTC);
        let fixed = tz.to_fixed_offset(utc);
        assert_eq!(fixed.offset().local_minus_utc(), 0);
        assert_eq!(fixed.format("%H:%M").to_string(), "10:00");
    }

    #[test]
    fn to_fixed_offset_named_shifts_time() {
        let utc = "2026-06-15T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let tz = Timezone::parse(Some("America/New_York")).unwrap();
        let fixed = tz.to_fixed_offset(utc);
        // EDT is UTC-4 in June
        assert_eq!(fixed.offset().local_minus_utc(), -4 * 3600);
        assert_eq!(fixed.format("%H:%M").to_string(), "08:00");
    }

    #[test]
    fn local_date_crosses_midnight() {
        let utc = "2025-05-26T23:30:00Z".parse::<DateTime<Utc>>().unwrap();
        let tokyo = Timezone::parse(Some("Asia/Tokyo")).unwrap();
        assert_eq!(
            tokyo.local_date(utc),
            NaiveDate::from_ymd_opt(2025, 5, 27).unwrap()
        );
        let utc_tz = Timezone::parse(Some("UTC")).unwrap();
        assert_eq!(
            utc_tz.local_date(utc),
            NaiveDate::from_ymd_opt(2025, 5, 26).unwrap()
        );
    }

    #[test]
    fn end_of_day_in_named_zone() {
        let tz = Timezone::parse(Some("America/New_York")).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 5, 26).unwrap();
        let end = tz.end_of_day(date);
        assert_eq!(end.to_rfc3339(), "2025-05-27T03:59:59+00:00");
        assert_eq!(tz.local_date(end), date);
    }
}
