//! Cell-level normalizers for the seven schedule fields.
//!
//! Every normalizer here is tolerant: malformed input degrades to a
//! documented default (unknown date, 00:00 time, empty token list) with a
//! diagnostic, never an error. Rows keep flowing regardless of how broken
//! an individual cell is.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::core::domain::{SessionDate, SHARED_TOKEN};
use crate::parsing::table::CellValue;
use crate::preprocessing::report::GenerationReport;

// Day-before-month first, ISO as fallback. Two-digit-year formats come
// before %Y ones: %Y happily consumes "24" as year 24, so it must only
// see strings the %y formats rejected.
const DATE_FORMATS: &[&str] = &[
    "%d-%m-%y",
    "%d/%m/%y",
    "%d.%m.%y",
    "%d-%m-%Y",
    "%d/%m/%Y",
    "%d.%m.%Y",
    "%Y-%m-%d",
];

// Same cells sometimes carry a time-of-day suffix; parse and drop it.
const DATETIME_FORMATS: &[&str] = &[
    "%d-%m-%y %H:%M",
    "%d/%m/%y %H:%M",
    "%d-%m-%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Parses a date cell into a [`SessionDate`].
///
/// Pre-typed date and datetime cells pass through. Text is tried against a
/// day-first format list (`11-03-2024` reads as 11 March) with ISO
/// `2024-03-11` accepted as well. Anything else,
/// including empty cells and numbers, yields [`SessionDate::Unknown`];
/// this function never errors.
///
/// # Examples
///
/// ```
/// use rooster_rust::parsing::fields::parse_date;
/// use rooster_rust::parsing::table::CellValue;
/// use rooster_rust::core::domain::SessionDate;
/// use chrono::NaiveDate;
///
/// let expected = SessionDate::Known(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
/// assert_eq!(parse_date(&CellValue::Text("11-03-2024".into())), expected);
/// assert_eq!(parse_date(&CellValue::Text("2024-03-11".into())), expected);
/// assert_eq!(parse_date(&CellValue::Text("not-a-date".into())), SessionDate::Unknown);
/// ```
pub fn parse_date(cell: &CellValue) -> SessionDate {
    match cell {
        CellValue::Date(d) => SessionDate::Known(*d),
        CellValue::DateTime(dt) => SessionDate::Known(dt.date()),
        CellValue::Text(s) => parse_date_text(s),
        _ => SessionDate::Unknown,
    }
}

/// Parses date text with day-before-month preference.
pub fn parse_date_text(text: &str) -> SessionDate {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return SessionDate::Unknown;
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
            return SessionDate::Known(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return SessionDate::Known(dt.date());
        }
    }

    SessionDate::Unknown
}

/// Parses a time cell into a time of day.
///
/// A pre-typed time value is returned unchanged. Text must match `H:MM`
/// (one or two hour digits, zero-padding optional). Everything else falls
/// back to 00:00 with a warning on the report, so a broken time cell can
/// never lose the whole row.
pub fn parse_time(cell: &CellValue, report: &mut GenerationReport) -> NaiveTime {
    let midnight = NaiveTime::MIN;

    match cell {
        CellValue::Time(t) => *t,
        CellValue::DateTime(dt) => dt.time(),
        CellValue::Text(s) => match NaiveTime::parse_from_str(s.trim(), "%H:%M") {
            Ok(t) => t,
            Err(_) => {
                report.stats.malformed_times += 1;
                report.add_warning(format!("Onverwacht tijdformaat aangetroffen: '{}'", s));
                midnight
            }
        },
        other => {
            report.stats.malformed_times += 1;
            report.add_warning(format!("Tijdveld is geen tekst of tijd: {:?}", other));
            midnight
        }
    }
}

/// Splits a raw multi-teacher cell into tokens.
///
/// Splits on any run of whitespace, comma, slash, or semicolon; drops
/// empty tokens; preserves original casing. Lowercasing happens at the
/// comparison sites, not here.
///
/// # Examples
///
/// ```
/// use rooster_rust::parsing::fields::split_teachers;
///
/// assert_eq!(split_teachers("Jan, Piet/Klaas; Marie"),
///            vec!["Jan", "Piet", "Klaas", "Marie"]);
/// assert_eq!(split_teachers("  "), Vec::<String>::new());
/// ```
pub fn split_teachers(text: &str) -> Vec<String> {
    text.trim()
        .split(|c: char| c.is_whitespace() || c == ',' || c == '/' || c == ';')
        .filter(|p| !p.is_empty())
        .map(|p| p.to_string())
        .collect()
}

/// Returns `true` iff the token list is exactly the single shared marker.
pub fn is_shared_only(tokens: &[String]) -> bool {
    tokens.len() == 1 && tokens[0].to_lowercase() == SHARED_TOKEN
}
