//! Due-date phrase normalization.
//!
//! Resolves free-text cues ("by tomorrow", "next Friday", "21st of March")
//! against a reference day. Rules are tried in order and the first one that
//! resolves wins; unresolvable phrases are passed through unchanged.
//!
//! Phrases that already are `YYYY-MM-DD` dates are kept as they are, so model
//! output that resolved a date itself is not re-read as a day of the month.

use std::sync::OnceLock;

use chrono::{Datelike, Duration, Local, NaiveDate};
use regex::Regex;

/// Sunday = 0 .. Saturday = 6, matching `num_days_from_sunday`
const WEEKDAYS: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Output format for resolved dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

type DateRule = fn(&str, NaiveDate) -> Option<NaiveDate>;

/// Resolution rules, highest priority first
const RULES: [(&str, DateRule); 7] = [
    ("calendar_date", calendar_date),
    ("tomorrow", tomorrow),
    ("today", today_rule),
    ("next_weekday", next_weekday),
    ("this_weekday", this_weekday),
    ("bare_weekday", bare_weekday),
    ("day_of_month", day_of_month),
];

fn re_next_weekday() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"next\s+(monday|tuesday|wednesday|thursday|friday|saturday|sunday)").unwrap()
    })
}

fn re_this_weekday() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"this\s+(monday|tuesday|wednesday|thursday|friday|saturday|sunday)").unwrap()
    })
}

fn re_bare_weekday() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b").unwrap()
    })
}

fn re_day_of_month() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"\b([0-9]{1,2})(?:st|nd|rd|th)?(?:\s+(?:of\s+)?(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)\w*)?\b",
        )
        .unwrap()
    })
}

/// The local calendar day, used when callers don't pin a reference date
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Normalize a due-date phrase relative to `today`.
///
/// Returns a `YYYY-MM-DD` string when a rule resolves, otherwise `phrase`
/// exactly as given. Matching ignores case and surrounding whitespace.
///
/// A phrase that already is a `YYYY-MM-DD` date is returned as that date,
/// trimmed: `" 2024-12-31 "` becomes `"2024-12-31"`.
pub fn normalize(phrase: &str, today: NaiveDate) -> String {
    resolve(phrase, today)
        .map(|date| date.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| phrase.to_string())
}

/// Resolve a phrase to a calendar date, if any rule applies
pub fn resolve(phrase: &str, today: NaiveDate) -> Option<NaiveDate> {
    let lowered = phrase.trim().to_lowercase();
    RULES.iter().find_map(|(_, rule)| rule(&lowered, today))
}

fn calendar_date(phrase: &str, _today: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(phrase, DATE_FORMAT).ok()
}

fn tomorrow(phrase: &str, today: NaiveDate) -> Option<NaiveDate> {
    phrase.contains("tomorrow").then(|| today + Duration::days(1))
}

fn today_rule(phrase: &str, today: NaiveDate) -> Option<NaiveDate> {
    phrase.contains("today").then_some(today)
}

fn next_weekday(phrase: &str, today: NaiveDate) -> Option<NaiveDate> {
    let target = captured_weekday(re_next_weekday(), phrase)?;
    Some(today + Duration::days(days_until(target, today, true)))
}

// Offset 0 stays 0: "this Monday" on a Monday is today. Never corrected backward.
fn this_weekday(phrase: &str, today: NaiveDate) -> Option<NaiveDate> {
    let target = captured_weekday(re_this_weekday(), phrase)?;
    Some(today + Duration::days(days_until(target, today, false)))
}

fn bare_weekday(phrase: &str, today: NaiveDate) -> Option<NaiveDate> {
    let target = captured_weekday(re_bare_weekday(), phrase)?;
    Some(today + Duration::days(days_until(target, today, true)))
}

fn day_of_month(phrase: &str, today: NaiveDate) -> Option<NaiveDate> {
    let caps = re_day_of_month().captures(phrase)?;
    let day: i64 = caps[1].parse().ok()?;
    let month = match caps.get(2) {
        Some(m) => month_number(m.as_str())?,
        None => today.month(),
    };

    let date = overflowing_date(today.year(), month, day)?;
    if date < today {
        overflowing_date(today.year() + 1, month, day)
    } else {
        Some(date)
    }
}

/// Build a date, letting out-of-range days spill into neighbouring months
/// (day 0 is the last day of the previous month, Feb 30 is early March).
fn overflowing_date(year: i32, month: u32, day: i64) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    first.checked_add_signed(Duration::days(day - 1))
}

fn captured_weekday(re: &Regex, phrase: &str) -> Option<u32> {
    let caps = re.captures(phrase)?;
    weekday_index(&caps[1])
}

fn weekday_index(name: &str) -> Option<u32> {
    WEEKDAYS.iter().position(|d| *d == name).map(|i| i as u32)
}

fn month_number(name: &str) -> Option<u32> {
    MONTHS.iter().position(|m| *m == name).map(|i| i as u32 + 1)
}

/// Days from `today` until `target` weekday, in 0..=6 (or 7 when bumped)
fn days_until(target: u32, today: NaiveDate, bump_zero: bool) -> i64 {
    let current = today.weekday().num_days_from_sunday();
    let offset = (target + 7 - current) % 7;
    if offset == 0 && bump_zero {
        7
    } else {
        i64::from(offset)
    }
}
