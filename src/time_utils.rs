// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for calendar-date handling.
//!
//! Entry dates are stored as `YYYY-MM-DD` strings and interpreted in UTC.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Storage and wire format of an entry date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a strict `YYYY-MM-DD` entry date.
pub fn parse_entry_date(raw: &str) -> Option<NaiveDate> {
    // chrono accepts unpadded fields; entry dates must sort lexicographically.
    if raw.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

/// Format a calendar date as an entry date string.
pub fn format_entry_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Today's calendar date in UTC.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// UTC midnight at the start of an entry date.
pub fn start_of_day_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}
