//! Creation timestamp source for new rows.

use chrono::{DateTime, Local, TimeZone};

/// Locale-style timestamp, e.g. `10/19/2026, 3:04:05 PM`.
const ROW_DATE_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Produces the `date` text stamped onto newly created rows.
pub trait Clock {
    fn now_label(&self) -> String;
}

/// Wall clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now_label(&self) -> String {
        format_row_date(&Local::now())
    }
}

/// Clock that always returns the same label. Used by tests and imports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedClock(pub String);

impl Clock for FixedClock {
    fn now_label(&self) -> String {
        self.0.clone()
    }
}

/// Formats a timestamp the way row dates are displayed.
pub fn format_row_date<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(ROW_DATE_FORMAT).to_string()
}
