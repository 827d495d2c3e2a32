//! Time and date text
//!
//! - Time: `H:MM` (hour unpadded, 24-hour), or `H:MM:SS`
//! - Date: `MMM d, yyyy` (e.g. `Oct 19, 2026`)

use core::fmt::Write;

use heapless::String;

use super::local::LocalTime;

/// Time text capacity (`23:59:59`)
pub type TimeText = String<8>;

/// Date text capacity
pub type DateText = String<20>;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Format the time of day
pub fn format_time(time: &LocalTime, seconds: bool) -> TimeText {
    let mut out = TimeText::new();
    // Hours are 0-23, so both forms fit the capacity
    let _ = if seconds {
        write!(out, "{}:{:02}:{:02}", time.hour, time.minute, time.second)
    } else {
        write!(out, "{}:{:02}", time.hour, time.minute)
    };
    out
}

/// Format the calendar date
pub fn format_date(time: &LocalTime) -> DateText {
    let mut out = DateText::new();
    let month = MONTHS
        .get(usize::from(time.month.saturating_sub(1)))
        .copied()
        .unwrap_or("???");
    let _ = write!(out, "{} {}, {}", month, time.day, time.year);
    out
}
