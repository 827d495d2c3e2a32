//! Local time and face text
//!
//! The face caches the system UTC offset and only re-reads it on
//! visibility or time-zone changes.

pub mod format;
pub mod local;

pub use format::{format_date, format_time, DateText, TimeText};
pub use local::{local_time, FaceClock, LocalTime};
