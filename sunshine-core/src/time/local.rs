//! Time-zone aware local time

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};

use crate::traits::Clock;

/// Broken-down local time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LocalTime {
    pub year: i32,
    /// 1-12
    pub month: u8,
    /// 1-31
    pub day: u8,
    /// 0-23
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// Convert UTC milliseconds to local time at a fixed offset
///
/// Out-of-range inputs fall back to the epoch and UTC.
pub fn local_time(utc_ms: u64, offset_s: i32) -> LocalTime {
    let utc = i64::try_from(utc_ms)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .unwrap_or_default();
    let local = match FixedOffset::east_opt(offset_s) {
        Some(offset) => utc.with_timezone(&offset),
        None => utc.fixed_offset(),
    };

    LocalTime {
        year: local.year(),
        month: local.month() as u8,
        day: local.day() as u8,
        hour: local.hour() as u8,
        minute: local.minute() as u8,
        second: local.second() as u8,
    }
}

/// Clock with a cached time zone
pub struct FaceClock<C> {
    clock: C,
    offset_s: i32,
}

impl<C: Clock> FaceClock<C> {
    /// Wrap a clock, reading the current system offset
    pub fn new(clock: C) -> Self {
        let offset_s = clock.utc_offset_s();
        Self { clock, offset_s }
    }

    /// Re-read the system offset; returns `true` if it changed
    pub fn resync(&mut self) -> bool {
        let offset_s = self.clock.utc_offset_s();
        let changed = offset_s != self.offset_s;
        self.offset_s = offset_s;
        changed
    }

    /// Cached offset from UTC in seconds
    pub fn offset_s(&self) -> i32 {
        self.offset_s
    }

    /// Current UTC time in milliseconds
    pub fn now_utc_ms(&self) -> u64 {
        self.clock.now_utc_ms()
    }

    /// Current local time at the cached offset
    pub fn now_local(&self) -> LocalTime {
        local_time(self.clock.now_utc_ms(), self.offset_s)
    }
}
