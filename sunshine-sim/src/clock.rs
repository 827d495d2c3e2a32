//! Host wall clock

use core::cell::Cell;

use chrono::{Local, Utc};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use sunshine_core::traits::Clock;

/// System clock with an optional scripted time zone
pub struct SystemClock {
    offset_override: Mutex<CriticalSectionRawMutex, Cell<Option<i32>>>,
}

impl SystemClock {
    pub const fn new() -> Self {
        Self {
            offset_override: Mutex::new(Cell::new(None)),
        }
    }

    /// Pretend the system time zone is now `offset_s` from UTC
    pub fn set_offset(&self, offset_s: i32) {
        self.offset_override.lock(|offset| offset.set(Some(offset_s)));
    }
}

impl Clock for SystemClock {
    fn now_utc_ms(&self) -> u64 {
        u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
    }

    fn utc_offset_s(&self) -> i32 {
        self.offset_override
            .lock(|offset| offset.get())
            .unwrap_or_else(|| Local::now().offset().local_minus_utc())
    }
}
