//! Wall-clock time source

/// Wall-clock time source
pub trait Clock {
    /// Milliseconds since the Unix epoch, UTC
    fn now_utc_ms(&self) -> u64;

    /// Current system offset from UTC in seconds
    ///
    /// Re-read only when the face becomes visible or the system time
    /// zone changes.
    fn utc_offset_s(&self) -> i32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_utc_ms(&self) -> u64 {
        (**self).now_utc_ms()
    }

    fn utc_offset_s(&self) -> i32 {
        (**self).utc_offset_s()
    }
}
