//! Second-aligned tick scheduling
//!
//! The tick is a self-perpetuating one-shot: each fire computes the next
//! deadline from wall-clock time instead of adding a fixed period, so
//! redraw latency never accumulates into drift.

/// Interactive update period in milliseconds
pub const INTERACTIVE_UPDATE_RATE_MS: u64 = 1000;

/// Delay from `now_ms` to the next whole-period boundary
///
/// Always in `1..=INTERACTIVE_UPDATE_RATE_MS`; a full period when `now_ms`
/// is exactly on a boundary.
pub fn delay_to_next_boundary(now_ms: u64) -> u64 {
    INTERACTIVE_UPDATE_RATE_MS - now_ms % INTERACTIVE_UPDATE_RATE_MS
}

/// Single-slot tick scheduler
///
/// Holds at most one pending deadline (wall-clock milliseconds).
#[derive(Debug, Clone, Default)]
pub struct TickScheduler {
    pending: Option<u64>,
}

impl TickScheduler {
    /// Create a scheduler with nothing pending
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Pending deadline, if any
    pub fn pending(&self) -> Option<u64> {
        self.pending
    }

    /// Check if a tick is pending
    pub fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    /// Milliseconds until the pending tick is due
    pub fn delay_until_due(&self, now_ms: u64) -> Option<u64> {
        self.pending.map(|deadline| deadline.saturating_sub(now_ms))
    }

    /// Drop any pending tick and schedule a new one if `should_run`
    ///
    /// Idempotent: calling it again before the boundary yields the same
    /// deadline.
    pub fn reschedule(&mut self, now_ms: u64, should_run: bool) -> Option<u64> {
        self.pending = None;
        if should_run {
            self.pending = Some(now_ms + delay_to_next_boundary(now_ms));
        }
        self.pending
    }

    /// Drop any pending tick
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Handle a timer wake-up
    ///
    /// Returns `true` if the pending tick was due, in which case the
    /// caller must request a redraw. The next tick is scheduled before
    /// returning. Early or stale wake-ups return `false` and leave the
    /// pending deadline untouched.
    pub fn fire(&mut self, now_ms: u64, should_run: bool) -> bool {
        match self.pending {
            Some(deadline) if now_ms >= deadline => {
                self.reschedule(now_ms, should_run);
                true
            }
            _ => false,
        }
    }
}
