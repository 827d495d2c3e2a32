//! Render scheduler
//!
//! Decides when the interactive face redraws. The timer itself lives in
//! the engine; this module only tracks the single pending deadline.

pub mod tick;

pub use tick::{delay_to_next_boundary, TickScheduler, INTERACTIVE_UPDATE_RATE_MS};
