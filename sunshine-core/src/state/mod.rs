//! Display mode state machine
//!
//! Tracks whether the face is ambient or interactive and whether it is
//! on screen. The periodic tick runs only while interactive and visible.

pub mod events;
pub mod mode;

pub use events::{FaceEvent, TapKind};
pub use mode::{DisplayMode, ModeController, Power, Transition, Visibility};
