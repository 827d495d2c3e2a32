//! Platform abstraction traits
//!
//! These traits define the interface between the face logic and the
//! platform: wall-clock time, the companion link, and asset fetching.

pub mod clock;
pub mod link;

pub use clock::Clock;
pub use link::{AssetSource, CompanionLink};
