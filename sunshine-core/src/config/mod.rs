//! Face configuration
//!
//! [`FaceConfig`] is what the user or board supplies. [`FaceStyle`] is
//! the immutable draw style resolved from it for the current mode; it is
//! recomputed whenever an input changes, never patched in place.

pub mod style;
pub mod types;

pub use style::{FaceStyle, StyleInputs};
pub use types::{Color, FaceConfig, FontSize, Layout, Palette};
