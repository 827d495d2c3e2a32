//! Forecast icon assets
//!
//! Icons arrive as BMP bytes fetched from the companion. They are decoded
//! into an owned [`IconBitmap`] so the renderer never touches raw bytes.

pub mod bitmap;
pub mod decode;

pub use bitmap::{IconBitmap, ICON_MAX_PIXELS, ICON_MAX_SIDE};
pub use decode::decode_icon;

/// Errors that can occur while materializing an icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AssetError {
    /// Fetch returned no bytes
    Empty,
    /// Link could not resolve the reference
    Unresolved,
    /// Bytes are not a supported image
    Malformed,
    /// Image exceeds the icon size limit
    TooLarge,
}
