//! Draw surface trait
//!
//! Defines the primitive operations the face needs from a display.

use sunshine_core::asset::IconBitmap;
use sunshine_core::config::{Color, FontSize};

/// Draw surface errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SurfaceError {
    /// Underlying target rejected the operation
    Target,
    /// Buffer overflow
    BufferOverflow,
}

/// Text appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextStyle {
    pub color: Color,
    pub size: FontSize,
    /// Hint only; surfaces without smoothing ignore it
    pub anti_alias: bool,
}

/// Draw surface trait
///
/// Coordinates are pixels from the top-left corner; anything outside the
/// surface is clipped by the implementation.
pub trait DrawSurface {
    /// Surface size as (width, height) in pixels
    fn size(&self) -> (u32, u32);

    /// Fill the whole surface
    fn clear(&mut self, color: Color) -> Result<(), SurfaceError>;

    /// Fill a rectangle
    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Color,
    ) -> Result<(), SurfaceError>;

    /// Draw a one-pixel line between two points
    fn draw_line(
        &mut self,
        start: (i32, i32),
        end: (i32, i32),
        color: Color,
    ) -> Result<(), SurfaceError>;

    /// Draw text with its top-left corner at `(x, y)`
    fn draw_text(&mut self, x: i32, y: i32, text: &str, style: TextStyle)
        -> Result<(), SurfaceError>;

    /// Draw an icon with its top-left corner at `(x, y)`
    fn draw_icon(&mut self, x: i32, y: i32, icon: &IconBitmap) -> Result<(), SurfaceError>;

    /// Push buffered content to the display
    fn flush(&mut self) -> Result<(), SurfaceError>;
}
