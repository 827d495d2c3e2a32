//! embedded-graphics adapter
//!
//! Renders through any RGB565 `DrawTarget`, so the same face runs on a
//! panel driver, a framebuffer, or the embedded-graphics simulator.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10, FONT_9X15};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

use sunshine_core::asset::IconBitmap;
use sunshine_core::config::{Color, FontSize};

use crate::backend::{DrawSurface, SurfaceError, TextStyle};

/// Convert a configured color to the panel format
pub fn to_rgb565(color: Color) -> Rgb565 {
    Rgb888::new(color.r, color.g, color.b).into()
}

/// Monospace font for a size class
pub fn font_for(size: FontSize) -> &'static MonoFont<'static> {
    match size {
        FontSize::Small => &FONT_6X10,
        FontSize::Medium => &FONT_9X15,
        FontSize::Large => &FONT_10X20,
    }
}

/// [`DrawSurface`] over an embedded-graphics target
pub struct GraphicsSurface<D> {
    target: D,
}

impl<D> GraphicsSurface<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: D) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &D {
        &self.target
    }
}

impl<D> DrawSurface for GraphicsSurface<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn size(&self) -> (u32, u32) {
        let size = self.target.bounding_box().size;
        (size.width, size.height)
    }

    fn clear(&mut self, color: Color) -> Result<(), SurfaceError> {
        self.target
            .clear(to_rgb565(color))
            .map_err(|_| SurfaceError::Target)
    }

    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Color,
    ) -> Result<(), SurfaceError> {
        Rectangle::new(Point::new(x, y), Size::new(width, height))
            .into_styled(PrimitiveStyle::with_fill(to_rgb565(color)))
            .draw(&mut self.target)
            .map_err(|_| SurfaceError::Target)
    }

    fn draw_line(
        &mut self,
        start: (i32, i32),
        end: (i32, i32),
        color: Color,
    ) -> Result<(), SurfaceError> {
        Line::new(Point::new(start.0, start.1), Point::new(end.0, end.1))
            .into_styled(PrimitiveStyle::with_stroke(to_rgb565(color), 1))
            .draw(&mut self.target)
            .map_err(|_| SurfaceError::Target)
    }

    fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        style: TextStyle,
    ) -> Result<(), SurfaceError> {
        // Mono fonts have no smoothing, so the anti-alias hint is moot
        let character_style = MonoTextStyle::new(font_for(style.size), to_rgb565(style.color));
        Text::with_baseline(text, Point::new(x, y), character_style, Baseline::Top)
            .draw(&mut self.target)
            .map(|_| ())
            .map_err(|_| SurfaceError::Target)
    }

    fn draw_icon(&mut self, x: i32, y: i32, icon: &IconBitmap) -> Result<(), SurfaceError> {
        let pixels = icon.pixels().map(|(ix, iy, raw)| {
            Pixel(
                Point::new(x + i32::from(ix), y + i32::from(iy)),
                Rgb565::from(RawU16::new(raw)),
            )
        });
        self.target
            .draw_iter(pixels)
            .map_err(|_| SurfaceError::Target)
    }

    fn flush(&mut self) -> Result<(), SurfaceError> {
        // Buffered panels flush through their own driver
        Ok(())
    }
}
