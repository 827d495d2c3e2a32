//! Terminal draw surface
//!
//! Prints one summary line per frame and, when asked, renders the frame
//! through embedded-graphics into a PPM image.

use core::convert::Infallible;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;
use log::warn;

use sunshine_core::asset::IconBitmap;
use sunshine_core::config::Color;
use sunshine_display::{DrawSurface, GraphicsSurface, RecordingSurface, SurfaceError, TextStyle};

/// In-memory RGB565 framebuffer
pub struct Canvas {
    size: Size,
    pixels: Vec<Rgb565>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            pixels: vec![Rgb565::BLACK; (width * height) as usize],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb565> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        self.pixels.get((y * self.size.width + x) as usize).copied()
    }

    /// Write as a binary PPM (P6)
    pub fn write_ppm(&self, path: &Path) -> io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        write!(out, "P6\n{} {}\n255\n", self.size.width, self.size.height)?;
        for &pixel in &self.pixels {
            let rgb = Rgb888::from(pixel);
            out.write_all(&[rgb.r(), rgb.g(), rgb.b()])?;
        }
        out.flush()
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let width = self.size.width as i32;
        let height = self.size.height as i32;
        for Pixel(point, color) in pixels {
            if (0..width).contains(&point.x) && (0..height).contains(&point.y) {
                self.pixels[(point.y * width + point.x) as usize] = color;
            }
        }
        Ok(())
    }
}

/// Surface that logs frames to the terminal
pub struct TerminalSurface {
    recording: RecordingSurface,
    canvas: GraphicsSurface<Canvas>,
    frame_dump: Option<PathBuf>,
}

impl TerminalSurface {
    pub fn new(width: u32, height: u32, frame_dump: Option<PathBuf>) -> Self {
        Self {
            recording: RecordingSurface::new(width, height),
            canvas: GraphicsSurface::new(Canvas::new(width, height)),
            frame_dump,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        self.canvas.target()
    }

    /// One-line description of the last frame
    pub fn summary(&self) -> String {
        let texts: Vec<&str> = self.recording.texts().collect();
        let field = |i: usize| texts.get(i).copied().unwrap_or("");
        let background = self.recording.background().unwrap_or(Color::BLACK);

        format!(
            "#{:<4} bg #{:02X}{:02X}{:02X} | {:>8} | {} | {} / {}{}",
            self.recording.frames(),
            background.r,
            background.g,
            background.b,
            field(0),
            field(1),
            field(2),
            field(3),
            if self.recording.has_icon() { " [icon]" } else { "" },
        )
    }
}

impl DrawSurface for TerminalSurface {
    fn size(&self) -> (u32, u32) {
        self.recording.size()
    }

    fn clear(&mut self, color: Color) -> Result<(), SurfaceError> {
        self.recording.clear(color)?;
        self.canvas.clear(color)
    }

    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Color,
    ) -> Result<(), SurfaceError> {
        self.recording.fill_rect(x, y, width, height, color)?;
        self.canvas.fill_rect(x, y, width, height, color)
    }

    fn draw_line(
        &mut self,
        start: (i32, i32),
        end: (i32, i32),
        color: Color,
    ) -> Result<(), SurfaceError> {
        self.recording.draw_line(start, end, color)?;
        self.canvas.draw_line(start, end, color)
    }

    fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        style: TextStyle,
    ) -> Result<(), SurfaceError> {
        self.recording.draw_text(x, y, text, style)?;
        self.canvas.draw_text(x, y, text, style)
    }

    fn draw_icon(&mut self, x: i32, y: i32, icon: &IconBitmap) -> Result<(), SurfaceError> {
        self.recording.draw_icon(x, y, icon)?;
        self.canvas.draw_icon(x, y, icon)
    }

    fn flush(&mut self) -> Result<(), SurfaceError> {
        self.recording.flush()?;
        self.canvas.flush()?;

        println!("{}", self.summary());
        if let Some(path) = &self.frame_dump {
            if let Err(e) = self.canvas.target().write_ppm(path) {
                warn!("Frame dump to {} failed: {}", path.display(), e);
            }
        }
        Ok(())
    }
}
