//! Recording draw surface
//!
//! Keeps the draw calls of the current frame instead of rasterizing
//! them. `clear` starts a new frame; `flush` closes it.

use heapless::{String, Vec};

use sunshine_core::asset::IconBitmap;
use sunshine_core::config::Color;

use crate::backend::{DrawSurface, SurfaceError, TextStyle};

/// Maximum draw calls kept per frame
pub const MAX_OPS: usize = 16;

/// Maximum recorded text length
pub const MAX_TEXT_LEN: usize = 32;

/// A recorded draw call
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrawOp {
    Clear(Color),
    FillRect {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Color,
    },
    Line {
        start: (i32, i32),
        end: (i32, i32),
        color: Color,
    },
    Text {
        x: i32,
        y: i32,
        text: String<MAX_TEXT_LEN>,
        style: TextStyle,
    },
    Icon {
        x: i32,
        y: i32,
        width: u16,
        height: u16,
    },
}

/// Surface that records draw calls
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    ops: Vec<DrawOp, MAX_OPS>,
    frames: u32,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
            frames: 0,
        }
    }

    /// Draw calls since the last `clear`
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Number of flushed frames
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Background of the current frame
    pub fn background(&self) -> Option<Color> {
        self.ops.iter().find_map(|op| match op {
            DrawOp::Clear(color) => Some(*color),
            _ => None,
        })
    }

    /// Text strings drawn in the current frame, in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Check if the current frame drew an icon
    pub fn has_icon(&self) -> bool {
        self.ops.iter().any(|op| matches!(op, DrawOp::Icon { .. }))
    }

    fn record(&mut self, op: DrawOp) -> Result<(), SurfaceError> {
        self.ops.push(op).map_err(|_| SurfaceError::BufferOverflow)
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) -> Result<(), SurfaceError> {
        self.ops.clear();
        self.record(DrawOp::Clear(color))
    }

    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Color,
    ) -> Result<(), SurfaceError> {
        self.record(DrawOp::FillRect {
            x,
            y,
            width,
            height,
            color,
        })
    }

    fn draw_line(
        &mut self,
        start: (i32, i32),
        end: (i32, i32),
        color: Color,
    ) -> Result<(), SurfaceError> {
        self.record(DrawOp::Line { start, end, color })
    }

    fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        style: TextStyle,
    ) -> Result<(), SurfaceError> {
        let text = String::try_from(text).map_err(|_| SurfaceError::BufferOverflow)?;
        self.record(DrawOp::Text { x, y, text, style })
    }

    fn draw_icon(&mut self, x: i32, y: i32, icon: &IconBitmap) -> Result<(), SurfaceError> {
        self.record(DrawOp::Icon {
            x,
            y,
            width: icon.width(),
            height: icon.height(),
        })
    }

    fn flush(&mut self) -> Result<(), SurfaceError> {
        self.frames += 1;
        Ok(())
    }
}
