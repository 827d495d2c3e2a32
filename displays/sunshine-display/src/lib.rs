//! Draw surface abstraction and face renderer
//!
//! This crate provides:
//! - `DrawSurface` trait, the capability interface the face draws through
//! - `GraphicsSurface`, a `DrawSurface` over any embedded-graphics target
//! - `RecordingSurface`, which keeps the last frame's draw calls
//! - `FaceFrame`, one composed frame of the watch face
//!
//! # Architecture
//!
//! The face engine never talks to display hardware. Each redraw composes
//! a [`FaceFrame`] from the resolved style, the local time and a weather
//! snapshot, then replays it onto whatever surface the board provides.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod backend;
pub mod face;
pub mod graphics;
pub mod recording;

// Re-export key types
pub use backend::{DrawSurface, SurfaceError, TextStyle};
pub use face::FaceFrame;
pub use graphics::GraphicsSurface;
pub use recording::{DrawOp, RecordingSurface};
