//! Face engine for the weather watch face
//!
//! Wires the mode controller, tick scheduler, weather store and clock into
//! draw calls, and runs the asynchronous loops that feed them:
//!
//! - `tasks::face`: platform events and redraws (single owner of the engine)
//! - `tasks::tick`: second-aligned interactive tick
//! - `tasks::ingest`: companion data events and acknowledgments
//! - `tasks::materializer`: icon fetch and decode, off the render path
//!
//! Everything is generic over the raw mutex and the platform traits, so
//! the same code runs on a board executor or on the host.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

mod fmt;

pub mod engine;
pub mod shared;
pub mod tasks;

#[cfg(test)]
mod testing;

pub use engine::FaceEngine;
pub use shared::{FaceShared, TickCommand, EVENT_CHANNEL_SIZE};
