//! Board-agnostic core logic for the weather watch face
//!
//! This crate contains all face logic that does not depend on a specific
//! display, transport, or executor:
//!
//! - Mode state machine (ambient/interactive, visible/hidden)
//! - Second-aligned tick scheduling
//! - Weather state and companion payload ingestion
//! - Forecast icon decoding
//! - Local time and text formatting
//! - Face configuration and resolved draw style
//! - Platform traits (clock, companion link, asset source)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod asset;
pub mod config;
pub mod scheduler;
pub mod state;
pub mod time;
pub mod traits;
pub mod weather;
