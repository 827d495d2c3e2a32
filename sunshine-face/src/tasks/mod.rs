//! Async face loops
//!
//! Each loop runs independently and communicates only through
//! [`FaceShared`](crate::FaceShared). They are plain generic async
//! functions; a board wraps each in a concrete executor task.

pub mod face;
pub mod ingest;
pub mod materializer;
pub mod tick;

pub use ingest::RECONNECT_DELAY_MS;
pub use materializer::ASSET_BUFFER_SIZE;
