//! Companion link traits
//!
//! The link is owned by the ingestion loop and has an explicit
//! connect/disconnect lifecycle tied to engine start and stop.

use sunshine_protocol::{AssetRef, DataEventBatch, OutgoingMessage};

/// Connection to the companion's data layer
#[allow(async_fn_in_trait)]
pub trait CompanionLink {
    /// Transport error type
    type Error: core::fmt::Debug;

    /// Open the connection and start receiving data events
    async fn connect(&mut self) -> Result<(), Self::Error>;

    /// Stop receiving data events and close the connection
    async fn disconnect(&mut self);

    /// Wait for the next batch of data events
    ///
    /// `batch` is cleared and filled with at least one event on success.
    async fn next_batch(&mut self, batch: &mut DataEventBatch) -> Result<(), Self::Error>;

    /// Send a fire-and-forget message to a peer
    async fn send_message(&mut self, message: &OutgoingMessage) -> Result<(), Self::Error>;
}

/// Resolver for out-of-band assets
///
/// Fetching may be slow; callers run it away from the render path.
#[allow(async_fn_in_trait)]
pub trait AssetSource {
    /// Fetch error type
    type Error: core::fmt::Debug;

    /// Copy the blob behind `asset` into `buf`, returning its length
    ///
    /// A blob larger than `buf` is an error.
    async fn fetch(&mut self, asset: &AssetRef, buf: &mut [u8]) -> Result<usize, Self::Error>;
}
