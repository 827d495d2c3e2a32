//! Companion data-layer protocol
//!
//! This crate defines what the phone companion pushes to the watch and
//! what the watch sends back. The transport itself is out of scope; a
//! link implementation hands the face engine batches of [`DataEvent`]s
//! and accepts [`OutgoingMessage`]s.
//!
//! # Data Model
//!
//! Every data item is addressed by a URI naming the originating node and
//! a path:
//! ```text
//! wear://<node-id>/temp
//! └─────┘└───────┘└───┘
//!  scheme   host    path
//! ```
//!
//! Item contents are a small key/value [`DataMap`] encoded with postcard.
//! Binary blobs such as the forecast icon travel out of band; the map
//! only carries an opaque [`AssetRef`] that the link resolves on demand.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod messages;
pub mod payload;
pub mod uri;

pub use messages::{
    DataEvent, DataEventBatch, DataEventKind, OutgoingMessage, ACK_PATH, HIGH_TEMP_KEY, ICON_KEY,
    LOW_TEMP_KEY, MAX_BATCH, MAX_PAYLOAD_SIZE, WEATHER_PATH,
};
pub use payload::{AssetRef, DataMap, DataValue, MAX_ENTRIES, MAX_TEXT_LEN};
pub use uri::{DataUri, MAX_NODE_LEN, MAX_PATH_LEN, MAX_URI_LEN, SCHEME};

/// Errors raised while decoding or encoding data-layer items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Payload bytes are not a valid data map
    Malformed,
    /// URI does not start with the `wear://` scheme
    MissingScheme,
    /// URI has no node id
    MissingHost,
    /// A field exceeds its fixed capacity
    BufferOverflow,
}
