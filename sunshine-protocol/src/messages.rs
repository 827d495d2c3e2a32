//! Data events and outgoing messages
//!
//! Message flow is one-way in each direction:
//! - Companion → Watch: data events (item changed / deleted)
//! - Watch → Companion: fire-and-forget messages (acknowledgments)

use heapless::{String, Vec};

use crate::payload::DataMap;
use crate::uri::{DataUri, MAX_NODE_LEN, MAX_URI_LEN};
use crate::DecodeError;

/// Path of the weather data item
pub const WEATHER_PATH: &str = "/temp";

/// Weather item keys
pub const HIGH_TEMP_KEY: &str = "hightemp";
pub const LOW_TEMP_KEY: &str = "lowtemp";
pub const ICON_KEY: &str = "forecast_icon";

/// Path acknowledgments are sent on
pub const ACK_PATH: &str = "/data-item-received";

/// Maximum encoded payload size per event
pub const MAX_PAYLOAD_SIZE: usize = 256;

/// Maximum events delivered in one batch
pub const MAX_BATCH: usize = 4;

/// What happened to a data item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataEventKind {
    /// Item was created or its contents changed
    Changed,
    /// Item was removed
    Deleted,
}

/// A single data item notification
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataEvent {
    pub kind: DataEventKind,
    pub uri: DataUri,
    /// Postcard-encoded [`DataMap`]
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

/// Events delivered together by the link
pub type DataEventBatch = Vec<DataEvent, MAX_BATCH>;

impl DataEvent {
    /// Build a changed event carrying `map`
    pub fn changed(uri: DataUri, map: &DataMap) -> Result<Self, DecodeError> {
        let mut buf = [0u8; MAX_PAYLOAD_SIZE];
        let bytes = map.encode(&mut buf)?;
        Ok(Self {
            kind: DataEventKind::Changed,
            uri,
            payload: Vec::from_slice(bytes).map_err(|_| DecodeError::BufferOverflow)?,
        })
    }

    /// Build a deleted event
    pub fn deleted(uri: DataUri) -> Self {
        Self {
            kind: DataEventKind::Deleted,
            uri,
            payload: Vec::new(),
        }
    }

    /// Decode the item contents
    pub fn data_map(&self) -> Result<DataMap, DecodeError> {
        DataMap::decode(&self.payload)
    }
}

/// A message addressed to a single peer
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutgoingMessage {
    /// Destination node id
    pub node: String<MAX_NODE_LEN>,
    pub path: &'static str,
    pub payload: Vec<u8, MAX_URI_LEN>,
}

impl OutgoingMessage {
    /// Acknowledge receipt of the item at `uri`
    ///
    /// The reply goes to the node that owns the item, with the item's
    /// rendered URI as payload.
    pub fn ack_for(uri: &DataUri) -> Result<Self, DecodeError> {
        let rendered = uri.to_heapless();
        Ok(Self {
            node: String::try_from(uri.node()).map_err(|_| DecodeError::BufferOverflow)?,
            path: ACK_PATH,
            payload: Vec::from_slice(rendered.as_bytes())
                .map_err(|_| DecodeError::BufferOverflow)?,
        })
    }
}
