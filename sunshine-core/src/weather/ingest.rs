//! Companion payload validation
//!
//! Turns raw data events into typed [`WeatherUpdate`]s. Events for other
//! paths are not errors; they are simply not ours.

use sunshine_protocol::{
    AssetRef, DataEvent, DataEventKind, DataUri, DecodeError, OutgoingMessage, HIGH_TEMP_KEY,
    ICON_KEY, LOW_TEMP_KEY, WEATHER_PATH,
};

use super::snapshot::Temperature;

/// Errors raised while validating a weather event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IngestError {
    /// Payload on the weather path could not be decoded
    Malformed(DecodeError),
}

impl From<DecodeError> for IngestError {
    fn from(e: DecodeError) -> Self {
        IngestError::Malformed(e)
    }
}

/// Validated contents of one weather event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherUpdate {
    /// Source item, used for the acknowledgment
    pub uri: DataUri,
    pub high: Option<Temperature>,
    pub low: Option<Temperature>,
    pub icon: Option<AssetRef>,
}

impl WeatherUpdate {
    /// Acknowledgment to send back to the originating node
    pub fn ack(&self) -> Result<OutgoingMessage, DecodeError> {
        OutgoingMessage::ack_for(&self.uri)
    }
}

/// Validate a data event
///
/// Returns `Ok(None)` for events that are not weather changes.
pub fn accept_event(event: &DataEvent) -> Result<Option<WeatherUpdate>, IngestError> {
    if event.kind != DataEventKind::Changed || event.uri.path() != WEATHER_PATH {
        return Ok(None);
    }

    let map = event.data_map()?;
    let text = |key: &str| {
        map.get_text(key)
            .and_then(|value| Temperature::try_from(value).ok())
    };

    Ok(Some(WeatherUpdate {
        uri: event.uri.clone(),
        high: text(HIGH_TEMP_KEY),
        low: text(LOW_TEMP_KEY),
        icon: map.get_asset(ICON_KEY).cloned(),
    }))
}
