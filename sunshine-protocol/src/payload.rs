//! Data item payloads
//!
//! Items carry a small ordered key/value map. Keys are short ASCII names
//! (`hightemp`, `lowtemp`, ...); values are text, integers, flags, or a
//! reference to an out-of-band asset.

use heapless::{String, Vec};
use serde::{Deserialize, Serialize};

use crate::DecodeError;

/// Maximum entries per data map
pub const MAX_ENTRIES: usize = 8;

/// Maximum key length
pub const MAX_KEY_LEN: usize = 24;

/// Maximum text value length
pub const MAX_TEXT_LEN: usize = 32;

/// Maximum asset digest length
pub const MAX_DIGEST_LEN: usize = 64;

/// Opaque handle to a binary blob held by the companion
///
/// The watch never interprets the digest; it only hands it back to the
/// link when asking for the bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AssetRef {
    digest: String<MAX_DIGEST_LEN>,
}

impl AssetRef {
    /// Create a reference from its digest
    pub fn new(digest: &str) -> Result<Self, DecodeError> {
        Ok(Self {
            digest: String::try_from(digest).map_err(|_| DecodeError::BufferOverflow)?,
        })
    }

    /// The digest identifying the blob
    pub fn digest(&self) -> &str {
        &self.digest
    }
}

/// A single data map value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataValue {
    Text(String<MAX_TEXT_LEN>),
    Int(i64),
    Bool(bool),
    Asset(AssetRef),
}

/// Key/value contents of a data item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataMap {
    entries: Vec<(String<MAX_KEY_LEN>, DataValue), MAX_ENTRIES>,
}

impl DataMap {
    /// Create an empty map
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or replace a value
    pub fn insert(&mut self, key: &str, value: DataValue) -> Result<(), DecodeError> {
        if let Some((_, slot)) = self.entries.iter_mut().find(|(k, _)| k == key) {
            *slot = value;
            return Ok(());
        }
        let key = String::try_from(key).map_err(|_| DecodeError::BufferOverflow)?;
        self.entries
            .push((key, value))
            .map_err(|_| DecodeError::BufferOverflow)
    }

    /// Insert a text value
    pub fn put_text(&mut self, key: &str, text: &str) -> Result<(), DecodeError> {
        let text = String::try_from(text).map_err(|_| DecodeError::BufferOverflow)?;
        self.insert(key, DataValue::Text(text))
    }

    /// Insert an asset reference
    pub fn put_asset(&mut self, key: &str, asset: AssetRef) -> Result<(), DecodeError> {
        self.insert(key, DataValue::Asset(asset))
    }

    /// Look up a raw value
    pub fn get(&self, key: &str) -> Option<&DataValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    /// Look up a text value
    ///
    /// Returns `None` if the key is absent or holds another kind of value.
    pub fn get_text(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(DataValue::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Look up an asset reference
    pub fn get_asset(&self, key: &str) -> Option<&AssetRef> {
        match self.get(key) {
            Some(DataValue::Asset(asset)) => Some(asset),
            _ => None,
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode into `buf`, returning the used prefix
    pub fn encode<'b>(&self, buf: &'b mut [u8]) -> Result<&'b [u8], DecodeError> {
        postcard::to_slice(self, buf)
            .map(|used| &*used)
            .map_err(|_| DecodeError::BufferOverflow)
    }

    /// Decode from postcard bytes
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        postcard::from_bytes(bytes).map_err(|_| DecodeError::Malformed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn weather_map() -> DataMap {
        let mut map = DataMap::new();
        map.put_text("hightemp", "72").unwrap();
        map.put_text("lowtemp", "54").unwrap();
        map.put_asset("forecast_icon", AssetRef::new("sha1-rain").unwrap())
            .unwrap();
        map
    }

    #[test]
    fn test_typed_lookup() {
        let map = weather_map();
        assert_eq!(map.get_text("hightemp"), Some("72"));
        assert_eq!(map.get_asset("forecast_icon").map(|a| a.digest()), Some("sha1-rain"));
        // Wrong kind reads as absent
        assert_eq!(map.get_text("forecast_icon"), None);
        assert_eq!(map.get_asset("hightemp"), None);
        assert_eq!(map.get_text("humidity"), None);
    }

    #[test]
    fn test_insert_replaces_existing_key() {
        let mut map = weather_map();
        map.put_text("hightemp", "75").unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map.get_text("hightemp"), Some("75"));
    }

    #[test]
    fn test_capacity_is_enforced() {
        let mut map = DataMap::new();
        let keys = ["k0", "k1", "k2", "k3", "k4", "k5", "k6", "k7"];
        for key in keys {
            map.insert(key, DataValue::Bool(true)).unwrap();
        }
        assert_eq!(
            map.insert("k8", DataValue::Bool(true)),
            Err(DecodeError::BufferOverflow)
        );
    }

    #[test]
    fn test_encode_decode() {
        let map = weather_map();
        let mut buf = [0u8; 128];
        let bytes = map.encode(&mut buf).unwrap();
        assert_eq!(DataMap::decode(bytes).unwrap(), map);
    }

    #[test]
    fn test_encode_into_small_buffer() {
        let map = weather_map();
        let mut buf = [0u8; 4];
        assert_eq!(map.encode(&mut buf), Err(DecodeError::BufferOverflow));
    }

    #[test]
    fn test_decode_truncated() {
        let map = weather_map();
        let mut buf = [0u8; 128];
        let len = map.encode(&mut buf).unwrap().len();
        assert_eq!(DataMap::decode(&buf[..len - 3]), Err(DecodeError::Malformed));
    }

    proptest! {
        #[test]
        fn decode_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
            let _ = DataMap::decode(&bytes);
        }
    }
}
