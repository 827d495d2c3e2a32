//! Weather snapshot types

use heapless::String;
use sunshine_protocol::MAX_TEXT_LEN;

use crate::asset::IconBitmap;

/// Temperature text as sent by the companion (e.g. `"72°"`)
pub type Temperature = String<MAX_TEXT_LEN>;

/// Icon generation token
///
/// Bumped every time a new icon reference is accepted. A decode result
/// carrying an older generation is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Generation(u32);

impl Generation {
    /// Generation before any icon was requested
    pub const INITIAL: Self = Self(0);

    /// The following generation
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub const fn value(self) -> u32 {
        self.0
    }
}

/// Last-known weather
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherSnapshot {
    /// Forecast high; empty until first received
    pub high: Temperature,
    /// Forecast low; empty until first received
    pub low: Temperature,
    /// Most recently decoded icon
    pub icon: Option<IconBitmap>,
    /// An icon fetch is outstanding
    pub icon_pending: bool,
    /// Generation of the newest accepted icon reference
    pub generation: Generation,
}

impl WeatherSnapshot {
    /// Empty snapshot as created at engine start
    pub const fn new() -> Self {
        Self {
            high: Temperature::new(),
            low: Temperature::new(),
            icon: None,
            icon_pending: false,
            generation: Generation::INITIAL,
        }
    }
}

impl Default for WeatherSnapshot {
    fn default() -> Self {
        Self::new()
    }
}
