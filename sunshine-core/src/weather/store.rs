//! Single-writer weather store
//!
//! Every mutation happens in one method call, so a caller holding the
//! store behind a lock publishes each update as a single step. Icon
//! fetches are correlated by [`Generation`]; a completion for anything
//! but the newest generation is discarded.

use sunshine_protocol::AssetRef;

use super::ingest::WeatherUpdate;
use super::snapshot::{Generation, Temperature, WeatherSnapshot};
use crate::asset::{AssetError, IconBitmap};

/// Outstanding icon fetch
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PendingFetch {
    pub asset: AssetRef,
    pub generation: Generation,
}

/// Result of applying a weather update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// High or low text changed
    pub temperatures_changed: bool,
    /// New fetch to dispatch, if the update carried a new icon reference
    pub fetch: Option<PendingFetch>,
}

/// Result of completing an icon fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Completion {
    /// Icon replaced
    Applied,
    /// Fetch or decode failed; previous icon kept
    Failed(AssetError),
    /// A newer generation exists; result discarded
    Stale,
    /// Store was torn down; result discarded
    Detached,
}

impl Completion {
    /// Check if this completion must trigger a redraw
    pub fn requests_redraw(&self) -> bool {
        matches!(self, Completion::Applied | Completion::Failed(_))
    }
}

/// Weather store
#[derive(Debug, Clone)]
pub struct WeatherStore {
    snapshot: WeatherSnapshot,
    in_flight: Option<PendingFetch>,
    detached: bool,
}

impl Default for WeatherStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherStore {
    /// Create an empty store
    pub const fn new() -> Self {
        Self {
            snapshot: WeatherSnapshot::new(),
            in_flight: None,
            detached: false,
        }
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> WeatherSnapshot {
        self.snapshot.clone()
    }

    /// Newest accepted icon generation
    pub fn generation(&self) -> Generation {
        self.snapshot.generation
    }

    /// The fetch currently outstanding, if any
    pub fn in_flight(&self) -> Option<&PendingFetch> {
        self.in_flight.as_ref()
    }

    /// Apply an accepted update
    ///
    /// Absent temperature fields keep their previous value. An icon
    /// reference equal to the in-flight one does not start a new fetch.
    pub fn apply(&mut self, update: &WeatherUpdate) -> ApplyOutcome {
        if self.detached {
            return ApplyOutcome {
                temperatures_changed: false,
                fetch: None,
            };
        }

        let temperatures_changed =
            self.apply_temperatures(update.high.as_ref(), update.low.as_ref());
        let fetch = update.icon.as_ref().and_then(|asset| self.begin_fetch(asset));

        ApplyOutcome {
            temperatures_changed,
            fetch,
        }
    }

    /// Update high/low; returns `true` if either changed
    pub fn apply_temperatures(
        &mut self,
        high: Option<&Temperature>,
        low: Option<&Temperature>,
    ) -> bool {
        if self.detached {
            return false;
        }

        let mut changed = false;
        if let Some(high) = high {
            changed |= self.snapshot.high != *high;
            self.snapshot.high = high.clone();
        }
        if let Some(low) = low {
            changed |= self.snapshot.low != *low;
            self.snapshot.low = low.clone();
        }
        changed
    }

    /// Accept a new icon reference
    ///
    /// Returns `None` when the same reference is already being fetched.
    pub fn begin_fetch(&mut self, asset: &AssetRef) -> Option<PendingFetch> {
        if self.detached {
            return None;
        }
        if self
            .in_flight
            .as_ref()
            .is_some_and(|pending| pending.asset == *asset)
        {
            return None;
        }

        let generation = self.snapshot.generation.next();
        let fetch = PendingFetch {
            asset: asset.clone(),
            generation,
        };
        self.snapshot.generation = generation;
        self.snapshot.icon_pending = true;
        self.in_flight = Some(fetch.clone());
        Some(fetch)
    }

    /// Check if a fetch for `generation` is still wanted
    pub fn is_current(&self, generation: Generation) -> bool {
        !self.detached && generation == self.snapshot.generation
    }

    /// Record the outcome of a fetch
    pub fn complete(
        &mut self,
        generation: Generation,
        result: Result<IconBitmap, AssetError>,
    ) -> Completion {
        if self.detached {
            return Completion::Detached;
        }
        if generation != self.snapshot.generation {
            return Completion::Stale;
        }

        self.in_flight = None;
        self.snapshot.icon_pending = false;
        match result {
            Ok(icon) => {
                self.snapshot.icon = Some(icon);
                Completion::Applied
            }
            Err(e) => Completion::Failed(e),
        }
    }

    /// Tear down; all later mutations are no-ops
    pub fn detach(&mut self) {
        self.detached = true;
        self.in_flight = None;
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }
}
