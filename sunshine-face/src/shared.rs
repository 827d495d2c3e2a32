//! State shared between face tasks
//!
//! Tasks never reference each other; they communicate through the
//! channels and signals here. The weather store sits behind a blocking
//! mutex and is only read as a cloned snapshot.

use core::cell::RefCell;
use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use sunshine_core::state::FaceEvent;
use sunshine_core::weather::{PendingFetch, WeatherSnapshot, WeatherStore};

/// Channel capacity for platform events
pub const EVENT_CHANNEL_SIZE: usize = 8;

/// Command for the tick task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickCommand {
    /// Re-evaluate the schedule; `active` is the tick-should-run predicate
    Reschedule { active: bool },
    /// Drop any pending tick
    Cancel,
}

/// Channels, signals and the weather store
pub struct FaceShared<M: RawMutex> {
    /// Platform events for the face task
    pub events: Channel<M, FaceEvent, EVENT_CHANNEL_SIZE>,
    /// Redraw request; multiple requests collapse into one draw
    pub redraw: Signal<M, ()>,
    /// Tick schedule changes from the face task
    pub tick: Signal<M, TickCommand>,
    /// Newest icon fetch; a newer fetch replaces an unclaimed older one
    pub fetch: Signal<M, PendingFetch>,
    weather: Mutex<M, RefCell<WeatherStore>>,
    alive: AtomicBool,
    stop_face: Signal<M, ()>,
    stop_tick: Signal<M, ()>,
    stop_ingest: Signal<M, ()>,
    stop_materializer: Signal<M, ()>,
}

impl<M: RawMutex> Default for FaceShared<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex> FaceShared<M> {
    /// Create shared state with an empty weather store
    pub const fn new() -> Self {
        Self {
            events: Channel::new(),
            redraw: Signal::new(),
            tick: Signal::new(),
            fetch: Signal::new(),
            weather: Mutex::new(RefCell::new(WeatherStore::new())),
            alive: AtomicBool::new(true),
            stop_face: Signal::new(),
            stop_tick: Signal::new(),
            stop_ingest: Signal::new(),
            stop_materializer: Signal::new(),
        }
    }

    /// Ask for a redraw at the next opportunity
    pub fn request_redraw(&self) {
        self.redraw.signal(());
    }

    /// Copy of the current weather
    pub fn snapshot(&self) -> WeatherSnapshot {
        self.weather.lock(|store| store.borrow().snapshot())
    }

    /// Run `f` with exclusive access to the weather store
    ///
    /// Everything `f` does becomes visible to readers at once.
    pub fn with_weather<R>(&self, f: impl FnOnce(&mut WeatherStore) -> R) -> R {
        self.weather.lock(|store| f(&mut store.borrow_mut()))
    }

    /// Check if the engine has not been torn down
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Tear down: cancel the tick, detach the store, stop every task
    ///
    /// Work still in flight finishes against a detached store and
    /// becomes a no-op.
    pub fn shutdown(&self) {
        self.alive.store(false, Ordering::Release);
        self.with_weather(|store| store.detach());
        self.tick.signal(TickCommand::Cancel);
        self.stop_face.signal(());
        self.stop_tick.signal(());
        self.stop_ingest.signal(());
        self.stop_materializer.signal(());
    }

    pub(crate) fn stop_face(&self) -> &Signal<M, ()> {
        &self.stop_face
    }

    pub(crate) fn stop_tick(&self) -> &Signal<M, ()> {
        &self.stop_tick
    }

    pub(crate) fn stop_ingest(&self) -> &Signal<M, ()> {
        &self.stop_ingest
    }

    pub(crate) fn stop_materializer(&self) -> &Signal<M, ()> {
        &self.stop_materializer
    }
}
