//! Weather state
//!
//! Holds the last-known forecast pushed by the companion. The ingestion
//! pipeline is the only writer; renderers only ever see cloned
//! [`WeatherSnapshot`]s.

pub mod ingest;
pub mod snapshot;
pub mod store;

pub use ingest::{accept_event, IngestError, WeatherUpdate};
pub use snapshot::{Generation, Temperature, WeatherSnapshot};
pub use store::{ApplyOutcome, Completion, PendingFetch, WeatherStore};
