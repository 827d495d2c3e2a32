//! Icon materializer loop
//!
//! Fetches and decodes forecast icons away from the render path. There
//! is no hard cancellation: a superseded fetch runs to completion and its
//! result is dropped by the generation check in the store.

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;

use sunshine_core::asset::{decode_icon, AssetError};
use sunshine_core::traits::AssetSource;
use sunshine_core::weather::{Completion, PendingFetch};

use crate::fmt::{debug, info, warn, Dbg};
use crate::shared::FaceShared;

/// Scratch buffer size for raw icon bytes
pub const ASSET_BUFFER_SIZE: usize = 16 * 1024;

/// Run until the engine is destroyed
pub async fn run<M, A>(shared: &FaceShared<M>, source: &mut A, buf: &mut [u8])
where
    M: RawMutex,
    A: AssetSource,
{
    info!("Materializer task started");

    loop {
        match select(shared.stop_materializer().wait(), shared.fetch.wait()).await {
            Either::First(()) => break,
            Either::Second(fetch) => {
                materialize(shared, source, buf, &fetch).await;
            }
        }
    }

    info!("Materializer task stopped");
}

/// Fetch, decode and publish one icon
///
/// Returns `None` if the fetch was already superseded and never started.
pub async fn materialize<M, A>(
    shared: &FaceShared<M>,
    source: &mut A,
    buf: &mut [u8],
    fetch: &PendingFetch,
) -> Option<Completion>
where
    M: RawMutex,
    A: AssetSource,
{
    let generation = fetch.generation;
    if !shared.with_weather(|store| store.is_current(generation)) {
        debug!("Skipping superseded icon generation {}", generation.value());
        return None;
    }

    let result = match source.fetch(&fetch.asset, buf).await {
        Ok(len) => match buf.get(..len) {
            Some(bytes) => decode_icon(bytes),
            None => Err(AssetError::TooLarge),
        },
        Err(e) => {
            warn!("Fetch of {} failed: {:?}", fetch.asset.digest(), Dbg(&e));
            Err(AssetError::Unresolved)
        }
    };

    let completion = shared.with_weather(|store| store.complete(generation, result));
    match completion {
        Completion::Applied => debug!("Icon generation {} applied", generation.value()),
        Completion::Failed(e) => {
            warn!("Icon generation {} failed: {:?}", generation.value(), e)
        }
        Completion::Stale => debug!("Icon generation {} is stale", generation.value()),
        Completion::Detached => debug!("Icon generation {} after teardown", generation.value()),
    }

    if completion.requests_redraw() {
        shared.request_redraw();
    }
    Some(completion)
}
