//! Companion ingestion loop
//!
//! Connects the link, validates each delivered event and applies it to
//! the weather store in one locked step. Icon references are handed to
//! the materializer; nothing here waits on an icon.

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;

use sunshine_core::traits::CompanionLink;
use sunshine_core::weather::accept_event;
use sunshine_protocol::DataEventBatch;

use crate::fmt::{debug, info, trace, warn, Dbg};
use crate::shared::FaceShared;

/// Back-off between connection attempts
pub const RECONNECT_DELAY_MS: u32 = 5_000;

/// Run until the engine is destroyed
///
/// The link is connected on entry and disconnected on exit. A transport
/// error drops the connection and starts over.
pub async fn run<M, L, D>(shared: &FaceShared<M>, link: &mut L, delay: &mut D)
where
    M: RawMutex,
    L: CompanionLink,
    D: DelayNs,
{
    info!("Ingest task started");

    let mut batch = DataEventBatch::new();

    'session: loop {
        loop {
            match select(shared.stop_ingest().wait(), link.connect()).await {
                Either::First(()) => break 'session,
                Either::Second(Ok(())) => break,
                Either::Second(Err(e)) => {
                    warn!("Companion connect failed: {:?}", Dbg(&e));
                    let backoff = select(
                        shared.stop_ingest().wait(),
                        delay.delay_ms(RECONNECT_DELAY_MS),
                    );
                    if let Either::First(()) = backoff.await {
                        break 'session;
                    }
                }
            }
        }
        info!("Companion link connected");

        loop {
            batch.clear();
            match select(shared.stop_ingest().wait(), link.next_batch(&mut batch)).await {
                Either::First(()) => {
                    link.disconnect().await;
                    break 'session;
                }
                Either::Second(Ok(())) => {
                    ingest_batch(shared, link, &batch).await;
                }
                Either::Second(Err(e)) => {
                    warn!("Companion link error: {:?}", Dbg(&e));
                    link.disconnect().await;
                    continue 'session;
                }
            }
        }
    }

    info!("Ingest task stopped");
}

/// Apply one batch of events
///
/// Events are applied in order, so a later event in the batch wins.
/// Returns the number of accepted weather events.
pub async fn ingest_batch<M, L>(
    shared: &FaceShared<M>,
    link: &mut L,
    batch: &DataEventBatch,
) -> usize
where
    M: RawMutex,
    L: CompanionLink,
{
    let mut accepted = 0;

    for event in batch {
        // A torn-down face neither applies nor acknowledges
        if !shared.is_alive() {
            debug!("Dropping batch after teardown");
            break;
        }

        let update = match accept_event(event) {
            Ok(Some(update)) => update,
            Ok(None) => {
                trace!("Ignoring {:?} on {}", event.kind, event.uri);
                continue;
            }
            Err(e) => {
                warn!("Malformed weather payload from {}: {:?}", event.uri.node(), e);
                continue;
            }
        };

        let outcome = shared.with_weather(|store| store.apply(&update));
        if outcome.temperatures_changed {
            shared.request_redraw();
        }

        // Best effort; a lost acknowledgment does not undo the update
        match update.ack() {
            Ok(ack) => {
                if let Err(e) = link.send_message(&ack).await {
                    warn!("Acknowledgment to {} failed: {:?}", ack.node, Dbg(&e));
                }
            }
            Err(e) => warn!("Cannot acknowledge {}: {:?}", update.uri, e),
        }

        if let Some(fetch) = outcome.fetch {
            debug!(
                "Icon {} is generation {}",
                fetch.asset.digest(),
                fetch.generation.value()
            );
            shared.fetch.signal(fetch);
        }

        accepted += 1;
    }

    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{weather_event, FakeClock, FakeDelay, FakeLink, OCT_19_2026};
    use core::cell::RefCell;
    use embassy_futures::block_on;
    use embassy_futures::join::join;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use std::vec;
    use std::vec::Vec;
    use sunshine_core::weather::Generation;
    use sunshine_protocol::{DataEvent, DataEventKind, DataUri, ACK_PATH, WEATHER_PATH};

    fn batch(events: Vec<DataEvent>) -> DataEventBatch {
        events.into_iter().collect()
    }

    #[test]
    fn test_weather_event_updates_snapshot_and_acks() {
        let shared = FaceShared::<NoopRawMutex>::new();
        let mut link = FakeLink::new();
        let events = batch(vec![
            weather_event("phone", WEATHER_PATH, Some("72"), Some("54"), Some("icon-a")),
            weather_event("phone", "/settings", Some("99"), None, None),
        ]);

        let accepted = block_on(ingest_batch(&shared, &mut link, &events));
        assert_eq!(accepted, 1);

        let snapshot = shared.snapshot();
        assert_eq!(snapshot.high.as_str(), "72");
        assert_eq!(snapshot.low.as_str(), "54");
        assert!(snapshot.icon_pending);
        assert!(shared.redraw.try_take().is_some());

        assert_eq!(link.sent.len(), 1);
        assert_eq!(link.sent[0].node.as_str(), "phone");
        assert_eq!(link.sent[0].path, ACK_PATH);
        assert_eq!(&link.sent[0].payload[..], b"wear://phone/temp");

        let fetch = shared.fetch.try_take().unwrap();
        assert_eq!(fetch.asset.digest(), "icon-a");
        assert_eq!(fetch.generation, Generation::INITIAL.next());
    }

    #[test]
    fn test_partial_payload_keeps_previous_low() {
        let shared = FaceShared::<NoopRawMutex>::new();
        let mut link = FakeLink::new();

        block_on(ingest_batch(
            &shared,
            &mut link,
            &batch(vec![weather_event("phone", WEATHER_PATH, Some("70"), Some("54"), None)]),
        ));
        block_on(ingest_batch(
            &shared,
            &mut link,
            &batch(vec![weather_event("phone", WEATHER_PATH, Some("75"), None, None)]),
        ));

        let snapshot = shared.snapshot();
        assert_eq!(snapshot.high.as_str(), "75");
        assert_eq!(snapshot.low.as_str(), "54");
        // No icon reference, no fetch
        assert!(shared.fetch.try_take().is_none());
    }

    #[test]
    fn test_malformed_payload_is_not_acknowledged() {
        let shared = FaceShared::<NoopRawMutex>::new();
        let mut link = FakeLink::new();
        let garbage = DataEvent {
            kind: DataEventKind::Changed,
            uri: DataUri::new("phone", WEATHER_PATH).unwrap(),
            payload: heapless::Vec::from_slice(&[0xFF, 0xFF, 0xFF]).unwrap(),
        };

        let accepted = block_on(ingest_batch(&shared, &mut link, &batch(vec![garbage])));

        assert_eq!(accepted, 0);
        assert!(link.sent.is_empty());
        assert!(shared.redraw.try_take().is_none());
    }

    #[test]
    fn test_ack_failure_keeps_update() {
        let shared = FaceShared::<NoopRawMutex>::new();
        let mut link = FakeLink::new();
        link.fail_send = true;

        block_on(ingest_batch(
            &shared,
            &mut link,
            &batch(vec![weather_event("phone", WEATHER_PATH, Some("72"), None, Some("icon-a"))]),
        ));

        assert_eq!(shared.snapshot().high.as_str(), "72");
        assert!(shared.fetch.try_take().is_some());
    }

    #[test]
    fn test_batch_after_teardown_is_not_acknowledged() {
        let shared = FaceShared::<NoopRawMutex>::new();
        let mut link = FakeLink::new();
        shared.shutdown();

        let accepted = block_on(ingest_batch(
            &shared,
            &mut link,
            &batch(vec![weather_event("phone", WEATHER_PATH, Some("72"), None, Some("icon-a"))]),
        ));

        assert_eq!(accepted, 0);
        assert!(link.sent.is_empty());
        assert_eq!(shared.snapshot().high.as_str(), "");
        assert!(shared.fetch.try_take().is_none());
    }

    #[test]
    fn test_later_event_in_batch_wins() {
        let shared = FaceShared::<NoopRawMutex>::new();
        let mut link = FakeLink::new();

        block_on(ingest_batch(
            &shared,
            &mut link,
            &batch(vec![
                weather_event("phone", WEATHER_PATH, Some("70"), None, Some("icon-a")),
                weather_event("phone", WEATHER_PATH, Some("71"), None, Some("icon-b")),
            ]),
        ));

        assert_eq!(shared.snapshot().high.as_str(), "71");
        let fetch = shared.fetch.try_take().unwrap();
        assert_eq!(fetch.asset.digest(), "icon-b");
        assert!(shared.with_weather(|store| store.is_current(fetch.generation)));
        assert_eq!(link.sent.len(), 2);
    }

    #[test]
    fn test_same_icon_in_flight_is_not_refetched() {
        let shared = FaceShared::<NoopRawMutex>::new();
        let mut link = FakeLink::new();

        block_on(ingest_batch(
            &shared,
            &mut link,
            &batch(vec![
                weather_event("phone", WEATHER_PATH, Some("70"), None, Some("icon-a")),
                weather_event("phone", WEATHER_PATH, Some("71"), None, Some("icon-a")),
            ]),
        ));

        let fetch = shared.fetch.try_take().unwrap();
        assert_eq!(fetch.generation, Generation::INITIAL.next());
        assert_eq!(shared.snapshot().generation, fetch.generation);
    }

    #[test]
    fn test_run_connects_ingests_and_disconnects() {
        let shared = FaceShared::<NoopRawMutex>::new();
        let clock = FakeClock::new(OCT_19_2026);
        let delays = RefCell::new(Vec::new());
        let mut delay = FakeDelay::new(&clock, &delays);
        let mut link = FakeLink::new();
        link.push(vec![weather_event("phone", WEATHER_PATH, Some("72"), Some("54"), None)]);

        block_on(join(run(&shared, &mut link, &mut delay), async {
            for _ in 0..8 {
                embassy_futures::yield_now().await;
            }
            shared.shutdown();
        }));

        assert_eq!(link.connects, 1);
        assert_eq!(link.disconnects, 1);
        assert_eq!(link.sent.len(), 1);
        assert_eq!(shared.snapshot().low.as_str(), "54");
    }

    #[test]
    fn test_connect_failure_retries_after_backoff() {
        let shared = FaceShared::<NoopRawMutex>::new();
        let clock = FakeClock::new(OCT_19_2026);
        let delays = RefCell::new(Vec::new());
        let mut delay = FakeDelay::new(&clock, &delays);
        let mut link = FakeLink::new();
        link.connect_failures = 2;

        block_on(join(run(&shared, &mut link, &mut delay), async {
            for _ in 0..8 {
                embassy_futures::yield_now().await;
            }
            shared.shutdown();
        }));

        assert_eq!(link.connects, 3);
        assert_eq!(*delays.borrow(), [RECONNECT_DELAY_MS, RECONNECT_DELAY_MS]);
        assert_eq!(link.disconnects, 1);
    }

    #[test]
    fn test_transport_error_reconnects() {
        let shared = FaceShared::<NoopRawMutex>::new();
        let clock = FakeClock::new(OCT_19_2026);
        let delays = RefCell::new(Vec::new());
        let mut delay = FakeDelay::new(&clock, &delays);
        let mut link = FakeLink::new();
        link.fail_next_batch = true;
        link.push(vec![weather_event("phone", WEATHER_PATH, Some("72"), None, None)]);

        block_on(join(run(&shared, &mut link, &mut delay), async {
            for _ in 0..8 {
                embassy_futures::yield_now().await;
            }
            shared.shutdown();
        }));

        assert_eq!(link.connects, 2);
        assert_eq!(link.disconnects, 2);
        assert_eq!(shared.snapshot().high.as_str(), "72");
    }
}
