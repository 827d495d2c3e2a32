//! Host fakes for the face loops

use core::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::string::String;
use std::vec::Vec;

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::signal::Signal;
use embedded_hal_async::delay::DelayNs;

use sunshine_core::traits::{AssetSource, Clock, CompanionLink};
use sunshine_protocol::{
    AssetRef, DataEvent, DataEventBatch, DataMap, DataUri, OutgoingMessage, HIGH_TEMP_KEY,
    ICON_KEY, LOW_TEMP_KEY,
};

/// 2026-10-19 14:05:09 UTC
pub const OCT_19_2026: u64 = 1_792_418_709_000;

/// Error returned by the fakes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeError;

/// Manually advanced wall clock
pub struct FakeClock {
    now_ms: Cell<u64>,
    offset_s: Cell<i32>,
}

impl FakeClock {
    pub fn new(now_ms: u64) -> Self {
        Self {
            now_ms: Cell::new(now_ms),
            offset_s: Cell::new(0),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now_ms.set(self.now_ms.get() + ms);
    }

    pub fn set_offset(&self, offset_s: i32) {
        self.offset_s.set(offset_s);
    }
}

impl Clock for FakeClock {
    fn now_utc_ms(&self) -> u64 {
        self.now_ms.get()
    }

    fn utc_offset_s(&self) -> i32 {
        self.offset_s.get()
    }
}

/// Delay that advances a [`FakeClock`] and yields once
pub struct FakeDelay<'a> {
    clock: &'a FakeClock,
    delays: &'a RefCell<Vec<u32>>,
}

impl<'a> FakeDelay<'a> {
    pub fn new(clock: &'a FakeClock, delays: &'a RefCell<Vec<u32>>) -> Self {
        Self { clock, delays }
    }
}

impl DelayNs for FakeDelay<'_> {
    async fn delay_ns(&mut self, ns: u32) {
        self.delay_ms(ns.div_ceil(1_000_000)).await
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.delays.borrow_mut().push(ms);
        self.clock.advance(ms as u64);
        embassy_futures::yield_now().await;
    }
}

/// In-memory companion link
///
/// `next_batch` never returns once the queue is empty.
#[derive(Default)]
pub struct FakeLink {
    queue: VecDeque<Vec<DataEvent>>,
    pub sent: Vec<OutgoingMessage>,
    pub connect_failures: u32,
    pub fail_next_batch: bool,
    pub fail_send: bool,
    pub connects: u32,
    pub disconnects: u32,
}

impl FakeLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, events: Vec<DataEvent>) {
        self.queue.push_back(events);
    }
}

impl CompanionLink for FakeLink {
    type Error = FakeError;

    async fn connect(&mut self) -> Result<(), FakeError> {
        self.connects += 1;
        if self.connect_failures > 0 {
            self.connect_failures -= 1;
            return Err(FakeError);
        }
        Ok(())
    }

    async fn disconnect(&mut self) {
        self.disconnects += 1;
    }

    async fn next_batch(&mut self, batch: &mut DataEventBatch) -> Result<(), FakeError> {
        if self.fail_next_batch {
            self.fail_next_batch = false;
            return Err(FakeError);
        }
        batch.clear();
        match self.queue.pop_front() {
            Some(events) => {
                for event in events {
                    batch.push(event).map_err(|_| FakeError)?;
                }
                Ok(())
            }
            None => core::future::pending().await,
        }
    }

    async fn send_message(&mut self, message: &OutgoingMessage) -> Result<(), FakeError> {
        if self.fail_send {
            return Err(FakeError);
        }
        self.sent.push(message.clone());
        Ok(())
    }
}

/// In-memory asset store, optionally held until a gate opens
pub struct FakeAssets<'a> {
    blobs: Vec<(String, Vec<u8>)>,
    gate: Option<&'a Signal<NoopRawMutex, ()>>,
    pub fetches: u32,
}

impl FakeAssets<'static> {
    pub fn new() -> Self {
        Self {
            blobs: Vec::new(),
            gate: None,
            fetches: 0,
        }
    }
}

impl<'a> FakeAssets<'a> {
    /// Hold every fetch until `gate` is signaled
    pub fn gated<'b>(self, gate: &'b Signal<NoopRawMutex, ()>) -> FakeAssets<'b> {
        FakeAssets {
            blobs: self.blobs,
            gate: Some(gate),
            fetches: self.fetches,
        }
    }

    pub fn insert(&mut self, digest: &str, bytes: Vec<u8>) {
        self.blobs.push((String::from(digest), bytes));
    }
}

impl AssetSource for FakeAssets<'_> {
    type Error = FakeError;

    async fn fetch(&mut self, asset: &AssetRef, buf: &mut [u8]) -> Result<usize, FakeError> {
        self.fetches += 1;
        if let Some(gate) = self.gate {
            gate.wait().await;
        }

        let (_, bytes) = self
            .blobs
            .iter()
            .find(|(digest, _)| digest == asset.digest())
            .ok_or(FakeError)?;
        let out = buf.get_mut(..bytes.len()).ok_or(FakeError)?;
        out.copy_from_slice(bytes);
        Ok(bytes.len())
    }
}

/// Changed event carrying whichever weather fields are given
pub fn weather_event(
    node: &str,
    path: &str,
    high: Option<&str>,
    low: Option<&str>,
    icon: Option<&str>,
) -> DataEvent {
    let mut map = DataMap::new();
    if let Some(high) = high {
        map.put_text(HIGH_TEMP_KEY, high).unwrap();
    }
    if let Some(low) = low {
        map.put_text(LOW_TEMP_KEY, low).unwrap();
    }
    if let Some(icon) = icon {
        map.put_asset(ICON_KEY, AssetRef::new(icon).unwrap()).unwrap();
    }
    DataEvent::changed(DataUri::new(node, path).unwrap(), &map).unwrap()
}

/// Uncompressed 24-bit BMP filled with one BGR color
pub fn bmp24(width: u32, height: u32, bgr: [u8; 3]) -> Vec<u8> {
    let row = (width * 3 + 3) & !3;
    let image_size = row * height;

    let mut out = Vec::new();
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(54 + image_size).to_le_bytes());
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&54u32.to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&image_size.to_le_bytes());
    out.extend_from_slice(&2835u32.to_le_bytes());
    out.extend_from_slice(&2835u32.to_le_bytes());
    out.extend_from_slice(&[0; 8]);

    for _ in 0..height {
        for _ in 0..width {
            out.extend_from_slice(&bgr);
        }
        out.resize(out.len() + (row - width * 3) as usize, 0);
    }
    out
}
