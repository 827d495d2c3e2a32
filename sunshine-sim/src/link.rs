//! Scripted companion link
//!
//! Stands in for the phone: the scenario driver queues data events and
//! the link hands them to the ingest loop in batches. Acknowledgments
//! are logged.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::{debug, info};

use sunshine_core::traits::CompanionLink;
use sunshine_protocol::{DataEvent, DataEventBatch, OutgoingMessage};

/// Queue depth between the scenario driver and the link
pub const PUSH_QUEUE_SIZE: usize = 8;

/// Data events waiting for the link
pub type PushQueue = Channel<CriticalSectionRawMutex, DataEvent, PUSH_QUEUE_SIZE>;

/// Link errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    /// Used before `connect`
    NotConnected,
}

/// Companion link fed from a [`PushQueue`]
pub struct ScriptedLink {
    pushes: &'static PushQueue,
    connected: bool,
}

impl ScriptedLink {
    pub fn new(pushes: &'static PushQueue) -> Self {
        Self {
            pushes,
            connected: false,
        }
    }
}

impl CompanionLink for ScriptedLink {
    type Error = LinkError;

    async fn connect(&mut self) -> Result<(), LinkError> {
        self.connected = true;
        info!("Companion connected");
        Ok(())
    }

    async fn disconnect(&mut self) {
        if self.connected {
            self.connected = false;
            info!("Companion disconnected");
        }
    }

    async fn next_batch(&mut self, batch: &mut DataEventBatch) -> Result<(), LinkError> {
        if !self.connected {
            return Err(LinkError::NotConnected);
        }

        batch.clear();

        // Block for the first event, then take whatever else is queued
        let first = self.pushes.receive().await;
        if batch.push(first).is_err() {
            return Ok(());
        }
        while !batch.is_full() {
            let Ok(event) = self.pushes.try_receive() else {
                break;
            };
            if batch.push(event).is_err() {
                break;
            }
        }
        debug!("Delivering {} event(s)", batch.len());
        Ok(())
    }

    async fn send_message(&mut self, message: &OutgoingMessage) -> Result<(), LinkError> {
        if !self.connected {
            return Err(LinkError::NotConnected);
        }
        info!(
            "-> {}{}: {}",
            message.node,
            message.path,
            String::from_utf8_lossy(&message.payload)
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use sunshine_protocol::{DataUri, WEATHER_PATH};

    fn deleted(node: &str) -> DataEvent {
        DataEvent::deleted(DataUri::new(node, WEATHER_PATH).unwrap())
    }

    #[test]
    fn test_batches_drain_queue() {
        static QUEUE: PushQueue = Channel::new();
        let mut link = ScriptedLink::new(&QUEUE);
        for node in ["a", "b", "c", "d", "e"] {
            QUEUE.try_send(deleted(node)).unwrap();
        }

        block_on(link.connect()).unwrap();
        let mut batch = DataEventBatch::new();
        block_on(link.next_batch(&mut batch)).unwrap();

        // Batch capacity caps the drain; the rest waits for the next call
        assert_eq!(batch.len(), batch.capacity());
        assert_eq!(batch[0].uri.node(), "a");
        assert_eq!(QUEUE.len(), 5 - batch.capacity());
    }

    #[test]
    fn test_previous_batch_is_replaced() {
        static QUEUE: PushQueue = Channel::new();
        let mut link = ScriptedLink::new(&QUEUE);
        let mut batch = DataEventBatch::new();
        while !batch.is_full() {
            batch.push(deleted("old")).unwrap();
        }
        QUEUE.try_send(deleted("fresh")).unwrap();

        block_on(link.connect()).unwrap();
        block_on(link.next_batch(&mut batch)).unwrap();

        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].uri.node(), "fresh");
        assert!(QUEUE.is_empty());
    }

    #[test]
    fn test_requires_connect() {
        static QUEUE: PushQueue = Channel::new();
        let mut link = ScriptedLink::new(&QUEUE);
        let mut batch = DataEventBatch::new();
        assert_eq!(
            block_on(link.next_batch(&mut batch)),
            Err(LinkError::NotConnected)
        );
    }
}
