//! One-way event channel between the bridge and the application layer.
//!
//! The producer side pushes named envelopes and never waits: a full channel
//! drops the envelope, an unsubscribed channel reports closure. There is no
//! acknowledgment and no delivery guarantee; a slow or absent subscriber
//! simply does not observe some samples.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use serde::Serialize;
use std::time::Duration;

/// A named event crossing the bridge boundary.
#[derive(Debug, Clone)]
pub struct EventEnvelope {
    /// Event name the application subscribes to
    pub name: String,
    /// JSON payload
    pub payload: serde_json::Value,
}

/// Outcome of a single emission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitStatus {
    /// The envelope was handed to the channel
    Delivered,
    /// The channel was full; the envelope is gone
    Dropped,
    /// Every subscriber is gone; the channel is dead
    Closed,
}

/// Producer half of the event channel.
#[derive(Clone)]
pub struct EventEmitter {
    sender: Sender<EventEnvelope>,
}

/// Consumer half of the event channel.
///
/// Cloneable; each envelope is observed by exactly one clone.
#[derive(Clone)]
pub struct EventSubscriber {
    receiver: Receiver<EventEnvelope>,
}

impl EventEmitter {
    /// Create a bounded emitter/subscriber pair.
    pub fn channel(capacity: usize) -> (EventEmitter, EventSubscriber) {
        let (sender, receiver) = bounded(capacity);
        (EventEmitter { sender }, EventSubscriber { receiver })
    }

    /// Emit a named event, fire-and-forget.
    ///
    /// A payload that fails to serialize is counted as dropped; that cannot
    /// happen for the sample types this crate emits.
    pub fn emit<T: Serialize>(&self, name: &str, payload: &T) -> EmitStatus {
        let payload = match serde_json::to_value(payload) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(event = name, error = %e, "unserializable event payload");
                return EmitStatus::Dropped;
            }
        };

        let envelope = EventEnvelope {
            name: name.to_string(),
            payload,
        };

        match self.sender.try_send(envelope) {
            Ok(()) => EmitStatus::Delivered,
            Err(TrySendError::Full(_)) => EmitStatus::Dropped,
            Err(TrySendError::Disconnected(_)) => EmitStatus::Closed,
        }
    }
}

impl EventSubscriber {
    /// Receive the next envelope, waiting up to `timeout`.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<EventEnvelope> {
        self.receiver.recv_timeout(timeout).ok()
    }

    /// Receive the next envelope without blocking.
    pub fn try_recv(&self) -> Option<EventEnvelope> {
        self.receiver.try_recv().ok()
    }

    /// Number of envelopes currently queued.
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_emit_and_receive() {
        let (emitter, subscriber) = EventEmitter::channel(8);
        let status = emitter.emit("TestEvent", &json!({"value": 1}));
        assert_eq!(status, EmitStatus::Delivered);

        let envelope = subscriber.try_recv().unwrap();
        assert_eq!(envelope.name, "TestEvent");
        assert_eq!(envelope.payload["value"], 1);
    }

    #[test]
    fn test_full_channel_drops_without_blocking() {
        let (emitter, subscriber) = EventEmitter::channel(1);
        assert_eq!(emitter.emit("E", &json!(1)), EmitStatus::Delivered);
        assert_eq!(emitter.emit("E", &json!(2)), EmitStatus::Dropped);
        assert_eq!(emitter.emit("E", &json!(3)), EmitStatus::Dropped);

        // Only the first envelope survived.
        assert_eq!(subscriber.try_recv().unwrap().payload, json!(1));
        assert!(subscriber.try_recv().is_none());
    }

    #[test]
    fn test_closed_after_subscriber_drop() {
        let (emitter, subscriber) = EventEmitter::channel(8);
        drop(subscriber);
        assert_eq!(emitter.emit("E", &json!(1)), EmitStatus::Closed);
    }
}
