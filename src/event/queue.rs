//! Bounded hand-off of events to a consumer thread

use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError};

use super::{Event, SubscriptionId};

/// Receiving end of [`EventManager::subscribe`](super::EventManager::subscribe)
///
/// Events are owned copies: media payloads were retained when queued.
#[derive(Debug)]
pub struct EventQueue {
    id: SubscriptionId,
    receiver: Receiver<Event>,
}

impl EventQueue {
    pub(crate) fn new(id: SubscriptionId, receiver: Receiver<Event>) -> Self {
        Self { id, receiver }
    }

    /// Subscription feeding this queue
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Block until an event arrives, `None` once the subscription is gone
    pub fn recv(&self) -> Option<Event> {
        self.receiver.recv().ok()
    }

    /// Block up to `timeout`
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Event> {
        match self.receiver.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    pub fn try_recv(&self) -> Option<Event> {
        self.receiver.try_recv().ok()
    }

    /// Drain what is queued right now
    pub fn try_iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.receiver.try_iter()
    }

    /// Blocking iterator, ends once the subscription is gone
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.receiver.iter()
    }

    /// Events waiting
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}
