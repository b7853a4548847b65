// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event bus for broadcasting session events.

use tokio::sync::broadcast;

use super::SessionEvent;

const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Broadcasts session events to any number of subscribers.
///
/// Backed by a tokio broadcast channel with a fixed capacity (default 256).
/// A subscriber that falls behind loses the oldest events and sees
/// `RecvError::Lagged`. Publishing never blocks the session.
///
/// Cloning the bus shares the channel, so one bus can be injected into
/// several sessions.
///
/// # Examples
///
/// ```
/// use knv_heatpump::event::{EventBus, SessionEvent, SessionId};
///
/// let bus = EventBus::new();
/// let mut rx = bus.subscribe();
///
/// bus.publish(SessionEvent::Disconnected {
///     session_id: SessionId::new(),
///     reason: "end of stream".to_string(),
/// });
/// assert_eq!(rx.try_recv().unwrap().kind(), "disconnected");
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<SessionEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a new event bus buffering at most `capacity` events.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribes to events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publishes an event. Without subscribers the event is discarded.
    pub fn publish(&self, event: SessionEvent) {
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
