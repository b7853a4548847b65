// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Handle to a running session.

use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::error::{Error, Result};
use crate::event::{EventBus, SessionEvent, SessionId};
use crate::state::Point;
use crate::types::PointId;

use super::SessionState;
use super::engine::{Request, reject_send};

/// Handle to a session running on its own tokio task.
///
/// The task owns the connection and the point mirror; every method here
/// exchanges messages with it. Dropping the handle stops the session, as
/// does [`close`](Self::close).
///
/// # Examples
///
/// ```no_run
/// use knv_heatpump::Session;
/// use knv_heatpump::subscription::Notification;
///
/// # async fn example() -> knv_heatpump::Result<()> {
/// let session = Session::builder("192.168.1.40")
///     .credentials("admin", "secret")
///     .on_update(|notification: &Notification| {
///         for point in notification.points() {
///             println!("{} = {:?}", point.metadata().name, point.value());
///         }
///         Ok(())
///     })
///     .spawn()?;
///
/// session.wait_for_state(knv_heatpump::SessionState::Live).await?;
/// session.send("1.110.2.1".parse()?, 45).await?;
/// session.close().await
/// # }
/// ```
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    requests: mpsc::Sender<Request>,
    shutdown: watch::Sender<bool>,
    state: watch::Receiver<SessionState>,
    events: EventBus,
    task: JoinHandle<Result<()>>,
}

impl Session {
    pub(super) fn new(
        id: SessionId,
        requests: mpsc::Sender<Request>,
        shutdown: watch::Sender<bool>,
        state: watch::Receiver<SessionState>,
        events: EventBus,
        task: JoinHandle<Result<()>>,
    ) -> Self {
        Self {
            id,
            requests,
            shutdown,
            state,
            events,
            task,
        }
    }

    /// Returns the session id stamped on its events.
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    /// Returns a receiver that observes every state change.
    #[must_use]
    pub fn state_changes(&self) -> watch::Receiver<SessionState> {
        self.state.clone()
    }

    /// Waits until the session reaches `target`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Closed`] if the session ends first.
    pub async fn wait_for_state(&self, target: SessionState) -> Result<()> {
        let mut state = self.state.clone();
        let reached = state
            .wait_for(|current| *current == target || current.is_closed())
            .await
            .map(|current| *current)
            .map_err(|_| Error::Closed)?;

        if reached == target {
            Ok(())
        } else {
            Err(Error::Closed)
        }
    }

    /// Subscribes to the session's events.
    #[must_use]
    pub fn events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Writes a value to a point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] unless the session is live, in which
    /// case nothing is written. Returns [`Error::Closed`] if the session has
    /// ended.
    pub async fn send(&self, point: PointId, value: impl ToString) -> Result<()> {
        let state = self.state();
        if state.is_closed() {
            return Err(Error::Closed);
        }
        if !state.is_live() {
            reject_send(&self.events, self.id, point, state);
            return Err(Error::NotConnected);
        }

        let value = value.to_string();
        self.request(|reply| Request::Send {
            point,
            value,
            reply,
        })
        .await?
    }

    /// Adds a point to the subscription set.
    ///
    /// A hotlink is requested right away when connected, and on every later
    /// connection. Returns `false` if the point was already subscribed, in
    /// which case nothing is sent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Closed`] if the session has ended.
    pub async fn subscribe(&self, point: PointId) -> Result<bool> {
        self.request(|reply| Request::Subscribe { point, reply })
            .await
    }

    /// Returns a copy of every known point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Closed`] if the session has ended.
    pub async fn points(&self) -> Result<Vec<Point>> {
        self.request(|reply| Request::Points { reply }).await
    }

    /// Returns a copy of one point, if the device has described it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Closed`] if the session has ended.
    pub async fn point(&self, point: PointId) -> Result<Option<Point>> {
        self.request(|reply| Request::Point { point, reply }).await
    }

    /// Returns the subscribed points in subscription order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Closed`] if the session has ended.
    pub async fn subscriptions(&self) -> Result<Vec<PointId>> {
        self.request(|reply| Request::Subscriptions { reply }).await
    }

    /// Closes the session and waits for its task to finish.
    ///
    /// Interrupts a pending connect, receive or reconnect delay, skipping
    /// any frames not yet dispatched, and releases the connection.
    ///
    /// # Errors
    ///
    /// Returns the error that ended the session, if it had already failed.
    pub async fn close(self) -> Result<()> {
        self.shutdown.send_replace(true);
        join(self.task).await
    }

    /// Waits until the session ends on its own.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthenticationFailed`] or
    /// [`Error::ReconnectExhausted`], whichever ended the session.
    pub async fn wait(self) -> Result<()> {
        let Self {
            requests,
            shutdown,
            task,
            ..
        } = self;
        let result = join(task).await;
        drop((requests, shutdown));
        result
    }

    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Request) -> Result<T> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(make(reply))
            .await
            .map_err(|_| Error::Closed)?;
        response.await.map_err(|_| Error::Closed)
    }
}

async fn join(task: JoinHandle<Result<()>>) -> Result<()> {
    match task.await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!(error = %e, "Session task aborted");
            Err(Error::Closed)
        }
    }
}
