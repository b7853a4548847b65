// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Builder for sessions and one-shot fetches.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::Instrument;

use crate::catalog::{KnvCatalog, SuffixCatalog};
use crate::error::Result;
use crate::event::{EventBus, SessionId};
use crate::protocol::Connector;
#[cfg(feature = "websocket")]
use crate::protocol::WebSocketConnector;
use crate::state::Point;
use crate::subscription::{CallbackError, Notification, NotifyMode, UpdateCallback};

use super::engine::Engine;
use super::driver::Driver;
use super::{ReconnectionPolicy, Session, SessionConfig, SessionState, fetch};

const REQUEST_CHANNEL_CAPACITY: usize = 32;

/// Builder for a [`Session`].
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use knv_heatpump::Session;
/// use knv_heatpump::session::ReconnectionPolicy;
///
/// # async fn example() -> knv_heatpump::Result<()> {
/// // One-shot read of every point
/// let points = Session::builder("192.168.1.40")
///     .credentials("admin", "secret")
///     .quiet_period(Duration::from_secs(1))
///     .fetch()
///     .await?;
///
/// // Long-running session giving up after ten failed reconnects
/// let session = Session::builder("192.168.1.40")
///     .credentials("admin", "secret")
///     .reconnection(ReconnectionPolicy::new().with_max_retries(10))
///     .spawn()?;
/// # Ok(())
/// # }
/// ```
pub struct SessionBuilder<C> {
    connector: C,
    config: SessionConfig,
    catalog: Arc<dyn SuffixCatalog>,
    callback: Option<UpdateCallback>,
    events: Option<EventBus>,
}

#[cfg(feature = "websocket")]
impl Session {
    /// Starts building a session to the device at `host` over WebSocket.
    #[must_use]
    pub fn builder(host: impl Into<String>) -> SessionBuilder<WebSocketConnector> {
        SessionBuilder::new(host, WebSocketConnector::new())
    }
}

impl<C: Connector> SessionBuilder<C> {
    /// Starts building a session that connects through `connector`.
    #[must_use]
    pub fn new(host: impl Into<String>, connector: C) -> Self {
        Self {
            connector,
            config: SessionConfig::new(host),
            catalog: Arc::new(KnvCatalog),
            callback: None,
            events: None,
        }
    }

    /// Replaces the connector.
    #[must_use]
    pub fn with_connector<D: Connector>(self, connector: D) -> SessionBuilder<D> {
        SessionBuilder {
            connector,
            config: self.config,
            catalog: self.catalog,
            callback: self.callback,
            events: self.events,
        }
    }

    /// Sets the login credentials.
    #[must_use]
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.username = username.into();
        self.config.password = password.into();
        self
    }

    /// Sets the device port (default 3118).
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Sets the identification frame sent before the login.
    #[must_use]
    pub fn preamble(mut self, preamble: impl Into<String>) -> Self {
        self.config.preamble = preamble.into();
        self
    }

    /// Sets what the update callback receives (default: the changed point).
    #[must_use]
    pub fn notify_mode(mut self, mode: NotifyMode) -> Self {
        self.config.notify_mode = mode;
        self
    }

    /// Sets the callback invoked once per value update.
    #[must_use]
    pub fn on_update<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Notification) -> std::result::Result<(), CallbackError> + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }

    /// Replaces the point catalog (default: [`KnvCatalog`]).
    #[must_use]
    pub fn catalog(mut self, catalog: impl SuffixCatalog + 'static) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }

    /// Sets the reconnection policy.
    #[must_use]
    pub fn reconnection(mut self, policy: ReconnectionPolicy) -> Self {
        self.config.reconnection = policy;
        self
    }

    /// Sets the silence that ends a one-shot fetch (default 500 ms).
    #[must_use]
    pub fn quiet_period(mut self, period: Duration) -> Self {
        self.config.quiet_period = period;
        self
    }

    /// Sets the time the device has to answer the login (default 10 s).
    #[must_use]
    pub fn login_timeout(mut self, timeout: Duration) -> Self {
        self.config.login_timeout = timeout;
        self
    }

    /// Publishes session events on `bus` instead of a private bus.
    #[must_use]
    pub fn event_bus(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    /// Returns the configuration built so far.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Starts the session on a new tokio task.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration)
    /// if the host or the credentials are missing.
    pub fn spawn(self) -> Result<Session> {
        self.config.validate()?;

        let id = SessionId::new();
        let span = tracing::info_span!("knv_session", session_id = %id, host = %self.config.host);
        let events = self.events.unwrap_or_default();
        let (state_tx, state_rx) = watch::channel(SessionState::Connecting);
        let (request_tx, request_rx) = mpsc::channel(REQUEST_CHANNEL_CAPACITY);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let engine = Engine::new(
            id,
            self.config,
            self.catalog,
            self.callback,
            events.clone(),
            state_tx,
        );
        let driver = Driver::new(self.connector, engine, request_rx, shutdown_rx);
        let task = tokio::spawn(driver.run().instrument(span));

        Ok(Session::new(
            id,
            request_tx,
            shutdown_tx,
            state_rx,
            events,
            task,
        ))
    }

    /// Connects once, reads every point, and disconnects.
    ///
    /// Returns once no frame has arrived for the quiet period after the
    /// login was confirmed. Never reconnects.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration)
    ///   if the host or the credentials are missing
    /// - [`Error::AuthenticationFailed`](crate::Error::AuthenticationFailed)
    ///   if the device refuses the login
    /// - [`Error::Protocol`](crate::Error::Protocol) if the connection fails
    pub async fn fetch(self) -> Result<Vec<Point>> {
        self.config.validate()?;

        let id = SessionId::new();
        let span = tracing::info_span!("knv_fetch", session_id = %id, host = %self.config.host);
        let (state_tx, _) = watch::channel(SessionState::Connecting);
        let engine = Engine::new(
            id,
            self.config,
            self.catalog,
            self.callback,
            self.events.unwrap_or_default(),
            state_tx,
        );

        fetch::run(self.connector, engine).instrument(span).await
    }
}

impl<C> fmt::Debug for SessionBuilder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionBuilder")
            .field("config", &self.config)
            .field("has_callback", &self.callback.is_some())
            .finish_non_exhaustive()
    }
}
