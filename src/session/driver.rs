// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Supervised session loop.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::Instant;

use crate::error::{Error, Result};
use crate::event::SessionEvent;
use crate::protocol::{Connector, Transport};

use super::SessionState;
use super::engine::{Engine, Request};

/// How one connection cycle ended.
enum Cycle {
    /// Closed on request, or every handle was dropped.
    Closed,
    /// The connection failed or ended; the session may retry.
    Lost { reason: String, reached_live: bool },
    /// The session cannot continue.
    Failed(Error),
}

/// What woke the serve loop.
enum Wake<F> {
    Shutdown,
    Request(Option<Request>),
    Frame(F),
    LoginTimeout,
}

/// Owns the connector and the session engine for the lifetime of the task.
///
/// The task stops when `shutdown` changes or its sender is dropped, and when
/// every request sender is gone.
pub(super) struct Driver<C: Connector> {
    connector: C,
    engine: Engine,
    requests: mpsc::Receiver<Request>,
    shutdown: watch::Receiver<bool>,
}

impl<C: Connector> Driver<C> {
    pub(super) fn new(
        connector: C,
        engine: Engine,
        requests: mpsc::Receiver<Request>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            connector,
            engine,
            requests,
            shutdown,
        }
    }

    /// Runs connection cycles until closed, refused, or out of retries.
    pub(super) async fn run(mut self) -> Result<()> {
        let mut retries = 0u32;

        let result = loop {
            let (reason, reached_live) = match self.cycle().await {
                Cycle::Closed => break Ok(()),
                Cycle::Failed(error) => break Err(error),
                Cycle::Lost {
                    reason,
                    reached_live,
                } => (reason, reached_live),
            };

            if reached_live {
                retries = 0;
            }
            tracing::warn!(%reason, "Connection lost");
            self.engine.publish(SessionEvent::Disconnected {
                session_id: self.engine.id(),
                reason,
            });
            self.engine.set_state(SessionState::Connecting);

            let policy = self.engine.config().reconnection();
            if !policy.should_retry(retries) {
                tracing::error!(attempts = retries, "Reconnection attempts exhausted");
                break Err(Error::ReconnectExhausted { attempts: retries });
            }
            let delay = policy.delay_for_attempt(retries);
            retries += 1;

            tracing::info!(
                attempt = retries,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "Reconnecting"
            );
            self.engine.publish(SessionEvent::Reconnecting {
                session_id: self.engine.id(),
                attempt: retries,
                delay,
            });

            if self.idle(delay).await {
                break Ok(());
            }
        };

        match &result {
            Ok(()) => tracing::info!("Session closed"),
            Err(e) => tracing::error!(error = %e, "Session ended"),
        }
        self.engine.set_state(SessionState::Closed);
        result
    }

    /// Connects, bootstraps and serves one connection.
    async fn cycle(&mut self) -> Cycle {
        self.engine.set_state(SessionState::Connecting);
        let host = self.engine.config().host().to_string();
        let port = self.engine.config().port();

        let mut transport = {
            let mut connect = std::pin::pin!(self.connector.connect(&host, port));
            loop {
                tokio::select! {
                    biased;
                    _ = self.shutdown.changed() => return Cycle::Closed,
                    request = self.requests.recv() => match request {
                        Some(request) => {
                            let _ = self
                                .engine
                                .handle_request(request, None::<&mut C::Transport>)
                                .await;
                        }
                        None => return Cycle::Closed,
                    },
                    result = &mut connect => match result {
                        Ok(transport) => break transport,
                        Err(e) => {
                            tracing::warn!(%host, port, error = %e, "Connection failed");
                            return Cycle::Lost {
                                reason: e.to_string(),
                                reached_live: false,
                            };
                        }
                    },
                }
            }
        };
        tracing::info!(%host, port, "Connected");

        if let Err(e) = self.engine.bootstrap(&mut transport).await {
            return self.lost(e.to_string());
        }

        let outcome = self.serve(&mut transport).await;
        if !matches!(outcome, Cycle::Lost { .. })
            && let Err(e) = transport.close().await
        {
            tracing::debug!(error = %e, "Close handshake failed");
        }
        outcome
    }

    /// Dispatches frames and handle requests until the connection ends.
    ///
    /// A close request wins over everything else; frames already received
    /// are dispatched before any pending data request.
    async fn serve(&mut self, transport: &mut C::Transport) -> Cycle {
        let login_timeout = self.engine.config().login_timeout();
        let login_deadline = Instant::now() + login_timeout;

        loop {
            let login_pending = !self.engine.is_logged_in();
            let wake = tokio::select! {
                biased;
                _ = self.shutdown.changed() => Wake::Shutdown,
                frame = transport.receive() => Wake::Frame(frame),
                request = self.requests.recv() => Wake::Request(request),
                () = tokio::time::sleep_until(login_deadline), if login_pending => Wake::LoginTimeout,
            };

            match wake {
                Wake::Shutdown | Wake::Request(None) => return Cycle::Closed,
                Wake::Request(Some(request)) => {
                    if let Err(e) = self.engine.handle_request(request, Some(&mut *transport)).await
                    {
                        return self.lost(e.to_string());
                    }
                }
                Wake::Frame(Ok(Some(frame))) => match self.engine.dispatch(&frame, transport).await {
                    Ok(()) => {}
                    Err(Error::Protocol(e)) => return self.lost(e.to_string()),
                    Err(e) => return Cycle::Failed(e),
                },
                Wake::Frame(Ok(None)) => return self.lost("connection closed by device".to_string()),
                Wake::Frame(Err(e)) => return self.lost(e.to_string()),
                Wake::LoginTimeout => {
                    return self.lost(format!(
                        "no login response within {} ms",
                        login_timeout.as_millis()
                    ));
                }
            }
        }
    }

    /// Waits out a reconnect delay. Returns `true` if the session was closed.
    async fn idle(&mut self, delay: Duration) -> bool {
        let mut sleep = std::pin::pin!(tokio::time::sleep(delay));
        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.changed() => return true,
                request = self.requests.recv() => match request {
                    Some(request) => {
                        let _ = self
                            .engine
                            .handle_request(request, None::<&mut C::Transport>)
                            .await;
                    }
                    None => return true,
                },
                () = &mut sleep => return false,
            }
        }
    }

    fn lost(&self, reason: String) -> Cycle {
        Cycle::Lost {
            reason,
            reached_live: self.engine.is_logged_in(),
        }
    }
}
