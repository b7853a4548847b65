// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session state owned by the session task: bootstrap, dispatch, requests.

use std::sync::Arc;

use tokio::sync::{oneshot, watch};

use crate::catalog::{SuffixCatalog, baseline_point_ids, expand_function_to_point_ids};
use crate::command;
use crate::error::{Error, ProtocolError};
use crate::event::{EventBus, SessionEvent, SessionId};
use crate::protocol::{Transport, wrap_frame};
use crate::response::{LoginResponse, Response, ValueUpdate};
use crate::state::{Point, PointMetadata, PointStore};
use crate::subscription::{Notification, NotifyMode, SubscriptionSet, UpdateCallback, invoke};
use crate::types::{FunctionDescriptor, PointId};

use super::{SessionConfig, SessionState};

/// Requests a [`Session`](super::Session) handle sends to its task.
#[derive(Debug)]
pub(super) enum Request {
    Send {
        point: PointId,
        value: String,
        reply: oneshot::Sender<Result<(), Error>>,
    },
    Subscribe {
        point: PointId,
        reply: oneshot::Sender<bool>,
    },
    Points {
        reply: oneshot::Sender<Vec<Point>>,
    },
    Point {
        point: PointId,
        reply: oneshot::Sender<Option<Point>>,
    },
    Subscriptions {
        reply: oneshot::Sender<Vec<PointId>>,
    },
}

/// Everything a session owns besides its transport.
pub(super) struct Engine {
    id: SessionId,
    config: SessionConfig,
    catalog: Arc<dyn SuffixCatalog>,
    callback: Option<UpdateCallback>,
    events: EventBus,
    state: watch::Sender<SessionState>,
    points: PointStore,
    subscriptions: SubscriptionSet,
    logged_in: bool,
}

impl Engine {
    pub(super) fn new(
        id: SessionId,
        config: SessionConfig,
        catalog: Arc<dyn SuffixCatalog>,
        callback: Option<UpdateCallback>,
        events: EventBus,
        state: watch::Sender<SessionState>,
    ) -> Self {
        Self {
            id,
            config,
            catalog,
            callback,
            events,
            state,
            points: PointStore::new(),
            subscriptions: SubscriptionSet::new(),
            logged_in: false,
        }
    }

    pub(super) fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub(super) fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub(super) fn points(&self) -> &PointStore {
        &self.points
    }

    pub(super) fn publish(&self, event: SessionEvent) {
        self.events.publish(event);
    }

    pub(super) fn id(&self) -> SessionId {
        self.id
    }

    pub(super) fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    pub(super) fn set_state(&self, next: SessionState) {
        let previous = self.state.send_replace(next);
        if previous != next {
            tracing::debug!(from = %previous, to = %next, "Session state changed");
            self.publish(SessionEvent::StateChanged {
                session_id: self.id,
                from: previous,
                to: next,
            });
        }
    }

    /// Sends the bootstrap sequence on a fresh connection.
    ///
    /// All commands are written before any answer is read; the device
    /// answers them in order, `login` first.
    pub(super) async fn bootstrap<T: Transport>(
        &mut self,
        transport: &mut T,
    ) -> Result<(), ProtocolError> {
        self.logged_in = false;

        self.set_state(SessionState::LoggingIn);
        transport.send(&wrap_frame(&self.config.preamble)).await?;
        tracing::info!(username = %self.config.username, "Logging in");
        transport
            .send(&command::login(&self.config.username, self.config.password()))
            .await?;

        self.set_state(SessionState::Discovering);
        transport.send(&command::print_hotlinks()).await?;
        transport.send(&command::remove_all_hotlinks()).await?;
        for list_id in command::FUNCTION_LIST_IDS {
            transport
                .send(&command::list_functions(list_id, command::FUNCTION_LIST_TYPE))
                .await?;
        }

        self.set_state(SessionState::Subscribing);
        let added = self
            .subscriptions
            .extend_new(baseline_point_ids(self.catalog.as_ref()));
        tracing::debug!(
            added = added.len(),
            total = self.subscriptions.len(),
            "Adding hotlinks"
        );
        for point in self.subscriptions.iter() {
            transport.send(&command::add_hotlink(*point)).await?;
        }

        Ok(())
    }

    /// Handles one inbound frame.
    ///
    /// Malformed frames are skipped. Returns `Error::Protocol` when a reply
    /// could not be written and `Error::AuthenticationFailed` when the login
    /// was refused.
    pub(super) async fn dispatch<T: Transport>(
        &mut self,
        frame: &str,
        transport: &mut T,
    ) -> Result<(), Error> {
        let response = match Response::from_frame(frame) {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed frame");
                self.publish(SessionEvent::FrameRejected {
                    session_id: self.id,
                    error: e.to_string(),
                });
                return Ok(());
            }
        };

        if !self.logged_in && response.carries_data() {
            return Err(Error::AuthenticationFailed(format!(
                "expected login response, got {}",
                response.command()
            )));
        }

        match response {
            Response::Login(login) => self.on_login(login)?,
            ack @ (Response::PrintHotlinks | Response::RemoveAllHotlinks | Response::AddHotlink) => {
                tracing::trace!(command = ack.command(), "Acknowledged");
            }
            Response::ListFunctions(functions) => self.on_functions(&functions, transport).await?,
            Response::HotlinkInfo(metadata) => self.on_info(metadata),
            Response::HotlinkValues(updates) => self.on_values(updates),
            Response::Unrecognized { command, .. } => {
                tracing::debug!(%command, "Ignoring unhandled command");
            }
        }
        Ok(())
    }

    fn on_login(&mut self, login: LoginResponse) -> Result<(), Error> {
        let Some(user_id) = login.user_id.filter(|id| !id.is_empty()) else {
            tracing::error!(username = %self.config.username, "Login rejected");
            return Err(Error::AuthenticationFailed(
                "device rejected the credentials".to_string(),
            ));
        };

        tracing::info!(%user_id, "Logged in");
        self.logged_in = true;
        self.publish(SessionEvent::LoggedIn {
            session_id: self.id,
            user_id,
        });
        self.set_state(SessionState::Live);
        Ok(())
    }

    async fn on_functions<T: Transport>(
        &mut self,
        functions: &[FunctionDescriptor],
        transport: &mut T,
    ) -> Result<(), ProtocolError> {
        let mut added = 0usize;
        for function in functions {
            let points = expand_function_to_point_ids(self.catalog.as_ref(), function);
            for point in self.subscriptions.extend_new(points) {
                transport.send(&command::add_hotlink(point)).await?;
                added += 1;
            }
        }
        tracing::debug!(functions = functions.len(), added, "Function list received");
        Ok(())
    }

    fn on_info(&mut self, metadata: PointMetadata) {
        tracing::trace!(point = %metadata.path, name = %metadata.name, "Point described");
        self.points.upsert_metadata(metadata);
    }

    fn on_values(&mut self, updates: Vec<ValueUpdate>) {
        for ValueUpdate { path, value } in updates {
            let point = match self.points.set_value(path, value.clone()) {
                Ok(point) => point.clone(),
                Err(_) => {
                    tracing::warn!(point = %path, "Dropping value for undescribed point");
                    self.publish(SessionEvent::UnknownPoint {
                        session_id: self.id,
                        point: path,
                    });
                    continue;
                }
            };

            tracing::trace!(point = %path, %value, "Point updated");
            self.publish(SessionEvent::PointUpdated {
                session_id: self.id,
                point: path,
                value,
            });
            self.notify(point);
        }
    }

    fn notify(&self, point: Point) {
        let Some(callback) = &self.callback else {
            return;
        };
        let path = point.path();
        let notification = match self.config.notify_mode {
            NotifyMode::Point => Notification::Point(point),
            NotifyMode::Catalog => Notification::Catalog(self.points.snapshot()),
        };
        if let Err(error) = invoke(callback, &notification) {
            tracing::warn!(point = %path, %error, "Update callback failed");
            self.publish(SessionEvent::CallbackFailed {
                session_id: self.id,
                point: path,
                error,
            });
        }
    }

    /// Answers a handle request. `transport` is `None` unless a connection
    /// has completed its bootstrap.
    ///
    /// Returns an error only when writing to the transport failed.
    pub(super) async fn handle_request<T: Transport>(
        &mut self,
        request: Request,
        transport: Option<&mut T>,
    ) -> Result<(), ProtocolError> {
        match request {
            Request::Send {
                point,
                value,
                reply,
            } => {
                let state = self.state();
                let Some(transport) = transport.filter(|_| state.is_live()) else {
                    self.reject_send(point, state);
                    let _ = reply.send(Err(Error::NotConnected));
                    return Ok(());
                };
                tracing::debug!(%point, %value, "Writing value");
                match transport.send(&command::set_value(point, &value)).await {
                    Ok(()) => {
                        let _ = reply.send(Ok(()));
                    }
                    Err(e) => {
                        let _ = reply.send(Err(Error::Protocol(ProtocolError::ConnectionFailed(
                            e.to_string(),
                        ))));
                        return Err(e);
                    }
                }
            }
            Request::Subscribe { point, reply } => {
                let inserted = self.subscriptions.insert(point);
                if inserted {
                    tracing::debug!(%point, "Subscribing");
                    if let Some(transport) = transport {
                        let result = transport.send(&command::add_hotlink(point)).await;
                        let _ = reply.send(inserted);
                        return result;
                    }
                }
                let _ = reply.send(inserted);
            }
            Request::Points { reply } => {
                let _ = reply.send(self.points.snapshot());
            }
            Request::Point { point, reply } => {
                let _ = reply.send(self.points.get(&point).cloned());
            }
            Request::Subscriptions { reply } => {
                let _ = reply.send(self.subscriptions.to_vec());
            }
        }
        Ok(())
    }

    pub(super) fn reject_send(&self, point: PointId, state: SessionState) {
        reject_send(&self.events, self.id, point, state);
    }
}

/// Logs and publishes a write refused because the session is not live.
pub(super) fn reject_send(
    events: &EventBus,
    session_id: SessionId,
    point: PointId,
    state: SessionState,
) {
    tracing::warn!(%point, %state, "Write rejected, session is not live");
    events.publish(SessionEvent::SendRejected {
        session_id,
        point,
        state,
    });
}
