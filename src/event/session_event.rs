// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session event types.

use std::time::Duration;

use crate::session::SessionState;
use crate::types::{PointId, PointValue};

use super::SessionId;

/// Events emitted by a running session.
///
/// Every event carries the id of the session that produced it.
///
/// # Examples
///
/// ```
/// use knv_heatpump::event::{SessionEvent, SessionId};
/// use knv_heatpump::session::SessionState;
///
/// let event = SessionEvent::StateChanged {
///     session_id: SessionId::new(),
///     from: SessionState::Connecting,
///     to: SessionState::LoggingIn,
/// };
/// assert_eq!(event.kind(), "state_changed");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The session moved to another state.
    StateChanged {
        /// The session.
        session_id: SessionId,
        /// Previous state.
        from: SessionState,
        /// New state.
        to: SessionState,
    },

    /// The device accepted the login.
    LoggedIn {
        /// The session.
        session_id: SessionId,
        /// User id assigned by the device.
        user_id: String,
    },

    /// The connection was lost.
    Disconnected {
        /// The session.
        session_id: SessionId,
        /// Why the connection ended.
        reason: String,
    },

    /// The session is waiting before the next connection attempt.
    Reconnecting {
        /// The session.
        session_id: SessionId,
        /// Attempt number, starting at 1.
        attempt: u32,
        /// Time until the attempt.
        delay: Duration,
    },

    /// A value update was applied to the mirror.
    PointUpdated {
        /// The session.
        session_id: SessionId,
        /// The updated point.
        point: PointId,
        /// The new value.
        value: PointValue,
    },

    /// The device pushed a value for a point it never described.
    UnknownPoint {
        /// The session.
        session_id: SessionId,
        /// The point named by the push.
        point: PointId,
    },

    /// A write was refused because the session is not live.
    SendRejected {
        /// The session.
        session_id: SessionId,
        /// The point that was to be written.
        point: PointId,
        /// State at the time of the write.
        state: SessionState,
    },

    /// An inbound frame could not be decoded and was skipped.
    FrameRejected {
        /// The session.
        session_id: SessionId,
        /// Decoder error.
        error: String,
    },

    /// The update callback returned an error or panicked.
    CallbackFailed {
        /// The session.
        session_id: SessionId,
        /// The point whose update triggered the callback.
        point: PointId,
        /// The error message.
        error: String,
    },
}

impl SessionEvent {
    /// Returns the session this event belongs to.
    #[must_use]
    pub fn session_id(&self) -> SessionId {
        match self {
            Self::StateChanged { session_id, .. }
            | Self::LoggedIn { session_id, .. }
            | Self::Disconnected { session_id, .. }
            | Self::Reconnecting { session_id, .. }
            | Self::PointUpdated { session_id, .. }
            | Self::UnknownPoint { session_id, .. }
            | Self::SendRejected { session_id, .. }
            | Self::FrameRejected { session_id, .. }
            | Self::CallbackFailed { session_id, .. } => *session_id,
        }
    }

    /// Returns a short snake case name of the event, for logs and metrics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::StateChanged { .. } => "state_changed",
            Self::LoggedIn { .. } => "logged_in",
            Self::Disconnected { .. } => "disconnected",
            Self::Reconnecting { .. } => "reconnecting",
            Self::PointUpdated { .. } => "point_updated",
            Self::UnknownPoint { .. } => "unknown_point",
            Self::SendRejected { .. } => "send_rejected",
            Self::FrameRejected { .. } => "frame_rejected",
            Self::CallbackFailed { .. } => "callback_failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_of_every_kind() {
        let session_id = SessionId::new();
        let point = PointId::new(1, 110, 2, 0);
        let events = [
            SessionEvent::LoggedIn {
                session_id,
                user_id: "1".to_string(),
            },
            SessionEvent::UnknownPoint { session_id, point },
            SessionEvent::SendRejected {
                session_id,
                point,
                state: SessionState::Connecting,
            },
            SessionEvent::Reconnecting {
                session_id,
                attempt: 2,
                delay: Duration::from_secs(5),
            },
        ];

        for event in events {
            assert_eq!(event.session_id(), session_id);
        }
    }

    #[test]
    fn kind_names() {
        let event = SessionEvent::FrameRejected {
            session_id: SessionId::new(),
            error: "bad".to_string(),
        };
        assert_eq!(event.kind(), "frame_rejected");
    }
}
