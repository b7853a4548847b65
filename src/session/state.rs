// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session lifecycle states.

use std::fmt;

/// Lifecycle state of a session.
///
/// ```text
/// Connecting -> LoggingIn -> Discovering -> Subscribing -> Live
///     ^                                                     |
///     +------------------- connection lost -----------------+
/// ```
///
/// Any state moves to `Closed` when the session is closed or gives up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    /// Opening a connection, or waiting to retry.
    #[default]
    Connecting,
    /// Preamble and login sent.
    LoggingIn,
    /// Hotlinks cleared and function lists requested.
    Discovering,
    /// Hotlinks being added for the subscription set.
    Subscribing,
    /// Login confirmed; updates are dispatched and writes are accepted.
    Live,
    /// The session has ended.
    Closed,
}

impl SessionState {
    /// Returns `true` if writes are accepted.
    #[must_use]
    pub fn is_live(self) -> bool {
        matches!(self, Self::Live)
    }

    /// Returns `true` once the session has ended.
    #[must_use]
    pub fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Returns the state name as used in logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::LoggingIn => "logging_in",
            Self::Discovering => "discovering",
            Self::Subscribing => "subscribing",
            Self::Live => "live",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
