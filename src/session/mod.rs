// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Protocol session with a heat pump controller.
//!
//! A session owns one logical connection. On every (re)connect it runs the
//! bootstrap sequence:
//!
//! 1. identification preamble and `login`
//! 2. `printHotlinks`, `removeAllHotlinks`
//! 3. `getListFunctions` for lists 1 and 2
//! 4. `addHotlink` for every point of the subscription set
//!
//! It then dispatches every inbound frame by its command tag: function
//! lists extend the subscription set, `HLInfo` describes a point and
//! `HLVal` updates its value and fires the update callback.
//!
//! When the connection ends the session keeps its point mirror and
//! subscription set, waits as the [`ReconnectionPolicy`] says, and starts
//! over. A refused login ends the session.
//!
//! [`SessionBuilder::fetch`] runs the same exchange once and returns the
//! mirror when the device goes quiet.

mod builder;
mod config;
mod engine;
mod driver;
mod fetch;
mod handle;
mod state;

pub use builder::SessionBuilder;
pub use config::{
    DEFAULT_LOGIN_TIMEOUT, DEFAULT_PORT, DEFAULT_PREAMBLE, DEFAULT_QUIET_PERIOD,
    ReconnectionPolicy, SessionConfig,
};
pub use handle::Session;
pub use state::SessionState;
