// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session events.
//!
//! A session publishes what happens to it (state changes, disconnects,
//! rejected frames, callback failures, ...) on an [`EventBus`]. The bus is
//! injected through the session builder; without one the session creates
//! its own, reachable via `Session::events`.
//!
//! # Examples
//!
//! ```
//! use knv_heatpump::event::{EventBus, SessionEvent, SessionId};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! let session_id = SessionId::new();
//! bus.publish(SessionEvent::LoggedIn { session_id, user_id: "3".to_string() });
//! assert_eq!(rx.try_recv().unwrap().session_id(), session_id);
//! ```

mod event_bus;
mod session_event;
mod session_id;

pub use event_bus::EventBus;
pub use session_event::SessionEvent;
pub use session_id::SessionId;
