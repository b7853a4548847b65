// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hotlink subscriptions and update callbacks.
//!
//! - [`SubscriptionSet`] - The points the session keeps a hotlink for
//! - [`UpdateCallback`] - Invoked once per value the device pushes
//!
//! The subscription set survives reconnects: after a new connection the
//! session re-adds a hotlink for every point in it.
//!
//! Callbacks run on the session task. A callback that returns an error or
//! panics is logged and the session keeps running.

mod callback;
mod subscription_set;

pub use callback::{CallbackError, Notification, NotifyMode, UpdateCallback};
pub use subscription_set::SubscriptionSet;

pub(crate) use callback::invoke;
