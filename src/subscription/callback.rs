// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Update callbacks.
//!
//! - [`NotifyMode`] - What a callback receives per value update
//! - [`Notification`] - The payload handed to the callback
//! - [`CallbackError`] - Error type a callback may return

use std::any::Any;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use crate::state::Point;

/// What the session hands to the update callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotifyMode {
    /// The single point that changed.
    #[default]
    Point,
    /// A snapshot of every known point.
    Catalog,
}

/// Payload of one callback invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// The point that received a new value.
    Point(Point),
    /// Every known point, after the update was applied.
    Catalog(Vec<Point>),
}

impl Notification {
    /// Returns the points carried by this notification.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        match self {
            Self::Point(point) => std::slice::from_ref(point),
            Self::Catalog(points) => points,
        }
    }
}

/// Error returned by an update callback.
///
/// The session logs callback errors and keeps dispatching.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct CallbackError(Box<dyn std::error::Error + Send + Sync>);

impl CallbackError {
    /// Wraps any error.
    pub fn new(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(error.into())
    }

    /// Creates an error from a message.
    pub fn msg(message: impl fmt::Display) -> Self {
        Self(message.to_string().into())
    }
}

/// Shared update callback.
pub type UpdateCallback = Arc<dyn Fn(&Notification) -> Result<(), CallbackError> + Send + Sync>;

/// Runs a callback, turning both returned errors and panics into a message.
pub(crate) fn invoke(callback: &UpdateCallback, notification: &Notification) -> Result<(), String> {
    match catch_unwind(AssertUnwindSafe(|| callback(notification))) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(e.to_string()),
        Err(payload) => Err(format!("callback panicked: {}", panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "non-string payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PointMetadata;
    use crate::types::PointId;

    fn notification() -> Notification {
        Notification::Point(Point::new(PointMetadata::new(PointId::new(1, 110, 2, 0))))
    }

    #[test]
    fn ok_callback() {
        let callback: UpdateCallback = Arc::new(|_: &Notification| Ok(()));
        assert!(invoke(&callback, &notification()).is_ok());
    }

    #[test]
    fn error_is_reported() {
        let callback: UpdateCallback = Arc::new(|_: &Notification| Err(CallbackError::msg("store full")));
        assert_eq!(invoke(&callback, &notification()).unwrap_err(), "store full");
    }

    #[test]
    fn panic_is_caught() {
        let callback: UpdateCallback = Arc::new(|_: &Notification| -> Result<(), CallbackError> { panic!("boom") });
        let err = invoke(&callback, &notification()).unwrap_err();
        assert!(err.contains("boom"));
    }

    #[test]
    fn points_of_notification() {
        let single = notification();
        assert_eq!(single.points().len(), 1);
        assert!(Notification::Catalog(Vec::new()).points().is_empty());
    }
}
