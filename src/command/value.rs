// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value write command.

use serde_json::{Value, json};

use super::Command;
use crate::types::PointId;

/// Writes a value to a point (`setVMValue`).
///
/// The wire protocol is text only, so the value is stored as its string
/// representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetValueCommand {
    point: PointId,
    value: String,
}

impl SetValueCommand {
    /// Creates a new write command.
    #[must_use]
    pub fn new(point: PointId, value: impl ToString) -> Self {
        Self {
            point,
            value: value.to_string(),
        }
    }

    /// Returns the target point.
    #[must_use]
    pub const fn point(&self) -> PointId {
        self.point
    }

    /// Returns the value as sent on the wire.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Command for SetValueCommand {
    fn name(&self) -> &str {
        "setVMValue"
    }

    fn parameter(&self) -> Option<Value> {
        Some(json!({
            "dap": self.point,
            "value": self.value,
        }))
    }
}
