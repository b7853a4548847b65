// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hotlink (live subscription) commands.

use serde_json::{Value, json};

use super::Command;
use crate::types::PointId;

/// Subscribes to live updates of one point (`addHotlink`).
///
/// The device answers with an `HLInfo` describing the point, followed by
/// `HLVal` messages whenever its value changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddHotlinkCommand {
    point: PointId,
}

impl AddHotlinkCommand {
    /// Creates a new subscription command.
    #[must_use]
    pub const fn new(point: PointId) -> Self {
        Self { point }
    }

    /// Returns the subscribed point.
    #[must_use]
    pub const fn point(&self) -> PointId {
        self.point
    }
}

impl Command for AddHotlinkCommand {
    fn name(&self) -> &str {
        "addHotlink"
    }

    fn parameter(&self) -> Option<Value> {
        Some(json!({ "dap": self.point }))
    }
}

/// Asks the device to list its current hotlinks (`printHotlinks`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrintHotlinksCommand;

impl Command for PrintHotlinksCommand {
    fn name(&self) -> &str {
        "printHotlinks"
    }

    fn parameter(&self) -> Option<Value> {
        None
    }
}

/// Drops every hotlink of the connection (`removeAllHotlinks`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RemoveAllHotlinksCommand;

impl Command for RemoveAllHotlinksCommand {
    fn name(&self) -> &str {
        "removeAllHotlinks"
    }

    fn parameter(&self) -> Option<Value> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::decode_frame;

    #[test]
    fn add_hotlink_uses_dotted_point() {
        let frame = AddHotlinkCommand::new(PointId::new(1, 110, 254, 0)).to_frame();
        assert_eq!(
            decode_frame(&frame).unwrap(),
            json!({"command": "addHotlink", "parameter": {"dap": "1.110.254.0"}})
        );
    }

    #[test]
    fn clean_up_commands_have_no_parameter() {
        assert_eq!(
            PrintHotlinksCommand.to_frame(),
            "#{\"command\":\"printHotlinks\"}\n"
        );
        assert_eq!(
            RemoveAllHotlinksCommand.to_frame(),
            "#{\"command\":\"removeAllHotlinks\"}\n"
        );
    }
}
