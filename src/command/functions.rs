// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Function catalog query command.

use serde_json::{Value, json};

use super::Command;

/// List ids that together make up the device's function catalog.
pub const FUNCTION_LIST_IDS: [u32; 2] = [1, 2];

/// List type requested during discovery.
pub const FUNCTION_LIST_TYPE: u32 = 2;

/// Requests one list of the device's functions (`getListFunctions`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListFunctionsCommand {
    list_id: u32,
    list_type: u32,
}

impl ListFunctionsCommand {
    /// Creates a new list query.
    #[must_use]
    pub const fn new(list_id: u32, list_type: u32) -> Self {
        Self { list_id, list_type }
    }

    /// Returns the requested list id.
    #[must_use]
    pub const fn list_id(&self) -> u32 {
        self.list_id
    }

    /// Returns the requested list type.
    #[must_use]
    pub const fn list_type(&self) -> u32 {
        self.list_type
    }
}

impl Command for ListFunctionsCommand {
    fn name(&self) -> &str {
        "getListFunctions"
    }

    fn parameter(&self) -> Option<Value> {
        Some(json!({
            "listId": self.list_id,
            "type": self.list_type,
        }))
    }
}
