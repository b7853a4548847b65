// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heat pump command definitions.
//!
//! This module provides typed representations of the commands a client sends
//! to the controller, and free functions that build their wire frames.
//!
//! # Available Commands
//!
//! | Command Type | Wire name | Purpose |
//! |-------------|-----------|---------|
//! | [`LoginCommand`] | `login` | Authenticate the connection |
//! | [`ListFunctionsCommand`] | `getListFunctions` | Request one half of the function catalog |
//! | [`PrintHotlinksCommand`] | `printHotlinks` | Ask for the server-side hotlink list |
//! | [`RemoveAllHotlinksCommand`] | `removeAllHotlinks` | Drop stale server-side hotlinks |
//! | [`AddHotlinkCommand`] | `addHotlink` | Subscribe to one point |
//! | [`SetValueCommand`] | `setVMValue` | Write one point |
//! | [`RawCommand`] | any | Forward an arbitrary command verbatim |
//!
//! # Command Structure
//!
//! Each command is a JSON object with a `command` name and an optional
//! `parameter` object, sent as one `#<json>\n` frame.
//!
//! # Examples
//!
//! ```
//! use knv_heatpump::command::{self, Command, SetValueCommand};
//! use knv_heatpump::types::PointId;
//!
//! let point: PointId = "1.110.2.0".parse().unwrap();
//! let cmd = SetValueCommand::new(point, 21.5);
//!
//! assert_eq!(cmd.name(), "setVMValue");
//! assert_eq!(
//!     cmd.to_frame(),
//!     "#{\"command\":\"setVMValue\",\"parameter\":{\"dap\":\"1.110.2.0\",\"value\":\"21.5\"}}\n"
//! );
//! assert_eq!(command::set_value(point, 21.5), cmd.to_frame());
//! ```

mod functions;
mod hotlink;
mod login;
mod value;

pub use functions::{FUNCTION_LIST_IDS, FUNCTION_LIST_TYPE, ListFunctionsCommand};
pub use hotlink::{AddHotlinkCommand, PrintHotlinksCommand, RemoveAllHotlinksCommand};
pub use login::LoginCommand;
pub use value::SetValueCommand;

use serde_json::{Map, Value};

use crate::catalog::SuffixCatalog;
use crate::protocol::wrap_frame;
use crate::types::{FunctionDescriptor, PointId};

/// A command that can be sent to the heat pump controller.
pub trait Command {
    /// Returns the wire name of the command, e.g. `"addHotlink"`.
    fn name(&self) -> &str;

    /// Returns the `parameter` object of the command, if any.
    fn parameter(&self) -> Option<Value>;

    /// Returns the complete wire frame for this command.
    fn to_frame(&self) -> String {
        command(self.name(), self.parameter())
    }
}

/// An arbitrary command, forwarded verbatim.
///
/// The name is not validated; an unknown command is the device's problem.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCommand {
    name: String,
    parameter: Option<Value>,
}

impl RawCommand {
    /// Creates a command without parameters.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameter: None,
        }
    }

    /// Attaches a parameter object.
    #[must_use]
    pub fn with_parameter(mut self, parameter: Value) -> Self {
        self.parameter = Some(parameter);
        self
    }
}

impl Command for RawCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameter(&self) -> Option<Value> {
        self.parameter.clone()
    }
}

/// Builds the frame for `{command: name, [parameter]}`.
#[must_use]
pub fn command(name: &str, parameter: Option<Value>) -> String {
    let mut body = Map::new();
    body.insert("command".to_string(), Value::String(name.to_string()));
    if let Some(parameter) = parameter {
        body.insert("parameter".to_string(), parameter);
    }
    wrap_frame(&Value::Object(body).to_string())
}

/// Builds the `login` frame.
#[must_use]
pub fn login(username: &str, password: &str) -> String {
    LoginCommand::new(username, password).to_frame()
}

/// Builds a `getListFunctions` frame.
#[must_use]
pub fn list_functions(list_id: u32, list_type: u32) -> String {
    ListFunctionsCommand::new(list_id, list_type).to_frame()
}

/// Builds the `printHotlinks` frame.
#[must_use]
pub fn print_hotlinks() -> String {
    PrintHotlinksCommand.to_frame()
}

/// Builds the `removeAllHotlinks` frame.
#[must_use]
pub fn remove_all_hotlinks() -> String {
    RemoveAllHotlinksCommand.to_frame()
}

/// Builds an `addHotlink` frame.
#[must_use]
pub fn add_hotlink(point: PointId) -> String {
    AddHotlinkCommand::new(point).to_frame()
}

/// Builds a `setVMValue` frame. The value is sent as its string form.
#[must_use]
pub fn set_value(point: PointId, value: impl ToString) -> String {
    SetValueCommand::new(point, value).to_frame()
}

/// Expands a function into the identifiers of all its points.
///
/// See [`crate::catalog::expand_function_to_point_ids`].
#[must_use]
pub fn expand_function_to_point_ids(
    catalog: &(impl SuffixCatalog + ?Sized),
    descriptor: &FunctionDescriptor,
) -> Vec<PointId> {
    crate::catalog::expand_function_to_point_ids(catalog, descriptor)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::catalog::KnvCatalog;
    use crate::protocol::decode_frame;

    #[test]
    fn command_without_parameter() {
        assert_eq!(command("printHotlinks", None), "#{\"command\":\"printHotlinks\"}\n");
    }

    #[test]
    fn command_with_parameter() {
        let frame = command("getListFunctions", Some(json!({"listId": 1, "type": 2})));
        assert_eq!(
            decode_frame(&frame).unwrap(),
            json!({"command": "getListFunctions", "parameter": {"listId": 1, "type": 2}})
        );
    }

    #[test]
    fn unknown_names_are_forwarded_verbatim() {
        let cmd = RawCommand::new("doesNotExist").with_parameter(json!({"x": 1}));
        assert_eq!(
            decode_frame(&cmd.to_frame()).unwrap(),
            json!({"command": "doesNotExist", "parameter": {"x": 1}})
        );
    }

    #[test]
    fn free_functions_match_typed_commands() {
        let point = PointId::new(1, 110, 2, 0);
        assert_eq!(add_hotlink(point), AddHotlinkCommand::new(point).to_frame());
        assert_eq!(list_functions(2, 2), ListFunctionsCommand::new(2, 2).to_frame());
        assert_eq!(print_hotlinks(), PrintHotlinksCommand.to_frame());
        assert_eq!(remove_all_hotlinks(), RemoveAllHotlinksCommand.to_frame());
    }

    #[test]
    fn expand_delegates_to_catalog() {
        let ids = expand_function_to_point_ids(&KnvCatalog, &FunctionDescriptor::new(1, 101, 7));
        assert_eq!(ids.len(), 5);
        assert_eq!(ids[4], PointId::new(1, 101, 7, 20));
    }
}
