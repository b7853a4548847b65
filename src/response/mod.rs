// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response parsing for inbound device frames.
//!
//! Every frame carries a `command` tag. [`Response::from_frame`] classifies
//! a frame by that tag and decodes its payload. Tags the library does not
//! know are kept as [`Response::Unrecognized`].

mod hotlink;
mod login;

use serde::Deserialize;
use serde_json::Value;

use crate::error::ParseError;
use crate::protocol::decode_frame;
use crate::state::PointMetadata;
use crate::types::FunctionDescriptor;

pub use hotlink::ValueUpdate;
pub use login::LoginResponse;

use hotlink::{HotlinkInfo, HotlinkValues};

/// A decoded inbound frame.
///
/// # Examples
///
/// ```
/// use knv_heatpump::response::Response;
///
/// let frame = "#{\"command\":\"HLVal\",\"values\":[{\"path\":\"1.110.2.0\",\"result\":\"50\"}]}\n";
/// match Response::from_frame(frame).unwrap() {
///     Response::HotlinkValues(updates) => assert_eq!(updates[0].value.as_str(), "50"),
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Answer to `login`.
    Login(LoginResponse),
    /// Acknowledgement of `printHotlinks`.
    PrintHotlinks,
    /// Acknowledgement of `removeAllHotlinks`.
    RemoveAllHotlinks,
    /// Acknowledgement of `addHotlink`.
    AddHotlink,
    /// Functions reported by `getListFunctions`.
    ListFunctions(Vec<FunctionDescriptor>),
    /// Metadata push for one point (`HLInfo`).
    HotlinkInfo(PointMetadata),
    /// Value push for one or more points (`HLVal`).
    HotlinkValues(Vec<ValueUpdate>),
    /// A well-formed frame with a tag the library does not handle.
    Unrecognized {
        /// The command tag.
        command: String,
        /// The whole decoded frame.
        body: Value,
    },
}

#[derive(Debug, Default, Deserialize)]
struct ListFunctions {
    #[serde(default)]
    result: ListFunctionsResult,
}

#[derive(Debug, Default, Deserialize)]
struct ListFunctionsResult {
    #[serde(default)]
    listfunctions: Vec<FunctionDescriptor>,
}

impl Response {
    /// Decodes a framed message (`#<json>\n`).
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the frame is malformed, has no `command`
    /// tag, or its payload does not match the tag.
    pub fn from_frame(frame: &str) -> Result<Self, ParseError> {
        Self::from_json(decode_frame(frame)?)
    }

    /// Classifies an already decoded message.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if `body` has no `command` tag or its payload
    /// does not match the tag.
    pub fn from_json(body: Value) -> Result<Self, ParseError> {
        let command = body
            .get("command")
            .and_then(Value::as_str)
            .ok_or_else(|| ParseError::MissingField("command".to_string()))?
            .to_string();

        let response = match command.as_str() {
            "login" => Self::Login(serde_json::from_value(body)?),
            "printHotlinks" => Self::PrintHotlinks,
            "removeAllHotlinks" => Self::RemoveAllHotlinks,
            "addHotlink" => Self::AddHotlink,
            "getListFunctions" => {
                let list: ListFunctions = serde_json::from_value(body)?;
                Self::ListFunctions(list.result.listfunctions)
            }
            "HLInfo" => {
                let info: HotlinkInfo = serde_json::from_value(body)?;
                Self::HotlinkInfo(info.into())
            }
            "HLVal" => {
                let values: HotlinkValues = serde_json::from_value(body)?;
                Self::HotlinkValues(values.into_updates())
            }
            _ => Self::Unrecognized { command, body },
        };
        Ok(response)
    }

    /// Returns the command tag this response was classified by.
    #[must_use]
    pub fn command(&self) -> &str {
        match self {
            Self::Login(_) => "login",
            Self::PrintHotlinks => "printHotlinks",
            Self::RemoveAllHotlinks => "removeAllHotlinks",
            Self::AddHotlink => "addHotlink",
            Self::ListFunctions(_) => "getListFunctions",
            Self::HotlinkInfo(_) => "HLInfo",
            Self::HotlinkValues(_) => "HLVal",
            Self::Unrecognized { command, .. } => command,
        }
    }

    /// Returns true for responses that only an authenticated connection
    /// receives: function lists and hotlink pushes.
    #[must_use]
    pub fn carries_data(&self) -> bool {
        matches!(
            self,
            Self::ListFunctions(_) | Self::HotlinkInfo(_) | Self::HotlinkValues(_)
        )
    }
}
